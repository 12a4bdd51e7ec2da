use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use dfs_backtrack::problems::knights_tour::{SurveyEntry, SurveyOutcome, TourReport};
use dfs_backtrack::problems::lis::find_all_longest_increasing_with;
use dfs_backtrack::{KnightsTour, LongestIncreasing, SearchLimits, SearchStats, Square, Tour};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Sequence searched when `lis` is given no values.
const REFERENCE_SEQUENCE: [i64; 9] = [4, 1, 13, 7, 0, 2, 8, 11, 3];

#[derive(Parser, Debug)]
#[command(name = "dfs-backtrack", about = "Exhaustive backtracking searches")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enumerate every longest strictly increasing subsequence.
    Lis(LisArgs),
    /// Find one knight's tour from a start square.
    Tour(TourArgs),
    /// Try every start square of a board and report which admit a tour.
    Survey(SurveyArgs),
}

#[derive(ClapArgs, Debug)]
struct LimitArgs {
    /// Abort after entering this many search nodes.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    node_limit: Option<u64>,
    /// Abort after this many milliseconds of search.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl LimitArgs {
    fn limits(&self) -> SearchLimits {
        SearchLimits {
            node_limit: self.node_limit,
            deadline: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

#[derive(ClapArgs, Debug)]
struct LisArgs {
    /// Input sequence; defaults to the reference sequence.
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(ClapArgs, Debug)]
struct TourArgs {
    /// Board edge length.
    #[arg(long, default_value_t = 8)]
    size: usize,
    /// Start square as ROW,COL (0-based).
    #[arg(long, default_value = "0,0", value_parser = parse_square)]
    start: Square,
    /// Require the tour to end one knight move from the start.
    #[arg(long)]
    closed: bool,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(ClapArgs, Debug)]
struct SurveyArgs {
    #[arg(long, default_value_t = 5)]
    size: usize,
    #[arg(long)]
    closed: bool,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    // Limits apply to each start square separately.
    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn parse_square(value: &str) -> Result<Square, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| format!("'{part}' is not a non-negative integer"))
    };
    Ok(Square::new(parse(row)?, parse(col)?))
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Lis(args) => run_lis(args),
        Command::Tour(args) => run_tour(args),
        Command::Survey(args) => run_survey(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_lis(args: LisArgs) -> Result<ExitCode, Box<dyn Error>> {
    let values = if args.values.is_empty() {
        REFERENCE_SEQUENCE.to_vec()
    } else {
        args.values
    };
    let (best, stats) = find_all_longest_increasing_with(&values, args.limits.limits())?;
    match args.format {
        Format::Table => print_lis_table(&values, &best, &stats),
        Format::Json => {
            let doc = json!({ "input": values, "result": best, "stats": stats });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Format::Csv => {
            println!("member,length,values,indices");
            for (k, (seq, idx)) in best.subsequences.iter().zip(&best.indices).enumerate() {
                println!("{k},{},\"{}\",\"{}\"", best.length, join(seq), join(idx));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_tour(args: TourArgs) -> Result<ExitCode, Box<dyn Error>> {
    let solver = KnightsTour::new(args.size, args.closed)?;
    let report = solver.solve_with(args.start, args.limits.limits())?;
    match args.format {
        Format::Table => print_tour_table(&report, args.closed),
        Format::Json => {
            let doc = json!({
                "size": args.size,
                "start": args.start,
                "closed": args.closed,
                "found": report.tour.is_some(),
                "rows": report.tour.as_ref().map(board_rows),
                "path": report.tour.as_ref().map(Tour::path),
                "stats": report.stats,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Format::Csv => {
            println!("move,row,col");
            if let Some(tour) = &report.tour {
                for (step, sq) in tour.path().iter().enumerate() {
                    println!("{step},{},{}", sq.row, sq.col);
                }
            }
        }
    }
    Ok(if report.tour.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_survey(args: SurveyArgs) -> Result<ExitCode, Box<dyn Error>> {
    let solver = KnightsTour::new(args.size, args.closed)?;
    let entries = solver.survey(args.limits.limits());
    match args.format {
        Format::Table => print_survey_table(args.size, &entries),
        Format::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        Format::Csv => {
            println!("row,col,outcome,nodes");
            for e in &entries {
                let nodes = e.nodes.map(|n| n.to_string()).unwrap_or_default();
                println!("{},{},{},{nodes}", e.start.row, e.start.col, outcome_label(e.outcome));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_lis_table(values: &[i64], best: &LongestIncreasing<i64>, stats: &SearchStats) {
    println!("input: [{}]", join(values));
    println!("{}", "=".repeat(40));
    println!(
        "{} longest increasing subsequence(s) of length {}",
        best.len(),
        best.length
    );
    for seq in &best.subsequences {
        println!("  [{}]", join(seq));
    }
    println!("{}", "=".repeat(40));
    print_stats(stats);
}

fn print_tour_table(report: &TourReport, closed: bool) {
    let kind = if closed { "CLOSED TOUR" } else { "OPEN TOUR" };
    match &report.tour {
        None => println!("{kind}: no solution found"),
        Some(tour) => {
            let rule = "=".repeat(tour.size() * 4 + 1);
            println!("{kind} - knight's tour from {}", tour.start());
            println!("{rule}");
            for row in board_rows(tour) {
                let cells: Vec<String> = row.iter().map(|c| format!("{c:3}")).collect();
                println!("{}", cells.join(" "));
            }
            println!("{rule}");
        }
    }
    print_stats(&report.stats);
}

fn print_survey_table(size: usize, entries: &[SurveyEntry]) {
    for row in entries.chunks(size.max(1)) {
        let marks: Vec<&str> = row
            .iter()
            .map(|e| match e.outcome {
                SurveyOutcome::Found => "T",
                SurveyOutcome::NotFound => ".",
                SurveyOutcome::Abandoned => "?",
            })
            .collect();
        println!("{}", marks.join(" "));
    }
    let found = entries
        .iter()
        .filter(|e| e.outcome == SurveyOutcome::Found)
        .count();
    println!("{found}/{} start squares admit a tour (T found, . none, ? abandoned)", entries.len());
}

fn print_stats(stats: &SearchStats) {
    println!(
        "nodes={} max_depth={} time={:.4}s",
        stats.nodes,
        stats.max_depth,
        stats.elapsed.as_secs_f64()
    );
}

fn board_rows(tour: &Tour) -> Vec<Vec<usize>> {
    tour.board()
        .rows()
        .map(|row| row.iter().map(|c| c.unwrap_or_default()).collect())
        .collect()
}

fn outcome_label(outcome: SurveyOutcome) -> &'static str {
    match outcome {
        SurveyOutcome::Found => "found",
        SurveyOutcome::NotFound => "not_found",
        SurveyOutcome::Abandoned => "abandoned",
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
