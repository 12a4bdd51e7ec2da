//! Example: open and closed knight's tours on an 8x8 board.
//!
//! Run with:
//! `cargo run --example knights_tour`

use dfs_backtrack::{KnightsTour, Square, Tour};

fn main() {
    let start = Square::new(0, 0);
    for closed in [false, true] {
        let kind = if closed { "Closed" } else { "Open" };
        let solver = KnightsTour::new(8, closed).expect("8 is a valid board size");
        match solver.solve_from(start).expect("start is on the board") {
            Some(tour) => {
                println!("{kind} tour from {start}:");
                print_board(&tour);
                let path = tour.path();
                println!("ends at {} after {} squares\n", path[path.len() - 1], path.len());
            }
            None => println!("{kind} tour from {start}: no solution found\n"),
        }
    }
}

fn print_board(tour: &Tour) {
    for row in tour.board().rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|c| c.map_or("  .".to_string(), |m| format!("{m:3}")))
            .collect();
        println!("{}", cells.join(" "));
    }
}
