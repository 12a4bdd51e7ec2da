use dfs_backtrack::problems::knights_tour::{survey, SurveyOutcome};
use dfs_backtrack::{solve, KnightsTour, SearchLimits, Square, TourError};

fn assert_valid_tour(path: &[Square], n: usize, closed: bool) {
    assert_eq!(path.len(), n * n);
    let mut seen = vec![false; n * n];
    for sq in path {
        assert!(sq.row < n && sq.col < n, "{sq} off board");
        let idx = sq.row * n + sq.col;
        assert!(!seen[idx], "{sq} visited twice");
        seen[idx] = true;
    }
    for w in path.windows(2) {
        assert!(w[0].is_knight_move(w[1]), "{} -> {} is not a knight move", w[0], w[1]);
    }
    if closed {
        assert!(path[path.len() - 1].is_knight_move(path[0]));
    }
}

#[test]
fn open_five_from_corner_exists() {
    let tour = solve(5, Square::new(0, 0), false).unwrap().expect("tour");
    let path = tour.path();
    assert_eq!(path[0], Square::new(0, 0));
    assert_valid_tour(&path, 5, false);
}

#[test]
fn closed_five_is_not_found_rather_than_an_error() {
    // 25 squares alternate colours, so a closed tour is impossible; the
    // search has to exhaust the tree to learn that.
    assert_eq!(solve(5, Square::new(0, 0), true), Ok(None));
}

#[test]
fn open_five_from_minority_colour_has_no_tour() {
    assert_eq!(solve(5, Square::new(1, 0), false), Ok(None));
}

#[test]
fn eight_by_eight_open_and_closed_from_corner() {
    let open = solve(8, Square::new(0, 0), false).unwrap().expect("open tour");
    assert_valid_tour(&open.path(), 8, false);
    assert!(open.validate().is_ok());

    let closed = solve(8, Square::new(0, 0), true).unwrap().expect("closed tour");
    assert!(closed.is_closed());
    assert_valid_tour(&closed.path(), 8, true);
    assert!(closed.validate().is_ok());
}

#[test]
fn closed_eight_from_corner_is_pinned() {
    let tour = solve(8, Square::new(0, 0), true).unwrap().unwrap();
    let first_row: Vec<Option<usize>> = tour.board().rows().next().unwrap().to_vec();
    assert_eq!(
        first_row,
        [0, 33, 2, 17, 48, 31, 12, 15].map(Some).to_vec()
    );
    assert_eq!(tour.move_index(Square::new(7, 7)), Some(58));
    assert_eq!(tour.path()[63], Square::new(1, 2));
}

#[test]
fn open_tours_from_interior_start() {
    let tour = solve(8, Square::new(3, 4), false).unwrap().unwrap();
    assert_eq!(tour.start(), Square::new(3, 4));
    assert_valid_tour(&tour.path(), 8, false);
}

#[test]
fn larger_open_boards_need_no_backtracking() {
    for n in [6, 7, 10, 12, 16] {
        let report = KnightsTour::new(n, false)
            .unwrap()
            .solve_with(Square::new(0, 0), SearchLimits::default())
            .unwrap();
        let tour = report.tour.expect("Warnsdorff finds open tours from the corner");
        assert_valid_tour(&tour.path(), n, false);
        assert_eq!(report.stats.nodes, (n * n) as u64, "n={n}");
    }
}

#[test]
fn configuration_errors_are_distinct_from_not_found() {
    assert_eq!(
        solve(0, Square::new(0, 0), false),
        Err(TourError::InvalidBoardSize { size: 0 })
    );
    let err = solve(3, Square::new(3, 3), false).unwrap_err();
    assert_eq!(err.to_string(), "start square (3, 3) is outside the 3x3 board");
}

#[test]
fn survey_of_four_by_four_finds_nothing() {
    let entries = survey(4, false, SearchLimits::default()).unwrap();
    assert_eq!(entries.len(), 16);
    assert!(entries.iter().all(|e| e.outcome == SurveyOutcome::NotFound));
    assert_eq!(entries[5].start, Square::new(1, 1));
}

#[test]
fn survey_with_budget_marks_undecided_starts() {
    let limits = SearchLimits {
        node_limit: Some(500),
        deadline: None,
    };
    let entries = survey(5, false, limits).unwrap();
    let corner = &entries[0];
    assert_eq!(corner.outcome, SurveyOutcome::Found);
    assert_eq!(corner.nodes, Some(25));
    // (1, 0) has no tour; proving so takes far more than 500 nodes.
    assert_eq!(entries[5].outcome, SurveyOutcome::Abandoned);
    assert_eq!(entries[5].nodes, None);
}

#[test]
fn survey_rejects_empty_board() {
    assert!(matches!(
        survey(0, true, SearchLimits::default()),
        Err(TourError::InvalidBoardSize { .. })
    ));
}
