use dfs_backtrack::{SearchEngine, SearchEngineBuilder, SearchError, SearchProblem, Visit};

/// N-queens counter: accepts nothing, counts complete placements, and checks
/// that every `undo` sees exactly the state its `apply` produced.
struct Queens {
    n: usize,
    cols: Vec<usize>,
    solutions: usize,
}

impl Queens {
    fn new(n: usize) -> Self {
        Self {
            n,
            cols: Vec::new(),
            solutions: 0,
        }
    }

    fn safe(&self, col: usize) -> bool {
        let row = self.cols.len();
        self.cols
            .iter()
            .enumerate()
            .all(|(r, &c)| c != col && row - r != col.abs_diff(c))
    }
}

impl SearchProblem for Queens {
    type Move = usize;
    type Output = usize;

    fn visit(&mut self, depth: usize) -> Visit {
        assert_eq!(depth, self.cols.len());
        if self.cols.len() == self.n {
            self.solutions += 1;
        }
        Visit::Continue
    }
    fn candidates(&self, _depth: usize) -> Vec<usize> {
        if self.cols.len() == self.n {
            return Vec::new();
        }
        (0..self.n).filter(|&c| self.safe(c)).collect()
    }
    fn apply(&mut self, mv: usize) {
        self.cols.push(mv);
    }
    fn undo(&mut self, mv: usize) {
        assert_eq!(self.cols.pop(), Some(mv), "undo out of order");
    }
    fn finish(self, accepted: bool) -> usize {
        assert!(!accepted);
        assert!(self.cols.is_empty(), "exhaustive run must unwind to the root");
        self.solutions
    }
}

/// A problem with a single root node that rejects itself.
struct Dead;

impl SearchProblem for Dead {
    type Move = ();
    type Output = bool;

    fn visit(&mut self, _depth: usize) -> Visit {
        Visit::Reject
    }
    fn candidates(&self, _depth: usize) -> Vec<()> {
        unreachable!("rejected nodes are never expanded")
    }
    fn apply(&mut self, _mv: ()) {}
    fn undo(&mut self, _mv: ()) {}
    fn finish(self, accepted: bool) -> bool {
        accepted
    }
}

#[test]
fn exhaustive_search_counts_queens() {
    let expected = [1, 0, 0, 2, 10, 4, 40, 92];
    for (i, &count) in expected.iter().enumerate() {
        let (found, _) = SearchEngine::new(Queens::new(i + 1)).run().unwrap();
        assert_eq!(found, count, "n={}", i + 1);
    }
}

#[test]
fn node_counts_are_deterministic() {
    let (_, a) = SearchEngine::new(Queens::new(6)).run().unwrap();
    let (_, b) = SearchEngine::new(Queens::new(6)).run().unwrap();
    assert_eq!(a.nodes, b.nodes);
    assert_eq!(a.max_depth, 6);
}

#[test]
fn rejected_root_is_one_node() {
    let (accepted, stats) = SearchEngine::new(Dead).run().unwrap();
    assert!(!accepted);
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.max_depth, 0);
}

#[test]
fn builder_limit_stops_exhaustive_search() {
    let err = SearchEngineBuilder::new(Queens::new(8))
        .with_node_limit(100)
        .build()
        .run()
        .unwrap_err();
    assert_eq!(err, SearchError::NodeLimit { limit: 100 });
}
