use std::time::Duration;

use crate::engine::SearchLimits;
use crate::{SearchEngine, SearchProblem};

pub struct SearchEngineBuilder<P: SearchProblem> {
    problem: P,
    limits: SearchLimits,
}

impl<P: SearchProblem> SearchEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            limits: SearchLimits::default(),
        }
    }

    /// Cap the number of nodes the engine may enter.
    ///
    /// # Panics
    /// Panics if `node_limit == 0`.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        assert!(node_limit > 0, "node_limit must be positive");
        self.limits.node_limit = Some(node_limit);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.limits.deadline = Some(deadline);
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> SearchEngine<P> {
        SearchEngine::with_limits(self.problem, self.limits)
    }
}
