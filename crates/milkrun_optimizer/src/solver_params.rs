use jiff::SignedDuration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstSolutionStrategy {
    Savings,
    NearestNeighbor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalSearchStrategy {
    None,
    TwoOpt,
}

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub first_solution: FirstSolutionStrategy,
    pub local_search: LocalSearchStrategy,

    /// Wall-clock budget for the improvement phase; on expiry the solver
    /// returns the best solution found so far.
    pub time_limit: SignedDuration,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            first_solution: FirstSolutionStrategy::Savings,
            local_search: LocalSearchStrategy::TwoOpt,
            time_limit: SignedDuration::from_secs(10),
        }
    }
}
