pub mod greedy_solver;
pub mod route_optimizer;
pub mod solver_params;

mod nearest_neighbor;
mod savings;
mod two_opt;

#[cfg(test)]
pub(crate) mod test_utils;
