pub mod arc_cost;
pub mod distance_table;
pub mod faculty;
pub mod node;
pub mod problem_error;
pub mod transport_problem;
pub mod vehicle;
