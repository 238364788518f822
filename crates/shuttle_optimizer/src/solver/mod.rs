pub mod planner;
pub mod planner_params;
