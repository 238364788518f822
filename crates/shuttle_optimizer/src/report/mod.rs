pub mod report;
pub mod route_reconstruction;
