use thiserror::Error;

/// Inconsistent records detected while assembling a [`TransportProblem`].
///
/// [`TransportProblem`]: crate::problem::transport_problem::TransportProblem
#[derive(Debug, Error, PartialEq)]
pub enum ProblemError {
    #[error("{record} is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} name must not be empty")]
    EmptyName { record: &'static str },

    #[error("duplicate {record} name `{name}`")]
    DuplicateName { record: &'static str, name: String },

    #[error("faculty `{0}` has the same name as the depot")]
    FacultyNamedAsDepot(String),

    #[error("vehicle `{vehicle}` has invalid {field} {value} (must be a positive number)")]
    InvalidEfficiency {
        vehicle: String,
        field: &'static str,
        value: f64,
    },

    #[error("vehicle `{vehicle}` has invalid road distance {value} (must be non-negative)")]
    InvalidRoadDistance { vehicle: String, value: f64 },

    #[error("distance {origin} -> {destination} references unknown node `{node}`")]
    UnknownNode {
        origin: String,
        destination: String,
        node: String,
    },

    #[error("distance {origin} -> {destination} is invalid: {value}")]
    InvalidDistance {
        origin: String,
        destination: String,
        value: f64,
    },

    #[error("distance {origin} -> {destination} is listed more than once")]
    DuplicateDistance { origin: String, destination: String },
}
