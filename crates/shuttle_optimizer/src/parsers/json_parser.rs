use std::{fs, io, path::Path};

use thiserror::Error;
use tracing::info;

use crate::{
    json::types::JsonTransportProblem,
    problem::{problem_error::ProblemError, transport_problem::TransportProblem},
};

use super::parser::DatasetParser;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file {path} does not exist")]
    SourceNotFound { path: String },

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("malformed input: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("inconsistent input: {0}")]
    Inconsistent(#[from] ProblemError),
}

pub struct JsonParser;

impl JsonParser {
    pub fn parse_str(&self, content: &str) -> Result<TransportProblem, InputError> {
        let input: JsonTransportProblem = serde_json::from_str(content)?;
        Ok(input.build_problem()?)
    }

    pub fn from_file<P: AsRef<Path>>(&self, file: P) -> Result<TransportProblem, InputError> {
        let path = file.as_ref();
        let content = fs::read_to_string(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => InputError::SourceNotFound {
                path: path.display().to_string(),
            },
            _ => InputError::Io(error),
        })?;

        let problem = self.parse_str(&content)?;

        info!(
            path = %path.display(),
            vehicles = problem.num_vehicles(),
            faculties = problem.num_faculties(),
            "Loaded transport problem"
        );

        Ok(problem)
    }
}

impl DatasetParser for JsonParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<TransportProblem, anyhow::Error> {
        Ok(self.from_file(file)?)
    }
}
