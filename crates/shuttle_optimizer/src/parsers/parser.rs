use std::path::Path;

use crate::problem::transport_problem::TransportProblem;

pub trait DatasetParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<TransportProblem, anyhow::Error>;
}
