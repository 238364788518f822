pub mod json;
pub mod model;
pub mod oracle;
pub mod parsers;
pub mod problem;
pub mod report;
pub mod solver;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
