pub mod json_parser;
pub mod parser;
