use serde::Serialize;

use crate::{define_index_newtype, problem::problem_error::ProblemError};

define_index_newtype!(FacultyIdx, Faculty);

/// A demand point: every one of its students must leave on some vehicle.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Faculty {
    name: String,
    demand: u32,
}

impl Faculty {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn demand(&self) -> u32 {
        self.demand
    }
}

#[derive(Default)]
pub struct FacultyBuilder {
    name: Option<String>,
    demand: Option<u32>,
}

impl FacultyBuilder {
    pub fn set_name(&mut self, name: String) -> &mut FacultyBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_demand(&mut self, demand: u32) -> &mut FacultyBuilder {
        self.demand = Some(demand);
        self
    }

    pub fn build(self) -> Result<Faculty, ProblemError> {
        let name = self.name.ok_or(ProblemError::MissingField {
            record: "faculty",
            field: "name",
        })?;

        if name.trim().is_empty() {
            return Err(ProblemError::EmptyName { record: "faculty" });
        }

        Ok(Faculty {
            name,
            demand: self.demand.unwrap_or(0),
        })
    }
}
