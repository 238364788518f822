mod assignment;
mod depot;
mod routing;
pub mod subtour;

use tracing::debug;

use crate::problem::transport_problem::TransportProblem;

use super::{linear::Constraint, variables::VariableSchema};

/// Emits rules 1 to 11 of the formulation. Rule 12 (subtour elimination)
/// depends on the chosen [`subtour::SubtourElimination`] strategy and is
/// added by the model builder.
pub struct ConstraintGenerator<'a> {
    problem: &'a TransportProblem,
    schema: &'a VariableSchema,
}

impl<'a> ConstraintGenerator<'a> {
    pub fn new(problem: &'a TransportProblem, schema: &'a VariableSchema) -> Self {
        Self { problem, schema }
    }

    pub fn generate(&self) -> Vec<Constraint> {
        let mut constraints = Vec::new();

        assignment::demand(self.problem, self.schema, &mut constraints);
        assignment::capacity(self.problem, self.schema, &mut constraints);
        assignment::allocation_requires_stop(self.problem, self.schema, &mut constraints);
        routing::stop_requires_arrival(self.problem, self.schema, &mut constraints);
        routing::departure_requires_stop(self.problem, self.schema, &mut constraints);
        routing::arrival_requires_stop(self.problem, self.schema, &mut constraints);
        assignment::non_empty_stop(self.problem, self.schema, &mut constraints);
        depot::single_depot_departure(self.problem, self.schema, &mut constraints);
        depot::used_vehicle_leaves_depot(self.problem, self.schema, &mut constraints);
        depot::no_return_to_depot(self.problem, self.schema, &mut constraints);
        routing::single_faculty_departure(self.problem, self.schema, &mut constraints);

        debug!(
            constraints = constraints.len(),
            "Generated assignment and routing constraints"
        );

        constraints
    }
}
