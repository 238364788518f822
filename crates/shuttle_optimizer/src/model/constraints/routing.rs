use crate::{
    model::{
        linear::{Constraint, ConstraintFamily, LinearExpr},
        variables::VariableSchema,
    },
    problem::{node::NodeIdx, transport_problem::TransportProblem},
};

/// Rule 4: an active stop is entered by exactly one arc, an inactive one by
/// none.
pub(super) fn stop_requires_arrival(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        for faculty in problem.faculty_ids() {
            let to = NodeIdx::from(faculty);
            let mut expr: LinearExpr = problem
                .node_ids()
                .filter(|&from| from != to)
                .map(|from| (schema.arc(vehicle, from, to), 1.0))
                .collect();
            expr.add_term(schema.stop(vehicle, faculty), -1.0);

            constraints.push(Constraint::equal(
                ConstraintFamily::StopRequiresArrival,
                expr,
                0.0,
            ));
        }
    }
}

/// Rule 5: `arc[v,i,j] <= stop[v,i]` for faculty origins.
pub(super) fn departure_requires_stop(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        for faculty in problem.faculty_ids() {
            let from = NodeIdx::from(faculty);
            for to in problem.node_ids().filter(|&to| to != from) {
                let mut expr = LinearExpr::with_capacity(2);
                expr.add_term(schema.arc(vehicle, from, to), 1.0)
                    .add_term(schema.stop(vehicle, faculty), -1.0);

                constraints.push(Constraint::leq(
                    ConstraintFamily::DepartureRequiresStop,
                    expr,
                    0.0,
                ));
            }
        }
    }
}

/// Rule 6: `arc[v,i,j] <= stop[v,j]` for faculty destinations.
pub(super) fn arrival_requires_stop(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        for faculty in problem.faculty_ids() {
            let to = NodeIdx::from(faculty);
            for from in problem.node_ids().filter(|&from| from != to) {
                let mut expr = LinearExpr::with_capacity(2);
                expr.add_term(schema.arc(vehicle, from, to), 1.0)
                    .add_term(schema.stop(vehicle, faculty), -1.0);

                constraints.push(Constraint::leq(
                    ConstraintFamily::ArrivalRequiresStop,
                    expr,
                    0.0,
                ));
            }
        }
    }
}

/// Rule 11: at most one arc leaves a faculty, so routes cannot branch.
pub(super) fn single_faculty_departure(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        for faculty in problem.faculty_ids() {
            let from = NodeIdx::from(faculty);
            let expr = problem
                .node_ids()
                .filter(|&to| to != from)
                .map(|to| (schema.arc(vehicle, from, to), 1.0))
                .collect();

            constraints.push(Constraint::leq(
                ConstraintFamily::SingleFacultyDeparture,
                expr,
                1.0,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::linear::Valuation,
        problem::{faculty::FacultyIdx, vehicle::VehicleIdx},
        test_utils::create_three_faculty_problem,
    };

    #[test]
    fn test_branching_route_is_rejected() {
        let problem = create_three_faculty_problem();
        let schema = VariableSchema::new(&problem);
        let mut constraints = Vec::new();
        single_faculty_departure(&problem, &schema, &mut constraints);

        let vehicle = VehicleIdx::new(0);
        let law = NodeIdx::from(FacultyIdx::new(0));
        let mut valuation = Valuation::empty();
        valuation.set(schema.arc(vehicle, law, NodeIdx::new(2)), 1.0);
        valuation.set(schema.arc(vehicle, law, NodeIdx::new(3)), 1.0);

        assert!(
            constraints
                .iter()
                .any(|c| !c.is_satisfied_by(&valuation, 1e-6))
        );
    }

    #[test]
    fn test_second_arrival_is_rejected() {
        let problem = create_three_faculty_problem();
        let schema = VariableSchema::new(&problem);
        let mut constraints = Vec::new();
        stop_requires_arrival(&problem, &schema, &mut constraints);

        let vehicle = VehicleIdx::new(0);
        let arts = FacultyIdx::new(2);
        let mut valuation = Valuation::empty();
        valuation.set(schema.stop(vehicle, arts), 1.0);
        valuation.set(schema.arc(vehicle, NodeIdx::DEPOT, NodeIdx::from(arts)), 1.0);
        assert!(
            constraints
                .iter()
                .all(|c| c.is_satisfied_by(&valuation, 1e-6))
        );

        valuation.set(schema.arc(vehicle, NodeIdx::new(1), NodeIdx::from(arts)), 1.0);
        assert!(
            constraints
                .iter()
                .any(|c| !c.is_satisfied_by(&valuation, 1e-6))
        );
    }

    #[test]
    fn test_arc_out_of_inactive_stop_is_rejected() {
        let problem = create_three_faculty_problem();
        let schema = VariableSchema::new(&problem);
        let mut constraints = Vec::new();
        departure_requires_stop(&problem, &schema, &mut constraints);
        arrival_requires_stop(&problem, &schema, &mut constraints);

        let vehicle = VehicleIdx::new(1);
        let mut valuation = Valuation::empty();
        valuation.set(schema.arc(vehicle, NodeIdx::new(1), NodeIdx::new(2)), 1.0);
        valuation.set(schema.stop(vehicle, FacultyIdx::new(1)), 1.0);

        let violated = constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(&valuation, 1e-6))
            .map(|c| c.family())
            .collect::<Vec<_>>();

        assert_eq!(violated, vec![ConstraintFamily::DepartureRequiresStop]);
    }
}
