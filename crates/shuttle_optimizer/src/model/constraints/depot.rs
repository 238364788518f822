use crate::{
    model::{
        linear::{Constraint, ConstraintFamily, LinearExpr},
        variables::VariableSchema,
    },
    problem::{node::NodeIdx, transport_problem::TransportProblem, vehicle::VehicleIdx},
};

fn depot_departures(
    problem: &TransportProblem,
    schema: &VariableSchema,
    vehicle: VehicleIdx,
) -> LinearExpr {
    problem
        .node_ids()
        .filter(|to| !to.is_depot())
        .map(|to| (schema.arc(vehicle, NodeIdx::DEPOT, to), 1.0))
        .collect()
}

/// Rule 8: a vehicle leaves the depot at most once.
pub(super) fn single_depot_departure(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        constraints.push(Constraint::leq(
            ConstraintFamily::SingleDepotDeparture,
            depot_departures(problem, schema, vehicle),
            1.0,
        ));
    }
}

/// Rule 9: `sum_j arc[v,Depot,j] >= (1 / |F|) * sum_f stop[v,f]`.
///
/// A vehicle has at most `|F|` stops, so the right hand side stays within
/// `[0, 1]` and any active stop forces the single departure. With no
/// faculties the divisor is floored to 1.
pub(super) fn used_vehicle_leaves_depot(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    let weight = 1.0 / problem.num_faculties().max(1) as f64;

    for vehicle in problem.vehicle_ids() {
        let mut expr = depot_departures(problem, schema, vehicle);
        for faculty in problem.faculty_ids() {
            expr.add_term(schema.stop(vehicle, faculty), -weight);
        }

        constraints.push(Constraint::geq(
            ConstraintFamily::UsedVehicleLeavesDepot,
            expr,
            0.0,
        ));
    }
}

/// Rule 10: routes are open, nothing ever drives back into the depot.
pub(super) fn no_return_to_depot(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        let expr = problem
            .node_ids()
            .filter(|from| !from.is_depot())
            .map(|from| (schema.arc(vehicle, from, NodeIdx::DEPOT), 1.0))
            .collect();

        constraints.push(Constraint::equal(
            ConstraintFamily::NoReturnToDepot,
            expr,
            0.0,
        ));
    }
}
