use crate::{
    model::{
        linear::{Constraint, ConstraintFamily, LinearExpr},
        variables::VariableSchema,
    },
    problem::transport_problem::TransportProblem,
};

/// Rule 1: `sum_v alloc[v,f] = demand[f]` for every faculty.
pub(super) fn demand(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for faculty in problem.faculty_ids() {
        let expr = problem
            .vehicle_ids()
            .map(|vehicle| (schema.allocation(vehicle, faculty), 1.0))
            .collect();

        constraints.push(Constraint::equal(
            ConstraintFamily::Demand,
            expr,
            f64::from(problem.faculty(faculty).demand()),
        ));
    }
}

/// Rule 2: `sum_f alloc[v,f] <= capacity[v]` for every vehicle.
pub(super) fn capacity(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        let expr = problem
            .faculty_ids()
            .map(|faculty| (schema.allocation(vehicle, faculty), 1.0))
            .collect();

        constraints.push(Constraint::leq(
            ConstraintFamily::Capacity,
            expr,
            f64::from(problem.vehicle(vehicle).capacity()),
        ));
    }
}

/// Rule 3: `alloc[v,f] <= demand[f] * stop[v,f]`. The demand is the big-M.
pub(super) fn allocation_requires_stop(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        for faculty in problem.faculty_ids() {
            let demand = f64::from(problem.faculty(faculty).demand());
            let mut expr = LinearExpr::with_capacity(2);
            expr.add_term(schema.allocation(vehicle, faculty), 1.0)
                .add_term(schema.stop(vehicle, faculty), -demand);

            constraints.push(Constraint::leq(
                ConstraintFamily::AllocationRequiresStop,
                expr,
                0.0,
            ));
        }
    }
}

/// Rule 7: `alloc[v,f] >= stop[v,f]`, a stop carries at least one student.
pub(super) fn non_empty_stop(
    problem: &TransportProblem,
    schema: &VariableSchema,
    constraints: &mut Vec<Constraint>,
) {
    for vehicle in problem.vehicle_ids() {
        for faculty in problem.faculty_ids() {
            let mut expr = LinearExpr::with_capacity(2);
            expr.add_term(schema.allocation(vehicle, faculty), 1.0)
                .add_term(schema.stop(vehicle, faculty), -1.0);

            constraints.push(Constraint::geq(ConstraintFamily::NonEmptyStop, expr, 0.0));
        }
    }
}
