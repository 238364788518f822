use tracing::warn;

use crate::{
    model::{linear::Valuation, variables::VariableSchema},
    problem::{node::NodeIdx, transport_problem::TransportProblem, vehicle::VehicleIdx},
};

/// First node reached from `from` by an arc of `vehicle` valued above
/// `threshold`, in node order.
pub fn successor(
    problem: &TransportProblem,
    schema: &VariableSchema,
    vehicle: VehicleIdx,
    from: NodeIdx,
    valuation: &Valuation,
    threshold: f64,
) -> Option<NodeIdx> {
    problem
        .node_ids()
        .filter(|&to| to != from)
        .find(|&to| valuation.value(schema.arc(vehicle, from, to)) > threshold)
}

/// Walks the route of `vehicle` from the depot.
///
/// The result always starts with the depot. The walk ends at the first node
/// without a successor, or before a node already on the route.
pub fn reconstruct_route(
    problem: &TransportProblem,
    schema: &VariableSchema,
    vehicle: VehicleIdx,
    valuation: &Valuation,
    threshold: f64,
) -> Vec<NodeIdx> {
    let mut route = vec![NodeIdx::DEPOT];
    let mut on_route = vec![false; problem.num_nodes()];
    on_route[NodeIdx::DEPOT.get()] = true;

    let mut current = NodeIdx::DEPOT;
    while let Some(next) = successor(problem, schema, vehicle, current, valuation, threshold) {
        if on_route[next.get()] {
            warn!(
                vehicle = problem.vehicle(vehicle).name(),
                node = problem.node_name(next),
                "Route revisits a node, stopping reconstruction"
            );
            break;
        }

        on_route[next.get()] = true;
        route.push(next);
        current = next;
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_three_faculty_problem;

    #[test]
    fn test_follows_successors() {
        let problem = create_three_faculty_problem();
        let schema = VariableSchema::new(&problem);
        let vehicle = VehicleIdx::new(0);
        let node = NodeIdx::new;

        let mut valuation = Valuation::empty();
        valuation.set(schema.arc(vehicle, node(0), node(3)), 1.0);
        valuation.set(schema.arc(vehicle, node(3), node(1)), 0.99);
        valuation.set(schema.arc(vehicle, node(1), node(2)), 1.0);

        assert_eq!(
            reconstruct_route(&problem, &schema, vehicle, &valuation, 0.5),
            vec![node(0), node(3), node(1), node(2)]
        );
    }

    #[test]
    fn test_unused_vehicle_stays_at_depot() {
        let problem = create_three_faculty_problem();
        let schema = VariableSchema::new(&problem);

        assert_eq!(
            reconstruct_route(
                &problem,
                &schema,
                VehicleIdx::new(1),
                &Valuation::empty(),
                0.5
            ),
            vec![NodeIdx::DEPOT]
        );
    }

    #[test]
    fn test_cycle_stops_the_walk() {
        let problem = create_three_faculty_problem();
        let schema = VariableSchema::new(&problem);
        let vehicle = VehicleIdx::new(0);
        let node = NodeIdx::new;

        let mut valuation = Valuation::empty();
        valuation.set(schema.arc(vehicle, node(0), node(1)), 1.0);
        valuation.set(schema.arc(vehicle, node(1), node(2)), 1.0);
        valuation.set(schema.arc(vehicle, node(2), node(1)), 1.0);

        assert_eq!(
            reconstruct_route(&problem, &schema, vehicle, &valuation, 0.5),
            vec![node(0), node(1), node(2)]
        );
    }
}
