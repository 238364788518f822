use tracing::debug;

use super::{
    node::{Node, NodeIdx},
    transport_problem::TransportProblem,
    vehicle::VehicleIdx,
};

pub type Fuel = f64;

/// Fuel cost of every (vehicle, origin, destination) triple.
///
/// Stored flat, one `num_nodes * num_nodes` block per vehicle, so the index
/// of a triple is `(vehicle * num_nodes + from) * num_nodes + to`.
/// Arcs into the depot and self loops cost 0; the constraint layer is
/// what rules them out.
#[derive(Debug, Clone)]
pub struct ArcCostTable {
    costs: Vec<Fuel>,
    num_nodes: usize,
}

impl ArcCostTable {
    pub fn new(problem: &TransportProblem) -> Self {
        let num_nodes = problem.num_nodes();
        let mut costs = vec![0.0; problem.num_vehicles() * num_nodes * num_nodes];

        for (vehicle_index, vehicle) in problem.vehicles().iter().enumerate() {
            for from in problem.node_ids() {
                for to in problem.node_ids() {
                    if from == to {
                        continue;
                    }

                    let urban = problem.distances().distance(from, to);
                    let cost = match (from.kind(), to.kind()) {
                        (Node::Depot, Node::Faculty(_)) => {
                            vehicle.road_fuel() + vehicle.urban_fuel(urban)
                        }
                        (Node::Faculty(_), Node::Faculty(_)) => vehicle.urban_fuel(urban),
                        _ => 0.0,
                    };

                    costs[(vehicle_index * num_nodes + from.get()) * num_nodes + to.get()] = cost;
                }
            }
        }

        debug!(
            vehicles = problem.num_vehicles(),
            nodes = num_nodes,
            "Built arc cost table"
        );

        Self { costs, num_nodes }
    }

    #[inline(always)]
    fn index(&self, vehicle: VehicleIdx, from: NodeIdx, to: NodeIdx) -> usize {
        (vehicle.get() * self.num_nodes + from.get()) * self.num_nodes + to.get()
    }

    #[inline]
    pub fn cost(&self, vehicle: VehicleIdx, from: NodeIdx, to: NodeIdx) -> Fuel {
        self.costs[self.index(vehicle, from, to)]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::transport_problem::TransportProblemBuilder,
        test_utils::{create_faculty, create_vehicle},
    };

    fn create_problem() -> TransportProblem {
        let mut builder = TransportProblemBuilder::default();
        builder
            .add_vehicle(create_vehicle("Bus", 10, 5.0, 4.0, 20.0))
            .add_vehicle(create_vehicle("Van", 6, 10.0, 8.0, 20.0))
            .add_faculty(create_faculty("Law", 6))
            .add_faculty(create_faculty("Medicine", 3))
            .add_distance("Depot", "Law", 10.0)
            .add_distance("Law", "Medicine", 5.0)
            .add_distance("Medicine", "Depot", 50.0);
        builder.build().unwrap()
    }

    #[test]
    fn test_depot_to_faculty_adds_road_leg() {
        let problem = create_problem();
        let costs = ArcCostTable::new(&problem);

        // 20 / 4 + 10 / 5
        assert_eq!(costs.cost(VehicleIdx::new(0), NodeIdx::DEPOT, NodeIdx::new(1)), 7.0);
        // 20 / 8 + 10 / 10
        assert_eq!(costs.cost(VehicleIdx::new(1), NodeIdx::DEPOT, NodeIdx::new(1)), 3.5);
    }

    #[test]
    fn test_missing_distance_from_depot_still_pays_road_leg() {
        let problem = create_problem();
        let costs = ArcCostTable::new(&problem);

        assert_eq!(costs.cost(VehicleIdx::new(0), NodeIdx::DEPOT, NodeIdx::new(2)), 5.0);
    }

    #[test]
    fn test_faculty_to_faculty_is_urban_only() {
        let problem = create_problem();
        let costs = ArcCostTable::new(&problem);

        assert_eq!(costs.cost(VehicleIdx::new(0), NodeIdx::new(1), NodeIdx::new(2)), 1.0);
        assert_eq!(costs.cost(VehicleIdx::new(1), NodeIdx::new(1), NodeIdx::new(2)), 0.5);
        // absent from the table
        assert_eq!(costs.cost(VehicleIdx::new(0), NodeIdx::new(2), NodeIdx::new(1)), 0.0);
    }

    #[test]
    fn test_arcs_into_depot_cost_nothing() {
        let problem = create_problem();
        let costs = ArcCostTable::new(&problem);

        assert_eq!(costs.cost(VehicleIdx::new(0), NodeIdx::new(2), NodeIdx::DEPOT), 0.0);
        assert_eq!(costs.cost(VehicleIdx::new(0), NodeIdx::new(1), NodeIdx::new(1)), 0.0);
    }
}
