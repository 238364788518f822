use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::{
    faculty::FacultyBuilder,
    problem_error::ProblemError,
    transport_problem::{TransportProblem, TransportProblemBuilder},
    vehicle::VehicleBuilder,
};

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "TransportProblem")]
pub struct JsonTransportProblem {
    /// Name of the node every route starts from, `"Depot"` when omitted.
    pub depot: Option<String>,
    pub vehicles: Vec<JsonVehicle>,
    pub faculties: Vec<JsonFaculty>,
    /// Urban distances between nodes. Pairs not listed are at distance 0.
    #[serde(default)]
    pub distances: Vec<JsonDistance>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct JsonVehicle {
    pub name: String,
    pub capacity: u32,
    pub urban_efficiency: f64,
    pub road_efficiency: f64,
    pub road_distance: f64,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Faculty")]
pub struct JsonFaculty {
    pub name: String,
    pub demand: u32,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Distance")]
pub struct JsonDistance {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
}

impl JsonTransportProblem {
    pub fn build_problem(self) -> Result<TransportProblem, ProblemError> {
        let mut builder = TransportProblemBuilder::default();

        if let Some(depot) = self.depot {
            builder.set_depot_name(depot);
        }

        for vehicle in self.vehicles {
            let mut vehicle_builder = VehicleBuilder::default();
            vehicle_builder
                .set_name(vehicle.name)
                .set_capacity(vehicle.capacity)
                .set_urban_efficiency(vehicle.urban_efficiency)
                .set_road_efficiency(vehicle.road_efficiency)
                .set_road_distance(vehicle.road_distance);
            builder.add_vehicle(vehicle_builder.build()?);
        }

        for faculty in self.faculties {
            let mut faculty_builder = FacultyBuilder::default();
            faculty_builder
                .set_name(faculty.name)
                .set_demand(faculty.demand);
            builder.add_faculty(faculty_builder.build()?);
        }

        for distance in self.distances {
            builder.add_distance(distance.origin, distance.destination, distance.distance);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::node::NodeIdx;

    #[test]
    fn test_build_problem() {
        let input: JsonTransportProblem = serde_json::from_str(
            r#"{
                "depot": "Bicas",
                "vehicles": [{"name": "Bus", "capacity": 40, "urban_efficiency": 3.5,
                              "road_efficiency": 4.0, "road_distance": 25.0}],
                "faculties": [{"name": "Law", "demand": 12}],
                "distances": [{"origin": "Bicas", "destination": "Law", "distance": 3.2}]
            }"#,
        )
        .unwrap();

        let problem = input.build_problem().unwrap();

        assert_eq!(problem.depot_name(), "Bicas");
        assert_eq!(problem.num_vehicles(), 1);
        assert_eq!(problem.total_demand(), 12);
        assert_eq!(
            problem
                .distances()
                .distance(NodeIdx::DEPOT, NodeIdx::new(1)),
            3.2
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let input: JsonTransportProblem =
            serde_json::from_str(r#"{"vehicles": [], "faculties": []}"#).unwrap();

        let problem = input.build_problem().unwrap();

        assert_eq!(problem.depot_name(), "Depot");
        assert!(problem.distances().is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<JsonTransportProblem>(
            r#"{"vehicles": [], "faculties": [{"name": "Law", "demand": 1, "floor": 2}]}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_vehicle_is_inconsistent() {
        let input: JsonTransportProblem = serde_json::from_str(
            r#"{"vehicles": [{"name": "Bus", "capacity": 4, "urban_efficiency": 0.0,
                              "road_efficiency": 4.0, "road_distance": 1.0}],
                "faculties": []}"#,
        )
        .unwrap();

        assert!(matches!(
            input.build_problem(),
            Err(ProblemError::InvalidEfficiency { .. })
        ));
    }
}
