use shuttle_optimizer::{
    problem::{
        faculty::{Faculty, FacultyBuilder},
        transport_problem::{TransportProblem, TransportProblemBuilder},
        vehicle::{Vehicle, VehicleBuilder},
    },
    report::report::Report,
};

pub fn create_vehicle(
    name: &str,
    capacity: u32,
    urban_efficiency: f64,
    road_efficiency: f64,
    road_distance: f64,
) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder
        .set_name(name.to_owned())
        .set_capacity(capacity)
        .set_urban_efficiency(urban_efficiency)
        .set_road_efficiency(road_efficiency)
        .set_road_distance(road_distance);
    builder.build().unwrap()
}

pub fn create_faculty(name: &str, demand: u32) -> Faculty {
    let mut builder = FacultyBuilder::default();
    builder.set_name(name.to_owned()).set_demand(demand);
    builder.build().unwrap()
}

pub fn create_test_problem(
    vehicles: Vec<Vehicle>,
    faculties: Vec<Faculty>,
    distances: &[(&str, &str, f64)],
) -> TransportProblem {
    let mut builder = TransportProblemBuilder::default();
    builder.set_vehicles(vehicles);
    builder.set_faculties(faculties);
    for &(origin, destination, distance) in distances {
        builder.add_distance(origin, destination, distance);
    }

    builder.build().unwrap()
}

/// Properties every optimal report must have, whatever the instance.
pub fn assert_feasible_report(problem: &TransportProblem, report: &Report) {
    assert!(!report.diagnostic);

    for faculty in &report.faculties {
        assert_eq!(
            faculty.allocated,
            u64::from(faculty.demand),
            "{}",
            faculty.faculty
        );
    }

    for vehicle in &report.vehicles {
        assert!(vehicle.load <= u64::from(vehicle.capacity), "{}", vehicle.vehicle);
        assert_eq!(vehicle.route[0], problem.depot_name());
        assert!(vehicle.arcs.iter().all(|arc| arc.to != problem.depot_name()));

        // an open path visits each served faculty once, in arc order
        assert_eq!(vehicle.route.len(), vehicle.served.len() + 1);
        assert_eq!(vehicle.arcs.len(), vehicle.served.len());
        for served in &vehicle.served {
            assert!(vehicle.route.contains(&served.faculty));
        }
        assert_eq!(vehicle.used, !vehicle.served.is_empty());
    }

    let validation = report.validation.as_ref().unwrap();
    assert!(validation.within_tolerance, "{validation:?}");
}
