use crate::problem::{
    faculty::{Faculty, FacultyBuilder},
    transport_problem::{TransportProblem, TransportProblemBuilder},
    vehicle::{Vehicle, VehicleBuilder},
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

/// One bus (capacity 10, urban 5, road 4, road distance 20) and a single
/// faculty with 6 students, 10 units away from the depot.
pub fn create_single_stop_problem() -> TransportProblem {
    let mut builder = TransportProblemBuilder::default();
    builder
        .add_vehicle(create_vehicle("Bus", 10, 5.0, 4.0, 20.0))
        .add_faculty(create_faculty("Law", 6))
        .add_distance("Depot", "Law", 10.0);
    builder.build().unwrap()
}

/// Two vehicles and three faculties; small enough for every subset cut.
pub fn create_three_faculty_problem() -> TransportProblem {
    let mut builder = TransportProblemBuilder::default();
    builder
        .add_vehicle(create_vehicle("Bus", 10, 5.0, 4.0, 20.0))
        .add_vehicle(create_vehicle("Van", 4, 8.0, 6.0, 20.0))
        .add_faculty(create_faculty("Law", 4))
        .add_faculty(create_faculty("Medicine", 3))
        .add_faculty(create_faculty("Arts", 2))
        .add_distance("Depot", "Law", 10.0)
        .add_distance("Depot", "Medicine", 12.0)
        .add_distance("Depot", "Arts", 15.0)
        .add_distance("Law", "Medicine", 3.0)
        .add_distance("Medicine", "Arts", 4.0)
        .add_distance("Arts", "Law", 6.0);
    builder.build().unwrap()
}
