use fxhash::{FxHashMap, FxHashSet};

use super::{
    distance_table::DistanceTable,
    faculty::{Faculty, FacultyIdx},
    node::{Node, NodeIdx},
    problem_error::ProblemError,
    vehicle::{Vehicle, VehicleIdx},
};

pub const DEFAULT_DEPOT_NAME: &str = "Depot";

/// Static input of one planning run: the fleet, the faculties to clear and
/// the urban distances between them. Immutable once built.
#[derive(Debug, Clone)]
pub struct TransportProblem {
    depot_name: String,
    vehicles: Vec<Vehicle>,
    faculties: Vec<Faculty>,
    distances: DistanceTable,
}

impl TransportProblem {
    pub fn depot_name(&self) -> &str {
        &self.depot_name
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn faculties(&self) -> &[Faculty] {
        &self.faculties
    }

    pub fn faculty(&self, faculty_id: FacultyIdx) -> &Faculty {
        &self.faculties[faculty_id]
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn num_faculties(&self) -> usize {
        self.faculties.len()
    }

    /// Depot plus every faculty.
    pub fn num_nodes(&self) -> usize {
        self.faculties.len() + 1
    }

    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleIdx> {
        (0..self.vehicles.len()).map(VehicleIdx::new)
    }

    pub fn faculty_ids(&self) -> impl Iterator<Item = FacultyIdx> {
        (0..self.faculties.len()).map(FacultyIdx::new)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeIdx> {
        (0..self.num_nodes()).map(NodeIdx::new)
    }

    pub fn node_name(&self, node: NodeIdx) -> &str {
        match node.kind() {
            Node::Depot => &self.depot_name,
            Node::Faculty(faculty) => self.faculties[faculty].name(),
        }
    }

    pub fn total_demand(&self) -> u64 {
        self.faculties.iter().map(|f| u64::from(f.demand())).sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.vehicles.iter().map(|v| u64::from(v.capacity())).sum()
    }
}

#[derive(Default)]
pub struct TransportProblemBuilder {
    depot_name: Option<String>,
    vehicles: Vec<Vehicle>,
    faculties: Vec<Faculty>,
    distances: Vec<(String, String, f64)>,
}

impl TransportProblemBuilder {
    pub fn set_depot_name(&mut self, depot_name: String) -> &mut TransportProblemBuilder {
        self.depot_name = Some(depot_name);
        self
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut TransportProblemBuilder {
        self.vehicles = vehicles;
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut TransportProblemBuilder {
        self.vehicles.push(vehicle);
        self
    }

    pub fn set_faculties(&mut self, faculties: Vec<Faculty>) -> &mut TransportProblemBuilder {
        self.faculties = faculties;
        self
    }

    pub fn add_faculty(&mut self, faculty: Faculty) -> &mut TransportProblemBuilder {
        self.faculties.push(faculty);
        self
    }

    /// Distances are keyed by node name and resolved in [`Self::build`].
    pub fn add_distance(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance: f64,
    ) -> &mut TransportProblemBuilder {
        self.distances
            .push((origin.into(), destination.into(), distance));
        self
    }

    pub fn build(self) -> Result<TransportProblem, ProblemError> {
        let depot_name = self
            .depot_name
            .unwrap_or_else(|| String::from(DEFAULT_DEPOT_NAME));
        if depot_name.trim().is_empty() {
            return Err(ProblemError::EmptyName { record: "depot" });
        }

        let mut vehicle_names = FxHashSet::default();
        for vehicle in &self.vehicles {
            if !vehicle_names.insert(vehicle.name()) {
                return Err(ProblemError::DuplicateName {
                    record: "vehicle",
                    name: vehicle.name().to_owned(),
                });
            }
        }

        let mut node_by_name: FxHashMap<&str, NodeIdx> = FxHashMap::default();
        node_by_name.insert(&depot_name, NodeIdx::DEPOT);
        for (index, faculty) in self.faculties.iter().enumerate() {
            if faculty.name() == depot_name {
                return Err(ProblemError::FacultyNamedAsDepot(faculty.name().to_owned()));
            }

            let node = NodeIdx::from(FacultyIdx::new(index));
            if node_by_name.insert(faculty.name(), node).is_some() {
                return Err(ProblemError::DuplicateName {
                    record: "faculty",
                    name: faculty.name().to_owned(),
                });
            }
        }

        let mut distances = DistanceTable::new();
        for (origin, destination, distance) in self.distances {
            let resolve = |name: &str| {
                node_by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| ProblemError::UnknownNode {
                        origin: origin.clone(),
                        destination: destination.clone(),
                        node: name.to_owned(),
                    })
            };
            let from = resolve(&origin)?;
            let to = resolve(&destination)?;

            if !distance.is_finite() || distance < 0.0 {
                return Err(ProblemError::InvalidDistance {
                    origin,
                    destination,
                    value: distance,
                });
            }

            if distances.insert(from, to, distance).is_some() {
                return Err(ProblemError::DuplicateDistance {
                    origin,
                    destination,
                });
            }
        }

        Ok(TransportProblem {
            depot_name,
            vehicles: self.vehicles,
            faculties: self.faculties,
            distances,
        })
    }
}
