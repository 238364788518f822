use serde::Serialize;

use crate::{define_index_newtype, problem::problem_error::ProblemError};

define_index_newtype!(VehicleIdx, Vehicle);

/// A vehicle of the heterogeneous fleet.
///
/// Every route starts with a road leg of `road_distance` from the depot to
/// the faculty network, driven at `road_efficiency`; everything inside the
/// network is driven at `urban_efficiency`. Both efficiencies are distance
/// per unit of fuel.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Vehicle {
    name: String,
    capacity: u32,
    urban_efficiency: f64,
    road_efficiency: f64,
    road_distance: f64,
}

impl Vehicle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn urban_efficiency(&self) -> f64 {
        self.urban_efficiency
    }

    pub fn road_efficiency(&self) -> f64 {
        self.road_efficiency
    }

    pub fn road_distance(&self) -> f64 {
        self.road_distance
    }

    /// Fuel burnt on the road leg, paid once by every used vehicle.
    pub fn road_fuel(&self) -> f64 {
        self.road_distance / self.road_efficiency
    }

    pub fn urban_fuel(&self, distance: f64) -> f64 {
        distance / self.urban_efficiency
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    name: Option<String>,
    capacity: Option<u32>,
    urban_efficiency: Option<f64>,
    road_efficiency: Option<f64>,
    road_distance: Option<f64>,
}

impl VehicleBuilder {
    pub fn set_name(&mut self, name: String) -> &mut VehicleBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_capacity(&mut self, capacity: u32) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_urban_efficiency(&mut self, urban_efficiency: f64) -> &mut VehicleBuilder {
        self.urban_efficiency = Some(urban_efficiency);
        self
    }

    pub fn set_road_efficiency(&mut self, road_efficiency: f64) -> &mut VehicleBuilder {
        self.road_efficiency = Some(road_efficiency);
        self
    }

    pub fn set_road_distance(&mut self, road_distance: f64) -> &mut VehicleBuilder {
        self.road_distance = Some(road_distance);
        self
    }

    pub fn build(self) -> Result<Vehicle, ProblemError> {
        let name = self.name.ok_or(ProblemError::MissingField {
            record: "vehicle",
            field: "name",
        })?;

        if name.trim().is_empty() {
            return Err(ProblemError::EmptyName { record: "vehicle" });
        }

        let urban_efficiency = self.urban_efficiency.ok_or(ProblemError::MissingField {
            record: "vehicle",
            field: "urban_efficiency",
        })?;
        let road_efficiency = self.road_efficiency.ok_or(ProblemError::MissingField {
            record: "vehicle",
            field: "road_efficiency",
        })?;

        for (field, value) in [
            ("urban_efficiency", urban_efficiency),
            ("road_efficiency", road_efficiency),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProblemError::InvalidEfficiency {
                    vehicle: name,
                    field,
                    value,
                });
            }
        }

        let road_distance = self.road_distance.unwrap_or(0.0);
        if !road_distance.is_finite() || road_distance < 0.0 {
            return Err(ProblemError::InvalidRoadDistance {
                vehicle: name,
                value: road_distance,
            });
        }

        Ok(Vehicle {
            name,
            capacity: self.capacity.unwrap_or(0),
            urban_efficiency,
            road_efficiency,
            road_distance,
        })
    }
}
