use serde::Serialize;

use crate::problem::{
    faculty::FacultyIdx, node::NodeIdx, transport_problem::TransportProblem, vehicle::VehicleIdx,
};

use super::linear::VarId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Domain {
    /// Integer, lower bound 0, no explicit upper bound.
    NonNegativeInteger,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VarKey {
    /// Students of `faculty` carried by `vehicle`.
    Allocation {
        vehicle: VehicleIdx,
        faculty: FacultyIdx,
    },
    /// `vehicle` makes a stop at `faculty`.
    Stop {
        vehicle: VehicleIdx,
        faculty: FacultyIdx,
    },
    /// `vehicle` drives directly from `from` to `to`.
    Arc {
        vehicle: VehicleIdx,
        from: NodeIdx,
        to: NodeIdx,
    },
}

impl VarKey {
    pub fn domain(&self) -> Domain {
        match self {
            VarKey::Allocation { .. } => Domain::NonNegativeInteger,
            VarKey::Stop { .. } | VarKey::Arc { .. } => Domain::Binary,
        }
    }
}

/// Dense numbering of the three variable families.
///
/// Ids are laid out as all allocations, then all stops, then all arcs; each
/// block is vehicle-major. Arcs skip self loops, so a vehicle owns
/// `num_nodes * (num_nodes - 1)` arc variables and arc `(from, to)` sits at
/// `from * (num_nodes - 1) + to'` where `to'` is `to` with `from` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSchema {
    num_vehicles: usize,
    num_faculties: usize,
    num_nodes: usize,
}

impl VariableSchema {
    pub fn new(problem: &TransportProblem) -> Self {
        Self {
            num_vehicles: problem.num_vehicles(),
            num_faculties: problem.num_faculties(),
            num_nodes: problem.num_nodes(),
        }
    }

    fn arcs_per_vehicle(&self) -> usize {
        self.num_nodes * (self.num_nodes - 1)
    }

    fn stop_offset(&self) -> usize {
        self.num_vehicles * self.num_faculties
    }

    fn arc_offset(&self) -> usize {
        2 * self.num_vehicles * self.num_faculties
    }

    pub fn len(&self) -> usize {
        self.arc_offset() + self.num_vehicles * self.arcs_per_vehicle()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn allocation(&self, vehicle: VehicleIdx, faculty: FacultyIdx) -> VarId {
        VarId::new(vehicle.get() * self.num_faculties + faculty.get())
    }

    #[inline]
    pub fn stop(&self, vehicle: VehicleIdx, faculty: FacultyIdx) -> VarId {
        VarId::new(self.stop_offset() + vehicle.get() * self.num_faculties + faculty.get())
    }

    /// `from` and `to` must differ: self loops have no variable.
    #[inline]
    pub fn arc(&self, vehicle: VehicleIdx, from: NodeIdx, to: NodeIdx) -> VarId {
        debug_assert_ne!(from, to, "self loops are not part of the schema");
        let to_offset = if to.get() > from.get() {
            to.get() - 1
        } else {
            to.get()
        };

        VarId::new(
            self.arc_offset()
                + vehicle.get() * self.arcs_per_vehicle()
                + from.get() * (self.num_nodes - 1)
                + to_offset,
        )
    }

    pub fn id(&self, key: VarKey) -> VarId {
        match key {
            VarKey::Allocation { vehicle, faculty } => self.allocation(vehicle, faculty),
            VarKey::Stop { vehicle, faculty } => self.stop(vehicle, faculty),
            VarKey::Arc { vehicle, from, to } => self.arc(vehicle, from, to),
        }
    }

    pub fn key(&self, var: VarId) -> VarKey {
        let index = var.get();
        if index < self.stop_offset() {
            VarKey::Allocation {
                vehicle: VehicleIdx::new(index / self.num_faculties),
                faculty: FacultyIdx::new(index % self.num_faculties),
            }
        } else if index < self.arc_offset() {
            let index = index - self.stop_offset();
            VarKey::Stop {
                vehicle: VehicleIdx::new(index / self.num_faculties),
                faculty: FacultyIdx::new(index % self.num_faculties),
            }
        } else {
            let index = index - self.arc_offset();
            let within_vehicle = index % self.arcs_per_vehicle();
            let from = within_vehicle / (self.num_nodes - 1);
            let to_offset = within_vehicle % (self.num_nodes - 1);
            let to = if to_offset >= from {
                to_offset + 1
            } else {
                to_offset
            };

            VarKey::Arc {
                vehicle: VehicleIdx::new(index / self.arcs_per_vehicle()),
                from: NodeIdx::new(from),
                to: NodeIdx::new(to),
            }
        }
    }

    pub fn domain(&self, var: VarId) -> Domain {
        self.key(var).domain()
    }

    pub fn ids(&self) -> impl Iterator<Item = VarId> {
        (0..self.len()).map(VarId::new)
    }

    pub fn domains(&self) -> Vec<Domain> {
        self.ids().map(|var| self.domain(var)).collect()
    }

    /// Every arc variable of `vehicle` as `(from, to, var)`.
    pub fn vehicle_arcs(
        &self,
        vehicle: VehicleIdx,
    ) -> impl Iterator<Item = (NodeIdx, NodeIdx, VarId)> + '_ {
        (0..self.num_nodes).flat_map(move |from| {
            (0..self.num_nodes)
                .filter(move |&to| to != from)
                .map(move |to| {
                    let (from, to) = (NodeIdx::new(from), NodeIdx::new(to));
                    (from, to, self.arc(vehicle, from, to))
                })
        })
    }

    pub fn name(&self, var: VarId, problem: &TransportProblem) -> String {
        match self.key(var) {
            VarKey::Allocation { vehicle, faculty } => format!(
                "alloc[{},{}]",
                problem.vehicle(vehicle).name(),
                problem.faculty(faculty).name()
            ),
            VarKey::Stop { vehicle, faculty } => format!(
                "stop[{},{}]",
                problem.vehicle(vehicle).name(),
                problem.faculty(faculty).name()
            ),
            VarKey::Arc { vehicle, from, to } => format!(
                "arc[{},{},{}]",
                problem.vehicle(vehicle).name(),
                problem.node_name(from),
                problem.node_name(to)
            ),
        }
    }
}
