use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::{
    model::{
        linear::{Constraint, ConstraintFamily, LinearExpr, Valuation},
        variables::VariableSchema,
    },
    problem::{
        faculty::FacultyIdx, node::NodeIdx, transport_problem::TransportProblem,
        vehicle::VehicleIdx,
    },
};

/// Rule 12 (Dantzig-Fulkerson-Johnson): for a vehicle and a faculty subset
/// `S`, at most `|S| - 1` arcs may run between members of `S`.
pub fn dfj_cut(schema: &VariableSchema, vehicle: VehicleIdx, subset: &[FacultyIdx]) -> Constraint {
    let mut expr = LinearExpr::with_capacity(subset.len() * (subset.len() - 1));
    for &from in subset {
        for &to in subset {
            if from != to {
                expr.add_term(
                    schema.arc(vehicle, NodeIdx::from(from), NodeIdx::from(to)),
                    1.0,
                );
            }
        }
    }

    Constraint::leq(
        ConstraintFamily::SubtourElimination,
        expr,
        (subset.len() - 1) as f64,
    )
}

/// Produces the subtour elimination family, either all at once or on demand
/// from an oracle valuation.
pub trait SubtourElimination {
    /// Cuts added before the first oracle round.
    fn initial_cuts(&self, problem: &TransportProblem, schema: &VariableSchema) -> Vec<Constraint>;

    /// Cuts violated by `valuation`. Arcs whose value exceeds `threshold`
    /// count as used. An empty result means the valuation has no subtour.
    fn separate(
        &self,
        problem: &TransportProblem,
        schema: &VariableSchema,
        valuation: &Valuation,
        threshold: f64,
    ) -> Vec<Constraint>;
}

/// Enumerates every subset of size `2..=F-1` for every vehicle up front,
/// `2^F - F - 2` cuts per vehicle.
pub struct StaticSubtourElimination;

impl SubtourElimination for StaticSubtourElimination {
    fn initial_cuts(&self, problem: &TransportProblem, schema: &VariableSchema) -> Vec<Constraint> {
        let num_faculties = problem.num_faculties();
        let mut cuts = Vec::new();

        for vehicle in problem.vehicle_ids() {
            for size in 2..num_faculties {
                for subset in problem.faculty_ids().combinations(size) {
                    cuts.push(dfj_cut(schema, vehicle, &subset));
                }
            }
        }

        debug!(cuts = cuts.len(), "Enumerated subtour elimination cuts");

        cuts
    }

    fn separate(
        &self,
        _problem: &TransportProblem,
        _schema: &VariableSchema,
        _valuation: &Valuation,
        _threshold: f64,
    ) -> Vec<Constraint> {
        Vec::new()
    }
}

/// Adds cuts only for the cycles an oracle round actually produced.
pub struct LazySubtourElimination;

impl LazySubtourElimination {
    /// Faculty sets of every cycle in the used arcs of `vehicle` that cannot
    /// be reached from the depot.
    pub fn detached_cycles(
        problem: &TransportProblem,
        schema: &VariableSchema,
        vehicle: VehicleIdx,
        valuation: &Valuation,
        threshold: f64,
    ) -> Vec<Vec<FacultyIdx>> {
        let num_nodes = problem.num_nodes();
        let mut successors: Vec<Vec<NodeIdx>> = vec![Vec::new(); num_nodes];
        for (from, to, var) in schema.vehicle_arcs(vehicle) {
            if valuation.value(var) > threshold {
                successors[from.get()].push(to);
            }
        }

        let mut reached = vec![false; num_nodes];
        let mut stack = vec![NodeIdx::DEPOT];
        reached[NodeIdx::DEPOT.get()] = true;
        while let Some(node) = stack.pop() {
            for &next in &successors[node.get()] {
                if !reached[next.get()] {
                    reached[next.get()] = true;
                    stack.push(next);
                }
            }
        }

        let mut visited = reached;
        let mut cycles = Vec::new();

        for start in problem.node_ids() {
            if visited[start.get()] {
                continue;
            }

            let mut walk = Vec::new();
            let mut current = Some(start);
            while let Some(node) = current {
                if visited[node.get()] {
                    if let Some(position) = walk.iter().position(|&n| n == node) {
                        cycles.push(walk[position..].iter().filter_map(NodeIdx::faculty).collect());
                    }
                    break;
                }

                visited[node.get()] = true;
                walk.push(node);
                current = successors[node.get()].first().copied();
            }
        }

        cycles
    }
}

impl SubtourElimination for LazySubtourElimination {
    fn initial_cuts(&self, _problem: &TransportProblem, _schema: &VariableSchema) -> Vec<Constraint> {
        Vec::new()
    }

    fn separate(
        &self,
        problem: &TransportProblem,
        schema: &VariableSchema,
        valuation: &Valuation,
        threshold: f64,
    ) -> Vec<Constraint> {
        let mut cuts = Vec::new();

        for vehicle in problem.vehicle_ids() {
            for mut cycle in Self::detached_cycles(problem, schema, vehicle, valuation, threshold) {
                if cycle.len() < 2 {
                    continue;
                }
                cycle.sort();
                cuts.push(dfj_cut(schema, vehicle, &cycle));
            }
        }

        cuts
    }
}

/// How rule 12 is enforced for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtourStrategy {
    Static,
    Lazy,
    /// Static up to `max_static_faculties` faculties, lazy beyond.
    Auto { max_static_faculties: usize },
}

impl Default for SubtourStrategy {
    fn default() -> Self {
        SubtourStrategy::Auto {
            max_static_faculties: 12,
        }
    }
}

impl SubtourStrategy {
    pub fn resolve(&self, num_faculties: usize) -> SubtourMode {
        match self {
            SubtourStrategy::Static => SubtourMode::Static,
            SubtourStrategy::Lazy => SubtourMode::Lazy,
            SubtourStrategy::Auto {
                max_static_faculties,
            } => {
                if num_faculties <= *max_static_faculties {
                    SubtourMode::Static
                } else {
                    SubtourMode::Lazy
                }
            }
        }
    }
}

/// The strategy actually in effect once `Auto` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtourMode {
    Static,
    Lazy,
}

impl Display for SubtourMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtourMode::Static => write!(f, "static"),
            SubtourMode::Lazy => write!(f, "lazy"),
        }
    }
}

impl SubtourElimination for SubtourMode {
    fn initial_cuts(&self, problem: &TransportProblem, schema: &VariableSchema) -> Vec<Constraint> {
        match self {
            SubtourMode::Static => StaticSubtourElimination.initial_cuts(problem, schema),
            SubtourMode::Lazy => LazySubtourElimination.initial_cuts(problem, schema),
        }
    }

    fn separate(
        &self,
        problem: &TransportProblem,
        schema: &VariableSchema,
        valuation: &Valuation,
        threshold: f64,
    ) -> Vec<Constraint> {
        match self {
            SubtourMode::Static => {
                StaticSubtourElimination.separate(problem, schema, valuation, threshold)
            }
            SubtourMode::Lazy => {
                LazySubtourElimination.separate(problem, schema, valuation, threshold)
            }
        }
    }
}
