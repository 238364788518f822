use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    model::{constraints::subtour::SubtourMode, linear::Valuation, transport_model::TransportModel},
    oracle::optimization_oracle::OracleStatus,
    problem::{
        arc_cost::Fuel, node::NodeIdx, transport_problem::TransportProblem, vehicle::VehicleIdx,
    },
    solver::{planner::PlanOutcome, planner_params::PlannerParams},
};

use super::route_reconstruction::reconstruct_route;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacultySummary {
    pub faculty: String,
    pub demand: u32,
    pub allocated: u64,
    /// Only known for an optimal run.
    pub matches_demand: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServedFaculty {
    pub faculty: String,
    pub students: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcUsage {
    pub from: String,
    pub to: String,
    pub cost: Fuel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    pub vehicle: String,
    pub capacity: u32,
    pub load: u64,
    /// Percentage of the capacity in use, 0 for zero-capacity vehicles.
    pub utilization: f64,
    pub used: bool,
    pub route: Vec<String>,
    pub served: Vec<ServedFaculty>,
    pub arcs: Vec<ArcUsage>,
    pub total_cost: Fuel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostValidation {
    pub reconstructed_total: Fuel,
    pub objective: f64,
    pub difference: f64,
    pub within_tolerance: bool,
}

/// Outcome of a planning run in a form meant for people and tools.
///
/// A non-optimal run still gets a report, marked `diagnostic`, built from
/// whatever assignment the oracle left behind (often nothing, which reads
/// as all zeros).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status: OracleStatus,
    pub diagnostic: bool,
    pub objective: Option<f64>,
    pub solve_duration: SignedDuration,
    pub subtours: SubtourMode,
    pub cut_rounds: usize,
    pub cuts_added: usize,
    pub faculties: Vec<FacultySummary>,
    pub vehicles: Vec<VehicleReport>,
    pub validation: Option<CostValidation>,
}

fn round_count(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

impl Report {
    pub fn new(problem: &TransportProblem, plan: &PlanOutcome, params: &PlannerParams) -> Self {
        let optimal = plan.outcome.status.is_optimal();
        let valuation = &plan.outcome.valuation;

        let faculties = faculty_summaries(problem, &plan.model, valuation, optimal);
        let vehicles = problem
            .vehicle_ids()
            .map(|vehicle| vehicle_report(problem, &plan.model, vehicle, valuation, params))
            .collect::<Vec<_>>();

        let objective = plan.outcome.objective.filter(|_| optimal);
        let validation = objective.map(|objective| {
            let reconstructed_total = vehicles.iter().map(|v| v.total_cost).sum::<Fuel>();
            let difference = (reconstructed_total - objective).abs();
            CostValidation {
                reconstructed_total,
                objective,
                difference,
                within_tolerance: difference <= params.cost_tolerance,
            }
        });

        Report {
            status: plan.outcome.status.clone(),
            diagnostic: !optimal,
            objective,
            solve_duration: plan.solve_duration,
            subtours: plan.model.subtours(),
            cut_rounds: plan.cut_rounds,
            cuts_added: plan.cuts_added,
            faculties,
            vehicles,
            validation,
        }
    }

    pub fn is_diagnostic(&self) -> bool {
        self.diagnostic
    }

    pub fn vehicle(&self, name: &str) -> Option<&VehicleReport> {
        self.vehicles.iter().find(|v| v.vehicle == name)
    }

    pub fn faculty(&self, name: &str) -> Option<&FacultySummary> {
        self.faculties.iter().find(|f| f.faculty == name)
    }
}

fn faculty_summaries(
    problem: &TransportProblem,
    model: &TransportModel,
    valuation: &Valuation,
    optimal: bool,
) -> Vec<FacultySummary> {
    problem
        .faculty_ids()
        .map(|faculty_id| {
            let faculty = problem.faculty(faculty_id);
            let allocated = round_count(
                problem
                    .vehicle_ids()
                    .map(|vehicle| valuation.value(model.schema().allocation(vehicle, faculty_id)))
                    .sum(),
            );

            FacultySummary {
                faculty: faculty.name().to_owned(),
                demand: faculty.demand(),
                allocated,
                matches_demand: optimal.then(|| allocated == u64::from(faculty.demand())),
            }
        })
        .collect()
}

fn vehicle_report(
    problem: &TransportProblem,
    model: &TransportModel,
    vehicle_id: VehicleIdx,
    valuation: &Valuation,
    params: &PlannerParams,
) -> VehicleReport {
    let vehicle = problem.vehicle(vehicle_id);
    let schema = model.schema();

    let served = problem
        .faculty_ids()
        .filter_map(|faculty| {
            let students = valuation.value(schema.allocation(vehicle_id, faculty));
            (students > params.arc_threshold).then(|| ServedFaculty {
                faculty: problem.faculty(faculty).name().to_owned(),
                students: round_count(students),
            })
        })
        .collect::<Vec<_>>();

    let load = problem
        .faculty_ids()
        .map(|faculty| round_count(valuation.value(schema.allocation(vehicle_id, faculty))))
        .sum::<u64>();

    let utilization = if vehicle.capacity() == 0 {
        0.0
    } else {
        load as f64 * 100.0 / f64::from(vehicle.capacity())
    };

    let arcs = schema
        .vehicle_arcs(vehicle_id)
        .filter(|&(_, _, var)| valuation.value(var) > params.arc_threshold)
        .map(|(from, to, _)| ArcUsage {
            from: problem.node_name(from).to_owned(),
            to: problem.node_name(to).to_owned(),
            cost: model.costs().cost(vehicle_id, from, to),
        })
        .collect::<Vec<_>>();
    let total_cost = arcs.iter().map(|arc| arc.cost).sum();

    let route = reconstruct_route(problem, schema, vehicle_id, valuation, params.arc_threshold);

    VehicleReport {
        vehicle: vehicle.name().to_owned(),
        capacity: vehicle.capacity(),
        load,
        utilization,
        used: route.len() > 1,
        route: route
            .into_iter()
            .map(|node: NodeIdx| problem.node_name(node).to_owned())
            .collect(),
        served,
        arcs,
        total_cost,
    }
}
