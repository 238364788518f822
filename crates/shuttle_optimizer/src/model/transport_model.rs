use tracing::info;

use crate::problem::{arc_cost::ArcCostTable, transport_problem::TransportProblem};

use super::{
    constraints::{
        ConstraintGenerator,
        subtour::{SubtourElimination, SubtourMode, SubtourStrategy},
    },
    linear::{Constraint, LinearExpr, Valuation},
    milp_model::MilpModel,
    variables::VariableSchema,
};

/// The static model of one run: costs, variable layout and the MILP built
/// from them. Lazy cuts are appended to the MILP between oracle rounds.
#[derive(Debug, Clone)]
pub struct TransportModel {
    costs: ArcCostTable,
    schema: VariableSchema,
    milp: MilpModel,
    subtours: SubtourMode,
}

impl TransportModel {
    pub fn build(problem: &TransportProblem, strategy: SubtourStrategy) -> Self {
        let costs = ArcCostTable::new(problem);
        let schema = VariableSchema::new(problem);
        let subtours = strategy.resolve(problem.num_faculties());

        let mut milp = MilpModel::new(schema.domains(), objective(problem, &schema, &costs));
        milp.add_constraints(ConstraintGenerator::new(problem, &schema).generate());
        milp.add_constraints(subtours.initial_cuts(problem, &schema));

        info!(
            vehicles = problem.num_vehicles(),
            faculties = problem.num_faculties(),
            variables = milp.num_variables(),
            constraints = milp.num_constraints(),
            subtours = %subtours,
            "Built transport model"
        );

        Self {
            costs,
            schema,
            milp,
            subtours,
        }
    }

    pub fn costs(&self) -> &ArcCostTable {
        &self.costs
    }

    pub fn schema(&self) -> &VariableSchema {
        &self.schema
    }

    pub fn milp(&self) -> &MilpModel {
        &self.milp
    }

    pub fn subtours(&self) -> SubtourMode {
        self.subtours
    }

    /// Subtour cuts violated by `valuation`, none for static enumeration.
    pub fn separate(
        &self,
        problem: &TransportProblem,
        valuation: &Valuation,
        threshold: f64,
    ) -> Vec<Constraint> {
        self.subtours
            .separate(problem, &self.schema, valuation, threshold)
    }

    pub fn add_cuts(&mut self, cuts: Vec<Constraint>) {
        self.milp.add_constraints(cuts);
    }
}

/// `sum cost(v,i,j) * arc[v,i,j]`. Zero-cost arcs are left out.
pub fn objective(
    problem: &TransportProblem,
    schema: &VariableSchema,
    costs: &ArcCostTable,
) -> LinearExpr {
    problem
        .vehicle_ids()
        .flat_map(|vehicle| {
            schema
                .vehicle_arcs(vehicle)
                .map(move |(from, to, var)| (var, costs.cost(vehicle, from, to)))
        })
        .filter(|&(_, cost)| cost != 0.0)
        .collect()
}
