use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
    default_solver, variable,
};
use tracing::{debug, warn};

use crate::model::{
    linear::{LinearExpr, Sense, Valuation},
    milp_model::MilpModel,
    variables::Domain,
};

use super::optimization_oracle::{OptimizationOracle, OracleOutcome, OracleStatus};

/// Solves the model with `good_lp` and its pure Rust `microlp` backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoodLpOracle;

fn to_expression(expr: &LinearExpr, variables: &[Variable]) -> Expression {
    let mut expression = Expression::with_capacity(expr.terms().len());
    for &(var, coefficient) in expr.terms() {
        expression.add_mul(coefficient, variables[var.get()]);
    }
    expression
}

impl OptimizationOracle for GoodLpOracle {
    fn submit(&self, model: &MilpModel) -> OracleOutcome {
        // Rows without variables are decided here; microlp expects every
        // row to reference at least one column.
        let empty = Valuation::empty();
        if model
            .constraints()
            .iter()
            .any(|c| c.expr().is_empty() && !c.is_satisfied_by(&empty, 0.0))
        {
            return OracleOutcome::without_solution(OracleStatus::Infeasible);
        }

        if model.num_variables() == 0 {
            return OracleOutcome {
                status: OracleStatus::Optimal,
                valuation: Valuation::empty(),
                objective: Some(0.0),
            };
        }

        let mut vars = ProblemVariables::new();
        let variables = model
            .domains()
            .iter()
            .map(|domain| match domain {
                Domain::Binary => vars.add(variable().binary()),
                Domain::NonNegativeInteger => vars.add(variable().integer().min(0.0)),
            })
            .collect::<Vec<_>>();

        let objective = to_expression(model.objective(), &variables);
        let mut problem = vars.minimise(objective).using(default_solver);

        for constraint in model.constraints().iter().filter(|c| !c.expr().is_empty()) {
            let expression = to_expression(constraint.expr(), &variables);
            problem = problem.with(match constraint.sense() {
                Sense::LessOrEqual => expression.leq(constraint.rhs()),
                Sense::GreaterOrEqual => expression.geq(constraint.rhs()),
                Sense::Equal => expression.eq(constraint.rhs()),
            });
        }

        debug!(
            variables = variables.len(),
            constraints = model.num_constraints(),
            "Submitting model to good_lp"
        );

        match problem.solve() {
            Ok(solution) => {
                let valuation =
                    Valuation::new(variables.iter().map(|&v| solution.value(v)).collect());
                let objective = model.objective().evaluate(&valuation);

                OracleOutcome {
                    status: OracleStatus::Optimal,
                    valuation,
                    objective: Some(objective),
                }
            }
            Err(ResolutionError::Infeasible) => {
                OracleOutcome::without_solution(OracleStatus::Infeasible)
            }
            Err(ResolutionError::Unbounded) => {
                OracleOutcome::without_solution(OracleStatus::Unbounded)
            }
            Err(error) => {
                warn!(%error, "good_lp failed to solve the model");
                OracleOutcome::without_solution(OracleStatus::Other(error.to_string()))
            }
        }
    }
}
