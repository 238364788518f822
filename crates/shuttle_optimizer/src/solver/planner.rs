use jiff::{SignedDuration, Timestamp};
use tracing::{debug, info, warn};

use crate::{
    model::transport_model::TransportModel,
    oracle::optimization_oracle::{OptimizationOracle, OracleOutcome, OracleStatus},
    problem::transport_problem::TransportProblem,
    report::report::Report,
};

use super::planner_params::PlannerParams;

pub const CUT_LIMIT_REASON: &str = "subtour cut limit reached";

/// Everything a run produced before reconstruction.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub model: TransportModel,
    pub outcome: OracleOutcome,
    /// Wall-clock time spent inside the oracle, summed over rounds.
    pub solve_duration: SignedDuration,
    pub cut_rounds: usize,
    pub cuts_added: usize,
}

pub struct Planner<O> {
    oracle: O,
    params: PlannerParams,
}

impl<O> Planner<O>
where
    O: OptimizationOracle,
{
    pub fn new(oracle: O, params: PlannerParams) -> Self {
        Planner { oracle, params }
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// Builds the model, submits it and, with lazy subtour elimination,
    /// keeps adding violated cuts and re-submitting until the assignment is
    /// free of subtours. Non-optimal statuses are never retried.
    pub fn run(&self, problem: &TransportProblem) -> PlanOutcome {
        let mut model = TransportModel::build(problem, self.params.subtours);
        let mut solve_duration = SignedDuration::ZERO;
        let mut cut_rounds = 0;
        let mut cuts_added = 0;

        let outcome = loop {
            let start = Timestamp::now();
            let mut outcome = self.oracle.submit(model.milp());
            solve_duration += Timestamp::now().duration_since(start);

            info!(status = %outcome.status, objective = ?outcome.objective, "Oracle returned");

            if !outcome.status.is_optimal() {
                break outcome;
            }

            let cuts = model.separate(problem, &outcome.valuation, self.params.arc_threshold);
            if cuts.is_empty() {
                break outcome;
            }

            if cut_rounds >= self.params.max_cut_rounds {
                warn!(
                    rounds = cut_rounds,
                    pending = cuts.len(),
                    "Subtours remain after the last allowed cut round"
                );
                outcome.status = OracleStatus::Other(String::from(CUT_LIMIT_REASON));
                break outcome;
            }

            cut_rounds += 1;
            cuts_added += cuts.len();
            debug!(round = cut_rounds, cuts = cuts.len(), "Adding subtour cuts");
            model.add_cuts(cuts);
        };

        if outcome.status.is_optimal() {
            let violations = model
                .milp()
                .violations(&outcome.valuation, self.params.violation_tolerance)
                .count();
            if violations > 0 {
                warn!(violations, "Optimal assignment violates model constraints");
            }
        }

        info!(
            duration = %solve_duration,
            cut_rounds,
            cuts_added,
            "Planning finished"
        );

        PlanOutcome {
            model,
            outcome,
            solve_duration,
            cut_rounds,
            cuts_added,
        }
    }

    pub fn solve(&self, problem: &TransportProblem) -> Report {
        let plan = self.run(problem);
        Report::new(problem, &plan, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        model::{
            constraints::subtour::SubtourStrategy,
            linear::Valuation,
            milp_model::MilpModel,
        },
        problem::{node::NodeIdx, vehicle::VehicleIdx},
        solver::planner_params::PlannerParams,
        test_utils::create_three_faculty_problem,
    };

    /// Replays canned outcomes and records how many constraints each
    /// submission carried.
    struct ScriptedOracle {
        outcomes: RefCell<Vec<OracleOutcome>>,
        submitted: RefCell<Vec<usize>>,
    }

    impl ScriptedOracle {
        fn new(mut outcomes: Vec<OracleOutcome>) -> Self {
            outcomes.reverse();
            ScriptedOracle {
                outcomes: RefCell::new(outcomes),
                submitted: RefCell::new(Vec::new()),
            }
        }
    }

    impl OptimizationOracle for ScriptedOracle {
        fn submit(&self, model: &MilpModel) -> OracleOutcome {
            self.submitted.borrow_mut().push(model.num_constraints());
            self.outcomes
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| OracleOutcome::without_solution(OracleStatus::Infeasible))
        }
    }

    fn cyclic_outcome(problem: &TransportProblem) -> OracleOutcome {
        let model = TransportModel::build(problem, SubtourStrategy::Lazy);
        let schema = model.schema();
        let vehicle = VehicleIdx::new(0);
        let mut valuation = Valuation::empty();
        valuation.set(schema.arc(vehicle, NodeIdx::new(2), NodeIdx::new(3)), 1.0);
        valuation.set(schema.arc(vehicle, NodeIdx::new(3), NodeIdx::new(2)), 1.0);

        OracleOutcome {
            status: OracleStatus::Optimal,
            valuation,
            objective: Some(0.0),
        }
    }

    #[test]
    fn test_non_optimal_is_not_retried() {
        let problem = create_three_faculty_problem();
        let oracle = ScriptedOracle::new(vec![OracleOutcome::without_solution(
            OracleStatus::Infeasible,
        )]);
        let planner = Planner::new(oracle, PlannerParams::default());

        let plan = planner.run(&problem);

        assert_eq!(plan.outcome.status, OracleStatus::Infeasible);
        assert_eq!(planner.oracle.submitted.borrow().len(), 1);
        assert_eq!(plan.cut_rounds, 0);
    }

    #[test]
    fn test_lazy_rounds_add_cuts_and_resubmit() {
        let problem = create_three_faculty_problem();
        let oracle = ScriptedOracle::new(vec![
            cyclic_outcome(&problem),
            OracleOutcome {
                status: OracleStatus::Optimal,
                valuation: Valuation::empty(),
                objective: Some(0.0),
            },
        ]);
        let params = PlannerParams {
            subtours: SubtourStrategy::Lazy,
            ..PlannerParams::default()
        };
        let planner = Planner::new(oracle, params);

        let plan = planner.run(&problem);

        assert_eq!(plan.outcome.status, OracleStatus::Optimal);
        assert_eq!(plan.cut_rounds, 1);
        assert_eq!(plan.cuts_added, 1);
        let submitted = planner.oracle.submitted.borrow();
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[1], submitted[0] + 1);
    }

    #[test]
    fn test_cut_round_limit_degrades_status() {
        let problem = create_three_faculty_problem();
        let oracle = ScriptedOracle::new(vec![cyclic_outcome(&problem), cyclic_outcome(&problem)]);
        let params = PlannerParams {
            subtours: SubtourStrategy::Lazy,
            max_cut_rounds: 1,
            ..PlannerParams::default()
        };
        let planner = Planner::new(oracle, params);

        let plan = planner.run(&problem);

        assert_eq!(
            plan.outcome.status,
            OracleStatus::Other(String::from(CUT_LIMIT_REASON))
        );
        assert_eq!(plan.cut_rounds, 1);
        assert_eq!(planner.oracle.submitted.borrow().len(), 2);
    }

    #[test]
    fn test_static_strategy_submits_once() {
        let problem = create_three_faculty_problem();
        let oracle = ScriptedOracle::new(vec![OracleOutcome {
            status: OracleStatus::Optimal,
            valuation: Valuation::empty(),
            objective: Some(0.0),
        }]);
        let params = PlannerParams {
            subtours: SubtourStrategy::Static,
            ..PlannerParams::default()
        };
        let planner = Planner::new(oracle, params);

        let plan = planner.run(&problem);

        assert_eq!(planner.oracle.submitted.borrow().len(), 1);
        assert!(plan.solve_duration >= SignedDuration::ZERO);
    }
}
