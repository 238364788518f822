use std::fmt::Display;

use serde::Serialize;

use crate::model::{linear::Valuation, milp_model::MilpModel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum OracleStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Time-outs, backend failures, or anything else without a proven
    /// optimum.
    Other(String),
}

impl OracleStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, OracleStatus::Optimal)
    }
}

impl Display for OracleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleStatus::Optimal => write!(f, "optimal"),
            OracleStatus::Infeasible => write!(f, "infeasible"),
            OracleStatus::Unbounded => write!(f, "unbounded"),
            OracleStatus::Other(reason) => write!(f, "other ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OracleOutcome {
    pub status: OracleStatus,
    /// Empty unless the backend produced an assignment.
    pub valuation: Valuation,
    pub objective: Option<f64>,
}

impl OracleOutcome {
    pub fn without_solution(status: OracleStatus) -> Self {
        Self {
            status,
            valuation: Valuation::empty(),
            objective: None,
        }
    }
}

/// A MILP solver consumed as a black box.
///
/// Submission is infallible: every backend failure is folded into
/// [`OracleStatus::Other`] with an empty valuation.
pub trait OptimizationOracle {
    fn submit(&self, model: &MilpModel) -> OracleOutcome;
}
