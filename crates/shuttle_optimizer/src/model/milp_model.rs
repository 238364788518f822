use std::collections::BTreeMap;

use super::{
    linear::{Constraint, ConstraintFamily, LinearExpr, Valuation, VarId},
    variables::Domain,
};

/// Solver-agnostic minimisation problem handed to an oracle.
///
/// Variable `i` is `VarId::new(i)` and its domain is `domains[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpModel {
    domains: Vec<Domain>,
    objective: LinearExpr,
    constraints: Vec<Constraint>,
}

impl MilpModel {
    pub fn new(domains: Vec<Domain>, objective: LinearExpr) -> Self {
        Self {
            domains,
            objective,
            constraints: Vec::new(),
        }
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn add_constraints<I>(&mut self, constraints: I)
    where
        I: IntoIterator<Item = Constraint>,
    {
        self.constraints.extend(constraints);
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, var: VarId) -> Domain {
        self.domains[var.get()]
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints `valuation` breaks by more than `tolerance`.
    pub fn violations<'a>(
        &'a self,
        valuation: &'a Valuation,
        tolerance: f64,
    ) -> impl Iterator<Item = &'a Constraint> + 'a {
        self.constraints
            .iter()
            .filter(move |constraint| !constraint.is_satisfied_by(valuation, tolerance))
    }

    pub fn count_by_family(&self) -> BTreeMap<ConstraintFamily, usize> {
        let mut counts = BTreeMap::new();
        for constraint in &self.constraints {
            *counts.entry(constraint.family()).or_insert(0) += 1;
        }
        counts
    }
}
