use std::fmt::Display;

use serde::Serialize;

use crate::define_index_newtype;

define_index_newtype!(VarId);

/// Values assigned to the model variables by an oracle.
///
/// Reads are total: a variable without a value (for instance because the
/// oracle returned no assignment at all) reads as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    values: Vec<f64>,
}

impl Valuation {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.get()).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, var: VarId, value: f64) {
        if self.values.len() <= var.get() {
            self.values.resize(var.get() + 1, 0.0);
        }
        self.values[var.get()] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
        }
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) -> &mut Self {
        self.terms.push((var, coefficient));
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn evaluate(&self, valuation: &Valuation) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * valuation.value(var))
            .sum()
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

/// Rule a constraint was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ConstraintFamily {
    Demand,
    Capacity,
    AllocationRequiresStop,
    StopRequiresArrival,
    DepartureRequiresStop,
    ArrivalRequiresStop,
    NonEmptyStop,
    SingleDepotDeparture,
    UsedVehicleLeavesDepot,
    NoReturnToDepot,
    SingleFacultyDeparture,
    SubtourElimination,
}

impl ConstraintFamily {
    pub const ALL: [ConstraintFamily; 12] = [
        ConstraintFamily::Demand,
        ConstraintFamily::Capacity,
        ConstraintFamily::AllocationRequiresStop,
        ConstraintFamily::StopRequiresArrival,
        ConstraintFamily::DepartureRequiresStop,
        ConstraintFamily::ArrivalRequiresStop,
        ConstraintFamily::NonEmptyStop,
        ConstraintFamily::SingleDepotDeparture,
        ConstraintFamily::UsedVehicleLeavesDepot,
        ConstraintFamily::NoReturnToDepot,
        ConstraintFamily::SingleFacultyDeparture,
        ConstraintFamily::SubtourElimination,
    ];

    pub fn rule(&self) -> usize {
        match self {
            ConstraintFamily::Demand => 1,
            ConstraintFamily::Capacity => 2,
            ConstraintFamily::AllocationRequiresStop => 3,
            ConstraintFamily::StopRequiresArrival => 4,
            ConstraintFamily::DepartureRequiresStop => 5,
            ConstraintFamily::ArrivalRequiresStop => 6,
            ConstraintFamily::NonEmptyStop => 7,
            ConstraintFamily::SingleDepotDeparture => 8,
            ConstraintFamily::UsedVehicleLeavesDepot => 9,
            ConstraintFamily::NoReturnToDepot => 10,
            ConstraintFamily::SingleFacultyDeparture => 11,
            ConstraintFamily::SubtourElimination => 12,
        }
    }
}

impl Display for ConstraintFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ConstraintFamily::Demand => "demand",
                ConstraintFamily::Capacity => "capacity",
                ConstraintFamily::AllocationRequiresStop => "allocation_requires_stop",
                ConstraintFamily::StopRequiresArrival => "stop_requires_arrival",
                ConstraintFamily::DepartureRequiresStop => "departure_requires_stop",
                ConstraintFamily::ArrivalRequiresStop => "arrival_requires_stop",
                ConstraintFamily::NonEmptyStop => "non_empty_stop",
                ConstraintFamily::SingleDepotDeparture => "single_depot_departure",
                ConstraintFamily::UsedVehicleLeavesDepot => "used_vehicle_leaves_depot",
                ConstraintFamily::NoReturnToDepot => "no_return_to_depot",
                ConstraintFamily::SingleFacultyDeparture => "single_faculty_departure",
                ConstraintFamily::SubtourElimination => "subtour_elimination",
            }
        )
    }
}

/// `expr <sense> rhs`, tagged with the rule it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    family: ConstraintFamily,
    expr: LinearExpr,
    sense: Sense,
    rhs: f64,
}

impl Constraint {
    pub fn new(family: ConstraintFamily, expr: LinearExpr, sense: Sense, rhs: f64) -> Self {
        Self {
            family,
            expr,
            sense,
            rhs,
        }
    }

    pub fn leq(family: ConstraintFamily, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(family, expr, Sense::LessOrEqual, rhs)
    }

    pub fn geq(family: ConstraintFamily, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(family, expr, Sense::GreaterOrEqual, rhs)
    }

    pub fn equal(family: ConstraintFamily, expr: LinearExpr, rhs: f64) -> Self {
        Self::new(family, expr, Sense::Equal, rhs)
    }

    pub fn family(&self) -> ConstraintFamily {
        self.family
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn is_satisfied_by(&self, valuation: &Valuation, tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(valuation);
        match self.sense {
            Sense::LessOrEqual => lhs <= self.rhs + tolerance,
            Sense::GreaterOrEqual => lhs >= self.rhs - tolerance,
            Sense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_read_as_zero() {
        let valuation = Valuation::empty();

        assert_eq!(valuation.value(VarId::new(42)), 0.0);
    }

    #[test]
    fn test_set_grows_valuation() {
        let mut valuation = Valuation::empty();
        valuation.set(VarId::new(3), 1.0);

        assert_eq!(valuation.len(), 4);
        assert_eq!(valuation.value(VarId::new(3)), 1.0);
        assert_eq!(valuation.value(VarId::new(0)), 0.0);
    }

    #[test]
    fn test_constraint_senses() {
        let expr: LinearExpr = [(VarId::new(0), 2.0), (VarId::new(1), -1.0)]
            .into_iter()
            .collect();
        let valuation = Valuation::new(vec![3.0, 1.0]);

        assert_eq!(expr.evaluate(&valuation), 5.0);
        assert!(Constraint::leq(ConstraintFamily::Capacity, expr.clone(), 5.0)
            .is_satisfied_by(&valuation, 1e-6));
        assert!(!Constraint::leq(ConstraintFamily::Capacity, expr.clone(), 4.0)
            .is_satisfied_by(&valuation, 1e-6));
        assert!(Constraint::geq(ConstraintFamily::NonEmptyStop, expr.clone(), 5.0)
            .is_satisfied_by(&valuation, 1e-6));
        assert!(Constraint::equal(ConstraintFamily::Demand, expr, 5.0 + 1e-9)
            .is_satisfied_by(&valuation, 1e-6));
    }

    #[test]
    fn test_family_rules_are_numbered_in_order() {
        for (position, family) in ConstraintFamily::ALL.iter().enumerate() {
            assert_eq!(family.rule(), position + 1);
        }
    }
}
