use crate::model::constraints::subtour::SubtourStrategy;

#[derive(Clone, Debug)]
pub struct PlannerParams {
    pub subtours: SubtourStrategy,

    /// Oracle re-submissions allowed after lazy subtour cuts.
    pub max_cut_rounds: usize,

    /// Binary values above this are read as 1.
    pub arc_threshold: f64,

    pub cost_tolerance: f64,
    pub violation_tolerance: f64,
}

impl Default for PlannerParams {
    fn default() -> Self {
        PlannerParams {
            subtours: SubtourStrategy::default(),
            max_cut_rounds: 50,
            arc_threshold: 0.5,
            cost_tolerance: 1e-3,
            violation_tolerance: 1e-6,
        }
    }
}
