pub mod constraints;
pub mod linear;
pub mod milp_model;
pub mod transport_model;
pub mod variables;
