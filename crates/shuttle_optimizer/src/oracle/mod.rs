pub mod good_lp_oracle;
pub mod optimization_oracle;
