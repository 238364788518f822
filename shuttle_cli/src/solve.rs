use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use shuttle_optimizer::{
    model::constraints::subtour::SubtourStrategy,
    oracle::good_lp_oracle::GoodLpOracle,
    parsers::json_parser::JsonParser,
    solver::{planner::Planner, planner_params::PlannerParams},
};
use tracing::{info, warn};

use crate::report_writer;

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SubtourArg {
    /// Static below the faculty threshold, lazy above it
    Auto,
    Static,
    Lazy,
}

#[derive(Args)]
pub struct SolveArgs {
    /// JSON file describing the fleet, the faculties and the distances
    #[arg(short, long, env = "SHUTTLE_INPUT")]
    input: PathBuf,

    /// Write the report to this file instead of stdout
    #[arg(short, long, env = "SHUTTLE_OUTPUT")]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, env = "SHUTTLE_FORMAT", default_value = "text")]
    format: ReportFormat,

    #[arg(long, value_enum, env = "SHUTTLE_SUBTOURS", default_value = "auto")]
    subtours: SubtourArg,

    /// Largest faculty count for which `auto` enumerates every subtour cut
    #[arg(long, env = "SHUTTLE_MAX_STATIC_FACULTIES", default_value_t = 12)]
    max_static_faculties: usize,

    #[arg(long, env = "SHUTTLE_MAX_CUT_ROUNDS", default_value_t = 50)]
    max_cut_rounds: usize,
}

impl SolveArgs {
    fn planner_params(&self) -> PlannerParams {
        PlannerParams {
            subtours: match self.subtours {
                SubtourArg::Auto => SubtourStrategy::Auto {
                    max_static_faculties: self.max_static_faculties,
                },
                SubtourArg::Static => SubtourStrategy::Static,
                SubtourArg::Lazy => SubtourStrategy::Lazy,
            },
            max_cut_rounds: self.max_cut_rounds,
            ..PlannerParams::default()
        }
    }
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let problem = JsonParser
        .from_file(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let planner = Planner::new(GoodLpOracle, args.planner_params());
    let report = planner.solve(&problem);

    if report.diagnostic {
        warn!(status = %report.status, "No optimal plan, the report is diagnostic only");
    } else {
        info!(objective = ?report.objective, duration = %report.solve_duration, "Found optimal plan");
    }

    let rendered = match args.format {
        ReportFormat::Text => report_writer::render_text(&report)?,
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    match args.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, rendered)?;
            info!("Wrote report to {}", output.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
