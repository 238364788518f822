use std::path::PathBuf;

use clap::Subcommand;
use tracing::info;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    JsonSchema {
        /// File the schema of the input format is written to
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            let schema = shuttle_optimizer::json::schema::generate_json_schema()?;

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&out, schema)?;
            info!("Wrote input schema to {}", out.display());
        }
    }

    Ok(())
}
