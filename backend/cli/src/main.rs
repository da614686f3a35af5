//! camp-cli: command-line interface for the camp group/counselor solver.
//!
//! # Commands
//!
//! - `solve`: run both solver phases and score the result
//! - `validate`: build the reduction layer for a dataset without solving
//! - `schema`: print the JSON schema for the input dataset or parameters

use anyhow::{Context, Result};
use camp_contracts::DatasetContract;
use camp_core::config::SolverParams;
use camp_core::models::Session;
use camp_core::{solve_session, SessionResult};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "camp-cli")]
#[command(version = "0.1.0")]
#[command(about = "Camp group/counselor assignment solver CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SessionArg {
    Morning,
    Afternoon,
}

impl From<SessionArg> for Session {
    fn from(value: SessionArg) -> Self {
        match value {
            SessionArg::Morning => Session::Morning,
            SessionArg::Afternoon => Session::Afternoon,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ParamsPreset {
    Afternoon,
    Relaxed,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the solver on a dataset file and print the scored result
    Solve {
        /// Input JSON file path (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        #[arg(long, value_enum, default_value_t = SessionArg::Afternoon)]
        session: SessionArg,

        #[arg(long, value_enum, default_value_t = ParamsPreset::Afternoon)]
        params: ParamsPreset,

        #[arg(long)]
        pretty: bool,
    },

    /// Build the reduction layer for a dataset without running the solver
    Validate {
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        #[arg(long, value_enum, default_value_t = SessionArg::Afternoon)]
        session: SessionArg,

        #[arg(long, value_enum, default_value_t = ParamsPreset::Afternoon)]
        params: ParamsPreset,
    },

    /// Print the JSON schema for the dataset or parameter input formats
    Schema {
        /// Which schema to print: dataset or params
        #[arg(value_name = "TYPE", default_value = "dataset")]
        schema_type: String,
    },
}

impl ParamsPreset {
    fn resolve(self) -> SolverParams {
        match self {
            ParamsPreset::Afternoon => SolverParams::afternoon_defaults(),
            ParamsPreset::Relaxed => SolverParams::relaxed_defaults(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            stdin,
            session,
            params,
            pretty,
        } => cmd_solve(input, stdin, session.into(), params.resolve(), pretty),

        Commands::Validate {
            input,
            stdin,
            session,
            params,
        } => cmd_validate(input, stdin, session.into(), params.resolve()),

        Commands::Schema { schema_type } => cmd_schema(&schema_type),
    }
}

fn read_input(file: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    if use_stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("failed to read file: {path:?}"))
    } else {
        anyhow::bail!("either provide an input file or use --stdin")
    }
}

fn load_dataset(json_str: &str) -> Result<camp_core::models::Dataset> {
    let contract: DatasetContract =
        serde_json::from_str(json_str).context("failed to parse input JSON against the dataset schema")?;
    camp_contracts::into_core_dataset(contract).context("dataset failed to convert into solver types")
}

fn cmd_solve(
    input: Option<PathBuf>,
    stdin: bool,
    session: Session,
    params: SolverParams,
    pretty: bool,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let dataset = load_dataset(&json_str)?;
    params.validate().context("invalid solver parameters")?;

    let result = solve_session(&dataset, session, &params)
        .map_err(|e| anyhow::anyhow!("reduction-layer error: {e}"))?;

    let report = match &result {
        SessionResult::Solved {
            campers_by_group,
            counselor_assignment,
            score,
            ..
        } => serde_json::json!({
            "status": "solved",
            "groups": campers_by_group,
            "counselor_assignment": counselor_assignment,
            "score": score.total,
        }),
        SessionResult::CamperSearchExhausted => serde_json::json!({
            "status": "camper_search_exhausted",
        }),
        SessionResult::StaffingShortfall { campers_by_group, .. } => serde_json::json!({
            "status": "staffing_shortfall",
            "groups": campers_by_group,
        }),
    };

    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");
    Ok(())
}

fn cmd_validate(
    input: Option<PathBuf>,
    stdin: bool,
    session: Session,
    params: SolverParams,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let dataset = load_dataset(&json_str)?;
    params.validate().context("invalid solver parameters")?;

    match camp_core::rbl::build_session_rbl(&dataset, session, &params) {
        Ok((camper_rbl, counselor_rbl)) => {
            println!(
                "{{\"valid\": true, \"components\": {}, \"counselors\": {}}}",
                camper_rbl.components.len(),
                counselor_rbl.counselor_domain.len()
            );
            Ok(())
        }
        Err(e) => {
            println!("{{\"valid\": false, \"error\": {:?}}}", e.to_string());
            Ok(())
        }
    }
}

fn cmd_schema(schema_type: &str) -> Result<()> {
    let schema = match schema_type {
        "dataset" => camp_contracts::dataset_schema(),
        "params" => camp_contracts::solver_params_schema(),
        other => anyhow::bail!("unknown schema type: {other} (expected dataset or params)"),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
