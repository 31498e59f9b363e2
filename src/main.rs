use std::fs::File;
use std::io::{self, BufWriter};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::str::FromStr;

use rust_decimal::Decimal;

use raise_engine::api::{AppState, create_router};
use raise_engine::calculation::run_simulation;
use raise_engine::config::{ConfigLoader, SimulationConfig};
use raise_engine::error::{EngineError, EngineResult};
use raise_engine::report::{render_summary, render_table};
use raise_engine::roster::{read_csv_path, write_enriched_csv};

const USAGE: &str = "\
usage:
  raise-engine simulate --roster <csv> [--config <yaml>] [--budget <amount>] [--output <csv>]
  raise-engine serve [--config <yaml>] [--addr <host:port>]";

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    roster: Option<String>,
    budget: Option<String>,
    output: Option<String>,
    addr: Option<String>,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let slot = match flag.as_str() {
            "--config" => &mut options.config,
            "--roster" => &mut options.roster,
            "--budget" => &mut options.budget,
            "--output" => &mut options.output,
            "--addr" => &mut options.addr,
            other => return Err(format!("unknown argument '{}'", other)),
        };
        let value = iter
            .next()
            .ok_or_else(|| format!("{} requires a value", flag))?;
        *slot = Some(value.clone());
    }
    Ok(options)
}

fn load_config(options: &Options) -> EngineResult<SimulationConfig> {
    let config = match &options.config {
        Some(path) => ConfigLoader::load(path)?.into_config(),
        None => SimulationConfig::default(),
    };
    match &options.budget {
        Some(raw) => {
            let budget = Decimal::from_str(raw).map_err(|e| EngineError::InvalidConfig {
                field: "total_budget".to_string(),
                message: e.to_string(),
            })?;
            config.with_total_budget(budget)
        }
        None => Ok(config),
    }
}

fn run_simulate(options: &Options) -> EngineResult<()> {
    let config = load_config(options)?;
    let roster_path = options.roster.as_deref().ok_or_else(|| EngineError::ParseError {
        message: "--roster is required".to_string(),
    })?;
    let roster = read_csv_path(roster_path)?;

    let result = run_simulation(&roster, &config)?;
    for warning in &result.audit_trace.warnings {
        tracing::warn!(line = warning.line, code = %warning.code, "{}", warning.message);
    }

    print!("{}", render_table(&result));
    println!();
    print!("{}", render_summary(&result.summary));

    if let Some(path) = &options.output {
        let file = File::create(path).map_err(|e| EngineError::OutputError {
            message: format!("failed to create '{}': {}", path, e),
        })?;
        write_enriched_csv(&roster, &result, BufWriter::new(file))?;
        tracing::info!(path = %path, rows = result.employees.len(), "Wrote enriched roster");
    }
    Ok(())
}

async fn run_serve(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(options)?;
    let addr: SocketAddr = options.addr.as_deref().unwrap_or(DEFAULT_ADDR).parse()?;

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Raise simulation API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let options = match parse_options(rest) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    let outcome: Result<(), Box<dyn std::error::Error>> = match command.as_str() {
        "simulate" => run_simulate(&options).map_err(Into::into),
        "serve" => match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(run_serve(&options)),
            Err(e) => Err(e.into()),
        },
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
