//! uap-hotel agent binary.
//!
//! Discovers the service at `UAP_BASE_URL`, picks the action that best
//! matches the goal and invokes it.
//!
//! # Usage
//!
//! ```bash
//! agent "Find available rooms for next weekend"
//! agent --yes "Book room-202 for Ada Lovelace next weekend"
//! ```
//!
//! Exit status: 0 on success, 1 when the run failed, 2 on usage or
//! configuration errors.

use std::process::ExitCode;

use clap::Parser;
use uap_hotel::agent::{Agent, ReqwestTransport};
use uap_hotel::config::{parse_timeout, validate_base_url, AgentConfig};

const DEFAULT_GOAL: &str = "Find available room types for next weekend.";

#[derive(Parser, Debug)]
#[command(
    name = "agent",
    version,
    about = "Discover a UAP service and invoke the action matching a goal"
)]
struct Args {
    /// Goal in plain words, e.g. "Find available rooms for next weekend"
    goal: Vec<String>,

    /// Service base URL (overrides UAP_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides UAP_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<String>,

    /// Confirm actions that require user approval
    #[arg(short = 'y', long, default_value_t = false)]
    yes: bool,

    /// Print the raw JSON result instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> anyhow::Result<AgentConfig> {
    let mut config = AgentConfig::from_env()?;
    if let Some(ref base_url) = args.base_url {
        config.base_url = validate_base_url("--base-url", base_url)?;
    }
    if let Some(ref timeout) = args.timeout {
        config.timeout = parse_timeout("--timeout", timeout)?;
    }
    config.auto_confirm |= args.yes;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let transport = match ReqwestTransport::new(config.timeout) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("error: failed to build HTTP client: {e}");
            return ExitCode::from(2);
        }
    };

    let goal = args.goal.join(" ");
    let goal = match goal.trim() {
        "" => DEFAULT_GOAL.to_string(),
        trimmed => trimmed.to_string(),
    };

    let mut agent = Agent::new(config.base_url, transport).with_auto_confirm(config.auto_confirm);
    match agent.run(&goal).await {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report.result.body) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", report.summary());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
