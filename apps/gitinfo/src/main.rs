use std::{
    io::{IsTerminal, Write},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ApiEndpoint, LookupController, ReqwestTransport, TransportConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

mod config;
mod render;

use config::{load_settings, normalize_api_base_url};
use render::{render_state, OutputFormat};

/// Look up a GitHub user profile.
#[derive(Parser, Debug)]
#[command(name = "gitinfo", version)]
struct Args {
    /// Username to look up. Without it, one username is read per stdin line.
    username: Option<String>,
    /// Root of the users API, e.g. a GitHub Enterprise `/api/v3` url.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    user_agent: Option<String>,
    /// Print the profile as pretty JSON instead of the summary view.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(v) = args.api_base_url {
        settings.api_base_url = normalize_api_base_url(&v);
    }
    if let Some(v) = args.user_agent {
        settings.user_agent = v;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let endpoint = ApiEndpoint::parse(&settings.api_base_url)
        .with_context(|| format!("invalid api base url '{}'", settings.api_base_url))?;
    let transport = ReqwestTransport::new(&TransportConfig {
        user_agent: settings.user_agent.clone(),
    })?;
    info!(api_base_url = %endpoint.base(), "starting gitinfo");
    let controller = LookupController::new(Arc::new(transport), endpoint);

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Summary
    };

    match args.username {
        Some(username) => {
            controller.lookup(&username).await;
            let state = controller.snapshot().await;
            print!("{}", render_state(&state, format));
            if state.error.is_some() {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            run_interactive(&controller, format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_interactive(controller: &LookupController, format: OutputFormat) -> Result<()> {
    let prompt = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if prompt {
            eprint!("username> ");
            std::io::stderr().flush().context("failed to flush prompt")?;
        }
        let Some(line) = lines
            .next_line()
            .await
            .context("failed to read username from stdin")?
        else {
            break;
        };

        controller.lookup(&line).await;
        print!("{}", render_state(&controller.snapshot().await, format));
    }

    debug!("stdin closed; leaving interactive mode");
    Ok(())
}
