mod config;
mod error;
mod extract;
mod model;
mod normalize;
mod pipeline;
mod prompt;
mod render;
mod server;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use model::{EvaluationRequest, EvaluationResult, EvaluationState};

#[derive(Parser)]
#[command(name = "company-evaluator", version, about = "Should I apply? Company evaluation service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        #[arg(long, env = "EVALUATOR_LISTEN_ADDR", default_value = "0.0.0.0:3000")]
        listen: String,
    },
    /// Evaluate one company and print the verdict.
    Evaluate {
        /// Company URL or bare domain, e.g. "stripe.com".
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!(
        provider = ?config.provider,
        max_tokens = config.max_tokens,
        fetch_timeout_ms = config.fetch.timeout.as_millis(),
        "configuration loaded"
    );
    let evaluator = config.build_evaluator()?;

    match cli.command {
        Some(Command::Evaluate { url }) => {
            let request = EvaluationRequest::new(&url)?;
            eprintln!("{}", render::render_state(&EvaluationState::Pending));
            let state = match evaluator.evaluate(&request).await {
                Ok(value) => EvaluationState::Success(EvaluationResult::from_value(&value)),
                Err(e) => {
                    tracing::error!(error = %e, "evaluation failed");
                    EvaluationState::Failure(e.user_message().to_string())
                }
            };
            println!("{}", render::render_state(&state));
            if matches!(state, EvaluationState::Failure(_)) {
                std::process::exit(1);
            }
        }
        command => {
            let listen = match command {
                Some(Command::Serve { listen }) => listen,
                _ => std::env::var("EVALUATOR_LISTEN_ADDR")
                    .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            };
            let app = server::create_router(evaluator);
            let listener = TcpListener::bind(&listen).await?;
            info!(listen_addr = %listen, "HTTP server ready");
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
