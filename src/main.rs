//! multivac-launch - launch Multivac sessions from a form or the command line.
//!
//! ## Modes
//!
//! **`serve`**: Runs the launcher web page. Submissions are validated and
//! relayed to the upstream Multivac server's `/session` endpoint, then the
//! browser is sent back to the form.
//!
//! **`launch`**: Validates the given parameters and sends a single session
//! request, printing any alert to stderr.

use clap::{Parser as ClapParser, Subcommand};
use multivac_launch::{
    api,
    config::{ConfigError, LauncherConfig},
    dispatch::{HttpTransport, RequestError, RequestState, SessionDispatcher},
    form::RawLaunchForm,
    launcher::submit,
    surface::ConsoleSurface,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// multivac-launch - launch Multivac sessions
#[derive(ClapParser, Debug)]
#[command(name = "multivac-launch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the launcher config file (default: ~/.config/multivac/launch.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the Multivac server exposing /session (overrides config)
    #[arg(long, global = true, env = "MULTIVAC_UPSTREAM")]
    upstream: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the launcher web page
    Serve {
        /// Address to bind the launcher page
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },

    /// Send a single session request
    Launch {
        /// Name of the environment to start
        #[arg(long)]
        environment_name: String,

        /// Name of the agent to use
        #[arg(long)]
        agent_name: String,

        /// Number of steps to take on the environment before terminating
        #[arg(long)]
        num_steps: String,

        /// Time interval between observations (default from config: 250)
        #[arg(long, allow_hyphen_values = true)]
        observation_delta: Option<String>,

        /// Frames per second of the output recording (default from config: 1)
        #[arg(long, allow_hyphen_values = true)]
        video_fps: Option<String>,
    },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("client error: {0}")]
    Client(#[from] RequestError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), LaunchError> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = LauncherConfig::load_or_default(cli.config.as_deref())?;
    if let Some(upstream) = cli.upstream {
        config.upstream = upstream;
    }

    match cli.command {
        Commands::Serve { bind } => run_serve(bind, config).await,
        Commands::Launch {
            environment_name,
            agent_name,
            num_steps,
            observation_delta,
            video_fps,
        } => {
            let form = RawLaunchForm {
                observation_delta: observation_delta
                    .unwrap_or_else(|| config.defaults.observation_delta.clone()),
                video_fps: video_fps.unwrap_or_else(|| config.defaults.video_fps.clone()),
                environment_name,
                agent_name,
                num_steps,
            };
            run_launch(form, config).await
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "multivac_launch=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ── Serve mode ─────────────────────────────────────────────────────

async fn run_serve(bind: SocketAddr, config: LauncherConfig) -> Result<(), LaunchError> {
    let transport = HttpTransport::new(&config.upstream)?;
    tracing::info!(upstream = %transport.endpoint(), "multivac-launch starting");

    let state = api::AppState::new(SessionDispatcher::new(transport), config);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %bind, "launcher page listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("received Ctrl+C");
        })
        .await?;

    tracing::info!("multivac-launch exiting");
    Ok(())
}

// ── Launch mode ────────────────────────────────────────────────────

async fn run_launch(form: RawLaunchForm, config: LauncherConfig) -> Result<(), LaunchError> {
    if !config.knows_environment(&form.environment_name) {
        eprintln!(
            "multivac-launch launch: invalid environment '{}' (choose from {})",
            form.environment_name,
            config.environments.join(", ")
        );
        std::process::exit(2);
    }
    if !config.knows_agent(&form.agent_name) {
        eprintln!(
            "multivac-launch launch: invalid agent '{}' (choose from {})",
            form.agent_name,
            config.agents.join(", ")
        );
        std::process::exit(2);
    }

    let dispatcher = SessionDispatcher::new(HttpTransport::new(&config.upstream)?);
    let mut surface = ConsoleSurface::default();

    let outcome = submit(&form, &dispatcher, &mut surface).await;
    match outcome.state() {
        RequestState::Succeeded => {
            println!("Session launched.");
            Ok(())
        }
        state => {
            tracing::debug!(?state, "launch did not succeed");
            std::process::exit(1)
        }
    }
}
