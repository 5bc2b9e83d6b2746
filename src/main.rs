use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use loginflow::{AuthState, SessionController, SimulatedSessionService, view};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("login did not authenticate: {0}")]
    NotAuthenticated(String),
}

#[derive(Parser, Debug)]
#[command(name = "loginflow", about = "Simulated username/password login flow")]
struct Cli {
    #[arg(long, env = "LOGINFLOW_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one login attempt and print each state change.
    Login {
        #[arg(long, env = "LOGIN_USERNAME")]
        username: String,

        #[arg(long, env = "LOGIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Read `login`/`logout` commands from stdin.
    Repl,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let controller = SessionController::new(Arc::new(SimulatedSessionService::new()));

    match cli.command {
        Command::Login { username, password } => run_login(&controller, cli.output, &username, &password).await,
        Command::Repl => run_repl(&controller, cli.output).await,
    }
}

fn print_state(state: &AuthState, output: OutputFormat) -> Result<(), CliError> {
    match output {
        OutputFormat::Text => {
            for line in view::render(state) {
                println!("{line}");
            }
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
    }
    Ok(())
}

async fn run_login(
    controller: &SessionController,
    output: OutputFormat,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let mut rx = controller.subscribe();
    print_state(&rx.borrow_and_update().clone(), output)?;

    controller.login(username, password);
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        print_state(&state, output)?;
        if !state.is_loading {
            if state.is_authenticated {
                return Ok(());
            }
            return Err(CliError::NotAuthenticated(state.error_message.unwrap_or(state.user_id)));
        }
    }
    Ok(())
}

async fn run_repl(controller: &SessionController, output: OutputFormat) -> Result<(), CliError> {
    print_state(&controller.state(), output)?;

    let mut rx = controller.subscribe();
    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if let Err(err) = print_state(&state, output) {
                error!(error = %err, "failed to render state");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            // Duplicate submissions are dropped by the controller without feedback.
            (Some("login"), Some(username), Some(password)) => {
                controller.login(username, password);
            }
            (Some("logout"), None, None) => controller.logout(),
            (Some("state"), None, None) => print_state(&controller.state(), output)?,
            (Some("quit" | "exit"), ..) => break,
            (Some("help"), ..) => print_help(),
            (None, ..) => {}
            _ => println!("unknown command: {}", line.trim()),
        }
    }

    watcher.abort();
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  login <username> <password>");
    println!("  logout");
    println!("  state");
    println!("  quit");
}
