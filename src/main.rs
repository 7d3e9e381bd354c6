use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskdesk::{console::Console, route, Config, CredentialStore, FileBackend, Session};

#[derive(Debug, Parser)]
#[command(name = "taskdesk", version, about = "Task manager with user accounts")]
struct Cli {
    /// Directory holding users.json and the per-user task files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the interactive session (default).
    Run,
    /// Print registered usernames, one per line.
    Users,
}

// Entry point of the application
fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the menus on stdout stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    tracing::debug!(?config, "Loaded configuration");

    let backend = Arc::new(FileBackend::from_config(&config));

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let mut session = Session::new(backend);
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout().lock());
            route::run(&mut console, &mut session)?;
        }
        Command::Users => {
            let mut out = io::stdout().lock();
            for username in CredentialStore::new(backend).list_usernames() {
                writeln!(out, "{}", username)?;
            }
        }
    }

    Ok(())
}
