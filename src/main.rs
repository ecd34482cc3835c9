mod cli;
mod commands;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ShellLine};
use commands::Session;
use toonshelf::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load(cli.opts.config.as_deref())?;
    if let Some(url) = cli.opts.database {
        config.database_url = Some(url);
    }
    if cli.opts.ephemeral {
        config.ephemeral = true;
    }

    let library = toonshelf::open_library(&config).await?;
    let mut session = Session::new(library);

    match cli.command.unwrap_or(Commands::Categories) {
        Commands::Shell => shell(&mut session).await,
        command => {
            let mut stdout = std::io::stdout().lock();
            session.run(command, &mut stdout).await
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("TOONSHELF_LOG")
        .ok()
        .and_then(|s| EnvFilter::try_new(s).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn shell(session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    writeln!(stdout, "toonshelf shell: {} webtoons, type `help` or `exit`", session.library().webtoons().len())?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next_line().await? else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(p) => p,
            Err(e) => {
                write!(stdout, "{}", e.render())?;
                continue;
            }
        };
        if let Err(e) = session.run(parsed.command, &mut stdout).await {
            writeln!(stdout, "error: {e:#}")?;
        }
    }
    Ok(())
}
