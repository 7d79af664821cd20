use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use todo_cli::{App, Args, Command, Flow, StdinConfirm};
use todo_client::{RemoteStore, TodoStore};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they do not interleave with the rendered frames.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let config = args.client_config();
    tracing::info!(api_url = %config.api_url, "starting");
    let store = TodoStore::new(RemoteStore::connect(&config), StdinConfirm);
    let mut app = App::new(store, StdinConfirm, args.toast_duration());
    runtime.block_on(app.mount());

    let mut stdout = io::stdout();
    write!(stdout, "{}", app.render(Instant::now()))?;

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line).context("failed to read stdin")? == 0 {
            break;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };
        if runtime.block_on(app.dispatch(command)) == Flow::Quit {
            break;
        }
        write!(stdout, "\n{}", app.render(Instant::now()))?;
    }
    Ok(())
}
