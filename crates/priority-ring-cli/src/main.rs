use std::io;

use clap::Parser;
use priority_ring::Priority;
use priority_ring_cli::{Session, SessionOptions};
use tracing_subscriber::EnvFilter;

/// Interactive exerciser for the priority ring buffer.
#[derive(Parser)]
#[command(version)]
struct Params {
    /// Do not clear the terminal between screens.
    #[clap(long)]
    no_clear: bool,

    /// Print the buffer internals after every command.
    #[clap(long)]
    dump: bool,

    /// Initial insert priority (0 is lowest).
    #[clap(short, long, default_value_t = 0)]
    priority: Priority,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let params = Params::parse();
    let options = SessionOptions {
        clear: !params.no_clear,
        dump: params.dump,
        priority: params.priority,
    };

    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), options)?;
    session.run()?;

    Ok(())
}
