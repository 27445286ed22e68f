use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use enigma::{LogSink, MachineConfig, Session, WriterSink};

#[derive(Parser)]
#[command(name = "enigma")]
#[command(version, about = "Encipher and decipher messages with a rotor machine")]
struct Cli {
    /// Print each converted symbol to stderr as `[POSITIONS] IN -> PLUGGED -> OUT`
    #[arg(long)]
    verbose: bool,

    /// Machine configuration file
    config: PathBuf,

    /// Message file (defaults to standard input)
    input: Option<PathBuf>,

    /// Output file (defaults to standard output)
    output: Option<PathBuf>,
}

/// Log filter from `RUST_LOG` directives, `warn` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(log_filter(directives.as_deref()))
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = MachineConfig::from_path(&cli.config)
        .with_context(|| format!("could not load {}", cli.config.display()))?;
    let mut session = Session::new(&config)?;
    if cli.verbose {
        session
            .machine_mut()
            .set_trace_sink(Box::new(WriterSink::new(io::stderr())));
    } else if tracing::enabled!(tracing::Level::DEBUG) {
        session.machine_mut().set_trace_sink(Box::new(LogSink));
    }

    let output: Box<dyn io::Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match &cli.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("could not open {}", path.display()))?;
            session.process(BufReader::new(file), output)?;
        }
        None => session.process(io::stdin().lock(), output)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::prelude::*;

    fn enabled_under(directives: Option<&str>) -> (bool, bool) {
        let subscriber = tracing_subscriber::registry().with(log_filter(directives));
        let _guard = tracing::subscriber::set_default(subscriber);
        (
            tracing::enabled!(Level::DEBUG),
            tracing::enabled!(Level::WARN),
        )
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(enabled_under(None), (false, true), "unset means warn");
        assert_eq!(enabled_under(Some("debug")), (true, true));
        assert_eq!(enabled_under(Some("error")), (false, false));
        assert_eq!(
            enabled_under(Some("enigma=loud")),
            (false, true),
            "invalid directives fall back to warn"
        );
    }
}
