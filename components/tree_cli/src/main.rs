//! Tree VM CLI
//!
//! Entry point for the `treevm` binary. Parses CLI arguments, loads the
//! program and delegates to the Runtime for execution.

use clap::Parser as ClapParser;
use core_types::StreamId;
use tracing_subscriber::{fmt, EnvFilter};
use tree_cli::{encode_program, load_program, Cli, CliError, Runtime};
use tree_engine::TreeConfig;

/// Install the log subscriber. `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,treevm=info,tree_cli=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Some(path) = cli.program else {
        println!("treevm {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage:");
        println!("  treevm --program <FILE>            Run a JSON program");
        println!("  treevm --program <FILE> --binary   Run a binary program");
        println!();
        println!("Run 'treevm --help' for more options.");
        return Ok(());
    };

    let program = load_program(&path, cli.binary)?;

    if cli.dump {
        for (index, instruction) in program.iter().enumerate() {
            println!("{:4}  {}", index, instruction);
        }
    }
    if let Some(out) = &cli.encode {
        encode_program(&program, out)?;
    }

    let config = TreeConfig {
        node_limit: cli.max_nodes,
    };
    let mut runtime = Runtime::new(config, StreamId(cli.stream));
    runtime.execute(&program)?;
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => {}
        Err(CliError::Run(e)) => {
            eprintln!("Fault: {}", e);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
