//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Run a tree bytecode program against a fresh in-memory tree
#[derive(Parser, Debug)]
#[command(name = "treevm", version)]
pub struct Cli {
    /// Program file to execute (JSON unless --binary is given)
    #[arg(short, long)]
    pub program: Option<PathBuf>,

    /// Decode the program file as binary
    #[arg(short, long)]
    pub binary: bool,

    /// Stream id callbacks are delivered on
    #[arg(short, long, default_value_t = 0)]
    pub stream: u64,

    /// Maximum number of live nodes
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Print decoded instructions before running
    #[arg(short, long)]
    pub dump: bool,

    /// Write the binary encoding of the loaded program to this file
    #[arg(short, long)]
    pub encode: Option<PathBuf>,
}
