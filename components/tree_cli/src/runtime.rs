//! Runtime orchestration for program execution
//!
//! The Runtime struct ties the pieces together:
//! - Program loading from JSON or the binary encoding
//! - A fresh `ArenaTree` backend
//! - The VM, bound to a stream whose sink prints every callback

use std::io::{self, Write};
use std::path::Path;

use bytecode_system::Program;
use core_types::{AttributeId, NodeId, StreamId};
use interpreter::{Sink, SinkStatus, Stream, Vm};
use tracing::{debug, info};
use tree_engine::{ArenaTree, Backend, TreeConfig};

use crate::error::CliResult;

/// Status a [`PrintSink`] answers with when its writer fails
pub const WRITE_FAILED: SinkStatus = SinkStatus(1);

/// Sink that writes one line per callback
#[derive(Debug)]
pub struct PrintSink<W> {
    out: W,
}

impl<W: Write> PrintSink<W> {
    /// Print to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn line(&mut self, stream: StreamId, args: std::fmt::Arguments<'_>) -> SinkStatus {
        match writeln!(self.out, "[{}] {}", stream.0, args) {
            Ok(()) => SinkStatus::ACCEPT,
            Err(_) => WRITE_FAILED,
        }
    }
}

impl<W: Write> Sink for PrintSink<W> {
    fn on_node(&mut self, stream: StreamId, node: NodeId) -> SinkStatus {
        self.line(stream, format_args!("node {}", node))
    }

    fn on_attribute(&mut self, stream: StreamId, attribute: AttributeId) -> SinkStatus {
        self.line(stream, format_args!("attribute {}", attribute))
    }

    fn on_string(&mut self, stream: StreamId, text: &str) -> SinkStatus {
        self.line(stream, format_args!("text {:?}", text))
    }

    fn on_integer(&mut self, stream: StreamId, value: i64) -> SinkStatus {
        self.line(stream, format_args!("integer {}", value))
    }

    fn on_boolean(&mut self, stream: StreamId, value: bool) -> SinkStatus {
        self.line(stream, format_args!("boolean {}", value))
    }

    fn on_real(&mut self, stream: StreamId, value: f64) -> SinkStatus {
        self.line(stream, format_args!("real {}", value))
    }
}

/// Main runtime that executes programs on one tree
pub struct Runtime<W: Write = io::Stdout> {
    /// Tree the program mutates
    tree: ArenaTree,
    /// VM carrying the current node and attribute between programs
    vm: Vm,
    /// Output stream
    stream: Stream<PrintSink<W>>,
}

impl Runtime<io::Stdout> {
    /// Create a runtime printing callbacks to stdout
    ///
    /// # Example
    /// ```
    /// use core_types::StreamId;
    /// use tree_cli::Runtime;
    /// use tree_engine::TreeConfig;
    ///
    /// let runtime = Runtime::new(TreeConfig::default(), StreamId(0));
    /// ```
    pub fn new(config: TreeConfig, stream: StreamId) -> Self {
        Self::with_writer(config, stream, io::stdout())
    }
}

impl<W: Write> Runtime<W> {
    /// Create a runtime printing callbacks to `out`
    pub fn with_writer(config: TreeConfig, stream: StreamId, out: W) -> Self {
        Self {
            tree: ArenaTree::with_config(config),
            vm: Vm::new(),
            stream: Stream::new(stream, PrintSink::new(out)),
        }
    }

    /// Tree after execution
    pub fn tree(&self) -> &ArenaTree {
        &self.tree
    }

    /// VM after execution
    pub fn vm(&self) -> &Vm {
        &self.vm
    }

    /// Printed output
    pub fn output(&self) -> &W {
        self.stream.sink().get_ref()
    }

    /// Execute a program
    ///
    /// # Returns
    /// The number of instructions executed
    ///
    /// # Errors
    /// Returns `CliError::Run` with the faulting instruction index
    pub fn execute(&mut self, program: &Program) -> CliResult<usize> {
        let executed = self.vm.run(&mut self.tree, &mut self.stream, program)?;
        info!(
            instructions = executed,
            nodes = self.tree.node_count(),
            "program finished"
        );
        Ok(executed)
    }

    /// Load and execute a program file
    ///
    /// # Example
    /// ```no_run
    /// use core_types::StreamId;
    /// use tree_cli::Runtime;
    /// use tree_engine::TreeConfig;
    ///
    /// let mut runtime = Runtime::new(TreeConfig::default(), StreamId(0));
    /// runtime.execute_file("program.json".as_ref(), false).unwrap();
    /// ```
    pub fn execute_file(&mut self, path: &Path, binary: bool) -> CliResult<usize> {
        let program = load_program(path, binary)?;
        self.execute(&program)
    }
}

/// Load a program file
///
/// # Arguments
/// * `path` - Program file
/// * `binary` - Decode the binary encoding instead of JSON
///
/// # Errors
/// Returns `CliError` if the file cannot be read or decoded
pub fn load_program(path: &Path, binary: bool) -> CliResult<Program> {
    let program = if binary {
        Program::from_bytes(&std::fs::read(path)?)?
    } else {
        parse_program(&std::fs::read_to_string(path)?)?
    };
    info!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

/// Parse the JSON form of a program
pub fn parse_program(source: &str) -> CliResult<Program> {
    Ok(serde_json::from_str(source)?)
}

/// Write the binary encoding of `program` to `path`
///
/// # Errors
/// Returns `CliError::Encode` if the program does not fit the binary
/// format; nothing is written in that case
pub fn encode_program(program: &Program, path: &Path) -> CliResult<()> {
    let bytes = program.to_bytes()?;
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "program encoded");
    Ok(())
}
