//! Virtual machine for tree bytecode
//!
//! Main entry point for executing instructions against a tree backend.

use bytecode_system::{Instruction, Opcode, Operand, Program};
use tracing::{debug, trace};
use tree_engine::Backend;

use crate::context::{Status, VmState};
use crate::dispatch::Dispatcher;
use crate::fault::{Fault, RunError};
use crate::result::StepResult;
use crate::stream::{Sink, Stream};

/// Virtual machine executing one instruction at a time
///
/// The VM owns only its addressing state and status. The tree and the
/// stream are passed into every step, so several VMs can drive one tree
/// as long as their steps are serialized.
#[derive(Debug, Default)]
pub struct Vm {
    /// Dispatcher holding the current node and attribute
    dispatcher: Dispatcher,
    /// Ready or Faulted
    status: Status,
    /// Fault that moved the VM to Faulted
    fault: Option<Fault>,
    /// Successful steps since creation or the last reset
    steps: u64,
}

impl Vm {
    /// Create a VM in the Ready state with empty addressing state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a VM that continues from a previously captured state
    pub fn with_state(state: VmState) -> Self {
        Self {
            dispatcher: Dispatcher::with_state(state),
            ..Self::default()
        }
    }

    /// Current addressing state
    pub fn state(&self) -> &VmState {
        self.dispatcher.state()
    }

    /// Execution status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Fault that stopped the VM, if any
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Number of successful steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Clear the fault and the addressing state and return to Ready
    pub fn reset(&mut self) {
        self.dispatcher.set_state(VmState::default());
        self.status = Status::Ready;
        self.fault = None;
        self.steps = 0;
        debug!("vm reset");
    }

    /// Execute one instruction
    ///
    /// # Arguments
    ///
    /// * `tree` - Backend the instruction operates on
    /// * `stream` - Stream receiving the result
    /// * `instruction` - Opcode and explicit operands
    ///
    /// # Returns
    ///
    /// The step result, which has already been delivered to the stream's
    /// sink. Any fault leaves the VM Faulted. A sink rejection is raised
    /// after the engine operation has taken effect.
    pub fn step<B, S>(
        &mut self,
        tree: &mut B,
        stream: &mut Stream<S>,
        instruction: &Instruction,
    ) -> Result<StepResult, Fault>
    where
        B: Backend + ?Sized,
        S: Sink,
    {
        self.execute(tree, stream, instruction.opcode, &instruction.operands)
    }

    /// Execute one instruction given as a raw opcode byte
    ///
    /// An unrecognised code faults with [`Fault::UnknownOpcode`].
    pub fn step_code<B, S>(
        &mut self,
        tree: &mut B,
        stream: &mut Stream<S>,
        code: u8,
        operands: &[Operand],
    ) -> Result<StepResult, Fault>
    where
        B: Backend + ?Sized,
        S: Sink,
    {
        if self.status == Status::Faulted {
            return Err(Fault::Faulted);
        }
        match Opcode::from_code(code) {
            Some(opcode) => self.execute(tree, stream, opcode, operands),
            None => Err(self.enter_fault(Fault::UnknownOpcode(code))),
        }
    }

    /// Execute a program until it ends or faults
    ///
    /// # Returns
    ///
    /// The number of instructions executed, or the index of the faulting
    /// instruction together with its fault.
    pub fn run<B, S>(
        &mut self,
        tree: &mut B,
        stream: &mut Stream<S>,
        program: &Program,
    ) -> Result<usize, RunError>
    where
        B: Backend + ?Sized,
        S: Sink,
    {
        for (index, instruction) in program.iter().enumerate() {
            self.step(tree, stream, instruction)
                .map_err(|fault| RunError { index, fault })?;
        }
        Ok(program.len())
    }

    fn execute<B, S>(
        &mut self,
        tree: &mut B,
        stream: &mut Stream<S>,
        opcode: Opcode,
        operands: &[Operand],
    ) -> Result<StepResult, Fault>
    where
        B: Backend + ?Sized,
        S: Sink,
    {
        if self.status == Status::Faulted {
            return Err(Fault::Faulted);
        }
        trace!(
            stream = stream.id().0,
            opcode = %opcode,
            operands = operands.len(),
            "step"
        );

        let result = match self.dispatcher.execute(tree, opcode, operands) {
            Ok(result) => result,
            Err(fault) => return Err(self.enter_fault(fault)),
        };
        if let Err(fault) = stream.deliver(&result) {
            return Err(self.enter_fault(fault));
        }

        self.steps += 1;
        Ok(result)
    }

    fn enter_fault(&mut self, fault: Fault) -> Fault {
        debug!(%fault, steps = self.steps, "vm faulted");
        self.status = Status::Faulted;
        self.fault = Some(fault.clone());
        fault
    }
}
