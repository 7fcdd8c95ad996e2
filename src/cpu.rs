//! # CPU Step
//!
//! This module contains the fetch-decode-execute logic for a single
//! instruction step.
//!
//! ## Execution Model
//!
//! [`step`] is a pure state transition: it borrows the caller's memory,
//! registers and input signals, and returns a [`StepOutcome`] holding fresh
//! owned values plus the output signal bus. A step that fails publishes
//! nothing: the caller's state is untouched, so the state prior to the step
//! is preserved all-or-nothing.
//!
//! One call executes exactly one instruction:
//!
//! 1. If the hardware interrupt line is raised **and** the Interrupt flag is
//!    set, the step traps instead of fetching: the current `ip` is pushed and
//!    execution vectors through [`HARDWARE_INTERRUPT_VECTOR`].
//! 2. Otherwise the opcode at `ip` is fetched and dispatched; an undefined
//!    byte raises [`RuntimeError::InvalidOpcode`].
//!
//! The `halted` output signal is the only termination indicator; the clock
//! driving repeated steps lives outside the core.
//!
//! # Examples
//!
//! ```
//! use lib8bit::{assemble, step, InputSignals, Register, Registers};
//!
//! let output = assemble("inc al\nend").unwrap();
//! let registers = Registers::new();
//!
//! let outcome = step(&output.image, &registers, &InputSignals::default()).unwrap();
//!
//! assert_eq!(outcome.registers.get(Register::AL), 1);
//! assert_eq!(outcome.registers.ip(), 2);
//! assert!(!outcome.signals.halted);
//!
//! // The original state is untouched
//! assert_eq!(registers.get(Register::AL), 0);
//! ```

use crate::instructions;
use crate::memory::Memory;
use crate::opcodes::Opcode;
use crate::registers::{Flag, Register, Registers, MAX_SP};
use crate::signals::{InputSignals, OutputSignals};
use crate::RuntimeError;

use log::trace;

/// Memory address of the hardware interrupt vector, consulted on a hardware
/// trap only (software `INT` vectors through its own operand address).
pub const HARDWARE_INTERRUPT_VECTOR: u8 = 0x02;

/// The next machine state produced by a successful [`step`].
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Memory after the instruction
    pub memory: Memory,

    /// Registers after the instruction
    pub registers: Registers,

    /// Output signal bus raised by the instruction
    pub signals: OutputSignals,
}

/// Execute one instruction.
///
/// Returns the next `(memory, registers, signals)` state, or a
/// [`RuntimeError`] carrying the runtime context. The inputs are never
/// mutated; callers typically thread the outcome into the next call and stop
/// once `signals.halted` is raised.
pub fn step(
    memory: &Memory,
    registers: &Registers,
    input: &InputSignals,
) -> Result<StepOutcome, RuntimeError> {
    let mut core = Core {
        memory: memory.clone(),
        registers: *registers,
        input: *input,
        output: OutputSignals::default(),
    };

    core.execute()?;

    Ok(StepOutcome {
        memory: core.memory,
        registers: core.registers,
        signals: core.output,
    })
}

/// Working state for one instruction step.
///
/// Instruction implementations mutate this freely; `step` only publishes it
/// when execution succeeds.
pub(crate) struct Core {
    pub(crate) memory: Memory,
    pub(crate) registers: Registers,
    pub(crate) input: InputSignals,
    pub(crate) output: OutputSignals,
}

impl Core {
    fn execute(&mut self) -> Result<(), RuntimeError> {
        // A raised interrupt line traps before any fetch when the Interrupt
        // flag is set; the instruction at ip does not matter.
        if self.input.interrupt && self.registers.flag(Flag::Interrupt) {
            trace!(
                "[{:02X}] hardware interrupt trap via vector 0x{:02X}",
                self.registers.ip(),
                HARDWARE_INTERRUPT_VECTOR
            );
            return instructions::control::hardware_trap(self);
        }

        let opcode_byte = self.memory.read(self.registers.ip());
        let opcode =
            Opcode::from_byte(opcode_byte).ok_or(RuntimeError::InvalidOpcode(opcode_byte))?;

        trace!("[{:02X}] {}", self.registers.ip(), opcode.mnemonic());

        match opcode {
            Opcode::End | Opcode::Halt => instructions::control::execute_halt(self),

            Opcode::AddRegToReg
            | Opcode::AddNumToReg
            | Opcode::SubRegFromReg
            | Opcode::SubNumFromReg
            | Opcode::MulRegByReg
            | Opcode::MulRegByNum
            | Opcode::DivRegByReg
            | Opcode::DivRegByNum
            | Opcode::ModRegByReg
            | Opcode::ModRegByNum
            | Opcode::AndRegWithReg
            | Opcode::AndRegWithNum
            | Opcode::OrRegWithReg
            | Opcode::OrRegWithNum
            | Opcode::XorRegWithReg
            | Opcode::XorRegWithNum => instructions::alu::execute_binary(self, opcode),

            Opcode::IncReg
            | Opcode::DecReg
            | Opcode::NotReg
            | Opcode::RolReg
            | Opcode::RorReg
            | Opcode::ShlReg
            | Opcode::ShrReg => instructions::alu::execute_unary(self, opcode),

            Opcode::CmpRegWithReg | Opcode::CmpRegWithNum => {
                instructions::alu::execute_compare(self, opcode)
            }

            Opcode::Jmp
            | Opcode::Jz
            | Opcode::Jnz
            | Opcode::Js
            | Opcode::Jns
            | Opcode::Jo
            | Opcode::Jno => instructions::jumps::execute_jump(self, opcode),

            Opcode::MovNumToReg
            | Opcode::MovAddrToReg
            | Opcode::MovRegAddrToReg
            | Opcode::MovRegToAddr
            | Opcode::MovRegToRegAddr => instructions::moves::execute_mov(self, opcode),

            Opcode::PushFromReg => instructions::stack::execute_push(self),
            Opcode::PopToReg => instructions::stack::execute_pop(self),
            Opcode::Pushf => instructions::stack::execute_pushf(self),
            Opcode::Popf => instructions::stack::execute_popf(self),

            Opcode::CallAddr => instructions::control::execute_call(self),
            Opcode::Ret => instructions::control::execute_ret(self),
            Opcode::IntAddr => instructions::control::execute_int(self),
            Opcode::Iret => instructions::control::execute_iret(self),
            Opcode::Nop => instructions::control::execute_nop(self),

            Opcode::InFromPortToAl => instructions::io::execute_in(self),
            Opcode::OutFromAlToPort => instructions::io::execute_out(self),

            Opcode::Sti => instructions::flags::execute_sti(self),
            Opcode::Cli => instructions::flags::execute_cli(self),
            Opcode::Clo => instructions::flags::execute_clo(self),
        }
    }

    // ========== Helper Methods for Instruction Implementations ==========

    /// Reads the operand byte `offset` bytes past the opcode, failing when the
    /// fetch would run beyond the end of memory.
    pub(crate) fn fetch_operand(&self, offset: u8) -> Result<u8, RuntimeError> {
        let address = self.registers.ip() as i32 + offset as i32;
        if address > 0xFF {
            return Err(RuntimeError::RunBeyondEndOfMemory);
        }
        Ok(self.memory.read(address as u8))
    }

    /// Reads and validates a register index operand.
    pub(crate) fn fetch_register(&self, offset: u8) -> Result<Register, RuntimeError> {
        Register::from_index(self.fetch_operand(offset)?)
    }

    /// Advances `ip` past the current instruction.
    pub(crate) fn advance_ip(&mut self, size: u8) -> Result<(), RuntimeError> {
        self.jump_to(self.registers.ip() as i32 + size as i32)
    }

    /// Sets `ip` to `target`, failing when it leaves `0..=255`.
    pub(crate) fn jump_to(&mut self, target: i32) -> Result<(), RuntimeError> {
        if !(0..=0xFF).contains(&target) {
            return Err(RuntimeError::RunBeyondEndOfMemory);
        }
        self.registers.set_ip(target as u8);
        Ok(())
    }

    /// Pushes a byte: write to `memory[sp]`, then decrement `sp`.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), RuntimeError> {
        let sp = self.registers.sp();
        self.memory.write(sp, value);
        if sp == 0 {
            return Err(RuntimeError::StackOverflow);
        }
        self.registers.set_sp(sp - 1);
        Ok(())
    }

    /// Pops a byte: increment `sp`, then read `memory[sp]`.
    pub(crate) fn pop(&mut self) -> Result<u8, RuntimeError> {
        let sp = self.registers.sp() as u16 + 1;
        if sp > MAX_SP as u16 {
            return Err(RuntimeError::StackUnderflow);
        }
        self.registers.set_sp(sp as u8);
        Ok(self.memory.read(sp as u8))
    }

    /// Applies the arithmetic flag rule and returns the 8-bit result.
    ///
    /// The raw result is reduced modulo 256 (sign-normalised for negative
    /// values); overflow means the most significant bit crossed between the
    /// previous and the new value. The Interrupt flag is preserved.
    pub(crate) fn set_arithmetic_flags(&mut self, previous: u8, raw: i32) -> u8 {
        let result = raw.rem_euclid(256) as u8;

        self.registers.set_flag(Flag::Zero, result == 0);
        self.registers
            .set_flag(Flag::Overflow, (previous < 0x80) != (result < 0x80));
        self.registers.set_flag(Flag::Sign, result >= 0x80);

        result
    }
}
