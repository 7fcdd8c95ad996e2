//! # Stack Instructions
//!
//! The stack occupies addresses `0..=0xBF` and grows downward from
//! [`MAX_SP`](crate::MAX_SP). A push writes to `memory[sp]` and then
//! decrements `sp`; a pop increments `sp` and then reads. Growing past either
//! end of the stack region raises a stack error and aborts the step.
//!
//! `PUSHF` and `POPF` marshal the status register through its single-byte
//! layout (`byte = zero·2 + overflow·4 + sign·8 + interrupt·16`).

use crate::cpu::Core;
use crate::opcodes::Opcode;
use crate::RuntimeError;

/// Executes `PUSH reg`.
pub(crate) fn execute_push(core: &mut Core) -> Result<(), RuntimeError> {
    let source = core.fetch_register(1)?;
    core.push(core.registers.get(source))?;

    core.advance_ip(Opcode::PushFromReg.size())
}

/// Executes `POP reg`.
pub(crate) fn execute_pop(core: &mut Core) -> Result<(), RuntimeError> {
    let dest = core.fetch_register(1)?;
    let value = core.pop()?;
    core.registers.set(dest, value);

    core.advance_ip(Opcode::PopToReg.size())
}

/// Executes `PUSHF`.
pub(crate) fn execute_pushf(core: &mut Core) -> Result<(), RuntimeError> {
    core.push(core.registers.status_byte())?;

    core.advance_ip(Opcode::Pushf.size())
}

/// Executes `POPF`.
pub(crate) fn execute_popf(core: &mut Core) -> Result<(), RuntimeError> {
    let status = core.pop()?;
    core.registers.set_status_byte(status);

    core.advance_ip(Opcode::Popf.size())
}
