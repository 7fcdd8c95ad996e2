//! # Control Flow Instructions
//!
//! Halts, procedures and interrupts:
//!
//! - `END`/`HALT` raise the `halted` output signal and leave `ip` in place.
//! - `CALL addr` pushes the address of the byte after its 2-byte encoding and
//!   jumps to the operand address; `RET` pops into `ip`.
//! - `INT addr` pushes `ip + 2` and vectors through the operand: the handler
//!   address is read from `memory[addr]` (a vector table lookup). The
//!   hardware trap pushes the **current** `ip` and vectors through the fixed
//!   [`HARDWARE_INTERRUPT_VECTOR`](crate::HARDWARE_INTERRUPT_VECTOR). The
//!   asymmetry is intentional. `IRET` pops into `ip`.

use crate::cpu::{Core, HARDWARE_INTERRUPT_VECTOR};
use crate::RuntimeError;

/// Executes `END`/`HALT`: raise `halted`, leave `ip` in place.
pub(crate) fn execute_halt(core: &mut Core) -> Result<(), RuntimeError> {
    core.output.halted = true;
    Ok(())
}

/// Executes `NOP`.
pub(crate) fn execute_nop(core: &mut Core) -> Result<(), RuntimeError> {
    core.advance_ip(1)
}

/// Executes `CALL addr`.
pub(crate) fn execute_call(core: &mut Core) -> Result<(), RuntimeError> {
    let target = core.fetch_operand(1)?;

    let return_address = core.registers.ip() as i32 + 2;
    if return_address > 0xFF {
        return Err(RuntimeError::RunBeyondEndOfMemory);
    }
    core.push(return_address as u8)?;

    core.jump_to(target as i32)
}

/// Executes `RET`.
pub(crate) fn execute_ret(core: &mut Core) -> Result<(), RuntimeError> {
    let return_address = core.pop()?;
    core.jump_to(return_address as i32)
}

/// Executes the software `INT addr`: vector table lookup through the operand.
pub(crate) fn execute_int(core: &mut Core) -> Result<(), RuntimeError> {
    let vector = core.fetch_operand(1)?;

    let return_address = core.registers.ip() as i32 + 2;
    if return_address > 0xFF {
        return Err(RuntimeError::RunBeyondEndOfMemory);
    }
    core.push(return_address as u8)?;

    let handler = core.memory.read(vector);
    core.jump_to(handler as i32)
}

/// Executes the hardware interrupt trap: the fetched instruction does not
/// matter, the current `ip` is pushed and execution vectors through
/// `memory[0x02]`.
pub(crate) fn hardware_trap(core: &mut Core) -> Result<(), RuntimeError> {
    core.push(core.registers.ip())?;

    let handler = core.memory.read(HARDWARE_INTERRUPT_VECTOR);
    core.jump_to(handler as i32)
}

/// Executes `IRET`.
pub(crate) fn execute_iret(core: &mut Core) -> Result<(), RuntimeError> {
    let return_address = core.pop()?;
    core.jump_to(return_address as i32)
}
