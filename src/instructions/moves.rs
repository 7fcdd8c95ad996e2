//! # Move Instructions
//!
//! The five `MOV` forms. Effective addresses for the register-address forms
//! go through the register file; none of the forms touch the status flags.

use crate::cpu::Core;
use crate::opcodes::Opcode;
use crate::RuntimeError;

/// Executes a `MOV` instruction.
pub(crate) fn execute_mov(core: &mut Core, opcode: Opcode) -> Result<(), RuntimeError> {
    match opcode {
        Opcode::MovNumToReg => {
            let dest = core.fetch_register(1)?;
            let value = core.fetch_operand(2)?;
            core.registers.set(dest, value);
        }
        Opcode::MovAddrToReg => {
            let dest = core.fetch_register(1)?;
            let address = core.fetch_operand(2)?;
            let value = core.memory.read(address);
            core.registers.set(dest, value);
        }
        Opcode::MovRegAddrToReg => {
            let dest = core.fetch_register(1)?;
            let source = core.fetch_register(2)?;
            let value = core.memory.read(core.registers.get(source));
            core.registers.set(dest, value);
        }
        Opcode::MovRegToAddr => {
            let address = core.fetch_operand(1)?;
            let source = core.fetch_register(2)?;
            core.memory.write(address, core.registers.get(source));
        }
        Opcode::MovRegToRegAddr => {
            let dest = core.fetch_register(1)?;
            let source = core.fetch_register(2)?;
            core.memory
                .write(core.registers.get(dest), core.registers.get(source));
        }
        _ => unreachable!("execute_mov dispatched with a non-move opcode"),
    }

    core.advance_ip(opcode.size())
}
