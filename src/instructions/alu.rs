//! # Arithmetic and Logic Instructions
//!
//! Binary operations (`ADD`, `SUB`, `MUL`, `DIV`, `MOD`, `AND`, `OR`, `XOR`)
//! in register and immediate form, the unary group (`INC`, `DEC`, `NOT`,
//! `ROL`, `ROR`, `SHL`, `SHR`), and `CMP`.
//!
//! All of them compute on the unsigned 8-bit representations and share one
//! flag rule: the raw result is reduced modulo 256, zero/sign reflect the
//! reduced value, and overflow is set when the most significant bit crossed
//! between the destination's previous and new value. `CMP` applies the
//! subtraction rule without writing the register back.

use crate::cpu::Core;
use crate::opcodes::Opcode;
use crate::RuntimeError;

/// Executes a two-operand arithmetic or logic instruction.
///
/// The destination register index is at `ip + 1`; the source is either a
/// second register index or a literal byte at `ip + 2`, depending on the
/// opcode form.
pub(crate) fn execute_binary(core: &mut Core, opcode: Opcode) -> Result<(), RuntimeError> {
    let dest = core.fetch_register(1)?;

    let operand = match opcode {
        Opcode::AddRegToReg
        | Opcode::SubRegFromReg
        | Opcode::MulRegByReg
        | Opcode::DivRegByReg
        | Opcode::ModRegByReg
        | Opcode::AndRegWithReg
        | Opcode::OrRegWithReg
        | Opcode::XorRegWithReg => {
            let source = core.fetch_register(2)?;
            core.registers.get(source)
        }
        _ => core.fetch_operand(2)?,
    };

    let previous = core.registers.get(dest);
    let raw = apply_binary(opcode, previous as i32, operand as i32)?;

    let result = core.set_arithmetic_flags(previous, raw);
    core.registers.set(dest, result);

    core.advance_ip(opcode.size())
}

fn apply_binary(opcode: Opcode, previous: i32, operand: i32) -> Result<i32, RuntimeError> {
    Ok(match opcode {
        Opcode::AddRegToReg | Opcode::AddNumToReg => previous + operand,
        Opcode::SubRegFromReg | Opcode::SubNumFromReg => previous - operand,
        Opcode::MulRegByReg | Opcode::MulRegByNum => previous * operand,
        Opcode::DivRegByReg | Opcode::DivRegByNum => {
            if operand == 0 {
                return Err(RuntimeError::DivideByZero);
            }
            previous / operand
        }
        Opcode::ModRegByReg | Opcode::ModRegByNum => {
            if operand == 0 {
                return Err(RuntimeError::DivideByZero);
            }
            previous % operand
        }
        Opcode::AndRegWithReg | Opcode::AndRegWithNum => previous & operand,
        Opcode::OrRegWithReg | Opcode::OrRegWithNum => previous | operand,
        Opcode::XorRegWithReg | Opcode::XorRegWithNum => previous ^ operand,
        _ => unreachable!("execute_binary dispatched with a non-binary opcode"),
    })
}

/// Executes a one-register arithmetic instruction.
pub(crate) fn execute_unary(core: &mut Core, opcode: Opcode) -> Result<(), RuntimeError> {
    let dest = core.fetch_register(1)?;
    let previous = core.registers.get(dest);

    let raw: i32 = match opcode {
        Opcode::IncReg => previous as i32 + 1,
        Opcode::DecReg => previous as i32 - 1,
        Opcode::NotReg => (!previous) as i32,
        Opcode::RolReg => previous.rotate_left(1) as i32,
        Opcode::RorReg => previous.rotate_right(1) as i32,
        Opcode::ShlReg => (previous as i32) << 1,
        Opcode::ShrReg => (previous >> 1) as i32,
        _ => unreachable!("execute_unary dispatched with a non-unary opcode"),
    };

    let result = core.set_arithmetic_flags(previous, raw);
    core.registers.set(dest, result);

    core.advance_ip(opcode.size())
}

/// Executes `CMP`: subtraction flags without the writeback.
pub(crate) fn execute_compare(core: &mut Core, opcode: Opcode) -> Result<(), RuntimeError> {
    let dest = core.fetch_register(1)?;

    let operand = match opcode {
        Opcode::CmpRegWithReg => {
            let source = core.fetch_register(2)?;
            core.registers.get(source)
        }
        _ => core.fetch_operand(2)?,
    };

    let previous = core.registers.get(dest);
    core.set_arithmetic_flags(previous, previous as i32 - operand as i32);

    core.advance_ip(opcode.size())
}
