//! # Port I/O Instructions
//!
//! `IN` is a request/response handshake spread across steps: until a matching
//! device response arrives on the input bus, the instruction re-executes in
//! place, advertising the wanted port through `required_input_port`. `OUT`
//! emits a byte immediately.
//!
//! Both validate their port operand against [`MAX_PORT`].

use crate::cpu::Core;
use crate::opcodes::Opcode;
use crate::registers::Register;
use crate::signals::{OutputData, MAX_PORT};
use crate::RuntimeError;

fn checked_port(core: &Core) -> Result<u8, RuntimeError> {
    let port = core.fetch_operand(1)?;
    if port > MAX_PORT {
        return Err(RuntimeError::InvalidPort(port));
    }
    Ok(port)
}

/// Executes `IN port`.
///
/// When the input bus carries a content byte for the wanted port, it is
/// consumed into AL and `ip` advances past the instruction. Otherwise `ip` is
/// left unchanged so the same instruction re-executes on the next step, and
/// `required_input_port` tells the scheduler which port is expected.
pub(crate) fn execute_in(core: &mut Core) -> Result<(), RuntimeError> {
    let port = checked_port(core)?;

    match core.input.data.content {
        Some(content) if core.input.data.port == port => {
            core.registers.set(Register::AL, content);
            core.advance_ip(Opcode::InFromPortToAl.size())
        }
        _ => {
            core.output.required_input_port = Some(port);
            Ok(())
        }
    }
}

/// Executes `OUT port`: emit AL on the output bus.
pub(crate) fn execute_out(core: &mut Core) -> Result<(), RuntimeError> {
    let port = checked_port(core)?;

    core.output.data = Some(OutputData {
        content: core.registers.get(Register::AL),
        port,
    });

    core.advance_ip(Opcode::OutFromAlToPort.size())
}
