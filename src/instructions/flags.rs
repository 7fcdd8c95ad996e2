//! # Flag and Signal Control Instructions
//!
//! `STI`/`CLI` set and clear the Interrupt flag; `CLO` asks the front-end to
//! close its device windows via the output signal bus.

use crate::cpu::Core;
use crate::registers::Flag;
use crate::RuntimeError;

/// Executes `STI`.
pub(crate) fn execute_sti(core: &mut Core) -> Result<(), RuntimeError> {
    core.registers.set_flag(Flag::Interrupt, true);
    core.advance_ip(1)
}

/// Executes `CLI`.
pub(crate) fn execute_cli(core: &mut Core) -> Result<(), RuntimeError> {
    core.registers.set_flag(Flag::Interrupt, false);
    core.advance_ip(1)
}

/// Executes `CLO`.
pub(crate) fn execute_clo(core: &mut Core) -> Result<(), RuntimeError> {
    core.output.close_windows = true;
    core.advance_ip(1)
}
