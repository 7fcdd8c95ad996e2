//! Fuzz target for CPU step execution.
//!
//! Creates arbitrary machine states and executes one instruction to find
//! panics and invariant violations.

#![no_main]

use arbitrary::Arbitrary;
use lib8bit::{step, Flag, InputData, InputSignals, Memory, Register, Registers, MAX_SP};
use libfuzzer_sys::fuzz_target;

/// Arbitrary machine state for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Full 256-byte memory image
    memory: [u8; 256],

    /// General-purpose registers
    gpr: [u8; 4],

    /// Instruction pointer
    ip: u8,

    /// Stack pointer (masked into the stack region below)
    sp: u8,

    /// Status flags
    zero: bool,
    overflow: bool,
    sign: bool,
    interrupt: bool,

    /// Input signal bus
    input_port: u8,
    input_content: Option<u8>,
    interrupt_line: bool,
}

fuzz_target!(|input: FuzzInput| {
    let memory = Memory::from_image(input.memory);

    let mut registers = Registers::new();
    registers.set(Register::AL, input.gpr[0]);
    registers.set(Register::BL, input.gpr[1]);
    registers.set(Register::CL, input.gpr[2]);
    registers.set(Register::DL, input.gpr[3]);
    registers.set_ip(input.ip);
    registers.set_sp(input.sp % (MAX_SP + 1));
    registers.set_flag(Flag::Zero, input.zero);
    registers.set_flag(Flag::Overflow, input.overflow);
    registers.set_flag(Flag::Sign, input.sign);
    registers.set_flag(Flag::Interrupt, input.interrupt);

    let signals = InputSignals {
        data: InputData {
            content: input.input_content,
            port: input.input_port,
        },
        interrupt: input.interrupt_line,
    };

    // Errors are expected on garbage states - only panics count
    if let Ok(outcome) = step(&memory, &registers, &signals) {
        // A successful step keeps the stack pointer in the stack region
        assert!(outcome.registers.sp() <= MAX_SP);
    }
});
