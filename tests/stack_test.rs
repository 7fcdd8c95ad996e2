//! Tests for stack discipline: PUSH/POP, PUSHF/POPF, and the stack bounds.

use lib8bit::{
    assemble, step, Flag, InputSignals, Memory, Register, Registers, RuntimeError, MAX_SP,
};

/// Assemble `source` and run it to the halted signal.
fn run(source: &str) -> (Memory, Registers) {
    let output = assemble(source).unwrap();
    let mut memory = output.image.clone();
    let mut registers = Registers::new();

    for _ in 0..100_000 {
        let outcome = step(&memory, &registers, &InputSignals::default()).unwrap();
        memory = outcome.memory;
        registers = outcome.registers;
        if outcome.signals.halted {
            return (memory, registers);
        }
    }

    panic!("program did not halt");
}

/// Assemble `source` and run until a runtime error surfaces.
fn run_expecting_error(source: &str) -> RuntimeError {
    let output = assemble(source).unwrap();
    let mut memory = output.image.clone();
    let mut registers = Registers::new();

    for _ in 0..100_000 {
        match step(&memory, &registers, &InputSignals::default()) {
            Err(error) => return error,
            Ok(outcome) => {
                assert!(!outcome.signals.halted, "program halted without an error");
                memory = outcome.memory;
                registers = outcome.registers;
            }
        }
    }

    panic!("program neither erred nor halted");
}

// ========== Push / Pop ==========

#[test]
fn test_push_pop_roundtrip() {
    let (_, registers) = run("mov al, 11\npush al\nmov al, 22\npop al\nend");

    assert_eq!(registers.get(Register::AL), 0x11);
    assert_eq!(registers.sp(), MAX_SP);
}

#[test]
fn test_push_writes_at_sp_and_grows_down() {
    let (memory, registers) = run("mov al, 11\npush al\nend");

    assert_eq!(memory.read(MAX_SP), 0x11);
    assert_eq!(registers.sp(), MAX_SP - 1);
}

#[test]
fn test_pop_into_a_different_register() {
    let (_, registers) = run("mov al, 77\npush al\npop dl\nend");

    assert_eq!(registers.get(Register::DL), 0x77);
}

#[test]
fn test_stack_is_last_in_first_out() {
    let (_, registers) = run(
        "mov al, 01\npush al\n\
         mov al, 02\npush al\n\
         pop bl\npop cl\n\
         end",
    );

    assert_eq!(registers.get(Register::BL), 0x02);
    assert_eq!(registers.get(Register::CL), 0x01);
}

// ========== Status Register Marshalling ==========

#[test]
fn test_pushf_popf_identity() {
    // Set zero+overflow via ADD, save, clobber with CMP, restore
    let (_, registers) = run(
        "mov al, 80\nadd al, 80\n\
         pushf\n\
         cmp al, 01\n\
         popf\n\
         end",
    );

    assert!(registers.flag(Flag::Zero));
    assert!(registers.flag(Flag::Overflow));
    assert!(!registers.flag(Flag::Sign));
}

#[test]
fn test_pushf_byte_layout() {
    let (memory, _) = run("mov al, 80\nadd al, 80\npushf\nend");

    // zero + overflow -> bit 1 and bit 2
    assert_eq!(memory.read(MAX_SP), 0b0000_0110);
}

#[test]
fn test_popf_loads_interrupt_flag() {
    // 0x10 = interrupt bit; POPF must honour it
    let (_, registers) = run("mov al, 10\npush al\npopf\nend");

    assert!(registers.flag(Flag::Interrupt));
    assert!(!registers.flag(Flag::Zero));
}

// ========== Bounds ==========

#[test]
fn test_push_below_stack_floor_overflows() {
    // With sp already at the stack floor, one more push must fail and leave
    // the caller's state untouched.
    let mut memory = Memory::new();
    memory.load(0, &[0xE0, 0x00]); // PUSH AL
    let mut registers = Registers::new();
    registers.set(Register::AL, 0x5A);
    registers.set_sp(0);

    let error = step(&memory, &registers, &InputSignals::default()).unwrap_err();

    assert_eq!(error, RuntimeError::StackOverflow);
    assert_eq!(registers.sp(), 0);
    assert_eq!(memory.read(0), 0xE0);
}

#[test]
fn test_pop_on_empty_stack_underflows() {
    let error = run_expecting_error("pop al\nend");

    assert_eq!(error, RuntimeError::StackUnderflow);
}

#[test]
fn test_popf_on_empty_stack_underflows() {
    let error = run_expecting_error("popf\nend");

    assert_eq!(error, RuntimeError::StackUnderflow);
}
