//! Tests for unconditional and conditional relative jumps.

use lib8bit::{assemble, step, Flag, InputSignals, Memory, Register, Registers};

/// Assemble `source` and run it to the halted signal.
fn run(source: &str) -> (Memory, Registers) {
    let output = assemble(source).unwrap();
    let mut memory = output.image.clone();
    let mut registers = Registers::new();

    for _ in 0..10_000 {
        let outcome = step(&memory, &registers, &InputSignals::default()).unwrap();
        memory = outcome.memory;
        registers = outcome.registers;
        if outcome.signals.halted {
            return (memory, registers);
        }
    }

    panic!("program did not halt");
}

// ========== Unconditional ==========

#[test]
fn test_jmp_skips_forward() {
    // The INC in the shadow of the jump must not execute
    let (_, registers) = run("jmp skip\ninc al\nskip: end");

    assert_eq!(registers.get(Register::AL), 0x00);
    assert_eq!(registers.ip(), 4);
}

#[test]
fn test_jmp_numeric_displacement() {
    // Displacement 02 from the byte after the jump skips the 2-byte INC
    let (_, registers) = run("jmp 02\ninc al\nend");

    assert_eq!(registers.get(Register::AL), 0x00);
}

// ========== Signed Backward Jump ==========

#[test]
fn test_countdown_loop() {
    let output = assemble("mov al, 03\nloop: dec al\njnz loop\nend").unwrap();

    // The backward displacement must be -4 (0xFC)
    assert_eq!(output.image.read(6), 0xFC);

    let mut memory = output.image.clone();
    let mut registers = Registers::new();
    loop {
        let outcome = step(&memory, &registers, &InputSignals::default()).unwrap();
        memory = outcome.memory;
        registers = outcome.registers;
        if outcome.signals.halted {
            break;
        }
    }

    assert_eq!(registers.get(Register::AL), 0x00);
    assert!(registers.flag(Flag::Zero));
}

// ========== Conditional Taken / Not Taken ==========

#[test]
fn test_jz_taken_only_on_zero() {
    // Zero set: JZ skips the INC
    let (_, taken) = run("mov al, 01\nsub al, 01\njz skip\ninc bl\nskip: end");
    assert_eq!(taken.get(Register::BL), 0x00);

    // Zero clear: JZ falls through
    let (_, not_taken) = run("mov al, 02\nsub al, 01\njz skip\ninc bl\nskip: end");
    assert_eq!(not_taken.get(Register::BL), 0x01);
}

#[test]
fn test_jnz_is_the_complement() {
    let (_, taken) = run("mov al, 02\nsub al, 01\njnz skip\ninc bl\nskip: end");
    assert_eq!(taken.get(Register::BL), 0x00);

    let (_, not_taken) = run("mov al, 01\nsub al, 01\njnz skip\ninc bl\nskip: end");
    assert_eq!(not_taken.get(Register::BL), 0x01);
}

#[test]
fn test_js_follows_sign_flag() {
    let (_, taken) = run("mov al, 00\nsub al, 01\njs skip\ninc bl\nskip: end");
    assert_eq!(taken.get(Register::BL), 0x00);

    let (_, not_taken) = run("mov al, 02\nsub al, 01\njs skip\ninc bl\nskip: end");
    assert_eq!(not_taken.get(Register::BL), 0x01);
}

#[test]
fn test_jns_is_the_complement() {
    let (_, taken) = run("mov al, 02\nsub al, 01\njns skip\ninc bl\nskip: end");
    assert_eq!(taken.get(Register::BL), 0x00);

    let (_, not_taken) = run("mov al, 00\nsub al, 01\njns skip\ninc bl\nskip: end");
    assert_eq!(not_taken.get(Register::BL), 0x01);
}

#[test]
fn test_jo_follows_overflow_flag() {
    // 0x7F + 1 crosses the MSB: overflow set
    let (_, taken) = run("mov al, 7f\nadd al, 01\njo skip\ninc bl\nskip: end");
    assert_eq!(taken.get(Register::BL), 0x00);

    let (_, not_taken) = run("mov al, 10\nadd al, 01\njo skip\ninc bl\nskip: end");
    assert_eq!(not_taken.get(Register::BL), 0x01);
}

#[test]
fn test_jno_is_the_complement() {
    let (_, taken) = run("mov al, 10\nadd al, 01\njno skip\ninc bl\nskip: end");
    assert_eq!(taken.get(Register::BL), 0x00);

    let (_, not_taken) = run("mov al, 7f\nadd al, 01\njno skip\ninc bl\nskip: end");
    assert_eq!(not_taken.get(Register::BL), 0x01);
}

// ========== Compare Driving Jumps ==========

#[test]
fn test_cmp_jz_dispatch() {
    let source = "mov al, 05\n\
                  cmp al, 05\n\
                  jz match\n\
                  mov dl, 01\n\
                  jmp done\n\
                  match: mov dl, 02\n\
                  done: end";

    let (_, registers) = run(source);
    assert_eq!(registers.get(Register::DL), 0x02);
}
