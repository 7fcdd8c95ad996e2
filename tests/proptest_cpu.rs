//! Property-based tests for CPU step invariants.

use lib8bit::{
    assemble, step, Flag, InputSignals, Memory, Register, Registers, MAX_SP,
};
use proptest::prelude::*;

/// Drive an assembled program to the halted signal.
fn run_to_halt(source: &str) -> Registers {
    let output = assemble(source).unwrap();
    let mut memory = output.image.clone();
    let mut registers = Registers::new();

    for _ in 0..10_000 {
        let outcome = step(&memory, &registers, &InputSignals::default()).unwrap();
        memory = outcome.memory;
        registers = outcome.registers;
        if outcome.signals.halted {
            return registers;
        }
    }

    panic!("program did not halt");
}

proptest! {
    /// Property: a successful step never leaves the stack pointer outside
    /// the stack region (ip is a u8 and in range by construction).
    #[test]
    fn prop_sp_stays_in_stack_region(
        instruction in prop::array::uniform3(any::<u8>()),
        gpr in prop::array::uniform4(any::<u8>()),
        sp in 0u8..=MAX_SP,
        interrupt_flag in proptest::bool::ANY,
    ) {
        let mut memory = Memory::new();
        memory.load(0, &instruction);

        let mut registers = Registers::new();
        registers.set(Register::AL, gpr[0]);
        registers.set(Register::BL, gpr[1]);
        registers.set(Register::CL, gpr[2]);
        registers.set(Register::DL, gpr[3]);
        registers.set_sp(sp);
        registers.set_flag(Flag::Interrupt, interrupt_flag);

        if let Ok(outcome) = step(&memory, &registers, &InputSignals::default()) {
            prop_assert!(
                outcome.registers.sp() <= MAX_SP,
                "sp 0x{:02X} left the stack region", outcome.registers.sp()
            );
        }
    }

    /// Property: step is a pure function: the same inputs give the same
    /// outcome, and the inputs are never mutated.
    #[test]
    fn prop_step_is_deterministic_and_pure(
        instruction in prop::array::uniform3(any::<u8>()),
        al in any::<u8>(),
    ) {
        let mut memory = Memory::new();
        memory.load(0, &instruction);
        let mut registers = Registers::new();
        registers.set(Register::AL, al);

        let memory_before = memory.clone();
        let registers_before = registers;

        let first = step(&memory, &registers, &InputSignals::default());
        let second = step(&memory, &registers, &InputSignals::default());

        prop_assert_eq!(&memory, &memory_before);
        prop_assert_eq!(registers, registers_before);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.memory.as_bytes(), b.memory.as_bytes());
                prop_assert_eq!(a.registers, b.registers);
                prop_assert_eq!(a.signals, b.signals);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "diverging outcomes: {:?} vs {:?}", a, b),
        }
    }

    /// Property: ADD computes modulo-256 addition and the zero/sign flags
    /// match the result.
    #[test]
    fn prop_add_is_wrapping_addition(a in any::<u8>(), b in any::<u8>()) {
        let source = format!(
            "mov al, {:02x}\nmov bl, {:02x}\nadd al, bl\nend",
            a, b
        );
        let registers = run_to_halt(&source);

        let expected = a.wrapping_add(b);
        prop_assert_eq!(registers.get(Register::AL), expected);
        prop_assert_eq!(registers.flag(Flag::Zero), expected == 0);
        prop_assert_eq!(registers.flag(Flag::Sign), expected >= 0x80);
    }

    /// Property: PUSHF then POPF with no intervening flag change is the
    /// identity on the status register.
    #[test]
    fn prop_pushf_popf_is_identity(
        zero in proptest::bool::ANY,
        overflow in proptest::bool::ANY,
        sign in proptest::bool::ANY,
        interrupt in proptest::bool::ANY,
    ) {
        let mut memory = Memory::new();
        memory.load(0, &[0xEA, 0xEB, 0x00]); // PUSHF, POPF, END

        let mut registers = Registers::new();
        registers.set_flag(Flag::Zero, zero);
        registers.set_flag(Flag::Overflow, overflow);
        registers.set_flag(Flag::Sign, sign);
        // A set Interrupt flag with no raised line never traps
        registers.set_flag(Flag::Interrupt, interrupt);
        let before = registers.status_byte();

        let pushed = step(&memory, &registers, &InputSignals::default()).unwrap();
        let popped = step(
            &pushed.memory,
            &pushed.registers,
            &InputSignals::default(),
        )
        .unwrap();

        prop_assert_eq!(popped.registers.status_byte(), before);
        prop_assert_eq!(popped.registers.sp(), MAX_SP);
    }

    /// Property: CALL immediately followed by RET restores ip to the
    /// instruction after the CALL, with the stack balanced.
    #[test]
    fn prop_call_ret_roundtrip(target in 0x08u8..=0xFF) {
        // The pushed return address lands at MAX_SP and would overwrite a
        // subroutine placed there
        prop_assume!(target != MAX_SP);

        let mut memory = Memory::new();
        memory.load(0, &[0xCA, target]); // CALL target
        memory.write(target, 0xCB); // RET
        let registers = Registers::new();

        let called = step(&memory, &registers, &InputSignals::default()).unwrap();
        prop_assert_eq!(called.registers.ip(), target);

        let returned = step(
            &called.memory,
            &called.registers,
            &InputSignals::default(),
        )
        .unwrap();

        prop_assert_eq!(returned.registers.ip(), 0x02);
        prop_assert_eq!(returned.registers.sp(), MAX_SP);
    }
}
