//! # Opcode Table
//!
//! This module is the single source of truth for the instruction set encoding:
//! every opcode byte value, its encoded size, and its source-level mnemonic.
//!
//! The byte values are fixed by the ISA, so an assembled image is portable
//! across implementations. The value space is grouped by category:
//!
//! | range | category |
//! |---|---|
//! | `0x00`, `0x76` | halts (`END`, `HALT`) |
//! | `0x9A..=0x9D` | shifts and rotates |
//! | `0xA0..=0xAD` | register arithmetic and logic |
//! | `0xB0..=0xBC` | immediate arithmetic and logic |
//! | `0xC0..=0xC6` | jumps |
//! | `0xCA..=0xCD` | procedures and interrupts |
//! | `0xD0..=0xDB` | moves and compares |
//! | `0xE0..=0xEB` | stack |
//! | `0xF0..=0xF1` | port I/O |
//! | `0xFC..=0xFF` | flag control, `CLO`, `NOP` |
//!
//! Encoded sizes follow the operand shape: nullary instructions are one byte,
//! one-register and single-byte-operand forms (jumps, `CALL`, `INT`, `IN`,
//! `OUT`) are two, and two-operand forms are three.

/// Machine instruction opcodes with their fixed ISA byte values.
///
/// # Examples
///
/// ```
/// use lib8bit::Opcode;
///
/// assert_eq!(Opcode::from_byte(0xA0), Some(Opcode::AddRegToReg));
/// assert_eq!(Opcode::AddRegToReg.size(), 3);
/// assert_eq!(Opcode::AddRegToReg.mnemonic(), "ADD");
/// assert_eq!(Opcode::from_byte(0x42), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    End = 0x00,
    Halt = 0x76,

    RolReg = 0x9A,
    RorReg = 0x9B,
    ShlReg = 0x9C,
    ShrReg = 0x9D,

    AddRegToReg = 0xA0,
    SubRegFromReg = 0xA1,
    MulRegByReg = 0xA2,
    DivRegByReg = 0xA3,
    IncReg = 0xA4,
    DecReg = 0xA5,
    ModRegByReg = 0xA6,
    AndRegWithReg = 0xAA,
    OrRegWithReg = 0xAB,
    XorRegWithReg = 0xAC,
    NotReg = 0xAD,

    AddNumToReg = 0xB0,
    SubNumFromReg = 0xB1,
    MulRegByNum = 0xB2,
    DivRegByNum = 0xB3,
    ModRegByNum = 0xB6,
    AndRegWithNum = 0xBA,
    OrRegWithNum = 0xBB,
    XorRegWithNum = 0xBC,

    Jmp = 0xC0,
    Jz = 0xC1,
    Jnz = 0xC2,
    Js = 0xC3,
    Jns = 0xC4,
    Jo = 0xC5,
    Jno = 0xC6,

    CallAddr = 0xCA,
    Ret = 0xCB,
    IntAddr = 0xCC,
    Iret = 0xCD,

    MovNumToReg = 0xD0,
    MovAddrToReg = 0xD1,
    MovRegAddrToReg = 0xD2,
    MovRegToAddr = 0xD3,
    MovRegToRegAddr = 0xD4,
    CmpRegWithReg = 0xDA,
    CmpRegWithNum = 0xDB,

    PushFromReg = 0xE0,
    PopToReg = 0xE1,
    Pushf = 0xEA,
    Popf = 0xEB,

    InFromPortToAl = 0xF0,
    OutFromAlToPort = 0xF1,

    Sti = 0xFC,
    Cli = 0xFD,
    Clo = 0xFE,
    Nop = 0xFF,
}

impl Opcode {
    /// Decodes an opcode byte, or `None` for bytes that encode no instruction.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Opcode::End),
            0x76 => Some(Opcode::Halt),

            0x9A => Some(Opcode::RolReg),
            0x9B => Some(Opcode::RorReg),
            0x9C => Some(Opcode::ShlReg),
            0x9D => Some(Opcode::ShrReg),

            0xA0 => Some(Opcode::AddRegToReg),
            0xA1 => Some(Opcode::SubRegFromReg),
            0xA2 => Some(Opcode::MulRegByReg),
            0xA3 => Some(Opcode::DivRegByReg),
            0xA4 => Some(Opcode::IncReg),
            0xA5 => Some(Opcode::DecReg),
            0xA6 => Some(Opcode::ModRegByReg),
            0xAA => Some(Opcode::AndRegWithReg),
            0xAB => Some(Opcode::OrRegWithReg),
            0xAC => Some(Opcode::XorRegWithReg),
            0xAD => Some(Opcode::NotReg),

            0xB0 => Some(Opcode::AddNumToReg),
            0xB1 => Some(Opcode::SubNumFromReg),
            0xB2 => Some(Opcode::MulRegByNum),
            0xB3 => Some(Opcode::DivRegByNum),
            0xB6 => Some(Opcode::ModRegByNum),
            0xBA => Some(Opcode::AndRegWithNum),
            0xBB => Some(Opcode::OrRegWithNum),
            0xBC => Some(Opcode::XorRegWithNum),

            0xC0 => Some(Opcode::Jmp),
            0xC1 => Some(Opcode::Jz),
            0xC2 => Some(Opcode::Jnz),
            0xC3 => Some(Opcode::Js),
            0xC4 => Some(Opcode::Jns),
            0xC5 => Some(Opcode::Jo),
            0xC6 => Some(Opcode::Jno),

            0xCA => Some(Opcode::CallAddr),
            0xCB => Some(Opcode::Ret),
            0xCC => Some(Opcode::IntAddr),
            0xCD => Some(Opcode::Iret),

            0xD0 => Some(Opcode::MovNumToReg),
            0xD1 => Some(Opcode::MovAddrToReg),
            0xD2 => Some(Opcode::MovRegAddrToReg),
            0xD3 => Some(Opcode::MovRegToAddr),
            0xD4 => Some(Opcode::MovRegToRegAddr),
            0xDA => Some(Opcode::CmpRegWithReg),
            0xDB => Some(Opcode::CmpRegWithNum),

            0xE0 => Some(Opcode::PushFromReg),
            0xE1 => Some(Opcode::PopToReg),
            0xEA => Some(Opcode::Pushf),
            0xEB => Some(Opcode::Popf),

            0xF0 => Some(Opcode::InFromPortToAl),
            0xF1 => Some(Opcode::OutFromAlToPort),

            0xFC => Some(Opcode::Sti),
            0xFD => Some(Opcode::Cli),
            0xFE => Some(Opcode::Clo),
            0xFF => Some(Opcode::Nop),

            _ => None,
        }
    }

    /// The opcode byte value.
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Total encoded instruction size in bytes (opcode + operand bytes).
    pub fn size(self) -> u8 {
        match self {
            // Nullary
            Opcode::End
            | Opcode::Halt
            | Opcode::Ret
            | Opcode::Iret
            | Opcode::Pushf
            | Opcode::Popf
            | Opcode::Sti
            | Opcode::Cli
            | Opcode::Clo
            | Opcode::Nop => 1,

            // One register byte
            Opcode::RolReg
            | Opcode::RorReg
            | Opcode::ShlReg
            | Opcode::ShrReg
            | Opcode::IncReg
            | Opcode::DecReg
            | Opcode::NotReg
            | Opcode::PushFromReg
            | Opcode::PopToReg => 2,

            // One displacement, address, or port byte
            Opcode::Jmp
            | Opcode::Jz
            | Opcode::Jnz
            | Opcode::Js
            | Opcode::Jns
            | Opcode::Jo
            | Opcode::Jno
            | Opcode::CallAddr
            | Opcode::IntAddr
            | Opcode::InFromPortToAl
            | Opcode::OutFromAlToPort => 2,

            // Two operand bytes
            Opcode::AddRegToReg
            | Opcode::SubRegFromReg
            | Opcode::MulRegByReg
            | Opcode::DivRegByReg
            | Opcode::ModRegByReg
            | Opcode::AndRegWithReg
            | Opcode::OrRegWithReg
            | Opcode::XorRegWithReg
            | Opcode::AddNumToReg
            | Opcode::SubNumFromReg
            | Opcode::MulRegByNum
            | Opcode::DivRegByNum
            | Opcode::ModRegByNum
            | Opcode::AndRegWithNum
            | Opcode::OrRegWithNum
            | Opcode::XorRegWithNum
            | Opcode::MovNumToReg
            | Opcode::MovAddrToReg
            | Opcode::MovRegAddrToReg
            | Opcode::MovRegToAddr
            | Opcode::MovRegToRegAddr
            | Opcode::CmpRegWithReg
            | Opcode::CmpRegWithNum => 3,
        }
    }

    /// The source-level mnemonic this opcode assembles from.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::End => "END",
            Opcode::Halt => "HALT",
            Opcode::RolReg => "ROL",
            Opcode::RorReg => "ROR",
            Opcode::ShlReg => "SHL",
            Opcode::ShrReg => "SHR",
            Opcode::AddRegToReg | Opcode::AddNumToReg => "ADD",
            Opcode::SubRegFromReg | Opcode::SubNumFromReg => "SUB",
            Opcode::MulRegByReg | Opcode::MulRegByNum => "MUL",
            Opcode::DivRegByReg | Opcode::DivRegByNum => "DIV",
            Opcode::ModRegByReg | Opcode::ModRegByNum => "MOD",
            Opcode::AndRegWithReg | Opcode::AndRegWithNum => "AND",
            Opcode::OrRegWithReg | Opcode::OrRegWithNum => "OR",
            Opcode::XorRegWithReg | Opcode::XorRegWithNum => "XOR",
            Opcode::NotReg => "NOT",
            Opcode::IncReg => "INC",
            Opcode::DecReg => "DEC",
            Opcode::Jmp => "JMP",
            Opcode::Jz => "JZ",
            Opcode::Jnz => "JNZ",
            Opcode::Js => "JS",
            Opcode::Jns => "JNS",
            Opcode::Jo => "JO",
            Opcode::Jno => "JNO",
            Opcode::CallAddr => "CALL",
            Opcode::Ret => "RET",
            Opcode::IntAddr => "INT",
            Opcode::Iret => "IRET",
            Opcode::MovNumToReg
            | Opcode::MovAddrToReg
            | Opcode::MovRegAddrToReg
            | Opcode::MovRegToAddr
            | Opcode::MovRegToRegAddr => "MOV",
            Opcode::CmpRegWithReg | Opcode::CmpRegWithNum => "CMP",
            Opcode::PushFromReg => "PUSH",
            Opcode::PopToReg => "POP",
            Opcode::Pushf => "PUSHF",
            Opcode::Popf => "POPF",
            Opcode::InFromPortToAl => "IN",
            Opcode::OutFromAlToPort => "OUT",
            Opcode::Sti => "STI",
            Opcode::Cli => "CLI",
            Opcode::Clo => "CLO",
            Opcode::Nop => "NOP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every opcode the decoder accepts must round-trip through its byte.
    #[test]
    fn test_from_byte_roundtrip() {
        for byte in 0..=0xFFu16 {
            let byte = byte as u8;
            if let Some(opcode) = Opcode::from_byte(byte) {
                assert_eq!(opcode.byte(), byte, "opcode 0x{:02X} round trip", byte);
            }
        }
    }

    #[test]
    fn test_undefined_bytes_rejected() {
        assert_eq!(Opcode::from_byte(0x01), None);
        assert_eq!(Opcode::from_byte(0x42), None);
        assert_eq!(Opcode::from_byte(0xA7), None);
        assert_eq!(Opcode::from_byte(0xFB), None);
    }

    #[test]
    fn test_encoded_sizes() {
        assert_eq!(Opcode::End.size(), 1);
        assert_eq!(Opcode::Ret.size(), 1);
        assert_eq!(Opcode::IncReg.size(), 2);
        assert_eq!(Opcode::Jmp.size(), 2);
        assert_eq!(Opcode::CallAddr.size(), 2);
        assert_eq!(Opcode::InFromPortToAl.size(), 2);
        assert_eq!(Opcode::AddRegToReg.size(), 3);
        assert_eq!(Opcode::MovAddrToReg.size(), 3);
        assert_eq!(Opcode::CmpRegWithNum.size(), 3);
    }
}
