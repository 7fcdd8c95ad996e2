//! Statement parser (syntactic analysis phase)
//!
//! This module provides the second phase of assembly: consuming the token
//! stream into a sequence of [`Statement`]s. One statement is an optional
//! label followed by one mnemonic and its 0 to 2 operands.
//!
//! # Parser Responsibilities
//!
//! - Recognise labels (`NAME:`) and validate their leading character
//! - Dispatch mnemonics and look up their operand counts
//! - Validate each operand's shape against the mnemonic's expected types,
//!   resolving the `Unknown` token ambiguity (number vs. label) contextually
//! - Select the opcode from the (mnemonic, operand-type tuple) combination
//! - Build each statement's machine code bytes (label operands are encoded as
//!   placeholders until the assembler driver resolves them)
//!
//! What the parser does **not** do: address assignment, label resolution and
//! the flat image build all live in the [driver](crate::assembler).
//!
//! # Examples
//!
//! ```
//! use lib8bit::assembler::lexer::tokenize;
//! use lib8bit::assembler::parser::parse;
//! use lib8bit::Opcode;
//!
//! let tokens = tokenize("start: mov al, c0\nend").unwrap();
//! let statements = parse(&tokens).unwrap();
//!
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[0].label.as_ref().unwrap().identifier, "START");
//! assert_eq!(statements[0].instruction.opcode, Some(Opcode::MovNumToReg));
//! assert_eq!(statements[0].machine_codes, vec![0xD0, 0x00, 0xC0]);
//! ```

use crate::assembler::lexer::{is_hex_digit, Token, TokenKind};
use crate::assembler::{AssemblerError, AssemblerErrorKind};
use crate::opcodes::Opcode;
use crate::registers::Register;

/// Payload-free operand classification, used for expected-shape sets and
/// opcode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    Number,
    Register,
    Address,
    RegisterAddress,
    String,
    Label,
}

impl std::fmt::Display for OperandType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            OperandType::Number => "number",
            OperandType::Register => "register",
            OperandType::Address => "address",
            OperandType::RegisterAddress => "register address",
            OperandType::String => "string",
            OperandType::Label => "label",
        })
    }
}

/// A parsed operand value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandValue {
    /// Literal byte, decoded from hex
    Number(u8),

    /// General-purpose register
    Register(Register),

    /// Direct memory reference `[nn]`
    Address(u8),

    /// Indirect memory reference `[reg]`
    RegisterAddress(Register),

    /// ASCII byte sequence from a string literal
    String(Vec<u8>),

    /// Label reference, resolved to a signed distance by the driver
    Label(String),
}

/// An operand together with the token it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub value: OperandValue,
    pub token: Token,
}

impl Operand {
    /// The payload-free tag of this operand.
    pub fn operand_type(&self) -> OperandType {
        match self.value {
            OperandValue::Number(_) => OperandType::Number,
            OperandValue::Register(_) => OperandType::Register,
            OperandValue::Address(_) => OperandType::Address,
            OperandValue::RegisterAddress(_) => OperandType::RegisterAddress,
            OperandValue::String(_) => OperandType::String,
            OperandValue::Label(_) => OperandType::Label,
        }
    }

    /// Number of machine code bytes this operand contributes.
    pub fn encoded_len(&self) -> usize {
        match &self.value {
            OperandValue::String(bytes) => bytes.len(),
            _ => 1,
        }
    }
}

/// A label definition attached to a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// The token value with the trailing `:` stripped
    pub identifier: String,

    pub token: Token,
}

/// Source-level mnemonics, including the `ORG` and `DB` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Mov,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Cmp,
    Inc,
    Dec,
    Not,
    Rol,
    Ror,
    Shl,
    Shr,
    Jmp,
    Jz,
    Jnz,
    Js,
    Jns,
    Jo,
    Jno,
    Push,
    Pop,
    Pushf,
    Popf,
    Call,
    Ret,
    Int,
    Iret,
    In,
    Out,
    Sti,
    Cli,
    Clo,
    Nop,
    End,
    Halt,
    Org,
    Db,
}

impl Mnemonic {
    /// Looks up a mnemonic by its (already uppercased) source name.
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "MOV" => Mnemonic::Mov,
            "ADD" => Mnemonic::Add,
            "SUB" => Mnemonic::Sub,
            "MUL" => Mnemonic::Mul,
            "DIV" => Mnemonic::Div,
            "MOD" => Mnemonic::Mod,
            "AND" => Mnemonic::And,
            "OR" => Mnemonic::Or,
            "XOR" => Mnemonic::Xor,
            "CMP" => Mnemonic::Cmp,
            "INC" => Mnemonic::Inc,
            "DEC" => Mnemonic::Dec,
            "NOT" => Mnemonic::Not,
            "ROL" => Mnemonic::Rol,
            "ROR" => Mnemonic::Ror,
            "SHL" => Mnemonic::Shl,
            "SHR" => Mnemonic::Shr,
            "JMP" => Mnemonic::Jmp,
            "JZ" => Mnemonic::Jz,
            "JNZ" => Mnemonic::Jnz,
            "JS" => Mnemonic::Js,
            "JNS" => Mnemonic::Jns,
            "JO" => Mnemonic::Jo,
            "JNO" => Mnemonic::Jno,
            "PUSH" => Mnemonic::Push,
            "POP" => Mnemonic::Pop,
            "PUSHF" => Mnemonic::Pushf,
            "POPF" => Mnemonic::Popf,
            "CALL" => Mnemonic::Call,
            "RET" => Mnemonic::Ret,
            "INT" => Mnemonic::Int,
            "IRET" => Mnemonic::Iret,
            "IN" => Mnemonic::In,
            "OUT" => Mnemonic::Out,
            "STI" => Mnemonic::Sti,
            "CLI" => Mnemonic::Cli,
            "CLO" => Mnemonic::Clo,
            "NOP" => Mnemonic::Nop,
            "END" => Mnemonic::End,
            "HALT" => Mnemonic::Halt,
            "ORG" => Mnemonic::Org,
            "DB" => Mnemonic::Db,
            _ => return None,
        })
    }

    /// Number of operands this mnemonic takes.
    pub fn operand_count(self) -> usize {
        match self {
            Mnemonic::Pushf
            | Mnemonic::Popf
            | Mnemonic::Ret
            | Mnemonic::Iret
            | Mnemonic::Sti
            | Mnemonic::Cli
            | Mnemonic::Clo
            | Mnemonic::Nop
            | Mnemonic::End
            | Mnemonic::Halt => 0,

            Mnemonic::Inc
            | Mnemonic::Dec
            | Mnemonic::Not
            | Mnemonic::Rol
            | Mnemonic::Ror
            | Mnemonic::Shl
            | Mnemonic::Shr
            | Mnemonic::Jmp
            | Mnemonic::Jz
            | Mnemonic::Jnz
            | Mnemonic::Js
            | Mnemonic::Jns
            | Mnemonic::Jo
            | Mnemonic::Jno
            | Mnemonic::Push
            | Mnemonic::Pop
            | Mnemonic::Call
            | Mnemonic::Int
            | Mnemonic::In
            | Mnemonic::Out
            | Mnemonic::Org
            | Mnemonic::Db => 1,

            Mnemonic::Mov
            | Mnemonic::Add
            | Mnemonic::Sub
            | Mnemonic::Mul
            | Mnemonic::Div
            | Mnemonic::Mod
            | Mnemonic::And
            | Mnemonic::Or
            | Mnemonic::Xor
            | Mnemonic::Cmp => 2,
        }
    }
}

/// A mnemonic resolved to its opcode (directives carry no opcode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,

    /// `None` for `ORG` and `DB`, which emit no opcode byte
    pub opcode: Option<Opcode>,

    pub token: Token,
}

/// One parsed statement: optional label, instruction, operands, and the
/// machine code bytes it flattens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub label: Option<Label>,
    pub instruction: Instruction,
    pub operands: Vec<Operand>,

    /// `[opcode?] ++ operand bytes`; label operands hold a placeholder until
    /// the driver's second pass resolves them
    pub machine_codes: Vec<u8>,

    /// Absolute byte offset of the instruction token
    pub position: usize,

    /// Span from `position` to the end of the last operand token
    pub length: usize,
}

/// Expected operand types for a mnemonic's first operand.
fn expected_first(mnemonic: Mnemonic) -> &'static [OperandType] {
    match mnemonic {
        Mnemonic::Mov => &[
            OperandType::Register,
            OperandType::Address,
            OperandType::RegisterAddress,
        ],

        Mnemonic::Add
        | Mnemonic::Sub
        | Mnemonic::Mul
        | Mnemonic::Div
        | Mnemonic::Mod
        | Mnemonic::And
        | Mnemonic::Or
        | Mnemonic::Xor
        | Mnemonic::Cmp
        | Mnemonic::Inc
        | Mnemonic::Dec
        | Mnemonic::Not
        | Mnemonic::Rol
        | Mnemonic::Ror
        | Mnemonic::Shl
        | Mnemonic::Shr
        | Mnemonic::Push
        | Mnemonic::Pop => &[OperandType::Register],

        Mnemonic::Jmp
        | Mnemonic::Jz
        | Mnemonic::Jnz
        | Mnemonic::Js
        | Mnemonic::Jns
        | Mnemonic::Jo
        | Mnemonic::Jno => &[OperandType::Number, OperandType::Label],

        // Absolute byte operands: a label would resolve to a relative
        // distance, which these vectoring forms cannot carry
        Mnemonic::Call | Mnemonic::Int | Mnemonic::In | Mnemonic::Out | Mnemonic::Org => {
            &[OperandType::Number]
        }

        Mnemonic::Db => &[OperandType::Number, OperandType::String],

        _ => &[],
    }
}

/// Expected operand types for a mnemonic's second operand, given the first.
fn expected_second(mnemonic: Mnemonic, first: OperandType) -> &'static [OperandType] {
    match mnemonic {
        Mnemonic::Mov => match first {
            OperandType::Register => &[
                OperandType::Number,
                OperandType::Address,
                OperandType::RegisterAddress,
            ],
            _ => &[OperandType::Register],
        },
        _ => &[OperandType::Register, OperandType::Number],
    }
}

/// Selects the opcode for a mnemonic and its operand-type combination.
///
/// Returns `None` for `ORG` and `DB`, which emit operand bytes only. The
/// operand shapes have already been validated against the expected-type sets,
/// so every remaining combination maps to exactly one opcode.
fn select_opcode(mnemonic: Mnemonic, operands: &[Operand]) -> Option<Opcode> {
    use OperandType::{Number, Register as Reg, RegisterAddress};

    let second = operands.get(1).map(|operand| operand.operand_type());

    Some(match mnemonic {
        Mnemonic::Mov => match (operands[0].operand_type(), second.unwrap()) {
            (Reg, Number) => Opcode::MovNumToReg,
            (Reg, OperandType::Address) => Opcode::MovAddrToReg,
            (Reg, RegisterAddress) => Opcode::MovRegAddrToReg,
            (OperandType::Address, Reg) => Opcode::MovRegToAddr,
            (RegisterAddress, Reg) => Opcode::MovRegToRegAddr,
            _ => unreachable!("operand shapes validated before opcode selection"),
        },

        Mnemonic::Add if second == Some(Reg) => Opcode::AddRegToReg,
        Mnemonic::Add => Opcode::AddNumToReg,
        Mnemonic::Sub if second == Some(Reg) => Opcode::SubRegFromReg,
        Mnemonic::Sub => Opcode::SubNumFromReg,
        Mnemonic::Mul if second == Some(Reg) => Opcode::MulRegByReg,
        Mnemonic::Mul => Opcode::MulRegByNum,
        Mnemonic::Div if second == Some(Reg) => Opcode::DivRegByReg,
        Mnemonic::Div => Opcode::DivRegByNum,
        Mnemonic::Mod if second == Some(Reg) => Opcode::ModRegByReg,
        Mnemonic::Mod => Opcode::ModRegByNum,
        Mnemonic::And if second == Some(Reg) => Opcode::AndRegWithReg,
        Mnemonic::And => Opcode::AndRegWithNum,
        Mnemonic::Or if second == Some(Reg) => Opcode::OrRegWithReg,
        Mnemonic::Or => Opcode::OrRegWithNum,
        Mnemonic::Xor if second == Some(Reg) => Opcode::XorRegWithReg,
        Mnemonic::Xor => Opcode::XorRegWithNum,
        Mnemonic::Cmp if second == Some(Reg) => Opcode::CmpRegWithReg,
        Mnemonic::Cmp => Opcode::CmpRegWithNum,

        Mnemonic::Inc => Opcode::IncReg,
        Mnemonic::Dec => Opcode::DecReg,
        Mnemonic::Not => Opcode::NotReg,
        Mnemonic::Rol => Opcode::RolReg,
        Mnemonic::Ror => Opcode::RorReg,
        Mnemonic::Shl => Opcode::ShlReg,
        Mnemonic::Shr => Opcode::ShrReg,

        Mnemonic::Jmp => Opcode::Jmp,
        Mnemonic::Jz => Opcode::Jz,
        Mnemonic::Jnz => Opcode::Jnz,
        Mnemonic::Js => Opcode::Js,
        Mnemonic::Jns => Opcode::Jns,
        Mnemonic::Jo => Opcode::Jo,
        Mnemonic::Jno => Opcode::Jno,

        Mnemonic::Push => Opcode::PushFromReg,
        Mnemonic::Pop => Opcode::PopToReg,
        Mnemonic::Pushf => Opcode::Pushf,
        Mnemonic::Popf => Opcode::Popf,

        Mnemonic::Call => Opcode::CallAddr,
        Mnemonic::Ret => Opcode::Ret,
        Mnemonic::Int => Opcode::IntAddr,
        Mnemonic::Iret => Opcode::Iret,

        Mnemonic::In => Opcode::InFromPortToAl,
        Mnemonic::Out => Opcode::OutFromAlToPort,

        Mnemonic::Sti => Opcode::Sti,
        Mnemonic::Cli => Opcode::Cli,
        Mnemonic::Clo => Opcode::Clo,
        Mnemonic::Nop => Opcode::Nop,
        Mnemonic::End => Opcode::End,
        Mnemonic::Halt => Opcode::Halt,

        Mnemonic::Org | Mnemonic::Db => return None,
    })
}

/// Builds `[opcode?] ++ operand bytes` for a statement.
///
/// Label operands encode as `0x00` placeholders; the driver's second pass
/// substitutes the resolved signed distance.
pub(crate) fn build_machine_codes(opcode: Option<Opcode>, operands: &[Operand]) -> Vec<u8> {
    let mut bytes = Vec::new();

    if let Some(opcode) = opcode {
        bytes.push(opcode.byte());
    }

    for operand in operands {
        match &operand.value {
            OperandValue::Number(value) | OperandValue::Address(value) => bytes.push(*value),
            OperandValue::Register(register) | OperandValue::RegisterAddress(register) => {
                bytes.push(register.index())
            }
            OperandValue::String(ascii) => bytes.extend_from_slice(ascii),
            OperandValue::Label(_) => bytes.push(0x00),
        }
    }

    bytes
}

/// Token cursor over the significant token stream.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// Parse the token stream into statements.
///
/// The last statement must be `END`; anything else (including an empty
/// program) is a [`MissingEnd`](AssemblerErrorKind::MissingEnd) error.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>, AssemblerError> {
    let mut cursor = TokenCursor::new(tokens);
    let mut statements = Vec::new();

    while !cursor.is_empty() {
        statements.push(parse_statement(&mut cursor)?);
    }

    match statements.last() {
        Some(last) if last.instruction.mnemonic == Mnemonic::End => Ok(statements),
        Some(last) => Err(AssemblerError::spanned(
            AssemblerErrorKind::MissingEnd,
            "Expected the program to end with END".to_string(),
            last.position,
            last.length,
        )),
        None => Err(AssemblerError::new(
            AssemblerErrorKind::MissingEnd,
            "Expected the program to end with END, found an empty program".to_string(),
        )),
    }
}

fn parse_statement(cursor: &mut TokenCursor) -> Result<Statement, AssemblerError> {
    // Optional label: an Unknown token ending with ':'
    let label = parse_label(cursor)?;

    let Some(token) = cursor.next() else {
        // A trailing label with nothing to attach to
        let label = label.expect("statement parsing begins at a non-empty cursor");
        return Err(AssemblerError::at_token(
            AssemblerErrorKind::Statement,
            format!("Expected an instruction after label '{}'", label.identifier),
            &label.token,
        ));
    };

    let mnemonic = match token.kind {
        TokenKind::Unknown => Mnemonic::lookup(&token.value),
        _ => None,
    };

    let Some(mnemonic) = mnemonic else {
        let message = if label.is_some() {
            format!("Expected an instruction after the label, found '{}'", token.value)
        } else {
            format!("Expected a label or an instruction, found '{}'", token.value)
        };
        return Err(AssemblerError::at_token(
            AssemblerErrorKind::Statement,
            message,
            token,
        ));
    };

    let instruction_token = token.clone();
    let mut operands = Vec::new();

    let operand_count = mnemonic.operand_count();
    if operand_count >= 1 {
        operands.push(parse_operand(
            cursor,
            expected_first(mnemonic),
            &instruction_token,
        )?);
    }
    if operand_count == 2 {
        expect_comma(cursor, &instruction_token)?;
        let first = operands[0].operand_type();
        operands.push(parse_operand(
            cursor,
            expected_second(mnemonic, first),
            &instruction_token,
        )?);
    }

    let opcode = select_opcode(mnemonic, &operands);
    let machine_codes = build_machine_codes(opcode, &operands);

    let position = instruction_token.position;
    let length = match operands.last() {
        Some(last) => last.token.position + last.token.length - position,
        None => instruction_token.length,
    };

    Ok(Statement {
        label,
        instruction: Instruction {
            mnemonic,
            opcode,
            token: instruction_token,
        },
        operands,
        machine_codes,
        position,
        length,
    })
}

fn parse_label(cursor: &mut TokenCursor) -> Result<Option<Label>, AssemblerError> {
    let Some(token) = cursor.peek() else {
        return Ok(None);
    };

    if token.kind != TokenKind::Unknown || !token.value.ends_with(':') {
        return Ok(None);
    }

    let identifier = token.value[..token.value.len() - 1].to_string();

    let starts_valid = identifier
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_uppercase() || ch == '_');
    if !starts_valid {
        return Err(AssemblerError::at_token(
            AssemblerErrorKind::InvalidLabel,
            format!(
                "Invalid label '{}': labels must start with a letter or '_'",
                token.value
            ),
            token,
        ));
    }

    let token = token.clone();
    cursor.next();

    Ok(Some(Label { identifier, token }))
}

fn expect_comma(
    cursor: &mut TokenCursor,
    instruction_token: &Token,
) -> Result<(), AssemblerError> {
    match cursor.next() {
        Some(token) if token.kind == TokenKind::Comma => Ok(()),
        Some(token) => Err(AssemblerError::at_token(
            AssemblerErrorKind::MissingComma,
            format!("Expected a comma between operands, found '{}'", token.value),
            token,
        )),
        None => Err(AssemblerError::at_token(
            AssemblerErrorKind::MissingEnd,
            "Expected a comma and a second operand, found end of source".to_string(),
            instruction_token,
        )),
    }
}

fn parse_operand(
    cursor: &mut TokenCursor,
    expected: &'static [OperandType],
    instruction_token: &Token,
) -> Result<Operand, AssemblerError> {
    let Some(token) = cursor.next() else {
        return Err(AssemblerError::at_token(
            AssemblerErrorKind::MissingEnd,
            "Expected an operand, found end of source".to_string(),
            instruction_token,
        ));
    };

    let value = match token.kind {
        TokenKind::Digits => {
            require_type(OperandType::Number, expected, token)?;
            OperandValue::Number(parse_number(&token.value, token)?)
        }

        TokenKind::Register => {
            require_type(OperandType::Register, expected, token)?;
            let register = Register::from_name(&token.value)
                .expect("register tokens always carry a register name");
            OperandValue::Register(register)
        }

        TokenKind::Address => {
            let content = token.address_content();
            if let Some(register) = Register::from_name(content) {
                require_type(OperandType::RegisterAddress, expected, token)?;
                OperandValue::RegisterAddress(register)
            } else if !content.is_empty() && content.chars().all(is_hex_digit) {
                require_type(OperandType::Address, expected, token)?;
                let value = u32::from_str_radix(content, 16).map_err(|_| {
                    address_out_of_range(content, token)
                })?;
                if value > 0xFF {
                    return Err(address_out_of_range(content, token));
                }
                OperandValue::Address(value as u8)
            } else {
                return Err(AssemblerError::at_token(
                    AssemblerErrorKind::Address,
                    format!(
                        "Invalid address '{}': expected a number or a register inside the brackets",
                        token.value
                    ),
                    token,
                ));
            }
        }

        TokenKind::String => {
            require_type(OperandType::String, expected, token)?;
            let mut ascii = Vec::new();
            for ch in token.string_content().chars() {
                if !ch.is_ascii() {
                    return Err(AssemblerError::at_token(
                        AssemblerErrorKind::InvalidNumber,
                        format!("Character '{}' in string is outside the ASCII range", ch),
                        token,
                    ));
                }
                ascii.push(ch as u8);
            }
            OperandValue::String(ascii)
        }

        TokenKind::Unknown => {
            // Ambiguity between numbers and labels is resolved by the
            // mnemonic's expected types, number first.
            let is_hex = token.value.chars().all(is_hex_digit);
            let is_label = token
                .value
                .chars()
                .next()
                .is_some_and(|ch| ch.is_ascii_uppercase() || ch == '_');

            if expected.contains(&OperandType::Number) && is_hex {
                OperandValue::Number(parse_number(&token.value, token)?)
            } else if expected.contains(&OperandType::Label) && is_label {
                OperandValue::Label(token.value.clone())
            } else {
                return Err(operand_type_error(expected, token));
            }
        }

        TokenKind::Comma | TokenKind::Whitespace => {
            return Err(operand_type_error(expected, token));
        }
    };

    Ok(Operand {
        value,
        token: token.clone(),
    })
}

/// Checks that `found` is among the expected operand types.
fn require_type(
    found: OperandType,
    expected: &'static [OperandType],
    token: &Token,
) -> Result<(), AssemblerError> {
    if expected.contains(&found) {
        Ok(())
    } else {
        Err(operand_type_error(expected, token))
    }
}

fn operand_type_error(expected: &'static [OperandType], token: &Token) -> AssemblerError {
    let expected_list = expected
        .iter()
        .map(|ty| ty.to_string())
        .collect::<Vec<_>>()
        .join(" or ");
    AssemblerError::at_token(
        AssemblerErrorKind::OperandType {
            expected: expected.to_vec(),
        },
        format!("Expected {}, found '{}'", expected_list, token.value),
        token,
    )
}

/// Decodes a hex literal into a byte, rejecting values above `0xFF`.
fn parse_number(digits: &str, token: &Token) -> Result<u8, AssemblerError> {
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| number_out_of_range(digits, token))?;
    if value > 0xFF {
        return Err(number_out_of_range(digits, token));
    }
    Ok(value as u8)
}

fn number_out_of_range(digits: &str, token: &Token) -> AssemblerError {
    AssemblerError::at_token(
        AssemblerErrorKind::InvalidNumber,
        format!("Number '{}' does not fit in a byte (max FF)", digits),
        token,
    )
}

fn address_out_of_range(content: &str, token: &Token) -> AssemblerError {
    AssemblerError::at_token(
        AssemblerErrorKind::Address,
        format!("Address '{}' does not fit in a byte (max FF)", content),
        token,
    )
}
