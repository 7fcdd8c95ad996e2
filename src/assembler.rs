//! # Assembler
//!
//! Converts assembly source into a flat 256-byte machine image.
//!
//! Assembly is a single pass over the source followed by two logical passes
//! over the parsed statement list:
//!
//! 1. **Tokenize + parse**: [`lexer`] produces position-tagged tokens,
//!    [`parser`] consumes them into [`Statement`]s with validated operand
//!    shapes and selected opcodes.
//! 2. **Address assignment**: walk the statements, honouring `ORG`, assigning
//!    each statement its start address and recording labels in a
//!    [`LabelTable`].
//! 3. **Label resolution + flattening**: substitute each label operand with
//!    its signed 8-bit distance, then patch every statement's machine codes
//!    into a zero-initialised [`Memory`] image and record the address →
//!    statement [`StatementMap`].
//!
//! The first error aborts the whole assembly; partial results are never
//! returned.
//!
//! # Examples
//!
//! ```
//! use lib8bit::assemble;
//!
//! let output = assemble("mov al, c0\nend").unwrap();
//!
//! assert_eq!(output.image.read(0), 0xD0); // MOV_NUM_TO_REG
//! assert_eq!(output.image.read(1), 0x00); // AL
//! assert_eq!(output.image.read(2), 0xC0);
//! assert_eq!(output.image.read(3), 0x00); // END
//!
//! // The statement map drives editor highlighting
//! let statement = output.statement_at(0).unwrap();
//! assert_eq!(statement.position, 0);
//! ```

pub mod label_table;
pub mod lexer;
pub mod parser;
pub mod statement_map;

// Re-export the phase types for public API
pub use label_table::{LabelEntry, LabelTable};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{
    parse, Instruction, Label, Mnemonic, Operand, OperandType, OperandValue, Statement,
};
pub use statement_map::StatementMap;

use crate::memory::{Memory, MEMORY_SIZE};

use log::debug;

/// Classification of assembly errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblerErrorKind {
    /// Label does not start with a letter or underscore
    InvalidLabel,

    /// Expected a label or instruction (unterminated strings included)
    Statement,

    /// Program does not end with `END`, or the source ended mid-statement
    MissingEnd,

    /// Malformed or unterminated `[..]` reference
    Address,

    /// Number literal does not fit in a byte
    InvalidNumber,

    /// Operand shape not permitted for the mnemonic
    OperandType { expected: Vec<OperandType> },

    /// Missing comma between two operands
    MissingComma,

    /// Label defined more than once
    DuplicateLabel,

    /// Label referenced but never defined
    LabelNotExist,

    /// Jump target further than a signed 8-bit displacement reaches
    JumpDistance,

    /// Statement assembles past the end of the 256-byte image
    AssembleOverflow,
}

impl AssemblerErrorKind {
    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            AssemblerErrorKind::InvalidLabel => "Invalid Label",
            AssemblerErrorKind::Statement => "Statement Error",
            AssemblerErrorKind::MissingEnd => "Missing End",
            AssemblerErrorKind::Address => "Address Error",
            AssemblerErrorKind::InvalidNumber => "Invalid Number",
            AssemblerErrorKind::OperandType { .. } => "Operand Type Error",
            AssemblerErrorKind::MissingComma => "Missing Comma",
            AssemblerErrorKind::DuplicateLabel => "Duplicate Label",
            AssemblerErrorKind::LabelNotExist => "Label Not Found",
            AssemblerErrorKind::JumpDistance => "Jump Distance Error",
            AssemblerErrorKind::AssembleOverflow => "Assemble Overflow",
        }
    }
}

/// An error encountered during assembly.
///
/// Carries the originating source span (absolute byte offset plus length)
/// whenever one exists, so front-ends can underline the offending lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerError {
    /// Error classification
    pub kind: AssemblerErrorKind,

    /// Human-readable message
    pub message: String,

    /// Absolute byte offset of the offending source span
    pub position: Option<usize>,

    /// Length of the offending source span
    pub length: Option<usize>,
}

impl AssemblerError {
    /// An error with no source span (whole-program conditions).
    pub fn new(kind: AssemblerErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            position: None,
            length: None,
        }
    }

    /// An error pointing at an explicit source span.
    pub(crate) fn spanned(
        kind: AssemblerErrorKind,
        message: String,
        position: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            message,
            position: Some(position),
            length: Some(length),
        }
    }

    /// An error pointing at a token's source span.
    pub(crate) fn at_token(kind: AssemblerErrorKind, message: String, token: &Token) -> Self {
        Self::spanned(kind, message, token.position, token.length)
    }
}

impl std::fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(
                f,
                "Offset {}: {} - {}",
                position,
                self.kind.name(),
                self.message
            ),
            None => write!(f, "{} - {}", self.kind.name(), self.message),
        }
    }
}

impl std::error::Error for AssemblerError {}

/// Complete output from assembling source code.
#[derive(Debug, Clone)]
pub struct AssembleOutput {
    /// The 256-byte machine image
    pub image: Memory,

    /// Parsed statements in source order
    pub statements: Vec<Statement>,

    /// Address → statement index map
    pub statement_map: StatementMap,
}

impl AssembleOutput {
    /// The statement assembled at `address`, for editor highlighting.
    pub fn statement_at(&self, address: u8) -> Option<&Statement> {
        self.statement_map
            .statement_index(address)
            .map(|index| &self.statements[index])
    }
}

/// Assemble source code into a machine image.
///
/// # Arguments
///
/// * `source` - The assembly source text
///
/// # Returns
///
/// `Ok(AssembleOutput)` on success, or the first [`AssemblerError`]
/// encountered. Assembly is deterministic: the same source always produces an
/// identical image and statement map.
///
/// # Examples
///
/// ```
/// use lib8bit::assemble;
///
/// let output = assemble(
///     "jmp start\n\
///      db \"AB\"\n\
///      start: mov cl, [02]\n\
///      end",
/// )
/// .unwrap();
///
/// assert_eq!(output.image.read(2), 0x41); // 'A'
/// assert_eq!(output.image.read(3), 0x42); // 'B'
/// ```
pub fn assemble(source: &str) -> Result<AssembleOutput, AssemblerError> {
    let tokens = lexer::tokenize(source)?;
    let mut statements = parser::parse(&tokens)?;

    // Pass 1: assign each statement its start address and build the label map.
    let mut labels = LabelTable::new();
    let mut addresses: Vec<Option<u8>> = vec![None; statements.len()];
    let mut cursor: usize = 0;

    for (index, statement) in statements.iter().enumerate() {
        if statement.instruction.mnemonic == Mnemonic::Org {
            if let OperandValue::Number(origin) = statement.operands[0].value {
                cursor = origin as usize;
            }
        } else {
            if cursor + statement.machine_codes.len() > MEMORY_SIZE {
                return Err(AssemblerError::spanned(
                    AssemblerErrorKind::AssembleOverflow,
                    "Statement assembles past the end of the 256-byte image".to_string(),
                    statement.position,
                    statement.length,
                ));
            }
            addresses[index] = Some(cursor as u8);
        }

        // A label names the address where the next byte lands; on an ORG line
        // that is the new origin.
        if let Some(label) = &statement.label {
            if let Err(existing) =
                labels.add(label.identifier.clone(), cursor as u8, label.token.position)
            {
                return Err(AssemblerError::at_token(
                    AssemblerErrorKind::DuplicateLabel,
                    format!(
                        "Duplicate label '{}' (previously defined at offset {})",
                        label.identifier, existing.position
                    ),
                    &label.token,
                ));
            }
        }

        if addresses[index].is_some() {
            cursor += statement.machine_codes.len();
        }
    }

    debug!(
        "pass 1: {} statements, {} labels, cursor 0x{:02X}",
        statements.len(),
        labels.entries().len(),
        cursor
    );

    // Pass 2: resolve label operands to signed 8-bit distances relative to
    // the address after the referencing instruction.
    for (index, statement) in statements.iter_mut().enumerate() {
        let mut byte_offset = if statement.instruction.opcode.is_some() {
            1
        } else {
            0
        };

        for operand in &statement.operands {
            if let OperandValue::Label(identifier) = &operand.value {
                let entry = labels.lookup(identifier).ok_or_else(|| {
                    AssemblerError::at_token(
                        AssemblerErrorKind::LabelNotExist,
                        format!("Label '{}' does not exist", identifier),
                        &operand.token,
                    )
                })?;

                let address = addresses[index]
                    .expect("label operands only occur on byte-emitting statements")
                    as i32;
                let next_address = address + statement.machine_codes.len() as i32;
                let distance = entry.address as i32 - next_address;

                if !(-128..=127).contains(&distance) {
                    return Err(AssemblerError::at_token(
                        AssemblerErrorKind::JumpDistance,
                        format!(
                            "Label '{}' is {} bytes away, beyond the signed 8-bit jump range",
                            identifier, distance
                        ),
                        &operand.token,
                    ));
                }

                statement.machine_codes[byte_offset] = distance as u8;
            }

            byte_offset += operand.encoded_len();
        }
    }

    // Flatten into the image and record the statement map.
    let mut image = Memory::new();
    let mut statement_map = StatementMap::new();

    for (index, statement) in statements.iter().enumerate() {
        if let Some(address) = addresses[index] {
            image.load(address, &statement.machine_codes);
            statement_map.add_mapping(address, index);
        }
    }

    statement_map.finalize();

    debug!(
        "pass 2: image emitted, {} statements mapped",
        statement_map.iter().count()
    );

    Ok(AssembleOutput {
        image,
        statements,
        statement_map,
    })
}
