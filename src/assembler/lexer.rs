//! Lexical analysis for assembly source
//!
//! This module provides the first phase of assembly: converting source text
//! into a stream of typed tokens. The lexer separates character-level concerns
//! (where does a token end? is this bracket closed?) from syntactic analysis
//! (is this a valid instruction? is `C0` a number or a label here?).
//!
//! # Architecture
//!
//! Tokens carry their **absolute byte offset** into the source plus their
//! lexeme length, so every later phase can point diagnostics at the exact
//! source span. Whitespace and comments are scanned but discarded before the
//! parser sees the stream.
//!
//! ## Classification
//!
//! The dialect is hex-only and case-insensitive, which makes classification
//! unusual: every letter of `DB`, `DEC` or `ADD` is also a hex digit. A run is
//! therefore lexed as [`TokenKind::Digits`] only when it *starts* with a
//! decimal digit; all-letter hex strings such as `C0` lex as
//! [`TokenKind::Unknown`] and are narrowed to numbers or labels by the parser,
//! which knows the mnemonic's expected operand shapes.
//!
//! # Examples
//!
//! ```
//! use lib8bit::assembler::lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("mov al, [c0] ; load").unwrap();
//!
//! // Comment and whitespace are stripped: MOV, AL, comma, address
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[0].kind, TokenKind::Unknown);
//! assert_eq!(tokens[0].value, "MOV");
//! assert_eq!(tokens[1].kind, TokenKind::Register);
//! assert_eq!(tokens[2].kind, TokenKind::Comma);
//! assert_eq!(tokens[3].kind, TokenKind::Address);
//! assert_eq!(tokens[3].value, "[C0]");
//! assert_eq!(tokens[3].position, 8);
//! ```

use crate::assembler::{AssemblerError, AssemblerErrorKind};
use crate::registers::Register;

/// Classification of lexical tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Runs of spaces/tabs/newlines and `;` comments (discarded before parse)
    Whitespace,

    /// Operand separator `,`
    Comma,

    /// Hex number literal beginning with a decimal digit
    Digits,

    /// Register name (`AL`, `BL`, `CL`, `DL`)
    Register,

    /// Bracketed memory reference `[..]` (content validated by the parser)
    Address,

    /// Double-quoted string literal, no escape handling
    String,

    /// Any other non-whitespace run: mnemonics, labels, all-letter hex numbers
    Unknown,
}

/// A single lexical token with its exact source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token classification
    pub kind: TokenKind,

    /// The source lexeme, uppercased for every kind except `String`
    pub value: String,

    /// Absolute byte offset of the lexeme in the source
    pub position: usize,

    /// Lexeme length in bytes (`value.len()`)
    pub length: usize,
}

impl Token {
    /// The bracket-stripped, trimmed content of an `Address` token.
    pub fn address_content(&self) -> &str {
        self.value
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(&self.value)
            .trim()
    }

    /// The quote-stripped content of a `String` token.
    pub fn string_content(&self) -> &str {
        self.value
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(&self.value)
    }
}

/// Characters that end a `Digits`/`Register`/`Unknown` run.
fn is_run_terminator(ch: char) -> bool {
    ch.is_ascii_whitespace() || matches!(ch, ',' | ';' | '[' | '"')
}

/// Lexer state for converting source text into tokens.
struct Lexer<'a> {
    source: &'a str,

    /// Iterator over (byte_offset, char) pairs
    chars: std::str::CharIndices<'a>,

    /// Current character being examined
    current: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let current = chars.next();
        Lexer {
            source,
            chars,
            current,
        }
    }

    fn advance(&mut self) {
        self.current = self.chars.next();
    }

    fn peek(&self) -> Option<char> {
        self.current.map(|(_, ch)| ch)
    }

    /// Absolute byte offset of the current character (or end of source).
    fn position(&self) -> usize {
        match self.current {
            Some((pos, _)) => pos,
            None => self.source.len(),
        }
    }

    fn token(&self, kind: TokenKind, value: String, position: usize) -> Token {
        let length = value.len();
        Token {
            kind,
            value,
            position,
            length,
        }
    }

    /// Scan whitespace runs and `;` comments into one Whitespace token.
    fn scan_whitespace(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.advance();
            } else if ch == ';' {
                // Comment runs to end of line and is stripped as whitespace
                while let Some(ch) = self.peek() {
                    if ch == '\n' || ch == '\r' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }

        let value = self.source[start..self.position()].to_string();
        self.token(TokenKind::Whitespace, value, start)
    }

    /// Scan a bracketed memory reference: `[` .. `]`.
    fn scan_address(&mut self, start: usize) -> Result<Token, AssemblerError> {
        self.advance(); // consume [

        loop {
            match self.peek() {
                Some(']') => {
                    self.advance();
                    let value = self.source[start..self.position()].to_ascii_uppercase();
                    return Ok(self.token(TokenKind::Address, value, start));
                }
                Some('\n') | Some('\r') | None => {
                    return Err(AssemblerError::spanned(
                        AssemblerErrorKind::Address,
                        "Unterminated address, expected a closing ']'".to_string(),
                        start,
                        self.position() - start,
                    ));
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Scan a string literal: `"` .. `"`, no escape handling.
    fn scan_string(&mut self, start: usize) -> Result<Token, AssemblerError> {
        self.advance(); // consume "

        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    let value = self.source[start..self.position()].to_string();
                    return Ok(self.token(TokenKind::String, value, start));
                }
                Some('\n') | Some('\r') | None => {
                    return Err(AssemblerError::spanned(
                        AssemblerErrorKind::Statement,
                        "Unterminated string, expected a closing '\"'".to_string(),
                        start,
                        self.position() - start,
                    ));
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Scan a plain run and classify it as Digits, Register or Unknown.
    fn scan_run(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if is_run_terminator(ch) {
                break;
            }
            self.advance();
        }

        let value = self.source[start..self.position()].to_ascii_uppercase();

        let kind = if Register::from_name(&value).is_some() {
            TokenKind::Register
        } else if value.starts_with(|ch: char| ch.is_ascii_digit())
            && value.chars().all(is_hex_digit)
        {
            TokenKind::Digits
        } else {
            TokenKind::Unknown
        };

        self.token(kind, value, start)
    }

    fn next_token(&mut self) -> Result<Option<Token>, AssemblerError> {
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        let start = self.position();

        let token = match ch {
            ch if ch.is_ascii_whitespace() || ch == ';' => self.scan_whitespace(start),
            ',' => {
                self.advance();
                self.token(TokenKind::Comma, ",".to_string(), start)
            }
            '[' => self.scan_address(start)?,
            '"' => self.scan_string(start)?,
            _ => self.scan_run(start),
        };

        Ok(Some(token))
    }
}

/// Returns true for the uppercase hex digit alphabet `0-9A-F`.
pub(crate) fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_digit() || ('A'..='F').contains(&ch)
}

/// Tokenize assembly source into significant tokens.
///
/// Whitespace and comments are scanned and then discarded, so the returned
/// stream contains only tokens the parser consumes. The first lexical error
/// aborts tokenization.
///
/// # Examples
///
/// ```
/// use lib8bit::assembler::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("db \"AB\"").unwrap();
/// assert_eq!(tokens[0].value, "DB");
/// assert_eq!(tokens[1].kind, TokenKind::String);
/// assert_eq!(tokens[1].value, "\"AB\"");
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, AssemblerError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        // Whitespace tokens are discarded before parse
        if token.kind != TokenKind::Whitespace {
            tokens.push(token);
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \n\t ; only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_basic_statement() {
        let tokens = tokenize("MOV AL, 10").unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].value, "MOV");
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].kind, TokenKind::Register);
        assert_eq!(tokens[1].value, "AL");
        assert_eq!(tokens[1].position, 4);
        assert_eq!(tokens[2].kind, TokenKind::Comma);
        assert_eq!(tokens[3].kind, TokenKind::Digits);
        assert_eq!(tokens[3].value, "10");
        assert_eq!(tokens[3].position, 8);
    }

    #[test]
    fn test_case_normalisation() {
        let tokens = tokenize("mov bl, [dl]").unwrap();

        assert_eq!(tokens[0].value, "MOV");
        assert_eq!(tokens[1].value, "BL");
        assert_eq!(tokens[3].value, "[DL]");
    }

    #[test]
    fn test_all_letter_hex_is_unknown() {
        // Every letter of these runs is a hex digit, but none starts with a
        // decimal digit, so the parser must resolve them contextually.
        let tokens = tokenize("DB C0 FACE").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[2].kind, TokenKind::Unknown);
    }

    #[test]
    fn test_digit_led_hex_is_digits() {
        let tokens = tokenize("0 7F 0FACE 100").unwrap();

        for token in &tokens {
            assert_eq!(token.kind, TokenKind::Digits);
        }
    }

    #[test]
    fn test_non_hex_run_is_unknown() {
        let tokens = tokenize("1BAD: loop_start").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].value, "1BAD:");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].value, "LOOP_START");
    }

    #[test]
    fn test_comment_stripped_to_end_of_line() {
        assert_eq!(
            kinds("inc al ; bump the counter\ndec bl"),
            vec![
                TokenKind::Unknown,
                TokenKind::Register,
                TokenKind::Unknown,
                TokenKind::Register,
            ]
        );
    }

    #[test]
    fn test_string_keeps_case_and_spaces() {
        let tokens = tokenize("db \"Hello, World!\"").unwrap();

        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].string_content(), "Hello, World!");
        assert_eq!(tokens[1].length, 15);
    }

    #[test]
    fn test_address_content() {
        let tokens = tokenize("mov al, [ bl ]").unwrap();

        assert_eq!(tokens[3].kind, TokenKind::Address);
        assert_eq!(tokens[3].address_content(), "BL");
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("db \"AB\nend").unwrap_err();

        assert_eq!(err.kind, AssemblerErrorKind::Statement);
        assert_eq!(err.position, Some(3));
    }

    #[test]
    fn test_unterminated_address() {
        let err = tokenize("mov al, [20").unwrap_err();

        assert_eq!(err.kind, AssemblerErrorKind::Address);
        assert_eq!(err.position, Some(8));
    }

    #[test]
    fn test_positions_are_absolute() {
        let tokens = tokenize("inc al\njmp top").unwrap();

        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 4);
        assert_eq!(tokens[2].position, 7);
        assert_eq!(tokens[3].position, 11);
    }
}
