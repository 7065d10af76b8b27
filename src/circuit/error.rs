use std::fmt::Display;

use thiserror::Error;

use super::{GateId, Literal};

/// The result of a circuit operation.
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Error returned when a circuit operation failed.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// The design could not be opened or read.
    #[error("{0}")]
    Io(String),

    /// Just forwarding a [`ParseError`].
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// There is no gate with the given id.
    #[error("gate with id={0} does not exist")]
    GateDoesNotExist(GateId),

    /// The circuit has reached an invalid state. This should never happen
    /// once a read succeeded.
    #[error("the circuit has reached an invalid state - this should not happen - error: {0}")]
    InvalidState(String),
}

impl CircuitError {
    /// Returns the parse error if this is one.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            CircuitError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Where a parse error occured. Both line and column are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    /// Only set for errors tied to a token.
    pub column: Option<usize>,
}

impl Position {
    pub fn line(line: usize) -> Self {
        Position { line, column: None }
    }

    pub fn token(line: usize, column: usize) -> Self {
        Position {
            line,
            column: Some(column),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(column) => write!(f, "Line {}, Col {}", self.line, column),
            None => write!(f, "Line {}", self.line),
        }
    }
}

/// Error returned when the AAG text is malformed.
///
/// Any of these aborts the whole read: the circuit is left empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[ERROR] {position}: {kind}!!")]
pub struct ParseError {
    pub position: Position,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn at(line: usize, column: usize, kind: ParseErrorKind) -> Self {
        ParseError {
            position: Position::token(line, column),
            kind,
        }
    }

    pub(crate) fn on_line(line: usize, kind: ParseErrorKind) -> Self {
        ParseError {
            position: Position::line(line),
            kind,
        }
    }
}

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Extra space character is detected")]
    ExtraSpace,

    #[error("Missing space character")]
    MissingSpace,

    /// A white space other than ' ', carrying the offending character code.
    #[error("Illegal white space char({0}) is detected")]
    IllegalWhitespace(u32),

    /// Carries what was expected, followed by the token.
    #[error("Illegal {0}")]
    IllegalNumber(String),

    #[error("Illegal identifier \"{0}\"")]
    IllegalIdentifier(String),

    #[error("Illegal symbol type ({0})")]
    IllegalSymbolType(String),

    #[error("Symbolic name contains un-printable char({0})")]
    IllegalSymbolName(u32),

    #[error("Missing {0}")]
    MissingNumber(String),

    #[error("Missing \"{0}\"")]
    MissingIdentifier(String),

    #[error("A new line is expected here")]
    MissingNewline,

    #[error("Missing {0} definition")]
    MissingDefinition(String),

    #[error("{what} {literal}({}) cannot be inverted", .literal / 2)]
    CannotInvert { what: String, literal: Literal },

    #[error("Literal \"{0}\" exceeds maximum valid ID")]
    MaxLiteralId(Literal),

    /// Carries the type label and the line of the previous definition.
    #[error("Literal \"{literal}\" is redefined, previously defined as {previous} in line {line}")]
    RedefinedGate {
        literal: Literal,
        previous: &'static str,
        line: usize,
    },

    /// `kind` is the symbol table prefix (`i` or `o`).
    #[error("Symbolic name for \"{kind}{index}\" is redefined")]
    RedefinedSymbolicName { kind: char, index: u64 },

    #[error("Cannot redefine constant ({0})")]
    RedefinedConst(Literal),

    #[error("{what} is too small ({value})")]
    NumberTooSmall { what: String, value: u64 },

    #[error("{what} is too big ({value})")]
    NumberTooBig { what: String, value: u64 },
}
