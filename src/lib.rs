pub mod circuit;

// Re-exporting symbols and modules.
pub use circuit::dfs;
pub use circuit::style;
pub use circuit::{
    Circuit, CircuitError, Gate, GateHandle, GateId, GateKind, GateRef, Header, Literal,
    ParseError, ParseErrorKind, Position, Result,
};
