//! Module defining the [`Circuit`] struct, as well as [`Gate`], [`GateRef`] and some others relevant structs.
//!
//! A circuit is read from an ASCII AIGER (`.aag`) file with [`Circuit::read_circuit`],
//! then queried and reported on. Check [`crate::dfs`] for traversals.

mod analysis;
mod builder;
pub mod dfs;
pub mod error;
pub mod gate;
pub mod gate_ref;
mod integrity;
mod parser;
mod report;
pub mod style;
mod writer;

use std::{borrow::Cow, cell::Cell, fs::File, io::Read, ops::Deref, path::Path};

pub use error::{CircuitError, ParseError, ParseErrorKind, Position, Result};
pub use gate::{Gate, GateId, GateKind};
pub use gate_ref::{GateRef, Literal};
use style::ReportStyle;

/// The header of an AAG file: `aag M I L O A`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// Maximal variable index.
    pub m: u64,
    /// Number of inputs.
    pub i: u64,
    /// Number of latches.
    pub l: u64,
    /// Number of outputs.
    pub o: u64,
    /// Number of AND gates.
    pub a: u64,
}

/// A whole circuit.
///
/// Gates are stored in a table indexed by their id, from `0` (the constant) to `M + O`
/// (the last output). Edges between gates are [`GateRef`]s, ie ids plus an inversion flag,
/// so that the table is the only owner of the gates.
///
/// A circuit is created empty, filled by one read, and can be [`reset`] to be reused.
/// Traversals stamp gates with a generation counter owned by the circuit, which is why
/// a circuit should only be traversed by one walker at a time.
///
/// ```rust
/// use aagcir::Circuit;
///
/// let mut circuit = Circuit::new();
/// circuit.read_circuit("assets/circuits/half-adder.aag").unwrap();
/// assert_eq!(circuit.get_inputs(), &[1, 2]);
/// assert_eq!(circuit.get_outputs(), &[8, 9]);
/// print!("{}", circuit.summary_report());
/// ```
///
/// [`reset`]: Circuit::reset
#[derive(Debug)]
pub struct Circuit {
    header: Header,
    gates: Vec<Option<Gate>>,
    inputs: Vec<GateId>,
    outputs: Vec<GateId>,
    ands: Vec<GateId>,
    /// Latches are only kept as read, `(current, next)` literals.
    latches: Vec<(Literal, Literal)>,
    /// Gates depending on an undefined gate, sorted.
    floating: Vec<GateId>,
    /// Inputs and AND gates without fanout, sorted.
    unused: Vec<GateId>,
    comment: String,
    /// Current traversal generation.
    generation: Cell<u64>,
    style: ReportStyle,
}

impl Default for Circuit {
    fn default() -> Self {
        Circuit::new()
    }
}

impl Circuit {
    /// Create a brand new empty circuit.
    pub fn new() -> Self {
        Circuit::with_style(ReportStyle::default())
    }

    /// Create an empty circuit whose reports follow the given style.
    pub fn with_style(style: ReportStyle) -> Self {
        Circuit {
            header: Header::default(),
            gates: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            ands: Vec::new(),
            latches: Vec::new(),
            floating: Vec::new(),
            unused: Vec::new(),
            comment: String::new(),
            generation: Cell::new(0),
            style,
        }
    }

    /// Creates a circuit from an .aag file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut circuit = Circuit::new();
        circuit.read_circuit(path)?;
        Ok(circuit)
    }

    /// Creates a circuit from anything holding AAG text.
    pub fn from_ascii(reader: impl Read) -> Result<Self> {
        let mut circuit = Circuit::new();
        circuit.read_from(reader)?;
        Ok(circuit)
    }

    /// Reads the circuit from an .aag file, replacing the current content.
    ///
    /// On failure, the circuit is left empty.
    pub fn read_circuit<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path.as_ref()).map_err(|_| {
            self.reset();
            CircuitError::Io(format!(
                "Cannot open design \"{}\"!!",
                path.as_ref().display()
            ))
        })?;
        self.read_from(file)
    }

    /// Reads the circuit from AAG text, replacing the current content.
    ///
    /// Bytes that are not valid UTF-8 are parse errors at their position, except in
    /// the comment which is kept with U+FFFD in their place.
    ///
    /// On failure, the circuit is left empty: there is no partially read circuit.
    pub fn read_from(&mut self, mut reader: impl Read) -> Result<()> {
        self.reset();

        let mut bytes = Vec::new();
        if let Err(e) = reader.read_to_end(&mut bytes) {
            return Err(CircuitError::Io(e.to_string()));
        }
        // Invalid bytes become U+FFFD, which no token accepts: the parser then
        // reports them where they are.
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            log::debug!("design is not valid UTF-8");
        }

        match self.load(&text) {
            Ok(()) => {
                log::info!(
                    "read circuit: {} inputs, {} outputs, {} AND gates",
                    self.inputs.len(),
                    self.outputs.len(),
                    self.ands.len()
                );
                Ok(())
            }
            Err(e) => {
                log::debug!("read failed, resetting the circuit: {}", e);
                self.reset();
                Err(e)
            }
        }
    }

    /// Parse, connect, check and analyze.
    fn load(&mut self, text: &str) -> Result<()> {
        let parsed = parser::parse_aag(text)?;
        self.header = parsed.header;
        self.gates = parsed.gates;
        self.inputs = parsed.inputs;
        self.outputs = parsed.outputs;
        self.ands = parsed.ands;
        self.latches = parsed.latches;
        self.comment = parsed.comment;

        self.connect(&parsed.pending)?;
        self.check_integrity()?;
        self.analyze_defects();
        Ok(())
    }

    /// Releases every gate and goes back to the empty state.
    /// The report style is kept.
    pub fn reset(&mut self) {
        *self = Circuit::with_style(self.style);
    }

    /// True if no circuit was successfully read.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn style(&self) -> &ReportStyle {
        &self.style
    }

    /// Retrieves a gate from its id, [`None`] if there is no such gate
    /// (ids never referenced, or out of range).
    pub fn get_gate(&self, id: GateId) -> Option<GateHandle<'_>> {
        let gate = self.gate(id)?;
        Some(GateHandle {
            circuit: self,
            gate,
        })
    }

    pub(crate) fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(usize::try_from(id).ok()?)?.as_ref()
    }

    fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.gates.get_mut(idx))
            .and_then(|slot| slot.as_mut())
            .ok_or(CircuitError::GateDoesNotExist(id))
    }

    /// Every gate of the table, by increasing id.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter().flatten()
    }

    /// Retrieves inputs id, in declaration order.
    pub fn get_inputs(&self) -> &[GateId] {
        &self.inputs
    }

    /// Retrieves outputs id (`M + 1 ..= M + O`).
    pub fn get_outputs(&self) -> &[GateId] {
        &self.outputs
    }

    /// Retrieves AND gates id, in declaration order.
    pub fn get_ands(&self) -> &[GateId] {
        &self.ands
    }

    /// Retrieves latches as `(current, next)` literals.
    pub fn get_latches(&self) -> &[(Literal, Literal)] {
        &self.latches
    }

    /// Gates depending on an undefined gate, sorted.
    pub fn get_floating(&self) -> &[GateId] {
        &self.floating
    }

    /// Inputs and AND gates with no fanout, sorted.
    pub fn get_unused(&self) -> &[GateId] {
        &self.unused
    }

    /// The free-form text following the `c` line.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Starts a new traversal: every gate becomes unvisited.
    pub(crate) fn raise_marker(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }
}

/// A gate together with the circuit it belongs to.
///
/// Derefs to [`Gate`], and adds the reports that need to walk the circuit.
#[derive(Debug, Clone, Copy)]
pub struct GateHandle<'a> {
    circuit: &'a Circuit,
    gate: &'a Gate,
}

impl<'a> Deref for GateHandle<'a> {
    type Target = Gate;

    fn deref(&self) -> &Self::Target {
        self.gate
    }
}

impl<'a> GateHandle<'a> {
    pub fn circuit(&self) -> &'a Circuit {
        self.circuit
    }

    pub fn gate(&self) -> &'a Gate {
        self.gate
    }
}
