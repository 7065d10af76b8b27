use std::cell::Cell;

use super::GateRef;

/// A gate id.
///
/// The constant gate has id 0. Inputs and AND gates take ids in `[1, M]`,
/// outputs are numbered `M + 1 ..= M + O` after them.
pub type GateId = u64;

/// The different kinds of gates a circuit is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// The constant gate, literal 0 is false and literal 1 is true.
    Const,
    /// Placeholder for an id used as a fanin but never defined.
    Undefined,
    /// A primary input.
    Input,
    /// A primary output, with exactly one fanin.
    Output,
    /// An AND gate, with exactly two fanins.
    And,
}

impl GateKind {
    /// The label used in every report.
    pub fn type_label(&self) -> &'static str {
        match self {
            GateKind::Const => "CONST",
            GateKind::Undefined => "UNDEF",
            GateKind::Input => "PI",
            GateKind::Output => "PO",
            GateKind::And => "AIG",
        }
    }

    pub fn is_floating_placeholder(&self) -> bool {
        matches!(self, GateKind::Undefined)
    }

    /// Number of fanins a gate of this kind has once the circuit is built.
    pub fn arity(&self) -> usize {
        match self {
            GateKind::Const | GateKind::Undefined | GateKind::Input => 0,
            GateKind::Output => 1,
            GateKind::And => 2,
        }
    }
}

/// A gate of the circuit.
///
/// Gates only refer to each other through [`GateRef`]s (ids), the gate table of the
/// [`Circuit`] owns them all.
///
/// [`Circuit`]: crate::Circuit
#[derive(Debug, Clone)]
pub struct Gate {
    id: GateId,
    kind: GateKind,
    /// Line of the definition in the source file, 0 for constant and placeholders.
    line: usize,
    symbol: Option<String>,
    pub(super) fanins: Vec<GateRef>,
    pub(super) fanouts: Vec<GateRef>,
    /// Last traversal generation this gate was visited at.
    marker: Cell<u64>,
}

impl PartialEq for Gate {
    /// Everything but the traversal marker.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.line == other.line
            && self.symbol == other.symbol
            && self.fanins == other.fanins
            && self.fanouts == other.fanouts
    }
}

impl Eq for Gate {}

impl Gate {
    fn new(id: GateId, kind: GateKind, line: usize) -> Self {
        Gate {
            id,
            kind,
            line,
            symbol: None,
            fanins: Vec::new(),
            fanouts: Vec::new(),
            marker: Cell::new(0),
        }
    }

    pub fn constant() -> Self {
        Gate::new(0, GateKind::Const, 0)
    }

    pub fn undefined(id: GateId) -> Self {
        if id == 0 {
            panic!("id=0 is reserved for the constant gate, it cannot be undefined");
        }
        Gate::new(id, GateKind::Undefined, 0)
    }

    pub fn input(id: GateId, line: usize) -> Self {
        if id == 0 {
            panic!("id=0 is reserved for the constant gate, it cannot be an input");
        }
        Gate::new(id, GateKind::Input, line)
    }

    pub fn output(id: GateId, line: usize) -> Self {
        if id == 0 {
            panic!("id=0 is reserved for the constant gate, it cannot be an output");
        }
        Gate::new(id, GateKind::Output, line)
    }

    pub fn and(id: GateId, line: usize) -> Self {
        if id == 0 {
            panic!("id=0 is reserved for the constant gate, it cannot be an AND gate");
        }
        Gate::new(id, GateKind::And, line)
    }

    pub fn get_id(&self) -> GateId {
        self.id
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn type_label(&self) -> &'static str {
        self.kind.type_label()
    }

    pub fn is_floating_placeholder(&self) -> bool {
        self.kind.is_floating_placeholder()
    }

    pub fn is_const(&self) -> bool {
        matches!(self.kind, GateKind::Const)
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, GateKind::Input)
    }

    pub fn is_output(&self) -> bool {
        matches!(self.kind, GateKind::Output)
    }

    pub fn is_and(&self) -> bool {
        matches!(self.kind, GateKind::And)
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub(super) fn set_symbol(&mut self, symbol: String) {
        self.symbol = Some(symbol);
    }

    /// Fanins in declaration order.
    pub fn get_fanins(&self) -> &[GateRef] {
        &self.fanins
    }

    pub fn get_fanouts(&self) -> &[GateRef] {
        &self.fanouts
    }

    pub(super) fn add_fanin(&mut self, fanin: GateRef) {
        self.fanins.push(fanin);
    }

    pub(super) fn add_fanout(&mut self, fanout: GateRef) {
        self.fanouts.push(fanout);
    }

    pub(super) fn mark(&self, generation: u64) {
        self.marker.set(generation);
    }

    pub(super) fn is_marked(&self, generation: u64) -> bool {
        self.marker.get() == generation
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_label_test() {
        assert_eq!(Gate::constant().type_label(), "CONST");
        assert_eq!(Gate::undefined(3).type_label(), "UNDEF");
        assert_eq!(Gate::input(1, 2).type_label(), "PI");
        assert_eq!(Gate::output(5, 4).type_label(), "PO");
        assert_eq!(Gate::and(3, 5).type_label(), "AIG");
    }

    #[test]
    fn floating_placeholder_test() {
        assert!(Gate::undefined(3).is_floating_placeholder());
        assert!(!Gate::constant().is_floating_placeholder());
        assert!(!Gate::input(1, 2).is_floating_placeholder());
        assert!(!Gate::and(3, 5).is_floating_placeholder());
        assert_eq!(Gate::undefined(3).get_line(), 0);
    }

    #[test]
    fn marker_test() {
        let g = Gate::and(3, 5);
        assert!(g.is_marked(0));
        g.mark(4);
        assert!(g.is_marked(4));
        assert!(!g.is_marked(5));
        // The marker is not part of the equality
        assert_eq!(g, Gate::and(3, 5));
    }

    #[test]
    #[should_panic]
    fn and_gate_id0() {
        let _ = Gate::and(0, 1);
    }

    #[test]
    #[should_panic]
    fn input_gate_id0() {
        let _ = Gate::input(0, 1);
    }
}
