//! A [`GateRef`] points at a [`Gate`] and can be inverted (indicates the presence of a NOT on the edge).
//!
//! [`Gate`]: crate::Gate

use std::ops::Not;

use super::GateId;

/// A literal as written in the AIGER format, ie `2 * gate_id + inverted`.
///
/// Literals never live in the graph: they are decoded into a [`GateRef`] right after parsing.
pub type Literal = u64;

/// A directed edge of the circuit graph: the id of the gate it points at,
/// plus an inversion flag.
///
/// The edge does not own anything, the gate table of the [`Circuit`] does.
///
/// ```rust
/// use aagcir::GateRef;
/// let edge = GateRef::from_literal(7);
/// assert_eq!(edge.get_id(), 3);
/// assert!(edge.is_inverted());
/// assert_eq!(!edge, GateRef::new(3, false));
/// assert_eq!(edge.to_literal(), 7);
/// ```
///
/// [`Circuit`]: crate::Circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateRef {
    /// The gate the edge is refering to.
    id: GateId,
    /// Set to true if signal should be inverted.
    inverted: bool,
}

impl Not for GateRef {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.inverted = !self.inverted;
        self
    }
}

impl From<&GateRef> for (GateId, bool) {
    fn from(edge: &GateRef) -> Self {
        (edge.id, edge.inverted)
    }
}

impl GateRef {
    pub fn new(id: GateId, inverted: bool) -> Self {
        GateRef { id, inverted }
    }

    /// Decodes a literal: gate id `lit / 2`, inverted iff `lit` is odd.
    pub fn from_literal(lit: Literal) -> Self {
        GateRef {
            id: lit >> 1,
            inverted: lit & 1 == 1,
        }
    }

    pub fn to_literal(&self) -> Literal {
        (self.id << 1) | self.inverted as Literal
    }

    pub fn get_id(&self) -> GateId {
        self.id
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_cst_false(&self) -> bool {
        self.id == 0 && !self.inverted
    }

    pub fn is_cst_true(&self) -> bool {
        self.id == 0 && self.inverted
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn literal_decoding_test() {
        assert_eq!(GateRef::from_literal(0), GateRef::new(0, false));
        assert_eq!(GateRef::from_literal(1), GateRef::new(0, true));
        assert_eq!(GateRef::from_literal(42), GateRef::new(21, false));
        assert_eq!(GateRef::from_literal(43), GateRef::new(21, true));

        assert!(GateRef::from_literal(0).is_cst_false());
        assert!(GateRef::from_literal(1).is_cst_true());
        assert!(!GateRef::from_literal(2).is_cst_false());
    }

    #[test]
    fn literal_encoding_test() {
        for lit in [0, 1, 2, 7, 100, 101] {
            assert_eq!(GateRef::from_literal(lit).to_literal(), lit);
        }
        assert_eq!((!GateRef::new(5, false)).to_literal(), 11);
        let pair: (GateId, bool) = (&GateRef::new(5, true)).into();
        assert_eq!(pair, (5, true));
    }
}
