//! Provides a post-order DFS visitor over the circuit.
//!
//! See [`Dfs`] for details.

use super::{Circuit, Gate, GateId};

/// A post-order DFS visitor.
///
/// Every fanin of a gate is yielded before the gate itself, fanins being explored in
/// declaration order. Undefined placeholders are never yielded nor expanded. You can:
/// - start a DFS from a gate using [`from_gate`]
/// - or visit all the circuit by starting from the outputs using [`from_outputs`].
///
/// In the latter case, outputs are processed by increasing id, and gates already yielded
/// from a previous output are not yielded again.
///
/// Visited gates are stamped with the generation of the circuit, which is raised once when
/// the DFS is created. Starting another traversal of the same circuit before this one is
/// done corrupts it.
///
/// [`from_gate`]: Dfs::from_gate
/// [`from_outputs`]: Dfs::from_outputs
///
/// Example:
///
/// ```rust
/// use aagcir::{Circuit, dfs::Dfs};
/// let circuit = Circuit::from_file("assets/circuits/half-adder.aag").unwrap();
/// let mut dfs = Dfs::from_outputs(&circuit);
/// let mut ids = Vec::new();
/// while let Some(gate) = dfs.next(&circuit) {
///     ids.push(gate.get_id());
/// }
/// assert_eq!(ids, vec![1, 2, 6, 7, 3, 8, 9]);
/// ```
pub struct Dfs {
    /// Gates to process, with a flag telling if their fanins were already pushed.
    /// A gate popped with the flag set has all its fanins yielded.
    stack: Vec<(GateId, bool)>,
    /// Remaining roots, the next one is at the end.
    starts: Vec<GateId>,
    generation: u64,
}

impl Dfs {
    /// Create a DFS from the initial start gate.
    /// You will only browse the fanin cone of this gate.
    pub fn from_gate(circuit: &Circuit, start: GateId) -> Self {
        Dfs {
            stack: vec![(start, false)],
            starts: Vec::new(),
            generation: circuit.raise_marker(),
        }
    }

    /// Create a DFS from the outputs of the given circuit.
    pub fn from_outputs(circuit: &Circuit) -> Self {
        let mut starts = circuit.get_outputs().to_vec();
        starts.sort_unstable();
        starts.reverse();
        Dfs {
            stack: Vec::new(),
            starts,
            generation: circuit.raise_marker(),
        }
    }

    /// Yield the next gate of the DFS, or None if it is done.
    pub fn next<'c>(&mut self, circuit: &'c Circuit) -> Option<&'c Gate> {
        loop {
            let Some((id, expanded)) = self.stack.pop() else {
                // Maybe we can start from a different output?
                let start = self.starts.pop()?;
                self.stack.push((start, false));
                continue;
            };

            let Some(gate) = circuit.gate(id) else {
                continue;
            };
            if expanded {
                return Some(gate);
            }
            if gate.is_floating_placeholder() || gate.is_marked(self.generation) {
                continue;
            }

            gate.mark(self.generation);
            self.stack.push((id, true));
            // Reversed so that the first fanin is explored first
            for fanin in gate.get_fanins().iter().rev() {
                self.stack.push((fanin.get_id(), false));
            }
        }
    }
}

impl Circuit {
    /// All the gates reachable from the outputs, in DFS post-order.
    pub fn dfs_order(&self) -> Vec<&Gate> {
        let mut dfs = Dfs::from_outputs(self);
        let mut order = Vec::new();
        while let Some(gate) = dfs.next(self) {
            order.push(gate);
        }
        order
    }
}
