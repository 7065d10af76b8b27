//! Structural defects of a built circuit: floating and unused gates.
//!
//! Neither is an error, the circuit stays usable. They are computed once per read.

use std::collections::{BTreeSet, VecDeque};

use super::{Circuit, GateId};

impl Circuit {
    pub(super) fn analyze_defects(&mut self) {
        self.unused = self.find_unused();
        self.floating = self.find_floating();

        if !self.floating.is_empty() {
            log::warn!("gates with floating fanin(s): {:?}", self.floating);
        }
        if !self.unused.is_empty() {
            log::warn!("gates defined but not used: {:?}", self.unused);
        }
    }

    /// Inputs and AND gates without any fanout.
    fn find_unused(&self) -> Vec<GateId> {
        let mut unused: Vec<GateId> = self
            .inputs
            .iter()
            .chain(&self.ands)
            .copied()
            .filter(|&id| {
                self.gate(id)
                    .is_some_and(|gate| gate.get_fanouts().is_empty())
            })
            .collect();
        unused.sort_unstable();
        unused
    }

    /// AND gates and outputs whose fanin cone reaches an undefined gate.
    ///
    /// Propagates forward along fanouts from every undefined gate, which also terminates
    /// on cyclic (malformed) circuits.
    fn find_floating(&self) -> Vec<GateId> {
        let mut floating = BTreeSet::new();
        let mut queue: VecDeque<GateId> = self
            .gates()
            .filter(|gate| gate.is_floating_placeholder())
            .map(|gate| gate.get_id())
            .collect();

        while let Some(id) = queue.pop_front() {
            let Some(gate) = self.gate(id) else {
                continue;
            };
            for fanout in gate.get_fanouts() {
                let fanout_id = fanout.get_id();
                let depends = self
                    .gate(fanout_id)
                    .is_some_and(|g| g.is_and() || g.is_output());
                if depends && floating.insert(fanout_id) {
                    queue.push_back(fanout_id);
                }
            }
        }

        floating.into_iter().collect()
    }
}

#[cfg(test)]
mod test {
    use crate::Circuit;

    #[test]
    fn no_defect_test() {
        let circuit = Circuit::from_ascii("aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n".as_bytes()).unwrap();
        assert!(circuit.get_floating().is_empty());
        assert!(circuit.get_unused().is_empty());
    }

    #[test]
    fn floating_test() {
        // Gate 2 is never defined: 3 uses it directly, 4 and the output 6 through 3
        let text = "aag 5 1 0 1 2\n2\n8\n6 2 5\n8 6 2\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(circuit.get_floating(), &[3, 4, 6]);
        assert!(circuit.get_unused().is_empty());
    }

    #[test]
    fn floating_both_fanins_listed_once_test() {
        let text = "aag 3 0 0 1 1\n6\n6 2 4\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(circuit.get_floating(), &[3, 4]);
    }

    #[test]
    fn floating_output_test() {
        let circuit = Circuit::from_ascii("aag 1 0 0 1 0\n3\n".as_bytes()).unwrap();
        assert_eq!(circuit.get_floating(), &[2]);
    }

    #[test]
    fn unused_test() {
        // Input 2 and AND gate 4 have no fanout, output 6 never counts
        let text = "aag 5 3 0 1 2\n2\n4\n6\n10\n10 2 6\n8 10 2\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(circuit.get_unused(), &[2, 4]);
        assert!(circuit.get_floating().is_empty());
    }
}
