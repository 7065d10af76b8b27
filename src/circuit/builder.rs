//! Second pass of a read: turning the pending fanin literals into edges.

use super::{Circuit, Gate, GateId, GateRef, Result, parser::PendingFanins};

impl Circuit {
    /// Connects every pending fanin, in order, then sorts fanouts by id.
    ///
    /// Gates used as a fanin but never defined get an undefined placeholder,
    /// so that every edge points at an existing gate.
    pub(super) fn connect(&mut self, pending: &[PendingFanins]) -> Result<()> {
        for gate in pending {
            let id = gate.gate_id();
            for fanin in gate.fanins() {
                self.link(id, fanin)?;
            }
        }

        // Deterministic fanout order, independent of the file layout.
        // Outputs have no fanout so only ids up to M are concerned.
        let last = self.header.m as usize;
        for gate in self.gates.iter_mut().take(last + 1).flatten() {
            gate.fanouts.sort_by_key(|fanout| fanout.get_id());
        }

        Ok(())
    }

    /// Adds `fanin` to the fanins of gate `id`, and `id` to the fanouts of the fanin.
    fn link(&mut self, id: GateId, fanin: GateRef) -> Result<()> {
        let target = fanin.get_id();
        if self.gate(target).is_none() {
            log::debug!("gate {} is used by gate {} but never defined", target, id);
            if let Some(slot) = self.gates.get_mut(target as usize) {
                *slot = Some(Gate::undefined(target));
            }
        }

        self.gate_mut(id)?.add_fanin(fanin);
        self.gate_mut(target)?
            .add_fanout(GateRef::new(id, fanin.is_inverted()));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Circuit, GateKind, GateRef};

    #[test]
    fn connect_test() {
        let circuit = Circuit::from_ascii("aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n".as_bytes()).unwrap();

        let output = circuit.get_gate(4).unwrap();
        assert_eq!(output.get_fanins(), &[GateRef::new(3, true)]);

        let and = circuit.get_gate(3).unwrap();
        assert_eq!(
            and.get_fanins(),
            &[GateRef::new(1, false), GateRef::new(2, true)]
        );
        assert_eq!(and.get_fanouts(), &[GateRef::new(4, true)]);

        // Fanouts carry the inversion of the edge
        let input = circuit.get_gate(2).unwrap();
        assert_eq!(input.get_fanouts(), &[GateRef::new(3, true)]);
    }

    #[test]
    fn undefined_placeholder_test() {
        let circuit = Circuit::from_ascii("aag 4 1 0 2 1\n2\n6\n9\n6 2 4\n".as_bytes()).unwrap();

        // 4 (gate 2) is used by the AND gate, 9 (gate 4) by the second output
        for id in [2, 4] {
            let gate = circuit.get_gate(id).unwrap();
            assert_eq!(gate.kind(), GateKind::Undefined);
            assert_eq!(gate.get_line(), 0);
            assert!(gate.get_fanins().is_empty());
        }
        assert_eq!(
            circuit.get_gate(2).unwrap().get_fanouts(),
            &[GateRef::new(3, false)]
        );
        assert_eq!(
            circuit.get_gate(4).unwrap().get_fanouts(),
            &[GateRef::new(6, true)]
        );
        assert_eq!(circuit.gates().filter(|g| g.is_floating_placeholder()).count(), 2);
    }

    #[test]
    fn sorted_fanouts_test() {
        // Input 1 is used by 5 first, then twice by 3 and twice by 4
        let text = "aag 5 1 0 1 3\n2\n10\n10 2 8\n6 3 2\n8 2 3\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(
            circuit.get_gate(1).unwrap().get_fanouts(),
            &[
                GateRef::new(3, true),
                GateRef::new(3, false),
                GateRef::new(4, false),
                GateRef::new(4, true),
                GateRef::new(5, false),
            ]
        );
    }

    #[test]
    fn sorted_fanouts_last_variable_test() {
        // Gate 3 = M is used by output 4 first, then by AND gate 2
        let text = "aag 3 1 0 1 2\n2\n6\n6 2 2\n4 6 2\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(
            circuit.get_gate(3).unwrap().get_fanouts(),
            &[GateRef::new(2, false), GateRef::new(4, false)]
        );
    }

    #[test]
    fn constant_fanin_test() {
        let circuit = Circuit::from_ascii("aag 1 0 0 2 0\n0\n1\n".as_bytes()).unwrap();
        let constant = circuit.get_gate(0).unwrap();
        assert!(constant.is_const());
        assert_eq!(
            constant.get_fanouts(),
            &[GateRef::new(2, false), GateRef::new(3, true)]
        );
    }
}
