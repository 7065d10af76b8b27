use std::collections::HashMap;

use super::{Circuit, CircuitError, Gate, GateId, GateRef, Result};

/// An edge seen from both ends: driver, user and inversion.
type EdgeKey = (GateId, GateId, bool);

impl Circuit {
    /// Checking if the circuit structure is correct.
    ///
    /// This is run at the end of every read, the library is then supposed to maintain
    /// integrity of the circuit at any moment. It checks that:
    /// - every slot of the gate table holds the gate with that id
    /// - only the constant gate has id 0
    /// - every gate has as many fanins as its kind requires
    /// - every edge points at an existing gate
    /// - fanins and fanouts mirror each other.
    pub fn check_integrity(&self) -> Result<()> {
        // +1 for each fanin, -1 for each fanout: mirrored lists cancel out
        let mut edges: HashMap<EdgeKey, isize> = HashMap::new();

        for (idx, slot) in self.gates.iter().enumerate() {
            if let Some(gate) = slot {
                if gate.get_id() != idx as u64 {
                    return Err(CircuitError::InvalidState(format!(
                        "gate {} is stored at index {}",
                        gate.get_id(),
                        idx
                    )));
                }
                self.check_gate_integrity(gate, &mut edges)?;
            }
        }

        if let Some(((driver, user, _), _)) = edges.into_iter().find(|&(_, count)| count != 0) {
            return Err(CircuitError::InvalidState(format!(
                "edge from gate {} to gate {} is not listed on both sides",
                driver, user
            )));
        }

        if let Some(gate) = self.gate(0) {
            if !gate.is_const() {
                return Err(CircuitError::InvalidState(
                    "id=0 is for the constant gate only".to_string(),
                ));
            }
        }

        // Checking that all outputs are registered as gates
        for &id in &self.outputs {
            if !self.gate(id).is_some_and(|gate| gate.is_output()) {
                return Err(CircuitError::InvalidState(format!(
                    "output {} is not an output gate of the circuit",
                    id
                )));
            }
        }

        Ok(())
    }

    /// Check the integrity for an individual gate: arity, and edges in both directions.
    fn check_gate_integrity(&self, gate: &Gate, edges: &mut HashMap<EdgeKey, isize>) -> Result<()> {
        let arity = gate.kind().arity();
        if gate.get_fanins().len() != arity {
            return Err(CircuitError::InvalidState(format!(
                "{} gate {} has {} fanins, expected {}",
                gate.type_label(),
                gate.get_id(),
                gate.get_fanins().len(),
                arity
            )));
        }
        if gate.is_output() && !gate.get_fanouts().is_empty() {
            return Err(CircuitError::InvalidState(format!(
                "output {} has fanouts",
                gate.get_id()
            )));
        }

        for fanin in gate.get_fanins() {
            self.check_edge_target(gate, fanin)?;
            *edges
                .entry((fanin.get_id(), gate.get_id(), fanin.is_inverted()))
                .or_default() += 1;
        }
        for fanout in gate.get_fanouts() {
            self.check_edge_target(gate, fanout)?;
            *edges
                .entry((gate.get_id(), fanout.get_id(), fanout.is_inverted()))
                .or_default() -= 1;
        }
        Ok(())
    }

    /// `edge` must point at an existing gate.
    fn check_edge_target(&self, gate: &Gate, edge: &GateRef) -> Result<()> {
        if self.gate(edge.get_id()).is_none() {
            return Err(CircuitError::InvalidState(format!(
                "gate {} has an edge pointing at gate {} which is not in the circuit",
                gate.get_id(),
                edge.get_id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Circuit, CircuitError, GateRef};

    #[test]
    fn read_circuit_integrity_test() {
        let text = "aag 5 1 0 1 2\n2\n8\n6 2 5\n8 6 2\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert!(circuit.check_integrity().is_ok());
        assert!(Circuit::new().check_integrity().is_ok());
    }

    #[test]
    fn broken_edge_test() {
        let mut circuit = Circuit::from_ascii("aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n".as_bytes()).unwrap();
        circuit
            .gate_mut(1)
            .unwrap()
            .fanouts
            .push(GateRef::new(4, false));
        assert!(matches!(
            circuit.check_integrity(),
            Err(CircuitError::InvalidState(_))
        ));
    }

    #[test]
    fn duplicated_fanout_test() {
        // Gate 1 feeds gate 3 once, but lists it twice
        let mut circuit = Circuit::from_ascii("aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n".as_bytes()).unwrap();
        circuit
            .gate_mut(1)
            .unwrap()
            .fanouts
            .push(GateRef::new(3, false));
        assert!(circuit.check_integrity().is_err());
    }

    #[test]
    fn dangling_edge_test() {
        let mut circuit = Circuit::from_ascii("aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n".as_bytes()).unwrap();
        circuit.gate_mut(3).unwrap().fanins[0] = GateRef::new(7, false);
        assert!(matches!(
            circuit.check_integrity(),
            Err(CircuitError::InvalidState(_))
        ));
    }

    #[test]
    fn large_fanout_test() {
        // One input feeding every AND gate, twice
        let n = 50_000;
        let mut text = format!("aag {} 1 0 1 {}\n2\n{}\n", n + 1, n, 2 * (n + 1));
        for k in 2..=n + 1 {
            text.push_str(&format!("{} 2 2\n", 2 * k));
        }
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(circuit.get_gate(1).unwrap().get_fanouts().len(), 2 * n as usize);
        assert!(circuit.check_integrity().is_ok());
    }

    #[test]
    fn broken_arity_test() {
        let mut circuit = Circuit::from_ascii("aag 3 2 0 1 1\n2\n4\n7\n6 2 5\n".as_bytes()).unwrap();
        circuit.gate_mut(3).unwrap().fanins.pop();
        assert!(circuit.check_integrity().is_err());
    }
}
