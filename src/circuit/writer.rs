//! Writing a circuit back to the ASCII AIGER format.

use std::io::Write;

use super::{Circuit, CircuitError, Result};

impl Circuit {
    /// The circuit in AAG format.
    ///
    /// Only the AND gates reachable from the outputs are written, in DFS order, and the
    /// header counts them. Inputs and outputs are all kept, latches and comment are dropped.
    pub fn to_aag(&self) -> String {
        let ands: Vec<_> = self
            .dfs_order()
            .into_iter()
            .filter(|gate| gate.is_and())
            .collect();

        let mut s = format!(
            "aag {} {} 0 {} {}\n",
            self.header.m,
            self.inputs.len(),
            self.outputs.len(),
            ands.len()
        );

        for &id in &self.inputs {
            s.push_str(&format!("{}\n", 2 * id));
        }
        for gate in self.outputs.iter().filter_map(|&id| self.gate(id)) {
            if let Some(fanin) = gate.get_fanins().first() {
                s.push_str(&format!("{}\n", fanin.to_literal()));
            }
        }
        for gate in &ands {
            s.push_str(&(2 * gate.get_id()).to_string());
            for fanin in gate.get_fanins() {
                s.push_str(&format!(" {}", fanin.to_literal()));
            }
            s.push('\n');
        }

        for (kind, ids) in [('i', &self.inputs), ('o', &self.outputs)] {
            for (idx, gate) in ids.iter().filter_map(|&id| self.gate(id)).enumerate() {
                if let Some(symbol) = gate.get_symbol() {
                    s.push_str(&format!("{}{} {}\n", kind, idx, symbol));
                }
            }
        }
        s
    }

    /// Writes the circuit in AAG format, see [`to_aag`](Circuit::to_aag).
    pub fn write_aag<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer
            .write_all(self.to_aag().as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| CircuitError::Io(e.to_string()))
    }
}
