//! Textual reports on a circuit and on its gates.
//!
//! Every report is built as a [`String`], the `print_*` methods write it to stdout.

use super::{Circuit, Gate, GateHandle, GateId, GateRef};

/// Space separated ids, each preceded by a space.
fn id_list(ids: &[GateId]) -> String {
    ids.iter().map(|id| format!(" {}", id)).collect()
}

impl Circuit {
    /// Number of inputs, outputs and AND gates.
    pub fn summary_report(&self) -> String {
        let width = self.style.get_count_width();
        let (pi, po, aig) = (self.inputs.len(), self.outputs.len(), self.ands.len());

        let mut s = String::from("\nCircuit Statistics\n==================\n");
        s.push_str(&format!("  PI   {:>width$}\n", pi));
        s.push_str(&format!("  PO   {:>width$}\n", po));
        s.push_str(&format!("  AIG  {:>width$}\n", aig));
        s.push_str("------------------\n");
        s.push_str(&format!("  Total{:>width$}\n", pi + po + aig));
        s
    }

    /// One line per gate reachable from the outputs, in DFS order.
    ///
    /// Fanins are prefixed with `*` when undefined and `!` when inverted.
    pub fn netlist_report(&self) -> String {
        let width = self.style.get_label_width();
        let mut s = String::from("\n");
        for (idx, gate) in self.dfs_order().into_iter().enumerate() {
            s.push_str(&format!("[{}] {:<width$}{}", idx, gate.type_label(), gate.get_id()));
            for fanin in gate.get_fanins() {
                s.push(' ');
                if self
                    .gate(fanin.get_id())
                    .is_some_and(|g| g.is_floating_placeholder())
                {
                    s.push('*');
                }
                if fanin.is_inverted() {
                    s.push('!');
                }
                s.push_str(&fanin.get_id().to_string());
            }
            if let Some(symbol) = gate.get_symbol() {
                s.push_str(&format!(" ({})", symbol));
            }
            s.push('\n');
        }
        s
    }

    pub fn pi_report(&self) -> String {
        format!("PIs of the circuit:{}\n", id_list(&self.inputs))
    }

    pub fn po_report(&self) -> String {
        format!("POs of the circuit:{}\n", id_list(&self.outputs))
    }

    /// Floating and unused gates, empty if the circuit has no defect.
    pub fn float_gates_report(&self) -> String {
        let mut s = String::new();
        if !self.floating.is_empty() {
            s.push_str(&format!(
                "Gates with floating fanin(s):{}\n",
                id_list(&self.floating)
            ));
        }
        if !self.unused.is_empty() {
            s.push_str(&format!(
                "Gates defined but not used  :{}\n",
                id_list(&self.unused)
            ));
        }
        s
    }

    pub fn print_summary(&self) {
        print!("{}", self.summary_report());
    }

    pub fn print_netlist(&self) {
        print!("{}", self.netlist_report());
    }

    pub fn print_pis(&self) {
        print!("{}", self.pi_report());
    }

    pub fn print_pos(&self) {
        print!("{}", self.po_report());
    }

    pub fn print_float_gates(&self) {
        print!("{}", self.float_gates_report());
    }
}

/// Which side of the gates a cone report follows.
#[derive(Clone, Copy)]
enum Direction {
    Fanin,
    Fanout,
}

impl Direction {
    fn edges(self, gate: &Gate) -> &[GateRef] {
        match self {
            Direction::Fanin => gate.get_fanins(),
            Direction::Fanout => gate.get_fanouts(),
        }
    }
}

impl<'a> GateHandle<'a> {
    /// A framed summary of the gate: type, id, symbol and line of definition.
    pub fn report_gate(&self) -> String {
        let width = self.circuit.style.get_banner_width();
        let frame = "=".repeat(width);

        let mut content = format!("= {}({})", self.type_label(), self.get_id());
        if let Some(symbol) = self.get_symbol() {
            content.push_str(&format!("\"{}\"", symbol));
        }
        content.push_str(&format!(", line {}", self.get_line()));

        // Content too long for the frame is not closed
        let inner = width.saturating_sub(1);
        if content.chars().count() < inner {
            format!("{}\n{:<inner$}=\n{}\n", frame, content, frame)
        } else {
            format!("{}\n{}\n{}\n", frame, content, frame)
        }
    }

    /// The fanin cone of the gate, up to `level` edges away.
    ///
    /// A gate whose cone was already printed is marked with `(*)` and not expanded again.
    pub fn report_fanin(&self, level: usize) -> String {
        self.report_cone(Direction::Fanin, level)
    }

    /// The fanout cone of the gate, up to `level` edges away.
    ///
    /// A gate whose cone was already printed is marked with `(*)` and not expanded again.
    pub fn report_fanout(&self, level: usize) -> String {
        self.report_cone(Direction::Fanout, level)
    }

    pub fn print_gate(&self) {
        print!("{}", self.report_gate());
    }

    pub fn print_fanin(&self, level: usize) {
        print!("{}", self.report_fanin(level));
    }

    pub fn print_fanout(&self, level: usize) {
        print!("{}", self.report_fanout(level));
    }

    fn report_cone(&self, direction: Direction, level: usize) -> String {
        let generation = self.circuit.raise_marker();
        let mut s = String::new();
        self.circuit
            .write_cone(&mut s, self.gate, direction, level, 0, false, generation);
        s
    }
}

impl Circuit {
    #[allow(clippy::too_many_arguments)]
    fn write_cone(
        &self,
        s: &mut String,
        gate: &Gate,
        direction: Direction,
        level: usize,
        indent: usize,
        inverted: bool,
        generation: u64,
    ) {
        let edges = direction.edges(gate);

        s.push_str(&" ".repeat(indent));
        if inverted {
            s.push('!');
        }
        s.push_str(&format!("{} {}", gate.type_label(), gate.get_id()));

        let already_printed = gate.is_marked(generation);
        if already_printed && !edges.is_empty() && level > 0 {
            s.push_str(" (*)");
        }
        s.push('\n');

        if level == 0 || already_printed {
            return;
        }
        gate.mark(generation);
        for edge in edges {
            if let Some(next) = self.gate(edge.get_id()) {
                self.write_cone(
                    s,
                    next,
                    direction,
                    level - 1,
                    indent + self.style.get_indent(),
                    edge.is_inverted(),
                    generation,
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{Circuit, style::ReportStyle};

    const HALF_ADDER: &str = "aag 7 2 0 2 3\n2\n4\n6\n12\n6 13 15\n12 2 4\n14 3 5\ni0 x\ni1 y\no0 s\no1 c\nc\nhalf adder\n";

    #[test]
    fn summary_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        assert_eq!(
            circuit.summary_report(),
            "\nCircuit Statistics\n\
             ==================\n\
             \x20 PI           2\n\
             \x20 PO           2\n\
             \x20 AIG          3\n\
             ------------------\n\
             \x20 Total        7\n"
        );
    }

    #[test]
    fn summary_floating_test() {
        // Gate 2 is used but never defined
        let text = "aag 3 1 0 1 1\n2\n7\n6 2 5\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert!(circuit.summary_report().ends_with("  Total        3\n"));
        assert_eq!(
            circuit.float_gates_report(),
            "Gates with floating fanin(s): 3 4\n"
        );
    }

    #[test]
    fn netlist_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        assert_eq!(
            circuit.netlist_report(),
            "\n\
             [0] PI  1 (x)\n\
             [1] PI  2 (y)\n\
             [2] AIG 6 1 2\n\
             [3] AIG 7 !1 !2\n\
             [4] AIG 3 !6 !7\n\
             [5] PO  8 3 (s)\n\
             [6] PO  9 6 (c)\n"
        );
    }

    #[test]
    fn netlist_floating_and_const_test() {
        let text = "aag 4 1 0 1 2\n2\n7\n4 2 0\n6 4 9\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(
            circuit.netlist_report(),
            "\n\
             [0] PI  1\n\
             [1] CONST0\n\
             [2] AIG 2 1 0\n\
             [3] AIG 3 2 *!4\n\
             [4] PO  5 !3\n"
        );
    }

    #[test]
    fn pi_po_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        assert_eq!(circuit.pi_report(), "PIs of the circuit: 1 2\n");
        assert_eq!(circuit.po_report(), "POs of the circuit: 8 9\n");
        assert_eq!(Circuit::new().pi_report(), "PIs of the circuit:\n");
    }

    #[test]
    fn float_gates_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        assert_eq!(circuit.float_gates_report(), "");

        let text = "aag 5 2 0 1 2\n2\n4\n8\n6 2 10\n8 6 2\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(
            circuit.float_gates_report(),
            "Gates with floating fanin(s): 3 4 6\n\
             Gates defined but not used  : 2\n"
        );
    }

    #[test]
    fn report_gate_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        let frame = "=".repeat(50);
        assert_eq!(
            circuit.get_gate(8).unwrap().report_gate(),
            format!("{frame}\n= PO(8)\"s\", line 4{}=\n{frame}\n", " ".repeat(31))
        );
        assert_eq!(
            circuit.get_gate(3).unwrap().report_gate(),
            format!("{frame}\n= AIG(3), line 6{}=\n{frame}\n", " ".repeat(33))
        );
        assert_eq!(
            circuit.get_gate(0).unwrap().report_gate(),
            format!("{frame}\n= CONST(0), line 0{}=\n{frame}\n", " ".repeat(31))
        );
    }

    #[test]
    fn report_gate_long_symbol_test() {
        let symbol = "a".repeat(32);
        let text = format!("aag 1 1 0 0 0\n2\ni0 {}\n", symbol);
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        let frame = "=".repeat(50);
        assert_eq!(
            circuit.get_gate(1).unwrap().report_gate(),
            format!("{frame}\n= PI(1)\"{symbol}\", line 2\n{frame}\n")
        );

        // One character short of the frame is still closed
        let symbol = "a".repeat(31);
        let text = format!("aag 1 1 0 0 0\n2\ni0 {}\n", symbol);
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(
            circuit.get_gate(1).unwrap().report_gate(),
            format!("{frame}\n= PI(1)\"{symbol}\", line 2 =\n{frame}\n")
        );
    }

    #[test]
    fn report_fanin_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        let po = circuit.get_gate(8).unwrap();
        assert_eq!(po.report_fanin(0), "PO 8\n");
        assert_eq!(po.report_fanin(1), "PO 8\n  AIG 3\n");
        assert_eq!(
            po.report_fanin(3),
            "PO 8\n\
             \x20 AIG 3\n\
             \x20   !AIG 6\n\
             \x20     PI 1\n\
             \x20     PI 2\n\
             \x20   !AIG 7\n\
             \x20     !PI 1\n\
             \x20     !PI 2\n"
        );
    }

    #[test]
    fn report_fanin_already_printed_test() {
        // 3 is reached twice through 4
        let text = "aag 4 1 0 1 2\n2\n8\n6 2 3\n8 6 7\n";
        let circuit = Circuit::from_ascii(text.as_bytes()).unwrap();
        assert_eq!(
            circuit.get_gate(4).unwrap().report_fanin(2),
            "AIG 4\n\
             \x20 AIG 3\n\
             \x20   PI 1\n\
             \x20   !PI 1\n\
             \x20 !AIG 3 (*)\n"
        );
    }

    #[test]
    fn report_fanout_test() {
        let circuit = Circuit::from_ascii(HALF_ADDER.as_bytes()).unwrap();
        assert_eq!(
            circuit.get_gate(1).unwrap().report_fanout(2),
            "PI 1\n\
             \x20 AIG 6\n\
             \x20   !AIG 3\n\
             \x20   PO 9\n\
             \x20 !AIG 7\n\
             \x20   !AIG 3\n"
        );
    }

    #[test]
    fn report_style_test() {
        let style = ReportStyle::default()
            .indent(4)
            .banner_width(20)
            .label_width(6)
            .count_width(3);
        let mut circuit = Circuit::with_style(style);
        circuit.read_from(HALF_ADDER.as_bytes()).unwrap();

        assert!(circuit.summary_report().contains("  PI     2\n"));
        assert!(circuit.netlist_report().contains("[2] AIG   6 1 2\n"));
        assert_eq!(
            circuit.get_gate(9).unwrap().report_fanin(1),
            "PO 9\n    AIG 6\n"
        );
        assert_eq!(
            circuit.get_gate(3).unwrap().report_gate(),
            "====================\n= AIG(3), line 6   =\n====================\n"
        );
    }
}
