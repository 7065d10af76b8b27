//! Layout parameters of the textual reports.
//!
//! ```rust
//! use aagcir::Circuit;
//! use aagcir::style::ReportStyle;
//!
//! let style = ReportStyle::default().indent(4).banner_width(60);
//! let mut circuit = Circuit::with_style(style);
//! circuit.read_circuit("assets/circuits/half-adder.aag").unwrap();
//! println!("{}", circuit.get_gate(3).unwrap().report_fanin(2));
//! ```

// Defining default layout.
const DEFAULT_INDENT: usize = 2;
const DEFAULT_BANNER_WIDTH: usize = 50;
const DEFAULT_LABEL_WIDTH: usize = 4;
const DEFAULT_COUNT_WIDTH: usize = 9;

/// Parameters for report rendering.
///
/// - `indent`: indentation added per level of a fanin/fanout report
/// - `banner_width`: width of the `=` frame of a gate report
/// - `label_width`: column taken by the type label in the netlist
/// - `count_width`: right-aligned column of the summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    indent: usize,
    banner_width: usize,
    label_width: usize,
    count_width: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        ReportStyle {
            indent: DEFAULT_INDENT,
            banner_width: DEFAULT_BANNER_WIDTH,
            label_width: DEFAULT_LABEL_WIDTH,
            count_width: DEFAULT_COUNT_WIDTH,
        }
    }
}

impl ReportStyle {
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn banner_width(mut self, banner_width: usize) -> Self {
        self.banner_width = banner_width;
        self
    }

    pub fn label_width(mut self, label_width: usize) -> Self {
        self.label_width = label_width;
        self
    }

    pub fn count_width(mut self, count_width: usize) -> Self {
        self.count_width = count_width;
        self
    }

    pub fn get_indent(&self) -> usize {
        self.indent
    }

    pub fn get_banner_width(&self) -> usize {
        self.banner_width
    }

    pub fn get_label_width(&self) -> usize {
        self.label_width
    }

    pub fn get_count_width(&self) -> usize {
        self.count_width
    }
}
