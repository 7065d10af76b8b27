//! Parser for the ASCII AIGER format.
//!
//! The parser only defines gates (constant, inputs, outputs and AND gates) and records
//! the literals of their fanins. Connecting them is done afterwards by the builder.

use super::{
    Gate, GateId, GateRef, Header, Literal,
    error::{ParseError, ParseErrorKind},
};

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Fanin literals of a gate, waiting for every gate to be defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PendingFanins {
    Output { id: GateId, fanin: Literal },
    And { id: GateId, fanins: [Literal; 2] },
}

/// Everything read from an AAG file, not connected yet.
#[derive(Debug)]
pub(super) struct ParsedAag {
    pub(super) header: Header,
    /// Indexed by gate id, `M + O + 1` slots.
    pub(super) gates: Vec<Option<Gate>>,
    pub(super) inputs: Vec<GateId>,
    pub(super) latches: Vec<(Literal, Literal)>,
    pub(super) outputs: Vec<GateId>,
    pub(super) ands: Vec<GateId>,
    /// Outputs first, then AND gates, in declaration order.
    pub(super) pending: Vec<PendingFanins>,
    pub(super) comment: String,
}

/// Hands out the lines of the text one by one, keeping track of the line number.
struct Source<'a> {
    text: &'a str,
    offset: usize,
    lineno: usize,
}

impl<'a> Source<'a> {
    fn new(text: &'a str) -> Self {
        Source {
            text,
            offset: 0,
            lineno: 0,
        }
    }

    /// Returns the next line (without its `\n`) and its 1-based number.
    fn next_line(&mut self) -> Option<Scanner<'a>> {
        if self.offset >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.offset..];
        let (line, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.offset += consumed;
        self.lineno += 1;
        Some(Scanner::new(line, self.lineno))
    }

    /// Line number the next line would get.
    fn upcoming_lineno(&self) -> usize {
        self.lineno + 1
    }

    /// Everything left, verbatim.
    fn remainder(&mut self) -> &'a str {
        let rest = &self.text[self.offset..];
        self.offset = self.text.len();
        rest
    }
}

/// Token reader over a single line.
///
/// Tokens are separated by exactly one space, and nothing may follow the last one.
struct Scanner<'a> {
    line: &'a str,
    lineno: usize,
    /// Byte offset of the next character.
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str, lineno: usize) -> Self {
        Scanner {
            line,
            lineno,
            pos: 0,
        }
    }

    /// 1-based column of the next character.
    fn column(&self) -> usize {
        self.pos + 1
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::at(self.lineno, self.column(), kind)
    }

    fn error_at(&self, column: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::at(self.lineno, column, kind)
    }

    fn line_error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::on_line(self.lineno, kind)
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// A token must start right here.
    fn check_token_start(&self, missing: ParseErrorKind) -> ParseResult<()> {
        match self.peek() {
            None => Err(self.error(missing)),
            Some(' ') => Err(self.error(ParseErrorKind::ExtraSpace)),
            Some(c) if c.is_whitespace() => {
                Err(self.error(ParseErrorKind::IllegalWhitespace(c as u32)))
            }
            Some(_) => Ok(()),
        }
    }

    /// Reads up to the next white space, returns the token and its column.
    fn read_token(&mut self) -> (&'a str, usize) {
        let column = self.column();
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        (&rest[..end], column)
    }

    /// Reads an unsigned number, `what` describes it in error messages.
    fn read_number(&mut self, what: &str) -> ParseResult<(u64, usize)> {
        self.check_token_start(ParseErrorKind::MissingNumber(what.to_string()))?;
        let (token, column) = self.read_token();
        let value = token.parse::<u64>().map_err(|_| {
            self.line_error(ParseErrorKind::IllegalNumber(format!("{}({})", what, token)))
        })?;
        Ok((value, column))
    }

    fn read_space(&mut self) -> ParseResult<()> {
        match self.peek() {
            Some(' ') => {
                self.bump(' ');
                Ok(())
            }
            Some(c) if c.is_whitespace() => {
                Err(self.error(ParseErrorKind::IllegalWhitespace(c as u32)))
            }
            _ => Err(self.error(ParseErrorKind::MissingSpace)),
        }
    }

    fn read_newline(&self) -> ParseResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(c) if c.is_whitespace() && c != ' ' => {
                Err(self.error(ParseErrorKind::IllegalWhitespace(c as u32)))
            }
            Some(_) => Err(self.error(ParseErrorKind::MissingNewline)),
        }
    }
}

fn read_header(source: &mut Source) -> ParseResult<Header> {
    let mut scanner = source.next_line().ok_or(ParseError::at(
        1,
        1,
        ParseErrorKind::MissingIdentifier("aag".to_string()),
    ))?;

    scanner.check_token_start(ParseErrorKind::MissingIdentifier("aag".to_string()))?;
    // Then tabs anywhere on the line
    if let Some((pos, c)) = scanner
        .line
        .char_indices()
        .find(|&(_, c)| c.is_whitespace() && c != ' ')
    {
        return Err(scanner.error_at(pos + 1, ParseErrorKind::IllegalWhitespace(c as u32)));
    }

    let (keyword, _) = scanner.read_token();
    if keyword != "aag" {
        return Err(scanner.line_error(ParseErrorKind::IllegalIdentifier(keyword.to_string())));
    }

    let mut numbers = [0; 5];
    for (number, what) in numbers.iter_mut().zip([
        "number of variables",
        "number of PIs",
        "number of latches",
        "number of POs",
        "number of AIGs",
    ]) {
        scanner.read_space()?;
        (*number, _) = scanner.read_number(what)?;
    }
    scanner.read_newline()?;

    let [m, i, l, o, a] = numbers;
    if m < i.saturating_add(a) {
        return Err(scanner.line_error(ParseErrorKind::NumberTooSmall {
            what: "Number of variables".to_string(),
            value: m,
        }));
    }
    // Gate ids must fit on 32 bits
    if m.saturating_add(o) >= u64::from(u32::MAX) {
        return Err(scanner.line_error(ParseErrorKind::NumberTooBig {
            what: "Number of variables".to_string(),
            value: m,
        }));
    }

    Ok(Header { m, i, l, o, a })
}

/// Parsing state shared by the different sections.
struct AagParser<'a> {
    source: Source<'a>,
    header: Header,
    gates: Vec<Option<Gate>>,
    inputs: Vec<GateId>,
    latches: Vec<(Literal, Literal)>,
    outputs: Vec<GateId>,
    ands: Vec<GateId>,
    pending: Vec<PendingFanins>,
    comment: String,
}

impl<'a> AagParser<'a> {
    fn max_literal(&self) -> Literal {
        2 * self.header.m + 1
    }

    fn next_definition(&mut self, section: &str) -> ParseResult<Scanner<'a>> {
        let lineno = self.source.upcoming_lineno();
        self.source.next_line().ok_or(ParseError::on_line(
            lineno,
            ParseErrorKind::MissingDefinition(section.to_string()),
        ))
    }

    fn check_max_literal(&self, scanner: &Scanner, lit: Literal, column: usize) -> ParseResult<()> {
        if lit > self.max_literal() {
            return Err(scanner.error_at(column, ParseErrorKind::MaxLiteralId(lit)));
        }
        Ok(())
    }

    /// Checks for a literal defining a new PI or AND gate.
    fn check_definition(
        &self,
        scanner: &Scanner,
        lit: Literal,
        column: usize,
        what: &str,
    ) -> ParseResult<()> {
        self.check_max_literal(scanner, lit, column)?;
        if lit < 2 {
            return Err(scanner.error_at(column, ParseErrorKind::RedefinedConst(lit)));
        }
        if lit & 1 == 1 {
            return Err(scanner.error_at(
                column,
                ParseErrorKind::CannotInvert {
                    what: what.to_string(),
                    literal: lit,
                },
            ));
        }
        if let Some(previous) = &self.gates[(lit >> 1) as usize] {
            return Err(scanner.line_error(ParseErrorKind::RedefinedGate {
                literal: lit,
                previous: previous.type_label(),
                line: previous.get_line(),
            }));
        }
        Ok(())
    }

    fn read_inputs(&mut self) -> ParseResult<()> {
        for _ in 0..self.header.i {
            let mut scanner = self.next_definition("PI")?;
            let (lit, column) = scanner.read_number("PI literal ID")?;
            self.check_definition(&scanner, lit, column, "PI")?;
            scanner.read_newline()?;

            let id = lit >> 1;
            self.gates[id as usize] = Some(Gate::input(id, scanner.lineno));
            self.inputs.push(id);
        }
        log::debug!("read {} inputs", self.inputs.len());
        Ok(())
    }

    /// Latches are only checked, never wired.
    fn read_latches(&mut self) -> ParseResult<()> {
        for _ in 0..self.header.l {
            let mut scanner = self.next_definition("latch")?;
            let (current, column) = scanner.read_number("latch literal ID")?;
            self.check_max_literal(&scanner, current, column)?;
            scanner.read_space()?;
            let (next, column) = scanner.read_number("latch literal ID")?;
            self.check_max_literal(&scanner, next, column)?;
            scanner.read_newline()?;

            self.latches.push((current, next));
        }
        if !self.latches.is_empty() {
            log::debug!("read {} latches (not wired)", self.latches.len());
        }
        Ok(())
    }

    fn read_outputs(&mut self) -> ParseResult<()> {
        for k in 0..self.header.o {
            let mut scanner = self.next_definition("PO")?;
            let (lit, column) = scanner.read_number("PO literal ID")?;
            self.check_max_literal(&scanner, lit, column)?;
            scanner.read_newline()?;

            let id = self.header.m + k + 1;
            self.gates[id as usize] = Some(Gate::output(id, scanner.lineno));
            self.outputs.push(id);
            self.pending.push(PendingFanins::Output { id, fanin: lit });
        }
        log::debug!("read {} outputs", self.outputs.len());
        Ok(())
    }

    fn read_ands(&mut self) -> ParseResult<()> {
        for _ in 0..self.header.a {
            let mut scanner = self.next_definition("AIG")?;
            let (lit, column) = scanner.read_number("AIG literal ID")?;
            self.check_definition(&scanner, lit, column, "AIG gate")?;

            let mut fanins = [0; 2];
            for fanin in &mut fanins {
                scanner.read_space()?;
                let (fanin_lit, column) = scanner.read_number("AIG input literal ID")?;
                self.check_max_literal(&scanner, fanin_lit, column)?;
                *fanin = fanin_lit;
            }
            scanner.read_newline()?;

            let id = lit >> 1;
            self.gates[id as usize] = Some(Gate::and(id, scanner.lineno));
            self.ands.push(id);
            self.pending.push(PendingFanins::And { id, fanins });
        }
        log::debug!("read {} AND gates", self.ands.len());
        Ok(())
    }

    /// Reads the optional symbol table and comment, until the end of the text.
    fn read_symbols(&mut self) -> ParseResult<()> {
        while let Some(mut scanner) = self.source.next_line() {
            let kind = match scanner.peek() {
                Some('c') => {
                    scanner.bump('c');
                    scanner.read_newline()?;
                    self.comment = self.source.remainder().to_string();
                    return Ok(());
                }
                Some(kind @ ('i' | 'o')) => {
                    scanner.bump(kind);
                    kind
                }
                Some(' ') => return Err(scanner.error(ParseErrorKind::ExtraSpace)),
                Some(c) if c.is_whitespace() => {
                    return Err(scanner.error(ParseErrorKind::IllegalWhitespace(c as u32)));
                }
                Some(c) => {
                    return Err(scanner.error(ParseErrorKind::IllegalSymbolType(c.to_string())));
                }
                None => {
                    return Err(scanner
                        .line_error(ParseErrorKind::MissingDefinition("symbol".to_string())));
                }
            };

            let (index, column) = scanner.read_number("symbol index")?;
            let id = if kind == 'i' {
                if index >= self.header.i {
                    return Err(scanner.error_at(
                        column,
                        ParseErrorKind::NumberTooBig {
                            what: "PI index".to_string(),
                            value: index,
                        },
                    ));
                }
                self.inputs[index as usize]
            } else {
                if index >= self.header.o {
                    return Err(scanner.error_at(
                        column,
                        ParseErrorKind::NumberTooBig {
                            what: "PO index".to_string(),
                            value: index,
                        },
                    ));
                }
                self.outputs[index as usize]
            };

            scanner.read_space()?;
            let name = scanner.rest();
            if name.is_empty() {
                return Err(
                    scanner.error(ParseErrorKind::MissingIdentifier("symbolic name".to_string()))
                );
            }
            if let Some((pos, c)) = name
                .char_indices()
                .find(|&(_, c)| !(c.is_ascii_graphic() || c == ' '))
            {
                return Err(scanner.error_at(
                    scanner.column() + pos,
                    ParseErrorKind::IllegalSymbolName(c as u32),
                ));
            }

            // Inputs and outputs were all defined by their own sections
            if let Some(gate) = self.gates[id as usize].as_mut() {
                if gate.get_symbol().is_some() {
                    return Err(
                        scanner.line_error(ParseErrorKind::RedefinedSymbolicName { kind, index })
                    );
                }
                gate.set_symbol(name.to_string());
            }
        }
        Ok(())
    }
}

/// Parses a whole AAG text.
pub(super) fn parse_aag(text: &str) -> std::result::Result<ParsedAag, ParseError> {
    let mut source = Source::new(text);
    let header = read_header(&mut source)?;
    log::debug!(
        "header: M={} I={} L={} O={} A={}",
        header.m,
        header.i,
        header.l,
        header.o,
        header.a
    );

    // Fits on 32 bits, checked by `read_header`, but may still not fit in memory
    let size = (header.m + header.o + 1) as usize;
    let mut gates = Vec::new();
    if gates.try_reserve_exact(size).is_err() {
        return Err(ParseError::on_line(
            1,
            ParseErrorKind::NumberTooBig {
                what: "Number of variables".to_string(),
                value: header.m,
            },
        ));
    }
    gates.resize_with(size, || None);
    gates[0] = Some(Gate::constant());

    let mut parser = AagParser {
        source,
        header,
        gates,
        inputs: Vec::new(),
        latches: Vec::new(),
        outputs: Vec::new(),
        ands: Vec::new(),
        pending: Vec::new(),
        comment: String::new(),
    };

    parser.read_inputs()?;
    parser.read_latches()?;
    parser.read_outputs()?;
    parser.read_ands()?;
    parser.read_symbols()?;

    Ok(ParsedAag {
        header: parser.header,
        gates: parser.gates,
        inputs: parser.inputs,
        latches: parser.latches,
        outputs: parser.outputs,
        ands: parser.ands,
        pending: parser.pending,
        comment: parser.comment,
    })
}

/// Decodes pending fanin literals into edges.
impl PendingFanins {
    pub(super) fn gate_id(&self) -> GateId {
        match *self {
            PendingFanins::Output { id, .. } => id,
            PendingFanins::And { id, .. } => id,
        }
    }

    pub(super) fn fanins(&self) -> Vec<GateRef> {
        match *self {
            PendingFanins::Output { fanin, .. } => vec![GateRef::from_literal(fanin)],
            PendingFanins::And { fanins, .. } => {
                fanins.iter().map(|&lit| GateRef::from_literal(lit)).collect()
            }
        }
    }
}
