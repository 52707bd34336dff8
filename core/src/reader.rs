//! Recursive-descent reader for the rvt expression language.
//!
//! The grammar is a small Lisp reader: `(lists)`, `[vectors]`, `:keywords`,
//! `"strings"` (or `'strings'`) and bare symbols. Whitespace and commas both
//! separate forms. `{maps}`, `#sets` and `; comments` are reserved and
//! reported as not supported.
//!
//! Reading never fails. Each entry point returns the best node it could
//! build together with every [`ReadError`] met along the way; forms cut
//! short by the end of input come back as `Incomplete*` variants.

use crate::config::{ReaderConfig, RecursionGuard};
use crate::error::{ReadError, ReadErrorKind, Unsupported};
use crate::node::{ErrorNode, Seq, StringLit, Symbol, SyntaxNode};
use crate::span::{Position, Range};
use crate::stream::{CharStream, Character};

/// Characters that separate forms.
const SEPARATORS: [char; 5] = [' ', '\t', '\r', '\n', ','];

/// Characters that end a symbol without being part of it.
const RESERVED: [char; 9] = [';', ']', '[', ')', '(', '#', ',', '"', '\''];

#[inline]
fn is_separator(ch: char) -> bool {
    SEPARATORS.contains(&ch)
}

#[inline]
fn is_reserved(ch: char) -> bool {
    RESERVED.contains(&ch)
}

/// Result of reading one form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadOutput {
    /// `None` when the input held nothing but separators.
    pub node: Option<SyntaxNode>,
    pub errors: Vec<ReadError>,
}

impl ReadOutput {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn into_parts(self) -> (Option<SyntaxNode>, Vec<ReadError>) {
        (self.node, self.errors)
    }
}

type ReadFn<'s, I> = fn(&mut Reader<'s, I>) -> SyntaxNode;

/// Reads forms from a borrowed [`CharStream`].
///
/// A reader holds no state beyond the nesting depth and the errors of the
/// form in progress, so one can be created per request.
pub struct Reader<'s, I> {
    stream: &'s mut CharStream<I>,
    config: ReaderConfig,
    guard: RecursionGuard,
    errors: Vec<ReadError>,
}

impl<'s, I: Iterator<Item = char>> Reader<'s, I> {
    pub fn new(stream: &'s mut CharStream<I>) -> Self {
        Self::with_config(stream, ReaderConfig::default())
    }

    pub fn with_config(stream: &'s mut CharStream<I>, config: ReaderConfig) -> Self {
        Self {
            stream,
            config,
            guard: RecursionGuard::new(),
            errors: Vec::new(),
        }
    }

    /// Read the next form, skipping leading separators.
    pub fn read_token(&mut self) -> ReadOutput {
        self.guard.reset();
        let node = self.read_form();
        ReadOutput {
            node,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Read forms until the stream is exhausted.
    pub fn read_all(&mut self) -> (Vec<SyntaxNode>, Vec<ReadError>) {
        let mut nodes = Vec::new();
        let mut errors = Vec::new();
        loop {
            let out = self.read_token();
            errors.extend(out.errors);
            match out.node {
                Some(node) => nodes.push(node),
                None => break,
            }
        }
        (nodes, errors)
    }

    /// Consume trailing separators and report anything left behind.
    pub fn finish(&mut self) -> Option<ReadError> {
        while let Some(c) = self.stream.next() {
            if is_separator(c.ch) {
                continue;
            }
            while self.stream.next().is_some() {}
            let range = Range::new(c.pos, self.stream.eof_position());
            return Some(ReadError::new(ReadErrorKind::TrailingInput, range));
        }
        None
    }

    fn dispatch(ch: char) -> ReadFn<'s, I> {
        match ch {
            '(' => Self::read_list,
            '[' => Self::read_vector,
            '{' => Self::read_map,
            '#' => Self::read_set,
            ':' => Self::read_keyword,
            ';' => Self::read_comment,
            '"' | '\'' => Self::read_string,
            _ => Self::read_symbol,
        }
    }

    fn read_form(&mut self) -> Option<SyntaxNode> {
        while let Some(c) = self.stream.next() {
            if !is_separator(c.ch) {
                self.stream.push_back(c);
                let read = Self::dispatch(c.ch);
                return Some(read(self));
            }
        }
        None
    }

    fn error(&mut self, kind: ReadErrorKind, range: Range) {
        self.errors.push(ReadError::new(kind, range));
    }

    fn error_node(&mut self, kind: ReadErrorKind, range: Range) -> SyntaxNode {
        let message = kind.to_string();
        self.error(kind, range);
        SyntaxNode::Error(ErrorNode { message, range })
    }

    /// Range from `start` to wherever the input ran out.
    fn to_eof(&self, start: Position) -> Range {
        Range::new(start, self.stream.eof_position().max(start))
    }

    /// Accumulate symbol characters, leaving the terminator in the stream.
    fn read_symbol_text(&mut self) -> Result<(String, Range), SyntaxNode> {
        let mut text = String::new();
        let mut first: Option<Character> = None;
        let mut last: Option<Character> = None;

        while let Some(c) = self.stream.next() {
            if is_separator(c.ch) || is_reserved(c.ch) {
                let Some(first) = first else {
                    // Nothing read yet: the terminator itself is out of place here.
                    let range = Range::point(c.pos);
                    return Err(self.error_node(ReadErrorKind::IllegalCharacter(c.ch), range));
                };
                self.stream.push_back(c);
                let end = last.map_or(first.pos, |l| l.pos);
                return Ok((text, Range::new(first.pos, end)));
            }
            first.get_or_insert(c);
            last = Some(c);
            text.push(c.ch);
        }

        let start = first.map_or(self.stream.eof_position(), |c| c.pos);
        Ok((text, self.to_eof(start)))
    }

    fn read_symbol(&mut self) -> SyntaxNode {
        match self.read_symbol_text() {
            Ok((text, range)) => SyntaxNode::Symbol(Symbol::from_text(&text, range)),
            Err(node) => node,
        }
    }

    fn read_keyword(&mut self) -> SyntaxNode {
        match self.read_symbol_text() {
            Ok((text, range)) => {
                let name = text.strip_prefix(':').unwrap_or(&text);
                SyntaxNode::Keyword(Symbol::from_text(name, range))
            }
            Err(node) => node,
        }
    }

    fn read_string(&mut self) -> SyntaxNode {
        let Some(open) = self.stream.next() else {
            let range = Range::point(self.stream.eof_position());
            self.error(ReadErrorKind::UnterminatedString, range);
            return SyntaxNode::IncompleteString(StringLit {
                text: String::new(),
                quote: '"',
                range,
            });
        };
        let quote = open.ch;
        let mut text = String::new();

        while let Some(c) = self.stream.next() {
            if c.ch == quote {
                return SyntaxNode::String(StringLit {
                    text,
                    quote,
                    range: Range::new(open.pos, c.pos),
                });
            }
            if c.ch != '\\' {
                text.push(c.ch);
                continue;
            }

            let Some(esc) = self.stream.next() else {
                break;
            };
            match esc.ch {
                'n' => text.push('\n'),
                'r' => text.push('\r'),
                ch if ch == quote => text.push(ch),
                ch => {
                    self.error(ReadErrorKind::InvalidEscape(ch), Range::new(c.pos, esc.pos));
                    text.push(ch);
                }
            }
        }

        let range = self.to_eof(open.pos);
        self.error(ReadErrorKind::UnterminatedString, range);
        SyntaxNode::IncompleteString(StringLit { text, quote, range })
    }

    fn read_list(&mut self) -> SyntaxNode {
        self.read_seq(')')
    }

    fn read_vector(&mut self) -> SyntaxNode {
        match self.read_seq(']') {
            SyntaxNode::List(seq) => SyntaxNode::Vector(seq),
            SyntaxNode::IncompleteList(seq) => {
                if let Some(last) = self.errors.last_mut()
                    && last.kind == ReadErrorKind::UnterminatedList
                    && last.range == seq.range
                {
                    last.kind = ReadErrorKind::UnterminatedVector;
                }
                SyntaxNode::IncompleteVector(seq)
            }
            other => other,
        }
    }

    /// Read a delimited sequence closed by `end`, always as a list variant.
    fn read_seq(&mut self, end: char) -> SyntaxNode {
        let Some(open) = self.stream.next() else {
            let range = Range::point(self.stream.eof_position());
            self.error(ReadErrorKind::UnterminatedList, range);
            return SyntaxNode::IncompleteList(Seq {
                children: Vec::new(),
                range,
            });
        };

        if let Err(kind) = self.guard.enter(self.config.max_depth) {
            while self.stream.next().is_some() {}
            let range = self.to_eof(open.pos);
            self.error(kind, range);
            return SyntaxNode::IncompleteList(Seq {
                children: Vec::new(),
                range,
            });
        }

        let node = self.read_seq_body(open, end);
        self.guard.exit();
        node
    }

    fn read_seq_body(&mut self, open: Character, end: char) -> SyntaxNode {
        let mut children = Vec::new();

        while let Some(c) = self.stream.next() {
            if c.ch == end {
                return SyntaxNode::List(Seq {
                    children,
                    range: Range::new(open.pos, c.pos),
                });
            } else if is_separator(c.ch) {
                continue;
            } else if c.ch == ')' || c.ch == ']' {
                self.stream.push_back(c);
                let range = Range::new(open.pos, c.pos);
                self.error(ReadErrorKind::UnexpectedDelimiter(c.ch), range);
                return SyntaxNode::IncompleteList(Seq { children, range });
            } else {
                self.stream.push_back(c);
                if let Some(child) = self.read_form() {
                    children.push(child);
                }
            }
        }

        let range = self.to_eof(open.pos);
        self.error(ReadErrorKind::UnterminatedList, range);
        SyntaxNode::IncompleteList(Seq { children, range })
    }

    fn read_unsupported(&mut self, what: Unsupported) -> SyntaxNode {
        let range = match self.stream.next() {
            Some(c) => Range::point(c.pos),
            None => Range::point(self.stream.eof_position()),
        };
        self.error_node(ReadErrorKind::NotImplemented(what), range)
    }

    fn read_map(&mut self) -> SyntaxNode {
        self.read_unsupported(Unsupported::Maps)
    }

    fn read_set(&mut self) -> SyntaxNode {
        self.read_unsupported(Unsupported::Sets)
    }

    fn read_comment(&mut self) -> SyntaxNode {
        self.read_unsupported(Unsupported::Comments)
    }
}

/// Read one form from `stream` with the default configuration.
pub fn read_token<I: Iterator<Item = char>>(stream: &mut CharStream<I>) -> ReadOutput {
    Reader::new(stream).read_token()
}

/// Read exactly one form from `text`.
///
/// Anything other than separators after the form is reported as
/// [`ReadErrorKind::TrailingInput`].
pub fn read(text: &str) -> ReadOutput {
    read_with_config(text, ReaderConfig::default())
}

pub fn read_with_config(text: &str, config: ReaderConfig) -> ReadOutput {
    let mut stream = CharStream::from(text);
    let mut reader = Reader::with_config(&mut stream, config);
    let mut out = reader.read_token();
    if let Some(err) = reader.finish() {
        out.errors.push(err);
    }
    out
}
