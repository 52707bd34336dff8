use core::str::Chars;

use crate::span::Position;

/// A character paired with the position it occupied in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub ch: char,
    pub pos: Position,
}

impl Character {
    #[inline]
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    #[inline]
    pub const fn col(&self) -> usize {
        self.pos.col
    }
}

impl From<Character> for char {
    #[inline]
    fn from(c: Character) -> Self {
        c.ch
    }
}

impl PartialEq<char> for Character {
    #[inline]
    fn eq(&self, other: &char) -> bool {
        self.ch == *other
    }
}

/// A character cursor with push-back and line/column tracking.
///
/// Characters are pulled one at a time through [`Iterator::next`]. Any
/// consumed character can be handed back with [`push_back`](Self::push_back);
/// pushed characters form a stack, so pushing back `c`, `b`, `a` re-reads
/// `a`, `b`, `c`. Every push-back restores the cursor to exactly where it was
/// before the character was read, including across line boundaries.
///
/// # Example
///
/// ```
/// use rvt_core::CharStream;
///
/// let mut stream = CharStream::from("ab\ncd");
/// let chars: Vec<_> = stream.by_ref().collect();
/// assert_eq!(chars[3].pos.line, 1);
///
/// stream.push_back(chars[4]);
/// stream.push_back(chars[3]);
/// stream.push_back(chars[2]);
/// let newline = stream.next().map(|c| c.pos);
/// assert_eq!(newline, Some(chars[2].pos));
/// ```
#[derive(Debug, Clone)]
pub struct CharStream<I> {
    source: I,
    pushed_back: Vec<char>,
    line: usize,
    col: usize,
    /// Column reached at the end of each line so far; indexed by line.
    line_history: Vec<usize>,
    eof_pos: Position,
    reached_end: bool,
}

impl<'a> From<&'a str> for CharStream<Chars<'a>> {
    #[inline]
    fn from(source: &'a str) -> Self {
        Self::new(source.chars())
    }
}

impl<I: Iterator<Item = char>> CharStream<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            pushed_back: Vec::new(),
            line: 0,
            col: 0,
            line_history: vec![0],
            eof_pos: Position::default(),
            reached_end: false,
        }
    }

    /// The position the next character will be reported at.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Position of the last character pulled from the underlying source.
    ///
    /// Nodes that run off the end of input use this as their range end.
    #[inline]
    pub fn eof_position(&self) -> Position {
        self.eof_pos
    }

    /// True when nothing is pushed back and the source reported its end.
    ///
    /// The end is only known after a read attempt failed, so a stream whose
    /// last character was just consumed is not yet empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pushed_back.is_empty() && self.reached_end
    }

    /// Un-consume the most recently read character.
    pub fn push_back(&mut self, ch: impl Into<char>) {
        self.pushed_back.push(ch.into());

        if self.col == 0 {
            // Stepping back over a newline: resume at the end of the previous line.
            self.line = self.line.saturating_sub(1);
            self.col = self.line_history.get(self.line).copied().unwrap_or(0);
        } else {
            self.col -= 1;
        }
    }

    /// Pull the next character only if it satisfies `pred`.
    pub fn next_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<Character> {
        let c = self.next()?;
        if pred(c.ch) {
            Some(c)
        } else {
            self.push_back(c);
            None
        }
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        let c = self.next()?;
        self.push_back(c);
        Some(c.ch)
    }

    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }

        if self.line_history.len() <= self.line {
            self.line_history.resize(self.line + 1, 0);
        }
        self.line_history[self.line] = self.col;
    }
}

impl<I: Iterator<Item = char>> Iterator for CharStream<I> {
    type Item = Character;

    fn next(&mut self) -> Option<Character> {
        let ch = match self.pushed_back.pop() {
            Some(ch) => ch,
            None => match self.source.next() {
                Some(ch) => {
                    self.eof_pos = Position::new(self.line, self.col);
                    ch
                }
                None => {
                    self.reached_end = true;
                    return None;
                }
            },
        };

        let pos = Position::new(self.line, self.col);
        self.advance(ch);
        Some(Character { ch, pos })
    }
}
