use super::to_source::ToSource;

/// Trait for building source text.
///
/// `Printer` keeps output concerns (buffering, spacing) apart from the nodes
/// being printed. [`ToSource`] implementations drive it.
///
/// # Required Methods
///
/// - `buf_mut()`: Get mutable buffer for appending
/// - `into_string()`: Consume and return final output
///
/// # Example
///
/// ```
/// use rvt_core::{Printer, SourcePrinter};
///
/// let mut p = SourcePrinter::default();
/// p.word("(Open");
/// p.space();
/// p.quoted("a \"b\"", '"');
/// p.char(')');
/// assert_eq!(p.into_string(), r#"(Open "a \"b\"")"#);
/// ```
pub trait Printer: Sized {
    /// Get a mutable reference to the buffer for appending.
    fn buf_mut(&mut self) -> &mut String;
    /// Consume the printer and return the final string.
    fn into_string(self) -> String;

    /// Append a string to the buffer.
    fn word(&mut self, s: &str) {
        self.buf_mut().push_str(s);
    }

    /// Append a single character to the buffer.
    fn char(&mut self, c: char) {
        self.buf_mut().push(c);
    }

    /// Append a single space.
    fn space(&mut self) {
        self.char(' ');
    }

    /// Append `text` as a string literal, escaping what the reader unescapes.
    fn quoted(&mut self, text: &str, quote: char) {
        self.char(quote);
        for c in text.chars() {
            match c {
                '\n' => self.word("\\n"),
                '\r' => self.word("\\r"),
                c if c == quote => {
                    self.char('\\');
                    self.char(c);
                }
                c => self.char(c),
            }
        }
        self.char(quote);
    }

    /// Write a value implementing `ToSource`.
    fn write<T: ToSource + ?Sized>(&mut self, value: &T) {
        value.write(self);
    }

    /// Write items with a single space between them.
    fn write_spaced<'a, T, I>(&mut self, items: I)
    where
        T: ToSource + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for (idx, item) in items.into_iter().enumerate() {
            if idx > 0 {
                self.space();
            }
            self.write(item);
        }
    }
}

/// The default [`Printer`]: an in-memory buffer.
#[derive(Debug, Clone, Default)]
pub struct SourcePrinter {
    buf: String,
}

impl Printer for SourcePrinter {
    fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    fn into_string(self) -> String {
        self.buf
    }
}
