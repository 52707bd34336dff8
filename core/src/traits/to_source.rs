use super::printer::{Printer, SourcePrinter};
use crate::node::{Seq, Symbol, SyntaxNode};

/// Trait for converting syntax nodes back to text.
///
/// `ToSource` is the inverse of reading: printing a node and reading the
/// result gives back an equal tree (ranges aside). Incomplete nodes print
/// without their closing delimiter, and error nodes print nothing.
pub trait ToSource {
    /// Write this value to the printer.
    fn write<P: Printer>(&self, printer: &mut P);

    /// Convert to a string with the default printer.
    fn to_source(&self) -> String {
        let mut printer = SourcePrinter::default();
        self.write(&mut printer);
        printer.into_string()
    }
}

impl ToSource for Symbol {
    fn write<P: Printer>(&self, p: &mut P) {
        if let Some(ns) = &self.namespace {
            p.word(ns);
            p.char('/');
        }
        p.word(&self.name);
    }
}

fn write_seq<P: Printer>(p: &mut P, seq: &Seq, open: char, close: Option<char>) {
    p.char(open);
    p.write_spaced(&seq.children);
    if let Some(close) = close {
        p.char(close);
    }
}

impl ToSource for SyntaxNode {
    fn write<P: Printer>(&self, p: &mut P) {
        match self {
            Self::Symbol(s) => s.write(p),
            Self::Keyword(s) => {
                p.char(':');
                s.write(p);
            }
            Self::String(s) => p.quoted(&s.text, s.quote),
            Self::IncompleteString(s) => {
                p.quoted(&s.text, s.quote);
                // drop the closing quote the printer added
                p.buf_mut().pop();
            }
            Self::List(seq) => write_seq(p, seq, '(', Some(')')),
            Self::IncompleteList(seq) => write_seq(p, seq, '(', None),
            Self::Vector(seq) => write_seq(p, seq, '[', Some(']')),
            Self::IncompleteVector(seq) => write_seq(p, seq, '[', None),
            Self::Error(_) => {}
        }
    }
}

impl<T: ToSource> ToSource for Option<T> {
    fn write<P: Printer>(&self, p: &mut P) {
        if let Some(v) = self {
            v.write(p);
        }
    }
}

impl<T: ToSource> ToSource for Vec<T> {
    fn write<P: Printer>(&self, p: &mut P) {
        p.write_spaced(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;

    fn round_trip(text: &str) -> String {
        read(text).node.to_source()
    }

    #[test]
    fn test_prints_canonical_spacing() {
        assert_eq!(round_trip("( foo,  1 ,2 )"), "(foo 1 2)");
        assert_eq!(round_trip("[a  :b/c]"), "[a :b/c]");
    }

    #[test]
    fn test_prints_escaped_strings() {
        assert_eq!(round_trip(r#"("a\nb" 'it\'s')"#), r#"("a\nb" 'it\'s')"#);
    }

    #[test]
    fn test_incomplete_nodes_stay_open() {
        assert_eq!(round_trip("(foo [bar \"baz"), "(foo [bar \"baz");
    }
}
