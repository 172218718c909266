//! Dotted pairs and accompanying iterator types.
use std::fmt;

use crate::{Datum, Value};

/// A cons cell, as read from a dotted list such as `(a . b)`.
///
/// Its fields are traditionally called `car` and `cdr`. Either may hold any
/// `Datum`, including another cons cell; the reader builds `(a b . c)` as a
/// chain of two cells whose last `cdr` is `c`.
///
/// A chain of cells produced by the reader is always terminated by a value
/// other than a cons cell, so it is always an "improper" list. The iterators
/// and vector conversion functions account for that terminating value.
#[derive(PartialEq, Clone)]
pub struct Cons {
    inner: Box<(Datum, Datum)>,
}

impl fmt::Debug for Cons {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "({:?} . {:?})", self.car(), self.cdr())
    }
}

impl Cons {
    /// Constructs a new cons cell from two datums.
    pub fn new(car: Datum, cdr: Datum) -> Self {
        Cons {
            inner: Box::new((car, cdr)),
        }
    }

    /// Returns a reference to the datum in the `car` field.
    pub fn car(&self) -> &Datum {
        &self.inner.0
    }

    /// Returns a reference to the datum in the `cdr` field.
    pub fn cdr(&self) -> &Datum {
        &self.inner.1
    }

    /// Obtains an iterator yielding references to all the cons cells in this
    /// chain.
    pub fn iter(&self) -> Iter<'_> {
        Iter { cursor: Some(self) }
    }

    /// Retrieves the elements of the chain by reference.
    ///
    /// Returns the `car` of every cell and the `cdr` of the last cell.
    ///
    /// ```
    /// let forms = hy_reader::from_str("(a b . c)").unwrap();
    /// let cell = forms[0].as_cons().unwrap();
    /// let (items, rest) = cell.to_ref_vec();
    /// assert_eq!(items.len(), 2);
    /// assert_eq!(rest.as_symbol(), Some("c"));
    /// ```
    pub fn to_ref_vec(&self) -> (Vec<&Datum>, &Datum) {
        let mut items = Vec::new();
        let mut cell = self;
        loop {
            items.push(cell.car());
            match cell.cdr().value() {
                Value::Cons(next) => cell = next,
                _ => return (items, cell.cdr()),
            }
        }
    }

    /// Returns an iterator yielding each `car` of the chain.
    ///
    /// After the last regular element the iterator returns `None` once, then
    /// produces the terminating `cdr`, followed by the final `None`.
    pub fn list_iter(&self) -> ListIter<'_> {
        ListIter(ListCursor::Cons(self))
    }
}

impl<'a> IntoIterator for &'a Cons {
    type Item = &'a Cons;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over a chain of cons cells.
///
/// This is returned by the [`Cons::iter`] method.
pub struct Iter<'a> {
    cursor: Option<&'a Cons>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Cons;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor?;
        self.cursor = match cell.cdr().value() {
            Value::Cons(next) => Some(next),
            _ => None,
        };
        Some(cell)
    }
}

/// An iterator yielding the `car` field of a chain of cons cells.
///
/// For `(1 2 . 3)` this produces `Some` values for `1` and `2`, then a `None`,
/// followed by a `Some` value for `3`, and then the final `None`.
#[derive(Debug, Clone)]
pub struct ListIter<'a>(ListCursor<'a>);

#[derive(Debug, Clone)]
enum ListCursor<'a> {
    Cons(&'a Cons),
    Dot(&'a Datum),
    Rest(&'a Datum),
    Exhausted,
}

impl<'a> ListIter<'a> {
    /// Returns true when the iterator is completely exhausted, including the
    /// terminating value.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, ListCursor::Exhausted)
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Datum;

    fn next(&mut self) -> Option<Self::Item> {
        match self.0 {
            ListCursor::Cons(cell) => {
                self.0 = match cell.cdr().value() {
                    Value::Cons(next) => ListCursor::Cons(next),
                    _ => ListCursor::Dot(cell.cdr()),
                };
                Some(cell.car())
            }
            ListCursor::Dot(datum) => {
                self.0 = ListCursor::Rest(datum);
                None
            }
            ListCursor::Rest(datum) => {
                self.0 = ListCursor::Exhausted;
                Some(datum)
            }
            ListCursor::Exhausted => None,
        }
    }
}
