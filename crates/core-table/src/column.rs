//! Column descriptions and the typed cell values they extract.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A cell's value for comparison and display. Accessors extract one of
/// these per row; `Null` marks an absent field.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Bool(b) => Some(u8::from(*b).into()),
            _ => None,
        }
    }

    /// Value ordering: numbers numerically (ints and floats mix), strings
    /// lexically, booleans as 0/1. Null placement is the sort's concern,
    /// not the value's; see [`compare_null_last`].
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.to_string().cmp(&other.to_string()),
            },
        }
    }
}

/// Comparison used by sorting: null values order after all defined values
/// regardless of direction; the caller reverses only the `Ordering` of two
/// defined values.
pub fn compare_null_last(a: &CellValue, b: &CellValue, descending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.compare(b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            CellValue::Null => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Exactly this many display cells.
    Fixed(usize),
    /// Widest content among the currently visible rows (and the header).
    Content,
    /// Share of the terminal width left after fixed and content columns.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

type Accessor<T> = Rc<dyn Fn(&T) -> CellValue>;
type Formatter = Rc<dyn Fn(&CellValue) -> String>;

/// How one field of a row is displayed. The accessor extracts the typed
/// value; `format` overrides its default textual form and never mutates
/// the row.
#[derive(Clone)]
pub struct Column<T> {
    pub key: String,
    pub header: String,
    pub width: ColumnWidth,
    pub align: Align,
    pub sortable: bool,
    accessor: Accessor<T>,
    format: Option<Formatter>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: ColumnWidth::Auto,
            align: Align::Left,
            sortable: true,
            accessor: Rc::new(accessor),
            format: None,
        }
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn format(mut self, f: impl Fn(&CellValue) -> String + 'static) -> Self {
        self.format = Some(Rc::new(f));
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// The cell's display text: the formatter's output when one is set,
    /// otherwise the value's default form.
    pub fn text(&self, row: &T) -> String {
        let value = self.value(row);
        match &self.format {
            Some(f) => f(&value),
            None => value.to_string(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}
