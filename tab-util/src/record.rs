//! One row of tab-delimited values, addressable by position or by
//! column name.
//!
//! ```
//! use tab_util::record::{columns_from, Record};
//!
//! let cols = columns_from(["chr", "start", "end"]);
//! let mut rec = Record::parse("chr1\t100\t200", &cols).with_line_number(7)?;
//!
//! assert_eq!(rec.get("start")?, "100");
//! assert_eq!(rec.get(2usize)?, "200");
//!
//! rec.set("end", "199")?;
//! assert_eq!(rec.to_string(), "chr1\t100\t199");
//! assert_eq!(rec.line_number(), Some(7));
//! # Ok::<(), tab_util::error::TabError>(())
//! ```

use crate::error::{Result, TabError};
use std::fmt::Display;
use std::sync::Arc;

/// Column names shared by every record created under one table
pub type ColumnNames = Arc<[Box<str>]>;

/// Build a shared column-name sequence
pub fn columns_from<I, S>(names: I) -> ColumnNames
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|x| x.as_ref().to_owned().into_boxed_str())
        .collect::<Vec<_>>()
        .into()
}

/// An empty column-name sequence
pub fn no_columns() -> ColumnNames {
    Vec::<Box<str>>::new().into()
}

/// How a field is addressed.
///
/// A `Position` is always a 0-based field index. A `Name` is looked up
/// in the column names first and, failing that, read as a 0-based
/// position. So if a header contains a column literally named `"2"`,
/// the text key `"2"` reaches that column and never the third field;
/// use `Key::Position(2)` for the third field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Position(usize),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name.as_str())
    }
}

impl<'a> From<&'a Box<str>> for Key<'a> {
    fn from(name: &'a Box<str>) -> Self {
        Key::Name(name.as_ref())
    }
}

impl From<usize> for Key<'_> {
    fn from(pos: usize) -> Self {
        Key::Position(pos)
    }
}

impl Display for Key<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{}", name),
            Key::Position(pos) => write!(f, "{}", pos),
        }
    }
}

impl Key<'_> {
    /// Resolve to a field position given the column names and the
    /// number of fields.
    pub fn resolve(&self, columns: &[Box<str>], nfields: usize) -> Result<usize> {
        let pos = match self {
            Key::Position(pos) => *pos,
            Key::Name(name) => {
                if let Some(i) = columns.iter().position(|x| **x == **name) {
                    if i < nfields {
                        return Ok(i);
                    }
                }
                name.trim()
                    .parse::<usize>()
                    .map_err(|_| TabError::not_found(format!("column '{}'", name)))?
            }
        };

        if pos < nfields {
            Ok(pos)
        } else {
            Err(TabError::not_found(format!(
                "position {} out of range for '{}' ({} fields)",
                pos, self, nfields
            )))
        }
    }
}

/// Parse a provenance line number given as text.
///
/// Anything other than a non-negative integer is a validation error.
pub fn parse_line_number(text: &str) -> Result<usize> {
    text.trim()
        .parse::<usize>()
        .map_err(|_| TabError::Validation(format!("invalid line number '{}'", text)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
    columns: ColumnNames,
    line_number: Option<usize>,
}

impl Record {
    /// A record with no source line, padded with empty fields to the
    /// number of columns
    pub fn empty(columns: &ColumnNames) -> Self {
        Self::from_values(Vec::new(), columns)
    }

    /// Split a raw line on tabs. Only the line terminator is removed,
    /// so empty leading and trailing fields are kept.
    pub fn parse(line: &str, columns: &ColumnNames) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Self::from_values(line.split('\t').map(str::to_owned).collect(), columns)
    }

    /// Build from already split values
    pub fn from_values(values: Vec<String>, columns: &ColumnNames) -> Self {
        let mut ret = Record {
            values,
            columns: columns.clone(),
            line_number: None,
        };
        ret.pad();
        ret
    }

    /// Attach the source line number. Negative or otherwise
    /// unrepresentable numbers are rejected, and a number can only be
    /// assigned once.
    pub fn with_line_number<N>(mut self, line_number: N) -> Result<Self>
    where
        N: TryInto<usize> + Display + Copy,
    {
        if self.line_number.is_some() {
            return Err(TabError::Validation(format!(
                "line number already set, refusing '{}'",
                line_number
            )));
        }
        let n = line_number
            .try_into()
            .map_err(|_| TabError::Validation(format!("invalid line number '{}'", line_number)))?;
        self.line_number = Some(n);
        Ok(self)
    }

    fn pad(&mut self) {
        while self.values.len() < self.columns.len() {
            self.values.push(String::new());
        }
    }

    pub(crate) fn rebind_columns(&mut self, columns: &ColumnNames) {
        self.columns = columns.clone();
        self.pad();
    }

    /// Position of the field a key refers to
    pub fn index_of<'a>(&self, key: impl Into<Key<'a>>) -> Result<usize> {
        key.into().resolve(&self.columns, self.values.len())
    }

    pub fn get<'a>(&self, key: impl Into<Key<'a>>) -> Result<&str> {
        let i = self.index_of(key)?;
        Ok(self.values[i].as_str())
    }

    pub fn set<'a>(&mut self, key: impl Into<Key<'a>>, value: impl Into<String>) -> Result<()> {
        let i = self.index_of(key)?;
        self.values[i] = value.into();
        Ok(())
    }

    /// Append values positionally. Meant for building new records;
    /// appended fields have no column name unless the header covers them.
    pub fn append<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
    }

    /// A new record made of the selected fields, in the given order.
    /// The same field may be selected more than once. The result
    /// carries no line number.
    pub fn project<'a, I, K>(&self, keys: I) -> Result<Record>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key<'a>>,
    {
        let mut names = vec![];
        let mut values = vec![];
        for key in keys {
            let key = key.into();
            let i = self.index_of(key)?;
            let name = match self.columns.get(i) {
                Some(name) => name.clone(),
                None => key.to_string().into_boxed_str(),
            };
            names.push(name);
            values.push(self.values[i].clone());
        }
        Ok(Record::from_values(values, &names.into()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if every field is empty
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|x| x.trim().is_empty())
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Tab-joined fields, no trailing delimiter
    pub fn to_line(&self) -> String {
        self.values.join("\t")
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, x) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            f.write_str(x)?;
        }
        Ok(())
    }
}
