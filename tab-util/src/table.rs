//! An ordered collection of records sharing one header.
//!
//! Loading follows the usual conventions of tab-delimited genomic data
//! files: `#` lines are comments, the first line can be skipped or
//! taken as the header, and once a header is known every data line
//! must have at least as many fields as there are columns.
//!
//! ```
//! use tab_util::table::{LoadOptions, Table};
//!
//! let data = "#chr\tstart\tend\tdata\nchr1\t1\t234\t4.6\nchr2\t1234\t5678\t6.8\n";
//! let table = Table::from_reader(data.as_bytes(), LoadOptions::new().first_line_is_header(true))?;
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.header().len(), 4);
//! assert_eq!(table[1].get("start")?, "1234");
//! assert_eq!(table.index_by_line_number(3)?, 1);
//! # Ok::<(), tab_util::error::TabError>(())
//! ```

use crate::common_io::{open_buf_reader, open_buf_writer, write_types_to};
use crate::error::{Result, TabError};
use crate::record::{columns_from, no_columns, ColumnNames, Key, Record};

use log::debug;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Marks a comment line, and is stripped from a header line
pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// discard the first physical line
    pub skip_first_line: bool,
    /// take column names from the first line (after any skipped line)
    pub first_line_is_header: bool,
    /// drop whitespace-only lines instead of parsing them as data
    pub skip_blank_lines: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_first_line(mut self, yes: bool) -> Self {
        self.skip_first_line = yes;
        self
    }

    pub fn first_line_is_header(mut self, yes: bool) -> Self {
        self.first_line_is_header = yes;
        self
    }

    pub fn skip_blank_lines(mut self, yes: bool) -> Self {
        self.skip_blank_lines = yes;
        self
    }
}

/// Reported when a header replaces one that was already set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOverride {
    pub previous: ColumnNames,
    pub current: ColumnNames,
}

impl Display for HeaderOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "overriding existing header [{}] with [{}]",
            self.previous.join(", "),
            self.current.join(", ")
        )
    }
}

/// What a successful load did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// data records appended
    pub records: usize,
    /// comment lines skipped
    pub comments: usize,
    /// blank lines skipped (only with `skip_blank_lines`)
    pub blank_lines: usize,
    /// set if the header line replaced an existing header
    pub header_override: Option<HeaderOverride>,
}

#[derive(Debug, Clone)]
pub struct Table {
    records: Vec<Record>,
    header: ColumnNames,
    ncols: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Table {
            records: vec![],
            header: no_columns(),
            ncols: 0,
        }
    }

    /// An empty table with predefined column names
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let header = columns_from(names);
        Table {
            records: vec![],
            ncols: header.len(),
            header,
        }
    }

    /// Load a table from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R, options: LoadOptions) -> Result<Self> {
        let mut ret = Self::new();
        ret.load_reader(reader, options)?;
        Ok(ret)
    }

    /// Load a table from a file, gzipped or not
    pub fn from_path(input_file: &str, options: LoadOptions) -> Result<Self> {
        let mut ret = Self::new();
        ret.load_reader(open_buf_reader(input_file)?, options)?;
        Ok(ret)
    }

    /// Parse lines into records and append them.
    ///
    /// Nothing is changed if any line fails: a line with fewer fields
    /// than the header aborts the whole load.
    pub fn load<I, S>(&mut self, lines: I, options: LoadOptions) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.load_fallible(lines.into_iter().map(Ok), options)
    }

    pub fn load_reader<R: BufRead>(&mut self, reader: R, options: LoadOptions) -> Result<LoadSummary> {
        self.load_fallible(reader.lines().map(|x| x.map_err(TabError::from)), options)
    }

    fn load_fallible<I, S>(&mut self, lines: I, options: LoadOptions) -> Result<LoadSummary>
    where
        I: Iterator<Item = Result<S>>,
        S: AsRef<str>,
    {
        let LoadOptions {
            mut skip_first_line,
            mut first_line_is_header,
            skip_blank_lines,
        } = options;

        let mut header = self.header.clone();
        let mut ncols = self.ncols;
        let mut header_override = None;
        let mut records = vec![];
        let mut comments = 0;
        let mut blank_lines = 0;

        for (i, line) in lines.enumerate() {
            let line_no = i + 1;
            let line = match line {
                Ok(line) => line,
                Err(TabError::Io(source)) => {
                    return Err(TabError::Read {
                        line: line_no,
                        source,
                    })
                }
                Err(e) => return Err(e),
            };
            let line = line.as_ref();

            if skip_first_line {
                skip_first_line = false;
                continue;
            }

            if first_line_is_header {
                first_line_is_header = false;
                let line = line.trim();
                let line = line.strip_prefix(COMMENT_MARKER).unwrap_or(line);
                let names = columns_from(line.split('\t'));
                if !header.is_empty() {
                    header_override = Some(HeaderOverride {
                        previous: header.clone(),
                        current: names.clone(),
                    });
                }
                ncols = names.len();
                header = names;
                continue;
            }

            if line.trim_start().starts_with(COMMENT_MARKER) {
                comments += 1;
                continue;
            }

            if skip_blank_lines && line.trim().is_empty() {
                blank_lines += 1;
                continue;
            }

            let mut rec = Record::parse(line, &no_columns());
            if rec.len() < ncols {
                return Err(TabError::Parse {
                    line: line_no,
                    expected: ncols,
                    actual: rec.len(),
                });
            }
            rec.rebind_columns(&header);
            records.push(rec.with_line_number(line_no)?);
        }

        debug!(
            "loaded {} records, skipped {} comment lines",
            records.len(),
            comments
        );

        let summary = LoadSummary {
            records: records.len(),
            comments,
            blank_lines,
            header_override,
        };

        self.header = header;
        self.ncols = ncols;
        self.records.extend(records);
        Ok(summary)
    }

    pub fn header(&self) -> &ColumnNames {
        &self.header
    }

    /// Replace the header. Records already in the table keep the
    /// header they were created with. Returns a diagnostic if a header
    /// was already set.
    pub fn set_header<I, S>(&mut self, names: I) -> Option<HeaderOverride>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let current = columns_from(names);
        self.ncols = current.len();
        let previous = std::mem::replace(&mut self.header, current.clone());
        if previous.is_empty() {
            None
        } else {
            Some(HeaderOverride { previous, current })
        }
    }

    /// Minimum number of fields for a parsed line, fixed when the
    /// header is set; columns added later with `append_column` do not
    /// raise it
    pub fn n_columns(&self) -> usize {
        self.ncols
    }

    /// Every record whose `key` field equals `value`, in table order.
    /// A key that cannot be resolved on some record is an error.
    pub fn lookup<'a>(&self, key: impl Into<Key<'a>>, value: &str) -> Result<Vec<&Record>> {
        let key = key.into();
        let mut ret = vec![];
        for rec in self.records.iter() {
            if rec.get(key)? == value {
                ret.push(rec);
            }
        }
        Ok(ret)
    }

    /// Table position of the record parsed from source line `n`
    pub fn index_by_line_number(&self, n: usize) -> Result<usize> {
        self.records
            .iter()
            .position(|x| x.line_number() == Some(n))
            .ok_or_else(|| TabError::not_found(format!("no line number {}", n)))
    }

    /// Create an empty record at table position `i` (not a line
    /// number) and hand it back to be filled in
    pub fn insert(&mut self, i: usize) -> Result<&mut Record> {
        if i > self.records.len() {
            return Err(TabError::not_found(format!(
                "insert position {} beyond {} records",
                i,
                self.records.len()
            )));
        }
        self.records.insert(i, Record::empty(&self.header));
        Ok(&mut self.records[i])
    }

    /// Add a column name to the header and an empty field to every
    /// record. When records are wider than the header, the header is
    /// first filled out with positional names so the new name lands
    /// after the existing data.
    pub fn append_column(&mut self, name: &str) {
        let width = self
            .records
            .iter()
            .map(Record::len)
            .max()
            .unwrap_or(0)
            .max(self.header.len());

        let mut names: Vec<Box<str>> = self.header.iter().cloned().collect();
        while names.len() < width {
            names.push(names.len().to_string().into_boxed_str());
        }
        names.push(name.to_owned().into_boxed_str());

        self.header = names.into();
        for rec in self.records.iter_mut() {
            rec.rebind_columns(&self.header);
        }
    }

    /// Overwrite the `key` field of every record with `f(record)`
    pub fn transform_column<'a, K, F, E>(&mut self, key: K, mut f: F) -> std::result::Result<(), E>
    where
        K: Into<Key<'a>>,
        F: FnMut(&Record) -> std::result::Result<String, E>,
        E: From<TabError>,
    {
        let key = key.into();
        for rec in self.records.iter_mut() {
            let value = f(rec)?;
            rec.set(key, value)?;
        }
        Ok(())
    }

    /// Append a new column filled with `f(record)`
    pub fn compute_column<F, E>(&mut self, name: &str, f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&Record) -> std::result::Result<String, E>,
        E: From<TabError>,
    {
        self.append_column(name);
        self.transform_column(name, f)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Record> {
        self.records.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Record> {
        self.records.get_mut(i)
    }

    pub fn remove(&mut self, i: usize) -> Result<Record> {
        if i < self.records.len() {
            Ok(self.records.remove(i))
        } else {
            Err(TabError::not_found(format!(
                "position {} beyond {} records",
                i,
                self.records.len()
            )))
        }
    }

    /// Keep only the records for which `f` returns true
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(f);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    /// Write every record, one per line, in table order
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_types_to(&self.records, writer)
    }

    /// Write every record to a file, gzipped or not
    pub fn write_file(&self, output_file: &str) -> Result<()> {
        let mut buf = open_buf_writer(output_file)?;
        self.write_to(&mut buf)
    }
}

impl std::ops::Index<usize> for Table {
    type Output = Record;

    fn index(&self, i: usize) -> &Record {
        &self.records[i]
    }
}

impl std::ops::IndexMut<usize> for Table {
    fn index_mut(&mut self, i: usize) -> &mut Record {
        &mut self.records[i]
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a mut Table {
    type Item = &'a mut Record;
    type IntoIter = std::slice::IterMut<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter_mut()
    }
}
