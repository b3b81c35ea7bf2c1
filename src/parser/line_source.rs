//! In-memory line source for trace parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// LINE SOURCE
// =#========================================================================$=
/// An in-memory line source that owns the full trace text.
///
/// Traces are small diagnostic dumps, so the whole input is read before
/// parsing starts. Lines are split on `\n` (a preceding `\r` is dropped);
/// a single trailing newline does not produce an extra blank line.
///
/// # Example
/// ```
/// use popdag::parser::LineSource;
///
/// let source = LineSource::for_str("0x7fff589873c8 twoN=1.0 ntrval=(0.0,Inf)\n");
/// let lines: Vec<_> = source.lines().collect();
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].0, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LineSource {
    /// The owned text being parsed
    input: String,
}

impl LineSource {
    /// Creates a new line source from a string slice.
    pub fn for_str(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// Creates a new line source taking ownership of `input`.
    pub fn from_string(input: String) -> Self {
        Self { input }
    }

    /// Reads the entire file at `path` into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<LineSource> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads everything from `reader` (e.g. stdin) into memory.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<LineSource> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(Self { input: contents })
    }

    /// Iterates over `(line_number, line)` pairs, with 1-based line numbers.
    pub fn lines(&self) -> NumberedLines<'_> {
        NumberedLines {
            inner: self.input.lines().enumerate(),
        }
    }

    /// Returns the number of lines.
    pub fn num_lines(&self) -> usize {
        self.input.lines().count()
    }

    /// Returns `true` if there is no input at all.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Returns the raw text.
    pub fn as_str(&self) -> &str {
        &self.input
    }
}

/// Iterator over the lines of a [LineSource], created by [LineSource::lines].
#[derive(Debug, Clone)]
pub struct NumberedLines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Iterator for NumberedLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(index, line)| (index + 1, line))
    }
}
