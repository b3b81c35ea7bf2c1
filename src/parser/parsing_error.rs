//! Error types for trace parsing.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while turning a population-node trace into
//! a [PopDag](crate::model::PopDag). Every error is fatal: the first one
//! aborts the parse.

use std::fmt;
use thiserror::Error;

/// Default length of context (in characters) provided by error from parser
pub const DEFAULT_CONTEXT_LENGTH: usize = 80;

// =#========================================================================#=
// FORMAT ERROR
// =#========================================================================#=
/// Ways a single trace line can violate the line format.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum FormatError {
    #[error("line is blank")]
    BlankLine,

    #[error("indentation of {indent} is not a multiple of {width}")]
    MisalignedIndent { indent: usize, width: usize },

    #[error("depth {depth} skips past the {open} open ancestor level(s)")]
    DepthSkipped { depth: usize, open: usize },

    #[error("line does not match `<0x address> twoN=<float> ntrval=(<float>,<float|Inf>)`")]
    MalformedLine,

    #[error("node {0} repeated at depth 0 without a parent")]
    RepeatedRoot(String),
}

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur during trace parsing.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("Format error - {0}")]
    Format(#[from] FormatError),

    #[error("Node {key} would get a third parent")]
    TooManyParents { key: String },

    #[error("Node {key} would get a third child")]
    TooManyChildren { key: String },

    #[error("IO error - {0}")]
    Io(String),

    #[error("Invalid configuration - {0}")]
    InvalidConfiguration(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (line number and offending line).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingError {
    kind: ParsingErrorType,
    line_number: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and the line it occurred on.
    ///
    /// # Arguments
    /// * `kind` - What went wrong
    /// * `line_number` - 1-based number of the offending line
    /// * `line` - The offending line; truncated to [DEFAULT_CONTEXT_LENGTH] characters
    pub fn at_line(kind: ParsingErrorType, line_number: usize, line: &str) -> Self {
        Self {
            kind,
            line_number,
            context: line.chars().take(DEFAULT_CONTEXT_LENGTH).collect(),
        }
    }

    /// Create a ParsingError without line context (for IO and configuration errors)
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            line_number: 0,
            context: String::new(),
        }
    }

    /// Convenience constructor for InvalidConfiguration
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::without_context(ParsingErrorType::InvalidConfiguration(msg.into()))
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the 1-based line number where the error occurred (0 if not line related)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get the offending line (possibly truncated), empty if not line related
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns `true` if this is a format error of any sort.
    pub fn is_format_error(&self) -> bool {
        matches!(self.kind, ParsingErrorType::Format(_))
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if self.line_number > 0 {
            write!(f, " at line {}", self.line_number)?;
        }

        if !self.context.is_empty() {
            write!(f, "\n  Context: {}", self.context)?;
        }

        Ok(())
    }
}

// Display already prints the kind; no source so reports name it once.
impl std::error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::without_context(ParsingErrorType::Io(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line_and_context() {
        let err = ParsingError::at_line(
            FormatError::MisalignedIndent { indent: 4, width: 3 }.into(),
            7,
            "    0x7fff58987270 twoN=1.0 ntrval=(0.0,1.0)",
        );
        let msg = err.to_string();
        assert!(msg.contains("not a multiple of 3"));
        assert!(msg.contains("at line 7"));
        assert!(msg.contains("0x7fff58987270"));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_context_is_truncated() {
        let long_line = "x".repeat(3 * DEFAULT_CONTEXT_LENGTH);
        let err = ParsingError::at_line(FormatError::MalformedLine.into(), 1, &long_line);
        assert_eq!(err.context().len(), DEFAULT_CONTEXT_LENGTH);
    }

    #[test]
    fn test_io_error_has_no_position() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ParsingError::from(io);
        assert_eq!(err.line_number(), 0);
        assert!(matches!(err.kind(), ParsingErrorType::Io(_)));
        assert!(!err.to_string().contains("at line"));
    }

    #[test]
    fn test_error_chain_names_kind_once() {
        let err = ParsingError::at_line(
            FormatError::MisalignedIndent { indent: 4, width: 3 }.into(),
            2,
            "    0x7fff58987270 twoN=1.0 ntrval=(0.0,1.0)",
        );
        assert!(std::error::Error::source(&err).is_none());

        let report = format!("{:#}", anyhow::Error::new(err).context("Failed to parse trace"));
        assert_eq!(report.matches("not a multiple of 3").count(), 1);
        assert_eq!(report.matches("at line 2").count(), 1);
    }
}
