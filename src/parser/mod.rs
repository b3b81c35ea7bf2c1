//! Low-level trace parsing functionality.
//!
//! This module provides the building blocks used by
//! [TraceParser](crate::trace::TraceParser): an in-memory [LineSource],
//! the single-line grammar in [line_parser], and error handling in
//! [parsing_error].

pub mod line_parser;
pub mod line_source;
pub mod parsing_error;

pub use line_parser::{DEFAULT_INDENT_WIDTH, NodeRecord};
pub use line_source::LineSource;
pub use parsing_error::{FormatError, ParsingError, ParsingErrorType};
