//! Popdag is a library to parse indented population-node traces into a DAG.
//!
//! Tools simulating population histories (e.g. for coalescent-based
//! inference) can dump their population network as an indented trace, one
//! node per line, where a node reachable via two parents shows up twice.
//! This crate reconstructs the network from such a trace.
//! Core functionality provided:
//! - Trace parsing: indentation gives depth, depth gives the parent,
//!   repeated keys become merge nodes with a second parent.
//! - DAG model: [PopDag] stores [PopNode]s in an arena, referencing parents
//!   and children by index only. See [crate::model] for more details.
//! - Validation: line format, indentation, and at most two parents and two
//!   children per node. The first violation aborts the parse with a
//!   [ParsingError] naming the offending line.
//! - Diagnostics: [trace::report] prints per-line steps and a final dump.
//!
//! # Usage patterns
//! 1. [parse_trace_str] and [parse_trace_file] parse with default settings.
//! 2. Configure a [TraceParser](crate::trace::TraceParser) for control over
//!    indentation width or to parse step by step.
//!
//! ## Example Default Configuration
//! ```
//! use popdag::parse_trace_str;
//!
//! let trace = "\
//! 0x7fff589873c8 twoN=120.000000 ntrval=(5.500000,Inf)
//!    0x7fff58987270 twoN=96.400000 ntrval=(3.000000,5.500000)
//!       0x7fff58986e68 twoN=123.000000 ntrval=(0.000000,3.000000)
//!    0x7fff58986fc0 twoN=213.400000 ntrval=(3.000000,5.500000)
//!       0x7fff58986e68 twoN=123.000000 ntrval=(0.000000,3.000000)";
//!
//! let dag = parse_trace_str(trace).unwrap();
//! assert_eq!(dag.len(), 4);
//! assert!(dag.get("0x7fff58986e68").unwrap().is_merge());
//! ```
//!
//! ## Example Parser Configuration
//! ```
//! use popdag::parser::LineSource;
//! use popdag::trace::{StepReport, TraceParser};
//!
//! let source = LineSource::for_str("0x7fff589873c8 twoN=1.0 ntrval=(0.0,Inf)\n  0x7fff58987270 twoN=1.0 ntrval=(0.0,0.0)");
//! let mut parser = TraceParser::new().with_indent_width(2)?;
//! for (line_number, line) in source.lines() {
//!     let step = parser.parse_line(line_number, line)?;
//!     println!("{}\n", StepReport::new(parser.dag(), step, line));
//! }
//! # Ok::<(), popdag::ParsingError>(())
//! ```

pub mod model;
pub mod parser;
pub mod trace;

pub use crate::model::{Interval, NodeIndex, PopDag, PopNode};
pub use crate::parser::parsing_error::{FormatError, ParsingError, ParsingErrorType};

use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Parses a trace string using default settings, returning a [PopDag].
///
/// See [`trace::parse_str`] for full documentation.
pub fn parse_trace_str<S: AsRef<str>>(trace: S) -> Result<PopDag, ParsingError> {
    trace::parse_str(trace)
}

/// Parses a trace file using default settings, returning a [PopDag].
///
/// See [`trace::parse_file`] for full documentation.
pub fn parse_trace_file<P: AsRef<Path>>(path: P) -> Result<PopDag, ParsingError> {
    trace::parse_file(path)
}
