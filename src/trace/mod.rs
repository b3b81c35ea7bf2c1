//! Trace parser and diagnostic output for population-node traces.
//!
//! This module provides [TraceParser] to turn an indented trace into a
//! [PopDag], and the [report] types to print what was built.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a trace file
//! * [`parse_str`] - parses a trace given as string
//!
//! # Full API
//! For more control, configure a [TraceParser] and feed it a [LineSource]:
//! * [`TraceParser::parse_line`] - parse one line
//! * [`TraceParser::parse_source`] - parse all lines
//! * [`TraceParser::steps`] - obtain an iterator over parse steps
//!
//! # Format
//! One node per line:
//! * `line ::= indent key ws 'twoN=' float ws 'ntrval=(' float ',' (float | 'Inf') ')' [rest]`
//! * `indent` is a multiple of the indentation width (3 by default),
//!   `indent / width` being the depth of the node
//! * `key` is `0x` followed by 12 lowercase hex digits
//! * `float` is `digits '.' digits`
//!
//! The parent of a node at depth `d > 0` is the latest node at depth `d - 1`.
//! A key appearing again gets the current parent as a second parent.
//!
//! ```text
//! 0x7fff589873c8 twoN=120.000000 ntrval=(5.500000,Inf)
//!    0x7fff58987270 twoN=96.400000 ntrval=(3.000000,5.500000)
//!       0x7fff58986e68 twoN=123.000000 ntrval=(0.000000,3.000000)
//!    0x7fff58986fc0 twoN=213.400000 ntrval=(3.000000,5.500000)
//!       0x7fff58986e68 twoN=123.000000 ntrval=(0.000000,3.000000)
//! ```

pub mod parser;
pub mod report;

pub use parser::{ParseStep, TraceParser, TraceSteps};
pub use report::{DagReport, NodeReport, StepReport};

use crate::model::PopDag;
use crate::parser::{LineSource, ParsingError};
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a trace file with default settings and returns the resulting [PopDag].
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [PopDag] - All nodes and edges of the trace
/// * [ParsingError] - If file reading fails or the trace is invalid
///
/// # Example
/// ```no_run
/// use popdag::trace::parse_file;
///
/// let dag = parse_file("popnodes.txt")?;
/// println!("Parsed {} nodes", dag.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PopDag, ParsingError> {
    let source = LineSource::from_file(path)?;
    let mut parser = TraceParser::new();
    parser.parse_source(&source)?;
    Ok(parser.into_dag())
}

/// Parses a trace string with default settings and returns the resulting [PopDag].
///
/// # Example
/// ```
/// use popdag::trace::parse_str;
///
/// let dag = parse_str("0x7fff589873c8 twoN=120.000000 ntrval=(5.500000,Inf)")?;
/// assert_eq!(dag.len(), 1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(trace: S) -> Result<PopDag, ParsingError> {
    TraceParser::new().parse_str(trace.as_ref())
}
