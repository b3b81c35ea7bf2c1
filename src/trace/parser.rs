//! Structs and logic to parse population-node traces.
//!
//! This module provides the [TraceParser] struct, which turns the lines of a
//! trace into a [PopDag], either all at once or step by step via [TraceSteps].

use crate::model::{NodeIndex, PopDag};
use crate::parser::line_parser::{DEFAULT_INDENT_WIDTH, parse_fields, resolve_depth};
use crate::parser::line_source::{LineSource, NumberedLines};
use crate::parser::parsing_error::{FormatError, ParsingError, ParsingErrorType};
use tracing::debug;

// =#========================================================================#=
// PARSE STEP
// =#========================================================================$=
/// Outcome of parsing one trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStep {
    /// 1-based number of the parsed line
    pub line_number: usize,
    /// Depth inferred from the indentation
    pub depth: usize,
    /// Node the line refers to
    pub node: NodeIndex,
    /// `true` if the node had been seen before and only gained a parent
    pub revisit: bool,
}

// =#========================================================================#=
// TRACE PARSER
// =#========================================================================$=
/// Parser (and state) for one indented population-node trace.
///
/// Each line names a node; its indentation gives its depth and thereby its
/// parent, the most recent node one level up. A key seen before is not
/// created again, instead it gains the current parent as an additional
/// parent. All state lives in the parser, so one parser is one parse.
///
/// # Configuration
/// * [`with_indent_width(width)`](Self::with_indent_width)
///     - Number of indentation characters per level (default 3)
/// * [`with_capacity(num_nodes)`](Self::with_capacity)
///     - Expected number of nodes, for pre-allocation
///
/// # Parsing
/// * [`parse_line`](Self::parse_line) — Parse one line
/// * [`parse_source`](Self::parse_source) — Parse all lines eagerly
/// * [`steps`](Self::steps) — Parse lines lazily, one [ParseStep] at a time
///
/// # Example
/// ```
/// use popdag::trace::TraceParser;
///
/// let input = "\
/// 0x7fff589873c8 twoN=120.000000 ntrval=(5.500000,Inf)
///    0x7fff58987270 twoN=96.400000 ntrval=(3.000000,5.500000)";
///
/// let dag = TraceParser::new().parse_str(input).unwrap();
/// assert_eq!(dag.len(), 2);
/// assert_eq!(dag.roots().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TraceParser {
    indent_width: usize,
    dag: PopDag,
    /// Index `d` holds the most recent node at depth `d`
    ancestors: Vec<NodeIndex>,
}

// ============================================================================
// Construction & Configuration, Deconstruction (pub)
// ============================================================================
impl TraceParser {
    /// Creates a new [TraceParser] with default indentation width.
    pub fn new() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            dag: PopDag::new(),
            ancestors: Vec::new(),
        }
    }

    /// Sets the number of indentation characters per depth level.
    ///
    /// # Errors
    /// Returns [ParsingErrorType::InvalidConfiguration] if `width` is zero.
    pub fn with_indent_width(mut self, width: usize) -> Result<Self, ParsingError> {
        if width == 0 {
            return Err(ParsingError::invalid_configuration(
                "indentation width must be positive",
            ));
        }
        self.indent_width = width;
        Ok(self)
    }

    /// Pre-allocates room for `num_nodes` nodes.
    pub fn with_capacity(mut self, num_nodes: usize) -> Self {
        if self.dag.is_empty() {
            self.dag = PopDag::with_capacity(num_nodes);
        }
        self
    }

    /// Returns the number of indentation characters per depth level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Returns the number of currently open ancestor levels, that is,
    /// one more than the deepest depth the next line may use.
    pub fn open_depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Get ref to the DAG built so far.
    pub fn dag(&self) -> &PopDag {
        &self.dag
    }

    /// Consumes the parser and returns the DAG built so far.
    pub fn into_dag(self) -> PopDag {
        self.dag
    }
}

impl Default for TraceParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl TraceParser {
    /// Parses a single trace line and updates the DAG accordingly.
    ///
    /// All checks run before the DAG is changed, so if an error is returned,
    /// the DAG and the ancestor levels are exactly as before the call.
    ///
    /// # Arguments
    /// * `line_number` - 1-based line number, used for error reporting
    /// * `line` - The raw line including indentation
    ///
    /// # Returns
    /// * `Ok(ParseStep)` - Depth and node of the line
    /// * `Err(ParsingError)` - Format error or violated cardinality bound
    pub fn parse_line(&mut self, line_number: usize, line: &str) -> Result<ParseStep, ParsingError> {
        let at_line = |kind: ParsingErrorType| ParsingError::at_line(kind, line_number, line);

        let depth = resolve_depth(line, self.indent_width).map_err(|e| at_line(e.into()))?;
        let open = self.ancestors.len();
        if depth > open {
            return Err(at_line(FormatError::DepthSkipped { depth, open }.into()));
        }

        let record = parse_fields(line).map_err(|e| at_line(e.into()))?;

        let parent = match depth.checked_sub(1) {
            Some(level) => self.ancestors.get(level).copied(),
            None => None,
        };

        let (node, revisit) = match (self.dag.index_of(&record.key), parent) {
            (Some(existing), Some(parent)) => {
                self.dag.add_edge(parent, existing).map_err(at_line)?;
                (existing, true)
            }
            (Some(_), None) => {
                return Err(at_line(FormatError::RepeatedRoot(record.key).into()));
            }
            (None, Some(parent)) => {
                // Check first, a rejected line must not leave an orphan node behind
                if !self.dag[parent].can_add_child() {
                    return Err(at_line(ParsingErrorType::TooManyChildren {
                        key: self.dag.key_of(parent).to_string(),
                    }));
                }
                let node = self.dag.insert_node(&record.key, record.two_n, record.interval);
                self.dag.add_edge(parent, node).map_err(at_line)?;
                (node, false)
            }
            (None, None) => {
                let node = self.dag.insert_node(&record.key, record.two_n, record.interval);
                (node, false)
            }
        };

        self.ancestors.truncate(depth);
        self.ancestors.push(node);

        debug!(
            line_number,
            depth,
            key = self.dag.key_of(node),
            revisit,
            "parsed trace line"
        );

        Ok(ParseStep {
            line_number,
            depth,
            node,
            revisit,
        })
    }

    /// Parses all lines of the source, stopping at the first error.
    pub fn parse_source(&mut self, source: &LineSource) -> Result<(), ParsingError> {
        for (line_number, line) in source.lines() {
            self.parse_line(line_number, line)?;
        }
        Ok(())
    }

    /// Consumes the parser, parses all lines of `input` and returns the DAG.
    pub fn parse_str(mut self, input: &str) -> Result<PopDag, ParsingError> {
        self.parse_source(&LineSource::for_str(input))?;
        Ok(self.dag)
    }

    /// Returns an iterator parsing the lines of `source` one at a time.
    ///
    /// Yields `Result<ParseStep, ParsingError>` per line and stops after the
    /// first error. The DAG can be inspected via [`dag`](Self::dag) between
    /// steps and once the iterator is dropped.
    pub fn steps<'a>(&'a mut self, source: &'a LineSource) -> TraceSteps<'a> {
        TraceSteps {
            parser: self,
            lines: source.lines(),
            done: false,
        }
    }
}

// =#========================================================================#=
// TRACE STEPS (lazy parser)
// =#========================================================================$=
/// Iterator to parse a trace line by line.
///
/// Created by [TraceParser::steps()].
pub struct TraceSteps<'a> {
    parser: &'a mut TraceParser,
    lines: NumberedLines<'a>,
    done: bool,
}

impl TraceSteps<'_> {
    /// Get ref to the DAG built so far.
    pub fn dag(&self) -> &PopDag {
        self.parser.dag()
    }
}

impl Iterator for TraceSteps<'_> {
    type Item = Result<ParseStep, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some((line_number, line)) = self.lines.next() else {
            self.done = true;
            return None;
        };

        let result = self.parser.parse_line(line_number, line);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
