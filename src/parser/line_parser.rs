//! Parsing of single trace lines.
//!
//! A trace line has the shape
//! ```text
//! <indent><0x + 12 lowercase hex digits> twoN=<float> ntrval=(<float>,<float|Inf>)
//! ```
//! * [resolve_depth] turns the indentation into a tree depth,
//! * [parse_fields] validates the rest of the line and extracts a [NodeRecord].
//!
//! Validation and extraction share one regular expression, so a line that
//! passes validation always splits into exactly the expected fields.
//! Anything after the closing parenthesis of the interval is ignored.

use crate::model::Interval;
use crate::parser::parsing_error::FormatError;
use regex::Regex;
use std::sync::LazyLock;

/// Number of indentation characters per depth level in traces.
pub const DEFAULT_INDENT_WIDTH: usize = 3;

/// Token used for an unbounded upper interval end.
pub const INFINITY_TOKEN: &str = "Inf";

static LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<key>0x[0-9a-f]{12})\s+twoN=(?P<two_n>[0-9]+\.[0-9]+)\s+ntrval=\((?P<start>[0-9]+\.[0-9]+),(?P<end>[0-9]+\.[0-9]+|Inf)\)",
    )
    .expect("valid trace line regex (verified by tests)")
});

/// Fields of one trace line.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub key: String,
    pub two_n: f64,
    pub interval: Interval,
}

/// Computes the depth of a line from its leading whitespace.
///
/// # Arguments
/// * `line` - Raw line including indentation
/// * `indent_width` - Number of whitespace characters per level; must be positive
///
/// # Returns
/// * `Ok(depth)` - `indent / indent_width`
/// * `Err(FormatError::BlankLine)` - If the line has no non-whitespace character
/// * `Err(FormatError::MisalignedIndent)` - If the indentation is not a multiple of `indent_width`
///
/// # Examples
/// ```
/// # use popdag::parser::line_parser::resolve_depth;
/// assert_eq!(resolve_depth("0x7fff589873c8 ...", 3), Ok(0));
/// assert_eq!(resolve_depth("      0x7fff58986d10 ...", 3), Ok(2));
/// assert!(resolve_depth("    0x7fff58986d10 ...", 3).is_err());
/// assert!(resolve_depth("   ", 3).is_err());
/// ```
pub fn resolve_depth(line: &str, indent_width: usize) -> Result<usize, FormatError> {
    if line.trim().is_empty() {
        return Err(FormatError::BlankLine);
    }

    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    if indent_width == 0 || indent % indent_width != 0 {
        return Err(FormatError::MisalignedIndent {
            indent,
            width: indent_width,
        });
    }

    Ok(indent / indent_width)
}

/// Validates a line (indentation allowed) and extracts its fields.
///
/// # Returns
/// * `Ok(NodeRecord)` - Key, twoN and interval of the line
/// * `Err(FormatError::MalformedLine)` - If the line does not have the trace line shape
///
/// # Examples
/// ```
/// # use popdag::parser::line_parser::parse_fields;
/// let record = parse_fields("   0x7fff589873c8 twoN=120.000000 ntrval=(5.500000,Inf)").unwrap();
/// assert_eq!(record.key, "0x7fff589873c8");
/// assert_eq!(record.two_n, 120.0);
/// assert!(record.interval.is_unbounded());
/// ```
pub fn parse_fields(line: &str) -> Result<NodeRecord, FormatError> {
    let (_, [key, two_n, start, end]) = LINE_REGEX
        .captures(line.trim_start())
        .ok_or(FormatError::MalformedLine)?
        .extract();

    let end = if end == INFINITY_TOKEN {
        f64::INFINITY
    } else {
        parse_number(end)?
    };

    Ok(NodeRecord {
        key: key.to_string(),
        two_n: parse_number(two_n)?,
        interval: Interval::new(parse_number(start)?, end),
    })
}

/// The grammar only admits `digits.digits`, which `f64` always accepts;
/// very long literals saturate to infinity instead of failing.
fn parse_number(s: &str) -> Result<f64, FormatError> {
    s.parse::<f64>().map_err(|_| FormatError::MalformedLine)
}
