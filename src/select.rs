//! Page-selection parsing.
//!
//! Converts a human-entered selection spec into a sorted, de-duplicated
//! list of valid 1-based page numbers, bounded by a document's page count.
//!
//! # Grammar
//!
//! Comma-separated tokens; each token is either a single non-negative
//! integer literal or an inclusive `start-end` range of two integer
//! literals. Whitespace around tokens and around the `-` is ignored:
//!
//! - `"3"` - single page
//! - `"1-5"` - range of pages (inclusive)
//! - `"1, 3, 5-7"` - combination
//!
//! # Semantics
//!
//! Malformed tokens and reversed ranges are hard errors. Values outside
//! `[1, max_pages]` are *silently dropped* (range ends clamp at collection
//! time) - the same spec string can be reused against documents of
//! different lengths, and each document simply keeps the part of the
//! selection it can satisfy.
//!
//! # Examples
//!
//! ```
//! use pagebind::select::parse;
//!
//! let pages = parse("1,3,5-7,10-12", 6).unwrap();
//! assert_eq!(pages, vec![1, 3, 5, 6]);
//! ```

use std::collections::BTreeSet;

use crate::error::ParseError;

/// Parse a selection spec against a document's page count.
///
/// # Arguments
///
/// * `spec` - Selection spec string (e.g., `"1,3,5-7"`)
/// * `max_pages` - Page count of the target document
///
/// # Returns
///
/// An ascending, duplicate-free list of 1-based page numbers, every one of
/// them in `[1, max_pages]`. An empty list is valid output: callers decide
/// whether an empty selection for a given document is acceptable.
///
/// # Errors
///
/// - [`ParseError::InvalidToken`] for a token that is not an integer
///   literal or a `start-end` range of two integer literals.
/// - [`ParseError::InvalidRange`] for a range with `start > end`.
///
/// Out-of-range values are not an error; they are filtered.
pub fn parse(spec: &str, max_pages: u32) -> Result<Vec<u32>, ParseError> {
    let mut pages = BTreeSet::new();

    for token in spec.split(',') {
        let token = token.trim();

        if let Some((start_str, end_str)) = token.split_once('-') {
            let start = parse_literal(start_str, token)?;
            let end = parse_literal(end_str, token)?;

            if start > end {
                return Err(ParseError::InvalidRange { start, end });
            }

            // Clamp at collection time: a range like 1-2000000000 against a
            // 5-page document must not materialize billions of entries.
            pages.extend(start..=end.min(max_pages));
        } else {
            pages.insert(parse_literal(token, token)?);
        }
    }

    // BTreeSet iteration is ascending, so the contract's ordering and
    // de-duplication fall out of the collection itself.
    Ok(pages
        .into_iter()
        .filter(|&p| p >= 1 && p <= max_pages)
        .collect())
}

/// Parse one integer literal, reporting the enclosing token on failure.
fn parse_literal(literal: &str, token: &str) -> Result<u32, ParseError> {
    literal
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidToken {
            token: token.to_string(),
        })
}
