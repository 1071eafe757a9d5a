/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This library exposes methods for parsing YAML character
//! streams into a serialization level token tree, staying
//! faithful to the YAML 1.2 production rules: indentation
//! and context parameterized scanning, line folding,
//! chomping, escapes, node properties, directives and
//! multi document streams.
//!
//! The input is a complete `&str` with any byte order mark
//! already stripped by the caller; decoding byte streams,
//! resolving tags against a schema and constructing native
//! values all live outside this crate.
//!
//! ```
//! let stream = yarrow::parse("key: value\n")?;
//!
//! assert_eq!(stream.documents.len(), 1);
//! # Ok::<(), yarrow::Error>(())
//! ```

pub mod tree;

mod error;
mod flag;
mod grammar;

pub use crate::{
    error::{Category, Error, Result},
    flag::{Flags, O_PEDANTIC, O_ZEROED},
};

/// Parse a character stream into its documents, with
/// default options.
pub fn parse(source: &str) -> Result<tree::Stream>
{
    parse_with(O_ZEROED, source)
}

/// Parse a character stream into its documents.
///
/// The whole stream is processed eagerly; the first error
/// anywhere fails the entire parse, with the failing
/// document's index recorded on the [Error].
pub fn parse_with(opts: Flags, source: &str) -> Result<tree::Stream>
{
    grammar::parse_stream(opts, source).map_err(Error::new)
}
