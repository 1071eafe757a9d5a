/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The YAML 1.2 production rules, bottom (character
//! classes) to top (stream composition).
//!
//! Every production is a function from an immutable cursor
//! snapshot to a [Step][error::Step]: the produced value
//! plus the cursor past the consumed prefix, or a
//! [Fault][error::Fault]. Ordered choice recovers from
//! Miss and never from Abort, which is what bounds
//! backtracking on malformed input.

// Note that this module must come before all others, as
// they depend on the macros which expand into this scope
#[macro_use]
mod macros;

pub(crate) mod error;

mod block;
mod chars;
mod comment;
mod context;
mod cursor;
mod directive;
mod document;
mod flow;
mod fold;
mod props;
mod scalar;
mod uri;
mod white;

pub(crate) use self::document::{parse_stream, StreamFault};
