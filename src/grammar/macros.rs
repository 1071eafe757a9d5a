/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the combinator macros used by
//! lib/grammar.

/// Ordered choice over production invocations. Evaluates
/// each branch in turn from its own cursor snapshot,
/// recovering from Miss and propagating the first Ok or
/// Abort.
///
/// Every branch must evaluate to the same Step<T> type.
///
/// Variants
///     /1 .branch [, .branch ...]
macro_rules! alt {
    ($first:expr $(, $rest:expr )* $(,)? ) => {{
        let mut result = $first;
        $(
            result = match result
            {
                Err($crate::grammar::error::Fault::Miss(_)) => $rest,
                other => other,
            };
        )*

        result
    }};
}

/// Optional production. Converts a Miss into a successful
/// None at the given .cursor snapshot, passing Ok and Abort
/// through.
///
/// Variants
///     /1 .cursor, .step
macro_rules! opt {
    ($cursor:expr, $step:expr) => {
        match $step
        {
            Ok((value, next)) => Ok((Some(value), next)),
            Err($crate::grammar::error::Fault::Miss(_)) =>
            {
                Ok((None, $cursor))
            },
            Err(abort) => Err(abort),
        }
    };
}
