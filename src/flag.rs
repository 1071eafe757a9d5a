/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use bitflags::bitflags;

/// An empty, zeroed flag set. This is the default set, with
/// all other flags disabled.
pub const O_ZEROED: Flags = Flags::empty();
/// Promotes the semantic warnings the parser would
/// otherwise attach to a document -- an unsupported %YAML
/// version, an unknown directive name, a duplicate %TAG
/// handle -- into hard errors at the offending position.
pub const O_PEDANTIC: Flags = Flags::PEDANTIC;

bitflags! {
    /// Directives controlling various behaviors of the parser,
    /// see each O_ variant for an explanation of how each works
    #[derive(Default)]
    pub struct Flags: u32 {
        const PEDANTIC      = 0b00000001;
    }
}
