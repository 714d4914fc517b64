// controllers/mod.rs
//
// One controller per page feature. Each owns only the state it mutates;
// the header height is the only thing they share, and it is always re-read
// from the host.

pub mod contact;
pub mod effects;
pub mod navigation;
pub mod reveal;
pub mod scroll;
#[cfg(feature = "cursor")]
pub mod cursor;

use crate::api::types::ElementId;
use crate::host::traits::Host;

/// Query every selector in order and collect the distinct matches.
pub(crate) fn query_each<H: Host>(host: &mut H, selectors: &[String]) -> Vec<ElementId> {
    let mut found = Vec::new();
    for selector in selectors {
        for id in host.query_all(selector) {
            if !found.contains(&id) {
                found.push(id);
            }
        }
    }
    found
}
