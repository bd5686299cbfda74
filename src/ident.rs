//! # Identifier Codec
//!
//! Control elements arrive with synthetic path-like identifiers of the form
//! `[Tag]GroupName/LocalName`. The functions here recover the three pieces of
//! information packed into such an id: the owning control group, the local
//! component name, and the role tag.
//!
//! All functions are pure and total: a malformed or tag-less id yields an
//! empty or absent result, never an error. Callers decide whether that is
//! worth a warning.

use crate::tags::{IdTag, bracketed};

/// Extracts the control-group name: the text before the first `/`, minus a
/// single leading bracket tag (recognized or not).
///
/// ```
/// use rtcontrol::ident::control_group_name;
///
/// assert_eq!(control_group_name("[TimeRule]dam_west/opening"), "dam_west");
/// assert_eq!(control_group_name("dam_west/opening"), "dam_west");
/// ```
pub fn control_group_name(id: &str) -> &str {
    let head = match id.find('/') {
        Some(slash) => &id[..slash],
        None => id,
    };

    if head.starts_with('[') {
        if let Some(end) = head.find(']') {
            return &head[end + 1..];
        }
    }

    head
}

/// Extracts the local component name: every bracketed fragment is removed and
/// the text after the last `/` remains.
///
/// Returns `None` when any tag found in the id is a connection-point tag —
/// connection points name model quantities, not components.
pub fn component_name(id: &str) -> Option<String> {
    for fragment in bracketed(id) {
        if IdTag::recognize(fragment).is_some_and(|tag| tag.is_connection_point()) {
            return None;
        }
    }

    let stripped = strip_tags(id);
    let name = match stripped.rfind('/') {
        Some(slash) => &stripped[slash + 1..],
        None => &stripped,
    };

    Some(name.to_string())
}

/// Scans the bracketed fragments of `id` left to right and returns the first
/// one recognized as a component or connection-point tag.
pub fn role_tag(id: &str) -> Option<IdTag> {
    bracketed(id).find_map(IdTag::recognize)
}

fn strip_tags(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut rest = id;

    while let Some(start) = rest.find('[') {
        match rest[start..].find(']') {
            Some(offset) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + offset + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
