//! Cross-entry link rewriting.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::identity_map::IdentityMap;

static ENTRY_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*)\]\(dayone://view\?entryId=([0-9A-Fa-f]+)\)")
        .expect("entry link pattern is valid")
});

/// Rewritten text plus link counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResolution {
    pub text: String,
    pub resolved_count: usize,
    pub total_count: usize,
}

/// Replace `dayone://view?entryId=` links with wiki links to the mapped notes.
///
/// Links whose identifier is not in `map` are left as they are.
pub fn resolve_internal_links(text: &str, map: &IdentityMap) -> LinkResolution {
    if map.is_empty() {
        return LinkResolution {
            text: text.to_string(),
            resolved_count: 0,
            total_count: 0,
        };
    }

    let mut total_count = 0;
    let mut resolved_count = 0;
    let rewritten = ENTRY_LINK.replace_all(text, |caps: &Captures| {
        total_count += 1;
        let label = &caps[1];
        match map.get(&caps[2]) {
            Some(name) => {
                resolved_count += 1;
                if label.is_empty() {
                    format!("[[{}]]", name.stem())
                } else {
                    format!("[[{}|{}]]", name.stem(), label)
                }
            }
            None => caps[0].to_string(),
        }
    });

    LinkResolution {
        text: rewritten.into_owned(),
        resolved_count,
        total_count,
    }
}
