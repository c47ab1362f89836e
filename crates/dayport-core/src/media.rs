//! Inline media reference rewriting.
//!
//! Export bodies point at attachments through `dayone-moment` URLs. Notes
//! instead reference the attachment file by content hash, e.g.
//! `![](0a1b2c.jpeg)`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::schema::{Attachment, AttachmentKind, JournalEntry};

/// Audio is always exported as AAC in an MPEG-4 container.
const AUDIO_EXTENSION: &str = "m4a";

static MEDIA_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[\]\(dayone-moment:(?://|/(?:video|audio|pdfAttachment)/)([^)]+)\)")
        .expect("media token pattern is valid")
});

const FENCE: &str = "```";

/// Outcome of rewriting one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRewrite {
    pub text: String,
    /// Number of distinct tokens that were replaced.
    pub rewritten: usize,
    /// Identifiers with no matching attachment, in first-seen order.
    pub unresolved: Vec<String>,
}

/// Fixed cleanup applied to every body before token scanning.
pub fn clean_body(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| *c != '\\')
        .map(|c| match c {
            '\u{2028}' | '\u{2029}' => '\n',
            other => other,
        })
        .collect();
    remove_empty_code_blocks(&stripped)
}

/// Drop fenced blocks whose content is blank. Fences are paired in order, so
/// the closing fence of one block never pairs with the opening of the next.
fn remove_empty_code_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut keep = vec![true; lines.len()];
    let mut open: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let fence = line.trim_start_matches([' ', '\t']);
        match open {
            None if fence.starts_with(FENCE) => open = Some(idx),
            Some(start) if fence.trim_end_matches([' ', '\t']) == FENCE => {
                if lines[start + 1..idx].iter().all(|l| l.trim().is_empty()) {
                    keep[start..=idx].iter_mut().for_each(|k| *k = false);
                }
                open = None;
            }
            _ => {}
        }
    }

    lines
        .into_iter()
        .zip(keep)
        .filter_map(|(line, kept)| kept.then_some(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean `body` and replace every resolvable media token with a hash-named reference.
pub fn rewrite_media_references(body: &str, entry: &JournalEntry) -> MediaRewrite {
    let mut text = clean_body(body);

    let mut tokens: Vec<(String, String)> = Vec::new();
    for caps in MEDIA_TOKEN.captures_iter(&text) {
        let token = caps[0].to_string();
        if tokens.iter().any(|(seen, _)| *seen == token) {
            continue;
        }
        tokens.push((token, caps[1].to_string()));
    }

    let mut rewritten = 0;
    let mut unresolved = Vec::new();
    for (token, raw_id) in tokens {
        let identifier = raw_id.rsplit('/').next().unwrap_or(raw_id.as_str());
        match find_attachment(entry, identifier) {
            Some((kind, attachment)) => {
                text = text.replace(&token, &media_reference(kind, attachment));
                rewritten += 1;
            }
            None => {
                warn!(
                    entry = %entry.uuid,
                    identifier,
                    "Could not find media attachment"
                );
                unresolved.push(identifier.to_string());
            }
        }
    }

    MediaRewrite {
        text,
        rewritten,
        unresolved,
    }
}

fn find_attachment<'a>(
    entry: &'a JournalEntry,
    identifier: &str,
) -> Option<(AttachmentKind, &'a Attachment)> {
    AttachmentKind::PRECEDENCE.iter().find_map(|kind| {
        entry
            .attachments(*kind)
            .iter()
            .find(|a| a.identifier == identifier)
            .map(|a| (*kind, a))
    })
}

fn media_reference(kind: AttachmentKind, attachment: &Attachment) -> String {
    let extension = match kind {
        AttachmentKind::Audio => Some(AUDIO_EXTENSION),
        _ => attachment.file_type.as_deref(),
    };
    match extension {
        Some(ext) => format!("![]({}.{})", attachment.md5, ext),
        None => format!("![]({})", attachment.md5),
    }
}
