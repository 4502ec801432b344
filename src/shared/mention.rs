//! Mention Markup
//!
//! Free text (dream bodies, comments) can reference users with the markup
//! `@[name](id)`. Clients insert it from an autocomplete, the server may
//! extract the ids from it, and display code strips it back to `@name`.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use uuid::Uuid;

/// `@[name](id)`: name runs to the first `]`, id to the first `)`
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\[([^\]]+)\]\(([^)]+)\)").expect("valid mention pattern"));

/// A mention found in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention<'a> {
    /// Display name between the brackets
    pub name: &'a str,
    /// Raw id between the parentheses (not validated)
    pub id: &'a str,
    /// Byte range of the whole markup in the source text
    pub range: Range<usize>,
}

/// Build the markup for a mention
pub fn format_mention(name: &str, id: Uuid) -> String {
    format!("@[{}]({})", name, id)
}

/// Find every well-formed mention, left to right, without overlaps
pub fn find_mentions(text: &str) -> Vec<Mention<'_>> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Mention {
                name: caps.get(1)?.as_str(),
                id: caps.get(2)?.as_str(),
                range: whole.range(),
            })
        })
        .collect()
}

/// User ids referenced by the text, in order of first appearance
///
/// Ids that are not UUIDs are skipped. Nothing checks that the users exist.
pub fn mention_ids(text: &str) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for mention in find_mentions(text) {
        if let Ok(id) = Uuid::parse_str(mention.id) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Replace every mention markup with `@name` for display
pub fn render_mentions(text: &str) -> String {
    MENTION_RE.replace_all(text, "@$1").into_owned()
}
