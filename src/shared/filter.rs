//! Dream Filtering
//!
//! Filtering over an already-fetched list of dreams, as done by the explore
//! view of a client. The semantics are:
//!
//! - search: case-insensitive substring of the title or the content
//! - tags: the dream carries at least one of the selected tags (OR)
//! - moods: the dream's mood is one of the selected moods (OR)
//!
//! The three criteria are combined with AND; an empty criterion matches all.

use crate::shared::dream::{Dream, Mood};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DreamFilter {
    pub search: String,
    pub tags: Vec<String>,
    pub moods: Vec<Mood>,
}

impl DreamFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Add the tag to the selection, or remove it when already selected
    pub fn toggle_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        match self.tags.iter().position(|t| *t == tag) {
            Some(index) => {
                self.tags.remove(index);
            }
            None => self.tags.push(tag),
        }
        self
    }

    /// Add the mood to the selection, or remove it when already selected
    pub fn toggle_mood(mut self, mood: Mood) -> Self {
        match self.moods.iter().position(|m| *m == mood) {
            Some(index) => {
                self.moods.remove(index);
            }
            None => self.moods.push(mood),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.tags.is_empty() && self.moods.is_empty()
    }

    pub fn matches(&self, dream: &Dream) -> bool {
        let matches_search = self.search.is_empty() || {
            let term = self.search.to_lowercase();
            dream.title.to_lowercase().contains(&term) || dream.content.to_lowercase().contains(&term)
        };
        let matches_tags =
            self.tags.is_empty() || self.tags.iter().any(|tag| dream.tags.contains(tag));
        let matches_moods = self.moods.is_empty() || self.moods.contains(&dream.mood);

        matches_search && matches_tags && matches_moods
    }

    /// Dreams that match, in their original order
    pub fn apply<'a>(&self, dreams: &'a [Dream]) -> Vec<&'a Dream> {
        dreams.iter().filter(|dream| self.matches(dream)).collect()
    }
}

/// Distinct tags across a list of dreams, in order of first appearance
pub fn collect_tags(dreams: &[Dream]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in dreams.iter().flat_map(|dream| dream.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}
