//! Intra-file merging of rows that describe the same title

use std::collections::BTreeSet;

use indexmap::{map::Entry, IndexMap};

use crate::models::book::NewBook;

/// Book derived from one or more spreadsheet rows, not yet persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookCandidate {
    pub title: String,
    pub description: String,
    pub author: String,
    pub department: String,
    pub isbn: Option<String>,
    pub publisher: String,
    pub edition: String,
    pub cover_url: String,
    pub copies: BTreeSet<String>,
}

impl BookCandidate {
    /// Lower-cased, trimmed title shared by rows of the same book
    pub fn merge_key(&self) -> String {
        self.title.trim().to_lowercase()
    }
}

impl From<BookCandidate> for NewBook {
    fn from(candidate: BookCandidate) -> Self {
        NewBook {
            title: candidate.title,
            description: candidate.description,
            author: candidate.author,
            department: candidate.department,
            isbn: candidate.isbn,
            publisher: candidate.publisher,
            edition: candidate.edition,
            cover_url: candidate.cover_url,
            copies: candidate.copies.into_iter().collect(),
        }
    }
}

/// Keep `existing` unless it is empty
pub(crate) fn fill(existing: &mut String, incoming: String) {
    if existing.is_empty() {
        *existing = incoming;
    }
}

/// Combine two candidates with the same merge key: existing scalar values
/// win, gaps are filled from `incoming`, copies are unioned.
pub fn merge(mut existing: BookCandidate, incoming: BookCandidate) -> BookCandidate {
    fill(&mut existing.title, incoming.title);
    fill(&mut existing.description, incoming.description);
    fill(&mut existing.author, incoming.author);
    fill(&mut existing.department, incoming.department);
    fill(&mut existing.publisher, incoming.publisher);
    fill(&mut existing.edition, incoming.edition);
    fill(&mut existing.cover_url, incoming.cover_url);
    if existing.isbn.is_none() {
        existing.isbn = incoming.isbn;
    }
    existing.copies.extend(incoming.copies);
    existing
}

/// Group candidates by merge key, preserving first-seen order
pub fn merge_candidates(
    candidates: impl IntoIterator<Item = BookCandidate>,
) -> IndexMap<String, BookCandidate> {
    let mut merged: IndexMap<String, BookCandidate> = IndexMap::new();
    for candidate in candidates {
        match merged.entry(candidate.merge_key()) {
            Entry::Occupied(mut slot) => {
                let existing = std::mem::take(slot.get_mut());
                *slot.get_mut() = merge(existing, candidate);
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }
    merged
}
