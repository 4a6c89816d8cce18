//! Reconciliation of merged candidates against stored books

use super::merge::{fill, BookCandidate};
use crate::{
    error::AppError,
    models::{
        book::{Book, NewBook},
        import_report::ImportOutcome,
    },
    repository::{BookStore, TitleLookup},
};

/// Fold a candidate into a stored book: stored values are kept, empty
/// stored fields are filled, copies are unioned and the ISBN is taken from
/// whichever side has one (stored first).
pub fn apply_candidate(book: &mut Book, candidate: BookCandidate) {
    fill(&mut book.description, candidate.description);
    fill(&mut book.author, candidate.author);
    fill(&mut book.department, candidate.department);
    fill(&mut book.publisher, candidate.publisher);
    fill(&mut book.edition, candidate.edition);
    fill(&mut book.cover_url, candidate.cover_url);
    if book.isbn.is_none() {
        book.isbn = candidate.isbn;
    }
    for copy in candidate.copies {
        if !book.copies.contains(&copy) {
            book.copies.push(copy);
        }
    }
}

fn skip_on_write_error(title: &str, e: AppError) -> ImportOutcome {
    if e.is_conflict() {
        tracing::info!("Uniqueness violation for \"{}\": {}", title, e);
    } else {
        tracing::warn!("Could not store \"{}\": {}", title, e);
    }
    ImportOutcome::Skipped(e.to_string())
}

/// Insert, update or skip one candidate. Storage errors become `Skipped`.
pub async fn reconcile(
    store: &dyn BookStore,
    candidate: BookCandidate,
    lookup: TitleLookup,
) -> ImportOutcome {
    let existing = match store.find_by_title(&candidate.title, lookup).await {
        Ok(existing) => existing,
        Err(e) => return ImportOutcome::Skipped(e.to_string()),
    };

    let Some(mut book) = existing else {
        let new_book = NewBook::from(candidate);
        return match store.create(&new_book).await {
            Ok(created) => {
                tracing::debug!("Inserted book id={} \"{}\"", created.id, created.title);
                ImportOutcome::Inserted
            }
            Err(e) => skip_on_write_error(&new_book.title, e),
        };
    };

    if let (Some(current), Some(incoming)) = (&book.isbn, &candidate.isbn) {
        if current != incoming {
            return ImportOutcome::Skipped(format!(
                "conflicting ISBN (existing: {}, new: {})",
                current, incoming
            ));
        }
    }

    apply_candidate(&mut book, candidate);

    match store.save(&book).await {
        Ok(saved) => {
            tracing::debug!("Updated book id={} \"{}\"", saved.id, saved.title);
            ImportOutcome::Updated
        }
        Err(e) => skip_on_write_error(&book.title, e),
    }
}
