//! Data models for the catalog

pub mod book;
pub mod department;
pub mod import_report;

// Re-export commonly used types
pub use book::{Book, BookPage, BookQuery, NewBook};
pub use department::Department;
pub use import_report::{ImportOutcome, ImportReport};
