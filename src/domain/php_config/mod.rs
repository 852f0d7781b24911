//! Editing of PHP configuration files that return a single array literal.
//!
//! The file is never evaluated. A small scanner tokenizes it, a bracket
//! matcher indexes the returned array, and nested arrays are indexed only
//! when a [`SectionPath`] walks into them. Edits splice text into the
//! affected range and leave every other byte as it was.

mod document;
mod error;
mod layout;
mod lexer;
mod literal;
mod mapping;
mod section_path;

pub use document::{ConfigDocument, Entry, EntryChange, Section};
pub use error::ConfigError;
pub use literal::ConfigLiteral;
pub use mapping::ArrayStyle;
pub use section_path::SectionPath;
