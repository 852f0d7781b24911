pub mod filesystem;
pub mod templates;

pub use filesystem::LocalFilesystem;
pub use templates::EmbeddedTemplates;
