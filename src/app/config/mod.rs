//! Project-backed configuration loaders.
//!
//! Pure parsing lives in `domain::tool_config` and `domain::composer`; this
//! module reads the files through the filesystem port and assembles the
//! values the commands consume.

mod load_config;
mod load_namespaces;

pub use load_config::load_tool_config;
pub use load_namespaces::load_path_resolver;
