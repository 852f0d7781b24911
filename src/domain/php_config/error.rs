use thiserror::Error;

use super::section_path::SectionPath;

/// Failures while reading or editing a configuration array literal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The text is not a single returned array literal.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse { line: usize, column: usize, message: String },

    /// A section along the path is missing.
    #[error("section '{0}' not found")]
    SectionNotFound(SectionPath),

    /// A section along the path holds something other than an array literal.
    #[error("section '{0}' is not an array literal")]
    NotAMapping(SectionPath),

    /// The same key occurs more than once in one section.
    #[error("key {key} occurs more than once in section '{section}'")]
    AmbiguousKey { section: SectionPath, key: String },
}

impl ConfigError {
    /// Build a parse error located at byte `offset` of `source`.
    pub(crate) fn parse(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = source[line_start..offset].chars().count() + 1;
        ConfigError::Parse { line, column, message: message.into() }
    }

    /// Short label naming the failure kind.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ConfigError::Parse { .. } => "parse error",
            ConfigError::SectionNotFound(_) => "section not found",
            ConfigError::NotAMapping(_) => "not an array",
            ConfigError::AmbiguousKey { .. } => "ambiguous key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_position_is_one_based() {
        let err = ConfigError::parse("<?php\nreturn 1;", 13, "boom");
        assert_eq!(err, ConfigError::Parse { line: 2, column: 8, message: "boom".into() });
    }
}
