use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;

/// Ordered key path from the document root to a nested array section.
///
/// The empty path addresses the root array itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SectionPath(Vec<String>);

impl SectionPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> SectionPath {
        SectionPath(self.0[..len.min(self.0.len())].to_vec())
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() { f.write_str("<root>") } else { f.write_str(&self.0.join(".")) }
    }
}

impl FromStr for SectionPath {
    type Err = AppError;

    /// Parse a dotted path such as `dependencies.factories`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(SectionPath::root());
        }
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(AppError::config_error(format!("Invalid section path '{}'", s)));
        }
        Ok(SectionPath(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_path() {
        let path: SectionPath = "dependencies.factories".parse().expect("valid path");
        assert_eq!(path.segments(), ["dependencies", "factories"]);
        assert_eq!(path.to_string(), "dependencies.factories");
    }

    #[test]
    fn rejects_empty_segments() {
        assert!("dependencies..factories".parse::<SectionPath>().is_err());
    }

    #[test]
    fn empty_string_is_root() {
        let path: SectionPath = "".parse().expect("valid path");
        assert!(path.is_root());
        assert_eq!(path.to_string(), "<root>");
    }
}
