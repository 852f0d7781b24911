use std::fmt;

use super::AppError;

/// A validated fully-qualified PHP class name.
///
/// Guarantees:
/// - No leading backslash (one is accepted on input and stripped)
/// - One or more `\`-separated segments
/// - Every segment is a PHP identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let name = raw.trim().trim_start_matches('\\');
        if name.is_empty() || !name.split('\\').all(is_identifier) {
            return Err(AppError::InvalidClassName(raw.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name without its namespace.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('\\').next().unwrap_or(&self.0)
    }

    /// Namespace without the class name; `None` for global classes.
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('\\').map(|(namespace, _)| namespace)
    }

    /// Same namespace, short name with `suffix` appended.
    pub fn with_suffix(&self, suffix: &str) -> ClassName {
        ClassName(format!("{}{}", self.0, suffix))
    }
}

/// Whether `segment` is a PHP identifier (label).
pub(crate) fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || !c.is_ascii() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii())
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_class() {
        let class = ClassName::new(r"App\Handler\HomePageHandler").expect("valid");
        assert_eq!(class.short_name(), "HomePageHandler");
        assert_eq!(class.namespace(), Some(r"App\Handler"));
    }

    #[test]
    fn strips_leading_backslash() {
        let class = ClassName::new(r"\App\Foo").expect("valid");
        assert_eq!(class.as_str(), r"App\Foo");
    }

    #[test]
    fn global_class_has_no_namespace() {
        let class = ClassName::new("Foo").expect("valid");
        assert_eq!(class.namespace(), None);
        assert_eq!(class.with_suffix("Factory").as_str(), "FooFactory");
    }

    #[test]
    fn rejects_invalid_names() {
        for raw in ["", r"\", r"App\\Foo", r"App\1Foo", "App/Foo", "App Foo", r"App\Foo\"] {
            assert!(ClassName::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn suffix_keeps_namespace() {
        let class = ClassName::new(r"App\Handler\Ping").expect("valid");
        assert_eq!(class.with_suffix("Factory").as_str(), r"App\Handler\PingFactory");
    }
}
