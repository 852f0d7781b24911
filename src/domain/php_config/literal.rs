//! Keys and values: what the tool writes, and what existing text evaluates to.

use super::lexer::{Token, TokenKind};
use super::mapping::{TokenRange, range_text};

/// A key or value written into a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLiteral {
    /// Quoted string literal, `'name'`.
    String(String),
    /// Class-name reference, `Name::class`. Stored fully qualified without a
    /// leading backslash.
    ClassRef(String),
}

impl ConfigLiteral {
    pub fn string(value: impl Into<String>) -> Self {
        ConfigLiteral::String(value.into())
    }

    pub fn class_ref(name: impl AsRef<str>) -> Self {
        ConfigLiteral::ClassRef(name.as_ref().trim_start_matches('\\').to_string())
    }

    /// The string PHP evaluates this literal to.
    pub fn evaluated(&self) -> &str {
        match self {
            ConfigLiteral::String(value) | ConfigLiteral::ClassRef(value) => value,
        }
    }

    /// Source text for this literal inside a file with the given name context.
    pub(crate) fn to_source(&self, names: &NameContext) -> String {
        match self {
            ConfigLiteral::String(value) => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            ConfigLiteral::ClassRef(name) if names.resolve(name) == *name => {
                format!("{}::class", name)
            }
            ConfigLiteral::ClassRef(name) => format!("\\{}::class", name),
        }
    }
}

/// What a key or value expression evaluates to, as far as it can be known
/// without running PHP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Evaluated {
    /// A compile-time string: string literal, integer, or `Name::class`.
    Known(String),
    /// Any other expression, compared by exact source text.
    Opaque(String),
}

impl Evaluated {
    pub(crate) fn describe(&self) -> String {
        match self {
            Evaluated::Known(value) => format!("'{}'", value),
            Evaluated::Opaque(text) => text.clone(),
        }
    }
}

/// Namespace and `use` imports in effect for the returned array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NameContext {
    pub namespace: Option<String>,
    /// `(alias, target)`; aliases compare case-insensitively.
    pub imports: Vec<(String, String)>,
}

impl NameContext {
    /// Resolve a class name as written in source to its fully-qualified form.
    pub(crate) fn resolve(&self, written: &str) -> String {
        if let Some(absolute) = written.strip_prefix('\\') {
            return absolute.to_string();
        }
        if let Some(head) = written.get(..10)
            && head.eq_ignore_ascii_case("namespace\\")
        {
            return self.qualify(&written[10..]);
        }
        let (head, rest) = match written.split_once('\\') {
            Some((head, rest)) => (head, Some(rest)),
            None => (written, None),
        };
        if let Some((_, target)) =
            self.imports.iter().rev().find(|(alias, _)| alias.eq_ignore_ascii_case(head))
        {
            return match rest {
                Some(rest) => format!("{}\\{}", target, rest),
                None => target.clone(),
            };
        }
        self.qualify(written)
    }

    fn qualify(&self, relative: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}\\{}", namespace, relative),
            None => relative.to_string(),
        }
    }
}

/// Evaluate the expression spanning `range`.
pub(crate) fn evaluate(
    source: &str,
    tokens: &[Token],
    range: TokenRange,
    names: &NameContext,
) -> Evaluated {
    let slice = &tokens[range.first..=range.last];
    match slice {
        [single] if single.kind == TokenKind::String => {
            match unquote(single.text(source)) {
                Some(value) => Evaluated::Known(value),
                None => Evaluated::Opaque(single.text(source).to_string()),
            }
        }
        [single] if single.kind == TokenKind::Word && is_decimal(single.text(source)) => {
            Evaluated::Known(single.text(source).to_string())
        }
        [class, colons, keyword]
            if class.kind == TokenKind::Word
                && colons.kind == TokenKind::DoubleColon
                && keyword.is_word(source, "class")
                && !is_relative_keyword(class.text(source)) =>
        {
            Evaluated::Known(names.resolve(class.text(source)))
        }
        _ => Evaluated::Opaque(range_text(source, tokens, range).to_string()),
    }
}

fn is_decimal(text: &str) -> bool {
    text == "0"
        || (!text.starts_with('0') && !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()))
}

fn is_relative_keyword(name: &str) -> bool {
    ["self", "static", "parent"].iter().any(|kw| name.eq_ignore_ascii_case(kw))
}

/// Contents of a quoted string literal. `None` for interpolating or
/// heredoc strings whose value cannot be known statically.
fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next()?;
    let body = text.get(1..text.len().checked_sub(1)?)?;
    match quote {
        '\'' => {
            let mut out = String::with_capacity(body.len());
            let mut iter = body.chars().peekable();
            while let Some(c) = iter.next() {
                if c == '\\' && matches!(iter.peek(), Some('\\' | '\'')) {
                    out.extend(iter.next());
                } else {
                    out.push(c);
                }
            }
            Some(out)
        }
        '"' if !body.contains('$') => {
            let mut out = String::with_capacity(body.len());
            let mut iter = body.chars();
            while let Some(c) = iter.next() {
                if c != '\\' {
                    out.push(c);
                    continue;
                }
                match iter.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(escaped @ ('\\' | '"' | '$')) => out.push(escaped),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                }
            }
            Some(out)
        }
        _ => None,
    }
}
