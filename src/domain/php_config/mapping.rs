//! Span index over a single array literal.

use super::error::ConfigError;
use super::lexer::{Token, TokenKind};

/// Array literal syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStyle {
    /// `[ ... ]`
    Short,
    /// `array( ... )`
    Long,
}

impl ArrayStyle {
    pub(crate) fn empty_literal(self) -> &'static str {
        match self {
            ArrayStyle::Short => "[]",
            ArrayStyle::Long => "array()",
        }
    }
}

/// Inclusive range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenRange {
    pub first: usize,
    pub last: usize,
}

/// One element of an array literal: `key => value` or a bare `value`.
#[derive(Debug, Clone)]
pub(crate) struct Item {
    pub key: Option<TokenRange>,
    pub value: TokenRange,
    /// Byte span from the first key token to the last value token.
    pub start: usize,
    pub end: usize,
    /// Byte offset of the comma following the item, if any.
    pub comma: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct Mapping {
    pub style: ArrayStyle,
    /// Byte offset of `[` or of the `array` keyword.
    pub start: usize,
    /// Byte offset just past the opening bracket or paren.
    pub open_end: usize,
    /// Byte offset of the closing bracket or paren.
    pub close: usize,
    /// Index of the closing token.
    pub close_token: usize,
    pub items: Vec<Item>,
}

impl Mapping {
    pub(crate) fn trailing_comma(&self) -> Option<usize> {
        self.items.last().and_then(|item| item.comma)
    }

    pub(crate) fn is_multiline(&self, source: &str) -> bool {
        source[self.open_end..self.close].contains('\n')
    }
}

/// Span text of a token range.
pub(crate) fn range_text<'s>(source: &'s str, tokens: &[Token], range: TokenRange) -> &'s str {
    &source[tokens[range.first].start..tokens[range.last].end]
}

/// Index the array literal starting at token `at`.
///
/// Returns `Ok(None)` when the tokens at `at` do not open an array literal.
/// Nested literals are skipped by depth counting, not indexed.
pub(crate) fn mapping_at(
    source: &str,
    tokens: &[Token],
    at: usize,
) -> Result<Option<Mapping>, ConfigError> {
    let Some(first) = tokens.get(at) else {
        return Ok(None);
    };
    let (style, open) = match first.kind {
        TokenKind::OpenBracket => (ArrayStyle::Short, at),
        TokenKind::Word
            if first.is_word(source, "array")
                && tokens.get(at + 1).is_some_and(|t| t.kind == TokenKind::OpenParen) =>
        {
            (ArrayStyle::Long, at + 1)
        }
        _ => return Ok(None),
    };
    let outer_close = if style == ArrayStyle::Short {
        TokenKind::CloseBracket
    } else {
        TokenKind::CloseParen
    };

    let mut items = Vec::new();
    let mut stack: Vec<TokenKind> = Vec::new();
    let mut item_first: Option<usize> = None;
    let mut arrow: Option<usize> = None;
    let mut index = open + 1;

    while let Some(token) = tokens.get(index) {
        match token.kind {
            TokenKind::OpenTag | TokenKind::CloseTag => break,
            kind if kind.closer().is_some() => {
                stack.push(kind);
                item_first.get_or_insert(index);
            }
            kind if kind.is_closer() => match stack.pop() {
                Some(opened) if opened.closer() == Some(kind) => {}
                Some(_) => {
                    return Err(ConfigError::parse(source, token.start, "mismatched bracket"));
                }
                None if kind == outer_close => {
                    if let Some(first_index) = item_first {
                        items.push(finish_item(source, tokens, first_index, arrow, index - 1, None)?);
                    }
                    return Ok(Some(Mapping {
                        style,
                        start: first.start,
                        open_end: tokens[open].end,
                        close: token.start,
                        close_token: index,
                        items,
                    }));
                }
                None => return Err(ConfigError::parse(source, token.start, "mismatched bracket")),
            },
            TokenKind::Comma if stack.is_empty() => {
                let Some(first_index) = item_first.take() else {
                    return Err(ConfigError::parse(source, token.start, "empty array element"));
                };
                items.push(finish_item(
                    source,
                    tokens,
                    first_index,
                    arrow.take(),
                    index - 1,
                    Some(token.start),
                )?);
            }
            TokenKind::DoubleArrow if stack.is_empty() => {
                if arrow.is_some() || item_first.is_none() {
                    return Err(ConfigError::parse(source, token.start, "unexpected '=>'"));
                }
                arrow = Some(index);
            }
            TokenKind::Semicolon if stack.is_empty() => {
                return Err(ConfigError::parse(source, token.start, "unexpected ';' in array"));
            }
            _ => {
                item_first.get_or_insert(index);
            }
        }
        index += 1;
    }

    Err(ConfigError::parse(source, tokens[open].start, "array literal is not closed"))
}

fn finish_item(
    source: &str,
    tokens: &[Token],
    first: usize,
    arrow: Option<usize>,
    last: usize,
    comma: Option<usize>,
) -> Result<Item, ConfigError> {
    let (key, value) = match arrow {
        Some(arrow) if arrow == last => {
            return Err(ConfigError::parse(source, tokens[arrow].start, "missing value after '=>'"));
        }
        Some(arrow) => {
            (Some(TokenRange { first, last: arrow - 1 }), TokenRange { first: arrow + 1, last })
        }
        None => (None, TokenRange { first, last }),
    };
    Ok(Item { key, value, start: tokens[first].start, end: tokens[last].end, comma })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::php_config::lexer::tokenize;

    fn index(source: &str) -> Mapping {
        let tokens = tokenize(source).expect("tokenize");
        mapping_at(source, &tokens, 0).expect("parse").expect("array literal")
    }

    #[test]
    fn splits_items_at_top_level_commas() {
        let source = "['a' => [1, 2], 'b' => f(3, 4), 5]";
        let mapping = index(source);
        assert_eq!(mapping.style, ArrayStyle::Short);
        assert_eq!(mapping.items.len(), 3);
        assert_eq!(&source[mapping.items[0].start..mapping.items[0].end], "'a' => [1, 2]");
        assert_eq!(&source[mapping.items[1].start..mapping.items[1].end], "'b' => f(3, 4)");
        assert!(mapping.items[2].key.is_none());
        assert_eq!(mapping.trailing_comma(), None);
    }

    #[test]
    fn records_trailing_comma() {
        let source = "[\n    'a' => 1,\n]";
        let mapping = index(source);
        assert_eq!(mapping.items.len(), 1);
        assert_eq!(mapping.trailing_comma(), Some(14));
        assert!(mapping.is_multiline(source));
    }

    #[test]
    fn long_syntax_closes_on_paren() {
        let source = "array('a' => array('b' => 1))";
        let mapping = index(source);
        assert_eq!(mapping.style, ArrayStyle::Long);
        assert_eq!(mapping.items.len(), 1);
        assert_eq!(mapping.close, source.len() - 1);
    }

    #[test]
    fn empty_array_has_no_items() {
        assert!(index("[]").items.is_empty());
        assert!(index("[ /* nothing */ ]").items.is_empty());
    }

    #[test]
    fn not_an_array_literal() {
        let source = "$config";
        let tokens = tokenize(source).expect("tokenize");
        assert!(mapping_at(source, &tokens, 0).expect("no error").is_none());
    }

    #[test]
    fn mismatched_bracket_is_an_error() {
        let source = "['a' => (1]]";
        let tokens = tokenize(source).expect("tokenize");
        assert!(mapping_at(source, &tokens, 0).is_err());
    }

    #[test]
    fn unclosed_array_is_an_error() {
        let source = "['a' => 1,";
        let tokens = tokenize(source).expect("tokenize");
        assert!(mapping_at(source, &tokens, 0).is_err());
    }

    #[test]
    fn double_comma_is_an_error() {
        let source = "[1,,2]";
        let tokens = tokenize(source).expect("tokenize");
        assert!(mapping_at(source, &tokens, 0).is_err());
    }
}
