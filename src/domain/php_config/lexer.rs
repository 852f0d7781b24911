//! Token scanner for PHP configuration files.
//!
//! Only the tokens needed to find array literals are distinguished. Strings,
//! heredocs and comments are consumed whole so that bracket characters inside
//! them never reach the bracket matcher.

use super::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    OpenTag,
    CloseTag,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    DoubleArrow,
    DoubleColon,
    Semicolon,
    String,
    Word,
    Variable,
    Punct,
}

impl TokenKind {
    /// The closing kind for an opening bracket, paren or brace.
    pub(crate) fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenBrace => Some(TokenKind::CloseBrace),
            _ => None,
        }
    }

    pub(crate) fn is_closer(self) -> bool {
        matches!(self, TokenKind::CloseBracket | TokenKind::CloseParen | TokenKind::CloseBrace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub(crate) fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    pub(crate) fn is_word(&self, source: &str, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text(source).eq_ignore_ascii_case(word)
    }
}

/// Scan `source` into tokens. Scanning stops at a `?>` close tag.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ConfigError> {
    Lexer { source, bytes: source.as_bytes(), pos: 0, tokens: Vec::new() }.run()
}

/// End offset of the last comment in the trivia between `from` and `to`, or
/// `from` when there is none. The range must hold only whitespace and
/// comments, as the inside of an empty array does.
pub(crate) fn last_comment_end(source: &str, from: usize, to: usize) -> usize {
    let mut lexer = Lexer { source, bytes: source.as_bytes(), pos: from, tokens: Vec::new() };
    let mut end = from;
    while lexer.pos < to {
        match lexer.bytes[lexer.pos] {
            b'/' if lexer.peek(1) == Some(b'/') => lexer.skip_line_comment(),
            b'/' if lexer.peek(1) == Some(b'*') => {
                if lexer.skip_block_comment().is_err() {
                    return to;
                }
            }
            b'#' if lexer.peek(1) != Some(b'[') => lexer.skip_line_comment(),
            _ => {
                lexer.pos += 1;
                continue;
            }
        }
        end = lexer.pos.min(to);
    }
    end
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'\\' || b >= 0x80
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Token>, ConfigError> {
        self.skip_preamble();

        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment()?,
                b'#' if self.peek(1) != Some(b'[') => self.skip_line_comment(),
                b'\'' | b'"' | b'`' => self.quoted(b)?,
                b'<' if self.source[self.pos..].starts_with("<<<") => self.heredoc()?,
                b'?' if self.peek(1) == Some(b'>') => {
                    self.push(TokenKind::CloseTag, 2);
                    break;
                }
                b'=' if self.peek(1) == Some(b'>') => self.push(TokenKind::DoubleArrow, 2),
                b':' if self.peek(1) == Some(b':') => self.push(TokenKind::DoubleColon, 2),
                b'[' => self.push(TokenKind::OpenBracket, 1),
                b']' => self.push(TokenKind::CloseBracket, 1),
                b'(' => self.push(TokenKind::OpenParen, 1),
                b')' => self.push(TokenKind::CloseParen, 1),
                b'{' => self.push(TokenKind::OpenBrace, 1),
                b'}' => self.push(TokenKind::CloseBrace, 1),
                b',' => self.push(TokenKind::Comma, 1),
                b';' => self.push(TokenKind::Semicolon, 1),
                b'$' if self.peek(1).is_some_and(is_name_start) => {
                    let len = 1 + self.word_len(self.pos + 1);
                    self.push(TokenKind::Variable, len);
                }
                b if is_word_byte(b) => {
                    let len = self.word_len(self.pos);
                    self.push(TokenKind::Word, len);
                }
                _ => self.push(TokenKind::Punct, 1),
            }
        }

        Ok(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, len: usize) {
        self.tokens.push(Token { kind, start: self.pos, end: self.pos + len });
        self.pos += len;
    }

    fn word_len(&self, from: usize) -> usize {
        self.bytes[from..].iter().take_while(|b| is_word_byte(**b)).count()
    }

    /// Skip a BOM and shebang, then consume a leading `<?php` tag if present.
    /// Files without an open tag are scanned from the start.
    fn skip_preamble(&mut self) {
        let mut at = if self.source.starts_with('\u{feff}') { 3 } else { 0 };
        if self.source[at..].starts_with("#!") {
            at = self.source[at..].find('\n').map_or(self.source.len(), |i| at + i + 1);
        }
        let trimmed = self.source[at..].trim_start();
        let tag_at = self.source.len() - trimmed.len();
        if trimmed.get(..5).is_some_and(|tag| tag.eq_ignore_ascii_case("<?php")) {
            let follows = trimmed.as_bytes().get(5).copied();
            if follows.is_none_or(|b| b.is_ascii_whitespace()) {
                self.pos = tag_at;
                self.push(TokenKind::OpenTag, 5);
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\n' => return,
                b'?' if self.peek(1) == Some(b'>') => return,
                _ => self.pos += 1,
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ConfigError> {
        match self.source[self.pos + 2..].find("*/") {
            Some(offset) => {
                self.pos += 2 + offset + 2;
                Ok(())
            }
            None => Err(ConfigError::parse(self.source, self.pos, "unterminated comment")),
        }
    }

    fn quoted(&mut self, quote: u8) -> Result<(), ConfigError> {
        let start = self.pos;
        let mut at = start + 1;
        while at < self.bytes.len() {
            match self.bytes[at] {
                b'\\' => at += 2,
                b if b == quote => {
                    self.pos = start;
                    self.push(TokenKind::String, at + 1 - start);
                    return Ok(());
                }
                _ => at += 1,
            }
        }
        Err(ConfigError::parse(self.source, start, "unterminated string literal"))
    }

    /// Heredoc and nowdoc: `<<<ID` / `<<<'ID'` / `<<<"ID"` up to a line
    /// whose first non-blank text is the identifier.
    fn heredoc(&mut self) -> Result<(), ConfigError> {
        let start = self.pos;
        let mut at = start + 3;
        while matches!(self.bytes.get(at), Some(b' ' | b'\t')) {
            at += 1;
        }
        let quote = match self.bytes.get(at) {
            Some(q @ (b'\'' | b'"')) => {
                at += 1;
                Some(*q)
            }
            _ => None,
        };
        let ident_len = match self.bytes.get(at) {
            Some(b) if is_name_start(*b) => self.word_len(at),
            _ => 0,
        };
        if ident_len == 0 {
            self.push(TokenKind::Punct, 1);
            return Ok(());
        }
        let ident = &self.source[at..at + ident_len];
        at += ident_len;
        if let Some(q) = quote {
            if self.bytes.get(at) != Some(&q) {
                return Err(ConfigError::parse(self.source, start, "malformed heredoc label"));
            }
            at += 1;
        }
        if self.bytes.get(at) == Some(&b'\r') {
            at += 1;
        }
        if self.bytes.get(at) != Some(&b'\n') {
            return Err(ConfigError::parse(self.source, start, "malformed heredoc label"));
        }
        at += 1;

        while at < self.bytes.len() {
            let line_end = self.source[at..].find('\n').map_or(self.bytes.len(), |i| at + i);
            let line = &self.source[at..line_end];
            let body = line.trim_start_matches([' ', '\t']);
            let indent = line.len() - body.len();
            if body.starts_with(ident)
                && !body.as_bytes().get(ident_len).is_some_and(|b| is_word_byte(*b))
            {
                self.pos = start;
                self.push(TokenKind::String, at + indent + ident_len - start);
                return Ok(());
            }
            at = line_end + 1;
        }
        Err(ConfigError::parse(self.source, start, "unterminated heredoc"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).expect("tokenize").into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn open_tag_and_return_statement() {
        use TokenKind::*;
        assert_eq!(
            kinds("<?php\nreturn [];\n"),
            vec![OpenTag, Word, OpenBracket, CloseBracket, Semicolon]
        );
    }

    #[test]
    fn brackets_inside_strings_are_not_tokens() {
        let tokens = tokenize("['a]' => \"[b\\\"]\"]").expect("tokenize");
        let brackets = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::OpenBracket | TokenKind::CloseBracket))
            .count();
        assert_eq!(brackets, 2);
    }

    #[test]
    fn comments_are_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("[ // ]\n /* ] */ # ]\n ]"), vec![OpenBracket, CloseBracket]);
    }

    #[test]
    fn attribute_hash_is_not_a_comment() {
        use TokenKind::*;
        assert_eq!(kinds("#[Attr]"), vec![Punct, OpenBracket, Word, CloseBracket]);
    }

    #[test]
    fn class_reference_tokens() {
        use TokenKind::*;
        let source = "\\App\\Foo::class";
        let tokens = tokenize(source).expect("tokenize");
        assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), vec![Word, DoubleColon, Word]);
        assert_eq!(tokens[0].text(source), "\\App\\Foo");
    }

    #[test]
    fn heredoc_is_one_string_token() {
        let source = "[<<<EOT\n  ] not a bracket\n  EOT, 1]";
        let tokens = tokenize(source).expect("tokenize");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert!(tokens[1].text(source).ends_with("EOT"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::CloseBracket));
    }

    #[test]
    fn scanning_stops_at_close_tag() {
        use TokenKind::*;
        assert_eq!(kinds("<?php return []; ?>\n<html>[</html>"), vec![
            OpenTag,
            Word,
            OpenBracket,
            CloseBracket,
            Semicolon,
            CloseTag
        ]);
    }

    #[test]
    fn unterminated_string_reports_position() {
        let err = tokenize("<?php\nreturn ['abc];").expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { line: 2, column: 9, .. }), "{err:?}");
    }

    #[test]
    fn unterminated_comment_fails() {
        assert!(tokenize("return [ /* ];").is_err());
    }

    #[test]
    fn last_comment_end_skips_whitespace_and_comments() {
        let source = "[ /* a\n b */ // c\n  ]";
        let close = source.len() - 1;
        assert_eq!(last_comment_end(source, 1, close), source.find("\n  ]").expect("newline"));
        assert_eq!(last_comment_end("[\n  ]", 1, 4), 1);
        assert_eq!(last_comment_end("[ /* x */ ]", 1, 10), 9);
    }
}
