use std::path::Path;

use tracing::debug;

use super::error::ConfigError;
use super::layout::{Edit, apply_edits, plan_insertion};
use super::lexer::{Token, TokenKind, tokenize};
use super::literal::{ConfigLiteral, Evaluated, NameContext, evaluate};
use super::mapping::{ArrayStyle, Item, Mapping, TokenRange, mapping_at, range_text};
use super::section_path::SectionPath;
use crate::domain::AppError;
use crate::ports::ProjectFilesystem;

/// Outcome of [`ConfigDocument::set_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryChange {
    /// The key was appended to its section.
    Inserted,
    /// The key existed and its value was rewritten in place.
    Replaced,
    /// The key already mapped to the same value; the text is untouched.
    Unchanged,
}

/// One element of a section, as source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'d> {
    pub key: Option<&'d str>,
    pub value: &'d str,
}

/// A PHP configuration file whose content is a single returned array literal.
///
/// Edits splice new text into the byte range they affect and copy the rest of
/// the file unchanged, so comments and formatting survive.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    source: String,
    tokens: Vec<Token>,
    root: Mapping,
    names: NameContext,
    created: bool,
}

/// A nested array section located by a [`SectionPath`].
#[derive(Debug, Clone)]
pub struct Section<'d> {
    path: SectionPath,
    document: &'d ConfigDocument,
    mapping: Mapping,
}

enum Located {
    Found(Mapping),
    Missing { parent: Mapping, depth: usize },
}

impl ConfigDocument {
    /// Index `source`.
    pub fn parse(source: impl Into<String>) -> Result<Self, ConfigError> {
        Self::index(source.into(), false)
    }

    /// Read and index the file at `path` through the project filesystem.
    pub fn load<F: ProjectFilesystem>(filesystem: &F, path: &Path) -> Result<Self, AppError> {
        if !filesystem.file_exists(path) {
            return Err(AppError::NotFound(path.to_path_buf()));
        }
        let source = filesystem.read_file(path)?;
        Self::parse(source)
            .map_err(|source| AppError::InvalidConfigFile { path: path.to_path_buf(), source })
    }

    /// A new document returning an empty array.
    pub fn create_empty() -> Self {
        let source = "<?php\n\nreturn [];\n".to_string();
        let tokens = vec![
            Token { kind: TokenKind::OpenTag, start: 0, end: 5 },
            Token { kind: TokenKind::Word, start: 7, end: 13 },
            Token { kind: TokenKind::OpenBracket, start: 14, end: 15 },
            Token { kind: TokenKind::CloseBracket, start: 15, end: 16 },
            Token { kind: TokenKind::Semicolon, start: 16, end: 17 },
        ];
        let root = Mapping {
            style: ArrayStyle::Short,
            start: 14,
            open_end: 15,
            close: 15,
            close_token: 3,
            items: Vec::new(),
        };
        Self { source, tokens, root, names: NameContext::default(), created: true }
    }

    /// Whether the document was created rather than loaded.
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// The current text.
    pub fn render(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Literal style of the returned array.
    pub fn style(&self) -> ArrayStyle {
        self.root.style
    }

    /// Elements of the returned array, in source order.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        self.entries_of(&self.root)
    }

    /// Look up an existing section.
    pub fn section(&self, path: &SectionPath) -> Result<Section<'_>, ConfigError> {
        match self.locate(path)? {
            Located::Found(mapping) => Ok(Section { path: path.clone(), document: self, mapping }),
            Located::Missing { depth, .. } => Err(ConfigError::SectionNotFound(path.prefix(depth + 1))),
        }
    }

    /// Look up a section, creating missing segments as empty arrays.
    pub fn ensure_section(&mut self, path: &SectionPath) -> Result<Section<'_>, ConfigError> {
        let mapping = self.ensure_mapping(path)?;
        Ok(Section { path: path.clone(), document: &*self, mapping })
    }

    /// Set `key => value` in the section at `path`, creating the section if needed.
    ///
    /// An existing key keeps its position and written form; only the value
    /// text is replaced. Fails with [`ConfigError::AmbiguousKey`] when the
    /// section already holds a duplicated key.
    pub fn set_entry(
        &mut self,
        path: &SectionPath,
        key: &ConfigLiteral,
        value: &ConfigLiteral,
    ) -> Result<EntryChange, ConfigError> {
        let mapping = self.ensure_mapping(path)?;
        self.ensure_unique_keys(&mapping, path)?;

        let wanted = Evaluated::Known(key.evaluated().to_string());
        let existing = self.find_item(&mapping, &wanted, path)?.map(|item| item.value);

        match existing {
            Some(range) if self.evaluate(range) == Evaluated::Known(value.evaluated().to_string()) => {
                debug!(section = %path, key = key.evaluated(), "entry already present");
                Ok(EntryChange::Unchanged)
            }
            Some(range) => {
                let span = self.tokens[range.first].start..self.tokens[range.last].end;
                let text = value.to_source(&self.names);
                debug!(section = %path, key = key.evaluated(), "replacing entry value");
                self.splice(vec![(span, text)])?;
                Ok(EntryChange::Replaced)
            }
            None => {
                let item =
                    format!("{} => {}", key.to_source(&self.names), value.to_source(&self.names));
                debug!(section = %path, key = key.evaluated(), "appending entry");
                let edits = plan_insertion(&self.source, &mapping, &item);
                self.splice(edits)?;
                let Located::Found(mapping) = self.locate(path)? else {
                    return Err(ConfigError::SectionNotFound(path.clone()));
                };
                if self.find_item(&mapping, &wanted, path)?.is_none() {
                    return Err(ConfigError::parse(
                        &self.source,
                        mapping.start,
                        format!("could not add an entry to section '{}'", path),
                    ));
                }
                Ok(EntryChange::Inserted)
            }
        }
    }

    fn index(source: String, created: bool) -> Result<Self, ConfigError> {
        let tokens = tokenize(&source)?;
        let (names, return_at) = scan_statements(&source, &tokens)?;

        let root = mapping_at(&source, &tokens, return_at + 1)?.ok_or_else(|| {
            let offset = tokens.get(return_at + 1).map_or(source.len(), |t| t.start);
            ConfigError::parse(&source, offset, "returned expression is not an array literal")
        })?;

        let after = root.close_token + 1;
        match tokens.get(after) {
            Some(token) if token.kind == TokenKind::Semicolon => {
                if let Some(extra) = tokens.get(after + 1)
                    && extra.kind != TokenKind::CloseTag
                {
                    return Err(ConfigError::parse(
                        &source,
                        extra.start,
                        "unexpected code after the returned array",
                    ));
                }
            }
            Some(token) if token.kind == TokenKind::CloseTag => {}
            Some(token) => {
                return Err(ConfigError::parse(
                    &source,
                    token.start,
                    "expected ';' after the returned array",
                ));
            }
            None => {
                return Err(ConfigError::parse(
                    &source,
                    source.len(),
                    "missing ';' after the returned array",
                ));
            }
        }

        Ok(Self { source, tokens, root, names, created })
    }

    fn splice(&mut self, edits: Vec<Edit>) -> Result<(), ConfigError> {
        let updated = apply_edits(&self.source, edits);
        *self = Self::index(updated, self.created)?;
        Ok(())
    }

    fn evaluate(&self, range: TokenRange) -> Evaluated {
        evaluate(&self.source, &self.tokens, range, &self.names)
    }

    fn entries_of(&self, mapping: &Mapping) -> Vec<Entry<'_>> {
        mapping
            .items
            .iter()
            .map(|item| Entry {
                key: item.key.map(|key| range_text(&self.source, &self.tokens, key)),
                value: range_text(&self.source, &self.tokens, item.value),
            })
            .collect()
    }

    fn find_item<'m>(
        &self,
        mapping: &'m Mapping,
        wanted: &Evaluated,
        section: &SectionPath,
    ) -> Result<Option<&'m Item>, ConfigError> {
        let mut matches = mapping
            .items
            .iter()
            .filter(|item| item.key.is_some_and(|key| self.evaluate(key) == *wanted));
        let found = matches.next();
        if found.is_some() && matches.next().is_some() {
            return Err(ConfigError::AmbiguousKey { section: section.clone(), key: wanted.describe() });
        }
        Ok(found)
    }

    fn ensure_unique_keys(&self, mapping: &Mapping, section: &SectionPath) -> Result<(), ConfigError> {
        let mut seen: Vec<Evaluated> = Vec::with_capacity(mapping.items.len());
        for key in mapping.items.iter().filter_map(|item| item.key) {
            let evaluated = self.evaluate(key);
            if seen.contains(&evaluated) {
                return Err(ConfigError::AmbiguousKey {
                    section: section.clone(),
                    key: evaluated.describe(),
                });
            }
            seen.push(evaluated);
        }
        Ok(())
    }

    fn locate(&self, path: &SectionPath) -> Result<Located, ConfigError> {
        let mut current = self.root.clone();
        for (depth, segment) in path.segments().iter().enumerate() {
            let wanted = Evaluated::Known(segment.clone());
            let value = self.find_item(&current, &wanted, &path.prefix(depth))?.map(|item| item.value);
            let Some(value) = value else {
                return Ok(Located::Missing { parent: current, depth });
            };
            match mapping_at(&self.source, &self.tokens, value.first)? {
                Some(nested) if nested.close_token == value.last => current = nested,
                _ => return Err(ConfigError::NotAMapping(path.prefix(depth + 1))),
            }
        }
        Ok(Located::Found(current))
    }

    fn ensure_mapping(&mut self, path: &SectionPath) -> Result<Mapping, ConfigError> {
        // each pass must create a deeper segment than the last
        let mut created: Option<usize> = None;
        loop {
            match self.locate(path)? {
                Located::Found(mapping) => return Ok(mapping),
                Located::Missing { parent, depth } => {
                    if created.is_some_and(|previous| depth <= previous) {
                        return Err(ConfigError::parse(
                            &self.source,
                            parent.start,
                            format!("could not create section '{}'", path.prefix(depth + 1)),
                        ));
                    }
                    created = Some(depth);
                    let key = ConfigLiteral::string(path.segments()[depth].clone());
                    let item =
                        format!("{} => {}", key.to_source(&self.names), self.root.style.empty_literal());
                    debug!(section = %path.prefix(depth + 1), "creating missing section");
                    let edits = plan_insertion(&self.source, &parent, &item);
                    self.splice(edits)?;
                }
            }
        }
    }
}

impl<'d> Section<'d> {
    pub fn path(&self) -> &SectionPath {
        &self.path
    }

    pub fn style(&self) -> ArrayStyle {
        self.mapping.style
    }

    pub fn len(&self) -> usize {
        self.mapping.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.items.is_empty()
    }

    pub fn entries(&self) -> Vec<Entry<'d>> {
        self.document.entries_of(&self.mapping)
    }

    /// Source text of the value stored under `key`.
    pub fn get(&self, key: &ConfigLiteral) -> Result<Option<&'d str>, ConfigError> {
        let document = self.document;
        let wanted = Evaluated::Known(key.evaluated().to_string());
        let found = document.find_item(&self.mapping, &wanted, &self.path)?;
        Ok(found.map(|item| range_text(&document.source, &document.tokens, item.value)))
    }
}

/// Find the top-level `return` and collect the `namespace` and `use`
/// statements that precede it.
fn scan_statements(source: &str, tokens: &[Token]) -> Result<(NameContext, usize), ConfigError> {
    let mut names = NameContext::default();
    let mut depth = 0usize;
    let mut statement_start = true;
    let mut index = 0;

    while let Some(token) = tokens.get(index) {
        if token.kind.closer().is_some() {
            depth += 1;
        } else if token.kind.is_closer() {
            depth = depth.saturating_sub(1);
        }

        if depth == 0 && statement_start && token.kind == TokenKind::Word {
            if token.is_word(source, "return") {
                return Ok((names, index));
            }
            if token.is_word(source, "use") {
                index = read_imports(source, tokens, index + 1, &mut names);
                statement_start = true;
                continue;
            }
            if token.is_word(source, "namespace")
                && let Some(name) = tokens.get(index + 1).filter(|t| t.kind == TokenKind::Word)
            {
                names.namespace = Some(name.text(source).trim_start_matches('\\').to_string());
            }
        }

        statement_start = depth == 0
            && matches!(token.kind, TokenKind::OpenTag | TokenKind::Semicolon | TokenKind::CloseBrace);
        index += 1;
    }

    Err(ConfigError::parse(source, source.len(), "no top-level return statement"))
}

/// Read the clauses of a `use` statement starting at `index`; returns the
/// index after its terminating `;`.
fn read_imports(source: &str, tokens: &[Token], mut index: usize, names: &mut NameContext) -> usize {
    let skip_kind = tokens
        .get(index)
        .is_some_and(|t| t.is_word(source, "function") || t.is_word(source, "const"));
    let mut group_prefix: Option<String> = None;

    while let Some(token) = tokens.get(index) {
        match token.kind {
            TokenKind::Semicolon => return index + 1,
            TokenKind::Word if !skip_kind => {
                let written = token.text(source).trim_start_matches('\\');
                let full = match &group_prefix {
                    Some(prefix) => format!("{}{}", prefix, written),
                    None => written.to_string(),
                };
                if tokens.get(index + 1).is_some_and(|t| t.kind == TokenKind::OpenBrace) {
                    group_prefix = Some(full);
                    index += 2;
                    continue;
                }
                let alias = match (tokens.get(index + 1), tokens.get(index + 2)) {
                    (Some(kw), Some(alias))
                        if kw.is_word(source, "as") && alias.kind == TokenKind::Word =>
                    {
                        index += 2;
                        alias.text(source).to_string()
                    }
                    _ => full.rsplit('\\').next().unwrap_or(&full).to_string(),
                };
                names.imports.push((alias, full));
            }
            TokenKind::CloseBrace => group_prefix = None,
            _ => {}
        }
        index += 1;
    }
    index
}
