//! URL template compilation.
//!
//! A template is a path with `{field}` placeholders:
//!
//! ```text
//! /{year}/{month}/{date}-{title}
//!   │       │       │      └── ([^/\s]+)
//!   │       │       └───────── ([0-9]{2})
//!   │       └───────────────── ([0-9]{2})
//!   └───────────────────────── ([0-9]{4})
//! ```
//!
//! Compiling it yields the regex source, the anchored regex and the ordered
//! mapping from field to capture-group index (1-based). Archive aliases are
//! compiled with [`literal`] and never capture.

use crate::config::BlogConfig;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Tag listing template, always the last archive pattern.
const TAG_TEMPLATE: &str = "/tag/{tag}";

/// Errors raised while compiling a URL template.
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("unknown placeholder `{{{0}}}` in `{1}`")]
    UnknownField(String, String),

    #[error("unterminated placeholder in `{0}`")]
    Unterminated(String),

    #[error("placeholder `{{{0}}}` appears more than once in `{1}`")]
    DuplicateField(Field, String),

    #[error("post template `{1}` has no `{{{0}}}` placeholder")]
    MissingField(Field, String),

    #[error("post template `{0}` must place year, month and date in that order")]
    FieldOrder(String),

    #[error("invalid pattern `{0}`")]
    Regex(String, #[source] regex::Error),
}

/// A named placeholder in a URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Date,
    Title,
    Tag,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "date" => Some(Self::Date),
            "title" => Some(Self::Title),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }

    /// Placeholder name as written in templates.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Date => "date",
            Self::Title => "title",
            Self::Tag => "tag",
        }
    }

    /// Capture-group fragment matched by this field. Digits are ASCII only.
    const fn fragment(self) -> &'static str {
        match self {
            Self::Year => r"([0-9]{4})",
            Self::Month | Self::Date => r"([0-9]{2})",
            Self::Title | Self::Tag => r"([^/\s]+)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled URL template.
///
/// `pattern` is the unanchored regex source; matching always goes through
/// the anchored `regex`, so a path matches only as a whole.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    mappings: Vec<(Field, usize)>,
    regex: Regex,
}

impl CompiledPattern {
    /// Regex source, without anchors.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Field to capture-group index, in placeholder order.
    pub fn mappings(&self) -> &[(Field, usize)] {
        &self.mappings
    }

    /// Capture-group index of a field, if the template has it.
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.mappings
            .iter()
            .find_map(|&(f, index)| (f == field).then_some(index))
    }

    /// Match a whole path and return the captured value of every mapped field.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<(Field, &'p str)>> {
        let caps = self.regex.captures(path)?;
        self.mappings
            .iter()
            .map(|&(field, index)| caps.get(index).map(|m| (field, m.as_str())))
            .collect()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.mappings == other.mappings
    }
}

/// Compile a URL template into a [`CompiledPattern`].
///
/// Literal runs are regex-escaped; each placeholder becomes its field's
/// capture group, numbered by its position among all placeholders.
pub fn compile(template: &str) -> Result<CompiledPattern, PatternError> {
    let mut pattern = String::with_capacity(template.len() * 2);
    let mut mappings: Vec<(Field, usize)> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        pattern.push_str(&regex::escape(&rest[..open]));

        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| PatternError::Unterminated(template.to_owned()))?;
        let name = &after[..close];
        let field = Field::from_name(name)
            .ok_or_else(|| PatternError::UnknownField(name.to_owned(), template.to_owned()))?;
        if mappings.iter().any(|&(f, _)| f == field) {
            return Err(PatternError::DuplicateField(field, template.to_owned()));
        }

        pattern.push_str(field.fragment());
        mappings.push((field, mappings.len() + 1));
        rest = &after[close + 1..];
    }
    pattern.push_str(&regex::escape(rest));

    anchored(pattern, mappings)
}

/// Compile a path matched verbatim, braces included.
pub fn literal(path: &str) -> Result<CompiledPattern, PatternError> {
    anchored(regex::escape(path), Vec::new())
}

fn anchored(
    pattern: String,
    mappings: Vec<(Field, usize)>,
) -> Result<CompiledPattern, PatternError> {
    let regex = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|err| PatternError::Regex(pattern.clone(), err))?;

    Ok(CompiledPattern {
        pattern,
        mappings,
        regex,
    })
}

/// Compile the archive patterns, in matching order:
///
/// 1. one literal pattern per `archive_urls` alias
/// 2. year, year+month, year+month+date (post template cut after that field)
/// 3. `/tag/{tag}`
pub fn compile_archive_set(config: &BlogConfig) -> Result<Vec<CompiledPattern>, PatternError> {
    let template = config.post_url.as_str();
    let mut archives = config
        .archive_urls
        .values()
        .map(|path| literal(path))
        .collect::<Result<Vec<_>, _>>()?;

    let ends = date_field_ends(template)?;
    for end in ends {
        archives.push(compile(&template[..end])?);
    }

    archives.push(compile(TAG_TEMPLATE)?);
    Ok(archives)
}

/// Byte offsets right after the `{year}`, `{month}` and `{date}` placeholders.
fn date_field_ends(template: &str) -> Result<[usize; 3], PatternError> {
    let mut ends = [0usize; 3];
    for (slot, field) in [Field::Year, Field::Month, Field::Date].into_iter().enumerate() {
        let placeholder = format!("{{{field}}}");
        let start = template
            .find(&placeholder)
            .ok_or_else(|| PatternError::MissingField(field, template.to_owned()))?;
        ends[slot] = start + placeholder.len();
    }

    if !(ends[0] < ends[1] && ends[1] < ends[2]) {
        return Err(PatternError::FieldOrder(template.to_owned()));
    }
    Ok(ends)
}
