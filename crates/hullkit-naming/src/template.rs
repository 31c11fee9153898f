//! Two-token name templates.
//!
//! A template is an ordinary string in which the first `?` stands for the
//! base (source object) name and the first `#` stands for the hull index:
//!
//! | template | base | index | result |
//! |----------|------|-------|--------|
//! | `?_hull_#` | `Cube` | 3 | `Cube_hull_3` |
//! | `UCX_?_#` | `Rock` | 1 | `UCX_Rock_1` |
//! | `hull` | `Cube` | 2 | `hull2` |
//!
//! Only the first occurrence of each token is substituted. Later occurrences
//! are ordinary text.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{NamingError, NamingResult};

/// Token replaced by the base name.
pub const NAME_TOKEN: char = '?';

/// Token replaced by the hull index.
pub const INDEX_TOKEN: char = '#';

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "?_hull_#";

/// Regex fragment standing in for the index token when matching.
const INDEX_PATTERN: &str = "[0-9]+";

/// Generates a concrete name from a template.
///
/// The first `?` is replaced with `base_name`, then the first `#` of the
/// result is replaced with `index`. When neither substitution changed the
/// template, `index` is appended so that names stay distinct across a batch.
pub fn generate(template: &str, base_name: &str, index: usize) -> String {
    let index_str = index.to_string();
    let named = template.replacen(NAME_TOKEN, base_name, 1);
    let mut name = named.replacen(INDEX_TOKEN, &index_str, 1);
    if name == template {
        name.push_str(&index_str);
    }
    name
}

/// Builds the pattern that finds names generated from `template` for `base_name`.
///
/// The first `#` becomes a run of one or more ASCII digits and the first `?`
/// becomes `base_name` matched literally. Every other character of the
/// template is matched literally as well. The pattern is anchored at the start
/// of the candidate only, so trailing text after the match is allowed.
pub fn build_match_pattern(template: &str, base_name: &str) -> NamingResult<MatchPattern> {
    let name_pos = template
        .find(NAME_TOKEN)
        .ok_or_else(|| NamingError::invalid_template(template))?;
    let index_pos = template.find(INDEX_TOKEN);

    let mut pattern = String::with_capacity(template.len() + base_name.len() + 8);
    pattern.push('^');
    let mut buf = [0u8; 4];
    for (pos, ch) in template.char_indices() {
        if pos == name_pos {
            pattern.push_str(&regex::escape(base_name));
        } else if Some(pos) == index_pos {
            pattern.push_str(INDEX_PATTERN);
        } else {
            pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }

    let regex = Regex::new(&pattern).map_err(|e| NamingError::PatternCompile {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;
    log::debug!("match pattern for '{}': {}", base_name, pattern);

    Ok(MatchPattern {
        base_name: base_name.to_string(),
        regex,
    })
}

/// A compiled pattern matching the names generated for one base name.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    base_name: String,
    regex: Regex,
}

impl MatchPattern {
    /// Returns true if `candidate` starts with a name generated for this base name.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Returns the base name this pattern was built for.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the regular expression source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A name template as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameTemplate {
    raw: String,
}

impl NameTemplate {
    /// Creates a template from its raw string. Any string is a valid template
    /// for generation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Returns the raw template string.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if the template contains the base name token.
    pub fn has_name_token(&self) -> bool {
        self.raw.contains(NAME_TOKEN)
    }

    /// Returns true if the template contains the index token.
    pub fn has_index_token(&self) -> bool {
        self.raw.contains(INDEX_TOKEN)
    }

    /// Checks that the template can be used to match hulls.
    pub fn ensure_matchable(&self) -> NamingResult<()> {
        if self.has_name_token() {
            Ok(())
        } else {
            Err(NamingError::invalid_template(&self.raw))
        }
    }

    /// See [`generate`].
    pub fn generate(&self, base_name: &str, index: usize) -> String {
        generate(&self.raw, base_name, index)
    }

    /// Generates `count` names for `base_name`, with 1-based indices.
    pub fn generate_batch(&self, base_name: &str, count: usize) -> Vec<String> {
        (1..=count).map(|i| self.generate(base_name, i)).collect()
    }

    /// See [`build_match_pattern`].
    pub fn match_pattern(&self, base_name: &str) -> NamingResult<MatchPattern> {
        build_match_pattern(&self.raw, base_name)
    }
}

impl Default for NameTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for NameTemplate {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for NameTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NameTemplate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
