//! URL-safe slugs used as stable external keys for plant types.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. [`slugify`] derives one from free text the
//! same way the catalog's administrative form does: fold diacritics, lowercase,
//! and collapse everything else into single hyphens.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Validation errors returned by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    /// The candidate was empty (or reduced to nothing by slugification).
    Empty,
    /// The candidate contains characters outside `[a-z0-9-]`.
    InvalidCharacters,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::InvalidCharacters => write!(
                f,
                "slug must contain lowercase ASCII letters, digits, and hyphens"
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// Derive a slug from free text.
///
/// NFKD-normalises the input, drops combining marks, lowercases, and collapses
/// runs of any other character into single hyphens. Leading and trailing
/// hyphens never appear in the result.
///
/// # Examples
/// ```
/// use backend::domain::slugify;
///
/// assert_eq!(slugify("Alocasia Dragon Scale"), "alocasia-dragon-scale");
/// assert_eq!(slugify("  Späth's  Favourite "), "spath-s-favourite");
/// assert_eq!(slugify("!!!"), "");
/// ```
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in value.nfkd().filter(|ch| !is_combining_mark(*ch)) {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(lower);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Validated slug value.
///
/// ## Invariants
/// - Non-empty, already trimmed.
/// - Only lowercase ASCII letters, digits, and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`] from an already-slugified value.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        let allowed = value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
        if !allowed || value.trim() != value {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Slugify free text and validate the result.
    ///
    /// Fails with [`SlugValidationError::Empty`] when nothing survives
    /// slugification (for example punctuation-only input).
    pub fn from_text(value: &str) -> Result<Self, SlugValidationError> {
        Self::new(slugify(value))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
