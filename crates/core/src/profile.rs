//! Operating profiles
//!
//! Both profiles share the classification rules; they only differ in how many
//! headings are kept and in the thresholds of the paragraph fallback. A
//! profile can be adjusted with a small TOML document, see [`ProfileConfig`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to parse profile configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Named threshold sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    #[default]
    Batch,
    Interactive,
}

impl ProfileKind {
    pub fn profile(&self) -> Profile {
        match self {
            ProfileKind::Batch => Profile::batch(),
            ProfileKind::Interactive => Profile::interactive(),
        }
    }
}

/// What happens to a paragraph's first line once it passed the
/// `first_line_max_len` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FirstLineRule {
    /// Drop lines of `max_len` characters or more, and optionally lines
    /// ending with a period.
    Reject {
        max_len: usize,
        reject_trailing_period: bool,
    },
    /// Keep the line, cutting it to `max_chars` characters followed by
    /// `ellipsis` when it is longer.
    Truncate { max_chars: usize, ellipsis: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSettings {
    /// Paragraphs whose trimmed length is at or below this are discarded.
    pub min_paragraph_len: usize,
    /// Number of retained paragraphs considered.
    pub paragraph_count: usize,
    /// First lines must be strictly shorter than this.
    pub first_line_max_len: usize,
    pub first_line: FirstLineRule,
    /// `Some(n)`: the first `n` positions are H1 and the rest H2.
    /// `None`: every pseudo-heading is H1.
    pub h1_positions: Option<usize>,
    /// Page estimate is `index / paragraphs_per_page + 1`.
    pub paragraphs_per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Maximum number of outline entries returned.
    pub outline_cap: usize,
    pub fallback: FallbackSettings,
}

impl Profile {
    /// Thresholds used when whole directories are processed.
    pub fn batch() -> Self {
        Profile {
            outline_cap: 50,
            fallback: FallbackSettings {
                min_paragraph_len: 20,
                paragraph_count: 10,
                first_line_max_len: 80,
                first_line: FirstLineRule::Reject {
                    max_len: 60,
                    reject_trailing_period: true,
                },
                h1_positions: Some(3),
                paragraphs_per_page: 3,
            },
        }
    }

    /// Thresholds used for a single uploaded document.
    pub fn interactive() -> Self {
        Profile {
            outline_cap: 20,
            fallback: FallbackSettings {
                min_paragraph_len: 50,
                paragraph_count: 5,
                first_line_max_len: 80,
                first_line: FirstLineRule::Truncate {
                    max_chars: 50,
                    ellipsis: "...".to_string(),
                },
                h1_positions: None,
                paragraphs_per_page: 1,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let fallback = &self.fallback;
        if fallback.paragraphs_per_page == 0 {
            return Err(ProfileError::Invalid {
                field: "fallback.paragraphs_per_page",
                reason: "must be at least 1".to_string(),
            });
        }
        if fallback.paragraph_count == 0 {
            return Err(ProfileError::Invalid {
                field: "fallback.paragraph_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if let FirstLineRule::Truncate { max_chars: 0, .. } = fallback.first_line {
            return Err(ProfileError::Invalid {
                field: "fallback.first_line.max_chars",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::batch()
    }
}

/// Partial profile read from a configuration file.
///
/// ```toml
/// base = "interactive"
/// outline_cap = 30
///
/// [fallback]
/// min_paragraph_len = 40
/// first_line = { mode = "truncate", max_chars = 60, ellipsis = "…" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub base: Option<ProfileKind>,
    pub outline_cap: Option<usize>,
    #[serde(default)]
    pub fallback: FallbackOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackOverrides {
    pub min_paragraph_len: Option<usize>,
    pub paragraph_count: Option<usize>,
    pub first_line_max_len: Option<usize>,
    pub first_line: Option<FirstLineRule>,
    pub h1_positions: Option<usize>,
    pub paragraphs_per_page: Option<usize>,
}

impl ProfileConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(input)?)
    }

    /// Apply the overrides on top of `base` (or `default_base` when the file
    /// does not name one) and validate the result.
    pub fn resolve(&self, default_base: ProfileKind) -> Result<Profile, ProfileError> {
        let mut profile = self.base.unwrap_or(default_base).profile();

        if let Some(cap) = self.outline_cap {
            profile.outline_cap = cap;
        }

        let overrides = &self.fallback;
        let fallback = &mut profile.fallback;
        if let Some(v) = overrides.min_paragraph_len {
            fallback.min_paragraph_len = v;
        }
        if let Some(v) = overrides.paragraph_count {
            fallback.paragraph_count = v;
        }
        if let Some(v) = overrides.first_line_max_len {
            fallback.first_line_max_len = v;
        }
        if let Some(rule) = &overrides.first_line {
            fallback.first_line = rule.clone();
        }
        if let Some(v) = overrides.h1_positions {
            fallback.h1_positions = Some(v);
        }
        if let Some(v) = overrides.paragraphs_per_page {
            fallback.paragraphs_per_page = v;
        }

        profile.validate()?;
        Ok(profile)
    }
}
