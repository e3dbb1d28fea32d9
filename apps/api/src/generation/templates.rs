//! Headline templates: the fixed, ordered list headlines are drawn from.
//!
//! A template is plain text containing `{name}` and `{location}` placeholders.
//! The set is built once at startup and shared read-only across requests.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

pub const NAME_PLACEHOLDER: &str = "{name}";
pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// Built-in SEO headline templates.
const DEFAULT_TEMPLATES: &[&str] = &[
    "Why {name} is {location}'s Top Choice in 2025",
    "Discover {name} - {location}'s Hidden Gem",
    "{name}: The Best in {location} for Quality and Service",
    "2025's Must-Visit: {name} in {location}",
    "{name} - Redefining Excellence in {location}",
    "The Ultimate Guide to {name} in {location}",
    "{name}: {location}'s Premier Destination",
    "Why Everyone in {location} is Talking About {name}",
    "{name} - Setting New Standards in {location}",
    "Experience the Best of {location} at {name}",
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template list is empty")]
    Empty,

    #[error("template {index} is missing the {placeholder} placeholder: {template:?}")]
    MissingPlaceholder {
        index: usize,
        placeholder: &'static str,
        template: String,
    },

    #[error("failed to read templates file: {0}")]
    Io(#[from] std::io::Error),

    #[error("templates file is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable, validated list of headline templates.
#[derive(Debug, Clone)]
pub struct HeadlineTemplates {
    templates: Vec<String>,
}

impl HeadlineTemplates {
    /// Builds a template set. Every template must contain both placeholders.
    pub fn new(templates: Vec<String>) -> Result<Self, TemplateError> {
        if templates.is_empty() {
            return Err(TemplateError::Empty);
        }

        for (index, template) in templates.iter().enumerate() {
            for placeholder in [NAME_PLACEHOLDER, LOCATION_PLACEHOLDER] {
                if !template.contains(placeholder) {
                    return Err(TemplateError::MissingPlaceholder {
                        index,
                        placeholder,
                        template: template.clone(),
                    });
                }
            }
        }

        Ok(Self { templates })
    }

    /// Loads templates from a JSON file holding an array of strings.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path)?;
        let templates: Vec<String> = serde_json::from_str(&raw)?;
        Self::new(templates)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(String::as_str)
    }

    /// Picks one template uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` guarantees at least one template
        self.templates
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl Default for HeadlineTemplates {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Substitutes every `{name}` and `{location}` in `template`.
///
/// Single left-to-right pass: inserted values are never scanned again, so a
/// business literally called "{location}" comes through unchanged.
pub fn render(template: &str, name: &str, location: &str) -> String {
    let mut out = String::with_capacity(template.len() + name.len() + location.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        if let Some(after) = tail.strip_prefix(NAME_PLACEHOLDER) {
            out.push_str(name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(LOCATION_PLACEHOLDER) {
            out.push_str(location);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
