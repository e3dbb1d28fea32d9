//! Headline/Rating Generator.
//!
//! Produces a `BusinessSnapshot` from a business name and location:
//! a rating, a review count and a headline rendered from a template.
//! Nothing is stored; every call starts from scratch.

use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::generation::templates::{render, HeadlineTemplates};

pub const RATING_RANGE: RangeInclusive<f64> = 3.5..=5.0;
/// Half-open: 50 through 499 reviews.
pub const REVIEWS_RANGE: Range<u32> = 50..500;

pub const MISSING_INPUT_MESSAGE: &str = "Business name and location are required";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,
}

/// The ephemeral result of one analyze call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSnapshot {
    /// 3.5 to 5.0, one decimal place.
    pub rating: f64,
    pub reviews: u32,
    pub headline: String,
}

impl BusinessSnapshot {
    /// Swaps in a new headline; rating and reviews are kept.
    pub fn replace_headline(&mut self, headline: String) {
        self.headline = headline;
    }
}

/// Stateless generator over a shared, read-only template set.
#[derive(Debug, Clone)]
pub struct SnapshotGenerator {
    templates: Arc<HeadlineTemplates>,
}

impl SnapshotGenerator {
    pub fn new(templates: Arc<HeadlineTemplates>) -> Self {
        Self { templates }
    }

    /// Generates a full snapshot: rating, reviews and headline.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        location: &str,
    ) -> Result<BusinessSnapshot, GenerationError> {
        validate_inputs(name, location)?;

        let rating = round_one_decimal(rng.gen_range(RATING_RANGE));
        let reviews = rng.gen_range(REVIEWS_RANGE);
        let headline = self.draw_headline(rng, name, location);

        debug!(rating, reviews, %headline, "Generated business snapshot");

        Ok(BusinessSnapshot {
            rating,
            reviews,
            headline,
        })
    }

    /// Draws a fresh headline only. The same template may come up again.
    pub fn regenerate_headline<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        location: &str,
    ) -> Result<String, GenerationError> {
        validate_inputs(name, location)?;
        Ok(self.draw_headline(rng, name, location))
    }

    fn draw_headline<R: Rng + ?Sized>(&self, rng: &mut R, name: &str, location: &str) -> String {
        render(self.templates.pick(rng), name, location)
    }
}

impl Default for SnapshotGenerator {
    fn default() -> Self {
        Self::new(Arc::new(HeadlineTemplates::default()))
    }
}

/// Both fields must be non-empty. Whitespace counts as content.
pub fn validate_inputs(name: &str, location: &str) -> Result<(), GenerationError> {
    if name.is_empty() || location.is_empty() {
        return Err(GenerationError::MissingInput);
    }
    Ok(())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
