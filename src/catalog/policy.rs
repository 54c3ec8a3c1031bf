//! Category to success-probability table.

use std::collections::HashMap;

use crate::config::{
    PROBABILITY_ARABIC_FORUM, PROBABILITY_BLOG, PROBABILITY_DEFAULT_FORUM,
    PROBABILITY_DEFAULT_SITE, PROBABILITY_NEWS, PROBABILITY_SOCIAL, PROBABILITY_VIDEO,
};

use super::types::{Category, DestinationKind};

/// Fixed per-category success probabilities.
///
/// The built-in values are policy inputs, not measurements. Override them with
/// [`SuccessPolicy::with_probability`] or [`SuccessPolicy::uniform`].
/// Lookups never fail: unknown categories resolve to the per-kind default.
#[derive(Debug, Clone)]
pub struct SuccessPolicy {
    by_category: HashMap<Category, f64>,
    default_site: f64,
    default_forum: f64,
}

impl SuccessPolicy {
    /// Same probability for every category and kind.
    pub fn uniform(probability: f64) -> Self {
        let p = clamp_probability(probability);
        Self {
            by_category: HashMap::new(),
            default_site: p,
            default_forum: p,
        }
    }

    /// Overrides the probability for one category.
    pub fn with_probability(mut self, category: Category, probability: f64) -> Self {
        self.by_category
            .insert(category, clamp_probability(probability));
        self
    }

    /// Overrides the fallback used for unknown categories of the given kind.
    pub fn with_default(mut self, kind: DestinationKind, probability: f64) -> Self {
        let p = clamp_probability(probability);
        match kind {
            DestinationKind::Site => self.default_site = p,
            DestinationKind::Forum => self.default_forum = p,
        }
        self
    }

    /// Base success probability for a destination.
    pub fn success_probability(&self, category: Category, kind: DestinationKind) -> f64 {
        if let Some(p) = self.by_category.get(&category) {
            return *p;
        }
        match kind {
            DestinationKind::Site => self.default_site,
            DestinationKind::Forum => self.default_forum,
        }
    }
}

impl Default for SuccessPolicy {
    fn default() -> Self {
        let by_category = HashMap::from([
            (Category::Social, PROBABILITY_SOCIAL),
            (Category::Blog, PROBABILITY_BLOG),
            (Category::Video, PROBABILITY_VIDEO),
            (Category::News, PROBABILITY_NEWS),
            (Category::ArabicForum, PROBABILITY_ARABIC_FORUM),
        ]);
        Self {
            by_category,
            default_site: PROBABILITY_DEFAULT_SITE,
            default_forum: PROBABILITY_DEFAULT_FORUM,
        }
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
