//! Per-category capacity tables.
//!
//! A [`CapacityTable`] is immutable once built. The admin tool and the public
//! page each build their own from `[admin]` and `[site]` in `officina.toml`;
//! the two are never reconciled.

use crate::config::{AdminConfig, LimitsConfig, SiteConfig};
use crate::store::Gallery;
use crate::types::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    limits: LimitsConfig,
    /// Limit for names outside the closed category set. Only the public
    /// page has one; the admin tool never sees such names.
    fallback: Option<usize>,
}

impl CapacityTable {
    pub fn new(limits: &LimitsConfig, fallback: Option<usize>) -> Self {
        Self {
            limits: limits.clone(),
            fallback,
        }
    }

    pub fn admin(config: &AdminConfig) -> Self {
        Self::new(&config.limits, None)
    }

    pub fn site(config: &SiteConfig) -> Self {
        Self::new(&config.limits, Some(config.default_limit))
    }

    pub fn limit(&self, category: Category) -> usize {
        self.limits.get(category)
    }

    /// Limit for a raw category name. Names outside the table get the
    /// fallback, or `None` when the table has none.
    pub fn limit_for(&self, name: &str) -> Option<usize> {
        match name.parse::<Category>() {
            Ok(category) => Some(self.limit(category)),
            Err(_) => self.fallback,
        }
    }

    pub fn fallback(&self) -> Option<usize> {
        self.fallback
    }

    /// Every category and its limit, in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.limit(c)))
    }

    /// `limit - count`, or zero for a category already over its limit.
    pub fn remaining(&self, gallery: &Gallery, category: Category) -> usize {
        self.limit(category)
            .saturating_sub(gallery.count_of(category))
    }

    pub fn counter(&self, gallery: &Gallery, category: Category) -> CounterState {
        CounterState::new(gallery.count_of(category), self.limit(category))
    }
}

/// How close a category is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    /// At or above 80% of the limit.
    Warning,
    Full,
}

/// `count/limit` display state for the admin counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub count: usize,
    pub limit: usize,
    pub level: CounterLevel,
}

impl CounterState {
    pub fn new(count: usize, limit: usize) -> Self {
        let level = if count >= limit {
            CounterLevel::Full
        } else if count * 5 >= limit * 4 {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };
        Self {
            count,
            limit,
            level,
        }
    }
}
