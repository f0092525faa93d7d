// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowed page cache.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Direction the current page moved in, relative to page indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Travel {
    /// The current page moved toward lower indices.
    Backward,
    /// The current page moved toward higher indices.
    Forward,
}

/// Cache of materialized page views keyed by page index.
///
/// This type:
/// - owns every view it hands out,
/// - materializes views lazily, exactly once per index between evictions,
/// - evicts at most one view per committed page change via [`maintain_window`](Self::maintain_window).
///
/// Borrowers that need to refer to a cached view across calls should hold the
/// page index, not the view, and look it up again with [`get`](Self::get).
#[derive(Debug, Clone)]
pub struct PageCache<V> {
    views: HashMap<usize, V>,
    radius: usize,
}

impl<V> PageCache<V> {
    /// Creates an empty cache retaining `radius` pages on each side of the current page.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self {
            views: HashMap::new(),
            radius,
        }
    }

    /// Returns the window radius.
    #[must_use]
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Sets the window radius.
    ///
    /// Already cached views are kept; the new radius takes effect at the next
    /// [`maintain_window`](Self::maintain_window).
    pub fn set_radius(&mut self, radius: usize) {
        self.radius = radius;
    }

    /// Number of cached views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if no views are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Returns `true` if a view for `index` is cached.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.views.contains_key(&index)
    }

    /// Returns the cached view for `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.views.get(&index)
    }

    /// Returns the view for `index`, materializing it with `make` if it is not cached.
    ///
    /// `make` is called at most once per index between evictions, and the view
    /// it produces is always stored before being returned.
    pub fn get_or_insert_with(&mut self, index: usize, make: impl FnOnce(usize) -> V) -> &V {
        self.views.entry(index).or_insert_with(|| make(index))
    }

    /// Removes and returns the view for `index`.
    pub fn remove(&mut self, index: usize) -> Option<V> {
        self.views.remove(&index)
    }

    /// Cached indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> SmallVec<[usize; 8]> {
        let mut indices: SmallVec<[usize; 8]> = self.views.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Removes every view whose index is no longer inside `0..page_count`.
    ///
    /// Returns the removed entries in ascending index order.
    pub fn truncate(&mut self, page_count: usize) -> Vec<(usize, V)> {
        let stale: SmallVec<[usize; 4]> = self
            .indices()
            .into_iter()
            .filter(|&index| index >= page_count)
            .collect();
        stale
            .into_iter()
            .filter_map(|index| self.views.remove(&index).map(|view| (index, view)))
            .collect()
    }

    /// Removes every cached view, in ascending index order.
    pub fn drain(&mut self) -> Vec<(usize, V)> {
        let mut all: Vec<(usize, V)> = self.views.drain().collect();
        all.sort_unstable_by_key(|(index, _)| *index);
        all
    }

    /// The index range retained around `current`, clamped to `0..page_count`.
    #[must_use]
    pub fn window(&self, current: usize, page_count: usize) -> Range<usize> {
        let start = current.saturating_sub(self.radius).min(page_count);
        let end = current
            .saturating_add(self.radius)
            .saturating_add(1)
            .min(page_count);
        start..end.max(start)
    }

    /// The page [`maintain_window`](Self::maintain_window) would evict, whether or not it is cached.
    ///
    /// After the current page moves to `current`, the page `radius + 1`
    /// positions behind it has just left the window. It is only reported while
    /// `current` is at least `radius` pages from the start and strictly before
    /// `max(page_count - 1 - radius, 1)`.
    #[must_use]
    pub fn eviction_candidate(
        &self,
        current: usize,
        travel: Travel,
        page_count: usize,
    ) -> Option<usize> {
        let upper = page_count
            .saturating_sub(1)
            .saturating_sub(self.radius)
            .max(1);
        if current < self.radius || current >= upper {
            return None;
        }
        match travel {
            Travel::Forward => current.checked_sub(self.radius.saturating_add(1)),
            Travel::Backward => current.checked_add(self.radius.saturating_add(1)),
        }
    }

    /// Evicts the page that fell behind the window after a move to `current`.
    ///
    /// At most one entry is removed. The removed view is returned so the caller
    /// can detach it from its rendering tree.
    pub fn maintain_window(
        &mut self,
        current: usize,
        travel: Travel,
        page_count: usize,
    ) -> Option<(usize, V)> {
        let index = self.eviction_candidate(current, travel, page_count)?;
        self.views.remove(&index).map(|view| (index, view))
    }
}

impl<V> Default for PageCache<V> {
    fn default() -> Self {
        Self::new(1)
    }
}
