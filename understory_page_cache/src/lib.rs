// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Page Cache: a bounded cache of materialized page views.
//!
//! Paged UIs (carousels, book readers, cube transitions) only need a handful of
//! their pages to exist as real views at any time: the current page plus a few
//! neighbors on either side. This crate owns those views, keyed by page index,
//! and decides which one to drop when the current page moves.
//!
//! The core concepts are:
//!
//! - [`PageCache`]: a map from page index to an owned view `V`, populated lazily
//!   through [`PageCache::get_or_insert_with`].
//! - A window *radius*: the number of pages retained on each side of the
//!   current page.
//! - [`Travel`]: which way the current page moved, used by
//!   [`PageCache::maintain_window`] to evict the single page that just fell
//!   behind the window.
//!
//! Each committed page change evicts at most one entry, and nothing is evicted
//! while the current page is within `radius` pages of either end of the range.
//!
//! Like the rest of Understory, this crate does not know about any widget or
//! display tree. Views handed back by eviction are returned to the caller, who
//! is responsible for detaching them from whatever renders them.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_page_cache::{PageCache, Travel};
//!
//! let mut cache: PageCache<String> = PageCache::new(1);
//! for index in 0..=3 {
//!     cache.get_or_insert_with(index, |i| format!("page {i}"));
//! }
//! assert_eq!(cache.len(), 4);
//!
//! // The current page moved forward from 2 to 3 in a 10-page range:
//! // page 1 is now two pages behind and gets evicted.
//! let evicted = cache.maintain_window(3, Travel::Forward, 10);
//! assert_eq!(evicted, Some((1, String::from("page 1"))));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;

pub use cache::{PageCache, Travel};
