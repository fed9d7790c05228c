//! Column-aligned batch pagination for the post grid.

use std::ops::Range;
use std::time::Duration;

/// Per-item cascade delay within one revealed batch.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);

/// Terminal-width breakpoints standing in for the CSS grid's column
/// template: widths below the first breakpoint render one column, and each
/// crossed breakpoint adds one, up to four.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub breakpoints: [u16; 3],
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            breakpoints: [70, 110, 150],
        }
    }
}

impl GridLayout {
    /// Number of columns the grid renders at `width`. `None` means layout
    /// information is unavailable and falls back to a single column.
    pub fn columns(&self, width: Option<u16>) -> usize {
        let w = match width {
            Some(w) => w,
            None => return 1,
        };
        1 + self.breakpoints.iter().filter(|&&bp| w >= bp).count()
    }
}

/// Items revealed per pagination step: one phone-sized screenful on a
/// single-column layout, exactly two full rows otherwise.
pub fn batch_size(cols: usize) -> usize {
    if cols <= 1 {
        6
    } else {
        cols * 2
    }
}

/// One revealed batch of grid item indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub range: Range<usize>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Cascade delay for `index`, counted from the start of this batch.
    pub fn reveal_delay(&self, index: usize) -> Duration {
        REVEAL_STAGGER * index.saturating_sub(self.range.start) as u32
    }
}

/// Pagination state over the grid-eligible items. Only ever mutated from
/// the owning event callbacks; the displayed count grows in column-aligned
/// batches so the last visible row is never partially filled unless the
/// catalog is exhausted.
#[derive(Debug, Clone)]
pub struct GridPager {
    total: usize,
    displayed: usize,
    user_requested: bool,
}

impl GridPager {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            displayed: 0,
            user_requested: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn is_exhausted(&self) -> bool {
        self.displayed >= self.total
    }

    /// The "load more" control is shown while items remain.
    pub fn load_more_visible(&self) -> bool {
        self.displayed < self.total
    }

    /// Reveal the next batch for the current column count. Returns the
    /// revealed index range; empty once the catalog is exhausted.
    pub fn show_next_batch(&mut self, cols: usize) -> Batch {
        let end = (self.displayed + batch_size(cols)).min(self.total);
        let batch = Batch {
            range: self.displayed..end,
        };
        self.displayed = end;
        batch
    }

    /// Manual "load more": marks the session as user-driven, which disables
    /// shrink-on-resize, then reveals the next batch.
    pub fn load_more(&mut self, cols: usize) -> Batch {
        self.user_requested = true;
        self.show_next_batch(cols)
    }

    /// Viewport recompute after a (debounced) resize. Before any manual
    /// load-more the displayed set snaps back to the ideal initial count,
    /// shrinking if needed. After a manual load-more, nothing the user asked
    /// for is removed; the count is only topped up to the next multiple of
    /// the column count. Returns any newly revealed range.
    pub fn resize(&mut self, cols: usize) -> Batch {
        if self.displayed == 0 {
            // Nothing shown yet; the initial reveal will size itself.
            return Batch { range: 0..0 };
        }
        if !self.user_requested {
            let ideal = batch_size(cols).min(self.total);
            if ideal <= self.displayed {
                self.displayed = ideal;
                return Batch {
                    range: ideal..ideal,
                };
            }
            let batch = Batch {
                range: self.displayed..ideal,
            };
            self.displayed = ideal;
            return batch;
        }
        let cols = cols.max(1);
        let rem = self.displayed % cols;
        if rem == 0 {
            return Batch {
                range: self.displayed..self.displayed,
            };
        }
        let end = (self.displayed + cols - rem).min(self.total);
        let batch = Batch {
            range: self.displayed..end,
        };
        self.displayed = end;
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_from_width() {
        let layout = GridLayout::default();
        assert_eq!(layout.columns(None), 1);
        assert_eq!(layout.columns(Some(60)), 1);
        assert_eq!(layout.columns(Some(80)), 2);
        assert_eq!(layout.columns(Some(120)), 3);
        assert_eq!(layout.columns(Some(200)), 4);
    }

    #[test]
    fn batch_size_is_six_single_column_else_two_rows() {
        assert_eq!(batch_size(1), 6);
        assert_eq!(batch_size(2), 4);
        assert_eq!(batch_size(3), 6);
        assert_eq!(batch_size(4), 8);
    }

    #[test]
    fn batches_advance_and_clamp_at_total() {
        let mut pager = GridPager::new(7);
        let first = pager.show_next_batch(3);
        assert_eq!(first.range, 0..6);
        assert!(pager.load_more_visible());

        let second = pager.show_next_batch(3);
        assert_eq!(second.range, 6..7);
        assert!(pager.is_exhausted());
        assert!(!pager.load_more_visible());

        // Exhausted pager is a no-op.
        let third = pager.show_next_batch(3);
        assert!(third.is_empty());
        assert_eq!(pager.displayed(), 7);
    }

    #[test]
    fn zero_items_hides_control_immediately() {
        let mut pager = GridPager::new(0);
        assert!(!pager.load_more_visible());
        assert!(pager.show_next_batch(4).is_empty());
    }

    #[test]
    fn resize_before_interaction_grows_or_shrinks_to_ideal() {
        let mut pager = GridPager::new(20);
        pager.show_next_batch(4); // 8 shown
        assert_eq!(pager.displayed(), 8);

        // Narrower viewport: snap back down to one screenful.
        let shrunk = pager.resize(1);
        assert!(shrunk.is_empty());
        assert_eq!(pager.displayed(), 6);

        // Wider viewport: grow back to two full rows.
        let grown = pager.resize(4);
        assert_eq!(grown.range, 6..8);
        assert_eq!(pager.displayed(), 8);
    }

    #[test]
    fn resize_after_load_more_never_shrinks() {
        let mut pager = GridPager::new(20);
        pager.show_next_batch(4); // 8
        pager.load_more(4); // 16
        assert_eq!(pager.displayed(), 16);

        // Smaller ideal would be 6, but the user asked for 16.
        let batch = pager.resize(1);
        assert!(batch.is_empty());
        assert_eq!(pager.displayed(), 16);

        // 16 is not a multiple of 3: top up to 18, never down to 15.
        let topped = pager.resize(3);
        assert_eq!(topped.range, 16..18);
        assert_eq!(pager.displayed(), 18);
    }

    #[test]
    fn resize_top_up_clamps_at_total() {
        let mut pager = GridPager::new(9);
        pager.load_more(4); // 8 shown, user-driven
        let batch = pager.resize(3);
        assert_eq!(batch.range, 8..9);
        assert!(pager.is_exhausted());
    }

    #[test]
    fn resize_before_first_reveal_is_inert() {
        let mut pager = GridPager::new(12);
        assert!(pager.resize(4).is_empty());
        assert_eq!(pager.displayed(), 0);
    }

    #[test]
    fn reveal_delays_cascade_per_position() {
        let batch = Batch { range: 6..9 };
        assert_eq!(batch.reveal_delay(6), Duration::from_millis(0));
        assert_eq!(batch.reveal_delay(7), Duration::from_millis(100));
        assert_eq!(batch.reveal_delay(8), Duration::from_millis(200));
    }
}
