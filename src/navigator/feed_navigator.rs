use tracing::debug;

use crate::cursor::BidirectionalCursor;
use crate::fusion::FusionCursor;

/// Drives a fusion cursor one screen at a time.
///
/// A raw bidirectional cursor hands back the same element when the direction
/// flips. A reader clicking "older" then "newer" expects to land on the post
/// they saw before, so on a direction change the navigator first steps over
/// the element already on screen.
pub struct FeedNavigator<K, C: BidirectionalCursor, F> {
    feed: FusionCursor<K, C, F>,
    current: Option<C::Item>,
    can_go_next: bool,
    can_go_previous: bool,
}

impl<K, C, F, O> FeedNavigator<K, C, F>
where
    C: BidirectionalCursor,
    C::Item: Clone,
    F: Fn(&C::Item) -> O,
    O: Ord,
{
    pub fn new(feed: FusionCursor<K, C, F>) -> Self {
        let can_go_next = feed.has_next();
        Self {
            feed,
            current: None,
            can_go_next,
            can_go_previous: false,
        }
    }

    pub fn feed(&self) -> &FusionCursor<K, C, F> {
        &self.feed
    }

    pub fn into_feed(self) -> FusionCursor<K, C, F> {
        self.feed
    }

    /// Element on screen and the source it came from.
    pub fn current(&self) -> Option<(&K, &C::Item)> {
        let item = self.current.as_ref()?;
        let source = self.feed.last_source().ok()?;
        Some((source, item))
    }

    /// Position of the element on screen in the fused order.
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().and(self.feed.last_index())
    }

    pub fn can_go_next(&self) -> bool {
        self.can_go_next
    }

    pub fn can_go_previous(&self) -> bool {
        self.can_go_previous
    }

    /// Rewinds to the front and shows the first element, if any.
    pub fn show_first(&mut self) -> Option<(&K, C::Item)> {
        while self.feed.has_previous() {
            self.feed.step_backward();
        }
        let shown = self.feed.next().ok();
        if let Some(item) = &shown {
            self.current = Some(item.clone());
        }
        self.can_go_next = self.feed.has_next();
        self.can_go_previous = false;
        self.shown(shown)
    }

    /// Shows the element after the one on screen.
    pub fn show_next(&mut self) -> Option<(&K, C::Item)> {
        if self.current.is_some() && self.feed.last_index() == Some(self.feed.next_index()) {
            // last move was backward
            self.feed.step_forward();
        }
        let shown = self.feed.next().ok();
        if let Some(item) = &shown {
            self.current = Some(item.clone());
            self.can_go_previous = self.feed.last_index().is_some_and(|index| index > 0);
        }
        self.can_go_next = self.feed.has_next();
        debug!(index = ?self.feed.last_index(), moved = shown.is_some(), "show next");
        self.shown(shown)
    }

    /// Shows the element before the one on screen.
    pub fn show_previous(&mut self) -> Option<(&K, C::Item)> {
        if self.current.is_some() && self.feed.last_index() == self.feed.previous_index() {
            // last move was forward
            self.feed.step_backward();
        }
        let shown = self.feed.previous().ok();
        if let Some(item) = &shown {
            self.current = Some(item.clone());
            self.can_go_next = true;
        }
        self.can_go_previous = self.feed.has_previous();
        debug!(index = ?self.feed.last_index(), moved = shown.is_some(), "show previous");
        self.shown(shown)
    }

    fn shown(&self, item: Option<C::Item>) -> Option<(&K, C::Item)> {
        let item = item?;
        let source = self.feed.last_source().ok()?;
        Some((source, item))
    }
}
