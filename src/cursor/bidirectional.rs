use crate::cursor::error::{CursorError, Direction};

/// A cursor that sits *between* elements of an ordered sequence and can move
/// one step at a time in either direction.
///
/// Position `p` means `p` elements lie behind the cursor: `next_index() == p`
/// and `previous_index() == p - 1` (`None` at the front). Calling `next()`
/// and then `previous()` hands back the same element twice.
///
/// Implementors provide the two non-consuming probes, the one-step moves and
/// `next_index`; the consuming operations are derived from those so they can
/// never disagree with the probes.
pub trait BidirectionalCursor {
    type Item;

    /// The element `next()` would return, without moving.
    fn peek_next(&self) -> Option<Self::Item>;

    /// The element `previous()` would return, without moving.
    fn peek_previous(&self) -> Option<Self::Item>;

    fn next_index(&self) -> usize;

    /// Moves one step forward. A no-op at the back end.
    fn step_forward(&mut self);

    /// Moves one step backward. A no-op at the front end.
    fn step_backward(&mut self);

    fn has_next(&self) -> bool {
        self.peek_next().is_some()
    }

    fn has_previous(&self) -> bool {
        self.peek_previous().is_some()
    }

    fn previous_index(&self) -> Option<usize> {
        self.next_index().checked_sub(1)
    }

    fn next(&mut self) -> Result<Self::Item, CursorError> {
        let item = self
            .peek_next()
            .ok_or(CursorError::NoSuchElement(Direction::Forward))?;
        self.step_forward();
        Ok(item)
    }

    fn previous(&mut self) -> Result<Self::Item, CursorError> {
        let item = self
            .peek_previous()
            .ok_or(CursorError::NoSuchElement(Direction::Backward))?;
        self.step_backward();
        Ok(item)
    }
}

impl<C: BidirectionalCursor + ?Sized> BidirectionalCursor for Box<C> {
    type Item = C::Item;

    fn peek_next(&self) -> Option<Self::Item> {
        (**self).peek_next()
    }

    fn peek_previous(&self) -> Option<Self::Item> {
        (**self).peek_previous()
    }

    fn next_index(&self) -> usize {
        (**self).next_index()
    }

    fn step_forward(&mut self) {
        (**self).step_forward()
    }

    fn step_backward(&mut self) {
        (**self).step_backward()
    }

    fn has_next(&self) -> bool {
        (**self).has_next()
    }

    fn has_previous(&self) -> bool {
        (**self).has_previous()
    }

    fn next(&mut self) -> Result<Self::Item, CursorError> {
        (**self).next()
    }

    fn previous(&mut self) -> Result<Self::Item, CursorError> {
        (**self).previous()
    }
}
