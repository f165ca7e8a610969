use crate::cursor::bidirectional::BidirectionalCursor;

/// Bidirectional cursor over a borrowed, already sorted slice.
pub struct SliceCursor<'a, E> {
    items: &'a [E],
    position: usize,
}

impl<'a, E> SliceCursor<'a, E> {
    /// Cursor placed before the first element.
    pub fn new(items: &'a [E]) -> Self {
        Self { items, position: 0 }
    }

    /// Cursor placed after the last element.
    pub fn at_end(items: &'a [E]) -> Self {
        Self {
            items,
            position: items.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl<E> Clone for SliceCursor<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for SliceCursor<'_, E> {}

impl<'a, E> BidirectionalCursor for SliceCursor<'a, E> {
    type Item = &'a E;

    fn peek_next(&self) -> Option<&'a E> {
        self.items.get(self.position)
    }

    fn peek_previous(&self) -> Option<&'a E> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.items.get(index))
    }

    fn next_index(&self) -> usize {
        self.position
    }

    fn step_forward(&mut self) {
        if self.position < self.items.len() {
            self.position += 1;
        }
    }

    fn step_backward(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    fn has_next(&self) -> bool {
        self.position < self.items.len()
    }

    fn has_previous(&self) -> bool {
        self.position > 0
    }
}
