use std::fmt;

use tracing::trace;

use crate::cursor::{BidirectionalCursor, CursorError, Direction};

/// Direction of the fused order with respect to the element key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    /// Greatest key first (newest-first for timestamps).
    #[default]
    Descending,
    Ascending,
}

impl MergeOrder {
    fn ranks_before<O: Ord>(self, a: &O, b: &O) -> bool {
        match self {
            MergeOrder::Descending => a > b,
            MergeOrder::Ascending => a < b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastReturned {
    index: usize,
    slot: usize,
}

/// A streaming k-way merge over independently sorted bidirectional sources.
///
/// The fused sequence is never materialized: each step peeks one candidate per
/// source, consumes only the winning source and remembers which source that
/// was. Memory is O(sources) and every step costs one scan over the sources.
///
/// Equal keys are ordered by source insertion order, so the fused sequence is
/// the total order `(key, insertion slot, position in source)`. Going forward
/// the earliest slot wins a tie, going backward the latest slot does, which
/// keeps any interleaving of `next` and `previous` reversible.
pub struct FusionCursor<K, C, F> {
    sources: Vec<(K, C)>,
    order: MergeOrder,
    key_fn: F,
    position: usize,
    last: Option<LastReturned>,
}

impl<K, C, F, O> FusionCursor<K, C, F>
where
    C: BidirectionalCursor,
    F: Fn(&C::Item) -> O,
    O: Ord,
{
    pub fn new(sources: Vec<(K, C)>, order: MergeOrder, key_fn: F) -> Self {
        // Sources may arrive already advanced; the virtual index starts wherever they are.
        let position = sources.iter().map(|(_, source)| source.next_index()).sum();
        Self {
            sources,
            order,
            key_fn,
            position,
            last: None,
        }
    }

    pub fn from_pairs<I>(pairs: I, order: MergeOrder, key_fn: F) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
    {
        Self::new(pairs.into_iter().collect(), order, key_fn)
    }

    /// Like `new`, but rejects two sources sharing a key since attribution
    /// through `last_source` would become ambiguous.
    pub fn try_new(
        sources: Vec<(K, C)>,
        order: MergeOrder,
        key_fn: F,
    ) -> Result<Self, CursorError>
    where
        K: PartialEq + fmt::Debug,
    {
        for (i, (key, _)) in sources.iter().enumerate() {
            if sources[..i].iter().any(|(other, _)| other == key) {
                return Err(CursorError::InvalidArgument(format!(
                    "source {:?} supplied more than once",
                    key
                )));
            }
        }
        Ok(Self::new(sources, order, key_fn))
    }

    pub fn order(&self) -> MergeOrder {
        self.order
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn source_keys(&self) -> impl Iterator<Item = &K> {
        self.sources.iter().map(|(key, _)| key)
    }

    /// Virtual index of the element most recently returned by `next` or
    /// `previous`, `None` before the first one.
    pub fn last_index(&self) -> Option<usize> {
        self.last.map(|last| last.index)
    }

    /// Key of the source that produced the element most recently returned.
    pub fn last_source(&self) -> Result<&K, CursorError> {
        self.last
            .map(|last| &self.sources[last.slot].0)
            .ok_or(CursorError::IllegalState("no element has been returned yet"))
    }

    fn select(&self, direction: Direction) -> Option<(usize, C::Item)> {
        let mut best: Option<(usize, C::Item, O)> = None;
        for (slot, (_, source)) in self.sources.iter().enumerate() {
            let candidate = match direction {
                Direction::Forward => source.peek_next(),
                Direction::Backward => source.peek_previous(),
            };
            let Some(item) = candidate else {
                continue;
            };
            let key = (self.key_fn)(&item);
            let replace = match &best {
                None => true,
                Some((_, _, best_key)) => match direction {
                    Direction::Forward => self.order.ranks_before(&key, best_key),
                    // ties go to the later slot
                    Direction::Backward => !self.order.ranks_before(&key, best_key),
                },
            };
            if replace {
                best = Some((slot, item, key));
            }
        }
        best.map(|(slot, item, _)| (slot, item))
    }

    fn advance(&mut self, slot: usize) {
        self.sources[slot].1.step_forward();
        self.last = Some(LastReturned {
            index: self.position,
            slot,
        });
        self.position += 1;
        trace!(slot, index = self.position - 1, "fusion moved forward");
    }

    fn retreat(&mut self, slot: usize) {
        self.sources[slot].1.step_backward();
        self.position -= 1;
        self.last = Some(LastReturned {
            index: self.position,
            slot,
        });
        trace!(slot, index = self.position, "fusion moved backward");
    }
}

impl<C> FusionCursor<usize, C, fn(&C::Item) -> C::Item>
where
    C: BidirectionalCursor,
    C::Item: Ord + Clone,
{
    /// Merges sources whose items are ordered by themselves. Source keys are
    /// just the slot numbers here; use `new` when attribution matters.
    pub fn natural(sources: Vec<C>, order: MergeOrder) -> Self {
        Self::new(
            sources.into_iter().enumerate().collect(),
            order,
            <C::Item as Clone>::clone,
        )
    }
}

impl<K, C, F, O> BidirectionalCursor for FusionCursor<K, C, F>
where
    C: BidirectionalCursor,
    F: Fn(&C::Item) -> O,
    O: Ord,
{
    type Item = C::Item;

    fn peek_next(&self) -> Option<C::Item> {
        self.select(Direction::Forward).map(|(_, item)| item)
    }

    fn peek_previous(&self) -> Option<C::Item> {
        self.select(Direction::Backward).map(|(_, item)| item)
    }

    fn next_index(&self) -> usize {
        self.position
    }

    fn step_forward(&mut self) {
        if let Some((slot, _)) = self.select(Direction::Forward) {
            self.advance(slot);
        }
    }

    fn step_backward(&mut self) {
        if let Some((slot, _)) = self.select(Direction::Backward) {
            self.retreat(slot);
        }
    }

    fn has_next(&self) -> bool {
        self.sources.iter().any(|(_, source)| source.has_next())
    }

    fn has_previous(&self) -> bool {
        self.sources.iter().any(|(_, source)| source.has_previous())
    }

    fn next(&mut self) -> Result<C::Item, CursorError> {
        let (slot, item) = self
            .select(Direction::Forward)
            .ok_or(CursorError::NoSuchElement(Direction::Forward))?;
        self.advance(slot);
        Ok(item)
    }

    fn previous(&mut self) -> Result<C::Item, CursorError> {
        let (slot, item) = self
            .select(Direction::Backward)
            .ok_or(CursorError::NoSuchElement(Direction::Backward))?;
        self.retreat(slot);
        Ok(item)
    }
}
