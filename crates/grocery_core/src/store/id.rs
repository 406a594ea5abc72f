use crate::model::item::ItemId;

/// Issues wall-clock-derived ids that never repeat.
///
/// Each id is the current epoch milliseconds, bumped past the last issued
/// id when the clock has not advanced (or went backwards). Once the bump
/// would overflow `ItemId`, ids are taken from the highest free value at or
/// below the clock instead.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct IdAllocator {
    last_issued: Option<ItemId>,
}

impl IdAllocator {
    /// Starts after the highest id already in use.
    pub(crate) fn after(highest: Option<ItemId>) -> Self {
        Self {
            last_issued: highest,
        }
    }

    /// Returns an id for which `is_taken` is false.
    pub(crate) fn next(&mut self, now_ms: i64, is_taken: impl Fn(ItemId) -> bool) -> ItemId {
        let bumped = match self.last_issued {
            Some(last) => last.checked_add(1).map(|next| next.max(now_ms)),
            None => Some(now_ms),
        };

        match bumped {
            Some(id) => {
                self.last_issued = Some(id);
                id
            }
            None => lowest_free_from(now_ms, is_taken),
        }
    }
}

// Terminates: a finite set of taken ids cannot cover every value of the ring.
fn lowest_free_from(start: ItemId, is_taken: impl Fn(ItemId) -> bool) -> ItemId {
    let mut id = start;
    while is_taken(id) {
        id = id.wrapping_sub(1);
    }
    id
}
