//! Wishlist

use smallvec::SmallVec;
use uuid::Uuid;

/// Items a shopper has marked, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: SmallVec<[Uuid; 8]>,
}

impl Wishlist {
    /// Empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the item when absent, remove it when present. Returns whether the
    /// item is on the wishlist afterwards.
    pub fn toggle(&mut self, item: Uuid) -> bool {
        if let Some(position) = self.items.iter().position(|existing| *existing == item) {
            self.items.remove(position);
            return false;
        }

        self.items.push(item);

        true
    }

    /// Whether the item is on the wishlist.
    pub fn contains(&self, item: Uuid) -> bool {
        self.items.contains(&item)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Uuid] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
