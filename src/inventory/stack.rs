use std::fmt;

use crate::types::{AIR, DEFAULT_MAX_COUNT, ItemType};

/// The capabilities an [`Inventory`](crate::Inventory) needs from the stacks it stores.
///
/// The inventory never looks inside a stack: identity, capacity and merge arithmetic all live
/// behind this trait. `Default` must produce the empty stack placed in fresh slots.
pub trait ItemStack: Clone + Default + Send + Sync + 'static {
    /// Number of items held.
    fn count(&self) -> u32;

    /// Most items a single stack of this kind can hold.
    fn max_count(&self) -> u32;

    /// Returns `true` if the stack holds no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if both stacks hold the same item and could be merged.
    fn comparable(&self, other: &Self) -> bool;

    /// Merges `other` into `self` up to the max count. Returns the filled stack and whatever
    /// could not be absorbed. Incomparable stacks come back unchanged.
    fn add_stack(&self, other: &Self) -> (Self, Self);

    /// Returns a copy with the count changed by `delta`, never dropping below zero.
    fn grow(&self, delta: i64) -> Self;

    /// A zero-count stack of the same item.
    fn empty_of(&self) -> Self;
}

/// A stack of homogeneous items held in an inventory slot.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stack {
    /// Item identifier representing the type in this stack.
    pub item_type: ItemType,
    /// How many items are contained in this stack.
    pub item_count: u16,
    /// How many items this stack can hold at most.
    pub max_count: u16,
}

impl Stack {
    /// Creates a new stack for the given item type with the provided quantity and the default
    /// max count. The count may exceed the max count, e.g. for a bulk add request.
    pub fn new(item_type: ItemType, item_count: u16) -> Self {
        Self::with_max_count(item_type, item_count, DEFAULT_MAX_COUNT)
    }

    /// Creates a stack whose item type stacks up to `max_count`.
    pub fn with_max_count(item_type: ItemType, item_count: u16, max_count: u16) -> Self {
        debug_assert!(max_count > 0, "max count must be non-zero");

        Self {
            item_type,
            item_count,
            max_count,
        }
    }

    /// Splits `count` items off this stack into a new stack, shrinking the original in place.
    /// Returns `None` when `count` is not strictly smaller than the current stack size.
    pub fn split(&mut self, count: u16) -> Option<Stack> {
        if count >= self.item_count {
            return None;
        }

        self.item_count -= count;
        Some(Stack {
            item_count: count,
            ..*self
        })
    }

    fn with_count(&self, item_count: u16) -> Self {
        Self { item_count, ..*self }
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(AIR, 0)
    }
}

impl ItemStack for Stack {
    fn count(&self) -> u32 {
        u32::from(self.item_count)
    }

    fn max_count(&self) -> u32 {
        u32::from(self.max_count)
    }

    fn comparable(&self, other: &Self) -> bool {
        self.item_type == other.item_type
    }

    fn add_stack(&self, other: &Self) -> (Self, Self) {
        if !self.comparable(other) {
            return (*self, *other);
        }

        let space = self.max_count.saturating_sub(self.item_count);
        let moved = space.min(other.item_count);
        (
            self.with_count(self.item_count + moved),
            other.with_count(other.item_count - moved),
        )
    }

    fn grow(&self, delta: i64) -> Self {
        let count = (i64::from(self.item_count) + delta).clamp(0, i64::from(u16::MAX));
        // clamped into the u16 range, which always fits
        self.with_count(count as u16)
    }

    fn empty_of(&self) -> Self {
        self.with_count(0)
    }
}

impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        self.item_type == other.item_type && self.item_count == other.item_count
    }
}

impl Eq for Stack {}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack({}, {})", self.item_type, self.item_count)
    }
}
