use std::fmt;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, trace};

use crate::inventory::ItemStack;

/// Errors returned by [`Inventory`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The slot passed was not within `0 <= slot < size`.
    #[error("slot {slot} is out of range: must be in range 0 <= slot < {size}")]
    SlotOutOfRange {
        /// The slot requested.
        slot: usize,
        /// The size of the inventory.
        size: usize,
    },
    /// Not all items could be added. Slots filled before running out of space stay filled.
    #[error("could not add full item stack to inventory: {remaining} items left over")]
    InsufficientCapacity {
        /// Items that found no slot.
        remaining: u32,
    },
    /// Not all items could be removed. Slots emptied along the way stay emptied.
    #[error("could not remove all items from the inventory: {remaining} items missing")]
    InsufficientQuantity {
        /// Items that could not be found.
        remaining: u32,
    },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

type ChangeFn<S> = Box<dyn Fn(usize, &S) + Send + Sync>;

fn ignore_change<S>(_: usize, _: &S) {}

/**
 * The slots of an inventory together with the hook called for every slot write. Both live
 * behind the same lock, so the hook always runs while the inventory is write-locked.
 */
struct Slots<S> {
    items: Vec<S>,
    on_change: ChangeFn<S>,
}

/// A fixed number of slots holding item stacks, carried by entities or held by blocks such as
/// chests. The size is set on construction and never changes.
///
/// All access goes through one reader-writer lock: [`get`](Self::get), [`size`](Self::size)
/// and [`is_empty`](Self::is_empty) take it shared, everything else exclusive. [`add`](Self::add)
/// and [`remove`](Self::remove) scan all slots in a single critical section.
///
/// # Change hook
///
/// The hook passed to [`with_on_change`](Self::with_on_change) is called once for every slot
/// write, synchronously, **while the write lock is held**. It must not call back into the same
/// inventory: the lock is not reentrant and doing so deadlocks. A slow hook blocks every other
/// reader and writer of the inventory until it returns.
pub struct Inventory<S> {
    inner: RwLock<Slots<S>>,
}

impl<S: ItemStack> Inventory<S> {
    /// Creates an inventory with `size` empty slots and no change hook.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        Self::with_on_change(size, ignore_change::<S>)
    }

    /// Creates an inventory with `size` empty slots. `on_change` is called with the slot and its
    /// new stack every time a slot is written.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn with_on_change<F>(size: usize, on_change: F) -> Self
    where
        F: Fn(usize, &S) + Send + Sync + 'static,
    {
        assert!(size > 0, "inventory size must be at least 1");

        Self {
            inner: RwLock::new(Slots {
                items: vec![S::default(); size],
                on_change: Box::new(on_change),
            }),
        }
    }

    /// Returns the stack in `slot`. Empty slots hold an empty stack.
    pub fn get(&self, slot: usize) -> InventoryResult<S> {
        let slots = self.inner.read();
        slots.check();
        slots.valid_slot(slot)?;
        Ok(slots.items[slot].clone())
    }

    /// Overwrites `slot` with `stack`, whatever was there before.
    pub fn set(&self, slot: usize, stack: S) -> InventoryResult<()> {
        let mut slots = self.inner.write();
        slots.check();
        slots.valid_slot(slot)?;
        slots.set_item(slot, stack);
        Ok(())
    }

    /// Adds `stack` to the inventory. Existing stacks of the same item are topped up first, in
    /// slot order; what remains goes into empty slots, again in slot order.
    ///
    /// Fails with [`InventoryError::InsufficientCapacity`] if not everything fit. Slots written
    /// before space ran out keep their new contents.
    pub fn add(&self, stack: S) -> InventoryResult<()> {
        if stack.is_empty() {
            return Ok(());
        }

        let remainder = self.add_partial(stack);
        if remainder.is_empty() {
            return Ok(());
        }
        debug!(remaining = remainder.count(), "inventory full, stack partially added");
        Err(InventoryError::InsufficientCapacity {
            remaining: remainder.count(),
        })
    }

    /// Runs the add passes and returns whatever could not be placed.
    pub(crate) fn add_partial(&self, stack: S) -> S {
        let mut slots = self.inner.write();
        slots.check();
        slots.fill(stack)
    }

    /// Removes `stack.count()` items comparable to `stack`, emptying slots in slot order.
    ///
    /// Fails with [`InventoryError::InsufficientQuantity`] if fewer items were present. Slots
    /// drained before that point stay drained.
    pub fn remove(&self, stack: S) -> InventoryResult<()> {
        if stack.is_empty() {
            return Ok(());
        }

        let remaining = {
            let mut slots = self.inner.write();
            slots.check();
            slots.take(&stack)
        };
        if remaining <= 0 {
            return Ok(());
        }
        let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        debug!(remaining, "not enough items, stack partially removed");
        Err(InventoryError::InsufficientQuantity { remaining })
    }

    /// Returns `true` if every slot is empty.
    pub fn is_empty(&self) -> bool {
        let slots = self.inner.read();
        slots.check();
        slots.items.iter().all(ItemStack::is_empty)
    }

    /// The number of slots, always the value passed on construction.
    pub fn size(&self) -> usize {
        let slots = self.inner.read();
        slots.check();
        slots.items.len()
    }

    /// Detaches the change hook. The inventory keeps working, silently. Calling this more than
    /// once is harmless.
    pub fn close(&self) {
        let mut slots = self.inner.write();
        slots.check();
        slots.on_change = Box::new(ignore_change::<S>);
        debug!(size = slots.items.len(), "inventory closed");
    }
}

impl<S: ItemStack> Slots<S> {
    /// Panics if the slots were never set up. Construction rejects a zero size, so reaching
    /// this means an inventory was built around the constructors.
    fn check(&self) {
        assert!(
            !self.items.is_empty(),
            "uninitialised inventory: inventory must be constructed using Inventory::new()"
        );
    }

    fn valid_slot(&self, slot: usize) -> InventoryResult<()> {
        let size = self.items.len();
        if slot >= size {
            return Err(InventoryError::SlotOutOfRange { slot, size });
        }
        Ok(())
    }

    fn set_item(&mut self, slot: usize, stack: S) {
        self.items[slot] = stack;
        trace!(slot, "slot changed");
        (self.on_change)(slot, &self.items[slot]);
    }

    /// First-fit packing: top up comparable stacks, then claim empty slots. Returns the
    /// remainder, which is empty on success.
    fn fill(&mut self, mut stack: S) -> S {
        for slot in 0..self.items.len() {
            let current = &self.items[slot];
            if current.is_empty() || !current.comparable(&stack) {
                continue;
            }

            let (filled, rest) = current.add_stack(&stack);
            self.set_item(slot, filled);
            stack = rest;
            if stack.is_empty() {
                return stack;
            }
        }

        for slot in 0..self.items.len() {
            if !self.items[slot].is_empty() {
                continue;
            }

            let (filled, rest) = stack.empty_of().add_stack(&stack);
            self.set_item(slot, filled);
            stack = rest;
            if stack.is_empty() {
                return stack;
            }
        }

        stack
    }

    /// Shrinks comparable stacks in slot order until `stack.count()` items are gone. Returns
    /// how many are still owed; zero or less means done.
    fn take(&mut self, stack: &S) -> i64 {
        let mut remaining = i64::from(stack.count());

        for slot in 0..self.items.len() {
            let current = &self.items[slot];
            if current.is_empty() || !current.comparable(stack) {
                continue;
            }

            let shrunk = current.grow(-remaining);
            // subtract the full original count: overshooting below zero only ends the scan
            remaining -= i64::from(current.count());
            self.set_item(slot, shrunk);
            if remaining <= 0 {
                break;
            }
        }

        remaining
    }
}

impl<S: ItemStack + fmt::Display> fmt::Display for Inventory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.inner.read();
        for (slot, stack) in slots.items.iter().enumerate() {
            if slot > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stack}")?;
        }
        Ok(())
    }
}

impl<S: ItemStack + fmt::Debug> fmt::Debug for Inventory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.inner.read();
        f.debug_struct("Inventory")
            .field("slots", &slots.items)
            .finish_non_exhaustive()
    }
}
