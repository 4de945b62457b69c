//! Shared primitive types used across the inventory library.

// An item type is represented by a simple integer identifier.
pub type ItemType = u16;

/*
 * The item type of an empty slot. Stacks of this type never hold items.
 */
pub const AIR: ItemType = 0;

/*
 * How many items fit in a single stack unless the stack says otherwise.
 */
pub const DEFAULT_MAX_COUNT: u16 = 64;
