//! Slotted, thread-safe inventories of stackable items.
//!
//! An [`Inventory`] holds a fixed number of slots, each carrying one stack. Items are added
//! and removed in bulk with first-fit packing across slots, and every slot write is reported
//! to an optional change hook.

pub mod inventory;
pub mod types;

pub use inventory::{
    Collector, Inventory, InventoryError, InventoryResult, ItemStack, RecipeRegistry, Stack,
};
