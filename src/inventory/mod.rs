//! Slotted inventories and the stacks they hold.

#[allow(clippy::module_inception)]
pub mod inventory;
pub mod pickup;
pub mod recipe;
pub mod stack;

#[cfg(test)]
mod tests;

// Re-export the main types for easier access
pub use inventory::{Inventory, InventoryError, InventoryResult};
pub use pickup::Collector;
pub use recipe::RecipeRegistry;
pub use stack::{ItemStack, Stack};
