//! Stack arithmetic for loose items lying in the world: handing them to collectors and merging
//! neighbouring stacks.

use crate::inventory::{Inventory, ItemStack};

/// Something able to pick up loose stacks, typically an entity carrying an inventory.
pub trait Collector<S> {
    /// Collects as much of `stack` as possible and returns how many items were taken.
    fn collect(&self, stack: &S) -> u32;
}

impl<S: ItemStack> Collector<S> for Inventory<S> {
    fn collect(&self, stack: &S) -> u32 {
        if stack.is_empty() {
            return 0;
        }
        let remainder = self.add_partial(stack.clone());
        stack.count() - remainder.count()
    }
}

/// Hands `stack` to `collector`. Returns the part left lying in the world, or `None` when the
/// collector took everything.
pub fn pick_up<S: ItemStack>(collector: &impl Collector<S>, stack: &S) -> Option<S> {
    let taken = collector.collect(stack);
    if taken >= stack.count() {
        return None;
    }
    Some(stack.grow(-i64::from(taken)))
}

/// Merges two loose stacks. Returns `None` if they hold different items or either one is
/// already full; otherwise `other` topped up from `stack`, and what is left of `stack`.
pub fn merge<S: ItemStack>(stack: &S, other: &S) -> Option<(S, S)> {
    if other.count() >= other.max_count() || stack.count() >= stack.max_count() {
        return None;
    }
    if !stack.comparable(other) {
        return None;
    }
    Some(other.add_stack(stack))
}

/// A loose stack never carries more than its max count.
pub fn clamp_to_max<S: ItemStack>(stack: S) -> S {
    if stack.count() > stack.max_count() {
        let excess = i64::from(stack.count() - stack.max_count());
        return stack.grow(-excess);
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Stack;

    #[test]
    fn inventory_collects_what_fits() {
        let inventory = Inventory::new(1);
        inventory.set(0, Stack::new(1, 60)).unwrap();

        assert_eq!(inventory.collect(&Stack::new(1, 10)), 4);
        assert_eq!(inventory.get(0).unwrap(), Stack::new(1, 64));
        assert_eq!(inventory.collect(&Stack::new(2, 10)), 0);
    }

    #[test]
    fn pick_up_returns_leftover() {
        let inventory = Inventory::new(1);
        inventory.set(0, Stack::new(1, 50)).unwrap();

        assert_eq!(pick_up(&inventory, &Stack::new(1, 20)), Some(Stack::new(1, 6)));
        assert_eq!(pick_up(&inventory, &Stack::new(1, 0)), None);

        let roomy = Inventory::new(2);
        assert_eq!(pick_up(&roomy, &Stack::new(3, 20)), None);
        assert_eq!(roomy.get(0).unwrap(), Stack::new(3, 20));
    }

    #[test]
    fn pick_up_keeps_leftover_above_max_count() {
        let inventory = Inventory::new(1);
        assert_eq!(pick_up(&inventory, &Stack::new(1, 200)), Some(Stack::new(1, 136)));
        assert_eq!(inventory.get(0).unwrap(), Stack::new(1, 64));
    }

    #[test]
    fn merge_tops_up_other_stack() {
        let merged = merge(&Stack::new(1, 40), &Stack::new(1, 30));
        assert_eq!(merged, Some((Stack::new(1, 64), Stack::new(1, 6))));
    }

    #[test]
    fn merge_refuses_full_or_foreign_stacks() {
        assert_eq!(merge(&Stack::new(1, 64), &Stack::new(1, 1)), None);
        assert_eq!(merge(&Stack::new(1, 1), &Stack::new(1, 64)), None);
        assert_eq!(merge(&Stack::new(1, 1), &Stack::new(2, 1)), None);
    }

    #[test]
    fn clamp_to_max_caps_count() {
        assert_eq!(clamp_to_max(Stack::new(1, 100)), Stack::new(1, 64));
        assert_eq!(clamp_to_max(Stack::new(1, 10)), Stack::new(1, 10));
    }
}
