use parking_lot::RwLock;
use tracing::trace;

/// An owned list of recipes. Each world or test builds its own registry instead of sharing
/// process-wide state; writes only go through [`register`](Self::register).
#[derive(Debug)]
pub struct RecipeRegistry<R> {
    recipes: RwLock<Vec<R>>,
}

impl<R: Clone> RecipeRegistry<R> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(Vec::new()),
        }
    }

    /// Registers a new recipe after all previously registered ones.
    pub fn register(&self, recipe: R) {
        let mut recipes = self.recipes.write();
        recipes.push(recipe);
        trace!(registered = recipes.len(), "recipe registered");
    }

    /// A snapshot of every recipe in registration order.
    pub fn recipes(&self) -> Vec<R> {
        self.recipes.read().clone()
    }

    /// Number of registered recipes.
    pub fn len(&self) -> usize {
        self.recipes.read().len()
    }

    /// Returns `true` if no recipe was registered yet.
    pub fn is_empty(&self) -> bool {
        self.recipes.read().is_empty()
    }
}

impl<R: Clone> Default for RecipeRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
