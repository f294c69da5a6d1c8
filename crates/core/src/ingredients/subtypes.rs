//! Subtype rules declared by plugins during item subtype registration

use super::{Ingredient, ResourceId};
use indexmap::IndexMap;

/// Derives a subtype string from an ingredient's variant data.
///
/// Returning `None` means the ingredient is the plain, untyped variant.
pub trait SubtypeInterpreter: Send + Sync {
    fn apply(&self, ingredient: &Ingredient) -> Option<String>;
}

impl<F> SubtypeInterpreter for F
where
    F: Fn(&Ingredient) -> Option<String> + Send + Sync,
{
    fn apply(&self, ingredient: &Ingredient) -> Option<String> {
        self(ingredient)
    }
}

/// Uses every property of the ingredient as its subtype.
struct AllProperties;

impl SubtypeInterpreter for AllProperties {
    fn apply(&self, ingredient: &Ingredient) -> Option<String> {
        if ingredient.properties.is_empty() {
            return None;
        }

        let parts: Vec<String> = ingredient
            .properties
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        Some(parts.join(","))
    }
}

/// Interpreters keyed by ingredient id
#[derive(Default)]
pub struct SubtypeRegistry {
    interpreters: IndexMap<ResourceId, Box<dyn SubtypeInterpreter>>,
}

impl SubtypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interpreter for one id. The first registration wins; later
    /// ones are logged and ignored.
    pub fn register_subtype_interpreter<I>(&mut self, id: ResourceId, interpreter: I) -> bool
    where
        I: SubtypeInterpreter + 'static,
    {
        if self.interpreters.contains_key(&id) {
            tracing::error!("An interpreter is already registered for this item: {}", id);
            return false;
        }

        self.interpreters.insert(id, Box::new(interpreter));
        true
    }

    /// Treat all properties of the given ids as subtype data.
    pub fn use_properties_for_subtypes<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ResourceId>,
    {
        for id in ids {
            self.register_subtype_interpreter(id, AllProperties);
        }
    }

    pub fn has_subtype_interpreter(&self, id: &ResourceId) -> bool {
        self.interpreters.contains_key(id)
    }

    /// Subtype of an ingredient, if an interpreter exists for its id
    pub fn subtype_info(&self, ingredient: &Ingredient) -> Option<String> {
        self.interpreters
            .get(&ingredient.id)
            .and_then(|interpreter| interpreter.apply(ingredient))
    }

    pub fn len(&self) -> usize {
        self.interpreters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interpreters.is_empty()
    }
}
