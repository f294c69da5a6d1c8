//! Content identity for ingredients

use super::{Ingredient, SubtypeRegistry};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Computes unique identifiers for ingredients from the registered subtype rules.
///
/// While the bootstrap builds its indexes the same ingredients are identified
/// over and over, so identifiers are memoized in a uid cache. The cache only
/// accepts writes between [`StackHelper::enable_uid_cache`] and
/// [`StackHelper::disable_uid_cache`]; afterwards identifiers are computed on
/// demand and nothing is retained.
pub struct StackHelper {
    subtypes: SubtypeRegistry,
    uid_cache: Mutex<Option<HashMap<Ingredient, String>>>,
}

impl StackHelper {
    pub fn new(subtypes: SubtypeRegistry) -> Self {
        Self {
            subtypes,
            uid_cache: Mutex::new(None),
        }
    }

    pub fn enable_uid_cache(&self) {
        let mut cache = self.uid_cache.lock();
        if cache.is_none() {
            *cache = Some(HashMap::new());
        }
    }

    /// Drops every memoized identifier and stops caching new ones.
    pub fn disable_uid_cache(&self) {
        *self.uid_cache.lock() = None;
    }

    pub fn is_uid_cache_enabled(&self) -> bool {
        self.uid_cache.lock().is_some()
    }

    pub fn uid_cache_len(&self) -> usize {
        self.uid_cache.lock().as_ref().map_or(0, HashMap::len)
    }

    /// `kind:namespace:path`, followed by `:subtype` when the ingredient has one.
    pub fn unique_identifier(&self, ingredient: &Ingredient) -> String {
        let mut cache = self.uid_cache.lock();
        if let Some(uid) = cache.as_ref().and_then(|cache| cache.get(ingredient)) {
            return uid.clone();
        }

        let uid = self.compute_uid(ingredient);
        if let Some(cache) = cache.as_mut() {
            cache.insert(ingredient.clone(), uid.clone());
        }
        uid
    }

    /// Two ingredients are equivalent when they share a unique identifier.
    pub fn is_equivalent(&self, a: &Ingredient, b: &Ingredient) -> bool {
        a.kind == b.kind && a.id == b.id && self.unique_identifier(a) == self.unique_identifier(b)
    }

    pub fn subtype_info(&self, ingredient: &Ingredient) -> Option<String> {
        self.subtypes.subtype_info(ingredient)
    }

    pub fn subtypes(&self) -> &SubtypeRegistry {
        &self.subtypes
    }

    fn compute_uid(&self, ingredient: &Ingredient) -> String {
        match self.subtypes.subtype_info(ingredient) {
            Some(subtype) => format!("{}:{}:{}", ingredient.kind, ingredient.id, subtype),
            None => format!("{}:{}", ingredient.kind, ingredient.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredients::ResourceId;

    fn potion_helper() -> StackHelper {
        let mut subtypes = SubtypeRegistry::new();
        subtypes.register_subtype_interpreter(
            ResourceId::new("minecraft", "potion"),
            |ingredient: &Ingredient| ingredient.property("potion").map(str::to_string),
        );
        StackHelper::new(subtypes)
    }

    #[test]
    fn test_unique_identifier_includes_subtype() {
        let helper = potion_helper();
        let healing = Ingredient::item("minecraft:potion", "Potion of Healing")
            .with_property("potion", "minecraft:healing");
        let swiftness = Ingredient::item("minecraft:potion", "Potion of Swiftness")
            .with_property("potion", "minecraft:swiftness");

        assert_eq!(helper.unique_identifier(&healing), "item:minecraft:potion:minecraft:healing");
        assert!(!helper.is_equivalent(&healing, &swiftness));

        // Properties without an interpreter do not split identity
        let stone = Ingredient::item("minecraft:stone", "Stone");
        let tagged = stone.clone().with_property("display", "Shiny");
        assert_eq!(helper.unique_identifier(&stone), "item:minecraft:stone");
        assert!(helper.is_equivalent(&stone, &tagged));
    }

    #[test]
    fn test_uid_cache_only_retains_while_enabled() {
        let helper = potion_helper();
        let stone = Ingredient::item("minecraft:stone", "Stone");

        assert!(!helper.is_uid_cache_enabled());
        helper.unique_identifier(&stone);
        assert_eq!(helper.uid_cache_len(), 0);

        helper.enable_uid_cache();
        assert!(helper.is_uid_cache_enabled());
        helper.unique_identifier(&stone);
        helper.unique_identifier(&stone);
        assert_eq!(helper.uid_cache_len(), 1);

        helper.disable_uid_cache();
        assert!(!helper.is_uid_cache_enabled());
        assert_eq!(helper.uid_cache_len(), 0);
        assert_eq!(helper.unique_identifier(&stone), "item:minecraft:stone");
        assert_eq!(helper.uid_cache_len(), 0);
    }
}
