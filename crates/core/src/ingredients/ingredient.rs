//! Ingredient values contributed by plugins

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Namespace assumed for ids written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced id, `namespace:path`. The namespace is the owning mod id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse `namespace:path`, defaulting the namespace when it is missing.
    pub fn parse(id: &str) -> Option<Self> {
        let (namespace, path) = match id.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, id),
        };

        if namespace.is_empty() || path.is_empty() || path.contains(':') {
            return None;
        }

        Some(Self::new(namespace, path))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Type of an ingredient. Plugins may introduce their own kinds next to the
/// built-in ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngredientKind(Cow<'static, str>);

impl IngredientKind {
    pub const ITEM: IngredientKind = IngredientKind(Cow::Borrowed("item"));
    pub const FLUID: IngredientKind = IngredientKind(Cow::Borrowed("fluid"));

    pub fn custom(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single ingredient: an item or fluid stack stripped down to what the index
/// needs to identify and display it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub kind: IngredientKind,
    pub id: ResourceId,
    /// Variant data such as potion type or enchantments
    pub properties: BTreeMap<String, String>,
    pub display_name: String,
}

impl Ingredient {
    pub fn new(kind: IngredientKind, id: ResourceId, display_name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            properties: BTreeMap::new(),
            display_name: display_name.into(),
        }
    }

    /// Item ingredient from a `namespace:path` id. Malformed ids fall back to
    /// the default namespace with the raw string as path.
    pub fn item(id: &str, display_name: impl Into<String>) -> Self {
        Self::new(IngredientKind::ITEM, parse_or_default(id), display_name)
    }

    pub fn fluid(id: &str, display_name: impl Into<String>) -> Self {
        Self::new(IngredientKind::FLUID, parse_or_default(id), display_name)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Owning mod id
    pub fn mod_id(&self) -> &str {
        self.id.namespace()
    }
}

fn parse_or_default(id: &str) -> ResourceId {
    ResourceId::parse(id).unwrap_or_else(|| ResourceId::new(DEFAULT_NAMESPACE, id))
}
