//! Ingredient model, subtype rules, identity and the ingredient registry

pub mod blacklist;
pub mod ingredient;
pub mod list;
pub mod registration;
pub mod registry;
pub mod stack_helper;
pub mod subtypes;

pub use blacklist::IngredientBlacklist;
pub use ingredient::{Ingredient, IngredientKind, ResourceId};
pub use list::{create_base_list, IngredientListElement};
pub use registration::ModIngredientRegistration;
pub use registry::IngredientRegistry;
pub use stack_helper::StackHelper;
pub use subtypes::{SubtypeInterpreter, SubtypeRegistry};
