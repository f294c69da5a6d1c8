//! Vanilla content plugin
//!
//! Registers the base game's items, fluids and recipe categories. Every other
//! plugin builds on the ingredients registered here, which is why it carries
//! the baseline uid.

use almanac::gui::{GuiProperties, GuiScreenHandler, Rect, Screen};
use almanac::{
    Ingredient, IngredientKind, ModIngredientRegistration, ModPlugin, ModRegistry, PluginInfo, Recipe,
    RecipeCategory, ResourceId, Runtime, SubtypeRegistry, BASELINE_PLUGIN_UID,
};
use anyhow::Result;
use semver::{Version, VersionReq};
use std::sync::Arc;

pub const CRAFTING: &str = "minecraft.crafting";
pub const SMELTING: &str = "minecraft.smelting";
pub const FUEL: &str = "minecraft.fuel";
pub const BREWING: &str = "minecraft.brewing";

/// Size of the standard container gui
const CONTAINER_WIDTH: i32 = 176;
const CONTAINER_HEIGHT: i32 = 166;

const POTIONS: [(&str, &str); 4] = [
    ("minecraft:water", "Water Bottle"),
    ("minecraft:awkward", "Awkward Potion"),
    ("minecraft:healing", "Potion of Healing"),
    ("minecraft:swiftness", "Potion of Swiftness"),
];

const ENCHANTMENTS: [(&str, &str); 2] = [
    ("minecraft:sharpness", "Sharpness"),
    ("minecraft:efficiency", "Efficiency"),
];

const ITEMS: [(&str, &str); 14] = [
    ("minecraft:oak_log", "Oak Log"),
    ("minecraft:oak_planks", "Oak Planks"),
    ("minecraft:stick", "Stick"),
    ("minecraft:crafting_table", "Crafting Table"),
    ("minecraft:cobblestone", "Cobblestone"),
    ("minecraft:stone", "Stone"),
    ("minecraft:furnace", "Furnace"),
    ("minecraft:coal", "Coal"),
    ("minecraft:iron_ore", "Iron Ore"),
    ("minecraft:iron_ingot", "Iron Ingot"),
    ("minecraft:blaze_rod", "Blaze Rod"),
    ("minecraft:brewing_stand", "Brewing Stand"),
    ("minecraft:nether_wart", "Nether Wart"),
    ("minecraft:glistering_melon_slice", "Glistering Melon Slice"),
];

/// Base game content
#[derive(Debug, Default, Clone, Copy)]
pub struct VanillaPlugin;

impl VanillaPlugin {
    pub fn new() -> Self {
        Self
    }
}

fn item(id: &str) -> Ingredient {
    let name = ITEMS
        .iter()
        .find(|(known, _)| *known == id)
        .map_or(id, |(_, name)| *name);
    Ingredient::item(id, name)
}

fn potion(potion: &str) -> Ingredient {
    let name = POTIONS
        .iter()
        .find(|(known, _)| *known == potion)
        .map_or("Potion", |(_, name)| *name);
    Ingredient::item("minecraft:potion", name).with_property("potion", potion)
}

fn enchanted_book(enchantment: &str, name: &str) -> Ingredient {
    Ingredient::item("minecraft:enchanted_book", format!("Enchanted Book ({})", name))
        .with_property("enchantments", enchantment)
}

impl ModPlugin for VanillaPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo::new(BASELINE_PLUGIN_UID, Version::new(1, 20, 1))
            .with_name("Minecraft")
            .with_description("Vanilla items, fluids and recipe categories")
            .with_author("Almanac Team")
            .with_api_requirement(VersionReq::parse("^1.2").unwrap_or(VersionReq::STAR))
    }

    fn register_item_subtypes(&self, registry: &mut SubtypeRegistry) -> Result<()> {
        for id in ["potion", "splash_potion", "lingering_potion", "tipped_arrow"] {
            registry.register_subtype_interpreter(ResourceId::new("minecraft", id), |ingredient: &Ingredient| {
                ingredient.property("potion").map(str::to_string)
            });
        }
        registry.use_properties_for_subtypes([ResourceId::new("minecraft", "enchanted_book")]);
        Ok(())
    }

    fn register_ingredients(&self, registration: &mut ModIngredientRegistration) -> Result<()> {
        let mut items: Vec<Ingredient> = ITEMS.iter().map(|(id, name)| Ingredient::item(id, *name)).collect();
        items.push(Ingredient::item("minecraft:glass_bottle", "Glass Bottle"));
        items.extend(POTIONS.iter().map(|(id, _)| potion(id)));
        items.extend(ENCHANTMENTS.iter().map(|(id, name)| enchanted_book(id, name)));
        registration.register(IngredientKind::ITEM, items)?;

        registration.register(
            IngredientKind::FLUID,
            vec![
                Ingredient::fluid("minecraft:water", "Water"),
                Ingredient::fluid("minecraft:lava", "Lava"),
            ],
        )?;
        Ok(())
    }

    fn register_categories(&self, registry: &mut ModRegistry) -> Result<()> {
        registry.add_recipe_category(RecipeCategory::new(CRAFTING, "Crafting", BASELINE_PLUGIN_UID))?;
        registry.add_recipe_category(RecipeCategory::new(SMELTING, "Smelting", BASELINE_PLUGIN_UID))?;
        registry.add_recipe_category(RecipeCategory::new(FUEL, "Fuel", BASELINE_PLUGIN_UID))?;
        registry.add_recipe_category(RecipeCategory::new(BREWING, "Brewing", BASELINE_PLUGIN_UID))?;
        Ok(())
    }

    fn register(&self, registry: &mut ModRegistry) -> Result<()> {
        registry.add_recipes(
            CRAFTING,
            vec![
                Recipe::new(vec![item("minecraft:oak_log")], vec![item("minecraft:oak_planks")]),
                Recipe::new(vec![item("minecraft:oak_planks")], vec![item("minecraft:stick")]),
                Recipe::new(vec![item("minecraft:oak_planks")], vec![item("minecraft:crafting_table")]),
                Recipe::new(vec![item("minecraft:cobblestone")], vec![item("minecraft:furnace")]),
                Recipe::new(
                    vec![item("minecraft:blaze_rod"), item("minecraft:cobblestone")],
                    vec![item("minecraft:brewing_stand")],
                ),
            ],
        );
        registry.add_recipes(
            SMELTING,
            vec![
                Recipe::new(vec![item("minecraft:cobblestone")], vec![item("minecraft:stone")]),
                Recipe::new(vec![item("minecraft:iron_ore")], vec![item("minecraft:iron_ingot")]),
                Recipe::new(vec![item("minecraft:oak_log")], vec![item("minecraft:coal")]),
            ],
        );
        registry.add_recipes(
            FUEL,
            ["minecraft:coal", "minecraft:oak_log", "minecraft:oak_planks", "minecraft:stick"]
                .into_iter()
                .map(|id| Recipe::new(vec![item(id)], Vec::new())),
        );
        registry.add_recipes(
            BREWING,
            vec![
                Recipe::new(
                    vec![potion("minecraft:water"), item("minecraft:nether_wart")],
                    vec![potion("minecraft:awkward")],
                ),
                Recipe::new(
                    vec![potion("minecraft:awkward"), item("minecraft:glistering_melon_slice")],
                    vec![potion("minecraft:healing")],
                ),
            ],
        );

        registry.add_recipe_catalyst(item("minecraft:crafting_table"), &[CRAFTING]);
        registry.add_recipe_catalyst(item("minecraft:furnace"), &[SMELTING, FUEL]);
        registry.add_recipe_catalyst(item("minecraft:brewing_stand"), &[BREWING]);

        for screen_type in ["minecraft:crafting_table", "minecraft:furnace", "minecraft:brewing_stand"] {
            registry.add_gui_screen_handler(screen_type, Arc::new(ContainerScreenHandler));
        }
        Ok(())
    }

    fn on_runtime_available(&self, runtime: &Runtime) -> Result<()> {
        tracing::debug!(
            "Vanilla runtime ready with {} recipes",
            runtime.recipe_registry().recipe_count()
        );
        Ok(())
    }
}

/// Places the standard container gui in the middle of the screen
struct ContainerScreenHandler;

impl GuiScreenHandler for ContainerScreenHandler {
    fn gui_properties(&self, screen: &Screen) -> Option<GuiProperties> {
        if screen.width < CONTAINER_WIDTH || screen.height < CONTAINER_HEIGHT {
            return None;
        }
        Some(GuiProperties {
            gui: Rect::new(
                (screen.width - CONTAINER_WIDTH) / 2,
                (screen.height - CONTAINER_HEIGHT) / 2,
                CONTAINER_WIDTH,
                CONTAINER_HEIGHT,
            ),
            screen_width: screen.width,
            screen_height: screen.height,
        })
    }
}
