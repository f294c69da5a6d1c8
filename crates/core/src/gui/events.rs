//! Event and input bundles assembled after the runtime is handed out

use super::{GuiScreenHelper, Rect, Screen};
use crate::bookmarks::BookmarkList;
use crate::config::SharedHideMode;
use crate::filter::IngredientFilter;
use crate::ingredients::{Ingredient, IngredientRegistry};
use crate::recipes::Focus;
use crate::runtime::Runtime;
use std::sync::Arc;

/// Width and height of one ingredient slot in the overlays
pub const SLOT_SIZE: i32 = 18;

/// Gap kept between a container gui and the overlays beside it
const GUI_PADDING: i32 = 4;

/// Where the overlays go on a screen with a known gui placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Right of the gui, used by the ingredient list overlay
    pub ingredient_list: Rect,
    /// Left of the gui, used by the bookmark overlay
    pub bookmarks: Rect,
    pub exclusion_areas: Vec<Rect>,
}

impl ScreenLayout {
    pub fn columns(area: &Rect) -> usize {
        (area.width / SLOT_SIZE).max(0) as usize
    }

    pub fn rows(area: &Rect) -> usize {
        (area.height / SLOT_SIZE).max(0) as usize
    }
}

/// Screen event dispatcher for the ingredient list and bookmark overlays.
pub struct GuiEventHandler {
    gui_screen_helper: Arc<GuiScreenHelper>,
    bookmarks: Arc<BookmarkList>,
    runtime: Arc<Runtime>,
}

impl GuiEventHandler {
    pub fn new(gui_screen_helper: Arc<GuiScreenHelper>, bookmarks: Arc<BookmarkList>, runtime: Arc<Runtime>) -> Self {
        Self {
            gui_screen_helper,
            bookmarks,
            runtime,
        }
    }

    /// Lays the overlays out around the screen's gui. Screens without a gui
    /// screen handler get no overlays.
    pub fn layout(&self, screen: &Screen) -> Option<ScreenLayout> {
        let properties = self.gui_screen_helper.gui_properties(screen)?;
        let gui = properties.gui;

        let list_x = gui.right() + GUI_PADDING;
        let ingredient_list = Rect::new(list_x, 0, properties.screen_width - list_x, properties.screen_height);
        let bookmarks = Rect::new(0, 0, gui.x - GUI_PADDING, properties.screen_height);

        Some(ScreenLayout {
            ingredient_list,
            bookmarks,
            exclusion_areas: self.gui_screen_helper.exclusion_areas(screen),
        })
    }

    /// Ingredient under the cursor, from an advanced gui handler or one of the overlays
    pub fn ingredient_at(&self, screen: &Screen, mouse_x: i32, mouse_y: i32) -> Option<Ingredient> {
        if let Some(ingredient) = self.gui_screen_helper.ingredient_under_mouse(screen, mouse_x, mouse_y) {
            return Some(ingredient);
        }

        let layout = self.layout(screen)?;
        if layout.exclusion_areas.iter().any(|area| area.contains(mouse_x, mouse_y)) {
            return None;
        }

        if layout.ingredient_list.contains(mouse_x, mouse_y) {
            let overlay = self.runtime.ingredient_list_overlay();
            let rows = ScreenLayout::rows(&layout.ingredient_list);
            let index = slot_index(&layout.ingredient_list, overlay.columns(), mouse_x, mouse_y)?;
            return overlay
                .page(0, rows)
                .get(index)
                .map(|element| element.ingredient.clone());
        }

        if layout.bookmarks.contains(mouse_x, mouse_y) {
            let columns = ScreenLayout::columns(&layout.bookmarks);
            let index = slot_index(&layout.bookmarks, columns, mouse_x, mouse_y)?;
            return self.bookmarks.ingredients().get(index).cloned();
        }

        None
    }
}

fn slot_index(area: &Rect, columns: usize, mouse_x: i32, mouse_y: i32) -> Option<usize> {
    if columns == 0 {
        return None;
    }
    let column = ((mouse_x - area.x) / SLOT_SIZE) as usize;
    let row = ((mouse_y - area.y) / SLOT_SIZE) as usize;
    (column < columns).then_some(row * columns + column)
}

/// User actions routed through the [`InputHandler`]
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    ToggleEditMode,
    ToggleBookmark(Ingredient),
    ToggleHidden(Ingredient),
    ShowRecipes(Ingredient),
    ShowUses(Ingredient),
    SetFilterText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The action does not apply to the current state
    Ignored,
    EditMode(bool),
    Bookmarked(bool),
    Hidden(bool),
    /// Number of ingredients matching the new filter text
    Filtered(usize),
    /// Uids of the categories holding matching recipes
    Recipes(Vec<String>),
}

/// Keyboard and mouse shortcuts over the finished subsystems.
pub struct InputHandler {
    runtime: Arc<Runtime>,
    ingredient_filter: Arc<IngredientFilter>,
    ingredient_registry: Arc<IngredientRegistry>,
    hide_mode: SharedHideMode,
    gui_screen_helper: Arc<GuiScreenHelper>,
    bookmarks: Arc<BookmarkList>,
}

impl InputHandler {
    pub fn new(
        runtime: Arc<Runtime>,
        ingredient_filter: Arc<IngredientFilter>,
        ingredient_registry: Arc<IngredientRegistry>,
        hide_mode: SharedHideMode,
        gui_screen_helper: Arc<GuiScreenHelper>,
        bookmarks: Arc<BookmarkList>,
    ) -> Self {
        Self {
            runtime,
            ingredient_filter,
            ingredient_registry,
            hide_mode,
            gui_screen_helper,
            bookmarks,
        }
    }

    pub fn handle(&self, action: InputAction) -> InputResult {
        match action {
            InputAction::ToggleEditMode => {
                let mut hide_mode = self.hide_mode.write();
                hide_mode.edit_mode_enabled = !hide_mode.edit_mode_enabled;
                InputResult::EditMode(hide_mode.edit_mode_enabled)
            }
            InputAction::ToggleBookmark(ingredient) => {
                if !self.ingredient_registry.contains(&ingredient) {
                    return InputResult::Ignored;
                }
                InputResult::Bookmarked(self.bookmarks.toggle(&ingredient))
            }
            InputAction::ToggleHidden(ingredient) => {
                let mut hide_mode = self.hide_mode.write();
                if !hide_mode.edit_mode_enabled || !self.ingredient_registry.contains(&ingredient) {
                    return InputResult::Ignored;
                }
                let uid = self.ingredient_registry.unique_identifier(&ingredient);
                InputResult::Hidden(hide_mode.toggle_hidden(&uid))
            }
            InputAction::ShowRecipes(ingredient) => self.show(Focus::recipes(ingredient)),
            InputAction::ShowUses(ingredient) => self.show(Focus::uses(ingredient)),
            InputAction::SetFilterText(text) => {
                self.ingredient_filter.set_filter_text(&text);
                InputResult::Filtered(self.ingredient_filter.filtered_elements().len())
            }
        }
    }

    /// Resolves the ingredient under the cursor, for actions bound to mouse position
    pub fn ingredient_under_mouse(&self, screen: &Screen, mouse_x: i32, mouse_y: i32) -> Option<Ingredient> {
        self.gui_screen_helper.ingredient_under_mouse(screen, mouse_x, mouse_y)
    }

    fn show(&self, focus: Focus) -> InputResult {
        let mut categories: Vec<String> = Vec::new();
        for found in self.runtime.recipes_gui().show(&focus) {
            if !categories.iter().any(|uid| uid == &found.category.uid) {
                categories.push(found.category.uid.clone());
            }
        }

        if categories.is_empty() {
            InputResult::Ignored
        } else {
            InputResult::Recipes(categories)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, HideModeConfig};
    use crate::filter::IngredientFilterApi;
    use crate::gui::{GuiHandlers, GuiProperties, GuiScreenHandler};
    use crate::helpers::Helpers;
    use crate::ingredients::{
        create_base_list, IngredientBlacklist, IngredientKind, ModIngredientRegistration, StackHelper,
        SubtypeRegistry,
    };
    use crate::recipes::{ModRegistry, Recipe, RecipeCategory};
    use crate::runtime::{IngredientListOverlay, RecipesGui};

    struct FixedGui;

    impl GuiScreenHandler for FixedGui {
        fn gui_properties(&self, screen: &Screen) -> Option<GuiProperties> {
            Some(GuiProperties {
                gui: Rect::new(100, 50, 176, 166),
                screen_width: screen.width,
                screen_height: screen.height,
            })
        }
    }

    struct Fixture {
        events: GuiEventHandler,
        input: InputHandler,
        hide_mode: SharedHideMode,
    }

    fn fixture() -> Fixture {
        let stack_helper = Arc::new(StackHelper::new(SubtypeRegistry::new()));
        let blacklist = Arc::new(IngredientBlacklist::new());
        let mut registration = ModIngredientRegistration::new();
        registration
            .register(
                IngredientKind::ITEM,
                vec![
                    Ingredient::item("minecraft:stone", "Stone"),
                    Ingredient::item("minecraft:furnace", "Furnace"),
                ],
            )
            .unwrap();
        let ingredient_registry =
            Arc::new(registration.create_ingredient_registry(stack_helper.clone(), blacklist.clone(), false));
        let hide_mode = HideModeConfig::default().into_shared();
        let helpers = Arc::new(Helpers::new(
            ingredient_registry.clone(),
            blacklist.clone(),
            stack_helper,
            hide_mode.clone(),
        ));

        let mut mod_registry = ModRegistry::new(helpers, ingredient_registry.clone());
        mod_registry
            .add_recipe_category(RecipeCategory::new("minecraft.crafting", "Crafting", "minecraft"))
            .unwrap();
        mod_registry.add_recipes(
            "minecraft.crafting",
            vec![Recipe::new(
                vec![Ingredient::item("minecraft:stone", "Stone")],
                vec![Ingredient::item("minecraft:furnace", "Furnace")],
            )],
        );
        let recipe_registry = Arc::new(mod_registry.create_recipe_registry());

        let filter = Arc::new(IngredientFilter::new(blacklist, &ClientConfig::default(), hide_mode.clone()));
        filter.add_ingredients(create_base_list(&ingredient_registry));

        let mut handlers = GuiHandlers::default();
        handlers.screen.insert("minecraft:furnace".to_string(), Arc::new(FixedGui));
        let gui_screen_helper = Arc::new(GuiScreenHelper::new(ingredient_registry.clone(), handlers));
        let bookmarks = Arc::new(BookmarkList::new(ingredient_registry.clone()));

        let runtime = Arc::new(Runtime::new(
            recipe_registry.clone(),
            ingredient_registry.clone(),
            IngredientListOverlay::new(filter.clone(), 9),
            RecipesGui::new(recipe_registry),
            IngredientFilterApi::new(filter.clone()),
        ));

        Fixture {
            events: GuiEventHandler::new(gui_screen_helper.clone(), bookmarks.clone(), runtime.clone()),
            input: InputHandler::new(
                runtime,
                filter,
                ingredient_registry,
                hide_mode.clone(),
                gui_screen_helper,
                bookmarks,
            ),
            hide_mode,
        }
    }

    #[test]
    fn test_layout_places_overlays_beside_gui() {
        let fixture = fixture();
        let screen = Screen::new("minecraft:furnace", 480, 270);

        let layout = fixture.events.layout(&screen).unwrap();
        assert_eq!(layout.ingredient_list, Rect::new(280, 0, 200, 270));
        assert_eq!(layout.bookmarks, Rect::new(0, 0, 96, 270));

        assert!(fixture.events.layout(&Screen::new("minecraft:chest", 480, 270)).is_none());
    }

    #[test]
    fn test_ingredient_at_list_and_bookmark_slots() {
        let fixture = fixture();
        let screen = Screen::new("minecraft:furnace", 480, 270);

        let first = fixture.events.ingredient_at(&screen, 281, 1).unwrap();
        assert_eq!(first.display_name, "Stone");
        let second = fixture.events.ingredient_at(&screen, 281 + SLOT_SIZE, 1).unwrap();
        assert_eq!(second.display_name, "Furnace");

        assert!(fixture.events.ingredient_at(&screen, 1, 1).is_none());
        fixture
            .input
            .handle(InputAction::ToggleBookmark(Ingredient::item("minecraft:furnace", "Furnace")));
        assert_eq!(fixture.events.ingredient_at(&screen, 1, 1).unwrap().display_name, "Furnace");
    }

    #[test]
    fn test_input_actions() {
        let fixture = fixture();
        let stone = Ingredient::item("minecraft:stone", "Stone");

        assert_eq!(
            fixture.input.handle(InputAction::ShowUses(stone.clone())),
            InputResult::Recipes(vec!["minecraft.crafting".to_string()])
        );
        assert_eq!(fixture.input.handle(InputAction::ShowRecipes(stone.clone())), InputResult::Ignored);

        // Hiding needs edit mode
        assert_eq!(fixture.input.handle(InputAction::ToggleHidden(stone.clone())), InputResult::Ignored);
        assert_eq!(fixture.input.handle(InputAction::ToggleEditMode), InputResult::EditMode(true));
        assert_eq!(fixture.input.handle(InputAction::ToggleHidden(stone)), InputResult::Hidden(true));
        assert!(fixture.hide_mode.read().is_hidden("item:minecraft:stone"));

        assert_eq!(
            fixture.input.handle(InputAction::SetFilterText("furn".to_string())),
            InputResult::Filtered(1)
        );

        let unknown = Ingredient::item("thermal:gear", "Gear");
        assert_eq!(fixture.input.handle(InputAction::ToggleBookmark(unknown)), InputResult::Ignored);
    }
}
