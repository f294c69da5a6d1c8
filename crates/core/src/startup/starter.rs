//! Bootstrap sequencer

use super::{
    BootstrapReport, BootstrapResult, Clock, HookInvoker, LoggedTimer, Outcome, Phase, ProgressBar, ProgressSink,
    SystemClock, TracingProgressSink, WorkingList,
};
use crate::bookmarks::{BookmarkList, BookmarkStore, FileBookmarkStore, MemoryBookmarkStore};
use crate::config::{ClientConfig, SharedHideMode};
use crate::error::BootstrapError;
use crate::filter::{IngredientFilter, IngredientFilterApi};
use crate::gui::{GuiEventHandler, GuiScreenHelper, InputHandler};
use crate::helpers::Helpers;
use crate::ingredients::{create_base_list, IngredientBlacklist, ModIngredientRegistration, StackHelper, SubtypeRegistry};
use crate::plugin::{ModPlugin, BASELINE_PLUGIN_UID};
use crate::recipes::ModRegistry;
use crate::runtime::{IngredientListOverlay, RecipesGui, Runtime};
use anyhow::Result;
use std::sync::Arc;

/// Drives plugins through the registration phases and assembles the runtime.
pub struct Starter {
    clock: Arc<dyn Clock>,
    progress: Arc<dyn ProgressSink>,
    bookmark_store: Option<Arc<dyn BookmarkStore>>,
    started: bool,
}

impl Default for Starter {
    fn default() -> Self {
        Self::new()
    }
}

impl Starter {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock::new()),
            progress: Arc::new(TracingProgressSink),
            bookmark_store: None,
            started: false,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    /// Overrides the bookmark store derived from the client config
    pub fn with_bookmark_store(mut self, store: Arc<dyn BookmarkStore>) -> Self {
        self.bookmark_store = Some(store);
        self
    }

    /// Whether a bootstrap has completed
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Run the full bootstrap over `plugins`.
    ///
    /// Plugins failing a phase are removed and never invoked again. The
    /// bootstrap itself fails only on an empty plugin list and when
    /// the baseline plugin cannot register its ingredients.
    pub fn start(
        &mut self,
        plugins: &[Arc<dyn ModPlugin>],
        config: &mut ClientConfig,
        hide_mode: SharedHideMode,
    ) -> Result<BootstrapResult, BootstrapError> {
        let mut working = WorkingList::new(plugins)?;
        if !working.iter().any(|plugin| plugin.info().uid == BASELINE_PLUGIN_UID) {
            tracing::warn!(
                "No plugin with uid '{}' is registered; ingredients other plugins depend on may be missing",
                BASELINE_PLUGIN_UID
            );
        }

        let total_timer = LoggedTimer::start("Starting Almanac", self.clock.clone());
        let mut report = BootstrapReport::default();

        let mut subtypes = SubtypeRegistry::new();
        self.run_phase(&mut working, Phase::ItemSubtypes, &mut report, |plugin| {
            plugin.register_item_subtypes(&mut subtypes)
        })?;

        let stack_helper = Arc::new(StackHelper::new(subtypes));
        stack_helper.enable_uid_cache();

        let mut registration = ModIngredientRegistration::new();
        self.run_phase(&mut working, Phase::Ingredients, &mut report, |plugin| {
            plugin.register_ingredients(&mut registration)
        })?;

        let blacklist = Arc::new(IngredientBlacklist::new());
        let ingredient_registry = Arc::new(registration.create_ingredient_registry(
            stack_helper.clone(),
            blacklist.clone(),
            config.debug_mode,
        ));
        tracing::info!(
            "Registered {} ingredients of {} kinds",
            ingredient_registry.len(),
            ingredient_registry.kinds().count()
        );

        let helpers = Arc::new(Helpers::new(
            ingredient_registry.clone(),
            blacklist.clone(),
            stack_helper.clone(),
            hide_mode.clone(),
        ));
        let mut mod_registry = ModRegistry::new(helpers.clone(), ingredient_registry.clone());

        let timer = LoggedTimer::start("Registering recipe categories", self.clock.clone());
        self.run_phase(&mut working, Phase::Categories, &mut report, |plugin| {
            plugin.register_categories(&mut mod_registry)
        })?;
        timer.stop();

        let timer = LoggedTimer::start("Registering mod plugins", self.clock.clone());
        self.run_phase(&mut working, Phase::Plugins, &mut report, |plugin| {
            plugin.register(&mut mod_registry)
        })?;
        timer.stop();

        let timer = LoggedTimer::start("Building recipe registry", self.clock.clone());
        let recipe_registry = Arc::new(mod_registry.create_recipe_registry());
        timer.stop();

        let timer = LoggedTimer::start("Building ingredient list", self.clock.clone());
        let ingredient_list = create_base_list(&ingredient_registry);
        timer.stop();

        let timer = LoggedTimer::start("Building ingredient filter", self.clock.clone());
        let ingredient_filter = Arc::new(IngredientFilter::new(blacklist, config, hide_mode.clone()));
        ingredient_filter.add_ingredients(ingredient_list);
        timer.stop();

        let timer = LoggedTimer::start("Building bookmarks", self.clock.clone());
        let bookmarks = Arc::new(BookmarkList::new(ingredient_registry.clone()));
        let store = self.bookmark_store(config);
        let loaded = bookmarks.load_bookmarks(store.as_ref());
        tracing::debug!("Loaded {} bookmarks", loaded);
        timer.stop();

        let timer = LoggedTimer::start("Building runtime", self.clock.clone());
        let gui_screen_helper = Arc::new(GuiScreenHelper::new(
            ingredient_registry.clone(),
            mod_registry.gui_handlers(),
        ));
        let runtime = Arc::new(Runtime::new(
            recipe_registry.clone(),
            ingredient_registry.clone(),
            IngredientListOverlay::new(ingredient_filter.clone(), config.max_columns),
            RecipesGui::new(recipe_registry),
            IngredientFilterApi::new(ingredient_filter.clone()),
        ));
        timer.stop();

        stack_helper.disable_uid_cache();

        self.run_phase(&mut working, Phase::Runtime, &mut report, |plugin| {
            plugin.on_runtime_available(&runtime)
        })?;

        let gui_event_handler = GuiEventHandler::new(gui_screen_helper.clone(), bookmarks.clone(), runtime.clone());
        let input_handler = InputHandler::new(
            runtime.clone(),
            ingredient_filter.clone(),
            ingredient_registry,
            hide_mode,
            gui_screen_helper.clone(),
            bookmarks.clone(),
        );

        config.check_for_mod_name_format_override(mod_registry.mod_name_claims());

        self.started = true;
        total_timer.stop();

        if !report.failures.is_empty() {
            tracing::warn!(
                "{} plugin(s) were removed during bootstrap: {}",
                report.failures.len(),
                report.removed_uids().join(", ")
            );
        }

        Ok(BootstrapResult {
            runtime,
            helpers,
            ingredient_filter,
            gui_screen_helper,
            gui_event_handler,
            input_handler,
            bookmarks,
            active_plugins: working.into_inner(),
            report,
        })
    }

    /// One pass over the working list. Outcomes are collected first and the
    /// failed plugins dropped afterwards, so every plugin present at the start
    /// of the phase is visited exactly once.
    fn run_phase<F>(
        &self,
        working: &mut WorkingList,
        phase: Phase,
        report: &mut BootstrapReport,
        mut hook: F,
    ) -> Result<(), BootstrapError>
    where
        F: FnMut(&dyn ModPlugin) -> Result<()>,
    {
        let mut progress = ProgressBar::start(phase.label(), working.len(), self.progress.clone());
        let invoker = HookInvoker::new(self.clock.clone());
        let mut failed = Vec::new();

        for (index, plugin) in working.iter().enumerate() {
            progress.step(plugin.type_name());

            let invocation = invoker.invoke(plugin.as_ref(), phase, &mut hook);
            if let Some(slow) = invocation.slow {
                report.slow_plugins.push(slow);
            }

            match invocation.outcome {
                Outcome::Ok => {}
                Outcome::Removed(failure) => {
                    failed.push(index);
                    report.failures.push(failure);
                }
                Outcome::Fatal(failure) => return Err(BootstrapError::FatalBootstrapFailure(failure)),
            }
        }

        working.remove_indices(&failed);
        Ok(())
    }

    fn bookmark_store(&self, config: &ClientConfig) -> Arc<dyn BookmarkStore> {
        if let Some(store) = &self.bookmark_store {
            return store.clone();
        }
        match &config.bookmarks_file {
            Some(path) => Arc::new(FileBookmarkStore::new(path)),
            None => Arc::new(MemoryBookmarkStore::default()),
        }
    }
}
