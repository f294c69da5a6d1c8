//! Shared fixtures for the bootstrap integration tests

#![allow(dead_code)]

use almanac::recipes::ModRegistry;
use almanac::{
    Ingredient, IngredientKind, ManualClock, ModIngredientRegistration, ModPlugin, NotImplemented, Phase,
    PluginInfo, ProgressSink, RecipeCategory, Runtime, SubtypeRegistry,
};
use anyhow::{bail, Result};
use parking_lot::Mutex;
use semver::{Version, VersionReq};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Every hook invocation across all plugins of one test, in call order
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<(String, Phase)>>,
}

impl CallLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, uid: &str, phase: Phase) {
        self.calls.lock().push((uid.to_string(), phase));
    }

    /// Uids invoked during one phase, in order
    pub fn phase(&self, phase: Phase) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(_, called)| *called == phase)
            .map(|(uid, _)| uid.clone())
            .collect()
    }

    /// Phases one plugin was invoked in, in order
    pub fn plugin(&self, uid: &str) -> Vec<Phase> {
        self.calls
            .lock()
            .iter()
            .filter(|(called, _)| called == uid)
            .map(|(_, phase)| *phase)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Fail,
    Panic,
    NotImplemented,
    /// Advance the test clock by this much
    Slow(Duration),
}

/// Plugin that records its invocations and misbehaves on request
pub struct TestPlugin {
    uid: String,
    log: Arc<CallLog>,
    behaviors: HashMap<Phase, Behavior>,
    api_requirement: VersionReq,
    clock: Option<Arc<ManualClock>>,
    mod_name_claim: bool,
    hidden: Vec<String>,
    cache_states: Mutex<Vec<(Phase, bool)>>,
}

impl TestPlugin {
    pub fn new(uid: &str, log: &Arc<CallLog>) -> Self {
        Self {
            uid: uid.to_string(),
            log: log.clone(),
            behaviors: HashMap::new(),
            api_requirement: VersionReq::STAR,
            clock: None,
            mod_name_claim: false,
            hidden: Vec::new(),
            cache_states: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, phase: Phase, behavior: Behavior) -> Self {
        self.behaviors.insert(phase, behavior);
        self
    }

    pub fn with_api_requirement(mut self, requirement: &str) -> Self {
        self.api_requirement = VersionReq::parse(requirement).unwrap();
        self
    }

    pub fn with_clock(mut self, clock: Arc<ManualClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn claiming_mod_names(mut self) -> Self {
        self.mod_name_claim = true;
        self
    }

    /// Hide one of this plugin's own items during generic registration
    pub fn hiding(mut self, path: &str) -> Self {
        self.hidden.push(path.to_string());
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Whether the uid cache was enabled when each observing hook ran
    pub fn cache_states(&self) -> Vec<(Phase, bool)> {
        self.cache_states.lock().clone()
    }

    /// The item this plugin registers, `<uid>:widget`
    pub fn widget(&self) -> Ingredient {
        self.item("widget")
    }

    fn item(&self, path: &str) -> Ingredient {
        Ingredient::item(&format!("{}:{}", self.uid, path), format!("{} {}", self.uid, path))
    }

    fn run(&self, phase: Phase) -> Result<()> {
        self.log.record(&self.uid, phase);
        match self.behaviors.get(&phase) {
            None => Ok(()),
            Some(Behavior::Fail) => bail!("{} refuses to {}", self.uid, phase),
            Some(Behavior::Panic) => panic!("{} panicked during {}", self.uid, phase),
            Some(Behavior::NotImplemented) => Err(NotImplemented.into()),
            Some(Behavior::Slow(duration)) => {
                if let Some(clock) = &self.clock {
                    clock.advance(*duration);
                }
                Ok(())
            }
        }
    }
}

impl ModPlugin for TestPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo::new(self.uid.clone(), Version::new(1, 0, 0)).with_api_requirement(self.api_requirement.clone())
    }

    fn register_item_subtypes(&self, _registry: &mut SubtypeRegistry) -> Result<()> {
        self.run(Phase::ItemSubtypes)
    }

    fn register_ingredients(&self, registration: &mut ModIngredientRegistration) -> Result<()> {
        self.run(Phase::Ingredients)?;
        registration.register(IngredientKind::ITEM, vec![self.widget(), self.item("gadget")])
    }

    fn register_categories(&self, registry: &mut ModRegistry) -> Result<()> {
        self.cache_states
            .lock()
            .push((Phase::Categories, registry.helpers().stack_helper().is_uid_cache_enabled()));
        self.run(Phase::Categories)?;
        registry.add_recipe_category(RecipeCategory::new(
            format!("{}.assembly", self.uid),
            "Assembly",
            self.uid.clone(),
        ))
    }

    fn register(&self, registry: &mut ModRegistry) -> Result<()> {
        self.cache_states
            .lock()
            .push((Phase::Plugins, registry.helpers().stack_helper().is_uid_cache_enabled()));
        self.run(Phase::Plugins)?;
        if self.mod_name_claim {
            registry.claim_mod_name_display(self.uid.clone());
        }
        for path in &self.hidden {
            let ingredient = self.item(path);
            registry.hide_ingredient(&ingredient);
        }
        Ok(())
    }

    fn on_runtime_available(&self, runtime: &Runtime) -> Result<()> {
        self.cache_states.lock().push((
            Phase::Runtime,
            runtime.ingredient_registry().stack_helper().is_uid_cache_enabled(),
        ));
        self.run(Phase::Runtime)
    }
}

/// Progress sink that keeps everything it was told
#[derive(Default)]
pub struct RecordingSink {
    starts: Mutex<Vec<(String, usize)>>,
    steps: Mutex<Vec<(String, String)>>,
    finishes: Mutex<Vec<(String, usize)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn total(&self, label: &str) -> Option<usize> {
        self.starts
            .lock()
            .iter()
            .find(|(started, _)| started == label)
            .map(|(_, total)| *total)
    }

    pub fn step_count(&self, label: &str) -> usize {
        self.steps.lock().iter().filter(|(stepped, _)| stepped == label).count()
    }

    pub fn finished(&self, label: &str) -> Option<usize> {
        self.finishes
            .lock()
            .iter()
            .find(|(finished, _)| finished == label)
            .map(|(_, steps)| *steps)
    }
}

impl ProgressSink for RecordingSink {
    fn start(&self, label: &str, total: usize) {
        self.starts.lock().push((label.to_string(), total));
    }

    fn step(&self, label: &str, _step: usize, item: &str) {
        self.steps.lock().push((label.to_string(), item.to_string()));
    }

    fn finish(&self, label: &str, steps: usize) {
        self.finishes.lock().push((label.to_string(), steps));
    }
}

pub fn as_plugins(plugins: &[Arc<TestPlugin>]) -> Vec<Arc<dyn ModPlugin>> {
    plugins
        .iter()
        .map(|plugin| plugin.clone() as Arc<dyn ModPlugin>)
        .collect()
}
