//! Almanac command line bootstrap.
//!
//! Runs the full bootstrap over the bundled plugins and reports what the
//! runtime ended up with.

use almanac::{init_tracing, ClientConfig, HideModeConfig, Starter};
use almanac_plugins::bundled_plugins;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "almanac")]
#[command(about = "Bootstrap the Almanac item index from the bundled plugins")]
struct Args {
    /// Client config file (TOML or JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Hide-mode state file (TOML or JSON)
    #[arg(long, value_name = "PATH")]
    hide_mode: Option<PathBuf>,

    /// Bookmarks file, overrides the config
    #[arg(short, long, value_name = "PATH")]
    bookmarks: Option<PathBuf>,

    /// Log every registered ingredient
    #[arg(short, long)]
    debug: bool,

    /// Filter text to run against the finished ingredient list
    #[arg(short, long)]
    search: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if args.debug {
        config.debug_mode = true;
    }
    if let Some(path) = args.bookmarks {
        config.bookmarks_file = Some(path);
    }

    let hide_mode = match &args.hide_mode {
        Some(path) => HideModeConfig::load_from_file(path)
            .with_context(|| format!("loading hide mode from {}", path.display()))?,
        None => HideModeConfig::default(),
    };

    let plugins = bundled_plugins();
    let mut starter = Starter::new();
    let result = starter.start(&plugins, &mut config, hide_mode.into_shared())?;

    let runtime = &result.runtime;
    info!(
        "Runtime ready: {} plugins, {} ingredients, {} recipe categories, {} recipes, {} bookmarks",
        result.active_plugins.len(),
        runtime.ingredient_registry().len(),
        runtime.recipe_registry().categories().count(),
        runtime.recipe_registry().recipe_count(),
        result.bookmarks.len()
    );
    for failure in &result.report.failures {
        info!("Removed: {}", failure);
    }
    for slow in &result.report.slow_plugins {
        info!("Slow: {} took {:?}", slow.plugin_type, slow.elapsed);
    }

    if let Some(text) = args.search {
        let filter = runtime.ingredient_filter();
        filter.set_filter_text(&text);
        for ingredient in filter.filtered_ingredients() {
            println!("{}\t{}", runtime.ingredient_registry().unique_identifier(&ingredient), ingredient.display_name);
        }
    }

    Ok(())
}
