//! Windowed demo: a skater on a small level.

use std::path::PathBuf;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use tomhawk::{init_logging, GameSettings, PresentationPlugin, SkatePlugin};

/// A third-person skateboarding character
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default game settings
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match args.settings {
        Some(path) => GameSettings::load(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };

    let exit = App::new()
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .insert_resource(settings)
        .add_plugins(SkatePlugin::default())
        .add_plugins(PresentationPlugin)
        .run();
    if let AppExit::Error(code) = exit {
        anyhow::bail!("app exited with code {code}");
    }
    Ok(())
}
