#![cfg(feature = "render")]
//! Plugin set for integration tests that tick a rendering app.
//!
//! Bevy's renderer initialises process-global state, and a second render
//! device in the same test binary panics. Any test binary that adds these
//! plugins and calls `app.update()` should hold a single test function.

use bevy::prelude::*;

/// Adds the default plugins with no window, no event loop and a fallback
/// adapter so the app can tick on machines without a GPU.
pub fn add_render_test_plugins(app: &mut App) {
    use bevy::log::LogPlugin;
    use bevy::render::settings::{RenderCreation, WgpuSettings};
    use bevy::render::RenderPlugin;
    use bevy::window::{ExitCondition, WindowPlugin};

    app.add_plugins(
        DefaultPlugins
            .build()
            .disable::<LogPlugin>()
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(RenderPlugin {
                synchronous_pipeline_compilation: true,
                render_creation: RenderCreation::Automatic(WgpuSettings {
                    force_fallback_adapter: true,
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::winit::WinitPlugin>(),
    );
}
