//! Bevy plugin wiring the skater systems into the schedule.

use bevy::prelude::*;

use crate::camera::camera_boom_system;
use crate::game_mode::{spawn_player_pawn, GameMode, PawnClassRegistry};
use crate::input::{
    bind_player_input, handle_jump_action, handle_look_action, handle_move_action,
    map_device_input_system, InputCapability, InputMapping,
};
use crate::movement::character_movement_system;
use crate::settings::GameSettings;
use crate::skateboard::{despawn_orphaned_skateboards, orient_skateboard_system};

/// Ordered stages of the per-frame character update.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkateSet {
    /// Binding newly possessed pawns and turning devices into actions.
    Input,
    /// Consuming movement intent.
    Movement,
    /// Aligning boards with the ground.
    Orientation,
    /// Placing follow cameras.
    Camera,
}

/// Installs settings, the game mode, input observers and the frame systems.
///
/// Settings already present as a resource win over the defaults, so callers
/// can insert loaded [`GameSettings`] before adding the plugin. The same goes
/// for a [`PawnClassRegistry`]: one inserted beforehand is used to resolve
/// the default pawn instead of the built-in classes.
#[derive(Debug, Default)]
pub struct SkatePlugin {
    /// Skip spawning the player pawn at startup.
    pub skip_player_spawn: bool,
}

impl Plugin for SkatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSettings>();
        app.init_resource::<InputCapability>();
        app.init_resource::<InputMapping>();

        if !app.world().contains_resource::<PawnClassRegistry>() {
            let skater = app.world().resource::<GameSettings>().skater;
            app.insert_resource(PawnClassRegistry::with_builtin_classes(skater));
        }
        let game_mode = GameMode::new(
            app.world().resource::<PawnClassRegistry>(),
            &app.world().resource::<GameSettings>().default_pawn,
        );
        app.insert_resource(game_mode);

        app.add_observer(handle_move_action);
        app.add_observer(handle_look_action);
        app.add_observer(handle_jump_action);

        if !self.skip_player_spawn {
            app.add_systems(Startup, spawn_player_pawn);
        }

        app.configure_sets(
            Update,
            (
                SkateSet::Input,
                SkateSet::Movement,
                SkateSet::Orientation,
                SkateSet::Camera,
            )
                .chain(),
        );
        app.add_systems(
            Update,
            (bind_player_input, map_device_input_system)
                .chain()
                .in_set(SkateSet::Input),
        );
        app.add_systems(Update, character_movement_system.in_set(SkateSet::Movement));
        app.add_systems(
            Update,
            (orient_skateboard_system, despawn_orphaned_skateboards)
                .chain()
                .in_set(SkateSet::Orientation),
        );
        app.add_systems(Update, camera_boom_system.in_set(SkateSet::Camera));
    }
}
