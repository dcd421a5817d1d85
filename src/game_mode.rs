//! Game mode: which pawn the player gets.
//!
//! Pawn classes are looked up by asset-style path in a [`PawnClassRegistry`].
//! The lookup fails closed: an unknown path leaves the built-in
//! [`PawnClass::DefaultPawn`] in place and nothing is reported beyond a
//! debug line.

use bevy::prelude::*;
use hashbrown::HashMap;

use crate::character::{spawn_skater, Controller, Player};
use crate::constants::DEFAULT_PAWN_CLASS_PATH;
use crate::settings::SkaterSettings;

/// Kind of pawn the game mode can spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PawnClass {
    /// Bare pawn with a transform and a controller, and no movement.
    #[default]
    DefaultPawn,
    /// Skating character with its board and follow camera.
    Skater(SkaterSettings),
}

/// Pawn classes addressable by path.
#[derive(Resource, Debug, Clone, Default)]
pub struct PawnClassRegistry {
    classes: HashMap<String, PawnClass>,
}

impl PawnClassRegistry {
    /// Registry with the third-person skater registered under its default
    /// path, using `skater` as its tunables.
    #[must_use]
    pub fn with_builtin_classes(skater: SkaterSettings) -> Self {
        let mut registry = Self::default();
        registry.register(DEFAULT_PAWN_CLASS_PATH, PawnClass::Skater(skater));
        registry
    }

    /// Registers `class` under `path`, replacing any previous entry.
    pub fn register(&mut self, path: impl Into<String>, class: PawnClass) {
        self.classes.insert(path.into(), class);
    }

    /// Class registered under `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<PawnClass> {
        self.classes.get(path).copied()
    }
}

/// Game mode configuration, fixed once constructed.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GameMode {
    default_pawn_class: PawnClass,
}

impl GameMode {
    /// Resolves `pawn_path` in `registry`, keeping the built-in default pawn
    /// when the path is unknown.
    #[must_use]
    pub fn new(registry: &PawnClassRegistry, pawn_path: &str) -> Self {
        let default_pawn_class = registry.resolve(pawn_path).unwrap_or_else(|| {
            log::debug!("pawn class '{pawn_path}' not found; keeping the default pawn");
            PawnClass::DefaultPawn
        });
        Self { default_pawn_class }
    }

    /// Class spawned for the player.
    #[must_use]
    pub const fn default_pawn_class(&self) -> PawnClass {
        self.default_pawn_class
    }
}

/// Where the player pawn appears.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerStart(pub Transform);

impl Default for PlayerStart {
    fn default() -> Self {
        Self(Transform::from_xyz(0.0, 200.0, 0.0))
    }
}

/// Spawns the player's pawn and possesses it.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn spawn_player_pawn(
    mut commands: Commands,
    game_mode: Res<GameMode>,
    start: Option<Res<PlayerStart>>,
) {
    let at = start.map_or_else(|| PlayerStart::default().0, |s| s.0);
    let pawn = match game_mode.default_pawn_class() {
        PawnClass::Skater(settings) => spawn_skater(&mut commands, &settings, at),
        PawnClass::DefaultPawn => commands.spawn((Name::new("DefaultPawn"), at)).id(),
    };
    commands.entity(pawn).insert((Player, Controller::default()));
    log::info!(
        "spawned player pawn {pawn} as {:?}",
        game_mode.default_pawn_class()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_path_resolves_to_skater() {
        let settings = SkaterSettings::default();
        let registry = PawnClassRegistry::with_builtin_classes(settings);
        let mode = GameMode::new(&registry, DEFAULT_PAWN_CLASS_PATH);
        assert_eq!(mode.default_pawn_class(), PawnClass::Skater(settings));
    }

    #[test]
    fn unknown_path_keeps_default_pawn() {
        let registry = PawnClassRegistry::with_builtin_classes(SkaterSettings::default());
        let mode = GameMode::new(&registry, "/Game/Missing/BP_Nothing");
        assert_eq!(mode.default_pawn_class(), PawnClass::DefaultPawn);
    }

    #[test]
    fn empty_registry_keeps_default_pawn() {
        let mode = GameMode::new(&PawnClassRegistry::default(), DEFAULT_PAWN_CLASS_PATH);
        assert_eq!(mode.default_pawn_class(), PawnClass::DefaultPawn);
    }

    #[test]
    fn registered_path_overrides_builtin_class() {
        let mut registry = PawnClassRegistry::with_builtin_classes(SkaterSettings::default());
        registry.register(DEFAULT_PAWN_CLASS_PATH, PawnClass::DefaultPawn);
        let mode = GameMode::new(&registry, DEFAULT_PAWN_CLASS_PATH);
        assert_eq!(mode.default_pawn_class(), PawnClass::DefaultPawn);
    }
}
