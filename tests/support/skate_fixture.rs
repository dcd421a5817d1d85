//! Shared fixture for behavioural tests that tick a headless skating app.

use std::sync::MutexGuard;

use bevy::prelude::*;
use tomhawk::character::spawn_skater;
use tomhawk::sockets::SkateboardSockets;
use tomhawk::{
    skateboard_backward_socket_name, skateboard_forward_socket_name, Collider, SkatePlugin,
    Skateboard, SkateboardLink, SkateboardProbes, SkaterSettings,
};

use crate::thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};

/// Headless app with the skate systems installed and no player spawned.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SkatePlugin {
        skip_player_spawn: true,
    });
    app
}

/// A skater standing at `at`, with the given static colliders around it.
#[derive(Debug, Clone)]
pub struct SkateFixture {
    app: SharedApp,
    skater: Entity,
    board: Entity,
}

impl SkateFixture {
    /// Spawns one skater and the colliders, then finalizes plugins.
    pub fn new(mut app: App, at: Transform, colliders: &[(Collider, Transform)]) -> Self {
        let world = app.world_mut();
        for (collider, transform) in colliders {
            world.spawn((*collider, *transform));
        }
        let skater = {
            let mut commands = world.commands();
            spawn_skater(&mut commands, &SkaterSettings::default(), at)
        };
        world.flush();
        let board = world
            .get::<SkateboardLink>(skater)
            .map(|link| link.0)
            .unwrap_or_else(|| panic!("skater has no board"));
        Self {
            app: share(app),
            skater,
            board,
        }
    }

    /// Locks the underlying `App`.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// The spawned character.
    pub const fn skater(&self) -> Entity {
        self.skater
    }

    /// Advances the application by a single frame.
    pub fn tick(&self) {
        self.app_guard().update();
    }

    /// World transform of the board.
    pub fn board_transform(&self) -> Transform {
        let app = self.app_guard();
        app.world()
            .get::<Transform>(self.board)
            .copied()
            .unwrap_or_else(|| panic!("board has no transform"))
    }

    /// World rotation of the board.
    pub fn board_rotation(&self) -> Quat {
        self.board_transform().rotation
    }

    /// World positions of the nose and tail sockets.
    pub fn socket_positions(&self) -> (Vec3, Vec3) {
        let transform = self.board_transform();
        let app = self.app_guard();
        let sockets = app
            .world()
            .get::<SkateboardSockets>(self.board)
            .unwrap_or_else(|| panic!("board has no sockets"));
        (
            sockets.world_position(&transform, skateboard_forward_socket_name()),
            sockets.world_position(&transform, skateboard_backward_socket_name()),
        )
    }

    /// Ground probes recorded on the board last frame.
    pub fn board_probes(&self) -> SkateboardProbes {
        let app = self.app_guard();
        app.world()
            .get::<SkateboardProbes>(self.board)
            .copied()
            .unwrap_or_else(|| panic!("board has no probes"))
    }

    /// The rider recorded on the board.
    pub fn board_rider(&self) -> Option<Entity> {
        let app = self.app_guard();
        app.world().get::<Skateboard>(self.board).map(|b| b.rider)
    }

    /// Whether the board entity still exists.
    pub fn board_exists(&self) -> bool {
        self.app_guard().world().get_entity(self.board).is_ok()
    }

    /// Despawns the character, leaving its board behind.
    pub fn despawn_skater(&self) {
        let mut app = self.app_guard();
        let world = app.world_mut();
        if world.get_entity(self.skater).is_ok() {
            world.despawn(self.skater);
        }
    }
}
