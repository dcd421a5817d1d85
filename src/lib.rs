#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for Tomhawk, a third-person skateboarding character.
//! Re-exports the components, systems and plugin used by the binary and tests.
pub mod camera;
pub mod character;
pub mod collision;
pub mod constants;
pub mod game_mode;
pub mod input;
pub mod logging;
pub mod movement;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod settings;
pub mod skateboard;
pub mod sockets;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use character::{Controller, PendingMovement, Player, Skater};
pub use collision::{Collider, CollisionScene, LineTrace, TraceHit, TraceIgnore};
pub use game_mode::{GameMode, PawnClass, PawnClassRegistry};
pub use input::{InputCapability, JumpAction, LookAction, MoveAction, PlayerInputBindings};
pub use logging::init as init_logging;
pub use plugin::{SkatePlugin, SkateSet};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
pub use settings::{GameSettings, SettingsError, SkaterSettings};
pub use skateboard::{Skateboard, SkateboardLink, SkateboardProbes};
pub use sockets::{skateboard_backward_socket_name, skateboard_forward_socket_name};
pub use vector_math::look_at_rotation;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tomhawk::prelude::*;
    //! ```

    pub use crate::character::{Controller, Skater};
    pub use crate::input::{JumpAction, LookAction, MoveAction};
    pub use crate::settings::GameSettings;
    pub use crate::SkatePlugin;
}
