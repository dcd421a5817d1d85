//! Named attachment points on the skateboard.
//!
//! Callers look sockets up by name through [`skateboard_forward_socket_name`]
//! and [`skateboard_backward_socket_name`] so the board layout can rename its
//! sockets without touching the orientation code.
use bevy::prelude::*;
use hashbrown::HashMap;

/// Name of the socket at the nose of the board.
pub const SKATEBOARD_FORWARD_SOCKET: &str = "SkateForwardSocket";
/// Name of the socket at the tail of the board.
pub const SKATEBOARD_BACKWARD_SOCKET: &str = "SkateBackwardSocket";

/// Retrieve the forward socket name.
#[must_use]
pub const fn skateboard_forward_socket_name() -> &'static str {
    SKATEBOARD_FORWARD_SOCKET
}

/// Retrieve the backward socket name.
#[must_use]
pub const fn skateboard_backward_socket_name() -> &'static str {
    SKATEBOARD_BACKWARD_SOCKET
}

/// Socket layout of a board, as offsets in the board's local frame.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SkateboardSockets {
    offsets: HashMap<String, Vec3>,
}

impl SkateboardSockets {
    /// Creates an empty layout.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            offsets: HashMap::new(),
        }
    }

    /// Adds or replaces a socket.
    #[must_use]
    pub fn with_socket(mut self, name: impl Into<String>, offset: Vec3) -> Self {
        self.offsets.insert(name.into(), offset);
        self
    }

    /// Local offset of the named socket, if the board defines it.
    #[must_use]
    pub fn local_offset(&self, name: &str) -> Option<Vec3> {
        self.offsets.get(name).copied()
    }

    /// World position of the named socket for a board at `board`.
    ///
    /// An unknown socket resolves to the board origin.
    #[must_use]
    pub fn world_position(&self, board: &Transform, name: &str) -> Vec3 {
        self.local_offset(name)
            .map_or(board.translation, |offset| board.transform_point(offset))
    }
}

impl Default for SkateboardSockets {
    /// Nose and tail 40 units either side of the centre, along the board's
    /// forward axis.
    fn default() -> Self {
        Self::empty()
            .with_socket(SKATEBOARD_FORWARD_SOCKET, Vec3::new(0.0, 0.0, -40.0))
            .with_socket(SKATEBOARD_BACKWARD_SOCKET, Vec3::new(0.0, 0.0, 40.0))
    }
}
