//! Input actions and their bindings to the player pawn.
//!
//! Devices never touch the character directly. [`map_device_input_system`]
//! turns keyboard and mouse state into three actions (move, look and jump)
//! which are triggered as observer events. The observers registered by
//! [`crate::SkatePlugin`] forward them to pawns carrying
//! [`PlayerInputBindings`].
//!
//! Binding depends on the platform offering action input at all. That is an
//! explicit [`InputCapability`] rather than a probe of some input component's
//! type; without it the pawn is left unbound and an error is logged.

use bevy::ecs::prelude::On;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use log::{error, info};

use crate::character::{apply_look, Controller, JumpRequest, PendingMovement, Player, Skater};
use crate::skateboard::{Skateboard, SkateboardLink};

/// Two-dimensional movement action. `y` drives forward, `x` turns.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveAction(pub Vec2);

/// Two-dimensional look action. `x` is yaw, `y` is pitch.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LookAction(pub Vec2);

/// Discrete jump action.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpAction {
    /// The jump input went down.
    Started,
    /// The jump input was released.
    Completed,
}

/// Whether the platform supports action-based input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputCapability {
    /// Move, look and jump actions are available.
    #[default]
    ActionInput,
    /// Only raw device input exists; the pawn cannot be bound.
    Legacy,
}

/// Name of the context every bound pawn starts with.
pub const DEFAULT_MAPPING_CONTEXT: &str = "DefaultMappingContext";

/// A named set of action mappings and its priority.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMappingContext {
    /// Context name, as shown in logs.
    pub name: String,
    /// Higher values take precedence when several contexts are active.
    pub priority: i32,
    /// Keys and sensitivity this context maps to actions.
    pub mapping: InputMapping,
}

impl InputMappingContext {
    /// Context named `name` using `mapping`.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: i32, mapping: InputMapping) -> Self {
        Self {
            name: name.into(),
            priority,
            mapping,
        }
    }
}

impl Default for InputMappingContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAPPING_CONTEXT, 0, InputMapping::default())
    }
}

/// Present on pawns whose actions are bound to the local player.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PlayerInputBindings {
    /// Active mapping contexts.
    pub contexts: Vec<InputMappingContext>,
}

impl PlayerInputBindings {
    /// Adds a context. Among equal priorities the latest addition wins.
    #[must_use]
    pub fn with_context(mut self, context: InputMappingContext) -> Self {
        self.contexts.push(context);
        self
    }

    /// The context devices are read through: the highest priority one.
    #[must_use]
    pub fn active_context(&self) -> Option<&InputMappingContext> {
        self.contexts.iter().max_by_key(|context| context.priority)
    }
}

/// Keys and sensitivity used to derive actions from devices.
///
/// As a resource it is the mapping newly bound pawns receive in their
/// default context.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputMapping {
    /// Push forward.
    pub forward: KeyCode,
    /// Backward; produces negative forward input.
    pub back: KeyCode,
    /// Turn left.
    pub left: KeyCode,
    /// Turn right.
    pub right: KeyCode,
    /// Jump.
    pub jump: KeyCode,
    /// Degrees of look per unit of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for InputMapping {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            look_sensitivity: 0.2,
        }
    }
}

/// Pressed state of the four movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of exactly four directional keys."
)]
pub struct MoveKeys {
    /// Forward key held.
    pub forward: bool,
    /// Back key held.
    pub back: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
}

/// Movement axis for the given key states. Opposing keys cancel.
///
/// # Examples
///
/// ```
/// use bevy::math::Vec2;
/// use tomhawk::input::{move_axis, MoveKeys};
///
/// let keys = MoveKeys { forward: true, right: true, ..Default::default() };
/// assert_eq!(move_axis(keys), Vec2::new(1.0, 1.0));
/// ```
#[must_use]
pub const fn move_axis(keys: MoveKeys) -> Vec2 {
    const fn axis(neg: bool, pos: bool) -> f32 {
        match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    Vec2::new(axis(keys.left, keys.right), axis(keys.back, keys.forward))
}

/// Triggers actions from keyboard and mouse state.
///
/// Devices are read through the active context of the first bound pawn;
/// with no bound pawn nothing fires. Move and look fire on every frame their
/// value is non-zero; jump fires once on press and once on release.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn map_device_input_system(
    mut commands: Commands,
    bindings: Query<&PlayerInputBindings>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<AccumulatedMouseMotion>>,
) {
    let Some(mapping) = bindings
        .iter()
        .find_map(PlayerInputBindings::active_context)
        .map(|context| &context.mapping)
    else {
        return;
    };

    if let Some(keyboard) = keyboard {
        let axis = move_axis(MoveKeys {
            forward: keyboard.pressed(mapping.forward),
            back: keyboard.pressed(mapping.back),
            left: keyboard.pressed(mapping.left),
            right: keyboard.pressed(mapping.right),
        });
        if axis != Vec2::ZERO {
            commands.trigger(MoveAction(axis));
        }
        if keyboard.just_pressed(mapping.jump) {
            commands.trigger(JumpAction::Started);
        }
        if keyboard.just_released(mapping.jump) {
            commands.trigger(JumpAction::Completed);
        }
    }

    if let Some(mouse) = mouse {
        if mouse.delta != Vec2::ZERO {
            // Screen Y grows downwards; pushing the mouse up should look up.
            let look = Vec2::new(mouse.delta.x, -mouse.delta.y) * mapping.look_sensitivity;
            commands.trigger(LookAction(look));
        }
    }
}

/// Binds actions on newly possessed player pawns.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn bind_player_input(
    mut commands: Commands,
    capability: Res<InputCapability>,
    mapping: Res<InputMapping>,
    pawns: Query<(Entity, Option<&Name>), (With<Player>, Added<Controller>)>,
) {
    for (entity, name) in &pawns {
        let label = name.map_or_else(|| entity.to_string(), |n| n.as_str().to_owned());
        match *capability {
            InputCapability::ActionInput => {
                let context =
                    InputMappingContext::new(DEFAULT_MAPPING_CONTEXT, 0, mapping.clone());
                commands
                    .entity(entity)
                    .insert(PlayerInputBindings::default().with_context(context));
                info!("bound player input for '{label}' with {DEFAULT_MAPPING_CONTEXT}");
            }
            InputCapability::Legacy => {
                error!(
                    "'{label}' failed to find action input support; this character is built \
                     for move/look/jump actions and will not receive input"
                );
            }
        }
    }
}

/// Forwards [`MoveAction`] to bound skaters.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub fn handle_move_action(
    event: On<MoveAction>,
    mut pawns: Query<
        (
            &mut Skater,
            &mut PendingMovement,
            Option<&Controller>,
            &SkateboardLink,
        ),
        With<PlayerInputBindings>,
    >,
    boards: Query<&Transform, With<Skateboard>>,
) {
    let MoveAction(axis) = *event.event();
    for (mut skater, mut pending, controller, link) in &mut pawns {
        let Ok(board) = boards.get(link.0) else {
            continue;
        };
        if let Some(intent) = skater.apply_move(axis, controller.is_some(), board.rotation) {
            pending.add(intent.forward);
            pending.add(intent.lateral);
        }
    }
}

/// Forwards [`LookAction`] to bound pawns' controllers.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub fn handle_look_action(
    event: On<LookAction>,
    mut pawns: Query<Option<&mut Controller>, With<PlayerInputBindings>>,
) {
    let LookAction(axis) = *event.event();
    for mut controller in &mut pawns {
        apply_look(controller.as_deref_mut(), axis);
    }
}

/// Forwards [`JumpAction`] to bound pawns.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub fn handle_jump_action(
    event: On<JumpAction>,
    mut pawns: Query<&mut JumpRequest, With<PlayerInputBindings>>,
) {
    let pressed = matches!(event.event(), JumpAction::Started);
    for mut jump in &mut pawns {
        jump.pressed = pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::none(MoveKeys::default(), Vec2::ZERO)]
    #[case::forward(MoveKeys { forward: true, ..Default::default() }, Vec2::new(0.0, 1.0))]
    #[case::back(MoveKeys { back: true, ..Default::default() }, Vec2::new(0.0, -1.0))]
    #[case::left(MoveKeys { left: true, ..Default::default() }, Vec2::new(-1.0, 0.0))]
    #[case::opposing(MoveKeys { left: true, right: true, forward: true, back: false }, Vec2::new(0.0, 1.0))]
    fn keys_map_to_axis(#[case] keys: MoveKeys, #[case] expected: Vec2) {
        assert_eq!(move_axis(keys), expected);
    }

    #[test]
    fn default_mapping_context_uses_default_keys() {
        let context = InputMappingContext::default();
        assert_eq!(context.priority, 0);
        assert_eq!(context.name, "DefaultMappingContext");
        assert_eq!(context.mapping, InputMapping::default());
    }

    #[test]
    fn highest_priority_context_is_active() {
        let arrows = InputMapping {
            forward: KeyCode::ArrowUp,
            ..InputMapping::default()
        };
        let bindings = PlayerInputBindings::default()
            .with_context(InputMappingContext::default())
            .with_context(InputMappingContext::new("Arrows", 1, arrows.clone()))
            .with_context(InputMappingContext::new("Menu", -1, InputMapping::default()));
        let active = bindings.active_context().map(|c| c.name.as_str());
        assert_eq!(active, Some("Arrows"));
        assert_eq!(bindings.active_context().map(|c| &c.mapping), Some(&arrows));
    }

    #[test]
    fn empty_bindings_have_no_active_context() {
        assert!(PlayerInputBindings::default().active_context().is_none());
    }

    #[test]
    fn action_input_is_the_default_capability() {
        assert_eq!(InputCapability::default(), InputCapability::ActionInput);
    }
}
