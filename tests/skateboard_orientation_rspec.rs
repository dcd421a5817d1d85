//! Behavioural test: the board follows the ground beneath its sockets.
//!
//! A skater stands on a ramp and on open air; after ticking the headless app
//! the board should lie along the ramp or stay level, and record the nose and
//! tail probes it cast. A board whose rider is gone is cleaned up.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/skate_fixture.rs"]
mod skate_fixture;

use bevy::prelude::*;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use skate_fixture::{headless_app, SkateFixture};
use tomhawk::skateboard::GroundProbe;
use tomhawk::{Collider, CAPSULE_HALF_HEIGHT, SKATEBOARD_TRACE_OFFSET};

const RAMP_PITCH: f32 = 0.3;

fn ramp_fixture() -> SkateFixture {
    SkateFixture::new(
        headless_app(),
        Transform::from_xyz(0.0, CAPSULE_HALF_HEIGHT, 0.0),
        &[(
            Collider::Plane { normal: Vec3::Y },
            Transform::from_rotation(Quat::from_rotation_x(RAMP_PITCH)),
        )],
    )
}

fn gap_fixture() -> SkateFixture {
    SkateFixture::new(
        headless_app(),
        Transform::from_xyz(0.0, CAPSULE_HALF_HEIGHT, 0.0),
        &[],
    )
}

fn assert_near(actual: Vec3, expected: Vec3, what: &str) {
    assert!(
        actual.abs_diff_eq(expected, 1e-3),
        "unexpected {what}: {actual:?}, expected {expected:?}"
    );
}

/// A probe spans the trace offset above and below `socket`.
fn assert_probe_around(probe: Option<GroundProbe>, socket: Vec3, what: &str) -> GroundProbe {
    let probe = probe.unwrap_or_else(|| panic!("no {what} probe recorded"));
    assert_near(probe.start, socket + Vec3::Y * SKATEBOARD_TRACE_OFFSET, what);
    assert_near(probe.end, socket - Vec3::Y * SKATEBOARD_TRACE_OFFSET, what);
    probe
}

#[test]
fn board_tilts_up_a_ramp() {
    run_serial(&rspec::given(
        "a skater standing on a ramp rising towards -Z",
        ramp_fixture(),
        |scenario: &mut Scenario<SkateFixture>| {
            scenario.when("the app ticks a few frames", |ctx| {
                ctx.before_each(|state| {
                    for _ in 0..3 {
                        state.tick();
                    }
                });

                ctx.then("the board nose points up the slope", |state| {
                    let forward = state.board_rotation() * Vec3::NEG_Z;
                    let expected = Vec3::new(0.0, RAMP_PITCH.sin(), -RAMP_PITCH.cos());
                    assert_near(forward, expected, "forward");
                });

                ctx.then("the board keeps its right axis level", |state| {
                    assert_near(state.board_rotation() * Vec3::X, Vec3::X, "right");
                });

                ctx.then("both probes straddle their sockets and hit the ramp", |state| {
                    let (nose, tail) = state.socket_positions();
                    let probes = state.board_probes();
                    let forward = assert_probe_around(probes.forward, nose, "nose");
                    let backward = assert_probe_around(probes.backward, tail, "tail");
                    assert!(forward.hit && backward.hit);
                    assert!(forward.ground.y > backward.ground.y);
                });

                ctx.then("the board still belongs to the skater", |state| {
                    assert_eq!(state.board_rider(), Some(state.skater()));
                });
            });
        },
    ));
}

#[test]
fn board_stays_level_over_a_gap() {
    run_serial(&rspec::given(
        "a skater with nothing beneath the board",
        gap_fixture(),
        |scenario: &mut Scenario<SkateFixture>| {
            scenario.when("the app ticks once", |ctx| {
                ctx.before_each(|state| state.tick());

                ctx.then("the board faces the rider's forward and lies flat", |state| {
                    let forward = state.board_rotation() * Vec3::NEG_Z;
                    assert!(
                        forward.abs_diff_eq(Vec3::NEG_Z, 1e-4),
                        "unexpected forward {forward:?}"
                    );
                });

                ctx.then("both probes miss and fall back to their start", |state| {
                    let probes = state.board_probes();
                    for probe in [probes.forward, probes.backward] {
                        let probe = probe.unwrap_or_else(|| panic!("probe not recorded"));
                        assert!(!probe.hit);
                        assert_eq!(probe.ground, probe.start);
                        assert_near(probe.start - probe.end, Vec3::Y * 60.0, "span");
                    }
                });
            });
        },
    ));
}

#[test]
fn board_is_removed_with_its_rider() {
    run_serial(&rspec::given(
        "a skater on a ramp that leaves the game",
        ramp_fixture(),
        |scenario: &mut Scenario<SkateFixture>| {
            scenario.when("the rider is despawned and the app ticks", |ctx| {
                ctx.before_each(|state| {
                    state.tick();
                    state.despawn_skater();
                    state.tick();
                });

                ctx.then("the board is despawned too", |state| {
                    assert!(!state.board_exists());
                });
            });
        },
    ));
}
