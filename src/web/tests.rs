//! Web domain: tests for casting, swinging, reeling and release.

use bevy::prelude::Vec2;

use super::grapple::{Grapple, RopeView, WebControls};
use super::rope_points;
use crate::core::config::WebTuning;
use crate::movement::actor::{Actor, ActorBody, AnchorUv};
use crate::world::geometry::WorldRect;
use crate::world::tiles::{Tile, TileKind};

fn tiles() -> Vec<Tile> {
    vec![
        Tile {
            id: 0,
            rect: WorldRect::new(-5000.0, 950.0, 10000.0, 50.0),
            kind: TileKind::Ground,
            glow_until_ms: 0,
        },
        Tile {
            id: 1,
            rect: WorldRect::new(-3000.0, -1200.0, 6000.0, 24.0),
            kind: TileKind::Placed,
            glow_until_ms: 0,
        },
    ]
}

/// Small actor whose attach point is its top-left corner.
fn actor_at(attach: Vec2) -> Actor {
    let mut actor = Actor::new(ActorBody {
        size: Vec2::new(40.0, 40.0),
        web_anchor: AnchorUv {
            u: 0.0,
            v: 0.0,
            mirror: false,
        },
    });
    actor.pos = attach;
    actor
}

fn latched(anchor: Vec2, len: f32) -> Grapple {
    Grapple::Latched {
        anchor,
        target_len: len,
        prev_len: len,
        tension: 0.0,
    }
}

// -----------------------------------------------------------------------------
// Cast tests
// -----------------------------------------------------------------------------

#[test]
fn test_cast_target_is_distance_when_in_range() {
    let tuning = WebTuning::default();
    let attach = Vec2::new(0.0, -700.0);
    let (grapple, index) =
        Grapple::cast(&tiles(), Vec2::new(0.0, -1200.0), attach, &tuning).unwrap();
    assert_eq!(index, 1);
    assert_eq!(grapple.target_len(), 500.0);
    assert!(matches!(grapple, Grapple::Shooting { cur_len, .. } if cur_len == 0.0));
}

#[test]
fn test_cast_target_clamped_to_max() {
    let tuning = WebTuning::default();
    let attach = Vec2::new(0.0, 800.0);
    let (grapple, _) = Grapple::cast(&tiles(), Vec2::new(0.0, -1200.0), attach, &tuning).unwrap();
    assert_eq!(grapple.target_len(), 1800.0);
}

#[test]
fn test_cast_target_clamped_to_min() {
    let tuning = WebTuning::default();
    let attach = Vec2::new(10.0, 930.0);
    let (grapple, index) = Grapple::cast(&tiles(), Vec2::new(10.0, 960.0), attach, &tuning).unwrap();
    assert_eq!(index, 0);
    assert_eq!(grapple.target_len(), 70.0);
}

#[test]
fn test_cast_into_empty_space_misses() {
    let tuning = WebTuning::default();
    assert!(Grapple::cast(&tiles(), Vec2::new(0.0, 0.0), Vec2::ZERO, &tuning).is_none());
}

#[test]
fn test_shot_latches_at_target() {
    let tuning = WebTuning::default();
    let mut grapple = Grapple::Shooting {
        anchor: Vec2::ZERO,
        target_len: 100.0,
        cur_len: 0.0,
    };
    // 1400/s * 0.05 s = 70 per step
    assert!(!grapple.advance_shot(0.05, &tuning));
    assert!(matches!(grapple, Grapple::Shooting { cur_len, .. } if (cur_len - 70.0).abs() < 1e-3));
    assert!(grapple.advance_shot(0.05, &tuning));
    assert!(matches!(
        grapple,
        Grapple::Latched { prev_len, target_len, .. } if prev_len == 100.0 && target_len == 100.0
    ));
    assert!(!grapple.advance_shot(0.05, &tuning));
}

// -----------------------------------------------------------------------------
// Swing tests
// -----------------------------------------------------------------------------

#[test]
fn test_swing_keeps_rope_rigid() {
    let tuning = WebTuning::default();
    let anchor = Vec2::new(0.0, -1200.0);
    let mut actor = actor_at(Vec2::new(220.0, -900.0));
    actor.vel = Vec2::new(5.0, 3.0);
    let mut grapple = latched(anchor, 400.0);

    for frame in 0..120 {
        let controls = WebControls {
            reel_in: frame % 3 == 0,
            reel_out: frame % 7 == 0,
            pump: frame % 2 == 0,
        };
        grapple.swing(&mut actor, controls, &tuning, 0.5, 1.0 / 60.0);
        actor.pos += actor.vel;
        grapple.swing(&mut actor, WebControls::default(), &tuning, 0.5, 1.0 / 60.0);
        let len = grapple.target_len();
        let dist = actor.attach_point().distance(anchor);
        assert!((dist - len).abs() < 1e-2, "frame {frame}: {dist} vs {len}");
    }
}

#[test]
fn test_swing_removes_radial_velocity() {
    let tuning = WebTuning::default();
    let anchor = Vec2::ZERO;
    let mut actor = actor_at(Vec2::new(0.0, 300.0));
    // Hanging straight down: y is radial, x is tangential
    actor.vel = Vec2::new(4.0, 9.0);
    let mut grapple = latched(anchor, 300.0);
    grapple.swing(&mut actor, WebControls::default(), &tuning, 0.5, 1.0 / 60.0);
    assert!(actor.vel.y.abs() < 1e-5);
    assert!((actor.vel.x - 4.0 * (1.0 - tuning.damping / 60.0)).abs() < 1e-4);
}

#[test]
fn test_reel_stays_within_bounds() {
    let tuning = WebTuning::default();
    let anchor = Vec2::ZERO;
    let mut actor = actor_at(Vec2::new(0.0, 300.0));
    let mut grapple = latched(anchor, 300.0);
    let reel_in = WebControls {
        reel_in: true,
        ..Default::default()
    };
    for _ in 0..200 {
        grapple.swing(&mut actor, reel_in, &tuning, 0.5, 1.0 / 30.0);
        assert!(grapple.target_len() >= tuning.min_len);
    }
    assert_eq!(grapple.target_len(), tuning.min_len);

    let reel_out = WebControls {
        reel_out: true,
        ..Default::default()
    };
    for _ in 0..400 {
        grapple.swing(&mut actor, reel_out, &tuning, 0.5, 1.0 / 30.0);
        assert!(grapple.target_len() <= tuning.max_len);
    }
    assert_eq!(grapple.target_len(), tuning.max_len);
}

#[test]
fn test_reeling_in_amplifies_swing_speed() {
    let tuning = WebTuning::default();
    let anchor = Vec2::ZERO;
    let dt = 1.0 / 60.0;

    let mut plain = actor_at(Vec2::new(0.0, 600.0));
    plain.vel = Vec2::new(6.0, 0.0);
    let mut g_plain = latched(anchor, 600.0);
    g_plain.swing(&mut plain, WebControls::default(), &tuning, 0.5, dt);

    let mut reeled = actor_at(Vec2::new(0.0, 600.0));
    reeled.vel = Vec2::new(6.0, 0.0);
    let mut g_reeled = latched(anchor, 600.0);
    g_reeled.swing(
        &mut reeled,
        WebControls {
            reel_in: true,
            ..Default::default()
        },
        &tuning,
        0.5,
        dt,
    );
    assert!(reeled.vel.length() > plain.vel.length());
}

#[test]
fn test_reel_amplification_is_capped() {
    let tuning = WebTuning::default();
    let dt = 1.0 / 60.0;
    let mut actor = actor_at(Vec2::new(0.0, 300.0));
    actor.vel = Vec2::new(4.0, 0.0);
    let mut grapple = Grapple::Latched {
        anchor: Vec2::ZERO,
        target_len: 300.0,
        prev_len: 1000.0,
        tension: 0.0,
    };
    grapple.swing(&mut actor, WebControls::default(), &tuning, 0.5, dt);

    // Raw ratio would be 1000 / 300
    let expected = 4.0 * (1.0 - tuning.damping * dt) * tuning.reel_amplify_max;
    assert!((actor.vel.length() - expected).abs() < 1e-4);
}

#[test]
fn test_pump_adds_speed_along_motion() {
    let tuning = WebTuning::default();
    let anchor = Vec2::ZERO;
    let dt = 1.0 / 60.0;
    let pump = WebControls {
        pump: true,
        ..Default::default()
    };

    for vx in [3.0, -3.0] {
        let mut actor = actor_at(Vec2::new(0.0, 300.0));
        actor.vel = Vec2::new(vx, 0.0);
        let mut grapple = latched(anchor, 300.0);
        grapple.swing(&mut actor, pump, &tuning, 0.5, dt);
        assert!(actor.vel.length() > 3.0 * (1.0 - tuning.damping * dt));
        assert_eq!(actor.vel.x.signum(), vx.signum());
    }
}

#[test]
fn test_tension_at_bottom_includes_gravity() {
    let tuning = WebTuning::default();
    let mut actor = actor_at(Vec2::new(0.0, 200.0));
    let mut grapple = latched(Vec2::ZERO, 200.0);
    grapple.swing(&mut actor, WebControls::default(), &tuning, 0.5, 1.0 / 60.0);
    // At rest directly below the anchor: rn = (0, 1), so tension = -g
    assert!((grapple.tension() + 0.5).abs() < 1e-5);
}

#[test]
fn test_coincident_attach_falls_back_to_down() {
    let tuning = WebTuning::default();
    let mut actor = actor_at(Vec2::new(50.0, 50.0));
    let mut grapple = latched(Vec2::new(50.0, 50.0), 100.0);
    grapple.swing(&mut actor, WebControls::default(), &tuning, 0.5, 1.0 / 60.0);
    assert!((actor.attach_point() - Vec2::new(50.0, 150.0)).length() < 1e-3);
}

#[test]
fn test_swing_ignored_while_shooting() {
    let tuning = WebTuning::default();
    let mut actor = actor_at(Vec2::new(0.0, 300.0));
    actor.vel = Vec2::new(1.0, 2.0);
    let mut grapple = Grapple::Shooting {
        anchor: Vec2::ZERO,
        target_len: 300.0,
        cur_len: 10.0,
    };
    grapple.swing(&mut actor, WebControls::default(), &tuning, 0.5, 1.0 / 60.0);
    assert_eq!(actor.vel, Vec2::new(1.0, 2.0));
    assert_eq!(actor.pos, Vec2::new(0.0, 300.0));
}

// -----------------------------------------------------------------------------
// Fine reel and release tests
// -----------------------------------------------------------------------------

#[test]
fn test_fine_reel_steps() {
    let tuning = WebTuning::default();
    let mut grapple = latched(Vec2::ZERO, 500.0);
    grapple.fine_reel(1.0, &tuning);
    assert!((grapple.target_len() - 489.0).abs() < 1e-3);
    grapple.fine_reel(-2.0, &tuning);
    assert!((grapple.target_len() - 511.0).abs() < 1e-3);
    grapple.fine_reel(1000.0, &tuning);
    assert_eq!(grapple.target_len(), tuning.min_len);
}

#[test]
fn test_fine_reel_ignored_while_shooting() {
    let tuning = WebTuning::default();
    let mut grapple = Grapple::Shooting {
        anchor: Vec2::ZERO,
        target_len: 500.0,
        cur_len: 0.0,
    };
    grapple.fine_reel(3.0, &tuning);
    assert_eq!(grapple.target_len(), 500.0);
}

#[test]
fn test_release_boost_only_from_latched() {
    let tuning = WebTuning::default();

    let mut actor = actor_at(Vec2::new(0.0, 300.0));
    actor.vel = Vec2::new(-10.0, 0.0);
    actor.set_frame_lock(true);
    latched(Vec2::ZERO, 300.0).release(&mut actor, &tuning);
    // min(2.2, 0.35 + 0.015 * 10) = 0.5 along the current motion
    assert!((actor.vel.x + 10.5).abs() < 1e-4);
    assert!(!actor.frame_lock);

    let mut shooting_actor = actor_at(Vec2::new(0.0, 300.0));
    shooting_actor.vel = Vec2::new(-10.0, 0.0);
    shooting_actor.set_frame_lock(true);
    Grapple::Shooting {
        anchor: Vec2::ZERO,
        target_len: 300.0,
        cur_len: 5.0,
    }
    .release(&mut shooting_actor, &tuning);
    assert_eq!(shooting_actor.vel, Vec2::new(-10.0, 0.0));
    assert!(!shooting_actor.frame_lock);
}

#[test]
fn test_release_boost_capped() {
    let tuning = WebTuning::default();
    let mut actor = actor_at(Vec2::new(0.0, 300.0));
    actor.vel = Vec2::new(500.0, 0.0);
    latched(Vec2::ZERO, 300.0).release(&mut actor, &tuning);
    assert!((actor.vel.x - 502.2).abs() < 1e-3);
}

// -----------------------------------------------------------------------------
// Rope view tests
// -----------------------------------------------------------------------------

#[test]
fn test_rope_view_grows_while_shooting() {
    let grapple = Grapple::Shooting {
        anchor: Vec2::new(0.0, -400.0),
        target_len: 400.0,
        cur_len: 100.0,
    };
    let view = grapple.rope_view(Vec2::ZERO);
    assert_eq!(view.shown_len, 100.0);
    assert!((view.to - Vec2::new(0.0, -100.0)).length() < 1e-4);
}

#[test]
fn test_rope_view_clamped_to_distance() {
    let grapple = latched(Vec2::new(0.0, -50.0), 400.0);
    let view = grapple.rope_view(Vec2::ZERO);
    assert_eq!(view.shown_len, 50.0);
    assert_eq!(view.to, Vec2::new(0.0, -50.0));
}

#[test]
fn test_rope_points_pinned_at_ends() {
    let view = RopeView {
        from: Vec2::ZERO,
        to: Vec2::new(100.0, 0.0),
        shown_len: 100.0,
    };
    let points = rope_points(&view, 1.3);
    assert!((points[0] - view.from).length() < 1e-4);
    assert!((points[points.len() - 1] - view.to).length() < 1e-3);
}

#[test]
fn test_state_names() {
    assert_eq!(Grapple::state_name(None), "None");
    assert_eq!(Grapple::state_name(Some(&latched(Vec2::ZERO, 100.0))), "Latched");
}
