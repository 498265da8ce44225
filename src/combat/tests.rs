//! Combat domain: tests for ammo, knives, chasers and damage.

use bevy::prelude::Vec2;

use super::{Ammo, Enemy, Health, Projectile, apply_contact_damage, hand_point};
use super::{resolve_projectile_hits, step_enemy};
use crate::core::config::{EnemyTuning, KinematicsTuning, WeaponTuning};
use crate::core::resources::SimMode;
use crate::movement::actor::{Actor, ActorBody};
use crate::world::geometry::WorldRect;
use crate::world::tiles::{Tile, TileKind};

fn ground() -> Vec<Tile> {
    vec![Tile {
        id: 0,
        rect: WorldRect::new(-5000.0, 950.0, 10000.0, 50.0),
        kind: TileKind::Ground,
        glow_until_ms: 0,
    }]
}

fn unlimited() -> SimMode {
    SimMode {
        moon_gravity: false,
        unlimited_ammo: true,
    }
}

// -----------------------------------------------------------------------------
// Ammo tests
// -----------------------------------------------------------------------------

#[test]
fn test_clip_empties_then_recharges_one_at_a_time() {
    let tuning = WeaponTuning::default();
    let mode = SimMode::default();
    let mut ammo = Ammo::full(&tuning, 0);

    for _ in 0..3 {
        assert!(ammo.try_fire(&tuning, mode, 1000));
    }
    assert_eq!(ammo.rounds, 0);
    assert!(!ammo.try_fire(&tuning, mode, 1000));

    assert!(!ammo.recharge(&tuning, mode, 1899));
    assert!(ammo.recharge(&tuning, mode, 1900));
    assert_eq!(ammo.rounds, 1);
    // One unit per recharge window even after a long gap
    assert!(!ammo.recharge(&tuning, mode, 2000));
    assert!(ammo.recharge(&tuning, mode, 5000));
    assert_eq!(ammo.rounds, 2);
}

#[test]
fn test_ammo_conservation() {
    let tuning = WeaponTuning::default();
    let mode = SimMode::default();
    let mut ammo = Ammo::full(&tuning, 0);
    let mut fired = 0u32;
    let mut recharged = 0u32;

    let mut now = 0;
    while now < 10_000 {
        now += 16;
        if now % 160 == 0 && ammo.try_fire(&tuning, mode, now) {
            fired += 1;
        }
        if ammo.recharge(&tuning, mode, now) {
            recharged += 1;
        }
        assert_eq!(ammo.rounds + fired, tuning.clip + recharged);
        assert!(ammo.rounds <= tuning.clip);
    }
    assert!(fired > 0 && recharged > 0);
}

#[test]
fn test_unlimited_mode_never_consumes() {
    let tuning = WeaponTuning::default();
    let mut ammo = Ammo::full(&tuning, 0);
    for _ in 0..20 {
        assert!(ammo.try_fire(&tuning, unlimited(), 10));
    }
    assert_eq!(ammo.rounds, tuning.clip);
    ammo.rounds = 0;
    assert!(!ammo.recharge(&tuning, unlimited(), 100_000));
}

#[test]
fn test_recharge_fraction() {
    let tuning = WeaponTuning::default();
    let ammo = Ammo::full(&tuning, 1000);
    assert_eq!(ammo.recharge_fraction(&tuning, 1000), 0.0);
    assert!((ammo.recharge_fraction(&tuning, 1450) - 0.5).abs() < 1e-6);
    assert_eq!(ammo.recharge_fraction(&tuning, 9000), 1.0);
}

// -----------------------------------------------------------------------------
// Projectile tests
// -----------------------------------------------------------------------------

#[test]
fn test_projectile_spawns_centered_on_hand() {
    let tuning = WeaponTuning::default();
    let mut actor = Actor::new(ActorBody::default());
    actor.pos = Vec2::new(100.0, 200.0);
    let hand = hand_point(&actor, -1.0, &tuning);
    assert!((hand.x - (100.0 + 240.0 - 22.0)).abs() < 1e-3);
    assert!((hand.y - (200.0 + 384.0 * 0.42 + 30.0)).abs() < 1e-3);

    let knife = Projectile::spawn(7, hand, -1.0, &tuning, 0);
    assert!((knife.rect.center() - hand).length() < 1e-3);
    assert_eq!(knife.vel, Vec2::new(-3.0, 0.0));
}

#[test]
fn test_projectile_moves_spins_and_expires() {
    let tuning = WeaponTuning::default();
    let mut knife = Projectile::spawn(1, Vec2::ZERO, 1.0, &tuning, 1000);
    knife.advance(1500, &tuning);
    assert!(knife.active);
    assert_eq!(knife.rect.center().x, 3.0);
    assert!((knife.angle_deg - 360.0).abs() < 1e-3);

    knife.advance(4999, &tuning);
    assert!(knife.active);
    knife.advance(5000, &tuning);
    assert!(!knife.active);

    let x = knife.rect.x;
    knife.advance(6000, &tuning);
    assert_eq!(knife.rect.x, x);
}

// -----------------------------------------------------------------------------
// Enemy tests
// -----------------------------------------------------------------------------

#[test]
fn test_enemy_lands_and_chases_player() {
    let kinematics = KinematicsTuning::default();
    let tuning = EnemyTuning::default();
    let mut enemy = Enemy::spawn(1, 500.0, 950.0 - tuning.spawn_lift, &tuning);

    for _ in 0..30 {
        step_enemy(&mut enemy, 0.0, &ground(), &kinematics, &tuning, SimMode::default());
    }
    assert_eq!(enemy.rect.bottom(), 950.0);
    assert_eq!(enemy.vel.x, -tuning.walk_speed);
    assert!(enemy.rect.center().x < 500.0);
}

#[test]
fn test_split_enemy_slides_to_a_stop() {
    let kinematics = KinematicsTuning::default();
    let tuning = EnemyTuning::default();
    let mut enemy = Enemy::spawn(1, 500.0, 950.0, &tuning);
    enemy.vel.x = 2.0;
    enemy.kill(0, &tuning);
    step_enemy(&mut enemy, 0.0, &ground(), &kinematics, &tuning, SimMode::default());
    assert!((enemy.vel.x - 2.0 * 0.97).abs() < 1e-6);
}

#[test]
fn test_split_expiry() {
    let tuning = EnemyTuning::default();
    let mut enemy = Enemy::spawn(1, 0.0, 950.0, &tuning);
    assert!(!enemy.split_expired(10_000));
    enemy.kill(1000, &tuning);
    assert!(enemy.is_split());
    assert!(!enemy.split_expired(1649));
    assert!(enemy.split_expired(1650));
}

// -----------------------------------------------------------------------------
// Hit and contact tests
// -----------------------------------------------------------------------------

#[test]
fn test_enemy_scores_once() {
    let weapon = WeaponTuning::default();
    let tuning = EnemyTuning::default();
    let mut enemies = vec![Enemy::spawn(1, 0.0, 950.0, &tuning)];
    let center = enemies[0].rect.center();

    let mut kills = 0;
    let mut hits = 0;
    for i in 0..5 {
        let mut knives = vec![Projectile::spawn(i, center, 1.0, &weapon, 0)];
        let outcome = resolve_projectile_hits(&mut knives, &mut enemies, &weapon, &tuning, 100);
        assert!(!knives[0].active, "knife {i} should be consumed");
        kills += outcome.kills;
        hits += outcome.hits;
    }
    assert_eq!(kills, 1);
    assert_eq!(hits, 2);
    assert!(enemies[0].is_split());
}

#[test]
fn test_knife_hits_only_first_enemy() {
    let weapon = WeaponTuning::default();
    let tuning = EnemyTuning::default();
    let mut enemies = vec![
        Enemy::spawn(1, 0.0, 950.0, &tuning),
        Enemy::spawn(2, 0.0, 950.0, &tuning),
    ];
    let center = enemies[0].rect.center();
    let mut knives = vec![Projectile::spawn(1, center, 1.0, &weapon, 0)];
    let outcome = resolve_projectile_hits(&mut knives, &mut enemies, &weapon, &tuning, 0);
    assert_eq!(outcome.hits, 1);
    assert_eq!(enemies[0].hp, tuning.hp - 1);
    assert_eq!(enemies[1].hp, tuning.hp);
}

#[test]
fn test_removed_enemies_ignore_knives() {
    let weapon = WeaponTuning::default();
    let tuning = EnemyTuning::default();
    let mut enemies = vec![Enemy::spawn(1, 0.0, 950.0, &tuning)];
    enemies[0].removed = true;
    let mut knives = vec![Projectile::spawn(1, enemies[0].rect.center(), 1.0, &weapon, 0)];
    resolve_projectile_hits(&mut knives, &mut enemies, &weapon, &tuning, 0);
    assert!(knives[0].active);
}

#[test]
fn test_contact_damage_respects_cooldown() {
    let tuning = EnemyTuning::default();
    let mut enemies = vec![Enemy::spawn(1, 0.0, 950.0, &tuning)];
    let player = enemies[0].rect;
    let mut health = Health::new(100.0);

    assert_eq!(apply_contact_damage(player, &mut enemies, &mut health, &tuning, 0), 6.0);
    assert_eq!(apply_contact_damage(player, &mut enemies, &mut health, &tuning, 299), 0.0);
    assert_eq!(apply_contact_damage(player, &mut enemies, &mut health, &tuning, 300), 6.0);
    assert_eq!(health.current, 88.0);
}

#[test]
fn test_split_enemies_do_not_hurt() {
    let tuning = EnemyTuning::default();
    let mut enemies = vec![Enemy::spawn(1, 0.0, 950.0, &tuning)];
    enemies[0].kill(0, &tuning);
    let player = enemies[0].rect;
    let mut health = Health::new(100.0);
    assert_eq!(apply_contact_damage(player, &mut enemies, &mut health, &tuning, 0), 0.0);
}

#[test]
fn test_health_floors_at_zero() {
    let mut health = Health::new(10.0);
    assert_eq!(health.take_damage(6.0), 6.0);
    assert_eq!(health.take_damage(6.0), 4.0);
    assert_eq!(health.current, 0.0);
    assert!(health.is_dead());
    health.restore();
    assert_eq!(health.percent(), 1.0);
}
