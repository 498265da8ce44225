//! Session domain: the whole simulation state and the fixed per-frame order.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::{
    Ammo, Enemy, Health, Projectile, apply_contact_damage, hand_point, resolve_projectile_hits,
    step_enemy,
};
use crate::core::config::GameConfig;
use crate::core::resources::SimMode;
use crate::movement::{Actor, ActorBody, FlipKind, jump, step_actor};
use crate::session::events::GameEvent;
use crate::web::{Grapple, RopeView, WebControls};
use crate::world::tiles::TileSet;

/// Player intent for one frame, already mapped from devices and converted
/// to simulation space.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// -1 left, +1 right
    pub move_axis: f32,
    pub jump: bool,
    pub flip: Option<FlipKind>,
    pub fire: bool,
    /// Web cast at a point (press this frame)
    pub cast: Option<Vec2>,
    /// Web button still down; releasing it lets go
    pub cast_held: bool,
    pub place_platform: Option<Vec2>,
    pub controls: WebControls,
    /// Wheel steps, positive shortens the rope
    pub fine_reel: f32,
    pub spawn_enemy: bool,
    pub reset: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// Tile index the player landed on this frame
    pub landed: Option<usize>,
    pub reset: bool,
}

/// Values shown by the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct HudValues {
    pub hp: f32,
    pub max_hp: f32,
    pub hp_percent: f32,
    pub rounds: u32,
    pub clip: u32,
    pub unlimited_ammo: bool,
    /// Progress toward the next round, only while reloading
    pub recharge: Option<f32>,
    pub moon_gravity: bool,
    pub web_state: &'static str,
    pub web_len: Option<f32>,
    pub tension: Option<f32>,
    pub score: u32,
    pub anchor_uv: Vec2,
}

#[derive(Resource, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub actor: Actor,
    pub tiles: TileSet,
    pub grapple: Option<Grapple>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub ammo: Ammo,
    pub health: Health,
    pub score: u32,
    pub game_over: bool,
    rng: ChaCha8Rng,
    next_id: u32,
}

impl Session {
    pub fn new(config: GameConfig, body: ActorBody, seed: u64, now_ms: u64) -> Self {
        let tiles = TileSet::new(config.world.ground, config.world.platform_size.into());
        let mut actor = Actor::new(body);
        actor.hard_reset(tiles.ground_top());
        Self {
            ammo: Ammo::full(&config.weapon, now_ms),
            health: Health::new(config.world.player_max_hp),
            actor,
            tiles,
            grapple: None,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            game_over: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 1,
            config,
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to a fresh run. Ground tiles and id counters survive; sim mode
    /// is reset by the caller.
    pub fn reset(&mut self, now_ms: u64) {
        self.projectiles.clear();
        self.enemies.clear();
        self.tiles.clear_placed();
        self.grapple = None;
        self.health.restore();
        self.ammo = Ammo::full(&self.config.weapon, now_ms);
        self.score = 0;
        self.game_over = false;
        self.actor.hard_reset(self.tiles.ground_top());
        info!("Session reset");
    }

    /// Advance one frame. See the numbered phases below for the order.
    pub fn step(&mut self, input: &FrameInput, mode: SimMode, now_ms: u64, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();

        // 1. actions
        if input.reset {
            self.reset(now_ms);
            report.reset = true;
        }
        if !self.game_over {
            self.apply_actions(input, mode, now_ms, &mut report);
        }

        // 2. actor
        let intent = if self.game_over { 0.0 } else { input.move_axis };
        let landed = step_actor(
            &mut self.actor,
            intent,
            self.tiles.tiles(),
            &self.config.kinematics,
            mode,
            now_ms,
        );
        if let Some(index) = landed {
            self.tiles.glow(index, now_ms + self.config.world.glow_ms);
            report.landed = Some(index);
        }

        // 3. ammo
        if !self.game_over {
            self.ammo.recharge(&self.config.weapon, mode, now_ms);
        }

        // 4. projectiles
        for projectile in &mut self.projectiles {
            projectile.advance(now_ms, &self.config.weapon);
        }

        // 5. web
        self.step_grapple(input, mode, dt, landed);

        if !self.game_over {
            // 6. enemies
            let player_x = self.actor.center().x;
            for enemy in &mut self.enemies {
                if enemy.split_expired(now_ms) {
                    enemy.removed = true;
                }
                if enemy.removed {
                    continue;
                }
                step_enemy(
                    enemy,
                    player_x,
                    self.tiles.tiles(),
                    &self.config.kinematics,
                    &self.config.enemy,
                    mode,
                );
            }

            // 7. hits
            let outcome = resolve_projectile_hits(
                &mut self.projectiles,
                &mut self.enemies,
                &self.config.weapon,
                &self.config.enemy,
                now_ms,
            );
            self.score += outcome.kills;
            report
                .events
                .extend(std::iter::repeat_n(GameEvent::EnemyHit, outcome.hits as usize));

            // 8. contact
            let player_box = self.actor.render_box();
            apply_contact_damage(
                player_box,
                &mut self.enemies,
                &mut self.health,
                &self.config.enemy,
                now_ms,
            );
        }

        // 9. prune
        self.projectiles.retain(|p| p.active);
        self.enemies.retain(|e| !e.removed);

        // 10. death
        if !self.game_over && self.health.is_dead() {
            self.game_over = true;
            report.events.push(GameEvent::PlayerDied);
            info!("Player knocked out with score {}", self.score);
        }

        report
    }

    fn apply_actions(
        &mut self,
        input: &FrameInput,
        mode: SimMode,
        now_ms: u64,
        report: &mut FrameReport,
    ) {
        if input.jump {
            jump(&mut self.actor, &self.config.kinematics, mode);
        }
        if let Some(kind) = input.flip {
            self.actor.start_flip(kind, now_ms);
        }

        if let Some(point) = input.place_platform {
            self.tiles.place(point);
        } else if let Some(point) = input.cast {
            let attach = self.actor.attach_point();
            if let Some((grapple, index)) =
                Grapple::cast(self.tiles.tiles(), point, attach, &self.config.web)
            {
                debug!(
                    "Web cast to tile {} at ({:.0}, {:.0}), length {:.0}",
                    index,
                    point.x,
                    point.y,
                    grapple.target_len()
                );
                self.grapple = Some(grapple);
                self.actor.set_frame_lock(true);
                report.events.push(GameEvent::WebAttached);
            }
        }

        if input.fine_reel != 0.0 {
            if let Some(grapple) = self.grapple.as_mut() {
                grapple.fine_reel(input.fine_reel, &self.config.web);
            }
        }

        if input.fire {
            self.fire(mode, now_ms, report);
        }
        if input.spawn_enemy {
            self.spawn_enemy();
        }
    }

    fn fire(&mut self, mode: SimMode, now_ms: u64, report: &mut FrameReport) {
        if !self.ammo.try_fire(&self.config.weapon, mode, now_ms) {
            return;
        }
        let dir = self.actor.facing.sign();
        let hand = hand_point(&self.actor, dir, &self.config.weapon);
        let id = self.next_id();
        self.projectiles
            .push(Projectile::spawn(id, hand, dir, &self.config.weapon, now_ms));
        self.actor
            .trigger_throw_pose(now_ms, self.config.kinematics.throw_pose_ms);
        report.events.push(GameEvent::ProjectileFired);
    }

    /// `resting_on` is the tile the actor landed on this frame. A slack rope
    /// never drags the actor through it.
    fn step_grapple(
        &mut self,
        input: &FrameInput,
        mode: SimMode,
        dt: f32,
        resting_on: Option<usize>,
    ) {
        let Some(mut grapple) = self.grapple.take() else {
            return;
        };
        if grapple.advance_shot(dt, &self.config.web) {
            debug!("Web latched, length {:.0}", grapple.target_len());
        }
        if input.cast_held {
            let gravity = mode.gravity(&self.config.kinematics);
            grapple.swing(&mut self.actor, input.controls, &self.config.web, gravity, dt);
            if let Some(tile) = resting_on.and_then(|index| self.tiles.tiles().get(index)) {
                self.actor
                    .keep_above(tile.rect.top(), &self.config.kinematics);
            }
            self.grapple = Some(grapple);
        } else {
            grapple.release(&mut self.actor, &self.config.web);
            debug!("Web released");
        }
    }

    /// Spawn a chaser on a random side of the player, resting over the ground.
    pub fn spawn_enemy(&mut self) -> u32 {
        let side = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let x = self.actor.center().x + side * self.config.enemy.spawn_distance;
        let bottom = self.tiles.ground_top() - self.config.enemy.spawn_lift;
        self.spawn_enemy_at(x, bottom)
    }

    pub fn spawn_enemy_at(&mut self, center_x: f32, bottom: f32) -> u32 {
        let id = self.next_id();
        self.enemies
            .push(Enemy::spawn(id, center_x, bottom, &self.config.enemy));
        info!("Spawned enemy {} at x {:.0}", id, center_x);
        id
    }

    pub fn rope_view(&self) -> Option<RopeView> {
        self.grapple
            .as_ref()
            .map(|grapple| grapple.rope_view(self.actor.attach_point()))
    }

    pub fn hud(&self, mode: SimMode, now_ms: u64) -> HudValues {
        let weapon = &self.config.weapon;
        let reloading = !mode.unlimited_ammo && self.ammo.rounds < weapon.clip;
        HudValues {
            hp: self.health.current,
            max_hp: self.health.max,
            hp_percent: self.health.percent(),
            rounds: self.ammo.rounds,
            clip: weapon.clip,
            unlimited_ammo: mode.unlimited_ammo,
            recharge: reloading.then(|| self.ammo.recharge_fraction(weapon, now_ms)),
            moon_gravity: mode.moon_gravity,
            web_state: Grapple::state_name(self.grapple.as_ref()),
            web_len: self.grapple.as_ref().map(Grapple::target_len),
            tension: self
                .grapple
                .as_ref()
                .filter(|g| g.is_latched())
                .map(Grapple::tension),
            score: self.score,
            anchor_uv: Vec2::new(self.actor.web_anchor.u, self.actor.web_anchor.v),
        }
    }
}
