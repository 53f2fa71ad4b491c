//! Per-variant movement policies.
//!
//! Each frame `update_ai` advances the enemy's timers and lets its variant
//! pick a movement target; `move_toward_target` then steps toward that target
//! and wraps the position back into the world.

use super::types::{Enemy, EnemyKind};
use crate::core::constants::*;
use crate::core::geometry::{clamp_to_world, wrap_position, Vec2};
use rand::Rng;

impl Enemy {
    /// Runs one frame of AI and movement. Dead enemies are left untouched.
    pub fn update(&mut self, player_pos: Vec2, delta_time: f64, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }
        self.update_ai(player_pos, delta_time, rng);
        self.move_toward_target(delta_time);
    }

    /// Advances attack and re-roll timers, then chooses a movement target
    /// according to the enemy's variant.
    pub fn update_ai(&mut self, player_pos: Vec2, delta_time: f64, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }
        self.attack_timer += delta_time;
        self.direction_change_timer += delta_time;

        match self.kind {
            EnemyKind::Grunt | EnemyKind::Scout => {
                let chase_percent = self.variant().stats().chase_percent;
                self.reroll_target(player_pos, chase_percent, rng);
            }
            EnemyKind::Brute { .. } => self.update_brute(player_pos, rng),
            EnemyKind::Assassin { .. } => self.update_assassin(player_pos, delta_time, rng),
            EnemyKind::Sniper { .. } => self.update_sniper(player_pos, delta_time),
            EnemyKind::Swarm { .. } => self.update_swarm(player_pos, delta_time, rng),
        }
    }

    /// Steps toward the current target at the current speed, then wraps.
    pub fn move_toward_target(&mut self, delta_time: f64) {
        if !self.is_alive() {
            return;
        }
        let to_target = self.target - self.position;
        if to_target.length() >= ARRIVAL_EPSILON {
            if let Some(direction) = to_target.normalized() {
                self.position += direction * (self.current_speed() * delta_time);
            }
        }

        if let EnemyKind::Swarm { orbit_angle, .. } = self.kind {
            self.position.y +=
                (orbit_angle * SWARM_BOB_FREQUENCY).sin() * SWARM_BOB_AMPLITUDE * delta_time;
        }

        self.position = wrap_position(self.position);
    }

    /// Default policy: once per direction-change interval, chase the player
    /// with `chase_percent` odds, otherwise wander. Returns whether a re-roll
    /// happened.
    fn reroll_target(&mut self, player_pos: Vec2, chase_percent: u32, rng: &mut impl Rng) -> bool {
        if self.direction_change_timer < self.direction_change_interval {
            return false;
        }
        self.direction_change_timer = 0.0;

        if rng.gen_range(0..100) < chase_percent {
            self.target = player_pos;
        } else {
            self.target = wander_target(self.position, rng);
        }
        true
    }

    fn update_brute(&mut self, player_pos: Vec2, rng: &mut impl Rng) {
        let distance = self.position.distance(player_pos);
        let was_charging = self.is_charging();
        let is_charging = if was_charging {
            distance <= BRUTE_CHARGE_EXIT_DISTANCE
        } else {
            distance < BRUTE_CHARGE_ENTER_DISTANCE
        };
        self.kind = EnemyKind::Brute { is_charging };

        if is_charging && !was_charging {
            log::trace!("brute {} charging at distance {:.0}", self.id, distance);
        }

        if is_charging {
            self.target = player_pos;
        } else {
            self.reroll_target(player_pos, BRUTE_CHASE_PERCENT, rng);
        }
    }

    fn update_assassin(&mut self, player_pos: Vec2, delta_time: f64, rng: &mut impl Rng) {
        if let EnemyKind::Assassin {
            is_stealthed,
            stealth_timer,
        } = &mut self.kind
        {
            *stealth_timer += delta_time;
            let phase_length = if *is_stealthed {
                ASSASSIN_STEALTH_DURATION
            } else {
                ASSASSIN_VISIBLE_DURATION
            };
            if *stealth_timer >= phase_length {
                *is_stealthed = !*is_stealthed;
                *stealth_timer = 0.0;
            }
        }

        let to_player = player_pos - self.position;
        if to_player.length() < ASSASSIN_PURSUIT_DISTANCE {
            self.target = player_pos;
            return;
        }

        if self.direction_change_timer < self.direction_change_interval {
            return;
        }
        self.direction_change_timer = 0.0;

        if rng.gen_range(0..100) < ASSASSIN_CHASE_PERCENT {
            self.target = player_pos;
        } else {
            let offset = if rng.gen_bool(0.5) {
                ASSASSIN_FLANK_ANGLE
            } else {
                -ASSASSIN_FLANK_ANGLE
            };
            let angle = to_player.angle() + offset;
            self.target = player_pos + Vec2::from_angle(angle) * ASSASSIN_FLANK_DISTANCE;
        }
    }

    fn update_sniper(&mut self, player_pos: Vec2, delta_time: f64) {
        let to_player = player_pos - self.position;
        let distance = to_player.length();
        let band_min = SNIPER_RANGE * SNIPER_BAND_MIN;
        let band_max = SNIPER_RANGE * SNIPER_BAND_MAX;

        let EnemyKind::Sniper {
            is_aiming,
            aim_timer,
        } = &mut self.kind
        else {
            return;
        };

        if distance < band_min {
            let away = to_player.normalized().unwrap_or(Vec2::new(1.0, 0.0));
            self.target = self.position - away * SNIPER_RETREAT_DISTANCE;
            *is_aiming = false;
            *aim_timer = 0.0;
        } else if distance > band_max {
            self.target = player_pos;
            *is_aiming = false;
            *aim_timer = 0.0;
        } else {
            self.target = self.position;
            *aim_timer += delta_time;
            if *aim_timer > SNIPER_AIM_TIME {
                *is_aiming = true;
            }
        }
    }

    fn update_swarm(&mut self, player_pos: Vec2, delta_time: f64, rng: &mut impl Rng) {
        let EnemyKind::Swarm {
            orbit_angle,
            orbit_radius,
        } = &mut self.kind
        else {
            return;
        };

        *orbit_angle += delta_time * SWARM_ORBIT_SPEED;

        if self.direction_change_timer >= self.direction_change_interval {
            self.direction_change_timer = 0.0;
            let jitter_degrees =
                rng.gen_range(-SWARM_ANGLE_JITTER_DEGREES..SWARM_ANGLE_JITTER_DEGREES);
            *orbit_angle += (jitter_degrees as f64).to_radians();
            let radius_jitter = rng.gen_range(-SWARM_RADIUS_JITTER..SWARM_RADIUS_JITTER);
            *orbit_radius =
                (*orbit_radius + radius_jitter as f64).clamp(SWARM_MIN_RADIUS, SWARM_MAX_RADIUS);
        }
        *orbit_angle = orbit_angle.rem_euclid(std::f64::consts::TAU);

        self.target = player_pos + Vec2::from_angle(*orbit_angle) * *orbit_radius;
    }
}

/// A random point within the wander radius of `from`, clamped to the world.
pub fn wander_target(from: Vec2, rng: &mut impl Rng) -> Vec2 {
    let reach = WORLD_WIDTH * WANDER_RADIUS_FRACTION;
    let offset = Vec2::new(rng.gen_range(-reach..=reach), rng.gen_range(-reach..=reach));
    clamp_to_world(from + offset)
}
