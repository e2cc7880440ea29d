//! Fixed timestep simulation tick
//!
//! Advances every subsystem in one fixed order so a seed plus an input
//! sequence always reproduces the same run.

use super::particles::{self, create_explosion};
use super::state::{GameEvent, GamePhase, GameState};
use super::weapons::{Shooter, change_weapon, shoot_projectile};
use super::{enemies, planets, player, powerups, projectiles};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal steering (-1 left, 0 idle, 1 right)
    pub move_x: f32,
    /// Fire held
    pub fire: bool,
    /// Afterburner held
    pub afterburner: bool,
    /// Weapon switch direction (-1 previous, 1 next, 0 none)
    pub switch_weapon: i32,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
///
/// Events accumulate in `state.events` until the caller drains them.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            } else {
                // Let the final explosion and exhaust play out
                particles::update(state, dt);
                particles::update_afterburner(state, dt);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    apply_input(state, input);

    // Background scroll
    state.scroll_y += SCROLL_SPEED * state.game_speed * dt;
    while state.scroll_y >= BG_HEIGHT {
        state.scroll_y -= BG_HEIGHT;
        state.scroll_rows += 1;
    }

    enemies::update(state, dt);
    particles::update_afterburner(state, dt);
    planets::update(state, dt);
    player::update(state, dt);
    projectiles::update(state, dt);
    particles::update(state, dt);
    powerups::update(state, dt);
    planets::check_collision(state);

    check_game_over(state);
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.velocity_x = input.move_x.clamp(-1.0, 1.0);
    player.afterburner_active = input.afterburner && player.afterburner > 0.0;
    state.game_speed = if player.afterburner_active {
        AFTERBURNER_SPEED_MULTIPLIER
    } else {
        1.0
    };

    if input.switch_weapon != 0 {
        change_weapon(state, input.switch_weapon.signum());
    }
    if input.fire {
        shoot_projectile(state, Shooter::Player);
    }
}

fn check_game_over(state: &mut GameState) {
    if state.player.is_alive() {
        return;
    }

    let score = state.player.score;
    log::info!("Game over: score {} after {} ticks", score, state.time_ticks);
    state.phase = GamePhase::GameOver;
    state.player.afterburner_active = false;
    state.game_speed = 1.0;
    let center = state.player.rect.center();
    create_explosion(state, center);
    state.events.push(GameEvent::GameOver { score });
}
