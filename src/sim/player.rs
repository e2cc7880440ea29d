//! Player movement, afterburner and banking

use super::state::{GameState, PowerUpKind};
use crate::consts::*;

/// Current movement speed in pixels per second
pub fn current_speed(state: &GameState) -> f32 {
    let mut speed = PLAYER_SPEED;
    if state.effect_active(PowerUpKind::Speed) {
        speed *= 1.0 + SPEED_BOOST;
    }
    if state.player.afterburner_active {
        speed *= AFTERBURNER_SPEED_MULTIPLIER;
    }
    speed
}

/// Advance the player by one tick
pub fn update(state: &mut GameState, dt: f32) {
    let speed = current_speed(state);
    let player = &mut state.player;

    // Afterburner charge
    if player.afterburner_active {
        player.afterburner = (player.afterburner - AFTERBURNER_DEPLETION_RATE * dt).max(0.0);
        if player.afterburner <= 0.0 {
            player.afterburner_active = false;
        }
    } else {
        player.afterburner =
            (player.afterburner + AFTERBURNER_RECHARGE_RATE * dt).min(AFTERBURNER_MAX);
    }

    // Horizontal movement, clamped to the screen
    player.rect.x += player.velocity_x * speed * dt;
    player.rect.x = player.rect.x.clamp(0.0, SCREEN_WIDTH - player.rect.w);

    // Bank toward the direction of travel
    let target_roll = if player.velocity_x < 0.0 {
        -PLAYER_MAX_ROLL
    } else if player.velocity_x > 0.0 {
        PLAYER_MAX_ROLL
    } else {
        0.0
    };
    let roll_change = PLAYER_ROLL_SPEED * dt;
    if player.roll_angle < target_roll {
        player.roll_angle = (player.roll_angle + roll_change).min(target_roll);
    } else if player.roll_angle > target_roll {
        player.roll_angle = (player.roll_angle - roll_change).max(target_roll);
    }
}
