//! Explosion debris and afterburner exhaust

use glam::Vec2;
use rand::Rng;

use super::pool::free_slot;
use super::state::{GameState, Particle};
use crate::consts::*;

/// Burst of debris at `pos`, filling up to EXPLOSION_PARTICLES free slots
pub fn create_explosion(state: &mut GameState, pos: Vec2) {
    for _ in 0..EXPLOSION_PARTICLES {
        let angle = state.rng.random::<f32>() * std::f32::consts::TAU;
        // 1-3 pixels per tick
        let speed = (state.rng.random::<f32>() * 2.0 + 1.0) * SIM_HZ as f32;
        let green = state.rng.random_range(100..=254u8);

        let Some(slot) = free_slot(&mut state.particles) else {
            break;
        };
        *slot = Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            lifetime: PARTICLE_LIFETIME,
            max_lifetime: PARTICLE_LIFETIME,
            color: [255, green, 0, 255],
        };
    }
}

/// Age and move one particle pool
fn advance(particles: &mut [Particle], dt: f32) {
    for p in particles.iter_mut().filter(|p| p.lifetime > 0) {
        p.pos += p.vel * dt;
        p.lifetime -= 1;
        p.color[3] = p.alpha();
    }
}

/// Update explosion debris
pub fn update(state: &mut GameState, dt: f32) {
    advance(&mut state.particles, dt);
}

/// Update the exhaust trail and emit new exhaust while the afterburner burns
pub fn update_afterburner(state: &mut GameState, dt: f32) {
    advance(&mut state.afterburner_particles, dt);

    if !state.player.afterburner_active {
        return;
    }

    let rect = state.player.rect;
    let nozzle = Vec2::new(rect.center().x, rect.bottom() - 5.0);
    for _ in 0..AFTERBURNER_PARTICLES_PER_TICK {
        let vx = (state.rng.random_range(0..20) - 10) as f32 * 5.0;
        let vy = (state.rng.random_range(0..10) + 20) as f32 * 5.0;
        let green = state.rng.random_range(100..=254u8);
        let blue = state.rng.random_range(200..=254u8);

        let Some(slot) = free_slot(&mut state.afterburner_particles) else {
            break;
        };
        *slot = Particle {
            pos: nozzle,
            vel: Vec2::new(vx, vy),
            lifetime: AFTERBURNER_PARTICLE_LIFETIME,
            max_lifetime: AFTERBURNER_PARTICLE_LIFETIME,
            color: [0, green, blue, 255],
        };
    }
}
