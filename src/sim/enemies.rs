//! Enemy spawning, movement, firing and ramming

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::particles::create_explosion;
use super::pool::free_slot;
use super::state::{DamageSource, Enemy, GameEvent, GameState};
use super::weapons::{Shooter, WEAPON_COUNT, WeaponKind, shoot_projectile};
use crate::consts::*;

/// Advance all active enemies, then maybe spawn a new one
pub fn update(state: &mut GameState, dt: f32) {
    advance(state, dt);

    let roll = state.rng.random_range(0..=ENEMY_SPAWN_RANGE);
    if roll < ENEMY_SPAWN_HITS {
        spawn_enemy(state);
    }
}

/// Move, fire and collide every active enemy
pub fn advance(state: &mut GameState, dt: f32) {
    let now = state.now_ms();

    for i in 0..MAX_ENEMIES {
        if !state.enemies[i].active {
            continue;
        }

        let enemy = &mut state.enemies[i];
        enemy.rect.x += enemy.velocity.x * dt;
        enemy.rect.y += enemy.velocity.y * dt;
        if enemy.rect.is_outside_viewport() {
            enemy.active = false;
            continue;
        }

        if now.saturating_sub(enemy.last_shot_ms) >= enemy.weapon.spec().cooldown_ms {
            shoot_projectile(state, Shooter::Enemy(i));
        }

        // Ramming the player destroys the enemy (no score)
        let enemy = state.enemies[i];
        if enemy.rect.overlaps(&state.player.rect) {
            let applied = state.player.take_damage(enemy.damage);
            state.events.push(GameEvent::PlayerHit {
                source: DamageSource::EnemyRam,
                damage: applied,
            });
            state.enemies[i].active = false;
            create_explosion(state, enemy.rect.center());
        }
    }
}

/// Place a new enemy just above the top edge. Returns false if the pool is full.
pub fn spawn_enemy(state: &mut GameState) -> bool {
    let now = state.now_ms();
    let rng = &mut state.rng;

    let x = rng.random_range(0.0..=SCREEN_WIDTH - ENEMY_SIZE);
    let velocity = Vec2::new(
        rng.random_range(-50i32..=50) as f32,
        rng.random_range(50i32..=100) as f32,
    );
    let max_hp = rng.random_range(10..=40);
    let defense = rng.random_range(0..=5);
    let damage = rng.random_range(10..=20);
    let weapon = WeaponKind::from_index(rng.random_range(0..WEAPON_COUNT)).unwrap_or_default();

    let Some(slot) = free_slot(&mut state.enemies) else {
        return false;
    };
    *slot = Enemy {
        rect: Rect::new(x, -ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE),
        velocity,
        hit_points: max_hp,
        max_hp,
        defense,
        damage,
        weapon,
        last_shot_ms: now,
        active: true,
    };
    true
}
