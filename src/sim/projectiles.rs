//! Projectile flight and hit resolution

use super::particles::create_explosion;
use super::state::{DamageSource, GameEvent, GameState, Owner};
use crate::consts::*;
use crate::sim::collision::point_outside_viewport;

/// Move every projectile and resolve hits
///
/// Player shots only hit enemies and enemy shots only hit the player.
/// A projectile is consumed by the first thing it hits.
pub fn update(state: &mut GameState, dt: f32) {
    for i in 0..MAX_PROJECTILES {
        if !state.projectiles[i].active {
            continue;
        }

        let projectile = &mut state.projectiles[i];
        projectile.pos += projectile.vel * dt;
        if point_outside_viewport(projectile.pos) {
            projectile.active = false;
            continue;
        }

        let projectile = *projectile;
        let hitbox = projectile.hitbox();
        match projectile.owner {
            Owner::Player => {
                let Some(target) = state
                    .enemies
                    .iter()
                    .position(|e| e.active && e.rect.overlaps(&hitbox))
                else {
                    continue;
                };
                state.projectiles[i].active = false;
                hit_enemy(state, target, projectile.damage);
            }
            Owner::Enemy => {
                if !hitbox.overlaps(&state.player.rect) {
                    continue;
                }
                state.projectiles[i].active = false;
                let applied = state.player.take_damage(projectile.damage);
                state.events.push(GameEvent::PlayerHit {
                    source: DamageSource::EnemyFire,
                    damage: applied,
                });
            }
        }
    }
}

/// Apply armor-reduced damage to an enemy, destroying it at zero
fn hit_enemy(state: &mut GameState, index: usize, damage: u32) {
    let enemy = &mut state.enemies[index];
    let effective = damage.saturating_sub(enemy.defense);
    enemy.hit_points = enemy.hit_points.saturating_sub(effective);
    if enemy.hit_points > 0 {
        return;
    }

    enemy.active = false;
    let score = enemy.max_hp;
    let center = enemy.rect.center();
    state.player.score = state.player.score.saturating_add(score);
    state.events.push(GameEvent::EnemyDestroyed { score });
    create_explosion(state, center);
}
