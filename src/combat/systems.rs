//! Combat domain: enemy contact damage, knockback and attack hitboxes.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    DamageFlash, Enemy, EnemyAttacks, EnemyContact, Health, Hitbox, HitboxLifetime,
    attack_shapes, hit_source_label,
};
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::movement::systems::visuals::strategy_color;
use crate::movement::{CharacterState, Facing, GameLayer, PendingKnockback, Player, Strategy};

/// Fixed ticks a damaged character stays tinted
const DAMAGE_FLASH_TICKS: u32 = 6;

/// What an enemy contact did to the character it touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// The character was already dead
    Ignored,
    Knockback {
        damage: f32,
        direction: Facing,
    },
    Died {
        damage: f32,
    },
}

/// Direction a character is pushed away from a source. A character level
/// with the source is pushed left.
pub fn knockback_direction(character_x: f32, source_x: f32) -> Facing {
    if character_x <= source_x {
        Facing::Left
    } else {
        Facing::Right
    }
}

/// Apply an enemy hit: take damage, then either record the knockback for the
/// next movement tick or report the death.
pub fn receive_enemy_hit(
    health: &mut Health,
    state: &mut CharacterState,
    source: Entity,
    damage: f32,
    character_x: f32,
    source_x: f32,
) -> HitOutcome {
    if health.is_dead() {
        return HitOutcome::Ignored;
    }

    let dealt = health.take_damage(damage);
    if health.is_dead() {
        return HitOutcome::Died { damage: dealt };
    }

    let direction = knockback_direction(character_x, source_x);
    state.pending_knockback = Some(PendingKnockback { source, direction });
    HitOutcome::Knockback {
        damage: dealt,
        direction,
    }
}

pub(crate) fn handle_enemy_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    contact_query: Query<(&EnemyContact, &Transform)>,
    hitbox_query: Query<&Hitbox>,
    mut player_query: Query<(&Transform, &mut Health, &mut CharacterState), With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player, source) in pairs {
            let Ok((contact, source_transform)) = contact_query.get(source) else {
                continue;
            };
            let Ok((transform, mut health, mut state)) = player_query.get_mut(player) else {
                continue;
            };

            let outcome = receive_enemy_hit(
                &mut health,
                &mut state,
                source,
                contact.damage,
                transform.translation.x,
                source_transform.translation.x,
            );

            let label = hit_source_label(source, hitbox_query.get(source).ok());
            match outcome {
                HitOutcome::Ignored => {}
                HitOutcome::Knockback { damage, direction } => {
                    damage_events.write(DamageEvent {
                        source,
                        target: player,
                        amount: damage,
                    });
                    info!(
                        "Player hit by {} for {}, knocked {:?} ({}/{} hp)",
                        label, damage, direction, health.current, health.max
                    );
                }
                HitOutcome::Died { damage } => {
                    damage_events.write(DamageEvent {
                        source,
                        target: player,
                        amount: damage,
                    });
                    death_events.write(DeathEvent { entity: player });
                    info!("Player killed by {}", label);
                }
            }
        }
    }
}

/// Open the hitboxes of attacks the enemy brains triggered this tick.
pub(crate) fn spawn_attack_hitboxes(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &Transform,
            &CharacterState,
            &EnemyAttacks,
            &EnemyContact,
            &mut Strategy,
        ),
        With<Enemy>,
    >,
) {
    for (entity, transform, state, attacks, contact, mut strategy) in &mut query {
        let Some(attack) = strategy.take_attack() else {
            continue;
        };

        let lifetime = attacks.lifetime(attack).max(1);
        let shapes = attack_shapes(
            attack,
            transform.translation.truncate(),
            state.facing,
            attacks.body_size,
        );

        for (center, size) in shapes {
            commands.spawn((
                Hitbox {
                    owner: entity,
                    attack,
                },
                HitboxLifetime(lifetime),
                EnemyContact {
                    damage: contact.damage,
                },
                Sprite {
                    color: Color::srgba(1.0, 0.3, 0.3, 0.5),
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 1.0),
                Collider::rectangle(size.x, size.y),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::EnemyHitbox, [GameLayer::Player]),
            ));
        }

        debug!(
            "{:?} opened {:?} hitbox for {} ticks",
            entity, attack, lifetime
        );
    }
}

pub(crate) fn tick_hitbox_lifetimes(
    mut commands: Commands,
    mut query: Query<(Entity, &mut HitboxLifetime)>,
) {
    for (entity, mut lifetime) in &mut query {
        if lifetime.tick() {
            commands.entity(entity).despawn();
        }
    }
}

/// Tint characters that took damage this tick.
pub(crate) fn flash_damaged_characters(
    mut commands: Commands,
    mut damage_events: MessageReader<DamageEvent>,
    mut sprites: Query<&mut Sprite>,
) {
    for event in damage_events.read() {
        let Ok(mut sprite) = sprites.get_mut(event.target) else {
            continue;
        };

        sprite.color = Color::srgb(1.0, 0.5, 0.5);
        commands
            .entity(event.target)
            .insert(DamageFlash(DAMAGE_FLASH_TICKS));
        debug!(
            "{:?} took {} damage from {:?}",
            event.target, event.amount, event.source
        );
    }
}

pub(crate) fn tick_damage_flashes(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DamageFlash, &mut Sprite, &Strategy)>,
) {
    for (entity, mut flash, mut sprite, strategy) in &mut query {
        if flash.tick() {
            sprite.color = strategy_color(strategy.kind());
            commands.entity(entity).remove::<DamageFlash>();
        }
    }
}
