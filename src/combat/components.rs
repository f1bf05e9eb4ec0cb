//! Combat domain: health, enemy contacts and attack hitboxes.

use bevy::prelude::*;

use crate::movement::{EnemyAttack, Facing};

/// Health component for damageable characters
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Component, Debug)]
pub struct Enemy;

/// Hurts the player on contact and knocks them away.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyContact {
    pub damage: f32,
}

/// Attack collider opened by an enemy
#[derive(Component, Debug)]
pub struct Hitbox {
    pub owner: Entity,
    pub attack: EnemyAttack,
}

/// How a hit is reported: the attack and its owner for hitboxes, the
/// touching body otherwise.
pub fn hit_source_label(source: Entity, hitbox: Option<&Hitbox>) -> String {
    match hitbox {
        Some(hitbox) => format!("{:?} of {:?}", hitbox.attack, hitbox.owner),
        None => format!("{:?}", source),
    }
}

/// Ticks left before a damaged character's tint is restored
#[derive(Component, Debug)]
pub struct DamageFlash(pub u32);

impl DamageFlash {
    pub fn tick(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}

/// Ticks left before a hitbox despawns
#[derive(Component, Debug)]
pub struct HitboxLifetime(pub u32);

impl HitboxLifetime {
    /// Count down one tick. Returns true once the lifetime has run out.
    pub fn tick(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}

/// Hitbox tuning for enemies whose brain can bite or raise spikes.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyAttacks {
    pub bite_ticks: u32,
    pub spike_ticks: u32,
    /// Collider size of the attacking body
    pub body_size: Vec2,
}

impl EnemyAttacks {
    pub fn lifetime(&self, attack: EnemyAttack) -> u32 {
        match attack {
            EnemyAttack::Bite => self.bite_ticks,
            EnemyAttack::Spikes => self.spike_ticks,
        }
    }
}

/// Centre and size of each collider opened by `attack`.
///
/// A bite covers the area in front of the body; spikes rise low on both
/// sides.
pub fn attack_shapes(
    attack: EnemyAttack,
    position: Vec2,
    facing: Facing,
    body_size: Vec2,
) -> Vec<(Vec2, Vec2)> {
    let half_width = body_size.x / 2.0;
    match attack {
        EnemyAttack::Bite => {
            let size = Vec2::new(body_size.x * 0.5, body_size.y * 0.6);
            let offset = facing.sign() * (half_width + size.x / 2.0);
            vec![(position + Vec2::new(offset, 0.0), size)]
        }
        EnemyAttack::Spikes => {
            let size = Vec2::new(body_size.x * 0.4, body_size.y * 0.5);
            let offset = half_width + size.x / 2.0;
            let y = -body_size.y * 0.25;
            vec![
                (position + Vec2::new(-offset, y), size),
                (position + Vec2::new(offset, y), size),
            ]
        }
    }
}
