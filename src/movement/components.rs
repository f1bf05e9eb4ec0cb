//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::strategy::StrategyKind;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, platforms and walls. Classified per contact normal.
    Terrain,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Enemy attack hitboxes (damage player)
    EnemyHitbox,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for colliders whose contacts are classified into ground and walls
#[derive(Component, Debug)]
pub struct Terrain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Which kind of controller drives a character.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerRole {
    Player,
    Enemy,
}

/// Terrain objects currently satisfying one contact category.
///
/// The category is active while the set is non-empty, so a flag only clears
/// when the last object attributed to it stops touching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSet {
    entities: Vec<Entity>,
}

impl ContactSet {
    pub fn is_active(&self) -> bool {
        !self.entities.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Attribute `entity` to this category. Returns true if it was not
    /// attributed before.
    pub fn attach(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Remove `entity` from this category. Returns true if it was attributed.
    pub fn detach(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| *e != entity);
        self.entities.len() != before
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

/// A tick-counted window during which horizontal input is only partially
/// effective and the character is pushed in `direction`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hitstun {
    pub counter: u32,
    pub direction: Facing,
}

impl Hitstun {
    pub fn start(&mut self, ticks: u32, direction: Facing) {
        self.counter = ticks;
        self.direction = direction;
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    /// Count down one tick. Returns the direction if this tick was still
    /// inside the window.
    pub fn tick(&mut self) -> Option<Facing> {
        if self.counter == 0 {
            return None;
        }
        self.counter -= 1;
        Some(self.direction)
    }
}

/// Knockback recorded by the enemy-contact hook, applied on the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingKnockback {
    pub source: Entity,
    /// Direction the character is pushed (away from the source)
    pub direction: Facing,
}

/// Per-character movement state, owned by its controller.
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterState {
    /// Last committed velocity
    pub velocity: Vec2,
    pub facing: Facing,
    pub ground: ContactSet,
    pub left_wall: ContactSet,
    pub right_wall: ContactSet,
    pub double_jump_available: bool,
    pub wall_hitstun: Hitstun,
    pub knockback_hitstun: Hitstun,
    pub pending_knockback: Option<PendingKnockback>,
}

impl CharacterState {
    pub fn is_grounded(&self) -> bool {
        self.ground.is_active()
    }

    pub fn is_touching_wall_left(&self) -> bool {
        self.left_wall.is_active()
    }

    pub fn is_touching_wall_right(&self) -> bool {
        self.right_wall.is_active()
    }

    pub fn is_touching_wall(&self) -> bool {
        self.is_touching_wall_left() || self.is_touching_wall_right()
    }

    pub fn in_hitstun(&self) -> bool {
        self.wall_hitstun.is_active() || self.knockback_hitstun.is_active()
    }

    pub fn snapshot(&self, variant: StrategyKind) -> CharacterSnapshot {
        CharacterSnapshot {
            grounded: self.is_grounded(),
            touching_wall_left: self.is_touching_wall_left(),
            touching_wall_right: self.is_touching_wall_right(),
            facing: self.facing,
            variant,
            double_jump_available: self.double_jump_available,
            in_hitstun: self.in_hitstun(),
        }
    }
}

/// Read-only view of a character for rendering, audio and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterSnapshot {
    pub grounded: bool,
    pub touching_wall_left: bool,
    pub touching_wall_right: bool,
    pub facing: Facing,
    pub variant: StrategyKind,
    pub double_jump_available: bool,
    pub in_hitstun: bool,
}

/// Buffered control requests for one character.
///
/// Requests are latched when detected and stay set until a strategy consumes
/// them during a fixed tick.
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterIntent {
    /// Horizontal axis already scaled by movement speed
    pub horizontal: f32,
    pub jump: bool,
    pub switch_animal: bool,
}

impl CharacterIntent {
    /// Latch a jump request. A request that is already pending is left as is.
    pub fn latch_jump(&mut self, pressed: bool) {
        if !self.jump {
            self.jump = pressed;
        }
    }

    pub fn latch_switch(&mut self, pressed: bool) {
        if !self.switch_animal {
            self.switch_animal = pressed;
        }
    }

    /// Consume the pending jump request
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    pub fn take_switch(&mut self) -> bool {
        std::mem::take(&mut self.switch_animal)
    }
}
