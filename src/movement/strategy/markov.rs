//! Probabilistic aggressor driven by a Markov chain over its moves.
//!
//! While idle the strategy samples the next move, runs its one-shot effect
//! and then stays in that move for a fixed number of ticks. A move is never
//! interrupted; the chain is resampled only once the move's timer elapses.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::combat::MarkovChain;
use crate::content::MoveDurationsDef;
use crate::movement::components::{CharacterState, ControllerRole};
use crate::movement::strategy::{MovementContext, MovementStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkovMove {
    MoveToPlayer = 0,
    Jump = 1,
    Bite = 2,
    Spikes = 3,
}

impl MarkovMove {
    pub const ALL: [MarkovMove; 4] = [
        MarkovMove::MoveToPlayer,
        MarkovMove::Jump,
        MarkovMove::Bite,
        MarkovMove::Spikes,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Attack hitboxes a Markov-driven enemy asks its controller to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAttack {
    Bite,
    Spikes,
}

/// How many ticks each move lasts once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDurations {
    pub move_to_player: u32,
    pub jump: u32,
    pub bite: u32,
    pub spikes: u32,
}

impl MoveDurations {
    pub fn from_def(def: &MoveDurationsDef) -> Self {
        Self {
            move_to_player: def.move_to_player,
            jump: def.jump,
            bite: def.bite,
            spikes: def.spikes,
        }
    }

    pub fn for_move(&self, kind: MarkovMove) -> u32 {
        match kind {
            MarkovMove::MoveToPlayer => self.move_to_player,
            MarkovMove::Jump => self.jump,
            MarkovMove::Bite => self.bite,
            MarkovMove::Spikes => self.spikes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveMove {
    kind: MarkovMove,
    remaining: u32,
    /// Horizontal direction sign held for the whole walk
    walk_direction: f32,
}

#[derive(Debug)]
pub struct MarkovStrategy {
    chain: MarkovChain,
    durations: MoveDurations,
    rng: ChaCha8Rng,
    active: Option<ActiveMove>,
    pending_attack: Option<EnemyAttack>,
}

impl MarkovStrategy {
    pub fn new(chain: MarkovChain, durations: MoveDurations, rng: ChaCha8Rng) -> Self {
        Self {
            chain,
            durations,
            rng,
            active: None,
            pending_attack: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn current_move(&self) -> Option<MarkovMove> {
        self.active.map(|active| active.kind)
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.active.map_or(0, |active| active.remaining)
    }

    pub fn take_attack(&mut self) -> Option<EnemyAttack> {
        self.pending_attack.take()
    }

    /// Run one tick, using `draw` in [0, 1) if a new move is sampled.
    pub fn step_with_draw(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
        draw: f32,
    ) -> Vec2 {
        let sampled = self
            .active
            .is_none()
            .then(|| self.chain.transition_with(draw));
        self.step(state, ctx, sampled)
    }

    /// `sampled` is `Some` when the strategy was idle and drew from the chain.
    fn step(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
        sampled: Option<Option<usize>>,
    ) -> Vec2 {
        let mut direction = Vec2::ZERO;

        if let Some(sample) = sampled {
            let Some(next) = sample else {
                warn!(
                    "Markov row {} under-sums; staying idle this tick",
                    self.chain.current_state()
                );
                return direction;
            };
            let Some(kind) = MarkovMove::from_index(next) else {
                warn!("Markov state {} has no move; staying idle", next);
                return direction;
            };
            direction = self.start_move(kind, state, ctx);
        }

        let Some(active) = self.active.as_mut() else {
            return direction;
        };

        if active.kind == MarkovMove::MoveToPlayer {
            direction.x += active.walk_direction * ctx.tuning.movement_speed;
        }

        active.remaining = active.remaining.saturating_sub(1);
        if active.remaining == 0 {
            self.active = None;
        }

        direction
    }

    /// Begin `kind` and return its one-shot impulse.
    fn start_move(
        &mut self,
        kind: MarkovMove,
        state: &CharacterState,
        ctx: &MovementContext,
    ) -> Vec2 {
        debug!("Markov move {:?}", kind);

        let mut impulse = Vec2::ZERO;
        let mut walk_direction = 0.0;

        match kind {
            MarkovMove::Jump => {
                if state.is_grounded() {
                    impulse.y = ctx.tuning.jump_force;
                }
            }
            MarkovMove::Bite => self.pending_attack = Some(EnemyAttack::Bite),
            MarkovMove::Spikes => self.pending_attack = Some(EnemyAttack::Spikes),
            MarkovMove::MoveToPlayer => match ctx.target {
                Some(target) if target.x > ctx.position.x => walk_direction = 1.0,
                Some(_) => walk_direction = -1.0,
                None => debug!("No target to walk toward"),
            },
        }

        self.active = Some(ActiveMove {
            kind,
            remaining: self.durations.for_move(kind).max(1),
            walk_direction,
        });

        impulse
    }
}

impl MovementStrategy for MarkovStrategy {
    fn role(&self) -> Option<ControllerRole> {
        Some(ControllerRole::Enemy)
    }

    fn determine_movement(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
    ) -> Vec2 {
        let sampled = self
            .active
            .is_none()
            .then(|| self.chain.generate_next_state(&mut self.rng));
        self.step(state, ctx, sampled)
    }
}
