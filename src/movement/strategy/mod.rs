//! Movement domain: per-tick movement decision strategies.
//!
//! A strategy turns a character's state and buffered intent into a desired
//! direction vector. It may update the state's counters as a side effect but
//! never touches the physics body; the controller commits the result.

mod back_and_forth;
mod cat;
mod crow;
mod markov;
mod player;
mod stationary;

pub use back_and_forth::BackAndForthStrategy;
pub use cat::CatStrategy;
pub use crow::CrowStrategy;
pub use markov::{EnemyAttack, MarkovMove, MarkovStrategy, MoveDurations};
pub use stationary::StationaryStrategy;

use bevy::prelude::*;

use crate::movement::components::{CharacterIntent, CharacterState, ControllerRole};
use crate::movement::resources::MovementTuning;

/// Everything a strategy may read besides the character's own state.
pub struct MovementContext<'a> {
    pub role: ControllerRole,
    pub intent: &'a mut CharacterIntent,
    pub tuning: &'a MovementTuning,
    /// World position of the character
    pub position: Vec2,
    /// World position of the entity this character pursues, if any
    pub target: Option<Vec2>,
}

pub trait MovementStrategy {
    /// Controller role this strategy was written for, or `None` for any.
    fn role(&self) -> Option<ControllerRole>;

    /// Decide this tick's direction vector. Called exactly once per tick.
    fn determine_movement(&mut self, state: &mut CharacterState, ctx: &mut MovementContext)
    -> Vec2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Crow,
    Cat,
    BackAndForth,
    Markov,
    Stationary,
}

/// The active movement strategy of a character. Swappable at runtime;
/// swapping keeps the character's state.
#[derive(Component, Debug)]
pub enum Strategy {
    Crow(CrowStrategy),
    Cat(CatStrategy),
    BackAndForth(BackAndForthStrategy),
    Markov(Box<MarkovStrategy>),
    Stationary(StationaryStrategy),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Stationary(StationaryStrategy)
    }
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Crow(_) => StrategyKind::Crow,
            Strategy::Cat(_) => StrategyKind::Cat,
            Strategy::BackAndForth(_) => StrategyKind::BackAndForth,
            Strategy::Markov(_) => StrategyKind::Markov,
            Strategy::Stationary(_) => StrategyKind::Stationary,
        }
    }

    /// The other animal of the player pair, or `None` for non-animal strategies.
    pub fn switched_animal(&self) -> Option<Strategy> {
        match self {
            Strategy::Crow(_) => Some(Strategy::Cat(CatStrategy)),
            Strategy::Cat(_) => Some(Strategy::Crow(CrowStrategy)),
            _ => None,
        }
    }

    /// Attack triggered by the last decision, if the strategy produces any.
    pub fn take_attack(&mut self) -> Option<EnemyAttack> {
        match self {
            Strategy::Markov(markov) => markov.take_attack(),
            _ => None,
        }
    }

    fn inner(&mut self) -> &mut dyn MovementStrategy {
        match self {
            Strategy::Crow(s) => s,
            Strategy::Cat(s) => s,
            Strategy::BackAndForth(s) => s,
            Strategy::Markov(s) => s.as_mut(),
            Strategy::Stationary(s) => s,
        }
    }
}

impl MovementStrategy for Strategy {
    fn role(&self) -> Option<ControllerRole> {
        match self {
            Strategy::Crow(s) => s.role(),
            Strategy::Cat(s) => s.role(),
            Strategy::BackAndForth(s) => s.role(),
            Strategy::Markov(s) => s.role(),
            Strategy::Stationary(s) => s.role(),
        }
    }

    fn determine_movement(
        &mut self,
        state: &mut CharacterState,
        ctx: &mut MovementContext,
    ) -> Vec2 {
        let kind = self.kind();
        let inner = self.inner();
        if let Some(expected) = inner.role() {
            assert_eq!(
                expected, ctx.role,
                "{kind:?} strategy is wired to a {:?} controller but requires {expected:?}",
                ctx.role
            );
        }
        inner.determine_movement(state, ctx)
    }
}
