//! Combat domain: discrete-time Markov chain driving enemy decisions.

use rand::Rng;

/// Error building a Markov chain from a transition matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkovChainError {
    Empty,
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    InitialStateOutOfRange {
        state: usize,
        states: usize,
    },
}

impl std::fmt::Display for MarkovChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkovChainError::Empty => write!(f, "transition matrix has no states"),
            MarkovChainError::NotSquare { row, len, expected } => write!(
                f,
                "transition matrix row {} has {} entries, expected {}",
                row, len, expected
            ),
            MarkovChainError::InitialStateOutOfRange { state, states } => write!(
                f,
                "initial state {} is out of range for {} states",
                state, states
            ),
        }
    }
}

impl std::error::Error for MarkovChainError {}

/// A Markov chain over states `0..n` with a row-stochastic transition matrix.
#[derive(Debug, Clone)]
pub struct MarkovChain {
    transitions: Vec<Vec<f32>>,
    current: usize,
}

impl MarkovChain {
    pub fn new(transitions: Vec<Vec<f32>>, initial: usize) -> Result<Self, MarkovChainError> {
        let states = transitions.len();
        if states == 0 {
            return Err(MarkovChainError::Empty);
        }
        if let Some((row, len)) = transitions
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != states)
        {
            return Err(MarkovChainError::NotSquare {
                row,
                len,
                expected: states,
            });
        }
        if initial >= states {
            return Err(MarkovChainError::InitialStateOutOfRange {
                state: initial,
                states,
            });
        }

        Ok(Self {
            transitions,
            current: initial,
        })
    }

    pub fn current_state(&self) -> usize {
        self.current
    }

    /// Draw uniformly from [0, 1) and transition.
    pub fn generate_next_state(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let draw: f32 = rng.random();
        self.transition_with(draw)
    }

    /// Transition using an explicit draw in [0, 1).
    ///
    /// Walks the current row accumulating probability mass and moves to the
    /// first column whose cumulative mass exceeds `draw`. Returns `None`, and
    /// stays put, if the row's mass falls short of the draw.
    pub fn transition_with(&mut self, draw: f32) -> Option<usize> {
        let mut cumulative = 0.0;
        for (next, probability) in self.transitions[self.current].iter().enumerate() {
            cumulative += probability;
            if draw < cumulative {
                self.current = next;
                return Some(next);
            }
        }
        None
    }
}
