//! Debug domain: state for diagnostics tooling.

use bevy::prelude::*;

use crate::movement::CharacterSnapshot;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the info overlay is visible
    pub show_info: bool,
    /// Last player snapshot that was logged
    pub last_snapshot: Option<CharacterSnapshot>,
}

impl DebugState {
    /// Record `snapshot`. Returns true if it differs from the last one.
    pub fn observe(&mut self, snapshot: CharacterSnapshot) -> bool {
        if self.last_snapshot == Some(snapshot) {
            return false;
        }
        self.last_snapshot = Some(snapshot);
        true
    }
}
