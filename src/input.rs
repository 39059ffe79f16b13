//! Polled input snapshot
//!
//! The host refreshes one of these before every tick. Keyboard layouts,
//! mice and touch all reduce to the same set of held flags.

use serde::{Deserialize, Serialize};

use crate::sim::GamePhase;

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Pause,
    Confirm,
}

impl Action {
    /// Default binding for a DOM `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Action> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::Left),
            "ArrowRight" | "KeyD" => Some(Action::Right),
            "ArrowUp" | "KeyW" => Some(Action::Up),
            "ArrowDown" | "KeyS" => Some(Action::Down),
            "Space" => Some(Action::Jump),
            "Escape" => Some(Action::Pause),
            "Enter" | "NumpadEnter" => Some(Action::Confirm),
            _ => None,
        }
    }
}

/// Held state of every action for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub pause: bool,
    pub confirm: bool,
}

impl InputState {
    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Jump => self.jump,
            Action::Pause => self.pause,
            Action::Confirm => self.confirm,
        }
    }

    pub fn set(&mut self, action: Action, held: bool) {
        let slot = match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Jump => &mut self.jump,
            Action::Pause => &mut self.pause,
            Action::Confirm => &mut self.confirm,
        };
        *slot = held;
    }

    /// Builder-style helper for scripted input
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    /// Up and jump both trigger jumps and thrust
    #[inline]
    pub fn jump_held(&self) -> bool {
        self.up || self.jump
    }

    /// Held state to keep across a phase change
    ///
    /// A run ending releases every key except pause, so a direction held at
    /// death does not leak into the next run. Pausing keeps everything.
    pub fn carry_over(self, before: GamePhase, after: GamePhase) -> Self {
        if before != GamePhase::GameOver && after == GamePhase::GameOver {
            InputState {
                pause: self.pause,
                ..InputState::default()
            }
        } else {
            self
        }
    }

    /// Actions held now but not in `previous`
    pub fn pressed_since(&self, previous: &InputState, action: Action) -> bool {
        self.is_held(action) && !previous.is_held(action)
    }
}
