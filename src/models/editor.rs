use crate::curve::CurveModel;
use crate::error::Result;
use crate::models::point::Channel;
use tracing::{debug, warn};

/// Pointer presses pick a point when both |Δsignal| and |Δlevel| are below this
pub const PICK_RADIUS: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
}

/// Where a point-drag gesture currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Selecting { channel: Channel, index: usize },
    Dragging { channel: Channel, index: usize },
}

/// What a pointer press did to the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Nothing,
    Selected(usize),
    Inserted,
    Removed(usize),
    Rejected,
}

/// Turns pointer gestures on the active channel into curve edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Editor {
    active: Channel,
    state: EditorState,
}

impl Default for Editor {
    fn default() -> Self {
        Editor {
            active: Channel::Red,
            state: EditorState::Idle,
        }
    }
}

impl Editor {
    pub fn new(active: Channel) -> Self {
        Editor {
            active,
            state: EditorState::Idle,
        }
    }

    pub fn active(&self) -> Channel {
        self.active
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn set_active(&mut self, channel: Channel) {
        self.active = channel;
        self.state = EditorState::Idle;
    }

    /// Reset the curve and go back to editing Red
    pub fn reset(&mut self, model: &mut CurveModel) {
        model.reset();
        *self = Editor::default();
    }

    pub fn press(
        &mut self,
        model: &mut CurveModel,
        button: Button,
        signal: i32,
        level: i32,
    ) -> PressOutcome {
        let hit = model.point_near(self.active, signal, level, PICK_RADIUS);
        match (button, hit) {
            (Button::Left, Some(index)) => {
                self.state = EditorState::Selecting {
                    channel: self.active,
                    index,
                };
                PressOutcome::Selected(index)
            }
            (Button::Left, None) => PressOutcome::Nothing,
            (Button::Right, Some(index)) => match model.remove_point(self.active, index) {
                Ok(_) => PressOutcome::Removed(index),
                Err(e) => {
                    warn!("{}", e);
                    PressOutcome::Rejected
                }
            },
            (Button::Right, None) => match model.insert_point(signal, level) {
                Ok(()) => PressOutcome::Inserted,
                Err(e) => {
                    warn!("{}", e);
                    PressOutcome::Rejected
                }
            },
        }
    }

    /// Pointer moved; drags the held point's level, if any
    pub fn motion(&mut self, model: &mut CurveModel, level: i32) -> Result<()> {
        let (channel, index) = match self.state {
            EditorState::Idle => return Ok(()),
            EditorState::Selecting { channel, index }
            | EditorState::Dragging { channel, index } => (channel, index),
        };
        self.state = EditorState::Dragging { channel, index };
        model.set_level(channel, index, level)?;
        debug!(%channel, index, level, "dragging");
        Ok(())
    }

    pub fn release(&mut self) {
        self.state = EditorState::Idle;
    }
}
