//! Mode stack with paired enter/exit lifecycle calls

use super::{Mode, TableMode};
use crate::model::Cursor;
use tracing::debug;

/// Stack of modes; the top one is active. Never empty.
#[derive(Debug, Clone)]
pub struct ModeStack {
    stack: Vec<Mode>,
}

impl ModeStack {
    /// Create a stack holding `base`, already entered
    pub fn new(mut base: Mode, mark: &Cursor) -> Self {
        base.on_enter(mark);
        Self { stack: vec![base] }
    }

    pub fn top(&self) -> &Mode {
        // the stack is never empty: `pop` refuses to remove the last mode
        &self.stack[self.stack.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut Mode {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Suspend the active mode and make `mode` active
    pub fn push(&mut self, mut mode: Mode, mark: &Cursor) {
        self.top_mut().on_exit();
        mode.on_enter(mark);
        debug!(mode = %mode.kind(), depth = self.stack.len() + 1, "mode pushed");
        self.stack.push(mode);
    }

    /// Leave the active mode and re-enter the one beneath it.
    ///
    /// The bottom mode is never popped; returns `None` in that case.
    pub fn pop(&mut self, mark: &Cursor) -> Option<Mode> {
        if self.stack.len() <= 1 {
            return None;
        }

        let mut popped = self.stack.pop()?;
        popped.on_exit();
        self.top_mut().on_enter(mark);
        debug!(mode = %popped.kind(), resumed = %self.top().kind(), "mode popped");
        Some(popped)
    }

    /// Swap out the active mode without keeping it
    pub fn replace(&mut self, mut mode: Mode, mark: &Cursor) {
        self.top_mut().on_exit();
        mode.on_enter(mark);
        debug!(from = %self.top().kind(), to = %mode.kind(), "mode replaced");
        *self.top_mut() = mode;
    }
}
