//! Modal stack for managing dialog overlays
//!
//! Dialogs float above the grid. Only the top dialog receives input; the
//! grid and the mode stack are frozen while any dialog is open.

/// A dialog that can be displayed on top of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Include/exclude regex editor for one column
    Filter { column: String },
    /// Save the active transformation
    Save,
    /// Use or delete presets
    Presets,
    /// Toggle table columns on and off
    Columns,
}

/// A stack of dialogs
///
/// Only the top dialog is drawn and receives input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a dialog. A dialog of the same kind that is already open is
    /// closed first so it is never shown twice.
    pub fn push(&mut self, modal: Modal) {
        let kind = std::mem::discriminant(&modal);
        self.stack.retain(|m| std::mem::discriminant(m) != kind);
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Save);
        stack.push(Modal::Presets);

        assert_eq!(stack.pop(), Some(Modal::Presets));
        assert_eq!(stack.pop(), Some(Modal::Save));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_reopening_replaces_existing_dialog() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Filter {
            column: "A".to_string(),
        });
        stack.push(Modal::Columns);
        stack.push(Modal::Filter {
            column: "B".to_string(),
        });

        let open: Vec<&Modal> = stack.iter().collect();
        assert_eq!(open.len(), 2);
        assert_eq!(
            stack.top(),
            Some(&Modal::Filter {
                column: "B".to_string()
            })
        );
    }
}
