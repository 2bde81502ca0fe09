use crate::suggest::model::Suggestion;

/// Dropdown state machine: either closed, or open over a non-empty
/// candidate list with an optional highlight cursor. The cursor never
/// outlives the list it points into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Closed,
    Open {
        items: Vec<Suggestion>,
        cursor: Option<usize>,
    },
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        matches!(self, Dropdown::Open { .. })
    }

    /// Replaces the displayed list. An empty list closes the dropdown;
    /// a non-empty one opens it with the cursor unset.
    pub fn show(&mut self, items: Vec<Suggestion>) {
        *self = if items.is_empty() {
            Dropdown::Closed
        } else {
            Dropdown::Open {
                items,
                cursor: None,
            }
        };
    }

    pub fn close(&mut self) {
        *self = Dropdown::Closed;
    }

    pub fn items(&self) -> &[Suggestion] {
        match self {
            Dropdown::Closed => &[],
            Dropdown::Open { items, .. } => items,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match self {
            Dropdown::Closed => None,
            Dropdown::Open { cursor, .. } => *cursor,
        }
    }

    /// Moves the highlight down one row, clamped to the last row.
    /// Returns true if the dropdown is open.
    pub fn move_down(&mut self) -> bool {
        let Dropdown::Open { items, cursor } = self else {
            return false;
        };
        let last = items.len().saturating_sub(1);
        *cursor = Some(match *cursor {
            None => 0,
            Some(c) => (c + 1).min(last),
        });
        true
    }

    /// Moves the highlight up one row, clamped to the first row. An
    /// unset cursor lands on the first row, as the reference behavior
    /// does.
    pub fn move_up(&mut self) -> bool {
        let Dropdown::Open { cursor, .. } = self else {
            return false;
        };
        *cursor = Some(match *cursor {
            None => 0,
            Some(c) => c.saturating_sub(1),
        });
        true
    }

    /// Pointer hover: highlights row `index` if it exists.
    pub fn hover(&mut self, index: usize) -> bool {
        let Dropdown::Open { items, cursor } = self else {
            return false;
        };
        if index >= items.len() {
            return false;
        }
        *cursor = Some(index);
        true
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        match self {
            Dropdown::Open {
                items,
                cursor: Some(c),
            } => items.get(*c),
            _ => None,
        }
    }

    /// Takes the suggestion at `index` and closes the dropdown, for
    /// pointer activation of a specific row.
    pub fn take_row(&mut self, index: usize) -> Option<Suggestion> {
        let Dropdown::Open { items, .. } = self else {
            return None;
        };
        if index >= items.len() {
            return None;
        }
        let picked = items[index].clone();
        *self = Dropdown::Closed;
        Some(picked)
    }

    /// Takes the highlighted suggestion and closes the dropdown, for
    /// Enter with a set cursor.
    pub fn take_highlighted(&mut self) -> Option<Suggestion> {
        let picked = self.highlighted().cloned()?;
        *self = Dropdown::Closed;
        Some(picked)
    }
}
