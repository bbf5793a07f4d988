//! Header dropdowns (notifications, user menu).
//!
//! At most one dropdown is open; Escape and outside clicks close both.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dropdown {
    Notifications,
    User,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    open: Option<Dropdown>,
}

impl DropdownState {
    pub fn open_dropdown(&self) -> Option<Dropdown> {
        self.open
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        self.open == Some(dropdown)
    }

    /// Toggles `dropdown` and closes the other one.
    pub fn toggle(&mut self, dropdown: Dropdown) -> bool {
        self.open = if self.open == Some(dropdown) {
            None
        } else {
            Some(dropdown)
        };
        self.open.is_some()
    }

    /// Returns `true` when something was open.
    pub fn close_all(&mut self) -> bool {
        self.open.take().is_some()
    }
}
