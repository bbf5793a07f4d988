//! Keyboard shortcut resolution.
//!
//! # Invariants
//! - Global shortcuts are ignored while a text entry has focus, except the
//!   palette toggle and Escape.
//! - Arrow keys and Enter only drive the palette from the palette input.

use super::host::{FocusTarget, Key, KeyInput};
use crate::model::page::PageId;
use crate::search::PaletteKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePalette,
    ToggleSidebar,
    ToggleTheme,
    NewItem,
    Save,
    QuickJump(PageId),
    /// Escape outside the palette input: close palette and dropdowns.
    CloseOverlays,
    Palette(PaletteKey),
    SubmitSearch,
}

pub fn resolve_shortcut(input: &KeyInput) -> Option<Shortcut> {
    if input.command_modifier() && input.key == Key::Char('k') {
        return Some(Shortcut::TogglePalette);
    }

    match (input.target, input.key) {
        (FocusTarget::CommandInput, Key::ArrowUp) => {
            return Some(Shortcut::Palette(PaletteKey::ArrowUp))
        }
        (FocusTarget::CommandInput, Key::ArrowDown) => {
            return Some(Shortcut::Palette(PaletteKey::ArrowDown))
        }
        (FocusTarget::CommandInput, Key::Enter) => {
            return Some(Shortcut::Palette(PaletteKey::Enter))
        }
        (FocusTarget::CommandInput, Key::Escape) => {
            return Some(Shortcut::Palette(PaletteKey::Escape))
        }
        (FocusTarget::SearchInput, Key::Enter) => return Some(Shortcut::SubmitSearch),
        (_, Key::Escape) => return Some(Shortcut::CloseOverlays),
        _ => {}
    }

    if input.target.is_text_entry() {
        return None;
    }

    let Key::Char(ch) = input.key else {
        return None;
    };
    if input.command_modifier() {
        return match ch {
            '/' => Some(Shortcut::ToggleSidebar),
            'd' => Some(Shortcut::ToggleTheme),
            'n' => Some(Shortcut::NewItem),
            's' => Some(Shortcut::Save),
            _ => None,
        };
    }
    if input.alt {
        let digit = ch.to_digit(10).and_then(|digit| u8::try_from(digit).ok())?;
        return PageId::from_quick_jump_digit(digit).map(Shortcut::QuickJump);
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutHelp {
    pub keys: &'static str,
    pub description: &'static str,
}

const HELP: [ShortcutHelp; 8] = [
    ShortcutHelp { keys: "Ctrl+K", description: "Open command palette" },
    ShortcutHelp { keys: "Ctrl+/", description: "Toggle sidebar" },
    ShortcutHelp { keys: "Ctrl+D", description: "Toggle dark mode" },
    ShortcutHelp { keys: "Escape", description: "Close dialogs" },
    ShortcutHelp { keys: "Ctrl+N", description: "Create new item" },
    ShortcutHelp { keys: "Ctrl+S", description: "Save" },
    ShortcutHelp { keys: "Ctrl+F", description: "Search" },
    ShortcutHelp { keys: "Alt+1..9", description: "Jump to page" },
];

/// Rows for the keyboard shortcuts help panel.
pub fn shortcut_help() -> &'static [ShortcutHelp] {
    &HELP
}
