//! Signals delivered by the embedding host.

/// Element that had focus when a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    Body,
    /// Any other text input or textarea.
    TextInput,
    /// Header search box.
    SearchInput,
    /// Command palette input.
    CommandInput,
}

impl FocusTarget {
    pub fn is_text_entry(self) -> bool {
        !matches!(self, Self::Body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable key, already lowercased by the host.
    Char(char),
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub target: FocusTarget,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            alt: false,
            target: FocusTarget::Body,
        }
    }

    pub fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(Key::Char(key))
        }
    }

    pub fn alt(key: char) -> Self {
        Self {
            alt: true,
            ..Self::plain(Key::Char(key))
        }
    }

    pub fn in_target(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    RuntimeError { message: String },
    UnhandledRejection { reason: String },
    Online,
    Offline,
    VisibilityChanged { visible: bool },
    Key(KeyInput),
    BeforeUnload,
    OsThemeChanged { prefers_dark: bool },
    Resize { width: u32 },
    /// Click outside every dropdown and the sidebar.
    OutsideClick,
}

impl HostEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RuntimeError { .. } => "runtime_error",
            Self::UnhandledRejection { .. } => "unhandled_rejection",
            Self::Online => "online",
            Self::Offline => "offline",
            Self::VisibilityChanged { .. } => "visibility",
            Self::Key(_) => "key",
            Self::BeforeUnload => "before_unload",
            Self::OsThemeChanged { .. } => "os_theme",
            Self::Resize { .. } => "resize",
            Self::OutsideClick => "outside_click",
        }
    }
}

/// What the host should do with the original event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutcome {
    /// Not consumed; default handling applies.
    Ignored,
    /// Consumed; the host suppresses its default action.
    Handled,
    /// Leaving the page must be confirmed with `message`.
    BlockUnload { message: String },
}
