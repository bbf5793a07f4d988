//! Application orchestration.
//!
//! # Responsibility
//! - Build the component graph from injected collaborators (`controller`).
//! - Translate host signals and keyboard input (`host`, `shortcuts`).
//! - Keep transient toasts (`toast`) and publish render-ready state (`view`).
//!
//! # Invariants
//! - Cross-component reactions travel through the event bus.
//! - Every timer the app arms is owned by the app scheduler and cleared on
//!   shutdown.

pub mod controller;
pub mod host;
pub mod shortcuts;
pub mod toast;
pub mod view;

pub use controller::{AppBuilder, AppController, AppPhase, StartupError, TimerTask};
pub use host::{FocusTarget, HostEvent, HostOutcome, Key, KeyInput};
pub use shortcuts::{resolve_shortcut, shortcut_help, Shortcut, ShortcutHelp};
pub use toast::{Toast, ToastId, ToastLevel, ToastQueue};
pub use view::{
    AppSnapshot, CounterView, FatalErrorView, NotificationView, PaletteView, ResultView,
};
