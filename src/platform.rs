//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifiers that trigger form shortcuts
/// - macOS: Ctrl or Cmd (when the terminal reports it)
/// - Linux/Windows: Ctrl
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::SUPER);

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Append a hobby
/// - macOS: "Cmd+A"
/// - Linux/Windows: "Ctrl+A"
#[cfg(target_os = "macos")]
pub const ADD_HOBBY_SHORTCUT: &str = "Cmd+A";

#[cfg(not(target_os = "macos"))]
pub const ADD_HOBBY_SHORTCUT: &str = "Ctrl+A";

/// Remove the focused hobby
#[cfg(target_os = "macos")]
pub const REMOVE_HOBBY_SHORTCUT: &str = "Cmd+X";

#[cfg(not(target_os = "macos"))]
pub const REMOVE_HOBBY_SHORTCUT: &str = "Ctrl+X";

pub const RESET_SHORTCUT: &str = "Ctrl+R";
