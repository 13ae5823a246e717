//! Platform-specific configuration

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate modifier for app shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Add question shortcut display
#[cfg(target_os = "macos")]
pub const NEW_QUESTION_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const NEW_QUESTION_SHORTCUT: &str = "^N";

/// Export form JSON shortcut display
#[cfg(target_os = "macos")]
pub const EXPORT_SHORTCUT: &str = "Cmd+E";

#[cfg(not(target_os = "macos"))]
pub const EXPORT_SHORTCUT: &str = "^E";

/// Download edited image shortcut display
/// Ctrl+S works on all platforms
pub const DOWNLOAD_SHORTCUT: &str = "^S";

/// Whether `key` is the shortcut for `c`. Ctrl always works; Cmd also
/// works on macOS terminals that forward it.
pub fn is_shortcut(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c)
        && (key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(ACTION_MODIFIER))
}
