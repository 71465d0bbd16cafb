//! Reference bindings of the three-key macro pad.
//!
//! The core treats actions as opaque; this module supplies the descriptor
//! type the reference device binds at compile time. Turning a
//! [`MacroAction`] into a HID report or a GUI popup is up to the host.

use crate::types::KEY_COUNT;

/// Keys the reference macros press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Left Alt modifier.
    LeftAlt,
    /// Function key F4.
    F4,
    /// Function key F5.
    F5,
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Key::LeftAlt => "Alt",
            Key::F4 => "F4",
            Key::F5 => "F5",
        };
        f.write_str(name)
    }
}

/// What a key of the pad does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroAction {
    /// Hold `modifier`, tap `key`, release `modifier`.
    Chord {
        /// Key held for the duration of the chord.
        modifier: Key,
        /// Key tapped while the modifier is held.
        key: Key,
        /// Popup description.
        label: &'static str,
    },

    /// Type a string, e.g. a path to an executable.
    TypeText {
        /// Characters to type, in order.
        text: &'static str,
        /// Popup description.
        label: &'static str,
    },

    /// Tap a single key.
    Tap {
        /// Key to tap.
        key: Key,
        /// Popup description.
        label: &'static str,
    },
}

impl MacroAction {
    /// Short human-readable purpose of the action.
    pub fn label(&self) -> &'static str {
        match self {
            MacroAction::Chord { label, .. }
            | MacroAction::TypeText { label, .. }
            | MacroAction::Tap { label, .. } => *label,
        }
    }
}

impl core::fmt::Display for MacroAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MacroAction::Chord { modifier, key, label } => {
                write!(f, "{}+{} ({})", modifier, key, label)
            }
            MacroAction::TypeText { label, .. } => f.write_str(label),
            MacroAction::Tap { key, label } => write!(f, "{} ({})", key, label),
        }
    }
}

/// Path typed by the "Relax" key.
pub const MEDIA_PLAYER_PATH: &str = "C:\\Users\\Leone\\AppData\\Roaming\\Spotify\\Spotify.exe";

/// The keymap of the reference pad, in channel order.
///
/// | Channel | Cap            | Action                          |
/// |---------|----------------|---------------------------------|
/// | 0       | Rage Quit      | Alt+F4, close the focused window |
/// | 1       | Relax          | launch the media player         |
/// | 2       | Comp & Prayge  | F5, refresh                     |
pub const fn reference_keymap() -> [MacroAction; KEY_COUNT] {
    [
        MacroAction::Chord {
            modifier: Key::LeftAlt,
            key: Key::F4,
            label: "Close Application",
        },
        MacroAction::TypeText {
            text: MEDIA_PLAYER_PATH,
            label: "Opening Spotify...",
        },
        MacroAction::Tap {
            key: Key::F5,
            label: "Refresh",
        },
    ]
}
