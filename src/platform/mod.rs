//! Platform abstraction layer
//!
//! Maps browser keyboard events onto the game's key symbols.

use crate::sim::{Key, Screen};

/// Map a DOM `KeyboardEvent.key` value to a game key
pub fn key_from_dom(key: &str) -> Key {
    match key {
        "ArrowUp" | "Up" => Key::Up,
        "ArrowDown" | "Down" => Key::Down,
        "ArrowLeft" | "Left" => Key::Left,
        "ArrowRight" | "Right" => Key::Right,
        " " | "Spacebar" => Key::Space,
        "p" | "P" => Key::Pause,
        "q" | "Q" => Key::Quit,
        "Enter" => Key::Enter,
        _ => Key::Other,
    }
}

/// Keys whose default browser action (scrolling) should be suppressed
pub fn captures_default(key: Key) -> bool {
    matches!(key, Key::Up | Key::Down | Key::Left | Key::Right | Key::Space)
}

/// Full-screen overlay ids the web frontend shows and hides
pub const SCREEN_OVERLAYS: [&str; 6] = [
    "menu",
    "instructions",
    "pause-menu",
    "game-over",
    "level-complete",
    "goodbye",
];

/// Whether a key press toggles mute instead of reaching the session.
///
/// Only during play; on the title screens every key advances.
pub fn is_mute_toggle(key: &str, screen: &Screen) -> bool {
    *screen == Screen::Playing && matches!(key, "m" | "M")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key_from_dom("ArrowUp"), Key::Up);
        assert_eq!(key_from_dom("ArrowDown"), Key::Down);
        assert_eq!(key_from_dom("ArrowLeft"), Key::Left);
        assert_eq!(key_from_dom("ArrowRight"), Key::Right);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key_from_dom(" "), Key::Space);
        assert_eq!(key_from_dom("P"), Key::Pause);
        assert_eq!(key_from_dom("q"), Key::Quit);
        assert_eq!(key_from_dom("Enter"), Key::Enter);
        assert_eq!(key_from_dom("Shift"), Key::Other);
    }

    #[test]
    fn test_captures_scrolling_keys_only() {
        assert!(captures_default(Key::Space));
        assert!(captures_default(Key::Down));
        assert!(!captures_default(Key::Enter));
    }

    #[test]
    fn test_overlays_keep_layout_class() {
        // Visibility only flips `hidden`, so the page must supply the layout class
        let page = include_str!("../../index.html");
        for id in SCREEN_OVERLAYS {
            let tag = format!(r#"id="{id}" class="overlay hidden""#);
            assert!(page.contains(&tag), "#{id} must start as a hidden overlay");
        }
    }

    #[test]
    fn test_mute_toggle_only_while_playing() {
        assert!(is_mute_toggle("m", &Screen::Playing));
        assert!(is_mute_toggle("M", &Screen::Playing));
        assert!(!is_mute_toggle("x", &Screen::Playing));
        // Title screens advance on any key, including M
        assert!(!is_mute_toggle("m", &Screen::Menu));
        assert!(!is_mute_toggle("M", &Screen::Instructions));
    }
}
