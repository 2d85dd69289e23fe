//! Screens and key symbols

use rand::Rng;
use rand_pcg::Pcg32;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Fire
    Space,
    /// Toggle pause
    Pause,
    /// End the program
    Quit,
    /// Continue from end-of-level screens
    Enter,
    /// Anything else; still advances the title screens
    Other,
}

/// Summary shown after a level attempt ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelReport {
    /// Seconds spent in the level
    pub time_taken: f32,
    /// Flavor text picked at random when the screen opened
    pub message: &'static str,
}

/// Which screen the session is showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    /// Title and backstory
    Menu,
    /// Controls
    Instructions,
    Playing,
    LevelComplete(LevelReport),
    GameOver(LevelReport),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Instructions => "instructions",
            Screen::Playing => "playing",
            Screen::LevelComplete(_) => "level-complete",
            Screen::GameOver(_) => "game-over",
        }
    }
}

pub const GAME_OVER_MESSAGES: [&str; 8] = [
    "You suck.",
    "Your performance is unacceptable.",
    "You are such a failure.",
    "You have failed.",
    "Try better next time.",
    "How incompetent can you really be?",
    "You are a disgrace for humanity.",
    "You will be court martialed.",
];

pub const LEVEL_COMPLETE_MESSAGES: [&str; 7] = [
    "Excellent job!",
    "Hero of the Space Union!",
    "Keep up with good work!",
    "Well done!",
    "Your courage is exemplary.",
    "Your gallantry will be awarded!",
    "Distinguished Flying Cross earned!",
];

pub const MENU_STORY: &str = "Once upon a time in a galaxy far, far away the Moretinians were \
    facing extinction.\n\nAs a commander of the resistance force you were tasked to extract them \
    to safety.";

pub const INSTRUCTIONS: &str = "Your job is to fly through the meteor shower and plasma clouds to \
    reach New London on planet Plimius.\n\nUse navigation keys to move your space vessel around \
    and space bar to activate your laser gun.\n\nGood luck, commander!";

/// Pick a flavor line
pub fn pick_message(messages: &[&'static str], rng: &mut Pcg32) -> &'static str {
    messages[rng.random_range(0..messages.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pick_message_stays_in_table() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let msg = pick_message(&GAME_OVER_MESSAGES, &mut rng);
            assert!(GAME_OVER_MESSAGES.contains(&msg));
        }
    }

    #[test]
    fn test_screen_names() {
        assert_eq!(Screen::Menu.name(), "menu");
        let report = LevelReport {
            time_taken: 1.0,
            message: LEVEL_COMPLETE_MESSAGES[0],
        };
        assert_eq!(Screen::LevelComplete(report).name(), "level-complete");
        assert_eq!(Screen::GameOver(report).name(), "game-over");
    }
}
