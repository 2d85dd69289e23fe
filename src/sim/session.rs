//! Session: the screen state machine around the gameplay loop
//!
//! Owns the progression that carries across levels and the play state of
//! the current level attempt. Frontends feed it key events and fixed ticks.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::screen::{GAME_OVER_MESSAGES, Key, LEVEL_COMPLETE_MESSAGES, LevelReport, Screen, pick_message};
use super::state::{GameEvent, PlayState, Progression};
use super::tick::tick;
use crate::consts::PLAYER_SPEED;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    progression: Progression,
    tuning: Tuning,
    play: Option<PlayState>,
    rng: Pcg32,
    quit: bool,
}

impl Session {
    /// New session on the title screen
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            progression: Progression::new(&tuning),
            tuning,
            play: None,
            rng: Pcg32::seed_from_u64(seed),
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Current (or last finished) level attempt
    pub fn play(&self) -> Option<&PlayState> {
        self.play.as_ref()
    }

    #[cfg(test)]
    fn play_mut(&mut self) -> Option<&mut PlayState> {
        self.play.as_mut()
    }

    /// Set once the quit key was pressed during play
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_paused(&self) -> bool {
        self.screen == Screen::Playing && self.play.as_ref().is_some_and(|p| p.paused)
    }

    /// Handle a key press
    pub fn key_down(&mut self, key: Key) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.screen {
            Screen::Menu => self.show(Screen::Instructions),
            Screen::Instructions => self.start_level(),
            Screen::GameOver(_) if key == Key::Enter => {
                self.progression.reset(&self.tuning);
                log::info!("Restarting from level 1");
                self.start_level();
            }
            Screen::LevelComplete(_) if key == Key::Enter => {
                self.progression.advance_level(&self.tuning);
                self.start_level();
            }
            Screen::GameOver(_) | Screen::LevelComplete(_) => {}
            Screen::Playing => {
                let Some(play) = self.play.as_mut() else {
                    return events;
                };
                match key {
                    Key::Up => play.world.player.vel.y = PLAYER_SPEED,
                    Key::Down => play.world.player.vel.y = -PLAYER_SPEED,
                    Key::Left => play.world.player.vel.x = -PLAYER_SPEED,
                    Key::Right => play.world.player.vel.x = PLAYER_SPEED,
                    Key::Space => {
                        play.fire_laser();
                        events.push(GameEvent::LaserFired);
                    }
                    Key::Pause => {
                        let paused = play.toggle_pause();
                        log::info!("{}", if paused { "Paused" } else { "Resumed" });
                        events.push(GameEvent::PauseToggled { paused });
                    }
                    Key::Quit => {
                        log::info!("Quit requested");
                        self.quit = true;
                    }
                    Key::Enter | Key::Other => {}
                }
            }
        }
        events
    }

    /// Handle a key release; only movement cares
    pub fn key_up(&mut self, key: Key) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(play) = self.play.as_mut() {
            let player = &mut play.world.player;
            match key {
                Key::Up | Key::Down => player.vel.y = 0.0,
                Key::Left | Key::Right => player.vel.x = 0.0,
                _ => {}
            }
        }
    }

    /// Pause without toggling (tab hidden, window blurred)
    pub fn pause(&mut self) -> Option<GameEvent> {
        if self.screen != Screen::Playing {
            return None;
        }
        let play = self.play.as_mut()?;
        if play.paused {
            return None;
        }
        play.paused = true;
        Some(GameEvent::PauseToggled { paused: true })
    }

    /// Advance the current level by one fixed tick
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }
        let Some(play) = self.play.as_mut() else {
            return Vec::new();
        };

        let events = tick(play, &mut self.progression, dt);
        for event in &events {
            match *event {
                GameEvent::GameOver { time_taken } => {
                    let message = pick_message(&GAME_OVER_MESSAGES, &mut self.rng);
                    self.show(Screen::GameOver(LevelReport { time_taken, message }));
                }
                GameEvent::LevelComplete { time_taken } => {
                    let message = pick_message(&LEVEL_COMPLETE_MESSAGES, &mut self.rng);
                    self.show(Screen::LevelComplete(LevelReport { time_taken, message }));
                }
                _ => {}
            }
        }
        events
    }

    fn start_level(&mut self) {
        let seed = self.rng.next_u64();
        self.play = Some(PlayState::new(&self.progression, &self.tuning, seed));
        log::info!(
            "Level {} starting: duration {:.0}s, velocity x{:.2}, spawn x{:.3}",
            self.progression.level,
            self.progression.level_duration,
            self.progression.level_factor,
            self.progression.spawn_factor
        );
        self.show(Screen::Playing);
    }

    fn show(&mut self, screen: Screen) {
        log::debug!("Screen {} -> {}", self.screen.name(), screen.name());
        self.screen = screen;
    }
}
