//! Fixed timestep simulation tick
//!
//! Core game loop that advances one level attempt by one step.

use super::collision::{collides_with_any, collides_with_list};
use super::state::{GameEvent, LevelOutcome, PlayState, Progression};

/// Advance the play state by one tick of `dt` seconds.
///
/// Returns the events produced this tick. Once a level outcome has been
/// reached the state is frozen and further ticks do nothing.
pub fn tick(play: &mut PlayState, progression: &mut Progression, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if play.is_over() {
        return events;
    }

    play.level_timer += dt;

    if play.paused {
        return events;
    }

    // Player vs hazards: meteors first, then plasma clouds
    let world = &play.world;
    if collides_with_any(&world.player, &world.meteors) || collides_with_any(&world.player, &world.plasma) {
        log::info!(
            "Player hit at level {} after {:.2}s",
            progression.level,
            play.level_timer
        );
        play.outcome = Some(LevelOutcome::GameOver);
        events.push(GameEvent::GameOver {
            time_taken: play.level_timer,
        });
        return events;
    }

    if play.level_timer >= play.level_duration {
        log::info!(
            "Level {} complete in {:.2}s",
            progression.level,
            play.level_timer
        );
        play.outcome = Some(LevelOutcome::LevelComplete);
        events.push(GameEvent::LevelComplete {
            time_taken: play.level_timer,
        });
        return events;
    }

    resolve_laser_hits(play, progression, &mut events);
    advance_entities(play);
    play.world.player.clamp_to_screen();
    play.run_spawners(dt);

    events
}

/// Lasers against meteors.
///
/// A laser overlapping several meteors destroys and scores all of them but
/// spawns a single explosion at the first one.
fn resolve_laser_hits(play: &mut PlayState, progression: &mut Progression, events: &mut Vec<GameEvent>) {
    let lasers = std::mem::take(&mut play.world.lasers);
    let mut surviving = Vec::with_capacity(lasers.len());

    for laser in lasers {
        let hits = collides_with_list(&laser, &play.world.meteors);

        if let Some(&first) = hits.first() {
            let pos = play.world.meteors[first].pos;
            play.spawn_explosion(pos);
        }

        // Remove back to front so earlier indices stay valid
        for &index in hits.iter().rev() {
            let meteor = play.world.meteors.remove(index);
            play.score += 1;
            progression.total_score += 1;
            events.push(GameEvent::MeteorDestroyed { pos: meteor.pos });
            log::debug!("Meteor {} destroyed by laser {}", meteor.id, laser.id);
        }

        if hits.is_empty() && !laser.is_off_screen() {
            surviving.push(laser);
        }
    }

    play.world.lasers = surviving;
}

/// Move everything one tick and drop whatever left the screen or finished
/// animating
fn advance_entities(play: &mut PlayState) {
    let world = &mut play.world;

    world.player.advance();

    for list in [&mut world.meteors, &mut world.plasma, &mut world.lasers] {
        for entity in list.iter_mut() {
            entity.advance();
        }
        list.retain(|e| !e.is_off_screen());
    }

    world.explosions.retain_mut(|e| e.advance_frame());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::{Entity, EntityKind};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_play(seed: u64) -> (PlayState, Progression, Tuning) {
        let tuning = Tuning::default();
        let progression = Progression::new(&tuning);
        let play = PlayState::new(&progression, &tuning, seed);
        (play, progression, tuning)
    }

    /// Play state with spawning effectively disabled
    fn quiet_play() -> (PlayState, Progression) {
        let tuning = Tuning {
            meteor_period: 1.0e6,
            plasma_period: 1.0e6,
            ..Default::default()
        };
        let progression = Progression::new(&tuning);
        (PlayState::new(&progression, &tuning, 1), progression)
    }

    fn meteor(play: &mut PlayState, pos: Vec2, vel: Vec2) -> Entity {
        let id = play.next_entity_id();
        Entity::new(id, EntityKind::Meteor, pos, 0.5).with_velocity(vel)
    }

    #[test]
    fn test_level_timer_accumulates() {
        let (mut play, mut progression) = quiet_play();
        tick(&mut play, &mut progression, SIM_DT);
        tick(&mut play, &mut progression, SIM_DT);
        assert!((play.level_timer - 2.0 * SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_player_hit_by_meteor_is_game_over() {
        let (mut play, mut progression) = quiet_play();
        let pos = play.world.player.pos;
        let m = meteor(&mut play, pos, Vec2::ZERO);
        play.world.meteors.push(m);

        let events = tick(&mut play, &mut progression, SIM_DT);
        assert!(matches!(events.as_slice(), [GameEvent::GameOver { .. }]));
        assert_eq!(play.outcome, Some(LevelOutcome::GameOver));

        // Frozen afterwards
        let timer = play.level_timer;
        assert!(tick(&mut play, &mut progression, SIM_DT).is_empty());
        assert_eq!(play.level_timer, timer);
    }

    #[test]
    fn test_player_hit_by_plasma_is_game_over() {
        let (mut play, mut progression) = quiet_play();
        let id = play.next_entity_id();
        let pos = play.world.player.pos + Vec2::new(10.0, 10.0);
        play.world.plasma.push(Entity::new(id, EntityKind::Plasma, pos, 0.5));

        let events = tick(&mut play, &mut progression, SIM_DT);
        assert!(matches!(events.as_slice(), [GameEvent::GameOver { .. }]));
    }

    #[test]
    fn test_game_over_beats_level_complete() {
        let (mut play, mut progression) = quiet_play();
        play.level_timer = play.level_duration;
        let pos = play.world.player.pos;
        let m = meteor(&mut play, pos, Vec2::ZERO);
        play.world.meteors.push(m);

        let events = tick(&mut play, &mut progression, SIM_DT);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::GameOver { .. }));
    }

    #[test]
    fn test_level_complete_fires_exactly_once() {
        let (mut play, mut progression) = quiet_play();
        assert_eq!(play.level_duration, 20.0);

        let mut completions = 0;
        for _ in 0..2000 {
            let events = tick(&mut play, &mut progression, 0.25);
            completions += events
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
                .count();
        }
        assert_eq!(completions, 1);
        assert_eq!(play.outcome, Some(LevelOutcome::LevelComplete));
        assert!(play.level_timer >= 20.0);
    }

    #[test]
    fn test_laser_destroys_single_meteor() {
        let (mut play, mut progression) = quiet_play();
        let target = Vec2::new(100.0, 500.0);
        let m = meteor(&mut play, target, Vec2::new(0.0, -3.0));
        play.world.meteors.push(m);

        let id = play.next_entity_id();
        let laser = Entity::new(id, EntityKind::Laser, target, 0.5).with_velocity(Vec2::new(0.0, 5.0));
        play.world.lasers.push(laser);

        let events = tick(&mut play, &mut progression, SIM_DT);

        assert!(play.world.lasers.is_empty());
        assert!(play.world.meteors.is_empty());
        assert_eq!(play.score, 1);
        assert_eq!(progression.total_score, 1);
        assert_eq!(play.world.explosions.len(), 1);
        assert_eq!(play.world.explosions[0].pos, target);
        assert_eq!(events, vec![GameEvent::MeteorDestroyed { pos: target }]);
    }

    #[test]
    fn test_multi_hit_laser_spawns_one_explosion() {
        let (mut play, mut progression) = quiet_play();
        let first = Vec2::new(100.0, 500.0);
        let second = Vec2::new(104.0, 510.0);
        let a = meteor(&mut play, first, Vec2::ZERO);
        let b = meteor(&mut play, second, Vec2::ZERO);
        play.world.meteors.push(a);
        play.world.meteors.push(b);

        let id = play.next_entity_id();
        play.world
            .lasers
            .push(Entity::new(id, EntityKind::Laser, first, 0.5).with_velocity(Vec2::new(0.0, 5.0)));

        let events = tick(&mut play, &mut progression, SIM_DT);

        assert!(play.world.meteors.is_empty());
        assert_eq!(play.score, 2);
        assert_eq!(events.len(), 2);
        assert_eq!(play.world.explosions.len(), 1);
        assert_eq!(play.world.explosions[0].pos, first);
    }

    #[test]
    fn test_second_laser_cannot_hit_destroyed_meteor() {
        let (mut play, mut progression) = quiet_play();
        let target = Vec2::new(300.0, 400.0);
        let m = meteor(&mut play, target, Vec2::ZERO);
        play.world.meteors.push(m);
        for _ in 0..2 {
            let id = play.next_entity_id();
            play.world
                .lasers
                .push(Entity::new(id, EntityKind::Laser, target, 0.5).with_velocity(Vec2::new(0.0, 5.0)));
        }

        tick(&mut play, &mut progression, SIM_DT);
        assert_eq!(play.score, 1);
        assert_eq!(play.world.explosions.len(), 1);
        // The second laser missed and keeps flying
        assert_eq!(play.world.lasers.len(), 1);
    }

    #[test]
    fn test_plasma_is_not_shootable() {
        let (mut play, mut progression) = quiet_play();
        let pos = Vec2::new(300.0, 500.0);
        let id = play.next_entity_id();
        play.world.plasma.push(Entity::new(id, EntityKind::Plasma, pos, 0.5));
        let id = play.next_entity_id();
        play.world
            .lasers
            .push(Entity::new(id, EntityKind::Laser, pos, 0.5).with_velocity(Vec2::new(0.0, 5.0)));

        tick(&mut play, &mut progression, SIM_DT);
        assert_eq!(play.world.plasma.len(), 1);
        assert_eq!(play.world.lasers.len(), 1);
        assert_eq!(play.score, 0);
    }

    #[test]
    fn test_laser_leaving_top_is_removed() {
        let (mut play, mut progression) = quiet_play();
        let id = play.next_entity_id();
        let mut laser = Entity::new(id, EntityKind::Laser, Vec2::ZERO, 0.5).with_velocity(Vec2::new(0.0, 5.0));
        laser.pos.x = 300.0;
        laser.set_bottom(SCREEN_HEIGHT - 2.0);
        play.world.lasers.push(laser);

        tick(&mut play, &mut progression, SIM_DT);
        assert!(play.world.lasers.is_empty());
    }

    #[test]
    fn test_hazard_leaving_bottom_is_removed() {
        let (mut play, mut progression) = quiet_play();
        let mut m = meteor(&mut play, Vec2::new(300.0, 0.0), Vec2::new(0.0, -6.0));
        m.set_top(3.0);
        play.world.meteors.push(m);

        tick(&mut play, &mut progression, SIM_DT);
        assert!(play.world.meteors.is_empty());
    }

    #[test]
    fn test_explosion_runs_its_frames() {
        let (mut play, mut progression) = quiet_play();
        play.spawn_explosion(Vec2::new(300.0, 600.0));
        assert_eq!(play.world.explosions[0].frame(), 1);

        let mut ticks = 0;
        while !play.world.explosions.is_empty() {
            tick(&mut play, &mut progression, SIM_DT);
            ticks += 1;
            assert!(ticks < 100, "explosion never finished");
        }
        assert_eq!(ticks, EXPLOSION_FRAMES - 1);
    }

    #[test]
    fn test_paused_tick_freezes_world() {
        let (mut play, mut progression, _) = new_play(5);
        for _ in 0..120 {
            tick(&mut play, &mut progression, SIM_DT);
        }
        play.fire_laser();
        play.world.player.vel = Vec2::new(5.0, 0.0);
        play.toggle_pause();

        let before: Vec<_> = play.world.iter().cloned().collect();
        let meteor_acc = play.meteor_spawner.accumulator();
        for _ in 0..30 {
            assert!(tick(&mut play, &mut progression, SIM_DT).is_empty());
        }
        let after: Vec<_> = play.world.iter().cloned().collect();

        assert_eq!(before, after);
        assert_eq!(play.meteor_spawner.accumulator(), meteor_acc);

        play.toggle_pause();
        tick(&mut play, &mut progression, SIM_DT);
        assert_ne!(play.world.player.pos, before.iter().find(|e| e.kind == EntityKind::Player).unwrap().pos);
    }

    #[test]
    fn test_spawners_fill_the_sky() {
        let (mut play, mut progression, _) = new_play(9);
        // One second: meteor period ~0.74s, plasma ~1.49s
        for _ in 0..60 {
            tick(&mut play, &mut progression, SIM_DT);
        }
        assert_eq!(play.world.meteors.len(), 1);
        assert!(play.world.plasma.is_empty());
    }

    #[test]
    fn test_determinism() {
        let (mut play1, mut prog1, _) = new_play(99999);
        let (mut play2, mut prog2, _) = new_play(99999);

        for i in 0..600 {
            if i % 30 == 0 {
                play1.fire_laser();
                play2.fire_laser();
            }
            let e1 = tick(&mut play1, &mut prog1, SIM_DT);
            let e2 = tick(&mut play2, &mut prog2, SIM_DT);
            assert_eq!(e1, e2);
        }

        let w1: Vec<_> = play1.world.iter().cloned().collect();
        let w2: Vec<_> = play2.world.iter().cloned().collect();
        assert_eq!(w1, w2);
        assert_eq!(prog1, prog2);
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            vx in -40.0f32..40.0,
            vy in -40.0f32..40.0,
            ticks in 1usize..200,
        ) {
            let (mut play, mut progression) = quiet_play();
            play.world.player.vel = Vec2::new(vx, vy);
            for _ in 0..ticks {
                tick(&mut play, &mut progression, SIM_DT);
            }
            let player = &play.world.player;
            prop_assert!(player.left() >= -1e-3);
            prop_assert!(player.right() <= SCREEN_WIDTH + 1e-3);
            prop_assert!(player.bottom() >= -1e-3);
            prop_assert!(player.top() <= SCREEN_HEIGHT + 1e-3);
        }

        #[test]
        fn prop_removed_entities_never_return(seed in any::<u64>(), fire_every in 5usize..40) {
            let (mut play, mut progression, _) = new_play(seed);
            let mut seen = std::collections::HashSet::new();
            let mut gone = std::collections::HashSet::new();

            for i in 0..400 {
                if i % fire_every == 0 {
                    play.fire_laser();
                }
                tick(&mut play, &mut progression, SIM_DT);

                let present: std::collections::HashSet<u32> = play.world.iter().map(|e| e.id).collect();
                for id in &present {
                    prop_assert!(!gone.contains(id), "entity {} came back", id);
                }
                for id in seen.difference(&present) {
                    gone.insert(*id);
                }
                seen = present;
                if play.is_over() {
                    break;
                }
            }
        }

        #[test]
        fn prop_overlap_means_game_over(dx in -20.0f32..20.0, dy in -20.0f32..20.0) {
            let (mut play, mut progression) = quiet_play();
            let pos = play.world.player.pos + Vec2::new(dx, dy);
            let m = meteor(&mut play, pos, Vec2::ZERO);
            play.world.meteors.push(m);

            let events = tick(&mut play, &mut progression, SIM_DT);
            prop_assert!(
                matches!(events.as_slice(), [GameEvent::GameOver { .. }]),
                "events: {:?}",
                events
            );
        }
    }
}
