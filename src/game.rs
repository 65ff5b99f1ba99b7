//! Frame driver
//!
//! Owns the simulation plus everything around it: the input queue, the frame
//! clock, overlays and the persisted best score. Host event handlers only
//! [`Game::push`]; the display-refresh callback calls [`Game::frame`].

use crate::best_score::BestScore;
use crate::persistence::Storage;
use crate::renderer::RenderSnapshot;
use crate::sim::{
    Arena, Command, FrameClock, GameEvent, GameState, InputEvent, InputQueue, InputState,
    RunMode, apply_command, tick,
};
use crate::tuning::Tuning;
use crate::ui::Overlay;

pub struct Game<S: Storage> {
    state: GameState,
    input: InputState,
    queue: InputQueue,
    clock: FrameClock,
    overlay: Overlay,
    best: BestScore,
    storage: S,
}

impl<S: Storage> Game<S> {
    pub fn new(seed: u64, arena: Arena, tuning: Tuning, storage: S) -> Self {
        let best = BestScore::load(&storage);
        Self {
            input: InputState::new(tuning.joystick_radius),
            clock: FrameClock::new(tuning.max_dt),
            state: GameState::new(seed, arena, tuning),
            queue: InputQueue::new(),
            overlay: Overlay::Title,
            best,
            storage,
        }
    }

    /// Queue a host event for the next step boundary
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Run one display frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Option<GameEvent> {
        let dt = self.clock.tick(now_ms);
        self.step(dt)
    }

    /// Apply queued events, then advance the simulation by `dt`
    pub fn step(&mut self, dt: f32) -> Option<GameEvent> {
        self.drain_events();
        let event = tick(&mut self.state, &self.input, dt);
        if let Some(event) = event {
            self.on_event(event);
        }
        event
    }

    fn drain_events(&mut self) {
        let events: Vec<InputEvent> = self.queue.drain().collect();
        for event in events {
            if self.input.apply(&event) {
                continue;
            }
            match event {
                InputEvent::Command(command) => self.command(command),
                InputEvent::Resize { width, height } => self.state.resize(width, height),
                _ => {}
            }
        }
    }

    fn command(&mut self, command: Command) {
        if command == Command::ShowInfo {
            self.overlay = Overlay::HowToPlay;
            return;
        }
        if let Some(event) = apply_command(&mut self.state, command) {
            self.on_event(event);
        }
    }

    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started | GameEvent::Resumed => self.overlay = Overlay::Hidden,
            GameEvent::Paused => self.overlay = Overlay::Paused,
            GameEvent::GameOver { score, .. } => {
                self.overlay = Overlay::GameOver { score };
                self.best.submit(score, &mut self.storage);
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> RunMode {
        self.state.mode
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best(&self) -> u64 {
        self.best.get()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, &self.input.joystick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::sim::{Enemy, Hue, Key};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn game_with_best(best: &str) -> Game<MemoryStorage> {
        Game::new(
            9,
            Arena::new(800.0, 600.0),
            Tuning::default(),
            MemoryStorage::with_item(BestScore::STORAGE_KEY, best),
        )
    }

    /// Drop an enemy on the player so the next step ends the run
    fn crash(game: &mut Game<MemoryStorage>) -> Option<GameEvent> {
        let pos = game.state.player.pos;
        game.state.enemies.push(Enemy {
            pos,
            vel: Vec2::ZERO,
            radius: 10.0,
            hue: Hue::Cyan,
            life: 10.0,
        });
        game.step(DT)
    }

    #[test]
    fn test_starts_on_title() {
        let game = game_with_best("0");
        assert_eq!(game.mode(), RunMode::Init);
        assert_eq!(game.overlay(), Overlay::Title);
    }

    #[test]
    fn test_commands_apply_at_step_boundary() {
        let mut game = game_with_best("0");
        game.push(InputEvent::Command(Command::Start));
        assert_eq!(game.mode(), RunMode::Init);
        game.step(DT);
        assert_eq!(game.mode(), RunMode::Running);
        assert_eq!(game.overlay(), Overlay::Hidden);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_key_events_feed_the_step() {
        let mut game = game_with_best("0");
        game.push(InputEvent::Command(Command::Start));
        game.push(InputEvent::KeyDown(Key::ArrowRight));
        game.step(DT);
        assert!(game.state().player.pos.x > 400.0);

        game.push(InputEvent::KeyUp(Key::ArrowRight));
        game.step(DT);
        assert_eq!(game.input().intent(), Vec2::ZERO);
    }

    #[test]
    fn test_best_score_persisted_once() {
        let mut game = game_with_best("300");
        assert_eq!(game.best(), 300);
        game.push(InputEvent::Command(Command::Start));
        game.step(DT);
        game.state.score = 450;

        let event = crash(&mut game);
        assert!(matches!(event, Some(GameEvent::GameOver { score: 450, .. })));
        assert_eq!(game.best(), 450);
        assert_eq!(game.overlay(), Overlay::GameOver { score: 450 });
        assert_eq!(
            game.storage().get(BestScore::STORAGE_KEY).as_deref(),
            Some("450")
        );

        // Later, a worse run leaves the record alone
        game.push(InputEvent::Command(Command::Start));
        game.step(DT);
        game.state.score = 200;
        crash(&mut game);
        assert_eq!(game.best(), 450);
        assert_eq!(
            game.storage().get(BestScore::STORAGE_KEY).as_deref(),
            Some("450")
        );
    }

    #[test]
    fn test_corrupt_best_reads_zero() {
        let game = game_with_best("not a number");
        assert_eq!(game.best(), 0);
    }

    #[test]
    fn test_pause_overlay_and_show_info() {
        let mut game = game_with_best("0");
        game.push(InputEvent::Command(Command::Start));
        game.step(DT);
        game.push(InputEvent::Command(Command::TogglePause));
        game.step(DT);
        assert_eq!(game.mode(), RunMode::Paused);
        assert_eq!(game.overlay(), Overlay::Paused);

        game.push(InputEvent::Command(Command::ShowInfo));
        game.step(DT);
        assert_eq!(game.mode(), RunMode::Paused);
        assert_eq!(game.overlay(), Overlay::HowToPlay);

        game.push(InputEvent::Command(Command::TogglePause));
        game.step(DT);
        assert_eq!(game.mode(), RunMode::Running);
        assert_eq!(game.overlay(), Overlay::Hidden);
    }

    #[test]
    fn test_resize_event() {
        let mut game = game_with_best("0");
        game.push(InputEvent::Resize {
            width: 100.0,
            height: 100.0,
        });
        game.step(DT);
        assert_eq!(game.state().arena, Arena::new(320.0, 180.0));
    }

    #[test]
    fn test_frame_clamps_stalls() {
        let mut game = game_with_best("0");
        game.push(InputEvent::Command(Command::Start));
        game.frame(0.0);
        let before = game.state().time;
        game.frame(60_000.0);
        let advanced = game.state().time - before;
        assert!((advanced - crate::consts::MAX_DT).abs() < 1e-6);
    }

    #[test]
    fn test_joystick_events() {
        let mut game = game_with_best("0");
        game.push(InputEvent::PointerDown {
            id: 3,
            pos: Vec2::new(145.0, 100.0),
            center: Vec2::new(100.0, 100.0),
        });
        game.step(DT);
        assert!((game.input().intent() - Vec2::new(1.0, 0.0)).length() < 1e-5);
        assert_eq!(game.snapshot().joystick_knob, Vec2::new(45.0, 0.0));

        game.push(InputEvent::PointerCancel { id: 3 });
        game.step(DT);
        assert_eq!(game.input().intent(), Vec2::ZERO);
    }
}
