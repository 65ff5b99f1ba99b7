//! Input aggregation
//!
//! Keyboard and virtual-joystick signals arrive as [`InputEvent`]s between
//! frames. They are queued and applied at the start of a step, so every step
//! reads one stable intent vector.

use std::collections::VecDeque;

use glam::Vec2;

use super::tick::Command;
use crate::limit_to_unit;

/// Movement keys (arrow and WASD bindings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
    ];

    /// Map a DOM `KeyboardEvent.key` value to a movement key
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            // Both cases, so a key released after toggling caps lock doesn't stick
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            _ => None,
        }
    }

    /// Unit direction in screen space (y grows downward)
    pub fn direction(self) -> Vec2 {
        match self {
            Key::ArrowUp | Key::W => Vec2::new(0.0, -1.0),
            Key::ArrowDown | Key::S => Vec2::new(0.0, 1.0),
            Key::ArrowLeft | Key::A => Vec2::new(-1.0, 0.0),
            Key::ArrowRight | Key::D => Vec2::new(1.0, 0.0),
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: u8,
}

impl KeyboardState {
    pub fn press(&mut self, key: Key) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.held &= !key.bit();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }

    /// Keyboard contribution to the intent: -1, 0 or +1 per axis.
    ///
    /// Two bindings for the same direction count once; opposite directions
    /// cancel.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        for dir in [Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight] {
            let alt = match dir {
                Key::ArrowUp => Key::W,
                Key::ArrowDown => Key::S,
                Key::ArrowLeft => Key::A,
                _ => Key::D,
            };
            if self.is_held(dir) || self.is_held(alt) {
                axis += dir.direction();
            }
        }
        axis
    }
}

/// On-screen joystick driven by a single pointer
#[derive(Debug, Clone)]
pub struct Joystick {
    /// Maximum knob travel in pixels
    radius: f32,
    center: Vec2,
    pointer: Option<i32>,
    knob: Vec2,
    vector: Vec2,
}

impl Joystick {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            center: Vec2::ZERO,
            pointer: None,
            knob: Vec2::ZERO,
            vector: Vec2::ZERO,
        }
    }

    /// Start a gesture. `center` is the widget centre captured at press time.
    pub fn pointer_down(&mut self, id: i32, pos: Vec2, center: Vec2) {
        if self.pointer.is_some_and(|active| active != id) {
            return;
        }
        self.pointer = Some(id);
        self.center = center;
        self.set_offset(pos - center);
    }

    pub fn pointer_move(&mut self, id: i32, pos: Vec2) {
        if self.pointer == Some(id) {
            self.set_offset(pos - self.center);
        }
    }

    /// End the gesture (pointer up, cancel or lost capture)
    pub fn pointer_up(&mut self, id: i32) {
        if self.pointer == Some(id) {
            self.release();
        }
    }

    pub fn release(&mut self) {
        self.pointer = None;
        self.knob = Vec2::ZERO;
        self.vector = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.pointer.is_some()
    }

    /// Intent vector, each axis in [-1, 1] with magnitude <= 1
    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// Knob displacement in pixels, for drawing the stick
    pub fn knob_offset(&self) -> Vec2 {
        self.knob
    }

    fn set_offset(&mut self, offset: Vec2) {
        let travel = offset.length().min(self.radius);
        let dir = offset.normalize_or_zero();
        self.knob = dir * travel;
        self.vector = dir * (travel / self.radius);
    }
}

/// Host events delivered between frames
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { id: i32, pos: Vec2, center: Vec2 },
    PointerMove { id: i32, pos: Vec2 },
    PointerUp { id: i32 },
    PointerCancel { id: i32 },
    /// Button or hotkey command
    Command(Command),
    /// Container size changed (logical units)
    Resize { width: f32, height: f32 },
}

/// FIFO of events waiting for the next step boundary
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

/// Combined keyboard + joystick state
#[derive(Debug, Clone)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub joystick: Joystick,
}

impl InputState {
    pub fn new(joystick_radius: f32) -> Self {
        Self {
            keyboard: KeyboardState::default(),
            joystick: Joystick::new(joystick_radius),
        }
    }

    /// Apply a device event. Returns false for events that aren't device input.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown(key) => self.keyboard.press(key),
            InputEvent::KeyUp(key) => self.keyboard.release(key),
            InputEvent::PointerDown { id, pos, center } => {
                self.joystick.pointer_down(id, pos, center)
            }
            InputEvent::PointerMove { id, pos } => self.joystick.pointer_move(id, pos),
            InputEvent::PointerUp { id } | InputEvent::PointerCancel { id } => {
                self.joystick.pointer_up(id)
            }
            InputEvent::Command(_) | InputEvent::Resize { .. } => return false,
        }
        true
    }

    /// Keyboard plus joystick, rescaled to magnitude 1 when it would exceed it
    pub fn intent(&self) -> Vec2 {
        limit_to_unit(self.keyboard.axis() + self.joystick.vector())
    }
}
