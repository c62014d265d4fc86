//! Cosmetic animation timers.
//!
//! These only feed the renderer; nothing in the game rules reads them.

/// Tail pose shown for a wag frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailPose {
    Straight,
    Up,
    Down,
}

const TAIL_FRAMES: [TailPose; 4] = [TailPose::Straight, TailPose::Up, TailPose::Straight, TailPose::Down];
const TAIL_FRAME_MS: f64 = 500.0;

const FOOD_PERIOD_MS: f64 = 2000.0;
const FOOD_SAMPLE_MS: f64 = 250.0;
const FOOD_MAX_GROWTH: f64 = 0.2;

/// Cycles the tail through its wag frames
#[derive(Debug, Clone, PartialEq)]
pub struct TailWag {
    frame: usize,
    time: f64,
}

impl TailWag {
    pub fn new() -> Self {
        TailWag { frame: 0, time: 0.0 }
    }

    pub fn advance(&mut self, dt: f64) {
        self.time += dt;

        if self.time >= TAIL_FRAME_MS {
            self.time = 0.0;
            self.frame = (self.frame + 1) % TAIL_FRAMES.len();
        }
    }

    pub fn pose(&self) -> TailPose {
        TAIL_FRAMES[self.frame]
    }
}

impl Default for TailWag {
    fn default() -> Self {
        Self::new()
    }
}

/// Spins and swells a food kind over a fixed period, sampled at a coarse rate
/// so the motion looks steppy
#[derive(Debug, Clone, PartialEq)]
pub struct FoodBob {
    angle: f64,
    scale: f64,
    time: f64,
    since_sample: f64,
}

impl FoodBob {
    pub fn new() -> Self {
        FoodBob { angle: 0.0, scale: 1.0, time: 0.0, since_sample: 0.0 }
    }

    pub fn advance(&mut self, dt: f64) {
        self.time += dt;
        if self.time >= FOOD_PERIOD_MS {
            self.time = 0.0;
        }

        self.since_sample += dt;
        if self.since_sample >= FOOD_SAMPLE_MS {
            self.since_sample = 0.0;

            let phase = self.time / FOOD_PERIOD_MS;
            self.angle = phase * 360.0;
            self.scale = 1.0 + phase * FOOD_MAX_GROWTH;
        }
    }

    /// Rotation in degrees, in `[0, 360)`
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for FoodBob {
    fn default() -> Self {
        Self::new()
    }
}

/// Every animation in a game: one tail and one bob per food kind
#[derive(Debug, Clone, PartialEq)]
pub struct Animations {
    pub tail: TailWag,
    pub food: Vec<FoodBob>,
}

impl Animations {
    pub fn new(food_kinds: usize) -> Self {
        Animations { tail: TailWag::new(), food: vec![FoodBob::new(); food_kinds] }
    }

    pub fn advance(&mut self, dt: f64) {
        self.tail.advance(dt);
        self.food.iter_mut().for_each(|bob| bob.advance(dt));
    }

    pub fn food(&self, kind: usize) -> Option<&FoodBob> {
        self.food.get(kind)
    }
}
