use crate::geometry::Point;

pub const EFFECT_FRAMES: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Smoke,
    Fire,
    Blood,
}

/// Short-lived visual left behind by a hit. Has no body, so it never takes
/// part in collisions.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionEffect {
    pub kind: EffectKind,
    pub position: Point,
    pub remaining_frames: u32,
}

impl CollisionEffect {
    pub fn new(kind: EffectKind, position: Point) -> Self {
        CollisionEffect { kind, position, remaining_frames: EFFECT_FRAMES }
    }

    pub fn scroll(&mut self, dy: f64) {
        self.position.y += dy;
    }

    /// Count down one frame; `false` once expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_frames = self.remaining_frames.saturating_sub(1);
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.remaining_frames > 0
    }
}
