//! Per-session display transform.
//!
//! Flips and quarter-turn rotation applied to the image being shown.
//! Never persisted; survives navigation and is cleared only by the explicit
//! reset action.

/// Orientation applied to the current image before rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayTransform {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Counter-clockwise quarter turns, always in `0..4`.
    pub quarter_turns: u8,
}

impl DisplayTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.flip_vertical = !self.flip_vertical;
    }

    /// One quarter turn counter-clockwise.
    pub fn rotate_ccw(&mut self) {
        self.quarter_turns = (self.quarter_turns + 1) % 4;
    }

    /// One quarter turn clockwise.
    pub fn rotate_cw(&mut self) {
        self.quarter_turns = (self.quarter_turns + 3) % 4;
    }

    /// Back to identity: no flips, no rotation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations_wrap_around() {
        let mut t = DisplayTransform::new();
        for _ in 0..4 {
            t.rotate_ccw();
        }
        assert!(t.is_identity());

        t.rotate_cw();
        assert_eq!(t.quarter_turns, 3);
        t.rotate_ccw();
        assert!(t.is_identity());
    }

    #[test]
    fn test_flips_toggle() {
        let mut t = DisplayTransform::new();
        t.toggle_flip_horizontal();
        t.toggle_flip_vertical();
        assert!(t.flip_horizontal && t.flip_vertical);
        t.toggle_flip_horizontal();
        t.toggle_flip_vertical();
        assert!(t.is_identity());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut t = DisplayTransform::new();
        t.toggle_flip_horizontal();
        t.rotate_cw();
        t.reset();
        assert!(t.is_identity());
    }
}
