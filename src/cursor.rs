use crate::utils::lerp;

pub const CURSOR_SMOOTHING: f64 = 0.1;

/// The follower only exists on viewports wider than the mobile breakpoint.
pub fn cursor_enabled(viewport_width: f64, breakpoint: f64) -> bool {
    viewport_width > breakpoint
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorFollower {
    pub current: (f64, f64),
    pub target: (f64, f64),
}

impl CursorFollower {
    /// Forgets both positions; a freshly mounted follower starts at the origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn aim(&mut self, x: f64, y: f64) {
        self.target = (x, y);
    }

    /// Advances one frame and returns the position to draw.
    pub fn step(&mut self) -> (f64, f64) {
        self.current = (
            lerp(self.current.0, self.target.0, CURSOR_SMOOTHING),
            lerp(self.current.1, self.target.1, CURSOR_SMOOTHING),
        );
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_is_disabled_up_to_the_breakpoint() {
        assert!(!cursor_enabled(320.0, 768.0));
        assert!(!cursor_enabled(768.0, 768.0));
        assert!(cursor_enabled(769.0, 768.0));
    }

    #[test]
    fn each_frame_closes_a_tenth_of_the_gap() {
        let mut follower = CursorFollower::default();
        follower.aim(100.0, -50.0);

        let (x, y) = follower.step();
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y + 5.0).abs() < 1e-9);

        let (x, y) = follower.step();
        assert!((x - 19.0).abs() < 1e-9);
        assert!((y + 9.5).abs() < 1e-9);
    }

    #[test]
    fn follower_converges_on_a_still_target() {
        let mut follower = CursorFollower::default();
        follower.aim(400.0, 300.0);

        for _ in 0..200 {
            follower.step();
        }

        assert!((follower.current.0 - 400.0).abs() < 0.01);
        assert!((follower.current.1 - 300.0).abs() < 0.01);
    }

    #[test]
    fn reset_starts_the_next_session_from_the_origin() {
        let mut follower = CursorFollower::default();
        follower.aim(900.0, 400.0);
        for _ in 0..200 {
            follower.step();
        }

        follower.reset();
        assert_eq!(follower, CursorFollower::default());

        follower.aim(100.0, 0.0);
        let (x, y) = follower.step();
        assert!((x - 10.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }
}
