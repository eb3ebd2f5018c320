/// Frame-sized throttle interval for scroll polling.
pub const FRAME_INTERVAL_MS: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThrottleDecision {
    RunNow,
    /// Replace any pending trailing call with one after this many milliseconds.
    Defer(f64),
}

/// Leading-edge throttle with a trailing call, keyed on caller-supplied timestamps.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_run: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_run: None,
        }
    }

    pub fn decide(&self, now: f64) -> ThrottleDecision {
        match self.last_run {
            None => ThrottleDecision::RunNow,
            Some(last) if now - last > self.interval_ms => ThrottleDecision::RunNow,
            Some(last) => ThrottleDecision::Defer((self.interval_ms - (now - last)).max(0.0)),
        }
    }

    pub fn record_run(&mut self, now: f64) {
        self.last_run = Some(now);
    }
}

pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// True when `rect` lies entirely inside the viewport.
pub fn is_in_viewport(rect: &Rect, viewport: Viewport) -> bool {
    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom <= viewport.height
        && rect.right <= viewport.width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_runs_immediately() {
        let throttle = Throttle::new(FRAME_INTERVAL_MS);
        assert_eq!(throttle.decide(0.0), ThrottleDecision::RunNow);
    }

    #[test]
    fn calls_inside_the_interval_defer_for_the_remainder() {
        let mut throttle = Throttle::new(16.0);
        throttle.record_run(100.0);

        assert_eq!(throttle.decide(110.0), ThrottleDecision::Defer(6.0));
        assert_eq!(throttle.decide(116.0), ThrottleDecision::Defer(0.0));
        assert_eq!(throttle.decide(117.0), ThrottleDecision::RunNow);
    }

    #[test]
    fn lerp_moves_by_the_factor() {
        assert_eq!(lerp(0.0, 100.0, 0.1), 10.0);
        assert_eq!(lerp(50.0, 50.0, 0.1), 50.0);
        assert_eq!(lerp(10.0, 0.0, 0.5), 5.0);
    }

    #[test]
    fn containment_requires_every_edge_inside() {
        let viewport = Viewport {
            width: 1024.0,
            height: 768.0,
        };
        let inside = Rect {
            top: 10.0,
            left: 10.0,
            bottom: 300.0,
            right: 500.0,
        };
        let clipped_bottom = Rect {
            bottom: 800.0,
            ..inside
        };
        let above = Rect {
            top: -1.0,
            ..inside
        };

        assert!(is_in_viewport(&inside, viewport));
        assert!(!is_in_viewport(&clipped_bottom, viewport));
        assert!(!is_in_viewport(&above, viewport));
    }
}
