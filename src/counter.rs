const COUNTER_STEPS: f64 = 100.0;
const SKILL_BAR_STAGGER_MS: u32 = 200;

/// Counts from zero up to `target` in a fixed number of ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            increment: target as f64 / COUNTER_STEPS,
            current: 0.0,
            finished: false,
        }
    }

    /// Parses a `data-target` attribute the way the counters expect it.
    pub fn parse_target(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok()
    }

    /// Next value to display; `None` once the target has been shown.
    pub fn tick(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }

        if self.current < self.target as f64 {
            self.current += self.increment;
            Some(self.current.ceil() as i64)
        } else {
            self.finished = true;
            Some(self.target)
        }
    }
}

pub fn skill_bar_delay_ms(index: usize) -> u32 {
    index as u32 * SKILL_BAR_STAGGER_MS
}

/// Width for a `data-progress` value, limited to `0..=100` percent.
pub fn skill_bar_width(raw_progress: &str) -> Option<String> {
    let progress = raw_progress.trim().parse::<f64>().ok()?;
    if !progress.is_finite() {
        return None;
    }
    Some(format!("{}%", progress.clamp(0.0, 100.0)))
}
