const NARROW_PARTICLE_COUNT: usize = 30;
const WIDE_PARTICLE_COUNT: usize = 50;

pub fn particle_budget(viewport_width: f64, breakpoint: f64) -> usize {
    if viewport_width <= breakpoint {
        NARROW_PARTICLE_COUNT
    } else {
        WIDE_PARTICLE_COUNT
    }
}

/// Placement and timing of one decorative particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    pub left_percent: f64,
    pub top_percent: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl ParticleSpec {
    /// Builds a particle from uniform samples in `[0, 1)`.
    pub fn from_samples(mut sample: impl FnMut() -> f64) -> Self {
        let left_percent = sample() * 100.0;
        let top_percent = sample() * 100.0;
        let duration_s = 3.0 + sample() * 4.0;
        let delay_s = sample() * 2.0;
        let size_px = 2.0 + sample() * 4.0;

        Self {
            left_percent,
            top_percent,
            size_px,
            duration_s,
            delay_s,
        }
    }

    pub fn style(&self) -> String {
        format!(
            "left: {:.3}%; top: {:.3}%; width: {:.2}px; height: {:.2}px; animation-duration: {:.3}s; animation-delay: {:.3}s;",
            self.left_percent,
            self.top_percent,
            self.size_px,
            self.size_px,
            self.duration_s,
            self.delay_s
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_depends_on_viewport_width() {
        assert_eq!(particle_budget(375.0, 768.0), 30);
        assert_eq!(particle_budget(768.0, 768.0), 30);
        assert_eq!(particle_budget(769.0, 768.0), 50);
        assert_eq!(particle_budget(1920.0, 768.0), 50);
    }

    #[test]
    fn samples_map_onto_the_documented_ranges() {
        let low = ParticleSpec::from_samples(|| 0.0);
        assert_eq!(low.size_px, 2.0);
        assert_eq!(low.duration_s, 3.0);
        assert_eq!(low.delay_s, 0.0);

        let high = ParticleSpec::from_samples(|| 0.999);
        assert!(high.left_percent < 100.0);
        assert!(high.size_px < 6.0);
        assert!(high.duration_s < 7.0);
        assert!(high.delay_s < 2.0);
    }

    #[test]
    fn style_sets_square_size() {
        let spec = ParticleSpec::from_samples(|| 0.5);
        let style = spec.style();

        assert!(style.contains("width: 4.00px"));
        assert!(style.contains("height: 4.00px"));
        assert!(style.contains("animation-duration: 5.000s"));
    }
}
