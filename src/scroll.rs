pub const SECTION_ACTIVATION_OFFSET: f64 = 120.0;
pub const NAV_SCROLLED_THRESHOLD: f64 = 100.0;
pub const DEFAULT_NAV_HEIGHT: f64 = 80.0;

const PARALLAX_BASE_SPEED: f64 = 0.2;
const PARALLAX_SPEED_STEP: f64 = 0.1;

/// How far down the document the reader is, in `[0, 1]`.
pub fn scroll_fraction(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }

    (scroll_top / scrollable).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, scroll_top: f64) -> bool {
        let start = self.top - SECTION_ACTIVATION_OFFSET;
        scroll_top >= start && scroll_top < start + self.height
    }
}

/// First section, in document order, whose shifted half-open range holds `scroll_top`.
pub fn active_section(scroll_top: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .find(|section| section.contains(scroll_top))
        .map(|section| section.id.as_str())
}

/// Section id a `#fragment` link points at, if it is a non-empty fragment link.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn parallax_offset(scroll_top: f64, index: usize) -> f64 {
    let speed = PARALLAX_BASE_SPEED + PARALLAX_SPEED_STEP * index as f64;
    -(scroll_top * speed)
}

pub fn nav_is_scrolled(scroll_top: f64) -> bool {
    scroll_top > NAV_SCROLLED_THRESHOLD
}

/// Scroll destination that leaves the target just below the fixed navigation bar.
pub fn anchor_scroll_target(section_top: f64, nav_height: Option<f64>) -> f64 {
    section_top - nav_height.unwrap_or(DEFAULT_NAV_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds {
                id: "home".to_string(),
                top: 0.0,
                height: 800.0,
            },
            SectionBounds {
                id: "about".to_string(),
                top: 800.0,
                height: 600.0,
            },
            SectionBounds {
                id: "projects".to_string(),
                top: 1400.0,
                height: 900.0,
            },
        ]
    }

    #[test]
    fn fraction_spans_zero_to_one() {
        assert_eq!(scroll_fraction(0.0, 3000.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(2200.0, 3000.0, 800.0), 1.0);
        assert_eq!(scroll_fraction(1100.0, 3000.0, 800.0), 0.5);
    }

    #[test]
    fn fraction_is_clamped_and_safe_for_short_documents() {
        assert_eq!(scroll_fraction(0.0, 600.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(50.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(2500.0, 3000.0, 800.0), 1.0);
        assert_eq!(scroll_fraction(-20.0, 3000.0, 800.0), 0.0);
    }

    #[test]
    fn exact_section_boundary_selects_that_section() {
        let sections = sections();

        assert_eq!(active_section(680.0, &sections), Some("about"));
        assert_eq!(active_section(679.9, &sections), Some("home"));
        assert_eq!(active_section(1280.0, &sections), Some("projects"));
    }

    #[test]
    fn positions_outside_every_section_select_none() {
        let sections = sections();

        assert_eq!(active_section(5000.0, &sections), None);
        assert_eq!(active_section(-200.0, &sections), None);
    }

    #[test]
    fn overlapping_sections_prefer_document_order() {
        let overlapping = vec![
            SectionBounds {
                id: "first".to_string(),
                top: 0.0,
                height: 1000.0,
            },
            SectionBounds {
                id: "second".to_string(),
                top: 500.0,
                height: 1000.0,
            },
        ];

        assert_eq!(active_section(600.0, &overlapping), Some("first"));
    }

    #[test]
    fn parallax_speed_grows_with_index() {
        assert!((parallax_offset(100.0, 0) + 20.0).abs() < 1e-9);
        assert!((parallax_offset(100.0, 2) + 40.0).abs() < 1e-9);
        assert_eq!(parallax_offset(0.0, 5), 0.0);
    }

    #[test]
    fn fragment_links_need_an_id() {
        assert_eq!(fragment_target("#contact"), Some("contact"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/resume.pdf"), None);
    }

    #[test]
    fn nav_and_anchor_helpers() {
        assert!(!nav_is_scrolled(100.0));
        assert!(nav_is_scrolled(101.0));
        assert_eq!(anchor_scroll_target(900.0, Some(64.0)), 836.0);
        assert_eq!(anchor_scroll_target(900.0, None), 820.0);
    }
}
