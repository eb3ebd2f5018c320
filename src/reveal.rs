//! Visibility rules and one-shot reveal bookkeeping shared by every reveal effect.

use crate::utils::{is_in_viewport, Rect, Viewport};

const CHARACTER_STAGGER_MS: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trigger {
    /// Visible once this fraction of the element intersects the viewport, whose bottom
    /// edge is pulled up by `bottom_margin` pixels.
    Ratio { threshold: f64, bottom_margin: f64 },
    /// Visible only when the element is fully inside the viewport.
    Contained,
}

impl Trigger {
    pub const fn ratio(threshold: f64) -> Self {
        Self::Ratio {
            threshold,
            bottom_margin: 0.0,
        }
    }

    pub fn is_satisfied(&self, rect: &Rect, viewport: Viewport) -> bool {
        match *self {
            Self::Ratio {
                threshold,
                bottom_margin,
            } => match intersection_ratio(rect, viewport, bottom_margin) {
                Some(ratio) => ratio >= threshold,
                None => false,
            },
            Self::Contained => is_in_viewport(rect, viewport),
        }
    }
}

/// Fraction of `rect` inside the (margin-adjusted) viewport, or `None` when the two do
/// not intersect at all. Zero-area elements count as fully visible while they touch it.
pub fn intersection_ratio(rect: &Rect, viewport: Viewport, bottom_margin: f64) -> Option<f64> {
    let root_bottom = viewport.height - bottom_margin;
    let top = rect.top.max(0.0);
    let bottom = rect.bottom.min(root_bottom);
    let left = rect.left.max(0.0);
    let right = rect.right.min(viewport.width);

    if top > bottom || left > right {
        return None;
    }

    let area = rect.width() * rect.height();
    if area <= 0.0 {
        return Some(1.0);
    }

    if bottom - top <= 0.0 || right - left <= 0.0 {
        return None;
    }

    Some(((bottom - top) * (right - left) / area).min(1.0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchMode {
    Once,
    Continuous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Left,
}

/// Per-target state of the visibility notifier.
#[derive(Clone, Copy, Debug)]
pub struct Watcher {
    mode: WatchMode,
    visible: Option<bool>,
    finished: bool,
}

impl Watcher {
    pub fn new(mode: WatchMode) -> Self {
        Self {
            mode,
            visible: None,
            finished: false,
        }
    }

    /// Feeds the latest visibility sample; returns the transition to report, if any.
    pub fn observe(&mut self, visible: bool) -> Option<Transition> {
        if self.finished {
            return None;
        }

        let previous = self.visible.replace(visible);
        match self.mode {
            WatchMode::Once => {
                if visible {
                    self.finished = true;
                    Some(Transition::Entered)
                } else {
                    None
                }
            }
            WatchMode::Continuous => match (previous, visible) {
                (Some(before), now) if before == now => None,
                (_, true) => Some(Transition::Entered),
                (_, false) => Some(Transition::Left),
            },
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    Timeline,
    Project,
    Skill,
}

impl RevealKind {
    pub fn stagger_ms(self) -> u32 {
        match self {
            Self::Timeline => 100,
            Self::Project => 150,
            Self::Skill => 200,
        }
    }

    /// Final transform applied when an element of this kind is revealed.
    pub fn revealed_transform(self) -> &'static str {
        match self {
            Self::Timeline => "translateY(0) scale(1) rotateX(0deg)",
            Self::Project => "translateY(0) scale(1) rotateY(0deg)",
            Self::Skill => "translateY(0) scale(1) scale(1)",
        }
    }
}

#[derive(Debug)]
pub struct Registration<E> {
    pub element: E,
    pub kind: RevealKind,
    pub delay_ms: u32,
    revealed: bool,
}

impl<E> Registration<E> {
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Elements waiting for their one-way hidden-to-shown transition.
#[derive(Debug)]
pub struct RevealRegistry<E> {
    entries: Vec<Registration<E>>,
}

impl<E> Default for RevealRegistry<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> RevealRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group; delays grow with the index inside the group. Returns the
    /// registry index of each appended element.
    pub fn register_group(
        &mut self,
        kind: RevealKind,
        elements: impl IntoIterator<Item = E>,
    ) -> Vec<usize> {
        let mut indices = Vec::new();
        for (position, element) in elements.into_iter().enumerate() {
            indices.push(self.entries.len());
            self.entries.push(Registration {
                element,
                kind,
                delay_ms: position as u32 * kind.stagger_ms(),
                revealed: false,
            });
        }
        indices
    }

    /// Marks the entry revealed. Only the first call for an index returns it.
    pub fn reveal(&mut self, index: usize) -> Option<&Registration<E>> {
        let entry = self.entries.get_mut(index)?;
        if entry.revealed {
            return None;
        }
        entry.revealed = true;
        Some(entry)
    }

    pub fn get(&self, index: usize) -> Option<&Registration<E>> {
        self.entries.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_revealed()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub text: String,
    pub delay_ms: u32,
}

/// Splits heading text into per-character glyphs. Spaces become non-breaking so the
/// inline spans keep their width.
pub fn split_for_reveal(text: &str) -> Vec<Glyph> {
    text.chars()
        .enumerate()
        .map(|(index, character)| Glyph {
            text: if character == ' ' {
                '\u{00A0}'.to_string()
            } else {
                character.to_string()
            },
            delay_ms: index as u32 * CHARACTER_STAGGER_MS,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn rect(top: f64, bottom: f64) -> Rect {
        Rect {
            top,
            left: 0.0,
            bottom,
            right: 400.0,
        }
    }

    #[test]
    fn ratio_reports_the_visible_share() {
        let half_below = rect(600.0, 1000.0);
        let ratio = intersection_ratio(&half_below, VIEWPORT, 0.0).expect("intersects");
        assert!((ratio - 0.5).abs() < f64::EPSILON);

        assert!(intersection_ratio(&rect(900.0, 1000.0), VIEWPORT, 0.0).is_none());
    }

    #[test]
    fn bottom_margin_shrinks_the_root() {
        let sliver = rect(760.0, 860.0);
        assert!(Trigger::ratio(0.1).is_satisfied(&sliver, VIEWPORT));

        let with_margin = Trigger::Ratio {
            threshold: 0.1,
            bottom_margin: 50.0,
        };
        assert!(!with_margin.is_satisfied(&sliver, VIEWPORT));
    }

    #[test]
    fn contained_trigger_rejects_partially_visible_elements() {
        assert!(Trigger::Contained.is_satisfied(&rect(100.0, 700.0), VIEWPORT));
        assert!(!Trigger::Contained.is_satisfied(&rect(100.0, 900.0), VIEWPORT));
    }

    #[test]
    fn once_watcher_fires_a_single_time() {
        let mut watcher = Watcher::new(WatchMode::Once);

        assert_eq!(watcher.observe(false), None);
        assert_eq!(watcher.observe(true), Some(Transition::Entered));
        assert!(watcher.is_finished());
        assert_eq!(watcher.observe(false), None);
        assert_eq!(watcher.observe(true), None);
    }

    #[test]
    fn continuous_watcher_reports_every_change() {
        let mut watcher = Watcher::new(WatchMode::Continuous);

        assert_eq!(watcher.observe(false), Some(Transition::Left));
        assert_eq!(watcher.observe(false), None);
        assert_eq!(watcher.observe(true), Some(Transition::Entered));
        assert_eq!(watcher.observe(true), None);
        assert_eq!(watcher.observe(false), Some(Transition::Left));
        assert!(!watcher.is_finished());
    }

    #[test]
    fn registry_delays_follow_group_position() {
        let mut registry = RevealRegistry::new();
        registry.register_group(RevealKind::Timeline, ["a", "b"]);
        let projects = registry.register_group(RevealKind::Project, ["c", "d", "e"]);

        assert_eq!(projects, vec![2, 3, 4]);
        assert_eq!(registry.get(1).map(|entry| entry.delay_ms), Some(100));
        assert_eq!(registry.get(4).map(|entry| entry.delay_ms), Some(300));
        assert_eq!(registry.get(2).map(|entry| entry.delay_ms), Some(0));
    }

    #[test]
    fn registry_reveals_each_entry_at_most_once() {
        let mut registry = RevealRegistry::new();
        registry.register_group(RevealKind::Skill, ["frontend", "backend"]);

        let first = registry.reveal(1).map(|entry| entry.delay_ms);
        assert_eq!(first, Some(200));
        assert!(registry.reveal(1).is_none());
        assert!(registry.get(1).is_some_and(|entry| entry.is_revealed()));
        assert_eq!(registry.pending(), 1);
        assert!(registry.reveal(9).is_none());
    }

    #[test]
    fn split_keeps_spaces_visible_and_staggers() {
        let glyphs = split_for_reveal("Hi u");

        assert_eq!(glyphs.len(), 4);
        assert_eq!(glyphs[2].text, "\u{00A0}");
        assert_eq!(glyphs[3].delay_ms, 150);
    }
}
