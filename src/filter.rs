pub const WILDCARD_FILTER: &str = "all";
pub const CARD_STAGGER_MS: u32 = 100;
pub const CARD_HIDE_MS: u32 = 500;

/// A button's filter tag. Only the exact tag `all` is the wildcard; any other tag,
/// including an empty or missing one, selects the cards whose tag is identical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Category(Option<String>),
}

impl ProjectFilter {
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some(WILDCARD_FILTER) => Self::All,
            other => Self::Category(other.map(str::to_string)),
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => category == wanted.as_deref(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTransition {
    Show { delay_ms: u32 },
    Hide { remove_after_ms: u32 },
}

/// Show/hide decision for every card, in card order.
pub fn partition<'a>(
    filter: &ProjectFilter,
    categories: impl IntoIterator<Item = Option<&'a str>>,
) -> Vec<CardTransition> {
    categories
        .into_iter()
        .enumerate()
        .map(|(index, category)| {
            if filter.matches(category) {
                CardTransition::Show {
                    delay_ms: index as u32 * CARD_STAGGER_MS,
                }
            } else {
                CardTransition::Hide {
                    remove_after_ms: CARD_HIDE_MS,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: [Option<&str>; 4] = [Some("web"), Some("ml"), None, Some("web")];

    fn shown(transitions: &[CardTransition]) -> Vec<usize> {
        transitions
            .iter()
            .enumerate()
            .filter(|(_, transition)| matches!(transition, CardTransition::Show { .. }))
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn wildcard_shows_every_card() {
        let transitions = partition(&ProjectFilter::parse(Some("all")), CARDS);

        assert_eq!(shown(&transitions), vec![0, 1, 2, 3]);
        assert_eq!(transitions[3], CardTransition::Show { delay_ms: 300 });
    }

    #[test]
    fn category_shows_only_matching_cards() {
        let transitions = partition(&ProjectFilter::parse(Some("web")), CARDS);

        assert_eq!(shown(&transitions), vec![0, 3]);
        assert_eq!(
            transitions[1],
            CardTransition::Hide {
                remove_after_ms: CARD_HIDE_MS
            }
        );
    }

    #[test]
    fn reselecting_a_filter_is_deterministic() {
        let filter = ProjectFilter::parse(Some("ml"));
        assert_eq!(partition(&filter, CARDS), partition(&filter, CARDS));
    }

    #[test]
    fn unknown_category_hides_everything() {
        let transitions = partition(&ProjectFilter::parse(Some("games")), CARDS);
        assert!(shown(&transitions).is_empty());
    }

    #[test]
    fn empty_and_padded_tags_match_only_identical_cards() {
        let empty = partition(&ProjectFilter::parse(Some("")), [Some("web"), Some(""), Some("ml")]);
        assert_eq!(shown(&empty), vec![1]);

        let padded = partition(&ProjectFilter::parse(Some(" web ")), [Some(" web "), Some("web")]);
        assert_eq!(shown(&padded), vec![0]);
        assert_eq!(
            padded[1],
            CardTransition::Hide {
                remove_after_ms: CARD_HIDE_MS
            }
        );
    }

    #[test]
    fn untagged_button_shows_only_untagged_cards() {
        let transitions = partition(&ProjectFilter::parse(None), CARDS);
        assert_eq!(shown(&transitions), vec![2]);
        assert_eq!(transitions[2], CardTransition::Show { delay_ms: 200 });
    }

    #[test]
    fn wildcard_is_case_sensitive() {
        let transitions = partition(&ProjectFilter::parse(Some("All")), CARDS);
        assert!(shown(&transitions).is_empty());
    }
}
