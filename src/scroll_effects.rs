use crate::{
    dom::{after, set_styles, AppContext, DomError},
    logging::{LogLevel, Logger},
    reveal::{RevealKind, RevealRegistry, Trigger},
};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use web_sys::HtmlElement;

const GROUPS: [(&str, RevealKind); 3] = [
    (".timeline-item", RevealKind::Timeline),
    (".project-card", RevealKind::Project),
    (".skill-category", RevealKind::Skill),
];
const HIDDEN_TRANSFORM: &str = "translateY(30px) scale(0.95)";
const REVEAL_TRANSITION: &str = "all 0.8s cubic-bezier(0.4, 0, 0.2, 1)";

pub fn install(context: &AppContext) -> Result<(), DomError> {
    let mut registry = RevealRegistry::new();
    let mut indices = Vec::new();
    for (selector, kind) in GROUPS {
        indices.extend(registry.register_group(kind, context.query_all(selector)));
    }
    if registry.is_empty() {
        return Err(DomError::EmptySelection(
            ".timeline-item, .project-card, .skill-category".to_string(),
        ));
    }

    let registry = Rc::new(RefCell::new(registry));
    let logger = context.logger();
    for &index in &indices {
        let Some(element) = registry.borrow().get(index).map(|entry| entry.element.clone()) else {
            continue;
        };
        set_styles(&element, &[("opacity", "0"), ("transform", HIDDEN_TRANSFORM)]);

        let registry = Rc::clone(&registry);
        context
            .visibility()
            .watch_once(element, Trigger::Contained, move |_| reveal(&registry, index, logger));
    }

    context.log(LogLevel::Debug, "scroll_effects_registered", json!({ "count": indices.len() }));
    Ok(())
}

fn reveal(registry: &RefCell<RevealRegistry<HtmlElement>>, index: usize, logger: Logger) {
    let mut registry = registry.borrow_mut();
    let Some(entry) = registry.reveal(index) else {
        return;
    };

    let element = entry.element.clone();
    let transform = entry.kind.revealed_transform();
    let delay_ms = entry.delay_ms;
    if registry.pending() == 0 {
        logger.event(LogLevel::Debug, "scroll_effects_complete", json!({}));
    }
    after(delay_ms, move || {
        set_styles(
            &element,
            &[
                ("opacity", "1"),
                ("transform", transform),
                ("transition", REVEAL_TRANSITION),
            ],
        );
    });
}
