use crate::{
    dom::{set_style, AppContext, DomError},
    logging::LogLevel,
    reveal::{Transition, Trigger, WatchMode},
};
use serde_json::json;
use web_sys::{HtmlElement, Window};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const REDUCED_MOTION_CSS: &str = "*, *::before, *::after { \
     animation-duration: 0.01ms !important; \
     animation-iteration-count: 1 !important; \
     transition-duration: 0.01ms !important; }";

pub fn install(context: &AppContext) {
    if prefers_reduced_motion(context.window()) {
        context.attempt("reduced_motion", disable_animations(context));
    }
    lazy_load_images(context);

    for element in context.query_all(".floating-element") {
        pause_when_offscreen(context, element);
    }
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn disable_animations(context: &AppContext) -> Result<(), DomError> {
    let style = context.document().create_element("style")?;
    style.set_text_content(Some(REDUCED_MOTION_CSS));
    context
        .document()
        .head()
        .ok_or_else(|| DomError::MissingElement("head".to_string()))?
        .append_child(&style)?;

    context.log(LogLevel::Info, "reduced_motion_enabled", json!({}));
    Ok(())
}

fn lazy_load_images(context: &AppContext) {
    for image in context.query_all("img") {
        let _ = image.set_attribute("loading", "lazy");
    }
}

/// Pauses the element's CSS animation while it is scrolled out of view.
pub fn pause_when_offscreen(context: &AppContext, element: HtmlElement) {
    context.visibility().watch(
        element,
        Trigger::ratio(0.0),
        WatchMode::Continuous,
        |element, transition| {
            let state = match transition {
                Transition::Entered => "running",
                Transition::Left => "paused",
            };
            set_style(element, "animation-play-state", state);
        },
    );
}
