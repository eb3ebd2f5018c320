use crate::{
    dom::{set_style, set_styles, AppContext, DomError},
    reveal::{split_for_reveal, Trigger},
};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const HEADING_SELECTOR: &str = ".section-title, .section-subtitle";

pub fn install(context: &AppContext) -> Result<(), DomError> {
    let headings = context.require_all(HEADING_SELECTOR)?;

    for heading in headings {
        split_heading(context, &heading)?;
        context
            .visibility()
            .watch_once(heading, Trigger::ratio(0.5), show_glyphs);
    }
    Ok(())
}

fn split_heading(context: &AppContext, heading: &HtmlElement) -> Result<(), DomError> {
    let text = heading.text_content().unwrap_or_default();
    heading.set_text_content(Some(""));
    set_style(heading, "opacity", "1");

    for glyph in split_for_reveal(&text) {
        let span = context.create_element("span")?;
        span.set_text_content(Some(&glyph.text));
        let transition = format!("all 0.5s ease {}ms", glyph.delay_ms);
        set_styles(
            &span,
            &[
                ("opacity", "0"),
                ("transform", "translateY(50px)"),
                ("display", "inline-block"),
                ("transition", transition.as_str()),
            ],
        );
        heading.append_child(&span)?;
    }
    Ok(())
}

fn show_glyphs(heading: &HtmlElement) {
    let Ok(spans) = heading.query_selector_all("span") else {
        return;
    };

    for index in 0..spans.length() {
        let Some(span) = spans
            .get(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        set_styles(&span, &[("opacity", "1"), ("transform", "translateY(0)")]);
    }
}
