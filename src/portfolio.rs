//! Page-wide effects: navigation, scroll-derived styling, cursor, particles, typewriter,
//! project filtering, skill bars, counters and the resize/load handlers.

use crate::{
    counter::{skill_bar_delay_ms, skill_bar_width, CounterAnimation},
    cursor::{cursor_enabled, CursorFollower},
    dom::{after, debounced, set_class, set_style, set_styles, AppContext, DomError, FrameLoop},
    filter::{partition, CardTransition, ProjectFilter},
    logging::LogLevel,
    particles::{particle_budget, ParticleSpec},
    performance::pause_when_offscreen,
    reveal::Trigger,
    scroll::{
        active_section, fragment_target, nav_is_scrolled, parallax_offset, scroll_fraction,
        SectionBounds,
    },
    typewriter::Typewriter,
};
use serde_json::json;
use std::{cell::RefCell, ops::ControlFlow, rc::Rc};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{ErrorEvent, HtmlElement, MouseEvent, ServiceWorkerContainer};

const LOADING_FADE_MS: u32 = 500;
const RESIZE_DEBOUNCE_MS: u32 = 150;
const SERVICE_WORKER_URL: &str = "/sw.js";
const CURSOR_STYLE: &str = "position: fixed; top: 0; left: 0; width: 20px; height: 20px; \
     background: #00D4FF; border-radius: 50%; pointer-events: none; z-index: 9999; \
     mix-blend-mode: difference; transition: transform 0.1s ease; transform: translate(-50%, -50%);";

pub fn install(context: &Rc<AppContext>) {
    context.attempt("loading_screen", install_loading_screen(context));
    context.attempt("navigation", install_navigation(context));
    context.attempt("mobile_menu", install_mobile_menu(context));
    context.attempt("scroll_progress", install_scroll_progress(context));
    context.attempt("nav_state", install_nav_state(context));
    context.attempt("active_section", install_active_section(context));
    context.attempt("parallax", install_parallax(context));

    let cursor = Rc::new(CursorController::default());
    context.attempt("cursor", install_cursor(context, &cursor));

    context.attempt("typewriter", install_typewriter(context));
    context.attempt("smooth_scroll", install_smooth_scroll(context));
    context.attempt("project_filter", install_project_filter(context));
    context.attempt("skill_bars", install_skill_bars(context));
    context.attempt("counters", install_counters(context));
    context.attempt("scroll_animations", install_scroll_animations(context));

    let particles = match ParticleField::mount(context) {
        Ok(field) => Some(field),
        Err(error) => {
            context.attempt("particles", Err(error));
            None
        }
    };

    install_resize(context, cursor, particles);
    install_window_load(context);
    install_error_reporting(context);
}

fn install_loading_screen(context: &AppContext) -> Result<(), DomError> {
    let screen = context.element_by_id("loading-screen")?;

    after(context.config().loading_screen_ms, move || {
        set_class(&screen, "fade-out", true);
        after(LOADING_FADE_MS, move || set_style(&screen, "display", "none"));
    });
    Ok(())
}

fn install_navigation(context: &Rc<AppContext>) -> Result<(), DomError> {
    let links = context.require_all(".nav-link")?;

    for link in &links {
        let siblings = links.clone();
        let clicked = link.clone();
        let page = context.weak();
        context.listen_cancelable(link, "click", move |event| {
            event.prevent_default();
            let Some(context) = page.upgrade() else {
                return;
            };

            for sibling in &siblings {
                set_class(sibling, "active", false);
            }
            set_class(&clicked, "active", true);

            if let Some(id) = clicked.get_attribute("href").as_deref().and_then(fragment_target) {
                context.attempt("navigation", context.scroll_to_section(id));
            }
            close_mobile_menu(&context);
        });
    }
    Ok(())
}

fn close_mobile_menu(context: &AppContext) {
    for id in ["nav-menu", "nav-toggle"] {
        if let Ok(element) = context.element_by_id(id) {
            set_class(&element, "active", false);
        }
    }
}

fn install_mobile_menu(context: &AppContext) -> Result<(), DomError> {
    let toggle = context.element_by_id("nav-toggle")?;
    let menu = context.element_by_id("nav-menu")?;

    let button = toggle.clone();
    context.listen(&toggle, "click", move |_| {
        let _ = button.class_list().toggle("active");
        let _ = menu.class_list().toggle("active");
    });
    Ok(())
}

fn install_smooth_scroll(context: &Rc<AppContext>) -> Result<(), DomError> {
    let anchors = context.require_all("a[href^=\"#\"]:not(.nav-link)")?;

    for anchor in anchors {
        let page = context.weak();
        let link = anchor.clone();
        context.listen_cancelable(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(id) = fragment_target(&href) else {
                return;
            };
            event.prevent_default();

            if let Some(context) = page.upgrade() {
                context.attempt("smooth_scroll", context.scroll_to_section(id));
            }
        });
    }
    Ok(())
}

fn install_scroll_progress(context: &Rc<AppContext>) -> Result<(), DomError> {
    let bar = context.element_by_id("scroll-progress")?;

    let page = context.weak();
    context.listen(context.window(), "scroll", move |_| {
        let Some(context) = page.upgrade() else {
            return;
        };
        let Some(root) = context.document().document_element() else {
            return;
        };

        let fraction = scroll_fraction(
            context.scroll_top(),
            f64::from(root.scroll_height()),
            f64::from(root.client_height()),
        );
        set_style(&bar, "transform", &format!("scaleX({fraction})"));
    });
    Ok(())
}

fn install_nav_state(context: &Rc<AppContext>) -> Result<(), DomError> {
    let nav = context.element_by_id("nav")?;

    let page = context.weak();
    context.listen(context.window(), "scroll", move |_| {
        if let Some(context) = page.upgrade() {
            set_class(&nav, "scrolled", nav_is_scrolled(context.scroll_top()));
        }
    });
    Ok(())
}

fn install_active_section(context: &Rc<AppContext>) -> Result<(), DomError> {
    let links = context.require_all(".nav-link")?;
    let sections = context.require_all("section[id]")?;

    let page = context.weak();
    context.listen(context.window(), "scroll", move |_| {
        let Some(context) = page.upgrade() else {
            return;
        };

        let bounds: Vec<SectionBounds> = sections
            .iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
            .collect();
        let current = active_section(context.scroll_top(), &bounds);

        for link in &links {
            let target = link.get_attribute("href");
            let is_current = target
                .as_deref()
                .and_then(fragment_target)
                .is_some_and(|id| Some(id) == current);
            set_class(link, "active", is_current);
        }
    });
    Ok(())
}

fn install_parallax(context: &Rc<AppContext>) -> Result<(), DomError> {
    let floating = context.require_all(".floating-element")?;

    let page = context.weak();
    context.listen(context.window(), "scroll", move |_| {
        let Some(context) = page.upgrade() else {
            return;
        };
        let scroll_top = context.scroll_top();

        for (index, element) in floating.iter().enumerate() {
            let offset = parallax_offset(scroll_top, index);
            set_style(element, "transform", &format!("translateY({offset}px)"));
        }
    });
    Ok(())
}

/// Owns the synthetic cursor element and its smoothing loop while the viewport is wide
/// enough to show it.
#[derive(Default)]
struct CursorController {
    follower: Rc<RefCell<CursorFollower>>,
    element: RefCell<Option<HtmlElement>>,
    frame_loop: RefCell<Option<FrameLoop>>,
}

impl CursorController {
    fn enabled(context: &AppContext) -> bool {
        cursor_enabled(context.viewport().width, context.config().mobile_breakpoint())
    }

    fn sync(&self, context: &AppContext) -> Result<(), DomError> {
        match (Self::enabled(context), self.is_mounted()) {
            (true, false) => self.mount(context),
            (false, true) => {
                self.unmount(context);
                Ok(())
            }
            (false, false) => {
                set_style(&context.body()?, "cursor", "auto");
                Ok(())
            }
            (true, true) => Ok(()),
        }
    }

    fn is_mounted(&self) -> bool {
        self.element.borrow().is_some()
    }

    fn mount(&self, context: &AppContext) -> Result<(), DomError> {
        self.follower.borrow_mut().reset();
        let cursor = context.create_element("div")?;
        cursor.set_class_name("custom-cursor");
        cursor.set_attribute("style", CURSOR_STYLE)?;
        context.body()?.append_child(&cursor)?;

        let follower = Rc::clone(&self.follower);
        let element = cursor.clone();
        let frame_loop = FrameLoop::start(move |_| {
            if !element.is_connected() {
                return ControlFlow::Break(());
            }
            let (x, y) = follower.borrow_mut().step();
            set_style(&element, "left", &format!("{x}px"));
            set_style(&element, "top", &format!("{y}px"));
            ControlFlow::Continue(())
        });

        *self.element.borrow_mut() = Some(cursor);
        *self.frame_loop.borrow_mut() = Some(frame_loop);
        context.log(LogLevel::Debug, "cursor_mounted", json!({}));
        Ok(())
    }

    fn unmount(&self, context: &AppContext) {
        if let Some(frame_loop) = self.frame_loop.borrow_mut().take() {
            frame_loop.cancel();
        }
        if let Some(element) = self.element.borrow_mut().take() {
            element.remove();
        }
        self.follower.borrow_mut().reset();
        if let Ok(body) = context.body() {
            set_style(&body, "cursor", "auto");
        }
        context.log(LogLevel::Debug, "cursor_unmounted", json!({}));
    }
}

fn install_cursor(
    context: &Rc<AppContext>,
    cursor: &Rc<CursorController>,
) -> Result<(), DomError> {
    if CursorController::enabled(context) {
        cursor.mount(context)?;
    }

    let page = context.weak();
    let follower = Rc::clone(&cursor.follower);
    context.listen(context.document(), "mousemove", move |event| {
        let Some(context) = page.upgrade() else {
            return;
        };
        if !CursorController::enabled(&context) {
            return;
        }
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            follower
                .borrow_mut()
                .aim(f64::from(event.client_x()), f64::from(event.client_y()));
        }
    });

    let root = context
        .document()
        .document_element()
        .ok_or_else(|| DomError::MissingElement("html".to_string()))?;
    for (event, cursor_style) in [("mouseenter", "none"), ("mouseleave", "auto")] {
        let page = context.weak();
        context.listen(&root, event, move |_| {
            let Some(context) = page.upgrade() else {
                return;
            };
            if !CursorController::enabled(&context) {
                return;
            }
            if let Ok(body) = context.body() {
                set_style(&body, "cursor", cursor_style);
            }
        });
    }
    Ok(())
}

fn install_typewriter(context: &AppContext) -> Result<(), DomError> {
    let element = context.element_by_id("typewriter")?;
    element.set_text_content(Some(""));

    let typewriter = Typewriter::new(&context.config().typewriter_text);
    let char_delay_ms = context.config().typewriter_char_delay_ms;
    after(context.config().typewriter_start_delay_ms, move || {
        type_next(element, typewriter, char_delay_ms);
    });
    Ok(())
}

fn type_next(element: HtmlElement, mut typewriter: Typewriter, char_delay_ms: u32) {
    let Some(text) = typewriter.advance() else {
        return;
    };
    element.set_text_content(Some(&text));
    after(char_delay_ms, move || type_next(element, typewriter, char_delay_ms));
}

fn install_project_filter(context: &AppContext) -> Result<(), DomError> {
    let buttons = context.require_all(".filter-btn")?;
    let cards = context.require_all(".project-card")?;
    let selected = Rc::new(RefCell::new(ProjectFilter::All));

    for button in &buttons {
        let siblings = buttons.clone();
        let clicked = button.clone();
        let cards = cards.clone();
        let selected = Rc::clone(&selected);
        context.listen(button, "click", move |_| {
            for sibling in &siblings {
                set_class(sibling, "active", false);
            }
            set_class(&clicked, "active", true);

            let tag = clicked.get_attribute("data-filter");
            let filter = ProjectFilter::parse(tag.as_deref());
            *selected.borrow_mut() = filter.clone();
            apply_filter(&filter, &cards, &selected);
        });
    }
    Ok(())
}

fn apply_filter(
    filter: &ProjectFilter,
    cards: &[HtmlElement],
    selected: &Rc<RefCell<ProjectFilter>>,
) {
    let categories: Vec<Option<String>> = cards
        .iter()
        .map(|card| card.get_attribute("data-category"))
        .collect();
    let transitions = partition(filter, categories.iter().map(Option::as_deref));

    for ((card, category), transition) in cards.iter().zip(categories).zip(transitions) {
        let card = card.clone();
        let selected = Rc::clone(selected);
        match transition {
            CardTransition::Show { delay_ms } => {
                set_styles(
                    &card,
                    &[("display", "block"), ("opacity", "0"), ("transform", "translateY(30px)")],
                );
                after(delay_ms, move || {
                    if !selected.borrow().matches(category.as_deref()) {
                        return;
                    }
                    set_styles(
                        &card,
                        &[
                            ("opacity", "1"),
                            ("transform", "translateY(0)"),
                            ("transition", "all 0.5s ease"),
                        ],
                    );
                });
            }
            CardTransition::Hide { remove_after_ms } => {
                set_styles(&card, &[("opacity", "0"), ("transform", "translateY(-30px)")]);
                after(remove_after_ms, move || {
                    if selected.borrow().matches(category.as_deref()) {
                        return;
                    }
                    set_style(&card, "display", "none");
                });
            }
        }
    }
}

fn install_skill_bars(context: &AppContext) -> Result<(), DomError> {
    let section = context.element_by_id("skills")?;
    let bars = context.require_all(".skill-progress")?;

    context
        .visibility()
        .watch_once(section, Trigger::ratio(0.5), move |_| {
            for (index, bar) in bars.into_iter().enumerate() {
                let width = bar
                    .get_attribute("data-progress")
                    .as_deref()
                    .and_then(skill_bar_width);
                let Some(width) = width else {
                    continue;
                };
                after(skill_bar_delay_ms(index), move || set_style(&bar, "width", &width));
            }
        });
    Ok(())
}

fn install_counters(context: &AppContext) -> Result<(), DomError> {
    let section = context.element_by_id("about")?;
    let counters = context.require_all(".stat-number")?;
    let tasks = context.tasks();

    context
        .visibility()
        .watch_once(section, Trigger::ratio(0.5), move |_| {
            for counter in counters {
                let target = counter
                    .get_attribute("data-target")
                    .as_deref()
                    .and_then(CounterAnimation::parse_target);
                let Some(target) = target else {
                    continue;
                };

                let mut animation = CounterAnimation::new(target);
                tasks.keep(FrameLoop::start(move |_| match animation.tick() {
                    Some(value) => {
                        counter.set_text_content(Some(&value.to_string()));
                        ControlFlow::Continue(())
                    }
                    None => ControlFlow::Break(()),
                }));
            }
        });
    Ok(())
}

fn install_scroll_animations(context: &AppContext) -> Result<(), DomError> {
    let animated = context.require_all("[data-aos]")?;
    let trigger = Trigger::Ratio {
        threshold: 0.1,
        bottom_margin: 50.0,
    };

    for element in animated {
        set_styles(
            &element,
            &[
                ("opacity", "0"),
                ("transform", "translateY(50px)"),
                ("transition", "all 0.6s ease"),
            ],
        );
        context.visibility().watch_once(element, trigger, |element| {
            set_styles(element, &[("opacity", "1"), ("transform", "translateY(0)")]);
        });
    }
    Ok(())
}

/// The decorative particle layer, rebuilt whenever the viewport changes size.
struct ParticleField {
    container: HtmlElement,
}

impl ParticleField {
    fn mount(context: &AppContext) -> Result<Self, DomError> {
        let field = Self {
            container: context.element_by_id("particles")?,
        };
        field.regenerate(context)?;
        Ok(field)
    }

    fn regenerate(&self, context: &AppContext) -> Result<(), DomError> {
        self.container.set_inner_html("");

        let count = particle_budget(
            context.viewport().width,
            context.config().mobile_breakpoint(),
        );
        for _ in 0..count {
            let spec = ParticleSpec::from_samples(js_sys::Math::random);
            let particle = context.create_element("div")?;
            particle.set_class_name("particle");
            particle.set_attribute("style", &spec.style())?;
            self.container.append_child(&particle)?;
            pause_when_offscreen(context, particle);
        }

        context.log(LogLevel::Debug, "particles_generated", json!({ "count": count }));
        Ok(())
    }
}

fn install_resize(
    context: &Rc<AppContext>,
    cursor: Rc<CursorController>,
    particles: Option<ParticleField>,
) {
    let page = context.weak();
    let mut on_resize = debounced(RESIZE_DEBOUNCE_MS, move || {
        let Some(context) = page.upgrade() else {
            return;
        };
        if let Some(particles) = particles.as_ref() {
            context.attempt("particles", particles.regenerate(&context));
        }
        context.attempt("cursor", cursor.sync(&context));
    });
    context.listen(context.window(), "resize", move |_| on_resize());
}

fn install_window_load(context: &Rc<AppContext>) {
    context.on_load(|context| {
        for selector in [".hero-content", ".hero-visual"] {
            if let Ok(element) = context.query(selector) {
                set_styles(&element, &[("opacity", "1"), ("transform", "translateX(0)")]);
            }
        }
        context.visibility().poll();
        register_service_worker(context);
    });
}

fn register_service_worker(context: &AppContext) {
    let navigator: JsValue = context.window().navigator().into();
    let container = js_sys::Reflect::get(&navigator, &JsValue::from_str("serviceWorker"))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
        .and_then(|value| value.dyn_into::<ServiceWorkerContainer>().ok());
    let Some(container) = container else {
        context.log(LogLevel::Debug, "service_worker_unsupported", json!({}));
        return;
    };

    let registration = JsFuture::from(container.register(SERVICE_WORKER_URL));
    let logger = context.logger();
    spawn_local(async move {
        if let Err(error) = registration.await {
            logger.event(
                LogLevel::Debug,
                "service_worker_unavailable",
                json!({ "reason": format!("{error:?}") }),
            );
        }
    });
}

fn install_error_reporting(context: &Rc<AppContext>) {
    let page = context.weak();
    context.listen(context.window(), "error", move |event| {
        let Some(context) = page.upgrade() else {
            return;
        };
        let message = event
            .dyn_ref::<ErrorEvent>()
            .map(ErrorEvent::message)
            .unwrap_or_default();
        context.log(LogLevel::Warn, "page_error", json!({ "message": message }));
    });
}
