use crate::{
    config::SiteConfig,
    logging::{LogLevel, Logger},
    observer::VisibilityNotifier,
    scroll::anchor_scroll_target,
    utils::{Rect, Throttle, ThrottleDecision, Viewport, FRAME_INTERVAL_MS},
};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use serde_json::json;
use std::{
    cell::{Cell, RefCell},
    ops::ControlFlow,
    rc::{Rc, Weak},
};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions,
    Window,
};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("window is unavailable")]
    NoWindow,
    #[error("document is unavailable")]
    NoDocument,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("no elements match `{0}`")]
    EmptySelection(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Everything a page effect needs, built once per mounted page. Dropping it removes
/// every listener and cancels every running frame loop.
pub struct AppContext {
    window: Window,
    document: Document,
    config: SiteConfig,
    logger: Logger,
    visibility: Rc<VisibilityNotifier>,
    tasks: Rc<TaskSet>,
    listeners: RefCell<Vec<EventListener>>,
}

impl AppContext {
    pub fn new(config: SiteConfig) -> Result<Rc<Self>, DomError> {
        let window = window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        let logger = Logger::new(config.log_level);

        let context = Rc::new(Self {
            visibility: VisibilityNotifier::new(window.clone()),
            tasks: Rc::new(TaskSet::default()),
            listeners: RefCell::new(Vec::new()),
            window,
            document,
            config,
            logger,
        });
        context.install_visibility_polling();
        Ok(context)
    }

    fn install_visibility_polling(&self) {
        let on_scroll = {
            let visibility = Rc::downgrade(&self.visibility);
            let mut poll = throttled(FRAME_INTERVAL_MS, move || {
                if let Some(visibility) = visibility.upgrade() {
                    visibility.poll();
                }
            });
            move |_: &Event| poll()
        };
        self.listen(&self.window, "scroll", on_scroll);

        let visibility = Rc::downgrade(&self.visibility);
        self.listen(&self.window, "resize", move |_| {
            if let Some(visibility) = visibility.upgrade() {
                visibility.poll();
            }
        });
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn visibility(&self) -> &Rc<VisibilityNotifier> {
        &self.visibility
    }

    pub fn tasks(&self) -> Rc<TaskSet> {
        Rc::clone(&self.tasks)
    }

    pub fn logger(&self) -> Logger {
        self.logger
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        self.logger.event(level, event, fields);
    }

    /// Logs and swallows a feature that could not be set up.
    pub fn attempt(&self, feature: &str, result: Result<(), DomError>) {
        if let Err(error) = result {
            self.log(
                LogLevel::Debug,
                "feature_skipped",
                json!({ "feature": feature, "reason": error.to_string() }),
            );
        }
    }

    pub fn element_by_id(&self, id: &str) -> Result<HtmlElement, DomError> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| DomError::MissingElement(format!("#{id}")))
    }

    pub fn query(&self, selector: &str) -> Result<HtmlElement, DomError> {
        self.document
            .query_selector(selector)?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| DomError::MissingElement(selector.to_string()))
    }

    pub fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        query_all_in(&self.document, selector)
    }

    /// Like `query_all`, but an empty match is an error.
    pub fn require_all(&self, selector: &str) -> Result<Vec<HtmlElement>, DomError> {
        let elements = self.query_all(selector);
        if elements.is_empty() {
            return Err(DomError::EmptySelection(selector.to_string()));
        }
        Ok(elements)
    }

    pub fn create_element(&self, tag: &str) -> Result<HtmlElement, DomError> {
        self.document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::Js(format!("<{tag}> is not an HTML element")))
    }

    pub fn body(&self) -> Result<HtmlElement, DomError> {
        self.document
            .body()
            .ok_or_else(|| DomError::MissingElement("body".to_string()))
    }

    pub fn viewport(&self) -> Viewport {
        viewport_of(&self.window)
    }

    pub fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// Smooth-scrolls so the section with `id` sits just below the navigation bar.
    pub fn scroll_to_section(&self, id: &str) -> Result<(), DomError> {
        let target = self.element_by_id(id)?;
        let nav_height = self
            .element_by_id("nav")
            .ok()
            .map(|nav| f64::from(nav.offset_height()));

        let options = ScrollToOptions::new();
        options.set_top(anchor_scroll_target(f64::from(target.offset_top()), nav_height));
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    pub fn listen<F>(&self, target: &EventTarget, event: &'static str, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        let listener = EventListener::new(target, event, callback);
        self.listeners.borrow_mut().push(listener);
    }

    /// Listener that is allowed to call `prevent_default`.
    pub fn listen_cancelable<F>(&self, target: &EventTarget, event: &'static str, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        let listener = EventListener::new_with_options(
            target,
            event,
            EventListenerOptions::enable_prevent_default(),
            callback,
        );
        self.listeners.borrow_mut().push(listener);
    }

    /// Runs `callback` once the window has loaded, immediately if it already has.
    pub fn on_load<F>(self: &Rc<Self>, callback: F)
    where
        F: FnOnce(&AppContext) + 'static,
    {
        if self.document.ready_state() == "complete" {
            callback(self);
            return;
        }

        let context = Rc::downgrade(self);
        let mut callback = Some(callback);
        self.listen(&self.window, "load", move |_| {
            let (Some(context), Some(callback)) = (context.upgrade(), callback.take()) else {
                return;
            };
            callback(&context);
        });
    }

    pub fn weak(self: &Rc<Self>) -> Weak<Self> {
        Rc::downgrade(self)
    }
}

pub fn query_all_in(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn viewport_of(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    Viewport { width, height }
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top(),
        left: rect.left(),
        bottom: rect.bottom(),
        right: rect.right(),
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in properties {
        let _ = style.set_property(property, value);
    }
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = element.class_list().toggle_with_force(class, enabled);
}

/// Runs `callback` after `delay_ms`; the timer cannot be cancelled.
pub fn after<F>(delay_ms: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    let _ = Timeout::new(delay_ms, callback).forget();
}

/// At most one call per `interval_ms`; calls inside the interval collapse into a single
/// trailing call.
pub fn throttled<F>(interval_ms: f64, callback: F) -> impl FnMut()
where
    F: FnMut() + 'static,
{
    let callback = Rc::new(RefCell::new(callback));
    let throttle = Rc::new(Cell::new(Throttle::new(interval_ms)));
    let mut trailing: Option<Timeout> = None;

    move || {
        let now = js_sys::Date::now();
        match throttle.get().decide(now) {
            ThrottleDecision::RunNow => {
                (callback.borrow_mut())();
                record_run(&throttle, now);
            }
            ThrottleDecision::Defer(wait_ms) => {
                let callback = Rc::clone(&callback);
                let throttle = Rc::clone(&throttle);
                let timeout = Timeout::new(wait_ms.ceil() as u32, move || {
                    (callback.borrow_mut())();
                    record_run(&throttle, js_sys::Date::now());
                });
                // Replacing the handle cancels the previous trailing call.
                drop(trailing.replace(timeout));
            }
        }
    }
}

fn record_run(throttle: &Cell<Throttle>, now: f64) {
    let mut next = throttle.get();
    next.record_run(now);
    throttle.set(next);
}

/// Calls `callback` once no call has happened for `delay_ms`.
pub fn debounced<F>(delay_ms: u32, callback: F) -> impl FnMut()
where
    F: FnMut() + 'static,
{
    let callback = Rc::new(RefCell::new(callback));
    let mut pending: Option<Timeout> = None;

    move || {
        let callback = Rc::clone(&callback);
        let timeout = Timeout::new(delay_ms, move || (callback.borrow_mut())());
        drop(pending.replace(timeout));
    }
}

type FrameStep = Box<dyn FnMut(f64) -> ControlFlow<()>>;

struct LoopState {
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
    step: RefCell<FrameStep>,
}

/// A per-frame task that runs until its step breaks or it is cancelled.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start<F>(step: F) -> Self
    where
        F: FnMut(f64) -> ControlFlow<()> + 'static,
    {
        let state = Rc::new(LoopState {
            frame: RefCell::new(None),
            running: Cell::new(true),
            step: RefCell::new(Box::new(step)),
        });
        schedule_frame(&state);
        Self { state }
    }

    pub fn cancel(&self) {
        self.state.running.set(false);
        self.state.frame.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule_frame(state: &Rc<LoopState>) {
    let next = Rc::clone(state);
    let handle = request_animation_frame(move |timestamp| {
        next.frame.borrow_mut().take();
        if !next.running.get() {
            return;
        }

        let flow = (next.step.borrow_mut())(timestamp);
        if flow.is_break() {
            next.running.set(false);
            return;
        }
        schedule_frame(&next);
    });
    *state.frame.borrow_mut() = Some(handle);
}

/// Keeps frame loops alive for as long as the page context lives.
#[derive(Default)]
pub struct TaskSet {
    loops: RefCell<Vec<FrameLoop>>,
}

impl TaskSet {
    pub fn keep(&self, task: FrameLoop) {
        let mut loops = self.loops.borrow_mut();
        loops.retain(FrameLoop::is_running);
        loops.push(task);
    }
}
