use crate::{
    dom::{element_rect, viewport_of},
    reveal::{Transition, Trigger, WatchMode, Watcher},
};
use std::{cell::RefCell, rc::Rc};
use web_sys::{HtmlElement, Window};

type VisibilityCallback = Box<dyn FnMut(&HtmlElement, Transition)>;

struct Watch {
    element: HtmlElement,
    trigger: Trigger,
    watcher: Watcher,
    callback: VisibilityCallback,
}

/// Single source of "element entered/left the viewport" notifications. Every watch is
/// re-evaluated on `poll`, which the page context drives from scroll, resize and load.
pub struct VisibilityNotifier {
    window: Window,
    watches: RefCell<Vec<Watch>>,
    incoming: RefCell<Vec<Watch>>,
}

impl VisibilityNotifier {
    pub fn new(window: Window) -> Rc<Self> {
        Rc::new(Self {
            window,
            watches: RefCell::new(Vec::new()),
            incoming: RefCell::new(Vec::new()),
        })
    }

    pub fn watch<F>(&self, element: HtmlElement, trigger: Trigger, mode: WatchMode, callback: F)
    where
        F: FnMut(&HtmlElement, Transition) + 'static,
    {
        self.incoming.borrow_mut().push(Watch {
            element,
            trigger,
            watcher: Watcher::new(mode),
            callback: Box::new(callback),
        });
    }

    /// Fires `callback` the first time `element` becomes visible, then forgets it.
    pub fn watch_once<F>(&self, element: HtmlElement, trigger: Trigger, callback: F)
    where
        F: FnOnce(&HtmlElement) + 'static,
    {
        let mut callback = Some(callback);
        self.watch(element, trigger, WatchMode::Once, move |element, transition| {
            if transition == Transition::Entered {
                if let Some(callback) = callback.take() {
                    callback(element);
                }
            }
        });
    }

    pub fn poll(&self) {
        let viewport = viewport_of(&self.window);
        let mut watches = self.watches.borrow_mut();
        watches.append(&mut self.incoming.borrow_mut());

        // Callbacks may register new watches; those land in `incoming` for the next poll.
        watches.retain_mut(|watch| {
            if !watch.element.is_connected() {
                return false;
            }

            let visible = watch
                .trigger
                .is_satisfied(&element_rect(&watch.element), viewport);
            if let Some(transition) = watch.watcher.observe(visible) {
                (watch.callback)(&watch.element, transition);
            }
            !watch.watcher.is_finished()
        });
    }
}
