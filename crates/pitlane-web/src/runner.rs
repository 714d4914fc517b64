use std::cell::RefCell;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};
use pitlane_engine::{Listener, Page, PageConfig, PageEvent};
use crate::dom::{DomHost, FrameRequest};

thread_local! {
    static RUNNER: RefCell<Option<PageRunner>> = RefCell::new(None);
    static FRAME_LOOP: RefCell<Option<FrameLoop>> = RefCell::new(None);
}

/// Run `f` against the installed runner.
///
/// Returns `None` when no runner is installed or it is already borrowed.
/// The second case happens when the browser delivers an event re-entrantly
/// (focus/blur while `alert` is open); such events are dropped.
fn with_runner<R>(f: impl FnOnce(&mut PageRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

fn with_frame_loop<R>(f: impl FnOnce(&mut FrameLoop) -> R) -> Option<R> {
    FRAME_LOOP.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

/// Owns the page and every JS closure handed to the browser.
///
/// wasm-bindgen closures must outlive their registration, so they live here
/// for the page's lifetime (nothing is ever torn down before unload).
pub struct PageRunner {
    page: Page<DomHost>,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
    observer: Option<IntersectionObserver>,
    _observer_callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// The `requestAnimationFrame` callback and its outstanding handle.
///
/// Lives outside `RUNNER` so a frame that fires while the runner is busy can
/// still spend its handle and ask again.
struct FrameLoop {
    callback: Closure<dyn FnMut(f64)>,
    slot: FrameSlot,
}

impl FrameLoop {
    fn request(&mut self, window: &Window) {
        if self.slot.is_outstanding() {
            return;
        }
        match window.request_animation_frame(self.callback.as_ref().unchecked_ref()) {
            Ok(handle) => self.slot.requested(handle),
            Err(err) => log::warn!("runner: requestAnimationFrame failed: {err:?}"),
        }
    }

    fn cancel(&mut self, window: &Window) {
        if let Some(handle) = self.slot.take() {
            if let Err(err) = window.cancel_animation_frame(handle) {
                log::warn!("runner: cancelAnimationFrame failed: {err:?}");
            }
        }
    }
}

/// At most one outstanding animation-frame handle.
#[derive(Debug, Default)]
struct FrameSlot {
    handle: Option<i32>,
}

impl FrameSlot {
    fn is_outstanding(&self) -> bool {
        self.handle.is_some()
    }

    fn requested(&mut self, handle: i32) {
        self.handle = Some(handle);
    }

    /// The browser ran the callback, so the handle is spent.
    fn fired(&mut self) {
        self.handle = None;
    }

    /// Remove the outstanding handle for cancellation.
    fn take(&mut self) -> Option<i32> {
        self.handle.take()
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the page for `config` and hook it to the document lifecycle.
///
/// Fails without touching the document if `config` is out of range.
pub fn start(config: PageConfig, name: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let installed = RUNNER.with(|cell| cell.borrow().is_some());
    if installed {
        return Err(JsValue::from_str("page already initialized"));
    }

    let host = DomHost::new(window.clone(), document.clone());
    let mut page = Page::new(host, config).map_err(js_error)?;

    let observer_callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, _observer: IntersectionObserver| on_intersections(entries),
    );
    let reveal = &page.config().reveal;
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(reveal.threshold as f64));
    init.set_root_margin(&reveal.root_margin());
    let observer = match IntersectionObserver::new_with_options(
        observer_callback.as_ref().unchecked_ref(),
        &init,
    ) {
        Ok(observer) => Some(observer),
        Err(err) => {
            log::warn!("{name}: IntersectionObserver unavailable, reveal disabled: {err:?}");
            None
        }
    };
    page.host_mut().set_observing(observer.is_some());

    let runner = PageRunner {
        page,
        listeners: Vec::new(),
        observer,
        _observer_callback: observer_callback,
    };
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    FRAME_LOOP.with(|cell| {
        *cell.borrow_mut() = Some(FrameLoop {
            callback: Closure::<dyn FnMut(f64)>::new(|_timestamp: f64| run_frame()),
            slot: FrameSlot::default(),
        });
    });

    let ready_state = document.ready_state();
    with_runner(|r| {
        if ready_state == "loading" {
            r.attach(document.clone().into(), "DOMContentLoaded", false, |_| {
                dispatch(PageEvent::ContentReady, None)
            });
        }
        if ready_state != "complete" {
            r.attach(window.clone().into(), "load", false, |_| {
                dispatch(PageEvent::Loaded, None)
            });
        }
    });
    if ready_state != "loading" {
        dispatch(PageEvent::ContentReady, None);
    }
    if ready_state == "complete" {
        dispatch(PageEvent::Loaded, None);
    }

    log::info!("{name}: initialized");
    Ok(())
}

/// Feed one event to the page and apply the outcome to the native event.
pub fn dispatch(event: PageEvent, native: Option<&Event>) {
    let outcome = with_runner(|r| {
        let outcome = r.page.handle(event);
        r.flush();
        outcome
    });
    match outcome {
        Some(outcome) if outcome.prevent_default => {
            if let Some(native) = native {
                native.prevent_default();
            }
        }
        Some(_) => {}
        None => log::debug!("runner: busy, dropped {event:?}"),
    }
}

fn run_frame() {
    with_frame_loop(|l| l.slot.fired());
    let ran = with_runner(|r| {
        r.page.frame();
        r.flush();
    });
    if ran.is_none() {
        // The page still counts this frame as pending, so it must run later.
        log::debug!("runner: busy, frame retried");
        if let Some(window) = web_sys::window() {
            with_frame_loop(|l| l.request(&window));
        }
    }
}

fn on_intersections(entries: Array) {
    let reports: Vec<_> = entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .map(|entry| (entry.target(), entry.is_intersecting()))
        .collect();

    with_runner(|r| {
        for (target, is_intersecting) in reports {
            let target = r.page.host_mut().intern(target);
            r.page.handle(PageEvent::Intersection { target, is_intersecting });
        }
        r.flush();
    });
}

impl PageRunner {
    /// Apply whatever the page queued on its host during the last call:
    /// new listeners, observations and frame requests.
    fn flush(&mut self) {
        for listener in self.page.host_mut().take_listeners() {
            self.install(listener);
        }

        let observe = self.page.host_mut().take_observe();
        let unobserve = self.page.host_mut().take_unobserve();
        if let Some(observer) = &self.observer {
            for id in observe {
                if let Some(element) = self.page.host().element(id) {
                    observer.observe(element);
                }
            }
            for id in unobserve {
                if let Some(element) = self.page.host().element(id) {
                    observer.unobserve(element);
                }
            }
        }

        let request = self.page.host_mut().take_frame_request();
        let window = self.page.host().window();
        match request {
            FrameRequest::Request => {
                with_frame_loop(|l| l.request(window));
            }
            FrameRequest::Cancel => {
                with_frame_loop(|l| l.cancel(window));
            }
            FrameRequest::None => {}
        }
    }

    fn install(&mut self, listener: Listener) {
        let window: EventTarget = self.page.host().window().clone().into();
        let document: EventTarget = self.page.host().document().clone().into();

        match listener {
            Listener::Click(id) => {
                if let Some(target) = self.target(id) {
                    self.attach(target, "click", false, move |e| {
                        dispatch(PageEvent::Click { target: id }, Some(&e))
                    });
                }
            }
            Listener::Submit(id) => {
                if let Some(target) = self.target(id) {
                    self.attach(target, "submit", false, move |e| {
                        dispatch(PageEvent::Submit { form: id }, Some(&e))
                    });
                }
            }
            Listener::Hover(id) => {
                if let Some(target) = self.target(id) {
                    self.attach(target.clone(), "mouseenter", true, move |_| {
                        dispatch(PageEvent::HoverEnter { target: id }, None)
                    });
                    self.attach(target, "mouseleave", true, move |_| {
                        dispatch(PageEvent::HoverLeave { target: id }, None)
                    });
                }
            }
            Listener::Scroll => {
                self.attach(window, "scroll", true, |_| dispatch(PageEvent::Scroll, None));
            }
            Listener::Resize => {
                self.attach(window, "resize", true, |_| dispatch(PageEvent::Resize, None));
            }
            Listener::PointerMove => {
                self.attach(window, "mousemove", true, |e| {
                    if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                        let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
                        dispatch(PageEvent::PointerMove { x, y }, None);
                    }
                });
            }
            Listener::PointerButtons => {
                self.attach(window.clone(), "mousedown", true, |_| {
                    dispatch(PageEvent::PointerDown, None)
                });
                self.attach(window, "mouseup", true, |_| dispatch(PageEvent::PointerUp, None));
            }
            Listener::PointerPresence => {
                self.attach(document.clone(), "mouseenter", true, |_| {
                    dispatch(PageEvent::PointerEnter, None)
                });
                self.attach(document, "mouseleave", true, |_| {
                    dispatch(PageEvent::PointerLeave, None)
                });
            }
            Listener::WindowFocus => {
                self.attach(window.clone(), "focus", true, |_| {
                    dispatch(PageEvent::WindowFocus, None)
                });
                self.attach(window, "blur", true, |_| dispatch(PageEvent::WindowBlur, None));
            }
            Listener::Visibility => {
                let doc = self.page.host().document().clone();
                self.attach(document, "visibilitychange", true, move |_| {
                    dispatch(PageEvent::VisibilityChange { hidden: doc.hidden() }, None)
                });
            }
        }
    }

    fn target(&self, id: pitlane_engine::ElementId) -> Option<EventTarget> {
        self.page.host().element(id).map(|e| e.clone().into())
    }

    fn attach(
        &mut self,
        target: EventTarget,
        event: &str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let result = if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        };
        match result {
            Ok(()) => self.listeners.push(closure),
            Err(err) => log::warn!("runner: addEventListener({event}) failed: {err:?}"),
        }
    }
}
