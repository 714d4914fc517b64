use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollToOptions, Window,
};
use pitlane_engine::{ElementId, Host, Listener, Rect, ScrollMode};

/// Frame request state the runner acts on after each dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameRequest {
    #[default]
    None,
    Request,
    Cancel,
}

/// Browser implementation of `Host` on top of `web-sys`.
///
/// Elements are interned into a flat registry and addressed by index.
/// Subscriptions (listeners, observations, frame requests) are queued here and
/// drained by `PageRunner`, which owns the JS closures.
pub struct DomHost {
    window: Window,
    document: Document,
    elements: Vec<Element>,
    pending_listeners: Vec<Listener>,
    pending_observe: Vec<ElementId>,
    pending_unobserve: Vec<ElementId>,
    /// Whether the runner holds an `IntersectionObserver`.
    observing: bool,
    frame: FrameRequest,
}

fn warn_js(what: &str, err: JsValue) {
    log::warn!("dom: {what} failed: {err:?}");
}

impl DomHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            elements: Vec::with_capacity(64),
            pending_listeners: Vec::new(),
            pending_observe: Vec::new(),
            pending_unobserve: Vec::new(),
            observing: false,
            frame: FrameRequest::None,
        }
    }

    /// Enable `observe` once the runner has an `IntersectionObserver`.
    pub fn set_observing(&mut self, observing: bool) {
        self.observing = observing;
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Stable id for `element`, registering it on first sight.
    pub fn intern(&mut self, element: Element) -> ElementId {
        if let Some(idx) = self.elements.iter().position(|e| *e == element) {
            return ElementId(idx as u32);
        }
        self.elements.push(element);
        ElementId(self.elements.len() as u32 - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    pub fn take_listeners(&mut self) -> Vec<Listener> {
        std::mem::take(&mut self.pending_listeners)
    }

    pub fn take_observe(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.pending_observe)
    }

    pub fn take_unobserve(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.pending_unobserve)
    }

    pub fn take_frame_request(&mut self) -> FrameRequest {
        std::mem::take(&mut self.frame)
    }

    fn html(&self, id: ElementId) -> Option<&HtmlElement> {
        self.element(id).and_then(|e| e.dyn_ref::<HtmlElement>())
    }

    fn intern_all(&mut self, list: Result<web_sys::NodeList, JsValue>, what: &str) -> Vec<ElementId> {
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                warn_js(what, err);
                return Vec::new();
            }
        };
        let mut ids = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(element) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                ids.push(self.intern(element));
            }
        }
        ids
    }
}

impl Host for DomHost {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|e| self.intern(e)),
            Err(err) => {
                warn_js("query_selector", err);
                None
            }
        }
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let list = self.document.query_selector_all(selector);
        self.intern_all(list, "query_selector_all")
    }

    fn query_within(&mut self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(list) = self.element(scope).map(|e| e.query_selector_all(selector)) else {
            return Vec::new();
        };
        self.intern_all(list, "scoped query_selector_all")
    }

    fn pointer_over(&self, x: f32, y: f32, selector: &str) -> bool {
        let Some(under) = self.document.element_from_point(x, y) else {
            return false;
        };
        match under.closest(selector) {
            Ok(found) => found.is_some(),
            Err(err) => {
                warn_js("closest", err);
                false
            }
        }
    }

    fn create_element(&mut self, class: &str) -> Option<ElementId> {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(err) => {
                warn_js("create_element", err);
                return None;
            }
        };
        element.set_class_name(class);
        let body = self.document.body()?;
        if let Err(err) = body.append_child(&element) {
            warn_js("append_child", err);
            return None;
        }
        Some(self.intern(element))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn rect(&self, element: ElementId) -> Rect {
        match self.element(element) {
            Some(e) => {
                let r = e.get_bounding_client_rect();
                Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
            }
            None => Rect::default(),
        }
    }

    fn viewport(&self) -> Vec2 {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Vec2::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn scroll_to(&mut self, y: f32, mode: ScrollMode) {
        let options = ScrollToOptions::new();
        options.set_top(y as f64);
        options.set_behavior(match mode {
            ScrollMode::Instant => ScrollBehavior::Auto,
            ScrollMode::Animated => ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(html) = self.html(element) {
            if let Err(err) = html.style().set_property(property, value) {
                warn_js("style.setProperty", err);
            }
        }
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        if let Some(e) = self.element(element) {
            if let Err(err) = e.class_list().toggle_with_force(class, enabled) {
                warn_js("classList.toggle", err);
            }
        }
    }

    fn set_root_class(&mut self, class: &str, enabled: bool) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.class_list().toggle_with_force(class, enabled) {
                warn_js("root classList.toggle", err);
            }
        }
    }

    fn media_matches(&self, query: &str) -> bool {
        match self.window.match_media(query) {
            Ok(Some(list)) => list.matches(),
            Ok(None) => false,
            Err(err) => {
                warn_js("matchMedia", err);
                false
            }
        }
    }

    fn location_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn field_value(&mut self, form: ElementId, selector: &str) -> Option<String> {
        let field = self.element(form)?.query_selector(selector).ok()??;
        if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        field.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
    }

    fn reset_form(&mut self, form: ElementId) {
        if let Some(form) = self.element(form).and_then(|e| e.dyn_ref::<HtmlFormElement>()) {
            form.reset();
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            warn_js("location.href", err);
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn_js("alert", err);
        }
    }

    fn listen(&mut self, listener: Listener) {
        self.pending_listeners.push(listener);
    }

    fn observe(&mut self, element: ElementId) -> bool {
        if self.observing {
            self.pending_observe.push(element);
        }
        self.observing
    }

    fn unobserve(&mut self, element: ElementId) {
        self.pending_unobserve.push(element);
    }

    fn request_frame(&mut self) {
        self.frame = FrameRequest::Request;
    }

    fn cancel_frame(&mut self) {
        self.frame = FrameRequest::Cancel;
    }
}
