//! Host surface the engine drives.
//!
//! The engine never touches a DOM directly. Everything it reads (layout,
//! scroll position, media queries, form fields) and everything it writes
//! (styles, classes, scroll requests, frame requests) goes through `Host`.
//! The browser implementation lives in `pitlane-web`; tests use an in-memory
//! mock.
//!
//! Failures inside a host call are the host's to log. The engine treats every
//! missing element as "feature off" and carries on.

use glam::Vec2;
use crate::api::types::{ElementId, Rect, ScrollMode};

/// Event sources the engine subscribes to during setup.
/// The host translates each into `PageEvent`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// `click` on one element.
    Click(ElementId),
    /// `submit` on one form.
    Submit(ElementId),
    /// Pointer enter/leave on one element.
    Hover(ElementId),
    /// Window scroll.
    Scroll,
    /// Window resize.
    Resize,
    /// Pointer movement anywhere in the window.
    PointerMove,
    /// Pointer button down/up anywhere in the window.
    PointerButtons,
    /// Pointer entering/leaving the document.
    PointerPresence,
    /// Window focus/blur.
    WindowFocus,
    /// Document visibility changes.
    Visibility,
}

pub trait Host {
    // -- Element lookup --

    /// First element matching `selector`.
    fn query(&mut self, selector: &str) -> Option<ElementId>;

    /// All elements matching `selector`, in document order.
    fn query_all(&mut self, selector: &str) -> Vec<ElementId>;

    /// All descendants of `scope` matching `selector`.
    fn query_within(&mut self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    /// Whether the topmost element at viewport coordinates, or one of its
    /// ancestors, matches `selector`. Runs on every pointer move, so hosts
    /// should answer without registering the element.
    fn pointer_over(&self, x: f32, y: f32, selector: &str) -> bool;

    /// Create a `div` with `class` and append it to the body.
    fn create_element(&mut self, class: &str) -> Option<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    // -- Layout --

    /// Current bounding box. Always measured, never cached.
    fn rect(&self, element: ElementId) -> Rect;

    fn viewport(&self) -> Vec2;

    fn scroll_y(&self) -> f32;

    fn scroll_to(&mut self, y: f32, mode: ScrollMode);

    // -- Presentation --

    /// Set an inline style property (custom properties included).
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool);

    /// Toggle a class on the document root element.
    fn set_root_class(&mut self, class: &str, enabled: bool);

    // -- Environment --

    fn media_matches(&self, query: &str) -> bool;

    /// Current address fragment including the leading `#`, or empty.
    fn location_hash(&self) -> String;

    // -- Forms & handoff --

    /// Value of the field inside `form` matching `selector`.
    fn field_value(&mut self, form: ElementId, selector: &str) -> Option<String>;

    fn reset_form(&mut self, form: ElementId);

    fn navigate(&mut self, url: &str);

    /// Show a blocking notice to the user.
    fn notify(&mut self, message: &str);

    // -- Subscriptions & scheduling --

    fn listen(&mut self, listener: Listener);

    /// Start watching `element` for viewport intersection. Returns false when
    /// the host cannot report intersections at all.
    fn observe(&mut self, element: ElementId) -> bool;

    fn unobserve(&mut self, element: ElementId);

    /// Ask for `Page::frame` to run before the next repaint.
    fn request_frame(&mut self);

    /// Drop an outstanding frame request.
    fn cancel_frame(&mut self);
}
