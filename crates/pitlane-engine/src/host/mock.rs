//! In-memory `Host` for tests.
//!
//! Selectors are matched by exact string: an element answers to the selectors
//! it was added with. Every write is recorded so tests can assert on it.

use std::collections::{HashMap, HashSet};
use glam::Vec2;
use crate::api::types::{ElementId, Rect, ScrollMode};
use super::traits::{Host, Listener};

#[derive(Debug, Default)]
struct MockElement {
    selectors: Vec<String>,
    parent: Option<ElementId>,
    rect: Rect,
    styles: HashMap<String, String>,
    classes: HashSet<String>,
    attributes: HashMap<String, String>,
    value: String,
    /// Height override while another element carries a class.
    grow: Option<(ElementId, String, f32)>,
}

#[derive(Debug)]
pub struct MockHost {
    elements: Vec<MockElement>,
    pub scroll_y: f32,
    pub viewport: Vec2,
    pub media: HashSet<String>,
    pub hash: String,
    pub element_under_pointer: Option<ElementId>,
    pub observation_available: bool,

    pub scrolls: Vec<(f32, ScrollMode)>,
    pub root_classes: HashSet<String>,
    pub listeners: Vec<Listener>,
    pub observed: Vec<ElementId>,
    pub unobserved: Vec<ElementId>,
    pub notices: Vec<String>,
    pub navigations: Vec<String>,
    pub resets: usize,
    pub frame_requests: usize,
    pub frame_cancels: usize,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            scroll_y: 0.0,
            viewport: Vec2::new(1280.0, 720.0),
            media: HashSet::new(),
            hash: String::new(),
            element_under_pointer: None,
            observation_available: true,
            scrolls: Vec::new(),
            root_classes: HashSet::new(),
            listeners: Vec::new(),
            observed: Vec::new(),
            unobserved: Vec::new(),
            notices: Vec::new(),
            navigations: Vec::new(),
            resets: 0,
            frame_requests: 0,
            frame_cancels: 0,
        }
    }

    /// Add a top-level element matching `selector`.
    pub fn add(&mut self, selector: &str, rect: Rect) -> ElementId {
        self.push(selector, rect, None)
    }

    pub fn add_child(&mut self, parent: ElementId, selector: &str, rect: Rect) -> ElementId {
        self.push(selector, rect, Some(parent))
    }

    /// Add a form field with an initial value.
    pub fn add_field(&mut self, form: ElementId, selector: &str, value: &str) -> ElementId {
        let id = self.push(selector, Rect::default(), Some(form));
        self.el_mut(id).value = value.to_owned();
        id
    }

    pub fn also_matches(&mut self, id: ElementId, selector: &str) {
        self.el_mut(id).selectors.push(selector.to_owned());
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        self.el_mut(id).attributes.insert(name.to_owned(), value.to_owned());
    }

    /// Make `id` report `height` while `watched` has `class`.
    pub fn grow_when_class(&mut self, id: ElementId, watched: ElementId, class: &str, height: f32) {
        self.el_mut(id).grow = Some((watched, class.to_owned(), height));
    }

    pub fn rect_mut(&mut self, id: ElementId) -> &mut Rect {
        &mut self.el_mut(id).rect
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.el(id).styles.get(property).map(String::as_str)
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.el(id).classes.contains(class)
    }

    fn push(&mut self, selector: &str, rect: Rect, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(MockElement {
            selectors: vec![selector.to_owned()],
            parent,
            rect,
            ..MockElement::default()
        });
        id
    }

    fn el(&self, id: ElementId) -> &MockElement {
        &self.elements[id.0 as usize]
    }

    fn el_mut(&mut self, id: ElementId) -> &mut MockElement {
        &mut self.elements[id.0 as usize]
    }

    fn matches(&self, id: ElementId, selector: &str) -> bool {
        self.el(id).selectors.iter().any(|s| s == selector)
    }

    fn is_within(&self, id: ElementId, scope: ElementId) -> bool {
        let mut current = self.el(id).parent;
        while let Some(parent) = current {
            if parent == scope {
                return true;
            }
            current = self.el(parent).parent;
        }
        false
    }

    fn ids(&self) -> impl Iterator<Item = ElementId> {
        (0..self.elements.len() as u32).map(ElementId)
    }
}

impl Host for MockHost {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        self.ids().find(|&id| self.matches(id, selector))
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.ids().filter(|&id| self.matches(id, selector)).collect()
    }

    fn query_within(&mut self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        self.ids()
            .filter(|&id| self.matches(id, selector) && self.is_within(id, scope))
            .collect()
    }

    fn pointer_over(&self, _x: f32, _y: f32, selector: &str) -> bool {
        let mut current = self.element_under_pointer;
        while let Some(id) = current {
            if self.matches(id, selector) {
                return true;
            }
            current = self.el(id).parent;
        }
        false
    }

    fn create_element(&mut self, class: &str) -> Option<ElementId> {
        Some(self.push(&format!(".{class}"), Rect::default(), None))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.el(element).attributes.get(name).cloned()
    }

    fn rect(&self, element: ElementId) -> Rect {
        let el = self.el(element);
        let mut rect = el.rect;
        if let Some((watched, class, height)) = &el.grow {
            if self.has_class(*watched, class) {
                rect.height = *height;
            }
        }
        rect
    }

    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f32, mode: ScrollMode) {
        self.scrolls.push((y, mode));
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        self.el_mut(element).styles.insert(property.to_owned(), value.to_owned());
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        let classes = &mut self.el_mut(element).classes;
        if enabled {
            classes.insert(class.to_owned());
        } else {
            classes.remove(class);
        }
    }

    fn set_root_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.root_classes.insert(class.to_owned());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn media_matches(&self, query: &str) -> bool {
        self.media.contains(query)
    }

    fn location_hash(&self) -> String {
        self.hash.clone()
    }

    fn field_value(&mut self, form: ElementId, selector: &str) -> Option<String> {
        self.query_within(form, selector)
            .first()
            .map(|&id| self.el(id).value.clone())
    }

    fn reset_form(&mut self, form: ElementId) {
        self.resets += 1;
        for id in self.ids().collect::<Vec<_>>() {
            if self.is_within(id, form) {
                self.el_mut(id).value.clear();
            }
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_owned());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn listen(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn observe(&mut self, element: ElementId) -> bool {
        if self.observation_available {
            self.observed.push(element);
        }
        self.observation_available
    }

    fn unobserve(&mut self, element: ElementId) {
        self.unobserved.push(element);
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn cancel_frame(&mut self) {
        self.frame_cancels += 1;
    }
}
