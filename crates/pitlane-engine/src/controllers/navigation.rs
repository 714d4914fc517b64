use crate::api::config::NavConfig;
use crate::api::types::ElementId;
use crate::host::traits::Host;

/// Mobile menu open/closed state, mirrored onto the trigger and the panel.
///
/// Both elements are always written together, so they can never disagree.
pub struct NavigationController {
    toggle: ElementId,
    menu: ElementId,
    links: Vec<ElementId>,
    active_class: String,
    open: bool,
}

impl NavigationController {
    /// Build the controller when both the trigger and the menu exist.
    pub fn find<H: Host>(host: &mut H, config: &NavConfig) -> Option<Self> {
        let toggle = host.query(&config.toggle)?;
        let menu = host.query(&config.menu)?;
        let links = host.query_within(menu, &config.in_page_links);
        Some(Self {
            toggle,
            menu,
            links,
            active_class: config.active_class.clone(),
            open: false,
        })
    }

    pub fn toggle_element(&self) -> ElementId {
        self.toggle
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether `element` is one of the in-page links inside the menu.
    pub fn contains_link(&self, element: ElementId) -> bool {
        self.links.contains(&element)
    }

    pub fn toggle<H: Host>(&mut self, host: &mut H) {
        self.set_open(host, !self.open);
    }

    pub fn close<H: Host>(&mut self, host: &mut H) {
        self.set_open(host, false);
    }

    fn set_open<H: Host>(&mut self, host: &mut H, open: bool) {
        self.open = open;
        host.set_class(self.toggle, &self.active_class, open);
        host.set_class(self.menu, &self.active_class, open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rect;
    use crate::host::mock::MockHost;

    fn setup() -> (MockHost, NavigationController) {
        let mut host = MockHost::new();
        host.add(".hamburger", Rect::default());
        let menu = host.add(".nav-menu", Rect::default());
        host.add_child(menu, "a[href^=\"#\"]", Rect::default());
        let nav = NavigationController::find(&mut host, &NavConfig::default()).unwrap();
        (host, nav)
    }

    #[test]
    fn toggle_mirrors_both_elements() {
        let (mut host, mut nav) = setup();
        nav.toggle(&mut host);
        assert!(nav.is_open());
        assert!(host.has_class(nav.toggle, "active"));
        assert!(host.has_class(nav.menu, "active"));

        nav.toggle(&mut host);
        assert!(!nav.is_open());
        assert!(!host.has_class(nav.toggle, "active"));
        assert!(!host.has_class(nav.menu, "active"));
    }

    #[test]
    fn close_is_idempotent() {
        let (mut host, mut nav) = setup();
        nav.toggle(&mut host);
        nav.close(&mut host);
        nav.close(&mut host);
        assert!(!nav.is_open());
        assert!(!host.has_class(nav.menu, "active"));
    }

    #[test]
    fn collects_menu_links() {
        let (_, nav) = setup();
        assert_eq!(nav.links.len(), 1);
        assert!(nav.contains_link(nav.links[0]));
    }

    #[test]
    fn missing_menu_disables_controller() {
        let mut host = MockHost::new();
        host.add(".hamburger", Rect::default());
        assert!(NavigationController::find(&mut host, &NavConfig::default()).is_none());
    }
}
