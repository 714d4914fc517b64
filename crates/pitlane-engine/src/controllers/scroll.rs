// controllers/scroll.rs
//
// Scroll destinations that clear the fixed header.
// The header height is measured on every call; the header can wrap or grow
// after fonts load, so a cached value goes stale.

use crate::api::config::ScrollConfig;
use crate::api::types::{ElementId, ScrollMode};
use crate::host::traits::Host;

pub struct ScrollCoordinator {
    header: Option<ElementId>,
    padding: f32,
    sections: String,
}

impl ScrollCoordinator {
    pub fn new(header: Option<ElementId>, config: &ScrollConfig) -> Self {
        Self {
            header,
            padding: config.padding,
            sections: config.sections.clone(),
        }
    }

    /// Current fixed-header height, or 0 with no header.
    pub fn header_offset<H: Host>(&self, host: &H) -> f32 {
        self.header.map(|h| host.rect(h).height).unwrap_or(0.0)
    }

    /// Absolute scroll position that puts `target` just below the header.
    pub fn destination<H: Host>(&self, host: &H, target: ElementId) -> f32 {
        let top_in_document = host.rect(target).top + host.scroll_y();
        top_in_document - self.header_offset(host) - self.padding
    }

    /// Scroll to `target`. An absent target does nothing.
    pub fn scroll_to<H: Host>(&self, host: &mut H, target: Option<ElementId>, mode: ScrollMode) {
        let Some(target) = target else {
            return;
        };
        let y = self.destination(host, target);
        log::debug!("scroll: {:?} -> {y} ({mode:?})", target);
        host.scroll_to(y, mode);
    }

    /// Set `scroll-margin-top` on every section so native fragment jumps
    /// (not routed through here) also clear the header.
    pub fn apply_scroll_margins<H: Host>(&self, host: &mut H) {
        let margin = format!("{}px", self.header_offset(host) + self.padding);
        for section in host.query_all(&self.sections) {
            host.set_style(section, "scroll-margin-top", &margin);
        }
    }

    /// Resolve an in-page `href` to its element.
    /// Bare `#`, empty fragments and non-fragment links resolve to nothing.
    pub fn resolve_fragment<H: Host>(host: &mut H, href: &str) -> Option<ElementId> {
        if !href.starts_with('#') || href.len() < 2 {
            return None;
        }
        host.query(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rect;
    use crate::host::mock::MockHost;

    fn setup(header_height: f32) -> (MockHost, ScrollCoordinator, ElementId) {
        let mut host = MockHost::new();
        let header = host.add(".navbar", Rect::new(0.0, 0.0, 1200.0, header_height));
        let target = host.add("#tracks", Rect::new(0.0, 900.0, 1200.0, 400.0));
        let coordinator = ScrollCoordinator::new(Some(header), &ScrollConfig::default());
        (host, coordinator, target)
    }

    #[test]
    fn destination_subtracts_header_and_padding() {
        let (host, coordinator, target) = setup(72.0);
        assert_eq!(coordinator.destination(&host, target), 900.0 - 72.0 - 8.0);
    }

    #[test]
    fn destination_accounts_for_current_scroll() {
        let (mut host, coordinator, target) = setup(72.0);
        host.scroll_y = 300.0;
        host.rect_mut(target).top = 600.0;
        assert_eq!(coordinator.destination(&host, target), 900.0 - 72.0 - 8.0);
    }

    #[test]
    fn header_height_is_reread_every_call() {
        let (mut host, coordinator, target) = setup(72.0);
        coordinator.scroll_to(&mut host, Some(target), ScrollMode::Animated);

        let header = host.query(".navbar").unwrap();
        host.rect_mut(header).height = 140.0;
        coordinator.scroll_to(&mut host, Some(target), ScrollMode::Animated);

        assert_eq!(
            host.scrolls,
            vec![
                (900.0 - 72.0 - 8.0, ScrollMode::Animated),
                (900.0 - 140.0 - 8.0, ScrollMode::Animated),
            ]
        );
    }

    #[test]
    fn missing_header_means_zero_offset() {
        let mut host = MockHost::new();
        let target = host.add("#about", Rect::new(0.0, 500.0, 100.0, 100.0));
        let coordinator = ScrollCoordinator::new(None, &ScrollConfig::default());
        assert_eq!(coordinator.header_offset(&host), 0.0);
        assert_eq!(coordinator.destination(&host, target), 492.0);
    }

    #[test]
    fn absent_target_is_a_no_op() {
        let (mut host, coordinator, _) = setup(72.0);
        coordinator.scroll_to(&mut host, None, ScrollMode::Instant);
        assert!(host.scrolls.is_empty());
    }

    #[test]
    fn scroll_margins_follow_header_height() {
        let (mut host, coordinator, _) = setup(60.0);
        let a = host.add("section[id]", Rect::default());
        let b = host.add("section[id]", Rect::default());
        coordinator.apply_scroll_margins(&mut host);
        assert_eq!(host.style(a, "scroll-margin-top"), Some("68px"));
        assert_eq!(host.style(b, "scroll-margin-top"), Some("68px"));

        let header = host.query(".navbar").unwrap();
        host.rect_mut(header).height = 90.0;
        coordinator.apply_scroll_margins(&mut host);
        assert_eq!(host.style(a, "scroll-margin-top"), Some("98px"));
    }

    #[test]
    fn bare_hash_does_not_resolve() {
        let (mut host, _, _) = setup(72.0);
        assert_eq!(ScrollCoordinator::resolve_fragment(&mut host, "#"), None);
        assert_eq!(ScrollCoordinator::resolve_fragment(&mut host, ""), None);
        assert_eq!(ScrollCoordinator::resolve_fragment(&mut host, "/about"), None);
        assert_eq!(ScrollCoordinator::resolve_fragment(&mut host, "#missing"), None);
        assert!(ScrollCoordinator::resolve_fragment(&mut host, "#tracks").is_some());
    }
}
