use std::collections::HashMap;
use crate::api::config::RevealConfig;
use crate::api::types::ElementId;
use crate::host::traits::Host;
use super::query_each;

/// Per-element reveal progress. Only ever moves Hidden -> Shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealState {
    Hidden,
    Shown,
}

/// One-shot appear-on-scroll transitions.
///
/// Elements start transparent and shifted down. The first intersection report
/// shows them and stops observing; scrolling away never hides them again.
pub struct RevealOnView {
    states: HashMap<ElementId, RevealState>,
    offset: f32,
    transition: String,
}

impl RevealOnView {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            states: HashMap::new(),
            offset: config.offset,
            transition: config.transition.clone(),
        }
    }

    /// Start observing every matching element and hide it.
    ///
    /// Elements are only hidden once the host has accepted the observation;
    /// without intersection reports they would never come back.
    pub fn register<H: Host>(&mut self, host: &mut H, config: &RevealConfig) {
        let hidden_transform = format!("translateY({}px)", self.offset);
        for element in query_each(host, &config.selectors) {
            if !host.observe(element) {
                log::warn!("reveal: intersection reports unavailable, content left visible");
                return;
            }
            host.set_style(element, "opacity", "0");
            host.set_style(element, "transform", &hidden_transform);
            host.set_style(element, "transition", &self.transition);
            self.states.insert(element, RevealState::Hidden);
        }
    }

    /// Handle an intersection report. Returns true if this report revealed it.
    pub fn on_intersection<H: Host>(
        &mut self,
        host: &mut H,
        target: ElementId,
        is_intersecting: bool,
    ) -> bool {
        if !is_intersecting {
            return false;
        }
        match self.states.get_mut(&target) {
            Some(state) if *state == RevealState::Hidden => {
                *state = RevealState::Shown;
                host.set_style(target, "opacity", "1");
                host.set_style(target, "transform", "translateY(0)");
                host.unobserve(target);
                true
            }
            _ => false,
        }
    }

    pub fn is_shown(&self, element: ElementId) -> bool {
        self.states.get(&element) == Some(&RevealState::Shown)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rect;
    use crate::host::mock::MockHost;

    fn setup() -> (MockHost, RevealOnView, ElementId) {
        let mut host = MockHost::new();
        let card = host.add(".track-card", Rect::default());
        host.add(".feature", Rect::default());
        let config = RevealConfig {
            selectors: vec![".track-card".into(), ".feature".into()],
            ..RevealConfig::default()
        };
        let mut reveal = RevealOnView::new(&config);
        reveal.register(&mut host, &config);
        (host, reveal, card)
    }

    #[test]
    fn registered_elements_start_hidden_and_observed() {
        let (host, reveal, card) = setup();
        assert_eq!(reveal.len(), 2);
        assert_eq!(host.style(card, "opacity"), Some("0"));
        assert_eq!(host.style(card, "transform"), Some("translateY(30px)"));
        assert_eq!(host.observed.len(), 2);
    }

    #[test]
    fn reveals_once_and_never_rehides() {
        let (mut host, mut reveal, card) = setup();
        assert!(!reveal.on_intersection(&mut host, card, false));
        assert_eq!(host.style(card, "opacity"), Some("0"));

        assert!(reveal.on_intersection(&mut host, card, true));
        assert!(reveal.is_shown(card));
        assert_eq!(host.style(card, "opacity"), Some("1"));
        assert_eq!(host.style(card, "transform"), Some("translateY(0)"));
        assert_eq!(host.unobserved, vec![card]);

        // Scrolling back out and in again changes nothing.
        assert!(!reveal.on_intersection(&mut host, card, false));
        assert!(!reveal.on_intersection(&mut host, card, true));
        assert_eq!(host.style(card, "opacity"), Some("1"));
        assert_eq!(host.unobserved.len(), 1);
    }

    #[test]
    fn nothing_is_hidden_without_intersection_reports() {
        let mut host = MockHost::new();
        host.observation_available = false;
        let card = host.add(".track-card", Rect::default());
        let config = RevealConfig {
            selectors: vec![".track-card".into()],
            ..RevealConfig::default()
        };
        let mut reveal = RevealOnView::new(&config);
        reveal.register(&mut host, &config);

        assert!(reveal.is_empty());
        assert_eq!(host.style(card, "opacity"), None);
        assert_eq!(host.style(card, "transform"), None);
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let (mut host, mut reveal, _) = setup();
        let stray = host.add(".other", Rect::default());
        assert!(!reveal.on_intersection(&mut host, stray, true));
        assert_eq!(host.style(stray, "opacity"), None);
    }
}
