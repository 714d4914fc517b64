// controllers/effects.rs
//
// Scroll- and pointer-driven presentation effects. Every effect here is a pure
// function of its input (scroll position, hover state): applying it twice at
// the same input writes the same styles.

use crate::api::config::{BackdropConfig, FadeConfig, HoverConfig, ParallaxConfig};
use crate::api::types::ElementId;
use crate::host::traits::Host;
use super::query_each;

/// Header background that turns more opaque once the page is scrolled.
pub struct HeaderBackdrop {
    header: ElementId,
    threshold: f32,
    top: String,
    scrolled: String,
}

impl HeaderBackdrop {
    pub fn new(header: ElementId, config: &BackdropConfig) -> Self {
        Self {
            header,
            threshold: config.threshold,
            top: config.top_background.clone(),
            scrolled: config.scrolled_background.clone(),
        }
    }

    /// Background for a scroll position. No hysteresis.
    pub fn background_for(&self, scroll_y: f32) -> &str {
        if scroll_y > self.threshold {
            &self.scrolled
        } else {
            &self.top
        }
    }

    pub fn apply<H: Host>(&self, host: &mut H) {
        let background = self.background_for(host.scroll_y());
        host.set_style(self.header, "background", background);
    }
}

/// Background-only parallax: offset and capped zoom, never layout.
///
/// Only constructed when the device has a fine pointer and motion is allowed.
pub struct Parallax {
    sections: Vec<ElementId>,
    speed: f32,
    zoom_rate: f32,
    max_zoom: f32,
}

impl Parallax {
    pub fn find<H: Host>(host: &mut H, config: &ParallaxConfig) -> Self {
        Self {
            sections: query_each(host, &config.sections),
            speed: config.speed,
            zoom_rate: config.zoom_rate,
            max_zoom: config.max_zoom,
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Vertical background offset in px.
    pub fn offset_for(&self, scroll_y: f32) -> f32 {
        -scroll_y * self.speed
    }

    /// Background scale factor, 1.0 at the top, capped at `1 + max_zoom`.
    pub fn zoom_for(&self, scroll_y: f32) -> f32 {
        1.0 + (scroll_y * self.zoom_rate).min(self.max_zoom)
    }

    pub fn apply<H: Host>(&self, host: &mut H) {
        let scroll_y = host.scroll_y();
        let offset = format!("{}px", self.offset_for(scroll_y));
        let size = format!("{}%", self.zoom_for(scroll_y) * 100.0);
        for &section in &self.sections {
            host.set_style(section, "transform", "");
            host.set_style(section, "background-position-y", &offset);
            host.set_style(section, "background-size", &size);
        }
    }
}

/// Lift cards while the pointer is over them.
pub struct HoverLift {
    cards: Vec<ElementId>,
    lifted: String,
    rest: String,
}

impl HoverLift {
    pub fn find<H: Host>(host: &mut H, config: &HoverConfig) -> Self {
        let cards = if config.selector.is_empty() {
            Vec::new()
        } else {
            host.query_all(&config.selector)
        };
        Self {
            cards,
            lifted: config.lifted.clone(),
            rest: config.rest.clone(),
        }
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    /// Returns false if `target` is not a tracked card.
    pub fn set_hovered<H: Host>(&self, host: &mut H, target: ElementId, hovered: bool) -> bool {
        if !self.cards.contains(&target) {
            return false;
        }
        let transform = if hovered { &self.lifted } else { &self.rest };
        host.set_style(target, "transform", transform);
        true
    }
}

/// Body fade from transparent at content-ready to opaque at load.
pub struct BodyFade {
    body: Option<ElementId>,
    transition: String,
}

impl BodyFade {
    pub fn find<H: Host>(host: &mut H, config: &FadeConfig) -> Self {
        Self {
            body: host.query(&config.body),
            transition: config.transition.clone(),
        }
    }

    pub fn hide<H: Host>(&self, host: &mut H) {
        if let Some(body) = self.body {
            host.set_style(body, "opacity", "0");
            host.set_style(body, "transition", &self.transition);
        }
    }

    pub fn show<H: Host>(&self, host: &mut H) {
        if let Some(body) = self.body {
            host.set_style(body, "opacity", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rect;
    use crate::host::mock::MockHost;

    fn parallax_config() -> ParallaxConfig {
        ParallaxConfig {
            sections: vec![".hero".into(), ".about".into()],
            ..ParallaxConfig::default()
        }
    }

    #[test]
    fn backdrop_switches_past_threshold() {
        let mut host = MockHost::new();
        let header = host.add(".navbar", Rect::default());
        let backdrop = HeaderBackdrop::new(header, &BackdropConfig::default());

        host.scroll_y = 100.0;
        backdrop.apply(&mut host);
        assert_eq!(host.style(header, "background"), Some("rgba(0, 0, 0, 0.9)"));

        host.scroll_y = 101.0;
        backdrop.apply(&mut host);
        assert_eq!(host.style(header, "background"), Some("rgba(0, 0, 0, 0.95)"));

        host.scroll_y = 20.0;
        backdrop.apply(&mut host);
        assert_eq!(host.style(header, "background"), Some("rgba(0, 0, 0, 0.9)"));
    }

    #[test]
    fn backdrop_is_idempotent() {
        let mut host = MockHost::new();
        let header = host.add(".navbar", Rect::default());
        let backdrop = HeaderBackdrop::new(header, &BackdropConfig::default());
        host.scroll_y = 450.0;
        backdrop.apply(&mut host);
        let first = host.style(header, "background").map(str::to_owned);
        backdrop.apply(&mut host);
        assert_eq!(host.style(header, "background").map(str::to_owned), first);
    }

    #[test]
    fn parallax_offset_never_increases_with_scroll() {
        let mut host = MockHost::new();
        let parallax = Parallax::find(&mut host, &parallax_config());
        let mut previous = parallax.offset_for(0.0);
        for step in 1..=500 {
            let offset = parallax.offset_for(step as f32 * 7.0);
            assert!(offset <= previous);
            previous = offset;
        }
    }

    #[test]
    fn parallax_zoom_is_capped_at_115_percent() {
        let mut host = MockHost::new();
        let parallax = Parallax::find(&mut host, &parallax_config());
        assert_eq!(parallax.zoom_for(0.0), 1.0);
        assert!((parallax.zoom_for(100.0) - 1.05).abs() < 1e-6);
        for scroll in [300.0, 1000.0, 50_000.0] {
            assert!(parallax.zoom_for(scroll) <= 1.15 + 1e-6);
        }
    }

    #[test]
    fn parallax_writes_background_only() {
        let mut host = MockHost::new();
        let hero = host.add(".hero", Rect::default());
        let about = host.add(".about", Rect::default());
        let parallax = Parallax::find(&mut host, &parallax_config());
        assert_eq!(parallax.len(), 2);

        host.scroll_y = 200.0;
        parallax.apply(&mut host);
        let number = |value: Option<&str>, unit: &str| -> f32 {
            value.unwrap().strip_suffix(unit).unwrap().parse().unwrap()
        };
        for section in [hero, about] {
            let offset = number(host.style(section, "background-position-y"), "px");
            let size = number(host.style(section, "background-size"), "%");
            assert!((offset + 40.0).abs() < 1e-3, "offset was {offset}");
            assert!((size - 110.0).abs() < 1e-3, "size was {size}");
            assert_eq!(host.style(section, "transform"), Some(""));
        }
    }

    #[test]
    fn hover_lift_only_touches_cards() {
        let mut host = MockHost::new();
        let card = host.add(".track-card", Rect::default());
        let other = host.add(".feature", Rect::default());
        let config = HoverConfig { selector: ".track-card".into(), ..HoverConfig::default() };
        let hover = HoverLift::find(&mut host, &config);

        assert!(hover.set_hovered(&mut host, card, true));
        assert_eq!(host.style(card, "transform"), Some("translateY(-10px) scale(1.02)"));
        assert!(hover.set_hovered(&mut host, card, false));
        assert_eq!(host.style(card, "transform"), Some("translateY(0) scale(1)"));
        assert!(!hover.set_hovered(&mut host, other, true));
        assert_eq!(host.style(other, "transform"), None);
    }

    #[test]
    fn body_fade_hides_then_shows() {
        let mut host = MockHost::new();
        let body = host.add("body", Rect::default());
        let fade = BodyFade::find(&mut host, &FadeConfig::default());
        fade.hide(&mut host);
        assert_eq!(host.style(body, "opacity"), Some("0"));
        assert_eq!(host.style(body, "transition"), Some("opacity 0.5s ease"));
        fade.show(&mut host);
        assert_eq!(host.style(body, "opacity"), Some("1"));
    }
}
