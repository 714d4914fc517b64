use serde::{Deserialize, Serialize};
use super::error::PageError;

/// Configuration for the page layer, provided by the site.
///
/// Every section falls back to its `Default` when omitted from JSON, so a site
/// config only needs to name what differs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub nav: NavConfig,
    pub scroll: ScrollConfig,
    pub backdrop: BackdropConfig,
    pub parallax: ParallaxConfig,
    pub reveal: RevealConfig,
    pub hover: HoverConfig,
    pub fade: FadeConfig,
    pub cursor: CursorConfig,
    pub contact: ContactConfig,
}

/// Fixed header and mobile menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// The fixed header whose height offsets every scroll target.
    pub header: String,
    /// The menu trigger (hamburger icon).
    pub toggle: String,
    /// The collapsible menu panel.
    pub menu: String,
    /// Class mirrored onto trigger and menu while open.
    pub active_class: String,
    /// In-page links that get coordinated scrolling.
    pub in_page_links: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            header: ".navbar".into(),
            toggle: ".hamburger".into(),
            menu: ".nav-menu".into(),
            active_class: "active".into(),
            in_page_links: "a[href^=\"#\"]".into(),
        }
    }
}

/// Scroll destination arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Extra gap below the header, in px.
    pub padding: f32,
    /// Addressable sections that receive `scroll-margin-top`.
    pub sections: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            padding: 8.0,
            sections: "section[id]".into(),
        }
    }
}

/// Header background swap at a scroll threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Scroll distance (px) past which the header turns opaque.
    pub threshold: f32,
    pub top_background: String,
    pub scrolled_background: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            top_background: "rgba(0, 0, 0, 0.9)".into(),
            scrolled_background: "rgba(0, 0, 0, 0.95)".into(),
        }
    }
}

/// Background-only parallax.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Regions whose background moves.
    pub sections: Vec<String>,
    /// Background offset per scrolled px.
    pub speed: f32,
    /// Zoom gained per scrolled px.
    pub zoom_rate: f32,
    /// Zoom cap (0.15 = 115%).
    pub max_zoom: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            speed: 0.2,
            zoom_rate: 0.0005,
            max_zoom: 0.15,
        }
    }
}

/// One-shot reveal when elements scroll into view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selectors: Vec<String>,
    /// Fraction of the element that must be visible.
    pub threshold: f32,
    /// How far the viewport bottom is pulled in, in px.
    pub bottom_margin: f32,
    /// Starting downward offset, in px.
    pub offset: f32,
    pub transition: String,
}

impl RevealConfig {
    /// Root margin string for an intersection observer.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: Vec::new(),
            threshold: 0.1,
            bottom_margin: 50.0,
            offset: 30.0,
            transition: "opacity 0.6s ease, transform 0.6s ease".into(),
        }
    }
}

/// Pointer-hover lift on cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub selector: String,
    pub lifted: String,
    pub rest: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            selector: String::new(),
            lifted: "translateY(-10px) scale(1.02)".into(),
            rest: "translateY(0) scale(1)".into(),
        }
    }
}

/// Body fade-in between content-ready and full load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    pub body: String,
    pub transition: String,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            body: "body".into(),
            transition: "opacity 0.5s ease".into(),
        }
    }
}

/// Custom pointer-following cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub lead_class: String,
    pub trail_class: String,
    /// Per-frame convergence factor, strictly inside (0, 1).
    pub smoothing: f32,
    /// How far the trail sits behind the tip, in px.
    pub trail_offset: f32,
    pub trail_opacity: f32,
    /// Fallback marker sizes until the host reports real ones.
    pub lead_size: [f32; 2],
    pub trail_size: [f32; 2],
    pub clickable_class: String,
    pub pressed_class: String,
    /// Elements (or ancestors) that count as interactive.
    pub clickable: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            lead_class: "cursor-tri".into(),
            trail_class: "cursor-trail".into(),
            smoothing: 0.18,
            trail_offset: 6.0,
            trail_opacity: 0.35,
            lead_size: [22.0, 16.0],
            trail_size: [34.0, 24.0],
            clickable_class: "cursor-clickable".into(),
            pressed_class: "cursor-down".into(),
            clickable: "a,button,[role=\"button\"],.btn,input[type=\"submit\"],input[type=\"button\"]"
                .into(),
        }
    }
}

/// Mail-client handoff form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form: String,
    /// Destination address. The form handler is disabled while empty.
    pub recipient: String,
    pub subject_prefix: String,
    pub name_field: String,
    pub email_field: String,
    pub message_field: String,
    pub missing_fields_notice: String,
    pub handoff_notice: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form: "#contactForm".into(),
            recipient: String::new(),
            subject_prefix: "Contact Form - Message from ".into(),
            name_field: "input[name=\"name\"]".into(),
            email_field: "input[name=\"email\"]".into(),
            message_field: "textarea[name=\"message\"]".into(),
            missing_fields_notice: "Please fill in all required fields".into(),
            handoff_notice:
                "Opening your email client. Please send the email to complete your message."
                    .into(),
        }
    }
}

impl PageConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a partial JSON config on top of this one and validate the result.
    /// Objects merge key by key; anything else replaces the existing value.
    pub fn overlay_json(&self, json: &str) -> Result<Self, PageError> {
        let mut base = serde_json::to_value(self)?;
        let overlay: serde_json::Value = serde_json::from_str(json)?;
        merge(&mut base, overlay);
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the ranges the controllers depend on.
    pub fn validate(&self) -> Result<(), PageError> {
        let s = self.cursor.smoothing;
        if !(s > 0.0 && s < 1.0) {
            return Err(PageError::InvalidConfig(format!(
                "cursor.smoothing must be strictly between 0 and 1, got {s}"
            )));
        }
        let t = self.reveal.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(PageError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {t}"
            )));
        }
        non_negative("scroll.padding", self.scroll.padding)?;
        non_negative("backdrop.threshold", self.backdrop.threshold)?;
        non_negative("parallax.speed", self.parallax.speed)?;
        non_negative("parallax.zoom_rate", self.parallax.zoom_rate)?;
        non_negative("parallax.max_zoom", self.parallax.max_zoom)?;
        non_negative("reveal.bottom_margin", self.reveal.bottom_margin)?;
        non_negative("reveal.offset", self.reveal.offset)?;
        non_negative("cursor.trail_offset", self.cursor.trail_offset)?;
        Ok(())
    }
}

// NaN fails the range check along with negatives.
fn non_negative(field: &str, value: f32) -> Result<(), PageError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PageError::InvalidConfig(format!(
            "{field} must be a finite, non-negative number, got {value}"
        )))
    }
}

fn merge(base: &mut serde_json::Value, overlay: serde_json::Value) {
    use serde_json::Value;
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
