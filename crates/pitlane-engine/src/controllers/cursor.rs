// controllers/cursor.rs
//
// Custom pointer-following cursor: a lead marker that snaps to the pointer and
// a trail marker smoothed toward it every frame.
//
// Only built on devices without a coarse pointer. The per-frame smoothing runs
// as the page's repeating frame task; `Page` pauses it while the document is
// hidden.

use glam::Vec2;
use crate::api::config::CursorConfig;
use crate::api::types::ElementId;
use crate::host::traits::Host;
use crate::math::lerp_vec2;

/// Pointer position and its smoothed follower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Last reported pointer position. Only pointer moves change it.
    pub actual: Vec2,
    /// Trail position, moved toward `actual` once per frame.
    pub smoothed: Vec2,
}

impl PointerState {
    pub fn at(pos: Vec2) -> Self {
        Self { actual: pos, smoothed: pos }
    }

    /// One exponential-smoothing step. With `factor` in (0, 1) the trail
    /// strictly approaches a static target and never passes it.
    pub fn step(&mut self, factor: f32) {
        self.smoothed = lerp_vec2(self.smoothed, self.actual, factor);
    }
}

/// Marker visibility. Hidden on pointer-leave / blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Shown,
    Hidden,
}

pub struct CursorEffect {
    lead: ElementId,
    trail: ElementId,
    pointer: PointerState,
    lead_size: Vec2,
    trail_size: Vec2,
    presence: Presence,
    config: CursorConfig,
}

impl CursorEffect {
    /// Create both marker elements and place them at the viewport center.
    pub fn create<H: Host>(host: &mut H, config: &CursorConfig) -> Option<Self> {
        // Trail goes in first so the lead paints above it.
        let trail = host.create_element(&config.trail_class)?;
        let lead = host.create_element(&config.lead_class)?;

        let mut cursor = Self {
            lead,
            trail,
            pointer: PointerState::at(host.viewport() * 0.5),
            lead_size: Vec2::from_array(config.lead_size),
            trail_size: Vec2::from_array(config.trail_size),
            presence: Presence::Shown,
            config: config.clone(),
        };
        cursor.measure(host);
        cursor.place_lead(host);
        cursor.place_trail(host);
        Some(cursor)
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn is_shown(&self) -> bool {
        self.presence == Presence::Shown
    }

    /// Re-read marker sizes. Zero measurements keep the previous size.
    pub fn measure<H: Host>(&mut self, host: &H) {
        let lead = host.rect(self.lead);
        let trail = host.rect(self.trail);
        if lead.width > 0.0 {
            self.lead_size.x = lead.width;
        }
        if lead.height > 0.0 {
            self.lead_size.y = lead.height;
        }
        if trail.width > 0.0 {
            self.trail_size.x = trail.width;
        }
        if trail.height > 0.0 {
            self.trail_size.y = trail.height;
        }
    }

    /// Snap the lead marker and refresh the clickable indicator.
    pub fn on_move<H: Host>(&mut self, host: &mut H, pos: Vec2) {
        self.pointer.actual = pos;
        self.place_lead(host);

        let clickable = host.pointer_over(pos.x, pos.y, &self.config.clickable);
        host.set_root_class(&self.config.clickable_class, clickable);
    }

    pub fn set_pressed<H: Host>(&self, host: &mut H, pressed: bool) {
        host.set_root_class(&self.config.pressed_class, pressed);
    }

    pub fn show<H: Host>(&mut self, host: &mut H) {
        self.presence = Presence::Shown;
        host.set_style(self.lead, "opacity", "1");
        host.set_style(self.trail, "opacity", &self.config.trail_opacity.to_string());
    }

    pub fn hide<H: Host>(&mut self, host: &mut H) {
        self.presence = Presence::Hidden;
        host.set_style(self.lead, "opacity", "0");
        host.set_style(self.trail, "opacity", "0");
    }

    /// Per-frame smoothing step.
    pub fn tick<H: Host>(&mut self, host: &mut H) {
        self.pointer.step(self.config.smoothing);
        self.place_trail(host);
    }

    // Lead tip is its left-middle point.
    fn place_lead<H: Host>(&self, host: &mut H) {
        let p = self.pointer.actual;
        host.set_style(self.lead, "--tx", &format!("{}px", p.x));
        host.set_style(self.lead, "--ty", &format!("{}px", p.y - self.lead_size.y / 2.0));
    }

    fn place_trail<H: Host>(&self, host: &mut H) {
        let p = self.pointer.smoothed;
        let transform = format!(
            "translate({}px, {}px)",
            p.x - self.config.trail_offset,
            p.y - self.trail_size.y / 2.0
        );
        host.set_style(self.trail, "transform", &transform);
    }
}
