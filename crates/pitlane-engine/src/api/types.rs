/// Opaque handle to an element owned by the host.
/// The host interns elements and hands out stable ids for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Viewport-relative bounding box, as reported by the host layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
}

/// How the host should move to a scroll destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Jump without animation (page load with a fragment).
    Instant,
    /// Native smooth scrolling (user-initiated navigation).
    #[default]
    Animated,
}

/// Device capabilities, queried once at setup.
/// These decide which optional components get built at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Some attached pointer is coarse (touch).
    pub coarse_pointer: bool,
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
}

impl Capabilities {
    pub const COARSE_POINTER_QUERY: &'static str = "(any-pointer: coarse)";
    pub const REDUCED_MOTION_QUERY: &'static str = "(prefers-reduced-motion: reduce)";

    /// Parallax needs a fine pointer and no reduced-motion preference.
    pub fn allows_parallax(&self) -> bool {
        !self.coarse_pointer && !self.reduced_motion
    }

    /// The custom cursor only needs a fine pointer.
    pub fn allows_cursor(&self) -> bool {
        !self.coarse_pointer
    }
}

/// What the host must do with the native event after dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PASS: Self = Self { prevent_default: false };
    pub const PREVENT: Self = Self { prevent_default: true };
}
