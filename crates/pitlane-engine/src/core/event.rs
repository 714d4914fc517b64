use crate::api::types::ElementId;

/// Events the page understands.
/// The host translates native events into these; no DOM types leak in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Document parsed; controllers are built on this.
    ContentReady,
    /// All resources loaded.
    Loaded,
    /// Click on a subscribed element.
    Click { target: ElementId },
    /// Form submission.
    Submit { form: ElementId },
    /// Pointer entered a hover-subscribed element.
    HoverEnter { target: ElementId },
    /// Pointer left a hover-subscribed element.
    HoverLeave { target: ElementId },
    Scroll,
    Resize,
    /// Pointer moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    PointerDown,
    PointerUp,
    /// Pointer entered the document.
    PointerEnter,
    /// Pointer left the document.
    PointerLeave,
    WindowFocus,
    WindowBlur,
    /// Document visibility flipped.
    VisibilityChange { hidden: bool },
    /// Intersection report for an observed element.
    Intersection { target: ElementId, is_intersecting: bool },
}
