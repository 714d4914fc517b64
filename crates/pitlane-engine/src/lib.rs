pub mod api;
pub mod core;
pub mod controllers;
pub mod host;
pub mod math;

// Re-export key types at crate root for convenience
pub use api::config::{
    PageConfig, NavConfig, ScrollConfig, BackdropConfig, ParallaxConfig,
    RevealConfig, HoverConfig, FadeConfig, CursorConfig, ContactConfig,
};
pub use api::error::{PageError, ContactField};
pub use api::site::Site;
pub use api::types::{ElementId, Rect, ScrollMode, Capabilities, EventOutcome};
pub use core::event::PageEvent;
pub use core::page::Page;
pub use core::schedule::{FrameScheduler, DeferredTask, FrameWork};
pub use host::traits::{Host, Listener};
pub use controllers::scroll::ScrollCoordinator;
pub use controllers::navigation::NavigationController;
pub use controllers::effects::{HeaderBackdrop, Parallax, HoverLift, BodyFade};
pub use controllers::reveal::RevealOnView;
pub use controllers::contact::{ContactForm, ContactMessage};
#[cfg(feature = "cursor")]
pub use controllers::cursor::{CursorEffect, PointerState};
pub use math::{lerp, lerp_vec2};
