#[cfg(feature = "cursor")]
use glam::Vec2;
use crate::api::config::PageConfig;
use crate::api::error::PageError;
use crate::api::types::{Capabilities, ElementId, EventOutcome, ScrollMode};
use crate::controllers::contact::ContactForm;
#[cfg(feature = "cursor")]
use crate::controllers::cursor::CursorEffect;
use crate::controllers::effects::{BodyFade, HeaderBackdrop, HoverLift, Parallax};
use crate::controllers::navigation::NavigationController;
use crate::controllers::reveal::RevealOnView;
use crate::controllers::scroll::ScrollCoordinator;
use crate::core::event::PageEvent;
use crate::core::schedule::{DeferredTask, FrameScheduler};
use crate::host::traits::{Host, Listener};

/// Controllers built at content-ready. Optional components are `None` when
/// their element is missing or the device capabilities rule them out.
struct Controllers {
    scroll: ScrollCoordinator,
    nav: Option<NavigationController>,
    anchors: Vec<ElementId>,
    backdrop: Option<HeaderBackdrop>,
    parallax: Option<Parallax>,
    reveal: RevealOnView,
    hover: HoverLift,
    fade: BodyFade,
    contact: Option<ContactForm>,
    #[cfg(feature = "cursor")]
    cursor: Option<CursorEffect>,
}

/// The page-interaction layer: owns every controller and the frame scheduler.
///
/// The host feeds it events through `handle` and runs `frame` whenever it
/// asked for one via `Host::request_frame`. All work runs to completion inside
/// those two calls.
pub struct Page<H: Host> {
    host: H,
    config: PageConfig,
    scheduler: FrameScheduler,
    capabilities: Capabilities,
    controllers: Option<Controllers>,
}

impl<H: Host> Page<H> {
    /// Build an idle page. Fails if `config` is out of range; nothing is
    /// touched on the host until `ContentReady`.
    pub fn new(host: H, config: PageConfig) -> Result<Self, PageError> {
        config.validate()?;
        Ok(Self {
            host,
            config,
            scheduler: FrameScheduler::new(),
            capabilities: Capabilities::default(),
            controllers: None,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn is_ready(&self) -> bool {
        self.controllers.is_some()
    }

    pub fn menu_open(&self) -> bool {
        self.controllers
            .as_ref()
            .and_then(|c| c.nav.as_ref())
            .is_some_and(|nav| nav.is_open())
    }

    pub fn has_parallax(&self) -> bool {
        self.controllers.as_ref().is_some_and(|c| c.parallax.is_some())
    }

    pub fn has_contact_form(&self) -> bool {
        self.controllers.as_ref().is_some_and(|c| c.contact.is_some())
    }

    #[cfg(feature = "cursor")]
    pub fn has_cursor(&self) -> bool {
        self.controllers.as_ref().is_some_and(|c| c.cursor.is_some())
    }

    /// Dispatch one event. Events before `ContentReady` are ignored.
    pub fn handle(&mut self, event: PageEvent) -> EventOutcome {
        let outcome = match event {
            PageEvent::ContentReady => {
                self.setup();
                EventOutcome::PASS
            }
            other => match self.controllers.as_mut() {
                Some(controllers) => dispatch(
                    &mut self.host,
                    &mut self.scheduler,
                    controllers,
                    other,
                ),
                None => {
                    log::debug!("page: {other:?} before content ready, ignored");
                    EventOutcome::PASS
                }
            },
        };
        self.sync_frame_request();
        outcome
    }

    /// Run one animation frame: deferred post-layout work first, then the
    /// repeating tick.
    pub fn frame(&mut self) {
        let work = self.scheduler.begin_frame();
        if let Some(controllers) = self.controllers.as_mut() {
            for task in work.deferred {
                match task {
                    DeferredTask::ScrollTo { target, mode } => {
                        controllers.scroll.scroll_to(&mut self.host, Some(target), mode);
                    }
                }
            }
            #[cfg(feature = "cursor")]
            if work.tick {
                if let Some(cursor) = controllers.cursor.as_mut() {
                    cursor.tick(&mut self.host);
                }
            }
        }
        self.sync_frame_request();
    }

    fn sync_frame_request(&mut self) {
        if self.scheduler.request() {
            self.host.request_frame();
        } else if self.scheduler.cancel() {
            self.host.cancel_frame();
        }
    }

    fn setup(&mut self) {
        if self.controllers.is_some() {
            log::warn!("page: content ready fired twice, ignored");
            return;
        }
        let host = &mut self.host;
        let config = &self.config;

        self.capabilities = Capabilities {
            coarse_pointer: host.media_matches(Capabilities::COARSE_POINTER_QUERY),
            reduced_motion: host.media_matches(Capabilities::REDUCED_MOTION_QUERY),
        };
        let caps = self.capabilities;

        let fade = BodyFade::find(host, &config.fade);
        fade.hide(host);

        let header = host.query(&config.nav.header);
        let scroll = ScrollCoordinator::new(header, &config.scroll);
        scroll.apply_scroll_margins(host);
        host.listen(Listener::Resize);

        let nav = NavigationController::find(host, &config.nav);
        if let Some(nav) = &nav {
            host.listen(Listener::Click(nav.toggle_element()));
        }
        // A toggle that is itself an in-page link stays a toggle only.
        let mut anchors = host.query_all(&config.nav.in_page_links);
        if let Some(nav) = &nav {
            anchors.retain(|&anchor| anchor != nav.toggle_element());
        }
        for &anchor in &anchors {
            host.listen(Listener::Click(anchor));
        }

        let backdrop = header.map(|h| HeaderBackdrop::new(h, &config.backdrop));
        let parallax = if caps.allows_parallax() {
            Some(Parallax::find(host, &config.parallax)).filter(|p| !p.is_empty())
        } else {
            log::info!("page: parallax disabled (coarse pointer or reduced motion)");
            None
        };
        if backdrop.is_some() || parallax.is_some() {
            host.listen(Listener::Scroll);
        }

        let mut reveal = RevealOnView::new(&config.reveal);
        reveal.register(host, &config.reveal);

        let hover = HoverLift::find(host, &config.hover);
        for &card in hover.cards() {
            host.listen(Listener::Hover(card));
        }

        let contact = ContactForm::find(host, &config.contact);
        if let Some(contact) = &contact {
            host.listen(Listener::Submit(contact.form()));
        }

        #[cfg(feature = "cursor")]
        let cursor = if caps.allows_cursor() {
            let cursor = CursorEffect::create(host, &config.cursor);
            if cursor.is_some() {
                for listener in [
                    Listener::PointerMove,
                    Listener::PointerButtons,
                    Listener::PointerPresence,
                    Listener::WindowFocus,
                    Listener::Visibility,
                ] {
                    host.listen(listener);
                }
                self.scheduler.start_repeating();
            }
            cursor
        } else {
            log::info!("page: custom cursor disabled (coarse pointer)");
            None
        };

        log::info!(
            "page: ready (nav: {}, anchors: {}, parallax: {}, reveal: {}, contact: {})",
            nav.is_some(),
            anchors.len(),
            parallax.as_ref().map_or(0, Parallax::len),
            reveal.len(),
            contact.is_some(),
        );

        self.controllers = Some(Controllers {
            scroll,
            nav,
            anchors,
            backdrop,
            parallax,
            reveal,
            hover,
            fade,
            contact,
            #[cfg(feature = "cursor")]
            cursor,
        });
    }
}

fn dispatch<H: Host>(
    host: &mut H,
    scheduler: &mut FrameScheduler,
    c: &mut Controllers,
    event: PageEvent,
) -> EventOutcome {
    match event {
        PageEvent::ContentReady => EventOutcome::PASS,
        PageEvent::Loaded => {
            c.fade.show(host);
            let hash = host.location_hash();
            if let Some(target) = ScrollCoordinator::resolve_fragment(host, &hash) {
                scheduler.defer(DeferredTask::ScrollTo { target, mode: ScrollMode::Instant });
            }
            EventOutcome::PASS
        }
        PageEvent::Click { target } => on_click(host, scheduler, c, target),
        PageEvent::Submit { form } => {
            match &c.contact {
                Some(contact) if contact.form() == form => {
                    contact.submit(host);
                    EventOutcome::PREVENT
                }
                _ => EventOutcome::PASS,
            }
        }
        PageEvent::HoverEnter { target } => {
            c.hover.set_hovered(host, target, true);
            EventOutcome::PASS
        }
        PageEvent::HoverLeave { target } => {
            c.hover.set_hovered(host, target, false);
            EventOutcome::PASS
        }
        PageEvent::Scroll => {
            if let Some(backdrop) = &c.backdrop {
                backdrop.apply(host);
            }
            if let Some(parallax) = &c.parallax {
                parallax.apply(host);
            }
            EventOutcome::PASS
        }
        PageEvent::Resize => {
            c.scroll.apply_scroll_margins(host);
            #[cfg(feature = "cursor")]
            if let Some(cursor) = c.cursor.as_mut() {
                cursor.measure(host);
            }
            EventOutcome::PASS
        }
        PageEvent::Intersection { target, is_intersecting } => {
            c.reveal.on_intersection(host, target, is_intersecting);
            EventOutcome::PASS
        }
        #[cfg(feature = "cursor")]
        pointer_event => {
            if let Some(cursor) = c.cursor.as_mut() {
                on_pointer(host, scheduler, cursor, pointer_event);
            }
            EventOutcome::PASS
        }
        #[cfg(not(feature = "cursor"))]
        _ => EventOutcome::PASS,
    }
}

/// In-page link or menu toggle.
///
/// For links, the menu closes first and the measurement waits one frame so
/// the collapsed header height is what gets subtracted.
fn on_click<H: Host>(
    host: &mut H,
    scheduler: &mut FrameScheduler,
    c: &mut Controllers,
    target: ElementId,
) -> EventOutcome {
    if let Some(nav) = c.nav.as_mut() {
        if nav.toggle_element() == target {
            nav.toggle(host);
            return EventOutcome::PASS;
        }
        if nav.contains_link(target) {
            nav.close(host);
        }
    }

    if !c.anchors.contains(&target) {
        return EventOutcome::PASS;
    }
    let href = host.attribute(target, "href").unwrap_or_default();
    let Some(destination) = ScrollCoordinator::resolve_fragment(host, &href) else {
        return EventOutcome::PASS;
    };

    if let Some(nav) = c.nav.as_mut() {
        nav.close(host);
    }
    scheduler.defer(DeferredTask::ScrollTo { target: destination, mode: ScrollMode::Animated });
    EventOutcome::PREVENT
}

#[cfg(feature = "cursor")]
fn on_pointer<H: Host>(
    host: &mut H,
    scheduler: &mut FrameScheduler,
    cursor: &mut CursorEffect,
    event: PageEvent,
) {
    match event {
        PageEvent::PointerMove { x, y } => cursor.on_move(host, Vec2::new(x, y)),
        PageEvent::PointerDown => cursor.set_pressed(host, true),
        PageEvent::PointerUp => cursor.set_pressed(host, false),
        PageEvent::PointerEnter | PageEvent::WindowFocus => cursor.show(host),
        PageEvent::PointerLeave | PageEvent::WindowBlur => cursor.hide(host),
        PageEvent::VisibilityChange { hidden: true } => {
            if scheduler.stop_repeating() {
                log::debug!("cursor: paused");
            }
        }
        PageEvent::VisibilityChange { hidden: false } => {
            if scheduler.start_repeating() {
                log::debug!("cursor: resumed");
            }
        }
        _ => {}
    }
}
