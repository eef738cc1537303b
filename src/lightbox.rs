//! The lightbox controller state machine.
//!
//! [`Lightbox`] owns the gallery state (resolved images, current index, scroll
//! lock) and the open/closed phase. Every transition takes a typed input and
//! returns the ordered list of [`Effect`]s the page must apply; an empty list
//! means the input was a no-op. Nothing here touches a surface or a clock, so
//! every transition is testable on its own.
//!
//! ```text
//!            open                 close            exit_finished(ticket)
//!  Closed ─────────▶ Open ───────────────▶ Closing ─────────────────────▶ Closed
//!                    ▲  │ next/prev/jump      │
//!                    │  └────────────┘        │ open (cancels the exit)
//!                    └────────────────────────┘
//! ```
//!
//! ## Scroll lock
//!
//! The controller records whether it holds the page scroll lock and only
//! emits [`Effect::SuspendScroll`] when it does not, and
//! [`Effect::ResumeScroll`] when it does. Overlapping close triggers (overlay
//! click followed by Escape before the exit transition ends) therefore resume
//! scrolling exactly once.
//!
//! ## Visual transitions
//!
//! State commits immediately; tweens are fire-and-forget. The only visual
//! completion the controller listens for is the end of the exit transition,
//! identified by an [`ExitTicket`] so that a completion belonging to an exit
//! cancelled by a reopen is ignored.

use crate::config::{KeysConfig, LightboxConfig, TransitionsConfig};
use crate::source::{GallerySource, alt_text};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Duration and easing handed to the animation utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tween {
    pub duration_ms: u32,
    pub ease: String,
}

/// Identifies one exit transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExitTicket(u64);

impl ExitTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Open,
    /// Exit transition playing; the gallery is still considered open.
    Closing(ExitTicket),
}

/// Which affordance requested the close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloseTrigger {
    Overlay,
    CloseButton,
    CancelKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    Next,
    Prev,
}

/// Key name → action, built from [`KeysConfig`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<String, KeyAction>,
}

impl KeyMap {
    pub fn from_config(keys: &KeysConfig) -> Self {
        let mut bindings = HashMap::new();
        for (names, action) in [
            (&keys.close, KeyAction::Close),
            (&keys.next, KeyAction::Next),
            (&keys.prev, KeyAction::Prev),
        ] {
            for name in names {
                bindings.insert(name.clone(), action);
            }
        }
        Self { bindings }
    }

    pub fn action(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeysConfig::default())
    }
}

/// A typed UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Open(GallerySource),
    Next,
    Prev,
    /// Indicator activation, 0-indexed.
    Jump(usize),
    Close(CloseTrigger),
    /// A key press, by `KeyboardEvent.key` name.
    Key(String),
    ExitFinished(ExitTicket),
}

/// Something the page must do in response to a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "kebab-case")]
pub enum Effect {
    SetTitle { text: String },
    SetCaption { text: String },
    /// Fade the image out, swap `src`/`alt`, fade back in.
    ShowImage { src: String, alt: String, fade: Tween },
    RenderIndicators { count: usize, active: usize },
    ActivateIndicator { index: usize },
    /// Prev/next controls and indicators; hidden for single-image galleries.
    SetNavigationVisible { visible: bool },
    SuspendScroll,
    PlayEntrance { tween: Tween },
    /// Report completion back as [`Input::ExitFinished`] with this ticket.
    PlayExit { tween: Tween, ticket: ExitTicket },
    Conceal,
    ResumeScroll,
}

/// The gallery currently loaded in the lightbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    title: String,
    images: Vec<String>,
    current_index: usize,
    scroll_suspended: bool,
}

impl GalleryState {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Resolved image paths; empty until the first open.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn scroll_suspended(&self) -> bool {
        self.scroll_suspended
    }

    fn current_image(&self) -> Option<&str> {
        self.images.get(self.current_index).map(String::as_str)
    }
}

/// One lightbox per page.
#[derive(Debug, Clone)]
pub struct Lightbox {
    phase: Phase,
    state: GalleryState,
    base_path: String,
    transitions: TransitionsConfig,
    keys: KeyMap,
    tickets_issued: u64,
}

impl Lightbox {
    pub fn new(config: &LightboxConfig) -> Self {
        Self {
            phase: Phase::Closed,
            state: GalleryState::default(),
            base_path: config.base_path.clone(),
            transitions: config.transitions.clone(),
            keys: KeyMap::from_config(&config.keys),
            tickets_issued: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True from open until the exit transition has finished.
    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// The displayed image path while open.
    pub fn current_image(&self) -> Option<&str> {
        if self.is_open() {
            self.state.current_image()
        } else {
            None
        }
    }

    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        match input {
            Input::Open(source) => self.open(&source),
            Input::Next => self.next(),
            Input::Prev => self.prev(),
            Input::Jump(index) => self.jump(index),
            Input::Close(trigger) => self.close(trigger),
            Input::Key(key) => self.key(&key),
            Input::ExitFinished(ticket) => self.exit_finished(ticket),
        }
    }

    /// Load `source` and show its first image.
    ///
    /// Valid from any phase: reopening replaces the gallery, and opening
    /// while the exit transition plays cancels the close.
    pub fn open(&mut self, source: &GallerySource) -> Vec<Effect> {
        if let Phase::Closing(ticket) = self.phase {
            debug!(ticket = ticket.id(), "reopened during exit transition");
        }

        self.state.title = source.name().to_string();
        self.state.images = source.resolve(&self.base_path);
        self.state.current_index = 0;
        self.phase = Phase::Open;

        let count = self.state.images.len();
        debug!(title = %self.state.title, images = count, "lightbox opened");

        let mut effects = vec![
            Effect::SetTitle {
                text: self.state.title.clone(),
            },
            Effect::SetCaption {
                text: source.caption(),
            },
            self.show_current(),
            Effect::RenderIndicators { count, active: 0 },
            Effect::SetNavigationVisible {
                visible: count > 1,
            },
        ];
        if !self.state.scroll_suspended {
            self.state.scroll_suspended = true;
            effects.push(Effect::SuspendScroll);
        }
        effects.push(Effect::PlayEntrance {
            tween: self.transitions.entrance(),
        });
        effects
    }

    pub fn next(&mut self) -> Vec<Effect> {
        let Some(count) = self.navigable_count() else {
            return Vec::new();
        };
        self.go_to((self.state.current_index + 1) % count)
    }

    pub fn prev(&mut self) -> Vec<Effect> {
        let Some(count) = self.navigable_count() else {
            return Vec::new();
        };
        self.go_to((self.state.current_index + count - 1) % count)
    }

    /// Jump to the image behind indicator `index`.
    pub fn jump(&mut self, index: usize) -> Vec<Effect> {
        if self.phase != Phase::Open
            || index >= self.state.images.len()
            || index == self.state.current_index
        {
            trace!(index, "indicator jump ignored");
            return Vec::new();
        }
        self.go_to(index)
    }

    /// Start the exit transition. No-op unless open.
    pub fn close(&mut self, trigger: CloseTrigger) -> Vec<Effect> {
        if self.phase != Phase::Open {
            trace!(?trigger, phase = ?self.phase, "close ignored");
            return Vec::new();
        }
        self.tickets_issued += 1;
        let ticket = ExitTicket(self.tickets_issued);
        self.phase = Phase::Closing(ticket);
        debug!(?trigger, ticket = ticket.id(), "lightbox closing");
        vec![Effect::PlayExit {
            tween: self.transitions.exit(),
            ticket,
        }]
    }

    /// The exit transition identified by `ticket` has finished.
    pub fn exit_finished(&mut self, ticket: ExitTicket) -> Vec<Effect> {
        if self.phase != Phase::Closing(ticket) {
            trace!(ticket = ticket.id(), "stale exit completion ignored");
            return Vec::new();
        }
        self.phase = Phase::Closed;
        let mut effects = vec![Effect::Conceal];
        if self.state.scroll_suspended {
            self.state.scroll_suspended = false;
            effects.push(Effect::ResumeScroll);
        }
        debug!("lightbox closed");
        effects
    }

    /// Keyboard contract; keys are live only while open.
    pub fn key(&mut self, key: &str) -> Vec<Effect> {
        if self.phase != Phase::Open {
            return Vec::new();
        }
        match self.keys.action(key) {
            Some(KeyAction::Close) => self.close(CloseTrigger::CancelKey),
            Some(KeyAction::Next) => self.next(),
            Some(KeyAction::Prev) => self.prev(),
            None => Vec::new(),
        }
    }

    fn navigable_count(&self) -> Option<usize> {
        let count = self.state.images.len();
        (self.phase == Phase::Open && count > 1).then_some(count)
    }

    fn go_to(&mut self, index: usize) -> Vec<Effect> {
        self.state.current_index = index;
        vec![
            self.show_current(),
            Effect::ActivateIndicator { index },
        ]
    }

    fn show_current(&self) -> Effect {
        let index = self.state.current_index;
        Effect::ShowImage {
            src: self.state.images[index].clone(),
            alt: alt_text(&self.state.title, index + 1),
            fade: self.transitions.fade(),
        }
    }
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new(&LightboxConfig::default())
    }
}
