//! Seams between the controller and the page.
//!
//! The [`Lightbox`] state machine only produces [`Effect`]s. A [`Controller`]
//! applies them to three collaborators:
//!
//! | Trait | Stands for |
//! |---|---|
//! | [`ModalSurface`] | The fixed modal markup: text slots, image, indicators, transitions |
//! | [`ScrollDriver`] | The page-level smooth scroller (suspend/resume) |
//! | [`ElementLookup`] | Element lookup by id, consulted once when attaching |
//!
//! The markup contract is checked up front by [`ModalBinding::bind`]: either
//! every element exists and the controller attaches, or construction fails
//! with one diagnostic naming everything that is missing. After that, no
//! operation re-checks the page.

use crate::config::{LightboxConfig, ModalConfig};
use crate::lightbox::{Effect, ExitTicket, Input, Lightbox, Tween};
use crate::source::{Attributes, GallerySource};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BindError {
    #[error("lightbox root #{0} not found; lightbox unavailable on this page")]
    MissingRoot(String),
    #[error("lightbox markup incomplete, missing: {}", .0.join(", "))]
    MissingParts(Vec<String>),
}

/// The modal markup the controller drives.
///
/// Implementations own the animation details: `show_image` fades the image
/// out, swaps source and alt text, then fades it in; `play_exit` must report
/// its completion back to the controller as [`Input::ExitFinished`].
pub trait ModalSurface {
    fn set_title(&mut self, text: &str);
    fn set_caption(&mut self, text: &str);
    fn show_image(&mut self, src: &str, alt: &str, fade: &Tween);
    /// Replace the indicator set with `count` indicators, `active` marked.
    fn render_indicators(&mut self, count: usize, active: usize);
    fn activate_indicator(&mut self, index: usize);
    fn set_navigation_visible(&mut self, visible: bool);
    /// Make the modal visible and play its entrance.
    fn play_entrance(&mut self, tween: &Tween);
    fn play_exit(&mut self, tween: &Tween, ticket: ExitTicket);
    /// Hide the modal once the exit transition has finished.
    fn conceal(&mut self);
}

/// Page-level scroll driver.
pub trait ScrollDriver {
    fn suspend(&mut self);
    fn resume(&mut self);
}

/// Element lookup by id.
pub trait ElementLookup {
    fn has_element(&self, id: &str) -> bool;
}

/// Proof that the page carries the whole modal markup contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalBinding {
    ids: ModalConfig,
}

impl ModalBinding {
    pub fn bind<L: ElementLookup + ?Sized>(
        modal: &ModalConfig,
        lookup: &L,
    ) -> Result<Self, BindError> {
        if !lookup.has_element(&modal.root) {
            return Err(BindError::MissingRoot(modal.root.clone()));
        }
        let missing: Vec<String> = modal
            .parts()
            .into_iter()
            .filter(|(_, id)| !lookup.has_element(id))
            .map(|(part, id)| format!("{part} (#{id})"))
            .collect();
        if !missing.is_empty() {
            return Err(BindError::MissingParts(missing));
        }
        Ok(Self { ids: modal.clone() })
    }

    pub fn ids(&self) -> &ModalConfig {
        &self.ids
    }
}

/// A lightbox attached to one page.
pub struct Controller<S, D> {
    lightbox: Lightbox,
    binding: ModalBinding,
    surface: S,
    scroll: D,
}

impl<S: ModalSurface, D: ScrollDriver> Controller<S, D> {
    /// Check the markup contract and attach. Fails closed: on error there is
    /// no controller and the page simply lacks the lightbox.
    pub fn attach<L: ElementLookup + ?Sized>(
        config: &LightboxConfig,
        lookup: &L,
        surface: S,
        scroll: D,
    ) -> Result<Self, BindError> {
        let binding = ModalBinding::bind(&config.modal, lookup)?;
        Ok(Self {
            lightbox: Lightbox::new(config),
            binding,
            surface,
            scroll,
        })
    }

    /// A gallery source was activated.
    ///
    /// Malformed or empty image lists drop the request without any state
    /// change or visible error.
    pub fn activate<A: Attributes + ?Sized>(&mut self, attrs: &A) -> Vec<Effect> {
        match GallerySource::from_attributes(attrs) {
            Ok(source) => self.dispatch(Input::Open(source)),
            Err(e) => {
                debug!(error = %e, "inert gallery source ignored");
                Vec::new()
            }
        }
    }

    /// Run one transition and apply its effects in order.
    pub fn dispatch(&mut self, input: Input) -> Vec<Effect> {
        let effects = self.lightbox.handle(input);
        for effect in &effects {
            self.apply(effect);
        }
        effects
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn binding(&self) -> &ModalBinding {
        &self.binding
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scroll(&self) -> &D {
        &self.scroll
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SetTitle { text } => self.surface.set_title(text),
            Effect::SetCaption { text } => self.surface.set_caption(text),
            Effect::ShowImage { src, alt, fade } => self.surface.show_image(src, alt, fade),
            Effect::RenderIndicators { count, active } => {
                self.surface.render_indicators(*count, *active)
            }
            Effect::ActivateIndicator { index } => self.surface.activate_indicator(*index),
            Effect::SetNavigationVisible { visible } => {
                self.surface.set_navigation_visible(*visible)
            }
            Effect::SuspendScroll => self.scroll.suspend(),
            Effect::PlayEntrance { tween } => self.surface.play_entrance(tween),
            Effect::PlayExit { tween, ticket } => self.surface.play_exit(tween, *ticket),
            Effect::Conceal => self.surface.conceal(),
            Effect::ResumeScroll => self.scroll.resume(),
        }
    }
}
