//! Headless modal view.
//!
//! [`ModalView`] is an in-memory [`ModalSurface`]: it keeps exactly what a
//! browser would show (title, caption, image, indicators, visibility) so the
//! replay runner and tests can drive a [`Controller`](crate::surface::Controller)
//! without a DOM. [`generate::render_modal`](crate::generate::render_modal)
//! turns a view into an HTML snapshot.
//!
//! Transitions complete instantly, except the exit: its ticket is held until
//! [`ModalView::settle`] hands it back, mirroring a page that reports the end
//! of the exit animation some time later.

use crate::lightbox::{ExitTicket, Tween};
use crate::surface::{ModalSurface, ScrollDriver};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShownImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub visible: bool,
    pub title: String,
    pub caption: String,
    pub image: Option<ShownImage>,
    /// One flag per indicator, `true` for the active one.
    pub indicators: Vec<bool>,
    pub navigation_visible: bool,
    /// Number of fade-out/swap/fade-in cycles played.
    pub swaps: usize,
    #[serde(skip)]
    pending_exit: Option<ExitTicket>,
}

impl ModalView {
    /// Finish the exit transition in flight, if any, returning its ticket.
    pub fn settle(&mut self) -> Option<ExitTicket> {
        self.pending_exit.take()
    }

    pub fn is_exiting(&self) -> bool {
        self.pending_exit.is_some()
    }

    /// 0-based index of the active indicator.
    pub fn active_indicator(&self) -> Option<usize> {
        self.indicators.iter().position(|active| *active)
    }
}

impl ModalSurface for ModalView {
    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn set_caption(&mut self, text: &str) {
        self.caption = text.to_string();
    }

    fn show_image(&mut self, src: &str, alt: &str, _fade: &Tween) {
        self.image = Some(ShownImage {
            src: src.to_string(),
            alt: alt.to_string(),
        });
        self.swaps += 1;
    }

    fn render_indicators(&mut self, count: usize, active: usize) {
        self.indicators = (0..count).map(|i| i == active).collect();
    }

    fn activate_indicator(&mut self, index: usize) {
        for (i, flag) in self.indicators.iter_mut().enumerate() {
            *flag = i == index;
        }
    }

    fn set_navigation_visible(&mut self, visible: bool) {
        self.navigation_visible = visible;
    }

    fn play_entrance(&mut self, _tween: &Tween) {
        self.pending_exit = None;
        self.visible = true;
    }

    fn play_exit(&mut self, _tween: &Tween, ticket: ExitTicket) {
        self.pending_exit = Some(ticket);
    }

    fn conceal(&mut self) {
        self.visible = false;
    }
}

/// Page scroll state with call counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageScroll {
    pub suspended: bool,
    pub suspends: usize,
    pub resumes: usize,
}

impl ScrollDriver for PageScroll {
    fn suspend(&mut self) {
        self.suspended = true;
        self.suspends += 1;
    }

    fn resume(&mut self) {
        self.suspended = false;
        self.resumes += 1;
    }
}
