//! Headless runs against the generated page.
//!
//! Both entry points render the page for a manifest, parse it back and
//! attach a [`Controller`] to its element ids, exactly as a browser would on
//! load. Cards are activated with the attributes read from the parsed page,
//! never from the manifest. [`check`] stops after reading every card;
//! [`replay`] then feeds a script through a [`ModalView`] and records what
//! each step did.

use crate::generate::render_page;
use crate::lightbox::{Effect, Input};
use crate::page::{Card, ParsedPage, parse_page};
use crate::scan::Manifest;
use crate::script::{Command, Step, Target};
use crate::source::{Attributes, GallerySource};
use crate::surface::{BindError, Controller};
use crate::view::{ModalView, PageScroll};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("{0}")]
    Unavailable(#[from] BindError),
    #[error("Could not read the generated page: {0}")]
    Page(#[from] std::io::Error),
    #[error("line {line}: no card {target} on the page")]
    UnknownCard { line: usize, target: String },
}

/// One script step and its outcome.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub line: usize,
    pub text: String,
    pub effects: Vec<Effect>,
    pub view: ModalView,
    pub scroll: PageScroll,
}

/// The full run: every step plus the final state.
#[derive(Debug, Clone)]
pub struct Replay {
    pub steps: Vec<StepOutcome>,
    pub view: ModalView,
    pub scroll: PageScroll,
}

impl Replay {
    /// Whether the page is left with scrolling suspended.
    pub fn scroll_leaked(&self) -> bool {
        self.scroll.suspended && !self.view.visible
    }
}

type PageController = Controller<ModalView, PageScroll>;

fn attach(manifest: &Manifest) -> Result<(ParsedPage, PageController), ReplayError> {
    let page = parse_page(&render_page(manifest).into_string())?;
    let controller = Controller::attach(
        &manifest.config,
        &page,
        ModalView::default(),
        PageScroll::default(),
    )
    .inspect_err(|e| warn!(error = %e, "lightbox unavailable"))?;
    Ok((page, controller))
}

pub fn replay(manifest: &Manifest, steps: &[Step]) -> Result<Replay, ReplayError> {
    let (page, mut controller) = attach(manifest)?;
    let mut outcomes = Vec::with_capacity(steps.len());

    for step in steps {
        let effects = match &step.command {
            Command::Open(target) => {
                let card = find_card(manifest, &page, target).ok_or_else(|| {
                    ReplayError::UnknownCard {
                        line: step.line,
                        target: describe(target),
                    }
                })?;
                controller.activate(card)
            }
            Command::Next => controller.dispatch(Input::Next),
            Command::Prev => controller.dispatch(Input::Prev),
            Command::Jump(index) => controller.dispatch(Input::Jump(*index)),
            Command::Close(trigger) => controller.dispatch(Input::Close(*trigger)),
            Command::Key(name) => controller.dispatch(Input::Key(name.clone())),
            Command::Settle => match controller.surface_mut().settle() {
                Some(ticket) => controller.dispatch(Input::ExitFinished(ticket)),
                None => Vec::new(),
            },
        };
        debug!(line = step.line, step = %step.text, effects = effects.len(), "replayed");
        outcomes.push(StepOutcome {
            line: step.line,
            text: step.text.clone(),
            effects,
            view: controller.surface().clone(),
            scroll: controller.scroll().clone(),
        });
    }

    Ok(Replay {
        steps: outcomes,
        view: controller.surface().clone(),
        scroll: controller.scroll().clone(),
    })
}

/// Page cards follow the manifest grid order; slugs resolve through it.
fn find_card<'a>(
    manifest: &Manifest,
    page: &'a ParsedPage,
    target: &Target,
) -> Option<&'a Card> {
    let position = match target {
        Target::Position(i) => *i,
        Target::Slug(slug) => manifest.grid().position(|p| p.slug == *slug)?,
    };
    page.cards().get(position)
}

fn describe(target: &Target) -> String {
    match target {
        Target::Position(i) => format!("#{}", i + 1),
        Target::Slug(slug) => format!("\"{slug}\""),
    }
}

/// How one card would behave when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    Opens { images: usize },
    Inert { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCheck {
    pub name: String,
    pub status: CardStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Id of the modal root the controller bound to.
    pub root: String,
    pub cards: Vec<CardCheck>,
}

/// Attach to the page and read every card back through its attributes.
pub fn check(manifest: &Manifest) -> Result<CheckReport, ReplayError> {
    let (page, controller) = attach(manifest)?;
    let cards = page
        .cards()
        .iter()
        .map(|card| {
            let status = match GallerySource::from_attributes(card) {
                Ok(source) => CardStatus::Opens {
                    images: source.images().len(),
                },
                Err(e) => CardStatus::Inert {
                    reason: e.to_string(),
                },
            };
            CardCheck {
                name: card.attr("data-name").unwrap_or_default().to_string(),
                status,
            }
        })
        .collect();
    Ok(CheckReport {
        root: controller.binding().ids().root.clone(),
        cards,
    })
}
