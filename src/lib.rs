//! # Folio Lightbox
//!
//! A project-card image lightbox for portfolio sites. Cards on a page carry
//! a project's name, category, location and image list as `data-*`
//! attributes; activating one opens a modal showing the project's photos with
//! previous/next controls, position indicators, keyboard navigation and a
//! page scroll lock.
//!
//! # Architecture: Controller and Page
//!
//! The lightbox itself is a pure state machine. The rest of the crate builds
//! the page it runs on and drives it headlessly:
//!
//! ```text
//! content/  ──scan──▶  manifest.json  ──generate──▶  dist/index.html
//!                                                         │
//!                  replay script  ──▶  Controller ◀─parse─┘ (ids, card attributes)
//!                                         │
//!                                    Lightbox ──▶ Effects ──▶ ModalView / page
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Gallery sources: `data-*` attributes, strict image list parsing, path resolution |
//! | [`lightbox`] | The controller state machine: inputs in, ordered effects out |
//! | [`surface`] | Seams to the page (modal, scroll driver, element lookup) and the `Controller` |
//! | [`view`] | Headless modal view and scroll driver used by replays and tests |
//! | [`page`] | Parses a generated page back into element ids and card attributes |
//! | [`script`] | Replay script parser |
//! | [`replay`] | Attaches to a generated page; runs scripts and card checks |
//! | [`scan`] | Walks the content directory into a project catalogue |
//! | [`generate`] | Renders the card grid and modal markup with Maud, copies images |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | `NNN-name` convention for project directories and image files |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Effects Instead of Callbacks
//!
//! Every transition is a method on [`lightbox::Lightbox`] taking a typed
//! input and returning the list of [`lightbox::Effect`]s the page must apply,
//! in order. State commits before any visual work starts; the only visual
//! completion the controller waits for is the end of the exit transition,
//! and that completion is matched by ticket so a stale one is ignored.
//!
//! ## Markup Checked Once
//!
//! [`surface::ModalBinding::bind`] verifies the whole modal markup contract
//! when the controller attaches and reports every missing element in one
//! diagnostic. A page without the modal root simply has no lightbox.
//!
//! ## Inert Sources
//!
//! A card whose image list is missing, malformed or empty never opens the
//! lightbox. [`source::GallerySource`] can only be built from a valid list,
//! so the controller never sees an empty gallery.
//!
//! ## NNN-Prefix Ordering
//!
//! Project directories and photos use a numeric prefix (`010-`, `002-`) for
//! explicit ordering, parsed by [`naming::parse_entry_name`]. Projects
//! without a prefix are catalogued but left off the card grid.

pub mod config;
pub mod generate;
pub mod lightbox;
pub mod naming;
pub mod output;
pub mod page;
pub mod replay;
pub mod scan;
pub mod script;
pub mod source;
pub mod surface;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
