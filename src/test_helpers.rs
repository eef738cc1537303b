//! Shared test utilities for the folio-lightbox test suite.
//!
//! Provides recording collaborators for the [`surface`](crate::surface)
//! seams, a fake page for element lookup, and content-directory fixtures for
//! scan and generate tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let page = Page::with_modal(&ModalConfig::default());
//! let mut controller = Controller::attach(&config, &page, MockSurface::default(), MockScroll::default())?;
//! controller.activate(villa_attrs().as_slice());
//! assert_eq!(controller.scroll().suspends, 1);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::ModalConfig;
use crate::lightbox::{ExitTicket, Tween};
use crate::surface::{ElementLookup, ModalSurface, ScrollDriver};

// =========================================================================
// Recording collaborators
// =========================================================================

/// One call made on a [`MockSurface`]. Tweens are left out; they have their
/// own tests in `lightbox`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Title(String),
    Caption(String),
    Image { src: String, alt: String },
    Indicators { count: usize, active: usize },
    ActiveIndicator(usize),
    NavigationVisible(bool),
    Entrance,
    Exit,
    Conceal,
}

/// Surface that records operations without rendering anything.
#[derive(Debug, Default)]
pub struct MockSurface {
    ops: Vec<SurfaceOp>,
    pending_exit: Option<ExitTicket>,
}

impl MockSurface {
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.clone()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// The ticket of the exit transition in flight, as the page would
    /// report it on completion.
    pub fn take_exit(&mut self) -> Option<ExitTicket> {
        self.pending_exit.take()
    }
}

impl ModalSurface for MockSurface {
    fn set_title(&mut self, text: &str) {
        self.ops.push(SurfaceOp::Title(text.to_string()));
    }

    fn set_caption(&mut self, text: &str) {
        self.ops.push(SurfaceOp::Caption(text.to_string()));
    }

    fn show_image(&mut self, src: &str, alt: &str, _fade: &Tween) {
        self.ops.push(SurfaceOp::Image {
            src: src.to_string(),
            alt: alt.to_string(),
        });
    }

    fn render_indicators(&mut self, count: usize, active: usize) {
        self.ops.push(SurfaceOp::Indicators { count, active });
    }

    fn activate_indicator(&mut self, index: usize) {
        self.ops.push(SurfaceOp::ActiveIndicator(index));
    }

    fn set_navigation_visible(&mut self, visible: bool) {
        self.ops.push(SurfaceOp::NavigationVisible(visible));
    }

    fn play_entrance(&mut self, _tween: &Tween) {
        self.ops.push(SurfaceOp::Entrance);
    }

    fn play_exit(&mut self, _tween: &Tween, ticket: ExitTicket) {
        self.pending_exit = Some(ticket);
        self.ops.push(SurfaceOp::Exit);
    }

    fn conceal(&mut self) {
        self.ops.push(SurfaceOp::Conceal);
    }
}

/// Scroll driver that counts calls.
#[derive(Debug, Default)]
pub struct MockScroll {
    pub suspends: usize,
    pub resumes: usize,
}

impl ScrollDriver for MockScroll {
    fn suspend(&mut self) {
        self.suspends += 1;
    }

    fn resume(&mut self) {
        self.resumes += 1;
    }
}

/// A fake page: just the set of element ids present.
#[derive(Debug, Default)]
pub struct Page {
    ids: HashSet<String>,
}

impl Page {
    /// A page carrying the full modal markup for `modal`.
    pub fn with_modal(modal: &ModalConfig) -> Self {
        let mut ids: HashSet<String> = modal.parts().iter().map(|(_, id)| id.to_string()).collect();
        ids.insert(modal.root.clone());
        Self { ids }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }
}

impl ElementLookup for Page {
    fn has_element(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// The card from the Villa scenario.
pub fn villa_attrs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("data-name", "Villa"),
        ("data-category", "Residential"),
        ("data-location", "Lagos"),
        ("data-images", r#"["a.jpg","b.jpg","c.jpg"]"#),
    ]
}

// =========================================================================
// Content fixtures
// =========================================================================

/// Build a small content directory:
///
/// ```text
/// config.toml                     base_path = "media"
/// 010-Villa-Ikoyi/                project.toml (Residential, Lagos), 3 images
/// 020-Harbour-Tower/              1 image, no project.toml
/// 030-Empty-Lot/                  no images (inert)
/// drafts/                         1 image, unnumbered (hidden from grid)
/// ```
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "config.toml", "base_path = \"media\"\n");

    write(
        root,
        "010-Villa-Ikoyi/project.toml",
        "category = \"Residential\"\nlocation = \"Lagos\"\n",
    );
    write(root, "010-Villa-Ikoyi/001-facade.jpg", "jpg");
    write(root, "010-Villa-Ikoyi/002-atrium.jpg", "jpg");
    write(root, "010-Villa-Ikoyi/010-terrace.webp", "webp");
    write(root, "010-Villa-Ikoyi/notes.txt", "not an image");

    write(root, "020-Harbour-Tower/001-elevation.png", "png");

    fs::create_dir_all(root.join("030-Empty-Lot")).unwrap();

    write(root, "drafts/sketch.jpg", "jpg");

    tmp
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
