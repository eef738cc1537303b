//! HTML page generation.
//!
//! Renders the project grid and the lightbox modal markup from a scan
//! manifest, and copies the project images next to it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                      # Project cards + modal markup
//! └── images/projects/                # base_path from config.toml
//!     ├── 010-Villa-Ikoyi/
//!     │   ├── 001-facade.jpg
//!     │   └── 002-atrium.jpg
//!     └── 020-Harbour-Tower/
//!         └── 001-elevation.png
//! ```
//!
//! ## Modal Markup Contract
//!
//! The modal is rendered once per page with the ids from `[modal]` in
//! config.toml, so the generated page always satisfies
//! [`ModalBinding::bind`](crate::surface::ModalBinding::bind). The same
//! renderer produces replay snapshots: [`render_modal`] with a
//! [`ModalView`] fills in what the view currently shows.
//!
//! Uses [maud](https://maud.lambda.xyz/); attribute values, including the
//! JSON in `data-images`, are escaped automatically.

use crate::config::LightboxConfig;
use crate::scan::{Manifest, Project};
use crate::source::{alt_text, resolve_path};
use crate::view::ModalView;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image {0} listed in manifest but missing from the content directory")]
    MissingImage(PathBuf),
}

/// What a generate run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub cards: usize,
    pub inert_cards: usize,
    pub images_copied: usize,
    /// Where images were copied; `None` when `base_path` is a remote URL.
    pub image_dir: Option<PathBuf>,
}

const CSS: &str = include_str!("../static/lightbox.css");
const PAGE_TITLE: &str = "Projects";

/// Generate the site from a manifest written by the scan stage.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    write_site(&manifest, source_root, output_dir)
}

/// Write `index.html` and copy every grid project's images.
pub fn write_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;
    fs::write(
        output_dir.join("index.html"),
        render_page(manifest).into_string(),
    )?;

    let image_dir = image_dir(output_dir, &manifest.config.base_path);
    let mut images_copied = 0;
    if let Some(dir) = &image_dir {
        for project in manifest.grid() {
            for entry in &project.images {
                let src = source_root.join(entry);
                if !src.is_file() {
                    return Err(GenerateError::MissingImage(src));
                }
                let dst = dir.join(entry);
                if let Some(parent) = dst.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&src, &dst)?;
                images_copied += 1;
            }
        }
    } else {
        debug!(base_path = %manifest.config.base_path, "remote base path, images not copied");
    }

    Ok(GenerateSummary {
        cards: manifest.grid().count(),
        inert_cards: manifest.grid().filter(|p| p.is_inert()).count(),
        images_copied,
        image_dir,
    })
}

/// Local directory that `base_path` points at inside the output.
fn image_dir(output_dir: &Path, base_path: &str) -> Option<PathBuf> {
    if base_path.contains("://") {
        return None;
    }
    Some(output_dir.join(base_path.trim_start_matches('/')))
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// A gallery source card. Inert projects render with an empty image list.
fn render_card(project: &Project, base_path: &str) -> Markup {
    let attrs = project.attributes();
    let attr = |name: &str| {
        attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    };
    let caption = project.caption();

    html! {
        button.project-card.inert[project.is_inert()] type="button"
            data-name=[attr("data-name")]
            data-category=[attr("data-category")]
            data-location=[attr("data-location")]
            data-images=[attr("data-images")] {
            @if let Some(cover) = project.images.first() {
                img src=(resolve_path(base_path, cover)) alt=(alt_text(&project.name, 1))
                    loading="lazy";
            }
            span.project-name { (project.name) }
            @if !caption.is_empty() {
                span.project-caption { (caption) }
            }
        }
    }
}

/// The modal markup, hidden and empty unless a `view` is given.
pub fn render_modal(config: &LightboxConfig, view: Option<&ModalView>) -> Markup {
    let ids = &config.modal;
    let empty = ModalView::default();
    let view = view.unwrap_or(&empty);
    let image = view.image.as_ref();

    html! {
        div.lightbox id=(ids.root) hidden[!view.visible] role="dialog" aria-modal="true"
            aria-labelledby=(ids.title) {
            div.lightbox-overlay id=(ids.overlay) {}
            div.lightbox-content {
                button.lightbox-close id=(ids.close) type="button" aria-label="Close" { "×" }
                figure {
                    img.lightbox-image id=(ids.image) src=[image.map(|i| i.src.as_str())]
                        alt=[image.map(|i| i.alt.as_str())];
                    figcaption {
                        h2.lightbox-title id=(ids.title) { (view.title) }
                        p.lightbox-caption id=(ids.caption) { (view.caption) }
                    }
                }
                button.lightbox-prev id=(ids.prev) type="button" aria-label="Previous image"
                    hidden[!view.navigation_visible] { "‹" }
                button.lightbox-next id=(ids.next) type="button" aria-label="Next image"
                    hidden[!view.navigation_visible] { "›" }
                div.lightbox-indicators id=(ids.indicators) hidden[!view.navigation_visible] {
                    @for (i, active) in view.indicators.iter().enumerate() {
                        button.lightbox-indicator.active[*active] type="button"
                            data-index=(i) aria-label={ "Image " (i + 1) } {}
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// The project page: card grid plus modal.
pub fn render_page(manifest: &Manifest) -> Markup {
    let base_path = &manifest.config.base_path;
    let content = html! {
        header.site-header {
            h1 { (PAGE_TITLE) }
        }
        main.project-grid {
            @for project in manifest.grid() {
                (render_card(project, base_path))
            }
        }
        (render_modal(&manifest.config, None))
    };
    base_document(PAGE_TITLE, content)
}

// ============================================================================
// Tests
// ============================================================================
