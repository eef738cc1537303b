//! Content directory scanning.
//!
//! Turns a directory of projects into the catalogue of gallery sources the
//! page is generated from.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Lightbox configuration (optional)
//! ├── 010-Villa-Ikoyi/             # Project (numbered = shown in grid)
//! │   ├── project.toml             # name / category / location (optional)
//! │   ├── 001-facade.jpg           # Images, ordered by number prefix
//! │   ├── 002-atrium.jpg
//! │   └── 010-terrace.webp         # Non-contiguous numbering OK
//! ├── 020-Harbour-Tower/
//! │   └── 001-elevation.png
//! └── drafts/                      # Unnumbered = catalogued, hidden from grid
//!     └── sketch.jpg
//! ```
//!
//! ## Rules
//!
//! - Every direct subdirectory of the root is a project; nested directories
//!   inside a project are ignored.
//! - Numbered images sort by number; unnumbered images follow in name order.
//! - Two images with the same number in one project is an error, as are two
//!   projects with the same slug.
//! - A project without images is kept in the catalogue but is inert: its card
//!   carries an empty image list and never opens the lightbox.

use crate::config::{self, LightboxConfig};
use crate::naming::parse_entry_name;
use crate::source::{caption_text, source_attributes};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid project.toml in {path}: {source}")]
    ProjectMeta {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Duplicate image number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Duplicate project slug \"{0}\"")]
    DuplicateSlug(String),
}

/// Catalogue produced by the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub projects: Vec<Project>,
    pub config: LightboxConfig,
}

impl Manifest {
    /// Projects shown in the card grid, in order.
    pub fn grid(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.in_grid)
    }
}

/// One project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Directory name relative to the content root.
    pub dir: String,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `data-images` entries: `<dir>/<file>`, relative to the base path.
    pub images: Vec<String>,
    /// Numbered projects appear in the grid.
    pub in_grid: bool,
}

impl Project {
    pub fn is_inert(&self) -> bool {
        self.images.is_empty()
    }

    pub fn caption(&self) -> String {
        caption_text(self.category.as_deref(), self.location.as_deref())
    }

    /// The card's `data-*` attributes.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        source_attributes(
            &self.name,
            self.category.as_deref(),
            self.location.as_deref(),
            &self.images,
        )
    }
}

/// Optional `project.toml` sidecar.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectMeta {
    name: Option<String>,
    category: Option<String>,
    location: Option<String>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];
const PROJECT_META: &str = "project.toml";

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut dirs: Vec<PathBuf> = collect_entries(root)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort_by_key(|d| {
        let name = file_name(d);
        (parse_entry_name(&name).number.unwrap_or(u32::MAX), name)
    });

    let mut projects = Vec::new();
    let mut slugs = HashSet::new();
    for dir in &dirs {
        let project = build_project(dir)?;
        if !slugs.insert(project.slug.clone()) {
            return Err(ScanError::DuplicateSlug(project.slug));
        }
        projects.push(project);
    }

    Ok(Manifest { projects, config })
}

fn build_project(path: &Path) -> Result<Project, ScanError> {
    let dir = file_name(path);
    let entry = parse_entry_name(&dir);
    let meta = load_project_meta(path)?;

    let mut ordered: BTreeMap<u32, String> = BTreeMap::new();
    // Unnumbered images follow the numbered ones, in name order
    let mut unnumbered = Vec::new();
    for file in collect_entries(path)? {
        if !is_image(&file) {
            trace!(path = %file.display(), "skipping non-image entry");
            continue;
        }
        let filename = file_name(&file);
        let stem = Path::new(&filename)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let entry_path = format!("{dir}/{filename}");
        match parse_entry_name(&stem).number {
            Some(num) => {
                if ordered.insert(num, entry_path).is_some() {
                    return Err(ScanError::DuplicateNumber(num, path.to_path_buf()));
                }
            }
            None => unnumbered.push(entry_path),
        }
    }

    let name = meta
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| entry.title.clone());
    let slug = if entry.slug.is_empty() {
        dir.to_lowercase()
    } else {
        entry.slug.clone()
    };

    Ok(Project {
        slug,
        name,
        category: meta.category,
        location: meta.location,
        images: ordered.into_values().chain(unnumbered).collect(),
        in_grid: entry.is_numbered(),
        dir,
    })
}

fn load_project_meta(dir: &Path) -> Result<ProjectMeta, ScanError> {
    let path = dir.join(PROJECT_META);
    if !path.exists() {
        return Ok(ProjectMeta::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|source| ScanError::ProjectMeta { path, source })
}

fn collect_entries(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = file_name(p);
            !name.starts_with('.') && name != PROJECT_META
        })
        .collect();
    entries.sort();
    Ok(entries)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
