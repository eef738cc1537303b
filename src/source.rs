//! Gallery sources: the page elements that open the lightbox.
//!
//! A gallery source is any element carrying the lightbox data attributes:
//!
//! ```html
//! <button class="project-card"
//!         data-name="Villa"
//!         data-category="Residential"
//!         data-location="Lagos"
//!         data-images='["a.jpg","b.jpg","c.jpg"]'>
//! ```
//!
//! `data-images` is a JSON array of image filenames, resolved against the
//! configured base path. A [`GallerySource`] can only be constructed from a
//! list that parses as an array of non-blank strings with at least one
//! entry; anything else is an inert source and never opens the lightbox.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use thiserror::Error;

pub const ATTR_NAME: &str = "data-name";
pub const ATTR_CATEGORY: &str = "data-category";
pub const ATTR_LOCATION: &str = "data-location";
pub const ATTR_IMAGES: &str = "data-images";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("missing data-images attribute")]
    MissingImages,
    #[error("data-images is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("data-images is not a JSON array")]
    NotAList,
    #[error("data-images entry {0} is not a non-empty string")]
    InvalidEntry(usize),
    #[error("data-images lists no images")]
    Empty,
}

/// Read access to an element's attributes.
pub trait Attributes {
    fn attr(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> Attributes for HashMap<String, String, S> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Attributes for BTreeMap<String, String> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Attributes for [(&str, &str)] {
    fn attr(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl Attributes for [(&str, String)] {
    fn attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Attributes for [(String, String)] {
    fn attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A validated gallery source. `images` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySource {
    name: String,
    category: Option<String>,
    location: Option<String>,
    images: Vec<String>,
}

impl GallerySource {
    pub fn new(
        name: impl Into<String>,
        category: Option<String>,
        location: Option<String>,
        images: Vec<String>,
    ) -> Result<Self, SourceError> {
        if images.is_empty() {
            return Err(SourceError::Empty);
        }
        if let Some(index) = images.iter().position(|i| i.trim().is_empty()) {
            return Err(SourceError::InvalidEntry(index));
        }
        Ok(Self {
            name: name.into().trim().to_string(),
            category: non_blank(category),
            location: non_blank(location),
            images,
        })
    }

    /// Build a source from an element's `data-*` attributes.
    pub fn from_attributes<A: Attributes + ?Sized>(attrs: &A) -> Result<Self, SourceError> {
        let raw = attrs.attr(ATTR_IMAGES).ok_or(SourceError::MissingImages)?;
        let images = parse_image_list(raw)?;
        Self::new(
            attrs.attr(ATTR_NAME).unwrap_or_default(),
            attrs.attr(ATTR_CATEGORY).map(str::to_string),
            attrs.attr(ATTR_LOCATION).map(str::to_string),
            images,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Unresolved image entries, in display order.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// `"<category> — <location>"`, or whichever of the two is present.
    pub fn caption(&self) -> String {
        caption_text(self.category(), self.location())
    }

    /// Image entries resolved against `base_path`.
    pub fn resolve(&self, base_path: &str) -> Vec<String> {
        self.images
            .iter()
            .map(|entry| resolve_path(base_path, entry))
            .collect()
    }

    /// The source's `data-*` attributes, as rendered on a card.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        source_attributes(
            &self.name,
            self.category(),
            self.location(),
            &self.images,
        )
    }
}

/// Parse a serialized `data-images` list.
///
/// Strict: the value must be a JSON array whose entries are all non-blank
/// strings, and it must not be empty.
pub fn parse_image_list(raw: &str) -> Result<Vec<String>, SourceError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Array(items) = value else {
        return Err(SourceError::NotAList);
    };
    if items.is_empty() {
        return Err(SourceError::Empty);
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            _ => Err(SourceError::InvalidEntry(index)),
        })
        .collect()
}

/// Resolve one image entry against the base path.
///
/// Absolute paths and URLs are returned unchanged; an empty base leaves the
/// entry as-is.
pub fn resolve_path(base_path: &str, entry: &str) -> String {
    if entry.starts_with('/') || entry.contains("://") {
        return entry.to_string();
    }
    let base = base_path.trim_end_matches('/');
    if base.is_empty() && !base_path.starts_with('/') {
        return entry.to_string();
    }
    format!("{base}/{entry}")
}

/// Caption line for a category and location.
pub fn caption_text(category: Option<&str>, location: Option<&str>) -> String {
    match (category, location) {
        (Some(c), Some(l)) => format!("{c} — {l}"),
        (Some(c), None) => c.to_string(),
        (None, Some(l)) => l.to_string(),
        (None, None) => String::new(),
    }
}

/// Alt text for the image at 1-indexed `position`.
pub fn alt_text(title: &str, position: usize) -> String {
    if title.is_empty() {
        format!("Project photo {position}")
    } else {
        format!("{title} — Project photo {position}")
    }
}

/// Render the `data-*` attributes for a card. `images` may be empty, in
/// which case the card is inert.
pub fn source_attributes(
    name: &str,
    category: Option<&str>,
    location: Option<&str>,
    images: &[String],
) -> Vec<(&'static str, String)> {
    let mut attrs = vec![(ATTR_NAME, name.to_string())];
    if let Some(c) = category {
        attrs.push((ATTR_CATEGORY, c.to_string()));
    }
    if let Some(l) = location {
        attrs.push((ATTR_LOCATION, l.to_string()));
    }
    let list = serde_json::Value::from(images.to_vec());
    attrs.push((ATTR_IMAGES, list.to_string()));
    attrs
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
