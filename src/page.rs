//! Reading a generated page back.
//!
//! A browser-side controller only sees the document: the ids it attaches to
//! and the `data-*` attributes of whichever card was activated. [`parse_page`]
//! runs the HTML through html5ever and keeps exactly that, so headless runs
//! consume the same attribute values a browser would after unescaping.

use crate::source::Attributes;
use crate::surface::ElementLookup;
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::HashSet;

/// Class marking a gallery source card.
pub const CARD_CLASS: &str = "project-card";

/// One gallery source card, attributes as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    attrs: Vec<(String, String)>,
}

impl Card {
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }
}

impl Attributes for Card {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.as_slice().attr(name)
    }
}

/// Element ids plus the cards, in document order.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    ids: HashSet<String>,
    cards: Vec<Card>,
}

impl ParsedPage {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }
}

impl ElementLookup for ParsedPage {
    fn has_element(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

pub fn parse_page(html: &str) -> std::io::Result<ParsedPage> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut page = ParsedPage::default();
    walk(&dom.document, &mut page);
    Ok(page)
}

fn walk(handle: &Handle, page: &mut ParsedPage) {
    if let NodeData::Element { attrs, .. } = &handle.data {
        let attrs: Vec<(String, String)> = attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        if let Some(id) = attrs.as_slice().attr("id") {
            page.ids.insert(id.to_string());
        }
        let is_card = attrs
            .as_slice()
            .attr("class")
            .is_some_and(|class| class.split_ascii_whitespace().any(|c| c == CARD_CLASS));
        if is_card {
            page.cards.push(Card { attrs });
        }
    }
    for child in handle.children.borrow().iter() {
        walk(child, page);
    }
}
