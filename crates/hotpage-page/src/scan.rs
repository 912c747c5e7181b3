//! HTML notice scanning.
//!
//! Builds a [`Document`] from a fetched page by collecting the class
//! attributes of its markup. Only a token-level scan is needed: the page
//! model cares about which elements carry the notice marker, not about
//! the tree structure.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;

static CLASS_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class\s*=\s*"([^"]*)""#).unwrap());

/// Build a document from page markup.
///
/// One element is recorded per `class="..."` attribute in the HTML. Class
/// strings are split on whitespace, so `alert alert-info` carries the
/// notice marker while `alert-banner` alone does not.
#[must_use]
pub fn document_from_html(html: &str) -> Document {
    let document = Document::new();

    for captures in CLASS_ATTR_RE.captures_iter(html) {
        let classes: Vec<&str> = captures[1].split_whitespace().collect();
        if !classes.is_empty() {
            document.insert(&classes);
        }
    }

    document
}
