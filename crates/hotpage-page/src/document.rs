//! In-memory model of a page's elements.
//!
//! Elements keep their identity for the lifetime of the document; detaching
//! marks an element as removed rather than erasing it, so handles held by
//! pending timers stay valid and late operations degrade to no-ops.

use std::sync::{Arc, Mutex};

/// Class marker for dismissible notification elements.
pub const ALERT_CLASS: &str = "alert";

/// Stable handle to an element within one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug)]
struct ElementRecord {
    classes: Vec<String>,
    opacity: f64,
    attached: bool,
}

/// Shared, interior-mutable element set.
///
/// Cloning is cheap and yields another handle to the same document, which is
/// how dismissal timers operate on it from spawned tasks.
#[derive(Clone, Default)]
pub struct Document {
    inner: Arc<Mutex<Vec<ElementRecord>>>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attached element with the given classes, fully opaque.
    pub fn insert(&self, classes: &[&str]) -> ElementId {
        let mut elements = self.inner.lock().expect("document lock poisoned");
        elements.push(ElementRecord {
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            opacity: 1.0,
            attached: true,
        });
        ElementId(elements.len() - 1)
    }

    /// Snapshot of attached elements carrying the given class.
    #[must_use]
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        let elements = self.inner.lock().expect("document lock poisoned");
        elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attached && e.classes.iter().any(|c| c == class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// Set an element's opacity.
    ///
    /// Returns false without effect if the element is already detached.
    pub fn set_opacity(&self, id: ElementId, opacity: f64) -> bool {
        let mut elements = self.inner.lock().expect("document lock poisoned");
        match elements.get_mut(id.0) {
            Some(element) if element.attached => {
                element.opacity = opacity;
                true
            }
            _ => false,
        }
    }

    /// Current opacity, or None once the element is detached.
    #[must_use]
    pub fn opacity(&self, id: ElementId) -> Option<f64> {
        let elements = self.inner.lock().expect("document lock poisoned");
        elements
            .get(id.0)
            .filter(|e| e.attached)
            .map(|e| e.opacity)
    }

    /// Detach an element from the document.
    ///
    /// Returns false without effect if it was already detached.
    pub fn detach(&self, id: ElementId) -> bool {
        let mut elements = self.inner.lock().expect("document lock poisoned");
        match elements.get_mut(id.0) {
            Some(element) if element.attached => {
                element.attached = false;
                true
            }
            _ => false,
        }
    }

    /// Whether the element is still part of the document.
    #[must_use]
    pub fn is_attached(&self, id: ElementId) -> bool {
        let elements = self.inner.lock().expect("document lock poisoned");
        elements.get(id.0).is_some_and(|e| e.attached)
    }

    /// Number of attached elements.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        let elements = self.inner.lock().expect("document lock poisoned");
        elements.iter().filter(|e| e.attached).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_and_query() {
        let document = Document::new();
        let alert = document.insert(&["alert", "alert-info"]);
        let other = document.insert(&["card"]);

        assert_eq!(document.attached_count(), 2);
        assert_eq!(document.elements_with_class(ALERT_CLASS), vec![alert]);
        assert_eq!(document.opacity(other), Some(1.0));
    }

    #[test]
    fn test_class_match_is_exact_token() {
        let document = Document::new();
        document.insert(&["alerts"]);
        document.insert(&["alert-banner"]);

        assert!(document.elements_with_class(ALERT_CLASS).is_empty());
    }

    #[test]
    fn test_set_opacity() {
        let document = Document::new();
        let id = document.insert(&["alert"]);

        assert!(document.set_opacity(id, 0.0));
        assert_eq!(document.opacity(id), Some(0.0));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let document = Document::new();
        let id = document.insert(&["alert"]);

        assert!(document.detach(id));
        assert!(!document.detach(id));
        assert!(!document.is_attached(id));
        assert_eq!(document.attached_count(), 0);
    }

    #[test]
    fn test_operations_on_detached_element_are_noops() {
        let document = Document::new();
        let id = document.insert(&["alert"]);
        document.detach(id);

        assert!(!document.set_opacity(id, 0.0));
        assert_eq!(document.opacity(id), None);
        assert!(document.elements_with_class(ALERT_CLASS).is_empty());
    }

    #[test]
    fn test_clone_shares_state() {
        let document = Document::new();
        let id = document.insert(&["alert"]);

        let handle = document.clone();
        handle.detach(id);

        assert!(!document.is_attached(id));
    }
}
