use crate::dom::Node;

pub const HEADER_SELECTOR: &str = "header";
pub const BACK_TO_TOP_ID: &str = "backToTop";
const SCROLLED_CLASS: &str = "scrolled";
const SHOW_CLASS: &str = "show";
const HEADER_THRESHOLD: f64 = 50.0;
const BACK_TO_TOP_THRESHOLD: f64 = 500.0;

/// Scroll-position markers on the header and the back-to-top button. Either
/// element may be missing; the other keeps working.
pub struct ScrollMarkers<N: Node> {
    header: Option<N>,
    back_to_top: Option<N>,
}

impl<N: Node> ScrollMarkers<N> {
    pub fn new(header: Option<N>, back_to_top: Option<N>) -> Self {
        Self { header, back_to_top }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.back_to_top.is_none()
    }

    pub fn update(&self, scroll_y: f64) {
        if let Some(header) = &self.header {
            header.set_class(SCROLLED_CLASS, scroll_y > HEADER_THRESHOLD);
        }
        if let Some(button) = &self.back_to_top {
            button.set_class(SHOW_CLASS, scroll_y > BACK_TO_TOP_THRESHOLD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeNode;

    #[test]
    fn thresholds_are_exclusive() {
        let header = FakeNode::new();
        let button = FakeNode::new();
        let markers = ScrollMarkers::new(Some(header.clone()), Some(button.clone()));

        markers.update(50.0);
        assert!(!header.has_class(SCROLLED_CLASS));
        markers.update(51.0);
        assert!(header.has_class(SCROLLED_CLASS));
        assert!(!button.has_class(SHOW_CLASS));

        markers.update(501.0);
        assert!(button.has_class(SHOW_CLASS));

        markers.update(0.0);
        assert!(!header.has_class(SCROLLED_CLASS));
        assert!(!button.has_class(SHOW_CLASS));
    }

    #[test]
    fn missing_header_leaves_button_working() {
        let button = FakeNode::new();
        let markers = ScrollMarkers::new(None, Some(button.clone()));
        markers.update(900.0);
        assert!(button.has_class(SHOW_CLASS));
        assert!(!markers.is_empty());
    }
}
