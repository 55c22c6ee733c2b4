use crate::dom::Node;

pub const TOGGLE_SELECTOR: &str = ".hamburger";
pub const LINKS_SELECTOR: &str = ".nav-links";
pub const OPEN_CLASS: &str = "active";

/// Hamburger menu. The open state lives on both the toggle and the link list
/// and is always written to both at once.
pub struct NavMenu<N: Node> {
    toggle: N,
    links: N,
}

impl<N: Node> NavMenu<N> {
    pub fn new(toggle: N, links: N) -> Self {
        Self { toggle, links }
    }

    pub fn is_open(&self) -> bool {
        self.links.has_class(OPEN_CLASS)
    }

    fn set_open(&self, open: bool) {
        self.links.set_class(OPEN_CLASS, open);
        self.toggle.set_class(OPEN_CLASS, open);
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// Document-level click. Anything outside both the toggle and the list closes it.
    pub fn on_document_click(&self, target: Option<&N>) {
        let inside = target
            .map(|t| self.links.contains(t) || self.toggle.contains(t))
            .unwrap_or(false);
        if !inside && self.is_open() {
            self.close();
        }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }
}
