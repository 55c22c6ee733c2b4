use crate::dom::Node;

pub const SHOW_CLASS: &str = "show";
pub const CLOSE_SELECTOR: &str = ".close";

/// Visibility of one modal root. Each modal owns its own shell.
pub struct ModalShell<N: Node> {
    root: N,
}

impl<N: Node> ModalShell<N> {
    pub fn new(root: N) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.root.has_class(SHOW_CLASS)
    }

    pub fn open(&self) {
        self.root.add_class(SHOW_CLASS);
    }

    pub fn close(&self) {
        self.root.remove_class(SHOW_CLASS);
    }

    /// Only a click landing on the dimmed root itself, not its content, closes.
    pub fn on_window_click(&self, target: Option<&N>) {
        if target.is_some_and(|t| self.root.is_same(t)) {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeNode;

    #[test]
    fn backdrop_click_closes_but_content_click_does_not() {
        let content = FakeNode::new();
        let root = FakeNode::new().with_child(&content);
        let shell = ModalShell::new(root.clone());
        shell.open();

        shell.on_window_click(Some(&content));
        assert!(shell.is_open());
        shell.on_window_click(None);
        assert!(shell.is_open());
        shell.on_window_click(Some(&root));
        assert!(!shell.is_open());
    }

    #[test]
    fn closing_one_modal_leaves_the_other() {
        let event = ModalShell::new(FakeNode::new());
        let member = ModalShell::new(FakeNode::new());
        event.open();
        member.open();

        let event_root = event.root().clone();
        member.on_window_click(Some(&event_root));
        event.on_window_click(Some(&event_root));
        assert!(!event.is_open());
        assert!(member.is_open());
    }
}
