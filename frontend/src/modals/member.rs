use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlImageElement};

use super::shell::ModalShell;
use crate::config::Config;
use crate::dom::{by_id, Node};

pub const CARD_SELECTOR: &str = ".member";
pub const MODAL_ID: &str = "member-modal";
pub const NAME_ID: &str = "modal-name";
pub const POSITION_ID: &str = "modal-position";
pub const EMAIL_ID: &str = "modal-email";
pub const LINKEDIN_ID: &str = "modal-linkedin";
pub const PHOTO_ID: &str = "modal-image";
const CONTENT_SELECTOR: &str = ".modal-content";
const DEBOUNCE_MS: u32 = 300;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemberRecord {
    pub name: String,
    pub position: String,
    pub email: String,
    pub linkedin: Option<String>,
    pub photo: Option<String>,
}

impl MemberRecord {
    pub fn read<N: Node>(card: &N) -> Self {
        let text = |name: &str| card.attr(name).unwrap_or_default();
        Self {
            name: text("data-name"),
            position: text("data-position"),
            email: text("data-email"),
            linkedin: card.attr("data-linkedin"),
            photo: card.attr("data-image"),
        }
    }

    /// Profile link worth showing: present, non-blank and not the `#` placeholder.
    pub fn linkedin_href(&self) -> Option<&str> {
        self.linkedin
            .as_deref()
            .map(str::trim)
            .filter(|href| !href.is_empty() && *href != "#")
    }

    pub fn photo_or(&self, fallback: &str) -> String {
        match self.photo.as_deref() {
            Some(photo) if !photo.is_empty() => photo.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Generated placeholder avatar keyed by the member's name.
pub fn avatar_url(config: &Config, name: &str) -> String {
    format!(
        "{}?name={}&background={}&color={}",
        config.avatar_endpoint,
        urlencoding::encode(name),
        config.avatar_background,
        config.avatar_color
    )
}

pub fn email_html(email: &str) -> String {
    format!(
        r#"<i class="fas fa-envelope"></i> <a href="mailto:{0}">{0}</a>"#,
        email
    )
}

pub fn apply_linkedin<N: Node>(control: &N, record: &MemberRecord) {
    match record.linkedin_href() {
        Some(href) => {
            control.set_attr("href", href);
            control.set_html(r#"<i class="fab fa-linkedin"></i> LinkedIn Profile"#);
            control.set_style("display", "inline-block");
        }
        None => control.set_style("display", "none"),
    }
}

/// Short guard against re-entrant handling of rapid repeated clicks.
#[derive(Clone, Default)]
pub struct ClickGuard(Rc<Cell<bool>>);

impl ClickGuard {
    /// False while a previous click still holds the guard.
    pub fn try_acquire(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn release(&self) {
        self.0.set(false);
    }
}

/// The modal's text fields, click guard and photo fallback. The photo element
/// itself is supplied by the caller since it may have to be created.
pub struct MemberView<N: Node> {
    config: Config,
    shell: ModalShell<N>,
    name: Option<N>,
    position: Option<N>,
    email: Option<N>,
    linkedin: Option<N>,
    guard: ClickGuard,
    /// Placeholder for the member currently shown; read by the photo's error handler.
    fallback: Rc<RefCell<String>>,
}

impl<N: Node> MemberView<N> {
    pub fn new(
        config: &Config,
        root: N,
        name: Option<N>,
        position: Option<N>,
        email: Option<N>,
        linkedin: Option<N>,
    ) -> Self {
        Self {
            config: config.clone(),
            shell: ModalShell::new(root),
            name,
            position,
            email,
            linkedin,
            guard: ClickGuard::default(),
            fallback: Rc::new(RefCell::new(String::new())),
        }
    }

    pub fn guard(&self) -> &ClickGuard {
        &self.guard
    }

    pub fn fallback(&self) -> String {
        self.fallback.borrow().clone()
    }

    /// Click on a member card. Clicks that started on a link inside the card
    /// are left to navigate and do not take the guard. Returns whether the
    /// modal opened; the caller releases the guard once the debounce ends.
    pub fn on_card_click<P>(&self, card: &N, from_link: bool, photo: P) -> bool
    where
        P: FnOnce() -> Option<N>,
    {
        if from_link || !self.guard.try_acquire() {
            return false;
        }
        self.open(&MemberRecord::read(card), photo());
        true
    }

    pub fn open(&self, record: &MemberRecord, photo: Option<N>) {
        if let Some(name) = &self.name {
            name.set_text(&record.name);
        }
        if let Some(position) = &self.position {
            position.set_text(&record.position);
        }
        if let Some(email) = &self.email {
            email.set_html(&email_html(&record.email));
        }

        // the error handler must see this member's avatar before the new src loads
        let fallback = avatar_url(&self.config, &record.name);
        let src = record.photo_or(&fallback);
        *self.fallback.borrow_mut() = fallback;
        if let Some(photo) = photo {
            photo.set_attr("src", &src);
        }

        if let Some(linkedin) = &self.linkedin {
            apply_linkedin(linkedin, record);
        }
        self.shell.open();
    }

    pub fn close(&self) {
        self.shell.close();
    }

    pub fn on_window_click(&self, target: Option<&N>) {
        self.shell.on_window_click(target);
    }
}

/// Member profile modal.
pub struct MemberModal {
    document: Document,
    view: MemberView<Element>,
    on_photo_error: Closure<dyn FnMut(Event)>,
}

impl MemberModal {
    pub fn find(document: &Document, config: &Config) -> Option<Self> {
        let view = MemberView::new(
            config,
            by_id(document, MODAL_ID)?,
            by_id(document, NAME_ID),
            by_id(document, POSITION_ID),
            by_id(document, EMAIL_ID),
            by_id(document, LINKEDIN_ID),
        );

        let on_photo_error = {
            let fallback = view.fallback.clone();
            Closure::wrap(Box::new(move |event: Event| {
                let Some(img) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
                else {
                    return;
                };
                let fallback = fallback.borrow();
                if !fallback.is_empty() && img.src() != *fallback {
                    img.set_src(&fallback);
                }
            }) as Box<dyn FnMut(Event)>)
        };

        Some(Self {
            document: document.clone(),
            view,
            on_photo_error,
        })
    }

    pub fn on_card_click(&self, card: &Element, target: Option<&Element>) {
        let from_link = target
            .and_then(|t| t.closest("a").ok().flatten())
            .is_some();
        if self.view.on_card_click(card, from_link, || self.photo()) {
            let guard = self.view.guard().clone();
            Timeout::new(DEBOUNCE_MS, move || guard.release()).forget();
        }
    }

    pub fn close(&self) {
        self.view.close();
    }

    pub fn on_window_click(&self, target: Option<&Element>) {
        self.view.on_window_click(target);
    }

    /// The modal's photo element, created in front of the name if the markup lacks one.
    fn photo(&self) -> Option<Element> {
        let photo = match by_id(&self.document, PHOTO_ID) {
            Some(existing) => existing,
            None => {
                let created = self.document.create_element("img").ok()?;
                created.set_id(PHOTO_ID);
                let content = self.view.shell.root().query_selector(CONTENT_SELECTOR).ok()??;
                let before = self.view.name.as_ref().map(|n| n.unchecked_ref::<web_sys::Node>());
                content.insert_before(&created, before).ok()?;
                created
            }
        };
        if let Some(img) = photo.dyn_ref::<HtmlImageElement>() {
            img.set_onerror(Some(self.on_photo_error.as_ref().unchecked_ref()));
        }
        Some(photo)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::dom::fake::FakeNode;
    use crate::modals::shell::SHOW_CLASS;

    struct Fixture {
        root: FakeNode,
        name: FakeNode,
        linkedin: FakeNode,
        view: MemberView<FakeNode>,
    }

    fn fixture() -> Fixture {
        let (root, name, linkedin) = (FakeNode::new(), FakeNode::new(), FakeNode::new());
        let view = MemberView::new(
            &Config::default(),
            root.clone(),
            Some(name.clone()),
            Some(FakeNode::new()),
            Some(FakeNode::new()),
            Some(linkedin.clone()),
        );
        Fixture { root, name, linkedin, view }
    }

    fn member_card() -> FakeNode {
        FakeNode::new()
            .with_attr("data-name", "Asha Rao")
            .with_attr("data-position", "Lead")
            .with_attr("data-email", "asha@example.org")
    }

    const AVATAR: &str = "https://ui-avatars.com/api/?name=Asha%20Rao&background=8b0000&color=fff";

    fn member(linkedin: Option<&str>) -> MemberRecord {
        let mut card = FakeNode::new()
            .with_attr("data-name", "Asha Rao")
            .with_attr("data-position", "Lead")
            .with_attr("data-email", "asha@example.org");
        if let Some(href) = linkedin {
            card = card.with_attr("data-linkedin", href);
        }
        MemberRecord::read(&card)
    }

    #[test]
    fn reads_card_attributes() {
        let record = member(None);
        assert_eq!(record.name, "Asha Rao");
        assert_eq!(record.position, "Lead");
        assert_eq!(record.email, "asha@example.org");
        assert_eq!(record.photo, None);
    }

    #[test]
    fn linkedin_hidden_when_missing_blank_or_placeholder() {
        for linkedin in [None, Some("#"), Some(""), Some("   "), Some(" # ")] {
            let control = FakeNode::new();
            apply_linkedin(&control, &member(linkedin));
            assert_eq!(control.style("display").as_deref(), Some("none"), "{:?}", linkedin);
        }
    }

    #[test]
    fn linkedin_shown_with_exact_href() {
        let control = FakeNode::new();
        apply_linkedin(&control, &member(Some("https://linkedin.com/in/asha")));
        assert_eq!(control.style("display").as_deref(), Some("inline-block"));
        assert_eq!(control.attr("href").as_deref(), Some("https://linkedin.com/in/asha"));
        assert!(control.html().contains("LinkedIn Profile"));
    }

    #[test]
    fn avatar_encodes_the_name() {
        let url = avatar_url(&Config::default(), "Asha Rao");
        assert_eq!(url, "https://ui-avatars.com/api/?name=Asha%20Rao&background=8b0000&color=fff");
    }

    #[test]
    fn photo_falls_back_when_missing_or_empty() {
        let mut record = member(None);
        assert_eq!(record.photo_or("avatar"), "avatar");
        record.photo = Some(String::new());
        assert_eq!(record.photo_or("avatar"), "avatar");
        record.photo = Some("asha.jpg".into());
        assert_eq!(record.photo_or("avatar"), "asha.jpg");
    }

    #[test]
    fn email_is_a_mailto_link() {
        assert!(email_html("a@b.org").contains(r#"<a href="mailto:a@b.org">a@b.org</a>"#));
    }

    #[test]
    fn guard_rejects_until_released() {
        let guard = ClickGuard::default();
        assert!(guard.try_acquire());
        assert!(!guard.try_acquire());
        guard.release();
        assert!(guard.try_acquire());
    }

    #[test]
    fn rapid_second_click_is_ignored_until_release() {
        let f = fixture();
        let card = member_card();

        assert!(f.view.on_card_click(&card, false, || None));
        assert_eq!(f.name.text(), "Asha Rao");
        f.view.close();

        assert!(!f.view.on_card_click(&card, false, || None));
        assert!(!f.root.has_class(SHOW_CLASS));

        f.view.guard().release();
        assert!(f.view.on_card_click(&card, false, || None));
        assert!(f.root.has_class(SHOW_CLASS));
    }

    #[test]
    fn link_click_skips_modal_and_guard() {
        let f = fixture();
        let asked_for_photo = Cell::new(false);

        let opened = f.view.on_card_click(&member_card(), true, || {
            asked_for_photo.set(true);
            None
        });
        assert!(!opened);
        assert!(!asked_for_photo.get());
        assert!(!f.root.has_class(SHOW_CLASS));
        assert!(f.name.text().is_empty());
        assert!(f.view.guard().try_acquire());
    }

    #[test]
    fn missing_photo_uses_the_avatar_as_src_and_fallback() {
        let f = fixture();
        let photo = FakeNode::new();
        f.view.on_card_click(&member_card(), false, || Some(photo.clone()));
        assert_eq!(photo.attr("src").as_deref(), Some(AVATAR));
        assert_eq!(f.view.fallback(), AVATAR);
    }

    #[test]
    fn own_photo_keeps_the_avatar_as_fallback() {
        let f = fixture();
        let photo = FakeNode::new();
        let card = member_card().with_attr("data-image", "asha.jpg");
        f.view.on_card_click(&card, false, || Some(photo.clone()));
        assert_eq!(photo.attr("src").as_deref(), Some("asha.jpg"));
        assert_eq!(f.view.fallback(), AVATAR);
    }

    #[test]
    fn open_without_photo_element_still_fills_the_modal() {
        let f = fixture();
        f.view.open(&MemberRecord::read(&member_card()), None);
        assert_eq!(f.name.text(), "Asha Rao");
        assert_eq!(f.linkedin.style("display").as_deref(), Some("none"));
        assert_eq!(f.view.fallback(), AVATAR);
        assert!(f.root.has_class(SHOW_CLASS));
    }
}
