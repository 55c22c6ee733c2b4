use std::cell::RefCell;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use super::carousel::{mark_active, Carousel, INDEX_ATTR, THUMB_CLASS};
use super::shell::ModalShell;
use crate::dom::{by_id, ElementFactory, Generation, Node};

pub const CARD_SELECTOR: &str = ".event";
pub const MODAL_ID: &str = "event-modal";
pub const IMAGE_ID: &str = "event-modal-img";
pub const TITLE_ID: &str = "event-modal-title";
pub const DESCRIPTION_ID: &str = "event-modal-description";
pub const THUMBS_ID: &str = "gallery-thumbs";
pub const PREV_ID: &str = "prev-img";
pub const NEXT_ID: &str = "next-img";
const SWAP_DELAY_MS: u32 = 200;

/// What an event card carries, exactly as found on the page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventCard {
    pub title: String,
    pub full_details: Option<String>,
    pub summary: String,
    pub phones: Option<String>,
    pub images: Option<String>,
    pub image: Option<String>,
}

impl EventCard {
    pub fn read(card: &Element) -> Self {
        let inner_text = |selector: &str| {
            card.query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|el| el.inner_text())
                .unwrap_or_default()
        };
        Self {
            title: inner_text("h3"),
            full_details: card.get_attribute("data-full-details"),
            summary: inner_text("p"),
            phones: card.get_attribute("data-phones"),
            images: card.get_attribute("data-modal-images"),
            image: card
                .query_selector("img")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                .map(|img| img.src()),
        }
    }
}

/// An event ready to be shown. Missing phones give no contact block; missing
/// gallery images fall back to the card's own picture.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub title: String,
    pub details: String,
    pub phones: Vec<String>,
    pub images: Vec<String>,
}

impl From<EventCard> for EventRecord {
    fn from(card: EventCard) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        let images = match non_empty(card.images) {
            Some(raw) => split_list(&raw),
            None => card.image.into_iter().collect(),
        };
        Self {
            title: card.title,
            details: non_empty(card.full_details).unwrap_or(card.summary),
            phones: non_empty(card.phones).map(|raw| split_list(&raw)).unwrap_or_default(),
            images,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", digits)
}

pub fn description_html(record: &EventRecord) -> String {
    let mut html = format!("<p>{}</p>", record.details);
    if record.phones.is_empty() {
        return html;
    }

    html.push_str(
        r#"<div class="modal-details-phones"><h4>Contact Organizers</h4><div class="phone-list">"#,
    );
    for phone in &record.phones {
        html.push_str(&format!(
            r#"<div class="phone-item"><i class="fas fa-phone"></i><a href="{}" style="color: #fff; text-decoration: none;">{}</a></div>"#,
            tel_href(phone),
            phone
        ));
    }
    html.push_str("</div></div>");
    html
}

/// Main-image change waiting for the fade-out to finish.
pub struct ImageSwap<N: Node> {
    image: N,
    src: String,
}

impl<N: Node> ImageSwap<N> {
    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn apply(&self) {
        self.image.set_attr("src", &self.src);
        self.image.set_style("opacity", "1");
    }
}

/// The modal's elements and carousel state. Timers stay with the caller:
/// every navigation returns the swap to run once the image has faded out.
pub struct EventView<N: Node> {
    shell: ModalShell<N>,
    image: Option<N>,
    title: Option<N>,
    description: Option<N>,
    thumbs: Option<N>,
    carousel: RefCell<Carousel>,
}

impl<N: Node + Clone> EventView<N> {
    pub fn new(root: N, image: Option<N>, title: Option<N>, description: Option<N>, thumbs: Option<N>) -> Self {
        Self {
            shell: ModalShell::new(root),
            image,
            title,
            description,
            thumbs,
            carousel: RefCell::new(Carousel::default()),
        }
    }

    pub fn open<F: ElementFactory<N>>(&self, record: &EventRecord, factory: &F) -> Option<ImageSwap<N>> {
        self.carousel.borrow_mut().reset(record.images.clone());
        if let Some(title) = &self.title {
            title.set_text(&record.title);
        }
        self.rebuild_strip(factory);
        let swap = self.show_current();
        if let Some(description) = &self.description {
            description.set_html(&description_html(record));
        }
        self.shell.open();
        swap
    }

    pub fn next(&self) -> Option<ImageSwap<N>> {
        self.carousel.borrow_mut().next();
        self.show_current()
    }

    pub fn prev(&self) -> Option<ImageSwap<N>> {
        self.carousel.borrow_mut().prev();
        self.show_current()
    }

    pub fn jump(&self, index: usize) -> Option<ImageSwap<N>> {
        self.carousel.borrow_mut().jump(index);
        self.show_current()
    }

    pub fn close(&self) {
        self.shell.close();
    }

    pub fn on_window_click(&self, target: Option<&N>) {
        self.shell.on_window_click(target);
    }

    /// Marks the current thumbnail and fades the main image out. An event
    /// without any picture hides the image so the previous one is not left behind.
    fn show_current(&self) -> Option<ImageSwap<N>> {
        let (index, src) = {
            let carousel = self.carousel.borrow();
            (carousel.index(), carousel.current().map(str::to_string))
        };

        if let Some(thumbs) = &self.thumbs {
            let strip: Vec<N> = thumbs
                .child_elements()
                .into_iter()
                .filter(|thumb| thumb.has_class(THUMB_CLASS))
                .collect();
            mark_active(&strip, index);
        }

        let image = self.image.as_ref()?;
        let Some(src) = src else {
            image.set_style("visibility", "hidden");
            return None;
        };
        image.set_style("visibility", "visible");
        image.set_style("opacity", "0");
        Some(ImageSwap { image: image.clone(), src })
    }

    fn rebuild_strip<F: ElementFactory<N>>(&self, factory: &F) {
        let Some(thumbs) = &self.thumbs else {
            return;
        };
        thumbs.clear_children();

        let carousel = self.carousel.borrow();
        if !carousel.has_strip() {
            return;
        }
        for (index, src) in carousel.images().iter().enumerate() {
            let Some(thumb) = factory.create("img") else {
                continue;
            };
            thumb.set_attr("src", src);
            thumb.add_class(THUMB_CLASS);
            thumb.set_attr(INDEX_ATTR, &index.to_string());
            thumbs.append_element(&thumb);
        }
    }
}

/// Position stored on a thumbnail by the strip builder.
pub fn thumbnail_index<N: Node>(thumb: &N) -> Option<usize> {
    thumb.attr(INDEX_ATTR)?.parse().ok()
}

/// Event detail modal with its image carousel.
pub struct EventModal {
    document: Document,
    view: EventView<Element>,
    swaps: Generation,
}

impl EventModal {
    pub fn find(document: &Document) -> Option<Self> {
        let root = by_id(document, MODAL_ID)?;
        Some(Self {
            document: document.clone(),
            view: EventView::new(
                root,
                by_id(document, IMAGE_ID),
                by_id(document, TITLE_ID),
                by_id(document, DESCRIPTION_ID),
                by_id(document, THUMBS_ID),
            ),
            swaps: Generation::default(),
        })
    }

    pub fn open(&self, card: &Element) {
        let record = EventRecord::from(EventCard::read(card));
        debug!("opening event '{}' with {} image(s)", record.title, record.images.len());
        self.schedule(self.view.open(&record, &self.document));
    }

    pub fn next(&self) {
        self.schedule(self.view.next());
    }

    pub fn prev(&self) {
        self.schedule(self.view.prev());
    }

    /// Delegated click on the thumbnail strip.
    pub fn pick_thumbnail(&self, target: &Element) {
        let index = target
            .closest(&format!(".{}", THUMB_CLASS))
            .ok()
            .flatten()
            .and_then(|thumb| thumbnail_index(&thumb));
        if let Some(index) = index {
            self.schedule(self.view.jump(index));
        }
    }

    pub fn close(&self) {
        self.view.close();
    }

    pub fn on_window_click(&self, target: Option<&Element>) {
        self.view.on_window_click(target);
    }

    /// A newer navigation supersedes any swap still waiting, including one
    /// that would bring back a picture after switching to an event without any.
    fn schedule(&self, swap: Option<ImageSwap<Element>>) {
        let ticket = self.swaps.advance();
        if let Some(swap) = swap {
            self.swaps.after(ticket, SWAP_DELAY_MS, move || swap.apply());
        }
    }
}
