use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom::Node;
use crate::page::PageSnapshot;

/// How far above a section's top it already counts as current.
pub const ACTIVATION_MARGIN: f64 = 150.0;
const DEFAULT_COLOR: &str = "#333";
const DEFAULT_BORDER: &str = "2px solid transparent";
const ACCENT_COLOR: &str = "#007bff";
const ACCENT_BORDER: &str = "2px solid #007bff";

/// A section as seen at scroll time.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPosition {
    pub top: f64,
    pub id: Option<String>,
}

/// The last section, in document order, whose top minus the margin is at or
/// above `scroll_y`. A matching section without an id clears the match.
pub fn current_section(sections: &[SectionPosition], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|s| scroll_y >= s.top - ACTIVATION_MARGIN)
        .last()
        .and_then(|s| s.id.as_deref())
}

pub fn highlight<N: Node>(links: &[N], current: Option<&str>) {
    for link in links {
        link.set_style("color", DEFAULT_COLOR);
        link.set_style("border-bottom", DEFAULT_BORDER);

        let href = link.attr("href").unwrap_or_default();
        let fragment = href.strip_prefix('#');
        if current.is_some() && fragment == current {
            link.set_style("color", ACCENT_COLOR);
            link.set_style("border-bottom", ACCENT_BORDER);
        }
    }
}

/// Scroll handler: reads live section offsets and restyles the nav links.
pub fn update(snapshot: &PageSnapshot, scroll_y: f64) {
    let positions: Vec<SectionPosition> = snapshot
        .sections
        .iter()
        .map(|section| SectionPosition {
            top: section
                .dyn_ref::<HtmlElement>()
                .map(|el| el.offset_top() as f64)
                .unwrap_or_default(),
            id: section.get_attribute("id"),
        })
        .collect();
    highlight(&snapshot.nav_links, current_section(&positions, scroll_y));
}
