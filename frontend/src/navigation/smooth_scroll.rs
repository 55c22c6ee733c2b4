use web_sys::{Element, Event, ScrollBehavior, ScrollToOptions, Window};

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
/// Space left for the fixed header above a scrolled-to section.
pub const HEADER_OFFSET: f64 = 100.0;

/// Id named by an in-page href, `None` for anything else or a bare `#`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document-relative scroll position that puts a target just below the header.
pub fn scroll_destination(target_top: f64, page_offset: f64) -> f64 {
    target_top + page_offset - HEADER_OFFSET
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Click on an in-page anchor. Without a matching element the native jump proceeds.
pub fn follow(window: &Window, event: &Event, anchor: &Element) {
    let Some(document) = window.document() else {
        return;
    };
    let href = anchor.get_attribute("href").unwrap_or_default();
    let Some(target) = fragment_id(&href).and_then(|id| document.get_element_by_id(id)) else {
        return;
    };
    event.prevent_default();
    let top = target.get_bounding_client_rect().top();
    let offset = window.page_y_offset().unwrap_or(0.0);
    smooth_scroll_to(window, scroll_destination(top, offset));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#events"), Some("events"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("about.html"), None);
    }

    #[test]
    fn destination_subtracts_header() {
        assert_eq!(scroll_destination(250.0, 1000.0), 1150.0);
        assert_eq!(scroll_destination(-300.0, 400.0), 0.0);
    }
}
