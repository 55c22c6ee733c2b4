use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{query_all, Node};
use crate::error::Result;

pub const SELECTOR: &str = ".event, .member, .timeline-item, .info-card";
const TRANSITION: &str =
    "opacity 0.8s cubic-bezier(0.5, 0, 0, 1), transform 0.8s cubic-bezier(0.5, 0, 0, 1)";
const HIDDEN_OFFSET: &str = "translateY(30px)";
const SETTLED: &str = "translateY(0)";
const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -100px 0px";

/// Stagger by position in the combined query result, in groups of three.
pub fn stagger_delay_ms(index: usize) -> usize {
    (index % 3) * 150
}

pub fn prepare<N: Node>(node: &N, index: usize) {
    node.set_style("opacity", "0");
    node.set_style("transform", HIDDEN_OFFSET);
    node.set_style("transition", TRANSITION);
    node.set_style("transition-delay", &format!("{}ms", stagger_delay_ms(index)));
}

/// Settled end state. Applying it again on later intersections changes nothing.
pub fn reveal<N: Node>(node: &N) {
    node.set_style("opacity", "1");
    node.set_style("transform", SETTLED);
}

pub fn observe(document: &Document) -> Result<()> {
    let cards = query_all(document, SELECTOR);
    if cards.is_empty() {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(|entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                reveal(&entry.target());
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for (index, card) in cards.iter().enumerate() {
        prepare(card, index);
        observer.observe(card);
    }
    debug!("reveal observing {} cards", cards.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeNode;

    #[test]
    fn stagger_cycles_every_three() {
        let delays: Vec<usize> = (0..7).map(stagger_delay_ms).collect();
        assert_eq!(delays, vec![0, 150, 300, 0, 150, 300, 0]);
    }

    #[test]
    fn prepared_cards_start_hidden_and_offset() {
        let card = FakeNode::new();
        prepare(&card, 4);
        assert_eq!(card.style("opacity").as_deref(), Some("0"));
        assert_eq!(card.style("transform").as_deref(), Some("translateY(30px)"));
        assert_eq!(card.style("transition-delay").as_deref(), Some("150ms"));
        assert!(card.style("transition").unwrap().contains("0.8s"));
    }

    #[test]
    fn reveal_settles_and_is_idempotent() {
        let card = FakeNode::new();
        prepare(&card, 0);
        reveal(&card);
        reveal(&card);
        assert_eq!(card.style("opacity").as_deref(), Some("1"));
        assert_eq!(card.style("transform").as_deref(), Some("translateY(0)"));
    }
}
