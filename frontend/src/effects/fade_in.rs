use gloo_timers::callback::Timeout;
use web_sys::{Document, Element, Window};

use crate::dom::{listen, Node};
use crate::error::Result;

const LATE_ATTACH_DELAY_MS: u32 = 100;

pub fn hide<N: Node>(body: &N) {
    body.set_style("opacity", "0");
    body.set_style("transition", "opacity 0.5s ease");
}

pub fn show<N: Node>(body: &N) {
    body.set_style("opacity", "1");
}

/// Fades the body in once the DOM is parsed, or after a short delay when the
/// script attached late. The full `load` event forces it visible either way.
pub fn install(window: &Window, document: &Document) -> Result<()> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let body: Element = body.into();
    hide(&body);

    if document.ready_state() == "loading" {
        let body = body.clone();
        listen(document, "DOMContentLoaded", move |_| show(&body))?;
    } else {
        let body = body.clone();
        Timeout::new(LATE_ATTACH_DELAY_MS, move || show(&body)).forget();
    }

    listen(window, "load", move |_| show(&body))?;
    Ok(())
}
