use web_sys::{Element, MouseEvent};

use crate::dom::Node;

pub const SELECTORS: [&str; 3] = [".member", ".event", ".info-card"];
const RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) scale(1)";

/// Rotation in degrees for a pointer at (`x`, `y`) inside a `width` x `height` box.
pub fn rotation(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let rotate_x = -((y - height / 2.0) / 10.0);
    let rotate_y = (x - width / 2.0) / 10.0;
    (rotate_x, rotate_y)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) scale(1.05)",
        rotate_x, rotate_y
    )
}

pub fn apply<N: Node>(node: &N, x: f64, y: f64, width: f64, height: f64) {
    let (rotate_x, rotate_y) = rotation(x, y, width, height);
    node.set_style("transform", &tilt_transform(rotate_x, rotate_y));
    node.set_style("transition", "transform 0.1s ease");
}

pub fn reset<N: Node>(node: &N) {
    node.set_style("transform", RESET);
    node.set_style("transition", "transform 0.5s ease");
}

/// Hover tilt for cards outside the exempt region.
pub struct Tilt {
    exempt: String,
}

impl Tilt {
    pub fn new(exempt: &str) -> Self {
        Self { exempt: exempt.to_string() }
    }

    fn is_exempt(&self, card: &Element) -> bool {
        !self.exempt.is_empty() && matches!(card.closest(&self.exempt), Ok(Some(_)))
    }

    pub fn on_move(&self, card: &Element, event: &MouseEvent) {
        if self.is_exempt(card) {
            return;
        }
        let rect = card.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        apply(card, x, y, rect.width(), rect.height());
    }

    pub fn on_leave(&self, card: &Element) {
        reset(card);
    }
}
