use crate::dom::Node;

pub const THUMB_CLASS: &str = "thumb";
pub const ACTIVE_CLASS: &str = "active";
pub const INDEX_ATTR: &str = "data-index";

/// Image list and position of the open event. Moves wrap in both directions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
}

impl Carousel {
    pub fn reset(&mut self, images: Vec<String>) {
        self.images = images;
        self.index = 0;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Thumbnails only make sense with something to choose between.
    pub fn has_strip(&self) -> bool {
        self.images.len() > 1
    }

    pub fn next(&mut self) -> usize {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        let len = self.images.len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
        self.index
    }

    /// Jumps to `index`; out-of-range picks are ignored.
    pub fn jump(&mut self, index: usize) -> usize {
        if index < self.images.len() {
            self.index = index;
        }
        self.index
    }
}

pub fn mark_active<N: Node>(thumbs: &[N], index: usize) {
    for (i, thumb) in thumbs.iter().enumerate() {
        thumb.set_class(ACTIVE_CLASS, i == index);
    }
}
