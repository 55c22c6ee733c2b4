use web_sys::{Document, Element};

use crate::dom::{query, Generation, Node};

pub const HEADING_SELECTOR: &str = ".hero h2";
pub const CURSOR_CLASS: &str = "typing-cursor";
pub const GRADIENT_CLASS: &str = "animate-text-gradient";
const START_DELAY_MS: u32 = 500;
const CHAR_DELAY_MS: u32 = 100;
const FINISH_DELAY_MS: u32 = 1000;

/// Reveals a fixed string one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    typed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self { chars: text.chars().collect(), typed: 0 }
    }

    /// Types one more character and returns the visible prefix, or `None` once done.
    pub fn step(&mut self) -> Option<String> {
        if self.typed >= self.chars.len() {
            return None;
        }
        self.typed += 1;
        Some(self.chars[..self.typed].iter().collect())
    }
}

/// Typing effect on the hero heading.
pub struct Typing {
    heading: Element,
    text: String,
    generation: Generation,
}

impl Typing {
    pub fn find(document: &Document, text: &str) -> Option<Self> {
        Some(Self {
            heading: query(document, HEADING_SELECTOR)?,
            text: text.to_string(),
            generation: Generation::default(),
        })
    }

    /// Clears the heading and types the title again. A sequence already
    /// running is abandoned.
    pub fn start(&self) {
        let ticket = self.generation.advance();
        self.heading.set_text("");
        self.heading.remove_class(GRADIENT_CLASS);
        self.heading.add_class(CURSOR_CLASS);

        let heading = self.heading.clone();
        let generation = self.generation.clone();
        let writer = Typewriter::new(&self.text);
        self.generation.after(ticket, START_DELAY_MS, move || {
            type_next(heading, generation, ticket, writer)
        });
    }
}

fn type_next(heading: Element, generation: Generation, ticket: u64, mut writer: Typewriter) {
    match writer.step() {
        Some(prefix) => {
            heading.set_text(&prefix);
            let next = generation.clone();
            generation.after(ticket, CHAR_DELAY_MS, move || {
                type_next(heading, next, ticket, writer)
            });
        }
        None => generation.after(ticket, FINISH_DELAY_MS, move || {
            heading.remove_class(CURSOR_CLASS);
            heading.add_class(GRADIENT_CLASS);
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_every_prefix_then_stops() {
        let mut writer = Typewriter::new("AI 3");
        let typed: Vec<String> = std::iter::from_fn(|| writer.step()).collect();
        assert_eq!(typed, vec!["A", "AI", "AI ", "AI 3"]);
        assert_eq!(writer.step(), None);
    }

    #[test]
    fn multibyte_characters_are_single_steps() {
        let mut writer = Typewriter::new("é3");
        assert_eq!(writer.step().as_deref(), Some("é"));
        assert_eq!(writer.step().as_deref(), Some("é3"));
    }

    #[test]
    fn empty_text_finishes_immediately() {
        assert_eq!(Typewriter::new("").step(), None);
    }
}
