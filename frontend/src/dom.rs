use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{Error, Result};

/// The slice of element behaviour the controllers need. Implemented for real
/// DOM elements and for `fake::FakeNode` in tests.
pub trait Node {
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    fn set_html(&self, html: &str);
    /// True if `other` is this node or one of its descendants.
    fn contains(&self, other: &Self) -> bool;
    fn is_same(&self, other: &Self) -> bool;
    fn clear_children(&self);
    fn append_element(&self, child: &Self);
    fn child_elements(&self) -> Vec<Self>
    where
        Self: Sized;

    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

impl Node for Element {
    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        let _ = self.set_attribute(name, value);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_html(&self, html: &str) {
        self.set_inner_html(html);
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other;
        web_sys::Node::contains(self, Some(other))
    }

    fn is_same(&self, other: &Self) -> bool {
        self == other
    }

    fn clear_children(&self) {
        self.set_inner_html("");
    }

    fn append_element(&self, child: &Self) {
        let _ = self.append_child(child);
    }

    fn child_elements(&self) -> Vec<Self> {
        let list = self.children();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }
}

/// Creates detached elements of the same kind as the tree they go into.
pub trait ElementFactory<N> {
    fn create(&self, tag: &str) -> Option<N>;
}

impl ElementFactory<Element> for Document {
    fn create(&self, tag: &str) -> Option<Element> {
        self.create_element(tag).ok()
    }
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(Error::NoDocument)
}

/// Every element matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn by_id(root: &Document, id: &str) -> Option<Element> {
    root.get_element_by_id(id)
}

/// The event target as an element, if it is one.
pub fn target_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Registers a listener that lives for the rest of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Invalidation counter for timer chains. A sequence takes a ticket when it
/// starts; starting another sequence advances the counter so callbacks
/// holding the old ticket become no-ops.
#[derive(Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    pub fn advance(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }

    /// Runs `f` after `millis` unless the generation moved past `ticket` first.
    pub fn after<F>(&self, ticket: u64, millis: u32, f: F)
    where
        F: FnOnce() + 'static,
    {
        let generation = self.clone();
        Timeout::new(millis, move || {
            if generation.is_current(ticket) {
                f();
            }
        })
        .forget();
    }
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::{ElementFactory, Node};

    #[derive(Default)]
    struct State {
        attrs: HashMap<String, String>,
        classes: Vec<String>,
        styles: HashMap<String, String>,
        text: String,
        html: String,
        children: Vec<FakeNode>,
    }

    /// In-memory element for handler tests.
    #[derive(Clone, Default)]
    pub struct FakeNode(Rc<RefCell<State>>);

    impl FakeNode {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_attr(self, name: &str, value: &str) -> Self {
            self.set_attr(name, value);
            self
        }

        pub fn with_child(self, child: &FakeNode) -> Self {
            self.0.borrow_mut().children.push(child.clone());
            self
        }

        pub fn style(&self, property: &str) -> Option<String> {
            self.0.borrow().styles.get(property).cloned()
        }

        pub fn text(&self) -> String {
            self.0.borrow().text.clone()
        }

        pub fn html(&self) -> String {
            self.0.borrow().html.clone()
        }
    }

    impl Node for FakeNode {
        fn attr(&self, name: &str) -> Option<String> {
            self.0.borrow().attrs.get(name).cloned()
        }

        fn set_attr(&self, name: &str, value: &str) {
            self.0.borrow_mut().attrs.insert(name.to_string(), value.to_string());
        }

        fn has_class(&self, class: &str) -> bool {
            self.0.borrow().classes.iter().any(|c| c == class)
        }

        fn add_class(&self, class: &str) {
            if !self.has_class(class) {
                self.0.borrow_mut().classes.push(class.to_string());
            }
        }

        fn remove_class(&self, class: &str) {
            self.0.borrow_mut().classes.retain(|c| c != class);
        }

        fn set_style(&self, property: &str, value: &str) {
            self.0.borrow_mut().styles.insert(property.to_string(), value.to_string());
        }

        fn set_text(&self, text: &str) {
            self.0.borrow_mut().text = text.to_string();
        }

        fn set_html(&self, html: &str) {
            self.0.borrow_mut().html = html.to_string();
        }

        fn contains(&self, other: &Self) -> bool {
            self.is_same(other) || self.0.borrow().children.iter().any(|c| c.contains(other))
        }

        fn is_same(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }

        fn clear_children(&self) {
            self.0.borrow_mut().children.clear();
        }

        fn append_element(&self, child: &Self) {
            self.0.borrow_mut().children.push(child.clone());
        }

        fn child_elements(&self) -> Vec<Self> {
            self.0.borrow().children.clone()
        }
    }

    /// Hands out fresh fake elements and remembers the requested tags.
    #[derive(Default)]
    pub struct FakeFactory {
        pub tags: RefCell<Vec<String>>,
    }

    impl ElementFactory<FakeNode> for FakeFactory {
        fn create(&self, tag: &str) -> Option<FakeNode> {
            self.tags.borrow_mut().push(tag.to_string());
            Some(FakeNode::new())
        }
    }
}
