use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MouseEvent, Window};

use crate::bindings::{Action, Binding, Scope, BINDINGS};
use crate::config::Config;
use crate::countdown;
use crate::dom::{self, by_id, listen, query, query_all, query_all_in, target_element};
use crate::effects::{fade_in, reveal, tilt::Tilt, typing::Typing};
use crate::error::{Error, Result};
use crate::modals::{event::EventModal, member::MemberModal};
use crate::navigation::menu::{self, NavMenu};
use crate::navigation::scroll_markers::{self, ScrollMarkers};
use crate::navigation::{active_link, smooth_scroll};
use crate::page::{log_page_info, PageSnapshot};

/// Controllers for every behaviour present on the page. Built once at start;
/// a missing controller means its markup is absent and its bindings are skipped.
pub struct App {
    window: Window,
    snapshot: PageSnapshot,
    menu: Option<NavMenu<Element>>,
    markers: ScrollMarkers<Element>,
    event_modal: Option<EventModal>,
    member_modal: Option<MemberModal>,
    tilt: Tilt,
}

pub fn mount(config: Config) -> Result<Rc<App>> {
    let window = dom::window()?;
    let document = window.document().ok_or(Error::NoDocument)?;

    start_each(vec![feature("fade-in", || fade_in::install(&window, &document))]);

    let snapshot = PageSnapshot::capture(&document);
    log_page_info(&snapshot, &config.site_name);

    let menu = match (
        query(&document, menu::TOGGLE_SELECTOR),
        query(&document, menu::LINKS_SELECTOR),
    ) {
        (Some(toggle), Some(links)) => Some(NavMenu::new(toggle, links)),
        _ => None,
    };

    let app = Rc::new(App {
        markers: ScrollMarkers::new(
            query(&document, scroll_markers::HEADER_SELECTOR),
            by_id(&document, scroll_markers::BACK_TO_TOP_ID),
        ),
        event_modal: EventModal::find(&document),
        member_modal: MemberModal::find(&document, &config),
        tilt: Tilt::new(&config.tilt_exempt),
        window,
        snapshot,
        menu,
    });
    let bound = App::bind(&app, &document);
    debug!("registered {} listeners", bound);

    let started = start_each(vec![
        feature("reveal", || reveal::observe(&document)),
        feature("typing", || {
            if let Some(typing) = Typing::find(&document, &config.hero_title) {
                typing.start();
            }
            Ok(())
        }),
        feature("countdown", || {
            countdown::start(&document, config.countdown_target);
            Ok(())
        }),
    ]);

    info!("page behaviours mounted ({} effects started)", started);
    Ok(app)
}

type Starter<'a> = (&'static str, Box<dyn FnOnce() -> Result<()> + 'a>);

fn feature<'a>(name: &'static str, start: impl FnOnce() -> Result<()> + 'a) -> Starter<'a> {
    (name, Box::new(start))
}

/// Starts each feature in order. A failure is logged and only disables that feature.
fn start_each(features: Vec<Starter<'_>>) -> usize {
    let mut started = 0;
    for (name, start) in features {
        match start() {
            Ok(()) => started += 1,
            Err(err) => warn!("{} disabled: {}", name, err),
        }
    }
    started
}

impl App {
    /// Registers every table entry whose behaviour is present. Returns how
    /// many listeners were added.
    fn bind(app: &Rc<App>, document: &Document) -> usize {
        let mut bound = 0;
        for binding in BINDINGS.iter().filter(|b| app.supports(b.action)) {
            for (target, current) in app.resolve(document, binding) {
                let handler = {
                    let app = app.clone();
                    let action = binding.action;
                    move |event: Event| app.dispatch(action, &event, current.as_ref())
                };
                match listen(&target, binding.event, handler) {
                    Ok(()) => bound += 1,
                    Err(err) => warn!("could not bind {:?} on {}: {}", binding.action, binding.event, err),
                }
            }
        }
        bound
    }

    fn resolve(&self, document: &Document, binding: &Binding) -> Vec<(EventTarget, Option<Element>)> {
        match binding.scope {
            Scope::Window => vec![(self.window.clone().into(), None)],
            Scope::Document => vec![(document.clone().into(), None)],
            Scope::Each(selector) => query_all(document, selector)
                .into_iter()
                .map(|el| (el.clone().into(), Some(el)))
                .collect(),
            Scope::Id(id) => by_id(document, id)
                .map(|el| (el.clone().into(), Some(el)))
                .into_iter()
                .collect(),
            Scope::WithinId(id, selector) => by_id(document, id)
                .map(|root| query_all_in(&root, selector))
                .unwrap_or_default()
                .into_iter()
                .map(|el| (el.clone().into(), Some(el)))
                .collect(),
        }
    }

    fn supports(&self, action: Action) -> bool {
        match action {
            Action::ToggleMenu
            | Action::CloseMenu
            | Action::DismissMenu
            | Action::DismissMenuOnEscape => self.menu.is_some(),
            Action::UpdateScrollMarkers => !self.markers.is_empty(),
            Action::OpenEvent
            | Action::PrevImage
            | Action::NextImage
            | Action::PickThumbnail
            | Action::CloseEventModal => self.event_modal.is_some(),
            Action::OpenMember | Action::CloseMemberModal => self.member_modal.is_some(),
            Action::DismissModalBackdrop => {
                self.event_modal.is_some() || self.member_modal.is_some()
            }
            Action::SmoothScroll
            | Action::HighlightNav
            | Action::BackToTop
            | Action::Tilt
            | Action::Untilt => true,
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn dispatch(&self, action: Action, event: &Event, current: Option<&Element>) {
        let target = target_element(event);
        match action {
            Action::ToggleMenu => {
                // keep the document-level outside-click check from seeing this click
                event.stop_propagation();
                if let Some(menu) = &self.menu {
                    menu.toggle();
                }
            }
            Action::CloseMenu => {
                if let Some(menu) = &self.menu {
                    menu.close();
                }
            }
            Action::DismissMenu => {
                if let Some(menu) = &self.menu {
                    menu.on_document_click(target.as_ref());
                }
            }
            Action::DismissMenuOnEscape => {
                if let (Some(menu), Some(key)) = (&self.menu, event.dyn_ref::<KeyboardEvent>()) {
                    menu.on_key(&key.key());
                }
            }
            Action::SmoothScroll => {
                if let Some(anchor) = current {
                    smooth_scroll::follow(&self.window, event, anchor);
                }
            }
            Action::HighlightNav => active_link::update(&self.snapshot, self.scroll_y()),
            Action::UpdateScrollMarkers => self.markers.update(self.scroll_y()),
            Action::BackToTop => smooth_scroll::smooth_scroll_to(&self.window, 0.0),
            Action::OpenEvent => {
                if let (Some(modal), Some(card)) = (&self.event_modal, current) {
                    modal.open(card);
                }
            }
            Action::PrevImage => {
                if let Some(modal) = &self.event_modal {
                    modal.prev();
                }
            }
            Action::NextImage => {
                if let Some(modal) = &self.event_modal {
                    modal.next();
                }
            }
            Action::PickThumbnail => {
                if let (Some(modal), Some(target)) = (&self.event_modal, &target) {
                    modal.pick_thumbnail(target);
                }
            }
            Action::CloseEventModal => {
                if let Some(modal) = &self.event_modal {
                    modal.close();
                }
            }
            Action::OpenMember => {
                if let (Some(modal), Some(card)) = (&self.member_modal, current) {
                    modal.on_card_click(card, target.as_ref());
                }
            }
            Action::CloseMemberModal => {
                if let Some(modal) = &self.member_modal {
                    modal.close();
                }
            }
            Action::DismissModalBackdrop => {
                if let Some(modal) = &self.event_modal {
                    modal.on_window_click(target.as_ref());
                }
                if let Some(modal) = &self.member_modal {
                    modal.on_window_click(target.as_ref());
                }
            }
            Action::Tilt => {
                if let (Some(card), Some(mouse)) = (current, event.dyn_ref::<MouseEvent>()) {
                    self.tilt.on_move(card, mouse);
                }
            }
            Action::Untilt => {
                if let Some(card) = current {
                    self.tilt.on_leave(card);
                }
            }
        }
    }
}
