//! Which page events drive which behaviour. `app::App::bind` walks this table;
//! nothing else in the crate registers DOM listeners for these behaviours.

use crate::effects::tilt;
use crate::modals::{event, member, shell};
use crate::navigation::{menu, scroll_markers, smooth_scroll};
use crate::page::NAV_LINKS_SELECTOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Window,
    Document,
    /// Every element matching the selector when the page is mounted.
    Each(&'static str),
    /// The element with this id.
    Id(&'static str),
    /// Elements matching the selector inside the element with this id.
    WithinId(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleMenu,
    CloseMenu,
    DismissMenu,
    DismissMenuOnEscape,
    SmoothScroll,
    HighlightNav,
    UpdateScrollMarkers,
    BackToTop,
    OpenEvent,
    PrevImage,
    NextImage,
    PickThumbnail,
    CloseEventModal,
    OpenMember,
    CloseMemberModal,
    DismissModalBackdrop,
    Tilt,
    Untilt,
}

#[cfg(test)]
impl Action {
    pub const ALL: [Action; 18] = [
        Action::ToggleMenu,
        Action::CloseMenu,
        Action::DismissMenu,
        Action::DismissMenuOnEscape,
        Action::SmoothScroll,
        Action::HighlightNav,
        Action::UpdateScrollMarkers,
        Action::BackToTop,
        Action::OpenEvent,
        Action::PrevImage,
        Action::NextImage,
        Action::PickThumbnail,
        Action::CloseEventModal,
        Action::OpenMember,
        Action::CloseMemberModal,
        Action::DismissModalBackdrop,
        Action::Tilt,
        Action::Untilt,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub scope: Scope,
    pub event: &'static str,
    pub action: Action,
}

const fn on(scope: Scope, event: &'static str, action: Action) -> Binding {
    Binding { scope, event, action }
}

pub const BINDINGS: &[Binding] = &[
    // navigation
    on(Scope::Each(menu::TOGGLE_SELECTOR), "click", Action::ToggleMenu),
    on(Scope::Each(NAV_LINKS_SELECTOR), "click", Action::CloseMenu),
    on(Scope::Document, "click", Action::DismissMenu),
    on(Scope::Document, "keydown", Action::DismissMenuOnEscape),
    on(Scope::Each(smooth_scroll::ANCHOR_SELECTOR), "click", Action::SmoothScroll),
    on(Scope::Window, "scroll", Action::HighlightNav),
    on(Scope::Window, "scroll", Action::UpdateScrollMarkers),
    on(Scope::Id(scroll_markers::BACK_TO_TOP_ID), "click", Action::BackToTop),
    // event modal
    on(Scope::Each(event::CARD_SELECTOR), "click", Action::OpenEvent),
    on(Scope::Id(event::PREV_ID), "click", Action::PrevImage),
    on(Scope::Id(event::NEXT_ID), "click", Action::NextImage),
    on(Scope::Id(event::THUMBS_ID), "click", Action::PickThumbnail),
    on(Scope::WithinId(event::MODAL_ID, shell::CLOSE_SELECTOR), "click", Action::CloseEventModal),
    // member modal
    on(Scope::Each(member::CARD_SELECTOR), "click", Action::OpenMember),
    on(Scope::WithinId(member::MODAL_ID, shell::CLOSE_SELECTOR), "click", Action::CloseMemberModal),
    on(Scope::Window, "click", Action::DismissModalBackdrop),
    // tilt
    on(Scope::Each(tilt::SELECTORS[0]), "mousemove", Action::Tilt),
    on(Scope::Each(tilt::SELECTORS[0]), "mouseleave", Action::Untilt),
    on(Scope::Each(tilt::SELECTORS[1]), "mousemove", Action::Tilt),
    on(Scope::Each(tilt::SELECTORS[1]), "mouseleave", Action::Untilt),
    on(Scope::Each(tilt::SELECTORS[2]), "mousemove", Action::Tilt),
    on(Scope::Each(tilt::SELECTORS[2]), "mouseleave", Action::Untilt),
];
