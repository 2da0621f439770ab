// src/ui/toolkit.rs

//! The external UI toolkit seam.
//!
//! Transitions, table sorting and dropdown menus are toolkit behavior, not
//! ours. The binder only decides *which* elements get *which* call; anything
//! implementing [`Toolkit`] supplies the effect.

use crate::ui::dom::{Document, ElementId};

/// Visual transitions the binder requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Fade the element out (dismissed flash messages).
    Fade,
    /// Slide the element down into view (mobile navigation menu).
    SlideDown,
}

/// The external UI toolkit.
///
/// Ordering semantics of table sorting, menu rendering and keyboard
/// navigation of dropdowns, and transition animation details are all the
/// implementor's responsibility.
pub trait Toolkit {
    fn transition(&mut self, doc: &Document, el: ElementId, transition: Transition);

    /// Install click-to-sort column behavior on a table.
    fn tablesort(&mut self, doc: &Document, el: ElementId);

    /// Install open/close/selection behavior on a dropdown or native select.
    fn dropdown(&mut self, doc: &Document, el: ElementId);
}
