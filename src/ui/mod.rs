// src/ui/mod.rs

//! Page behavior binding.
//!
//! This module wires a fixed set of UI behaviors to a page once its DOM is
//! ready: dismissable flash messages, the mobile navigation toggle, sortable
//! tables and dropdowns. The actual effects (fade, slide, sort, menu) belong
//! to an external UI toolkit reached through the [`Toolkit`] trait; nothing
//! here implements them.
//!
//! It also registers `:icontains(text)`, a case-insensitive text-match
//! pseudo-selector, with the host [`SelectorEngine`] so later queries can
//! filter elements by rendered text. Used in table filtering.

pub mod binder;
pub mod dom;
pub mod selector;
pub mod toolkit;

pub use binder::{bind, Bindings};
pub use dom::{Document, Element, ElementId};
pub use selector::{icontains, register_icontains, Selector, SelectorEngine};
pub use toolkit::{Toolkit, Transition};
