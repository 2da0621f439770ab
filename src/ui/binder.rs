// src/ui/binder.rs

//! Page-ready behavior binding.
//!
//! [`bind`] runs once when the page's DOM is ready: it installs sortable
//! tables and dropdowns immediately, registers the `:icontains` pseudo, and
//! returns the click subscriptions for the two click-driven behaviors.
//! Every lookup tolerates absence; a page without any of the target
//! elements binds to nothing and every dispatch is a no-op.

use anyhow::Result;
use tracing::debug;

use crate::ui::dom::{Document, ElementId};
use crate::ui::selector::{register_icontains, Selector, SelectorEngine};
use crate::ui::toolkit::{Toolkit, Transition};

// Semantic UI breakpoints. Declared for page code; nothing here consumes them.
pub const MOBILE_BREAKPOINT: &str = "768px";
pub const TABLET_BREAKPOINT: &str = "992px";
pub const SMALL_MONITOR_BREAKPOINT: &str = "1200px";

const MESSAGE_CLOSE_SELECTOR: &str = ".message .close";
const MESSAGE_SELECTOR: &str = ".message";
const OPEN_NAV_SELECTOR: &str = "#open-nav";
const MOBILE_MENU_SELECTOR: &str = ".mobile.only .vertical.menu";
const SORTABLE_TABLE_SELECTOR: &str = "table.ui.sortable";
const DROPDOWN_SELECTOR: &str = ".dropdown";
const SELECT_SELECTOR: &str = "select";

/// A click-driven behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickAction {
    /// Fade out the nearest enclosing flash message.
    DismissMessage,
    /// Slide the mobile-only vertical menu down.
    OpenNavigation,
}

struct ClickBinding {
    target: Selector,
    action: ClickAction,
}

/// Click subscriptions installed by [`bind`].
///
/// Listeners are registered once; each listener fires at most once per
/// dispatched click.
pub struct Bindings {
    clicks: Vec<ClickBinding>,
    message: Selector,
    mobile_menu: Selector,
}

/// Bind all page behaviors. Call once, at page-ready.
///
/// - dismissable flash messages (`.message .close` click)
/// - mobile navigation toggle (`#open-nav` click)
/// - sortable tables (`table.ui.sortable`, installed immediately)
/// - dropdowns (`.dropdown` and every `select`, installed immediately)
///
/// Also registers the `:icontains` pseudo-selector with `engine`.
pub fn bind<T: Toolkit>(
    doc: &Document,
    engine: &mut SelectorEngine,
    toolkit: &mut T,
) -> Result<Bindings> {
    register_icontains(engine);

    for el in engine.select(doc, SORTABLE_TABLE_SELECTOR)? {
        toolkit.tablesort(doc, el);
    }
    for selector in [DROPDOWN_SELECTOR, SELECT_SELECTOR] {
        for el in engine.select(doc, selector)? {
            toolkit.dropdown(doc, el);
        }
    }

    let clicks = vec![
        ClickBinding {
            target: Selector::parse(MESSAGE_CLOSE_SELECTOR)?,
            action: ClickAction::DismissMessage,
        },
        ClickBinding {
            target: Selector::parse(OPEN_NAV_SELECTOR)?,
            action: ClickAction::OpenNavigation,
        },
    ];

    debug!("page behaviors bound");
    Ok(Bindings {
        clicks,
        message: Selector::parse(MESSAGE_SELECTOR)?,
        mobile_menu: Selector::parse(MOBILE_MENU_SELECTOR)?,
    })
}

impl Bindings {
    /// Dispatch a click on `target`.
    ///
    /// Each registered listener whose selector matches the target runs
    /// exactly once. A click anywhere else, or on a page lacking the
    /// behavior's other elements, does nothing.
    pub fn dispatch_click<T: Toolkit>(
        &self,
        doc: &Document,
        engine: &SelectorEngine,
        toolkit: &mut T,
        target: ElementId,
    ) {
        for binding in &self.clicks {
            if !engine.matches(doc, target, &binding.target) {
                continue;
            }
            match binding.action {
                ClickAction::DismissMessage => {
                    self.dismiss_message(doc, engine, toolkit, target);
                }
                ClickAction::OpenNavigation => {
                    self.open_navigation(doc, engine, toolkit);
                }
            }
        }
    }

    /// Fade out the nearest enclosing `.message`; no enclosing message means
    /// no-op.
    fn dismiss_message<T: Toolkit>(
        &self,
        doc: &Document,
        engine: &SelectorEngine,
        toolkit: &mut T,
        target: ElementId,
    ) {
        // The `.message .close` match guarantees an enclosing message exists,
        // but `closest` stays the authority on which one.
        if let Some(message) = engine.closest(doc, target, &self.message) {
            toolkit.transition(doc, message, Transition::Fade);
        }
    }

    /// Slide down every mobile-only vertical menu; none present means no-op.
    fn open_navigation<T: Toolkit>(
        &self,
        doc: &Document,
        engine: &SelectorEngine,
        toolkit: &mut T,
    ) {
        for menu in doc
            .elements()
            .filter(|&el| engine.matches(doc, el, &self.mobile_menu))
        {
            toolkit.transition(doc, menu, Transition::SlideDown);
        }
    }
}
