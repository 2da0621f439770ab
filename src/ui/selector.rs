// src/ui/selector.rs

//! Selector evaluation and the pseudo-selector extension point.
//!
//! The engine understands exactly what the fixed binder selectors need:
//! descendant chains of simple steps (`tag`, `#id`, `.class`, repeated
//! classes), each step optionally carrying one `:pseudo(arg)` filter.
//!
//! Pseudo filters are programmable. Engines normally support create-pseudo
//! registration, where the argument is captured once and the registration
//! returns a plain element predicate. Older engines only take a positional
//! filter handed the raw match-argument list; the query string sits at
//! index 3 of that list. [`register_icontains`] picks the strategy with a
//! single capability check at registration time.

use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::ui::dom::{Document, ElementId};

/// Case-insensitive text match.
///
/// True iff the element's effective text contains `query` as a substring,
/// ignoring case on both sides. An empty query matches every element; an
/// element with no text source only matches the empty query.
pub fn icontains(doc: &Document, el: ElementId, query: &str) -> bool {
    doc.effective_text(el)
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Register `:icontains(text)` with the engine.
///
/// The capability check happens once, here: create-pseudo registration if
/// the engine supports it, positional match-argument extraction otherwise.
pub fn register_icontains(engine: &mut SelectorEngine) {
    if engine.supports_create_pseudo() {
        engine.register_create_pseudo(
            "icontains",
            Box::new(|query: String| Box::new(move |doc, el| icontains(doc, el, &query))),
        );
    } else {
        engine.register_positional(
            "icontains",
            Box::new(|doc, el, _index, match_args: &[String]| {
                let query = match_args.get(3).map(String::as_str).unwrap_or("");
                icontains(doc, el, query)
            }),
        );
    }
}

/// Element predicate produced by a create-pseudo registration.
pub type ElementPredicate = Box<dyn Fn(&Document, ElementId) -> bool>;

/// Factory invoked per query argument under create-pseudo registration.
pub type CreatePseudoFn = Box<dyn Fn(String) -> ElementPredicate>;

/// Legacy positional filter: `(document, element, index, match_args)`.
///
/// `match_args` mirrors the engine's raw pseudo match: full token at 0, name
/// at 1, quote at 2, argument at 3.
pub type PositionalPseudoFn = Box<dyn Fn(&Document, ElementId, usize, &[String]) -> bool>;

enum PseudoFilter {
    Created(CreatePseudoFn),
    Positional(PositionalPseudoFn),
}

/// One step of a descendant selector chain.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorStep {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: Option<(String, String)>,
}

/// A parsed selector: one or more steps joined by descendant combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<SelectorStep>,
}

impl Selector {
    /// Parse a selector like `.message .close`, `#open-nav`,
    /// `table.ui.sortable` or `td:icontains(berlin office)`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for token in split_steps(input) {
            steps.push(parse_step(token)?);
        }
        if steps.is_empty() {
            return Err(anyhow!("empty selector"));
        }
        Ok(Self { steps })
    }
}

/// Split a selector into steps at whitespace, except inside `(...)`.
///
/// Pseudo arguments are user-typed filter text and may contain spaces;
/// whitespace inside parentheses belongs to the step, not the combinator.
fn split_steps(input: &str) -> Vec<&str> {
    let mut steps = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in input.char_indices() {
        if c.is_whitespace() && depth == 0 {
            if let Some(s) = start.take() {
                steps.push(&input[s..i]);
            }
            continue;
        }
        if start.is_none() {
            start = Some(i);
        }
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    if let Some(s) = start {
        steps.push(&input[s..]);
    }

    steps
}

fn parse_step(token: &str) -> Result<SelectorStep> {
    let mut step = SelectorStep {
        tag: None,
        id: None,
        classes: Vec::new(),
        pseudo: None,
    };

    // Split off a trailing `:pseudo(arg)` first.
    let mut rest = token;
    if let Some(colon) = rest.find(':') {
        let pseudo = &rest[colon + 1..];
        rest = &rest[..colon];
        let (name, arg) = match pseudo.find('(') {
            Some(open) => {
                let close = pseudo
                    .rfind(')')
                    .ok_or_else(|| anyhow!("unclosed pseudo argument in selector step: {token}"))?;
                (&pseudo[..open], &pseudo[open + 1..close])
            }
            None => (pseudo, ""),
        };
        if name.is_empty() {
            return Err(anyhow!("empty pseudo name in selector step: {token}"));
        }
        step.pseudo = Some((name.to_string(), unquote(arg).to_string()));
    }

    // The remainder is `tag`, then any number of `#id` / `.class` suffixes.
    let boundary = rest.find(['.', '#']).unwrap_or(rest.len());
    if boundary > 0 {
        step.tag = Some(rest[..boundary].to_string());
    }

    let mut attrs = &rest[boundary..];
    while !attrs.is_empty() {
        let kind = attrs.as_bytes()[0];
        let body = &attrs[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() {
            return Err(anyhow!("malformed selector step: {token}"));
        }
        match kind {
            b'.' => step.classes.push(name.to_string()),
            b'#' => step.id = Some(name.to_string()),
            _ => return Err(anyhow!("malformed selector step: {token}")),
        }
        attrs = &body[end..];
    }

    Ok(step)
}

fn unquote(arg: &str) -> &str {
    let arg = arg.trim();
    let bytes = arg.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

/// The host selector engine: evaluates [`Selector`]s against a [`Document`]
/// and carries the registered pseudo filters.
#[derive(Default)]
pub struct SelectorEngine {
    legacy: bool,
    pseudos: HashMap<String, PseudoFilter>,
}

impl SelectorEngine {
    /// An engine with create-pseudo support (the normal case).
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine without create-pseudo support; registrations fall back to
    /// positional match-argument extraction.
    pub fn legacy() -> Self {
        Self {
            legacy: true,
            pseudos: HashMap::new(),
        }
    }

    /// Capability check for the registration strategy.
    pub fn supports_create_pseudo(&self) -> bool {
        !self.legacy
    }

    pub fn register_create_pseudo(&mut self, name: impl Into<String>, factory: CreatePseudoFn) {
        self.pseudos.insert(name.into(), PseudoFilter::Created(factory));
    }

    pub fn register_positional(&mut self, name: impl Into<String>, filter: PositionalPseudoFn) {
        self.pseudos
            .insert(name.into(), PseudoFilter::Positional(filter));
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, doc: &Document, selector: &str) -> Result<Vec<ElementId>> {
        let parsed = Selector::parse(selector)?;
        Ok(doc
            .elements()
            .enumerate()
            .filter(|&(index, el)| self.matches_chain(doc, el, index, &parsed))
            .map(|(_, el)| el)
            .collect())
    }

    /// Does `el` match `selector`?
    pub fn matches(&self, doc: &Document, el: ElementId, selector: &Selector) -> bool {
        self.matches_chain(doc, el, 0, selector)
    }

    /// Nearest ancestor of `el` (element included) matching `selector`.
    ///
    /// `None` when no enclosing element matches; callers treat that as a
    /// no-op.
    pub fn closest(
        &self,
        doc: &Document,
        el: ElementId,
        selector: &Selector,
    ) -> Option<ElementId> {
        doc.ancestors_inclusive(el)
            .find(|&ancestor| self.matches_chain(doc, ancestor, 0, selector))
    }

    fn matches_chain(
        &self,
        doc: &Document,
        el: ElementId,
        index: usize,
        selector: &Selector,
    ) -> bool {
        let (last, prefix) = match selector.steps.split_last() {
            Some(split) => split,
            None => return false,
        };

        if !self.matches_step(doc, el, index, last) {
            return false;
        }

        // Each remaining step must match some strictly higher ancestor, in
        // order from innermost to outermost.
        let mut remaining = prefix.iter().rev();
        let mut step = match remaining.next() {
            Some(step) => step,
            None => return true,
        };
        let mut current = doc.parent(el);
        while let Some(ancestor) = current {
            if self.matches_step(doc, ancestor, 0, step) {
                step = match remaining.next() {
                    Some(next) => next,
                    None => return true,
                };
            }
            current = doc.parent(ancestor);
        }
        false
    }

    fn matches_step(
        &self,
        doc: &Document,
        el: ElementId,
        index: usize,
        step: &SelectorStep,
    ) -> bool {
        let element = doc.get(el);

        if let Some(tag) = &step.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &step.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        for class in &step.classes {
            if !element.classes.iter().any(|c| c == class) {
                return false;
            }
        }
        if let Some((name, arg)) = &step.pseudo {
            return self.apply_pseudo(doc, el, index, name, arg);
        }
        true
    }

    fn apply_pseudo(
        &self,
        doc: &Document,
        el: ElementId,
        index: usize,
        name: &str,
        arg: &str,
    ) -> bool {
        match self.pseudos.get(name) {
            Some(PseudoFilter::Created(factory)) => factory(arg.to_string())(doc, el),
            Some(PseudoFilter::Positional(filter)) => {
                let match_args = [
                    format!(":{name}({arg})"),
                    name.to_string(),
                    String::new(),
                    arg.to_string(),
                ];
                filter(doc, el, index, &match_args)
            }
            // Unknown pseudo: nothing matches.
            None => false,
        }
    }
}
