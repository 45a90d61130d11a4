//! Selector Rewriter
//!
//! Places every selector of a style rule under the application's scope
//! prefix. Selectors are handled as text: combinators and compound parts
//! are never parsed, only the `:root` token, the scope prefix and a closed
//! table of trailing pseudo-elements are recognised.

use crate::ast::{NodeId, NodeKind, Stylesheet};
use crate::chars;
use crate::context::{ProcessedNodes, ScopeContext};
use crate::keyframes::is_keyframes_at_rule;

/// Comment text that turns scoping off for the rule right after it.
pub const IGNORE_MARKER: &str = "single-spa-prefix-ignore";

pub const ROOT_PSEUDO_CLASS: &str = ":root";

/// Escaped id prefix of parcel containers.
pub const PARCEL_ID_PREFIX: &str = r"single-spa-application\:parcel";

const PARCEL_EXCLUSION_OPEN: &str = concat!(":not([id^=\"", r"single-spa-application\:parcel", "\"]");

/// Pseudo-elements recognised at the end of a selector.
pub const STANDARD_PSEUDO_ELEMENTS: &[&str] = &[
    "::after",
    "::backdrop",
    "::before",
    "::cue",
    "::cue-region",
    "::file-selector-button",
    "::first-letter",
    "::first-line",
    "::grammar-error",
    "::marker",
    "::placeholder",
    "::selection",
    "::spelling-error",
    "::target-text",
    "::-moz-placeholder",
    "::-moz-selection",
    "::-webkit-input-placeholder",
    "::-webkit-scrollbar",
    "::-webkit-scrollbar-thumb",
    "::-webkit-scrollbar-track",
    // CSS2 single-colon syntax
    ":after",
    ":before",
    ":first-letter",
    ":first-line",
];

/// The pseudo-elements the rewriter splits off before prefixing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoElementTable {
    /// Longest first, so `::before` wins over `:before`
    entries: Vec<String>,
}

impl Default for PseudoElementTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PseudoElementTable {
    pub fn standard() -> Self {
        let mut table = PseudoElementTable {
            entries: Vec::new(),
        };
        table.extend(STANDARD_PSEUDO_ELEMENTS);
        table
    }

    /// Add entries. Names without a leading colon get `::`.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let entry = if name.starts_with(':') {
                name.to_ascii_lowercase()
            } else {
                format!("::{}", name.to_ascii_lowercase())
            };
            if !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
        self.entries.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.eq_ignore_ascii_case(name))
    }

    /// Split `selector` into `(base, pseudo_element)` when it ends with a
    /// known pseudo-element.
    pub fn split_trailing<'a>(&self, selector: &'a str) -> Option<(&'a str, &'a str)> {
        self.entries.iter().find_map(|entry| {
            let split = selector.len().checked_sub(entry.len())?;
            if !selector.is_char_boundary(split) {
                return None;
            }
            let (base, tail) = selector.split_at(split);
            (tail.eq_ignore_ascii_case(entry) && !ends_with_escape(base)).then_some((base, tail))
        })
    }
}

/// Whether the last character of `text` is a backslash that escapes
/// whatever follows, as in `.x\:before`.
fn ends_with_escape(text: &str) -> bool {
    let backslashes = text
        .bytes()
        .rev()
        .take_while(|&code| code == chars::BACKSLASH)
        .count();
    backslashes % 2 == 1
}

/// `:not([id^="single-spa-application\:parcel"] <selector>)`
pub fn exclusion_pseudo_class(selector: &str) -> String {
    format!("{} {})", PARCEL_EXCLUSION_OPEN, selector)
}

/// Whether `selector` starts with the prefix as a whole id, so that
/// `#app-2` is not mistaken for `#app`.
fn starts_with_prefix(selector: &str, prefix: &str) -> bool {
    if !selector.starts_with(prefix) {
        return false;
    }
    match selector.as_bytes().get(prefix.len()) {
        None => true,
        Some(&code) => !(chars::is_name_char(code) || code == chars::BACKSLASH),
    }
}

/// `a > ` has no subject left to carry the pseudo-element, so it gets `*`.
fn implied_base(base: &str) -> String {
    match base.as_bytes().last() {
        None => "*".to_string(),
        Some(&code) if chars::is_combinator(code) => format!("{}*", base),
        Some(_) => base.to_string(),
    }
}

/// Add the parcel exclusion to a selector that already starts with the
/// prefix, unless it carries one already.
fn exclude_parcels_after_prefix(context: &ScopeContext, selector: &str) -> String {
    let remainder = selector[context.prefix().len()..].trim_start();
    if remainder.is_empty() || selector.contains(PARCEL_EXCLUSION_OPEN) {
        return selector.to_string();
    }
    let head = &selector[..selector.len() - remainder.len()];
    match context.pseudo_elements().split_trailing(remainder) {
        // `#prefix::before` styles the container itself, which is never a parcel.
        Some(("", _)) if !head.ends_with(|c: char| c.is_ascii_whitespace()) => {
            selector.to_string()
        }
        Some((base, pseudo_element)) => {
            let base = implied_base(base);
            format!(
                "{}{}{}{}",
                head,
                base,
                exclusion_pseudo_class(&base),
                pseudo_element
            )
        }
        None => format!("{}{}", selector, exclusion_pseudo_class(remainder)),
    }
}

/// Scope one selector. The result may be a list when additional selectors
/// are configured.
pub fn scope_selector(context: &ScopeContext, selector: &str) -> String {
    let selector = selector.trim();
    let prefix = context.prefix();

    if selector == ROOT_PSEUDO_CLASS {
        let mut parts = Vec::with_capacity(context.additional_selectors().len() + 1);
        parts.push(prefix.to_string());
        parts.extend(context.additional_selectors().iter().cloned());
        return parts.join(", ");
    }

    let substituted = selector.replace(ROOT_PSEUDO_CLASS, prefix);
    if starts_with_prefix(&substituted, prefix) {
        return if context.exclude_parcels() {
            exclude_parcels_after_prefix(context, &substituted)
        } else {
            substituted
        };
    }

    let scoped = match context.pseudo_elements().split_trailing(&substituted) {
        Some((base, pseudo_element)) => {
            let base = implied_base(base);
            if context.exclude_parcels() {
                format!(
                    "{} {}{}{}",
                    prefix,
                    base,
                    exclusion_pseudo_class(&base),
                    pseudo_element
                )
            } else {
                format!("{} {}{}", prefix, base, pseudo_element)
            }
        }
        None if context.exclude_parcels() => format!(
            "{} {}{}",
            prefix,
            substituted,
            exclusion_pseudo_class(&substituted)
        ),
        None => format!("{} {}", prefix, substituted),
    };

    let mut parts = Vec::with_capacity(context.additional_selectors().len() + 1);
    parts.push(scoped);
    parts.extend(
        context
            .additional_selectors()
            .iter()
            .map(|entry| format!("{} {}", entry, selector)),
    );
    parts.join(", ")
}

/// Why a rule was left as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    KeyframeOffsets,
    NestedRule,
    AlreadyProcessed,
    IgnoreComment,
    PreScoped,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::KeyframeOffsets => "keyframe offsets",
            SkipReason::NestedRule => "nested inside another rule",
            SkipReason::AlreadyProcessed => "already processed",
            SkipReason::IgnoreComment => "ignore comment",
            SkipReason::PreScoped => "scoped by framework",
        }
    }
}

/// Check the skip conditions in order.
pub fn skip_reason(
    context: &ScopeContext,
    sheet: &Stylesheet,
    id: NodeId,
    processed: &ProcessedNodes,
) -> Option<SkipReason> {
    let parent = sheet.parent(id).map(|parent| sheet.get(parent));
    if parent
        .and_then(|node| node.as_at_rule())
        .is_some_and(|at_rule| is_keyframes_at_rule(&at_rule.name))
    {
        return Some(SkipReason::KeyframeOffsets);
    }

    // Nested rules are scoped through their outermost rule.
    if sheet.has_ancestor(id, |node| node.as_rule().is_some()) {
        return Some(SkipReason::NestedRule);
    }

    if processed.contains(id) {
        return Some(SkipReason::AlreadyProcessed);
    }

    let ignored = sheet
        .prev(id)
        .and_then(|prev| sheet.get(prev).as_comment())
        .is_some_and(|comment| comment.text == IGNORE_MARKER);
    if ignored {
        return Some(SkipReason::IgnoreComment);
    }

    let selector = sheet.get(id).as_rule().map(|rule| rule.selector.as_str())?;
    if context
        .skip_scoped_styles()
        .is_pre_scoped(sheet.source_file(id), selector)
    {
        return Some(SkipReason::PreScoped);
    }

    None
}

/// Rule hook: rewrite the rule's selector list, once per run.
pub fn rewrite_rule(
    context: &ScopeContext,
    sheet: &mut Stylesheet,
    id: NodeId,
    processed: &mut ProcessedNodes,
) {
    if let Some(reason) = skip_reason(context, sheet, id, processed) {
        if reason != SkipReason::AlreadyProcessed {
            tracing::debug!(reason = reason.as_str(), "rule left unscoped");
        }
        processed.mark(id);
        return;
    }

    let NodeKind::Rule(rule) = &mut sheet.get_mut(id).kind else {
        return;
    };
    let selectors = rule.selectors();
    if !selectors.is_empty() {
        let scoped: Vec<String> = selectors
            .iter()
            .map(|selector| scope_selector(context, selector))
            .collect();
        let from = std::mem::take(&mut rule.selector);
        rule.set_selectors(&scoped[..]);
        tracing::trace!(from = %from, to = %rule.selector, "scoped rule");
    }
    processed.mark(id);
}
