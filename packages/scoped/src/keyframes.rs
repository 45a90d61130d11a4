//! Keyframe Renamer
//!
//! Appends the run's suffix to `@keyframes` names and to the names listed
//! in `animation-name` declarations, so that two applications on the same
//! page can both define `@keyframes fade` without one replacing the other.
//! The `animation` shorthand is not rewritten.

use crate::ast::{NodeId, NodeKind, Stylesheet};
use crate::context::{ProcessedNodes, ScopeContext};

pub const ANIMATION_NAME_PROPERTY: &str = "animation-name";

/// Values of `animation-name` that are not keyframe names.
const ANIMATION_NAME_KEYWORDS: &[&str] = &[
    "none",
    "inherit",
    "initial",
    "revert",
    "revert-layer",
    "unset",
];

const KEYFRAMES: &str = "keyframes";
const VENDOR_KEYFRAMES_SUFFIX: &[u8] = b"-keyframes";

/// `keyframes`, or a vendor-prefixed form such as `-webkit-keyframes`, in
/// any ASCII case.
pub fn is_keyframes_at_rule(name: &str) -> bool {
    if name.eq_ignore_ascii_case(KEYFRAMES) {
        return true;
    }
    let bytes = name.as_bytes();
    name.starts_with('-')
        && bytes.len() > VENDOR_KEYFRAMES_SUFFIX.len()
        && bytes[bytes.len() - VENDOR_KEYFRAMES_SUFFIX.len()..]
            .eq_ignore_ascii_case(VENDOR_KEYFRAMES_SUFFIX)
}

/// At-rule hook: rename a keyframes block.
pub fn rename_keyframes(
    context: &ScopeContext,
    sheet: &mut Stylesheet,
    id: NodeId,
    processed: &mut ProcessedNodes,
) {
    if processed.contains(id) {
        return;
    }
    let suffix = context.keyframe_suffix();
    let NodeKind::AtRule(at_rule) = &mut sheet.get_mut(id).kind else {
        return;
    };
    if !is_keyframes_at_rule(&at_rule.name) {
        return;
    }
    if !suffix.is_empty() && !at_rule.params.is_empty() {
        at_rule.params = append_suffix(&at_rule.params, suffix);
        tracing::trace!(name = %at_rule.params, "renamed keyframes");
    }
    processed.mark(id);
}

/// Declaration hook: rename the keyframes an `animation-name` refers to.
pub fn rename_animation_name(
    context: &ScopeContext,
    sheet: &mut Stylesheet,
    id: NodeId,
    processed: &mut ProcessedNodes,
) {
    if processed.contains(id) {
        return;
    }
    let suffix = context.keyframe_suffix();
    let NodeKind::Declaration(decl) = &mut sheet.get_mut(id).kind else {
        return;
    };
    if decl.prop != ANIMATION_NAME_PROPERTY {
        return;
    }
    if !suffix.is_empty() {
        decl.value = suffix_animation_names(&decl.value, suffix);
    }
    processed.mark(id);
}

/// Suffix every name of a comma-separated `animation-name` list, keeping
/// the existing separators.
pub fn suffix_animation_names(value: &str, suffix: &str) -> String {
    value
        .split(',')
        .map(|segment| {
            let name = segment.trim();
            if name.is_empty()
                || name.contains('(')
                || ANIMATION_NAME_KEYWORDS
                    .iter()
                    .any(|keyword| keyword.eq_ignore_ascii_case(name))
            {
                return segment.to_string();
            }
            let leading = segment.len() - segment.trim_start().len();
            format!(
                "{}{}{}",
                &segment[..leading],
                append_suffix(name, suffix),
                &segment[leading + name.len()..]
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// `fade` + `-1a2b` is `fade-1a2b`; a quoted `"fade"` keeps its quotes.
fn append_suffix(name: &str, suffix: &str) -> String {
    let quoted = name.len() >= 2
        && (name.starts_with('"') && name.ends_with('"')
            || name.starts_with('\'') && name.ends_with('\''));
    if quoted {
        let (body, quote) = name.split_at(name.len() - 1);
        format!("{}{}{}", body, suffix, quote)
    } else {
        format!("{}{}", name, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_vendor_prefixed_keyframes() {
        assert!(is_keyframes_at_rule("keyframes"));
        assert!(is_keyframes_at_rule("-webkit-keyframes"));
        assert!(!is_keyframes_at_rule("media"));
        assert!(!is_keyframes_at_rule("keyframes-x"));
        assert!(!is_keyframes_at_rule("-keyframes"));
    }

    #[test]
    fn at_rule_names_ignore_ascii_case() {
        assert!(is_keyframes_at_rule("KEYFRAMES"));
        assert!(is_keyframes_at_rule("-WebKit-KeyFrames"));
    }

    #[test]
    fn suffixes_each_listed_name() {
        assert_eq!(
            suffix_animation_names("spin, fade ,none", "-1f"),
            "spin-1f, fade-1f ,none"
        );
    }

    #[test]
    fn keeps_quotes_and_functions() {
        assert_eq!(suffix_animation_names("'spin'", "-1f"), "'spin-1f'");
        assert_eq!(suffix_animation_names("var(--name)", "-1f"), "var(--name)");
    }
}
