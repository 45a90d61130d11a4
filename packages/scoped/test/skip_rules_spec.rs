//! Skip Rules Tests

mod utils;
use single_spa_scoped::{FrameworkConfig, SkipScopedStylesConfig};
use utils::{options, scope, scope_file, PREFIX};

const VUE_SCOPED_FILE: &str = "/src/App.vue?vue&type=style&index=0&scoped=7ba5bd90&lang.css";

#[test]
fn should_leave_an_ignored_rule_byte_identical() {
    let css = "/* single-spa-prefix-ignore */\n.a   >  b{ color : red }";
    assert_eq!(scope(css), css);
}

#[test]
fn should_only_ignore_the_next_rule() {
    let css = "/* single-spa-prefix-ignore */\n.a {}\n.b {}";
    assert_eq!(
        scope(css),
        format!("/* single-spa-prefix-ignore */\n.a {{}}\n{} .b {{}}", PREFIX)
    );
}

#[test]
fn should_require_the_exact_marker_text() {
    let css = "/* single-spa-prefix-ignore please */\n.a {}";
    assert_eq!(
        scope(css),
        format!("/* single-spa-prefix-ignore please */\n{} .a {{}}", PREFIX)
    );
}

#[test]
fn should_skip_vue_scoped_styles() {
    let options = options()
        .with_skip_scoped_styles(SkipScopedStylesConfig::Framework(FrameworkConfig::new("vue")));
    assert_eq!(
        scope_file(".a[data-v-7ba5bd90] {}", VUE_SCOPED_FILE, &options),
        ".a[data-v-7ba5bd90] {}"
    );
    assert_eq!(
        scope_file(".a {}", "/src/App.vue?vue&type=style&index=0&lang.css", &options),
        format!("{} .a {{}}", PREFIX)
    );
}

#[test]
fn should_scope_vue_styles_when_skipping_is_disabled() {
    assert_eq!(
        scope_file(".a {}", VUE_SCOPED_FILE, &options()),
        format!("{} .a {{}}", PREFIX)
    );
}

#[test]
fn should_skip_react_css_modules() {
    let options = options().with_skip_scoped_styles(SkipScopedStylesConfig::Framework(
        FrameworkConfig::new("react").with_scope_strategy("css-modules"),
    ));
    assert_eq!(
        scope_file(".button {}", "/src/Button.module.css", &options),
        ".button {}"
    );
    assert_eq!(
        scope_file(".button {}", "/src/Button.css", &options),
        format!("{} .button {{}}", PREFIX)
    );
}

#[test]
fn should_skip_svelte_scoped_selectors() {
    let options = options().with_skip_scoped_styles(SkipScopedStylesConfig::Framework(
        FrameworkConfig::new("svelte").with_tooling("vite"),
    ));
    assert_eq!(
        scope_file(
            "h1.svelte-1xyz {}\n.global {}",
            "/src/global.css",
            &options
        ),
        format!("h1.svelte-1xyz {{}}\n{} .global {{}}", PREFIX)
    );
    assert_eq!(
        scope_file(".a {}", "/src/App.svelte?svelte&type=style&lang.css", &options),
        ".a {}"
    );
}

#[test]
fn should_not_scope_nested_rules() {
    assert_eq!(
        scope(".a { color: red; .b { color: blue; } }"),
        format!("{} .a {{ color: red; .b {{ color: blue; }} }}", PREFIX)
    );
}

#[test]
fn should_not_scope_rules_inside_keyframes() {
    assert_eq!(
        scope("@keyframes k { from {} to {} }"),
        "@keyframes k-b8f36a64 { from {} to {} }"
    );
}
