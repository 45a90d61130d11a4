//! Selector Rewriter Tests

mod utils;
use utils::{assert_equal_css, exclusion, options, scope, scope_with, PREFIX};

#[test]
fn should_prefix_a_simple_selector() {
    assert_eq!(
        scope("a { display: flex; }"),
        format!("{} a {{ display: flex; }}", PREFIX)
    );
}

#[test]
fn should_prefix_every_entry_of_a_selector_list() {
    assert_eq!(
        scope("a, .b > c {}"),
        format!("{0} a, {0} .b > c {{}}", PREFIX)
    );
}

#[test]
fn should_keep_commas_inside_functional_pseudo_classes() {
    assert_eq!(
        scope(":is(a, b) span {}"),
        format!("{} :is(a, b) span {{}}", PREFIX)
    );
}

#[test]
fn should_replace_a_lone_root_with_the_prefix() {
    assert_eq!(
        scope(":root { --gap: 4px; }"),
        format!("{} {{ --gap: 4px; }}", PREFIX)
    );
}

#[test]
fn should_substitute_root_inside_a_compound_selector() {
    assert_eq!(scope(":root > .c1 {}"), format!("{} > .c1 {{}}", PREFIX));
}

#[test]
fn should_substitute_root_per_list_entry() {
    assert_eq!(scope(":root, a {}"), format!("{0}, {0} a {{}}", PREFIX));
}

#[test]
fn should_append_additional_selectors_in_order() {
    let options = options().with_additional_selectors(["#app", "", "  .shell  "]);
    assert_eq!(
        scope_with("a { display: flex; }", &options),
        format!("{} a, #app a, .shell a {{ display: flex; }}", PREFIX)
    );
}

#[test]
fn should_join_additional_selectors_to_a_lone_root() {
    let options = options().with_additional_selectors(["#app"]);
    assert_eq!(
        scope_with(":root {}", &options),
        format!("{}, #app {{}}", PREFIX)
    );
}

#[test]
fn should_exclude_parcels() {
    let options = options().with_exclude_parcels(true);
    assert_eq!(
        scope_with("a { display:flex; }", &options),
        format!(
            r#"{} a:not([id^="single-spa-application\:parcel"] a) {{ display:flex; }}"#,
            PREFIX
        )
    );
}

#[test]
fn should_split_off_a_trailing_pseudo_element() {
    assert_eq!(
        scope("button::after {}"),
        format!("{} button::after {{}}", PREFIX)
    );
    assert_eq!(scope("p:first-line {}"), format!("{} p:first-line {{}}", PREFIX));
}

#[test]
fn should_imply_a_universal_base_for_a_bare_pseudo_element() {
    assert_eq!(scope("::before {}"), format!("{} *::before {{}}", PREFIX));
    assert_eq!(scope("a > ::before {}"), format!("{} a > *::before {{}}", PREFIX));
}

#[test]
fn should_place_the_exclusion_before_the_pseudo_element() {
    let options = options().with_exclude_parcels(true);
    assert_eq!(
        scope_with("button::after {}", &options),
        format!("{} button{}::after {{}}", PREFIX, exclusion("button"))
    );
    assert_eq!(
        scope_with("::before {}", &options),
        format!("{} *{}::before {{}}", PREFIX, exclusion("*"))
    );
}

#[test]
fn should_match_pseudo_elements_case_insensitively() {
    assert_eq!(
        scope("A::BEFORE {}"),
        format!("{} A::BEFORE {{}}", PREFIX)
    );
}

#[test]
fn should_honor_additional_pseudo_elements() {
    let mut options = options().with_exclude_parcels(true);
    options.additional_pseudo_elements = vec!["view-transition-old(root)".to_string()];
    assert_eq!(
        scope_with("html::view-transition-old(root) {}", &options),
        format!(
            "{} html{}::view-transition-old(root) {{}}",
            PREFIX,
            exclusion("html")
        )
    );
}

#[test]
fn should_not_prefix_an_already_prefixed_selector() {
    let css = format!("{} .x {{}}", PREFIX);
    assert_eq!(scope(&css), css);
}

#[test]
fn should_not_append_additional_selectors_to_a_prefixed_selector() {
    let options = options().with_additional_selectors(["#app"]);
    let css = format!("{} .x {{}}", PREFIX);
    assert_eq!(scope_with(&css, &options), css);
}

#[test]
fn should_add_the_exclusion_to_a_prefixed_selector() {
    let options = options().with_exclude_parcels(true);
    assert_eq!(
        scope_with(&format!("{} .x {{}}", PREFIX), &options),
        format!("{} .x{} {{}}", PREFIX, exclusion(".x"))
    );
}

#[test]
fn should_not_mistake_a_longer_id_for_the_prefix() {
    let other = r"#single-spa-application\:my-app-2 .x";
    assert_eq!(
        scope(&format!("{} {{}}", other)),
        format!("{} {} {{}}", PREFIX, other)
    );
}

#[test]
fn should_scope_rules_inside_conditional_groups() {
    assert_equal_css(
        &scope("@media (max-width: 600px) { .a { color: red; } }"),
        &format!("@media (max-width: 600px) {{ {} .a {{ color: red; }} }}", PREFIX),
    );
    assert_equal_css(
        &scope("@supports (display: grid) { @media print { .a {} } }"),
        &format!("@supports (display: grid) {{ @media print {{ {} .a {{}} }} }}", PREFIX),
    );
}

#[test]
fn should_keep_whitespace_around_the_selector() {
    assert_eq!(
        scope("\n  a ,\n  b\n{\n  color: red;\n}\n"),
        format!("\n  {0} a, {0} b\n{{\n  color: red;\n}}\n", PREFIX)
    );
}

#[test]
fn should_treat_escaped_colons_as_part_of_the_class_name() {
    let options = options().with_exclude_parcels(true);
    assert_eq!(
        scope_with(r".x\:before {}", &options),
        format!(r"{} .x\:before{} {{}}", PREFIX, exclusion(r".x\:before"))
    );
    assert_eq!(
        scope_with(r".x\::before {}", &options),
        format!(r"{} .x\:{}:before {{}}", PREFIX, exclusion(r".x\:"))
    );
}
