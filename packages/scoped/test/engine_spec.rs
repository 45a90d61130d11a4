//! Rewrite Engine Tests

mod utils;
use single_spa_scoped::parser::parse;
use single_spa_scoped::printer::stringify;
use single_spa_scoped::{scope_css, walk, ConfigurationError, ScopeError, ScopeOptions, Scoper};
use utils::{options, scope_with, scoper, PREFIX};

const ORDINARY_CSS: &str = "\
:root { --gap: 4px; }
:root > main, a::before {}
/* single-spa-prefix-ignore */
body { margin: 0; }
@media print { .a, .b:hover { color: red; } }
";

#[test]
fn should_be_a_fixed_point_for_ordinary_rules() {
    for options in [options(), options().with_exclude_parcels(true)] {
        let once = scope_with(ORDINARY_CSS, &options);
        let twice = scope_with(&once, &options);
        assert_eq!(once, twice);
    }
}

#[test]
fn should_rewrite_each_node_once_per_visitor() {
    let scoper = scoper(&options());
    let mut sheet = parse("@keyframes k {}\na { animation-name: k; }", None).unwrap();

    let mut visitor = scoper.visitor();
    walk(&mut sheet, &mut visitor);
    walk(&mut sheet, &mut visitor);

    assert_eq!(
        stringify(&sheet),
        format!(
            "@keyframes k-b8f36a64 {{}}\n{} a {{ animation-name: k-b8f36a64; }}",
            PREFIX
        )
    );
    assert_eq!(visitor.processed().len(), 3);
}

#[test]
fn should_share_one_scoper_across_sheets() {
    let scoper = &scoper(&options());
    let sheets = ["a {}", ".b {}", "@keyframes k {}"];
    let results: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = sheets
            .iter()
            .map(|&css| s.spawn(move || scoper.process_css(css, None).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(
        results,
        vec![
            format!("{} a {{}}", PREFIX),
            format!("{} .b {{}}", PREFIX),
            "@keyframes k-b8f36a64 {}".to_string(),
        ]
    );
}

#[test]
fn should_fail_before_touching_the_tree() {
    let err = Scoper::with_metadata(&ScopeOptions::default(), || None).unwrap_err();
    assert_eq!(err, ConfigurationError::MissingScopeName);
}

#[test]
fn should_scope_in_one_call() {
    let options = ScopeOptions::default().with_app_name("my-app");
    assert_eq!(
        scope_css("a {}", None, &options).unwrap(),
        format!("{} a {{}}", PREFIX)
    );
    assert!(matches!(
        scope_css("a {", None, &options),
        Err(ScopeError::Parse(_))
    ));
}

#[test]
fn should_keep_comments_and_declarations_in_place() {
    let css = "/* header */\na {\n  /* inner */\n  color: red;\n}\n";
    assert_eq!(
        scope_with(css, &options()),
        format!("/* header */\n{} a {{\n  /* inner */\n  color: red;\n}}\n", PREFIX)
    );
}
