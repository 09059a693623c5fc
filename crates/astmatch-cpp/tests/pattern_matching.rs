use astmatch_core::{AstNode, Factory, MatchFinder};
use astmatch_cpp::{CppProvider, PatternFactory};

fn parse(source: &str) -> astmatch_cpp::CppNode {
    let factory = Factory::new(CppProvider::new());
    factory.create_from_text(source, "test.cpp").unwrap()
}

#[test]
fn finds_if_statement_binding_condition_and_body() {
    let pattern_factory = PatternFactory::new();
    let pattern = pattern_factory
        .create_statement("if ($cond) { $$body; }", &[], &[])
        .unwrap();

    let source = parse(
        r#"
        void f() {
            if (a == b) {
                foo();
            }
        }
        "#,
    );

    let finder = MatchFinder::single(vec![pattern]);
    let matches: Vec<_> = finder.find_all(&[source], true).collect();

    assert_eq!(matches.len(), 1);
    let cond = matches[0].single("$cond").expect("bound $cond");
    assert_eq!(cond.kind(), "binary_expression");
}

#[test]
fn finds_function_call_binding_every_argument_to_a_multi_wildcard() {
    let pattern_factory = PatternFactory::new();
    let pattern = pattern_factory.create_expression("foo($$args)").unwrap();

    let source = parse(
        r#"
        void f() {
            foo(1, 2, 3);
        }
        "#,
    );

    let finder = MatchFinder::single(vec![pattern]);
    let matches: Vec<_> = finder.find_all(&[source], true).collect();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].multiple("$$args").len(), 3);
}

#[test]
fn binary_expression_pattern_matches_the_operator() {
    let pattern_factory = PatternFactory::new();
    let pattern = pattern_factory.create_expression("$a == $b").unwrap();

    let source = parse("void f() { int x = (a == b); }");

    let finder = MatchFinder::single(vec![pattern]);
    let matches: Vec<_> = finder.find_all(&[source], true).collect();

    assert_eq!(matches.len(), 1);
}

#[test]
fn non_matching_operator_does_not_match() {
    let pattern_factory = PatternFactory::new();
    let pattern = pattern_factory.create_expression("$a == $b").unwrap();

    let source = parse("void f() { int x = (a != b); }");

    let finder = MatchFinder::single(vec![pattern]);
    assert_eq!(finder.find_all(&[source], true).count(), 0);
}

#[test]
fn duplicate_placeholder_requires_identical_operands() {
    let pattern_factory = PatternFactory::new();
    let pattern = pattern_factory.create_expression("$x == $x").unwrap();

    let matching = parse("void f() { int r = (a == a); }");
    let mismatching = parse("void f() { int r = (a == b); }");

    let finder = MatchFinder::single(vec![pattern]);
    assert_eq!(finder.find_all(&[matching], true).count(), 1);
    assert_eq!(finder.find_all(&[mismatching], true).count(), 0);
}
