//! Pattern factory (component E): compiles fragment text containing
//! `$name`/`$$name` placeholders into pattern subtrees, by splicing the
//! fragment into a minimal stub and letting the real parser build the tree.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use astmatch_core::{find_kind, AstNode, AstProvider};
use astmatch_error::{Error, ErrorKind, Result};

use crate::node::CppNode;
use crate::provider::CppProvider;

/// Every simple identifier in a fragment, `$`/`$$`-prefixed or bare (0 to 2
/// leading dollars). Used to synthesize just enough declarations for the
/// fragment to parse as a complete, syntactically ordinary translation
/// unit. GCC/Clang (and this workspace's `tree-sitter-cpp` grammar) accept
/// `$` inside identifiers as an extension, so a placeholder like `$cond` is
/// already a valid token and needs no further escaping before being
/// spliced into a declaration.
///
/// Declaring a stray `int` for every bare word this also picks up —
/// including C++ keywords that happen to appear in a statement fragment,
/// e.g. `if` in `"if ($cond) { ... }"` — relies on the same error-tolerant
/// recovery the original libclang-based implementation leaned on: a bogus
/// declaration becomes one isolated parse error, not a failure of the whole
/// stub.
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\${0,2}[A-Za-z]\w*").unwrap());

const RESERVED_NAME: &str = "__astmatch_reserved__";

fn discover_identifiers(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in IDENTIFIER.find_iter(text) {
        let id = m.as_str().to_string();
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

fn parse_failed<'a>(operation: &'static str, stub: &'a str) -> impl FnOnce(Error) -> Error + 'a {
    move |e| e.with_operation(operation).with_context("stub", stub.to_string())
}

/// Compiles pattern fragments into pattern subtrees using a real
/// `tree-sitter-cpp` parse of a synthesized stub, so a pattern's structure
/// is exactly the structure the matcher will later see in source code.
pub struct PatternFactory {
    provider: CppProvider,
}

impl Default for PatternFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternFactory {
    pub fn new() -> Self {
        Self {
            provider: CppProvider::new(),
        }
    }

    /// Compile a single expression fragment, e.g. `"$a == $b"`.
    pub fn create_expression(&self, text: &str) -> Result<CppNode> {
        let mut stub = String::new();
        for id in discover_identifiers(text) {
            let _ = writeln!(stub, "int {id};");
        }
        let _ = writeln!(stub, "int {RESERVED_NAME} = ({text});");

        let root = self
            .provider
            .load_from_text(&stub, "<pattern-expr>")
            .map_err(parse_failed("pattern_factory::create_expression", &stub))?;

        find_kind(&root, "identifier")
            .map_err(parse_failed("pattern_factory::create_expression", &stub))?
            .find(|node| node.name() == RESERVED_NAME)
            .and_then(|reserved| reserved.parent())
            .and_then(|declarator| {
                declarator
                    .children()
                    .into_iter()
                    .find(|child| child.name() != RESERVED_NAME)
            })
            .ok_or_else(|| {
                Error::misuse(format!("could not locate initializer of {RESERVED_NAME} in stub"))
                    .with_operation("pattern_factory::create_expression")
                    .with_context("stub", stub.clone())
            })
    }

    /// Compile a list of declarations, e.g. `"int $x; $T $y = $x;"`.
    pub fn create_declarations(
        &self,
        text: &str,
        types: &[String],
        parameters: &[String],
        extra_declarations: &[String],
    ) -> Result<Vec<CppNode>> {
        self.create_body(text, types, parameters, extra_declarations, "pattern_factory::create_declarations")
    }

    /// Compile a single declaration; fails with `Misuse` if the fragment
    /// produced none.
    pub fn create_declaration(
        &self,
        text: &str,
        types: &[String],
        parameters: &[String],
        extra_declarations: &[String],
    ) -> Result<CppNode> {
        self.create_declarations(text, types, parameters, extra_declarations)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::misuse("declaration fragment produced no nodes")
                    .with_operation("pattern_factory::create_declaration")
            })
    }

    /// Compile a list of statements, e.g. `"if ($cond) { $$body; }"`.
    ///
    /// Parameters are inferred: any identifier in the fragment that is
    /// neither a declared user type nor a substring of any
    /// `extra_declarations` entry is declared as an `int` parameter so the
    /// stub function compiles.
    pub fn create_statements(
        &self,
        text: &str,
        types: &[String],
        extra_declarations: &[String],
    ) -> Result<Vec<CppNode>> {
        let parameters: Vec<String> = discover_identifiers(text)
            .into_iter()
            .filter(|id| !types.contains(id))
            .filter(|id| !extra_declarations.iter().any(|decl| decl.contains(id.as_str())))
            .collect();
        self.create_body(text, types, &parameters, extra_declarations, "pattern_factory::create_statements")
    }

    /// Compile a single statement; fails with `Misuse` if the fragment
    /// produced none.
    pub fn create_statement(&self, text: &str, types: &[String], extra_declarations: &[String]) -> Result<CppNode> {
        self.create_statements(text, types, extra_declarations)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::misuse("statement fragment produced no nodes")
                    .with_operation("pattern_factory::create_statement")
            })
    }

    /// Shared stub construction for declaration-mode and statement-mode:
    /// both wrap the fragment as the body of a reserved void function and
    /// extract its `compound_statement`'s children. The original system
    /// treated these as separate extraction paths; here they are the same
    /// path, since nothing distinguishes a declaration from a statement once
    /// both are parsed as children of a function body.
    fn create_body(
        &self,
        text: &str,
        types: &[String],
        parameters: &[String],
        extra_declarations: &[String],
        operation: &'static str,
    ) -> Result<Vec<CppNode>> {
        let mut stub = String::new();
        for t in types {
            let _ = writeln!(stub, "typedef int {t};");
        }
        for p in parameters {
            let _ = writeln!(stub, "int {p};");
        }
        for decl in extra_declarations {
            let _ = writeln!(stub, "{decl}");
        }
        let _ = writeln!(stub, "void {RESERVED_NAME}() {{\n{text}\n}}");

        let root = self
            .provider
            .load_from_text(&stub, "<pattern-body>")
            .map_err(parse_failed(operation, &stub))?;

        let body = find_kind(&root, "compound_statement")
            .map_err(parse_failed(operation, &stub))?
            .next()
            .ok_or_else(|| {
                Error::misuse("stub produced no compound_statement body")
                    .with_operation(operation)
                    .with_context("stub", stub.clone())
            })?;
        Ok(body.children())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_identifiers_with_and_without_dollar_prefixes() {
        let ids = discover_identifiers("$a == b + $$rest");
        assert_eq!(ids, vec!["$a", "b", "$$rest"]);
    }

    #[test]
    fn create_expression_extracts_a_binary_expression_pattern() {
        let factory = PatternFactory::new();
        let pattern = factory.create_expression("$a == $b").unwrap();
        assert_eq!(pattern.kind(), "binary_expression");
    }

    #[test]
    fn create_statements_extracts_an_if_statement_pattern() {
        let factory = PatternFactory::new();
        let pattern = factory
            .create_statement("if ($cond) { $$body; }", &[], &[])
            .unwrap();
        assert_eq!(pattern.kind(), "if_statement");
    }
}
