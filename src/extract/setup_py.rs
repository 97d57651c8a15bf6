//! Extractor for python setup.py manifests.
//!
//! Recovers `install_requires` from *source code*, not data: authors
//! frequently express the dependency list through variable assignment,
//! list concatenation, and helper functions rather than a literal list
//! at the `setup()` call site. The file is parsed into an AST (NO CODE
//! EXECUTION) and walked once to build two per-file tables: symbol to
//! directly-assigned literal strings, and symbol to directly-referenced
//! symbols. Resolving `install_requires` then aggregates transitively
//! over both tables, in declaration order.
//!
//! # Security Model
//!
//! setup.py is never executed. Dependencies expressed through `exec`,
//! `eval`, dynamic imports, or file I/O are out of scope by design.
//!
//! # DoS Prevention
//!
//! - `MAX_SETUP_PY_BYTES`: caps accepted source size (1MB)
//! - `MAX_SETUP_PY_AST_NODES`: caps total nodes visited (10,000)
//! - `MAX_SETUP_PY_AST_DEPTH`: caps expression recursion (50 levels)
//!
//! Inputs over these limits degrade to partial or empty results rather
//! than recursing unboundedly.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rustpython_parser::{Mode, ast, parse};

use crate::cancel::CancelFlag;
use crate::models::PackageRecord;

use super::error::ExtractError;
use super::requirement::parse_requirement_spec;
use super::{ManifestExtractor, read_file_to_string};

const INSTALL_REQUIRES: &str = "install_requires";
const MAX_SETUP_PY_BYTES: usize = 1_048_576;
const MAX_SETUP_PY_AST_NODES: usize = 10_000;
const MAX_SETUP_PY_AST_DEPTH: usize = 50;

/// setup.py dependency extractor.
///
/// Builds a fresh [`SymbolTable`] per file, resolves the
/// `install_requires` symbol, and feeds every resolved string through
/// the requirement spec parser. An unresolved `install_requires` yields
/// an empty list, not an error.
pub struct SetupPyExtractor;

impl ManifestExtractor for SetupPyExtractor {
    fn is_match(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "setup.py")
    }

    fn extract(path: &Path, cancel: &CancelFlag) -> Result<Vec<PackageRecord>, ExtractError> {
        let content = read_file_to_string(path).map_err(|e| ExtractError::io(path, e))?;
        if content.len() > MAX_SETUP_PY_BYTES {
            log::warn!("setup.py too large at {:?}: {} bytes", path, content.len());
            return Ok(Vec::new());
        }

        let table = build_symbol_table(&content)?;
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        Ok(table
            .resolve(INSTALL_REQUIRES)
            .iter()
            .map(|spec| parse_requirement_spec(spec))
            .collect())
    }
}

/// Parses the source and walks the module body into a symbol table.
///
/// Fails when the source is not valid python or when the syntax tree's
/// root is not a module.
pub(crate) fn build_symbol_table(content: &str) -> Result<SymbolTable, ExtractError> {
    let parsed = parse(content, Mode::Module, "<setup.py>")
        .map_err(|e| ExtractError::Syntax(e.to_string()))?;
    let ast::Mod::Module(module) = parsed else {
        return Err(ExtractError::NotAModule);
    };

    let mut collector = SymbolCollector::default();
    let mut root = Binding::default();
    collector.collect_stmts(&module.body, &mut root);
    Ok(collector.table)
}

/// Per-file symbol tables, owned exclusively by one extraction run.
///
/// Built once, left to right; a later assignment to the same symbol
/// name overwrites both of its entries (last-write-wins).
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    literals: HashMap<String, Vec<String>>,
    references: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    fn bind(&mut self, symbol: String, binding: Binding) {
        self.literals.insert(symbol.clone(), binding.literals);
        self.references.insert(symbol, binding.references);
    }

    /// Returns the ordered list of literal strings transitively
    /// reachable from `symbol`: its direct literals first, then each
    /// referenced symbol's resolution in recorded order. An unknown
    /// symbol resolves to an empty list, never an error.
    ///
    /// The visited set bounds the walk by the number of distinct
    /// reachable symbols, so self-referential and mutually-recursive
    /// chains (`a = a`, `a = b; b = a`) terminate.
    pub(crate) fn resolve(&self, symbol: &str) -> Vec<String> {
        let mut resolved = Vec::new();
        let mut visited = HashSet::new();
        self.resolve_into(symbol, &mut visited, &mut resolved);
        resolved
    }

    fn resolve_into(&self, symbol: &str, visited: &mut HashSet<String>, out: &mut Vec<String>) {
        if !visited.insert(symbol.to_string()) {
            return;
        }

        if let Some(literals) = self.literals.get(symbol) {
            out.extend(literals.iter().cloned());
        }

        if let Some(references) = self.references.get(symbol) {
            for referenced in references {
                self.resolve_into(referenced, visited, out);
            }
        }
    }
}

/// Literals and symbol references gathered from one right-hand side.
#[derive(Debug, Default)]
struct Binding {
    literals: Vec<String>,
    references: Vec<String>,
}

#[derive(Default)]
struct SymbolCollector {
    table: SymbolTable,
    nodes_visited: usize,
}

impl SymbolCollector {
    fn budget_exhausted(&mut self) -> bool {
        if self.nodes_visited >= MAX_SETUP_PY_AST_NODES {
            return true;
        }
        self.nodes_visited += 1;
        false
    }

    /// Walks a statement list. Literals and references from value
    /// positions accumulate into `out`; assignments, keyword arguments,
    /// and function definitions open their own table entries instead.
    fn collect_stmts(&mut self, statements: &[ast::Stmt], out: &mut Binding) {
        for stmt in statements {
            if self.budget_exhausted() {
                return;
            }

            match stmt {
                ast::Stmt::Assign(ast::StmtAssign { targets, value, .. }) => {
                    for target in targets {
                        if let ast::Expr::Name(ast::ExprName { id, .. }) = target {
                            self.bind_expr(id.as_str(), value);
                        }
                    }
                }
                ast::Stmt::AnnAssign(ast::StmtAnnAssign { target, value, .. }) => {
                    if let (ast::Expr::Name(ast::ExprName { id, .. }), Some(value)) =
                        (target.as_ref(), value.as_ref())
                    {
                        self.bind_expr(id.as_str(), value);
                    }
                }
                ast::Stmt::FunctionDef(ast::StmtFunctionDef { name, body, .. })
                | ast::Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef { name, body, .. }) => {
                    // The function body is walked like an assignment
                    // right-hand side; this captures dependency lists
                    // factored into helper functions.
                    let mut binding = Binding::default();
                    self.collect_stmts(body, &mut binding);
                    self.table.bind(name.as_str().to_string(), binding);
                }
                ast::Stmt::Return(ast::StmtReturn { value, .. }) => {
                    if let Some(value) = value {
                        self.walk_expr(value, out, 0);
                    }
                }
                ast::Stmt::Expr(ast::StmtExpr { value, .. }) => {
                    self.walk_expr(value, out, 0);
                }
                ast::Stmt::If(ast::StmtIf { body, orelse, .. })
                | ast::Stmt::For(ast::StmtFor { body, orelse, .. })
                | ast::Stmt::While(ast::StmtWhile { body, orelse, .. }) => {
                    self.collect_stmts(body, out);
                    self.collect_stmts(orelse, out);
                }
                ast::Stmt::With(ast::StmtWith { body, .. })
                | ast::Stmt::AsyncWith(ast::StmtAsyncWith { body, .. }) => {
                    self.collect_stmts(body, out);
                }
                ast::Stmt::Try(ast::StmtTry {
                    body,
                    handlers,
                    orelse,
                    finalbody,
                    ..
                })
                | ast::Stmt::TryStar(ast::StmtTryStar {
                    body,
                    handlers,
                    orelse,
                    finalbody,
                    ..
                }) => {
                    self.collect_stmts(body, out);
                    for handler in handlers {
                        let ast::ExceptHandler::ExceptHandler(
                            ast::ExceptHandlerExceptHandler { body, .. },
                        ) = handler;
                        self.collect_stmts(body, out);
                    }
                    self.collect_stmts(orelse, out);
                    self.collect_stmts(finalbody, out);
                }
                // Imports, class bodies, deletes, globals: nothing a
                // dependency list can flow through.
                _ => {}
            }
        }
    }

    /// Binds `symbol` to whatever literals and references its value
    /// expression yields, replacing any prior entry for the same name.
    fn bind_expr(&mut self, symbol: &str, value: &ast::Expr) {
        let mut binding = Binding::default();
        self.walk_expr(value, &mut binding, 0);
        self.table.bind(symbol.to_string(), binding);
    }

    /// Walks a value expression, collecting literal strings and
    /// referenced symbols in source order.
    fn walk_expr(&mut self, expr: &ast::Expr, out: &mut Binding, depth: usize) {
        if depth >= MAX_SETUP_PY_AST_DEPTH || self.budget_exhausted() {
            return;
        }

        match expr {
            ast::Expr::Constant(ast::ExprConstant { value, .. }) => {
                if let ast::Constant::Str(value) = value {
                    out.literals.push(value.clone());
                }
            }
            ast::Expr::JoinedStr(ast::ExprJoinedStr { values, .. }) => {
                // f-strings are flattened to their leading constant
                // part; interpolated remainders are not recoverable
                // without evaluation.
                if let Some(ast::Expr::Constant(ast::ExprConstant {
                    value: ast::Constant::Str(value),
                    ..
                })) = values.first()
                {
                    out.literals.push(value.clone());
                }
            }
            ast::Expr::Name(ast::ExprName { id, .. }) => {
                out.references.push(id.as_str().to_string());
            }
            ast::Expr::List(ast::ExprList { elts, .. })
            | ast::Expr::Tuple(ast::ExprTuple { elts, .. })
            | ast::Expr::Set(ast::ExprSet { elts, .. }) => {
                for elt in elts {
                    self.walk_expr(elt, out, depth + 1);
                }
            }
            ast::Expr::BinOp(ast::ExprBinOp { left, right, .. }) => {
                self.walk_expr(left, out, depth + 1);
                self.walk_expr(right, out, depth + 1);
            }
            ast::Expr::UnaryOp(ast::ExprUnaryOp { operand, .. }) => {
                self.walk_expr(operand, out, depth + 1);
            }
            ast::Expr::Starred(ast::ExprStarred { value, .. }) => {
                self.walk_expr(value, out, depth + 1);
            }
            ast::Expr::Call(ast::ExprCall {
                func,
                args,
                keywords,
                ..
            }) => {
                self.walk_expr(func, out, depth + 1);
                for arg in args {
                    self.walk_expr(arg, out, depth + 1);
                }
                for keyword in keywords {
                    match keyword.arg.as_ref() {
                        // setup(install_requires=...) lands here: the
                        // keyword name opens its own table entry.
                        Some(arg) => self.bind_expr(arg.as_str(), &keyword.value),
                        None => self.walk_expr(&keyword.value, out, depth + 1),
                    }
                }
            }
            ast::Expr::IfExp(ast::ExprIfExp {
                test, body, orelse, ..
            }) => {
                self.walk_expr(test, out, depth + 1);
                self.walk_expr(body, out, depth + 1);
                self.walk_expr(orelse, out, depth + 1);
            }
            ast::Expr::Dict(ast::ExprDict { keys, values, .. }) => {
                for key in keys.iter().flatten() {
                    self.walk_expr(key, out, depth + 1);
                }
                for value in values {
                    self.walk_expr(value, out, depth + 1);
                }
            }
            ast::Expr::Subscript(ast::ExprSubscript { value, slice, .. }) => {
                self.walk_expr(value, out, depth + 1);
                self.walk_expr(slice, out, depth + 1);
            }
            ast::Expr::Attribute(ast::ExprAttribute { value, .. }) => {
                self.walk_expr(value, out, depth + 1);
            }
            // Lambdas, comprehensions, await/yield: no literal a
            // static walk can order reliably.
            _ => {}
        }
    }
}

crate::register_extractor!(
    "python setup.py manifest",
    &["**/setup.py"],
    "pypi",
    Some("https://setuptools.pypa.io/en/latest/references/keywords.html"),
);
