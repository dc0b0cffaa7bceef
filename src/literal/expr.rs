use std::collections::BTreeSet;
use std::fmt;

/// Package that provides the map type used for every mapping literal.
pub const MAP_PACKAGE: &str = "std::collections";

/// A reference to a named item, optionally qualified by the package it lives in.
///
/// `name` may itself contain `::` for enum variants (`Phase::Bound`); the
/// package is kept apart so aliasing and import collection never have to
/// parse rendered paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    pub package: Option<String>,
    pub name: String,
}

impl Symbol {
    pub fn new(package: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            package: package.map(str::to_string),
            name: name.into(),
        }
    }

    /// Same package, `name::member`.
    pub fn member(&self, member: &str) -> Self {
        Self {
            package: self.package.clone(),
            name: format!("{}::{member}", self.name),
        }
    }

    /// Replace a leading `prefix` of the package with `alias`.
    ///
    /// Only whole path segments match: `a::b` aliases `a::b` and `a::b::c` but
    /// not `a::bc`.
    pub fn alias(&mut self, prefix: &str, alias: &str) {
        let Some(package) = self.package.as_deref() else {
            return;
        };
        let rewritten = if package == prefix {
            Some(alias.to_string())
        } else {
            package
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix("::"))
                .map(|rest| format!("{alias}::{rest}"))
        };
        if let Some(rewritten) = rewritten {
            self.package = Some(rewritten);
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{package}::{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Structured form of a literal construction expression.
///
/// Symbol references are distinct nodes, so rewriting a package prefix never
/// touches string payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Token rendered verbatim: numbers, booleans, chars, `None`, `()`
    Token(String),
    /// Owned string, rendered as `"..".to_string()`
    Str(String),
    /// Stand-in for a value that could not be encoded
    Placeholder,
    /// Unit struct or unit variant
    Path(Symbol),
    /// `Some(inner)`
    Some(Box<Expr>),
    /// Newtype/tuple struct or tuple variant: `callee(args..)`
    Call { callee: Symbol, args: Vec<Expr> },
    Tuple(Vec<Expr>),
    /// `vec![..]`
    Seq(Vec<Expr>),
    /// `BTreeMap::from([(k, v), ..])`
    Map {
        map: Symbol,
        entries: Vec<(Expr, Expr)>,
    },
    /// Struct with its non-zero fields in declaration order, the rest left to
    /// `..Default::default()`. Enum struct variants are `exhaustive`: every
    /// field is listed and there is no default spread.
    Struct {
        path: Symbol,
        fields: Vec<(String, Expr)>,
        exhaustive: bool,
    },
}

impl Expr {
    pub fn map_symbol() -> Symbol {
        Symbol::new(Some(MAP_PACKAGE), "BTreeMap")
    }

    /// Whether the value equals its type's `Default`, so a struct literal can
    /// leave it to `..Default::default()`.
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Token(t) => matches!(t.as_str(), "None" | "false" | "0" | "0.0" | "()"),
            Expr::Str(s) => s.is_empty(),
            Expr::Seq(items) => items.is_empty(),
            Expr::Map { entries, .. } => entries.is_empty(),
            Expr::Struct {
                fields, exhaustive, ..
            } => !exhaustive && fields.is_empty(),
            Expr::Tuple(items) => items.iter().all(Expr::is_zero),
            Expr::Placeholder | Expr::Path(_) | Expr::Some(_) | Expr::Call { .. } => false,
        }
    }

    /// Every package referenced anywhere in the tree.
    pub fn packages(&self) -> BTreeSet<String> {
        let mut packages = BTreeSet::new();
        self.visit_symbols(&mut |symbol| {
            if let Some(package) = &symbol.package {
                packages.insert(package.clone());
            }
        });
        packages
    }

    /// Rewrite the package prefix of every symbol node.
    pub fn alias(&mut self, prefix: &str, alias: &str) {
        self.visit_symbols_mut(&mut |symbol| symbol.alias(prefix, alias));
    }

    fn visit_symbols<F: FnMut(&Symbol)>(&self, f: &mut F) {
        match self {
            Expr::Token(_) | Expr::Str(_) | Expr::Placeholder => {}
            Expr::Path(symbol) => f(symbol),
            Expr::Some(inner) => inner.visit_symbols(f),
            Expr::Call { callee, args } => {
                f(callee);
                for arg in args {
                    arg.visit_symbols(f);
                }
            }
            Expr::Tuple(items) | Expr::Seq(items) => {
                for item in items {
                    item.visit_symbols(f);
                }
            }
            Expr::Map { map, entries } => {
                f(map);
                for (k, v) in entries {
                    k.visit_symbols(f);
                    v.visit_symbols(f);
                }
            }
            Expr::Struct { path, fields, .. } => {
                f(path);
                for (_, value) in fields {
                    value.visit_symbols(f);
                }
            }
        }
    }

    fn visit_symbols_mut<F: FnMut(&mut Symbol)>(&mut self, f: &mut F) {
        match self {
            Expr::Token(_) | Expr::Str(_) | Expr::Placeholder => {}
            Expr::Path(symbol) => f(symbol),
            Expr::Some(inner) => inner.visit_symbols_mut(f),
            Expr::Call { callee, args } => {
                f(callee);
                for arg in args {
                    arg.visit_symbols_mut(f);
                }
            }
            Expr::Tuple(items) | Expr::Seq(items) => {
                for item in items {
                    item.visit_symbols_mut(f);
                }
            }
            Expr::Map { map, entries } => {
                f(map);
                for (k, v) in entries {
                    k.visit_symbols_mut(f);
                    v.visit_symbols_mut(f);
                }
            }
            Expr::Struct { path, fields, .. } => {
                f(path);
                for (_, value) in fields {
                    value.visit_symbols_mut(f);
                }
            }
        }
    }

    /// Render as source text. Nested lines are indented by four spaces per
    /// level starting from `indent`; the first line carries no indentation.
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, indent);
        out
    }

    fn write(&self, out: &mut String, indent: usize) {
        match self {
            Expr::Token(t) => out.push_str(t),
            Expr::Str(s) => {
                out.push_str(&format!("{s:?}"));
                out.push_str(".to_string()");
            }
            Expr::Placeholder => out.push_str("Default::default()"),
            Expr::Path(symbol) => out.push_str(&symbol.to_string()),
            Expr::Some(inner) => {
                out.push_str("Some(");
                inner.write(out, indent);
                out.push(')');
            }
            Expr::Call { callee, args } => {
                out.push_str(&callee.to_string());
                out.push('(');
                write_inline(out, args, indent);
                out.push(')');
            }
            Expr::Tuple(items) => {
                out.push('(');
                write_inline(out, items, indent);
                if items.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
            Expr::Seq(items) => {
                if items.is_empty() {
                    out.push_str("vec![]");
                    return;
                }
                out.push_str("vec![\n");
                for item in items {
                    pad(out, indent + 1);
                    item.write(out, indent + 1);
                    out.push_str(",\n");
                }
                pad(out, indent);
                out.push(']');
            }
            Expr::Map { map, entries } => {
                if entries.is_empty() {
                    out.push_str(&format!("{map}::new()"));
                    return;
                }
                out.push_str(&format!("{map}::from([\n"));
                for (k, v) in entries {
                    pad(out, indent + 1);
                    out.push('(');
                    k.write(out, indent + 1);
                    out.push_str(", ");
                    v.write(out, indent + 1);
                    out.push_str("),\n");
                }
                pad(out, indent);
                out.push_str("])");
            }
            Expr::Struct {
                path,
                fields,
                exhaustive,
            } => {
                if fields.is_empty() {
                    if *exhaustive {
                        out.push_str(&format!("{path} {{}}"));
                    } else {
                        out.push_str(&format!("{path}::default()"));
                    }
                    return;
                }
                out.push_str(&format!("{path} {{\n"));
                for (name, value) in fields {
                    pad(out, indent + 1);
                    out.push_str(name);
                    out.push_str(": ");
                    value.write(out, indent + 1);
                    out.push_str(",\n");
                }
                if !exhaustive {
                    pad(out, indent + 1);
                    out.push_str("..Default::default()\n");
                }
                pad(out, indent);
                out.push('}');
            }
        }
    }
}

fn write_inline(out: &mut String, items: &[Expr], indent: usize) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.write(out, indent);
    }
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("    ");
    }
}
