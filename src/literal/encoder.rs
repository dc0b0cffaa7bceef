use serde::ser::{self, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use super::expr::{Expr, Symbol};
use super::symbols::SymbolTable;
use crate::config::ErrorPolicy;
use crate::error::EncodingError;

const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn",
];

/// A value rendered as a construction expression.
///
/// Holds the expression tree, the packages it references and the
/// diagnostics for every field that had to be replaced by
/// `Default::default()`.
#[derive(Debug, Clone)]
pub struct Literal {
    expr: Expr,
    packages: BTreeSet<String>,
    diagnostics: Vec<EncodingError>,
}

impl Literal {
    /// Encode `value` as a literal expression.
    ///
    /// Fields equal to their zero value are left to `..Default::default()`,
    /// so the output rebuilds `value` only for types whose `Default` is the
    /// field-wise zero (as every type in [`crate::api`]). A hand-written
    /// `Default` that, say, starts a bool at `true` does not round-trip.
    ///
    /// Under [`ErrorPolicy::Tolerate`] this never fails: unencodable fields
    /// become placeholders and are reported through [`Literal::diagnostics`].
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::Fail`], the first [`EncodingError`] met during
    /// traversal, located at its field path.
    pub fn encode<T>(
        value: &T,
        symbols: &SymbolTable,
        policy: ErrorPolicy,
    ) -> Result<Self, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        let mut cx = Context {
            symbols,
            policy,
            path: Vec::new(),
            diagnostics: Vec::new(),
        };
        let expr = match value.serialize(ExprSerializer { cx: &mut cx }) {
            Ok(expr) => expr,
            Err(err) => cx.recover(err)?,
        };
        let packages = expr.packages();
        Ok(Self {
            expr,
            packages,
            diagnostics: cx.diagnostics,
        })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Packages referenced by the expression as encoded, before any aliasing.
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    pub fn diagnostics(&self) -> &[EncodingError] {
        &self.diagnostics
    }

    /// Shorten every symbol under `prefix` to `alias`. String payloads are
    /// never touched.
    pub fn alias(&mut self, prefix: &str, alias: &str) {
        self.expr.alias(prefix, alias);
    }

    /// Source text of the expression, starting at indentation level zero.
    pub fn source(&self) -> String {
        self.expr.render(0)
    }

    pub fn into_diagnostics(self) -> Vec<EncodingError> {
        self.diagnostics
    }
}

/// Rust field name for a wire key: `storageClassName` -> `storage_class_name`,
/// `type` -> `type_`.
pub fn field_ident(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if matches!(prev, Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
        prev = Some(c);
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

/// Rust variant name for a wire variant: `readWriteOnce` -> `ReadWriteOnce`.
pub fn variant_ident(variant: &str) -> String {
    if variant.starts_with(|c: char| c.is_ascii_uppercase()) {
        return variant.to_string();
    }
    variant
        .split(['_', '-'])
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

struct Context<'t> {
    symbols: &'t SymbolTable,
    policy: ErrorPolicy,
    path: Vec<String>,
    diagnostics: Vec<EncodingError>,
}

impl Context<'_> {
    fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }

    /// Either hand back a placeholder (and remember why) or fail, per policy.
    fn recover(&mut self, err: EncodingError) -> Result<Expr, EncodingError> {
        let err = if self.path.is_empty() {
            err
        } else {
            err.at(self.path_string())
        };
        match self.policy {
            ErrorPolicy::Fail => Err(err),
            ErrorPolicy::Tolerate => {
                debug!(error = %err, "substituting placeholder for unencodable value");
                self.diagnostics.push(err);
                Ok(Expr::Placeholder)
            }
        }
    }
}

struct ExprSerializer<'a, 't> {
    cx: &'a mut Context<'t>,
}

fn token(value: impl ToString) -> Result<Expr, EncodingError> {
    Ok(Expr::Token(value.to_string()))
}

macro_rules! float_token {
    ($v:expr, $ty:literal) => {
        if $v.is_nan() {
            token(concat!($ty, "::NAN"))
        } else if $v.is_infinite() && $v.is_sign_positive() {
            token(concat!($ty, "::INFINITY"))
        } else if $v.is_infinite() {
            token(concat!($ty, "::NEG_INFINITY"))
        } else {
            token(format!("{:?}", $v))
        }
    };
}

impl<'a, 't> ser::Serializer for ExprSerializer<'a, 't> {
    type Ok = Expr;
    type Error = EncodingError;
    type SerializeSeq = SeqEncoder<'a, 't>;
    type SerializeTuple = SeqEncoder<'a, 't>;
    type SerializeTupleStruct = SeqEncoder<'a, 't>;
    type SerializeTupleVariant = SeqEncoder<'a, 't>;
    type SerializeMap = MapEncoder<'a, 't>;
    type SerializeStruct = StructEncoder<'a, 't>;
    type SerializeStructVariant = StructEncoder<'a, 't>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, v: bool) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Expr, EncodingError> {
        token(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Expr, EncodingError> {
        float_token!(v, "f32")
    }

    fn serialize_f64(self, v: f64) -> Result<Expr, EncodingError> {
        float_token!(v, "f64")
    }

    fn serialize_char(self, v: char) -> Result<Expr, EncodingError> {
        token(format!("{v:?}"))
    }

    fn serialize_str(self, v: &str) -> Result<Expr, EncodingError> {
        Ok(Expr::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Expr, EncodingError> {
        Ok(Expr::Seq(
            v.iter().map(|b| Expr::Token(b.to_string())).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Expr, EncodingError> {
        token("None")
    }

    fn serialize_some<T>(self, value: &T) -> Result<Expr, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Expr::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> Result<Expr, EncodingError> {
        token("()")
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Expr, EncodingError> {
        Ok(Expr::Path(self.cx.symbols.resolve(name)?))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Expr, EncodingError> {
        let symbol = self.cx.symbols.resolve(name)?;
        Ok(Expr::Path(symbol.member(&variant_ident(variant))))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Expr, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        let callee = self.cx.symbols.resolve(name)?;
        let inner = value.serialize(ExprSerializer { cx: self.cx })?;
        Ok(Expr::Call {
            callee,
            args: vec![inner],
        })
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Expr, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        let callee = self.cx.symbols.resolve(name)?.member(&variant_ident(variant));
        let inner = value.serialize(ExprSerializer { cx: self.cx })?;
        Ok(Expr::Call {
            callee,
            args: vec![inner],
        })
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqEncoder<'a, 't>, EncodingError> {
        Ok(SeqEncoder::new(self.cx, SeqKind::Vec, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqEncoder<'a, 't>, EncodingError> {
        Ok(SeqEncoder::new(self.cx, SeqKind::Tuple, len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<SeqEncoder<'a, 't>, EncodingError> {
        let callee = self.cx.symbols.resolve(name)?;
        Ok(SeqEncoder::new(self.cx, SeqKind::Call(callee), len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqEncoder<'a, 't>, EncodingError> {
        let callee = self.cx.symbols.resolve(name)?.member(&variant_ident(variant));
        Ok(SeqEncoder::new(self.cx, SeqKind::Call(callee), len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapEncoder<'a, 't>, EncodingError> {
        Ok(MapEncoder {
            cx: self.cx,
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<StructEncoder<'a, 't>, EncodingError> {
        let path = self.cx.symbols.resolve(name)?;
        Ok(StructEncoder {
            cx: self.cx,
            path,
            fields: Vec::with_capacity(len),
            exhaustive: false,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructEncoder<'a, 't>, EncodingError> {
        let path = self.cx.symbols.resolve(name)?.member(&variant_ident(variant));
        Ok(StructEncoder {
            cx: self.cx,
            path,
            fields: Vec::with_capacity(len),
            exhaustive: true,
        })
    }
}

enum SeqKind {
    Vec,
    Tuple,
    Call(Symbol),
}

struct SeqEncoder<'a, 't> {
    cx: &'a mut Context<'t>,
    kind: SeqKind,
    items: Vec<Expr>,
}

impl<'a, 't> SeqEncoder<'a, 't> {
    fn new(cx: &'a mut Context<'t>, kind: SeqKind, len: usize) -> Self {
        Self {
            cx,
            kind,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.cx.path.push(format!("[{}]", self.items.len()));
        let result = value.serialize(ExprSerializer { cx: &mut *self.cx });
        self.cx.path.pop();
        self.items.push(result?);
        Ok(())
    }

    fn finish(self) -> Expr {
        match self.kind {
            SeqKind::Vec => Expr::Seq(self.items),
            SeqKind::Tuple => Expr::Tuple(self.items),
            SeqKind::Call(callee) => Expr::Call {
                callee,
                args: self.items,
            },
        }
    }
}

impl ser::SerializeSeq for SeqEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Expr, EncodingError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Expr, EncodingError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Expr, EncodingError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Expr, EncodingError> {
        Ok(self.finish())
    }
}

struct MapEncoder<'a, 't> {
    cx: &'a mut Context<'t>,
    entries: Vec<(Expr, Expr)>,
    pending_key: Option<Expr>,
}

impl ser::SerializeMap for MapEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(ExprSerializer { cx: &mut *self.cx })?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| EncodingError::Custom("map value without a key".to_string()))?;
        let label = match &key {
            Expr::Str(s) => format!("[{s}]"),
            other => format!("[{}]", other.render(0)),
        };
        self.cx.path.push(label);
        let result = value.serialize(ExprSerializer { cx: &mut *self.cx });
        self.cx.path.pop();
        self.entries.push((key, result?));
        Ok(())
    }

    fn end(mut self) -> Result<Expr, EncodingError> {
        // HashMap iteration order must not leak into the output
        self.entries
            .sort_by_cached_key(|(key, _)| key.render(0));
        Ok(Expr::Map {
            map: Expr::map_symbol(),
            entries: self.entries,
        })
    }
}

struct StructEncoder<'a, 't> {
    cx: &'a mut Context<'t>,
    path: Symbol,
    fields: Vec<(String, Expr)>,
    exhaustive: bool,
}

impl StructEncoder<'_, '_> {
    fn field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.cx.path.push(key.to_string());
        let encoded = match value.serialize(ExprSerializer { cx: &mut *self.cx }) {
            Ok(expr) => Ok(expr),
            Err(err) => self.cx.recover(err),
        };
        self.cx.path.pop();
        let expr = encoded?;
        if self.exhaustive || !expr.is_zero() {
            self.fields.push((field_ident(key), expr));
        }
        Ok(())
    }

    fn finish(self) -> Expr {
        Expr::Struct {
            path: self.path,
            fields: self.fields,
            exhaustive: self.exhaustive,
        }
    }
}

impl ser::SerializeStruct for StructEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Expr, EncodingError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for StructEncoder<'_, '_> {
    type Ok = Expr;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Expr, EncodingError> {
        Ok(self.finish())
    }
}
