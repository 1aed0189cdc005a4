//! Adversarial value catalog
//!
//! Fixed, hand-curated payloads per parameter kind. Each bucket mixes
//! boundary values of the kind itself with type-confused values that test
//! weak input validation.

use crate::domain::value_objects::{FuzzValue, ParameterKind};

/// Length of the oversized text payload
pub const LONG_TEXT_LEN: usize = 50_000;

static TEXT_VALUES: [FuzzValue; 15] = [
    FuzzValue::text(""),
    FuzzValue::text("     "),
    FuzzValue::LongText {
        fill: 'a',
        len: LONG_TEXT_LEN,
    },
    FuzzValue::text("\0\0\0\0\0\0\0\0\0\0"),
    FuzzValue::text(
        "\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\
         \u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}\u{200b}",
    ),
    // Right-to-left override homoglyph
    FuzzValue::text("\u{202e}admin"),
    FuzzValue::text("<script>alert(1)</script>"),
    FuzzValue::text("';DROP TABLE u;--"),
    FuzzValue::text("{{7*7}}"),
    FuzzValue::text("2024-02-30"),
    FuzzValue::Null,
    FuzzValue::Integer(42),
    FuzzValue::Bool(true),
    FuzzValue::EmptyList,
    FuzzValue::EmptyMap,
];

static INTEGER_VALUES: [FuzzValue; 10] = [
    FuzzValue::Integer(0),
    FuzzValue::Integer(-1),
    FuzzValue::Integer(1),
    FuzzValue::Integer(1 << 31),
    FuzzValue::Integer(1 << 63),
    FuzzValue::Integer(-(1 << 63)),
    // Past u64::MAX
    FuzzValue::Integer(99_999_999_999_999_999_999),
    FuzzValue::Null,
    FuzzValue::text("abc"),
    FuzzValue::Float(0.5),
];

static FLOAT_VALUES: [FuzzValue; 9] = [
    FuzzValue::Float(0.0),
    FuzzValue::Float(-0.0),
    FuzzValue::Float(f64::NAN),
    FuzzValue::Float(f64::INFINITY),
    FuzzValue::Float(f64::NEG_INFINITY),
    FuzzValue::Float(-0.001),
    FuzzValue::Float(1e308),
    FuzzValue::Null,
    FuzzValue::text("NaN"),
];

/// Static table of adversarial values keyed by parameter kind
pub struct ValueCatalog;

impl ValueCatalog {
    /// Ordered adversarial values for `kind`. Total and deterministic.
    pub fn values_for(kind: ParameterKind) -> &'static [FuzzValue] {
        match kind {
            ParameterKind::Text => &TEXT_VALUES,
            ParameterKind::Integer => &INTEGER_VALUES,
            ParameterKind::Float => &FLOAT_VALUES,
        }
    }
}
