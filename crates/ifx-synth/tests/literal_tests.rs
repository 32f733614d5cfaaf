//! Rendering of constant default values.

use ifx_model::{ConstValue, SemanticModel, TypeId};
use ifx_synth::{DefaultLiteralRenderer, LiteralRenderer};

fn render(model: &SemanticModel, value: ConstValue, ty: TypeId) -> String {
    DefaultLiteralRenderer.render(model, &value, ty)
}

#[test]
fn primitives() {
    let model = SemanticModel::new();
    assert_eq!(render(&model, ConstValue::Bool(true), TypeId::BOOL), "true");
    assert_eq!(render(&model, ConstValue::Bool(false), TypeId::BOOL), "false");
    assert_eq!(render(&model, ConstValue::Int(7), TypeId::I32), "7");
    assert_eq!(render(&model, ConstValue::Int(-3), TypeId::I16), "-3");
    assert_eq!(render(&model, ConstValue::Null, TypeId::STRING), "null");
    assert_eq!(render(&model, ConstValue::Default, TypeId::OBJECT), "default");
}

#[test]
fn integer_suffixes() {
    let model = SemanticModel::new();
    assert_eq!(render(&model, ConstValue::Int(5), TypeId::I64), "5L");
    assert_eq!(render(&model, ConstValue::UInt(5), TypeId::U32), "5U");
    assert_eq!(render(&model, ConstValue::UInt(5), TypeId::U64), "5UL");
    // Narrow unsigned types need no suffix.
    assert_eq!(render(&model, ConstValue::UInt(5), TypeId::U8), "5");
}

#[test]
fn floating_literals_keep_a_decimal_point() {
    let model = SemanticModel::new();
    assert_eq!(render(&model, ConstValue::Float64(1.0), TypeId::F64), "1.0");
    assert_eq!(render(&model, ConstValue::Float64(2.5), TypeId::F64), "2.5");
    assert_eq!(render(&model, ConstValue::Float32(1.0), TypeId::F32), "1.0F");
    assert_eq!(render(&model, ConstValue::Float32(0.5), TypeId::F32), "0.5F");
}

#[test]
fn decimal_exponents_expand_to_digits() {
    let model = SemanticModel::new();
    let decimal = |text: &str| ConstValue::Decimal(text.to_string());
    assert_eq!(render(&model, decimal("1.5E+3"), TypeId::DECIMAL), "1500M");
    assert_eq!(render(&model, decimal("2E-4"), TypeId::DECIMAL), "0.0002M");
    assert_eq!(render(&model, decimal("0.25"), TypeId::DECIMAL), "0.25M");
    assert_eq!(render(&model, decimal("0E5"), TypeId::DECIMAL), "0M");
}

#[test]
fn char_and_string_escapes() {
    let model = SemanticModel::new();
    assert_eq!(render(&model, ConstValue::Char('a'), TypeId::CHAR), "'a'");
    assert_eq!(render(&model, ConstValue::Char('\0'), TypeId::CHAR), "'\\0'");
    assert_eq!(render(&model, ConstValue::Char('\''), TypeId::CHAR), "'\\''");
    assert_eq!(render(&model, ConstValue::Char('\n'), TypeId::CHAR), "'\\n'");

    let s = |text: &str| ConstValue::String(text.to_string());
    assert_eq!(render(&model, s("goo"), TypeId::STRING), "\"goo\"");
    assert_eq!(render(&model, s("a\"b"), TypeId::STRING), "\"a\\\"b\"");
    assert_eq!(render(&model, s("a\\b"), TypeId::STRING), "\"a\\\\b\"");
    assert_eq!(render(&model, s("a\nb"), TypeId::STRING), "\"a\\nb\"");
}

#[test]
fn enum_constants_prefer_member_names() {
    let mut model = SemanticModel::new();
    let color = model.add_enum("Color", &[("Red", 1), ("Blue", 2), ("Green", 4)], false);
    let ty = model.types.named(color, []);

    let value = |bits| ConstValue::Enum { symbol: color, bits };
    assert_eq!(render(&model, value(2), ty), "Color.Blue");
    // No exact member and not a flags enum: numeric cast.
    assert_eq!(render(&model, value(3), ty), "(Color)3");
}

#[test]
fn flags_enums_decompose_into_named_bits() {
    let mut model = SemanticModel::new();
    let flags = model.add_enum("Flags", &[("None", 0), ("A", 1), ("B", 2), ("C", 4)], true);
    let ty = model.types.named(flags, []);

    let value = |bits| ConstValue::Enum { symbol: flags, bits };
    assert_eq!(render(&model, value(0), ty), "Flags.None");
    assert_eq!(render(&model, value(3), ty), "Flags.A | Flags.B");
    assert_eq!(render(&model, value(5), ty), "Flags.A | Flags.C");
    // A bit with no named member cannot be decomposed.
    assert_eq!(render(&model, value(9), ty), "(Flags)9");
}
