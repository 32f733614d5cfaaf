//! Constant-literal rendering.
//!
//! Default parameter values must be re-rendered in the target's own lexical
//! form. The rules are numerous and per-primitive, so they live behind a
//! pluggable [`LiteralRenderer`] table rather than being scattered through
//! the printer.

use ifx_model::{ConstValue, SemanticModel, TypeId};

/// Renders a compile-time constant as source text.
pub trait LiteralRenderer {
    fn render(&self, model: &SemanticModel, value: &ConstValue, ty: TypeId) -> String;
}

/// The default rendering table.
#[derive(Debug, Default)]
pub struct DefaultLiteralRenderer;

impl LiteralRenderer for DefaultLiteralRenderer {
    fn render(&self, model: &SemanticModel, value: &ConstValue, ty: TypeId) -> String {
        match value {
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Char(c) => render_char(*c),
            ConstValue::String(s) => render_string(s),
            ConstValue::Int(i) => {
                if ty == TypeId::I64 {
                    format!("{i}L")
                } else {
                    i.to_string()
                }
            }
            ConstValue::UInt(u) => match ty {
                // Unsigned literals carry their suffix so the zero form stays
                // unsigned.
                TypeId::U32 => format!("{u}U"),
                TypeId::U64 => format!("{u}UL"),
                _ => u.to_string(),
            },
            ConstValue::Float32(f) => format!("{}F", render_float(f64::from(*f))),
            ConstValue::Float64(f) => render_float(*f),
            // Exponent-form decimal constants are expanded to explicit digits.
            ConstValue::Decimal(text) => format!("{}M", expand_decimal_exponent(text)),
            ConstValue::Enum { symbol, bits } => render_enum(model, *symbol, *bits),
            ConstValue::Null => "null".to_string(),
            ConstValue::Default => "default".to_string(),
        }
    }
}

fn render_char(c: char) -> String {
    match c {
        '\0' => "'\\0'".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\'' => "'\\''".to_string(),
        '\n' => "'\\n'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\t' => "'\\t'".to_string(),
        c => format!("'{c}'"),
    }
}

fn render_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Round-trip float formatting: always keep a decimal point so the literal
/// stays a floating literal.
fn render_float(f: f64) -> String {
    if f == f.trunc() && f.is_finite() && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// Best-effort rendering of an enum constant:
/// - an exactly matching member renders as `Color.Red`;
/// - for flags enums, bits exactly covered by named members render as
///   `Color.Red | Color.Blue`;
/// - anything unrepresentable falls back to a numeric cast `(Color)5`.
fn render_enum(model: &SemanticModel, symbol: ifx_model::SymbolId, bits: u64) -> String {
    let data = model.symbol(symbol);
    let enum_name = model.interner.resolve(data.name);

    if let Some((member, _)) = data.enum_members.iter().find(|(_, v)| *v == bits) {
        return format!("{}.{}", enum_name, model.interner.resolve(*member));
    }

    if data.is_flags_enum && bits != 0 {
        let mut remaining = bits;
        let mut parts = Vec::new();
        for (member, value) in &data.enum_members {
            if *value != 0 && remaining & value == *value {
                parts.push(format!("{}.{}", enum_name, model.interner.resolve(*member)));
                remaining &= !value;
            }
        }
        if remaining == 0 && !parts.is_empty() {
            return parts.join(" | ");
        }
    }

    format!("({enum_name}){bits}")
}

/// Expand a decimal constant in exponent form to plain digits:
/// `1.5E+3` → `1500`, `2E-4` → `0.0002`. Already-plain spellings pass
/// through unchanged.
pub fn expand_decimal_exponent(text: &str) -> String {
    let Some(e_pos) = text.find(['e', 'E']) else {
        return text.to_string();
    };
    let (mantissa, exp_text) = text.split_at(e_pos);
    let Ok(exponent) = exp_text[1..].parse::<i32>() else {
        return text.to_string();
    };

    let negative = mantissa.starts_with('-');
    let mantissa = mantissa.trim_start_matches(['-', '+']);
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let digits: String = format!("{int_part}{frac_part}");
    if digits.chars().all(|c| c == '0') {
        return "0".to_string();
    }
    // Decimal point position measured from the right of the digit string.
    let point = frac_part.len() as i32 - exponent;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str(digits.trim_start_matches('0'));
        if out.ends_with('-') || out.is_empty() {
            out.push('0');
        }
        for _ in 0..-point {
            out.push('0');
        }
    } else if (point as usize) >= digits.len() {
        out.push_str("0.");
        for _ in 0..(point as usize - digits.len()) {
            out.push('0');
        }
        out.push_str(digits.trim_end_matches('0'));
        if out.ends_with('.') {
            out.push('0');
        }
    } else {
        let split = digits.len() - point as usize;
        out.push_str(&digits[..split]);
        let frac = digits[split..].trim_end_matches('0');
        if !frac.is_empty() {
            out.push('.');
            out.push_str(frac);
        }
    }
    out
}
