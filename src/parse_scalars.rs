//! Scalar codec: converts a raw argument string into a boolean, integer, float or text leaf.
//!
//! Integers follow the base-0 literal convention: an optional sign, then `0x`, `0o` or `0b`
//! prefixes select base 16, 8 or 2, a bare leading `0` followed by more digits selects base 8,
//! and anything else is decimal. Underscores may separate digits. Nothing is trimmed.

use crate::error::ScalarError;
use crate::target::Scalar;

/// Parse the narrow argument boolean grammar.
///
/// Accepted literals (case-sensitive):
/// - `""` and `"true"` are `true` (a bare flag such as `verbose` means `verbose=true`)
/// - `"false"` is `false`
pub(crate) fn parse_bool(s: &str) -> Result<bool, ScalarError> {
    match s {
        "" | "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ScalarError::msg(format!(
            "invalid boolean `{s}`, expected `true` or `false`"
        ))),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum IntFault {
    Syntax,
    Range,
}

impl IntFault {
    fn into_error(self, ty: &'static str) -> ScalarError {
        match self {
            IntFault::Syntax => ScalarError::msg(format!("invalid {ty} literal")),
            IntFault::Range => ScalarError::msg(format!("value out of range for {ty}")),
        }
    }
}

/// Split a base prefix off an unsigned literal.
fn detect_radix(rest: &str) -> (u32, &str) {
    if let Some(r) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, r)
    } else if let Some(r) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        (8, r)
    } else if let Some(r) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        (2, r)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    }
}

fn parse_digits_u128(digits: &str, radix: u32) -> Result<u128, IntFault> {
    if digits.ends_with('_') || digits.contains("__") {
        return Err(IntFault::Syntax);
    }
    let mut val: u128 = 0;
    let mut saw = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(radix).ok_or(IntFault::Syntax)?;
        val = val
            .checked_mul(radix as u128)
            .and_then(|v| v.checked_add(d as u128))
            .ok_or(IntFault::Range)?;
        saw = true;
    }
    if saw { Ok(val) } else { Err(IntFault::Syntax) }
}

fn parse_signed_i128(s: &str) -> Result<i128, IntFault> {
    let (neg, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if rest.starts_with('_') {
        return Err(IntFault::Syntax);
    }
    let (radix, digits) = detect_radix(rest);
    let mag = parse_digits_u128(digits, radix)?;
    if neg {
        // i128::MIN has no positive counterpart, so go through the wrapping negation.
        if mag > i128::MAX as u128 + 1 {
            return Err(IntFault::Range);
        }
        Ok((mag as i128).wrapping_neg())
    } else {
        i128::try_from(mag).map_err(|_| IntFault::Range)
    }
}

fn parse_unsigned_u128(s: &str) -> Result<u128, IntFault> {
    if s.starts_with('-') {
        return Err(IntFault::Syntax);
    }
    let rest = s.strip_prefix('+').unwrap_or(s);
    // An underscore may follow a base prefix, never lead the literal.
    if rest.starts_with('_') {
        return Err(IntFault::Syntax);
    }
    let (radix, digits) = detect_radix(rest);
    parse_digits_u128(digits, radix)
}

/// Parse a signed integer of the width of `T`.
pub(crate) fn parse_int_signed<T>(s: &str, ty: &'static str) -> Result<T, ScalarError>
where
    T: TryFrom<i128>,
{
    let v = parse_signed_i128(s).map_err(|fault| fault.into_error(ty))?;
    T::try_from(v).map_err(|_| IntFault::Range.into_error(ty))
}

/// Parse an unsigned integer of the width of `T`.
pub(crate) fn parse_int_unsigned<T>(s: &str, ty: &'static str) -> Result<T, ScalarError>
where
    T: TryFrom<u128>,
{
    let v = parse_unsigned_u128(s).map_err(|fault| fault.into_error(ty))?;
    T::try_from(v).map_err(|_| IntFault::Range.into_error(ty))
}

fn is_infinity_literal(s: &str) -> bool {
    let t = s.strip_prefix(['+', '-']).unwrap_or(s);
    t.eq_ignore_ascii_case("inf") || t.eq_ignore_ascii_case("infinity")
}

pub(crate) fn parse_f64(s: &str) -> Result<f64, ScalarError> {
    let v = s
        .parse::<f64>()
        .map_err(|_| ScalarError::msg(format!("invalid f64 literal `{s}`")))?;
    if v.is_infinite() && !is_infinity_literal(s) {
        return Err(ScalarError::msg("value out of range for f64"));
    }
    Ok(v)
}

pub(crate) fn parse_f32(s: &str) -> Result<f32, ScalarError> {
    let v = s
        .parse::<f32>()
        .map_err(|_| ScalarError::msg(format!("invalid f32 literal `{s}`")))?;
    if v.is_infinite() && !is_infinity_literal(s) {
        return Err(ScalarError::msg("value out of range for f32"));
    }
    Ok(v)
}

/// Decode `value` into the scalar slot.
///
/// Called by:
/// - The resolver once a node is known to be a scalar leaf with no remaining path.
pub(crate) fn assign_scalar(value: &str, scalar: Scalar<'_>) -> Result<(), ScalarError> {
    match scalar {
        Scalar::Bool(slot) => *slot = parse_bool(value)?,
        Scalar::I8(slot) => *slot = parse_int_signed(value, "i8")?,
        Scalar::I16(slot) => *slot = parse_int_signed(value, "i16")?,
        Scalar::I32(slot) => *slot = parse_int_signed(value, "i32")?,
        Scalar::I64(slot) => *slot = parse_int_signed(value, "i64")?,
        Scalar::Isize(slot) => *slot = parse_int_signed(value, "isize")?,
        Scalar::U8(slot) => *slot = parse_int_unsigned(value, "u8")?,
        Scalar::U16(slot) => *slot = parse_int_unsigned(value, "u16")?,
        Scalar::U32(slot) => *slot = parse_int_unsigned(value, "u32")?,
        Scalar::U64(slot) => *slot = parse_int_unsigned(value, "u64")?,
        Scalar::Usize(slot) => *slot = parse_int_unsigned(value, "usize")?,
        Scalar::F32(slot) => *slot = parse_f32(value)?,
        Scalar::F64(slot) => *slot = parse_f64(value)?,
        Scalar::Text(slot) => {
            slot.clear();
            slot.push_str(value);
        }
    }
    Ok(())
}
