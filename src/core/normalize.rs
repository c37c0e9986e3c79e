//! Value normalization shared by every decoder.
//!
//! All functions are pure; they never fail. Numeric fields stay textual and
//! the only arithmetic performed is [`sum_amounts`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Default for an absent numeric field when safe numerics are enabled.
pub const SAFE_NUMBER_ZERO: &str = "0.00";

/// Default for an absent multiplier field (exchange rates, equivalences)
/// when safe numerics are enabled.
pub const SAFE_NUMBER_ONE: &str = "1.00";

/// Characters that are always treated as separators by [`compact_string`].
const CONTROL_SEPARATORS: [char; 3] = ['\n', '\t', '\r'];

/// Compact free text.
///
/// Every character of `delimiters` and every `\n`, `\t`, `\r` becomes a
/// separator; runs of two or more whitespace characters collapse into a
/// single space and the result is trimmed.
///
/// ```
/// use cfdi_transform::core::compact_string;
///
/// assert_eq!(compact_string("-", "a--b\n\nc"), "a b c");
/// assert_eq!(compact_string("", "  SERVICIO   DE  EJEMPLO "), "SERVICIO DE EJEMPLO");
/// ```
pub fn compact_string(delimiters: &str, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let separated: String = text
        .chars()
        .map(|c| {
            if CONTROL_SEPARATORS.contains(&c) || delimiters.contains(c) {
                ' '
            } else {
                c
            }
        })
        .collect();

    let mut out = String::with_capacity(separated.len());
    let mut run = String::new();
    for c in separated.chars() {
        if c.is_ascii_whitespace() {
            run.push(c);
            continue;
        }
        flush_whitespace(&mut out, &mut run);
        out.push(c);
    }
    flush_whitespace(&mut out, &mut run);

    out.trim().to_string()
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    match run.chars().count() {
        0 => {}
        1 => out.push_str(run),
        _ => out.push(' '),
    }
    run.clear();
}

/// Add two textual amounts.
///
/// An empty operand yields the other one verbatim. Operands that do not
/// parse as decimals count as zero. The result keeps the larger scale of
/// the two operands and never loses digits, even past the 28 significant
/// digits a [`Decimal`] holds.
///
/// ```
/// use cfdi_transform::core::sum_amounts;
///
/// assert_eq!(sum_amounts("160.00", "8.00"), "168.00");
/// assert_eq!(
///     sum_amounts("123456789012345678901234567890", "1"),
///     "123456789012345678901234567891"
/// );
/// ```
pub fn sum_amounts(first: &str, second: &str) -> String {
    if first.is_empty() {
        return second.to_string();
    }
    if second.is_empty() {
        return first.to_string();
    }
    let (first, second) = (first.trim(), second.trim());

    if let (Some(a), Some(b)) = (fixed_amount(first), fixed_amount(second)) {
        if let Some(sum) = a.checked_add(b) {
            return sum.to_string();
        }
    }
    WideAmount::parse_or_zero(first)
        .plus(&WideAmount::parse_or_zero(second))
        .to_string()
}

/// `None` when the amount needs more digits than a [`Decimal`] carries.
fn fixed_amount(value: &str) -> Option<Decimal> {
    match WideAmount::parse(value) {
        Some(wide) if !wide.fits_decimal() => None,
        _ => Some(Decimal::from_str(value).unwrap_or(Decimal::ZERO)),
    }
}

/// Sign and magnitude of a plain decimal literal, without a digit limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WideAmount {
    negative: bool,
    /// Most significant first, no leading zeros; empty for zero.
    digits: Vec<u8>,
    scale: usize,
}

impl WideAmount {
    /// Accepts `[+-]digits[.digits]`.
    fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = whole.bytes().chain(fraction.bytes()).map(|b| b - b'0').collect();
        Some(Self::new(negative, digits, fraction.len()))
    }

    fn parse_or_zero(text: &str) -> Self {
        Self::parse(text).unwrap_or_default()
    }

    fn new(negative: bool, mut digits: Vec<u8>, scale: usize) -> Self {
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        Self {
            negative: negative && !digits.is_empty(),
            digits,
            scale,
        }
    }

    fn fits_decimal(&self) -> bool {
        self.digits.len() <= DECIMAL_DIGITS && self.scale <= DECIMAL_DIGITS
    }

    /// Digits rescaled to `scale`, least significant first, no high zeros.
    fn magnitude_at(&self, scale: usize) -> Vec<u8> {
        let mut le = vec![0; scale - self.scale];
        le.extend(self.digits.iter().rev());
        while le.last() == Some(&0) {
            le.pop();
        }
        le
    }

    fn plus(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        let (a, b) = (self.magnitude_at(scale), other.magnitude_at(scale));

        let (negative, mut le) = if self.negative == other.negative {
            (self.negative, add_magnitudes(&a, &b))
        } else if compare_magnitudes(&a, &b) == Ordering::Less {
            (other.negative, sub_magnitudes(&b, &a))
        } else {
            (self.negative, sub_magnitudes(&a, &b))
        };
        le.reverse();
        Self::new(negative, le, scale)
    }
}

impl fmt::Display for WideAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text: String = self.digits.iter().map(|&d| char::from(b'0' + d)).collect();
        if text.len() <= self.scale {
            text.insert_str(0, &"0".repeat(self.scale + 1 - text.len()));
        }
        if self.scale > 0 {
            text.insert(text.len() - self.scale, '.');
        }
        if self.negative {
            text.insert(0, '-');
        }
        f.write_str(&text)
    }
}

/// Significant digits every [`Decimal`] can represent.
const DECIMAL_DIGITS: usize = 28;

fn compare_magnitudes(a: &[u8], b: &[u8]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

fn add_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0;
    for i in 0..a.len().max(b.len()) {
        let sum = a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0) + carry;
        out.push(sum % 10);
        carry = sum / 10;
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// `a - b` for `a >= b`.
fn sub_magnitudes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0;
    for (i, &digit) in a.iter().enumerate() {
        let subtrahend = b.get(i).copied().unwrap_or(0) + borrow;
        if digit >= subtrahend {
            out.push(digit - subtrahend);
            borrow = 0;
        } else {
            out.push(digit + 10 - subtrahend);
            borrow = 1;
        }
    }
    out
}

/// `value` if non-empty, else `"0.00"` under safe numerics, else `empty_char`.
pub fn default_if_empty(value: &str, empty_char: &str, safe_numerics: bool) -> String {
    or_default(value, empty_char, safe_numerics, SAFE_NUMBER_ZERO)
}

/// Like [`default_if_empty`] but falls back to `"1.00"` under safe numerics.
pub fn default_if_empty_one(value: &str, empty_char: &str, safe_numerics: bool) -> String {
    or_default(value, empty_char, safe_numerics, SAFE_NUMBER_ONE)
}

fn or_default(value: &str, empty_char: &str, safe_numerics: bool, safe: &str) -> String {
    if !value.is_empty() {
        value.to_string()
    } else if safe_numerics {
        safe.to_string()
    } else {
        empty_char.to_string()
    }
}
