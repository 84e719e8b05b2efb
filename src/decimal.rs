// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::mem;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Float, One, Signed, ToPrimitive, Zero};

use crate::context::{
    Context, Rounding, STATUS_CONVERSION_SYNTAX, STATUS_DIVISION_BY_ZERO,
    STATUS_DIVISION_UNDEFINED, STATUS_INEXACT, STATUS_ROUNDED,
};
use crate::error::{ParseDecimalError, TryFromDecimalError, TryFromFloatError};

/// An arbitrary-precision decimal number.
///
/// A decimal represents the value `coefficient × 10^exponent` exactly. The
/// coefficient is an arbitrary-precision signed integer, so values never
/// overflow and base-10 fractions like `0.1` carry no binary representation
/// error. The representation is not kept in lowest terms: `1.5` and `1.50`
/// are distinct (coefficient, exponent) pairs that compare equal.
///
/// Most operations are defined as methods on the [`Context`] type, which
/// configures their behavior and records any informational conditions they
/// raise.
///
/// For convenience, `Decimal` overloads many of the standard Rust operators.
/// For example, you can use the standard `+` operator to add two values
/// together:
///
/// ```
/// use bigdec::Decimal;
/// let a = Decimal::from(1);
/// let b = Decimal::from(2);
/// assert_eq!(a + b, Decimal::from(3));
/// ```
///
/// These overloaded operators implicitly construct a single-use default
/// context, which has some performance overhead. For maximum performance when
/// performing operations in bulk, use a long-lived context that you construct
/// yourself.
#[derive(Clone, Default)]
pub struct Decimal {
    pub(crate) coefficient: BigInt,
    pub(crate) exponent: i64,
}

impl Decimal {
    /// Constructs a decimal representing the number 0.
    pub fn zero() -> Decimal {
        Decimal::default()
    }

    /// Constructs a decimal from a coefficient and a power-of-ten exponent.
    ///
    /// The resulting value is `coefficient × 10^exponent`.
    pub fn new(coefficient: BigInt, exponent: i64) -> Decimal {
        Decimal {
            coefficient,
            exponent,
        }
    }

    /// Returns the coefficient of the number.
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    /// Computes the exponent of the number.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Computes the number of digits in the coefficient.
    ///
    /// If the number is zero, returns 1.
    pub fn digits(&self) -> u32 {
        if self.coefficient.is_zero() {
            1
        } else {
            self.coefficient.abs().to_str_radix(10).len() as u32
        }
    }

    /// Returns the sign of the coefficient.
    ///
    /// A zero coefficient reports [`Sign::NoSign`] regardless of the
    /// exponent.
    pub fn sign(&self) -> Sign {
        self.coefficient.sign()
    }

    /// Reports whether the value of the number is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Reports whether the number is less than zero.
    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    /// Rescales the number so its exponent drops to `exponent`, which must
    /// not be larger than the current exponent.
    fn rescale_to(&mut self, exponent: i64) {
        if self.exponent > exponent {
            self.coefficient = &self.coefficient * ten_to_the((self.exponent - exponent) as u64);
            self.exponent = exponent;
        }
    }

    /// The coefficient this number would have at `exponent`, which must not
    /// be larger than the current exponent.
    fn coefficient_at(&self, exponent: i64) -> BigInt {
        if self.exponent > exponent {
            &self.coefficient * ten_to_the((self.exponent - exponent) as u64)
        } else {
            self.coefficient.clone()
        }
    }

    /// The representation with trailing zeros folded out of the coefficient.
    ///
    /// Equal values reduce identically, whatever representation they started
    /// from, so this is the basis for hashing.
    fn reduced(&self) -> (BigInt, i64) {
        if self.coefficient.is_zero() {
            return (BigInt::zero(), 0);
        }
        let ten = BigInt::from(10);
        let mut coefficient = self.coefficient.clone();
        let mut exponent = self.exponent;
        loop {
            let (quotient, remainder) = coefficient.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            coefficient = quotient;
            exponent += 1;
        }
        (coefficient, exponent)
    }

    // The four rounding policies. Each assumes the caller has already ruled
    // out the no-op case (zero value, or exponent >= -precision), replaces
    // the coefficient with the retained digits, sets the exponent to
    // -precision, and reports whether any discarded digit was nonzero.

    fn round_half_even(&mut self, precision: u32) -> bool {
        let precision = precision as usize;
        let scale = (-self.exponent) as usize;
        let negative = self.coefficient.is_negative();
        let mut digits = self.coefficient.abs().to_str_radix(10);
        // Pad so the integer part is never empty; values below one round
        // against an explicit leading zero.
        if digits.len() <= scale {
            digits = "0".repeat(scale + 1 - digits.len()) + &digits;
        }
        let split = digits.len() - scale;
        let (kept, discarded) = digits.split_at(split);
        let discarded = discarded.as_bytes();
        let round_up = match discarded[precision] {
            b'6'..=b'9' => true,
            b'5' => {
                if discarded[precision + 1..].iter().any(|&b| b != b'0') {
                    true
                } else {
                    // An exact half: look at the digit that would precede it.
                    let neighbor = if precision == 0 {
                        kept.as_bytes()[kept.len() - 1]
                    } else {
                        discarded[precision - 1]
                    };
                    matches!(neighbor, b'1' | b'3' | b'5' | b'7' | b'9')
                }
            }
            _ => false,
        };
        let inexact = discarded[precision..].iter().any(|&b| b != b'0');
        let mut retained: BigInt = digits[..split + precision]
            .parse()
            .expect("retained digits are valid decimal");
        if negative {
            retained = -retained;
        }
        if round_up {
            retained += self.coefficient.signum();
        }
        self.coefficient = retained;
        self.exponent = -(precision as i64);
        inexact
    }

    fn round_half_up(&mut self, precision: u32) -> bool {
        let scale = (-self.exponent) as u64;
        // Truncate to one digit past the requested precision, then let a
        // signed half carry that digit into the result.
        let (mut quotient, remainder) = self
            .coefficient
            .div_rem(&ten_to_the(scale - u64::from(precision) - 1));
        let ten = BigInt::from(10);
        let inexact = !remainder.is_zero() || !(&quotient % &ten).is_zero();
        let mut half = BigInt::from(5);
        if quotient.is_negative() {
            half = -half;
        }
        quotient += half;
        self.coefficient = quotient / ten;
        self.exponent = -i64::from(precision);
        inexact
    }

    fn round_down(&mut self, precision: u32) -> bool {
        let scale = (-self.exponent) as u64;
        let (quotient, remainder) = self
            .coefficient
            .div_rem(&ten_to_the(scale - u64::from(precision)));
        self.coefficient = quotient;
        self.exponent = -i64::from(precision);
        !remainder.is_zero()
    }

    fn round_up(&mut self, precision: u32) -> bool {
        let scale = (-self.exponent) as u64;
        let sign = self.coefficient.signum();
        let (mut quotient, remainder) = self
            .coefficient
            .div_rem(&ten_to_the(scale - u64::from(precision)));
        let inexact = !remainder.is_zero();
        if inexact {
            quotient += sign;
        }
        self.coefficient = quotient;
        self.exponent = -i64::from(precision);
        inexact
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.coefficient.is_zero() {
            return f.pad_integral(true, "", "0");
        }
        let digits = self.coefficient.abs().to_str_radix(10);
        let body = if self.exponent == 0 {
            digits
        } else if self.exponent > 0 {
            digits + &"0".repeat(self.exponent as usize)
        } else {
            let scale = (-self.exponent) as usize;
            if digits.len() <= scale {
                let fraction = "0".repeat(scale - digits.len()) + digits.trim_end_matches('0');
                format!("0.{}", fraction)
            } else {
                let (int_part, fraction) = digits.split_at(digits.len() - scale);
                let fraction = fraction.trim_end_matches('0');
                if fraction.is_empty() {
                    int_part.to_string()
                } else {
                    format!("{}.{}", int_part, fraction)
                }
            }
        };
        f.pad_integral(!self.coefficient.is_negative(), "", &body)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Decimal, ParseDecimalError> {
        Context::default().parse(s)
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Decimal {
        Decimal::new(n, 0)
    }
}

from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl TryFrom<f32> for Decimal {
    type Error = TryFromFloatError;

    /// Converts a binary float by way of its shortest round-tripping decimal
    /// text, never by scaling the float, so none of the float's binary
    /// representation error leaks into the result.
    fn try_from(n: f32) -> Result<Decimal, TryFromFloatError> {
        if !n.is_finite() {
            return Err(TryFromFloatError);
        }
        Ok(n.to_string()
            .parse()
            .expect("float display is valid decimal syntax"))
    }
}

impl TryFrom<f64> for Decimal {
    type Error = TryFromFloatError;

    /// Converts a binary float by way of its shortest round-tripping decimal
    /// text, never by scaling the float, so none of the float's binary
    /// representation error leaks into the result.
    fn try_from(n: f64) -> Result<Decimal, TryFromFloatError> {
        if !n.is_finite() {
            return Err(TryFromFloatError);
        }
        Ok(n.to_string()
            .parse()
            .expect("float display is valid decimal syntax"))
    }
}

impl TryFrom<&Decimal> for i64 {
    type Error = TryFromDecimalError;

    fn try_from(n: &Decimal) -> Result<i64, TryFromDecimalError> {
        Context::default().try_into_i64(n)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Decimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    /// Compares by value: representations at different exponents are aligned
    /// before their coefficients are compared, without mutating either
    /// operand, so `1.5 == 1.50` and `-0 == 0`.
    fn cmp(&self, other: &Decimal) -> Ordering {
        let sign = self.coefficient.sign().cmp(&other.coefficient.sign());
        if sign != Ordering::Equal {
            return sign;
        }
        match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => self.coefficient.cmp(&other.coefficient),
            Ordering::Less => self.coefficient.cmp(&other.coefficient_at(self.exponent)),
            Ordering::Greater => self.coefficient_at(other.exponent).cmp(&other.coefficient),
        }
    }
}

impl Hash for Decimal {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        let (coefficient, exponent) = self.reduced();
        coefficient.hash(state);
        exponent.hash(state);
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(mut self) -> Decimal {
        Context::default().neg(&mut self);
        self
    }
}

impl Add<Decimal> for Decimal {
    type Output = Decimal;

    fn add(mut self, rhs: Decimal) -> Decimal {
        Context::default().add(&mut self, &rhs);
        self
    }
}

impl AddAssign<Decimal> for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        Context::default().add(self, &rhs);
    }
}

impl Div<Decimal> for Decimal {
    type Output = Decimal;

    fn div(mut self, rhs: Decimal) -> Decimal {
        Context::default().div(&mut self, &rhs);
        self
    }
}

impl DivAssign<Decimal> for Decimal {
    fn div_assign(&mut self, rhs: Decimal) {
        Context::default().div(self, &rhs);
    }
}

impl Mul<Decimal> for Decimal {
    type Output = Decimal;

    fn mul(mut self, rhs: Decimal) -> Decimal {
        Context::default().mul(&mut self, &rhs);
        self
    }
}

impl MulAssign<Decimal> for Decimal {
    fn mul_assign(&mut self, rhs: Decimal) {
        Context::default().mul(self, &rhs);
    }
}

impl Sub<Decimal> for Decimal {
    type Output = Decimal;

    fn sub(mut self, rhs: Decimal) -> Decimal {
        Context::default().sub(&mut self, &rhs);
        self
    }
}

impl SubAssign<Decimal> for Decimal {
    fn sub_assign(&mut self, rhs: Decimal) {
        Context::default().sub(self, &rhs);
    }
}

impl Sum for Decimal {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Decimal>,
    {
        let mut cx = Context::default();
        let mut sum = Decimal::zero();
        for d in iter {
            cx.add(&mut sum, &d);
        }
        sum
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Decimal>,
    {
        let mut cx = Context::default();
        let mut sum = Decimal::zero();
        for d in iter {
            cx.add(&mut sum, d);
        }
        sum
    }
}

impl Product for Decimal {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = Decimal>,
    {
        let mut cx = Context::default();
        let mut product = Decimal::from(1);
        for d in iter {
            cx.mul(&mut product, &d);
        }
        product
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Decimal>,
    {
        let mut cx = Context::default();
        let mut product = Decimal::from(1);
        for d in iter {
            cx.mul(&mut product, d);
        }
        product
    }
}

impl Zero for Decimal {
    fn zero() -> Decimal {
        Decimal::zero()
    }

    fn is_zero(&self) -> bool {
        self.is_zero()
    }
}

impl One for Decimal {
    fn one() -> Decimal {
        Decimal::from(1)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    /// Serializes as the canonical string form.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    /// Deserializes from any string in the decimal grammar.
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl<'de> serde::de::Visitor<'de> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string containing a decimal number")
            }

            fn visit_str<E>(self, s: &str) -> Result<Decimal, E>
            where
                E: serde::de::Error,
            {
                s.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}

impl Context {
    /// Parses a number from its string representation.
    ///
    /// The accepted grammar is an optional sign, one or more integer digits,
    /// an optional fraction (`.` followed by one or more digits), and an
    /// optional exponent (`e` or `E`, an optional sign, and one or more
    /// digits): `123`, `-0.0500`, `1.5e10`, `+2E-3`. Anything else raises
    /// the conversion syntax flag and returns an error.
    pub fn parse<S>(&mut self, s: S) -> Result<Decimal, ParseDecimalError>
    where
        S: AsRef<str>,
    {
        match parse_numeric(s.as_ref()) {
            Some(d) => Ok(d),
            None => {
                self.raise(STATUS_CONVERSION_SYNTAX);
                Err(ParseDecimalError)
            }
        }
    }

    /// Computes the absolute value of `n`, storing the result in `n`.
    pub fn abs(&mut self, n: &mut Decimal) {
        if n.coefficient.is_negative() {
            n.coefficient = -mem::take(&mut n.coefficient);
        }
    }

    /// Negates `n`, storing the result in `n`.
    pub fn neg(&mut self, n: &mut Decimal) {
        n.coefficient = -mem::take(&mut n.coefficient);
    }

    /// Adds `lhs` and `rhs`, storing the result in `lhs`.
    ///
    /// The operands are aligned to the smaller of the two exponents first;
    /// `rhs` is never mutated.
    pub fn add(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        let exponent = lhs.exponent.min(rhs.exponent);
        lhs.rescale_to(exponent);
        lhs.coefficient += rhs.coefficient_at(exponent);
    }

    /// Subtracts `rhs` from `lhs`, storing the result in `lhs`.
    pub fn sub(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        let exponent = lhs.exponent.min(rhs.exponent);
        lhs.rescale_to(exponent);
        lhs.coefficient -= rhs.coefficient_at(exponent);
    }

    /// Multiplies `lhs` by `rhs`, storing the result in `lhs`.
    ///
    /// If either operand is zero the result is the plain zero with exponent
    /// 0, rather than a zero carrying the accumulated exponent.
    pub fn mul(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if lhs.coefficient.is_zero() || rhs.coefficient.is_zero() {
            *lhs = Decimal::zero();
            return;
        }
        lhs.coefficient = &lhs.coefficient * &rhs.coefficient;
        lhs.exponent += rhs.exponent;
    }

    /// Divides `lhs` by `rhs`, storing the result in `lhs`.
    ///
    /// Division by zero is not a fault: the result is defined to be zero
    /// with exponent 0, and the division by zero (or division undefined,
    /// for a zero dividend) flag records that it happened. Callers that
    /// want fault semantics must check the divisor themselves.
    ///
    /// When the quotient has no finite decimal expansion, the expansion is
    /// truncated after [`max_digits`](Context::max_digits) fractional digits
    /// and the inexact and rounded flags are raised:
    ///
    /// ```
    /// use bigdec::Context;
    ///
    /// let mut cx = Context::default();
    /// cx.set_max_digits(10);
    /// let mut d = cx.parse("1").unwrap();
    /// let three = cx.parse("3").unwrap();
    /// cx.div(&mut d, &three);
    /// assert_eq!(d.to_string(), "0.3333333333");
    /// assert!(cx.status().inexact());
    /// ```
    pub fn div(&mut self, lhs: &mut Decimal, rhs: &Decimal) {
        if rhs.coefficient.is_zero() {
            let flag = if lhs.coefficient.is_zero() {
                STATUS_DIVISION_UNDEFINED
            } else {
                STATUS_DIVISION_BY_ZERO
            };
            self.raise(flag);
            *lhs = Decimal::zero();
            return;
        }
        let (quotient, remainder) = lhs.coefficient.div_rem(&rhs.coefficient);
        if remainder.is_zero() {
            lhs.coefficient = quotient;
            lhs.exponent -= rhs.exponent;
            return;
        }
        // Indivisible: long division in base 10 on the absolute values, one
        // quotient digit per step, bounded by the digit ceiling.
        let negative = lhs.is_negative() != rhs.is_negative();
        let dividend = lhs.coefficient.abs();
        let divisor = rhs.coefficient.abs();
        let mut exponent = lhs.exponent - rhs.exponent;
        let (quotient, mut remainder) = dividend.div_rem(&divisor);
        let mut buf = String::new();
        if negative {
            buf.push('-');
        }
        buf.push_str(&quotient.to_str_radix(10));
        let ten = BigInt::from(10);
        while !remainder.is_zero() && -exponent < i64::from(self.max_digits) {
            remainder = remainder * &ten;
            let (digit, r) = remainder.div_rem(&divisor);
            buf.push_str(&digit.to_str_radix(10));
            remainder = r;
            exponent -= 1;
        }
        if !remainder.is_zero() {
            self.raise(STATUS_INEXACT | STATUS_ROUNDED);
        }
        buf.push('e');
        buf.push_str(&exponent.to_string());
        // Feeding the assembled digits back through the parser folds the
        // exponent and strips trailing zeros exactly as parsing would.
        *lhs = parse_numeric(&buf).expect("assembled quotient is valid decimal syntax");
    }

    /// Rounds `n` at `precision` digits after the decimal point, storing the
    /// result in `n`, using the context's rounding algorithm.
    ///
    /// Values that already have no more than `precision` fractional digits
    /// are returned unchanged. Otherwise the retained digits are adjusted
    /// per the rounding algorithm, the exponent becomes `-precision`, the
    /// rounded flag is raised, and the inexact flag is raised if any
    /// discarded digit was nonzero.
    ///
    /// ```
    /// use bigdec::Context;
    ///
    /// let mut cx = Context::default();
    /// let mut d = cx.parse("2.5").unwrap();
    /// cx.round(&mut d, 0);
    /// assert_eq!(d.to_string(), "2");
    /// ```
    pub fn round(&mut self, n: &mut Decimal, precision: u32) {
        if n.coefficient.is_zero() || n.exponent >= -i64::from(precision) {
            return;
        }
        let inexact = match self.rounding {
            Rounding::Down => n.round_down(precision),
            Rounding::HalfEven => n.round_half_even(precision),
            Rounding::HalfUp => n.round_half_up(precision),
            Rounding::Up => n.round_up(precision),
        };
        if inexact {
            self.raise(STATUS_ROUNDED | STATUS_INEXACT);
        } else {
            self.raise(STATUS_ROUNDED);
        }
    }

    /// Converts `n` to an `i64`, if its magnitude fits.
    ///
    /// Values with a negative exponent are truncated toward zero, not
    /// rounded, and raise the inexact flag:
    ///
    /// ```
    /// use bigdec::Context;
    ///
    /// let mut cx = Context::default();
    /// let d = cx.parse("2.7").unwrap();
    /// assert_eq!(cx.try_into_i64(&d), Ok(2));
    /// assert!(cx.status().inexact());
    /// ```
    pub fn try_into_i64(&mut self, n: &Decimal) -> Result<i64, TryFromDecimalError> {
        if n.exponent >= 0 {
            n.coefficient_at(0).to_i64().ok_or(TryFromDecimalError)
        } else {
            self.raise(STATUS_INEXACT);
            let quotient = &n.coefficient / ten_to_the((-n.exponent) as u64);
            quotient.to_i64().ok_or(TryFromDecimalError)
        }
    }

    /// Converts `n` to the nearest `f32`.
    ///
    /// Raises the inexact flag unless the conversion was lossless.
    pub fn to_f32(&mut self, n: &Decimal) -> f32 {
        let f = format!("{}e{}", n.coefficient, n.exponent)
            .parse::<f32>()
            .expect("coefficient-exponent text is valid float syntax");
        if !float_converts_exactly(f, n) {
            self.raise(STATUS_INEXACT);
        }
        f
    }

    /// Converts `n` to the nearest `f64`.
    ///
    /// Raises the inexact flag unless the conversion was lossless:
    ///
    /// ```
    /// use bigdec::Context;
    ///
    /// let mut cx = Context::default();
    /// let d = cx.parse("0.5").unwrap();
    /// assert_eq!(cx.to_f64(&d), 0.5);
    /// assert!(!cx.status().inexact());
    /// ```
    pub fn to_f64(&mut self, n: &Decimal) -> f64 {
        let f = format!("{}e{}", n.coefficient, n.exponent)
            .parse::<f64>()
            .expect("coefficient-exponent text is valid float syntax");
        if !float_converts_exactly(f, n) {
            self.raise(STATUS_INEXACT);
        }
        f
    }
}

/// Computes 10^pow as a big integer, squaring for large powers.
fn ten_to_the(pow: u64) -> BigInt {
    if pow < 20 {
        BigInt::from(10u64.pow(pow as u32))
    } else {
        let half = ten_to_the(pow / 2);
        let squared = &half * &half;
        if pow % 2 == 0 {
            squared
        } else {
            squared * BigInt::from(10)
        }
    }
}

/// Parses the decimal grammar, returning `None` on any violation.
fn parse_numeric(s: &str) -> Option<Decimal> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }
    let integer_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == integer_start {
        return None;
    }
    let integer_end = i;
    let mut fraction = "";
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let fraction_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == fraction_start {
            return None;
        }
        fraction = &s[fraction_start..i];
    }
    let mut exponent: i64 = 0;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        let exponent_start = i;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let digit_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == digit_start {
            return None;
        }
        exponent = s[exponent_start..i].parse().ok()?;
    }
    if i != bytes.len() {
        return None;
    }
    // Trailing zeros in the fraction fold into the exponent, not the
    // coefficient.
    let fraction = fraction.trim_end_matches('0');
    let mut digits = String::with_capacity(integer_end + fraction.len());
    digits.push_str(&s[..integer_end]);
    digits.push_str(fraction);
    let coefficient = digits.parse().ok()?;
    let exponent = exponent.checked_sub(fraction.len() as i64)?;
    Some(Decimal::new(coefficient, exponent))
}

/// Reports whether `f` represents exactly the same value as `n`.
///
/// Every finite float is a dyadic rational and so has an exact, finite
/// decimal expansion: `m × 2^e` with `e < 0` is `m × 5^|e| × 10^e`.
fn float_converts_exactly<F>(f: F, n: &Decimal) -> bool
where
    F: Float,
{
    if !f.is_finite() {
        return false;
    }
    let (mantissa, exponent, sign) = f.integer_decode();
    let mut coefficient = BigInt::from(mantissa);
    if sign < 0 {
        coefficient = -coefficient;
    }
    let exact = if exponent >= 0 {
        Decimal::new(coefficient << (exponent as usize), 0)
    } else {
        let scale = (-exponent) as usize;
        // 10^scale carries exactly `scale` factors of two, so shifting them
        // out leaves 5^scale.
        Decimal::new(
            coefficient * (ten_to_the(scale as u64) >> scale),
            -(scale as i64),
        )
    };
    exact == *n
}
