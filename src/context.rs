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

use std::fmt;

pub(crate) const STATUS_CONVERSION_SYNTAX: u32 = 1 << 0;
pub(crate) const STATUS_DIVISION_BY_ZERO: u32 = 1 << 1;
pub(crate) const STATUS_DIVISION_UNDEFINED: u32 = 1 << 2;
pub(crate) const STATUS_INEXACT: u32 = 1 << 3;
pub(crate) const STATUS_ROUNDED: u32 = 1 << 4;

const DEFAULT_MAX_DIGITS: u32 = 200;

/// A context for performing decimal operations.
///
/// Contexts serve two purposes:
///
///   * They configure various properties of decimal arithmetic, like the
///     rounding algorithm to use and the digit ceiling that bounds
///     non-terminating division expansions.
///
///   * They accumulate any informational conditions raised by decimal
///     operations. Multiple operations can be performed on a context and the
///     status need only be checked once at the end.
///
/// The operations themselves are defined as methods on this type; see the
/// [`Decimal`](crate::Decimal) documentation for an overview.
#[derive(Clone)]
pub struct Context {
    pub(crate) rounding: Rounding,
    pub(crate) max_digits: u32,
    pub(crate) status: u32,
}

impl Default for Context {
    fn default() -> Context {
        Context {
            rounding: Rounding::default(),
            max_digits: DEFAULT_MAX_DIGITS,
            status: 0,
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Context")
            .field("rounding", &self.rounding)
            .field("max_digits", &self.max_digits)
            .field("status", &self.status())
            .finish()
    }
}

impl Context {
    /// Returns the context's rounding algorithm.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Set's the context's rounding algorithm.
    pub fn set_rounding(&mut self, rounding: Rounding) {
        self.rounding = rounding;
    }

    /// Returns the context's division digit ceiling.
    ///
    /// A division whose decimal expansion does not terminate, like `1 / 3`,
    /// is truncated once this many digits have been produced after the
    /// decimal point. The default is 200.
    pub fn max_digits(&self) -> u32 {
        self.max_digits
    }

    /// Sets the context's division digit ceiling.
    pub fn set_max_digits(&mut self, max_digits: u32) {
        self.max_digits = max_digits;
    }

    /// Returns the context's status.
    pub fn status(&self) -> Status {
        Status {
            inner: self.status,
        }
    }

    /// Clears the context's status.
    pub fn clear_status(&mut self) {
        self.status = 0;
    }

    pub(crate) fn raise(&mut self, flags: u32) {
        self.status |= flags;
    }
}

/// Algorithms for rounding decimal numbers.
///
/// Rounding is applied at a requested precision, the number of digits to
/// retain after the decimal point.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rounding {
    /// Round towards zero (truncation).
    Down,
    /// Round to nearest; if equidistant, round so that the final digit is even.
    HalfEven,
    /// Round to nearest; if equidistant, round away from zero.
    HalfUp,
    /// Round away from zero.
    Up,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding::HalfEven
    }
}

/// Represents informational conditions raised by operations on decimal
/// numbers.
///
/// None of these conditions is a fault: every operation produces a defined
/// result. The status only records that a result was adjusted or that a
/// documented policy (like the zero result of a division by zero) applied.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Status {
    inner: u32,
}

impl Status {
    /// Reports whether any of the condition flags are set.
    pub fn any(&self) -> bool {
        self.inner != 0
    }

    /// Reports whether the conversion syntax flag is set.
    ///
    /// Operations set this flag when an invalid string is converted to a
    /// decimal.
    pub fn conversion_syntax(&self) -> bool {
        self.inner & STATUS_CONVERSION_SYNTAX != 0
    }

    /// Reports whether the division by zero flag is set.
    ///
    /// Operations set this flag when a nonzero dividend is divided by zero.
    /// The result of such a division is defined to be zero, so this flag is
    /// the only record that the division occurred.
    pub fn division_by_zero(&self) -> bool {
        self.inner & STATUS_DIVISION_BY_ZERO != 0
    }

    /// Reports whether the division undefined flag is set.
    ///
    /// Operations set this flag when a zero dividend is divided by zero.
    pub fn division_undefined(&self) -> bool {
        self.inner & STATUS_DIVISION_UNDEFINED != 0
    }

    /// Reports whether the inexact flag is set.
    ///
    /// Operations set this flag when one or more nonzero digits were
    /// discarded from a result.
    pub fn inexact(&self) -> bool {
        self.inner & STATUS_INEXACT != 0
    }

    /// Reports whether the rounded flag is set.
    ///
    /// Operations set this flag when one or more zero or nonzero digits
    /// were discarded from a result.
    pub fn rounded(&self) -> bool {
        self.inner & STATUS_ROUNDED != 0
    }
}
