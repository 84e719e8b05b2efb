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

use std::error::Error;
use std::fmt;

/// An error indicating that a string is not a valid decimal number.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseDecimalError;

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid decimal syntax")
    }
}

impl Error for ParseDecimalError {}

/// An error indicating that a value cannot be cast to a primitive type.
///
/// Casts fail when the value's magnitude is too large for the target type,
/// e.g. values that require too many digits of precision.
#[derive(Debug, Eq, PartialEq)]
pub struct TryFromDecimalError;

impl fmt::Display for TryFromDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("decimal cannot be expressed in target primitive type")
    }
}

impl Error for TryFromDecimalError {}

/// An error indicating that a floating-point number cannot be converted to a
/// decimal because it is NaN or infinite.
#[derive(Debug, Eq, PartialEq)]
pub struct TryFromFloatError;

impl fmt::Display for TryFromFloatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("non-finite float cannot be expressed as decimal")
    }
}

impl Error for TryFromFloatError {}
