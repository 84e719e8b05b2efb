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

//! bigdec is an arbitrary-precision decimal arithmetic library for Rust.
//!
//! # Introduction
//!
//! Binary floating-point numbers can only approximate most decimal
//! fractions. The value 0.1, for example, would need an infinitely recurring
//! binary fraction, which is why `0.1f64 + 0.2` is famously not `0.3`.
//! bigdec instead represents numbers exactly as
//! coefficient × 10<sup>exponent</sup>, with an arbitrary-precision integer
//! coefficient, so base-10 arithmetic behaves the way it does on paper. This
//! is the representation to reach for in financial and commercial
//! calculations, where results must match those that might be calculated by
//! hand.
//!
//! # Details
//!
//! The main types exposed by this library are as follows:
//!
//!  * [`Decimal`], the arbitrary-precision decimal number. Parsing,
//!    formatting, comparison, and the standard arithmetic operators are
//!    available directly on the type.
//!
//!  * [`Context`], which hosts the arithmetic, rounding, and conversion
//!    operations. A context configures the behavior of the various
//!    operations (e.g., the rounding algorithm and the digit ceiling that
//!    bounds non-terminating divisions) and accumulates informational
//!    conditions (e.g., inexact results).
//!
//! # Examples
//!
//! The following example demonstrates the basic usage of the library:
//!
//! ```
//! # use std::error::Error;
//! use bigdec::Decimal;
//!
//! let x: Decimal = "0.1".parse()?;
//! let y: Decimal = "0.2".parse()?;
//! let z: Decimal = "0.3".parse()?;
//!
//! assert_eq!(x.clone() + y.clone(), z);
//! assert_eq!((x + y).to_string(), "0.3");
//!
//! # Ok::<_, Box<dyn Error>>(())
//! ```

#![deny(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod context;
#[macro_use]
mod conv;
mod decimal;
mod error;
mod macros;

pub use context::{Context, Rounding, Status};
pub use decimal::Decimal;
pub use error::{ParseDecimalError, TryFromDecimalError, TryFromFloatError};
pub use num_bigint::{BigInt, Sign};
