// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing of duration-valued options.
//!
//! Timeouts are written as a sequence of decimal numbers, each with an
//! optional fraction and a unit suffix, such as "300ms", "1.5s" or "1m30s".
//! Valid units are "ns", "us" (or "µs"), "ms", "s", "m" and "h". A leading
//! sign is accepted; the absolute value is used.

use std::time::Duration;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

// Durations are bounded like a signed 64-bit nanosecond count.
const MAX_NANOS: u64 = i64::MAX as u64;

/// Error returned when a duration literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,
    #[error("expected a number at position {0}")]
    MissingNumber(usize),
    #[error("missing unit")]
    MissingUnit,
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("duration out of range")]
    Overflow,
}

/// A parsed duration together with the sign it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDuration {
    pub negative: bool,
    pub magnitude: Duration,
}

/// Parses a duration literal and returns its absolute value.
pub fn parse(s: &str) -> Result<Duration, ParseDurationError> {
    parse_signed(s).map(|d| d.magnitude)
}

/// Parses a duration literal, keeping track of a leading minus sign.
pub fn parse_signed(s: &str) -> Result<SignedDuration, ParseDurationError> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if rest == "0" {
        return Ok(SignedDuration {
            negative,
            magnitude: Duration::ZERO,
        });
    }
    if rest.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    let offset = s.len() - rest.len();
    let bytes = rest.as_bytes();
    let mut pos = 0;
    let mut total: u64 = 0;

    while pos < bytes.len() {
        let start = pos;
        let int_digits = take_digits(bytes, &mut pos);
        let mut frac_digits = "";
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            frac_digits = take_digits(bytes, &mut pos);
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(ParseDurationError::MissingNumber(offset + start));
        }

        let unit_start = pos;
        while pos < bytes.len() && bytes[pos] != b'.' && !bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let unit = &rest[unit_start..pos];
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit);
        }
        let unit_nanos = unit_nanos(unit)?;

        let whole = parse_digits(int_digits)?
            .checked_mul(unit_nanos)
            .ok_or(ParseDurationError::Overflow)?;
        let fraction = fraction_nanos(frac_digits, unit_nanos);
        total = total
            .checked_add(whole)
            .and_then(|t| t.checked_add(fraction))
            .filter(|t| *t <= MAX_NANOS)
            .ok_or(ParseDurationError::Overflow)?;
    }

    Ok(SignedDuration {
        negative,
        magnitude: Duration::from_nanos(total),
    })
}

fn take_digits<'a>(bytes: &'a [u8], pos: &mut usize) -> &'a str {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    // Only ASCII digits were consumed.
    std::str::from_utf8(&bytes[start..*pos]).unwrap_or_default()
}

fn parse_digits(digits: &str) -> Result<u64, ParseDurationError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse().map_err(|_| ParseDurationError::Overflow)
}

fn unit_nanos(unit: &str) -> Result<u64, ParseDurationError> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(NANOS_PER_MICRO),
        "ms" => Ok(NANOS_PER_MILLI),
        "s" => Ok(NANOS_PER_SEC),
        "m" => Ok(60 * NANOS_PER_SEC),
        "h" => Ok(60 * 60 * NANOS_PER_SEC),
        other => Err(ParseDurationError::UnknownUnit(other.to_string())),
    }
}

// Digits past nanosecond precision are dropped.
fn fraction_nanos(digits: &str, unit_nanos: u64) -> u64 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for b in digits.bytes().take(19) {
        numerator = numerator * 10 + u128::from(b - b'0');
        denominator *= 10;
    }
    (numerator * u128::from(unit_nanos) / denominator) as u64
}
