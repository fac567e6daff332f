//! Decoder for ERPC controller telemetry logs.
//!
//! The controller prints one telemetry line per sample, interleaved with
//! free-form diagnostic output:
//!
//! ```text
//! Samples: 1 | Vout: 5.00V | Iload: 0.20A | E: 0.01 | A: 0.0 | ∇S: 0.0 | Corr: 0.0 | ΔS: 0.0 | Gate: ON  | PWM: 128
//! ```
//!
//! A line is a telemetry record when, starting at some `Samples:` in it, it
//! splits on `|` into the ten `key: value` fields above in that exact order
//! and every value has the expected shape. Each `Samples:` occurrence is
//! tried in turn and the first one that decodes wins. Anything else is
//! diagnostic noise and is skipped without error.

use rayon::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

use super::types::{Parseable, Record, RecordSeries};

/// Start of the telemetry portion of a line
const RECORD_START: &str = "Samples:";

/// Separator between `key: value` fields
const FIELD_DELIMITER: char = '|';

/// Number of fields in a telemetry record
const FIELD_COUNT: usize = 10;

/// Field keys in the order the controller prints them
const FIELD_KEYS: [&str; FIELD_COUNT] = [
    "Samples", "Vout", "Iload", "E", "A", "∇S", "Corr", "ΔS", "Gate", "PWM",
];

/// Position of `Gate` in [`FIELD_KEYS`]
const GATE_FIELD: usize = 8;

/// One `key: value` field token
static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<key>[^:]+):\s*(?<value>.*)$").expect("Invalid regex pattern")
});

/// Unsigned decimal token (digits and dots)
static UNSIGNED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.]+$").expect("Invalid regex pattern"));

/// Signed decimal token (digits, dots and minus signs)
static SIGNED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-0-9.]+$").expect("Invalid regex pattern"));

/// Integer token
static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid regex pattern"));

/// Gate state token
static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("Invalid regex pattern"));

/// ERPC telemetry log parser
pub struct Erpc;

impl Erpc {
    /// Detect if content contains at least one ERPC telemetry line
    pub fn detect(contents: &str) -> bool {
        contents.lines().any(|line| Self::parse_line(line).is_some())
    }

    /// Decode a single line, returning `None` for anything that is not a
    /// well-formed telemetry record.
    pub fn parse_line(line: &str) -> Option<Record> {
        line.match_indices(RECORD_START)
            .find_map(|(start, _)| Self::decode_record(&line[start..]))
    }

    /// Decode a record that begins exactly at `Samples:`
    fn decode_record(text: &str) -> Option<Record> {
        let mut tokens = text.split(FIELD_DELIMITER);

        let mut raw = [""; FIELD_COUNT];
        let mut values = [""; FIELD_COUNT];
        for ((raw_slot, slot), key) in raw.iter_mut().zip(values.iter_mut()).zip(FIELD_KEYS) {
            let token = tokens.next()?;
            *slot = field_value(token, key)?;
            *raw_slot = token;
        }

        // The gate word must be followed by whitespace before the delimiter
        if !raw[GATE_FIELD].ends_with(char::is_whitespace) {
            return None;
        }

        let [samples, vout, iload, entropy, amplitude, gradient, correlation, delta, gate, pwm] =
            values;

        Some(Record {
            sample_index: parse_integer(samples)?,
            output_voltage: parse_unsigned(vout.strip_suffix('V')?)?,
            load_current: parse_unsigned(iload.strip_suffix('A')?)?,
            entropy: parse_signed(entropy)?,
            amplitude: parse_unsigned(amplitude)?,
            entropy_gradient: parse_unsigned(gradient)?,
            correlation: parse_unsigned(correlation)?,
            delta_entropy: parse_signed(delta)?,
            gate_on: parse_gate(gate)?,
            pwm_duty: parse_integer(leading_digits(pwm))?,
        })
    }
}

impl Parseable for Erpc {
    fn parse(&self, file_contents: &str) -> RecordSeries {
        // Ordered collect: output order matches line order
        let records: Vec<Record> = file_contents
            .par_lines()
            .filter_map(Self::parse_line)
            .collect();

        tracing::info!(
            "Parsed ERPC log: {} telemetry records from {} lines",
            records.len(),
            file_contents.lines().count()
        );

        RecordSeries::new(records)
    }
}

/// Split a `key: value` token and return the trimmed value if the key matches.
fn field_value<'a>(token: &'a str, expected_key: &str) -> Option<&'a str> {
    let captures = FIELD_REGEX.captures(token.trim())?;
    if captures.name("key")?.as_str().trim() != expected_key {
        return None;
    }
    Some(captures.name("value")?.as_str().trim())
}

fn parse_unsigned(value: &str) -> Option<f64> {
    if !UNSIGNED_REGEX.is_match(value) {
        return None;
    }
    value.parse().ok()
}

fn parse_signed(value: &str) -> Option<f64> {
    if !SIGNED_REGEX.is_match(value) {
        return None;
    }
    value.parse().ok()
}

fn parse_integer<T: std::str::FromStr>(value: &str) -> Option<T> {
    if !INTEGER_REGEX.is_match(value) {
        return None;
    }
    value.parse().ok()
}

/// Leading run of ASCII digits, e.g. `128` from `128ms`
fn leading_digits(value: &str) -> &str {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    &value[..end]
}

fn parse_gate(value: &str) -> Option<bool> {
    if !WORD_REGEX.is_match(value) {
        return None;
    }
    Some(value == "ON")
}
