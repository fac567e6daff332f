use serde::Serialize;

/// A single decoded telemetry sample.
///
/// Field values are taken verbatim from one log line; units are stripped
/// (`Vout` is in volts, `Iload` in amps).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Record {
    /// Controller sample counter (`Samples:`)
    pub sample_index: u64,
    /// Output voltage in volts (`Vout:`)
    pub output_voltage: f64,
    /// Load current in amps (`Iload:`)
    pub load_current: f64,
    /// Control-error entropy reported by the controller (`E:`)
    pub entropy: f64,
    /// `A:` term, carried through but not analyzed
    pub amplitude: f64,
    /// Entropy gradient (`∇S:`), carried through but not analyzed
    pub entropy_gradient: f64,
    /// `Corr:` term, carried through but not analyzed
    pub correlation: f64,
    /// Entropy change since the previous sample (`ΔS:`)
    pub delta_entropy: f64,
    /// Power switch state (`Gate: ON`)
    pub gate_on: bool,
    /// PWM duty value (`PWM:`)
    pub pwm_duty: u32,
}

/// Ordered, read-only sequence of records.
///
/// Position in the series is the time axis. The record count is fixed at
/// construction; there is no API to add or remove records afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSeries {
    records: Vec<Record>,
}

impl RecordSeries {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Build a new series from the records matching `predicate`, keeping order.
    pub fn select<F>(&self, predicate: F) -> RecordSeries
    where
        F: Fn(&Record) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .copied()
            .collect()
    }

    /// Sample counter column
    pub fn sample_indices(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.sample_index).collect()
    }

    /// Output voltage column (volts)
    pub fn output_voltages(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.output_voltage).collect()
    }

    /// Load current column (amps)
    pub fn load_currents(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.load_current).collect()
    }

    /// Entropy column
    pub fn entropies(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.entropy).collect()
    }

    /// Gate column
    pub fn gate_states(&self) -> Vec<bool> {
        self.records.iter().map(|r| r.gate_on).collect()
    }
}

impl FromIterator<Record> for RecordSeries {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSeries {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Trait for telemetry log decoders.
///
/// Decoding never fails: lines that do not belong to the format are skipped,
/// so the worst case is an empty series.
pub trait Parseable {
    fn parse(&self, data: &str) -> RecordSeries;
}
