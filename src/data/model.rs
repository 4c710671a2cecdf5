use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Category keys
// ---------------------------------------------------------------------------

/// Interpret a category key ("-45", "0", "7") as a number.
pub fn key_as_f64(key: &str) -> Option<f64> {
    key.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Ordering used for every key sequence handed to a chart.
///
/// Numeric keys sort ascending by value and come before non-numeric keys.
/// Keys with the same value ("0", "0.0", "-0") compare equal.
/// Non-numeric keys compare equal to each other, so a stable sort keeps
/// them in the order they were first seen.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (key_as_f64(a), key_as_f64(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A score is usable only when it is a finite number.
pub fn is_valid_value(value: f64) -> bool {
    value.is_finite()
}

// ---------------------------------------------------------------------------
// Sample – one record of keyed scores
// ---------------------------------------------------------------------------

/// One measurement record: category key → IQA score.
///
/// A key that is not present is *absent*. A key that is present with `None`
/// (or a NaN) is *invalid*; both are skipped when averaging. Keys keep the
/// order in which they were inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    entries: Vec<(String, Option<f64>)>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<f64>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert of a valid score.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, Some(value));
        self
    }

    /// Whether the key is present at all (valid or not).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The score for `key`, only when present and valid.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| *v)
            .filter(|v| is_valid_value(*v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Sample {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut sample = Sample::new();
        for (k, v) in iter {
            sample.insert(k, Some(v));
        }
        sample
    }
}

// ---------------------------------------------------------------------------
// Dataset – the samples behind one selector
// ---------------------------------------------------------------------------

/// An ordered sequence of samples, optionally tagged with its selector label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub samples: Vec<Sample>,
}

/// Returned for selectors that have no dataset.
static EMPTY_DATASET: Dataset = Dataset {
    label: None,
    samples: Vec::new(),
};

impl Dataset {
    pub fn new(label: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            label: Some(label.into()),
            samples,
        }
    }

    pub fn unlabeled(samples: Vec<Sample>) -> Self {
        Self {
            label: None,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DataTable – selector label → Dataset
// ---------------------------------------------------------------------------

/// A named family of datasets ("Weather", "Hours", "Metric"), one per selector.
/// Selector order is the order the datasets were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub name: String,
    datasets: Vec<Dataset>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datasets: Vec::new(),
        }
    }

    /// Add a dataset, replacing any existing one under the same label.
    /// Unlabeled datasets are ignored: they cannot be selected.
    pub fn insert(&mut self, dataset: Dataset) {
        let Some(label) = dataset.label.as_deref() else {
            log::warn!("Ignoring unlabeled dataset in table '{}'", self.name);
            return;
        };
        match self
            .datasets
            .iter_mut()
            .find(|d| d.label.as_deref() == Some(label))
        {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }

    pub fn with(mut self, dataset: Dataset) -> Self {
        self.insert(dataset);
        self
    }

    pub fn get(&self, selector: &str) -> Option<&Dataset> {
        self.datasets
            .iter()
            .find(|d| d.label.as_deref() == Some(selector))
    }

    /// Dataset for `selector`; unknown or missing selectors give an empty dataset.
    pub fn select(&self, selector: Option<&str>) -> &Dataset {
        selector
            .and_then(|s| self.get(s))
            .unwrap_or(&EMPTY_DATASET)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.datasets
            .iter()
            .filter_map(|d| d.label.as_deref())
            .collect()
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AggregateResult – what the charts consume
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// One aggregated key.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateEntry {
    pub key: String,
    pub value: f64,
    /// Present only when the aggregation tracked min/max.
    pub range: Option<ValueRange>,
}

/// Ordered, de-duplicated `(key, value)` series plus a display label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub label: String,
    pub entries: Vec<AggregateEntry>,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&AggregateEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// X coordinate for entry `i`: the numeric key, or its position when the
    /// key is not a number.
    fn x_at(&self, i: usize) -> f64 {
        key_as_f64(&self.entries[i].key).unwrap_or(i as f64)
    }

    /// `[key, mean]` pairs for a line chart.
    pub fn points(&self) -> Vec<[f64; 2]> {
        (0..self.entries.len())
            .map(|i| [self.x_at(i), self.entries[i].value])
            .collect()
    }

    /// `[key, min]` pairs; empty when no range was tracked.
    pub fn min_points(&self) -> Vec<[f64; 2]> {
        (0..self.entries.len())
            .filter_map(|i| self.entries[i].range.map(|r| [self.x_at(i), r.min]))
            .collect()
    }

    /// `[key, max]` pairs; empty when no range was tracked.
    pub fn max_points(&self) -> Vec<[f64; 2]> {
        (0..self.entries.len())
            .filter_map(|i| self.entries[i].range.map(|r| [self.x_at(i), r.max]))
            .collect()
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.label)?;
        for e in &self.entries {
            write!(f, " {}={:.3}", e.key, e.value)?;
        }
        Ok(())
    }
}
