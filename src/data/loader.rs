use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{key_as_f64, DataTable, Dataset, Sample};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a selector table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `{ "Sunny": [ { "-45": 72.4, "0": 91.2 }, ... ], ... }`
/// * `.csv`  – a `selector` column plus one column per category key
pub fn load_table(path: &Path, name: &str) -> Result<DataTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json_table(&text, name)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv_table(file, name)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (selector → list of samples):
///
/// ```json
/// {
///   "Sunny": [
///     { "-45": 72.4, "-30": 78.1, "0": 91.2 },
///     { "-45": 38.2, "-30": null }
///   ],
///   "Cloudy": [ ... ]
/// }
/// ```
///
/// `null` and non-numeric values are kept as invalid entries; the
/// aggregator skips them.
pub fn parse_json_table(text: &str, name: &str) -> Result<DataTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let selectors = root
        .as_object()
        .context("Expected top-level JSON object of selector → samples")?;

    let mut table = DataTable::new(name);

    for (selector, rows) in selectors {
        let rows = rows
            .as_array()
            .with_context(|| format!("Selector '{selector}' is not a JSON array"))?;

        let mut samples = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let obj = row
                .as_object()
                .with_context(|| format!("Selector '{selector}', row {i} is not a JSON object"))?;

            let mut sample = Sample::new();
            for (key, val) in obj {
                let value = val.as_f64();
                if value.is_none() && !val.is_null() {
                    log::warn!("Selector '{selector}', row {i}, key '{key}': {val} is not a number");
                }
                sample.insert(key.clone(), value);
            }
            samples.push(sample);
        }

        table.insert(Dataset::new(selector.clone(), samples));
    }

    let keys: Vec<&str> = selectors
        .values()
        .filter_map(JsonValue::as_array)
        .flatten()
        .filter_map(JsonValue::as_object)
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();
    warn_numeric_aliases(name, keys);

    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with a `selector` column and one column per key.
///
/// ```text
/// selector,-45,-30,0
/// Sunny,72.4,78.1,91.2
/// Sunny,38.2,,61.4
/// ```
///
/// Each row is one sample of its selector's dataset. Empty cells are absent
/// keys; cells that do not parse as numbers are invalid entries.
pub fn read_csv_table<R: Read>(source: R, name: &str) -> Result<DataTable> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let selector_idx = headers
        .iter()
        .position(|h| h == "selector")
        .context("CSV missing 'selector' column")?;

    warn_numeric_aliases(
        name,
        headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != selector_idx)
            .map(|(_, h)| h.as_str()),
    );

    // Selector order follows first appearance in the file.
    let mut grouped: Vec<(String, Vec<Sample>)> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let selector = record.get(selector_idx).unwrap_or("").trim();
        if selector.is_empty() {
            bail!("CSV row {row_no}: empty selector");
        }

        let mut sample = Sample::new();
        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == selector_idx {
                continue;
            }
            let Some(key) = headers.get(col_idx) else {
                continue;
            };
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            sample.insert(key.clone(), cell.parse::<f64>().ok());
        }

        match grouped.iter_mut().find(|(s, _)| s == selector) {
            Some((_, samples)) => samples.push(sample),
            None => grouped.push((selector.to_string(), vec![sample])),
        }
    }

    let mut table = DataTable::new(name);
    for (selector, samples) in grouped {
        table.insert(Dataset::new(selector, samples));
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Key checks
// ---------------------------------------------------------------------------

/// Distinct keys that name the same number as an earlier key, paired with
/// that earlier key: `("0", "0.0")`.
///
/// Such keys stay separate series entries but share one x position.
pub fn numeric_aliases<'a, I>(keys: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<(&str, f64)> = Vec::new();
    let mut aliases = Vec::new();
    for key in keys {
        let Some(x) = key_as_f64(key) else {
            continue;
        };
        match seen.iter().find(|&&(_, y)| y == x) {
            Some(&(first, _)) if first != key => {
                if !aliases.iter().any(|(_, k): &(String, String)| k == key) {
                    aliases.push((first.to_string(), key.to_string()));
                }
            }
            Some(_) => {}
            None => seen.push((key, x)),
        }
    }
    aliases
}

fn warn_numeric_aliases<'a, I>(name: &str, keys: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for (first, alias) in numeric_aliases(keys) {
        log::warn!("{name} table: key '{alias}' has the same value as '{first}'");
    }
}
