//! Writes a synthetic weather table (JSON) that can be opened with
//! File → Open Weather table… in the dashboard.
//!
//! Usage: `generate-sample [OUTPUT]` (default `sample_weather.json`).

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use iqa_dashboard::data::builtin::WEATHER_CONDITIONS;
use iqa_dashboard::data::selection::VIEWING_ANGLES;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Expected score for a weather condition at a viewing angle and session.
///
/// Scores rise toward positive angles; `dip` models the midday drop.
fn expected_score(base: f64, slope: f64, dip: f64, angle: i32, session: usize) -> f64 {
    let midday = if session == 1 { dip } else { 0.0 };
    base + slope * angle as f64 - midday
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_weather.json".to_string());

    let mut rng = SimpleRng::new(42);

    // (base at 0°, slope per degree, midday dip, noise)
    let profiles = [
        (85.0, 0.30, 30.0, 4.0),
        (68.0, 0.12, 8.0, 2.0),
        (62.0, 0.20, 12.0, 3.0),
    ];
    let sessions = 6;

    let mut table = Map::new();
    let mut written = 0usize;

    for (weather, &(base, slope, dip, noise)) in WEATHER_CONDITIONS.iter().zip(&profiles) {
        let mut samples = Vec::with_capacity(sessions);
        for session in 0..sessions {
            let mut sample = Map::new();
            for &angle in &VIEWING_ANGLES {
                // Roughly one reading in thirty is lost.
                let value = if rng.next_f64() < 0.033 {
                    Value::Null
                } else {
                    let score = rng.gauss(expected_score(base, slope, dip, angle, session), noise);
                    json!((score.clamp(0.0, 120.0) * 100.0).round() / 100.0)
                };
                sample.insert(angle.to_string(), value);
            }
            samples.push(Value::Object(sample));
            written += 1;
        }
        table.insert(weather.to_string(), Value::Array(samples));
    }

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    serde_json::to_writer_pretty(file, &Value::Object(table)).context("writing JSON")?;

    println!(
        "Wrote {written} samples ({} angles each) to {output_path}",
        VIEWING_ANGLES.len()
    );
    Ok(())
}
