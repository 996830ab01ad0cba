//! Writes a reproducible synthetic tips table for trying the report out.
//!
//! Usage: `generate_sample [output.csv]` (defaults to `data.csv`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Serialize)]
struct TipRecord {
    total_bill: f64,
    tip: f64,
    sex: &'static str,
    smoker: &'static str,
    day: &'static str,
    time: &'static str,
    size: u32,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data.csv"));

    let mut rng = SimpleRng::new(42);

    // (day, dinner share, row count)
    let days = [("Thur", 0.05, 62), ("Fri", 0.6, 19), ("Sat", 1.0, 87), ("Sun", 1.0, 76)];
    let party_sizes = [1, 2, 2, 2, 2, 3, 3, 4, 4, 5, 6];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut rows = 0;
    for &(day, dinner_share, count) in &days {
        for _ in 0..count {
            let size: u32 = *rng.pick(&party_sizes);
            let dinner = rng.next_f64() < dinner_share;

            // Log-normal bill per head gives the long right tail of real checks.
            let per_head = rng.gauss(1.75, 0.35).exp();
            let total_bill = round2((per_head * size as f64).max(3.0));
            let rate = rng.gauss(0.16, 0.05).clamp(0.0, 0.45);
            let tip = round2((total_bill * rate).max(1.0));

            writer
                .serialize(TipRecord {
                    total_bill,
                    tip,
                    sex: *rng.pick(&["Female", "Male", "Male"]),
                    smoker: *rng.pick(&["No", "No", "Yes"]),
                    day,
                    time: if dinner { "Dinner" } else { "Lunch" },
                    size,
                })
                .context("writing record")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} tip records to {}", output_path.display());
    Ok(())
}
