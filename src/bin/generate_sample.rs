//! Generate a deterministic sample sales CSV for manual testing:
//! `cargo run --bin generate_sample [output.csv]`

use anyhow::{Context, Result};

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

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const PRODUCTS: [(&str, f64); 3] = [("Widget", 9.5), ("Gadget", 24.0), ("Gizmo", 49.9)];

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_sales.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["date", "region", "product", "units", "sales"])?;

    let mut n_rows = 0usize;
    for day in 0..90 {
        let date = format!("2024-{:02}-{:02}", day / 30 + 1, day % 30 + 1);
        for region in REGIONS {
            for (product, base_price) in PRODUCTS {
                let units = 5 + (rng.next_f64() * 20.0) as i64;
                let price = rng.gauss(base_price, base_price * 0.1).max(0.5);
                let sales = (units as f64 * price * 100.0).round() / 100.0;
                writer.write_record([
                    date.as_str(),
                    region,
                    product,
                    &units.to_string(),
                    &sales.to_string(),
                ])?;
                n_rows += 1;
            }
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {n_rows} rows to {path}");
    Ok(())
}
