use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Cumulative logistic curve: `peak / (1 + e^(-rate (day - midpoint)))`.
fn logistic(day: f64, peak: f64, midpoint: f64, rate: f64) -> f64 {
    peak / (1.0 + (-rate * (day - midpoint)).exp())
}

/// Cumulative counts for one province: smooth curve plus noisy daily reports,
/// with the occasional downward correction.
fn generate_counts(days: usize, peak: f64, midpoint: f64, rate: f64, rng: &mut SimpleRng) -> Vec<i64> {
    let mut counts = Vec::with_capacity(days);
    let mut reported = 0i64;
    for d in 0..days {
        let expected = logistic(d as f64, peak, midpoint, rate);
        let jitter = 1.0 + (rng.next_f64() - 0.5) * 0.2;
        let mut next = (expected * jitter).round() as i64;
        if rng.next_f64() > 0.03 {
            next = next.max(reported);
        }
        reported = next.max(0);
        counts.push(reported);
    }
    counts
}

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
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_confirmed.csv".to_string());

    let days = 120;
    let start = NaiveDate::from_ymd_opt(2020, 1, 22).context("invalid start date")?;

    // (province, country, lat, long, peak, midpoint, rate)
    let regions: &[(&str, &str, f64, f64, f64, f64, f64)] = &[
        ("", "Italy", 41.87, 12.56, 210_000.0, 55.0, 0.14),
        ("", "Spain", 40.46, -3.74, 230_000.0, 62.0, 0.15),
        ("Hubei", "China", 30.97, 112.27, 68_000.0, 22.0, 0.22),
        ("Guangdong", "China", 23.34, 113.42, 1_600.0, 20.0, 0.25),
        ("Beijing", "China", 40.18, 116.41, 600.0, 24.0, 0.18),
        ("New South Wales", "Australia", -33.87, 151.21, 3_100.0, 68.0, 0.16),
        ("Victoria", "Australia", -37.81, 144.96, 1_700.0, 70.0, 0.14),
        ("", "Iceland", 64.96, -19.02, 1_800.0, 64.0, 0.17),
        ("", "Brazil", -14.24, -51.93, 400_000.0, 115.0, 0.07),
        ("", "Laos", 19.86, 102.50, 19.0, 70.0, 0.2),
    ];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec![
        "Province/State".to_string(),
        "Country/Region".to_string(),
        "Lat".to_string(),
        "Long".to_string(),
    ];
    header.extend((0..days).map(|d| (start + Duration::days(d as i64)).format("%-m/%-d/%y").to_string()));
    writer.write_record(&header)?;

    for &(province, country, lat, long, peak, midpoint, rate) in regions {
        let counts = generate_counts(days, peak, midpoint, rate, &mut rng);
        let mut record = vec![
            province.to_string(),
            country.to_string(),
            lat.to_string(),
            long.to_string(),
        ];
        record.extend(counts.iter().map(|c| c.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} rows ({} days each) to {output_path}",
        regions.len(),
        days
    );
    Ok(())
}
