//! Writes `sample_salaries.csv` in the published dataset's column layout so
//! the dashboard can run offline:
//!
//! ```text
//! cargo run --bin generate_sample
//! SALARY_DASHBOARD_SOURCE=sample_salaries.csv cargo run
//! ```

use anyhow::{Context, Result};

use salary_dashboard::data::model::SalaryRecord;

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

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a, T>(&mut self, choices: &'a [(T, f64)]) -> &'a T {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for (item, weight) in choices {
            if target < *weight {
                return item;
            }
            target -= weight;
        }
        &choices[choices.len() - 1].0
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (role, base USD salary)
    let roles = [
        (("Data Scientist", 140_000.0), 5.0),
        (("Data Engineer", 145_000.0), 5.0),
        (("Data Analyst", 100_000.0), 4.0),
        (("Machine Learning Engineer", 185_000.0), 3.0),
        (("Analytics Engineer", 150_000.0), 1.0),
        (("Research Scientist", 190_000.0), 1.0),
        (("Data Architect", 160_000.0), 0.5),
        (("BI Developer", 95_000.0), 0.5),
    ];
    // (level, salary multiplier)
    let seniority = [
        (("junior", 0.6), 2.0),
        (("pleno", 0.85), 3.0),
        (("senior", 1.1), 5.0),
        (("executivo", 1.45), 1.0),
    ];
    let contracts = [("integral", 20.0), ("contrato", 1.0), ("freelancer", 0.5), ("parcial", 0.5)];
    let sizes = [("pequena", 1.0), ("media", 8.0), ("grande", 2.0)];
    let remote = [("presencial", 6.0), ("remoto", 3.5), ("hibrido", 0.5)];
    // (ISO3, cost-of-labour multiplier)
    let countries = [
        (("USA", 1.0), 20.0),
        (("CAN", 0.8), 1.5),
        (("GBR", 0.7), 1.5),
        (("DEU", 0.65), 0.8),
        (("ESP", 0.45), 0.6),
        (("FRA", 0.55), 0.5),
        (("IND", 0.2), 0.6),
        (("BRA", 0.3), 0.4),
        (("AUS", 0.75), 0.3),
        (("NLD", 0.6), 0.3),
    ];

    let mut records = Vec::new();
    for year in 2020..=2025 {
        // Later survey years have more responses.
        let rows = 150 * (year - 2019) as usize;
        let growth = 1.0 + 0.04 * (year - 2020) as f64;
        for _ in 0..rows {
            let &(role, base) = rng.weighted(&roles);
            let &(level, level_factor) = rng.weighted(&seniority);
            let &(country, country_factor) = rng.weighted(&countries);
            let mean = base * level_factor * country_factor * growth;
            let salary = rng.gauss(mean, mean * 0.18).max(5_000.0).round();

            records.push(SalaryRecord {
                year,
                seniority: level.to_string(),
                contract_type: rng.weighted(&contracts).to_string(),
                company_size: rng.weighted(&sizes).to_string(),
                role: role.to_string(),
                remote_mode: rng.weighted(&remote).to_string(),
                salary_usd: salary,
                residence_country_code: country.to_string(),
            });
        }
    }

    let output_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for record in &records {
        writer.serialize(record).context("writing record")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} salary records to {output_path}", records.len());
    Ok(())
}
