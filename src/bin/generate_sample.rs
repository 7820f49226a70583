use anyhow::{Context, Result};

const BIOMES: [&str; 8] = [
    "Coral reefs",
    "Coastal systems",
    "Inland wetlands",
    "Tropical forests",
    "Temperate forests",
    "Grasslands",
    "Rivers and lakes",
    "Cultivated areas",
];

const SERVICES: [&str; 14] = [
    "Food",
    "Water",
    "Pollination",
    "Raw materials",
    "Genetic resources",
    "Medicinal resources",
    "Air quality regulation",
    "Waste treatment",
    "Climate regulation",
    "Moderation of extreme events",
    "Erosion prevention",
    "Opportunities for recreation and tourism",
    "Aesthetic information",
    "Maintenance of life cycles",
];

const CURRENCIES: [&str; 6] = [
    "US Dollar",
    "Euro",
    "British Pound",
    "Indian Rupee",
    "Kenyan Shilling",
    "Brazilian Real",
];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic row: biome, service, currency, value, value type, unit, area.
fn valuation_row(rng: &mut SimpleRng) -> [String; 7] {
    let biome = rng.pick(&BIOMES).to_string();
    let service = rng.pick(&SERVICES).to_string();
    let mut currency = rng.pick(&CURRENCIES).to_string();
    let mut value = format!("{:.2}", rng.gauss(6.0, 1.5).exp());
    let mut value_type = rng.pick(&["Annual", "Annual", "Annualized NPV", "Annual (Range)"]).to_string();
    let (mut unit, mut area) = if rng.next_f64() < 0.6 {
        ("USD/ha/yr".to_string(), String::new())
    } else {
        ("USD/yr".to_string(), format!("{:.1}", rng.next_f64() * 5000.0 + 1.0))
    };

    // Roughly one row in four exercises a cleaning rule.
    match (rng.next_f64() * 24.0) as u32 {
        0 => value_type = "One-time".to_string(),
        1 => unit = "USD/person/yr".to_string(),
        2 => unit = "USD/household/yr".to_string(),
        3 => currency = "Martian Credit".to_string(),
        4 => value = "n/a".to_string(),
        5 => {
            unit = "USD/yr".to_string();
            area = String::new();
        }
        _ => {}
    }

    [biome, service, currency, value, value_type, unit, area]
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_valuations.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // Same layout as the database export: two metadata lines, header,
    // one description line, then data.
    writer.write_record(["Ecosystem Services Valuation Database (synthetic sample)"])?;
    writer.write_record(["Generated by generate_sample", "seed 42"])?;
    writer.write_record(["Biome", "ESService", "Currency", "Value", "ValueType", "Unit", "ServiceArea"])?;
    writer.write_record([
        "Broad ecosystem type",
        "TEEB service",
        "Currency of the estimate",
        "Monetary value",
        "Annual / one-time",
        "Value basis",
        "Area in hectares",
    ])?;

    let rows = 400;
    for _ in 0..rows {
        writer.write_record(valuation_row(&mut rng))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} valuations to {output_path}");
    Ok(())
}
