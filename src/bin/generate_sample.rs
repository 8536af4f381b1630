use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// (locality, latitude, longitude, median price in AUD)
const LOCALITIES: [(&str, f64, f64, f64); 8] = [
    ("Pakenham", -38.071, 145.487, 480_000.0),
    ("Berwick", -38.033, 145.350, 640_000.0),
    ("Mornington", -38.218, 145.038, 780_000.0),
    ("Frankston", -38.144, 145.125, 560_000.0),
    ("Richmond", -37.819, 144.998, 1_050_000.0),
    ("Brunswick", -37.766, 144.961, 920_000.0),
    ("Werribee", -37.900, 144.663, 450_000.0),
    ("Box Hill", -37.819, 145.122, 990_000.0),
];

const AGENCIES: [&str; 6] = [
    "Barry Plant",
    "Ray White",
    "Harcourts",
    "Jellis Craig",
    "Nelson Alexander",
    "Hocking Stuart",
];

/// (property type, price multiplier relative to a house)
const PROPERTY_TYPES: [(&str, f64); 3] = [("house", 1.0), ("unit", 0.62), ("townhouse", 0.81)];

const STREETS: [&str; 10] = [
    "Main St", "High St", "Station Rd", "Church St", "Park Ave", "Victoria Rd",
    "Albert St", "King St", "Queen St", "Bay Rd",
];

const ROWS: usize = 2_000;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let first_day = NaiveDate::from_ymd_opt(2010, 1, 1).context("invalid start date")?;
    let days = 365 * 9;

    let output_path = "mel_estate.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "Agency",
        "Locality",
        "PropertyType",
        "DateSold",
        "Price",
        "StreetAddress",
        "Latitude",
        "Longitude",
    ])?;

    for _ in 0..ROWS {
        let &(locality, lat, lon, median) = rng.pick(&LOCALITIES);
        let &(kind, multiplier) = rng.pick(&PROPERTY_TYPES);
        let agency = *rng.pick(&AGENCIES);

        let offset = rng.below(days);
        let date = first_day + Duration::days(offset as i64);
        // Prices drift up ~5% a year and spread log-normally around the median.
        let growth = 1.05f64.powf(offset as f64 / 365.0);
        let price = (median * multiplier * growth * rng.gauss(0.0, 0.25).exp() / 1000.0).round() * 1000.0;

        let address = format!("{} {}", 1 + rng.below(250), rng.pick(&STREETS));
        let lat = lat + rng.gauss(0.0, 0.008);
        let lon = lon + rng.gauss(0.0, 0.008);

        writer.write_record([
            agency.to_string(),
            locality.to_string(),
            kind.to_string(),
            date.format("%Y-%m-%d").to_string(),
            format!("{price:.0}"),
            address,
            format!("{lat:.6}"),
            format!("{lon:.6}"),
        ])?;
    }
    writer.flush().context("writing output file")?;

    println!("Wrote {ROWS} sales to {output_path}");
    Ok(())
}
