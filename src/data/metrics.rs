use super::model::{CountryRecord, Generation};

// ---------------------------------------------------------------------------
// Aggregate metrics over a set of records
// ---------------------------------------------------------------------------

/// Column sums and derived percentages over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Sum of `total_cells`.
    pub total: u64,
    pub g2: u64,
    pub g3: u64,
    pub g4: u64,
    pub g5: u64,
    /// `g4 / total * 100`, 0 when `total` is 0.
    pub pct_4g: f64,
    /// `g5 / total * 100`, 0 when `total` is 0.
    pub pct_5g: f64,
}

/// Sum tower counts over `rows`. An empty input yields all zeros.
pub fn aggregate<'a, I>(rows: I) -> Metrics
where
    I: IntoIterator<Item = &'a CountryRecord>,
{
    let mut m = Metrics::default();
    for r in rows {
        m.total += r.total_cells;
        m.g2 += r.gsm;
        m.g3 += r.umts;
        m.g4 += r.lte;
        m.g5 += r.nr;
    }
    m.pct_4g = percent(m.g4, m.total);
    m.pct_5g = percent(m.g5, m.total);
    m
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl Metrics {
    /// Aggregate count for one generation.
    pub fn count(&self, generation: Generation) -> u64 {
        match generation {
            Generation::G2 => self.g2,
            Generation::G3 => self.g3,
            Generation::G4 => self.g4,
            Generation::G5 => self.g5,
        }
    }

    /// Percentage of `total` held by `generation`.
    pub fn share(&self, generation: Generation) -> f64 {
        percent(self.count(generation), self.total)
    }

    /// `g2 + g3 + g4 + g5`, independent of the `total_cells` column.
    pub fn generation_total(&self) -> u64 {
        self.g2 + self.g3 + self.g4 + self.g5
    }
}
