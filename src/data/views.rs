use super::metrics::{percent, Metrics};
use super::model::{CountryRecord, Generation};

// ---------------------------------------------------------------------------
// Derived views over a filtered set of records
// ---------------------------------------------------------------------------

/// The `min(n, len)` records with the largest `total_cells`, descending.
/// Ties keep their input order.
pub fn top_n<'a>(rows: &[&'a CountryRecord], n: usize) -> Vec<&'a CountryRecord> {
    let mut sorted = rows.to_vec();
    // `sort_by` is stable.
    sorted.sort_by(|a, b| b.total_cells.cmp(&a.total_cells));
    sorted.truncate(n);
    sorted
}

/// All records sorted by 5G (`nr`) count, descending, ties in input order.
pub fn rank_5g<'a>(rows: &[&'a CountryRecord]) -> Vec<&'a CountryRecord> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.nr.cmp(&a.nr));
    sorted
}

/// Records with at least one 5G tower, input order.
pub fn with_5g<'a>(rows: &[&'a CountryRecord]) -> Vec<&'a CountryRecord> {
    rows.iter().copied().filter(|r| r.nr > 0).collect()
}

/// Towers per million inhabitants, rounded half to even.
///
/// `None` when the population is absent, zero, negative or not finite;
/// such rows are left out of density views instead of producing an
/// infinite or NaN value.
pub fn towers_per_million(record: &CountryRecord) -> Option<f64> {
    let population = record.population_millions?;
    if !population.is_finite() || population <= 0.0 {
        return None;
    }
    Some((record.total_cells as f64 / population).round_ties_even())
}

/// One point of the density scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityPoint<'a> {
    pub record: &'a CountryRecord,
    pub population_millions: f64,
    pub towers_per_million: f64,
}

/// Density for every record that has a usable population, input order.
pub fn density<'a>(rows: &[&'a CountryRecord]) -> Vec<DensityPoint<'a>> {
    rows.iter()
        .filter_map(|&record| {
            let towers_per_million = towers_per_million(record)?;
            Some(DensityPoint {
                record,
                population_millions: record.population_millions?,
                towers_per_million,
            })
        })
        .collect()
}

/// The generation with the largest aggregate count together with its share
/// of the total. On ties the earliest generation in 2G, 3G, 4G, 5G order
/// wins.
pub fn dominant_generation(metrics: &Metrics) -> (Generation, f64) {
    let mut best = Generation::G2;
    for generation in Generation::ALL {
        if metrics.count(generation) > metrics.count(best) {
            best = generation;
        }
    }
    (best, metrics.share(best))
}

/// The country with the most towers in the view.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader<'a> {
    pub record: &'a CountryRecord,
    /// Share of the view's `total_cells`, in percent.
    pub share: f64,
}

/// Record with the largest `total_cells`; the first one wins on ties.
/// `None` for an empty view.
pub fn leader<'a>(rows: &[&'a CountryRecord]) -> Option<Leader<'a>> {
    let mut best: Option<&CountryRecord> = None;
    for &r in rows {
        match best {
            Some(b) if r.total_cells <= b.total_cells => {}
            _ => best = Some(r),
        }
    }
    let total: u64 = rows.iter().map(|r| r.total_cells).sum();
    best.map(|record| Leader {
        record,
        share: percent(record.total_cells, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metrics::aggregate;
    use crate::data::model::tests::record;

    fn names(rows: &[&CountryRecord]) -> Vec<String> {
        rows.iter().map(|r| r.country.clone()).collect()
    }

    #[test]
    fn top_three_by_total() {
        let rows = vec![
            record("A", 10, 0, None),
            record("B", 5, 0, None),
            record("C", 20, 0, None),
            record("D", 1, 0, None),
        ];
        let refs: Vec<&CountryRecord> = rows.iter().collect();
        assert_eq!(names(&top_n(&refs, 3)), vec!["C", "A", "B"]);
    }

    #[test]
    fn top_n_larger_than_input_returns_all() {
        let rows = vec![record("A", 1, 0, None), record("B", 1, 0, None)];
        let refs: Vec<&CountryRecord> = rows.iter().collect();
        assert_eq!(names(&top_n(&refs, 5)), vec!["A", "B"]);
        assert!(top_n(&[], 3).is_empty());
    }

    #[test]
    fn rank_5g_is_stable_on_ties() {
        let rows = vec![
            record("idx0", 10, 0, None),
            record("idx1", 10, 5, None),
            record("idx2", 10, 0, None),
            record("idx3", 10, 3, None),
        ];
        let refs: Vec<&CountryRecord> = rows.iter().collect();
        assert_eq!(names(&rank_5g(&refs)), vec!["idx1", "idx3", "idx0", "idx2"]);
        assert_eq!(names(&with_5g(&refs)), vec!["idx1", "idx3"]);
    }

    #[test]
    fn density_rounds_half_to_even() {
        let mut r = record("X", 5, 0, None);
        r.population_millions = Some(2.0);
        assert_eq!(towers_per_million(&r), Some(2.0));
        r.total_cells = 7;
        assert_eq!(towers_per_million(&r), Some(4.0));
        r.total_cells = 100;
        r.population_millions = Some(3.0);
        assert_eq!(towers_per_million(&r), Some(33.0));
    }

    #[test]
    fn zero_population_is_omitted_without_panic() {
        let mut zero = record("Zero", 100, 0, None);
        zero.population_millions = Some(0.0);
        let mut ok = record("Ok", 100, 0, None);
        ok.population_millions = Some(4.0);
        let missing = record("Missing", 100, 0, None);

        assert_eq!(towers_per_million(&zero), None);
        assert_eq!(towers_per_million(&missing), None);

        let rows = [&zero, &ok, &missing];
        let points = density(&rows);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].record.country, "Ok");
        assert_eq!(points[0].towers_per_million, 25.0);
    }

    #[test]
    fn dominant_tie_between_gsm_and_lte_picks_2g() {
        let mut a = record("A", 100, 0, None);
        a.gsm = 50;
        a.lte = 50;
        for _ in 0..10 {
            let (generation, share) = dominant_generation(&aggregate([&a]));
            assert_eq!(generation, Generation::G2);
            assert!((share - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn dominant_of_empty_view_is_2g_with_zero_share() {
        let (generation, share) = dominant_generation(&Metrics::default());
        assert_eq!(generation, Generation::G2);
        assert_eq!(share, 0.0);
    }

    #[test]
    fn leader_is_first_maximum() {
        let rows = vec![
            record("A", 10, 0, None),
            record("B", 30, 0, None),
            record("C", 30, 0, None),
            record("D", 30, 0, None),
        ];
        let refs: Vec<&CountryRecord> = rows.iter().collect();
        let lead = leader(&refs).unwrap();
        assert_eq!(lead.record.country, "B");
        assert!((lead.share - 30.0).abs() < 1e-9);
        assert!(leader(&[]).is_none());
    }
}
