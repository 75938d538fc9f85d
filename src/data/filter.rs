use std::collections::BTreeSet;

use super::model::{CountryRecord, Dataset};

// ---------------------------------------------------------------------------
// Filter predicate: selected regions and countries
// ---------------------------------------------------------------------------

/// Region / country selection driving the filtered view.
///
/// An empty set imposes no constraint on its column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub regions: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl FilterState {
    /// Selection with every region and every country of `dataset` checked.
    pub fn all_selected(dataset: &Dataset) -> Self {
        FilterState {
            regions: dataset.regions.iter().cloned().collect(),
            countries: dataset.countries().into_iter().collect(),
        }
    }
}

/// Whether a single record passes `regions` and `countries`.
pub fn matches(
    record: &CountryRecord,
    regions: &BTreeSet<String>,
    countries: &BTreeSet<String>,
) -> bool {
    if !regions.is_empty() {
        match &record.region {
            Some(region) if regions.contains(region) => {}
            _ => return false,
        }
    }
    countries.is_empty() || countries.contains(&record.country)
}

/// Return the indices of `records` passing both set-membership predicates,
/// in input order.
pub fn filter(
    records: &[CountryRecord],
    regions: &BTreeSet<String>,
    countries: &BTreeSet<String>,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, regions, countries))
        .map(|(i, _)| i)
        .collect()
}

/// [`filter`] applied to a dataset with a [`FilterState`].
///
/// Selecting every region of the dataset is the same as selecting none, so
/// rows without a region are kept.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    if dataset.covers_all_regions(&filters.regions) {
        filter(&dataset.records, &BTreeSet::new(), &filters.countries)
    } else {
        filter(&dataset.records, &filters.regions, &filters.countries)
    }
}

/// Resolve indices back to records.
pub fn select<'a>(records: &'a [CountryRecord], indices: &[usize]) -> Vec<&'a CountryRecord> {
    indices.iter().filter_map(|&i| records.get(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn rows() -> Vec<CountryRecord> {
        vec![
            record("Chile", 30, 0, Some("South America")),
            record("Cuba", 10, 0, Some("Caribbean")),
            record("Peru", 20, 0, Some("South America")),
            record("Mexico", 40, 5, Some("North America")),
            record("Atlantis", 1, 0, None),
        ]
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_constraints_returns_everything_in_order() {
        let rows = rows();
        assert_eq!(filter(&rows, &set(&[]), &set(&[])), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn region_filter_preserves_relative_order() {
        let rows = rows();
        let idx = filter(&rows, &set(&["South America"]), &set(&[]));
        let names: Vec<&str> = select(&rows, &idx).iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Chile", "Peru"]);
    }

    #[test]
    fn region_filter_drops_rows_without_region() {
        let rows = rows();
        let idx = filter(&rows, &set(&["Caribbean", "North America"]), &set(&[]));
        assert_eq!(idx, vec![1, 3]);
    }

    #[test]
    fn both_predicates_combine_with_and() {
        let rows = rows();
        let idx = filter(&rows, &set(&["South America"]), &set(&["Peru", "Cuba"]));
        assert_eq!(idx, vec![2]);
    }

    #[test]
    fn country_filter_alone() {
        let rows = rows();
        let idx = filter(&rows, &set(&[]), &set(&["Atlantis", "Mexico"]));
        assert_eq!(idx, vec![3, 4]);
    }

    #[test]
    fn all_selected_keeps_rows_without_region() {
        let ds = Dataset::from_records(rows()).unwrap();
        let state = FilterState::all_selected(&ds);
        assert_eq!(state.regions.len(), 3);
        assert_eq!(filtered_indices(&ds, &state), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn partial_region_selection_drops_rows_without_region() {
        let ds = Dataset::from_records(rows()).unwrap();
        let mut state = FilterState::all_selected(&ds);
        state.regions.remove("Caribbean");
        assert_eq!(filtered_indices(&ds, &state), vec![0, 2, 3]);
    }
}
