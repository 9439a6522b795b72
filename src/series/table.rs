//! Immutable snapshot of parsed series records

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::series::parser::SeriesRecord;

/// Codename-keyed view over one parse of the metadata source.
///
/// A table is never mutated after construction; refreshes build a new one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeriesTable {
    records: HashMap<String, SeriesRecord>,
}

impl SeriesTable {
    /// Build a table from records. When a codename repeats, the later record wins.
    pub fn from_records(records: Vec<SeriesRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.codename.clone(), record))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, codename: &str) -> Option<&SeriesRecord> {
        self.records.get(codename)
    }

    pub fn version(&self, codename: &str) -> Option<&str> {
        self.get(codename).map(|record| record.version.as_str())
    }

    pub fn contains(&self, codename: &str) -> bool {
        self.records.contains_key(codename)
    }

    /// Find the codename released as `version`.
    ///
    /// If several rows share a version, the alphabetically first codename is returned.
    pub fn series_for_version(&self, version: &str) -> Option<&str> {
        self.records
            .values()
            .filter(|record| record.version == version)
            .map(|record| record.codename.as_str())
            .min()
    }

    pub fn codenames(&self) -> BTreeSet<String> {
        self.records.keys().cloned().collect()
    }

    /// Highest-versioned LTS series already released on `today`.
    pub fn latest_lts(&self, today: NaiveDate) -> Option<&SeriesRecord> {
        self.records
            .values()
            .filter(|record| record.lts)
            .filter(|record| record.release.is_some_and(|release| release <= today))
            .max_by(|a, b| version_key(&a.version).cmp(&version_key(&b.version)))
    }
}

/// Numeric sort key for dotted versions; non-numeric components sort as zero.
pub fn version_key(version: &str) -> Vec<u32> {
    version
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(version: &str, codename: &str, lts: bool, release: &str) -> SeriesRecord {
        SeriesRecord {
            version: version.to_string(),
            name: String::new(),
            codename: codename.to_string(),
            lts,
            created: None,
            release: NaiveDate::parse_from_str(release, "%Y-%m-%d").ok(),
            eol: None,
            eol_server: None,
        }
    }

    fn sample_table() -> SeriesTable {
        SeriesTable::from_records(vec![
            record("8.04", "hardy", true, "2008-04-24"),
            record("10.04", "lucid", true, "2010-04-29"),
            record("12.04", "precise", true, "2012-04-26"),
            record("12.10", "quantal", false, "2012-10-18"),
            record("14.04", "trusty", true, "2014-04-17"),
            record("94.04", "ornery", true, "2094-04-17"),
        ])
    }

    #[test]
    fn from_records_keeps_later_duplicate() {
        let table = SeriesTable::from_records(vec![
            record("12.04", "precise", true, "2012-04-26"),
            record("12.05", "precise", false, "2012-04-26"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.version("precise"), Some("12.05"));
    }

    #[test]
    fn codenames_returns_every_key_once() {
        let table = sample_table();

        let expected: BTreeSet<String> = ["hardy", "lucid", "ornery", "precise", "quantal", "trusty"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(table.codenames(), expected);
    }

    #[rstest]
    #[case("12.04", Some("precise"))]
    #[case("12.10", Some("quantal"))]
    #[case("99.99", None)]
    fn series_for_version_returns_matching_codename(
        #[case] version: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(sample_table().series_for_version(version), expected);
    }

    #[rstest]
    #[case("2013-01-01", Some("precise"))]
    #[case("2014-04-17", Some("trusty"))]
    #[case("2020-01-01", Some("trusty"))]
    #[case("2007-01-01", None)]
    fn latest_lts_skips_unreleased_series(#[case] today: &str, #[case] expected: Option<&str>) {
        let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
        let table = sample_table();

        let latest = table.latest_lts(today).map(|r| r.codename.as_str());

        assert_eq!(latest, expected);
    }

    #[test]
    fn latest_lts_compares_versions_numerically() {
        let table = SeriesTable::from_records(vec![
            record("9.04", "nine", true, "2009-04-01"),
            record("10.04", "ten", true, "2010-04-01"),
        ]);
        let today = NaiveDate::parse_from_str("2011-01-01", "%Y-%m-%d").unwrap();

        assert_eq!(table.latest_lts(today).map(|r| r.codename.as_str()), Some("ten"));
    }

    #[rstest]
    #[case("12.04", "12.10", std::cmp::Ordering::Less)]
    #[case("9.10", "12.04", std::cmp::Ordering::Less)]
    #[case("14.04", "14.04", std::cmp::Ordering::Equal)]
    #[case("94.04", "14.04", std::cmp::Ordering::Greater)]
    fn version_key_orders_numerically(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: std::cmp::Ordering,
    ) {
        assert_eq!(version_key(a).cmp(&version_key(b)), expected);
    }

    #[test]
    fn default_table_is_empty() {
        let table = SeriesTable::default();
        assert!(table.is_empty());
        assert!(!table.contains("precise"));
    }
}
