use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::export::json;
use crate::posting::FlatRecord;

/// Skill counts as two index-aligned columns, highest count first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub tech: Vec<String>,
    pub freq: Vec<u64>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.tech.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tech.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.tech
            .iter()
            .map(String::as_str)
            .zip(self.freq.iter().copied())
    }

    /// Total number of skill tokens counted.
    pub fn total(&self) -> u64 {
        self.freq.iter().sum()
    }
}

/// Count skill tokens across records, ranked by count descending.
/// Equal counts keep the order in which the skill first appeared.
pub fn count_skills(records: &[FlatRecord]) -> FrequencyTable {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();

    for token in records.iter().flat_map(|r| r.skills()) {
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let (tech, freq) = counts
        .into_iter()
        .map(|(token, count)| (token.to_string(), count))
        .unzip();
    FrequencyTable { tech, freq }
}

/// Count skills from a records file written by an earlier fetch.
///
/// A missing or unreadable file is an expected condition here: it is logged
/// and an empty table comes back instead of an error.
pub fn count_from_file(path: &Path) -> FrequencyTable {
    match json::read_records(path) {
        Ok(records) => {
            info!("Loaded {} records from {:?}", records.len(), path);
            count_skills(&records)
        }
        Err(e) => {
            warn!("Skipping skill count: {}", e);
            FrequencyTable::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(skill: &str) -> FlatRecord {
        FlatRecord {
            skill: skill.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn ranks_by_count() {
        let table = count_skills(&[rec("Python, Go"), rec("Go"), rec("")]);
        assert_eq!(table.tech, vec!["Go", "Python"]);
        assert_eq!(table.freq, vec![2, 1]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = count_skills(&[]);
        assert!(table.tech.is_empty());
        assert!(table.freq.is_empty());
    }

    #[test]
    fn blank_skills_contribute_nothing() {
        let table = count_skills(&[rec(""), rec(""), rec("")]);
        assert_eq!(table, FrequencyTable::default());
    }

    #[test]
    fn sum_matches_token_count_and_order_is_descending() {
        let records = vec![
            rec("Java, Spring, MySQL"),
            rec("Java, Spring Boot, AWS"),
            rec("React, TypeScript"),
            rec("Java, React"),
            rec(""),
            rec("AWS"),
        ];
        let tokens: usize = records.iter().map(|r| r.skills().count()).sum();
        let table = count_skills(&records);

        assert_eq!(table.total(), tokens as u64);
        assert_eq!(table.tech.len(), table.freq.len());
        assert!(table.freq.windows(2).all(|w| w[0] >= w[1]));
        assert!(table.freq.iter().all(|&f| f >= 1));
        assert!(table.tech.iter().all(|t| !t.is_empty()));
        assert_eq!(table.iter().next(), Some(("Java", 3)));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let table = count_skills(&[rec("Rust, Go, C"), rec("C, Go, Rust")]);
        assert_eq!(table.tech, vec!["Rust", "Go", "C"]);
        assert_eq!(table.freq, vec![2, 2, 2]);
    }

    #[test]
    fn stray_separators_do_not_create_empty_tokens() {
        let table = count_skills(&[rec(", Go, "), rec("Go")]);
        assert_eq!(table.tech, vec!["Go"]);
        assert_eq!(table.freq, vec![2]);
    }

    #[test]
    fn missing_file_gives_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = count_from_file(&dir.path().join("absent.json"));
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_file_gives_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"skill\": \"Go\"").unwrap();
        assert!(count_from_file(&path).is_empty());
    }

    #[test]
    fn reloaded_records_count_the_same_as_fresh_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tech_info.json");
        let records = vec![rec("Python, Go"), rec("Go"), rec(""), rec("파이썬, Go")];
        json::write_json(&path, &records).unwrap();

        assert_eq!(count_from_file(&path), count_skills(&records));
    }

    #[test]
    fn serializes_as_parallel_columns() {
        let table = count_skills(&[rec("Go, Rust"), rec("Go")]);
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "tech": ["Go", "Rust"], "freq": [2, 1] })
        );
    }
}
