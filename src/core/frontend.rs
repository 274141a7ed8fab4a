//! Regex extraction of `.do` path literals from markup and script files.
//!
//! Extraction and counting are two explicit passes: scanning a file
//! collects the distinct path literals (first-appearance order) while
//! tallying raw occurrences, and [`FrontendScan::finish`] annotates each
//! collected record with its true per-file count afterwards.

use std::collections::HashMap;

use regex::Regex;

use super::records::FrontendPathRecord;
use crate::error::Result;

/// Path literal shape: a boundary character, a slash, non-quote
/// non-whitespace characters, the `.do` suffix, a closing boundary
const PATH_PATTERN: &str = r#"(["'\s])(/[^"'\s]+\.do)(["'\s])"#;

pub struct FrontendScan {
    pattern: Regex,
    records: Vec<FrontendPathRecord>,
    tallies: HashMap<(String, String), usize>,
}

impl FrontendScan {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(PATH_PATTERN)?,
            records: Vec::new(),
            tallies: HashMap::new(),
        })
    }

    /// Extract the distinct path literals from one file's text. Duplicate
    /// literals within the file collapse to one record; raw occurrences are
    /// tallied for the counting pass. Path text keeps its original casing.
    pub fn scan_file(&mut self, relative_path: &str, text: &str) {
        let mut seen_in_file: Vec<String> = Vec::new();
        for caps in self.pattern.captures_iter(text) {
            let path = caps[2].trim().to_string();
            if path.is_empty() {
                continue;
            }
            *self
                .tallies
                .entry((relative_path.to_string(), path.clone()))
                .or_insert(0) += 1;
            if !seen_in_file.contains(&path) {
                seen_in_file.push(path);
            }
        }

        for path in seen_in_file {
            self.records.push(FrontendPathRecord {
                relative_path: relative_path.to_string(),
                path,
                count: 0,
            });
        }
    }

    /// Counting pass: annotate every collected record with the occurrence
    /// total for its (file, path) key.
    pub fn finish(self) -> Vec<FrontendPathRecord> {
        let FrontendScan {
            mut records,
            tallies,
            ..
        } = self;
        for record in &mut records {
            let key = (record.relative_path.clone(), record.path.clone());
            record.count = tallies.get(&key).copied().unwrap_or(1);
        }
        records
    }
}
