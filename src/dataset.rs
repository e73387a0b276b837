use std::path::Path;

use anyhow::Context;

use crate::error::BoardError;
use crate::models::CompletionRecord;

// (problem_id, title, difficulty, completed_date, person)
const SEED: &[(&str, &str, &str, &str, &str)] = &[
    // 2024-W01
    ("1", "Two Sum", "Easy", "2024-01-01", "Alice"),
    ("2", "Add Two Numbers", "Medium", "2024-01-02", "Alice"),
    ("3", "Longest Substring", "Medium", "2024-01-03", "Alice"),
    ("4", "Median Arrays", "Hard", "2024-01-04", "Alice"),
    ("5", "Palindrome", "Easy", "2024-01-05", "Alice"),
    ("6", "ZigZag Conversion", "Medium", "2024-01-06", "Alice"),
    ("7", "Reverse Integer", "Easy", "2024-01-01", "Bob"),
    ("8", "String to Integer", "Medium", "2024-01-03", "Bob"),
    ("9", "Palindrome Number", "Easy", "2024-01-05", "Bob"),
    ("10", "Regular Expression", "Hard", "2024-01-02", "Charlie"),
    ("11", "Container Water", "Medium", "2024-01-04", "Charlie"),
    ("12", "Integer to Roman", "Medium", "2024-01-06", "Charlie"),
    ("13", "Roman to Integer", "Easy", "2024-01-07", "Charlie"),
    ("14", "Longest Common Prefix", "Easy", "2024-01-01", "Diana"),
    ("15", "3Sum", "Medium", "2024-01-03", "Diana"),
    // 2024-W02
    ("16", "3Sum Closest", "Medium", "2024-01-08", "Alice"),
    ("17", "Letter Combinations", "Medium", "2024-01-09", "Alice"),
    ("18", "4Sum", "Medium", "2024-01-10", "Alice"),
    ("19", "Remove Nth Node", "Medium", "2024-01-11", "Alice"),
    ("20", "Valid Parentheses", "Easy", "2024-01-12", "Alice"),
    ("21", "Merge Two Lists", "Easy", "2024-01-08", "Bob"),
    ("22", "Generate Parentheses", "Medium", "2024-01-10", "Bob"),
    ("23", "Merge k Lists", "Hard", "2024-01-12", "Bob"),
    ("24", "Swap Nodes", "Medium", "2024-01-14", "Bob"),
    ("25", "Reverse Nodes", "Hard", "2024-01-09", "Charlie"),
    ("26", "Remove Duplicates", "Easy", "2024-01-11", "Charlie"),
    ("27", "Remove Element", "Easy", "2024-01-13", "Charlie"),
    ("28", "Find Index", "Easy", "2024-01-08", "Diana"),
    ("29", "Divide Integers", "Medium", "2024-01-10", "Diana"),
    ("30", "Substring Concat", "Hard", "2024-01-12", "Diana"),
    ("31", "Next Permutation", "Medium", "2024-01-14", "Diana"),
    ("32", "Longest Valid", "Hard", "2024-01-09", "Eve"),
    ("33", "Search Rotated", "Medium", "2024-01-11", "Eve"),
];

/// Built-in two-week sample used when no CSV is supplied.
pub fn seed_records() -> Result<Vec<CompletionRecord>, BoardError> {
    SEED.iter()
        .map(|(id, title, difficulty, date, person)| {
            CompletionRecord::from_raw(id, title, difficulty, date, person)
        })
        .collect()
}

/// Reads completion records from a CSV file with the header
/// `problem_id,title,difficulty,completed_date,person`.
///
/// Surrounding whitespace is stripped from every field except `person`,
/// which is kept verbatim since names are matched exactly.
pub fn import_csv(csv_path: &Path) -> anyhow::Result<Vec<CompletionRecord>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        problem_id: String,
        title: String,
        difficulty: String,
        completed_date: String,
        person: String,
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = result.with_context(|| format!("malformed CSV row at line {line}"))?;
        let record = CompletionRecord::from_raw(
            row.problem_id.trim(),
            row.title.trim(),
            row.difficulty.trim(),
            row.completed_date.trim(),
            &row.person,
        )
        .with_context(|| format!("invalid record at line {line}"))?;
        records.push(record);
    }

    Ok(records)
}
