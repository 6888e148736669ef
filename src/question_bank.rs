// src/question_bank.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;

use crate::models::question::Question;

/// Read-only, in-memory question bank, keyed by subject.
///
/// Loaded once at startup from the JSON file under the static asset
/// directory; the service never writes to it.
#[derive(Debug, Default)]
pub struct QuestionBank {
    subjects: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = fs::read_to_string(path)?;
        let subjects: BTreeMap<String, Vec<Question>> = serde_json::from_str(&data)?;
        Ok(Self { subjects })
    }

    #[cfg(test)]
    fn from_subjects(subjects: BTreeMap<String, Vec<Question>>) -> Self {
        Self { subjects }
    }

    pub fn subjects(&self) -> Vec<&str> {
        self.subjects.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A uniform random sample of up to `count` questions for a subject,
    /// or `None` if the subject is not in the bank. Fisher-Yates shuffle
    /// (via `rand`), then a fixed-size slice.
    pub fn sample(&self, subject: &str, count: usize) -> Option<Vec<Question>> {
        let questions = self.subjects.get(subject)?;
        let mut sampled = questions.clone();
        sampled.shuffle(&mut rand::thread_rng());
        sampled.truncate(count);
        Some(sampled)
    }
}
