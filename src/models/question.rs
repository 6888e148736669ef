// src/models/question.rs

use serde::{Deserialize, Serialize};

/// One entry of the read-only question bank.
///
/// The bank is keyed by subject in `public/data/questions.json`; entries are
/// served to the client as-is (scoring happens client-side, the server only
/// receives the final score/total pair).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}
