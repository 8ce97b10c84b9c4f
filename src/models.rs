use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parses the label used by the GraphQL API. Other labels (e.g. "All") yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == label)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{difficulty, count}` row as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    #[serde(default)]
    pub count: Option<u64>,
}

fn count_for(entries: &[DifficultyCount], difficulty: Difficulty) -> u64 {
    entries
        .iter()
        .find(|entry| Difficulty::from_label(&entry.difficulty) == Some(difficulty))
        .and_then(|entry| entry.count)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionStats {
    #[serde(rename = "acSubmissionNum")]
    pub accepted: Vec<DifficultyCount>,
    #[serde(rename = "totalSubmissionNum")]
    pub total: Vec<DifficultyCount>,
}

impl SubmissionStats {
    pub fn solved_for(&self, difficulty: Difficulty) -> u64 {
        count_for(&self.accepted, difficulty)
    }

    pub fn total_for(&self, difficulty: Difficulty) -> u64 {
        count_for(&self.total, difficulty)
    }

    pub fn progress(&self) -> [ProgressEntry; 3] {
        Difficulty::ALL.map(|difficulty| ProgressEntry {
            difficulty,
            solved: self.solved_for(difficulty),
            total: self.total_for(difficulty),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEntry {
    pub difficulty: Difficulty,
    pub solved: u64,
    pub total: u64,
}

impl ProgressEntry {
    /// `solved / total` clamped to `[0, 1]`, or `None` when there is nothing to divide by.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some((self.solved as f64 / self.total as f64).clamp(0.0, 1.0))
    }

    /// Fill width for the progress indicator. An undefined ratio renders as 0%.
    pub fn percent(&self) -> f64 {
        self.ratio().map_or(0.0, |ratio| ratio * 100.0)
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.solved, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProgress {
    pub username: String,
    pub entries: [ProgressEntry; 3],
    pub question_totals: BTreeMap<Difficulty, u64>,
}

impl UserProgress {
    pub fn entry(&self, difficulty: Difficulty) -> &ProgressEntry {
        // entries are built from Difficulty::ALL, so the index always matches
        &self.entries[difficulty as usize]
    }
}

// --- GraphQL wire format ---

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: ProgressData,
}

#[derive(Debug, Deserialize)]
pub struct ProgressData {
    #[serde(rename = "allQuestionsCount", default)]
    pub all_questions_count: Vec<DifficultyCount>,
    #[serde(rename = "matchedUser", default)]
    pub matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
pub struct MatchedUser {
    #[serde(rename = "submitStats")]
    pub submit_stats: SubmissionStats,
}

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'static str,
    pub variables: UsernameVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct UsernameVariables<'a> {
    pub username: &'a str,
}

// --- JSON API ---

#[derive(Debug, Serialize)]
pub struct ProgressPoint {
    pub difficulty: Difficulty,
    pub solved: u64,
    pub total: u64,
    pub ratio: Option<f64>,
    pub percent: f64,
    pub label: String,
}

impl From<&ProgressEntry> for ProgressPoint {
    fn from(entry: &ProgressEntry) -> Self {
        Self {
            difficulty: entry.difficulty,
            solved: entry.solved,
            total: entry.total,
            ratio: entry.ratio(),
            percent: entry.percent(),
            label: entry.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub username: String,
    pub fetched_at: String,
    pub progress: Vec<ProgressPoint>,
    pub question_totals: BTreeMap<Difficulty, u64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub username: Option<String>,
}
