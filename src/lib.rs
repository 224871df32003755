use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Scores derived from one verbal fluency transcript.
///
/// Every field is always within its declared bounds: `memory_score` in
/// `[0, 10]`, `brain_health_score` in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Distinct vocabulary animals mentioned at least once.
    pub animal_count: usize,
    /// Total excess mentions: for each matched animal, occurrences minus one.
    pub repetitions: usize,
    pub memory_score: i32,
    pub brain_health_score: i32,
}

// ---------------------------------------------------------------------------
// Scoring policy
// ---------------------------------------------------------------------------

struct ScoringPolicy {
    memory_score_max: i32,
    memory_weight: i32,
    repetition_penalty: i32,
    score_min: i32,
    score_max: i32,
    band_good_min: i32,
    band_moderate_min: i32,
}

static POLICY: ScoringPolicy = ScoringPolicy {
    memory_score_max: 10,
    memory_weight: 10,
    repetition_penalty: 5,
    score_min: 0,
    score_max: 100,
    band_good_min: 70,
    band_moderate_min: 40,
};

// ---------------------------------------------------------------------------
// Category vocabulary
// ---------------------------------------------------------------------------

static ANIMALS: &[&str] = &[
    "cat",
    "dog",
    "bird",
    "fish",
    "elephant",
    "lion",
    "tiger",
    "bear",
    "wolf",
    "deer",
    "rabbit",
    "squirrel",
    "mouse",
    "rat",
    "hamster",
    "pig",
    "horse",
    "cow",
    "sheep",
    "goat",
    "chicken",
    "duck",
    "goose",
    "turkey",
    "monkey",
    "gorilla",
    "giraffe",
    "zebra",
    "hippo",
    "rhino",
    "camel",
    "kangaroo",
    "koala",
    "panda",
    "fox",
    "otter",
    "seal",
    "whale",
    "dolphin",
    "shark",
    "octopus",
    "crab",
    "frog",
    "toad",
    "snake",
    "lizard",
    "turtle",
    "eagle",
    "hawk",
    "owl",
    "penguin",
    "bat",
    "moose",
];

/// Fixed set of canonical category members tokens are matched against.
///
/// Entries are normalized the same way transcript tokens are, so matching is
/// exact equality on normalized forms. No fuzzy matching or stemming.
#[derive(Debug, Clone)]
pub struct CategoryVocabulary {
    entries: HashSet<String>,
}

impl CategoryVocabulary {
    /// The built-in animal vocabulary for the classic fluency task.
    pub fn animals() -> Self {
        Self::from_entries(ANIMALS.iter().copied())
    }

    /// Build a vocabulary from arbitrary entries. Entries that normalize to
    /// the empty string are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|e| normalize_token(e.as_ref()))
            .collect();
        Self { entries }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        Self::animals()
    }
}

// ---------------------------------------------------------------------------
// Tokenization helpers
// ---------------------------------------------------------------------------

static TOKEN_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w]+|[^\w]+$").unwrap());

fn normalize_token(raw: &str) -> Option<String> {
    let stripped = TOKEN_STRIP_RE.replace_all(raw, "").to_lowercase();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

fn token_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for raw in text.split_whitespace() {
        if let Some(token) = normalize_token(raw) {
            *counts.entry(token).or_insert(0usize) += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

fn band_for_score(score: i32) -> &'static str {
    if score >= POLICY.band_good_min {
        "good"
    } else if score >= POLICY.band_moderate_min {
        "moderate"
    } else {
        "low"
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Placeholder transcript an integration layer may substitute when
/// transcription fails. The analyzer treats it like any other input.
pub const FALLBACK_TRANSCRIPT: &str = "cat dog bird fish elephant lion tiger bear \
    wolf deer rabbit squirrel mouse rat hamster guinea pig";

/// Stateless scorer for verbal fluency transcripts.
///
/// Holds only the immutable category vocabulary, so a single instance can be
/// shared across threads and calls without locking.
#[derive(Debug, Clone, Default)]
pub struct SpeechAnalyzer {
    vocabulary: CategoryVocabulary,
}

impl SpeechAnalyzer {
    /// Analyzer over the built-in animal vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(vocabulary: CategoryVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &CategoryVocabulary {
        &self.vocabulary
    }

    /// Score a transcript.
    ///
    /// Total over all string inputs: empty, whitespace-only, or
    /// non-linguistic text yields zero counts and floor scores rather than
    /// an error.
    pub fn analyze_speech(&self, text: &str) -> AnalysisResult {
        let counts = token_counts(text);

        let mut animal_count = 0usize;
        let mut repetitions = 0usize;
        for (token, occurrences) in &counts {
            if self.vocabulary.contains(token) {
                animal_count += 1;
                repetitions += occurrences - 1;
            }
        }

        let memory_score = animal_count.min(POLICY.memory_score_max as usize) as i32;
        // i64 keeps the penalty term from wrapping on adversarially long input
        let raw = i64::from(memory_score) * i64::from(POLICY.memory_weight)
            - repetitions as i64 * i64::from(POLICY.repetition_penalty);
        let brain_health_score =
            raw.clamp(i64::from(POLICY.score_min), i64::from(POLICY.score_max)) as i32;

        AnalysisResult {
            animal_count,
            repetitions,
            memory_score,
            brain_health_score,
        }
    }

    /// Render a human-readable report for a previously produced result.
    ///
    /// Pure formatting: identical results produce identical text. The report
    /// restates the scoring formula so the numbers can be verified by hand.
    pub fn generate_report(&self, result: &AnalysisResult) -> String {
        let band = band_for_score(result.brain_health_score);
        let mut report = String::new();
        let _ = writeln!(report, "Verbal Fluency Screening Report");
        let _ = writeln!(report, "-------------------------------");
        let _ = writeln!(report, "Distinct animals named: {}", result.animal_count);
        let _ = writeln!(report, "Repeated mentions:      {}", result.repetitions);
        let _ = writeln!(
            report,
            "Memory score:           {} / {}",
            result.memory_score, POLICY.memory_score_max
        );
        let _ = writeln!(
            report,
            "Brain health score:     {} / {} ({band})",
            result.brain_health_score, POLICY.score_max
        );
        let _ = writeln!(report);
        let _ = writeln!(
            report,
            "Scoring: memory score is one point per distinct animal, capped at {}.",
            POLICY.memory_score_max
        );
        let _ = writeln!(
            report,
            "Brain health score is memory score x {} minus {} per repeated mention,",
            POLICY.memory_weight, POLICY.repetition_penalty
        );
        let _ = writeln!(
            report,
            "clamped to {}-{}. Bands: {}-{} low, {}-{} moderate, {}-{} good.",
            POLICY.score_min,
            POLICY.score_max,
            POLICY.score_min,
            POLICY.band_moderate_min - 1,
            POLICY.band_moderate_min,
            POLICY.band_good_min - 1,
            POLICY.band_good_min,
            POLICY.score_max
        );
        report
    }
}

/// Analyze with the built-in animal vocabulary.
pub fn analyze(text: &str) -> AnalysisResult {
    static DEFAULT_ANALYZER: Lazy<SpeechAnalyzer> = Lazy::new(SpeechAnalyzer::new);
    DEFAULT_ANALYZER.analyze_speech(text)
}
