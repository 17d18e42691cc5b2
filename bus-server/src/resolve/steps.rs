//! Navigation step parsing.
//!
//! The suggestion model formats multi-leg directions as numbered steps
//! ("Step 1: …", "Step 2: …"). This module splits that narrative into
//! discrete steps and classifies each one by the boarding/transfer/arrival
//! keywords the prompt contract fixes. Classification is a keyword
//! heuristic, not NLP: paraphrased model output may classify as `Generic`,
//! which is cosmetic. Parsing never fails on any input.

use std::sync::LazyLock;

use regex::Regex;

/// Delimiter the model is instructed to emit before each step.
static STEP_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Step\s+\d+:").expect("step delimiter pattern is valid"));

/// Semantic classification of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Boarding a bus
    Board,
    /// Changing buses
    Transfer,
    /// Reaching the destination
    Arrival,
    /// Anything the keyword table doesn't recognize
    Generic,
}

impl StepKind {
    /// Lowercase name for serialization and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Board => "board",
            StepKind::Transfer => "transfer",
            StepKind::Arrival => "arrival",
            StepKind::Generic => "generic",
        }
    }
}

/// One discrete navigation instruction.
///
/// Steps are derived, never stored: they are recomputed from the
/// suggestion's details on each render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStep {
    /// The `"Step N:"` label, absent for unlabeled leading text.
    pub label: Option<String>,
    /// Instruction text following the label.
    pub text: String,
    /// Keyword-derived classification.
    pub kind: StepKind,
}

/// Keyword table mapping step text to a [`StepKind`].
///
/// Rules are checked in order; the first keyword contained in the text
/// wins. Keywords are case-sensitive on the exact wording the prompt
/// requests ("Take", "Transfer", "Arrive"), so the table can evolve with
/// the prompt without touching the splitting logic.
#[derive(Debug, Clone)]
pub struct StepClassifier {
    rules: Vec<(String, StepKind)>,
}

impl Default for StepClassifier {
    fn default() -> Self {
        Self::new(vec![
            ("Transfer".into(), StepKind::Transfer),
            ("Take".into(), StepKind::Board),
            ("board".into(), StepKind::Board),
            ("Arrive".into(), StepKind::Arrival),
            ("disembark".into(), StepKind::Arrival),
        ])
    }
}

impl StepClassifier {
    /// Build a classifier from an ordered keyword table.
    pub fn new(rules: Vec<(String, StepKind)>) -> Self {
        Self { rules }
    }

    /// Classify a step's text; `Generic` when no keyword matches.
    pub fn classify(&self, text: &str) -> StepKind {
        self.rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, kind)| *kind)
            .unwrap_or(StepKind::Generic)
    }
}

/// Parse a details narrative into ordered navigation steps.
///
/// Splits on `Step <N>:` delimiters, pairing each delimiter with the text
/// that follows it up to the next delimiter. Text preceding the first
/// delimiter (or an entire narrative with no delimiters) becomes a single
/// generic step with no label. Empty input yields no steps.
pub fn parse_steps(details: &str) -> Vec<NavigationStep> {
    parse_steps_with(details, &StepClassifier::default())
}

/// [`parse_steps`] with a caller-supplied classifier.
pub fn parse_steps_with(details: &str, classifier: &StepClassifier) -> Vec<NavigationStep> {
    let mut steps = Vec::new();

    let delimiters: Vec<_> = STEP_DELIMITER.find_iter(details).collect();

    if delimiters.is_empty() {
        let text = details.trim();
        if !text.is_empty() {
            steps.push(NavigationStep {
                label: None,
                text: text.to_string(),
                kind: StepKind::Generic,
            });
        }
        return steps;
    }

    let leading = details[..delimiters[0].start()].trim();
    if !leading.is_empty() {
        steps.push(NavigationStep {
            label: None,
            text: leading.to_string(),
            kind: StepKind::Generic,
        });
    }

    for (i, delimiter) in delimiters.iter().enumerate() {
        let end = delimiters
            .get(i + 1)
            .map(|next| next.start())
            .unwrap_or(details.len());
        let text = details[delimiter.end()..end].trim();

        steps.push(NavigationStep {
            label: Some(delimiter.as_str().to_string()),
            text: text.to_string(),
            kind: classifier.classify(text),
        });
    }

    steps
}
