use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::libtuvung::session::Question;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire format of the vocabulary service: a JSON array of these records.
#[derive(Deserialize, Debug)]
struct VocabularyJson {
    vocabulary: String,
    translate: String,
    #[serde(default)]
    synonyms: Vec<String>,
    language: Option<String>,
}

impl From<VocabularyJson> for Question {
    fn from(record: VocabularyJson) -> Question {
        Question {
            term: record.vocabulary,
            translation: record.translate,
            synonyms: record.synonyms,
            voice_hint: record.language.unwrap_or_else(|| String::from("en")),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the question list, degrading to an empty list on any network or
/// parse failure. The caller still constructs a session either way; an
/// empty round is the front end's problem to present, not a crash.
pub fn fetch_questions(endpoint: &str) -> Vec<Question> {
    match try_fetch(endpoint) {
        Ok(questions) => {
            debug!("[Fetch] Got {} questions from {}", questions.len(), endpoint);
            questions
        }
        Err(err) => {
            warn!("[Fetch] Could not load questions from {}: {}", endpoint, err);
            Vec::new()
        }
    }
}

/// Restart-time refresh: ask the service again, but keep the previous list
/// when the new fetch comes back empty so a flaky network cannot strand the
/// player on the "no questions" screen.
pub fn refresh_questions(endpoint: &str, previous: Vec<Question>) -> Vec<Question> {
    let fresh = fetch_questions(endpoint);
    if fresh.is_empty() && !previous.is_empty() {
        debug!(
            "[Fetch] Refresh came back empty, keeping {} previous questions.",
            previous.len()
        );
        previous
    } else {
        fresh
    }
}

fn try_fetch(endpoint: &str) -> Result<Vec<Question>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;
    let body = client.get(endpoint).send()?.error_for_status()?.text()?;
    parse_questions(&body)
}

fn parse_questions(body: &str) -> Result<Vec<Question>, FetchError> {
    let records: Vec<VocabularyJson> = serde_json::from_str(body)?;
    Ok(records.into_iter().map(Question::from).collect())
}
