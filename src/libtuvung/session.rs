use log::debug;
use rand::rng;
use rand::seq::SliceRandom;

use crate::libtuvung::matching::{normalize_for_matching, similarity_ratio, SYNONYM_THRESHOLD};

/// A single vocabulary entry, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Question {
    pub term: String,
    pub translation: String,
    pub synonyms: Vec<String>,
    pub voice_hint: String,
}

/// Verdict for one submitted answer. `expected` keeps the display casing
/// of the translation for the feedback line.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub correct: bool,
    pub expected: String,
}

/// One round of the quiz: a fixed, shuffled question list plus progress
/// counters. Replaced wholesale on restart.
#[derive(Debug)]
pub struct Session {
    questions: Vec<Question>,
    position: usize,
    correct: usize,
}

impl Session {
    /// Shuffles `source` and keeps the first `min(count, source.len())`
    /// entries. An empty source yields a session that is already finished;
    /// front ends render that as an explicit "no questions" state.
    pub fn create(source: &[Question], count: usize) -> Session {
        let mut questions = source.to_vec();
        questions.shuffle(&mut rng());
        questions.truncate(count);
        debug!(
            "[Setup] Session with {} of {} requested questions.",
            questions.len(),
            count
        );
        Session {
            questions,
            position: 0,
            correct: 0,
        }
    }

    /// The question currently being asked, `None` once the round is over.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    /// Scores `raw` against the current question and advances. Exact match
    /// on the normalized translation wins outright; otherwise the best
    /// similarity over the synonym list decides, inclusive at the
    /// threshold. Returns `None` without touching any state when the round
    /// is already finished.
    pub fn submit_answer(&mut self, raw: &str) -> Option<MatchResult> {
        let question = self.questions.get(self.position)?;

        let answer = normalize_for_matching(raw);
        let correct = answer == normalize_for_matching(&question.translation)
            || question
                .synonyms
                .iter()
                .map(|synonym| similarity_ratio(&answer, &normalize_for_matching(synonym)))
                .fold(0.0_f64, f64::max)
                >= SYNONYM_THRESHOLD;

        let expected = question.translation.clone();
        if correct {
            self.correct += 1;
        }
        self.position += 1;
        debug!(
            "[Session] {} -> {} ({}/{})",
            raw,
            if correct { "correct" } else { "incorrect" },
            self.correct,
            self.position
        );

        Some(MatchResult { correct, expected })
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.questions.len()
    }

    /// `(correct, denominator)`: questions answered so far while the round
    /// runs, the full round length once finished. The two coincide at the
    /// terminal position.
    pub fn score(&self) -> (usize, usize) {
        (self.correct, self.position)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(term: &str, translation: &str, synonyms: &[&str]) -> Question {
        Question {
            term: term.into(),
            translation: translation.into(),
            synonyms: synonyms.iter().map(|s| (*s).into()).collect(),
            voice_hint: "en".into(),
        }
    }

    fn single(question: Question) -> Session {
        Session::create(&[question], 1)
    }

    #[test]
    fn create_shuffles_and_truncates() {
        let source: Vec<Question> = (0..10)
            .map(|i| question(&format!("t{i}"), &format!("x{i}"), &[]))
            .collect();
        let session = Session::create(&source, 4);
        assert_eq!(session.len(), 4);
        let session = Session::create(&source, 25);
        assert_eq!(session.len(), 10);
    }

    #[test]
    fn empty_source_is_immediately_finished() {
        let session = Session::create(&[], 20);
        assert!(session.is_empty());
        assert!(session.is_finished());
        assert!(session.current_question().is_none());
        assert_eq!(session.score(), (0, 0));
    }

    #[test]
    fn exact_match_ignores_case_and_diacritics() {
        let mut session = single(question("Hanoi", "ha noi", &[]));
        let result = session.submit_answer("Hà Nội").unwrap();
        assert!(result.correct);
        assert_eq!(result.expected, "ha noi");
        assert_eq!(session.score(), (1, 1));
    }

    #[test]
    fn synonym_typo_within_threshold_is_correct() {
        let mut session = single(question("vui", "happy", &["glad", "joyful"]));
        assert!(session.submit_answer("galad").unwrap().correct);
    }

    #[test]
    fn synonym_miss_is_incorrect() {
        let mut session = single(question("vui", "happy", &["glad", "joyful"]));
        let result = session.submit_answer("sad").unwrap();
        assert!(!result.correct);
        assert_eq!(result.expected, "happy");
        assert_eq!(session.score(), (0, 1));
    }

    #[test]
    fn no_synonyms_means_exact_only() {
        let mut session = single(question("vui", "happy", &[]));
        assert!(!session.submit_answer("happz").unwrap().correct);
    }

    #[test]
    fn empty_answer_is_an_ordinary_incorrect_answer() {
        let mut session = single(question("vui", "happy", &["glad"]));
        let result = session.submit_answer("").unwrap();
        assert!(!result.correct);
        assert!(session.is_finished());
    }

    #[test]
    fn progression_reaches_terminal_state() {
        let source: Vec<Question> = (0..5)
            .map(|i| question(&format!("t{i}"), &format!("x{i}"), &[]))
            .collect();
        let mut session = Session::create(&source, 5);
        for i in 0..5 {
            assert!(!session.is_finished());
            assert_eq!(session.position(), i);
            assert!(session.submit_answer("wrong").is_some());
        }
        assert!(session.is_finished());
        assert_eq!(session.score(), (0, 5));
        assert!(session.submit_answer("late").is_none());
        assert_eq!(session.score(), (0, 5));
    }

    #[test]
    fn restart_yields_a_fresh_session() {
        let source: Vec<Question> = (0..6)
            .map(|i| question(&format!("t{i}"), &format!("x{i}"), &[]))
            .collect();
        let mut session = Session::create(&source, 3);
        while !session.is_finished() {
            session.submit_answer("x0");
        }
        let fresh = Session::create(&source, 3);
        assert_eq!(fresh.position(), 0);
        assert_eq!(fresh.score(), (0, 0));
        assert_eq!(fresh.len(), 3);
    }
}
