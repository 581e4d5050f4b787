use crate::config::QuizConfig;
use crate::error::{QuizError, Result};
use crate::grading::Grader;
use crate::traits::{CardGenerator, Flashcard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/*
Implements the practice flow;
    Start
        Generate a set of cards, clear answers.

    Practice
        Show current card
        Record answer
        Move to next / previous card, wrapping around.

    Submit
        Grade every card, show the results.
        Either go back to the cards, or start another set.
*/

/// Outcome for a single card after submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub index: usize,
    pub expr: String,
    pub given: Option<String>,
    pub expected: String,
    pub correct: bool,
}

impl std::fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.correct { "✓" } else { "✗" };
        write!(
            f,
            "Q{}: {}  Your answer: {} {}  Correct answer: {}",
            self.index + 1,
            self.expr,
            self.given.as_deref().unwrap_or("(none)"),
            mark,
            self.expected
        )
    }
}

/// The graded set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.correct).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score: {}/{}", self.correct_count(), self.total())
    }
}

/// Holds one active set of flashcards and the answers given so far.
#[derive(Debug)]
pub struct Session {
    generator: Box<dyn CardGenerator>,
    grader: Grader,
    rng: StdRng,
    batch_size: usize,

    flashcards: Vec<Flashcard>,
    current: usize,
    answers: BTreeMap<usize, String>,
    show_results: bool,
}

impl Session {
    /// Create a session, no cards exist until `start` is called.
    pub fn new(
        generator: Box<dyn CardGenerator>,
        grader: Grader,
        rng: StdRng,
        batch_size: usize,
    ) -> Self {
        Session {
            generator,
            grader,
            rng,
            batch_size,
            flashcards: vec![],
            current: 0,
            answers: Default::default(),
            show_results: false,
        }
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session::new(
            config.deck.make_generator(),
            config.grader(),
            rng,
            config.batch_size,
        )
    }

    /// Replace the active set with a freshly generated one.
    pub fn start(&mut self) {
        let flashcards = (0..self.batch_size)
            .map(|_| self.generator.generate(&mut self.rng))
            .collect::<Vec<Flashcard>>();
        self.load(flashcards);
    }

    /// Try another set.
    pub fn retry(&mut self) {
        self.start();
    }

    /// Replace the active set with the provided cards.
    pub fn load(&mut self, flashcards: Vec<Flashcard>) {
        log::info!("starting a set of {} cards", flashcards.len());
        self.flashcards = flashcards;
        self.current = 0;
        self.answers.clear();
        self.show_results = false;
    }

    pub fn is_started(&self) -> bool {
        !self.flashcards.is_empty()
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.flashcards.get(self.current)
    }

    pub fn showing_results(&self) -> bool {
        self.show_results
    }

    pub fn next(&mut self) {
        if self.is_started() {
            self.current = (self.current + 1) % self.flashcards.len();
        }
    }

    pub fn previous(&mut self) {
        if self.is_started() {
            let len = self.flashcards.len();
            self.current = (self.current + len - 1) % len;
        }
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(|s| s.as_str())
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answer(self.current)
    }

    /// Record the answer for the card at this index, replacing an earlier one.
    pub fn set_answer(&mut self, index: usize, text: &str) -> Result<()> {
        if index >= self.flashcards.len() {
            return Err(QuizError::IndexOutOfRange {
                index,
                len: self.flashcards.len(),
            });
        }
        self.answers.insert(index, text.to_owned());
        Ok(())
    }

    pub fn answer_current(&mut self, text: &str) -> Result<()> {
        self.set_answer(self.current, text)
    }

    /// Grade all cards and switch to the results view.
    pub fn submit(&mut self) -> Report {
        let mut report = Report::default();
        for (index, card) in self.flashcards.iter().enumerate() {
            let given = self.answers.get(&index).cloned();
            let correct = self.grader.grade(
                card,
                given.as_deref().unwrap_or(""),
                &mut self.rng,
            );
            report.entries.push(ReportEntry {
                index,
                expr: card.expr().to_owned(),
                given,
                expected: card.answer().to_owned(),
                correct,
            });
        }
        if self.is_started() {
            self.show_results = true;
        }
        log::info!("submitted set: {report}");
        report
    }

    /// Leave the results view, answers are kept.
    pub fn back_to_cards(&mut self) {
        self.show_results = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{LinearProblem, PowersGenerator};
    use crate::traits::CardKind;

    fn session() -> Session {
        Session::new(
            Box::new(PowersGenerator),
            Grader::default(),
            StdRng::seed_from_u64(20),
            10,
        )
    }

    #[test]
    fn test_empty_session() {
        let mut s = session();
        assert!(!s.is_started());
        assert!(s.current_card().is_none());
        s.next();
        s.previous();
        assert_eq!(s.current_index(), 0);
        assert!(s.answer_current("1").is_err());
        let report = s.submit();
        assert_eq!(report.total(), 0);
        assert!(!s.showing_results());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut s = session();
        s.start();
        assert_eq!(s.flashcards().len(), 10);
        s.previous();
        assert_eq!(s.current_index(), 9);
        s.next();
        assert_eq!(s.current_index(), 0);
        for _ in 0..13 {
            s.next();
        }
        assert_eq!(s.current_index(), 3);
    }

    #[test]
    fn test_answers_stay_in_range() {
        let mut s = session();
        s.start();
        s.next();
        s.answer_current("x").expect("in range");
        assert_eq!(s.answer(1), Some("x"));
        assert_eq!(s.current_answer(), Some("x"));
        s.set_answer(1, "y").expect("in range");
        assert_eq!(s.answer(1), Some("y"));
        assert!(matches!(
            s.set_answer(10, "z"),
            Err(QuizError::IndexOutOfRange { index: 10, len: 10 })
        ));
        assert_eq!(s.answer(10), None);
    }

    #[test]
    fn test_submit_and_retry() {
        let mut s = session();
        s.start();
        let answers = s
            .flashcards()
            .iter()
            .map(|c| c.answer().to_owned())
            .collect::<Vec<String>>();
        for (i, a) in answers.iter().enumerate().take(7) {
            s.set_answer(i, a).expect("in range");
        }
        s.set_answer(7, "nonsense").expect("in range");

        let report = s.submit();
        assert!(s.showing_results());
        assert_eq!(report.correct_count(), 7);
        assert_eq!(report.total(), 10);
        assert_eq!(report.to_string(), "Score: 7/10");
        assert_eq!(report.entries[7].given.as_deref(), Some("nonsense"));
        assert!(!report.entries[7].correct);
        assert_eq!(report.entries[8].given, None);
        assert!(report.entries[8].to_string().contains("(none) ✗"));

        s.back_to_cards();
        assert!(!s.showing_results());
        assert_eq!(s.answer(0), Some(answers[0].as_str()));

        s.next();
        s.retry();
        assert!(!s.showing_results());
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.answer(0), None);
        assert_eq!(s.flashcards().len(), 10);
    }

    #[test]
    fn test_load_cards() {
        let mut s = session();
        s.load(vec![LinearProblem::new(4, -2, 3).to_flashcard()]);
        assert_eq!(s.current_card().map(|c| c.kind()), Some(CardKind::Linear));
        s.answer_current("4x - 5").expect("in range");
        let report = s.submit();
        assert_eq!(report.correct_count(), 1);
        assert_eq!(
            report.entries[0].to_string(),
            "Q1: 4(x - 2) + 3  Your answer: 4x - 5 ✓  Correct answer: 4x - 5"
        );
    }

    #[test]
    fn test_from_config() {
        let config = QuizConfig {
            seed: Some(3),
            batch_size: 4,
            ..Default::default()
        };
        let mut a = Session::from_config(&config);
        let mut b = Session::from_config(&config);
        a.start();
        b.start();
        assert_eq!(a.flashcards().len(), 4);
        assert_eq!(a.flashcards(), b.flashcards());
    }
}
