//! Round engine
//!
//! One round draws a secret number and accepts guesses until the player
//! hits it or runs out of attempts. Rejected input never costs an attempt.

use std::io::{BufRead, Write};
use std::time::Instant;

use rand::Rng;

use crate::console::Console;
use crate::consts::{MAX_GUESS, MIN_GUESS};
use crate::difficulty::Difficulty;
use crate::error::Result;

/// Answer to an in-range guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Target is above the guess
    Higher,
    /// Target is below the guess
    Lower,
    Correct,
}

impl Feedback {
    pub fn compare(target: u32, guess: u32) -> Self {
        match target.cmp(&guess) {
            std::cmp::Ordering::Greater => Feedback::Higher,
            std::cmp::Ordering::Less => Feedback::Lower,
            std::cmp::Ordering::Equal => Feedback::Correct,
        }
    }
}

/// Why a line of input was not counted as a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotANumber,
    OutOfRange,
}

/// Result of handing one line of input to a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Rejected(Rejection),
    Answered(Feedback),
}

/// Outcome of a finished round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundResult {
    pub attempts_used: u32,
    /// Seconds to the correct guess, `None` when unsolved
    pub elapsed_secs: Option<f64>,
    pub target: u32,
}

impl RoundResult {
    pub fn solved(&self) -> bool {
        self.elapsed_secs.is_some()
    }
}

/// A round in progress
#[derive(Debug, Clone)]
pub struct Round {
    difficulty: Difficulty,
    target: u32,
    attempts: u32,
    solved: bool,
    started: Instant,
}

impl Round {
    /// Start a round with a target drawn uniformly from the guess range
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self::with_target(difficulty, rng.random_range(MIN_GUESS..=MAX_GUESS))
    }

    pub fn with_target(difficulty: Difficulty, target: u32) -> Self {
        debug_assert!((MIN_GUESS..=MAX_GUESS).contains(&target));
        Self {
            difficulty,
            target,
            attempts: 0,
            solved: false,
            started: Instant::now(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn remaining(&self) -> u32 {
        self.difficulty.max_attempts().saturating_sub(self.attempts)
    }

    /// True once the target was guessed or no attempts remain
    pub fn is_over(&self) -> bool {
        self.solved || self.remaining() == 0
    }

    /// Feed one line of player input into the round
    pub fn submit(&mut self, input: &str) -> Submission {
        let guess: i64 = match input.trim().parse() {
            Ok(g) => g,
            Err(_) => return Submission::Rejected(Rejection::NotANumber),
        };
        if guess < i64::from(MIN_GUESS) || guess > i64::from(MAX_GUESS) {
            return Submission::Rejected(Rejection::OutOfRange);
        }
        // Range check above makes this lossless
        let guess = guess as u32;

        self.attempts += 1;
        let feedback = Feedback::compare(self.target, guess);
        if feedback == Feedback::Correct {
            self.solved = true;
        }
        log::debug!(
            "Guess {} on attempt {}/{}: {:?}",
            guess,
            self.attempts,
            self.difficulty.max_attempts(),
            feedback
        );
        Submission::Answered(feedback)
    }

    /// Close the round, stamping the elapsed time if it was solved
    pub fn finish(&self) -> RoundResult {
        let elapsed_secs = self
            .solved
            .then(|| round_hundredths(self.started.elapsed().as_secs_f64()));
        RoundResult {
            attempts_used: self.attempts,
            elapsed_secs,
            target: self.target,
        }
    }
}

/// Round to two decimal places
fn round_hundredths(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Play a round to completion against the console
pub fn play_round<R: BufRead, W: Write>(
    mut round: Round,
    console: &mut Console<R, W>,
) -> Result<RoundResult> {
    let difficulty = round.difficulty();
    console.say(format_args!(
        "\nGreat! You have selected the {} difficulty level.",
        difficulty.label()
    ))?;
    console.say(format_args!(
        "You have {} chances to guess the correct number.",
        difficulty.max_attempts()
    ))?;

    let guess_prompt = format!("Enter your guess ({MIN_GUESS}-{MAX_GUESS}): ");
    while !round.is_over() {
        console.say(format_args!("\nRemaining attempts: {}", round.remaining()))?;
        let line = console.prompt(&guess_prompt)?;

        match round.submit(&line) {
            Submission::Rejected(Rejection::NotANumber) => {
                log::debug!("Rejected non-numeric guess {:?}", line);
                console.say("Please enter a valid number.")?;
            }
            Submission::Rejected(Rejection::OutOfRange) => {
                log::debug!("Rejected out-of-range guess {:?}", line);
                console.say(format_args!(
                    "Please enter a number between {MIN_GUESS} and {MAX_GUESS}."
                ))?;
            }
            Submission::Answered(Feedback::Higher) => {
                console.say("Incorrect! The number is HIGHER than your guess.")?;
            }
            Submission::Answered(Feedback::Lower) => {
                console.say("Incorrect! The number is LOWER than your guess.")?;
            }
            Submission::Answered(Feedback::Correct) => {}
        }
    }

    let result = round.finish();
    match result.elapsed_secs {
        Some(secs) => {
            console.say(format_args!(
                "\nCongratulations! You guessed the correct number {} in {} attempts!",
                result.target, result.attempts_used
            ))?;
            console.say(format_args!("Time taken: {secs:.2} seconds"))?;
        }
        None => {
            console.say(format_args!("\nGame Over! The number was {}.", result.target))?;
        }
    }
    log::info!(
        "Round finished on {}: {} attempts, solved={}",
        difficulty,
        result.attempts_used,
        result.solved()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::io::Cursor;

    fn play_scripted(round: Round, script: &str) -> (RoundResult, String) {
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
        let result = play_round(round, &mut console).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        (result, out)
    }

    #[test]
    fn test_feedback_direction() {
        assert_eq!(Feedback::compare(50, 25), Feedback::Higher);
        assert_eq!(Feedback::compare(50, 75), Feedback::Lower);
        assert_eq!(Feedback::compare(50, 50), Feedback::Correct);
    }

    #[test]
    fn test_seeded_target_in_range() {
        let mut rng = Pcg32::seed_from_u64(12345);
        for _ in 0..500 {
            let round = Round::new(Difficulty::Easy, &mut rng);
            assert!((MIN_GUESS..=MAX_GUESS).contains(&round.target()));
        }
    }

    #[test]
    fn test_rejections_do_not_consume_attempts() {
        let mut round = Round::with_target(Difficulty::Hard, 40);
        assert_eq!(
            round.submit("abc"),
            Submission::Rejected(Rejection::NotANumber)
        );
        assert_eq!(
            round.submit("4.5"),
            Submission::Rejected(Rejection::NotANumber)
        );
        assert_eq!(round.submit("0"), Submission::Rejected(Rejection::OutOfRange));
        assert_eq!(
            round.submit("101"),
            Submission::Rejected(Rejection::OutOfRange)
        );
        assert_eq!(
            round.submit("-7"),
            Submission::Rejected(Rejection::OutOfRange)
        );
        assert_eq!(round.attempts(), 0);
        assert_eq!(round.remaining(), 3);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut round = Round::with_target(Difficulty::Easy, 50);
        assert_eq!(round.submit("1"), Submission::Answered(Feedback::Higher));
        assert_eq!(round.submit(" 100 "), Submission::Answered(Feedback::Lower));
        assert_eq!(round.attempts(), 2);
    }

    #[test]
    fn test_solved_round_result() {
        let (result, out) = play_scripted(Round::with_target(Difficulty::Medium, 30), "50\n20\n30\n");
        assert_eq!(result.attempts_used, 3);
        assert_eq!(result.target, 30);
        assert!(result.solved());
        assert!(result.elapsed_secs.unwrap() >= 0.0);
        assert!(out.contains("LOWER"));
        assert!(out.contains("HIGHER"));
        assert!(out.contains("correct number 30 in 3 attempts"));
    }

    #[test]
    fn test_unsolved_round_uses_all_attempts() {
        let (result, out) = play_scripted(Round::with_target(Difficulty::Hard, 99), "1\n2\n3\n");
        assert_eq!(result.attempts_used, 3);
        assert_eq!(result.elapsed_secs, None);
        assert!(out.contains("Game Over! The number was 99."));
    }

    #[test]
    fn test_round_stops_reading_after_last_attempt() {
        // Trailing lines stay unread once attempts run out
        let (result, _) = play_scripted(Round::with_target(Difficulty::Hard, 99), "1\n2\n3\n99\n");
        assert!(!result.solved());
    }

    #[test]
    fn test_rejected_input_reprompts_in_play() {
        let (result, out) =
            play_scripted(Round::with_target(Difficulty::Hard, 7), "seven\n0\n7\n");
        assert_eq!(result.attempts_used, 1);
        assert!(out.contains("Please enter a valid number."));
        assert!(out.contains("Please enter a number between 1 and 100."));
    }

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths(1.234), 1.23);
        assert_eq!(round_hundredths(1.235_1), 1.24);
        assert_eq!(round_hundredths(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_feedback_matches_ordering(target in 1u32..=100, guess in 1u32..=100) {
            let feedback = Feedback::compare(target, guess);
            prop_assert_eq!(feedback == Feedback::Higher, target > guess);
            prop_assert_eq!(feedback == Feedback::Lower, target < guess);
            prop_assert_eq!(feedback == Feedback::Correct, target == guess);
        }

        #[test]
        fn prop_attempts_bounded(
            level in 0usize..3,
            target in 1u32..=100,
            guesses in proptest::collection::vec(-20i64..130, 1..40),
        ) {
            let difficulty = Difficulty::ALL[level];
            let mut round = Round::with_target(difficulty, target);
            for g in &guesses {
                if round.is_over() {
                    break;
                }
                let before = round.attempts();
                match round.submit(&g.to_string()) {
                    Submission::Rejected(_) => prop_assert_eq!(round.attempts(), before),
                    Submission::Answered(_) => prop_assert_eq!(round.attempts(), before + 1),
                }
            }
            let result = round.finish();
            prop_assert!(result.attempts_used <= difficulty.max_attempts());
            if round.is_over() {
                prop_assert!(result.attempts_used >= 1);
                if !result.solved() {
                    prop_assert_eq!(result.attempts_used, difficulty.max_attempts());
                }
            }
        }
    }
}
