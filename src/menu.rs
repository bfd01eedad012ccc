//! Interactive menu loop
//!
//! Ties the round engine to the score store. Each pass through the loop is
//! one menu interaction; an error in a pass is reported to the player and
//! the loop moves on.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::console::Console;
use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::round::{Round, play_round};
use crate::scores::ScoreStore;

/// Top-level menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    ViewScores,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::NewGame),
            "2" => Some(MenuChoice::ViewScores),
            "3" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// What the loop does after a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run menu passes until the player quits or input closes
pub fn run<R, W, G>(
    console: &mut Console<R, W>,
    store: &mut ScoreStore,
    rng: &mut G,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    loop {
        match step(console, store, rng) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(e) if e.ends_session() => {
                log::info!("Input closed, ending session");
                return Ok(());
            }
            Err(e) => {
                log::error!("Menu iteration failed: {}", e);
                console.say(format_args!("An error occurred: {e}"))?;
            }
        }
    }
}

/// One pass: show the menu and handle the choice
pub fn step<R, W, G>(
    console: &mut Console<R, W>,
    store: &mut ScoreStore,
    rng: &mut G,
) -> Result<Flow>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let rule = "=".repeat(40);
    console.say(format_args!("\n{rule}"))?;
    console.say("Welcome to the Number Guessing Game!")?;
    console.say(&rule)?;
    console.say("\nMenu:")?;
    console.say("1. Start New Game")?;
    console.say("2. View High Scores")?;
    console.say("3. Quit")?;

    let choice = console.prompt("Enter your choice (1-3): ")?;
    match MenuChoice::parse(&choice) {
        Some(MenuChoice::NewGame) => play_game(console, store, rng),
        Some(MenuChoice::ViewScores) => {
            let summary = store.display()?;
            console.say(format_args!("\n{summary}"))?;
            console.prompt("\nPress Enter to continue...")?;
            Ok(Flow::Continue)
        }
        Some(MenuChoice::Quit) => {
            console.say("Thanks for playing! Goodbye!")?;
            Ok(Flow::Quit)
        }
        None => {
            log::debug!("Invalid menu choice {:?}", choice);
            console.say("Invalid choice. Please try again.")?;
            Ok(Flow::Continue)
        }
    }
}

/// Pick a difficulty, play a round, record it, ask to go again
fn play_game<R, W, G>(
    console: &mut Console<R, W>,
    store: &mut ScoreStore,
    rng: &mut G,
) -> Result<Flow>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let difficulty = select_difficulty(console)?;
    let result = play_round(Round::new(difficulty, rng), console)?;

    if store.update(difficulty, result.attempts_used, result.elapsed_secs)? {
        console.say(format_args!("\nNew high score for {difficulty} difficulty!"))?;
    }

    let again = console.prompt("\nDo you want to play again? (yes/no): ")?;
    if again.trim().eq_ignore_ascii_case("yes") {
        Ok(Flow::Continue)
    } else {
        Ok(Flow::Quit)
    }
}

/// Prompt until the player picks a listed difficulty
pub fn select_difficulty<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Difficulty> {
    console.say("\nSelect Difficulty Level:")?;
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        console.say(format_args!(
            "{}. {} ({} chances)",
            i + 1,
            difficulty.label(),
            difficulty.max_attempts()
        ))?;
    }

    loop {
        let line = console.prompt("Enter your choice (1-3): ")?;
        let Ok(number) = line.trim().parse::<i64>() else {
            // Level names work too
            if let Some(difficulty) = Difficulty::from_str(&line) {
                return Ok(difficulty);
            }
            console.say("Please enter a valid number.")?;
            continue;
        };
        match u32::try_from(number).ok().and_then(Difficulty::from_menu_choice) {
            Some(difficulty) => return Ok(difficulty),
            None => console.say("Invalid choice. Please enter 1, 2, or 3.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<String>, Vec<u8>> {
        Console::new(Cursor::new(script.to_string()), Vec::new())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::NewGame));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::ViewScores));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("4"), None);
        assert_eq!(MenuChoice::parse("quit"), None);
    }

    #[test]
    fn test_select_difficulty_reprompts() {
        let mut c = console("x\n0\n-2\n4\n2\n");
        assert_eq!(select_difficulty(&mut c).unwrap(), Difficulty::Medium);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Please enter a valid number.").count(), 1);
        assert_eq!(out.matches("Invalid choice. Please enter 1, 2, or 3.").count(), 3);
        assert!(out.contains("1. Easy (10 chances)"));
        assert!(out.contains("3. Hard (3 chances)"));
    }

    #[test]
    fn test_select_difficulty_by_name() {
        let mut c = console("Hard\n");
        assert_eq!(select_difficulty(&mut c).unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_select_difficulty_input_closed() {
        let mut c = console("9\n");
        assert!(select_difficulty(&mut c).unwrap_err().ends_session());
    }
}
