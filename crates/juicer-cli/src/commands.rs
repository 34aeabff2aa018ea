//! Console command parsing.
//!
//! Parsing is a pure function from an input line to a [`Command`], so
//! the read-eval loop stays free of string handling and the grammar is
//! unit-testable without a terminal.

use std::str::FromStr;

use juicer_types::{FruitSize, FruitType, RipenessLevel, ValidationError};
use rust_decimal::Decimal;

/// One operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the machine.
    Start,
    /// Stop the machine.
    Stop,
    /// Feed one fruit through the pipeline.
    Feed(FeedArgs),
    /// Print the full status snapshot.
    Status,
    /// Print the lifetime production counters.
    Metrics,
    /// Run a cleaning cycle.
    Clean,
    /// Reset the machine to idle after a fault.
    Reset,
    /// Force the press into its error state.
    FaultPress,
    /// Print the command reference.
    Help,
    /// Leave the console.
    Quit,
}

/// Arguments of the `feed` command. Omitted positions fall back to a
/// medium ripe orange with a randomly drawn weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedArgs {
    /// Kind of citrus.
    pub fruit_type: FruitType,
    /// Size class.
    pub size: FruitSize,
    /// Ripeness level.
    pub ripeness: RipenessLevel,
    /// Weight in grams; drawn from the size's range when omitted.
    pub weight_grams: Option<Decimal>,
}

/// A line that could not be read as a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line contained no command word.
    #[error("empty command")]
    Empty,

    /// The command word is not in the grammar.
    #[error("unknown command '{0}', type 'help' for the command list")]
    UnknownCommand(String),

    /// A feed argument named an unknown fruit type, size, or ripeness.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The feed weight was not a number.
    #[error("invalid weight '{0}', expected grams as a number")]
    InvalidWeight(String),
}

impl Command {
    /// Parse one input line. Command words are case-insensitive;
    /// surplus arguments are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let lowered = line.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let Some(word) = words.next() else {
            return Err(ParseError::Empty);
        };
        match word {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "feed" => parse_feed(words),
            "status" => Ok(Self::Status),
            "metrics" => Ok(Self::Metrics),
            "clean" => Ok(Self::Clean),
            "reset" => Ok(Self::Reset),
            "fault-press" => Ok(Self::FaultPress),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_feed<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<Command, ParseError> {
    let fruit_type = words
        .next()
        .map(FruitType::from_str)
        .transpose()?
        .unwrap_or_default();
    let size = words
        .next()
        .map(FruitSize::from_str)
        .transpose()?
        .unwrap_or(FruitSize::Medium);
    let ripeness = words
        .next()
        .map(RipenessLevel::from_str)
        .transpose()?
        .unwrap_or(RipenessLevel::Ripe);
    let weight_grams = match words.next() {
        None => None,
        Some(raw) => match Decimal::from_str(raw) {
            Ok(weight) => Some(weight),
            Err(_) => return Err(ParseError::InvalidWeight(raw.to_string())),
        },
    };

    Ok(Command::Feed(FeedArgs {
        fruit_type,
        size,
        ripeness,
        weight_grams,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bare_words_parse() {
        assert_eq!(Command::parse("start").unwrap(), Command::Start);
        assert_eq!(Command::parse("  STOP  ").unwrap(), Command::Stop);
        assert_eq!(Command::parse("fault-press").unwrap(), Command::FaultPress);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn feed_with_all_arguments() {
        let command = Command::parse("feed lemon large overripe 200").unwrap();
        assert_eq!(
            command,
            Command::Feed(FeedArgs {
                fruit_type: FruitType::Lemon,
                size: FruitSize::Large,
                ripeness: RipenessLevel::Overripe,
                weight_grams: Some(dec!(200)),
            })
        );
    }

    #[test]
    fn feed_defaults_to_a_medium_ripe_orange() {
        let command = Command::parse("feed").unwrap();
        assert_eq!(
            command,
            Command::Feed(FeedArgs {
                fruit_type: FruitType::Orange,
                size: FruitSize::Medium,
                ripeness: RipenessLevel::Ripe,
                weight_grams: None,
            })
        );
    }

    #[test]
    fn feed_rejects_unknown_fruit_type() {
        let err = Command::parse("feed banana").unwrap_err();
        assert!(matches!(err, ParseError::Validation(_)));
    }

    #[test]
    fn feed_rejects_non_numeric_weight() {
        let err = Command::parse("feed orange medium ripe heavy").unwrap_err();
        assert_eq!(err, ParseError::InvalidWeight(String::from("heavy")));
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert_eq!(
            Command::parse("juggle"),
            Err(ParseError::UnknownCommand(String::from("juggle")))
        );
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
    }
}
