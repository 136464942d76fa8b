use gridsnake::Direction;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A single line of a replay script
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Start,
    Restart,
    Pause,
    Resume,
    Turn(Direction),
    /// Advance the clock by the given time in one go
    Advance(Duration),
    /// Advance the clock by the given time, sliced into 60 Hz frames
    Frames(Duration),
    Snapshot,
}

impl Command {
    /// Parse one line of a script.  Blank lines and lines starting with `#`
    /// yield `None`.
    pub(crate) fn from_line(line: &str) -> Result<Option<Command>, ParseCommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse::<Command>().map(Some)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Command, ParseCommandError> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(ParseCommandError::Extra(extra.to_owned()));
        }
        let cmd = match (name.to_ascii_lowercase().as_str(), arg) {
            ("start", None) => Command::Start,
            ("restart", None) => Command::Restart,
            ("pause", None) => Command::Pause,
            ("resume", None) => Command::Resume,
            ("snapshot", None) => Command::Snapshot,
            ("turn", Some(dir)) => Command::Turn(dir.parse()?),
            ("advance", Some(ms)) => Command::Advance(parse_millis(ms)?),
            ("frames", Some(ms)) => Command::Frames(parse_millis(ms)?),
            ("turn" | "advance" | "frames", None) => {
                return Err(ParseCommandError::MissingArgument(name.to_owned()))
            }
            ("start" | "restart" | "pause" | "resume" | "snapshot", Some(arg)) => {
                return Err(ParseCommandError::Extra(arg.to_owned()))
            }
            (other, None) => match other.parse::<Direction>() {
                Ok(dir) => Command::Turn(dir),
                Err(_) => return Err(ParseCommandError::Unknown(name.to_owned())),
            },
            (_, Some(_)) => return Err(ParseCommandError::Unknown(name.to_owned())),
        };
        Ok(cmd)
    }
}

/// Parse a non-negative number of milliseconds, which may have a fractional
/// part
fn parse_millis(s: &str) -> Result<Duration, ParseCommandError> {
    let ms = s
        .parse::<f64>()
        .map_err(|_| ParseCommandError::Millis(s.to_owned()))?;
    Duration::try_from_secs_f64(ms / 1000.0).map_err(|_| ParseCommandError::Millis(s.to_owned()))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("command {0:?} requires an argument")]
    MissingArgument(String),
    #[error("unexpected extra argument {0:?}")]
    Extra(String),
    #[error("invalid number of milliseconds: {0:?}")]
    Millis(String),
    #[error(transparent)]
    Direction(#[from] gridsnake::game::ParseDirectionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("start", Command::Start)]
    #[case("  RESTART ", Command::Restart)]
    #[case("pause", Command::Pause)]
    #[case("resume", Command::Resume)]
    #[case("snapshot", Command::Snapshot)]
    #[case("up", Command::Turn(Direction::Up))]
    #[case("Left", Command::Turn(Direction::Left))]
    #[case("turn down", Command::Turn(Direction::Down))]
    #[case("advance 190", Command::Advance(Duration::from_millis(190)))]
    #[case("advance 0.5", Command::Advance(Duration::from_micros(500)))]
    #[case("frames 1000", Command::Frames(Duration::from_secs(1)))]
    fn test_parse(#[case] line: &str, #[case] cmd: Command) {
        assert_eq!(Command::from_line(line), Ok(Some(cmd)));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# a comment")]
    fn test_skip(#[case] line: &str) {
        assert_eq!(Command::from_line(line), Ok(None));
    }

    #[rstest]
    #[case("jump", ParseCommandError::Unknown(String::from("jump")))]
    #[case("jump 3", ParseCommandError::Unknown(String::from("jump")))]
    #[case("advance", ParseCommandError::MissingArgument(String::from("advance")))]
    #[case("advance -5", ParseCommandError::Millis(String::from("-5")))]
    #[case("advance soon", ParseCommandError::Millis(String::from("soon")))]
    #[case("start now", ParseCommandError::Extra(String::from("now")))]
    #[case("advance 1 2", ParseCommandError::Extra(String::from("2")))]
    fn test_parse_error(#[case] line: &str, #[case] err: ParseCommandError) {
        assert_eq!(Command::from_line(line), Err(err));
    }

    #[test]
    fn test_parse_bad_direction() {
        assert!(matches!(
            Command::from_line("turn sideways"),
            Err(ParseCommandError::Direction(_))
        ));
    }
}
