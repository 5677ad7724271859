use priority_ring::Priority;
use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert a value at the current priority.
    Insert(u64),
    /// Change the current priority. Without an inline argument the priority is read from the
    /// next line.
    SetPriority(Option<Priority>),
    Retrieve,
    Reset,
    Size,
    Quit,
    /// Unrecognised or empty input; the screen is redrawn.
    Redraw,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("{0:?} is not a number")]
    Invalid(String),
}

/// Parses an unsigned number, accepting a `0x` prefix for hexadecimal.
pub fn parse_number(input: &str) -> Result<u64, ParseNumberError> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| ParseNumberError::Invalid(input.to_owned()))
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(first) = line.chars().next() else {
            return Self::Redraw;
        };

        match first.to_ascii_lowercase() {
            'p' => {
                let argument = line[1..].trim();
                let priority = parse_number(argument)
                    .ok()
                    .and_then(|number| Priority::try_from(number).ok());
                Self::SetPriority(priority)
            }
            'g' => Self::Retrieve,
            'r' => Self::Reset,
            's' => Self::Size,
            'q' => Self::Quit,
            '0'..='9' => parse_number(line).map_or(Self::Redraw, Self::Insert),
            _ => Self::Redraw,
        }
    }
}
