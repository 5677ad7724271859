//! Interactive exerciser for [`priority_ring`]: reads commands line by line, applies them to a
//! reference-sized buffer and redraws its state after each one.

use std::io::{self, BufRead, Write};

use anyhow::ensure;
use priority_ring::{DEFAULT_CAPACITY, DEFAULT_PRIORITIES, Priority, PriorityRing};
use tracing::{debug, info};

mod command;

pub use command::{Command, ParseNumberError, parse_number};

/// The buffer the exerciser drives: byte payloads in the reference configuration.
pub type Buffer = PriorityRing<u8, DEFAULT_CAPACITY, DEFAULT_PRIORITIES>;

const CLEAR: &str = "\x1b[1;1H\x1b[2J";
const TITLE: &str = "\tPriority Ring Exerciser\n\n";
const MENU: &str = "\n\tEnter either:\t1. data (a number less than 256)
\t\t2. one of the following commands:
\t\tP : Priority Setting
\t\tG : Get Value
\t\tR : Reset Buffer
\t\tS : Buffer Size
\t\tQ : Quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Start every screen with the ANSI clear sequence.
    pub clear: bool,
    /// Print the buffer internals after every command.
    pub dump: bool,
    /// Priority used for inserts until the user picks another one.
    pub priority: Priority,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            clear: true,
            dump: false,
            priority: 0,
        }
    }
}

pub struct Session<R, W> {
    input: R,
    output: W,
    buffer: Buffer,
    priority: Priority,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> anyhow::Result<Self> {
        let buffer = Buffer::new();
        ensure!(
            usize::from(options.priority) < buffer.priority_count(),
            "priority {} is out of range, expected 0..{}",
            options.priority,
            buffer.priority_count()
        );

        Ok(Self {
            input,
            output,
            buffer,
            priority: options.priority,
            options,
        })
    }

    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Processes commands until `q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.screen("")?;

        while let Some(line) = self.read_line()? {
            let command = Command::parse(&line);
            debug!(?command, "command");

            match command {
                Command::Insert(value) => self.insert(value)?,
                Command::SetPriority(priority) => {
                    if !self.set_priority(priority)? {
                        break;
                    }
                }
                Command::Retrieve => {
                    let message = match self.buffer.retrieve() {
                        Ok(value) => format!("Value {value} retrieved from buffer\n...\n"),
                        Err(error) => {
                            debug!(%error, "retrieve failed");
                            "Oops! Unable to retrieve a value!\n...\n".to_owned()
                        }
                    };
                    self.screen(&message)?;
                }
                Command::Reset => {
                    self.buffer.reset();
                    self.screen("Buffer Reset!\n...\n")?;
                }
                Command::Size => {
                    let message = format!("Buffer size: {}\n...\n", self.buffer.size());
                    self.screen(&message)?;
                }
                Command::Quit => break,
                Command::Redraw => self.screen("")?,
            }
        }

        writeln!(self.output, "Quitting!")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }

    fn is_valid_priority(&self, priority: Priority) -> bool {
        usize::from(priority) < self.buffer.priority_count()
    }

    fn insert(&mut self, value: u64) -> io::Result<()> {
        let Ok(value) = u8::try_from(value) else {
            return self.screen("Enter a value less than 256!\n...\n");
        };

        let outcome = match self.buffer.insert(value, self.priority) {
            Ok(()) => "Inserted",
            Err(error) => {
                info!(%error, value, "insert refused");
                "Failed to insert"
            }
        };
        let message = format!("{outcome} {value}, {}...\n", self.priority_line());
        self.screen(&message)
    }

    /// Applies an inline priority or prompts until a valid one is entered. Returns `false` when
    /// the input ends while prompting.
    fn set_priority(&mut self, inline: Option<Priority>) -> io::Result<bool> {
        if let Some(priority) = inline.filter(|&priority| self.is_valid_priority(priority)) {
            self.priority = priority;
            self.screen("")?;
            return Ok(true);
        }

        let highest = self.buffer.priority_count() - 1;
        loop {
            self.clear()?;
            write!(
                self.output,
                "Enter a Priority between 0 and {highest}\n (0 is lowest, {highest} is highest)...\n\n"
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let parsed = parse_number(&line)
                .ok()
                .and_then(|number| Priority::try_from(number).ok())
                .filter(|&priority| self.is_valid_priority(priority));

            if let Some(priority) = parsed {
                self.priority = priority;
                self.screen("")?;
                return Ok(true);
            }
        }
    }

    fn priority_line(&self) -> String {
        let highest = self.buffer.priority_count() - 1;
        let annotation = match usize::from(self.priority) {
            priority if priority == highest => " (highest)",
            0 => " (lowest)",
            _ => "",
        };
        format!("priority {}{annotation}\n", self.priority)
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.options.clear {
            write!(self.output, "{CLEAR}")?;
        }
        write!(self.output, "{TITLE}")
    }

    fn screen(&mut self, message: &str) -> io::Result<()> {
        self.clear()?;
        write!(self.output, "{message}{}", self.priority_line())?;
        if self.options.dump {
            write!(self.output, "{}", self.buffer.dump())?;
        }
        write!(self.output, "{MENU}")?;
        self.output.flush()
    }
}
