//! Interactive version selection.
//!
//! The flow is a small state machine driven by lines read from `input`:
//!
//! ```text
//! MainMenu ──1──> ManualInput ───────────────┐
//!    │  └───2──> AutoIncrement ──────────────┤
//!    │                                       v
//!    └──3──> Done(Exit)                    Confirm ──y──> Done(Apply)
//!                                            └──────────> Done(Cancelled)
//! ```
//!
//! Invalid main-menu input loops back to `MainMenu`. End of input ends the
//! flow without changes wherever it happens.

use std::io::{self, BufRead, Write};

use super::semver::{self, Bump};

/// How the flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user confirmed this version.
    Apply(String),
    /// The user backed out or gave up.
    Cancelled,
    /// The user chose to quit from the main menu.
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    MainMenu,
    ManualInput,
    AutoIncrement,
    Confirm(String),
    Done(Outcome),
}

/// Answers accepted as "yes" at the confirmation prompt.
const YES_ANSWERS: &[&str] = &["y", "yes", "是"];

#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
    base_version: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// `base_version` is what the auto-increment choices start from.
    pub fn new(input: R, output: W, base_version: impl Into<String>) -> Self {
        Self {
            input,
            output,
            base_version: base_version.into(),
        }
    }

    /// Run the full flow from the main menu.
    pub fn run(&mut self) -> io::Result<Outcome> {
        self.run_from(Step::MainMenu)
    }

    /// Only ask for confirmation of `version`.
    pub fn confirm(&mut self, version: &str) -> io::Result<Outcome> {
        self.run_from(Step::Confirm(version.to_string()))
    }

    pub fn run_from(&mut self, mut step: Step) -> io::Result<Outcome> {
        loop {
            step = match step {
                Step::MainMenu => self.main_menu()?,
                Step::ManualInput => self.manual_input()?,
                Step::AutoIncrement => self.auto_increment()?,
                Step::Confirm(version) => self.confirm_step(version)?,
                Step::Done(outcome) => return Ok(outcome),
            };
        }
    }

    fn main_menu(&mut self) -> io::Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "Choose an action:")?;
        writeln!(self.output, "1. Enter a new version manually")?;
        writeln!(self.output, "2. Increment the current version")?;
        writeln!(self.output, "3. Exit")?;

        let Some(choice) = self.ask("\nEnter choice (1-3): ")? else {
            return Ok(Step::Done(Outcome::Exit));
        };

        Ok(match choice.as_str() {
            "1" => Step::ManualInput,
            "2" => Step::AutoIncrement,
            "3" => {
                writeln!(self.output, "Bye!")?;
                Step::Done(Outcome::Exit)
            }
            _ => {
                writeln!(self.output, "Invalid choice")?;
                Step::MainMenu
            }
        })
    }

    fn manual_input(&mut self) -> io::Result<Step> {
        let Some(version) = self.ask("\nEnter the new version (e.g. 1.0.2): ")? else {
            return Ok(Step::Done(Outcome::Cancelled));
        };

        if version.is_empty() {
            writeln!(self.output, "Version cannot be empty")?;
            return Ok(Step::ManualInput);
        }
        if !semver::is_valid(&version) {
            writeln!(
                self.output,
                "Invalid version, use semantic versioning (e.g. 1.0.2)"
            )?;
            return Ok(Step::ManualInput);
        }

        Ok(Step::Confirm(version))
    }

    fn auto_increment(&mut self) -> io::Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "Current version: {}", self.base_version)?;
        writeln!(self.output, "Choose the increment:")?;
        writeln!(self.output, "1. major - breaking changes")?;
        writeln!(self.output, "2. minor - new features")?;
        writeln!(self.output, "3. patch - bug fixes")?;

        let Some(choice) = self.ask("Enter choice (1-3): ")? else {
            return Ok(Step::Done(Outcome::Cancelled));
        };

        let kind = match choice.as_str() {
            "1" => Bump::Major,
            "2" => Bump::Minor,
            "3" => Bump::Patch,
            _ => {
                writeln!(self.output, "Invalid choice")?;
                return Ok(Step::Done(Outcome::Cancelled));
            }
        };

        match semver::bump(&self.base_version, kind) {
            Ok(version) => {
                writeln!(self.output, "\nNew version: {version}")?;
                Ok(Step::Confirm(version))
            }
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(Step::Done(Outcome::Cancelled))
            }
        }
    }

    fn confirm_step(&mut self, version: String) -> io::Result<Step> {
        writeln!(self.output, "\nAbout to update the version to: {version}")?;
        let answer = self.ask("Confirm? (y/N): ")?.unwrap_or_default();

        if YES_ANSWERS.contains(&answer.to_lowercase().as_str()) {
            Ok(Step::Done(Outcome::Apply(version)))
        } else {
            writeln!(self.output, "Update cancelled")?;
            Ok(Step::Done(Outcome::Cancelled))
        }
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
