//! Interactive selection of city, month and day
//!
//! Each question runs a small state machine: the prompt is shown
//! (`Prompting`), the answer is checked (`Validating`) and either accepted or
//! the question is asked again.

use crate::error::{BikeshareError, Result};
use crate::filters::{
    parse_city, parse_day, parse_month, City, Filter, Selection, ALL, DAY_NAMES, MONTH_NAMES,
};
use log::debug;
use std::io::{BufRead, Write};

enum PromptState<T> {
    Prompting,
    Validating(String),
    Accepted(T),
}

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for city, month and day until each answer is valid
    pub fn get_filters(&mut self) -> Result<Selection> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let cities: Vec<&str> = City::ALL.iter().map(|c| c.name()).collect();
        let city = self.ask(&choice_question("city", &cities), parse_city)?;
        let month = self.ask(&choice_question("month", &with_all(&MONTH_NAMES)), parse_month)?;
        let day = self.ask(&choice_question("day", &with_all(&DAY_NAMES)), parse_day)?;

        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(Selection::new(city, Filter::new(month, day)))
    }

    /// Ask whether to run again; only `yes` restarts, end of input means no
    pub fn ask_restart(&mut self) -> Result<bool> {
        writeln!(self.output, "\nWould you like to restart? Enter yes or no.")?;
        self.output.flush()?;

        match self.read_answer() {
            Ok(answer) => Ok(answer.eq_ignore_ascii_case("yes")),
            Err(BikeshareError::InputClosed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Repeat `question` until `validate` accepts the answer.
    ///
    /// Only `InvalidSelection` errors are recovered; anything else is returned.
    pub fn ask<T, F>(&mut self, question: &str, validate: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        let mut state = PromptState::Prompting;
        loop {
            state = match state {
                PromptState::Prompting => {
                    writeln!(self.output, "{}", question)?;
                    self.output.flush()?;
                    PromptState::Validating(self.read_answer()?)
                }
                PromptState::Validating(answer) => match validate(&answer) {
                    Ok(value) => PromptState::Accepted(value),
                    Err(e @ BikeshareError::InvalidSelection { .. }) => {
                        debug!("Rejected answer '{}'", answer);
                        writeln!(self.output, "{}, try again", e)?;
                        PromptState::Prompting
                    }
                    Err(e) => return Err(e),
                },
                PromptState::Accepted(value) => return Ok(value),
            };
        }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

fn choice_question(kind: &str, choices: &[&str]) -> String {
    format!("Choose a {} from: {}", kind, choices.join(", "))
}

fn with_all<'a>(names: &[&'a str]) -> Vec<&'a str> {
    let mut choices = names.to_vec();
    choices.push(ALL);
    choices
}
