//! Line-based prompts that fill a [`FormController`] from a terminal.

use std::io::{self, BufRead, Write};

use itertools::Itertools;
use regex::Regex;
use thiserror::Error;
use types::{Format, PlayDraw, SideboardStatus};

use crate::{
    controller::{EntryMode, FormController},
    field::Field,
};

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Error reading from terminal: {0}")]
    Io(#[from] io::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    Filled,
    Quit,
}

/// Choice lists offered for the pooled fields.
#[derive(Clone, Debug, Default)]
pub struct Pools<'a> {
    pub names: &'a [String],
    pub decks: &'a [String],
}

impl<'a> Pools<'a> {
    fn for_field(&self, field: Field) -> &'a [String] {
        match field {
            Field::Player | Field::Opponent => self.names,
            Field::PlayerDeck | Field::OpponentDeck => self.decks,
            _ => &[],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Step {
    Pooled(Field),
    Fixed(Field),
    Score,
}

enum Reply {
    Value(String),
    Again,
    Quit,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    score_re: Regex,
    index_re: Regex,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            score_re: Regex::new(r"^(?<wins>-?\d+)\s*(?:-|\s|,)\s*(?<losses>-?\d+)$")
                .expect("Valid score regex"),
            index_re: Regex::new(r"^(?<index>\d+)$").expect("Valid index regex"),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompts for every field of the form.
    pub fn fill(
        &mut self,
        form: &mut FormController,
        pools: &Pools,
    ) -> Result<PromptOutcome, PromptError> {
        self.fill_fields(form, pools, &Field::ALL)
    }

    /// Prompts for `fields` only, e.g. the ones that failed validation.
    pub fn fill_fields(
        &mut self,
        form: &mut FormController,
        pools: &Pools,
        fields: &[Field],
    ) -> Result<PromptOutcome, PromptError> {
        let steps = fields
            .iter()
            .map(|&field| match field {
                Field::Wins | Field::Losses => Step::Score,
                field if field.is_pooled() => Step::Pooled(field),
                field => Step::Fixed(field),
            })
            .unique()
            .collect::<Vec<_>>();

        for step in steps {
            if let Some(error) = step_error(form, step) {
                writeln!(self.output, "  ! {}", error)?;
            }
            let outcome = match step {
                Step::Pooled(field) => self.prompt_pooled(form, field, pools.for_field(field))?,
                Step::Fixed(field) => self.prompt_fixed(form, field)?,
                Step::Score => self.prompt_score(form)?,
            };
            if outcome == PromptOutcome::Quit {
                return Ok(PromptOutcome::Quit);
            }
        }
        Ok(PromptOutcome::Filled)
    }

    fn prompt_pooled(
        &mut self,
        form: &mut FormController,
        field: Field,
        pool: &[String],
    ) -> Result<PromptOutcome, PromptError> {
        loop {
            match form.entry_mode(field, pool) {
                EntryMode::Choose => {
                    writeln!(self.output, "{}:", field.label())?;
                    for (idx, value) in pool.iter().enumerate() {
                        writeln!(self.output, "  {}) {}", idx + 1, value)?;
                    }
                    let new_hint = if matches!(field, Field::Player | Field::Opponent) {
                        "+ to add a new name"
                    } else {
                        "+ to add a new deck"
                    };
                    let reply = self.ask(&format!("Pick 1-{} ({new_hint}) >> ", pool.len()))?;
                    match reply {
                        Reply::Quit => return Ok(PromptOutcome::Quit),
                        Reply::Again => continue,
                        Reply::Value(input) if input == "+" => {
                            form.enter_manually(field);
                        }
                        Reply::Value(input) => match self.pick(&input, pool) {
                            Ok(value) => {
                                form.set(field, value);
                                return Ok(PromptOutcome::Filled);
                            }
                            Err(err) => {
                                log::debug!("Rejected choice for {field}: {err}");
                                writeln!(self.output, "  ! {err}")?;
                            }
                        },
                    }
                }
                EntryMode::Manual => {
                    let hint = if pool.is_empty() { "" } else { " (< to use the list)" };
                    match self.ask_text(&format!("{}{hint} >> ", field.label()))? {
                        Reply::Quit => return Ok(PromptOutcome::Quit),
                        Reply::Value(input) if input == "<" && !pool.is_empty() => {
                            form.use_choices(field);
                        }
                        Reply::Value(input) => {
                            form.set(field, input);
                            return Ok(PromptOutcome::Filled);
                        }
                        Reply::Again => {
                            form.set(field, "");
                            return Ok(PromptOutcome::Filled);
                        }
                    }
                }
            }
        }
    }

    fn prompt_fixed(
        &mut self,
        form: &mut FormController,
        field: Field,
    ) -> Result<PromptOutcome, PromptError> {
        let (options, optional): (Vec<String>, bool) = match field {
            Field::Format => (Format::ALL.iter().map(|f| f.to_string()).collect(), false),
            Field::PlayDraw => (PlayDraw::ALL.iter().map(|p| p.to_string()).collect(), true),
            Field::SideboardStatus => (
                SideboardStatus::ALL.iter().map(|s| s.to_string()).collect(),
                true,
            ),
            other => {
                // plain text field
                return match self.ask_text(&format!("{} >> ", other.label()))? {
                    Reply::Quit => Ok(PromptOutcome::Quit),
                    Reply::Value(input) => {
                        form.set(other, input);
                        Ok(PromptOutcome::Filled)
                    }
                    Reply::Again => Ok(PromptOutcome::Filled),
                };
            }
        };

        let listing = options
            .iter()
            .enumerate()
            .map(|(idx, option)| format!("{}) {}", idx + 1, option))
            .join("  ");
        let skip_hint = if optional { ", blank to skip" } else { "" };
        loop {
            writeln!(self.output, "{}: {listing}", field.label())?;
            match self.ask(&format!("Pick a number or type a name{skip_hint} >> "))? {
                Reply::Quit => return Ok(PromptOutcome::Quit),
                Reply::Again if optional => {
                    form.set(field, "");
                    return Ok(PromptOutcome::Filled);
                }
                Reply::Again => continue,
                Reply::Value(input) => {
                    let value = self.pick(&input, &options).unwrap_or(input);
                    form.set(field, value);
                    return Ok(PromptOutcome::Filled);
                }
            }
        }
    }

    fn prompt_score(&mut self, form: &mut FormController) -> Result<PromptOutcome, PromptError> {
        loop {
            let current = format!("{}-{}", form.value(Field::Wins), form.value(Field::Losses));
            match self.ask(&format!("Games as wins-losses [{current}] >> "))? {
                Reply::Quit => return Ok(PromptOutcome::Quit),
                Reply::Again => return Ok(PromptOutcome::Filled),
                Reply::Value(input) => match self.parse_score(&input) {
                    Ok((wins, losses)) => {
                        form.set(Field::Wins, wins);
                        form.set(Field::Losses, losses);
                        return Ok(PromptOutcome::Filled);
                    }
                    Err(err) => writeln!(self.output, "  ! {err}")?,
                },
            }
        }
    }

    /// Reads a reply where `q`/`quit` end the session.
    fn ask(&mut self, prompt: &str) -> Result<Reply, PromptError> {
        self.read_reply(prompt, true)
    }

    /// Reads free text; any word is a value and only end of input quits.
    fn ask_text(&mut self, prompt: &str) -> Result<Reply, PromptError> {
        self.read_reply(prompt, false)
    }

    fn read_reply(&mut self, prompt: &str, quit_words: bool) -> Result<Reply, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(Reply::Quit);
        }
        let input = buf.trim();
        Ok(match input {
            "" => Reply::Again,
            "q" | "quit" if quit_words => Reply::Quit,
            _ => Reply::Value(input.to_string()),
        })
    }

    /// A 1-based index into `options`, or an option typed out in any case.
    fn pick(&self, input: &str, options: &[String]) -> Result<String, String> {
        if let Some(caps) = self.index_re.captures(input) {
            let index: usize = caps["index"]
                .parse()
                .map_err(|e| format!("Unable to read choice {input:?}: {e}"))?;
            return index
                .checked_sub(1)
                .and_then(|idx| options.get(idx))
                .cloned()
                .ok_or_else(|| format!("Pick a number from 1 to {}", options.len()));
        }
        options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(input))
            .cloned()
            .ok_or_else(|| format!("{input:?} is not one of the choices"))
    }

    fn parse_score(&self, input: &str) -> Result<(String, String), String> {
        let Some(caps) = self.score_re.captures(input) else {
            return Err(format!(
                "Unable to read a score from {input:?}; enter it like 2-1"
            ));
        };
        Ok((caps["wins"].to_string(), caps["losses"].to_string()))
    }
}

fn step_error(form: &FormController, step: Step) -> Option<String> {
    match step {
        Step::Pooled(field) | Step::Fixed(field) => {
            form.error_for(field).map(|e| e.message.clone())
        }
        Step::Score => form
            .error_for(Field::Wins)
            .or_else(|| form.error_for(Field::Losses))
            .map(|e| e.message.clone()),
    }
}
