//! Terminal front-end — drives an `AssessmentWizard` from line-based input.
//!
//! Input is parsed into a [`Command`] before it reaches the wizard, so
//! out-of-range ratings and typos never become wizard calls.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::api::ScoringBackend;
use crate::assessment::{AssessmentResult, Rating};
use crate::error::Result;
use crate::handoff::ResultHandoff;
use crate::report;
use crate::wizard::{AssessmentWizard, SubmitOutcome, WizardPhase};

/// One line of user input while answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rate(Rating),
    Next,
    Previous,
    Submit,
    Retry,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        match input.as_str() {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" | "b" | "back" => Ok(Self::Previous),
            "s" | "submit" => Ok(Self::Submit),
            "r" | "retry" => Ok(Self::Retry),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other if other.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '-') => {
                other.parse::<Rating>().map(Self::Rate)
            }
            other => Err(format!("Unknown command {other:?}")),
        }
    }
}

/// Line-oriented terminal session over any async reader/writer.
pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Give back the writer (tests inspect what was printed).
    pub fn into_writer(self) -> W {
        self.out
    }

    pub async fn print(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// Prompt and read one trimmed line. `None` on end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.out.write_all(label.as_bytes()).await?;
        self.out.flush().await?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Run the whole flow. Returns `None` when the user quits or input ends
    /// before a result is produced.
    pub async fn run_assessment(
        &mut self,
        wizard: &mut AssessmentWizard,
        backend: &dyn ScoringBackend,
        handoff: &dyn ResultHandoff,
    ) -> Result<Option<AssessmentResult>> {
        if !self.collect_identity(wizard).await? {
            return Ok(None);
        }

        loop {
            match wizard.phase() {
                WizardPhase::Answering => self.show_question(wizard).await?,
                WizardPhase::Failed => {
                    self.print("Type r to retry or q to quit.").await?;
                }
                WizardPhase::Done => return Ok(wizard.result().cloned()),
                // `submit` resolves before returning control, so these never
                // show up between commands.
                WizardPhase::CollectingIdentity | WizardPhase::Submitting => {}
            }

            let Some(line) = self.prompt("> ").await? else {
                tracing::info!("Input closed; assessment abandoned");
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(hint) => {
                    self.print(&format!("{hint}. {}", Self::help(wizard))).await?;
                    continue;
                }
            };

            match (wizard.phase(), command) {
                (_, Command::Quit) => return Ok(None),
                (WizardPhase::Answering, Command::Rate(rating)) => {
                    wizard.record_answer(rating);
                }
                (WizardPhase::Answering, Command::Next) => {
                    if !wizard.advance() {
                        self.print("Next is not available: answer this question first.")
                            .await?;
                    }
                }
                (WizardPhase::Answering, Command::Previous) => {
                    if !wizard.retreat() {
                        self.print("Already at the first question.").await?;
                    }
                }
                (WizardPhase::Answering, Command::Submit) => {
                    if wizard.state().can_submit() {
                        self.print("Processing your assessment...").await?;
                    }
                    match wizard.submit(backend, handoff).await {
                        SubmitOutcome::Done => {
                            if let Some(warning) = wizard.last_error() {
                                let warning = warning.to_string();
                                self.print(&warning).await?;
                            }
                        }
                        SubmitOutcome::Failed(message) => self.print(&message).await?,
                        // Shown with the question on the next render.
                        SubmitOutcome::Rejected(_) => {}
                        SubmitOutcome::Ignored => {
                            self.print("Submit is available on the last question.").await?;
                        }
                    }
                }
                (WizardPhase::Failed, Command::Retry) => {
                    wizard.retry();
                }
                _ => {
                    self.print(&format!("Not available right now. {}", Self::help(wizard)))
                        .await?;
                }
            }
        }
    }

    /// Ask for name and email until the wizard accepts them. `false` if input
    /// ended first.
    async fn collect_identity(&mut self, wizard: &mut AssessmentWizard) -> Result<bool> {
        self.print("Career Assessment: discover your ideal career path.")
            .await?;
        loop {
            let Some(name) = self.prompt("Full name: ").await? else {
                return Ok(false);
            };
            let Some(email) = self.prompt("Email address: ").await? else {
                return Ok(false);
            };
            match wizard.start(&name, &email) {
                Ok(()) => {
                    tracing::info!(questions = wizard.questions().len(), "Assessment started");
                    return Ok(true);
                }
                Err(e) => self.print(&e.to_string()).await?,
            }
        }
    }

    async fn show_question(&mut self, wizard: &AssessmentWizard) -> Result<()> {
        let mut text = String::from("\n");
        text.push_str(&report::render_question(
            wizard.current_question(),
            wizard.progress(),
            wizard.state().current_answer(),
        ));
        if let Some(error) = wizard.last_error() {
            text.push_str(&format!("\n! {error}"));
        }
        text.push('\n');
        text.push_str(&Self::help(wizard));
        self.print(&text).await
    }

    /// Actions available in the current state; disabled ones are left out.
    fn help(wizard: &AssessmentWizard) -> String {
        let state = wizard.state();
        if state.phase() == WizardPhase::Failed {
            return "Commands: r retry, q quit".to_string();
        }
        let mut actions = vec!["1-5 rate"];
        if state.can_retreat() {
            actions.push("p previous");
        }
        if state.can_advance() {
            actions.push("n next");
        }
        if state.can_submit() {
            actions.push("s submit");
        }
        actions.push("q quit");
        format!("Commands: {}", actions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::Next));
        assert_eq!(" Previous ".parse::<Command>(), Ok(Command::Previous));
        assert_eq!("S".parse::<Command>(), Ok(Command::Submit));
        assert_eq!("retry".parse::<Command>(), Ok(Command::Retry));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "4".parse::<Command>(),
            Ok(Command::Rate(Rating::new(4).unwrap()))
        );
    }

    #[test]
    fn rejects_out_of_range_ratings_at_the_surface() {
        assert!("0".parse::<Command>().is_err());
        assert!("6".parse::<Command>().is_err());
        assert!("-2".parse::<Command>().is_err());
        assert!("3.5".parse::<Command>().is_err());
        assert!("maybe".parse::<Command>().is_err());
    }
}
