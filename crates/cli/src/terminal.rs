//! Terminal operator: prompts, cutout display hand-off, export confirmation.

use crate::fetch::CutoutSource;
use jellyfish::api::{
    Classifier, CutoutRequest, Dialogue, DialogueState, Event, SkyPosition, Step, Verdict, Zoom,
};
use jellyfish::classify::Confirm;
use jellyfish::{Error, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Line-oriented operator input.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

impl Prompt for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self.readline(prompt) {
            Ok(line) => {
                if let Err(e) = self.add_history_entry(line.as_str()) {
                    tracing::debug!(error = %e, "prompt history not updated");
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(Error::Aborted("operator ended the session".to_string()))
            }
            Err(e) => Err(Error::Aborted(e.to_string())),
        }
    }
}

/// Drives one [`Dialogue`] per galaxy against a prompt and a cutout source.
pub struct TerminalClassifier<P, S> {
    prompt: P,
    source: S,
    layer: String,
    total: usize,
}

impl<P: Prompt, S: CutoutSource> TerminalClassifier<P, S> {
    pub fn new(prompt: P, source: S, layer: impl Into<String>, total: usize) -> Self {
        Self {
            prompt,
            source,
            layer: layer.into(),
            total,
        }
    }

    fn show(&self, position: &SkyPosition, zoom: Zoom) {
        let request = CutoutRequest::new(*position, self.layer.as_str(), zoom);
        match self.source.fetch(&request) {
            Ok(path) => println!(
                "Cutout (pixscale {}) saved to {}",
                zoom.pixscale(),
                path.display()
            ),
            Err(e) => {
                tracing::warn!(ra = position.ra(), dec = position.dec(), error = %e, "cutout");
                println!("Image unavailable. Type 'c' to continue, then 'b' to flag it as broken.");
            }
        }
    }

    /// Ask whether to write the in-memory results. `false` means they will be lost.
    pub fn confirm_export(&mut self, destination: &str) -> Result<bool> {
        loop {
            let line = self
                .prompt
                .read_line(&format!("Export classifications to {destination}? (y/n): "))?;
            match line.parse::<Confirm>() {
                Ok(Confirm::Yes) => return Ok(true),
                Ok(Confirm::No) => return Ok(false),
                Err(e) => println!("{e}"),
            }
        }
    }
}

impl<P: Prompt, S: CutoutSource> Classifier for TerminalClassifier<P, S> {
    fn classify(&mut self, index: usize, position: &SkyPosition) -> Result<Verdict> {
        println!(
            "\nGalaxy {} of {} (ra={:.6}, dec={:+.6})",
            index + 1,
            self.total,
            position.ra(),
            position.dec()
        );
        println!("Is the galaxy a good size to classify? If the image is broken, continue and flag it.");
        let mut dialogue = Dialogue::new(position.dec());
        self.show(position, dialogue.zoom());
        loop {
            if let DialogueState::AwaitingTailPoints { centre: None } = dialogue.state() {
                println!(
                    "Draw the tail: the cutout spans [-128, 128] on both axes with the galaxy at 0 0."
                );
            }
            let line = self.prompt.read_line(dialogue.prompt())?;
            match dialogue.advance(Event::Token(&line)) {
                Ok(Step::Zoomed(zoom)) => self.show(position, zoom),
                Ok(Step::Measured { .. }) | Ok(Step::Advanced)
                    if dialogue.state() == DialogueState::AwaitingConfirmation =>
                {
                    println!("{}", dialogue.summary());
                }
                Ok(Step::Restarted) => println!("Restarting classification: let's try again"),
                Ok(Step::Committed(verdict)) => return Ok(verdict),
                Ok(_) => {}
                Err(e @ Error::InvalidPromptToken { .. }) => println!("{e}"),
                Err(e) => return Err(e),
            }
        }
    }
}
