//! Stream selection, interactive or by best quality

use crate::core::description::render_stream_table;
use crate::core::interrupt::InterruptHandle;
use crate::core::video_info::{SelectionPolicy, StreamDescriptor};
use crate::error::TubeError;
use crate::platform::provider::StreamProvider;
use async_trait::async_trait;
use std::io::Write;
use tracing::{debug, warn};

const CHOICE_PROMPT: &str = "Choice? ";

/// One read from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Line(String),
    /// Ctrl-C or end of input
    Interrupted,
}

/// Where the interactive selector talks to the user
#[async_trait]
pub trait ChoicePrompt: Send {
    /// Show text the user needs in order to answer
    fn show(&mut self, text: &str);

    /// Show informational text such as metadata blocks
    fn report(&mut self, text: &str) {
        self.show(text);
    }

    /// Print `prompt` and wait for one line of input
    async fn read_line(&mut self, prompt: &str) -> PromptInput;
}

/// Prompt bound to the process terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    interrupts: InterruptHandle,
    quiet: bool,
}

impl TerminalPrompt {
    /// Prompt that gives up when `interrupts` delivers Ctrl-C
    pub fn new(interrupts: InterruptHandle) -> Self {
        Self {
            interrupts,
            quiet: false,
        }
    }

    /// Suppress informational output; the stream table and prompts still show
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl ChoicePrompt for TerminalPrompt {
    fn show(&mut self, text: &str) {
        println!("{}", text);
    }

    fn report(&mut self, text: &str) {
        if !self.quiet {
            println!("{}", text);
        }
    }

    async fn read_line(&mut self, prompt: &str) -> PromptInput {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();

        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|n| (n, line))
        });

        tokio::select! {
            result = read => match result {
                Ok(Ok((0, _))) => {
                    debug!("End of input while waiting for a choice");
                    PromptInput::Interrupted
                }
                Ok(Ok((_, line))) => PromptInput::Line(line),
                Ok(Err(e)) => {
                    warn!("Failed to read from stdin: {}", e);
                    PromptInput::Interrupted
                }
                Err(e) => {
                    warn!("Stdin reader task failed: {}", e);
                    PromptInput::Interrupted
                }
            },
            _ = self.interrupts.wait() => {
                println!();
                PromptInput::Interrupted
            }
        }
    }
}

/// Picks exactly one stream per video
pub struct StreamSelector<C> {
    prompt: C,
}

impl<C: ChoicePrompt> StreamSelector<C> {
    /// Create a selector reading choices from `prompt`
    pub fn new(prompt: C) -> Self {
        Self { prompt }
    }

    /// Access the underlying prompt
    pub fn prompt(&self) -> &C {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut C {
        &mut self.prompt
    }

    /// Select one stream.
    ///
    /// `MaxQuality` asks the provider for its best-ranked stream and never
    /// lists anything. `Interactive` lists the candidates (audio-only ones
    /// when `audio_only` is set) and loops until a valid index is entered.
    /// An interrupt while waiting yields [`TubeError::Cancelled`].
    pub async fn select<P>(
        &mut self,
        provider: &P,
        streams: &[StreamDescriptor],
        policy: SelectionPolicy,
        audio_only: bool,
    ) -> Result<StreamDescriptor, TubeError>
    where
        P: StreamProvider + ?Sized,
    {
        match policy {
            SelectionPolicy::MaxQuality => {
                let best = provider
                    .best_stream(streams, audio_only)
                    .ok_or(TubeError::NoStreamFound)?;
                debug!("Best stream: itag={} {}", best.itag, best.quality);
                Ok(best.clone())
            }
            SelectionPolicy::Interactive => {
                let candidates: Vec<&StreamDescriptor> = streams
                    .iter()
                    .filter(|s| !audio_only || s.is_audio_only())
                    .collect();

                if candidates.is_empty() {
                    return Err(TubeError::NoStreamFound);
                }

                self.prompt.show(&render_stream_table(&candidates));
                let index = self.read_index(candidates.len()).await?;
                Ok(candidates[index].clone())
            }
        }
    }

    async fn read_index(&mut self, len: usize) -> Result<usize, TubeError> {
        loop {
            let line = match self.prompt.read_line(CHOICE_PROMPT).await {
                PromptInput::Line(line) => line,
                PromptInput::Interrupted => return Err(TubeError::Cancelled),
            };

            match line.trim().parse::<i64>() {
                Err(_) => self.prompt.show("The input is invalid."),
                Ok(choice) if choice < 0 || choice as usize >= len => {
                    self.prompt.show("The choice is invalid.")
                }
                Ok(choice) => return Ok(choice as usize),
            }
        }
    }
}
