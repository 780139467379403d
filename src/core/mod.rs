//! Acquisition pipeline: selection, reporting and orchestration

pub mod description;
pub mod interrupt;
pub mod orchestrator;
pub mod progress;
pub mod selector;
pub mod video_info;

pub use description::*;
pub use interrupt::InterruptHandle;
pub use orchestrator::*;
pub use progress::*;
pub use selector::{ChoicePrompt, PromptInput, StreamSelector, TerminalPrompt};
pub use video_info::*;
