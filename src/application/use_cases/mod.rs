mod complete_prompt;
mod converse;
mod lookup_sequencer;
mod lookup_suggestions;

pub use complete_prompt::*;
pub use converse::*;
pub use lookup_sequencer::*;
pub use lookup_suggestions::*;
