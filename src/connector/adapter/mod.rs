mod algolia_index;
mod gateway_client;
mod in_memory_suggestion_index;
mod mock_text_generator;
mod openai_client;

pub use algolia_index::*;
pub use gateway_client::*;
pub use in_memory_suggestion_index::*;
pub use mock_text_generator::*;
pub use openai_client::*;
