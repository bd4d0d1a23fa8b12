mod suggestion_index;
mod text_generator;
mod transformation_generator;

pub use suggestion_index::*;
pub use text_generator::*;
pub use transformation_generator::*;
