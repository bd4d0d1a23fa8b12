mod next_step;

pub use next_step::*;
