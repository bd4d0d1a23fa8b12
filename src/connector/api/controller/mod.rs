pub mod complete_controller;
pub mod suggest_controller;

pub use complete_controller::CompleteController;
pub use suggest_controller::SuggestController;
