mod generation;
mod message;
mod session;
mod suggestion;

pub use generation::*;
pub use message::*;
pub use session::*;
pub use suggestion::*;
