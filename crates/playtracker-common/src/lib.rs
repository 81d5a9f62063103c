pub mod error;
pub mod play;

pub use error::{Error, Result};
pub use play::{DIFFICULTIES, NewPlay, Outcome, Play, Scenario};
