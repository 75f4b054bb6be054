pub mod codec;
pub mod command;
pub mod mention;

pub use codec::{ActionName, CallbackId};
pub use command::{help_text, Command};
pub use mention::{resolve_opponent, strip_leading_mention};
