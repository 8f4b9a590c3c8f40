pub mod choice;
pub mod error;
mod lenient;
pub mod pools;
pub mod record;
pub mod recorded;
pub mod score;

pub use choice::{Format, PlayDraw, SideboardStatus};
pub use error::ParseError;
pub use pools::{deck_pool, name_pool};
pub use record::MatchRecord;
pub use recorded::Recorded;
pub use score::GameScore;
