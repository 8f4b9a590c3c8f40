pub mod apps_script;
pub mod memory_store;
pub mod traits;

pub use apps_script::AppsScriptClient;
pub use memory_store::{AppendBehavior, InMemoryStore};
pub use traits::MatchStore;
