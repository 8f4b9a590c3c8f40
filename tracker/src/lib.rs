pub mod config;
pub mod coordinator;
pub mod notify;

pub use config::{ConfigError, TrackerConfig};
pub use coordinator::{SubmitOutcome, ViewCoordinator};
pub use notify::{ConsoleNotifier, LogNotifier, Notification, NotificationKind, Notifier};
