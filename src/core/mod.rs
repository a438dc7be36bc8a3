pub mod config;
pub mod config_loader;
pub mod error;
pub mod traits;

pub use config::{ConfigOverlay, PublisherConfig};
pub use config_loader::{ConfigLoadOptions, ConfigLoader};
pub use error::PublishError;
pub use traits::{
    BuildHost, BuildOutcome, DialogPresenter, DialogSeverity, ProjectHandle, PublishTransport,
};
