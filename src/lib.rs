pub mod core;
pub mod logging;
pub mod orchestration;
pub mod status;
pub mod transport;

pub use crate::core::{
    BuildHost, BuildOutcome, ConfigLoadOptions, ConfigLoader, ConfigOverlay, DialogPresenter,
    DialogSeverity, ProjectHandle, PublishError, PublishTransport, PublisherConfig,
};
pub use crate::orchestration::{CancelToken, PublishOrchestrator, PublishReport, PublishRequest};
pub use crate::status::{
    OverlayState, SingleThreadExecutor, StatusControl, StatusOverlay, UiExecutor,
};
pub use crate::transport::HttpPublishTransport;
