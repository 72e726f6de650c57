pub mod builder;
pub mod handler;
pub mod listener;
pub mod timeout;

pub use builder::ServerBuilder;
pub use handler::HealthHandler;
pub use timeout::{TimeoutFallback, TimeoutFallbackLayer};

use crate::config::Config;
use crate::health::HealthChecker;
use crate::probe::ProbeRunner;
use std::sync::Arc;
use tower::ServiceBuilder;

/// The full request stack: health handler behind the request timeout.
pub fn health_service(
    config: &Config,
    runner: Arc<dyn ProbeRunner>,
) -> TimeoutFallback<HealthHandler> {
    let checker = HealthChecker::new(
        runner,
        config.probes.clone(),
        config.settings.version_command.clone(),
    );

    ServiceBuilder::new()
        .layer(TimeoutFallbackLayer::new(
            config.settings.request_timeout(),
            config.settings.timeout_message.as_str(),
        ))
        .service(HealthHandler::new(Arc::new(checker)))
}
