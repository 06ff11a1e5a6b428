//! Version information

use tracing::instrument;

/// Name, version and correlation id of this run
#[instrument]
#[must_use]
pub fn get_version_info() -> String {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let description = env!("CARGO_PKG_DESCRIPTION");

    tracing::debug!(
        package_name = name,
        package_version = version,
        "Gathering package information"
    );

    format!(
        "{name} {version} - {description}\n\
         Correlation ID: {}",
        crate::tracing::correlation_id()
    )
}
