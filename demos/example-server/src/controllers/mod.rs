mod another;
mod home;

pub use another::AnotherController;
pub use home::HomeController;

use serde::Serialize;
use uuid::Uuid;

/// Body returned by both `/hello/world` and `/another/world`.
///
/// `home_service_instance_id` differs between controllers while
/// `example_service_instance_id` is the same.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceReport {
    pub controller: &'static str,
    pub home_service_instance_id: Uuid,
    pub example_service_instance_id: Uuid,
}
