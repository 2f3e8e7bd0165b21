use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Not injectable: each controller builds its own.
pub struct HomeService {
    instance_id: Uuid,
    created_at: DateTime<Utc>,
}

impl HomeService {
    pub fn new() -> Self {
        let service = HomeService {
            instance_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        tracing::info!(
            "[New Instance] HomeService created at {}",
            service.created_at.to_rfc3339()
        );
        service
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

impl Default for HomeService {
    fn default() -> Self {
        Self::new()
    }
}
