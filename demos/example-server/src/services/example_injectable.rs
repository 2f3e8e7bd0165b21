use chrono::{DateTime, Utc};
use ferrule::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Shared by every controller that injects it. Its creation log shows up once.
pub struct ExampleInjectableService {
    instance_id: Uuid,
    created_at: DateTime<Utc>,
    heartbeats: AtomicU64,
}

impl ExampleInjectableService {
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn heartbeats(&self) -> u64 {
        self.heartbeats.load(Ordering::Relaxed)
    }

    fn heartbeat(&self) {
        let beats = self.heartbeats.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!("[Singleton] {} heartbeat #{}", self.instance_id, beats);
    }

    fn announce(&self) {
        tracing::info!(
            "[Singleton] {} up since {}",
            self.instance_id,
            self.created_at.to_rfc3339()
        );
    }
}

impl Injectable for ExampleInjectableService {
    fn create() -> Self {
        let service = ExampleInjectableService {
            instance_id: Uuid::new_v4(),
            created_at: Utc::now(),
            heartbeats: AtomicU64::new(0),
        };
        tracing::info!(
            "[Singleton] ExampleInjectableService created at {}",
            service.created_at.to_rfc3339()
        );
        service
    }

    fn describe(service: &mut ServiceDescriptor<Self>) {
        service
            .repeat("heartbeat", Repeat::every_ms(10_000).forever(), Self::heartbeat)
            .repeat("announce", Repeat::every_ms(1_000), Self::announce);
    }
}
