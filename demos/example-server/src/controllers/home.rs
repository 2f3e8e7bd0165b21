use super::InstanceReport;
use crate::services::{ExampleInjectableService, HomeService};
use ferrule::prelude::*;
use serde_json::{Value, json};

// curl http://localhost:3000/hello/world
pub struct HomeController {
    home_service: HomeService,
    example_service: Arc<ExampleInjectableService>,
}

impl HomeController {
    async fn hello_world(self: Arc<Self>, _request: Request<Body>) -> Json<InstanceReport> {
        Json(InstanceReport {
            controller: "HomeController",
            home_service_instance_id: self.home_service.instance_id(),
            example_service_instance_id: self.example_service.instance_id(),
        })
    }

    async fn status(self: Arc<Self>, _request: Request<Body>) -> Json<Value> {
        Json(json!({
            "createdAt": self.example_service.created_at(),
            "heartbeats": self.example_service.heartbeats(),
        }))
    }
}

impl FromInjection for HomeController {
    fn from_injection(args: InjectionArgs) -> Result<Self> {
        Ok(HomeController {
            home_service: HomeService::new(),
            example_service: args.require(1)?,
        })
    }
}

impl Controller for HomeController {
    fn describe(controller: &mut ControllerDescriptor<Self>) {
        controller
            .prefix("hello")
            .inject::<ExampleInjectableService>(1)
            .get("world", "helloWorld", Self::hello_world)
            .get("status", "status", Self::status);
    }
}
