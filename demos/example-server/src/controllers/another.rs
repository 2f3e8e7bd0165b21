use super::InstanceReport;
use crate::services::{ExampleInjectableService, HomeService};
use ferrule::prelude::*;

// curl http://localhost:3000/another/world
pub struct AnotherController {
    home_service: HomeService,
    example_service: Arc<ExampleInjectableService>,
}

impl AnotherController {
    async fn hello_world(self: Arc<Self>, _request: Request<Body>) -> Json<InstanceReport> {
        Json(InstanceReport {
            controller: "AnotherController",
            home_service_instance_id: self.home_service.instance_id(),
            example_service_instance_id: self.example_service.instance_id(),
        })
    }
}

impl FromInjection for AnotherController {
    fn from_injection(args: InjectionArgs) -> Result<Self> {
        Ok(AnotherController {
            home_service: HomeService::new(),
            example_service: args.require(1)?,
        })
    }
}

impl Controller for AnotherController {
    fn describe(controller: &mut ControllerDescriptor<Self>) {
        controller
            .prefix("another")
            .inject::<ExampleInjectableService>(1)
            .get("world", "helloWorld", Self::hello_world);
    }
}
