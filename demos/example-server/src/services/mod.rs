mod example_injectable;
mod home;

pub use example_injectable::ExampleInjectableService;
pub use home::HomeService;
