//! Application Lifecycle Module
//!
//! # Lifecycle Phases
//!
//! ```text
//! 1. Configuration Loading
//!    ↓
//! 2. Service Declaration       (Application::injectable)
//!    ↓
//! 3. Controller Registration   (Application::register_controller)
//!    ↓
//! 4. Repeat Schedules Start    (Application::start_all_repeats)
//!    ↓
//! 5. Server Start
//!    ↓
//! [Running...]
//!    ↓
//! 6. Shutdown Signal (SIGTERM/SIGINT)
//!    ↓
//! 7. Application::shutdown     (cancel schedules, drop singletons)
//! ```

mod application;
mod shutdown;

pub use application::Application;
pub use shutdown::shutdown_signal;
