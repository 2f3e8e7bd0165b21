use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Startup-time wiring mistakes.
///
/// Every variant describes a programmer error discovered while resolving
/// services, constructing controllers or binding routes. None of them are
/// retried; the host is expected to abort startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{type_name} is not injectable; mark it with `injectable::<{type_name}>()` first")]
    NotInjectable { type_name: String },

    #[error("Controller {controller} routes to `{handler}`, which it does not provide")]
    HandlerNotFound { controller: String, handler: String },

    #[error("Injection slot {index} of {target} holds no {type_name}")]
    MissingInjection {
        target: String,
        index: usize,
        type_name: String,
    },

    #[error("Injection slot {index} of {target} exceeds the limit of {limit}")]
    InjectionIndexOutOfRange {
        target: String,
        index: usize,
        limit: usize,
    },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Repeat schedules of {type_name} need a running Tokio runtime")]
    NoRuntime { type_name: String },
}

impl ConfigurationError {
    pub(crate) fn not_injectable(type_name: impl Into<String>) -> Self {
        Self::NotInjectable {
            type_name: type_name.into(),
        }
    }

    pub(crate) fn handler_not_found(
        controller: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self::HandlerNotFound {
            controller: controller.into(),
            handler: handler.into(),
        }
    }
}
