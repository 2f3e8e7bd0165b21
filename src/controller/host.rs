use crate::controller::{BoundHandler, BoxFuture, HttpMethod};
use axum::{Router, body::Body, http::Request, response::Response, routing};

/// Per-method route registration surface of an HTTP framework.
pub trait RoutingHost {
    fn get(&mut self, path: &str, handler: BoundHandler);

    fn post(&mut self, path: &str, handler: BoundHandler);

    fn put(&mut self, path: &str, handler: BoundHandler);

    fn delete(&mut self, path: &str, handler: BoundHandler);

    fn patch(&mut self, path: &str, handler: BoundHandler);

    fn register(&mut self, method: HttpMethod, path: &str, handler: BoundHandler) {
        match method {
            HttpMethod::Get => self.get(path, handler),
            HttpMethod::Post => self.post(path, handler),
            HttpMethod::Put => self.put(path, handler),
            HttpMethod::Delete => self.delete(path, handler),
            HttpMethod::Patch => self.patch(path, handler),
        }
    }
}

fn handler_fn(
    handler: BoundHandler,
) -> impl Fn(Request<Body>) -> BoxFuture<Response> + Clone + Send + Sync + 'static {
    move |request: Request<Body>| handler(request)
}

impl<S> RoutingHost for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn get(&mut self, path: &str, handler: BoundHandler) {
        let router = std::mem::take(self);
        *self = router.route(path, routing::get(handler_fn(handler)));
    }

    fn post(&mut self, path: &str, handler: BoundHandler) {
        let router = std::mem::take(self);
        *self = router.route(path, routing::post(handler_fn(handler)));
    }

    fn put(&mut self, path: &str, handler: BoundHandler) {
        let router = std::mem::take(self);
        *self = router.route(path, routing::put(handler_fn(handler)));
    }

    fn delete(&mut self, path: &str, handler: BoundHandler) {
        let router = std::mem::take(self);
        *self = router.route(path, routing::delete(handler_fn(handler)));
    }

    fn patch(&mut self, path: &str, handler: BoundHandler) {
        let router = std::mem::take(self);
        *self = router.route(path, routing::patch(handler_fn(handler)));
    }
}
