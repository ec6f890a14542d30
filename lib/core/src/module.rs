use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (cms today, more later) implements this trait to
/// register its API endpoints. The server binary collects all modules and
/// nests each one's routes under `/{name}`.
pub trait Module: Send + Sync {
    /// Module name, used for logging and as the route prefix.
    fn name(&self) -> &str;

    /// The module's routes, ready to be nested under `/{name}`.
    fn routes(&self) -> Router;
}
