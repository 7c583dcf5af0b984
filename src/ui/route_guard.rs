use crate::config::RoutesConfig;
use crate::session::Session;

/// Outcome of guarding a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Render(T),
    Redirect(String),
}

/// Renders its children only for a logged-in session; everyone else is sent to
/// `redirect_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    redirect_to: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        RouteGuard::new("/")
    }
}

impl RouteGuard {
    pub fn new(redirect_to: impl Into<String>) -> Self {
        RouteGuard {
            redirect_to: redirect_to.into(),
        }
    }

    pub fn from_config(config: &RoutesConfig) -> Self {
        RouteGuard::new(config.redirect_to.clone())
    }

    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    pub fn resolve<T>(&self, session: &Session, children: T) -> Guarded<T> {
        self.resolve_with(session, || children)
    }

    /// Like [`RouteGuard::resolve`], but only builds the children when they will be shown.
    pub fn resolve_with<T>(&self, session: &Session, children: impl FnOnce() -> T) -> Guarded<T> {
        if session.is_logged_in {
            Guarded::Render(children())
        } else {
            Guarded::Redirect(self.redirect_to.clone())
        }
    }
}
