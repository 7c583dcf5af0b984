//! Presentational components.
//!
//! Components are plain view models: they hold props, render escaped HTML and
//! forward events to caller-supplied callbacks. None of them keep state of their
//! own; anything session related is read from a [`crate::session::Session`].

pub mod contact_card;
pub mod markup;
pub mod menu_toggle;
pub mod route_guard;
pub mod test_menu;

pub use contact_card::ContactCard;
pub use menu_toggle::{MenuIcon, MenuToggle};
pub use route_guard::{Guarded, RouteGuard};
pub use test_menu::{TestLink, TestMenu};

use std::sync::Arc;

/// Something that renders to HTML markup.
pub trait Component {
    fn render(&self) -> String;
}

/// Event handler passed down by the caller.
pub type Callback = Arc<dyn Fn() + Send + Sync>;
