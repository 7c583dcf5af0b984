use super::markup::escape;
use super::{Callback, Component};

/// Which icon the toggle shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Sandwich,
    Close,
}

impl MenuIcon {
    pub fn src(&self) -> &'static str {
        match self {
            MenuIcon::Sandwich => "/img/sandw.png",
            MenuIcon::Close => "/img/close.png",
        }
    }
}

/// The hamburger button: a close icon while the menu is open, a sandwich otherwise.
#[derive(Clone)]
pub struct MenuToggle {
    pub is_modal_open: bool,
    on_click: Option<Callback>,
}

impl MenuToggle {
    pub fn new(is_modal_open: bool) -> Self {
        MenuToggle {
            is_modal_open,
            on_click: None,
        }
    }

    pub fn on_click(mut self, callback: Callback) -> Self {
        self.on_click = Some(callback);
        self
    }

    pub fn icon(&self) -> MenuIcon {
        if self.is_modal_open {
            MenuIcon::Close
        } else {
            MenuIcon::Sandwich
        }
    }

    pub fn click(&self) {
        if let Some(callback) = &self.on_click {
            callback();
        }
    }
}

impl Component for MenuToggle {
    fn render(&self) -> String {
        format!(
            r#"<button type="button" class="sandw"><img src="{}" alt="sandwich-close button"></button>"#,
            escape(self.icon().src())
        )
    }
}
