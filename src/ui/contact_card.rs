use std::fmt;

use super::markup::escape;
use super::{Callback, Component};

pub const PHOTO_WIDTH: u32 = 244;
pub const PHOTO_HEIGHT: u32 = 280;

/// A team member card: photo, name and role, linking out to their profile.
#[derive(Clone)]
pub struct ContactCard {
    pub name: String,
    pub url: String,
    pub photo: String,
    pub role: String,
    on_load: Option<Callback>,
}

impl ContactCard {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        photo: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        ContactCard {
            name: name.into(),
            url: url.into(),
            photo: photo.into(),
            role: role.into(),
            on_load: None,
        }
    }

    /// Callback fired once the photo has loaded.
    pub fn on_load(mut self, callback: Callback) -> Self {
        self.on_load = Some(callback);
        self
    }

    /// Called by the host when the `<img>` reports it has loaded.
    pub fn photo_loaded(&self) {
        if let Some(callback) = &self.on_load {
            callback();
        }
    }
}

impl fmt::Debug for ContactCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactCard")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("photo", &self.photo)
            .field("role", &self.role)
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}

impl Component for ContactCard {
    fn render(&self) -> String {
        format!(
            concat!(
                r#"<a class="contact-link" target="_blank" rel="noreferrer" href="{url}">"#,
                r#"<picture><img class="contact-photo" src="{photo}" alt="{name}" width="{width}px" height="{height}px"></picture>"#,
                r#"<div class="contact-info">"#,
                r#"<span class="contact-name">{name}</span>"#,
                r#"<span class="contact-role">{role}</span>"#,
                r#"</div></a>"#
            ),
            url = escape(&self.url),
            photo = escape(&self.photo),
            name = escape(&self.name),
            role = escape(&self.role),
            width = PHOTO_WIDTH,
            height = PHOTO_HEIGHT,
        )
    }
}
