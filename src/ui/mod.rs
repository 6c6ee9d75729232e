/// View modules
///
/// Pure view logic over the catalog data:
/// - Public gallery screen with category filter and detail pane (gallery.rs)
/// - Admin screen with ordering table and record form (admin.rs)

pub mod admin;
pub mod gallery;

use iced::widget::{container, image, text};
use iced::{Element, Length};

use crate::Message;

/// Show the artwork's thumbnail if its image is stored inline, otherwise a
/// placeholder (seed records reference remote URLs we never fetch).
pub(crate) fn artwork_thumb(
    handle: Option<&image::Handle>,
    size: f32,
) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        None => container(text("绣").size(size * 0.4))
            .style(container::bordered_box)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    }
}
