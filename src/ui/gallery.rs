use std::collections::HashMap;

use iced::widget::{button, column, container, image, row, scrollable, text, Column};
use iced::{Element, Length};

use super::artwork_thumb;
use crate::state::data::{Artwork, Category};
use crate::Message;

/// Build the public gallery screen: filter bar + card list, or the detail
/// pane when a piece is selected.
pub fn view<'a>(
    artworks: &'a [Artwork],
    filter: Option<Category>,
    selected: Option<&'a Artwork>,
    thumbs: &HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    if let Some(artwork) = selected {
        return detail(artwork, thumbs.get(&artwork.id));
    }

    let filtered: Vec<&Artwork> = artworks
        .iter()
        .filter(|a| filter.map_or(true, |c| a.category == c))
        .collect();

    let mut cards: Column<'a, Message> = column![].spacing(12);
    for artwork in filtered {
        cards = cards.push(card(artwork, thumbs.get(&artwork.id)));
    }

    column![
        text("数字化展览").size(28),
        text(format!("针尖上的湖湘韵律 · 馆藏 {} 件", artworks.len())).size(14),
        filter_bar(filter),
        scrollable(cards).height(Length::Fill),
    ]
    .spacing(16)
    .padding(24)
    .into()
}

/// "全部" plus one button per category
fn filter_bar<'a>(filter: Option<Category>) -> Element<'a, Message> {
    let mut bar = row![filter_button("全部", filter.is_none(), None)].spacing(8);
    for category in Category::ALL {
        bar = bar.push(filter_button(
            category.label(),
            filter == Some(category),
            Some(category),
        ));
    }
    bar.into()
}

fn filter_button<'a>(
    label: &'a str,
    active: bool,
    target: Option<Category>,
) -> Element<'a, Message> {
    let style: fn(&iced::Theme, button::Status) -> button::Style = if active {
        button::primary
    } else {
        button::secondary
    };
    button(text(label).size(14))
        .style(style)
        .padding([6.0, 14.0])
        .on_press(Message::FilterSelected(target))
        .into()
}

/// One clickable card in the gallery list
fn card<'a>(artwork: &'a Artwork, thumb: Option<&image::Handle>) -> Element<'a, Message> {
    let info = column![
        text(&artwork.title).size(18),
        text(format!("{} · {}", artwork.category, artwork.needlework)).size(13),
    ]
    .spacing(4);

    button(row![artwork_thumb(thumb, 72.0), info].spacing(16))
        .style(button::text)
        .on_press(Message::ArtworkSelected(artwork.id.clone()))
        .width(Length::Fill)
        .into()
}

/// Full detail pane for a single piece
fn detail<'a>(artwork: &'a Artwork, thumb: Option<&image::Handle>) -> Element<'a, Message> {
    let content = column![
        artwork_thumb(thumb, 320.0),
        text(&artwork.title).size(32),
        text(format!("分类：{}", artwork.category)).size(15),
        text(format!("针法：{}", artwork.needlework)).size(15),
        text(&artwork.description).size(15),
        button("返回展览").on_press(Message::DetailClosed).padding(10),
    ]
    .spacing(14)
    .padding(24)
    .max_width(720);

    container(scrollable(content))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}
