use std::collections::HashMap;

use chrono::Utc;
use iced::widget::{
    button, column, container, image, pick_list, row, scrollable, text, text_input, Column,
};
use iced::{Alignment, Element, Length};
use uuid::Uuid;

use super::artwork_thumb;
use crate::state::data::{AnalysisResult, Artwork, Category};
use crate::state::ordering::MoveDirection;
use crate::Message;

/// Draft state of the create/edit form.
///
/// `id` is None for a new record; edit keeps the original id, rank, and
/// creation timestamp so only the editable fields change on save.
#[derive(Debug, Clone, Default)]
pub struct ArtworkForm {
    pub id: Option<String>,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub needlework: String,
    pub image_url: String,
    pub display_order: i64,
    pub created_at: i64,
}

impl ArtworkForm {
    /// Blank form for a new record
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing record
    pub fn edit(artwork: &Artwork) -> Self {
        Self {
            id: Some(artwork.id.clone()),
            title: artwork.title.clone(),
            category: artwork.category,
            description: artwork.description.clone(),
            needlework: artwork.needlework.clone(),
            image_url: artwork.image_url.clone(),
            display_order: artwork.display_order,
            created_at: artwork.created_at,
        }
    }

    /// Overwrite the metadata fields with the classifier's proposal.
    /// The image itself and the record identity are untouched.
    pub fn apply_analysis(&mut self, result: &AnalysisResult) {
        self.title = result.title.clone();
        self.category = result.category;
        self.description = result.description.clone();
        self.needlework = result.needlework.clone();
    }

    /// The reason this form cannot be submitted yet, if any
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.image_url.is_empty() {
            Some("请先上传作品图片")
        } else if self.title.trim().is_empty() {
            Some("请输入作品名称")
        } else {
            None
        }
    }

    /// Materialize the form into a record. New records get a fresh id,
    /// the next free rank, and a current timestamp.
    pub fn to_artwork(&self, next_rank: i64) -> Artwork {
        match &self.id {
            Some(id) => Artwork {
                id: id.clone(),
                title: self.title.clone(),
                image_url: self.image_url.clone(),
                category: self.category,
                description: self.description.clone(),
                needlework: self.needlework.clone(),
                display_order: self.display_order,
                created_at: self.created_at,
            },
            None => Artwork {
                id: format!("manual_{}", Uuid::new_v4().simple()),
                title: self.title.clone(),
                image_url: self.image_url.clone(),
                category: self.category,
                description: self.description.clone(),
                needlework: self.needlework.clone(),
                display_order: next_rank,
                created_at: Utc::now().timestamp_millis(),
            },
        }
    }
}

/// Build the admin screen: the record table, or the form when one is open
pub fn view<'a>(
    artworks: &'a [Artwork],
    form: Option<&'a ArtworkForm>,
    form_thumb: Option<&image::Handle>,
    analyzing: bool,
    thumbs: &HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    match form {
        Some(form) => form_view(form, form_thumb, analyzing),
        None => table_view(artworks, thumbs),
    }
}

fn table_view<'a>(
    artworks: &'a [Artwork],
    thumbs: &HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    let header = row![
        column![
            text("数字化遗产管理").size(28),
            text(format!("当前馆藏共计 {} 件艺术珍品", artworks.len())).size(14),
        ]
        .spacing(4)
        .width(Length::Fill),
        button("录入新作品")
            .on_press(Message::FormOpened(None))
            .padding(10),
        button("重置数据库")
            .style(button::danger)
            .on_press(Message::CatalogReset)
            .padding(10),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut rows: Column<'a, Message> = column![].spacing(8);
    let last = artworks.len().saturating_sub(1);
    for (i, artwork) in artworks.iter().enumerate() {
        rows = rows.push(table_row(i, last, artwork, thumbs.get(&artwork.id)));
    }

    column![header, scrollable(rows).height(Length::Fill)]
        .spacing(16)
        .padding(24)
        .into()
}

fn table_row<'a>(
    index: usize,
    last: usize,
    artwork: &'a Artwork,
    thumb: Option<&image::Handle>,
) -> Element<'a, Message> {
    let up = (index > 0).then(|| Message::ArtworkMoved(index, MoveDirection::Up));
    let down = (index < last).then(|| Message::ArtworkMoved(index, MoveDirection::Down));

    row![
        text(format!("{}", artwork.display_order)).width(Length::Fixed(32.0)),
        artwork_thumb(thumb, 48.0),
        column![
            text(&artwork.title).size(16),
            text(artwork.category.label()).size(12),
        ]
        .spacing(2)
        .width(Length::Fill),
        button("↑").on_press_maybe(up),
        button("↓").on_press_maybe(down),
        button("编辑").on_press(Message::FormOpened(Some(artwork.id.clone()))),
        button("删除")
            .style(button::danger)
            .on_press(Message::ArtworkDeleted(artwork.id.clone())),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn form_view<'a>(
    form: &'a ArtworkForm,
    form_thumb: Option<&image::Handle>,
    analyzing: bool,
) -> Element<'a, Message> {
    let heading = if form.id.is_some() {
        "编辑艺术珍品"
    } else {
        "录入新作品"
    };

    let image_area = column![
        artwork_thumb(form_thumb, 200.0),
        button("上传图片").on_press(Message::ImagePicked).padding(8),
        if analyzing {
            text("AI 正在分析图片…").size(13)
        } else {
            text("上传后将自动进行 AI 识别").size(13)
        },
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let fields = column![
        field("作品名称", &form.title, Message::FormTitleChanged),
        row![
            text("所属分类").width(Length::Fixed(80.0)),
            pick_list(
                &Category::ALL[..],
                Some(form.category),
                Message::FormCategorySelected,
            )
            .width(Length::Fill),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        field("湘绣针法", &form.needlework, Message::FormNeedleworkChanged),
        field("作品简述", &form.description, Message::FormDescriptionChanged),
    ]
    .spacing(10)
    .width(Length::Fill);

    let actions = row![
        button("保存档案").on_press(Message::FormSubmitted).padding(10),
        button("取消").on_press(Message::FormCancelled).padding(10),
    ]
    .spacing(12);

    let content = column![
        text(heading).size(28),
        row![image_area, fields].spacing(24),
        actions,
    ]
    .spacing(20)
    .padding(24)
    .max_width(860);

    container(scrollable(content))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

fn field<'a>(
    label: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).width(Length::Fixed(80.0)),
        text_input("", value).on_input(on_input).width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            title: "荷塘清趣".to_string(),
            category: Category::FlowersBirds,
            description: "夏日荷塘".to_string(),
            needlework: "掺针、齐针".to_string(),
        }
    }

    #[test]
    fn test_blank_form_requires_image_then_title() {
        let mut form = ArtworkForm::new();
        assert_eq!(form.validation_error(), Some("请先上传作品图片"));

        form.image_url = "data:image/jpeg;base64,AAAA".to_string();
        assert_eq!(form.validation_error(), Some("请输入作品名称"));

        form.title = "下山虎".to_string();
        assert_eq!(form.validation_error(), None);
    }

    #[test]
    fn test_apply_analysis_keeps_image() {
        let mut form = ArtworkForm::new();
        form.image_url = "data:image/jpeg;base64,AAAA".to_string();

        form.apply_analysis(&analysis());

        assert_eq!(form.title, "荷塘清趣");
        assert_eq!(form.category, Category::FlowersBirds);
        assert_eq!(form.image_url, "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn test_new_record_gets_fresh_identity() {
        let mut form = ArtworkForm::new();
        form.title = "新作".to_string();
        form.image_url = "data:image/jpeg;base64,AAAA".to_string();

        let artwork = form.to_artwork(5);

        assert!(artwork.id.starts_with("manual_"));
        assert_eq!(artwork.display_order, 5);
        assert!(artwork.created_at > 1_700_000_000_000);
    }

    #[test]
    fn test_edit_preserves_identity_and_rank() {
        let original = Artwork {
            id: "real_asset_cat".to_string(),
            title: "湘绣：猫".to_string(),
            image_url: "https://example.com/cat.jpg".to_string(),
            category: Category::Animals,
            description: "猫".to_string(),
            needlework: "掺针".to_string(),
            display_order: 4,
            created_at: 1_700_000_000_003,
        };

        let mut form = ArtworkForm::edit(&original);
        form.title = "灵猫".to_string();
        let artwork = form.to_artwork(99);

        assert_eq!(artwork.id, "real_asset_cat");
        assert_eq!(artwork.display_order, 4);
        assert_eq!(artwork.created_at, 1_700_000_000_003);
        assert_eq!(artwork.title, "灵猫");
    }
}
