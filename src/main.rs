use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_rule, horizontal_space, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;

mod analysis;
mod state;
mod ui;

use analysis::{classifier, resize};
use state::catalog::Catalog;
use state::data::{AnalysisResult, Artwork, Category};
use state::ordering::{move_item, MoveDirection};
use ui::admin::ArtworkForm;

/// Which top-level screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Gallery,
    Admin,
}

/// Main application state
struct SilkGallery {
    /// The catalog database
    catalog: Catalog,
    screen: Screen,
    /// All records, sorted by display rank; reloaded after every write
    artworks: Vec<Artwork>,
    /// Decoded thumbnails for records with inline image data, keyed by id
    thumbs: HashMap<String, Handle>,
    /// Gallery category filter (None = all)
    filter: Option<Category>,
    /// Id of the piece open in the gallery detail pane
    selected: Option<String>,
    /// Open create/edit form, if any
    form: Option<ArtworkForm>,
    /// Preview of the form's uploaded image
    form_thumb: Option<Handle>,
    /// A classifier call is in flight
    analyzing: bool,
    /// Classifier API key; analysis is skipped when unset
    api_key: Option<String>,
    /// Status message to display to the user
    status: String,
    /// Set when the catalog could not be read; replaces the screen body
    load_error: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    ScreenSelected(Screen),
    FilterSelected(Option<Category>),
    ArtworkSelected(String),
    DetailClosed,
    /// Open the form: None = new record, Some(id) = edit
    FormOpened(Option<String>),
    FormCancelled,
    FormTitleChanged(String),
    FormCategorySelected(Category),
    FormDescriptionChanged(String),
    FormNeedleworkChanged(String),
    /// User asked to pick an image file for the open form
    ImagePicked,
    /// Background classifier call finished
    AnalysisFinished(Result<AnalysisResult, String>),
    FormSubmitted,
    ArtworkDeleted(String),
    ArtworkMoved(usize, MoveDirection),
    CatalogReset,
}

impl SilkGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // If this fails, we panic because the app cannot function without
        // its database
        let catalog = Catalog::new()
            .expect("Failed to open catalog database. Check permissions and disk space.");

        let api_key = std::env::var("GEMINI_API_KEY").ok();
        if api_key.is_none() {
            println!("ℹ️  GEMINI_API_KEY not set; AI auto-fill is disabled");
        }

        let mut app = SilkGallery {
            catalog,
            screen: Screen::Gallery,
            artworks: Vec::new(),
            thumbs: HashMap::new(),
            filter: None,
            selected: None,
            form: None,
            form_thumb: None,
            analyzing: false,
            api_key,
            status: String::new(),
            load_error: None,
        };
        app.refresh();
        app.status = format!("就绪，当前馆藏 {} 件作品。", app.artworks.len());

        (app, Task::none())
    }

    /// Reload all records from the catalog.
    /// A read failure replaces the screen with a load-failure message.
    fn refresh(&mut self) {
        match self.catalog.get_all() {
            Ok(artworks) => {
                self.thumbs = build_thumbs(&artworks);
                self.artworks = artworks;
                self.load_error = None;
            }
            Err(e) => {
                eprintln!("❌ Failed to load catalog: {}", e);
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ScreenSelected(screen) => {
                self.screen = screen;
                self.selected = None;
                Task::none()
            }
            Message::FilterSelected(filter) => {
                self.filter = filter;
                Task::none()
            }
            Message::ArtworkSelected(id) => {
                self.selected = Some(id);
                Task::none()
            }
            Message::DetailClosed => {
                self.selected = None;
                Task::none()
            }
            Message::FormOpened(id) => {
                match id {
                    None => {
                        self.form = Some(ArtworkForm::new());
                        self.form_thumb = None;
                    }
                    Some(id) => {
                        if let Some(artwork) = self.artworks.iter().find(|a| a.id == id) {
                            self.form = Some(ArtworkForm::edit(artwork));
                            self.form_thumb = self.thumbs.get(&id).cloned();
                        }
                    }
                }
                Task::none()
            }
            Message::FormCancelled => {
                self.form = None;
                self.form_thumb = None;
                self.analyzing = false;
                Task::none()
            }
            Message::FormTitleChanged(title) => {
                if let Some(form) = &mut self.form {
                    form.title = title;
                }
                Task::none()
            }
            Message::FormCategorySelected(category) => {
                if let Some(form) = &mut self.form {
                    form.category = category;
                }
                Task::none()
            }
            Message::FormDescriptionChanged(description) => {
                if let Some(form) = &mut self.form {
                    form.description = description;
                }
                Task::none()
            }
            Message::FormNeedleworkChanged(needlework) => {
                if let Some(form) = &mut self.form {
                    form.needlework = needlework;
                }
                Task::none()
            }
            Message::ImagePicked => self.pick_image(),
            Message::AnalysisFinished(result) => {
                self.analyzing = false;
                match result {
                    Ok(proposal) => {
                        if let Some(form) = &mut self.form {
                            form.apply_analysis(&proposal);
                            self.status =
                                "✨ AI 已自动填充作品信息，可手动修改后保存。".to_string();
                        }
                    }
                    Err(e) => {
                        // Advisory only: keep whatever the user already typed
                        eprintln!("⚠️  AI analysis failed: {}", e);
                        self.status = "⚠️ AI 分析失败，请手动填写作品信息。".to_string();
                    }
                }
                Task::none()
            }
            Message::FormSubmitted => {
                self.submit_form();
                Task::none()
            }
            Message::ArtworkDeleted(id) => {
                if confirm("确定要从数字化档案中移除这件作品吗？此操作不可撤销。") {
                    match self.catalog.delete(&id) {
                        Ok(()) => {
                            self.status = "🗑️ 作品已从档案库移除。".to_string();
                            self.refresh();
                        }
                        Err(e) => {
                            eprintln!("⚠️  Delete failed: {}", e);
                            self.status = "⚠️ 删除失败，请稍后重试。".to_string();
                        }
                    }
                }
                Task::none()
            }
            Message::ArtworkMoved(index, direction) => {
                let mut items = self.artworks.clone();
                if move_item(&mut items, index, direction) {
                    match self.catalog.reorder(&items) {
                        Ok(()) => self.refresh(),
                        Err(e) => {
                            eprintln!("⚠️  Reorder failed: {}", e);
                            self.status = "⚠️ 调整顺序失败，请稍后重试。".to_string();
                        }
                    }
                }
                Task::none()
            }
            Message::CatalogReset => {
                if confirm("警告：这将删除所有已录入的数据并恢复到初始示例状态！确定继续吗？") {
                    match self.catalog.reset_all() {
                        Ok(()) => {
                            self.refresh();
                            self.status = "♻️ 数据库已重置为初始状态。".to_string();
                        }
                        Err(e) => {
                            eprintln!("⚠️  Reset failed: {}", e);
                            self.status = "⚠️ 重置失败，请稍后重试。".to_string();
                        }
                    }
                }
                Task::none()
            }
        }
    }

    /// Pick an image file, compress it into the form, and kick off the
    /// advisory classifier call when an API key is configured.
    fn pick_image(&mut self) -> Task<Message> {
        if self.form.is_none() {
            return Task::none();
        }

        let file = FileDialog::new()
            .set_title("选择作品图片")
            .add_filter("图片", &["jpg", "jpeg", "png", "webp"])
            .pick_file();
        let Some(path) = file else {
            return Task::none();
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.status = format!("⚠️ 无法读取文件: {}", e);
                return Task::none();
            }
        };

        let jpeg = match resize::compress_upload(&bytes) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                self.status = format!("⚠️ 图片无法识别: {}", e);
                return Task::none();
            }
        };

        let data_uri = resize::to_data_uri(&jpeg);
        let payload = resize::data_uri_payload(&data_uri)
            .unwrap_or_default()
            .to_string();
        if let Some(form) = &mut self.form {
            form.image_url = data_uri;
        }
        self.form_thumb = Some(Handle::from_bytes(jpeg));

        match self.api_key.clone() {
            Some(api_key) => {
                self.analyzing = true;
                self.status = "🔎 AI 正在分析图片…".to_string();
                Task::perform(
                    async move {
                        classifier::analyze_image(payload, api_key)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::AnalysisFinished,
                )
            }
            None => {
                self.status = "ℹ️ 未设置 GEMINI_API_KEY，已跳过 AI 分析。".to_string();
                Task::none()
            }
        }
    }

    /// Validate and persist the open form
    fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        if let Some(reason) = form.validation_error() {
            self.status = format!("⚠️ {}", reason);
            return;
        }

        let is_edit = form.id.is_some();
        let artwork = form.to_artwork(self.artworks.len() as i64 + 1);
        let result = if is_edit {
            self.catalog.update(&artwork)
        } else {
            self.catalog.add(&artwork)
        };

        match result {
            Ok(()) => {
                self.status = if is_edit {
                    "✅ 作品更新成功。".to_string()
                } else {
                    "✅ 新作品已录入馆藏。".to_string()
                };
                self.form = None;
                self.form_thumb = None;
                self.refresh();
            }
            Err(e) => {
                eprintln!("⚠️  Save failed: {}", e);
                self.status = format!("⚠️ {}", e);
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let nav = row![
            text("湘绣数字展馆").size(22),
            horizontal_space(),
            nav_button("展馆", self.screen == Screen::Gallery, Screen::Gallery),
            nav_button("管理", self.screen == Screen::Admin, Screen::Admin),
        ]
        .spacing(10)
        .padding(14)
        .align_y(Alignment::Center);

        let body: Element<Message> = match &self.load_error {
            Some(error) => container(
                column![text("加载数据失败").size(28), text(error).size(14)]
                    .spacing(10)
                    .align_x(Alignment::Center),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
            None => match self.screen {
                Screen::Gallery => {
                    let selected = self
                        .selected
                        .as_ref()
                        .and_then(|id| self.artworks.iter().find(|a| a.id == *id));
                    ui::gallery::view(&self.artworks, self.filter, selected, &self.thumbs)
                }
                Screen::Admin => ui::admin::view(
                    &self.artworks,
                    self.form.as_ref(),
                    self.form_thumb.as_ref(),
                    self.analyzing,
                    &self.thumbs,
                ),
            },
        };

        column![
            nav,
            horizontal_rule(1),
            container(body).height(Length::Fill),
            horizontal_rule(1),
            text(&self.status).size(13),
        ]
        .padding(6)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn nav_button(label: &str, active: bool, target: Screen) -> Element<'_, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if active {
        button::primary
    } else {
        button::secondary
    };
    button(text(label).size(15))
        .style(style)
        .padding([6.0, 16.0])
        .on_press(Message::ScreenSelected(target))
        .into()
}

/// Decode inline data URIs into image handles, keyed by record id.
/// Seed records point at remote URLs and simply get no thumbnail.
fn build_thumbs(artworks: &[Artwork]) -> HashMap<String, Handle> {
    artworks
        .iter()
        .filter_map(|a| {
            resize::data_uri_bytes(&a.image_url)
                .map(|bytes| (a.id.clone(), Handle::from_bytes(bytes)))
        })
        .collect()
}

/// Native blocking confirmation dialog (destructive actions only)
fn confirm(description: &str) -> bool {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("湘绣数字展馆")
        .set_description(description)
        .set_buttons(rfd::MessageButtons::OkCancel)
        .show()
        == rfd::MessageDialogResult::Ok
}

fn main() -> iced::Result {
    iced::application(
        "湘绣数字展馆 — Silk Gallery",
        SilkGallery::update,
        SilkGallery::view,
    )
    .theme(SilkGallery::theme)
    .centered()
    .run_with(SilkGallery::new)
}
