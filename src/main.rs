use flexi_logger::Logger;
use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{window, Element, Length, Subscription, Task, Theme};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use image_input::binding::{BindingRegistry, ElementId, ImageBinding, InputBinding, BINDING_NAME};
use image_input::config::{ImageInputConfig, CONFIG_ENV_VAR};
use image_input::input::clipboard::read_clipboard;
use image_input::input::{ClipboardItem, PasteOutcome, SurfaceKey};
use image_input::state::FileHandle;
use image_input::ui::{self, window::DROP_COALESCE_MS, WindowDrop};

/// Characters of a data URL shown in the value summary
const DATA_URL_PREVIEW: usize = 32;

/// Demo host: mounts image inputs and shows their bound values
struct Demo {
    registry: BindingRegistry<ImageBinding>,
    /// Ids of elements whose value changed, fed by the change callbacks
    changes: mpsc::Receiver<ElementId>,
    values: BTreeMap<ElementId, String>,
    window_drop: WindowDrop,
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// A message for one image input
    Input(ElementId, ui::Message),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// The coalescing window of a multi-file drop closed
    FlushDrop,
    KeyPressed(Key, Modifiers),
    ClipboardRead(Vec<ClipboardItem>),
    /// User clicked an element's "Clear" button
    Clear(ElementId),
}

impl Demo {
    fn new() -> (Self, Task<Message>) {
        let mut binding = ImageBinding::new();
        for config in load_configs() {
            if let Err(err) = binding.mount(config) {
                log::error!("❌ {}", err);
            }
        }
        let scope = binding.scope();

        let mut registry = BindingRegistry::new();
        if let Err(err) = registry.register(binding, BINDING_NAME) {
            log::error!("❌ {}", err);
        }

        let (tx, changes) = mpsc::channel();
        match registry.bind_all(&scope, |id| {
            let tx = tx.clone();
            let id = id.clone();
            Box::new(move || {
                let _ = tx.send(id.clone());
            })
        }) {
            Ok(count) => log::info!("🎨 Image input demo ready with {} widget(s)", count),
            Err(err) => log::error!("❌ Failed to bind image inputs: {}", err),
        }

        (
            Demo {
                registry,
                changes,
                values: BTreeMap::new(),
                window_drop: WindowDrop::new(),
                status: "Drop, click or paste an image.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let Some(binding) = self.registry.get_mut(BINDING_NAME) else {
            return Task::none();
        };

        let task = match message {
            Message::Input(id, message) => route(binding, id, message),
            Message::FileHovered => match self.window_drop.hovered(binding.drag_target()) {
                Some(id) => route(binding, id, ui::Message::DragEntered),
                None => Task::none(),
            },
            Message::FilesHoveredLeft => match self.window_drop.left() {
                Some(id) => route(binding, id, ui::Message::DragLeft),
                None => Task::none(),
            },
            Message::FileDropped(path) => {
                if self.window_drop.dropped(path) {
                    let delay = Duration::from_millis(DROP_COALESCE_MS);
                    Task::perform(async move { tokio::time::sleep(delay).await }, |_| {
                        Message::FlushDrop
                    })
                } else {
                    Task::none()
                }
            }
            Message::FlushDrop => {
                let (target, paths) = self.window_drop.flush();
                match target.or_else(|| binding.drag_target()) {
                    Some(id) => {
                        let files = paths.into_iter().map(FileHandle::from_path).collect();
                        route(binding, id, ui::Message::Dropped(files))
                    }
                    None => {
                        log::info!("📂 Dropped {} file(s) with no image input to take them", paths.len());
                        Task::none()
                    }
                }
            }
            Message::KeyPressed(key, modifiers) => match key.as_ref() {
                Key::Named(Named::Tab) => {
                    binding.focus_next();
                    Task::none()
                }
                Key::Character("v") if modifiers.command() => {
                    Task::perform(read_clipboard(), Message::ClipboardRead)
                }
                Key::Named(Named::Enter) => focused_key(binding, SurfaceKey::Enter),
                Key::Named(Named::Space) => focused_key(binding, SurfaceKey::Space),
                _ => Task::none(),
            },
            Message::ClipboardRead(items) => match binding.dispatch_paste(&items) {
                PasteOutcome::Handled { target, file } => {
                    self.status = format!("Pasted {} into `{}`", file.name(), target);
                    route(binding, target, ui::Message::Pasted(file))
                }
                PasteOutcome::Ignored => {
                    log::debug!("Paste not taken by any image input");
                    Task::none()
                }
            },
            Message::Clear(id) => {
                if let Err(err) = binding.receive_message(&id, json!({ "value": null })) {
                    log::error!("❌ {}", err);
                }
                Task::none()
            }
        };

        self.drain_changes();
        task
    }

    /// Refresh the shown value of every element that reported a change
    fn drain_changes(&mut self) {
        while let Ok(id) = self.changes.try_recv() {
            let summary = match self.registry.get(BINDING_NAME).map(|binding| binding.get_value(&id)) {
                Some(Ok(value)) => summarize(&value),
                Some(Err(err)) => {
                    log::error!("❌ {}", err);
                    continue;
                }
                None => continue,
            };
            self.status = format!("`{}` changed", id);
            self.values.insert(id, summary);
        }
    }

    /// Listen for window-level file drags and keyboard shortcuts
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
                if matches!(status, event::Status::Ignored) =>
            {
                Some(Message::KeyPressed(key, modifiers))
            }
            _ => None,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut widgets: Column<Message> = column![].spacing(24);

        if let Some(binding) = self.registry.get(BINDING_NAME) {
            for input in binding.elements() {
                let id = input.id().clone();
                let value = self.values.get(&id).map(String::as_str).unwrap_or("null");

                let footer = row![
                    text(format!("{} = {}", id, value)).size(12).width(Length::Fill),
                    button("Clear").on_press(Message::Clear(id.clone())).padding(6),
                ]
                .spacing(8);

                let widget = input.view().map(move |message| Message::Input(id.clone(), message));
                widgets = widgets.push(column![widget, footer].spacing(8));
            }
        }

        let content = column![text("Image Input").size(32), widgets, text(&self.status).size(14)]
            .spacing(20)
            .padding(40);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Send a widget message and tag whatever it spawns with the element id
fn route(binding: &mut ImageBinding, id: ElementId, message: ui::Message) -> Task<Message> {
    binding
        .update(&id, message)
        .map(move |message| Message::Input(id.clone(), message))
}

fn focused_key(binding: &mut ImageBinding, key: SurfaceKey) -> Task<Message> {
    match binding.focused().cloned() {
        Some(id) => route(binding, id, ui::Message::Key(key)),
        None => Task::none(),
    }
}

/// Widgets from the file named by `IMAGE_INPUT_CONFIG`, or a single and a
/// multiple input
fn load_configs() -> Vec<ImageInputConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        match ImageInputConfig::list_from_file(Path::new(&path)) {
            Ok(configs) => {
                log::info!("⚙️  Loaded {} image input config(s) from {}", configs.len(), path);
                return configs;
            }
            Err(err) => log::error!("❌ {}; using the default widgets", err),
        }
    }

    vec![
        ImageInputConfig::new("avatar").label("Avatar"),
        ImageInputConfig::new("gallery").multiple(true).label("Gallery"),
    ]
}

/// Compact JSON of a bound value with data URLs shortened
fn summarize(value: &Value) -> String {
    let mut value = value.clone();
    shorten_data_urls(&mut value);
    value.to_string()
}

fn shorten_data_urls(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(shorten_data_urls),
        Value::Object(record) => {
            if let Some(Value::String(url)) = record.get_mut("dataURL") {
                if url.chars().count() > DATA_URL_PREVIEW {
                    *url = format!("{}…", url.chars().take(DATA_URL_PREVIEW).collect::<String>());
                }
            }
        }
        _ => {}
    }
}

fn main() -> iced::Result {
    let _logger = match Logger::try_with_env_or_str("info, iced=error, wgpu_hal=error, wgpu_core=error")
        .and_then(|logger| logger.start())
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {}", err);
            None
        }
    };

    iced::application("Image Input", Demo::update, Demo::view)
        .subscription(Demo::subscription)
        .theme(Demo::theme)
        .centered()
        .run_with(Demo::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_shortens_data_urls() {
        let url = format!("data:image/png;base64,{}", "A".repeat(100));
        let value = json!([{ "name": "a.png", "size": 1, "type": "image/png", "dataURL": url }]);

        let summary = summarize(&value);

        assert!(summary.contains("\"name\":\"a.png\""));
        assert!(summary.contains("data:image/png;base64,AAAAAAAAAA…"));
        assert!(!summary.contains(&"A".repeat(50)));
    }

    #[test]
    fn test_summarize_null() {
        assert_eq!(summarize(&Value::Null), "null");
    }

    #[test]
    fn test_default_configs() {
        std::env::remove_var(CONFIG_ENV_VAR);
        let configs = load_configs();
        assert_eq!(configs.len(), 2);
        assert!(!configs[0].multiple);
        assert!(configs[1].multiple);
    }
}
