use iced::Task;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::binding::ElementId;
use crate::config::ImageInputConfig;
use crate::error::InputError;
use crate::input::{
    decode_batch, validate, BatchCounter, BatchSeq, DragState, InputSurface, PasteGuard,
    SurfaceEffect, SurfaceEvent, SurfaceKey,
};
use crate::state::{ChangeListener, FileHandle, ImageRecord, ThumbnailStore, WidgetState};

/// Class every image input element carries, used by discovery
pub const MARKER_CLASS: &str = "image-input";

/// Widget messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The surface was clicked
    SurfacePressed,
    /// The cursor entered or left the surface
    SurfaceHovered(bool),
    /// A key was pressed while the surface had focus
    Key(SurfaceKey),
    DragEntered,
    DragMoved,
    DragLeft,
    /// Files were dropped on the surface
    Dropped(Vec<FileHandle>),
    /// The file picker closed (empty if cancelled)
    Picked(Vec<PathBuf>),
    /// An image was pasted into this widget
    Pasted(FileHandle),
    /// A decode batch finished
    Decoded(BatchSeq, Result<Vec<ImageRecord>, InputError>),
    /// A thumbnail's remove button was pressed
    RemoveThumbnail(usize),
    /// The error message with this id timed out
    DismissError(u64),
}

/// Transient inline error
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMessage {
    pub id: u64,
    pub text: String,
}

/// One image input element
#[derive(Debug)]
pub struct ImageInput {
    id: ElementId,
    config: ImageInputConfig,
    store: ThumbnailStore,
    surface: InputSurface,
    batches: BatchCounter,
    pending: Option<BatchSeq>,
    error: Option<ErrorMessage>,
    next_error_id: u64,
    initialized: bool,
    drag_active: bool,
    picker_open: bool,
    focused: bool,
    hovered: bool,
    visible: bool,
}

impl ImageInput {
    pub fn new(config: ImageInputConfig) -> Self {
        ImageInput {
            id: ElementId::from(config.id.as_str()),
            store: ThumbnailStore::new(config.multiple),
            config,
            surface: InputSurface::new(),
            batches: BatchCounter::default(),
            pending: None,
            error: None,
            next_error_id: 0,
            initialized: false,
            drag_active: false,
            picker_open: false,
            focused: false,
            hovered: false,
            visible: true,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn config(&self) -> &ImageInputConfig {
        &self.config
    }

    pub fn classes(&self) -> [&'static str; 1] {
        [MARKER_CLASS]
    }

    pub fn state(&self) -> &WidgetState {
        self.store.state()
    }

    pub fn store(&self) -> &ThumbnailStore {
        &self.store
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        self.error.as_ref()
    }

    pub fn pending_batch(&self) -> Option<BatchSeq> {
        self.pending
    }

    pub fn drag_state(&self) -> DragState {
        self.surface.drag_state()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// A file picker opened by this input has not closed yet
    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Start handling surface events. Returns false if already initialized.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        log::info!("🖼️  Initialized image input `{}` (multiple: {})", self.id, self.config.multiple);
        true
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The drop/click surface is shown only while no thumbnails are
    pub fn surface_visible(&self) -> bool {
        self.visible && !self.store.shows_thumbnails()
    }

    /// Force the widget to a value given by the host
    pub fn set_value(&mut self, value: Value) -> Result<(), serde_json::Error> {
        let state = WidgetState::from_value(value, self.config.multiple)?;
        self.store.replace(state);
        Ok(())
    }

    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.store.subscribe(listener);
    }

    pub fn unsubscribe(&mut self) {
        self.store.unsubscribe();
    }

    /// Handle a widget message and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Decoded(seq, result) => self.finish_batch(seq, result),
            Message::DismissError(id) => {
                // Only the message this timer was started for
                if self.error.as_ref().is_some_and(|e| e.id == id) {
                    self.error = None;
                }
                Task::none()
            }
            Message::RemoveThumbnail(index) => {
                self.store.remove_at(index);
                Task::none()
            }
            Message::SurfaceHovered(hovered) => {
                self.hovered = hovered;
                Task::none()
            }
            // Surface handlers are only live after initialize
            _ if !self.initialized => Task::none(),
            Message::SurfacePressed => {
                self.focused = true;
                self.handle_surface(SurfaceEvent::Click)
            }
            Message::Key(key) => {
                // The keyboard only reaches the surface while it is shown
                if !self.focused || !self.surface_visible() {
                    return Task::none();
                }
                self.handle_surface(SurfaceEvent::KeyDown(key))
            }
            Message::DragEntered => self.handle_surface(SurfaceEvent::DragEnter),
            Message::DragMoved => self.handle_surface(SurfaceEvent::DragOver),
            Message::DragLeft => self.handle_surface(SurfaceEvent::DragLeave),
            Message::Dropped(files) => self.handle_surface(SurfaceEvent::Drop(files)),
            Message::Picked(paths) => {
                self.picker_open = false;
                let files = paths.into_iter().map(FileHandle::from_path).collect();
                self.start_batch(files)
            }
            Message::Pasted(file) => self.start_batch(vec![file]),
        }
    }

    fn handle_surface(&mut self, event: SurfaceEvent) -> Task<Message> {
        let effects = self.surface.handle(event);

        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                // iced has no default drop or key handling to suppress
                SurfaceEffect::PreventDefault => {}
                SurfaceEffect::AddDragClass => self.drag_active = true,
                SurfaceEffect::RemoveDragClass => self.drag_active = false,
                SurfaceEffect::OpenPicker => tasks.push(self.open_picker()),
                SurfaceEffect::Forward(files) => tasks.push(self.start_batch(files)),
            }
        }
        Task::batch(tasks)
    }

    /// Show the native file dialog; its `multiple` mode follows the config
    fn open_picker(&mut self) -> Task<Message> {
        if self.picker_open {
            return Task::none();
        }
        self.picker_open = true;

        let multiple = self.config.multiple;
        let accept = self.config.accept.clone();
        let title = if multiple { "Select Images" } else { "Select an Image" };

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new().set_title(title);
                if !accept.is_empty() {
                    dialog = dialog.add_filter("Images", accept.as_slice());
                }

                if multiple {
                    dialog
                        .pick_files()
                        .await
                        .map(|files| files.iter().map(|f| f.path().to_path_buf()).collect())
                        .unwrap_or_default()
                } else {
                    dialog
                        .pick_file()
                        .await
                        .map(|file| vec![file.path().to_path_buf()])
                        .unwrap_or_default()
                }
            },
            Message::Picked,
        )
    }

    /// Validate a batch and start decoding it in the background
    fn start_batch(&mut self, files: Vec<FileHandle>) -> Task<Message> {
        if files.is_empty() {
            return Task::none();
        }

        match validate(files, self.config.multiple) {
            Ok(images) => {
                let seq = self.batches.start();
                self.pending = Some(seq);
                log::info!("📂 `{}`: decoding {} image(s)", self.id, images.len());

                Task::perform(decode_batch(images), move |result| Message::Decoded(seq, result))
            }
            Err(err) => {
                log::info!("🚫 `{}`: rejected selection: {}", self.id, err);
                self.show_error(err)
            }
        }
    }

    fn finish_batch(&mut self, seq: BatchSeq, result: Result<Vec<ImageRecord>, InputError>) -> Task<Message> {
        if !self.batches.is_current(seq) {
            log::debug!("`{}`: discarding stale batch {:?}", self.id, seq);
            return Task::none();
        }
        self.pending = None;

        match result {
            Ok(records) => {
                self.store.set_all(records);
                Task::none()
            }
            Err(err) => {
                if let InputError::Decode { name, reason } = &err {
                    log::error!("❌ `{}`: image processing error for {}: {}", self.id, name, reason);
                }
                self.show_error(err)
            }
        }
    }

    /// Replace the inline error and schedule its dismissal
    fn show_error(&mut self, err: InputError) -> Task<Message> {
        self.next_error_id += 1;
        let id = self.next_error_id;
        self.error = Some(ErrorMessage {
            id,
            text: err.to_string(),
        });

        let timeout = Duration::from_millis(self.config.error_timeout_ms);
        Task::perform(
            async move { tokio::time::sleep(timeout).await },
            move |_| Message::DismissError(id),
        )
    }
}

impl PasteGuard for ImageInput {
    fn accepts_paste(&self) -> bool {
        self.initialized && self.focused && self.surface_visible()
    }
}
