/// Event state machine for the drop/click surface
///
/// The surface does not touch the widget state. It turns raw interaction
/// events into `SurfaceEffect`s that the widget applies: toggle the
/// drag-active look, suppress the platform default, open the file picker,
/// or forward files to the pipeline.

use crate::state::FileHandle;

/// Drag interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    DragActive,
}

/// Keys the surface reacts to while focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKey {
    Enter,
    Space,
    Other,
}

/// Raw events delivered to the surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<FileHandle>),
    Click,
    KeyDown(SurfaceKey),
}

/// What the widget must do in response to a surface event
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEffect {
    /// Suppress the platform's default handling of the event
    PreventDefault,
    /// Show the drag-active look
    AddDragClass,
    /// Remove the drag-active look
    RemoveDragClass,
    /// Open the file picker
    OpenPicker,
    /// Hand a batch of files to the pipeline
    Forward(Vec<FileHandle>),
}

/// Drop/click surface of one widget.
///
/// Dragging over nested content produces enter/leave pairs for every child;
/// a reentrancy counter keeps the surface active until the outermost leave.
#[derive(Debug, Default)]
pub struct InputSurface {
    depth: u32,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        if self.depth > 0 {
            DragState::DragActive
        } else {
            DragState::Idle
        }
    }

    pub fn handle(&mut self, event: SurfaceEvent) -> Vec<SurfaceEffect> {
        match event {
            SurfaceEvent::DragEnter => {
                self.depth += 1;
                if self.depth == 1 {
                    vec![SurfaceEffect::PreventDefault, SurfaceEffect::AddDragClass]
                } else {
                    vec![SurfaceEffect::PreventDefault]
                }
            }
            // Without this the platform refuses the drop
            SurfaceEvent::DragOver => vec![SurfaceEffect::PreventDefault],
            SurfaceEvent::DragLeave => {
                if self.depth == 0 {
                    return vec![SurfaceEffect::PreventDefault];
                }
                self.depth -= 1;
                if self.depth == 0 {
                    vec![SurfaceEffect::PreventDefault, SurfaceEffect::RemoveDragClass]
                } else {
                    vec![SurfaceEffect::PreventDefault]
                }
            }
            SurfaceEvent::Drop(files) => {
                let was_active = self.depth > 0;
                self.depth = 0;

                let mut effects = vec![SurfaceEffect::PreventDefault];
                if was_active {
                    effects.push(SurfaceEffect::RemoveDragClass);
                }
                if !files.is_empty() {
                    effects.push(SurfaceEffect::Forward(files));
                }
                effects
            }
            SurfaceEvent::Click => vec![SurfaceEffect::OpenPicker],
            SurfaceEvent::KeyDown(SurfaceKey::Enter | SurfaceKey::Space) => {
                vec![SurfaceEffect::PreventDefault, SurfaceEffect::OpenPicker]
            }
            SurfaceEvent::KeyDown(SurfaceKey::Other) => Vec::new(),
        }
    }
}
