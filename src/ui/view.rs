/// Rendering of an image input
///
/// The view is a pure function of the widget: the upload prompt while the
/// store is empty, the thumbnail list otherwise, and the inline error
/// under either.

use iced::widget::{button, column, container, image, mouse_area, row, text, Column, Space};
use iced::{Alignment, Border, Color, Element, Length, Theme};
use iced_aw::Wrap;

use super::image_input::{ImageInput, Message};
use crate::state::Thumbnail;

/// Color of the inline error text
const ERROR_COLOR: Color = Color::from_rgb(0.86, 0.24, 0.24);

impl ImageInput {
    /// Build the user interface of this input
    pub fn view(&self) -> Element<'_, Message> {
        if !self.is_visible() {
            return Space::new(Length::Shrink, Length::Shrink).into();
        }

        let mut content: Column<Message> = column![].spacing(8);

        if let Some(label) = &self.config().label {
            content = content.push(text(label).size(16));
        }

        content = if self.store().shows_thumbnails() {
            content.push(self.thumbnail_list())
        } else {
            content.push(self.upload_area())
        };

        if let Some(error) = self.error() {
            content = content.push(text(&error.text).size(14).color(ERROR_COLOR));
        }

        content.into()
    }

    fn upload_area(&self) -> Element<'_, Message> {
        let highlighted = self.is_drag_active();
        let focused = self.is_focused();

        let prompt = container(text(&self.config().button_label).size(16))
            .padding(32)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(move |theme: &Theme| {
                let palette = theme.extended_palette();
                let border_color = if highlighted || focused {
                    palette.primary.strong.color
                } else {
                    palette.background.strong.color
                };
                let background = if highlighted {
                    palette.primary.weak.color
                } else {
                    palette.background.weak.color
                };

                container::Style {
                    background: Some(background.into()),
                    border: Border {
                        color: border_color,
                        width: 2.0,
                        radius: 8.0.into(),
                    },
                    ..container::Style::default()
                }
            });

        mouse_area(prompt)
            .on_press(Message::SurfacePressed)
            .on_enter(Message::SurfaceHovered(true))
            .on_exit(Message::SurfaceHovered(false))
            .into()
    }

    fn thumbnail_list(&self) -> Element<'_, Message> {
        let size = f32::from(self.config().thumbnail_size);

        let elements = self
            .store()
            .thumbnails()
            .iter()
            .map(|thumbnail| thumbnail_card(thumbnail, size))
            .collect();

        Wrap::with_elements(elements).into()
    }
}

/// One thumbnail with its name and remove button
fn thumbnail_card(thumbnail: &Thumbnail, size: f32) -> Element<'_, Message> {
    let preview: Element<'_, Message> = match &thumbnail.handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into(),
        None => container(text("?").size(24))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fixed(size))
            .center_y(Length::Fixed(size))
            .into(),
    };

    // The index comes from the current render, never from an older one
    let remove = button(text("×").size(14))
        .on_press(Message::RemoveThumbnail(thumbnail.index))
        .padding([0, 6]);

    let info = row![
        text(&thumbnail.name).size(12).width(Length::Fill),
        remove,
    ]
    .spacing(4)
    .align_y(Alignment::Center)
    .width(Length::Fixed(size));

    container(column![preview, info].spacing(4))
        .padding(6)
        .style(container::rounded_box)
        .into()
}
