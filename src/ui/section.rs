//! Card and labelled-row widgets shared by the panel sections

use iced::widget::{column, container, row, text};
use iced::{Background, Border, Element, Length};

use super::theme::DarkTheme;

/// Titled card around a section of the form
pub fn section<'a, Message: 'a>(title: &'a str, body: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        column![text(title).size(16).color(DarkTheme::TEXT), body.into()].spacing(10),
    )
    .padding(14)
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border {
            color: DarkTheme::BORDER,
            width: 1.0,
            radius: 10.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Fixed-width label followed by an input
pub fn field<'a, Message: 'a>(label: &'a str, input: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    row![
        container(text(label).size(13).color(DarkTheme::TEXT_MUTED)).width(Length::Fixed(150.0)),
        input.into(),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center)
    .into()
}
