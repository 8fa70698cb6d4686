use iced::widget::{button, column, container, image, row, scrollable, text, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::screen::Controls;
use crate::state::data::ImageRecord;
use crate::Message;

/// Height of the picture slot (in pixels)
const PICTURE_HEIGHT: f32 = 480.0;

/// Picture slot of a loaded record
#[derive(Debug, Clone, Default)]
pub enum Picture {
    /// Bytes are still downloading
    #[default]
    Pending,
    Ready(image::Handle),
    /// Download failed
    Unavailable,
    /// Entry is a video or other non-image media
    NotAnImage,
}

/// Spinner stand-in while a fetch is in flight
pub fn progress<'a>() -> Element<'a, Message> {
    centered(text("Loading…").size(24))
}

/// Shown once the user walks past the newest entry
pub fn future_notice<'a>() -> Element<'a, Message> {
    centered(
        column![
            text("You have reached the most current available date.").size(18),
            button("Go to Current Date")
                .on_press(Message::Today)
                .padding(10),
        ]
        .spacing(20)
        .align_x(Alignment::Center),
    )
}

pub fn no_data<'a>(controls: Controls) -> Element<'a, Message> {
    centered(
        column![
            text("No data available").size(18),
            navigation_row(controls),
            button("Today").on_press(Message::Today).padding(10),
        ]
        .spacing(20)
        .align_x(Alignment::Center),
    )
}

/// Full card: picture, title, date, credit, explanation, then navigation
pub fn record<'a>(
    record: &'a ImageRecord,
    picture: &'a Picture,
    controls: Controls,
) -> Element<'a, Message> {
    let card: Column<'a, Message> = column![
        picture_slot(record, picture),
        text(record.title.as_str()).size(28),
        text(format!("Date: {}", record.date)).size(14),
    ]
    .push_maybe(
        record
            .copyright
            .as_deref()
            .map(|credit| text(format!("© {}", credit)).size(14)),
    )
    .push(text(record.explanation.as_str()).size(16))
    .spacing(12)
    .padding(20)
    .max_width(900.0)
    .align_x(Alignment::Center);

    column![
        scrollable(container(card).center_x(Length::Fill)).height(Length::Fill),
        container(navigation_row(controls)).center_x(Length::Fill),
    ]
    .spacing(12)
    .padding(20)
    .into()
}

fn picture_slot<'a>(record: &'a ImageRecord, picture: &'a Picture) -> Element<'a, Message> {
    match picture {
        Picture::Ready(handle) => image::<image::Handle>(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(PICTURE_HEIGHT))
            .into(),
        Picture::Pending => text("Loading image…").size(14).into(),
        Picture::Unavailable => column![
            text("Image unavailable").size(14),
            text(record.image_url.as_str()).size(12),
        ]
        .spacing(4)
        .align_x(Alignment::Center)
        .into(),
        Picture::NotAnImage => column![
            text("This entry is not a still image. Open it at:").size(14),
            text(record.image_url.as_str()).size(12),
        ]
        .spacing(4)
        .align_x(Alignment::Center)
        .into(),
    }
}

/// Previous / Random / Next; disabled buttons get no `on_press`
fn navigation_row<'a>(controls: Controls) -> Element<'a, Message> {
    row![
        button("Previous")
            .on_press_maybe(controls.previous.then_some(Message::Previous))
            .padding(10),
        button("Random")
            .on_press_maybe(controls.random.then_some(Message::Random))
            .padding(10),
        button("Next")
            .on_press_maybe(controls.next.then_some(Message::Next))
            .padding(10),
    ]
    .spacing(16)
    .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
