use chrono::NaiveDateTime;
use uuid::Uuid;

use cosmic::iced::Length;
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::Element;

use crate::components::clock_face::clock_face;
use crate::core::category::Category;
use crate::core::task::Task;
use crate::message::Message;

/// The main dial page: category filter chips above the 24-hour clock face
/// showing the current day.
pub fn clock_view(
    tasks: &[Task],
    categories: &[Category],
    selected: Option<Uuid>,
    now: NaiveDateTime,
    face_hex: &str,
) -> Element<'static, Message> {
    let mut chips = row().spacing(4);
    for category in categories {
        let chip = row()
            .spacing(4)
            .push(icon::from_name(category.icon.clone()).size(16).icon())
            .push(text::body(category.name.clone()));
        let btn = if selected == Some(category.id) {
            button::custom(chip).class(cosmic::theme::Button::Suggested)
        } else {
            button::custom(chip).class(cosmic::theme::Button::Standard)
        };
        chips = chips.push(btn.on_press(Message::SelectCategory(category.id)));
    }

    let today_tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| t.is_on_day(now.date()))
        .cloned()
        .collect();

    let selected_name = selected.and_then(|id| {
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    });

    let face = clock_face(today_tasks, now, face_hex, selected_name);

    column()
        .spacing(8)
        .push(
            container(scrollable(chips).direction(
                cosmic::iced::widget::scrollable::Direction::Horizontal(Default::default()),
            ))
            .padding([0, 16]),
        )
        .push(
            container(face)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(8),
        )
        .into()
}
