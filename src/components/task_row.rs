use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, checkbox, icon, row, text};
use cosmic::Element;

use crate::core::color::parse_hex;
use crate::core::task::Task;
use crate::message::Message;

// Column widths for consistent alignment
const COL_CHECK: f32 = 28.0;
const COL_TIME: f32 = 110.0;
const COL_CATEGORY: f32 = 110.0;
const COL_ACTIONS: f32 = 76.0;

/// One task as a list row: completion checkbox, category-colored icon,
/// title, time range, and edit/delete actions.
pub fn task_row(task: &Task) -> Element<'static, Message> {
    let id = task.id;

    let check = checkbox("", task.completed).on_toggle(move |_| Message::ToggleTaskCompleted(id));

    let time_str = format!(
        "{} – {}",
        task.start.format("%H:%M"),
        task.end_time().format("%H:%M")
    );

    let task_icon = icon::from_name(task.icon.clone()).size(16).icon();

    let category_color = parse_hex(&task.color)
        .map(|(r, g, b)| cosmic::iced::Color::from_rgb8(r, g, b))
        .unwrap_or(cosmic::iced::Color::TRANSPARENT);
    let color_dot = cosmic::widget::container(text::body(" "))
        .width(Length::Fixed(10.0))
        .height(Length::Fixed(10.0))
        .class(cosmic::theme::Container::custom(move |_| {
            cosmic::widget::container::Style {
                background: Some(cosmic::iced::Background::Color(category_color)),
                border: cosmic::iced::Border {
                    radius: 5.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        }));

    let title = if task.completed {
        text::caption(task.title.clone())
    } else {
        text::body(task.title.clone())
    };

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(cosmic::widget::container(check).width(Length::Fixed(COL_CHECK)))
        .push(color_dot)
        .push(task_icon)
        .push(title.width(Length::Fill))
        .push(text::caption(task.category.clone()).width(Length::Fixed(COL_CATEGORY)))
        .push(text::caption(time_str).width(Length::Fixed(COL_TIME)))
        .push(
            row()
                .spacing(4)
                .width(Length::Fixed(COL_ACTIONS))
                .push(
                    button::icon(icon::from_name("document-edit-symbolic"))
                        .on_press(Message::EditTask(id)),
                )
                .push(
                    button::icon(icon::from_name("edit-delete-symbolic"))
                        .on_press(Message::DeleteTask(id)),
                ),
        )
        .into()
}
