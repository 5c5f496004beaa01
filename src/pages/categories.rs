use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text, text_input};
use cosmic::Element;

use crate::application::CategoryForm;
use crate::core::category::{self, Category};
use crate::core::color::parse_hex;
use crate::message::Message;

/// Category management: the ordered list with reorder and delete controls,
/// and the editor for adding a new one.
pub fn categories_view<'a>(
    categories: &'a [Category],
    form: &'a CategoryForm,
) -> Element<'a, Message> {
    let mut content = column().spacing(12).padding(16);

    content = content.push(text::title4("Categories"));

    let last = categories.len().saturating_sub(1);
    for (idx, cat) in categories.iter().enumerate() {
        let mut up = button::icon(icon::from_name("go-up-symbolic"));
        if idx > 0 {
            up = up.on_press(Message::MoveCategory(cat.id, -1));
        }
        let mut down = button::icon(icon::from_name("go-down-symbolic"));
        if idx < last {
            down = down.on_press(Message::MoveCategory(cat.id, 1));
        }

        content = content.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(color_swatch(&cat.color))
                .push(icon::from_name(cat.icon.clone()).size(16).icon())
                .push(text::body(cat.name.clone()).width(Length::Fill))
                .push(up)
                .push(down)
                .push(
                    button::icon(icon::from_name("edit-delete-symbolic"))
                        .on_press(Message::DeleteCategory(cat.id)),
                ),
        );
    }

    content = content.push(text::title4("New Category"));

    content = content.push(
        text_input::text_input("Name", &form.name)
            .on_input(Message::CategoryNameInput)
            .on_submit(|_| Message::CategorySubmit)
            .width(Length::Fill),
    );

    let mut color_row = row().spacing(4);
    for (idx, hex) in category::AVAILABLE_COLORS.iter().enumerate() {
        let swatch = button::custom(color_swatch(hex)).on_press(Message::CategoryColorPick(idx));
        let swatch = if idx == form.color {
            swatch.class(cosmic::theme::Button::Suggested)
        } else {
            swatch.class(cosmic::theme::Button::Text)
        };
        color_row = color_row.push(swatch);
    }
    content = content.push(color_row);

    let mut icon_row = row().spacing(4);
    for (idx, name) in category::AVAILABLE_ICONS.iter().enumerate() {
        let btn = button::icon(icon::from_name(*name)).on_press(Message::CategoryIconPick(idx));
        let btn = if idx == form.icon {
            btn.class(cosmic::theme::Button::Suggested)
        } else {
            btn
        };
        icon_row = icon_row.push(btn);
    }
    content = content.push(scrollable(icon_row).direction(
        cosmic::iced::widget::scrollable::Direction::Horizontal(Default::default()),
    ));

    content = content.push(button::suggested("Add").on_press(Message::CategorySubmit));

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn color_swatch(hex: &str) -> Element<'static, Message> {
    let color = parse_hex(hex)
        .map(|(r, g, b)| cosmic::iced::Color::from_rgb8(r, g, b))
        .unwrap_or(cosmic::iced::Color::TRANSPARENT);
    container(text::body(" "))
        .width(Length::Fixed(16.0))
        .height(Length::Fixed(16.0))
        .class(cosmic::theme::Container::custom(move |_| {
            cosmic::widget::container::Style {
                background: Some(cosmic::iced::Background::Color(color)),
                border: cosmic::iced::Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        }))
        .into()
}
