use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::config::{DayringConfig, SortOption};
use crate::core::color::parse_hex;
use crate::message::Message;

pub fn settings_view<'a>(
    config: &'a DayringConfig,
    export_status: Option<&'a Result<String, String>>,
    save_error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut content = column().spacing(12).padding(16);

    // --- Appearance ---
    content = content.push(text::title4("Clock Face"));

    content = content.push(hex_row(
        "Light theme",
        &config.face_color_light,
        Message::SetFaceColorLight,
    ));
    content = content.push(hex_row(
        "Dark theme",
        &config.face_color_dark,
        Message::SetFaceColorDark,
    ));

    // --- Behavior ---
    content = content.push(text::title4("Behavior"));

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Notifications").width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.notifications_enabled)
                    .on_toggle(|_| Message::ToggleNotifications),
            ),
    );

    let sort_labels: Vec<&'static str> = SortOption::ALL.iter().map(|s| s.label()).collect();
    let selected_sort = SortOption::ALL.iter().position(|s| *s == config.sort_option);
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Sort tasks by").width(Length::Fill))
            .push(cosmic::widget::dropdown(sort_labels, selected_sort, |idx| {
                Message::SetSortOption(SortOption::ALL[idx])
            })),
    );

    // --- Data ---
    content = content.push(text::title4("Data"));

    content = content.push(text::caption(format!(
        "Tasks are stored in {}",
        config.tasks_path().display()
    )));

    if let Some(e) = save_error {
        content = content.push(text::body(format!("✗ Last save failed: {}", e)));
    }

    let mut export_row = row().spacing(8).align_y(Alignment::Center);
    export_row = export_row.push(button::standard("Export CSV").on_press(Message::ExportCsv));
    if let Some(result) = export_status {
        match result {
            Ok(path) => export_row = export_row.push(text::body(format!("✓ {}", path))),
            Err(e) => export_row = export_row.push(text::body(format!("✗ {}", e))),
        }
    }
    content = content.push(export_row);

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Debug logging").width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    content = content.push(
        container(button::destructive("Reset settings").on_press(Message::ResetSettings))
            .padding([8, 0]),
    );

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// A labelled `#RRGGBB` input with a marker when the value does not parse.
fn hex_row<'a>(
    label: &'static str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    let mut r = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::body(label).width(Length::Fill))
        .push(
            text_input::text_input("#RRGGBB", value)
                .on_input(on_input)
                .width(Length::Fixed(120.0)),
        );
    if parse_hex(value).is_none() {
        r = r.push(text::caption("invalid"));
    }
    r.into()
}
