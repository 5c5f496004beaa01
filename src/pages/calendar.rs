use chrono::NaiveDate;

use cosmic::iced::Length;
use cosmic::widget::{container, scrollable};
use cosmic::Element;

use crate::components::month_calendar::{month_calendar, MonthCalendarState};
use crate::core::task::Task;
use crate::message::Message;

pub fn calendar_view(
    state: &MonthCalendarState,
    tasks: &[Task],
    today: NaiveDate,
) -> Element<'static, Message> {
    scrollable(
        container(month_calendar(state, tasks, today))
            .width(Length::Fill)
            .padding(16),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
