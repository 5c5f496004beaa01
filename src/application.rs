use chrono::{Local, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::Length;
use cosmic::widget::{button, column, container, icon, nav_bar, row, scrollable, text, text_input};
use cosmic::{Application, Element, executor};

use crate::components::month_calendar::MonthCalendarState;
use crate::config::DayringConfig;
use crate::core::category::{self, Category};
use crate::core::repeat::{self, Frequency, RepeatPattern};
use crate::core::task::Task;
use crate::message::{Message, Page, StatsRange};
use crate::pages;
use crate::store::TaskStore;

/// Delay between the last edit and the store write it triggers.
const SAVE_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDrawerState {
    TaskForm,
}

/// Edit buffer for the task drawer. `editing` is the id of the task being
/// edited, or `None` when the form will create a new one on submit.
pub struct TaskForm {
    pub editing: Option<Uuid>,
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: String,
    pub category: usize,
    pub icon: usize,
    pub repeat_enabled: bool,
    pub repeat_frequency: Frequency,
    pub repeat_count: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            date: String::new(),
            time: String::new(),
            duration_minutes: "60".to_string(),
            category: 0,
            icon: 0,
            repeat_enabled: false,
            repeat_frequency: Frequency::Daily,
            repeat_count: "7".to_string(),
        }
    }
}

impl TaskForm {
    fn for_new(start: NaiveDateTime, category: usize, categories: &[Category]) -> Self {
        Self {
            date: start.format("%Y-%m-%d").to_string(),
            time: start.format("%H:%M").to_string(),
            category,
            icon: icon_index_for_category(category, categories),
            ..Self::default()
        }
    }

    fn from_task(task: &Task, categories: &[Category]) -> Self {
        let category = categories
            .iter()
            .position(|c| c.name == task.category)
            .unwrap_or(0);
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            date: task.start.format("%Y-%m-%d").to_string(),
            time: task.start.format("%H:%M").to_string(),
            duration_minutes: (task.duration_secs / 60).max(1).to_string(),
            category,
            icon: category::AVAILABLE_ICONS
                .iter()
                .position(|i| *i == task.icon)
                .unwrap_or(0),
            ..Self::default()
        }
    }
}

#[derive(Default)]
pub struct CategoryForm {
    pub name: String,
    pub color: usize,
    pub icon: usize,
}

/// Save-generation debounce: every edit arms a new generation, and only the
/// timer tick carrying the latest one is allowed to write.
#[derive(Debug, Default)]
struct SaveDebounce {
    generation: u64,
}

impl SaveDebounce {
    fn arm(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    fn should_write(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

pub struct Dayring {
    core: Core,
    nav_model: nav_bar::Model,
    config: DayringConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    active_page: Page,

    // Data
    store: TaskStore,
    tasks: Vec<Task>,

    // Clock
    now: NaiveDateTime,
    selected_category: Option<Uuid>,

    // Drawer
    context_drawer_state: Option<ContextDrawerState>,
    task_form: TaskForm,

    // UI state
    category_form: CategoryForm,
    search_query: String,
    stats_range: StatsRange,
    month_calendar: MonthCalendarState,

    // Persistence
    save_debounce: SaveDebounce,
    save_error: Option<String>,
    export_status: Option<Result<String, String>>,
}

pub struct Flags {
    pub config: DayringConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
}

impl Application for Dayring {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.dayring.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;
        let cosmic_config = flags.cosmic_config;

        if let Err(e) = config.ensure_files() {
            log::error!("Failed to create data directory: {}", e);
        }

        // Build sidebar navigation model with section dividers
        let mut nav_model = nav_bar::Model::default();
        for page in Page::ALL {
            let mut item = nav_model.insert();
            item = item
                .text(page.title())
                .icon(icon::from_name(page.icon_name()).icon())
                .data(*page);
            if Page::SECTION_STARTS.contains(page) {
                item.divider_above(true);
            }
        }
        let first = nav_model.iter().next();
        if let Some(id) = first {
            nav_model.activate(id);
        }

        // An unreadable or structurally broken store is fatal: silently
        // starting with an empty collection would overwrite it on first save.
        let store = TaskStore::new(config.tasks_path());
        let tasks = match store.load() {
            Ok(tasks) => tasks,
            Err(e) => {
                log::error!("Failed to load {}: {}", store.path().display(), e);
                std::process::exit(1);
            }
        };
        log::info!("Loaded {} tasks from {}", tasks.len(), store.path().display());

        let app = Self {
            core,
            nav_model,
            config,
            cosmic_config,
            active_page: Page::Clock,
            store,
            tasks,
            now: Local::now().naive_local(),
            selected_category: None,
            context_drawer_state: None,
            task_form: TaskForm::default(),
            category_form: CategoryForm::default(),
            search_query: String::new(),
            stats_range: StatsRange::Day,
            month_calendar: MonthCalendarState::default(),
            save_debounce: SaveDebounce::default(),
            save_error: None,
            export_status: None,
        };

        (app, CosmicTask::none())
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav_model)
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        if let Some(page) = self.nav_model.data::<Page>(id).copied() {
            self.active_page = page;
            self.search_query.clear();
            self.nav_model.activate(id);
        }
        CosmicTask::none()
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let header_row = row()
            .spacing(4)
            .push(
                button::icon(icon::from_name("list-add-symbolic"))
                    .on_press(Message::OpenNewTaskForm),
            )
            .push(
                button::icon(icon::from_name("emblem-system-symbolic"))
                    .on_press(Message::OpenSettings),
            );

        vec![header_row.into()]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        let drawer_state = self.context_drawer_state?;

        match drawer_state {
            ContextDrawerState::TaskForm => {
                let title = if self.task_form.editing.is_some() {
                    "Edit Task"
                } else {
                    "New Task"
                };
                Some(
                    context_drawer::context_drawer(
                        container(scrollable(self.task_form_view().padding(16)))
                            .width(Length::Fill),
                        Message::CloseTaskForm,
                    )
                    .title(title),
                )
            }
        }
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.context_drawer_state == Some(ContextDrawerState::TaskForm) {
            self.context_drawer_state = None;
            self.core.window.show_context = false;
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::Subscription::batch([
            // Keeps the hand and the "today" boundary current
            cosmic::iced::time::every(std::time::Duration::from_secs(30))
                .map(|_| Message::Tick(Local::now().naive_local())),
            cosmic::iced::event::listen_with(|event, _status, _id| match event {
                cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key: cosmic::iced::keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                }) if c.as_str() == "n" && modifiers.control() => {
                    Some(Message::OpenNewTaskForm)
                }
                _ => None,
            }),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        let q = self.search_query.trim().to_lowercase();

        let content: Element<'_, Message> = match self.active_page {
            Page::Clock => {
                let dark = cosmic::theme::active().cosmic().is_dark;
                let face_hex = if dark {
                    &self.config.face_color_dark
                } else {
                    &self.config.face_color_light
                };
                pages::clock::clock_view(
                    &self.tasks,
                    &self.config.categories,
                    self.selected_category,
                    self.now,
                    face_hex,
                )
            }
            Page::Flow => {
                let filtered_tasks: Vec<Task>;
                let visible: &[Task] = if !q.is_empty() {
                    filtered_tasks = self
                        .tasks
                        .iter()
                        .filter(|t| {
                            t.title.to_lowercase().contains(&q)
                                || t.category.to_lowercase().contains(&q)
                        })
                        .cloned()
                        .collect();
                    &filtered_tasks
                } else {
                    &self.tasks
                };
                pages::flow::flow_view(visible, self.config.sort_option, self.now.date())
            }
            Page::Calendar => {
                pages::calendar::calendar_view(&self.month_calendar, &self.tasks, self.now.date())
            }
            Page::Statistics => pages::statistics::statistics_view(
                &self.tasks,
                &self.config.categories,
                self.stats_range,
                self.now.date(),
            ),
            Page::Categories => {
                pages::categories::categories_view(&self.config.categories, &self.category_form)
            }
            Page::Settings => pages::settings::settings_view(
                &self.config,
                self.export_status.as_ref(),
                self.save_error.as_deref(),
            ),
        };

        if self.active_page == Page::Flow {
            let search_input = text_input::text_input("Search tasks...", self.search_query.clone())
                .on_input(Message::SearchQueryChanged)
                .width(Length::Fill);

            container(
                column()
                    .spacing(8)
                    .push(container(search_input).padding([0, 16]))
                    .push(content),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
        } else {
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::Tick(now) => {
                self.now = now;
            }

            Message::SelectCategory(id) => {
                if self.selected_category == Some(id) {
                    self.selected_category = None;
                } else {
                    self.selected_category = Some(id);
                }
            }

            Message::CreateTaskAt(time) => {
                let start = self.now.date().and_time(time);
                if let Some(task) =
                    dial_task(start, self.selected_category, &self.config.categories)
                {
                    self.task_form = TaskForm::from_task(&task, &self.config.categories);
                    self.tasks.push(task);
                    self.context_drawer_state = Some(ContextDrawerState::TaskForm);
                    self.core.window.show_context = true;
                    return self.schedule_save();
                }
            }

            Message::TaskMoved(id, new_start) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.start = task.start.date().and_time(new_start);
                }
            }

            Message::TaskResized(id, secs) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.set_duration(secs);
                }
            }

            Message::DragEnded => {
                return self.schedule_save();
            }

            Message::ToggleTaskCompleted(id) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.completed = !task.completed;
                    return self.schedule_save();
                }
            }

            Message::DeleteTask(id) => {
                if self.task_form.editing == Some(id) {
                    self.context_drawer_state = None;
                    self.core.window.show_context = false;
                }
                self.tasks.retain(|t| t.id != id);
                return self.schedule_save();
            }

            Message::EditTask(id) => {
                if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                    self.task_form = TaskForm::from_task(task, &self.config.categories);
                    self.context_drawer_state = Some(ContextDrawerState::TaskForm);
                    self.core.window.show_context = true;
                }
            }

            Message::OpenNewTaskForm => {
                // Default the form to the next full hour of the current day
                let start = next_full_hour(self.now);
                let category_idx = self
                    .selected_category
                    .and_then(|id| self.config.categories.iter().position(|c| c.id == id))
                    .unwrap_or(0);
                self.task_form = TaskForm::for_new(start, category_idx, &self.config.categories);
                self.context_drawer_state = Some(ContextDrawerState::TaskForm);
                self.core.window.show_context = true;
            }

            Message::CloseTaskForm => {
                self.context_drawer_state = None;
                self.core.window.show_context = false;
            }

            Message::FormTitle(value) => {
                self.task_form.title = value;
            }

            Message::FormDate(value) => {
                self.task_form.date = value;
            }

            Message::FormTime(value) => {
                self.task_form.time = value;
            }

            Message::FormDurationPreset(minutes) => {
                self.task_form.duration_minutes = minutes.to_string();
            }

            Message::FormDurationMinutes(value) => {
                self.task_form.duration_minutes = value;
            }

            Message::FormCategory(idx) => {
                self.task_form.category = idx;
                // Icon follows the category until picked explicitly
                self.task_form.icon = icon_index_for_category(idx, &self.config.categories);
            }

            Message::FormIcon(idx) => {
                self.task_form.icon = idx;
            }

            Message::FormRepeatToggle(enabled) => {
                self.task_form.repeat_enabled = enabled;
            }

            Message::FormRepeatFrequency(frequency) => {
                self.task_form.repeat_frequency = frequency;
            }

            Message::FormRepeatCount(value) => {
                self.task_form.repeat_count = value;
            }

            Message::FormSubmit => {
                if self.apply_task_form() {
                    self.context_drawer_state = None;
                    self.core.window.show_context = false;
                    return self.schedule_save();
                }
            }

            // Categories
            Message::CategoryNameInput(value) => {
                self.category_form.name = value;
            }

            Message::CategoryColorPick(idx) => {
                self.category_form.color = idx;
            }

            Message::CategoryIconPick(idx) => {
                self.category_form.icon = idx;
            }

            Message::CategorySubmit => {
                let name = self.category_form.name.trim().to_string();
                if !name.is_empty() {
                    let color = category::AVAILABLE_COLORS
                        .get(self.category_form.color)
                        .copied()
                        .unwrap_or("#30D158");
                    let icon = category::AVAILABLE_ICONS
                        .get(self.category_form.icon)
                        .copied()
                        .unwrap_or("starred-symbolic");
                    self.config.categories.push(Category::new(name, color, icon));
                    self.category_form = CategoryForm::default();
                    self.save_config();
                }
            }

            Message::DeleteCategory(id) => {
                remove_category(&mut self.config.categories, &mut self.selected_category, id);
                self.save_config();
            }

            Message::MoveCategory(id, delta) => {
                if shift_category(&mut self.config.categories, id, delta) {
                    self.save_config();
                }
            }

            // Calendar
            Message::CalendarPrevMonth => {
                self.month_calendar.prev_month();
            }

            Message::CalendarNextMonth => {
                self.month_calendar.next_month();
            }

            Message::CalendarSelectDay(date) => {
                self.month_calendar.select_day(date);
            }

            Message::SetStatsRange(range) => {
                self.stats_range = range;
            }

            Message::SearchQueryChanged(q) => {
                self.search_query = q;
            }

            // Settings
            Message::OpenSettings => {
                self.activate_page(Page::Settings);
            }

            Message::ToggleNotifications => {
                self.config.notifications_enabled = !self.config.notifications_enabled;
                self.save_config();
            }

            Message::SetSortOption(option) => {
                self.config.sort_option = option;
                self.save_config();
            }

            Message::SetFaceColorLight(hex) => {
                self.config.face_color_light = hex;
                self.save_config();
            }

            Message::SetFaceColorDark(hex) => {
                self.config.face_color_dark = hex;
                self.save_config();
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                dayring::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }

            Message::ResetSettings => {
                let defaults = DayringConfig::default();
                self.config.face_color_light = defaults.face_color_light;
                self.config.face_color_dark = defaults.face_color_dark;
                self.config.notifications_enabled = defaults.notifications_enabled;
                self.config.sort_option = defaults.sort_option;
                self.config.debug_logging = defaults.debug_logging;
                dayring::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }

            Message::ExportCsv => {
                let csv = crate::store::csv::export_csv(&self.tasks);
                let path = self.config.export_path();
                return CosmicTask::perform(
                    async move {
                        std::fs::write(&path, csv)
                            .map(|()| path.display().to_string())
                            .map_err(|e| e.to_string())
                    },
                    |result| cosmic::Action::App(Message::CsvExported(result)),
                );
            }

            Message::CsvExported(result) => {
                match &result {
                    Ok(path) => log::info!("Exported CSV to {}", path),
                    Err(e) => log::error!("CSV export failed: {}", e),
                }
                self.export_status = Some(result);
            }

            // Persistence
            Message::SaveTick(generation) => {
                if self.save_debounce.should_write(generation) {
                    let store = self.store.clone();
                    let tasks = self.tasks.clone();
                    return CosmicTask::perform(
                        async move { store.save(&tasks).map_err(|e| e.to_string()) },
                        |result| cosmic::Action::App(Message::Saved(result)),
                    );
                }
            }

            Message::Saved(result) => {
                if let Err(ref e) = result {
                    log::error!("Failed to save tasks: {}", e);
                }
                self.save_error = result.err();
            }
        }

        CosmicTask::none()
    }
}

impl Dayring {
    /// Bump the save generation and arm the debounce timer. Only the tick
    /// carrying the latest generation actually writes, so a burst of edits
    /// collapses into one save.
    fn schedule_save(&mut self) -> CosmicTask<Message> {
        let generation = self.save_debounce.arm();
        CosmicTask::perform(
            async move {
                tokio::time::sleep(std::time::Duration::from_millis(SAVE_DEBOUNCE_MS)).await;
                generation
            },
            |generation| cosmic::Action::App(Message::SaveTick(generation)),
        )
    }

    fn activate_page(&mut self, page: Page) {
        self.active_page = page;
        let id = self
            .nav_model
            .iter()
            .find(|id| self.nav_model.data::<Page>(*id) == Some(&page));
        if let Some(id) = id {
            self.nav_model.activate(id);
        }
    }

    /// Commit the task form. Returns false when the input does not parse,
    /// leaving the drawer open for correction.
    fn apply_task_form(&mut self) -> bool {
        let title = self.task_form.title.trim().to_string();
        if title.is_empty() {
            return false;
        }
        let Some(start) = parse_form_datetime(&self.task_form.date, &self.task_form.time) else {
            return false;
        };
        let Some(duration_secs) = form_duration_secs(&self.task_form.duration_minutes) else {
            return false;
        };

        let (category, color) = match self.config.categories.get(self.task_form.category) {
            Some(cat) => (cat.name.clone(), cat.color.clone()),
            None => (String::new(), "#30D158".to_string()),
        };
        let icon = category::AVAILABLE_ICONS
            .get(self.task_form.icon)
            .copied()
            .unwrap_or("starred-symbolic")
            .to_string();

        if let Some(id) = self.task_form.editing {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                task.title = title;
                task.start = start;
                task.set_duration(duration_secs);
                task.category = category;
                task.color = color;
                task.icon = icon;
            }
        } else {
            let mut template = Task::new(title, start, duration_secs);
            template.category = category;
            template.color = color;
            template.icon = icon;

            if self.task_form.repeat_enabled {
                let count: u32 = self
                    .task_form
                    .repeat_count
                    .trim()
                    .parse()
                    .unwrap_or(1)
                    .clamp(1, 30);
                let pattern = RepeatPattern::new(self.task_form.repeat_frequency, count);
                self.tasks.extend(repeat::expand(&template, pattern));
            } else {
                self.tasks.push(template);
            }
        }
        true
    }

    fn task_form_view(&self) -> column::Column<'_, Message> {
        let form = &self.task_form;
        let mut content = column().spacing(16);

        content = content.push(text::title4("Title"));
        content = content.push(
            text_input::text_input("Task title...", &form.title)
                .on_input(Message::FormTitle)
                .on_submit(|_| Message::FormSubmit)
                .width(Length::Fill),
        );

        content = content.push(text::title4("Date"));
        content = content.push(
            text_input::text_input("YYYY-MM-DD", &form.date)
                .on_input(Message::FormDate)
                .width(Length::Fill),
        );

        content = content.push(text::title4("Start"));
        content = content.push(
            text_input::text_input("HH:MM", &form.time)
                .on_input(Message::FormTime)
                .width(Length::Fill),
        );

        content = content.push(text::title4("Duration"));
        let mut duration_row = row().spacing(4);
        for minutes in [15i64, 30, 60, 90, 120] {
            let label = if minutes < 60 {
                format!("{}m", minutes)
            } else {
                format!("{}h", minutes as f32 / 60.0)
            };
            let active = form.duration_minutes.trim().parse::<i64>() == Ok(minutes);
            let btn = if active {
                button::suggested(label)
            } else {
                button::standard(label)
            };
            duration_row = duration_row.push(btn.on_press(Message::FormDurationPreset(minutes)));
        }
        content = content.push(duration_row);
        content = content.push(
            text_input::text_input("Minutes", &form.duration_minutes)
                .on_input(Message::FormDurationMinutes)
                .width(Length::Fixed(120.0)),
        );

        content = content.push(text::title4("Category"));
        let mut category_row = row().spacing(4);
        for (idx, cat) in self.config.categories.iter().enumerate() {
            let btn = if idx == form.category {
                button::suggested(cat.name.clone())
            } else {
                button::standard(cat.name.clone())
            };
            category_row = category_row.push(btn.on_press(Message::FormCategory(idx)));
        }
        content = content.push(scrollable(category_row).direction(
            cosmic::iced::widget::scrollable::Direction::Horizontal(Default::default()),
        ));

        content = content.push(text::title4("Icon"));
        let mut icon_row = row().spacing(4);
        for (idx, name) in category::AVAILABLE_ICONS.iter().enumerate() {
            let btn = button::icon(icon::from_name(*name)).on_press(Message::FormIcon(idx));
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

        // Repeat only applies when creating; editing one instance of a
        // series never rewrites its siblings
        if form.editing.is_none() {
            content = content.push(text::title4("Repeat"));
            content = content.push(
                row()
                    .spacing(8)
                    .push(text::body("Repeat this task").width(Length::Fill))
                    .push(
                        cosmic::widget::toggler(form.repeat_enabled)
                            .on_toggle(Message::FormRepeatToggle),
                    ),
            );

            if form.repeat_enabled {
                let mut freq_row = row().spacing(4);
                for freq in Frequency::ALL {
                    let btn = if *freq == form.repeat_frequency {
                        button::suggested(freq.label())
                    } else {
                        button::standard(freq.label())
                    };
                    freq_row = freq_row.push(btn.on_press(Message::FormRepeatFrequency(*freq)));
                }
                content = content.push(freq_row);
                content = content.push(
                    text_input::text_input("Times (max 30)", &form.repeat_count)
                        .on_input(Message::FormRepeatCount)
                        .width(Length::Fixed(120.0)),
                );
            }
        }

        let mut submit_row = row().spacing(8).push(
            button::suggested(if form.editing.is_some() { "Save" } else { "Create" })
                .on_press(Message::FormSubmit),
        );
        if let Some(id) = form.editing {
            submit_row = submit_row.push(
                button::destructive("Delete").on_press(Message::DeleteTask(id)),
            );
        }
        content = content.push(submit_row);

        content
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}

fn parse_form_datetime(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let date = chrono::NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time_str.trim(), "%H:%M").ok()?;
    Some(date.and_time(time))
}

fn next_full_hour(now: NaiveDateTime) -> NaiveDateTime {
    use chrono::Timelike;
    let next = now + chrono::Duration::hours(1);
    next.date()
        .and_hms_opt(next.hour(), 0, 0)
        .unwrap_or(next)
}

fn icon_index_for_category(idx: usize, categories: &[Category]) -> usize {
    categories
        .get(idx)
        .and_then(|cat| category::AVAILABLE_ICONS.iter().position(|i| *i == cat.icon))
        .unwrap_or(0)
}

/// Parse the form's minutes field into a duration in seconds, clamped to
/// the 5 minute floor and a full day ceiling.
fn form_duration_secs(input: &str) -> Option<i64> {
    let minutes: i64 = input.trim().parse().ok()?;
    Some(minutes.clamp(5, 24 * 60) * 60)
}

/// A dial press creates a one-hour task only while a category chip is
/// active; the new task copies that category's name, color, and icon.
fn dial_task(
    start: NaiveDateTime,
    selected: Option<Uuid>,
    categories: &[Category],
) -> Option<Task> {
    let category = selected.and_then(|id| categories.iter().find(|c| c.id == id))?;
    let mut task = Task::new("New task", start, 3600);
    task.category = category.name.clone();
    task.color = category.color.clone();
    task.icon = category.icon.clone();
    Some(task)
}

/// Drop a category from the collection and clear the dial filter if it
/// pointed at it. Tasks referencing the category are never touched; they
/// keep their copied color, icon, and name tag.
fn remove_category(categories: &mut Vec<Category>, selected: &mut Option<Uuid>, id: Uuid) {
    categories.retain(|c| c.id != id);
    if *selected == Some(id) {
        *selected = None;
    }
}

/// Swap a category with its neighbor. Returns whether the order changed.
fn shift_category(categories: &mut [Category], id: Uuid, delta: isize) -> bool {
    let Some(pos) = categories.iter().position(|c| c.id == id) else {
        return false;
    };
    let target = pos as isize + delta;
    if target < 0 || target as usize >= categories.len() {
        return false;
    }
    categories.swap(pos, target as usize);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn oversized_minutes_cap_at_a_full_day() {
        assert_eq!(form_duration_secs("200000000000000000"), Some(24 * 3600));
        assert_eq!(form_duration_secs("1441"), Some(24 * 3600));
    }

    #[test]
    fn tiny_and_negative_minutes_floor_at_five() {
        assert_eq!(form_duration_secs("1"), Some(300));
        assert_eq!(form_duration_secs("-30"), Some(300));
    }

    #[test]
    fn unparseable_minutes_are_rejected() {
        assert_eq!(form_duration_secs(""), None);
        assert_eq!(form_duration_secs("an hour"), None);
    }

    #[test]
    fn dial_press_without_a_selected_category_creates_nothing() {
        let categories = Category::defaults();
        assert!(dial_task(start(), None, &categories).is_none());
        assert!(dial_task(start(), Some(Uuid::new_v4()), &categories).is_none());
    }

    #[test]
    fn dial_press_copies_the_selected_category() {
        let categories = Category::defaults();
        let chosen = &categories[1];
        let task = dial_task(start(), Some(chosen.id), &categories).unwrap();
        assert_eq!(task.category, chosen.name);
        assert_eq!(task.color, chosen.color);
        assert_eq!(task.icon, chosen.icon);
        assert_eq!(task.duration_secs, 3600);
    }

    #[test]
    fn deleting_a_category_leaves_referencing_tasks_in_place() {
        let mut categories = Category::defaults();
        let doomed = categories[0].clone();

        let mut task = Task::new("Завтрак", start(), 1800);
        task.category = doomed.name.clone();
        task.color = doomed.color.clone();
        task.icon = doomed.icon.clone();
        let tasks = vec![task];

        let mut selected = Some(doomed.id);
        remove_category(&mut categories, &mut selected, doomed.id);

        assert!(categories.iter().all(|c| c.id != doomed.id));
        assert_eq!(selected, None);
        assert_eq!(tasks[0].category, doomed.name);
        assert_eq!(tasks[0].color, doomed.color);
        assert_eq!(tasks[0].icon, doomed.icon);
    }

    #[test]
    fn deleting_one_category_keeps_an_unrelated_selection() {
        let mut categories = Category::defaults();
        let doomed = categories[0].id;
        let kept = categories[1].id;

        let mut selected = Some(kept);
        remove_category(&mut categories, &mut selected, doomed);

        assert_eq!(selected, Some(kept));
    }

    #[test]
    fn category_reorder_stays_in_bounds() {
        let mut categories = Category::defaults();
        let first = categories[0].id;
        let second = categories[1].id;

        assert!(!shift_category(&mut categories, first, -1));
        assert_eq!(categories[0].id, first);

        assert!(shift_category(&mut categories, first, 1));
        assert_eq!(categories[0].id, second);
        assert_eq!(categories[1].id, first);

        let last = categories[categories.len() - 1].id;
        assert!(!shift_category(&mut categories, last, 1));
    }

    #[test]
    fn only_the_latest_generation_writes() {
        let mut debounce = SaveDebounce::default();
        let first = debounce.arm();
        let second = debounce.arm();
        assert!(!debounce.should_write(first));
        assert!(debounce.should_write(second));
        assert!(!debounce.should_write(0));
    }
}
