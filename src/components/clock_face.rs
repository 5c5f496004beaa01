use chrono::{NaiveDateTime, NaiveTime, Timelike};
use uuid::Uuid;

use cosmic::iced::alignment;
use cosmic::iced::mouse::{self, Cursor};
use cosmic::iced::widget::canvas::{self, Canvas, Event, Frame, Geometry, Path, Stroke, Text, event, path, stroke};
use cosmic::iced::{Color, Length, Pixels, Point, Radians, Rectangle};
use cosmic::Element;

use crate::core::clock::{self, DEG_PER_MINUTE};
use crate::core::color::parse_hex;
use crate::core::task::Task;
use crate::message::Message;

/// Grab zone at the trailing edge of an arc, in degrees (16 minutes).
const RESIZE_EDGE_DEG: f32 = 4.0;

/// The 24-hour dial: one full turn is a day, 0:00 at the top. Tasks render
/// as arcs on a ring band; dragging an arc moves it, dragging its trailing
/// edge resizes it, and pressing empty dial space creates a task there.
pub struct ClockFace {
    tasks: Vec<Task>,
    now: NaiveDateTime,
    face_color: Color,
    /// Name tag of the selected category; arcs outside it are dimmed.
    selected: Option<String>,
}

pub fn clock_face(
    tasks: Vec<Task>,
    now: NaiveDateTime,
    face_hex: &str,
    selected: Option<String>,
) -> Element<'static, Message> {
    let face_color = parse_hex(face_hex)
        .map(|(r, g, b)| Color::from_rgb8(r, g, b))
        .unwrap_or(Color::WHITE);

    Canvas::new(ClockFace {
        tasks,
        now,
        face_color,
        selected,
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

#[derive(Default)]
pub struct Interaction {
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy)]
enum Drag {
    /// Press on empty dial space; becomes a create on release unless it moved.
    Pending { time: NaiveTime, moved: bool },
    Move { id: Uuid, grab_offset_min: i64 },
    Resize { id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitZone {
    Body,
    TrailingEdge,
}

impl canvas::Program<Message, cosmic::Theme> for ClockFace {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Message>) {
        // Handle release before the bounds guard: the pointer may leave the
        // canvas mid-drag, and the drag still has to end and save.
        if let Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) = event {
            return match state.drag.take() {
                Some(Drag::Pending { time, moved: false })
                    if cursor.position_in(bounds).is_some() =>
                {
                    (event::Status::Captured, Some(Message::CreateTaskAt(time)))
                }
                Some(Drag::Pending { .. }) => (event::Status::Captured, None),
                Some(_) => (event::Status::Captured, Some(Message::DragEnded)),
                None => (event::Status::Ignored, None),
            };
        }

        let Some(position) = cursor.position_in(bounds) else {
            return (event::Status::Ignored, None);
        };
        let geometry = DialGeometry::for_bounds(bounds);

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let angle = geometry.angle_at(position);
                if geometry.in_band(position) {
                    if let Some((id, zone)) = hit_arc(&self.tasks, angle) {
                        state.drag = Some(match zone {
                            HitZone::TrailingEdge => Drag::Resize { id },
                            HitZone::Body => {
                                let pointer_min = minutes_at_angle(angle);
                                let start_min = self
                                    .tasks
                                    .iter()
                                    .find(|t| t.id == id)
                                    .map(|t| minutes_of(t.start.time()))
                                    .unwrap_or(pointer_min);
                                Drag::Move {
                                    id,
                                    grab_offset_min: (pointer_min - start_min).rem_euclid(24 * 60),
                                }
                            }
                        });
                        return (event::Status::Captured, None);
                    }
                }
                if geometry.on_dial(position) {
                    state.drag = Some(Drag::Pending {
                        time: snap_to_5(clock::time_at_angle(angle)),
                        moved: false,
                    });
                    return (event::Status::Captured, None);
                }
                (event::Status::Ignored, None)
            }

            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let angle = geometry.angle_at(position);
                match state.drag {
                    Some(Drag::Move { id, grab_offset_min }) => {
                        let start_min =
                            (minutes_at_angle(angle) - grab_offset_min).rem_euclid(24 * 60);
                        let snapped = snap_minutes_to_5(start_min);
                        let time = NaiveTime::from_hms_opt(
                            (snapped / 60) as u32,
                            (snapped % 60) as u32,
                            0,
                        )
                        .unwrap_or(NaiveTime::MIN);
                        (event::Status::Captured, Some(Message::TaskMoved(id, time)))
                    }
                    Some(Drag::Resize { id }) => {
                        let secs = resize_duration(&self.tasks, id, angle);
                        (event::Status::Captured, Some(Message::TaskResized(id, secs)))
                    }
                    Some(Drag::Pending { time, .. }) => {
                        state.drag = Some(Drag::Pending { time, moved: true });
                        (event::Status::Captured, None)
                    }
                    None => (event::Status::Ignored, None),
                }
            }

            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &cosmic::Renderer,
        theme: &cosmic::Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let geometry = DialGeometry::for_bounds(bounds);
        let center = geometry.center;

        let cosmic = theme.cosmic();
        let on_bg: Color = cosmic.on_bg_color().into();
        let accent: Color = cosmic.accent_color().into();

        // Face
        frame.fill(&Path::circle(center, geometry.radius), self.face_color);
        frame.stroke(
            &Path::circle(center, geometry.radius),
            Stroke {
                style: stroke::Style::Solid(with_alpha(on_bg, 0.35)),
                width: 1.5,
                ..Stroke::default()
            },
        );

        // Hour ticks, heavier every three hours
        for hour in 0..24 {
            let deg = clock::angle_for_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));
            let major = hour % 3 == 0;
            let inner = if major {
                geometry.radius - 9.0
            } else {
                geometry.radius - 5.0
            };
            let tick = Path::new(|b| {
                b.move_to(geometry.point_at(inner, deg));
                b.line_to(geometry.point_at(geometry.radius, deg));
            });
            frame.stroke(
                &tick,
                Stroke {
                    style: stroke::Style::Solid(with_alpha(on_bg, if major { 0.8 } else { 0.4 })),
                    width: if major { 2.0 } else { 1.0 },
                    ..Stroke::default()
                },
            );

            if major {
                frame.fill_text(Text {
                    content: hour.to_string(),
                    position: geometry.point_at(geometry.radius - 20.0, deg),
                    color: with_alpha(on_bg, 0.7),
                    size: Pixels(11.0),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..Text::default()
                });
            }
        }

        // Task arcs
        let dragging = matches!(state.drag, Some(Drag::Move { .. } | Drag::Resize { .. }));
        for task in &self.tasks {
            let (start_deg, end_deg) = task_angles(task);
            let color = parse_hex(&task.color)
                .map(|(r, g, b)| Color::from_rgb8(r, g, b))
                .unwrap_or(accent);
            let alpha = arc_alpha(task, self.selected.as_deref());

            let arc = Path::new(|b| {
                b.arc(path::Arc {
                    center,
                    radius: geometry.band_radius,
                    start_angle: Radians(start_deg.to_radians()),
                    end_angle: Radians(end_deg.to_radians()),
                });
            });
            frame.stroke(
                &arc,
                Stroke {
                    style: stroke::Style::Solid(with_alpha(color, alpha)),
                    width: geometry.band_width,
                    line_cap: stroke::LineCap::Butt,
                    ..Stroke::default()
                },
            );

            // Marker dot hanging off the arc midpoint
            let mid_deg = clock::arc_midpoint(start_deg, end_deg);
            let marker = geometry.point_at(geometry.marker_radius(), mid_deg);
            frame.fill(&Path::circle(marker, 5.0), with_alpha(color, alpha));

            // Trailing-edge notch, the resize handle
            let notch = Path::new(|b| {
                b.move_to(geometry.point_at(
                    geometry.band_radius - geometry.band_width / 2.0,
                    end_deg,
                ));
                b.line_to(geometry.point_at(
                    geometry.band_radius + geometry.band_width / 2.0,
                    end_deg,
                ));
            });
            frame.stroke(
                &notch,
                Stroke {
                    style: stroke::Style::Solid(with_alpha(on_bg, alpha)),
                    width: 2.0,
                    line_cap: stroke::LineCap::Round,
                    ..Stroke::default()
                },
            );
        }

        // Current-time hand
        let now_deg = clock::angle_for_time(self.now.time());
        let hand = Path::new(|b| {
            b.move_to(center);
            b.line_to(geometry.point_at(geometry.radius - 24.0, now_deg));
        });
        frame.stroke(
            &hand,
            Stroke {
                style: stroke::Style::Solid(accent),
                width: 2.0,
                line_cap: stroke::LineCap::Round,
                ..Stroke::default()
            },
        );
        frame.fill(&Path::circle(center, 4.0), accent);

        // Date and time in the middle, skipped while dragging to keep the
        // arc under the pointer readable
        if !dragging {
            frame.fill_text(Text {
                content: self.now.format("%a, %e %b").to_string(),
                position: Point::new(center.x, center.y - 18.0),
                color: with_alpha(on_bg, 0.8),
                size: Pixels(13.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..Text::default()
            });
            frame.fill_text(Text {
                content: self.now.format("%H:%M").to_string(),
                position: Point::new(center.x, center.y + 16.0),
                color: on_bg,
                size: Pixels(22.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if matches!(state.drag, Some(Drag::Move { .. })) {
            return mouse::Interaction::Grabbing;
        }
        if matches!(state.drag, Some(Drag::Resize { .. })) {
            return mouse::Interaction::ResizingHorizontally;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let geometry = DialGeometry::for_bounds(bounds);
        if geometry.in_band(position) {
            let angle = geometry.angle_at(position);
            match hit_arc(&self.tasks, angle) {
                Some((_, HitZone::TrailingEdge)) => mouse::Interaction::ResizingHorizontally,
                Some((_, HitZone::Body)) => mouse::Interaction::Grab,
                None => mouse::Interaction::Crosshair,
            }
        } else if geometry.on_dial(position) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Pixel layout of the dial inside its bounds.
struct DialGeometry {
    center: Point,
    radius: f32,
    band_radius: f32,
    band_width: f32,
}

impl DialGeometry {
    fn for_bounds(bounds: Rectangle) -> Self {
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = (bounds.width.min(bounds.height) / 2.0 - 16.0).max(40.0);
        let band_width = radius * 0.26;
        Self {
            center,
            radius,
            band_radius: radius * 0.62,
            band_width,
        }
    }

    fn point_at(&self, radius: f32, deg: f32) -> Point {
        let rad = deg.to_radians();
        Point::new(
            self.center.x + radius * rad.cos(),
            self.center.y + radius * rad.sin(),
        )
    }

    fn angle_at(&self, position: Point) -> f32 {
        (position.y - self.center.y)
            .atan2(position.x - self.center.x)
            .to_degrees()
    }

    fn distance(&self, position: Point) -> f32 {
        let dx = position.x - self.center.x;
        let dy = position.y - self.center.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn in_band(&self, position: Point) -> bool {
        let d = self.distance(position);
        d >= self.band_radius - self.band_width / 2.0
            && d <= self.band_radius + self.band_width / 2.0
    }

    fn on_dial(&self, position: Point) -> bool {
        self.distance(position) <= self.radius
    }

    fn marker_radius(&self) -> f32 {
        self.band_radius + self.band_width / 2.0 + 9.0
    }
}

/// Arc angles for a task. A task lasting a day or more covers the whole
/// dial, which a start/end time pair alone cannot express.
fn task_angles(task: &Task) -> (f32, f32) {
    if task.duration_secs >= 24 * 3600 {
        let start_deg = clock::angle_for_time(task.start.time());
        return (start_deg, start_deg + 360.0);
    }
    clock::arc_angles(task.start.time(), task.end_time().time())
}

/// The task arc under `deg`, if any, and whether the pointer is close enough
/// to the trailing edge to count as a resize grab. Later tasks win overlaps,
/// matching draw order.
fn hit_arc(tasks: &[Task], deg: f32) -> Option<(Uuid, HitZone)> {
    let mut hit = None;
    for task in tasks {
        let (start_deg, end_deg) = task_angles(task);
        let span = end_deg - start_deg;
        let rel = (deg - start_deg).rem_euclid(360.0);
        if rel <= span {
            let zone = if span - rel <= RESIZE_EDGE_DEG {
                HitZone::TrailingEdge
            } else {
                HitZone::Body
            };
            hit = Some((task.id, zone));
        }
    }
    hit
}

fn resize_duration(tasks: &[Task], id: Uuid, deg: f32) -> i64 {
    let Some(task) = tasks.iter().find(|t| t.id == id) else {
        return 0;
    };
    let start_deg = clock::angle_for_time(task.start.time());
    let rel = (deg - start_deg).rem_euclid(360.0);
    let minutes = snap_minutes_to_5((rel / DEG_PER_MINUTE).round() as i64).max(5);
    minutes * 60
}

fn minutes_of(time: NaiveTime) -> i64 {
    (time.hour() * 60 + time.minute()) as i64
}

fn minutes_at_angle(deg: f32) -> i64 {
    minutes_of(clock::time_at_angle(deg))
}

fn snap_minutes_to_5(minutes: i64) -> i64 {
    ((minutes as f32 / 5.0).round() as i64 * 5).rem_euclid(24 * 60)
}

fn snap_to_5(time: NaiveTime) -> NaiveTime {
    let snapped = snap_minutes_to_5(minutes_of(time));
    NaiveTime::from_hms_opt((snapped / 60) as u32, (snapped % 60) as u32, 0)
        .unwrap_or(NaiveTime::MIN)
}

fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

fn arc_alpha(task: &Task, selected: Option<&str>) -> f32 {
    let base = if task.completed { 0.35 } else { 0.9 };
    match selected {
        Some(name) if task.category != name => base * 0.3,
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task_at(h: u32, m: u32, duration_min: i64) -> Task {
        let start = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        Task::new("T", start, duration_min * 60)
    }

    #[test]
    fn hit_resolves_body_and_trailing_edge() {
        let tasks = vec![task_at(9, 0, 120)]; // 9:00–11:00 spans 45°..75°
        assert_eq!(hit_arc(&tasks, 50.0), Some((tasks[0].id, HitZone::Body)));
        assert_eq!(
            hit_arc(&tasks, 74.0),
            Some((tasks[0].id, HitZone::TrailingEdge))
        );
        assert_eq!(hit_arc(&tasks, 80.0), None);
    }

    #[test]
    fn hit_works_across_midnight() {
        let tasks = vec![task_at(23, 0, 120)]; // 23:00–1:00, 255°..285°
        // 0:30 is at -82.5°, inside the wrapped arc
        assert!(hit_arc(&tasks, -82.5).is_some());
        assert!(hit_arc(&tasks, 90.0).is_none());
    }

    #[test]
    fn overlapping_arcs_resolve_to_the_last_drawn() {
        let first = task_at(9, 0, 120);
        let second = task_at(10, 0, 60);
        let tasks = vec![first, second.clone()];
        assert_eq!(hit_arc(&tasks, 62.0).map(|(id, _)| id), Some(second.id));
    }

    #[test]
    fn resize_snaps_to_five_minutes_with_a_floor() {
        let task = task_at(9, 0, 60);
        let id = task.id;
        let tasks = vec![task];
        // 9:00 is 45°; 52° is 28 minutes in, snapping to 30
        assert_eq!(resize_duration(&tasks, id, 52.0), 30 * 60);
        // Dragging behind the start clamps to the 5 minute floor
        assert_eq!(resize_duration(&tasks, id, 45.1), 5 * 60);
    }

    #[test]
    fn day_long_task_covers_the_whole_dial() {
        let task = task_at(9, 0, 24 * 60);
        let (start_deg, end_deg) = task_angles(&task);
        assert_eq!(end_deg - start_deg, 360.0);

        let id = task.id;
        let tasks = vec![task];
        // Any angle lands on the arc, including opposite the start
        assert_eq!(hit_arc(&tasks, 225.0).map(|(t, _)| t), Some(id));
    }

    #[test]
    fn zero_duration_task_stays_a_zero_arc() {
        let task = task_at(9, 0, 0);
        let (start_deg, end_deg) = task_angles(&task);
        assert_eq!(start_deg, end_deg);
    }

    #[test]
    fn release_outside_bounds_ends_the_drag() {
        use cosmic::iced::Size;
        use cosmic::iced::widget::canvas::Program;

        let face = ClockFace {
            tasks: Vec::new(),
            now: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            face_color: Color::WHITE,
            selected: None,
        };
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(400.0, 400.0));
        let release = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));

        let mut state = Interaction {
            drag: Some(Drag::Move {
                id: Uuid::new_v4(),
                grab_offset_min: 0,
            }),
        };
        let (status, message) =
            face.update(&mut state, release.clone(), bounds, Cursor::Unavailable);
        assert_eq!(status, event::Status::Captured);
        assert!(matches!(message, Some(Message::DragEnded)));
        assert!(state.drag.is_none());

        // A pending press released off-canvas is a cancel, not a create
        let mut state = Interaction {
            drag: Some(Drag::Pending {
                time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                moved: false,
            }),
        };
        let (_, message) = face.update(&mut state, release, bounds, Cursor::Unavailable);
        assert!(message.is_none());
        assert!(state.drag.is_none());
    }

    #[test]
    fn snapping_rounds_to_the_nearest_five() {
        assert_eq!(snap_to_5(NaiveTime::from_hms_opt(9, 3, 0).unwrap()),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(snap_to_5(NaiveTime::from_hms_opt(23, 59, 0).unwrap()),
            NaiveTime::MIN);
    }
}
