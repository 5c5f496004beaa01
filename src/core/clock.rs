use chrono::{NaiveTime, Timelike};

/// Geometry of the 24-hour dial.
///
/// 0:00 sits at the top of the face, so every angle carries a fixed −90°
/// rotation from the usual "0° points right" convention. One hour spans 15°,
/// one minute 0.25°.

pub const DEG_PER_HOUR: f32 = 15.0;
pub const DEG_PER_MINUTE: f32 = DEG_PER_HOUR / 60.0;

/// Angle in degrees for a wall-clock time.
pub fn angle_for_time(time: NaiveTime) -> f32 {
    let total_minutes = (time.hour() * 60 + time.minute()) as f32;
    total_minutes / 4.0 - 90.0
}

/// Inverse of [`angle_for_time`], rounded to the minute.
pub fn time_at_angle(degrees: f32) -> NaiveTime {
    let normalized = (degrees + 90.0).rem_euclid(360.0);
    let total_minutes = (normalized / DEG_PER_MINUTE).round() as u32 % (24 * 60);
    NaiveTime::from_hms_opt(total_minutes / 60, total_minutes % 60, 0)
        .unwrap_or(NaiveTime::MIN)
}

/// Time under a pointer position, given the dial center.
pub fn time_at_point(x: f32, y: f32, center_x: f32, center_y: f32) -> NaiveTime {
    let degrees = (y - center_y).atan2(x - center_x).to_degrees();
    time_at_angle(degrees)
}

/// Start and end angles for a task arc.
///
/// An arc that crosses midnight gets 360° added to its end angle so the
/// sweep (and the midpoint its icon hangs from) goes the short way forward
/// instead of backwards around the dial.
pub fn arc_angles(start: NaiveTime, end: NaiveTime) -> (f32, f32) {
    let start_deg = angle_for_time(start);
    let mut end_deg = angle_for_time(end);
    if end_deg < start_deg {
        end_deg += 360.0;
    }
    (start_deg, end_deg)
}

pub fn arc_midpoint(start_deg: f32, end_deg: f32) -> f32 {
    (start_deg + end_deg) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn midnight_points_up() {
        assert_eq!(angle_for_time(t(0, 0)), -90.0);
        assert_eq!(angle_for_time(t(12, 0)), 90.0);
        assert_eq!(angle_for_time(t(18, 0)), 180.0);
    }

    #[test]
    fn angle_and_time_are_inverse_to_the_minute() {
        for h in 0..24 {
            for m in (0..60).step_by(7) {
                let time = t(h, m);
                assert_eq!(time_at_angle(angle_for_time(time)), time);
            }
        }
    }

    #[test]
    fn negative_angles_normalize() {
        assert_eq!(time_at_angle(-90.0), t(0, 0));
        assert_eq!(time_at_angle(-105.0), t(23, 0));
        assert_eq!(time_at_angle(270.0), t(0, 0));
    }

    #[test]
    fn pointer_position_maps_to_time() {
        // Directly right of center is 6:00 on a dial with 0:00 up.
        assert_eq!(time_at_point(10.0, 0.0, 0.0, 0.0), t(6, 0));
        // Straight down is 12:00.
        assert_eq!(time_at_point(0.0, 10.0, 0.0, 0.0), t(12, 0));
        // Straight up is 0:00.
        assert_eq!(time_at_point(0.0, -10.0, 0.0, 0.0), t(0, 0));
    }

    #[test]
    fn arc_crossing_midnight_extends_end_angle() {
        let (s, e) = arc_angles(t(23, 0), t(1, 0));
        assert_eq!(s, 255.0);
        assert_eq!(e, 285.0);
        // Midpoint lands on the 0:00 direction, not the 12:00 one.
        assert_eq!(arc_midpoint(s, e), 270.0);
    }

    #[test]
    fn plain_arc_keeps_its_angles() {
        let (s, e) = arc_angles(t(9, 0), t(10, 30));
        assert_eq!(s, 45.0);
        assert_eq!(e, 67.5);
    }
}
