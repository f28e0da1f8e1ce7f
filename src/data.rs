use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekday axis of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Time-slot axis of the timetable. slot1-slot4 are the regular teaching
/// slots; slot5 is reserved for evening courses and seminars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Slot1,
    Slot2,
    Slot3,
    Slot4,
    Slot5,
}

impl SlotId {
    pub const REGULAR: [SlotId; 4] = [SlotId::Slot1, SlotId::Slot2, SlotId::Slot3, SlotId::Slot4];
    pub const EVENING: SlotId = SlotId::Slot5;
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotId::Slot1 => "slot1",
            SlotId::Slot2 => "slot2",
            SlotId::Slot3 => "slot3",
            SlotId::Slot4 => "slot4",
            SlotId::Slot5 => "slot5",
        };
        write!(f, "{}", name)
    }
}

/// Day pairs with at least one free day between the two sessions. Two-session
/// lecture placement only ever uses these combinations.
pub const VALID_DAY_PAIRS: [(Day, Day); 6] = [
    (Day::Mon, Day::Wed),
    (Day::Mon, Day::Thu),
    (Day::Mon, Day::Fri),
    (Day::Tue, Day::Thu),
    (Day::Tue, Day::Fri),
    (Day::Wed, Day::Fri),
];

/// A course to be placed on the timetable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub instructor: String,
    #[serde(default = "default_credits")]
    pub credits: i64,
    #[serde(default)]
    pub has_lab: bool,
    #[serde(default)]
    pub is_seminar: bool,
    #[serde(default)]
    pub is_evening: bool,
}

fn default_credits() -> i64 {
    4
}

/// A room, either a regular classroom or a lab.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    #[serde(default)]
    pub is_lab: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Lecture,
    Lab,
    Seminar,
}

/// One placed session: a course meeting a venue at (day, slot). Created only
/// after availability has been confirmed, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub course_id: String,
    pub venue_id: String,
    pub day: Day,
    pub time_slot_id: SlotId,
    pub session_type: SessionType,
}

/// Outcome of an optional session (lab or seminar) for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionOutcome {
    /// The session was placed and has a schedule entry.
    Scheduled,
    /// The course requested the session but no candidate fit; the course
    /// itself stays scheduled.
    Omitted,
    /// The course did not request the session.
    NotRequested,
}

/// Per-course placement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutcome {
    pub course_id: String,
    pub placed: bool,
    pub lab: SessionOutcome,
    pub seminar: SessionOutcome,
}

/// The complete input for one generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableInput {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub venues: Vec<Venue>,
}

/// The final output of the generator.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableOutput {
    pub entries: Vec<ScheduleEntry>,
    pub unscheduled: Vec<String>,
    pub outcomes: Vec<CourseOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_defaults_apply_when_fields_absent() {
        let course: Course =
            serde_json::from_value(json!({"id": "C1", "instructor": "I1"})).unwrap();
        assert_eq!(course.credits, 4);
        assert!(!course.has_lab);
        assert!(!course.is_seminar);
        assert!(!course.is_evening);
    }

    #[test]
    fn venue_is_lab_defaults_to_false() {
        let venue: Venue = serde_json::from_value(json!({"id": "V1"})).unwrap();
        assert!(!venue.is_lab);
    }

    #[test]
    fn input_arrays_default_to_empty() {
        let input: TimetableInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.courses.is_empty());
        assert!(input.venues.is_empty());
    }

    #[test]
    fn entry_serializes_with_wire_field_names() {
        let entry = ScheduleEntry {
            course_id: "C1".to_string(),
            venue_id: "V1".to_string(),
            day: Day::Mon,
            time_slot_id: SlotId::Slot1,
            session_type: SessionType::Lecture,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "courseId": "C1",
                "venueId": "V1",
                "day": "Mon",
                "timeSlotId": "slot1",
                "sessionType": "lecture",
            })
        );
    }

    #[test]
    fn day_pairs_keep_a_day_of_separation() {
        for (d1, d2) in VALID_DAY_PAIRS {
            let gap = Day::ALL.iter().position(|&d| d == d2).unwrap() as isize
                - Day::ALL.iter().position(|&d| d == d1).unwrap() as isize;
            assert!(gap >= 2, "{d1}/{d2} are adjacent");
        }
    }
}
