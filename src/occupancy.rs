use crate::data::{Day, ScheduleEntry, SessionType, SlotId};
use std::collections::{HashMap, HashSet};

/// Request-scoped occupancy state for one generation run.
///
/// Tracks which venues and instructors are claimed per (day, slot), keeps the
/// running per-slot load counters used for balancing, and accumulates the
/// schedule entries. Built fresh at the start of a run and discarded at its
/// end; never shared between runs.
#[derive(Debug, Default)]
pub struct Occupancy {
    /// (day, slot) -> occupying (venue id, course id) pairs.
    slots: HashMap<(Day, SlotId), HashSet<(String, String)>>,
    /// instructor -> claimed (day, slot) pairs.
    instructor_slots: HashMap<String, HashSet<(Day, SlotId)>>,
    /// Assignments made per slot across all days, any session type.
    slot_load: HashMap<SlotId, u32>,
    entries: Vec<ScheduleEntry>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no recorded assignment uses `venue_id` at (day, slot).
    pub fn venue_free(&self, venue_id: &str, day: Day, slot: SlotId) -> bool {
        self.slots
            .get(&(day, slot))
            .is_none_or(|occupants| !occupants.iter().any(|(v, _)| v == venue_id))
    }

    /// True iff the instructor has no claim on (day, slot).
    pub fn instructor_free(&self, instructor: &str, day: Day, slot: SlotId) -> bool {
        self.instructor_slots
            .get(instructor)
            .is_none_or(|claimed| !claimed.contains(&(day, slot)))
    }

    /// Records one placed session. This is the only mutation path: it inserts
    /// the occupancy record, claims the instructor slot, bumps the slot load
    /// counter, and appends the schedule entry in one step. Callers must have
    /// confirmed availability first.
    pub fn record(
        &mut self,
        course_id: &str,
        venue_id: &str,
        day: Day,
        slot: SlotId,
        instructor: &str,
        session_type: SessionType,
    ) {
        self.slots
            .entry((day, slot))
            .or_default()
            .insert((venue_id.to_string(), course_id.to_string()));
        self.instructor_slots
            .entry(instructor.to_string())
            .or_default()
            .insert((day, slot));
        *self.slot_load.entry(slot).or_insert(0) += 1;
        self.entries.push(ScheduleEntry {
            course_id: course_id.to_string(),
            venue_id: venue_id.to_string(),
            day,
            time_slot_id: slot,
            session_type,
        });
    }

    /// Total assignments made to `slot` so far, across all days.
    pub fn slot_load(&self, slot: SlotId) -> u32 {
        self.slot_load.get(&slot).copied().unwrap_or(0)
    }

    /// Number of entries already scheduled on `day`.
    pub fn day_load(&self, day: Day) -> usize {
        self.entries.iter().filter(|e| e.day == day).count()
    }

    /// Days on which the course already has any session.
    pub fn course_days(&self, course_id: &str) -> HashSet<Day> {
        self.entries
            .iter()
            .filter(|e| e.course_id == course_id)
            .map(|e| e.day)
            .collect()
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tracker_reports_everything_free() {
        let occ = Occupancy::new();
        assert!(occ.venue_free("V1", Day::Mon, SlotId::Slot1));
        assert!(occ.instructor_free("I1", Day::Mon, SlotId::Slot1));
        assert_eq!(occ.slot_load(SlotId::Slot1), 0);
        assert_eq!(occ.day_load(Day::Mon), 0);
    }

    #[test]
    fn record_claims_venue_instructor_and_load() {
        let mut occ = Occupancy::new();
        occ.record("C1", "V1", Day::Mon, SlotId::Slot2, "I1", SessionType::Lecture);

        assert!(!occ.venue_free("V1", Day::Mon, SlotId::Slot2));
        assert!(!occ.instructor_free("I1", Day::Mon, SlotId::Slot2));
        // Other cells are untouched.
        assert!(occ.venue_free("V1", Day::Tue, SlotId::Slot2));
        assert!(occ.venue_free("V1", Day::Mon, SlotId::Slot1));
        assert!(occ.instructor_free("I1", Day::Mon, SlotId::Slot1));
        assert!(occ.venue_free("V2", Day::Mon, SlotId::Slot2));

        assert_eq!(occ.slot_load(SlotId::Slot2), 1);
        assert_eq!(occ.day_load(Day::Mon), 1);
        assert_eq!(occ.into_entries().len(), 1);
    }

    #[test]
    fn slot_load_counts_every_session_type() {
        let mut occ = Occupancy::new();
        occ.record("C1", "V1", Day::Mon, SlotId::Slot3, "I1", SessionType::Lecture);
        occ.record("C2", "L1", Day::Tue, SlotId::Slot3, "I2", SessionType::Lab);
        assert_eq!(occ.slot_load(SlotId::Slot3), 2);
    }

    #[test]
    fn course_days_collects_all_session_days() {
        let mut occ = Occupancy::new();
        occ.record("C1", "V1", Day::Mon, SlotId::Slot1, "I1", SessionType::Lecture);
        occ.record("C1", "V1", Day::Wed, SlotId::Slot1, "I1", SessionType::Lecture);
        occ.record("C1", "L1", Day::Tue, SlotId::Slot3, "I1", SessionType::Lab);
        let days = occ.course_days("C1");
        assert_eq!(days, HashSet::from([Day::Mon, Day::Tue, Day::Wed]));
        assert!(occ.course_days("C2").is_empty());
    }
}
