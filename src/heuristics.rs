//! Candidate orderings for slots, day pairs, and single days, driven by the
//! current occupancy so later courses spread around earlier assignments. All
//! sorts are stable; ties keep the calendar order.

use crate::data::{Course, Day, SlotId, VALID_DAY_PAIRS};
use crate::occupancy::Occupancy;

/// Slots a course may use, least loaded first. Evening courses are pinned to
/// the reserved evening slot.
pub fn candidate_slots(course: &Course, occupancy: &Occupancy) -> Vec<SlotId> {
    if course.is_evening {
        return vec![SlotId::EVENING];
    }
    let mut slots = SlotId::REGULAR.to_vec();
    slots.sort_by_key(|&s| occupancy.slot_load(s));
    slots
}

/// The six valid day pairs, ordered by the combined entry count of both days.
pub fn candidate_day_pairs(occupancy: &Occupancy) -> Vec<(Day, Day)> {
    let mut pairs = VALID_DAY_PAIRS.to_vec();
    pairs.sort_by_key(|&(d1, d2)| occupancy.day_load(d1) + occupancy.day_load(d2));
    pairs
}

/// All five days, least loaded first. Used for single-session courses.
pub fn candidate_days(occupancy: &Occupancy) -> Vec<Day> {
    let mut days = Day::ALL.to_vec();
    days.sort_by_key(|&d| occupancy.day_load(d));
    days
}
