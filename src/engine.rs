use crate::data::{
    Course, CourseOutcome, Day, SessionOutcome, SessionType, SlotId, TimetableInput,
    TimetableOutput, Venue,
};
use crate::heuristics;
use crate::occupancy::Occupancy;
use crate::ordering;
use crate::selection::{RngOrder, SelectionOrder};
use itertools::Itertools;
use log::{debug, info};
use std::time::Instant;

/// Placement policy knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Slots tried for lab sessions, permuted per course. Defaults to the
    /// two afternoon slots.
    pub lab_slots: Vec<SlotId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lab_slots: vec![SlotId::Slot3, SlotId::Slot4],
        }
    }
}

/// Generates a timetable with a fresh thread-local random source and the
/// default placement policy.
pub fn generate(input: &TimetableInput) -> Result<TimetableOutput, String> {
    generate_with(input, RngOrder::new(rand::rng()), EngineConfig::default())
}

/// Generates a timetable with a caller-supplied selection order and config.
/// A seeded order makes the run fully deterministic.
///
/// This is a single greedy pass: courses are processed once in priority
/// order, each one takes the first candidate (slot, days, venue) combination
/// that passes the venue and instructor availability checks, and a course
/// whose primary sessions cannot be placed is reported as unscheduled
/// without any backtracking.
pub fn generate_with<S: SelectionOrder>(
    input: &TimetableInput,
    mut select: S,
    config: EngineConfig,
) -> Result<TimetableOutput, String> {
    validate(input)?;
    let start_time = Instant::now();
    info!(
        "Scheduling {} courses across {} venues...",
        input.courses.len(),
        input.venues.len()
    );

    let ordered = ordering::order_courses(&input.courses, &mut select);
    let mut engine = Engine::new(&input.venues, select, config);

    let mut outcomes = Vec::with_capacity(ordered.len());
    for course in &ordered {
        outcomes.push(engine.place_course(course));
    }

    let unscheduled: Vec<String> = outcomes
        .iter()
        .filter(|o| !o.placed)
        .map(|o| o.course_id.clone())
        .collect();
    let entries = engine.occupancy.into_entries();
    info!(
        "Placed {} sessions, {} courses unscheduled, in {:.2?}",
        entries.len(),
        unscheduled.len(),
        start_time.elapsed()
    );

    Ok(TimetableOutput {
        entries,
        unscheduled,
        outcomes,
    })
}

fn validate(input: &TimetableInput) -> Result<(), String> {
    for course in &input.courses {
        if course.id.is_empty() || course.instructor.is_empty() {
            return Err(format!(
                "invalid course entry: id {:?}, instructor {:?}",
                course.id, course.instructor
            ));
        }
    }
    for venue in &input.venues {
        if venue.id.is_empty() {
            return Err("invalid venue entry: empty id".to_string());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum VenuePool {
    Classroom,
    Lab,
}

/// One generation run. Owns the occupancy state and the selection order;
/// discarded when the run ends.
struct Engine<S: SelectionOrder> {
    classrooms: Vec<String>,
    labs: Vec<String>,
    occupancy: Occupancy,
    select: S,
    config: EngineConfig,
}

impl<S: SelectionOrder> Engine<S> {
    fn new(venues: &[Venue], select: S, config: EngineConfig) -> Self {
        let (labs, classrooms): (Vec<_>, Vec<_>) = venues.iter().partition(|v| v.is_lab);
        Self {
            classrooms: classrooms.into_iter().map(|v| v.id.clone()).collect(),
            labs: labs.into_iter().map(|v| v.id.clone()).collect(),
            occupancy: Occupancy::new(),
            select,
            config,
        }
    }

    /// Places one course: primary lecture sessions first, then the optional
    /// lab and seminar. Failure to place the primary sessions is final for
    /// this course; failure on an optional session never unschedules it.
    fn place_course(&mut self, course: &Course) -> CourseOutcome {
        let sessions_needed = if course.credits >= 4 { 2 } else { 1 };
        let slots = heuristics::candidate_slots(course, &self.occupancy);

        let placed = if sessions_needed == 2 {
            let pairs = heuristics::candidate_day_pairs(&self.occupancy);
            self.place_same_slot(course, &slots, &pairs)
                || self.place_split_slots(course, &slots, &pairs)
        } else {
            self.place_single(course, &slots)
        };

        if !placed {
            debug!("course {}: no primary placement found", course.id);
            return CourseOutcome {
                course_id: course.id.clone(),
                placed: false,
                lab: if course.has_lab {
                    SessionOutcome::Omitted
                } else {
                    SessionOutcome::NotRequested
                },
                seminar: if course.is_seminar {
                    SessionOutcome::Omitted
                } else {
                    SessionOutcome::NotRequested
                },
            };
        }

        let lab = if course.has_lab {
            self.place_lab(course)
        } else {
            SessionOutcome::NotRequested
        };
        let seminar = if course.is_seminar {
            self.place_seminar(course)
        } else {
            SessionOutcome::NotRequested
        };
        debug!(
            "course {}: placed (lab {:?}, seminar {:?})",
            course.id, lab, seminar
        );
        CourseOutcome {
            course_id: course.id.clone(),
            placed: true,
            lab,
            seminar,
        }
    }

    /// Phase A: both lecture sessions in the same slot on a valid day pair.
    fn place_same_slot(&mut self, course: &Course, slots: &[SlotId], pairs: &[(Day, Day)]) -> bool {
        for &slot in slots {
            for &(d1, d2) in pairs {
                if self.try_place(
                    course,
                    VenuePool::Classroom,
                    &[(d1, slot), (d2, slot)],
                    SessionType::Lecture,
                ) {
                    return true;
                }
            }
        }
        false
    }

    /// Phase B fallback: the two sessions may use different slots.
    fn place_split_slots(
        &mut self,
        course: &Course,
        slots: &[SlotId],
        pairs: &[(Day, Day)],
    ) -> bool {
        for &(d1, d2) in pairs {
            for (&s1, &s2) in slots.iter().cartesian_product(slots.iter()) {
                if self.try_place(
                    course,
                    VenuePool::Classroom,
                    &[(d1, s1), (d2, s2)],
                    SessionType::Lecture,
                ) {
                    return true;
                }
            }
        }
        false
    }

    fn place_single(&mut self, course: &Course, slots: &[SlotId]) -> bool {
        let days = heuristics::candidate_days(&self.occupancy);
        for &slot in slots {
            for &day in &days {
                if self.try_place(
                    course,
                    VenuePool::Classroom,
                    &[(day, slot)],
                    SessionType::Lecture,
                ) {
                    return true;
                }
            }
        }
        false
    }

    /// Lab sessions prefer a day without any of the course's other sessions;
    /// if none fits, any day is allowed as a second try.
    fn place_lab(&mut self, course: &Course) -> SessionOutcome {
        let used = self.occupancy.course_days(&course.id);
        let mut days: Vec<Day> = Day::ALL.into_iter().filter(|d| !used.contains(d)).collect();
        self.select.permute(&mut days);
        let mut slots = self.config.lab_slots.clone();
        self.select.permute(&mut slots);

        for &day in &days {
            for &slot in &slots {
                if self.try_place(course, VenuePool::Lab, &[(day, slot)], SessionType::Lab) {
                    return SessionOutcome::Scheduled;
                }
            }
        }
        for day in Day::ALL {
            for &slot in &slots {
                if self.try_place(course, VenuePool::Lab, &[(day, slot)], SessionType::Lab) {
                    return SessionOutcome::Scheduled;
                }
            }
        }
        SessionOutcome::Omitted
    }

    /// Seminars take the evening slot on a day without the course's other
    /// sessions. No same-day fallback.
    fn place_seminar(&mut self, course: &Course) -> SessionOutcome {
        let used = self.occupancy.course_days(&course.id);
        let mut days: Vec<Day> = Day::ALL.into_iter().filter(|d| !used.contains(d)).collect();
        self.select.permute(&mut days);

        for &day in &days {
            if self.try_place(
                course,
                VenuePool::Classroom,
                &[(day, SlotId::EVENING)],
                SessionType::Seminar,
            ) {
                return SessionOutcome::Scheduled;
            }
        }
        SessionOutcome::Omitted
    }

    /// The one placement primitive every phase composes: require the
    /// instructor free in every cell, search a freshly permuted venue pool
    /// for a venue free in every cell, then record one entry per cell.
    fn try_place(
        &mut self,
        course: &Course,
        pool: VenuePool,
        cells: &[(Day, SlotId)],
        session: SessionType,
    ) -> bool {
        if !cells
            .iter()
            .all(|&(day, slot)| self.occupancy.instructor_free(&course.instructor, day, slot))
        {
            return false;
        }
        let Some(venue) = self.find_venue(pool, cells) else {
            return false;
        };
        for &(day, slot) in cells {
            self.occupancy
                .record(&course.id, &venue, day, slot, &course.instructor, session);
        }
        true
    }

    fn find_venue(&mut self, pool: VenuePool, cells: &[(Day, SlotId)]) -> Option<String> {
        let mut venues = match pool {
            VenuePool::Classroom => self.classrooms.clone(),
            VenuePool::Lab => self.labs.clone(),
        };
        self.select.permute(&mut venues);
        venues.into_iter().find(|v| {
            cells
                .iter()
                .all(|&(day, slot)| self.occupancy.venue_free(v, day, slot))
        })
    }
}
