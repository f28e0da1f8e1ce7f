use crate::data::Course;
use crate::selection::SelectionOrder;
use std::cmp::Reverse;

/// Produces the processing order for the assignment engine: a random
/// permutation first, so equal-priority courses vary across runs, then a
/// stable sort putting lab courses first, then seminars, then higher credit
/// counts. Each course is visited exactly once.
pub fn order_courses<S: SelectionOrder>(courses: &[Course], select: &mut S) -> Vec<Course> {
    let mut ordered = courses.to_vec();
    select.permute(&mut ordered);
    ordered.sort_by_key(|c| (Reverse(c.has_lab), Reverse(c.is_seminar), Reverse(c.credits)));
    ordered
}
