//! Exercise content shown alongside the editor: the goal, the visible test
//! cases, and a few concept notes the student can page through offline.

pub mod notes;

pub use notes::{CONCEPT_NOTES, ConceptNote, NoteCursor};

pub const TITLE: &str = "Learn Recursion by Doing";
pub const GOAL: &str = "Write a function `factorial(n)` that returns n!";

/// `(n, factorial(n))` pairs the grader checks.
pub const TEST_CASES: &[(u64, u64)] = &[(0, 1), (3, 6), (5, 120)];

pub fn test_case_lines() -> Vec<String> {
    TEST_CASES
        .iter()
        .map(|(n, expected)| format!("factorial({}) = {}", n, expected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_render_like_the_grader() {
        assert_eq!(
            test_case_lines(),
            vec!["factorial(0) = 1", "factorial(3) = 6", "factorial(5) = 120"]
        );
    }
}
