#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConceptNote {
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const CONCEPT_NOTES: &[ConceptNote] = &[
    ConceptNote {
        key: "base_case",
        title: "Understanding Base Cases",
        body: "\
A recursive function with no base case never stops. Calling factorial(3)
calls factorial(2), then factorial(1), factorial(0), factorial(-1), and so on
forever. You need a guardrail that says where to stop:

    def factorial(n):
        if n == 0:
            return 1",
    },
    ConceptNote {
        key: "recursive_case",
        title: "Understanding Recursive Cases",
        body: "\
Think back to the definition: factorial(n) = n * factorial(n - 1).
Does that tell you how to compute factorial(n) once you know the answer for
a smaller n?

    def factorial(n):
        if n == 0:
            return 1
        return n * factorial(n - 1)",
    },
    ConceptNote {
        key: "trust_recursion",
        title: "Trust the Recursion",
        body: "\
You don't need to trace every call by hand. Trust that factorial(n - 1)
returns what you need, the same way you trust a car to start when you turn
the key without thinking about the engine. That trust is abstraction, and it
is what makes recursion manageable.",
    },
];

impl ConceptNote {
    /// Text placed in the chat region.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}

/// Cycles through [`CONCEPT_NOTES`] in order, wrapping at the end.
#[derive(Debug, Clone, Default)]
pub struct NoteCursor {
    next: usize,
}

impl NoteCursor {
    pub fn advance(&mut self) -> &'static ConceptNote {
        let note = &CONCEPT_NOTES[self.next % CONCEPT_NOTES.len()];
        self.next = (self.next + 1) % CONCEPT_NOTES.len();
        note
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_cycles_in_order() {
        let mut cursor = NoteCursor::default();
        let keys: Vec<&str> = (0..4).map(|_| cursor.advance().key).collect();
        assert_eq!(
            keys,
            vec!["base_case", "recursive_case", "trust_recursion", "base_case"]
        );
    }

    #[test]
    fn render_leads_with_title() {
        let text = CONCEPT_NOTES[1].render();
        assert!(text.starts_with("Understanding Recursive Cases\n\n"));
        assert!(text.contains("n * factorial(n - 1)"));
    }
}
