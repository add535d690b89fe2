use crate::editor::EditorBuffer;

pub const RUNNING_PLACEHOLDER: &str = "Running tests...";
pub const THINKING_PLACEHOLDER: &str = "AI Tutor is thinking...";
pub const EVALUATING_PLACEHOLDER: &str = "AI is evaluating your explanation...";
pub const EMPTY_EXPLANATION_ALERT: &str = "Please write an explanation first!";

/// Substring of a run result that unlocks the reflection section.
pub const PASS_MARKER: &str = "All tests passed!";

/// Everything a renderer needs to draw the exercise page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub editor: EditorBuffer,
    pub results_text: String,
    pub chat_text: String,
    pub reflection_visible: bool,
    pub reflection_input: String,
    pub reflection_feedback: String,
    pub reflection_feedback_visible: bool,
    pub theme_glyph: &'static str,
    /// Blocking notice; the renderer must keep it up until dismissed.
    pub alert: Option<String>,
}

impl ViewModel {
    pub fn new(theme_glyph: &'static str) -> Self {
        Self {
            editor: EditorBuffer::default(),
            results_text: String::new(),
            chat_text: String::new(),
            reflection_visible: false,
            reflection_input: String::new(),
            reflection_feedback: String::new(),
            reflection_feedback_visible: false,
            theme_glyph,
            alert: None,
        }
    }

    pub fn editor_text(&self) -> &str {
        self.editor.text()
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alert.take()
    }
}
