use crate::theme::{Theme, palette};
use ratatui::widgets::{Block, Borders};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tui_textarea::TextArea;
use tutor_pad::api::HttpBackend;
use tutor_pad::controller::{ActionKind, EditorController, ViewModel};
use tutor_pad::theme::{FileThemeStorage, ThemeStore};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    Editor,
    Reflection,
}

pub struct App {
    pub(crate) controller: EditorController<HttpBackend>,
    pub(crate) reflection: TextArea<'static>,
    pub(crate) focus: Focus,
    pub(crate) base_url: String,
    pub(crate) editor_scroll: usize,
    pub(crate) editor_hscroll: usize,
}

impl App {
    pub(crate) fn new(base_url: String, config_path: PathBuf) -> Result<Self, Box<dyn Error>> {
        let backend = Arc::new(HttpBackend::new(base_url.clone())?);
        let theme = ThemeStore::load(FileThemeStorage::new(config_path));
        info!(%base_url, theme = ?theme.get(), "session started");

        Ok(Self {
            controller: EditorController::new(backend, theme),
            reflection: Self::reflection_area(""),
            focus: Focus::Editor,
            base_url,
            editor_scroll: 0,
            editor_hscroll: 0,
        })
    }

    fn reflection_area(text: &str) -> TextArea<'static> {
        let mut area = TextArea::new(text.split('\n').map(str::to_string).collect());
        area.set_placeholder_text("How does your solution work? What is the base case?");
        area.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Explain your solution "),
        );
        area
    }

    pub(crate) fn view(&self) -> &ViewModel {
        self.controller.view()
    }

    pub(crate) fn current_theme(&self) -> &'static Theme {
        palette(self.controller.theme())
    }

    pub(crate) fn is_busy(&self, kind: ActionKind) -> bool {
        self.controller.is_busy(kind)
    }

    /// Drain finished requests and bring the widgets back in line with the
    /// view model.
    pub(crate) fn process_events(&mut self) {
        if self.controller.process_events() {
            self.sync_reflection();
        }
    }

    /// Push the reflection text box contents into the view model.
    pub(crate) fn on_reflection_edit(&mut self) {
        let text = self.reflection.lines().join("\n");
        self.controller.set_reflection_input(text);
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor if self.view().reflection_visible => Focus::Reflection,
            _ => Focus::Editor,
        };
    }

    fn sync_reflection(&mut self) {
        let view = self.controller.view();
        if !view.reflection_visible {
            self.focus = Focus::Editor;
        }
        if self.reflection.lines().join("\n") != view.reflection_input {
            self.reflection = Self::reflection_area(&view.reflection_input);
        }
    }
}
