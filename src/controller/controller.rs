use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::api::{CodeRequest, ReflectRequest, RequestError, TutorBackend};
use crate::controller::view::{
    EMPTY_EXPLANATION_ALERT, EVALUATING_PLACEHOLDER, PASS_MARKER, RUNNING_PLACEHOLDER,
    THINKING_PLACEHOLDER, ViewModel,
};
use crate::editor::EditorBuffer;
use crate::lesson::NoteCursor;
use crate::theme::{ThemeMode, ThemeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Run,
    Help,
    Reflect,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Run => "run",
            ActionKind::Help => "help",
            ActionKind::Reflect => "reflect",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    Completed {
        kind: ActionKind,
        seq: u64,
        outcome: Result<String, RequestError>,
    },
    ThemeChanged(ThemeMode),
}

/// Handle to one in-flight round trip. Cancelling it leaves the region on
/// its placeholder.
#[derive(Debug, Clone)]
pub struct ActionHandle {
    kind: ActionKind,
    seq: u64,
    abort: AbortHandle,
}

impl ActionHandle {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Mediates between the user and the three backend actions.
///
/// Invoking an action while an earlier one of the same kind is still in
/// flight supersedes it: the older task is aborted and, should its reply
/// still arrive, it is dropped. Different kinds run independently since
/// each owns its own region.
pub struct EditorController<B: TutorBackend> {
    backend: Arc<B>,
    view: ViewModel,
    theme: ThemeStore,
    notes: NoteCursor,
    tx: mpsc::UnboundedSender<ControllerEvent>,
    rx: mpsc::UnboundedReceiver<ControllerEvent>,
    next_seq: u64,
    latest: HashMap<ActionKind, u64>,
    tasks: HashMap<ActionKind, JoinHandle<()>>,
    superseded: Vec<JoinHandle<()>>,
}

impl<B: TutorBackend> EditorController<B> {
    /// Set up a fresh session: default snippet in the editor, empty regions,
    /// reflection hidden, glyph matching the loaded theme.
    pub fn new(backend: Arc<B>, mut theme: ThemeStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let glyph_tx = tx.clone();
        theme.subscribe(move |mode| {
            let _ = glyph_tx.send(ControllerEvent::ThemeChanged(mode));
        });

        Self {
            backend,
            view: ViewModel::new(theme.glyph()),
            theme,
            notes: NoteCursor::default(),
            tx,
            rx,
            next_seq: 0,
            latest: HashMap::new(),
            tasks: HashMap::new(),
            superseded: Vec::new(),
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn editor_mut(&mut self) -> &mut EditorBuffer {
        &mut self.view.editor
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.effective()
    }

    pub fn set_reflection_input(&mut self, text: impl Into<String>) {
        self.view.reflection_input = text.into();
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.view.dismiss_alert()
    }

    pub fn is_busy(&self, kind: ActionKind) -> bool {
        self.tasks.get(&kind).is_some_and(|task| !task.is_finished())
    }

    pub fn run(&mut self) -> ActionHandle {
        let code = self.view.editor.text().to_string();
        self.view.results_text = RUNNING_PLACEHOLDER.to_string();

        let backend = Arc::clone(&self.backend);
        self.dispatch(ActionKind::Run, code.len(), async move {
            backend.run(CodeRequest { code }).await.map(|r| r.result)
        })
    }

    pub fn help(&mut self) -> ActionHandle {
        let code = self.view.editor.text().to_string();
        self.view.chat_text = THINKING_PLACEHOLDER.to_string();

        let backend = Arc::clone(&self.backend);
        self.dispatch(ActionKind::Help, code.len(), async move {
            backend.help(CodeRequest { code }).await.map(|r| r.response)
        })
    }

    /// Submit the reflection. An empty (or whitespace-only) explanation
    /// raises the alert instead and sends nothing.
    pub fn reflect(&mut self) -> Option<ActionHandle> {
        let explanation = self.view.reflection_input.trim().to_string();
        if explanation.is_empty() {
            debug!("reflection blocked: empty explanation");
            self.view.alert = Some(EMPTY_EXPLANATION_ALERT.to_string());
            return None;
        }

        let code = self.view.editor.text().to_string();
        self.view.reflection_feedback = EVALUATING_PLACEHOLDER.to_string();
        self.view.reflection_feedback_visible = true;

        let backend = Arc::clone(&self.backend);
        Some(self.dispatch(ActionKind::Reflect, code.len(), async move {
            backend
                .reflect(ReflectRequest { code, explanation })
                .await
                .map(|r| r.feedback)
        }))
    }

    /// Flip light/dark, persist it, and update the toggle glyph. Pending
    /// replies stay queued for the next `process_events`.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        let mode = self.theme.toggle();
        info!(theme = mode.as_str(), "theme toggled");
        self.view.theme_glyph = mode.glyph();
        mode
    }

    /// Put the next concept note into the chat region. Purely local.
    pub fn show_next_note(&mut self) {
        let note = self.notes.advance();
        debug!(note = note.key, "showing concept note");
        self.view.chat_text = note.render();
    }

    pub fn reset_editor(&mut self) {
        self.view.editor = EditorBuffer::default();
    }

    /// Apply every event that has arrived so far. Returns whether the view
    /// changed.
    pub fn process_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Wait for every in-flight action to finish or be cancelled, then apply
    /// what they produced.
    pub async fn settle(&mut self) {
        let mut pending: Vec<JoinHandle<()>> = self.superseded.drain(..).collect();
        pending.extend(self.tasks.drain().map(|(_, task)| task));
        for task in pending {
            let _ = task.await;
        }
        self.process_events();
    }

    fn dispatch<F>(&mut self, kind: ActionKind, code_len: usize, call: F) -> ActionHandle
    where
        F: Future<Output = Result<String, RequestError>> + Send + 'static,
    {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest.insert(kind, seq);
        info!(action = kind.as_str(), seq, code_len, "dispatching request");

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let outcome = call.await;
            let _ = tx.send(ControllerEvent::Completed { kind, seq, outcome });
        });
        let abort = task.abort_handle();

        if let Some(stale) = self.tasks.insert(kind, task) {
            if !stale.is_finished() {
                debug!(action = kind.as_str(), "superseding in-flight request");
            }
            stale.abort();
            self.superseded.retain(|task| !task.is_finished());
            self.superseded.push(stale);
        }

        ActionHandle { kind, seq, abort }
    }

    fn apply(&mut self, event: ControllerEvent) -> bool {
        match event {
            ControllerEvent::ThemeChanged(mode) => {
                self.view.theme_glyph = mode.glyph();
                true
            }
            ControllerEvent::Completed { kind, seq, outcome } => {
                if self.latest.get(&kind) != Some(&seq) {
                    debug!(action = kind.as_str(), seq, "dropping stale reply");
                    return false;
                }
                if let Err(e) = &outcome {
                    warn!(action = kind.as_str(), seq, error = %e, "request failed");
                } else {
                    debug!(action = kind.as_str(), seq, "request completed");
                }
                match kind {
                    ActionKind::Run => self.finish_run(outcome),
                    ActionKind::Help => {
                        self.view.chat_text = render_outcome(outcome);
                    }
                    ActionKind::Reflect => {
                        self.view.reflection_feedback = render_outcome(outcome);
                    }
                }
                true
            }
        }
    }

    fn finish_run(&mut self, outcome: Result<String, RequestError>) {
        match outcome {
            Ok(result) => {
                let passed = result.contains(PASS_MARKER);
                self.view.results_text = result;
                if passed {
                    self.view.reflection_visible = true;
                    self.view.reflection_input.clear();
                    self.view.reflection_feedback_visible = false;
                } else {
                    self.view.reflection_visible = false;
                }
            }
            Err(e) => self.view.results_text = error_text(&e),
        }
    }
}

fn render_outcome(outcome: Result<String, RequestError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(e) => error_text(&e),
    }
}

fn error_text(err: &RequestError) -> String {
    format!("Error: {}", err)
}
