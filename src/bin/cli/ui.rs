use crate::app::{App, Focus};
use crate::constants::{HELP_HINT, VERSION};
use crate::syntax::highlight_source;
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tutor_pad::controller::{ActionKind, PASS_MARKER};
use tutor_pad::lesson;
use unicode_width::UnicodeWidthStr;

pub(crate) fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.current_theme();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.text)),
        f.area(),
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, theme, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);

    render_editor_column(f, app, theme, columns[0]);
    render_output_column(f, app, theme, columns[1]);
    render_status_bar(f, app, theme, layout[2]);

    if let Some(alert) = app.view().alert.clone() {
        render_alert(f, theme, &alert, f.area());
    }
}

fn render_header(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = format!(" {} {} ", lesson::TITLE, VERSION);
    let glyph = format!("{} F8 ", app.view().theme_glyph);
    let pad = (area.width as usize)
        .saturating_sub(title.width() + glyph.width());

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::raw(glyph),
        ]),
        Line::from(format!(" Your goal: {}", lesson::GOAL)),
    ])
    .style(Style::default().fg(theme.text).bg(theme.header_bg));
    f.render_widget(header, area);
}

fn panel<'a>(title: &'a str, theme: &Theme, focused: bool) -> Block<'a> {
    let border = if focused { theme.accent } else { theme.muted };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.input_bg).fg(theme.text))
}

fn render_editor_column(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let cases = lesson::test_case_lines();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(cases.len() as u16 + 2),
        ])
        .split(area);

    let focused = app.focus == Focus::Editor && app.view().alert.is_none();
    let block = panel(" Your Code ", theme, focused);
    let inner = block.inner(chunks[0]);

    let editor = &app.view().editor;
    let (row, col) = editor.line_col();
    let text = editor.text();
    let selection = editor
        .selection()
        .map(|(start, end)| (byte_offset(text, start), byte_offset(text, end)));
    let lines = highlight_source(text, selection, theme);

    let line = editor.lines().nth(row).unwrap_or("");
    let prefix: String = line.chars().take(col).collect();
    let caret_x = prefix.width();

    // Keep the caret on screen in both directions.
    app.editor_scroll = follow(app.editor_scroll, row, inner.height as usize);
    app.editor_hscroll = follow(app.editor_hscroll, caret_x, inner.width as usize);

    let code = Paragraph::new(lines)
        .block(block)
        .scroll((app.editor_scroll as u16, app.editor_hscroll as u16));
    f.render_widget(code, chunks[0]);

    if focused {
        let x = inner.x + (caret_x - app.editor_hscroll) as u16;
        let y = inner.y + (row - app.editor_scroll) as u16;
        f.set_cursor_position(Position::new(x, y));
    }

    let tests = Paragraph::new(cases.join("\n"))
        .block(panel(" Test cases ", theme, false))
        .style(Style::default().fg(theme.muted));
    f.render_widget(tests, chunks[1]);
}

fn render_output_column(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let reflection_visible = app.view().reflection_visible;
    let constraints = if reflection_visible {
        vec![
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ]
    } else {
        vec![Constraint::Percentage(45), Constraint::Percentage(55)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let results = &app.view().results_text;
    let results_style = if results.starts_with("Error: ") {
        Style::default().fg(theme.error)
    } else if results.contains(PASS_MARKER) {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.text)
    };
    let title = if app.is_busy(ActionKind::Run) {
        " Results (running) "
    } else {
        " Results "
    };
    let results_para = Paragraph::new(results.as_str())
        .block(panel(title, theme, false))
        .style(results_style)
        .wrap(Wrap { trim: false });
    f.render_widget(results_para, chunks[0]);

    let title = if app.is_busy(ActionKind::Help) {
        " AI Tutor (thinking) "
    } else {
        " AI Tutor "
    };
    let chat = Paragraph::new(app.view().chat_text.as_str())
        .block(panel(title, theme, false))
        .wrap(Wrap { trim: false });
    f.render_widget(chat, chunks[1]);

    if reflection_visible {
        render_reflection(f, app, theme, chunks[2]);
    }
}

fn render_reflection(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let feedback_visible = app.view().reflection_feedback_visible;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if feedback_visible {
            [Constraint::Length(5), Constraint::Min(3)]
        } else {
            [Constraint::Min(3), Constraint::Length(0)]
        })
        .split(area);

    let focused = app.focus == Focus::Reflection && app.view().alert.is_none();
    let border = if focused { theme.accent } else { theme.muted };
    let cursor = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    app.reflection.set_style(Style::default().bg(theme.input_bg).fg(theme.text));
    app.reflection.set_cursor_style(cursor);
    app.reflection.set_cursor_line_style(Style::default());
    app.reflection.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Explain your solution (F7 submit) ")
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(&app.reflection, chunks[0]);

    if feedback_visible {
        let feedback = Paragraph::new(app.view().reflection_feedback.as_str())
            .block(panel(" Feedback ", theme, false))
            .wrap(Wrap { trim: false });
        f.render_widget(feedback, chunks[1]);
    }
}

fn render_status_bar(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let status = Line::from(vec![
        Span::styled(
            format!(" {} │ {} │ ", app.base_url, theme.name),
            Style::default().fg(theme.muted),
        ),
        Span::styled(HELP_HINT, Style::default().fg(theme.accent)),
    ]);
    f.render_widget(
        Paragraph::new(status).style(Style::default().bg(theme.status_bg)),
        area,
    );
}

fn render_alert(f: &mut Frame, theme: &Theme, message: &str, area: Rect) {
    let width = area.width.clamp(20, 50);
    let wrapped = textwrap::wrap(message, (width as usize).saturating_sub(4));
    let height = wrapped.len() as u16 + 4;
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    };

    let mut lines: Vec<Line> = wrapped.into_iter().map(|l| Line::from(l.into_owned())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press any key",
        Style::default().fg(theme.muted),
    )));

    f.render_widget(Clear, rect);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Notice ")
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.input_bg).fg(theme.text)),
    );
    f.render_widget(popup, rect);
}

/// Smallest change to `offset` that puts `pos` inside a window of `extent`
/// cells.
fn follow(offset: usize, pos: usize, extent: usize) -> usize {
    if pos < offset {
        pos
    } else if extent > 0 && pos >= offset + extent {
        pos + 1 - extent
    } else {
        offset
    }
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
