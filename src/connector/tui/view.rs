use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::domain::Message;

use super::app::ChatApp;

const TITLE: &str = "Algolia Transformations Chatbot";
const HINT: &str = "Start typing to find existing data transformations or generate a new one";
const LOADING: &str = "Generating transformation...";
const MAX_VISIBLE_SUGGESTIONS: usize = 5;

pub fn draw(frame: &mut Frame, app: &mut ChatApp) {
    let suggestion_rows = app.suggestions().len().min(MAX_VISIBLE_SUGGESTIONS) as u16;
    let suggestion_height = if suggestion_rows > 0 {
        suggestion_rows + 2
    } else {
        0
    };

    let [header, transcript, suggestions, input] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(suggestion_height),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_transcript(frame, transcript, app);
    if suggestion_height > 0 {
        draw_suggestions(frame, suggestions, app);
    }
    draw_input(frame, input, app);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(HINT, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, app: &mut ChatApp) {
    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);

    let mut lines = transcript_lines(app.history(), inner.width as usize);
    if app.is_loading() {
        lines.push(Line::from(Span::styled(
            LOADING,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let total = lines.len() as u16;
    let max_scroll = total.saturating_sub(inner.height);
    app.clamp_scroll(max_scroll);
    let offset = max_scroll - app.scroll_back();

    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((offset, 0)),
        area,
    );
}

fn draw_suggestions(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let items: Vec<ListItem> = app
        .suggestions()
        .iter()
        .map(|s| ListItem::new(s.title().to_string()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Suggestions"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(app.selected());
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let title = if app.is_loading() {
        "Type your message (waiting for reply)"
    } else {
        "Type your message"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    // Keep the end of long input visible
    let width = inner.width.saturating_sub(1) as usize;
    let visible: String = {
        let chars: Vec<char> = app.input().chars().collect();
        let start = chars.len().saturating_sub(width);
        chars[start..].iter().collect()
    };
    let cursor_x = inner.x + visible.chars().count() as u16;

    frame.render_widget(Paragraph::new(visible).block(block), area);
    frame.set_cursor_position((cursor_x, inner.y));
}

/// Render messages as pre-wrapped lines so the scroll offset is exact.
pub fn transcript_lines(history: &[Message], width: usize) -> Vec<Line<'static>> {
    let width = width.max(10);
    let mut lines = Vec::new();

    for message in history {
        lines.push(Line::from(Span::styled(
            message.from().display_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        for paragraph in message.text().lines() {
            for row in wrap_words(paragraph, width) {
                lines.push(Line::from(row));
            }
        }

        if let Some(code) = message.code() {
            let code_style = Style::default().fg(Color::Cyan);
            for source_line in code.lines() {
                for row in wrap_chars(source_line, width.saturating_sub(2).max(1)) {
                    lines.push(Line::from(Span::styled(format!("  {row}"), code_style)));
                }
            }
        }

        lines.push(Line::default());
    }

    lines
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in wrap_chars(word, width) {
            let needed = if current.is_empty() {
                piece.chars().count()
            } else {
                current.chars().count() + 1 + piece.chars().count()
            };
            if needed > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Hard wrap at `width` characters, preserving leading whitespace.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_words_breaks_on_spaces() {
        let rows = wrap_words("What kind of transformation are you trying", 16);
        assert_eq!(rows, vec!["What kind of", "transformation", "are you trying"]);
    }

    #[test]
    fn wrap_words_splits_long_words() {
        let rows = wrap_words("abcdefghij", 4);
        assert_eq!(rows, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_chars_keeps_indentation() {
        let rows = wrap_chars("    return r;", 8);
        assert_eq!(rows, vec!["    retu", "rn r;"]);
    }

    #[test]
    fn transcript_renders_name_text_code_and_spacer() {
        let history = vec![
            Message::user("remove sku"),
            Message::bot("I found a transformation that matches your request:\n")
                .with_code("function f(r){\n  return r;\n}"),
        ];

        let lines = transcript_lines(&history, 80);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

        assert_eq!(rendered[0], "You");
        assert_eq!(rendered[1], "remove sku");
        assert_eq!(rendered[2], "");
        assert_eq!(rendered[3], "Algolia AI");
        assert_eq!(rendered[4], "I found a transformation that matches your request:");
        assert_eq!(rendered[5], "  function f(r){");
        assert_eq!(rendered[6], "    return r;");
        assert_eq!(rendered[7], "  }");
        assert_eq!(rendered[8], "");
    }
}
