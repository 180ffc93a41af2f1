//! Compose field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{compose_state::ComposeState, shell_state::ActivePane};

use super::styles;

/// Placeholder text shown when the input is not focused and empty.
const PLACEHOLDER_TEXT: &str = "Press 'i' to type, Enter to send...";

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

const SENDING_TITLE: &str = "Sending...";

/// Renders the compose field below the message list.
pub fn render_compose(
    frame: &mut Frame<'_>,
    area: Rect,
    compose: &ComposeState,
    active_pane: ActivePane,
    sending: bool,
) {
    let is_focused = active_pane == ActivePane::Compose;

    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if sending {
        block = block.title(SENDING_TITLE);
    }

    let paragraph = Paragraph::new(build_input_line(compose, is_focused)).block(block);
    frame.render_widget(paragraph, area);

    if is_focused {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.len() as u16)
            .saturating_add(compose.cursor_position().min(u16::MAX as usize) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn build_input_line(compose: &ComposeState, is_focused: bool) -> Line<'static> {
    let prompt_style = styles::input_prompt_style();

    if !is_focused && compose.is_empty() {
        return Line::from(vec![
            Span::styled(PROMPT_SYMBOL.to_owned(), prompt_style),
            Span::styled(
                PLACEHOLDER_TEXT.to_owned(),
                styles::input_placeholder_style(),
            ),
        ]);
    }

    Line::from(vec![
        Span::styled(PROMPT_SYMBOL.to_owned(), prompt_style),
        Span::styled(compose.text().to_owned(), styles::input_text_style()),
    ])
}
