use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{
    conversation::ConversationUiState,
    conversation_list::{ConversationListUiState, ConversationSummary},
    shell_state::{ActivePane, ShellState},
    viewport::{visible_window_start, ViewportObserver},
};
use crate::usecases::{load_conversation::LoadConversationError, session::ConversationSession};

use super::message_input::render_compose;
use super::message_rendering::build_message_lines;
use super::styles;

pub fn render(frame: &mut Frame<'_>, state: &ShellState, session: Option<&ConversationSession>) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    let [roster_area, thread_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .areas(content_area);

    let [messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(thread_area);

    render_roster_panel(frame, roster_area, state);
    render_messages_panel(frame, messages_area, state, session);
    render_compose(
        frame,
        input_area,
        state.compose(),
        state.active_pane(),
        session.is_some_and(ConversationSession::sending),
    );

    let status = Paragraph::new(status_line(state, session));
    frame.render_widget(status, status_area);
}

fn render_roster_panel(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let border_style = if state.active_pane() == ActivePane::Conversations {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let roster = state.conversation_list();
    match roster.ui_state() {
        ConversationListUiState::Loading => {
            render_roster_message(frame, area, "Loading conversations...", border_style);
        }
        ConversationListUiState::Empty => render_roster_message(
            frame,
            area,
            "No conversations yet. Message a friend to start one.",
            border_style,
        ),
        ConversationListUiState::Error => render_roster_message(
            frame,
            area,
            "Failed to load conversations. Check connection.",
            border_style,
        ),
        ConversationListUiState::Ready => {
            let items: Vec<ListItem<'_>> = roster
                .conversations()
                .iter()
                .map(roster_item)
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!("Conversations ({})", roster.conversations().len()))
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(
                    ratatui::style::Style::default()
                        .add_modifier(ratatui::style::Modifier::REVERSED),
                );

            let mut list_state = ListState::default();
            list_state.select(roster.selected_index());
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_roster_message(frame: &mut Frame<'_>, area: Rect, message: &str, border_style: ratatui::style::Style) {
    let paragraph = Paragraph::new(message).block(
        Block::default()
            .title("Conversations")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

fn roster_item(summary: &ConversationSummary) -> ListItem<'static> {
    let mut name_spans = vec![Span::styled(
        summary.display_label().to_owned(),
        styles::conversation_name_style(),
    )];
    if summary.unread > 0 {
        name_spans.push(Span::styled(
            format!("  ({})", summary.unread),
            styles::unread_badge_style(),
        ));
    }

    let preview = Span::styled(
        summary
            .last_message_preview
            .clone()
            .unwrap_or_else(|| "—".to_owned()),
        styles::conversation_preview_style(),
    );

    ListItem::new(vec![Line::from(name_spans), Line::from(vec![preview])])
}

fn render_messages_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &ShellState,
    session: Option<&ConversationSession>,
) {
    let border_style = if state.active_pane() == ActivePane::Messages {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let Some(session) = session else {
        let paragraph = Paragraph::new("Select a conversation and press Enter.").block(
            Block::default()
                .title("Messages")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(paragraph, area);
        return;
    };

    let peer_label = session
        .peer_display_name()
        .unwrap_or_else(|| session.peer_id())
        .to_owned();

    let mut block = Block::default()
        .title(peer_label.clone())
        .borders(Borders::ALL)
        .border_style(border_style);

    let unread = session.state().unread_count();
    if unread > 0 && !state.viewport().at_bottom() {
        block = block.title_bottom(
            Line::from(Span::styled(
                indicator_text(unread),
                styles::new_messages_indicator_style(),
            ))
            .right_aligned(),
        );
    }

    match session.state().ui_state() {
        ConversationUiState::Loading => {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
        }
        ConversationUiState::Error => {
            frame.render_widget(
                Paragraph::new(LoadConversationError::TemporarilyUnavailable.user_message())
                    .block(block),
                area,
            );
        }
        ConversationUiState::Ready => {
            if session.state().messages().is_empty() {
                frame.render_widget(Paragraph::new("No messages yet.").block(block), area);
                return;
            }

            let inner_width = area.width.saturating_sub(2) as usize;
            let viewport_rows = area.height.saturating_sub(2) as usize;
            let lines = build_message_lines(
                session.state().messages(),
                session.self_user_id(),
                &peer_label,
                inner_width,
            );

            let start = visible_window_start(
                lines.len(),
                viewport_rows,
                state.viewport().offset_from_latest(),
            );
            let end = (start + viewport_rows).min(lines.len());
            let visible: Vec<Line<'static>> = lines[start..end].to_vec();

            frame.render_widget(Paragraph::new(visible).block(block), area);
        }
    }
}

fn indicator_text(unread: u32) -> String {
    format!(" {unread} new — End to jump ")
}

fn status_line(state: &ShellState, session: Option<&ConversationSession>) -> Line<'static> {
    if let Some(notice) = state.status_notice() {
        return Line::from(Span::styled(
            notice.to_owned(),
            styles::status_error_style(),
        ));
    }

    let mut spans = vec![Span::raw(
        "Tab: switch pane  i: compose  Enter: open/send  q: quit",
    )];

    if let Some(count) = state.unread_total() {
        if count > 0 {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                format!("unread: {count}"),
                styles::unread_badge_style(),
            ));
        }
    }

    if session.is_some_and(ConversationSession::sending) {
        spans.push(Span::raw("  |  sending..."));
    }

    Line::from(spans)
}
