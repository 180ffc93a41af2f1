//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

/// Style for the border of the focused panel.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Style for borders of unfocused panels.
pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for conversation names in the sidebar (bold, bright).
pub fn conversation_name_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for last-message previews (dimmed).
pub fn conversation_preview_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for unread count badges.
pub fn unread_badge_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Style for message sender names.
pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the current user's own name in the messages panel.
pub fn own_sender_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for message times.
pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for message text content.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for a not-yet-confirmed optimistic message.
pub fn pending_message_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for date separator lines.
pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the "new messages" indicator shown when scrolled away.
pub fn new_messages_indicator_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

/// Style for error notices in the status line.
pub fn status_error_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for the input prompt symbol.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Style for typed input text.
pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for the input placeholder hint.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_name_style_is_bold_white() {
        let style = conversation_name_style();
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn unread_badge_style_is_green() {
        assert_eq!(unread_badge_style().fg, Some(Color::Green));
    }

    #[test]
    fn pending_message_style_is_dimmed() {
        assert_eq!(pending_message_style().fg, Some(Color::DarkGray));
    }

    #[test]
    fn indicator_style_is_high_contrast() {
        let style = new_messages_indicator_style();
        assert_eq!(style.bg, Some(Color::Green));
        assert_eq!(style.fg, Some(Color::Black));
    }
}
