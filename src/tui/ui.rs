//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_tictactoe::{CellView, GameMode, Notification, Player, Position, SessionView};

const ROWS: [[Position; 3]; 3] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
];

/// Renders the whole screen.
pub fn draw(
    frame: &mut Frame,
    view: &SessionView,
    cursor: Position,
    modal: Option<&Notification>,
    status: &str,
) {
    let area = frame.area();

    let [title_area, turn_area, board_area, scores_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(11),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);

    let title = Paragraph::new(format!("Strictly Tic-Tac-Toe - {}", view.mode().name()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, title_area);

    let turn = Paragraph::new(view.turn_label().as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(turn, turn_area);

    draw_board(frame, board_area, view, cursor);
    draw_scores(frame, scores_area, view);

    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status_text, status_area);

    let help = Paragraph::new(
        "1-9/arrows+Enter: move | M: mode | P/A: PvP/PvAI | R: new game | S: reset scores | Q: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, help_area);

    if let Some(notification) = modal {
        draw_modal(frame, area, notification);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, view: &SessionView, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    // Three cell rows with a one-line rule between each pair.
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(board_area);

    for (i, positions) in ROWS.iter().enumerate() {
        if i > 0 {
            draw_rule(frame, rows[i * 2 - 1], "─".repeat(40));
        }
        let cols = Layout::horizontal([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(rows[i * 2]);

        for (j, &pos) in positions.iter().enumerate() {
            if j > 0 {
                draw_rule(frame, cols[j * 2 - 1], "│\n│\n│".to_string());
            }
            draw_cell(frame, cols[j * 2], view.cell(pos), pos, cursor);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: CellView, pos: Position, cursor: Position) {
    let digit = format!(" {} ", pos.to_index() + 1);
    let (symbol, base_style) = match cell.mark {
        None => (digit.as_str(), Style::default().fg(Color::DarkGray)),
        Some(Player::X) => (" X ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Some(Player::O) => (" O ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };

    let style = if cell.winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, view: &SessionView) {
    let scores = view.scores();
    let x_label = match view.mode() {
        GameMode::PlayerVsAi => "You",
        GameMode::PlayerVsPlayer => "Player X",
    };
    let text = format!(
        "{}: {}   {}: {}   Draws: {}",
        x_label,
        scores.x_wins(),
        view.o_label(),
        scores.o_wins(),
        scores.draws()
    );
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Scores"));
    frame.render_widget(paragraph, area);
}

fn draw_modal(frame: &mut Frame, area: Rect, notification: &Notification) {
    let modal_area = center_rect(area, 36, 7);
    let text = format!(
        "{}\n\nEnter: play again | Esc: close",
        notification.message()
    );
    let paragraph = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(notification.title().as_str()),
        );
    frame.render_widget(Clear, modal_area);
    frame.render_widget(paragraph, modal_area);
}

fn draw_rule(frame: &mut Frame, area: Rect, text: String) {
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(Color::DarkGray)), area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
