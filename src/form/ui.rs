use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{Field, FormApp, FormStatus};

pub fn draw(f: &mut Frame, app: &FormApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Symbol
            Constraint::Length(3), // Side
            Constraint::Length(3), // Order type
            Constraint::Length(3), // Quantity
            Constraint::Length(3), // Price (conditional)
            Constraint::Min(5),    // Result
            Constraint::Length(1), // Help
        ])
        .split(f.size());

    let title = Paragraph::new("Binance Futures Trading Bot (Testnet)")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    draw_text_field(f, chunks[1], app, Field::Symbol, "Symbol (e.g., BTCUSDT)", &app.symbol);
    draw_select_field(f, chunks[2], app, Field::Side, "Order Side", app.side.as_str());
    draw_select_field(f, chunks[3], app, Field::OrderType, "Order Type", app.order_type.as_str());
    draw_text_field(f, chunks[4], app, Field::Quantity, "Quantity", &app.quantity);
    if let Some(label) = app.price_label() {
        draw_text_field(f, chunks[5], app, Field::Price, label, &app.price);
    }

    draw_result(f, chunks[6], &app.status);

    let help = Paragraph::new("[Tab/↑↓] Field | [←→] Change | [Enter] Place Order | [Esc] Quit")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[7]);
}

fn field_block(app: &FormApp, field: Field, label: &str) -> Block<'static> {
    let focused = app.focus == field;
    Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::White }))
}

fn draw_text_field(f: &mut Frame, area: Rect, app: &FormApp, field: Field, label: &str, value: &str) {
    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(Color::Cyan))];
    if app.focus == field {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    let widget = Paragraph::new(Line::from(spans)).block(field_block(app, field, label));
    f.render_widget(widget, area);
}

fn draw_select_field(f: &mut Frame, area: Rect, app: &FormApp, field: Field, label: &str, value: &str) {
    let line = Line::from(vec![
        Span::raw("< "),
        Span::styled(value.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" >"),
    ]);
    let widget = Paragraph::new(line).block(field_block(app, field, label));
    f.render_widget(widget, area);
}

fn draw_result(f: &mut Frame, area: Rect, status: &FormStatus) {
    let text = match status {
        FormStatus::Idle => Text::from(Span::styled(
            "Fill in the order and press Enter.",
            Style::default().fg(Color::Gray),
        )),
        FormStatus::Submitting => Text::from(Span::styled(
            "Placing order...",
            Style::default().fg(Color::Yellow),
        )),
        FormStatus::Placed(confirmation) => {
            let mut text = Text::from(Line::from(Span::styled(
                "Order placed successfully!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            text.lines.extend(Text::raw(confirmation.to_pretty()).lines);
            text
        }
        FormStatus::Failed => Text::from(Span::styled(
            "Order failed. Check logs or try again.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    };

    let widget = Paragraph::new(text)
        .block(Block::default().title(" Result ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
