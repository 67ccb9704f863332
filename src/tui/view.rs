use crate::tui::state::{AppState, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let theme = state.theme();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    // --- Grid Table ---
    let header = Row::new(state.grid.columns.iter().enumerate().map(|(c, col)| {
        let mut style = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        if c == state.selected_col {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(col.header_name.as_str()).style(style)
    }));

    let rows: Vec<Row> = state
        .view_indices
        .iter()
        .map(|&idx| {
            Row::new(state.grid.columns.iter().enumerate().map(|(c, col)| {
                let text = state.grid.display_value(idx, &col.field);
                let style = if c == state.selected_col {
                    Style::default().fg(theme.text()).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text())
                };
                Cell::from(text).style(style)
            }))
        })
        .collect();

    let n_cols = state.grid.columns.len().max(1);
    let widths = vec![Constraint::Ratio(1, n_cols as u32); n_cols];

    let title = format!(
        " Rows ({}){} | Filter: {} | Theme: {} ",
        state.view_indices.len(),
        if state.dirty { " *" } else { "" },
        state.date_filter.label(),
        theme.attribute_value()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.dim())),
        )
        .style(Style::default().bg(theme.background()))
        .row_highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(theme.highlight_bg()),
        );
    f.render_stateful_widget(table, v_chunks[0], &mut state.table_state);

    // --- Footer / Input ---
    let footer_area = v_chunks[1];
    match state.mode {
        InputMode::Editing | InputMode::Searching => {
            let (title, prefix) = match state.mode {
                InputMode::Searching => (" Search ", "/ "),
                _ => (" Edit Cell (DD/MM/YYYY for date columns) ", "> "),
            };
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(theme.accent()))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, footer_area);
            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(theme.accent()))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = "h/l:Col | e:Edit | /:Find | f:Filter | t:Theme | s:Save | q:Quit";
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(theme.dim()))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}
