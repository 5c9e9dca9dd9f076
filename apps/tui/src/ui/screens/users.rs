use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::domain::{UserRole, UserStatus};
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

pub fn render_users(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    if data.users.is_empty() {
        empty_panel(f, area, "Users", "No users.");
        return;
    }

    let me = &app.config.current_user.id;
    let max_visible_rows = visible_rows(area);
    let offset = scroll_offset(data.users.len(), max_visible_rows, app.selected_index);
    let rows = data
        .users
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, user)| {
            let normal = match (user.status, user.role) {
                (UserStatus::Suspended, _) => Style::default().fg(Color::DarkGray),
                (UserStatus::Active, UserRole::Admin) => Style::default().fg(Color::Cyan),
                (UserStatus::Active, UserRole::Client) => Style::default().fg(Color::White),
            };
            let name = if &user.id == me {
                format!("{} (you)", user.name)
            } else {
                user.name.clone()
            };
            Row::new(vec![
                Cell::from(name),
                Cell::from(user.email.clone()),
                Cell::from(user.role.label()),
                Cell::from(user.status.label()),
                Cell::from(short_date(&user.created_at)),
            ])
            .style(row_style(index == app.selected_index, normal))
        });

    let title = if app.is_admin() {
        format!(" Users ({}) ", data.users.len())
    } else {
        format!(" Users ({}) · read only ", data.users.len())
    };
    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Min(22),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["Name", "Email", "Role", "Status", "Joined"]).style(header_style()),
    )
    .block(Block::default().title(title).borders(Borders::ALL))
    .column_spacing(1);
    f.render_widget(table, area);
}
