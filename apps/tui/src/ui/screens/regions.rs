use crate::app::App;
use crate::ui::screens::{empty_panel, visible_rows};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::{Policy, Region};
use fleetwatch::db::queries::regions::region_name;
use fleetwatch::domain::RegionType;
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

const fn region_color(region_type: RegionType) -> Color {
    match region_type {
        RegionType::Port => Color::Cyan,
        RegionType::Restricted | RegionType::Military => Color::Red,
        RegionType::Fishing => Color::Green,
        RegionType::Conservation => Color::Magenta,
        RegionType::Other => Color::Gray,
    }
}

/// Most unassigned policies listed under the regions table.
const MAX_ORPHAN_ROWS: u16 = 6;

/// One row per policy whose region is gone: title, region label, category.
fn orphan_rows(data: &FleetData) -> Vec<[String; 3]> {
    data.orphan_policies()
        .map(|policy| {
            [
                policy.title.clone(),
                region_name(&data.regions, &policy.region_id).to_string(),
                policy.category.label().to_string(),
            ]
        })
        .collect()
}

fn render_orphans(rows: Vec<[String; 3]>, f: &mut Frame<'_>, area: Rect) {
    let count = rows.len();
    let table = Table::new(
        rows.into_iter()
            .map(|row| Row::new(row).style(Style::default().fg(Color::DarkGray))),
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(Row::new(vec!["Policy", "Region", "Category"]).style(header_style()))
    .block(
        Block::default()
            .title(format!(" Unassigned policies ({count}) "))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, area);
}

pub fn render_regions(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let orphans = orphan_rows(data);
    let area = if orphans.is_empty() {
        area
    } else {
        let rows = u16::try_from(orphans.len()).unwrap_or(MAX_ORPHAN_ROWS).min(MAX_ORPHAN_ROWS);
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(rows + 3)])
            .split(area);
        render_orphans(orphans, f, split[1]);
        split[0]
    };

    if data.regions.is_empty() {
        empty_panel(f, area, "Regions", "No regions defined.");
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let max_visible_rows = visible_rows(columns[0]);
    let offset = scroll_offset(data.regions.len(), max_visible_rows, app.selected_index);
    let rows = data
        .regions
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, region)| {
            Row::new(vec![
                Cell::from(region.name.clone()),
                Cell::from(region.region_type.label()),
                Cell::from(region.polygon.len().to_string()),
                Cell::from(data.policies_for(&region.id).count().to_string()),
            ])
            .style(row_style(
                index == app.selected_index,
                Style::default().fg(region_color(region.region_type)),
            ))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(8),
        ],
    )
    .header(Row::new(vec!["Name", "Type", "Points", "Policies"]).style(header_style()))
    .block(
        Block::default()
            .title(format!(" Regions ({}) ", data.regions.len()))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, columns[0]);

    if let Some(region) = data.regions.get(app.selected_index) {
        let policies = data.policies_for(&region.id).collect::<Vec<_>>();
        render_policies(region, &policies, f, columns[1]);
    }
}

fn render_policies(region: &Region, policies: &[&Policy], f: &mut Frame<'_>, area: Rect) {
    let mut lines = vec![TextLine::from(Span::styled(
        region.description.clone().unwrap_or_default(),
        Style::default().fg(Color::Gray),
    ))];

    if policies.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from("No policies apply to this region."));
    }
    for policy in policies {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(vec![
            Span::styled(
                policy.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  {} · effective {}",
                    policy.category.label(),
                    policy.effective_date.format("%Y-%m-%d")
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(TextLine::from(policy.content.clone()));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", region.name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(region_color(region.region_type))),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleetwatch::db::queries::regions::MISSING_REGION;
    use fleetwatch::domain::PolicyCategory;

    fn policy(id: &str, region_id: &str) -> Policy {
        Policy {
            id: id.into(),
            region_id: region_id.into(),
            title: format!("Policy {id}"),
            content: String::new(),
            category: PolicyCategory::Navigation,
            effective_date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn policies_without_a_region_are_listed_with_a_dash() {
        let data = FleetData {
            regions: vec![Region {
                id: "r1".into(),
                name: "Strait of Hormuz".into(),
                region_type: RegionType::Restricted,
                polygon: Vec::new(),
                description: None,
                created_at: Utc::now(),
            }],
            policies: vec![policy("p1", "r1"), policy("p2", "r9")],
            ..FleetData::default()
        };

        let rows = orphan_rows(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Policy p2");
        assert_eq!(rows[0][1], MISSING_REGION);
        assert_eq!(region_name(&data.regions, "r1"), "Strait of Hormuz");
    }
}
