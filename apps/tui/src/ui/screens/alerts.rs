use crate::app::App;
use crate::ui::screens::{short_date, visible_rows};
use crate::ui::widgets::charts::level_color;
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::{AlertRule, Threshold};
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_alerts(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_alert_table(app, data, f, columns[0]);
    render_rules(&data.alert_rules, f, columns[1]);
}

fn render_alert_table(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let unread = data.alerts.iter().filter(|alert| !alert.is_read).count();
    let block = Block::default()
        .title(format!(" Alerts ({unread} unread) "))
        .borders(Borders::ALL);

    if data.alerts.is_empty() {
        let paragraph = Paragraph::new("No alerts. Evaluate a reading from the Ocean screen.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_visible_rows = visible_rows(area);
    let offset = scroll_offset(data.alerts.len(), max_visible_rows, app.selected_index);
    let rows = data
        .alerts
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, alert)| {
            let mut normal = Style::default().fg(level_color(alert.level));
            if !alert.is_read {
                normal = normal.add_modifier(Modifier::BOLD);
            }
            let vessel = alert
                .vessel_id
                .as_deref()
                .and_then(|id| data.vessel(id))
                .map(|vessel| vessel.name.clone())
                .or_else(|| alert.vessel_id.clone())
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(if alert.is_read { " " } else { "●" }),
                Cell::from(alert.level.label()),
                Cell::from(alert.message.clone()),
                Cell::from(vessel),
                Cell::from(short_date(&alert.timestamp)),
            ])
            .style(row_style(index == app.selected_index, normal))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["", "Level", "Message", "Vessel", "Raised"]).style(header_style()),
    )
    .block(block)
    .column_spacing(1);
    f.render_widget(table, area);
}

fn threshold(name: &str, unit: &str, threshold: Option<&Threshold>) -> Option<String> {
    threshold.map(|threshold| {
        format!(
            "{name} {} {} {unit}",
            threshold.operator.label(),
            threshold.value
        )
    })
}

/// One-line summary of what makes `rule` fire.
pub fn describe_conditions(rule: &AlertRule) -> String {
    let conditions = &rule.conditions;
    let parts = [
        threshold("wave height", "m", conditions.wave_height.as_ref()),
        threshold("wind speed", "kn", conditions.wind_speed.as_ref()),
        conditions
            .vessel_id
            .as_ref()
            .map(|id| format!("vessel {id}")),
        conditions
            .region_id
            .as_ref()
            .map(|id| format!("region {id}")),
    ];
    let parts = parts.into_iter().flatten().collect::<Vec<_>>();
    if parts.is_empty() {
        "always".to_string()
    } else {
        parts.join(", ")
    }
}

fn render_rules(rules: &[AlertRule], f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();
    for rule in rules {
        let state = if rule.is_active { "" } else { " (inactive)" };
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("{}{state}", rule.name),
                Style::default()
                    .fg(level_color(rule.alert_level))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", rule.alert_level.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(TextLine::from(format!("  when {}", describe_conditions(rule))));
        lines.push(TextLine::from(Span::styled(
            format!("  \"{}\"", rule.message),
            Style::default().fg(Color::Gray),
        )));
    }
    if lines.is_empty() {
        lines.push(TextLine::from("No alert rules configured."));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" Rules ({}) ", rules.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleetwatch::db::models::AlertConditions;
    use fleetwatch::domain::{AlertLevel, ComparisonOperator};

    #[test]
    fn conditions_read_as_a_sentence() {
        let rule = AlertRule {
            id: "ar1".into(),
            name: "High waves".into(),
            conditions: AlertConditions {
                wave_height: Some(Threshold {
                    operator: ComparisonOperator::GreaterThan,
                    value: 2.5,
                }),
                wind_speed: None,
                vessel_id: Some("v1".into()),
                region_id: None,
            },
            alert_level: AlertLevel::Warning,
            message: "Waves above 2.5 m".into(),
            notify_owner: true,
            is_active: true,
            created_at: Utc::now(),
        };
        assert_eq!(describe_conditions(&rule), "wave height above 2.5 m, vessel v1");
    }
}
