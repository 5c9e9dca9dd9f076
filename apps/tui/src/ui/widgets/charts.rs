use fleetwatch::domain::{AlertLevel, VesselStatus, VesselType};
use fleetwatch::snapshot::VesselCounts;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

pub const fn status_color(status: VesselStatus) -> Color {
    match status {
        VesselStatus::Active => Color::Green,
        VesselStatus::Approved => Color::Cyan,
        VesselStatus::Pending => Color::Yellow,
        VesselStatus::Inactive => Color::Gray,
        VesselStatus::Rejected => Color::Red,
    }
}

pub const fn type_color(vessel_type: VesselType) -> Color {
    match vessel_type {
        VesselType::Cargo => Color::Rgb(0, 0, 238),
        VesselType::Tanker => Color::Magenta,
        VesselType::Passenger => Color::Cyan,
        VesselType::Fishing => Color::Green,
        VesselType::Military => Color::Red,
        VesselType::Other => Color::Gray,
    }
}

pub const fn level_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Info => Color::Cyan,
        AlertLevel::Warning => Color::Yellow,
        AlertLevel::Danger => Color::Red,
    }
}

fn empty_chart(f: &mut Frame<'_>, area: Rect, title: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new("No vessels available")
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn count_bars<'a>(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    entries: impl Iterator<Item = (&'a str, u64, Color)>,
) {
    let bars: Vec<Bar<'_>> = entries
        .map(|(label, value, color)| {
            Bar::default()
                .value(value)
                .label(TextLine::from(label))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();
    let bar_count = bars.len().max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_gap(1)
        .bar_width(fitting_bar_width(area.width, bar_count));

    f.render_widget(chart, area);
}

/// Widest bar that lets every bar plus its gap fit inside the borders.
fn fitting_bar_width(width: u16, bars: usize) -> u16 {
    let bars = u16::try_from(bars).unwrap_or(u16::MAX);
    let usable = width.saturating_sub(2);
    (usable / bars).saturating_sub(1).clamp(1, 9)
}

pub fn render_status_chart(f: &mut Frame<'_>, area: Rect, counts: &VesselCounts) {
    if counts.total == 0 {
        empty_chart(f, area, "Vessel Status");
        return;
    }
    let entries = VesselStatus::ALL.iter().map(|status| {
        (
            status.label(),
            counts.status(*status) as u64,
            status_color(*status),
        )
    });
    count_bars(f, area, "Vessel Status", entries);
}

pub fn render_type_chart(f: &mut Frame<'_>, area: Rect, counts: &VesselCounts) {
    if counts.total == 0 {
        empty_chart(f, area, "Vessel Types");
        return;
    }
    let entries = VesselType::ALL.iter().map(|kind| {
        (
            kind.label(),
            counts.of_type(*kind) as u64,
            type_color(*kind),
        )
    });
    count_bars(f, area, "Vessel Types", entries);
}
