use crate::app::App;
use crate::ui::screens::empty_panel;
use crate::ui::widgets::charts::type_color;
use fleetwatch::db::models::{Region, Vessel};
use fleetwatch::domain::RegionType;
use fleetwatch::fleet::FleetData;
use fleetwatch::map::{region_ring, MapBounds, MapLayer, MapView};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const fn region_outline(region_type: RegionType) -> Color {
    match region_type {
        RegionType::Port => Color::Blue,
        RegionType::Restricted => Color::Red,
        _ => Color::Green,
    }
}

pub fn render_map(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let Some(map) = app.map.as_ref() else {
        empty_panel(f, area, "Map", "Map is not open.");
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let block = Block::default()
        .title(format!(
            " Map · {:.4}, {:.4} · ±{}° ",
            map.center().lat,
            map.center().lng,
            map.half_span_deg()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(columns[0]);
    f.render_widget(block, columns[0]);

    let bounds = map.bounds(inner.width, inner.height);
    let vessels = map.visible_vessels(&data.vessels, &bounds);
    let regions = map.visible_regions(&data.regions);
    render_chart(map, &bounds, &vessels, &regions, f, inner);

    let panel = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(columns[1]);
    render_layers(map, vessels.len(), regions.len(), f, panel[0]);
    render_selected(map, &vessels, f, panel[1]);
}

fn render_chart(
    map: &MapView,
    bounds: &MapBounds,
    vessels: &[&Vessel],
    regions: &[&Region],
    f: &mut Frame<'_>,
    area: Rect,
) {
    let selected = map.selected();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(bounds.lng)
        .y_bounds(bounds.lat)
        .paint(|ctx| {
            for region in regions {
                let color = region_outline(region.region_type);
                for edge in region_ring(region).windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: edge[0].0,
                        y1: edge[0].1,
                        x2: edge[1].0,
                        y2: edge[1].1,
                        color,
                    });
                }
            }
            for vessel in vessels {
                let color = if Some(vessel.id.as_str()) == selected {
                    Color::Yellow
                } else {
                    type_color(vessel.vessel_type)
                };
                ctx.draw(&Points {
                    coords: &[(vessel.position.lng, vessel.position.lat)],
                    color,
                });
            }
            ctx.layer();
            for region in regions {
                if let Some(corner) = region.polygon.first() {
                    ctx.print(
                        corner.lng,
                        corner.lat,
                        Span::styled(
                            region.name.clone(),
                            Style::default().fg(region_outline(region.region_type)),
                        ),
                    );
                }
            }
            if let Some(vessel) = vessels
                .iter()
                .find(|vessel| Some(vessel.id.as_str()) == selected)
            {
                ctx.print(
                    vessel.position.lng,
                    vessel.position.lat,
                    Span::styled(
                        format!("◆ {}", vessel.name),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    f.render_widget(canvas, area);
}

fn layer_line(key: &'static str, label: &'static str, on: bool, count: Option<usize>) -> TextLine<'static> {
    let mark = if on { "[x]" } else { "[ ]" };
    let style = if on {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(
            format!("{key} "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{mark} {label}"), style),
    ];
    if let Some(count) = count {
        spans.push(Span::styled(format!(" ({count})"), Style::default().fg(Color::Cyan)));
    }
    TextLine::from(spans)
}

fn render_layers(map: &MapView, vessels: usize, regions: usize, f: &mut Frame<'_>, area: Rect) {
    let layers = &map.layers;
    let lines = vec![
        layer_line("v", "Vessels", layers.shows(MapLayer::Vessels), Some(vessels)),
        layer_line("r", "Regions", layers.shows(MapLayer::Regions), Some(regions)),
        layer_line("p", "Ports", layers.shows(MapLayer::Ports), None),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Layers ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_selected(map: &MapView, vessels: &[&Vessel], f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Vessel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(vessel) = map
        .selected()
        .and_then(|id| vessels.iter().find(|vessel| vessel.id == id))
    else {
        let paragraph = Paragraph::new("Tab selects a vessel on the map.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        TextLine::from(Span::styled(
            vessel.name.clone(),
            Style::default()
                .fg(type_color(vessel.vessel_type))
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled("Type:    ", label),
            Span::raw(vessel.vessel_type.label()),
        ]),
        TextLine::from(vec![
            Span::styled("Speed:   ", label),
            Span::raw(format!("{:.1} kn", vessel.speed)),
        ]),
        TextLine::from(vec![
            Span::styled("Heading: ", label),
            Span::raw(format!("{:.0}°", vessel.heading)),
        ]),
        TextLine::from(vec![
            Span::styled("Owner:   ", label),
            Span::raw(vessel.owner_name.clone()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_lines_mark_hidden_layers() {
        let on = layer_line("v", "Vessels", true, Some(3));
        let text: String = on.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "v [x] Vessels (3)");

        let off = layer_line("p", "Ports", false, None);
        let text: String = off.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "p [ ] Ports");
    }

    #[test]
    fn outlines_follow_region_type() {
        assert_eq!(region_outline(RegionType::Port), Color::Blue);
        assert_eq!(region_outline(RegionType::Restricted), Color::Red);
        assert_eq!(region_outline(RegionType::Fishing), Color::Green);
    }
}
