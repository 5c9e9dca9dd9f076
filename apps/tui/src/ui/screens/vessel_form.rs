use crate::app::state::{VesselField, VesselFormState};
use crate::app::App;
use crate::ui::screens::empty_panel;
use crate::ui::widgets::popup::centered_box;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const LABEL_WIDTH: usize = 13;

pub fn render_vessel_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(form) = app.vessel_form.as_ref() else {
        empty_panel(f, area, "Vessel", "No vessel form open.");
        return;
    };

    let title = if form.vessel_id.is_some() {
        " Edit Vessel "
    } else {
        " Register Vessel "
    };
    let fields = form.fields();
    let height = u16::try_from(fields.len()).unwrap_or(10) + 5;
    let form_area = centered_box(64, height, area);

    let mut lines = fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_line(form, index, *field))
        .collect::<Vec<_>>();

    lines.push(TextLine::from(""));
    let note = if form.allow_status {
        "Name is required. Heading 0-360, latitude ±90, longitude ±180."
    } else {
        "New registrations wait for admin approval."
    };
    lines.push(TextLine::from(Span::styled(
        note,
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(paragraph, form_area);
}

fn field_line(
    form: &VesselFormState,
    index: usize,
    field: VesselField,
) -> TextLine<'static> {
    let is_selected = form.field_index == index;
    let is_editing = is_selected && form.editing;

    let style = if is_editing {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let value = form.value(field);
    let shown = if field.is_choice() && is_selected {
        format!("◀ {value} ▶")
    } else if is_editing {
        format!("{value}_")
    } else {
        value
    };
    let prefix = if is_selected { ">" } else { " " };

    TextLine::from(vec![
        Span::styled(
            format!("{prefix} {:<LABEL_WIDTH$}", field.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!(" {shown} "), style),
    ])
}
