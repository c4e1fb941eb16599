//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! from the App, but never modifies state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Tabs, Wrap,
};
use tracing::trace;

use super::app::App;
use super::state::{InteractionMode, Screen};
use crate::answer::Validity;
use crate::chart::{BarChartSpec, ChartSpec, LineChartSpec, MarkerKind};
use crate::view::{FormRow, RenderedView};

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const BAD: Color = Color::Red;
    pub const GOOD: Color = Color::Green;
    pub const INACTIVE: Color = Color::Gray;
    pub const CORRECT: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const INCORRECT: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const FOCUS_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
    pub const FALLBACK: Color = Color::Gray;
}

/// Main render function
pub fn render(app: &App, frame: &mut Frame) {
    trace!(screen = ?app.state().screen, "render: called");
    let area = frame.area();
    match app.state().screen {
        Screen::Intro => render_intro(frame, area),
        Screen::Browsing => render_browsing(app, frame),
    }
}

fn render_intro(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 40, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Have you ever wondered how bad can people make plots?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Shockingly, very bad.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("[ "),
            Span::styled(
                "Check it out",
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ]"),
        ]),
        Line::from(Span::styled("Enter to start, q to quit", Style::default().fg(colors::DIM))),
    ];
    let intro = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(intro, popup);
}

fn render_browsing(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Quiz + chart
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_tabs(app, frame, chunks[0]);

    match app.view() {
        Ok(view) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(chunks[1]);
            render_quiz_card(app, &view, frame, columns[0]);
            render_chart_column(&view, frame, columns[1]);
        }
        Err(e) => {
            let message = Paragraph::new(Span::styled(e.to_string(), Style::default().fg(colors::INCORRECT)))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
        }
    }

    render_footer(app, frame, chunks[2]);

    if app.state().interaction_mode == InteractionMode::Help {
        let area = frame.area();
        render_help_overlay(frame, area);
    }
}

fn render_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let registry = app.registry();
    let titles: Vec<Line> = registry
        .list_topics()
        .into_iter()
        .enumerate()
        .map(|(i, (_, title))| Line::from(format!("{} {}", i + 1, title)))
        .collect();
    let selected = registry.index_of(&app.state().selected_topic).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD))
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Choose plot you want to see. Even if it is ugly as... you know. "),
        );
    frame.render_widget(tabs, area);
}

fn render_quiz_card(app: &App, view: &RenderedView, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let mut lines = vec![
        Line::from(Span::styled(
            view.title.to_string(),
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(view.description.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "You think is not that bad? Let's find out.",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    for (i, row) in view.questions.iter().enumerate() {
        let focused = i == state.focused_question;
        let editing = focused && state.interaction_mode == InteractionMode::AnswerInput;
        lines.push(Line::from(Span::styled(
            row.label(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(answer_line(row, focused, editing));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("[c] ", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw("Check your answers!"),
    ]));
    if let Some(score) = state.last_score {
        lines.push(Line::from(Span::styled(
            score.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Quiz "));
    frame.render_widget(card, area);
}

/// Input field line for one question, coloured by validity
fn answer_line<'a>(row: &'a FormRow, focused: bool, editing: bool) -> Line<'a> {
    let (marker, marker_style) = match row.validity {
        Validity::Unknown => ("  ", Style::default()),
        Validity::Correct => ("✓ ", Style::default().fg(colors::CORRECT)),
        Validity::Incorrect => ("✗ ", Style::default().fg(colors::INCORRECT)),
    };

    let mut text_style = match row.validity {
        Validity::Unknown if row.value.is_empty() => Style::default().fg(colors::DIM),
        Validity::Unknown => Style::default(),
        Validity::Correct => Style::default().fg(colors::CORRECT),
        Validity::Incorrect => Style::default().fg(colors::INCORRECT),
    };
    if focused {
        text_style = text_style.bg(colors::FOCUS_BG);
    }

    let mut spans = vec![
        Span::styled(marker, marker_style),
        Span::styled(row.display_value(), text_style),
    ];
    if editing {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}

fn render_chart_column(view: &RenderedView, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Chart
            Constraint::Length(1), // Caption
            Constraint::Length(1), // Bad/good switch
        ])
        .split(area);

    render_chart(view.chart, frame, chunks[0]);

    let caption = Paragraph::new(Line::from(vec![
        Span::raw("Switch to see "),
        Span::styled("HOW IT'S DONE:", Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(caption, chunks[1]);

    frame.render_widget(Paragraph::new(switch_line(view.show_good)).alignment(Alignment::Center), chunks[2]);
}

/// "Bad [switch] Good" with the active side highlighted
fn switch_line(show_good: bool) -> Line<'static> {
    let (bad, good) = if show_good {
        (colors::INACTIVE, colors::GOOD)
    } else {
        (colors::BAD, colors::INACTIVE)
    };
    let knob = if show_good { "[ ─●]" } else { "[●─ ]" };
    Line::from(vec![
        Span::styled("Bad 👎 ", Style::default().fg(bad).add_modifier(Modifier::BOLD)),
        Span::styled(knob, Style::default().fg(if show_good { colors::GOOD } else { colors::BAD })),
        Span::styled(" Good 👌", Style::default().fg(good).add_modifier(Modifier::BOLD)),
        Span::styled("  [t]", Style::default().fg(colors::KEYBIND)),
    ])
}

/// Draw a chart spec into an area
pub(crate) fn render_chart(spec: &ChartSpec, frame: &mut Frame, area: Rect) {
    trace!(kind = spec.kind(), "render_chart: called");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", spec.title().unwrap_or("")));
    match spec {
        ChartSpec::Bar(bar) => render_bar_chart(bar, block, frame, area),
        ChartSpec::Line(line) => render_line_chart(line, block, frame, area),
    }
}

fn render_bar_chart(spec: &BarChartSpec, block: Block, frame: &mut Frame, area: Rect) {
    let heights = spec.heights();
    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .zip(heights)
        .map(|(bar, height)| {
            let style = Style::default().fg(parse_color(bar.color.as_deref()));
            let text = if spec.show_values { format_value(bar.value) } else { String::new() };
            Bar::default()
                .value(height)
                .label(Line::from(bar.label.clone()))
                .style(style)
                .text_value(text)
        })
        .collect();

    let block = match &spec.y_label {
        Some(label) => block.title_bottom(Line::from(format!(" {} ", label)).alignment(Alignment::Right)),
        None => block,
    };

    let inner_width = area.width.saturating_sub(2);
    let count = spec.bars.len().max(1) as u16;
    let chart = if spec.horizontal {
        BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
    } else {
        let bar_width = (inner_width / count).saturating_sub(1).clamp(1, 12);
        BarChart::default().bar_width(bar_width).bar_gap(1)
    };

    frame.render_widget(chart.block(block).data(BarGroup::default().bars(&bars)), area);
}

fn render_line_chart(spec: &LineChartSpec, block: Block, frame: &mut Frame, area: Rect) {
    // Datasets borrow their points, so convert every series first
    let points: Vec<Vec<(f64, f64)>> = spec
        .series
        .iter()
        .map(|s| s.points.iter().map(|p| (p[0], p[1])).collect())
        .collect();

    let datasets: Vec<Dataset> = spec
        .series
        .iter()
        .zip(&points)
        .map(|(series, data)| {
            Dataset::default()
                .name(series.name.clone())
                .marker(marker(series.marker))
                .graph_type(GraphType::Line)
                .style(Style::default().fg(parse_color(series.color.as_deref())))
                .data(data)
        })
        .collect();

    let x = spec.x_range();
    let y = spec.y_range();
    let x_axis = Axis::default()
        .title(spec.x_label.clone().unwrap_or_default())
        .style(Style::default().fg(colors::DIM))
        .bounds(x)
        .labels(axis_labels(x, spec.x_label.is_some()));
    let y_axis = Axis::default()
        .title(spec.y_label.clone().unwrap_or_default())
        .style(Style::default().fg(colors::DIM))
        .bounds(y)
        .labels(axis_labels(y, spec.y_label.is_some()));

    let mut chart = Chart::new(datasets).block(block).x_axis(x_axis).y_axis(y_axis);
    if !spec.legend {
        chart = chart.legend_position(None);
    }
    frame.render_widget(chart, area);
}

/// Min/mid/max labels for a labelled axis, nothing for an unlabelled one
fn axis_labels(bounds: [f64; 2], labelled: bool) -> Vec<String> {
    if !labelled {
        return Vec::new();
    }
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![format_value(bounds[0]), format_value(mid), format_value(bounds[1])]
}

fn marker(kind: MarkerKind) -> Marker {
    match kind {
        MarkerKind::Braille => Marker::Braille,
        MarkerKind::Dot => Marker::Dot,
        MarkerKind::Block => Marker::Block,
    }
}

/// Parse a chart colour name, falling back to gray
fn parse_color(color: Option<&str>) -> Color {
    color.and_then(|c| c.parse::<Color>().ok()).unwrap_or(colors::FALLBACK)
}

/// Format a number without a trailing ".0" for whole values
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let keybinds: &[(&str, &str)] = match state.interaction_mode {
        InteractionMode::AnswerInput => &[("[Enter]", "Done"), ("[Tab]", "Next question"), ("[Esc]", "Done")],
        InteractionMode::Help => &[("[?]", "Close help")],
        InteractionMode::Normal => &[
            ("[←/→]", "Topic"),
            ("[t]", "Bad/Good"),
            ("[↑/↓]", "Question"),
            ("[Enter]", "Answer"),
            ("[c]", "Check"),
            ("[?]", "Help"),
            ("[q]", "Quit"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in keybinds {
        spans.push(Span::styled(
            *key,
            Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {} ", action)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled("Topics", Style::default().add_modifier(Modifier::BOLD))]),
        key_line("←/h →/l", "Previous / next topic"),
        key_line("1-9", "Jump to topic"),
        key_line("t / Space", "Switch between bad and good chart"),
        Line::from(""),
        Line::from(vec![Span::styled("Quiz", Style::default().add_modifier(Modifier::BOLD))]),
        key_line("↑/k ↓/j", "Select question"),
        key_line("Enter / i", "Type an answer"),
        key_line("Tab", "Next question while typing"),
        key_line("Esc", "Stop typing"),
        key_line("c", "Check your answers"),
        Line::from(""),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
    ];

    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, popup_area);
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
