use {
    super::{
        renderer::{format_count, format_hour, format_large_number, format_percent, user_totals},
        ViewOptions,
    },
    crate::{
        pipeline::{CategoryTotal, Report},
        state::{ActiveBound, DashboardState},
    },
    ratatui::{
        layout::{Alignment, Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{
            Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType,
            Paragraph,
        },
        Frame,
    },
};

const CASUAL_COLOR: Color = Color::Cyan;
const REGISTERED_COLOR: Color = Color::LightRed;
const TOTAL_COLOR: Color = Color::Yellow;
const PEAK_COLOR: Color = Color::Red;

/// Render the main dashboard layout
pub fn render_layout(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    options: &ViewOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(3), // Summary metrics
            Constraint::Ratio(1, 3), // Distribution
            Constraint::Ratio(1, 3), // Counts by month + trend
            Constraint::Ratio(1, 3), // Hourly profile
            Constraint::Length(3), // Footer/Status
        ])
        .split(area);

    let report = state.report();

    render_header(f, chunks[0], state);
    render_metrics(f, chunks[1], report);

    let distribution = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(chunks[2]);
    render_share(f, distribution[0], report);
    render_users_by_year(f, distribution[1], report, options.base_year);
    render_category_chart(
        f,
        distribution[2],
        "Users by Season",
        &report.seasonal.arrange(options.zero_fill),
        |s| s.as_str(),
        TOTAL_COLOR,
    );

    let monthly = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    render_category_chart(
        f,
        monthly[0],
        "Users by Month",
        &report.monthly.arrange(options.zero_fill),
        |m| m.short(),
        REGISTERED_COLOR,
    );
    render_trend(f, monthly[1], report);

    let hourly = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(chunks[4]);
    render_hourly(f, hourly[0], report);
    render_peak_list(f, hourly[1], report);

    render_footer(f, chunks[5], state);

    Ok(())
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let range = state.range();
    let bound_style = |bound: ActiveBound| {
        if state.active_bound() == bound {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        }
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Bike Sharing System", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" - Performance Report   "),
            Span::raw("Range: "),
            Span::styled(range.start.to_string(), bound_style(ActiveBound::Start)),
            Span::raw(" → "),
            Span::styled(range.end.to_string(), bound_style(ActiveBound::End)),
            Span::raw(format!("  ({} days)", range.days())),
        ]),
        Line::from(vec![Span::raw(
            "Tab: switch bound | ←/→: ±1 day | PgUp/PgDn: ±1 month | Home/End: dataset bounds | r: reset | q/Esc: quit",
        )]),
    ];

    let header = Block::default()
        .borders(Borders::ALL)
        .title("Rideflow - Bike Share Dashboard");

    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_metrics(f: &mut Frame, area: Rect, report: &Report) {
    let tiles = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let colors = [CASUAL_COLOR, REGISTERED_COLOR, TOTAL_COLOR];
    let metrics = user_totals(&report.summary).into_iter().zip(colors);

    for (((title, value), color), tile) in metrics.zip(tiles.iter()) {
        let text = Line::from(Span::styled(
            format_count(value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        let block = Block::default().borders(Borders::ALL).title(title);
        f.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(block),
            *tile,
        );
    }
}

fn render_share(f: &mut Frame, area: Rect, report: &Report) {
    let block = Block::default().borders(Borders::ALL).title("Users by Type");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let share = report.share();
    let parts = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(CASUAL_COLOR).bg(REGISTERED_COLOR))
        .ratio(share.casual.clamp(0.0, 1.0))
        .label(Span::raw(format_percent(share.casual)));
    f.render_widget(gauge, parts[0]);

    let lines = vec![
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(CASUAL_COLOR)),
            Span::raw(format!("Casual {}", format_percent(share.casual))),
        ]),
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(REGISTERED_COLOR)),
            Span::raw(format!("Registered {}", format_percent(share.registered))),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), parts[2]);
}

fn render_users_by_year(f: &mut Frame, area: Rect, report: &Report, base_year: i32) {
    let block = Block::default().borders(Borders::ALL).title("Users by Year");
    if report.yearly.is_empty() {
        render_no_data(f, area, block);
        return;
    }

    let groups: Vec<BarGroup> = report
        .yearly
        .iter()
        .map(|y| {
            BarGroup::default()
                .label(Line::from(y.calendar_year(base_year).to_string()))
                .bars(&[
                    Bar::default()
                        .value(y.casual)
                        .text_value(format_large_number(y.casual as f64))
                        .style(Style::default().fg(CASUAL_COLOR)),
                    Bar::default()
                        .value(y.registered)
                        .text_value(format_large_number(y.registered as f64))
                        .style(Style::default().fg(REGISTERED_COLOR)),
                ])
        })
        .collect();

    let bar_width = bar_width(block.inner(area).width, report.yearly.len() * 3);
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(1)
        .group_gap(2)
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));
    for group in groups {
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn render_category_chart<K: Copy>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[CategoryTotal<K>],
    label: impl Fn(&K) -> &'static str,
    color: Color,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    if totals.is_empty() {
        render_no_data(f, area, block);
        return;
    }

    let bars: Vec<Bar> = totals
        .iter()
        .map(|c| {
            Bar::default()
                .value(c.total)
                .label(Line::from(label(&c.category)))
                .text_value(format_large_number(c.total as f64))
        })
        .collect();

    let bar_width = bar_width(block.inner(area).width, bars.len());
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));

    f.render_widget(chart, area);
}

fn render_trend(f: &mut Frame, area: Rect, report: &Report) {
    let block = Block::default().borders(Borders::ALL).title("User Growth Over Time");
    if report.trend.is_empty() {
        render_no_data(f, area, block);
        return;
    }

    let casual: Vec<(f64, f64)> = report
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.casual as f64))
        .collect();
    let registered: Vec<(f64, f64)> = report
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.registered as f64))
        .collect();

    let y_max = report
        .trend
        .iter()
        .map(|p| p.casual.max(p.registered))
        .max()
        .unwrap_or(0) as f64;
    let x_max = (report.trend.len().saturating_sub(1)).max(1) as f64;

    let first = report.trend.first().map(|p| p.month_year.to_string()).unwrap_or_default();
    let middle = report.trend[report.trend.len() / 2].month_year.to_string();
    let last = report.trend.last().map(|p| p.month_year.to_string()).unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("Casual Users")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(CASUAL_COLOR))
            .data(&casual),
        Dataset::default()
            .name("Registered Users")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(REGISTERED_COLOR))
            .data(&registered),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(middle), Span::raw(last)]),
        )
        .y_axis(value_axis(y_max));

    f.render_widget(chart, area);
}

fn render_hourly(f: &mut Frame, area: Rect, report: &Report) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Hourly Bike Share User Count by Hour");
    if report.hourly.is_empty() {
        render_no_data(f, area, block);
        return;
    }

    let totals: Vec<(f64, f64)> = report
        .hourly
        .iter()
        .map(|h| (h.hour as f64, h.total))
        .collect();
    let peaks: Vec<(f64, f64)> = report
        .hourly
        .iter()
        .filter(|h| report.peak_hours.contains(&h.hour))
        .map(|h| (h.hour as f64, h.total))
        .collect();
    let y_max = report.hourly.iter().map(|h| h.total).fold(0.0, f64::max);

    let datasets = vec![
        Dataset::default()
            .name("Total Rides")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(TOTAL_COLOR))
            .data(&totals),
        Dataset::default()
            .name("Peak Hour")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(PEAK_COLOR).add_modifier(Modifier::BOLD))
            .data(&peaks),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Hour of the Day")
                .bounds([0.0, 23.0])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw("6"),
                    Span::raw("12"),
                    Span::raw("18"),
                    Span::raw("23"),
                ]),
        )
        .y_axis(value_axis(y_max));

    f.render_widget(chart, area);
}

fn render_peak_list(f: &mut Frame, area: Rect, report: &Report) {
    let block = Block::default().borders(Borders::ALL).title("Peak Hours");
    if report.peak_hours.is_empty() {
        render_no_data(f, area, block);
        return;
    }

    let lines: Vec<Line> = report
        .hourly
        .iter()
        .filter(|h| report.peak_hours.contains(&h.hour))
        .map(|h| {
            Line::from(vec![
                Span::styled(format_hour(h.hour), Style::default().fg(PEAK_COLOR)),
                Span::raw(format!("  {:.1} rides/h", h.total)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let report = state.report();
    let dataset = state.dataset();

    let text = vec![Line::from(vec![
        Span::styled("Rows: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("{} / {}", format_count(report.row_count as u64), format_count(dataset.len() as u64))),
        Span::raw(" | "),
        Span::styled("Dataset: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("{} → {}", dataset.min_date(), dataset.max_date())),
        Span::raw(" | "),
        Span::styled("Editing: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.active_bound().as_str()),
        Span::raw(" | "),
        Span::styled("Recomputed: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.recomputations().to_string()),
    ])];

    let footer = Block::default().borders(Borders::ALL).title("Status");

    f.render_widget(Paragraph::new(text).block(footer), area);
}

fn render_no_data(f: &mut Frame, area: Rect, block: Block) {
    let text = Line::from(Span::styled(
        "No rides in selected range",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}

fn value_axis<'a>(y_max: f64) -> Axis<'a> {
    let top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    Axis::default().bounds([0.0, top]).labels(vec![
        Span::raw("0"),
        Span::raw(format_large_number((top / 2.0).round())),
        Span::raw(format_large_number(top.round())),
    ])
}

/// Bar width that fits `bars` bars (plus 1-cell gaps) into `width` cells
fn bar_width(width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let per_bar = (width as usize / bars).saturating_sub(1);
    per_bar.clamp(1, 12) as u16
}
