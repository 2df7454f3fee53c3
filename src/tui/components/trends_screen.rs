//! # Trends Screen Component
//!
//! The sample CGM day as a line chart, the stat tiles derived from it, and
//! the filter bar. The filter bar edits state that the chart deliberately
//! ignores (see DESIGN.md), so the caption marks the series as sample data.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};

use crate::core::trends::{RANGE_HIGH, RANGE_LOW, TrendsState, TrendsSummary};
use crate::tui::component::Component;

pub struct TrendsScreen<'a> {
    pub trends: &'a TrendsState,
}

impl<'a> TrendsScreen<'a> {
    fn draw_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let filter = &self.trends.filter;
        let line = Line::from(vec![
            Span::styled("Range ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} → {}", filter.start_date, filter.end_date),
                Style::default().fg(Color::White),
            ),
            Span::styled("   Meals ", Style::default().fg(Color::DarkGray)),
            Span::styled(filter.meal_filter.label(), Style::default().fg(Color::White)),
            Span::styled(
                "   (←/→ shift week, f cycle meals — display shows sample day)",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_chart(&self, frame: &mut Frame, area: Rect) {
        let points: Vec<(f64, f64)> = self
            .trends
            .readings
            .iter()
            .map(|r| (r.minute_of_day as f64 / 60.0, r.mgdl))
            .collect();

        let datasets = vec![
            Dataset::default()
                .name("mg/dL")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&points),
        ];

        let x_axis = Axis::default()
            .title("hour of day")
            .style(Style::default().fg(Color::DarkGray))
            .bounds([0.0, 24.0])
            .labels(["00", "06", "12", "18", "24"]);
        let y_axis = Axis::default()
            .title("mg/dL")
            .style(Style::default().fg(Color::DarkGray))
            .bounds([40.0, 220.0])
            .labels(["40", "100", "160", "220"]);

        let chart = Chart::new(datasets)
            .block(Block::bordered().title("Glucose — sample day"))
            .x_axis(x_axis)
            .y_axis(y_axis);
        frame.render_widget(chart, area);
    }

    fn draw_stats(&self, frame: &mut Frame, area: Rect) {
        let summary = &self.trends.summary;
        let tiles = stat_tiles(summary);
        let constraints = vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()];
        let areas = Layout::horizontal(constraints).split(area);
        for ((title, value), tile_area) in tiles.into_iter().zip(areas.iter()) {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    value,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(title, Style::default().fg(Color::DarkGray))),
            ])
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
            frame.render_widget(paragraph, *tile_area);
        }
    }
}

fn stat_tiles(summary: &TrendsSummary) -> Vec<(&'static str, String)> {
    vec![
        ("average", format!("{:.0} mg/dL", summary.mean)),
        (
            "time in range",
            format!("{:.0}% ({:.0}-{:.0})", summary.time_in_range_pct, RANGE_LOW, RANGE_HIGH),
        ),
        ("below range", format!("{:.0}%", summary.time_below_pct)),
        ("above range", format!("{:.0}%", summary.time_above_pct)),
        ("variability", format!("±{:.0}", summary.std_dev)),
        (
            "peak / low hour",
            format!("{:02}:00 / {:02}:00", summary.peak_hour, summary.lowest_hour),
        ),
    ]
}

impl<'a> Component for TrendsScreen<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [filter_area, chart_area, stats_area] =
            Layout::vertical([Length(1), Min(8), Length(4)]).areas(area);

        self.draw_filter_bar(frame, filter_area);
        self.draw_chart(frame, chart_area);
        self.draw_stats(frame, stats_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(trends: &TrendsState) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut screen = TrendsScreen { trends };
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_filter_chart_and_tiles() {
        let trends = TrendsState::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        let text = render_to_text(&trends);
        assert!(text.contains("2025-06-09 → 2025-06-15"));
        assert!(text.contains("all meals"));
        assert!(text.contains("Glucose — sample day"));
        assert!(text.contains("time in range"));
        assert!(text.contains("variability"));
    }

    #[test]
    fn test_stat_tiles_format_summary() {
        let trends = TrendsState::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        let tiles = stat_tiles(&trends.summary);
        assert_eq!(tiles.len(), 6);
        assert!(tiles[1].1.contains("70-180"));
        assert!(tiles[5].1.contains("19:00"));
    }
}
