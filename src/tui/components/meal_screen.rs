//! # Meal Simulator Screen Component
//!
//! Meal form on the left, predicted response curve on the right once a
//! simulation has resolved. Field focus and the preset cursor are
//! presentation state and live in `MealScreenState`; the form itself is
//! core state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};

use crate::core::meal::{MealField, MealSimState, PRESETS};
use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

/// Which form row has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealFocus {
    #[default]
    Description,
    CarbsGrams,
    GlycemicIndex,
    InsulinUnits,
}

impl MealFocus {
    const ORDER: [MealFocus; 4] = [
        MealFocus::Description,
        MealFocus::CarbsGrams,
        MealFocus::GlycemicIndex,
        MealFocus::InsulinUnits,
    ];

    pub fn next(&self) -> MealFocus {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> MealFocus {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// The text field this row edits, if it is a text row.
    pub fn field(&self) -> Option<MealField> {
        match self {
            MealFocus::Description => Some(MealField::Description),
            MealFocus::CarbsGrams => Some(MealField::CarbsGrams),
            MealFocus::InsulinUnits => Some(MealField::InsulinUnits),
            MealFocus::GlycemicIndex => None,
        }
    }
}

/// Persistent presentation state for the meal screen.
#[derive(Default)]
pub struct MealScreenState {
    pub focus: MealFocus,
    /// Preset applied by the next Ctrl+P press.
    pub preset_index: usize,
}

pub struct MealScreen<'a> {
    pub meal: &'a MealSimState,
    pub state: &'a MealScreenState,
    pub spinner_frame: usize,
}

impl<'a> MealScreen<'a> {
    fn row(&self, focus: MealFocus, label: &'static str, value: String) -> Line<'static> {
        let focused = self.state.focus == focus;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if focused { "▸ " } else { "  " };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<14}"), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let form = &self.meal.form;
        let gi_label = form
            .glycemic_index
            .map(|gi| gi.label())
            .unwrap_or("unset (Space cycles)");

        let mut lines = vec![
            self.row(MealFocus::Description, "Description", form.description.clone()),
            self.row(MealFocus::CarbsGrams, "Carbs (g)", form.carbs_grams.clone()),
            self.row(MealFocus::GlycemicIndex, "Glycemic idx", gi_label.to_string()),
            self.row(MealFocus::InsulinUnits, "Insulin (U)", form.insulin_units.clone()),
            Line::default(),
        ];

        let next_preset = &PRESETS[self.state.preset_index % PRESETS.len()];
        lines.push(Line::from(vec![
            Span::styled("Ctrl+P", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" preset: {}", next_preset.name),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::default());

        lines.push(self.simulate_line());
        if !self.meal.request.is_pending() && !self.meal.can_simulate() {
            lines.push(Line::from(Span::styled(
                "needs a description and carbs",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )));
        }
        if let Some(error) = self.meal.request.error() {
            lines.push(Line::from(Span::styled(
                format!("last run failed: {error}"),
                Style::default().fg(Color::Red),
            )));
        }

        let block = Block::bordered().title("Describe a meal");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn simulate_line(&self) -> Line<'static> {
        if self.meal.request.is_pending() {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            Line::from(Span::styled(
                format!("{spinner} Simulating…"),
                Style::default().fg(Color::Yellow),
            ))
        } else if self.meal.can_simulate() {
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::styled(" run simulation", Style::default().fg(Color::White)),
            ])
        } else {
            Line::from(Span::styled(
                "Enter run simulation (disabled)",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ))
        }
    }

    fn draw_prediction(&self, frame: &mut Frame, area: Rect) {
        let Some(series) = &self.meal.prediction else {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "No simulation yet — fill the form and press Enter.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(Block::bordered().title("Predicted response"));
            frame.render_widget(placeholder, area);
            return;
        };

        use Constraint::{Length, Min};
        let [chart_area, summary_area] =
            Layout::vertical([Min(8), Length(4)]).areas(area);

        let predicted: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.minute_offset as f64, p.predicted))
            .collect();
        let baseline: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.minute_offset as f64, p.baseline))
            .collect();

        let datasets = vec![
            Dataset::default()
                .name("baseline")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&baseline),
            Dataset::default()
                .name("predicted")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&predicted),
        ];

        let chart = Chart::new(datasets)
            .block(Block::bordered().title("Predicted response"))
            .x_axis(
                Axis::default()
                    .title("minutes")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, 180.0])
                    .labels(["0", "60", "120", "180"]),
            )
            .y_axis(
                Axis::default()
                    .title("mg/dL")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([80.0, 200.0])
                    .labels(["80", "140", "200"]),
            );
        frame.render_widget(chart, chart_area);

        if let Some(summary) = series.summary() {
            let recovery = summary
                .return_to_baseline_minute
                .map(|m| format!("{m} min"))
                .unwrap_or_else(|| "beyond 3h".to_string());
            let lines = vec![
                Line::from(format!(
                    "Peak {:.0} mg/dL at {} min",
                    summary.peak_value, summary.peak_minute
                )),
                Line::from(format!("Back near baseline: {recovery}")),
                Line::from(vec![
                    Span::raw("Impact: "),
                    Span::styled(
                        summary.impact_label,
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray))),
                summary_area,
            );
        }
    }
}

impl<'a> Component for MealScreen<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Min, Percentage};
        let [form_area, prediction_area] =
            Layout::horizontal([Percentage(42), Min(0)]).areas(area);
        self.draw_form(frame, form_area);
        self.draw_prediction(frame, prediction_area);
    }
}
