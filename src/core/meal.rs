//! # Meal Impact Simulator
//!
//! Form state for describing a meal, a preset shelf, and the simulated
//! response curve. "Simulation" is a fixed 13-point series delivered after
//! a delay — the stand-in for a real forecasting model. The summary figures
//! (peak, recovery time) are genuinely derived from the series; the
//! qualitative impact label is not (it is a fixed string, matching the
//! demo it reproduces).

use crate::core::request::{PendingRequest, Ticket};

/// How far from baseline still counts as "recovered", in mg/dL.
pub const BASELINE_EPSILON: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlycemicIndex {
    Low,
    Medium,
    High,
}

impl GlycemicIndex {
    pub fn label(&self) -> &'static str {
        match self {
            GlycemicIndex::Low => "low",
            GlycemicIndex::Medium => "medium",
            GlycemicIndex::High => "high",
        }
    }
}

/// Which text field of the form an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealField {
    Description,
    CarbsGrams,
    InsulinUnits,
}

/// Meal description as entered. Numeric fields stay strings — the form
/// stores keystrokes, not parsed values.
#[derive(Debug, Clone, Default)]
pub struct MealForm {
    pub description: String,
    pub carbs_grams: String,
    pub glycemic_index: Option<GlycemicIndex>,
    pub insulin_units: String,
}

impl MealForm {
    pub fn field(&self, field: MealField) -> &str {
        match field {
            MealField::Description => &self.description,
            MealField::CarbsGrams => &self.carbs_grams,
            MealField::InsulinUnits => &self.insulin_units,
        }
    }

    pub fn field_mut(&mut self, field: MealField) -> &mut String {
        match field {
            MealField::Description => &mut self.description,
            MealField::CarbsGrams => &mut self.carbs_grams,
            MealField::InsulinUnits => &mut self.insulin_units,
        }
    }
}

pub struct MealPreset {
    pub name: &'static str,
    pub carbs: &'static str,
    pub gi: GlycemicIndex,
}

/// The demo's fixed preset shelf.
pub const PRESETS: [MealPreset; 4] = [
    MealPreset { name: "Oatmeal with berries", carbs: "45", gi: GlycemicIndex::Low },
    MealPreset { name: "Turkey sandwich", carbs: "38", gi: GlycemicIndex::Medium },
    MealPreset { name: "Pizza, two slices", carbs: "72", gi: GlycemicIndex::High },
    MealPreset { name: "Greek yogurt", carbs: "12", gi: GlycemicIndex::Low },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionPoint {
    pub minute_offset: u32,
    pub predicted: f64,
    pub baseline: f64,
}

/// Glucose-vs-time response curve. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSeries {
    pub points: Vec<PredictionPoint>,
}

/// Figures the prediction panel shows under the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSummary {
    pub peak_value: f64,
    pub peak_minute: u32,
    /// Minute offset at which the curve first returns to within
    /// [`BASELINE_EPSILON`] of baseline, searching from the peak onward.
    /// None if it never does within the series.
    pub return_to_baseline_minute: Option<u32>,
    pub impact_label: &'static str,
}

impl PredictionSeries {
    /// Peak point: max by predicted value, ties broken by earliest offset.
    pub fn peak(&self) -> Option<&PredictionPoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.predicted > best.predicted { p } else { best })
    }

    pub fn summary(&self) -> Option<PredictionSummary> {
        let peak = self.peak()?;
        let return_to_baseline_minute = self
            .points
            .iter()
            .filter(|p| p.minute_offset > peak.minute_offset)
            .find(|p| (p.predicted - p.baseline).abs() <= BASELINE_EPSILON)
            .map(|p| p.minute_offset);
        Some(PredictionSummary {
            peak_value: peak.predicted,
            peak_minute: peak.minute_offset,
            return_to_baseline_minute,
            // Not derived from the curve. The demo this reproduces pinned it.
            impact_label: "Moderate",
        })
    }
}

/// The canned response curve: 0..=180 minutes at 15-minute steps.
/// A real model would shape this from the form; the mock ignores it.
pub fn sample_prediction() -> PredictionSeries {
    const PREDICTED: [f64; 13] = [
        110.0, 118.0, 132.0, 149.0, 162.0, 168.0, 165.0, 155.0, 143.0, 132.0, 124.0, 117.0, 112.0,
    ];
    let points = PREDICTED
        .iter()
        .enumerate()
        .map(|(i, &predicted)| PredictionPoint {
            minute_offset: i as u32 * 15,
            predicted,
            baseline: 110.0,
        })
        .collect();
    PredictionSeries { points }
}

pub struct MealSimState {
    pub form: MealForm,
    pub prediction: Option<PredictionSeries>,
    pub request: PendingRequest,
}

impl Default for MealSimState {
    fn default() -> Self {
        Self::new()
    }
}

impl MealSimState {
    pub fn new() -> Self {
        Self {
            form: MealForm::default(),
            prediction: None,
            request: PendingRequest::new(),
        }
    }

    pub fn set_field(&mut self, field: MealField, value: String) {
        *self.form.field_mut(field) = value;
    }

    /// Cycle the glycemic index through unset → low → medium → high → unset.
    pub fn cycle_glycemic_index(&mut self) {
        self.form.glycemic_index = match self.form.glycemic_index {
            None => Some(GlycemicIndex::Low),
            Some(GlycemicIndex::Low) => Some(GlycemicIndex::Medium),
            Some(GlycemicIndex::Medium) => Some(GlycemicIndex::High),
            Some(GlycemicIndex::High) => None,
        };
    }

    /// Fill the form from a preset. Insulin units are cleared: a preset
    /// describes the meal, and a dose left over from a previous scenario
    /// would skew the next simulation.
    pub fn apply_preset(&mut self, preset: &MealPreset) {
        self.form.description = preset.name.to_string();
        self.form.carbs_grams = preset.carbs.to_string();
        self.form.glycemic_index = Some(preset.gi);
        self.form.insulin_units.clear();
    }

    /// Simulation requires a description and a carb count, and only one
    /// run at a time.
    pub fn can_simulate(&self) -> bool {
        !self.form.description.trim().is_empty()
            && !self.form.carbs_grams.trim().is_empty()
            && !self.request.is_pending()
    }

    /// Arm the simulation request. Returns false (no state change) when
    /// disabled.
    pub fn simulate(&mut self, ticket: Ticket) -> bool {
        if !self.can_simulate() {
            return false;
        }
        self.request.start(ticket)
    }

    /// Store the delivered series iff the ticket is still live.
    pub fn deliver_prediction(&mut self, ticket: Ticket, series: PredictionSeries) -> bool {
        if !self.request.complete(ticket) {
            return false;
        }
        self.prediction = Some(series);
        true
    }
}
