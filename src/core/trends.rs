//! # Glucose Trends
//!
//! Filter state plus the sample CGM day the demo ships with. The summary
//! statistics mirror what the forecasting model reports on real data: mean,
//! time in range 70–180 mg/dL, time below 70, time above 180, standard
//! deviation, and the peak/lowest hours of the day.
//!
//! The filter is stored but does not subset the displayed series — the
//! readings and summary are computed once from the fixed sample. That
//! decoupling is intentional here; see DESIGN.md.

use chrono::{Duration, Local, NaiveDate};

/// Range used for time-in-range figures, in mg/dL.
pub const RANGE_LOW: f64 = 70.0;
pub const RANGE_HIGH: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealFilter {
    #[default]
    All,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealFilter {
    pub const ALL: [MealFilter; 5] = [
        MealFilter::All,
        MealFilter::Breakfast,
        MealFilter::Lunch,
        MealFilter::Dinner,
        MealFilter::Snack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealFilter::All => "all meals",
            MealFilter::Breakfast => "breakfast",
            MealFilter::Lunch => "lunch",
            MealFilter::Dinner => "dinner",
            MealFilter::Snack => "snack",
        }
    }

    pub fn next(&self) -> MealFilter {
        let idx = MealFilter::ALL.iter().position(|f| f == self).unwrap_or(0);
        MealFilter::ALL[(idx + 1) % MealFilter::ALL.len()]
    }
}

/// Date window + meal filter. Stored exactly as given; start > end is
/// accepted and kept as-is, not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsFilter {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meal_filter: MealFilter,
}

/// One CGM sample: minute of day and reading in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlucoseReading {
    pub minute_of_day: u32,
    pub mgdl: f64,
}

/// Summary figures shown in the stat tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendsSummary {
    pub mean: f64,
    pub time_in_range_pct: f64,
    pub time_below_pct: f64,
    pub time_above_pct: f64,
    pub std_dev: f64,
    /// Hour of day (0–23) with the highest average reading.
    pub peak_hour: u32,
    /// Hour of day (0–23) with the lowest average reading.
    pub lowest_hour: u32,
}

/// A plausible day of readings at 30-minute cadence: overnight settling,
/// a dawn rise, and three meal excursions (the dinner one largest).
pub fn sample_readings() -> Vec<GlucoseReading> {
    const MGDL: [f64; 48] = [
        108.0, 105.0, 102.0, 99.0, 97.0, 95.0, // 00:00 - 02:30
        93.0, 92.0, 91.0, 92.0, 96.0, 103.0, // 03:00 - 05:30
        112.0, 120.0, 126.0, 124.0, 138.0, 158.0, // 06:00 - 08:30, breakfast
        171.0, 164.0, 150.0, 138.0, 128.0, 121.0, // 09:00 - 11:30
        118.0, 135.0, 156.0, 167.0, 160.0, 148.0, // 12:00 - 14:30, lunch
        137.0, 128.0, 122.0, 118.0, 115.0, 113.0, // 15:00 - 17:30
        116.0, 142.0, 172.0, 188.0, 181.0, 166.0, // 18:00 - 20:30, dinner
        151.0, 139.0, 129.0, 122.0, 116.0, 111.0, // 21:00 - 23:30
    ];
    MGDL.iter()
        .enumerate()
        .map(|(i, &mgdl)| GlucoseReading { minute_of_day: i as u32 * 30, mgdl })
        .collect()
}

/// Compute the stat-tile figures from a series of readings.
pub fn summarize(readings: &[GlucoseReading]) -> TrendsSummary {
    let n = readings.len().max(1) as f64;
    let mean = readings.iter().map(|r| r.mgdl).sum::<f64>() / n;

    let in_range = readings
        .iter()
        .filter(|r| (RANGE_LOW..=RANGE_HIGH).contains(&r.mgdl))
        .count() as f64;
    let below = readings.iter().filter(|r| r.mgdl < RANGE_LOW).count() as f64;
    let above = readings.iter().filter(|r| r.mgdl > RANGE_HIGH).count() as f64;

    let variance = readings.iter().map(|r| (r.mgdl - mean).powi(2)).sum::<f64>() / n;

    // Hourly averages for the pattern figures.
    let mut sums = [0.0f64; 24];
    let mut counts = [0u32; 24];
    for r in readings {
        let hour = (r.minute_of_day / 60).min(23) as usize;
        sums[hour] += r.mgdl;
        counts[hour] += 1;
    }
    let mut peak_hour = 0;
    let mut lowest_hour = 0;
    let mut peak_avg = f64::MIN;
    let mut lowest_avg = f64::MAX;
    for hour in 0..24 {
        if counts[hour] == 0 {
            continue;
        }
        let avg = sums[hour] / counts[hour] as f64;
        if avg > peak_avg {
            peak_avg = avg;
            peak_hour = hour as u32;
        }
        if avg < lowest_avg {
            lowest_avg = avg;
            lowest_hour = hour as u32;
        }
    }

    TrendsSummary {
        mean,
        time_in_range_pct: in_range / n * 100.0,
        time_below_pct: below / n * 100.0,
        time_above_pct: above / n * 100.0,
        std_dev: variance.sqrt(),
        peak_hour,
        lowest_hour,
    }
}

pub struct TrendsState {
    pub filter: TrendsFilter,
    pub readings: Vec<GlucoseReading>,
    pub summary: TrendsSummary,
}

impl Default for TrendsState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl TrendsState {
    /// Screen-mount state: a seven-day window ending today, all meals,
    /// and the summary computed once from the sample day.
    pub fn new(today: NaiveDate) -> Self {
        let readings = sample_readings();
        let summary = summarize(&readings);
        Self {
            filter: TrendsFilter {
                start_date: today - Duration::days(6),
                end_date: today,
                meal_filter: MealFilter::All,
            },
            readings,
            summary,
        }
    }

    /// Unconditional store. The displayed series does not re-derive.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.filter.start_date = start;
        self.filter.end_date = end;
    }

    /// Unconditional store. The displayed series does not re-derive.
    pub fn set_meal_filter(&mut self, filter: MealFilter) {
        self.filter.meal_filter = filter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summarize_known_input() {
        let readings = [
            GlucoseReading { minute_of_day: 0, mgdl: 60.0 },
            GlucoseReading { minute_of_day: 60, mgdl: 100.0 },
            GlucoseReading { minute_of_day: 120, mgdl: 200.0 },
            GlucoseReading { minute_of_day: 180, mgdl: 120.0 },
        ];
        let summary = summarize(&readings);
        assert_eq!(summary.mean, 120.0);
        assert_eq!(summary.time_in_range_pct, 50.0);
        assert_eq!(summary.time_below_pct, 25.0);
        assert_eq!(summary.time_above_pct, 25.0);
        assert!((summary.std_dev - 2600.0f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.peak_hour, 2);
        assert_eq!(summary.lowest_hour, 0);
    }

    #[test]
    fn test_sample_day_shape() {
        let readings = sample_readings();
        assert_eq!(readings.len(), 48);
        assert!(readings.windows(2).all(|w| w[0].minute_of_day < w[1].minute_of_day));
        // Stays inside the plausible CGM band.
        assert!(readings.iter().all(|r| (40.0..=400.0).contains(&r.mgdl)));

        let summary = summarize(&readings);
        assert!(summary.time_in_range_pct > 80.0);
        assert_eq!(summary.time_below_pct, 0.0);
        // Dinner excursion peaks between 19:00 and 20:00.
        assert_eq!(summary.peak_hour, 19);
        // Overnight low sits around 04:00.
        assert_eq!(summary.lowest_hour, 4);
    }

    #[test]
    fn test_filter_stores_exactly_what_it_is_given() {
        let mut trends = TrendsState::new(date(2025, 6, 15));
        assert_eq!(trends.filter.start_date, date(2025, 6, 9));
        assert_eq!(trends.filter.end_date, date(2025, 6, 15));

        // Inverted range accepted as-is.
        trends.set_date_range(date(2025, 7, 1), date(2025, 6, 1));
        assert_eq!(trends.filter.start_date, date(2025, 7, 1));
        assert_eq!(trends.filter.end_date, date(2025, 6, 1));

        trends.set_meal_filter(MealFilter::Dinner);
        assert_eq!(trends.filter.meal_filter, MealFilter::Dinner);
    }

    #[test]
    fn test_display_is_decoupled_from_filter() {
        let mut trends = TrendsState::new(date(2025, 6, 15));
        let before = trends.summary.clone();
        let readings_before = trends.readings.len();

        trends.set_meal_filter(MealFilter::Snack);
        trends.set_date_range(date(2020, 1, 1), date(2020, 1, 2));

        assert_eq!(trends.summary, before);
        assert_eq!(trends.readings.len(), readings_before);
    }

    #[test]
    fn test_meal_filter_cycle() {
        let mut f = MealFilter::All;
        for expected in [
            MealFilter::Breakfast,
            MealFilter::Lunch,
            MealFilter::Dinner,
            MealFilter::Snack,
            MealFilter::All,
        ] {
            f = f.next();
            assert_eq!(f, expected);
        }
    }
}
