//! Drawer chart series: the whole hormone series as per-day points, so
//! the detail view shows the selected day in cycle-wide context.

use shared::domain::HormoneSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub day: String,
    pub estrogen: f64,
    pub progesterone: f64,
}

pub fn chart_points(series: &HormoneSeries) -> Vec<ChartPoint> {
    series
        .days
        .iter()
        .enumerate()
        .filter_map(|(index, day)| {
            Some(ChartPoint {
                day: format!("Day {day}"),
                estrogen: *series.estradiol.get(index)?,
                progesterone: *series.progesterone.get(index)?,
            })
        })
        .collect()
}
