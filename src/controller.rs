use std::sync::Arc;

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    calendar,
    charts::{
        axis::{
            chart_lower_limit, chart_upper_limit, has_enough_data_for_weekly, AxisRange,
            DEFAULT_LOWER_LIMIT, DEFAULT_UPPER_LIMIT,
        },
        series::{values_by_day, values_by_month, values_by_week, ChartPoint, Granularity, Metric},
    },
    db::{
        models::{DayEntry, EntryField},
        Database,
    },
    settings::SettingsStore,
};

/// Screens of the application. Switched only by explicit user selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppTab {
    Calendar,
    Chart,
    Settings,
}

/// Current navigation state: which screen is shown and which (year, month)
/// the calendar and chart operate on. Transient, not persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub tab: AppTab,
    pub granularity: Granularity,
    pub year: i32,
    /// 0-based month.
    pub month: u32,
}

impl ViewState {
    fn today() -> Self {
        Self {
            tab: AppTab::Calendar,
            granularity: Granularity::Daily,
            year: calendar::current_year(),
            month: calendar::current_month(),
        }
    }
}

/// Everything the chart renderer needs for one series: the plotted points
/// (already offset by `axis.lower`), the axis domain, and the granularity
/// that was actually used after the insufficient-data fallback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub points: Vec<ChartPoint>,
    pub axis: AxisRange,
    pub granularity: Granularity,
}

/// Owns navigation state and mediates between the entry store, the settings
/// store, and the chart series computation.
#[derive(Clone)]
pub struct AppController {
    db: Database,
    settings: Arc<SettingsStore>,
    state: Arc<Mutex<ViewState>>,
}

impl AppController {
    /// Builds a controller pointed at today's month and materializes it so
    /// the edit grid starts dense.
    pub async fn new(db: Database, settings: Arc<SettingsStore>) -> Result<Self> {
        let controller = Self {
            db,
            settings,
            state: Arc::new(Mutex::new(ViewState::today())),
        };

        let state = controller.state.lock().await.clone();
        controller
            .ensure_month_materialized(state.year, state.month)
            .await?;

        Ok(controller)
    }

    pub async fn view_state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub async fn select_tab(&self, tab: AppTab) {
        self.state.lock().await.tab = tab;
    }

    pub async fn select_granularity(&self, granularity: Granularity) {
        self.state.lock().await.granularity = granularity;
    }

    /// Switches the selected month (0-based) and fills it with blank rows if
    /// it has never been visited.
    pub async fn select_month(&self, month: u32) -> Result<()> {
        let year = {
            let mut state = self.state.lock().await;
            state.month = month;
            state.year
        };
        self.ensure_month_materialized(year, month).await
    }

    pub async fn select_year(&self, year: i32) -> Result<()> {
        let month = {
            let mut state = self.state.lock().await;
            state.year = year;
            state.month
        };
        self.ensure_month_materialized(year, month).await
    }

    /// Idempotent: months that already have rows are left untouched.
    pub async fn ensure_month_materialized(&self, year: i32, month: u32) -> Result<()> {
        self.db.materialize_month(year, month).await
    }

    pub async fn entries_for_month(&self, year: i32, month: u32) -> Result<Vec<DayEntry>> {
        self.db.entries_for_month(year, month).await
    }

    pub async fn entries_for_year(&self, year: i32) -> Result<Vec<DayEntry>> {
        self.db.entries_for_year(year).await
    }

    pub async fn set_morning_weight(
        &self,
        year: i32,
        month: u32,
        day: u32,
        weight: Option<f64>,
    ) -> Result<()> {
        self.db
            .update_field(year, month, day, EntryField::MorningWeight(weight))
            .await
    }

    pub async fn set_evening_weight(
        &self,
        year: i32,
        month: u32,
        day: u32,
        weight: Option<f64>,
    ) -> Result<()> {
        self.db
            .update_field(year, month, day, EntryField::EveningWeight(weight))
            .await
    }

    pub async fn set_steps(
        &self,
        year: i32,
        month: u32,
        day: u32,
        steps: Option<u32>,
    ) -> Result<()> {
        self.db
            .update_field(year, month, day, EntryField::Steps(steps))
            .await
    }

    pub fn target_steps(&self) -> u32 {
        self.settings.target_steps()
    }

    pub fn set_target_steps(&self, steps: u32) -> Result<()> {
        self.settings.set_target_steps(steps)
    }

    pub fn chart_step(&self) -> f64 {
        self.settings.chart_step()
    }

    pub fn set_chart_step(&self, step: f64) -> Result<()> {
        self.settings.set_chart_step(step)
    }

    /// Computes the series for the current selection and `metric`.
    ///
    /// Weekly granularity silently falls back to daily when the selected
    /// month has too few readings for a meaningful weekly average; the
    /// granularity actually used is reported in the model.
    pub async fn chart_model(&self, metric: Metric) -> Result<ChartModel> {
        let state = self.state.lock().await.clone();
        let entries = self.db.entries_for_year(state.year).await?;

        let values: Vec<Option<f64>> = entries.iter().map(|e| metric.value_of(e)).collect();
        let lower = chart_lower_limit(DEFAULT_LOWER_LIMIT, &values);
        let upper = chart_upper_limit(DEFAULT_UPPER_LIMIT, &values);
        let axis = AxisRange {
            lower,
            upper,
            step: self.settings.chart_step(),
        };

        let (points, granularity) = match state.granularity {
            Granularity::Daily => (
                values_by_day(&entries, state.year, state.month, lower, metric),
                Granularity::Daily,
            ),
            Granularity::Weekly => {
                if has_enough_data_for_weekly(&entries, state.month, metric) {
                    (
                        values_by_week(&entries, state.year, state.month, lower, metric),
                        Granularity::Weekly,
                    )
                } else {
                    info!(
                        "Not enough readings in {}-{} for a weekly chart; showing daily",
                        state.year, state.month
                    );
                    (
                        values_by_day(&entries, state.year, state.month, lower, metric),
                        Granularity::Daily,
                    )
                }
            }
            Granularity::Monthly => (
                values_by_month(&entries, state.year, lower, metric),
                Granularity::Monthly,
            ),
        };

        Ok(ChartModel {
            points,
            axis,
            granularity,
        })
    }
}
