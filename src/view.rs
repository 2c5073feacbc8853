use crate::filter::{DurationWindow, ParseDurationError, display_order, filter_by_duration};
use crate::models::BodyCompositionPayload;
use crate::series::MeasurementSeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    pub const ALL: [Self; 2] = [Self::Daily, Self::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid granularity '{0}': expected 'daily' or 'monthly'")]
pub struct ParseGranularityError(pub String);

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ParseGranularityError(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error(transparent)]
    Granularity(#[from] ParseGranularityError),
    #[error(transparent)]
    Duration(#[from] ParseDurationError),
}

const DAILY_DURATIONS: [DurationWindow; 7] = [
    DurationWindow::WEEK,
    DurationWindow::MONTH,
    DurationWindow::QUARTER,
    DurationWindow::HALF_YEAR,
    DurationWindow::YEAR,
    DurationWindow::THREE_YEARS,
    DurationWindow::All,
];

/// Durations offered for a granularity. A one-week window holds at most one
/// monthly point, so monthly starts at one month.
pub fn duration_options(granularity: Granularity) -> Vec<DurationWindow> {
    match granularity {
        Granularity::Daily => DAILY_DURATIONS.to_vec(),
        Granularity::Monthly => DAILY_DURATIONS
            .into_iter()
            .filter(|window| *window != DurationWindow::WEEK)
            .collect(),
    }
}

pub fn default_duration(granularity: Granularity) -> DurationWindow {
    match granularity {
        Granularity::Daily => DurationWindow::MONTH,
        Granularity::Monthly => DurationWindow::YEAR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    GranularityChanged(Granularity),
    DurationChanged(DurationWindow),
}

/// The dashboard's entire UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub granularity: Granularity,
    pub duration: DurationWindow,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

impl ViewState {
    pub fn initial() -> Self {
        Self {
            granularity: Granularity::Daily,
            duration: default_duration(Granularity::Daily),
        }
    }

    /// Switches granularity. An explicit duration survives the switch when the
    /// new granularity offers it; otherwise the granularity's default applies.
    pub fn select_granularity(
        self,
        granularity: Granularity,
        explicit: Option<DurationWindow>,
    ) -> Self {
        let duration = explicit
            .filter(|window| duration_options(granularity).contains(window))
            .unwrap_or_else(|| default_duration(granularity));
        Self {
            granularity,
            duration,
        }
    }

    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::GranularityChanged(granularity) => self.select_granularity(granularity, None),
            ViewEvent::DurationChanged(duration) => self.select_granularity(self.granularity, Some(duration)),
        }
    }

    /// Rebuilds the state from submitted control values. `changed` names the
    /// control that triggered the submission; when it is the granularity
    /// select, the submitted duration belongs to the previous granularity and
    /// is not an explicit choice.
    pub fn from_controls(
        granularity: Option<&str>,
        duration: Option<&str>,
        changed: Option<&str>,
    ) -> Result<Self, ControlError> {
        let granularity = non_empty(granularity).map(str::parse::<Granularity>).transpose()?;
        let duration = non_empty(duration).map(str::parse::<DurationWindow>).transpose()?;
        let explicit = match non_empty(changed) {
            Some(control) if control.eq_ignore_ascii_case("granularity") => None,
            _ => duration,
        };

        let state = Self::initial();
        Ok(match (granularity, explicit) {
            (Some(granularity), explicit) => state.select_granularity(granularity, explicit),
            (None, Some(duration)) => state.apply(ViewEvent::DurationChanged(duration)),
            (None, None) => state,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub weight: Vec<Option<f64>>,
    pub body_fat: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_change_rate: Option<f64>,
}

/// Everything the page needs for one render: the controls, the chart in
/// chronological order, and the table newest first. Both come from the same
/// filtered series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: &'static str,
    pub granularity: Granularity,
    pub duration: String,
    pub options: Vec<DurationOption>,
    pub show_change_rate: bool,
    pub chart: ChartData,
    pub table: Vec<TableRow>,
}

/// The duration select's options for a state, with the current one marked.
pub fn option_list(state: ViewState) -> Vec<DurationOption> {
    duration_options(state.granularity)
        .into_iter()
        .map(|window| DurationOption {
            value: window.to_string(),
            label: window.label(),
            selected: window == state.duration,
        })
        .collect()
}

/// Holds the daily and monthly series for one page load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    daily: MeasurementSeries,
    monthly: MeasurementSeries,
}

impl Dashboard {
    pub fn from_payload(payload: &BodyCompositionPayload) -> Self {
        Self {
            daily: MeasurementSeries::from_daily(payload.daily()),
            monthly: MeasurementSeries::from_monthly(payload.monthly()),
        }
    }

    pub fn series(&self, granularity: Granularity) -> &MeasurementSeries {
        match granularity {
            Granularity::Daily => &self.daily,
            Granularity::Monthly => &self.monthly,
        }
    }

    pub fn render(&self, state: ViewState, today: NaiveDate) -> DashboardView {
        let active = self.series(state.granularity);
        let filtered = filter_by_duration(active, state.duration, today);

        let chart = ChartData {
            labels: filtered.dates().iter().map(|date| date.label().to_string()).collect(),
            weight: filtered.weight().to_vec(),
            body_fat: filtered.body_fat().to_vec(),
        };

        let rates = filtered.weight_change_rate();
        let table = display_order(&filtered)
            .into_iter()
            .map(|index| TableRow {
                date: filtered.dates()[index].label().to_string(),
                weight: filtered.weight()[index],
                body_fat: filtered.body_fat()[index],
                weight_change_rate: rates.and_then(|rates| rates[index]),
            })
            .collect();

        DashboardView {
            status: "ready",
            granularity: state.granularity,
            duration: state.duration.to_string(),
            options: option_list(state),
            show_change_rate: filtered.has_change_rate(),
            chart,
            table,
        }
    }
}

/// Outcome of the one fetch a page load performs.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardLoad {
    Ready(Dashboard),
    Unavailable(String),
}
