use super::{describe_failure, messages};
use chrono::NaiveDate;
use roster_client::AdminApi;
use roster_core::{reshape, BucketDomain, BucketMap, DenseSeries, Result};
use tracing::{debug, warn};

/// Which aggregation the chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Hours,
    Minutes,
}

/// Registrations chart state.
#[derive(Debug)]
pub struct ChartView {
    day: NaiveDate,
    hour: u8,
    kind: ChartKind,
    hours_data: BucketMap,
    minutes_data: BucketMap,
    pub error: Option<String>,
    login_required: bool,
}

impl ChartView {
    /// Hourly chart for `day`.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            hour: 0,
            kind: ChartKind::Hours,
            hours_data: BucketMap::new(),
            minutes_data: BucketMap::new(),
            error: None,
            login_required: false,
        }
    }

    /// Per-minute chart for `hour` of `day`.
    pub fn minutes(day: NaiveDate, hour: u32) -> Result<Self> {
        let mut view = Self::new(day);
        view.select_hour(hour)?;
        view.kind = ChartKind::Minutes;
        Ok(view)
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn login_required(&self) -> bool {
        self.login_required
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
    }

    pub fn select_hour(&mut self, hour: u32) -> Result<()> {
        if let BucketDomain::Minutes { hour } = BucketDomain::minutes(hour)? {
            self.hour = hour;
        }
        Ok(())
    }

    pub fn domain(&self) -> BucketDomain {
        match self.kind {
            ChartKind::Hours => BucketDomain::Hours,
            ChartKind::Minutes => BucketDomain::Minutes { hour: self.hour },
        }
    }

    /// Fetch the data for the current selection.
    ///
    /// On failure the previously loaded data stays in place.
    pub async fn load<A: AdminApi + ?Sized>(&mut self, api: &A) -> bool {
        self.error = None;

        let (result, action) = match self.kind {
            ChartKind::Hours => (
                api.group_by_hours(self.day).await,
                messages::HOURS_LOAD_FAILED,
            ),
            ChartKind::Minutes => (
                api.group_by_minutes(self.day, Some(self.hour)).await,
                messages::MINUTES_LOAD_FAILED,
            ),
        };

        match result {
            Ok(data) => {
                debug!(buckets = data.len(), kind = ?self.kind, "Chart data loaded");
                match self.kind {
                    ChartKind::Hours => self.hours_data = data,
                    ChartKind::Minutes => self.minutes_data = data,
                }
                self.login_required = false;
                true
            }
            Err(e) => {
                warn!(error = %e, kind = ?self.kind, "Failed to load chart data");
                let (message, login_required) = describe_failure(action, &e);
                self.error = Some(message);
                self.login_required = login_required;
                false
            }
        }
    }

    /// Dense series for the current selection.
    pub fn series(&self) -> DenseSeries {
        let data = match self.kind {
            ChartKind::Hours => &self.hours_data,
            ChartKind::Minutes => &self.minutes_data,
        };
        reshape(data, self.domain())
    }

    /// Horizontal bar chart, `width` characters at the axis ceiling.
    pub fn render(&self, width: usize) -> String {
        let series = self.series();
        let axis_max = series.axis_max();
        let count_width = series.max().to_string().len();

        let mut out = format!("{}, {}\n", series.domain.title(), self.day);
        for (label, count) in series.iter() {
            let bar = "#".repeat(bar_length(count, axis_max, width));
            out.push_str(&format!("{label} | {count:>count_width$} {bar}\n"));
        }
        out.push_str(&format!(
            "total {} | axis max {:.2}\n",
            series.total(),
            axis_max
        ));
        out
    }
}

fn bar_length(count: u64, axis_max: f64, width: usize) -> usize {
    if axis_max <= 0.0 {
        return 0;
    }
    ((count as f64 / axis_max) * width as f64).round() as usize
}
