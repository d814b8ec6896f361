use crate::engine::types::*;

/// Live rate samples kept for the chart.
const CHART_WINDOW: usize = 240;

/// Current phase of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Connecting,
    Downloading,
    Results,
}

/// TUI application state, updated by consuming ProbeEvents.
pub struct App {
    pub phase: Phase,
    pub url: String,

    // Runs
    pub run: u32,
    pub total: u32,
    pub completed: u32,

    // Transfer progress of the current run
    pub transfer_bytes: u64,
    pub transfer_total: Option<u64>,
    pub current_rate: f64,
    pub chart_data: Vec<f64>,

    // Finished runs
    pub run_rates: Vec<(u32, f64)>,
    pub failures: Vec<RunFailure>,
    pub report: Option<AggregateReport>,

    pub should_quit: bool,
}

impl App {
    pub fn new(url: impl Into<String>, total: u32) -> Self {
        Self {
            phase: Phase::Connecting,
            url: url.into(),
            run: 0,
            total,
            completed: 0,
            transfer_bytes: 0,
            transfer_total: None,
            current_rate: 0.0,
            chart_data: Vec::new(),
            run_rates: Vec::new(),
            failures: Vec::new(),
            report: None,
            should_quit: false,
        }
    }

    /// Process an engine event and update state.
    pub fn handle_event(&mut self, event: ProbeEvent) {
        match event {
            ProbeEvent::RunStart { run, total, url } => {
                self.phase = Phase::Connecting;
                self.run = run;
                self.total = total;
                self.url = url;
                self.transfer_bytes = 0;
                self.transfer_total = None;
                self.current_rate = 0.0;
                self.chart_data.clear();
            }
            ProbeEvent::ResponseReceived { content_length } => {
                self.phase = Phase::Downloading;
                self.transfer_total = content_length;
            }
            ProbeEvent::TransferProgress {
                bytes_so_far,
                total_bytes,
                current_rate,
            } => {
                self.phase = Phase::Downloading;
                self.transfer_bytes = bytes_so_far;
                self.transfer_total = total_bytes;
                self.current_rate = current_rate;
                self.chart_data.push(current_rate / 1_000_000.0);
                if self.chart_data.len() > CHART_WINDOW {
                    let excess = self.chart_data.len() - CHART_WINDOW;
                    self.chart_data.drain(..excess);
                }
            }
            ProbeEvent::RunComplete { run, result, .. } => {
                self.completed += 1;
                self.current_rate = result.rate();
                self.run_rates.push((run, result.rate()));
            }
            ProbeEvent::RunFailed { run, error, .. } => {
                self.completed += 1;
                self.failures.push(RunFailure { run, error });
            }
            ProbeEvent::Complete(report) | ProbeEvent::AllRunsFailed(report) => {
                self.report = Some(report);
                self.phase = Phase::Results;
            }
        }
    }

    /// Fraction of the current run's body received, when the size is known.
    pub fn transfer_fraction(&self) -> Option<f64> {
        match self.transfer_total {
            Some(total) if total > 0 => Some((self.transfer_bytes as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }

    /// Overall session progress as fraction (0.0..1.0).
    pub fn overall_progress(&self) -> f64 {
        if self.phase == Phase::Results {
            return 1.0;
        }
        if self.total == 0 {
            return 0.0;
        }
        let in_flight = if self.run > self.completed {
            self.transfer_fraction().unwrap_or(0.0)
        } else {
            0.0
        };
        ((self.completed as f64 + in_flight) / self.total as f64).min(1.0)
    }
}
