//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use climadash_core::config::ViewConfig;
use climadash_core::data::Table;
use climadash_core::view::{render_range, Rendered, YearRange};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Co2,
    Temperature,
    Combined,
    Data,
    Help,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Overview,
        Panel::Co2,
        Panel::Temperature,
        Panel::Combined,
        Panel::Data,
        Panel::Help,
    ];

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Co2 => 1,
            Panel::Temperature => 2,
            Panel::Combined => 3,
            Panel::Data => 4,
            Panel::Help => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Co2 => "CO₂ Emissions",
            Panel::Temperature => "Temperature Change",
            Panel::Combined => "Combined View",
            Panel::Data => "Raw Data",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Where the table load stands.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Table>),
    Failed(String),
}

/// Raw data panel scroll position.
#[derive(Debug, Clone, Default)]
pub struct DataPanelState {
    /// First visible row.
    pub scroll: usize,
    /// First visible column after the pinned year column.
    pub col_offset: usize,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Filter
    pub range: YearRange,
    pub default_range: YearRange,
    pub bounds: (i32, i32),

    // Data
    pub load: LoadState,
    pub source_name: String,
    pub data: DataPanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        view: &ViewConfig,
        source_name: impl Into<String>,
    ) -> Self {
        let default_range = view.default_range();
        Self {
            active_panel: Panel::Overview,
            running: true,
            range: default_range,
            default_range,
            bounds: view.bounds(),
            load: LoadState::Loading,
            source_name: source_name.into(),
            data: DataPanelState::default(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn table(&self) -> Option<&Arc<Table>> {
        match &self.load {
            LoadState::Ready(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    /// Re-derive the four artifacts for the current range.
    pub fn rendered(&self) -> Option<Rendered> {
        self.table().map(|t| render_range(t, self.range))
    }

    /// Ask the worker for the table. Marks the state as loading.
    pub fn request_load(&mut self) {
        self.load = LoadState::Loading;
        self.set_status(format!("Loading dataset from {}...", self.source_name));
        if self.worker_tx.send(WorkerCommand::LoadTable).is_err() {
            self.on_load_failed("worker thread is not running".into(), false);
        }
    }

    /// Manual retry after a failed load. Ignored otherwise.
    pub fn reload(&mut self) {
        if matches!(self.load, LoadState::Failed(_)) {
            self.request_load();
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::TableLoaded { table } => self.on_table_loaded(table),
            WorkerResponse::LoadFailed { error, is_fetch } => self.on_load_failed(error, is_fetch),
        }
    }

    fn on_table_loaded(&mut self, table: Arc<Table>) {
        let report = table.report().clone();
        let span = table
            .year_span()
            .map(|(a, b)| format!("{a}–{b}"))
            .unwrap_or_else(|| "no years".into());
        info!(rows = table.len(), %span, "dashboard table ready");

        let summary = format!(
            "Loaded {} {} rows ({span})",
            table.len(),
            table.category()
        );
        self.load = LoadState::Ready(table);

        let dropped = report.skipped_rows + report.duplicate_rows;
        if dropped > 0 || report.coerced_cells > 0 {
            self.set_warning(format!(
                "{summary}; skipped {dropped} rows, nulled {} cells",
                report.coerced_cells
            ));
        } else {
            self.set_status(summary);
        }
    }

    fn on_load_failed(&mut self, error: String, is_fetch: bool) {
        warn!(%error, "dashboard load failed");
        let category = if is_fetch {
            ErrorCategory::Network
        } else {
            ErrorCategory::Data
        };
        self.load = LoadState::Failed(error.clone());
        self.push_error(category, format!("{error} (press r to retry)"), self.source_name.clone());
    }

    // ── Year range ───────────────────────────────────────────────────

    pub fn set_range(&mut self, range: YearRange) {
        let range = range.clamped(self.bounds.0, self.bounds.1);
        if range != self.range {
            self.range = range;
            self.data.scroll = 0;
        }
    }

    pub fn shift_start(&mut self, delta: i32) {
        self.set_range(self.range.shift_start(delta, self.bounds));
    }

    pub fn shift_end(&mut self, delta: i32) {
        self.set_range(self.range.shift_end(delta, self.bounds));
    }

    pub fn shift_window(&mut self, delta: i32) {
        self.set_range(self.range.shift(delta, self.bounds));
    }

    pub fn reset_range(&mut self) {
        self.set_range(self.default_range);
    }

    // ── Status + errors ──────────────────────────────────────────────

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
