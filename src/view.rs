//! Report viewing session.
//!
//! One [`ReportView`] backs one consumer (a CLI invocation, a UI page). Its state is a
//! single tagged value, so contradictory combinations such as "loading with an error" cannot
//! be represented:
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──complete──▶ Loaded | Failed | Empty
//! ```
//!
//! Every load is stamped with a [`LoadTicket`]. Starting a new load, cancelling, or dropping
//! the view invalidates older tickets and cancels their fetches, so a late response can never
//! overwrite a newer state.

use crate::report::{TrustReport, TrustReportAssembler};
use crate::source::{
    CancelHandle, CancelToken, ErrorKind, ReportSource, SourceError, cancel_pair,
    fetch_cancellable,
};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded(TrustReport),
    Failed(Failure),
    Empty,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Failed(_) => "failed",
            ViewState::Empty => "empty",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn report(&self) -> Option<&TrustReport> {
        match self {
            ViewState::Loaded(report) => Some(report),
            _ => None,
        }
    }
}

/// Why a load failed, in the form shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&SourceError> for Failure {
    fn from(err: &SourceError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ReportView {
    state: ViewState,
    generation: u64,
    in_flight: Option<CancelHandle>,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Starts a load, superseding and cancelling any load still in flight.
    pub fn begin_load(&mut self) -> (LoadTicket, CancelToken) {
        if let Some(previous) = self.in_flight.take() {
            debug!(generation = self.generation, "Superseding in-flight load");
            previous.cancel();
        }

        self.generation += 1;
        let (handle, token) = cancel_pair();
        self.in_flight = Some(handle);
        self.state = ViewState::Loading;

        (
            LoadTicket {
                generation: self.generation,
            },
            token,
        )
    }

    /// Abandons the current load and returns to `Idle`.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
        if self.state.is_loading() {
            self.generation += 1;
            self.state = ViewState::Idle;
        }
    }

    /// Applies the outcome of the load identified by `ticket`.
    ///
    /// Returns `false`, leaving the state untouched, when the ticket has been superseded or
    /// the load was already completed.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Option<TrustReport>, SourceError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.state.is_loading() {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale load result"
            );
            return false;
        }

        self.in_flight = None;
        self.state = match outcome {
            Ok(Some(report)) => ViewState::Loaded(report),
            Ok(None) => ViewState::Empty,
            Err(err) if err.is_cancelled() => ViewState::Idle,
            Err(err) => ViewState::Failed(Failure::from(&err)),
        };
        info!(state = self.state.as_str(), "Load finished");
        true
    }

    /// Fetches from `source` and assembles the result into this view.
    pub async fn load<S: ReportSource>(
        &mut self,
        source: &S,
        assembler: &TrustReportAssembler,
    ) -> &ViewState {
        let (ticket, token) = self.begin_load();
        let outcome = fetch_and_assemble(source, assembler, &token).await;
        self.complete(ticket, outcome);
        &self.state
    }
}

/// Fetch followed by assembly. Assembly only runs on a successfully parsed body.
pub async fn fetch_and_assemble<S: ReportSource>(
    source: &S,
    assembler: &TrustReportAssembler,
    token: &CancelToken,
) -> Result<Option<TrustReport>, SourceError> {
    let body = fetch_cancellable(source, token).await?;
    Ok(assembler.assemble_value(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ScanReport, TrustStatus};
    use serde_json::{Value, json};

    struct StaticSource(Value);

    impl ReportSource for StaticSource {
        fn origin(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> Result<Value, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl ReportSource for FailingSource {
        fn origin(&self) -> String {
            "failing".to_string()
        }

        async fn fetch(&self) -> Result<Value, SourceError> {
            Err(SourceError::Status {
                url: "http://backend/api/report/latest".to_string(),
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        }
    }

    fn empty_report() -> TrustReport {
        TrustReportAssembler::default().assemble(&ScanReport::default())
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(ReportView::new().state(), &ViewState::Idle);
    }

    #[test]
    fn test_successful_load() {
        let mut view = ReportView::new();
        let (ticket, _token) = view.begin_load();
        assert!(view.state().is_loading());

        assert!(view.complete(ticket, Ok(Some(empty_report()))));
        assert_eq!(view.state().as_str(), "loaded");
        assert!(view.state().report().is_some());
    }

    #[test]
    fn test_empty_and_failed_outcomes() {
        let mut view = ReportView::new();
        let (ticket, _token) = view.begin_load();
        view.complete(ticket, Ok(None));
        assert_eq!(view.state(), &ViewState::Empty);

        let (ticket, _token) = view.begin_load();
        view.complete(
            ticket,
            Err(SourceError::Timeout {
                url: "http://backend".to_string(),
                timeout_secs: 1,
            }),
        );
        match view.state() {
            ViewState::Failed(failure) => assert_eq!(failure.kind, ErrorKind::Transport),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut view = ReportView::new();
        let (first, first_token) = view.begin_load();
        let (second, _second_token) = view.begin_load();

        assert!(first_token.is_cancelled());
        assert!(!view.complete(first, Ok(Some(empty_report()))));
        assert!(view.state().is_loading());

        assert!(view.complete(second, Ok(None)));
        assert_eq!(view.state(), &ViewState::Empty);
    }

    #[test]
    fn test_completion_is_applied_once() {
        let mut view = ReportView::new();
        let (ticket, _token) = view.begin_load();
        assert!(view.complete(ticket, Ok(None)));
        assert!(!view.complete(ticket, Ok(Some(empty_report()))));
        assert_eq!(view.state(), &ViewState::Empty);
    }

    #[test]
    fn test_cancel_returns_to_idle_and_drops_late_result() {
        let mut view = ReportView::new();
        let (ticket, token) = view.begin_load();
        view.cancel();

        assert!(token.is_cancelled());
        assert_eq!(view.state(), &ViewState::Idle);
        assert!(!view.complete(ticket, Ok(Some(empty_report()))));
        assert_eq!(view.state(), &ViewState::Idle);
    }

    #[test]
    fn test_dropping_view_cancels_fetch() {
        let mut view = ReportView::new();
        let (_ticket, token) = view.begin_load();
        drop(view);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_load_assembles_report() {
        let source = StaticSource(json!({
            "ml_results": [
                {"Hasil_Prediksi": "Terlihat Aman", "Kepercayaan_Berbahaya": 0.1},
                {"Hasil_Prediksi": "Terlihat Aman", "Kepercayaan_Berbahaya": 0.2}
            ],
            "mobsf_report": {"security_score": 80}
        }));
        let mut view = ReportView::new();
        let state = view.load(&source, &TrustReportAssembler::default()).await;

        let report = state.report().unwrap();
        assert_eq!(report.status(), TrustStatus::Safe);
        assert_eq!(report.average_confidence(), 0.15);
    }

    #[tokio::test]
    async fn test_load_empty_body() {
        let mut view = ReportView::new();
        let state = view
            .load(&StaticSource(json!({})), &TrustReportAssembler::default())
            .await;
        assert_eq!(state, &ViewState::Empty);
    }

    #[tokio::test]
    async fn test_load_malformed_body_fails_as_parse() {
        let mut view = ReportView::new();
        let state = view
            .load(&StaticSource(json!([1, 2, 3])), &TrustReportAssembler::default())
            .await;
        match state {
            ViewState::Failed(failure) => assert_eq!(failure.kind, ErrorKind::Parse),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_transport_failure() {
        let mut view = ReportView::new();
        let state = view
            .load(&FailingSource, &TrustReportAssembler::default())
            .await;
        match state {
            ViewState::Failed(failure) => {
                assert_eq!(failure.kind, ErrorKind::Transport);
                assert!(failure.message.contains("HTTP 500"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
