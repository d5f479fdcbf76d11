use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use crate::api::finsage::FinsageClient;
use crate::models::{ChartRange, PointerEvent, PricePoint, RangeButton, RenderOutcome};
use crate::services::chart_service::{ChartConfig, ChartSurface};
use crate::services::{crosshair_service, series_service};

/// What the next fetch asks for
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    range: ChartRange,
    isin: String,
}

/// Owns the selected range and instrument and drives fetch → shape → render
///
/// Every request is tagged with an increasing sequence number; a response that
/// resolves after a newer request was issued is dropped without touching the
/// surface.
#[derive(Clone)]
pub struct ChartController {
    client: FinsageClient,
    config: Arc<ChartConfig>,
    selection: Arc<Mutex<Selection>>,
    latest_request: Arc<AtomicU64>,
    surface: Arc<Mutex<ChartSurface>>,
}

impl ChartController {
    pub fn new(client: FinsageClient, config: ChartConfig, isin: String, range: ChartRange) -> Self {
        Self {
            client,
            config: Arc::new(config),
            selection: Arc::new(Mutex::new(Selection { range, isin })),
            latest_request: Arc::new(AtomicU64::new(0)),
            surface: Arc::new(Mutex::new(ChartSurface::new())),
        }
    }

    pub async fn range(&self) -> ChartRange {
        self.selection.lock().await.range
    }

    pub async fn isin(&self) -> String {
        self.selection.lock().await.isin.clone()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn surface(&self) -> Arc<Mutex<ChartSurface>> {
        Arc::clone(&self.surface)
    }

    /// Button row reflecting the current selection
    pub async fn buttons(&self) -> Vec<RangeButton> {
        RangeButton::row(self.range().await)
    }

    /// Initial fetch-render cycle
    pub async fn mount(&self) -> JoinHandle<RenderOutcome> {
        self.request_render().await
    }

    /// Select a range; only a change triggers a new cycle
    pub async fn set_range(&self, range: ChartRange) -> Option<JoinHandle<RenderOutcome>> {
        {
            let mut selection = self.selection.lock().await;
            if selection.range == range {
                debug!("Range {} already selected", range);
                return None;
            }
            selection.range = range;
        }
        Some(self.request_render().await)
    }

    /// Select an instrument; only a change triggers a new cycle
    pub async fn set_isin(&self, isin: &str) -> Option<JoinHandle<RenderOutcome>> {
        {
            let mut selection = self.selection.lock().await;
            if selection.isin == isin {
                debug!("Instrument {} already selected", isin);
                return None;
            }
            selection.isin = isin.to_string();
        }
        Some(self.request_render().await)
    }

    /// Issue a tagged request for the current selection and render it in the background
    pub async fn request_render(&self) -> JoinHandle<RenderOutcome> {
        let selection = self.selection.lock().await.clone();
        let seq = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let controller = self.clone();

        tokio::spawn(async move { controller.run_cycle(seq, selection).await })
    }

    async fn run_cycle(&self, seq: u64, selection: Selection) -> RenderOutcome {
        info!("📈 Request #{}: fetching {} graph for {}", seq, selection.range, selection.isin);
        let fetched = self.client.get_graph(selection.range, &selection.isin).await;

        let mut surface = self.surface.lock().await;
        if self.latest_request.load(Ordering::SeqCst) != seq {
            debug!("Request #{} superseded, discarding response", seq);
            return RenderOutcome::Stale;
        }

        let response = match fetched {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching mutual fund data: {}", e);
                return RenderOutcome::Failed(e.to_string());
            }
        };

        if response.is_empty() {
            warn!("No data returned for {} ({})", selection.isin, selection.range);
            surface.clear();
            return RenderOutcome::Empty;
        }

        match series_service::shape_series(&response) {
            Some(series) => {
                let points = series.len();
                surface.draw(series, &self.config);
                info!("✓ Request #{}: drew {} points", seq, points);
                RenderOutcome::Drawn { points }
            }
            None => {
                warn!("No valid data available to draw.");
                surface.clear();
                RenderOutcome::Empty
            }
        }
    }

    /// Pointer moved over the chart overlay
    pub async fn pointer_move(&self, event: PointerEvent) -> Option<PricePoint> {
        let mut surface = self.surface.lock().await;
        crosshair_service::pointer_move(&mut surface, &event)
    }

    /// Pointer left the chart overlay
    pub async fn pointer_leave(&self) {
        let mut surface = self.surface.lock().await;
        crosshair_service::pointer_leave(&mut surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    const ISIN: &str = "INF109K01Z48";

    fn controller(server: &MockServer) -> ChartController {
        ChartController::new(
            FinsageClient::with_base_url(server.base_url()),
            ChartConfig::default(),
            ISIN.to_string(),
            ChartRange::default(),
        )
    }

    const TWO_SERIES: &str = r#"{
        "historical": [
            {"Date": "2025-01-01", "Price": 100},
            {"Date": "2025-02-01", "Price": null},
            {"Date": "2025-03-01", "Price": 105}
        ],
        "predictions": [
            {"Date": "2025-04-10", "Price": 107.5},
            {"Price": 110}
        ]
    }"#;

    #[tokio::test]
    async fn test_mount_draws_shaped_series() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/mf/graph")
                    .query_param("range", "5Y")
                    .query_param("isin", ISIN);
                then.status(200).body(TWO_SERIES);
            })
            .await;

        let controller = controller(&server);
        let outcome = controller.mount().await.await.unwrap();

        mock.assert_async().await;
        assert_eq!(outcome, RenderOutcome::Drawn { points: 3 });

        let surface = controller.surface();
        let surface = surface.lock().await;
        let chart = surface.chart().unwrap();
        assert_eq!(chart.series.historical.len(), 2);
        assert_eq!(chart.series.predicted.len(), 1);
        assert!(chart.reference_marker.is_some());
    }

    #[tokio::test]
    async fn test_same_range_does_not_refetch() {
        let server = MockServer::start_async().await;
        let controller = controller(&server);
        assert!(controller.set_range(ChartRange::FiveYears).await.is_none());
        assert!(controller.set_isin(ISIN).await.is_none());
    }

    #[tokio::test]
    async fn test_range_change_refetches_with_new_range() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph").query_param("range", "1M");
                then.status(200).body(TWO_SERIES);
            })
            .await;

        let controller = controller(&server);
        let handle = controller.set_range(ChartRange::OneMonth).await.unwrap();
        assert_eq!(handle.await.unwrap(), RenderOutcome::Drawn { points: 3 });
        assert_eq!(controller.range().await, ChartRange::OneMonth);
        assert!(controller.buttons().await.iter().any(|b| b.active && b.range == ChartRange::OneMonth));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_arrays_clear_surface() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph").query_param("range", "5Y");
                then.status(200).body(TWO_SERIES);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph").query_param("range", "6M");
                then.status(200).body(r#"{"historical": [], "predictions": []}"#);
            })
            .await;

        let controller = controller(&server);
        controller.mount().await.await.unwrap();
        assert!(controller.surface().lock().await.is_drawn());

        let outcome = controller.set_range(ChartRange::SixMonths).await.unwrap().await.unwrap();
        assert_eq!(outcome, RenderOutcome::Empty);
        assert!(!controller.surface().lock().await.is_drawn());
    }

    #[tokio::test]
    async fn test_failed_fetch_draws_nothing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph");
                then.status(200).body("not json");
            })
            .await;

        let controller = controller(&server);
        let outcome = controller.mount().await.await.unwrap();

        assert!(matches!(outcome, RenderOutcome::Failed(_)));
        assert!(!controller.surface().lock().await.is_drawn());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph").query_param("range", "1Y");
                then.status(200)
                    .delay(Duration::from_millis(300))
                    .body(r#"{"historical": [{"Date": "2020-01-01", "Price": 1}]}"#);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph").query_param("range", "3M");
                then.status(200).body(TWO_SERIES);
            })
            .await;

        let controller = controller(&server);
        let slow = controller.set_range(ChartRange::OneYear).await.unwrap();
        let fast = controller.set_range(ChartRange::ThreeMonths).await.unwrap();

        assert_eq!(fast.await.unwrap(), RenderOutcome::Drawn { points: 3 });
        assert_eq!(slow.await.unwrap(), RenderOutcome::Stale);

        let surface = controller.surface();
        let surface = surface.lock().await;
        assert_eq!(surface.chart().unwrap().combined.len(), 3);
    }

    #[tokio::test]
    async fn test_pointer_events_through_controller() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/mf/graph");
                then.status(200).body(TWO_SERIES);
            })
            .await;

        let controller = controller(&server);
        controller.mount().await.await.unwrap();

        let focused = controller.pointer_move(PointerEvent::new(0.0, 0.0, 0.0, 0.0)).await;
        assert_eq!(focused.map(|p| p.price), Some(100.0));
        assert!(controller.surface().lock().await.tooltip().is_some());

        controller.pointer_leave().await;
        assert!(controller.surface().lock().await.tooltip().is_none());
    }
}
