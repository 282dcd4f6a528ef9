//! Client core for the cycle-tracking dashboard: fetches the two
//! backend reads, reconciles them into display rows, and owns the table
//! view model. Presentation layers call the operations here and
//! subscribe to [`ClientEvent`]s; they never talk to the network
//! themselves.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use shared::domain::EntryId;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

pub mod api;
pub mod chart;
pub mod error;
pub mod form;
pub mod reconcile;
pub mod table;

use api::ApiClient;
use chart::ChartPoint;
use error::ClientError;
use reconcile::{reconcile, DisplayRow};
use table::{Column, SortDirection, TableModel};

#[derive(Debug, Clone)]
pub enum ClientEvent {
    RowsLoaded { row_count: usize },
    LoadFailed(String),
    ChartLoaded { point_count: usize },
    ChartFailed(String),
}

/// Everything a renderer needs for one frame of the table, cloned out
/// of the store in one lock acquisition.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    /// The current page's rows, in display order.
    pub rows: Vec<DisplayRow>,
    pub filtered_count: usize,
    pub selected_count: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub visible_columns: Vec<Column>,
    pub loading: bool,
    pub last_error: Option<String>,
}

/// Seam for presentation layers, so they can be driven against a fake
/// in tests.
#[async_trait]
pub trait DashboardHandle: Send + Sync {
    async fn refresh(&self) -> Result<(), ClientError>;
    async fn load_chart(&self) -> Result<Vec<ChartPoint>, ClientError>;
    async fn snapshot(&self) -> TableSnapshot;
    fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent>;
}

pub struct DashboardClient {
    api: ApiClient,
    inner: Mutex<DashboardState>,
    events: broadcast::Sender<ClientEvent>,
}

struct DashboardState {
    table: TableModel,
    /// Bumped by `invalidate`; an in-flight refresh that started under
    /// an older generation discards its result on arrival instead of
    /// mutating state the view no longer owns.
    generation: u64,
    loading: bool,
    last_error: Option<String>,
}

impl DashboardClient {
    pub fn new(server_url: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api: ApiClient::new(server_url),
            inner: Mutex::new(DashboardState {
                table: TableModel::default(),
                generation: 0,
                loading: false,
                last_error: None,
            }),
            events,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Marks the current view as gone (unmount, navigation). Any refresh
    /// still in flight is discarded when it completes.
    pub async fn invalidate(&self) {
        let mut guard = self.inner.lock().await;
        guard.generation += 1;
        guard.loading = false;
    }

    /// Issues the two dashboard reads concurrently and, only when both
    /// succeed, reconciles and installs the rows in one atomic replace.
    /// A failure in either read leaves the previous view model entirely
    /// untouched.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.loading = true;
            guard.generation
        };

        let fetched = tokio::try_join!(self.api.list_entries(), self.api.hormone_series());

        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            debug!("discarding stale dashboard refresh result");
            return Ok(());
        }
        guard.loading = false;

        match fetched {
            Ok((entries, series)) => {
                let rows = reconcile(&entries, &series);
                let row_count = rows.len();
                guard.table.install_rows(rows);
                guard.last_error = None;
                drop(guard);
                debug!(row_count, "dashboard rows reconciled");
                let _ = self.events.send(ClientEvent::RowsLoaded { row_count });
                Ok(())
            }
            Err(err) => {
                guard.last_error = Some(err.to_string());
                drop(guard);
                warn!("dashboard refresh failed: {err}");
                let _ = self.events.send(ClientEvent::LoadFailed(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Independent drawer read of the full hormone series. Failure here
    /// degrades only the chart; the table keeps whatever it has.
    pub async fn load_chart(&self) -> Result<Vec<ChartPoint>, ClientError> {
        match self.api.hormone_series().await {
            Ok(series) => {
                let points = chart::chart_points(&series);
                let _ = self.events.send(ClientEvent::ChartLoaded {
                    point_count: points.len(),
                });
                Ok(points)
            }
            Err(err) => {
                warn!("chart fetch failed: {err}");
                let _ = self.events.send(ClientEvent::ChartFailed(err.to_string()));
                Err(err.into())
            }
        }
    }

    pub async fn reorder(&self, active: EntryId, over: EntryId) {
        self.inner.lock().await.table.reorder(active, over);
    }

    pub async fn set_sort(&self, sort: Vec<(Column, SortDirection)>) {
        self.inner.lock().await.table.set_sort(sort);
    }

    pub async fn set_filter(&self, column: Column, needle: impl Into<String> + Send) {
        self.inner.lock().await.table.set_filter(column, needle);
    }

    pub async fn clear_filter(&self, column: Column) {
        self.inner.lock().await.table.clear_filter(column);
    }

    pub async fn toggle_column_visibility(&self, column: Column) {
        self.inner.lock().await.table.toggle_column_visibility(column);
    }

    pub async fn set_selection(&self, selection: HashSet<EntryId>) {
        self.inner.lock().await.table.set_selection(selection);
    }

    pub async fn toggle_selected(&self, id: EntryId) {
        self.inner.lock().await.table.toggle_selected(id);
    }

    pub async fn set_page(&self, page_index: usize) {
        self.inner.lock().await.table.set_page(page_index);
    }

    pub async fn set_page_size(&self, page_size: usize) {
        self.inner.lock().await.table.set_page_size(page_size);
    }

    pub async fn snapshot(&self) -> TableSnapshot {
        let guard = self.inner.lock().await;
        TableSnapshot {
            rows: guard.table.page_rows().into_iter().cloned().collect(),
            filtered_count: guard.table.filtered_count(),
            selected_count: guard.table.selected_count(),
            page_index: guard.table.page_index(),
            page_count: guard.table.page_count(),
            page_size: guard.table.page_size(),
            visible_columns: guard.table.visible_columns(),
            loading: guard.loading,
            last_error: guard.last_error.clone(),
        }
    }
}

#[async_trait]
impl DashboardHandle for DashboardClient {
    async fn refresh(&self) -> Result<(), ClientError> {
        DashboardClient::refresh(self).await
    }

    async fn load_chart(&self) -> Result<Vec<ChartPoint>, ClientError> {
        DashboardClient::load_chart(self).await
    }

    async fn snapshot(&self) -> TableSnapshot {
        DashboardClient::snapshot(self).await
    }

    fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        DashboardClient::subscribe_events(self)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
