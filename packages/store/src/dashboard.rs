//! Read-only dashboard view model: counters and recent projects as the
//! backend aggregates them.

use api::{ApiError, Dashboard, Transport};

use crate::observable::{Observable, Subscription};

pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub data: Option<Dashboard>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

pub struct DashboardView<T> {
    transport: T,
    state: Observable<DashboardState>,
}

impl<T: Transport> DashboardView<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Observable::new(DashboardState::default()),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.get()
    }

    pub fn observable(&self) -> &Observable<DashboardState> {
        &self.state
    }

    pub fn subscribe(&self, callback: impl Fn(&DashboardState) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    /// Fetch the aggregate. A failure keeps the previous data on screen.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.state.update(|s| s.loading = true);
        let result: Result<Dashboard, ApiError> = self.transport.fetch(DASHBOARD_PATH).await;
        match result {
            Ok(data) => {
                tracing::debug!(
                    "Dashboard: {} projects, {} materials",
                    data.total_projects,
                    data.total_materials
                );
                self.state.set(DashboardState {
                    data: Some(data),
                    loading: false,
                    error: None,
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Loading dashboard failed: {}", e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }
}
