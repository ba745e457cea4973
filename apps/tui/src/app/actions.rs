use sales_dashboard::data::{FetchError, SalesSource};
use sales_dashboard::{render, DashboardView, RenderContext};

/// Side-effecting operations the app performs, kept behind the sales source
/// so the UI state can be driven without a network.
pub struct AppActions {
    source: Box<dyn SalesSource>,
    origin: String,
}

impl AppActions {
    pub fn new(source: Box<dyn SalesSource>, origin: impl Into<String>) -> Self {
        Self {
            source,
            origin: origin.into(),
        }
    }

    /// Where the sales come from, for the status line.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub async fn render(&self, context: &RenderContext) -> Result<DashboardView, FetchError> {
        match render(self.source.as_ref(), context).await {
            Ok(view) => {
                tracing::info!(
                    fetched = view.fetched,
                    shown = view.records.len(),
                    "Dashboard rendered"
                );
                Ok(view)
            }
            Err(err) => {
                tracing::error!(error = %err, "Dashboard render failed");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for AppActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppActions")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
