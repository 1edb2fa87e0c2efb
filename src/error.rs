use crate::models::RecordId;

/// Everything that can go wrong between the dashboard, the REST store and the renderer.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Transport failure talking to the store
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("{context}: server responded with status {status}")]
    Status { status: u16, context: String },

    /// Form input rejected before anything was sent
    #[error("{0}")]
    Validation(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    /// Interactive input reached end of file
    #[error("input closed")]
    InputClosed,

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    pub fn scenario_not_found(id: &RecordId) -> Self {
        DashboardError::NotFound {
            kind: "scenario",
            id: id.clone(),
        }
    }

    pub fn vehicle_not_found(id: &RecordId) -> Self {
        DashboardError::NotFound {
            kind: "vehicle",
            id: id.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
