//! Effects produced by state transitions

use crate::transport::QueryRequest;

/// Work the controller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one outbound query
    SendQuery(QueryRequest),

    /// The visible output changed and should be redrawn
    Render,
}

impl Effect {
    /// The query carried by a [`Effect::SendQuery`], if any
    pub fn as_query(&self) -> Option<&QueryRequest> {
        match self {
            Self::SendQuery(request) => Some(request),
            Self::Render => None,
        }
    }
}
