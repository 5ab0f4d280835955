use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Nodes(u64),
    TimeMs(u64),
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Nodes(n) => write!(f, "node budget of {n}"),
            Budget::TimeMs(ms) => write!(f, "time limit of {ms}ms"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("infeasible: no valid assignment of {items} items to {slots} slots")]
    Infeasible { slots: u32, items: usize },
    #[error("search stopped after {nodes} nodes: {limit} exceeded")]
    BudgetExceeded { limit: Budget, nodes: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Infeasible,
    BudgetExceeded,
}

impl AssignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssignError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            AssignError::Infeasible { .. } => ErrorKind::Infeasible,
            AssignError::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AssignError::InvalidArgument(msg.into())
    }
}
