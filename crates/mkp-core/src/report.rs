//! # Run Report
//!
//! The structured result of one load/validate run: statistics on success,
//! the single contextualized failure otherwise. Rendering is left to the
//! caller.

use crate::MkpError;
use crate::exit::{EXIT_SUCCESS, ExitClass, exit_class};
use crate::stats::GraphStats;
use serde::{Deserialize, Serialize};

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Ok,
    Error,
}

/// One run's result, ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub status: ReportStatus,
    pub exit_code: i32,
    pub exit_class: ExitClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<GraphStats>,
}

impl Report {
    #[must_use]
    pub fn success(stats: GraphStats) -> Self {
        Self {
            status: ReportStatus::Ok,
            exit_code: EXIT_SUCCESS,
            exit_class: exit_class(EXIT_SUCCESS),
            message: None,
            stats: Some(stats),
        }
    }

    #[must_use]
    pub fn failure(error: &MkpError) -> Self {
        Self {
            status: ReportStatus::Error,
            exit_code: error.exit_code(),
            exit_class: error.exit_class(),
            message: Some(error.to_string()),
            stats: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}

impl From<Result<GraphStats, MkpError>> for Report {
    fn from(result: Result<GraphStats, MkpError>) -> Self {
        match result {
            Ok(stats) => Self::success(stats),
            Err(e) => Self::failure(&e),
        }
    }
}
