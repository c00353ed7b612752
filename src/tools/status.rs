//! Status tool
//!
//! Provides runtime status information about the calculator service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Service status response
#[derive(Debug, Serialize)]
pub struct TdeeStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub calculations_performed: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service uptime and calculation activity
pub struct StatusTracker {
    start_time: Instant,
    calculations: u64,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            calculations: 0,
        }
    }

    /// Record a completed calculation
    pub fn record_calculation(&mut self) {
        self.calculations += 1;
    }

    /// Get the current status
    pub fn get_status(&self) -> TdeeStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TdeeStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            calculations_performed: self.calculations,
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_counter() {
        let mut tracker = StatusTracker::new();
        assert_eq!(tracker.get_status().calculations_performed, 0);
        tracker.record_calculation();
        tracker.record_calculation();
        assert_eq!(tracker.get_status().calculations_performed, 2);
    }
}
