//! Device response-time metric.
//!
//! The quality metric used for tie-breaking is the mean latency between
//! a request being issued and the device handling it, over handled
//! requests only. A device with no handled request has no metric.
//! Entries with a negative or unrepresentable latency are skipped here and
//! rejected by [`validate_request_logs`](crate::validation::validate_request_logs).

use std::collections::HashMap;

use crate::models::{Device, DeviceId, RequestLog};

/// Mean response time per device, in seconds.
///
/// Unhandled requests and malformed latencies are skipped; devices with
/// no usable request are absent from the map.
pub fn average_response_times(logs: &[RequestLog]) -> HashMap<DeviceId, f64> {
    let mut sums: HashMap<&DeviceId, (i128, u64)> = HashMap::new();
    for log in logs {
        match log.latency_ms() {
            Some(latency) if latency >= 0 => {
                let entry = sums.entry(&log.device_id).or_insert((0, 0));
                entry.0 += i128::from(latency);
                entry.1 += 1;
            }
            _ => {}
        }
    }

    sums.into_iter()
        .map(|(id, (total_ms, n))| (id.clone(), total_ms as f64 / n as f64 / 1000.0))
        .collect()
}

/// Fills in missing response times from request logs.
///
/// Devices that already carry a metric keep it.
pub fn apply_response_times(devices: &mut [Device], logs: &[RequestLog]) {
    let averages = average_response_times(logs);
    for device in devices.iter_mut() {
        if device.avg_response_time.is_none() {
            device.avg_response_time = averages.get(&device.id).copied();
        }
    }
}
