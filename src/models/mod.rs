//! Coverage domain models.
//!
//! Provides the data types the selection engine consumes. Coverage state
//! is deliberately absent here: it is owned by the selection engine for
//! the duration of a run.
//!
//! # Domain Mappings
//!
//! | u-coverage | Set Cover | Campus Sensing |
//! |------------|-----------|----------------|
//! | Lecture | Element | Lecture |
//! | Device | Subset | Student phone |
//! | Attendance | Membership | Enrollment |
//! | Selection | Cover | Polled device set |

mod attendance;
mod device;
mod lecture;
mod request_log;

pub use attendance::Attendance;
pub use device::{Device, DeviceId};
pub(crate) use device::compare_latency;
pub use lecture::{Lecture, LectureId, Semester};
pub use request_log::{RequestLog, RequestType};
