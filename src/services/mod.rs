pub mod attendance_service;
pub mod auth_service;
pub mod report_service;
pub mod student_service;
pub mod user_service;

pub use attendance_service::{AttendanceService, AttendanceServiceError, MarkOutcome};
pub use auth_service::{AuthService, AuthServiceError, LoginRequest};
pub use report_service::ReportService;
pub use student_service::{StudentService, StudentServiceError};
pub use user_service::{UserService, UserServiceError};
