pub mod attendance;
pub mod report;
pub mod student;
pub mod user;

pub use attendance::{Attendance, AttendanceEntry, AttendanceStatus, MarkAttendanceRequest};
pub use report::{DashboardStats, StudentTally};
pub use student::{
    CreateStudentForm, CreateStudentRequest, Student, UpdateStudentForm, UpdateStudentRequest,
};
pub use user::User;
