pub mod attendance;
pub mod payroll;
pub mod session;
