pub mod employees;
pub mod fund_requests;
pub mod general_requests;
pub mod sessions;
pub mod status;
pub mod users;
pub mod vacation_requests;
