pub mod dispatch;
pub mod scenario;
