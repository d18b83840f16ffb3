//! Event - 라이프사이클 이벤트 시스템

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::LifecycleEvent;
