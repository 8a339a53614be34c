//! 服务层

pub mod message_bus;

pub use message_bus::MessageBusService;
