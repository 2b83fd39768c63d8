pub mod emotion;
pub mod heartbeat;
pub mod sentiment;
pub mod session;
pub mod style_adapter;
