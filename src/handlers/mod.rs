mod client_ip;
mod health;

pub use client_ip::client_ip;
pub use health::health_check;
