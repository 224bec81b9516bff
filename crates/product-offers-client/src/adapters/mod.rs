pub mod gateways;
mod notification_center;

pub use notification_center::NotificationCenter;
