pub mod client;

pub use client::{ErpClient, OrderConfirmation, SpireClient};
