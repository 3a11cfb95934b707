mod client;

pub use client::HkbusDataClient;
