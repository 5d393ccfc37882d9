//! Background jobs driven by `tokio-cron-scheduler`.

pub mod stream_check;
