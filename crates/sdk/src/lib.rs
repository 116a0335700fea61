//! # Zeus SDK
//!
//! Rust SDK for the Zeus logs, metrics and alerts service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zeus_sdk::{DataPoint, Log, LogList, Series, ZeusClient, ZeusResult};
//!
//! #[tokio::main]
//! async fn main() -> ZeusResult<()> {
//!     // Build client
//!     let client = ZeusClient::builder()
//!         .base_url("https://api.ciscozeus.io")
//!         .token("your-token")
//!         .build()?;
//!
//!     let bucket = client.bucket("org1/bucket1");
//!
//!     // Send logs
//!     let logs = LogList::new("syslog").with_log(Log::new().with("message", "hello"));
//!     let stored = bucket.logs().post(&logs).await?;
//!     println!("Stored {} logs", stored);
//!
//!     // Send metric points
//!     let series = Series::new("cpu")
//!         .with_columns(["user", "system"])
//!         .with_point(DataPoint::new(vec![12.5, 3.0]));
//!     bucket.metrics().post(&series).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Querying metrics
//!
//! ```rust,no_run
//! use zeus_sdk::{Aggregator, MetricValuesQuery, ZeusClient};
//!
//! # async fn example() -> zeus_sdk::ZeusResult<()> {
//! let client = ZeusClient::builder()
//!     .base_url("https://api.ciscozeus.io")
//!     .token("your-token")
//!     .build()?;
//!
//! let query = MetricValuesQuery::new("cpu")
//!     .aggregate(Aggregator::Mean, "user")
//!     .group_interval("1m");
//!
//! let series = client.bucket("org1/bucket1").metrics().values(&query).await?;
//! for point in &series.points {
//!     println!("{:?} {:?}", point.timestamp, point.values);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{Bucket, ZeusClient, ZeusClientBuilder};
pub use config::ClientConfig;
pub use error::{ZeusError, ZeusResult};

pub use api::{
    Aggregator, AlertsApi, LogPage, LogQuery, LogsApi, MetricNamesQuery, MetricValuesQuery,
    MetricsApi, TrigalertsApi,
};

// Re-export core types for convenience
pub use zeus_core::{
    Alert, AlertId, ColumnarResponse, DataPoint, DecodedPoint, DecodedSeriesMap, Log, LogList,
    LogValue, MetricEncoding, Series,
};
