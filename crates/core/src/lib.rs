// Core types and the metric wire codec for the Zeus client

pub mod alert;
pub mod codec;
pub mod log;
pub mod series;

pub use alert::{Alert, AlertId};
pub use codec::{DecodeError, EncodeError, MetricEncoding};
pub use log::{Log, LogError, LogList, LogValue};
pub use series::{ColumnarResponse, DataPoint, DecodedPoint, DecodedSeriesMap, Series};
