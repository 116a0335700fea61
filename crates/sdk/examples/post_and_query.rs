//! Example: sending logs and metrics, then reading them back.
//!
//! Run with: ZEUS_TOKEN=... cargo run --example post_and_query

use chrono::Utc;
use std::time::Duration;
use zeus_sdk::{
    DataPoint, Log, LogList, LogQuery, MetricNamesQuery, MetricValuesQuery, Series, ZeusClient,
    ZeusResult,
};

#[tokio::main]
async fn main() -> ZeusResult<()> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("ZEUS_API").unwrap_or_else(|_| "http://api.ciscozeus.io".to_string());
    let token = std::env::var("ZEUS_TOKEN").unwrap_or_default();

    let client = ZeusClient::builder()
        .base_url(base_url)
        .token(token)
        .timeout(Duration::from_secs(10))
        .build()?;
    let bucket = client.bucket("org1/bucket1");

    // Logs
    let now = Utc::now();
    let logs = LogList::new("sdk-demo")
        .with_log(Log::new().with("foo", "bar").with("tar", "woo"))
        .with_log(Log::new().with("timestamp", now.timestamp()).with("tar", "woo"));

    println!("Sending {} logs", logs.logs.len());
    let stored = bucket.logs().post(&logs).await?;
    println!("  {} stored", stored);

    tokio::time::sleep(Duration::from_secs(1)).await;

    let page = bucket.logs().get(&LogQuery::new("sdk-demo").limit(10)).await?;
    println!("Found {} logs, showing {}", page.total, page.logs.logs.len());
    for log in &page.logs.logs {
        println!("  {:?}", log);
    }

    // Metrics
    let series = Series::new("sdk-demo")
        .with_columns(["col1", "col2", "col3"])
        .with_point(DataPoint::new(vec![1.0, 2.0, 3.0]).at(now))
        .with_point(DataPoint::new(vec![1.0, 4.0, 9.0]).at(now));

    println!("\nSending {} metric points", series.points.len());
    let stored = bucket.metrics().post(&series).await?;
    println!("  {} stored", stored);

    tokio::time::sleep(Duration::from_secs(20)).await;

    let names = bucket
        .metrics()
        .names(&MetricNamesQuery::new().matching("sdk-demo"))
        .await?;
    println!("Matching metric names: {:?}", names);

    let values = bucket
        .metrics()
        .values(&MetricValuesQuery::new("sdk-demo"))
        .await?;
    println!("Series {} columns {:?}", values.name, values.columns);
    for point in &values.points {
        println!("  {:?} {:?}", point.timestamp, point.values);
    }

    let deleted = bucket.metrics().delete("sdk-demo").await?;
    println!("\nSeries deleted: {}", deleted);

    Ok(())
}
