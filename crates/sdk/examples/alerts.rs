//! Example: managing alert rules and reading triggered alerts.
//!
//! Run with: ZEUS_TOKEN=... cargo run --example alerts

use zeus_sdk::{Alert, ZeusClient, ZeusResult};

#[tokio::main]
async fn main() -> ZeusResult<()> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("ZEUS_API").unwrap_or_else(|_| "http://api.ciscozeus.io".to_string());
    let token = std::env::var("ZEUS_TOKEN").unwrap_or_default();

    let client = ZeusClient::builder().base_url(base_url).token(token).build()?;
    let bucket = client.bucket("org1/bucket1");
    let alerts = bucket.alerts();

    let rule = Alert::new("cpu-high", "cpu.value > 20")
        .alerts_type("metric")
        .severity("S1")
        .metric_name("cpu.value")
        .emails("ops@example.com")
        .status("active")
        .frequency(30.0);

    println!("Creating alert...");
    alerts.create(&rule).await?;

    let existing = alerts.list(Some("cpu.value")).await?;
    println!("Alerts watching cpu.value: {}", existing.len());

    let ids: Vec<_> = existing.iter().filter_map(|a| a.id).collect();
    for alert in &existing {
        println!(
            "  {:?} {} ({})",
            alert.id,
            alert.alert_name.as_deref().unwrap_or("-"),
            alert.alert_expression.as_deref().unwrap_or("-")
        );
    }

    if !ids.is_empty() {
        println!("\nDisabling {} alerts", ids.len());
        alerts.disable(&ids).await?;
        alerts.enable(&ids).await?;
    }

    let triggered = bucket.trigalerts().last_24h().await?;
    println!("\nTriggered in the last 24h:\n{:#}", triggered);

    for id in ids {
        alerts.delete(id).await?;
    }

    Ok(())
}
