//! Fact Cache Demo
//!
//! Shows the fact cache over the configured backend.
//!
//! Usage:
//! ```bash
//! # in-memory (default)
//! cargo run --example fact_cache_demo
//!
//! # file-backed
//! FACT_CACHE_PLUGIN=jsonfile FACT_CACHE_CONNECTION=/tmp/facts cargo run --example fact_cache_demo
//! ```

use ouroboros_factcache::FactCache;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("=== Fact Cache Demo ===");

    let mut facts = match FactCache::new() {
        Ok(facts) => facts,
        Err(e) => {
            warn!("{}", e);
            return Err(e.into());
        }
    };
    info!("Using backend: {}", facts.backend_name());

    facts.set(
        "web01",
        json!({
            "ansible_distribution": "Debian",
            "ansible_mounts": [{"mount": "/", "size_total": 20_000_000_000u64}]
        }),
    )?;
    facts.first_order_merge("web01", json!({"ansible_processor_vcpus": 4}))?;

    // Mutating a fetched copy leaves the cache alone
    let mut copy = facts.fetch("web01")?;
    copy["ansible_mounts"][0]["mount"] = json!("/srv");
    info!("Local copy mount: {}", copy["ansible_mounts"][0]["mount"]);
    info!(
        "Cached mount: {}",
        facts.fetch("web01")?["ansible_mounts"][0]["mount"]
    );

    let missing = facts.get_or("db01", json!({}))?;
    info!("db01 (default): {}", missing);

    for (host, host_facts) in facts.items()? {
        info!("{} => {}", host, host_facts);
    }

    let removed = facts.pop("web01")?;
    info!("Popped web01 with {} top-level facts", removed.as_object().map_or(0, |m| m.len()));
    info!("Entries left: {}", facts.len()?);

    Ok(())
}
