use crate::instances::Instances;

/// Logs one line per dump record, the shape downstream log scrapers expect:
/// `az : family.size = count (footprint)`.
pub fn log_dump(category: &str, instances: &Instances) {
    tracing::info!("{category}");
    for record in instances.dump() {
        tracing::info!(
            category,
            "{} : {} = {} ({})",
            record.az,
            record.itype,
            record.count,
            record.footprint
        )
    }
}
