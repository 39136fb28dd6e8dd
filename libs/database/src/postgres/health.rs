use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::common::DatabaseError;

/// Round-trip a ping through the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;
    debug!("Database health check passed");
    Ok(())
}
