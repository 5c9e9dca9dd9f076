//! JSON document consumed by the web viewer and `--export`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::models::{OceanReading, Vessel};
use crate::domain::VesselStatus;
use crate::errors::FleetResult;
use crate::geo::Position;
use crate::radar::{RadarScope, SURFACE_PX};
use crate::snapshot::FleetSnapshot;

/// File name the web viewer fetches.
pub const DEFAULT_EXPORT_FILE: &str = "fleet.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTarget {
    pub vessel_id: String,
    pub name: String,
    pub status: VesselStatus,
    pub distance_nm: f64,
    pub bearing_deg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetExport {
    pub generated_at: DateTime<Utc>,
    pub center: Position,
    pub range_nm: f64,
    pub snapshot: FleetSnapshot,
    pub vessels: Vec<Vessel>,
    /// Vessels inside the radar range, in vessel order.
    pub targets: Vec<ExportTarget>,
    pub latest_reading: Option<OceanReading>,
}

impl FleetExport {
    pub fn new(
        scope: &RadarScope,
        snapshot: FleetSnapshot,
        vessels: Vec<Vessel>,
        latest_reading: Option<OceanReading>,
    ) -> Self {
        let targets = scope
            .targets(SURFACE_PX, SURFACE_PX, &vessels)
            .into_iter()
            .map(|(vessel, target)| ExportTarget {
                vessel_id: target.vessel_id,
                name: vessel.name.clone(),
                status: vessel.status,
                distance_nm: target.distance_nm,
                bearing_deg: target.bearing_deg,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            center: scope.center(),
            range_nm: scope.range_nm(),
            snapshot,
            vessels,
            targets,
            latest_reading,
        }
    }

    pub fn to_json(&self) -> FleetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> FleetResult<()> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), targets = self.targets.len(), "fleet export written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;
    use crate::snapshot::{compute, SnapshotInput};

    #[test]
    fn export_lists_only_targets_in_range() -> Result<(), Box<dyn std::error::Error>> {
        let vessels = seed::vessels();
        let scope = RadarScope::new(Position::new(27.1865, 56.2808), 30.0);
        let snapshot = compute(
            &SnapshotInput {
                vessels: &vessels,
                ..SnapshotInput::default()
            },
            Utc::now(),
        );

        let export = FleetExport::new(&scope, snapshot, vessels, None);

        let ids: Vec<&str> = export.targets.iter().map(|t| t.vessel_id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
        assert_eq!(export.vessels.len(), 3);

        let json: serde_json::Value = serde_json::from_str(&export.to_json()?)?;
        assert_eq!(json["range_nm"], 30.0);
        assert_eq!(json["targets"][1]["name"], "Pars Trader");
        assert_eq!(json["snapshot"]["vessels"]["total"], 3);
        Ok(())
    }

    #[test]
    fn write_to_creates_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fleet.json");
        let scope = RadarScope::new(Position::new(27.1865, 56.2808), 50.0);

        FleetExport::new(&scope, FleetSnapshot::default(), Vec::new(), None).write_to(&path)?;

        let written = std::fs::read_to_string(&path)?;
        assert!(written.contains("\"targets\": []"));
        Ok(())
    }
}
