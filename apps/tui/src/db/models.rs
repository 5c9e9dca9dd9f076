use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AlertLevel, ComparisonOperator, EventCategory, NewsCategory, PolicyCategory, RegionType,
    ReminderCategory, ReminderPriority, ReminderStatus, ServiceCategory, ServiceStatus, UserRole,
    UserStatus, VesselStatus, VesselType,
};
use crate::geo::Position;

/// A registered vessel.
///
/// Older records used `vesselType`/`category` for the type and `callsign`
/// for the call sign; those are accepted on read and written back canonically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", alias = "vesselType", alias = "category")]
    pub vessel_type: VesselType,
    #[serde(default)]
    pub status: VesselStatus,
    pub owner_id: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub heading: f64,
    pub position: Position,
    pub last_update: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmsi: Option<String>,
    #[serde(default, alias = "callsign", skip_serializing_if = "Option::is_none")]
    pub call_sign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<f64>,
}

/// Fields a vessel form submits. Status is `None` when the submitter may not choose it.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselDraft {
    pub name: String,
    pub vessel_type: VesselType,
    pub status: Option<VesselStatus>,
    pub speed: f64,
    pub heading: f64,
    pub position: Position,
    pub imo: Option<String>,
    pub mmsi: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swell {
    pub height: f64,
    pub direction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub air: f64,
    pub sea: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OceanReading {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_id: Option<String>,
    pub position: Position,
    pub timestamp: DateTime<Utc>,
    pub wind: Wind,
    pub wave: Wave,
    pub swell: Swell,
    pub current: Current,
    pub temperature: Temperature,
    pub visibility: f64,
    pub beaufort: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub region_type: RegionType,
    /// Closed ring of vertices.
    pub polygon: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub region_id: String,
    pub title: String,
    pub content: String,
    pub category: PolicyCategory,
    pub effective_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    pub location: Position,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub status: ServiceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: EventLocation,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub registered_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.registered_count >= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselReminder {
    pub id: String,
    pub vessel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ReminderCategory,
    pub status: ReminderStatus,
    pub priority: ReminderPriority,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_document_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub operator: ComparisonOperator,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_height: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    pub conditions: AlertConditions,
    pub alert_level: AlertLevel,
    pub message: String,
    #[serde(default)]
    pub notify_owner: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub rule_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_id: Option<String>,
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

const fn default_true() -> bool {
    true
}
