//! Contents of each collection before anything was stored.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::models::{
    AlertConditions, AlertRule, Contact, Current, Event, EventLocation, News, OceanReading,
    Policy, Region, Service, Swell, Temperature, Threshold, User, Vessel, VesselReminder, Wave,
    Wind,
};
use crate::config::DEFAULT_CENTER;
use crate::domain::{
    AlertLevel, ComparisonOperator, EventCategory, NewsCategory, PolicyCategory, RegionType,
    ReminderCategory, ReminderPriority, ReminderStatus, ServiceCategory, ServiceStatus, UserRole,
    UserStatus, VesselStatus, VesselType,
};
use crate::geo::Position;

const SEED_OWNER_ID: &str = "u2";
const SEED_OWNER_NAME: &str = "Reza Karimi";

pub fn vessels() -> Vec<Vessel> {
    let now = Utc::now();
    let vessel = |id: &str,
                  name: &str,
                  vessel_type: VesselType,
                  status: VesselStatus,
                  position: Position,
                  speed: f64,
                  heading: f64| Vessel {
        id: id.to_string(),
        name: name.to_string(),
        vessel_type,
        status,
        owner_id: SEED_OWNER_ID.to_string(),
        owner_name: SEED_OWNER_NAME.to_string(),
        speed,
        heading,
        position,
        last_update: now,
        imo: None,
        mmsi: None,
        call_sign: None,
        flag: Some("IR".to_string()),
        length: None,
        beam: None,
        draft: None,
    };

    vec![
        Vessel {
            imo: Some("9234567".into()),
            mmsi: Some("422123456".into()),
            call_sign: Some("EPAA".into()),
            length: Some(180.0),
            beam: Some(28.0),
            draft: Some(9.5),
            ..vessel(
                "v1",
                "Azadi",
                VesselType::Cargo,
                VesselStatus::Active,
                Position::new(27.1865, 56.2808),
                12.5,
                45.0,
            )
        },
        Vessel {
            imo: Some("9345678".into()),
            mmsi: Some("422234567".into()),
            call_sign: Some("EPBB".into()),
            length: Some(250.0),
            beam: Some(42.0),
            draft: Some(15.0),
            ..vessel(
                "v2",
                "Persian Gulf Tanker",
                VesselType::Tanker,
                VesselStatus::Active,
                Position::new(26.5, 55.8),
                8.2,
                180.0,
            )
        },
        Vessel {
            imo: Some("9456789".into()),
            mmsi: Some("422345678".into()),
            call_sign: Some("EPCC".into()),
            length: Some(150.0),
            beam: Some(24.0),
            draft: Some(8.0),
            ..vessel(
                "v3",
                "Pars Trader",
                VesselType::Cargo,
                VesselStatus::Pending,
                Position::new(27.5, 56.5),
                0.0,
                0.0,
            )
        },
    ]
}

/// Twenty hourly readings scattered around the default radar center, newest first.
pub fn ocean_readings() -> Vec<OceanReading> {
    let mut rng = rand::rng();
    let now = Utc::now();

    (0..20)
        .map(|i| OceanReading {
            id: format!("or{}", i + 1),
            vessel_id: None,
            position: Position::new(
                DEFAULT_CENTER.lat + (rng.random::<f64>() - 0.5) * 0.5,
                DEFAULT_CENTER.lng + (rng.random::<f64>() - 0.5) * 0.5,
            ),
            timestamp: now - Duration::hours(i),
            wind: Wind {
                speed: 10.0 + rng.random::<f64>() * 15.0,
                direction: f64::from(rng.random_range(0..360_u16)),
            },
            wave: Wave {
                height: 1.0 + rng.random::<f64>() * 2.0,
                period: Some(5.0 + rng.random::<f64>() * 5.0),
            },
            swell: Swell {
                height: 0.5 + rng.random::<f64>() * 1.5,
                direction: f64::from(rng.random_range(0..360_u16)),
                period: Some(8.0 + rng.random::<f64>() * 4.0),
            },
            current: Current {
                speed: 0.5 + rng.random::<f64>() * 1.5,
                direction: f64::from(rng.random_range(0..360_u16)),
            },
            temperature: Temperature {
                air: 18.0 + rng.random::<f64>() * 8.0,
                sea: 16.0 + rng.random::<f64>() * 6.0,
            },
            visibility: 5.0 + rng.random::<f64>() * 10.0,
            beaufort: rng.random_range(3..6),
            course: Some(f64::from(rng.random_range(0..360_u16))),
        })
        .collect()
}

fn rectangle(south: f64, west: f64, north: f64, east: f64) -> Vec<Position> {
    vec![
        Position::new(south, west),
        Position::new(south, east),
        Position::new(north, east),
        Position::new(north, west),
        Position::new(south, west),
    ]
}

pub fn regions() -> Vec<Region> {
    let now = Utc::now();
    vec![
        Region {
            id: "r1".into(),
            name: "Bandar Abbas".into(),
            region_type: RegionType::Port,
            polygon: rectangle(27.15, 56.25, 27.25, 56.35),
            description: Some("Bandar Abbas port area".into()),
            created_at: now,
        },
        Region {
            id: "r2".into(),
            name: "Protected Zone".into(),
            region_type: RegionType::Conservation,
            polygon: rectangle(26.8, 55.8, 27.0, 56.0),
            description: Some("Protected marine area".into()),
            created_at: now,
        },
    ]
}

pub fn policies() -> Vec<Policy> {
    let now = Utc::now();
    vec![
        Policy {
            id: "p1".into(),
            region_id: "r1".into(),
            title: "Port entry rules".into(),
            content: "All vessels must report to vessel traffic control before entering the port."
                .into(),
            category: PolicyCategory::Navigation,
            effective_date: now,
            created_at: now,
        },
        Policy {
            id: "p2".into(),
            region_id: "r2".into(),
            title: "Environmental restrictions".into(),
            content: "Discharging waste or pollutants of any kind is prohibited in this area."
                .into(),
            category: PolicyCategory::Environmental,
            effective_date: now,
            created_at: now,
        },
    ]
}

pub fn news() -> Vec<News> {
    let now = Utc::now();
    vec![
        News {
            id: "n1".into(),
            title: "Storm warning in the Persian Gulf".into(),
            content: "A severe storm is expected to affect the Persian Gulf within 48 hours. \
                      All vessels are advised to avoid transit through the area."
                .into(),
            category: NewsCategory::Warning,
            region_id: None,
            published_at: now,
            is_read: false,
        },
        News {
            id: "n2".into(),
            title: "Port regulations update".into(),
            content: "New entry and exit rules for Bandar Abbas take effect next month.".into(),
            category: NewsCategory::Announcement,
            region_id: Some("r1".into()),
            published_at: now - Duration::days(1),
            is_read: false,
        },
    ]
}

pub fn services() -> Vec<Service> {
    let now = Utc::now();
    vec![
        Service {
            id: "s1".into(),
            name: "Pars Marine Repairs".into(),
            category: ServiceCategory::Repair,
            description: "Vessel repair and maintenance".into(),
            location: Position::new(27.1865, 56.2808),
            contact: Contact {
                phone: Some("+98-21-12345678".into()),
                email: Some("info@parsrepair.ir".into()),
                website: Some("https://parsrepair.ir".into()),
            },
            rating: Some(4.5),
            status: ServiceStatus::Approved,
            created_at: now,
        },
        Service {
            id: "s2".into(),
            name: "Fuel and Provisions".into(),
            category: ServiceCategory::Supply,
            description: "Fuel, water and food supply".into(),
            location: Position::new(27.2, 56.3),
            contact: Contact {
                phone: Some("+98-21-87654321".into()),
                email: Some("supply@maritime.ir".into()),
                website: None,
            },
            rating: Some(4.2),
            status: ServiceStatus::Approved,
            created_at: now,
        },
    ]
}

pub fn events() -> Vec<Event> {
    let now = Utc::now();
    vec![
        Event {
            id: "e1".into(),
            title: "Persian Gulf Maritime Conference".into(),
            description: "Annual maritime conference with international experts".into(),
            start_date: now + Duration::days(30),
            end_date: Some(now + Duration::days(32)),
            location: EventLocation {
                name: "Bandar Abbas".into(),
                lat: 27.1865,
                lng: 56.2808,
            },
            category: EventCategory::Conference,
            max_participants: Some(200),
            registered_count: 45,
            created_at: now,
        },
        Event {
            id: "e2".into(),
            title: "Maritime Safety Training".into(),
            description: "Comprehensive course on maritime safety and regulations".into(),
            start_date: now + Duration::days(15),
            end_date: None,
            location: EventLocation {
                name: "Tehran".into(),
                lat: 35.6892,
                lng: 51.389,
            },
            category: EventCategory::Training,
            max_participants: Some(50),
            registered_count: 32,
            created_at: now,
        },
    ]
}

pub fn reminders() -> Vec<VesselReminder> {
    let now = Utc::now();
    let days = |n: i64| now + Duration::days(n);
    let reminder = |id: &str,
                    vessel_id: &str,
                    title: &str,
                    category: ReminderCategory,
                    status: ReminderStatus,
                    priority: ReminderPriority,
                    due_date: DateTime<Utc>,
                    created_at: DateTime<Utc>,
                    updated_at: DateTime<Utc>| VesselReminder {
        id: id.into(),
        vessel_id: vessel_id.into(),
        title: title.into(),
        description: String::new(),
        category,
        status,
        priority,
        due_date,
        created_at,
        updated_at,
        related_document_id: None,
    };

    vec![
        VesselReminder {
            description: "Safety management certificate expires soon.".into(),
            related_document_id: Some("d2".into()),
            ..reminder(
                "r1",
                "v1",
                "Renew safety management certificate",
                ReminderCategory::License,
                ReminderStatus::Open,
                ReminderPriority::High,
                days(20),
                days(-15),
                days(-5),
            )
        },
        reminder(
            "r2",
            "v1",
            "Run lifesaving equipment drill",
            ReminderCategory::Safety,
            ReminderStatus::InProgress,
            ReminderPriority::Medium,
            days(7),
            days(-3),
            days(-1),
        ),
        reminder(
            "r3",
            "v2",
            "Schedule hull coating inspection",
            ReminderCategory::Maintenance,
            ReminderStatus::Open,
            ReminderPriority::Medium,
            days(60),
            days(-2),
            days(-1),
        ),
        VesselReminder {
            related_document_id: Some("d5".into()),
            ..reminder(
                "r4",
                "v3",
                "Submit port clearance renewal documents",
                ReminderCategory::Document,
                ReminderStatus::Open,
                ReminderPriority::High,
                days(10),
                days(-1),
                days(-1),
            )
        },
        reminder(
            "r5",
            "v3",
            "Renew crew medical certificates",
            ReminderCategory::Health,
            ReminderStatus::InProgress,
            ReminderPriority::High,
            days(35),
            days(-12),
            days(-4),
        ),
    ]
}

pub fn users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: "u1".into(),
            email: "admin@maritime.ir".into(),
            name: "Sara Rahimi".into(),
            role: UserRole::Admin,
            created_at: now,
            status: UserStatus::Active,
        },
        User {
            id: SEED_OWNER_ID.into(),
            email: "client@maritime.ir".into(),
            name: SEED_OWNER_NAME.into(),
            role: UserRole::Client,
            created_at: now,
            status: UserStatus::Active,
        },
        User {
            id: "u3".into(),
            email: "operations@maritime.ir".into(),
            name: "Operations Duty Officer".into(),
            role: UserRole::Admin,
            created_at: now - Duration::days(7),
            status: UserStatus::Suspended,
        },
    ]
}

pub fn alert_rules() -> Vec<AlertRule> {
    let now = Utc::now();
    vec![
        AlertRule {
            id: "ar1".into(),
            name: "High waves".into(),
            conditions: AlertConditions {
                wave_height: Some(Threshold {
                    operator: ComparisonOperator::GreaterThan,
                    value: 2.0,
                }),
                ..AlertConditions::default()
            },
            alert_level: AlertLevel::Warning,
            message: "Wave height exceeds 2 m".into(),
            notify_owner: true,
            is_active: true,
            created_at: now,
        },
        AlertRule {
            id: "ar2".into(),
            name: "Strong wind".into(),
            conditions: AlertConditions {
                wind_speed: Some(Threshold {
                    operator: ComparisonOperator::GreaterThan,
                    value: 20.0,
                }),
                ..AlertConditions::default()
            },
            alert_level: AlertLevel::Danger,
            message: "Wind speed exceeds 20 kn".into(),
            notify_owner: true,
            is_active: true,
            created_at: now,
        },
    ]
}
