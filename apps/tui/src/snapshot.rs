//! Fleet-wide statistics over the loaded collections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models::{
    Alert, Event, News, OceanReading, Policy, Region, Service, User, Vessel, VesselReminder,
};
use crate::domain::{ReminderStatus, ServiceStatus, UserRole, UserStatus, VesselStatus, VesselType};

/// Borrowed view of every collection the snapshot reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotInput<'a> {
    pub vessels: &'a [Vessel],
    pub readings: &'a [OceanReading],
    pub events: &'a [Event],
    pub regions: &'a [Region],
    pub policies: &'a [Policy],
    pub services: &'a [Service],
    pub users: &'a [User],
    pub news: &'a [News],
    pub alerts: &'a [Alert],
    pub reminders: &'a [VesselReminder],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VesselCounts {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

impl VesselCounts {
    pub fn status(&self, status: VesselStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    pub fn of_type(&self, vessel_type: VesselType) -> usize {
        self.by_type.get(vessel_type.as_str()).copied().unwrap_or(0)
    }
}

/// Mean conditions over every reading. All zero when there are none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OceanAverages {
    pub readings: usize,
    pub wave_height: f64,
    pub wind_speed: f64,
    pub sea_temperature: f64,
    pub air_temperature: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    pub total: usize,
    pub upcoming: usize,
    pub full: usize,
    pub registered: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCounts {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

impl ServiceCounts {
    pub fn status(&self, status: ServiceStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub total: usize,
    pub active: usize,
    pub suspended: usize,
    pub admins: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSnapshot {
    pub vessels: VesselCounts,
    pub ocean: OceanAverages,
    pub events: EventCounts,
    pub regions: usize,
    pub policies: usize,
    pub services: ServiceCounts,
    pub users: UserCounts,
    pub unread_news: usize,
    pub unread_alerts: usize,
    /// Reminders not yet completed.
    pub open_reminders: usize,
}

fn tally<'a, I>(keys: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn ocean_averages(readings: &[OceanReading]) -> OceanAverages {
    OceanAverages {
        readings: readings.len(),
        wave_height: mean(readings.iter().map(|r| r.wave.height)),
        wind_speed: mean(readings.iter().map(|r| r.wind.speed)),
        sea_temperature: mean(readings.iter().map(|r| r.temperature.sea)),
        air_temperature: mean(readings.iter().map(|r| r.temperature.air)),
    }
}

/// Computes the snapshot. `now` decides which events count as upcoming.
pub fn compute(input: &SnapshotInput<'_>, now: DateTime<Utc>) -> FleetSnapshot {
    let vessels = VesselCounts {
        total: input.vessels.len(),
        by_status: tally(input.vessels.iter().map(|v| v.status.as_str())),
        by_type: tally(input.vessels.iter().map(|v| v.vessel_type.as_str())),
    };

    let events = EventCounts {
        total: input.events.len(),
        upcoming: input.events.iter().filter(|e| e.start_date > now).count(),
        full: input.events.iter().filter(|e| e.is_full()).count(),
        registered: input
            .events
            .iter()
            .map(|e| u64::from(e.registered_count))
            .sum(),
    };

    let users = UserCounts {
        total: input.users.len(),
        active: input
            .users
            .iter()
            .filter(|u| u.status == UserStatus::Active)
            .count(),
        suspended: input
            .users
            .iter()
            .filter(|u| u.status == UserStatus::Suspended)
            .count(),
        admins: input
            .users
            .iter()
            .filter(|u| u.role == UserRole::Admin)
            .count(),
    };

    FleetSnapshot {
        vessels,
        ocean: ocean_averages(input.readings),
        events,
        regions: input.regions.len(),
        policies: input.policies.len(),
        services: ServiceCounts {
            total: input.services.len(),
            by_status: tally(input.services.iter().map(|s| s.status.as_str())),
        },
        users,
        unread_news: input.news.iter().filter(|n| !n.is_read).count(),
        unread_alerts: input.alerts.iter().filter(|a| !a.is_read).count(),
        open_reminders: input
            .reminders
            .iter()
            .filter(|r| r.status != ReminderStatus::Completed)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    struct Collections {
        vessels: Vec<Vessel>,
        readings: Vec<OceanReading>,
        events: Vec<Event>,
        regions: Vec<Region>,
        policies: Vec<Policy>,
        services: Vec<Service>,
        users: Vec<User>,
        news: Vec<News>,
        reminders: Vec<VesselReminder>,
    }

    impl Collections {
        fn seeded() -> Self {
            Self {
                vessels: seed::vessels(),
                readings: seed::ocean_readings(),
                events: seed::events(),
                regions: seed::regions(),
                policies: seed::policies(),
                services: seed::services(),
                users: seed::users(),
                news: seed::news(),
                reminders: seed::reminders(),
            }
        }

        fn input(&self) -> SnapshotInput<'_> {
            SnapshotInput {
                vessels: &self.vessels,
                readings: &self.readings,
                events: &self.events,
                regions: &self.regions,
                policies: &self.policies,
                services: &self.services,
                users: &self.users,
                news: &self.news,
                alerts: &[],
                reminders: &self.reminders,
            }
        }
    }

    #[test]
    fn seeded_collections_produce_expected_counts() {
        let collections = Collections::seeded();
        let snapshot = compute(&collections.input(), Utc::now());

        assert_eq!(snapshot.vessels.total, 3);
        assert_eq!(snapshot.vessels.status(VesselStatus::Active), 2);
        assert_eq!(snapshot.vessels.status(VesselStatus::Pending), 1);
        assert_eq!(snapshot.vessels.status(VesselStatus::Rejected), 0);
        assert_eq!(snapshot.vessels.of_type(VesselType::Cargo), 2);
        assert_eq!(snapshot.events.total, 2);
        assert_eq!(snapshot.events.upcoming, 2);
        assert_eq!(snapshot.events.full, 0);
        assert_eq!(snapshot.events.registered, 77);
        assert_eq!(snapshot.services.status(ServiceStatus::Approved), 2);
        assert_eq!(snapshot.users.active, 2);
        assert_eq!(snapshot.users.suspended, 1);
        assert_eq!(snapshot.users.admins, 2);
        assert_eq!(snapshot.unread_news, 2);
        assert_eq!(snapshot.unread_alerts, 0);
        assert_eq!(snapshot.open_reminders, 5);
        assert_eq!(snapshot.ocean.readings, 20);
        assert!((1.0..3.0).contains(&snapshot.ocean.wave_height));
    }

    #[test]
    fn computing_twice_gives_identical_statistics() {
        let collections = Collections::seeded();
        let now = Utc::now();

        let first = compute(&collections.input(), now);
        let second = compute(&collections.input(), now);

        assert_eq!(first, second);
    }

    #[test]
    fn no_readings_means_zero_averages() {
        let averages = ocean_averages(&[]);
        assert_eq!(averages, OceanAverages::default());

        let snapshot = compute(&SnapshotInput::default(), Utc::now());
        assert_eq!(snapshot, FleetSnapshot::default());
    }

    #[test]
    fn averages_are_arithmetic_means() {
        let mut readings = seed::ocean_readings();
        readings.truncate(2);
        readings[0].wave.height = 1.0;
        readings[1].wave.height = 2.0;
        readings[0].temperature.sea = 20.0;
        readings[1].temperature.sea = 22.0;

        let averages = ocean_averages(&readings);

        assert!((averages.wave_height - 1.5).abs() < 1e-9);
        assert!((averages.sea_temperature - 21.0).abs() < 1e-9);
    }

    #[test]
    fn full_and_past_events_are_counted() {
        let mut collections = Collections::seeded();
        collections.events[1].registered_count = 50;
        let after_everything = Utc::now() + chrono::Duration::days(365);

        let snapshot = compute(&collections.input(), after_everything);

        assert_eq!(snapshot.events.full, 1);
        assert_eq!(snapshot.events.upcoming, 0);
    }
}
