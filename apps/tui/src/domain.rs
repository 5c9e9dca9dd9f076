/// Declares a string-backed enum with its stored value, display label and the
/// alternate spellings accepted when reading older records.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($value:literal, $label:literal) $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            pub fn index(self) -> usize {
                Self::ALL
                    .iter()
                    .position(|candidate| *candidate == self)
                    .unwrap_or_default()
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value.trim().to_lowercase().as_str() {
                    $($value $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labeled_enum! {
    /// Hull category. `container`/`bulk`/`tug` come from an older record shape.
    pub enum VesselType {
        Cargo => ("cargo", "Cargo") | "container" | "bulk",
        Tanker => ("tanker", "Tanker"),
        Passenger => ("passenger", "Passenger"),
        Fishing => ("fishing", "Fishing"),
        Military => ("military", "Military"),
        Other => ("other", "Other") | "tug",
    }
}

labeled_enum! {
    pub enum VesselStatus {
        Active => ("active", "Active"),
        Inactive => ("inactive", "Inactive"),
        Pending => ("pending", "Pending"),
        Approved => ("approved", "Approved"),
        Rejected => ("rejected", "Rejected"),
    }
}

impl Default for VesselStatus {
    fn default() -> Self {
        Self::Pending
    }
}

labeled_enum! {
    pub enum UserRole {
        Admin => ("admin", "Admin"),
        Client => ("client", "Client"),
    }
}

labeled_enum! {
    pub enum UserStatus {
        Active => ("active", "Active"),
        Suspended => ("suspended", "Suspended"),
    }
}

labeled_enum! {
    pub enum RegionType {
        Port => ("port", "Port"),
        Restricted => ("restricted", "Restricted"),
        Fishing => ("fishing", "Fishing"),
        Military => ("military", "Military"),
        Conservation => ("conservation", "Conservation"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    pub enum PolicyCategory {
        Navigation => ("navigation", "Navigation"),
        Environmental => ("environmental", "Environmental"),
        Safety => ("safety", "Safety"),
        Customs => ("customs", "Customs"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    pub enum NewsCategory {
        Announcement => ("announcement", "Announcement"),
        Warning => ("warning", "Warning"),
        Update => ("update", "Update"),
        Event => ("event", "Event"),
    }
}

labeled_enum! {
    pub enum ServiceCategory {
        Repair => ("repair", "Repair"),
        Supply => ("supply", "Supply"),
        Logistics => ("logistics", "Logistics"),
        Inspection => ("inspection", "Inspection"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    pub enum ServiceStatus {
        Pending => ("pending", "Pending"),
        Approved => ("approved", "Approved"),
        Rejected => ("rejected", "Rejected"),
    }
}

labeled_enum! {
    pub enum EventCategory {
        Conference => ("conference", "Conference"),
        Training => ("training", "Training"),
        Inspection => ("inspection", "Inspection"),
        Maintenance => ("maintenance", "Maintenance"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    pub enum ReminderCategory {
        License => ("license", "License"),
        Safety => ("safety", "Safety"),
        Maintenance => ("maintenance", "Maintenance"),
        Document => ("document", "Document"),
        Health => ("health", "Health"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    pub enum ReminderStatus {
        Open => ("open", "Open"),
        InProgress => ("in_progress", "In progress"),
        Completed => ("completed", "Completed"),
    }
}

impl ReminderStatus {
    /// Next status in the open → in progress → completed → open cycle.
    pub const fn cycle(self) -> Self {
        match self {
            Self::Open => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::Open,
        }
    }
}

labeled_enum! {
    pub enum ReminderPriority {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
    }
}

labeled_enum! {
    pub enum AlertLevel {
        Info => ("info", "Info"),
        Warning => ("warning", "Warning"),
        Danger => ("danger", "Danger"),
    }
}

labeled_enum! {
    pub enum ComparisonOperator {
        GreaterThan => (">", "above"),
        LessThan => ("<", "below"),
        Equal => ("=", "equal to"),
    }
}

impl ComparisonOperator {
    pub fn holds(self, observed: f64, limit: f64) -> bool {
        match self {
            Self::GreaterThan => observed > limit,
            Self::LessThan => observed < limit,
            Self::Equal => (observed - limit).abs() < f64::EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_stored_values_and_legacy_aliases() {
        assert_eq!(VesselType::parse("Tanker"), Some(VesselType::Tanker));
        assert_eq!(VesselType::parse("container"), Some(VesselType::Cargo));
        assert_eq!(VesselType::parse("tug"), Some(VesselType::Other));
        assert_eq!(VesselType::parse("submarine"), None);
        assert_eq!(ReminderStatus::parse("in_progress"), Some(ReminderStatus::InProgress));
    }

    #[test]
    fn serde_reads_aliases_but_writes_canonical_value() -> Result<(), serde_json::Error> {
        let kind: VesselType = serde_json::from_str("\"bulk\"")?;
        assert_eq!(kind, VesselType::Cargo);
        assert_eq!(serde_json::to_string(&kind)?, "\"cargo\"");
        Ok(())
    }

    #[test]
    fn from_index_and_index_agree() {
        for (index, status) in VesselStatus::ALL.iter().enumerate() {
            assert_eq!(VesselStatus::from_index(index), Some(*status));
            assert_eq!(status.index(), index);
        }
        assert_eq!(VesselStatus::from_index(VesselStatus::ALL.len()), None);
    }

    #[test]
    fn reminder_status_cycles_back_to_open() {
        let status = ReminderStatus::Open.cycle().cycle().cycle();
        assert_eq!(status, ReminderStatus::Open);
    }

    #[test]
    fn comparison_operator_holds() {
        assert!(ComparisonOperator::GreaterThan.holds(2.5, 2.0));
        assert!(!ComparisonOperator::GreaterThan.holds(2.0, 2.0));
        assert!(ComparisonOperator::LessThan.holds(1.0, 2.0));
        assert!(ComparisonOperator::Equal.holds(20.0, 20.0));
    }
}
