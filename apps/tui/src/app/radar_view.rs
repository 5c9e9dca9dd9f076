use fleetwatch::db::models::Vessel;
use fleetwatch::domain::VesselType;
use fleetwatch::geo::Position;
use fleetwatch::radar::{ControlKind, RadarScope};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::app::input::helpers::{wrap_decrement, wrap_increment};

/// The radar screen: a scope plus the operator's filters.
#[derive(Debug, Clone)]
pub struct RadarView {
    pub scope: RadarScope,
    pub control_index: usize,
    pub type_filter: Option<VesselType>,
    pub search: String,
    pub searching: bool,
}

impl RadarView {
    pub fn new(center: Position, range_nm: f64) -> Self {
        Self {
            scope: RadarScope::new(center, range_nm),
            control_index: 0,
            type_filter: None,
            search: String::new(),
            searching: false,
        }
    }

    pub fn control(&self) -> ControlKind {
        ControlKind::from_index(self.control_index).unwrap_or(ControlKind::Gain)
    }

    pub fn next_control(&mut self) {
        self.control_index = wrap_increment(self.control_index, ControlKind::ALL.len());
    }

    pub fn prev_control(&mut self) {
        self.control_index = wrap_decrement(self.control_index, ControlKind::ALL.len());
    }

    /// All types, then each type in turn, then back to all.
    pub fn cycle_type_filter(&mut self) {
        self.type_filter = match self.type_filter {
            None => VesselType::ALL.first().copied(),
            Some(current) => VesselType::from_index(current.index() + 1),
        };
    }

    /// Vessels that pass the type filter and fuzzy-match the search text.
    pub fn shown(&self, vessels: &[Vessel]) -> Vec<Vessel> {
        let matcher = SkimMatcherV2::default();
        let pattern = self.search.trim();
        vessels
            .iter()
            .filter(|vessel| self.type_filter.is_none_or(|kind| vessel.vessel_type == kind))
            .filter(|vessel| {
                pattern.is_empty()
                    || matcher.fuzzy_match(&vessel.name, pattern).is_some()
                    || vessel
                        .mmsi
                        .as_deref()
                        .is_some_and(|mmsi| mmsi.contains(pattern))
            })
            .cloned()
            .collect()
    }

    /// Clears a selection the current filters hide.
    pub fn sync_selection(&mut self, vessels: &[Vessel]) {
        let Some(selected) = self.scope.selected() else {
            return;
        };
        if !self.shown(vessels).iter().any(|vessel| vessel.id == selected) {
            self.scope.select(None);
        }
    }

    pub fn filter_label(&self) -> String {
        let kind = self.type_filter.map_or("All types", VesselType::label);
        if self.search.is_empty() {
            kind.to_string()
        } else {
            format!("{kind} · \"{}\"", self.search)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleetwatch::domain::VesselStatus;

    fn vessel(id: &str, name: &str, vessel_type: VesselType) -> Vessel {
        Vessel {
            id: id.into(),
            name: name.into(),
            vessel_type,
            status: VesselStatus::Active,
            owner_id: "u2".into(),
            owner_name: "Reza Karimi".into(),
            speed: 10.0,
            heading: 0.0,
            position: Position::new(27.2, 56.3),
            last_update: Utc::now(),
            imo: None,
            mmsi: Some("422123456".into()),
            call_sign: None,
            flag: None,
            length: None,
            beam: None,
            draft: None,
        }
    }

    fn fleet() -> Vec<Vessel> {
        vec![
            vessel("v1", "Azadi", VesselType::Cargo),
            vessel("v2", "Persian Gulf Tanker", VesselType::Tanker),
            vessel("v3", "Pars Trader", VesselType::Cargo),
        ]
    }

    #[test]
    fn type_filter_cycles_through_all_types_and_back() {
        let mut view = RadarView::new(Position::new(27.0, 56.0), 50.0);
        let mut seen = Vec::new();
        for _ in 0..=VesselType::ALL.len() {
            view.cycle_type_filter();
            seen.push(view.type_filter);
        }
        assert_eq!(seen.first(), Some(&Some(VesselType::Cargo)));
        assert_eq!(seen.last(), Some(&None));
    }

    #[test]
    fn filters_by_type() {
        let mut view = RadarView::new(Position::new(27.0, 56.0), 50.0);
        view.type_filter = Some(VesselType::Tanker);
        let shown = view.shown(&fleet());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "v2");
    }

    #[test]
    fn fuzzy_search_matches_partial_names() {
        let mut view = RadarView::new(Position::new(27.0, 56.0), 50.0);
        view.search = "trad".into();
        let shown = view.shown(&fleet());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "v3");

        view.search = "4221".into();
        assert_eq!(view.shown(&fleet()).len(), 3);
    }

    #[test]
    fn hidden_selection_is_cleared() {
        let mut view = RadarView::new(Position::new(27.0, 56.0), 50.0);
        view.scope.select(Some("v2".into()));
        view.type_filter = Some(VesselType::Cargo);
        view.sync_selection(&fleet());
        assert_eq!(view.scope.selected(), None);
    }
}
