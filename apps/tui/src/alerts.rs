//! Matching ocean readings against alert rules.

use crate::db::models::{AlertRule, OceanReading};

/// Active rules whose every condition holds for `reading`.
///
/// A rule with neither a wave nor a wind threshold never fires. A vessel
/// condition must name the vessel the reading came from.
pub fn evaluate<'r>(rules: &'r [AlertRule], reading: &OceanReading) -> Vec<&'r AlertRule> {
    rules
        .iter()
        .filter(|rule| rule.is_active && fires(rule, reading))
        .collect()
}

fn fires(rule: &AlertRule, reading: &OceanReading) -> bool {
    let conditions = &rule.conditions;
    if conditions.wave_height.is_none() && conditions.wind_speed.is_none() {
        return false;
    }
    if let Some(vessel_id) = &conditions.vessel_id {
        if reading.vessel_id.as_ref() != Some(vessel_id) {
            return false;
        }
    }

    let wave_ok = conditions
        .wave_height
        .map_or(true, |t| t.operator.holds(reading.wave.height, t.value));
    let wind_ok = conditions
        .wind_speed
        .map_or(true, |t| t.operator.holds(reading.wind.speed, t.value));
    wave_ok && wind_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{AlertConditions, Threshold};
    use crate::db::seed;
    use crate::domain::ComparisonOperator;

    fn reading(wave: f64, wind: f64) -> OceanReading {
        let mut reading = seed::ocean_readings().remove(0);
        reading.wave.height = wave;
        reading.wind.speed = wind;
        reading.vessel_id = None;
        reading
    }

    fn names(rules: &[&AlertRule]) -> Vec<String> {
        rules.iter().map(|rule| rule.id.clone()).collect()
    }

    #[test]
    fn seeded_rules_fire_on_their_own_thresholds() {
        let rules = seed::alert_rules();

        assert!(evaluate(&rules, &reading(1.5, 12.0)).is_empty());
        assert_eq!(names(&evaluate(&rules, &reading(2.5, 12.0))), vec!["ar1"]);
        assert_eq!(names(&evaluate(&rules, &reading(1.0, 24.0))), vec!["ar2"]);
        assert_eq!(
            names(&evaluate(&rules, &reading(2.1, 20.5))),
            vec!["ar1", "ar2"]
        );
    }

    #[test]
    fn inactive_and_empty_rules_never_fire() {
        let mut rules = seed::alert_rules();
        rules[0].is_active = false;
        rules[1].conditions = AlertConditions::default();

        assert!(evaluate(&rules, &reading(5.0, 40.0)).is_empty());
    }

    #[test]
    fn vessel_condition_must_match_reading() {
        let mut rules = seed::alert_rules();
        rules.truncate(1);
        rules[0].conditions.vessel_id = Some("v1".into());
        let mut from_v1 = reading(3.0, 10.0);
        from_v1.vessel_id = Some("v1".into());

        assert!(evaluate(&rules, &reading(3.0, 10.0)).is_empty());
        assert_eq!(evaluate(&rules, &from_v1).len(), 1);
    }

    #[test]
    fn all_conditions_must_hold() {
        let mut rules = seed::alert_rules();
        rules.truncate(1);
        rules[0].conditions.wind_speed = Some(Threshold {
            operator: ComparisonOperator::LessThan,
            value: 5.0,
        });

        assert!(evaluate(&rules, &reading(3.0, 10.0)).is_empty());
        assert_eq!(evaluate(&rules, &reading(3.0, 4.0)).len(), 1);
    }
}
