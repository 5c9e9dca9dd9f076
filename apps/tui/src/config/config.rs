use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

use crate::domain::UserRole;
use crate::geo::Position;

pub const DEFAULT_CENTER: Position = Position::new(27.1865, 56.2808);
pub const DEFAULT_RANGE_NM: f64 = 50.0;

/// The identity the dashboard acts as. Stands in for a login session.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self {
            id: "u1".to_string(),
            name: "Sara Rahimi".to_string(),
            role: UserRole::Admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Whether store calls sleep before touching storage.
    pub latency: bool,
    pub radar_center: Position,
    pub radar_range_nm: f64,
    pub current_user: CurrentUser,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            latency: true,
            radar_center: DEFAULT_CENTER,
            radar_range_nm: DEFAULT_RANGE_NM,
            current_user: CurrentUser::default(),
            log_path: PathBuf::from("fleetwatch.log"),
        }
    }
}

/// Reads `.env` and the environment into an [`AppConfig`].
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "fleet.db".to_string());
    let database_path = base_dir.join(&db_name);

    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let defaults = AppConfig::default();
    let current_user = CurrentUser {
        id: env::var("FLEET_USER_ID").unwrap_or(defaults.current_user.id),
        name: env::var("FLEET_USER_NAME").unwrap_or(defaults.current_user.name),
        role: match env::var("FLEET_USER_ROLE") {
            Ok(raw) => UserRole::parse(&raw).ok_or_else(|| eyre!("Unknown user role: {raw}"))?,
            Err(_) => defaults.current_user.role,
        },
    };

    let radar_range_nm = parse_env("RADAR_RANGE_NM")?.unwrap_or(DEFAULT_RANGE_NM);
    if !is_valid_range(radar_range_nm) {
        return Err(eyre!("RADAR_RANGE_NM must be a positive number"));
    }

    Ok(AppConfig {
        database_url: database_url_for(&database_path)?,
        latency: env::var("FLEET_LATENCY").map_or(true, |raw| is_truthy(&raw)),
        radar_center: Position::new(
            parse_env("RADAR_CENTER_LAT")?.unwrap_or(DEFAULT_CENTER.lat),
            parse_env("RADAR_CENTER_LNG")?.unwrap_or(DEFAULT_CENTER.lng),
        ),
        radar_range_nm,
        current_user,
        log_path: env::var("FLEET_LOG").map_or(defaults.log_path, PathBuf::from),
    })
}

/// Formats a filesystem path as a SQLx SQLite URL.
///
/// Absolute paths take three slashes (`sqlite:///abs/path`), relative ones two.
pub fn database_url_for(database_path: &Path) -> color_eyre::eyre::Result<String> {
    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;
    let clean_path = path_str.trim_start_matches('/');

    if database_path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

/// A radar range the projection can scale by: finite and above zero.
pub fn is_valid_range(range_nm: f64) -> bool {
    range_nm.is_finite() && range_nm > 0.0
}

fn parse_env(name: &str) -> color_eyre::eyre::Result<Option<f64>> {
    match env::var(name) {
        Ok(raw) => parse_number(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

/// `f64::from_str` accepts `NaN` and `inf`, neither of which is a coordinate.
fn parse_number(name: &str, raw: &str) -> color_eyre::eyre::Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| eyre!("{name} is not a number ({raw}): {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(eyre!("{name} must be finite ({raw})"))
    }
}

fn is_truthy(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_get_three_slashes() -> color_eyre::eyre::Result<()> {
        let url = database_url_for(Path::new("/var/lib/fleet/fleet.db"))?;
        assert_eq!(url, "sqlite:///var/lib/fleet/fleet.db");
        Ok(())
    }

    #[test]
    fn relative_paths_get_two_slashes() -> color_eyre::eyre::Result<()> {
        let url = database_url_for(Path::new("data/fleet.db"))?;
        assert_eq!(url, "sqlite://data/fleet.db");
        Ok(())
    }

    #[test]
    fn latency_switch_accepts_common_spellings() {
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("OFF"));
        assert!(!is_truthy(" false "));
    }

    #[test]
    fn non_finite_numbers_are_rejected() -> color_eyre::eyre::Result<()> {
        assert!((parse_number("RADAR_RANGE_NM", " 25 ")? - 25.0).abs() < f64::EPSILON);
        for raw in ["NaN", "nan", "inf", "-infinity", "abc"] {
            assert!(parse_number("RADAR_RANGE_NM", raw).is_err(), "{raw} accepted");
        }
        Ok(())
    }

    #[test]
    fn range_must_be_finite_and_positive() {
        assert!(is_valid_range(0.5));
        assert!(!is_valid_range(0.0));
        assert!(!is_valid_range(-3.0));
        assert!(!is_valid_range(f64::NAN));
        assert!(!is_valid_range(f64::INFINITY));
    }

    #[test]
    fn default_user_is_admin() {
        assert!(CurrentUser::default().is_admin());
    }
}
