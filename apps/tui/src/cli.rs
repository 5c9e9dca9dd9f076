use std::path::PathBuf;

use clap::Parser;
use fleetwatch::config::{is_valid_range, AppConfig};
use fleetwatch::domain::UserRole;

#[derive(Debug, Parser)]
#[command(name = "fleetwatch", version, about = "Maritime fleet radar dashboard")]
pub struct CliArgs {
    /// Print the fleet snapshot and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Write a fleet export for the web viewer and exit
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Radar range in nautical miles
    #[arg(long, value_name = "NM", value_parser = parse_range)]
    pub range: Option<f64>,

    /// Skip the simulated store latency
    #[arg(long = "no-latency")]
    pub no_latency: bool,

    /// Act as this user id
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Display name for --user
    #[arg(long = "user-name", value_name = "NAME")]
    pub user_name: Option<String>,

    /// Role for --user (admin or client)
    #[arg(long, value_name = "ROLE", value_parser = parse_role)]
    pub role: Option<UserRole>,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    UserRole::parse(raw).ok_or_else(|| format!("unknown role '{raw}', expected admin or client"))
}

fn parse_range(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|range| is_valid_range(*range))
        .ok_or_else(|| format!("'{raw}' is not a positive number of nautical miles"))
}

impl CliArgs {
    /// Settings read by `init_app_config` from the environment.
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
    }

    /// Flags win over the environment.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(range) = self.range.filter(|range| is_valid_range(*range)) {
            config.radar_range_nm = range;
        }
        if self.no_latency || self.headless || self.export.is_some() {
            config.latency = false;
        }
        if let Some(id) = &self.user {
            config.current_user.id.clone_from(id);
        }
        if let Some(name) = &self.user_name {
            config.current_user.name.clone_from(name);
        }
        if let Some(role) = self.role {
            config.current_user.role = role;
        }
    }
}
