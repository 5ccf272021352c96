//! CLI entry point.
//!
//! # Responsibility
//! - Print `placement_core` ping and version for a linkage check.
//! - Render the dashboard figures for the configured database.

use log::error;
use placement_core::screen::dashboard::{breakdown_lines, DashboardScreen};
use placement_core::{
    core_version, init_logging, open_db, ping, PlacementConfig, SqliteStatsRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("placement_core ping={}", ping());
    println!("placement_core version={}", core_version());

    let config = PlacementConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        // Logging is optional here; keep going on stdout.
        eprintln!("logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error message={message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &PlacementConfig) -> Result<(), String> {
    let conn = open_db(&config.db_path).map_err(|err| {
        format!(
            "failed to open database `{}`: {err}",
            config.db_path.display()
        )
    })?;
    let screen = DashboardScreen::mount(SqliteStatsRepository::new(&conn));
    let stats = screen.stats();

    println!("database={}", config.db_path.display());
    println!("total_students={}", stats.total_students);
    println!("total_companies={}", stats.total_companies);
    println!("total_job_profiles={}", stats.total_job_profiles);
    println!("total_applications={}", stats.total_applications);
    println!("total_training_programs={}", stats.total_training_programs);
    println!("placed_students={}", stats.placed_students);
    println!("placement_rate={}", screen.placement_rate_label());
    println!("average_package={}", screen.average_package_label());
    println!("top_branch={}", stats.top_branch);

    for line in breakdown_lines(screen.status_breakdown()) {
        println!("{line}");
    }

    if let Some(alert) = screen.alert() {
        eprintln!("{}", alert.message);
    }
    for failure in screen.failures() {
        eprintln!("figure {} unavailable: {}", failure.figure, failure.error);
    }
    Ok(())
}
