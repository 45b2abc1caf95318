use std::path::Path;
use std::time::Duration;

use pipeline_logging::LogDestination;

use playlist_app::config::Config;
use playlist_app::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/app.toml".to_string());
    let cfg = Config::load(Path::new(&config_path))?;

    let destination = if cfg.log.terminal {
        LogDestination::Both
    } else {
        LogDestination::File
    };
    if let Err(err) = pipeline_logging::initialize(destination, &cfg.log.dir) {
        eprintln!("warning: could not open log file, logging to terminal: {err}");
        let _ = pipeline_logging::initialize(LogDestination::Terminal, &cfg.log.dir);
    }

    if let Err(err) = run::run_task(&cfg).await {
        log::error!("run failed: {err:#}");
        std::process::exit(1);
    }

    if cfg.schedule.enable {
        let hours = cfg.schedule.interval_hours.max(1);
        log::info!("scheduler enabled: re-running every {hours} hours");
        let mut interval = tokio::time::interval(Duration::from_secs(hours * 3600));
        // The first tick fires immediately and the initial run just
        // happened, so consume it.
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(err) = run::run_task(&cfg).await {
                log::error!("scheduled run failed: {err:#}");
            }
        }
    }

    Ok(())
}
