//! vakit - prayer-time surfaces from the command line
//!
//! Evaluates the stored schedule once, or keeps the chosen surfaces refreshed until Ctrl-C.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::sync::Arc;
use std::time::Duration;
use vakit::render::{ConsoleSink, RefreshCoordinator, SinkId, SurfaceKind};
use vakit::schedule::{Language, Prayer, PrayerTime, RawSchedule};
use vakit::store::ScheduleStore;
use vakit::{Clock, ManualClock, SystemClock};

/// Settings resolved from the config file (when enabled) and the command line.
struct Settings {
    interval: Duration,
    language: Language,
    surfaces: Vec<SurfaceKind>,
    store: Arc<dyn ScheduleStore>,
}

fn cli() -> Command {
    let mut command = Command::new("vakit")
        .version(vakit::VERSION)
        .about("Prayer-time widgets and countdowns")
        .long_about(
            "vakit shows the active prayer window, the next prayer and the time remaining, \
             laid out like the small, medium and large widgets or the ongoing notification.",
        );

    for prayer in Prayer::ALL {
        command = command.arg(
            Arg::new(prayer.storage_key())
                .long(prayer.storage_key())
                .value_name("HH:MM")
                .help(format!("Store a new {} time", prayer)),
        );
    }

    command
        .arg(
            Arg::new("at")
                .long("at")
                .value_name("HH:MM")
                .help("Evaluate at this time of day instead of now"),
        )
        .arg(
            Arg::new("surface")
                .long("surface")
                .short('s')
                .value_name("KIND")
                .value_parser(clap::builder::ValueParser::new(|s: &str| {
                    s.parse::<SurfaceKind>()
                }))
                .help("small, medium, large or notification"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .value_parser(["english", "turkish"])
                .help("Label language"),
        )
        .arg(
            Arg::new("watch")
                .long("watch")
                .short('w')
                .action(ArgAction::SetTrue)
                .help("Keep refreshing until interrupted"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .help("Seconds between refreshes in watch mode"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file"),
        )
}

#[cfg(feature = "config")]
fn load_settings(matches: &ArgMatches) -> Result<Settings> {
    use vakit::config::Config;
    use vakit::store::FileStore;

    let config = match matches.get_one::<String>("config") {
        Some(path) => Config::load(std::path::Path::new(path))?,
        None => Config::load_or_default()?,
    };
    Ok(Settings {
        interval: config.refresh_interval(),
        language: config.language,
        surfaces: config.surfaces.clone(),
        store: Arc::new(FileStore::new(config.schedule_path())),
    })
}

#[cfg(not(feature = "config"))]
fn load_settings(matches: &ArgMatches) -> Result<Settings> {
    if matches.get_one::<String>("config").is_some() {
        anyhow::bail!("this build has no configuration file support");
    }
    use vakit::store::MemoryStore;

    Ok(Settings {
        interval: Duration::from_secs(60),
        language: Language::default(),
        surfaces: vec![SurfaceKind::Small],
        store: Arc::new(MemoryStore::new()),
    })
}

fn clock_from(matches: &ArgMatches) -> Result<Arc<dyn Clock>> {
    let Some(raw) = matches.get_one::<String>("at") else {
        return Ok(Arc::new(SystemClock));
    };
    let time = PrayerTime::parse(raw).with_context(|| format!("--at {}", raw))?;
    let now = Local::now()
        .date_naive()
        .and_hms_opt(time.hour(), time.minute(), 0)
        .context("building evaluation instant")?;
    Ok(Arc::new(ManualClock::new(now)))
}

/// Stored schedule with any command-line overrides applied, if there were any.
fn schedule_update(matches: &ArgMatches, current: &RawSchedule) -> Option<RawSchedule> {
    let overrides: Vec<(&str, String)> = Prayer::ALL
        .into_iter()
        .filter_map(|p| {
            matches
                .get_one::<String>(p.storage_key())
                .map(|v| (p.storage_key(), v.clone()))
        })
        .collect();
    if overrides.is_empty() {
        return None;
    }

    let entries = current
        .entries()
        .map(|(k, v)| (k, v.to_string()))
        .chain(overrides);
    Some(RawSchedule::from_entries(entries))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let matches = cli().get_matches();

    let mut settings = load_settings(&matches)?;
    if let Some(kind) = matches.get_one::<SurfaceKind>("surface") {
        settings.surfaces = vec![*kind];
    }
    if let Some(language) = matches.get_one::<String>("language") {
        settings.language = match language.as_str() {
            "english" => Language::English,
            _ => Language::Turkish,
        };
    }
    if let Some(secs) = matches.get_one::<u64>("interval") {
        settings.interval = Duration::from_secs(*secs);
    }

    let clock = clock_from(&matches)?;
    let coordinator = RefreshCoordinator::new(Arc::clone(&settings.store), clock);

    // Applied before any sink exists so the update's own tick draws nothing.
    if let Some(update) = schedule_update(&matches, &coordinator.schedule()) {
        coordinator
            .update_schedule(update)
            .await
            .context("updating stored schedule")?;
    }

    for (index, kind) in settings.surfaces.iter().enumerate() {
        let sink = ConsoleSink::new(*kind, settings.language, std::io::stdout());
        coordinator.register(SinkId(index as u32), Arc::new(sink));
    }

    if !matches.get_flag("watch") {
        let report = coordinator.tick().await;
        if !report.failed.is_empty() {
            anyhow::bail!("{} surface(s) failed to render", report.failed.len());
        }
        return Ok(());
    }

    coordinator.start(settings.interval)?;
    tokio::signal::ctrl_c()
        .await
        .context("waiting for interrupt")?;
    coordinator.stop();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!vakit::VERSION.is_empty());
    }

    #[test]
    fn overrides_merge_into_stored_schedule() {
        let matches = cli().get_matches_from(["vakit", "--ogle", "12:30", "--yatsi", "19:30"]);
        let update = schedule_update(&matches, &RawSchedule::default()).unwrap();
        assert_eq!(update.get(Prayer::Dhuhr), "12:30");
        assert_eq!(update.get(Prayer::Isha), "19:30");
        assert_eq!(update.get(Prayer::Imsak), "05:30");
    }

    #[test]
    fn no_overrides_means_no_update() {
        let matches = cli().get_matches_from(["vakit"]);
        assert!(schedule_update(&matches, &RawSchedule::default()).is_none());
    }

    #[test]
    fn surface_flag_parses() {
        let matches = cli().get_matches_from(["vakit", "--surface", "large"]);
        assert_eq!(
            matches.get_one::<SurfaceKind>("surface"),
            Some(&SurfaceKind::Large)
        );
    }

    #[test]
    fn at_flag_pins_clock() {
        let matches = cli().get_matches_from(["vakit", "--at", "13:00"]);
        let clock = clock_from(&matches).unwrap();
        assert_eq!(clock.time_of_day().to_string(), "13:00");
    }
}
