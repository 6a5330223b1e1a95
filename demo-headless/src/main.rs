use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_sim_core::region::KNOWN_BIOMES;
use weather_sim_core::{
    parse_timestamp, ForecastEntry, ProfileOverrides, SeasonSelection, SimulationConfig,
    WeatherCondition, WeatherSimulation,
};

/// Hourly weather forecast demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forecast-demo")]
#[command(about = "Tabletop weather simulation demo", long_about = None)]
struct Args {
    /// Biome preset (temperate-forest, desert, tundra, ...)
    #[arg(short, long, default_value = "temperate-forest")]
    biome: String,

    /// Season (auto, winter, spring, summer, fall)
    #[arg(short, long, default_value = "auto", value_parser = parse_season)]
    season: SeasonSelection,

    /// Start date/time (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(short, long, default_value = "2024-07-15T06:00", value_parser = parse_start)]
    date: chrono::NaiveDateTime,

    /// Hours to advance after initialization
    #[arg(short, long, default_value_t = 0)]
    advance: u32,

    /// Advance in steps of this many hours
    #[arg(long, default_value_t = 6)]
    step: u32,

    /// Random seed (omit for a fresh timeline each run)
    #[arg(long)]
    seed: Option<u64>,

    /// Hours kept in the forecast window
    #[arg(long, default_value_t = 24)]
    window: usize,

    /// Multiplier on extreme event probabilities (0 disables them)
    #[arg(long, default_value_t = 1.0)]
    extreme_scale: f64,

    /// Override the preset latitude
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Override the preset elevation in feet
    #[arg(long)]
    elevation: Option<f64>,

    /// List biome presets and exit
    #[arg(long)]
    list_biomes: bool,

    /// Run invariant checks over a long run
    #[arg(short, long)]
    validate: bool,
}

fn parse_season(s: &str) -> Result<SeasonSelection, String> {
    s.parse().map_err(|e: weather_sim_core::WeatherError| e.to_string())
}

fn parse_start(s: &str) -> Result<chrono::NaiveDateTime, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    if args.list_biomes {
        println!("Available biomes:");
        for biome in KNOWN_BIOMES {
            println!("  {biome}");
        }
        return;
    }

    let mut config = SimulationConfig {
        forecast_hours: args.window,
        profile_overrides: ProfileOverrides {
            latitude: args.latitude,
            elevation: args.elevation,
            maritime_influence: None,
        },
        ..SimulationConfig::default()
    };
    config.extreme_weather.enabled = args.extreme_scale > 0.0;
    config.extreme_weather.probability_scale = args.extreme_scale;

    let sim = match args.seed {
        Some(seed) => WeatherSimulation::seeded(seed),
        None => WeatherSimulation::new(),
    };
    let mut sim = match sim.with_config(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    info!(
        biome = %args.biome,
        season = ?args.season,
        seed = ?args.seed,
        window = args.window,
        "Starting forecast demo"
    );
    println!("=== Weather Simulation Demo ===\n");

    let now = sim.initialize(&args.biome, args.season, args.date);
    if let Some(profile) = sim.profile() {
        println!(
            "Region: {} (lat {:.1}°, {}, {} band)",
            profile.name,
            profile.latitude,
            profile.elevation,
            profile.latitude_band()
        );
    }
    println!("Season: {}, starting {}", sim.season(), now.timestamp);
    println!("Active systems: {}\n", sim.active_systems().len());

    let mut remaining = args.advance;
    while remaining > 0 {
        let hours = remaining.min(args.step.max(1));
        let current = sim.advance_time(hours, &args.biome, args.season, args.date);
        println!(
            "+{hours:>3}h  {}  {:<20} {} ({})",
            current.timestamp.format("%Y-%m-%d %H:%M"),
            current.condition,
            current.temperature,
            current.temperature.to_celsius()
        );
        remaining -= hours;
    }
    if args.advance > 0 {
        println!();
    }

    print_forecast(sim.get_24_hour_forecast());

    info!(hours = args.advance, "Forecast demo finished");

    if args.validate {
        run_validation_checks(args.seed.unwrap_or(7));
    }
}

fn print_forecast(entries: &[ForecastEntry]) {
    println!("Time             | Condition            |   Temp |     °C | Feels  | Wind          | Sky");
    println!("-----------------|----------------------|--------|--------|--------|---------------|-----");
    for entry in entries {
        let sky = if entry.celestial.is_daytime { "day" } else { "night" };
        println!(
            "{} | {:<20} | {:>6.1} | {:>6.1} | {:>6.1} | {:>3} {:>5.1} mph | {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.condition.name(),
            *entry.temperature,
            *entry.temperature.to_celsius(),
            *entry.feels_like,
            entry.wind_direction.to_string(),
            *entry.wind_speed,
            sky
        );
        if entry.celestial.shooting_star {
            let note = if entry.celestial.meteor_impact {
                "a meteor strikes the ground!"
            } else {
                "a shooting star crosses the sky"
            };
            println!("                 |   ✦ {note}");
        }
        if let Some(event) = &entry.extreme_event {
            println!("                 |   ⚠ {event}");
        }
    }
    println!("\nEffects now: {}", entries.first().map_or("", |e| e.effects.as_str()));
}

fn run_validation_checks(seed: u64) {
    println!("\n=== Running Validation Checks ===\n");

    let start = match parse_timestamp("2024-01-01T00:00") {
        Ok(start) => start,
        Err(e) => {
            println!("  ✗ FAIL: {e}");
            return;
        }
    };

    let mut failures = 0;
    for biome in KNOWN_BIOMES {
        let mut sim = WeatherSimulation::seeded(seed);
        sim.initialize(biome, SeasonSelection::Auto, start);

        let mut longest_storm = 0;
        let mut storm_run = 0;
        let mut bound_violations = 0;
        let mut previous: Option<WeatherCondition> = None;
        let mut instant_clearing = 0;

        for _ in 0..(24 * 60) {
            let entry = sim.advance_time(1, biome, SeasonSelection::Auto, start);
            if !entry.condition.temperature_bound().contains(*entry.temperature) {
                bound_violations += 1;
            }
            if entry.condition == WeatherCondition::Thunderstorm {
                storm_run += 1;
                longest_storm = longest_storm.max(storm_run);
            } else {
                storm_run = 0;
            }
            if previous == Some(WeatherCondition::Thunderstorm)
                && entry.condition == WeatherCondition::ClearSkies
            {
                instant_clearing += 1;
            }
            previous = Some(entry.condition);
        }

        let ok = longest_storm <= 4
            && bound_violations == 0
            && instant_clearing == 0
            && !sim.active_systems().is_empty();
        if !ok {
            failures += 1;
        }
        println!(
            "  {} {:<20} longest storm {}h, bound violations {}, systems {}",
            if ok { "✓" } else { "✗" },
            biome,
            longest_storm,
            bound_violations,
            sim.active_systems().len()
        );
    }

    if failures == 0 {
        println!("\n  ✓ PASS: all biomes held their invariants over 60 days");
    } else {
        println!("\n  ✗ FAIL: {failures} biome(s) broke an invariant");
    }
    println!("\n=== Validation Complete ===");
}
