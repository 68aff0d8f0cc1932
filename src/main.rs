use anyhow::Context;
use chrono::{NaiveDate, NaiveTime, Utc};
use locker_spots::booking::{BookingMode, BookingWindow, Quote};
use locker_spots::catalog::{load_catalog, CatalogSource, HttpCatalogSource, SampleCatalogSource};
use locker_spots::models::Review;
use locker_spots::settings::AppConfig;
use locker_spots::store::{LocationStore, StoreHandle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🧳 Locker Spots - reservation walkthrough");

    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = LocationStore::handle();

    // Log catalog updates as they land
    let mut updates = store.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            info!(version = snapshot.version(), locations = snapshot.len(), "catalog updated");
        }
    });

    populate(&config, &store).await?;

    // Usage: locker-spots [location-id] [YYYY-MM-DD ...]
    let mut args = std::env::args().skip(1);
    let location_id = args.next().unwrap_or_else(|| "1".to_string());
    let taps = args
        .map(|arg| {
            NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                .with_context(|| format!("Invalid date {arg:?}, expected YYYY-MM-DD"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    println!();
    for (i, location) in store.snapshot().locations().iter().enumerate() {
        println!("{}. {} (${:.2}/h)", i + 1, location.name, location.price_per_hour);
        println!("   {}", location.address);
        println!("   Rating: {:.1} ({} reviews)", location.rating(), location.review_count());
        println!("   ID: {}", location.id);
    }
    println!();

    let nearby = store.nearby(config.nearby.center(), config.nearby.radius_km());
    info!("{} spots within {} m", nearby.len(), config.nearby.radius_meters);
    for found in &nearby {
        println!("   {:.2} km  {}", found.distance_km, found.location.name);
    }

    let Some(location) = store.get_by_id(&location_id) else {
        warn!("Spot {} not found", location_id);
        return Ok(());
    };

    info!("Reservation for {}", location.name);

    let mut window = BookingWindow::new(BookingMode::Daily);
    let taps = if taps.is_empty() {
        let today = Utc::now().date_naive();
        vec![today, today + chrono::Days::new(2)]
    } else {
        taps
    };
    for day in taps {
        let state = window.on_day_selected(day);
        println!("tap {} -> {:?}", day, state);
    }
    for (day, mark) in window.selector().marking() {
        let edge = match (mark.is_range_start, mark.is_range_end) {
            (true, true) => "start/end",
            (true, false) => "start",
            (false, true) => "end",
            (false, false) => "",
        };
        println!("   {} {}", day, edge);
    }
    print_quote("Daily", window.quote(location.price_per_hour, &config.pricing));

    window.set_mode(BookingMode::Hourly);
    if let (Some(from), Some(to)) = (
        NaiveTime::from_hms_opt(9, 0, 0),
        NaiveTime::from_hms_opt(11, 30, 0),
    ) {
        window.set_from_time(from);
        window.set_to_time(to);
    }
    print_quote("Hourly", window.quote(location.price_per_hour, &config.pricing));

    // Payment is handled elsewhere; a confirmed booking may leave a review
    store.add_review(
        &location.id,
        Review {
            id: format!("local-{}", Utc::now().timestamp_millis()),
            user: "Guest".to_string(),
            comment: "Smooth drop-off.".to_string(),
            rating: 5.0,
            created_at: Utc::now(),
        },
    );
    if let Some(updated) = store.get_by_id(&location.id) {
        println!(
            "{} now rated {:.1} ({} reviews)",
            updated.name,
            updated.rating(),
            updated.review_count()
        );
    }

    let json = serde_json::to_string_pretty(&*store.snapshot())?;
    tokio::fs::write("catalog_snapshot.json", json).await?;
    info!("💾 Saved catalog snapshot to catalog_snapshot.json");

    Ok(())
}

/// Fill the store from the configured source, falling back to the sample catalog
async fn populate(config: &AppConfig, store: &StoreHandle) -> anyhow::Result<()> {
    let sample = SampleCatalogSource::new();
    if config.use_sample_catalog {
        load_catalog(&sample, store).await?;
        return Ok(());
    }

    let http = HttpCatalogSource::with_query(
        config.api_base.clone(),
        config.nearby.clone(),
        config.request_timeout(),
    )?;
    if let Err(e) = load_catalog(&http, store).await {
        warn!("{} catalog unavailable: {:#}", http.source_name(), e);
        info!("Using sample data instead...");
        load_catalog(&sample, store).await?;
    }
    Ok(())
}

fn print_quote(label: &str, quote: Quote) {
    match quote {
        Quote::Priced {
            units,
            amount_cents,
            ..
        } => println!(
            "{} price: ${}.{:02} for {} units",
            label,
            amount_cents / 100,
            amount_cents % 100,
            units
        ),
        Quote::Pending => println!("{} price: pending selection", label),
        Quote::InvalidDuration => println!("{} price: no valid time range selected", label),
    }
}
