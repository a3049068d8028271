// Calendar layout engine
// Prints the ranges and column layout of a set of items

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use calendar_engine::models::display_mode::DisplayMode;
use calendar_engine::models::item::ScheduledItem;
use calendar_engine::services::layout::{items_on_day, layout_view};
use calendar_engine::services::range::{compute_ranges, normalize_anchor};
use calendar_engine::services::settings::SettingsService;
use calendar_engine::utils::date::iso_week_number;

const USAGE: &str = "usage: calendar-engine <items.json> [day|work_week|week|month] [YYYY-MM-DD]";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(items_path) = args.first() else {
        bail!(USAGE);
    };

    let settings = SettingsService::with_default_path()
        .map(|service| service.load_or_default())
        .unwrap_or_default();

    let mode = match args.get(1) {
        Some(name) => name.parse::<DisplayMode>()?,
        None => settings.default_mode,
    };
    let anchor = match args.get(2) {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("Invalid anchor date '{text}'"))?,
        None => Local::now().date_naive(),
    };
    let anchor = normalize_anchor(mode, anchor);

    let content = fs::read_to_string(items_path)
        .with_context(|| format!("Failed to read items from {items_path}"))?;
    let items: Vec<ScheduledItem> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse items in {items_path}"))?;
    log::info!("Loaded {} items from {}", items.len(), items_path);

    let ranges = compute_ranges(mode, anchor)?;
    println!("{mode} at {anchor}");
    println!("  exact {} .. {}", ranges.exact.from, ranges.exact.to);
    println!("  view  {} .. {} ({} days)", ranges.view.from, ranges.view.to, ranges.view.num_days());

    for (day, slots) in layout_view(mode, ranges.view, &items) {
        let on_day = items_on_day(day, &items);
        if on_day.is_empty() {
            continue;
        }
        println!("{day} (week {})", iso_week_number(day));
        for item in on_day {
            match slots.get(&item.id) {
                Some(slot) => println!(
                    "  {} {} [{}/{}]",
                    item.id, item.title, slot.column, slot.column_count
                ),
                None => println!("  {} {}", item.id, item.title),
            }
        }
    }

    Ok(())
}
