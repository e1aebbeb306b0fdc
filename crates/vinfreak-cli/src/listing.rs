//! Listing command handlers for the CLI.
//!
//! Each handler owns its output: a fixed-width table by default, JSON when
//! asked. Errors from the listing API are returned to `main` except in
//! `browse`, which reports them the way the results grid does and stops.

use chrono::NaiveDateTime;
use vinfreak_client::{CarsClient, ListingController, LoadState, VehicleCard};
use vinfreak_core::{FilterState, PagingRequest, Vehicle};

/// Chooses window paging when `--limit` or `--offset` is given, page paging otherwise.
pub(crate) fn paging_for_search(
    page: Option<u32>,
    page_size: u32,
    limit: Option<u32>,
    offset: Option<u32>,
) -> PagingRequest {
    if limit.is_some() || offset.is_some() {
        PagingRequest::window(limit, offset)
    } else {
        PagingRequest::pages(page.unwrap_or(1), page_size)
    }
}

/// Fetch and print one page.
///
/// # Errors
///
/// Returns an error if the request fails or the page cannot be serialized.
pub(crate) async fn run_search(
    client: &CarsClient,
    filters: &FilterState,
    paging: &PagingRequest,
    json: bool,
) -> anyhow::Result<()> {
    let page = client.fetch_page(filters, paging).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page.to_envelope()?)?);
        return Ok(());
    }

    if page.is_empty() {
        println!("no vehicles found");
        return Ok(());
    }
    print_table(&page.items);
    println!();
    println!(
        "page {} ({} per page): {}",
        page.page,
        page.page_size,
        showing(page.items.len(), page.total)
    );
    Ok(())
}

/// Fetch every page and print the combined list.
///
/// # Errors
///
/// Returns an error if any page request fails.
pub(crate) async fn run_all(
    client: &CarsClient,
    filters: &FilterState,
    page_size: u32,
    json: bool,
) -> anyhow::Result<()> {
    if filters.is_unconstrained() {
        eprintln!("no filters given; fetching {}", scope(filters));
    }
    let vehicles = client.fetch_all(filters, page_size).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&vehicles)?);
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("no vehicles found");
        return Ok(());
    }
    print_table(&vehicles);
    println!();
    println!("{} vehicles", vehicles.len());
    Ok(())
}

/// Drive a listing session: first page, then "load more" until everything is
/// shown or `max_pages` pages have been loaded.
///
/// # Errors
///
/// Never fails on API errors; they are printed as an error banner. The
/// `Result` is kept for symmetry with the other handlers.
pub(crate) async fn run_browse(
    client: &CarsClient,
    filters: FilterState,
    page_size: u32,
    max_pages: u32,
) -> anyhow::Result<()> {
    println!("Browsing {}", scope(&filters));
    let mut session = ListingController::with_filters(filters, page_size);
    session.mount(client).await;
    let mut pages_loaded = 1;

    loop {
        if let LoadState::Error(message) = session.state() {
            eprintln!("Error: {message}");
            if !session.items().is_empty() {
                println!("{}", showing(session.items().len(), session.total()));
            }
            return Ok(());
        }

        let already_shown = session.items().len();
        println!("{}", showing(already_shown, session.total()));

        if !session.can_load_more() || pages_loaded >= max_pages {
            break;
        }
        session.load_more(client).await;
        pages_loaded += 1;

        if session.items().len() == already_shown && session.error().is_none() {
            // server returned an empty page while claiming more exist
            break;
        }
    }

    if !session.items().is_empty() {
        println!();
        print_table(session.items());
    }
    if session.can_load_more() && session.total() > 0 {
        println!();
        println!(
            "more available; next page is {}, rerun with a larger --pages",
            session.next_page()
        );
    }
    Ok(())
}

/// Print a single vehicle as a card.
///
/// # Errors
///
/// Returns an error if neither an id nor a VIN is given or the lookup fails.
pub(crate) async fn run_show(
    client: &CarsClient,
    id: Option<&str>,
    vin: Option<&str>,
) -> anyhow::Result<()> {
    let vehicle = match (id, vin) {
        (_, Some(vin)) => client.get_car_by_vin(vin).await?,
        (Some(id), None) => client.get_car(id).await?,
        (None, None) => anyhow::bail!("pass a record id or --vin"),
    };

    let card = VehicleCard::from_vehicle(&vehicle);
    let marker = if card.is_cars_and_bids {
        " [Cars & Bids]"
    } else {
        ""
    };
    println!("{}{marker}", card.title);
    println!("  price:    {}", card.price);
    println!(
        "  mileage:  {}",
        card.mileage.as_deref().unwrap_or(vinfreak_client::card::MISSING)
    );
    println!(
        "  location: {}",
        card.location.as_deref().unwrap_or(vinfreak_client::card::MISSING)
    );
    if let Some(vin) = vehicle.vin.as_deref() {
        println!("  vin:      {vin}");
    }
    if let Some(status) = vehicle.auction_status.as_deref() {
        println!("  status:   {status}");
    }
    println!("  posted:   {}", fmt_date(vehicle.posted_at));
    if let Some(href) = card.href.as_deref() {
        println!("  link:     {href}");
    }
    if let Some(image) = card.image.as_deref() {
        println!("  image:    {image}");
    }
    Ok(())
}

/// What a listing command is about to cover.
pub(crate) fn scope(filters: &FilterState) -> &'static str {
    if filters.is_unconstrained() {
        "every listing"
    } else {
        "matching listings"
    }
}

/// `"Showing 24 / 130 cars"`, or without the total when it is unknown.
pub(crate) fn showing(shown: usize, total: u64) -> String {
    if total > 0 {
        format!("Showing {shown} / {total} cars")
    } else {
        format!("Showing {shown} cars")
    }
}

fn print_table(vehicles: &[Vehicle]) {
    let header = format!(
        "{:<10}{:<40}{:<22}{:<14}{:<16}POSTED",
        "ID", "TITLE", "LOCATION", "MILEAGE", "PRICE"
    );
    println!("{header}");
    for vehicle in vehicles {
        let card = VehicleCard::from_vehicle(vehicle);
        let id = vehicle
            .id
            .as_ref()
            .map_or_else(|| vinfreak_client::card::MISSING.to_string(), ToString::to_string);
        let title = if card.is_cars_and_bids {
            format!("{} [C&B]", card.title)
        } else {
            card.title
        };
        println!(
            "{:<10}{:<40}{:<22}{:<14}{:<16}{}",
            truncate(&id, 9),
            truncate(&title, 39),
            truncate(
                card.location.as_deref().unwrap_or(vinfreak_client::card::MISSING),
                21
            ),
            card.mileage.as_deref().unwrap_or(vinfreak_client::card::MISSING),
            card.price,
            fmt_date(vehicle.posted_at)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Format an optional timestamp as a date, returning `"—"` when `None`.
fn fmt_date(date: Option<NaiveDateTime>) -> String {
    date.map_or_else(
        || vinfreak_client::card::MISSING.to_string(),
        |d| d.format("%Y-%m-%d").to_string(),
    )
}
