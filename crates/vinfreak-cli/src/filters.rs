use clap::Args;
use rust_decimal::Decimal;
use vinfreak_core::{FilterState, SortOrder};

/// Search filters shared by every listing subcommand.
///
/// Omitted flags, empty strings and zero values all mean "no constraint".
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    /// Free-text search
    #[arg(long)]
    pub q: Option<String>,
    #[arg(long)]
    pub vin: Option<String>,
    #[arg(long)]
    pub make: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub year_min: Option<i32>,
    #[arg(long)]
    pub year_max: Option<i32>,
    #[arg(long)]
    pub price_min: Option<Decimal>,
    #[arg(long)]
    pub price_max: Option<Decimal>,
    #[arg(long)]
    pub mileage_min: Option<u64>,
    #[arg(long)]
    pub mileage_max: Option<u64>,
    /// Marketplace tag (e.g. carsandbids)
    #[arg(long)]
    pub source: Option<String>,
    /// price_asc, price_desc, year_asc, year_desc, mileage_asc or mileage_desc
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

impl FilterArgs {
    pub(crate) fn into_filter_state(self) -> FilterState {
        FilterState {
            q: self.q,
            vin: self.vin,
            make: self.make,
            model: self.model,
            year_min: self.year_min,
            year_max: self.year_max,
            price_min: self.price_min,
            price_max: self.price_max,
            mileage_min: self.mileage_min,
            mileage_max: self.mileage_max,
            source: self.source,
            sort: self.sort,
        }
    }
}
