// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Client-side listing queries: filtering, sold statistics, and per-seller grouping.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::models::listing::{Listing, ListingStatus, PostedBy, SubAdmin};

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: f64 = 10_000_000.0;

/// Status facet of the listing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Sold,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [Self::All, Self::Available, Self::Sold];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All statuses",
            Self::Available => "Available",
            Self::Sold => "Sold",
        }
    }

    fn matches(self, status: ListingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Available => status == ListingStatus::Available,
            Self::Sold => status == ListingStatus::Sold,
        }
    }
}

/// Search and facet state shared by the listing screens.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingFilter {
    pub search: String,
    pub status: StatusFilter,
    /// Poster role to keep; `None` keeps every role.
    pub role: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            role: None,
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        let needle = self.search.trim().to_lowercase();
        let search_ok = needle.is_empty()
            || listing.title.to_lowercase().contains(&needle)
            || listing
                .posted_by
                .as_ref()
                .and_then(PostedBy::username)
                .is_some_and(|u| u.to_lowercase().contains(&needle));

        let role_ok = match &self.role {
            None => true,
            Some(role) => listing
                .role
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case(role)),
        };

        search_ok
            && role_ok
            && self.status.matches(listing.status)
            && listing.price >= self.min_price
            && listing.price <= self.max_price
    }

    /// Listings passing the filter, in their original order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Distinct poster roles present in `listings`, sorted for the role picker.
pub fn roles_in(listings: &[Listing]) -> Vec<String> {
    let mut roles: Vec<String> = listings.iter().filter_map(|l| l.role.clone()).collect();
    roles.sort();
    roles.dedup();
    roles
}

/// Summary figures for the sold-listings dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SoldStats {
    pub total: usize,
    pub revenue: f64,
    pub today: usize,
    pub last_week: usize,
    pub last_month: usize,
}

/// When a listing was marked sold: `updatedAt`, falling back to `createdAt`.
pub fn sold_at(listing: &Listing) -> Option<OffsetDateTime> {
    listing
        .updated_at
        .as_deref()
        .or(listing.created_at.as_deref())
        .and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok())
}

/// Compute sold statistics relative to `now`. Day boundaries follow `now`'s offset.
pub fn sold_stats(listings: &[Listing], now: OffsetDateTime) -> SoldStats {
    let offset = now.offset();
    let today = PrimitiveDateTime::new(now.date(), Time::MIDNIGHT).assume_offset(offset);
    let week_ago = today - Duration::days(7);
    let month_ago =
        PrimitiveDateTime::new(same_day_previous_month(now.date()), Time::MIDNIGHT).assume_offset(offset);

    let mut stats = SoldStats::default();
    for listing in listings.iter().filter(|l| l.is_sold()) {
        stats.total += 1;
        stats.revenue += listing.price;
        if let Some(at) = sold_at(listing) {
            if at >= today {
                stats.today += 1;
            }
            if at >= week_ago {
                stats.last_week += 1;
            }
            if at >= month_ago {
                stats.last_month += 1;
            }
        }
    }
    stats
}

/// Current time in the local UTC offset (UTC when the offset is unknown).
pub fn local_now() -> OffsetDateTime {
    let seconds = chrono::Local::now().offset().local_minus_utc();
    let offset = UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset)
}

/// Sale date as `YYYY-MM-DD` in the offset of `reference`.
pub fn sold_on_label(listing: &Listing, reference: UtcOffset) -> Option<String> {
    let at = sold_at(listing)?.to_offset(reference);
    at.format(format_description!("[year]-[month]-[day]")).ok()
}

/// Same calendar day one month earlier, clamped to the end of shorter months.
fn same_day_previous_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        other => (date.year(), other.previous()),
    };
    let day = date.day().min(time::util::days_in_month(month, year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

/// Listings posted by each sub-admin, in sub-admin order.
pub fn group_by_subadmin<'a>(
    subadmins: &'a [SubAdmin],
    listings: &'a [Listing],
) -> Vec<(&'a SubAdmin, Vec<&'a Listing>)> {
    subadmins
        .iter()
        .map(|sub| {
            let posted = listings
                .iter()
                .filter(|l| {
                    l.role.as_deref() == Some("SubAdmin")
                        && l.posted_by.as_ref().map(PostedBy::id) == Some(sub.id.as_str())
                })
                .collect();
            (sub, posted)
        })
        .collect()
}

/// Validate the price range inputs of the filter panel.
pub fn parse_price_bound(raw: &str, fallback: f64) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(fallback);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("'{raw}' is not a valid price.")),
    }
}
