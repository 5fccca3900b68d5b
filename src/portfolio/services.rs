use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{AddEntryRequest, UsageResponse},
    model::{NewEntry, PortfolioEntry},
    store::PortfolioStore,
};
use crate::{
    error::AppError,
    session::{is_guest_id, Identity},
};

/// Holdings a guest may keep at once.
pub const GUEST_PORTFOLIO_LIMIT: i64 = 5;

/// Company analyses a guest may run. Counted client-side only; the server
/// just advertises it.
pub const GUEST_ANALYSIS_LIMIT: i64 = 5;

fn validate(owner_id: String, req: AddEntryRequest) -> Result<NewEntry, AppError> {
    let symbol = req.symbol.trim();
    if symbol.is_empty() {
        return Err(AppError::InvalidEntry("symbol is required".into()));
    }
    if req.quantity < 1 {
        return Err(AppError::InvalidEntry("quantity must be a positive integer".into()));
    }
    if !req.price.is_finite() || req.price <= 0.0 {
        return Err(AppError::InvalidEntry("price must be a positive number".into()));
    }
    Ok(NewEntry {
        owner_id,
        symbol: symbol.to_string(),
        quantity: req.quantity,
        price: req.price,
    })
}

/// Inserts a holding for `identity`, refusing guests already at the cap.
///
/// The count and the insert are separate store calls, so concurrent adds from
/// one guest can overshoot the cap slightly.
pub async fn add_entry(
    store: &dyn PortfolioStore,
    identity: &Identity,
    req: AddEntryRequest,
) -> Result<PortfolioEntry, AppError> {
    let owner_id = identity.owner_id();
    let entry = validate(owner_id.clone(), req)?;

    if identity.is_guest() {
        let existing = store.count(&owner_id).await?;
        if existing >= GUEST_PORTFOLIO_LIMIT {
            warn!(guest_id = %owner_id, existing, "guest portfolio limit reached");
            return Err(AppError::GuestLimitExceeded {
                limit: GUEST_PORTFOLIO_LIMIT,
            });
        }
    }

    let row = store.insert(entry).await?;
    info!(owner = %identity, entry_id = %row.id, symbol = %row.symbol, "portfolio entry added");
    Ok(row)
}

pub async fn list_entries(
    store: &dyn PortfolioStore,
    identity: &Identity,
) -> Result<Vec<PortfolioEntry>, AppError> {
    Ok(store.list(&identity.owner_id()).await?)
}

pub async fn remove_entry(
    store: &dyn PortfolioStore,
    identity: &Identity,
    id: Uuid,
) -> Result<PortfolioEntry, AppError> {
    let removed = store
        .delete_where(id, &identity.owner_id())
        .await?
        .ok_or(AppError::EntryNotFound)?;
    info!(owner = %identity, entry_id = %id, "portfolio entry removed");
    Ok(removed)
}

/// Moves every row owned by `guest_ref` to the account in `primary`.
///
/// Safe to repeat: once the rows are moved, later runs match nothing and
/// report zero.
pub async fn migrate_guest_portfolio(
    store: &dyn PortfolioStore,
    primary: &Identity,
    guest_ref: Option<&str>,
) -> Result<u64, AppError> {
    let account_id = match primary {
        Identity::Account(id) => *id,
        Identity::Guest(guest_id) => {
            warn!(guest_id = %guest_id, "migration attempted by guest");
            return Err(AppError::InvalidMigrationSource);
        }
    };

    let guest_id = guest_ref
        .map(str::trim)
        .filter(|g| is_guest_id(g))
        .ok_or(AppError::InvalidGuestReference)?;

    let migrated = store
        .update_owner_where(guest_id, &account_id.to_string())
        .await?;
    info!(guest_id = %guest_id, account_id = %account_id, migrated, "guest portfolio migrated");
    Ok(migrated)
}

pub async fn usage(
    store: &dyn PortfolioStore,
    identity: &Identity,
) -> Result<UsageResponse, AppError> {
    let entries = store.count(&identity.owner_id()).await?;
    let guest = identity.is_guest();
    Ok(UsageResponse {
        identity_kind: identity.kind(),
        entries,
        portfolio_limit: guest.then_some(GUEST_PORTFOLIO_LIMIT),
        remaining: guest.then(|| (GUEST_PORTFOLIO_LIMIT - entries).max(0)),
        analysis_limit: guest.then_some(GUEST_ANALYSIS_LIMIT),
    })
}
