use tracing::{debug, instrument};

use crate::api::Api;
use crate::error::Result;
use crate::model::{Venue, VenueDraft};

#[instrument(skip(api))]
pub(crate) async fn list_venues(api: &Api<'_>) -> Result<Vec<Venue>> {
    let venues: Vec<Venue> = api.get_json("/venues", &[]).await?;
    debug!(count = venues.len(), "fetched venues");
    Ok(venues)
}

#[instrument(skip(api, draft))]
pub(crate) async fn create_venue(api: &Api<'_>, draft: &VenueDraft) -> Result<Venue> {
    api.post_json("/venues", draft).await
}

#[instrument(skip(api, draft))]
pub(crate) async fn update_venue(api: &Api<'_>, venue_id: u32, draft: &VenueDraft) -> Result<Venue> {
    api.put_json(&format!("/venues/{venue_id}"), draft).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_venue(api: &Api<'_>, venue_id: u32) -> Result<()> {
    api.delete(&format!("/venues/{venue_id}")).await
}
