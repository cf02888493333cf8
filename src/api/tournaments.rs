use tracing::{debug, instrument};

use crate::api::Api;
use crate::error::Result;
use crate::model::{FilterOptions, Tournament};

#[instrument(skip(api))]
pub(crate) async fn list_tournaments(api: &Api<'_>) -> Result<Vec<Tournament>> {
    let tournaments: Vec<Tournament> = api.get_json("/tournaments", &[]).await?;
    debug!(count = tournaments.len(), "fetched tournaments");
    Ok(tournaments)
}

#[instrument(skip(api))]
pub(crate) async fn filter_options(api: &Api<'_>, tournament_id: u32) -> Result<FilterOptions> {
    api.get_json(&format!("/tournaments/{tournament_id}/filter-options"), &[])
        .await
}
