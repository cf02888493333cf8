use tracing::{debug, instrument};

use crate::api::Api;
use crate::error::Result;
use crate::model::{Referee, RefereeDraft};

#[instrument(skip(api))]
pub(crate) async fn list_referees(api: &Api<'_>) -> Result<Vec<Referee>> {
    let referees: Vec<Referee> = api.get_json("/referees", &[]).await?;
    debug!(count = referees.len(), "fetched referees");
    Ok(referees)
}

#[instrument(skip(api, draft))]
pub(crate) async fn create_referee(api: &Api<'_>, draft: &RefereeDraft) -> Result<Referee> {
    api.post_json("/referees", draft).await
}

#[instrument(skip(api, draft))]
pub(crate) async fn update_referee(
    api: &Api<'_>,
    referee_id: u32,
    draft: &RefereeDraft,
) -> Result<Referee> {
    api.put_json(&format!("/referees/{referee_id}"), draft).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_referee(api: &Api<'_>, referee_id: u32) -> Result<()> {
    api.delete(&format!("/referees/{referee_id}")).await
}
