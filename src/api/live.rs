use tracing::{debug, instrument};

use crate::api::Api;
use crate::error::Result;
use crate::model::LiveScoreUpdate;

#[instrument(skip(api, update))]
pub(crate) async fn post_live_score(api: &Api<'_>, update: &LiveScoreUpdate) -> Result<()> {
    api.post_no_content("/live/scores", update).await?;
    debug!(
        match_id = update.match_id,
        games = update.games.len(),
        "live score posted"
    );
    Ok(())
}
