use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::Api;
use crate::error::Result;
use crate::filter::FilterState;
use crate::model::{BestOf, GameScore, Match, MatchDraft, MatchSummary, Page};

#[instrument(skip(api, filters))]
pub(crate) async fn list_matches(
    api: &Api<'_>,
    filters: &FilterState,
) -> Result<Page<MatchSummary>> {
    let page: Page<MatchSummary> = api.get_json("/matches", &filters.query_pairs()).await?;
    debug!(
        items = page.items.len(),
        page = page.page,
        total = page.total_items,
        "fetched match list"
    );
    Ok(page)
}

#[instrument(skip(api))]
pub(crate) async fn get_match(api: &Api<'_>, match_id: u32) -> Result<Match> {
    api.get_json(&format!("/matches/{match_id}"), &[]).await
}

#[instrument(skip(api, draft))]
pub(crate) async fn create_match(api: &Api<'_>, draft: &MatchDraft) -> Result<Match> {
    api.post_json("/matches", draft).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_match(api: &Api<'_>, match_id: u32) -> Result<()> {
    api.delete(&format!("/matches/{match_id}")).await
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScorePayload<'a> {
    games: &'a [GameScore],
    completed: bool,
}

/// The score endpoint is format-specific: the route names the format the
/// payload must satisfy.
fn score_path(match_id: u32, best_of: BestOf) -> String {
    format!("/matches/{match_id}/score/{}", best_of.route_segment())
}

#[instrument(skip(api, games))]
pub(crate) async fn update_score(
    api: &Api<'_>,
    match_id: u32,
    best_of: BestOf,
    games: &[GameScore],
    completed: bool,
) -> Result<Match> {
    let updated: Match = api
        .put_json(&score_path(match_id, best_of), &ScorePayload { games, completed })
        .await?;
    debug!(match_id, games = games.len(), completed, "score submitted");
    Ok(updated)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignPayload {
    referee_id: u32,
}

#[instrument(skip(api))]
pub(crate) async fn assign_referee(api: &Api<'_>, match_id: u32, referee_id: u32) -> Result<()> {
    api.put_no_content(
        &format!("/matches/{match_id}/referee"),
        &AssignPayload { referee_id },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_route_embeds_the_format() {
        assert_eq!(score_path(17, BestOf::Five), "/matches/17/score/best-of-5");
        assert_eq!(score_path(3, BestOf::One), "/matches/3/score/best-of-1");
    }

    #[test]
    fn score_payload_serializes_camel_case() {
        let games = [GameScore {
            number: 1,
            home: 25,
            away: 19,
        }];
        let json = serde_json::to_value(ScorePayload {
            games: &games,
            completed: true,
        })
        .unwrap();
        assert_eq!(json["completed"], true);
        assert_eq!(json["games"][0]["home"], 25);
    }

    #[test]
    fn assign_payload_names_the_referee() {
        let json = serde_json::to_value(AssignPayload { referee_id: 8 }).unwrap();
        assert_eq!(json["refereeId"], 8);
    }
}
