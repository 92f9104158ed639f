use ranking::{RankingTable, build_table};
use upstream::ProgramService;

use crate::error::WebError;

/// Fetch the four collections and join them into the ranked table.
/// All four fetches must succeed; a single failure fails the request.
pub async fn load_table(
    service: &dyn ProgramService,
    program: &str,
) -> Result<RankingTable, WebError> {
    let snapshot = service.fetch_snapshot(program).await?;
    let today = chrono::Local::now().date_naive();

    Ok(build_table(
        snapshot.program,
        snapshot.students,
        snapshot.reports,
        snapshot.rounds,
        today,
        service.caller(),
    ))
}
