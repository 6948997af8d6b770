use crate::models::{
    error::AppError,
    measurement::{MeasurementQuery, MeasurementResult, SlotMeasurement},
};
use crate::services::api::OpenAqClient;
use crate::state::ComparisonRequest;
use futures::future::join_all;
use std::future::Future;

/// Looks up the latest measurement for every slot of `request` concurrently.
///
/// # Arguments
///
/// * `request` - A validated comparison, one query per slot
/// * `fetch` - A closure issuing a single lookup; `Ok(None)` means upstream had no record
///
/// # Returns
///
/// One measurement per slot in slot order, or the error that sank the batch
///
/// # Behavior
///
/// - Every lookup is awaited before anything is decided
/// - The first failed lookup in slot order fails the whole batch
/// - Slots without a record produce a single `AppError::NoData` naming all of them
/// - Results are published all-or-nothing
pub async fn run_comparison<F, Fut>(
    request: &ComparisonRequest,
    fetch: F,
) -> Result<Vec<SlotMeasurement>, AppError>
where
    F: Fn(MeasurementQuery) -> Fut,
    Fut: Future<Output = Result<Option<MeasurementResult>, AppError>>,
{
    let lookups = request.queries().iter().map(|query| {
        let slot = query.slot;
        let lookup = fetch(query.clone());
        async move { (slot, lookup.await) }
    });

    let mut settled = join_all(lookups).await;
    settled.sort_by_key(|(slot, _)| *slot);

    let mut published = Vec::with_capacity(settled.len());
    let mut missing = Vec::new();

    for (slot, outcome) in settled {
        match outcome? {
            Some(measurement) => published.push(SlotMeasurement { slot, measurement }),
            None => missing.push(slot),
        }
    }

    if !missing.is_empty() {
        return Err(AppError::NoData {
            slots: missing,
            parameter: request.parameter().to_string(),
        });
    }

    Ok(published)
}

/// Runs a comparison against the live API using default configuration.
pub async fn compare_latest(request: &ComparisonRequest) -> Result<Vec<SlotMeasurement>, AppError> {
    let client = OpenAqClient::new()?;

    run_comparison(request, |query| {
        let client = client.clone();
        async move { client.fetch_latest_measurement(&query).await }
    })
    .await
}
