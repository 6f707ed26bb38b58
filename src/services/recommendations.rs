/// Recommendation aggregation over a paginated project source
///
/// Gathers candidate records across pages, keeps the active ones, and returns
/// a bounded random selection. When nothing is active, already-fetched
/// completed projects are offered instead; an empty backend yields an empty
/// result, never an error.
use crate::{
    error::ClientResult,
    models::ProjectRecord,
    services::{providers::ProjectSource, shuffle},
};
use std::sync::Arc;

/// Recommendation set size used when the caller has no preference
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 6;

/// Pages fetched up front, page 1 included
const PAGE_CAP: u32 = 5;
/// Further pages the sequential strategy may try on an active-pool shortfall
const SHORTFALL_EXTRA_PAGES: u32 = 3;

/// Page-selection policy for a recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Walk pages in order from the front, extending the walk only when the
    /// active pool comes up short.
    #[default]
    Sequential,
    /// Draw a uniform sample of pages so deep backends contribute records
    /// beyond their first few pages.
    Sampled,
}

pub struct Recommender {
    source: Arc<dyn ProjectSource>,
}

impl Recommender {
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        Self { source }
    }

    /// Produce up to `max_count` randomly selected active projects.
    ///
    /// Page 1 is always fetched first to learn the page count; its failure is
    /// the only one surfaced. Every other page failure just contributes zero
    /// records. The result length is `min(max_count, pool)`; zero-length
    /// results are a valid outcome.
    pub async fn recommend(
        &self,
        max_count: usize,
        strategy: Strategy,
    ) -> ClientResult<Vec<ProjectRecord>> {
        if max_count == 0 {
            return Ok(Vec::new());
        }

        let first = self.source.fetch_page(1).await?;
        let max_page = first.max_page.max(1);

        tracing::info!(
            max_page,
            total = first.count,
            strategy = ?strategy,
            "Starting recommendation aggregation"
        );

        let mut fetched = first.records;
        match strategy {
            Strategy::Sequential => {
                let last_upfront = max_page.min(PAGE_CAP);
                let batch = self.fetch_batch((2..=last_upfront).collect()).await;
                fetched.extend(batch);

                // Not enough active candidates yet and pages remain: extend
                // the walk by a bounded number of pages, then give up.
                let active_so_far = fetched.iter().filter(|r| r.is_active()).count();
                if active_so_far < max_count && last_upfront < max_page {
                    let last_extra = (last_upfront + SHORTFALL_EXTRA_PAGES).min(max_page);
                    tracing::debug!(
                        active = active_so_far,
                        wanted = max_count,
                        from = last_upfront + 1,
                        to = last_extra,
                        "Active pool short, fetching additional pages"
                    );
                    let extra = self.fetch_batch((last_upfront + 1..=last_extra).collect()).await;
                    fetched.extend(extra);
                }
            }
            Strategy::Sampled => {
                // Page 1 is already in hand, so sample the remaining budget
                // from the rest of the range. Small backends are read whole.
                let pages = if max_page <= PAGE_CAP {
                    (2..=max_page).collect()
                } else {
                    shuffle::sample_pages(2, max_page, (PAGE_CAP - 1) as usize)
                };
                tracing::debug!(?pages, "Sampled pages to fetch");
                let batch = self.fetch_batch(pages).await;
                fetched.extend(batch);
            }
        }

        Ok(self.select(fetched, max_count))
    }

    /// Fetches the given pages concurrently. A failed page is logged and
    /// contributes nothing; it never aborts the aggregation.
    pub(crate) async fn fetch_batch(&self, pages: Vec<u32>) -> Vec<ProjectRecord> {
        let mut tasks = Vec::with_capacity(pages.len());

        for page in pages {
            let source = Arc::clone(&self.source);
            let task = tokio::spawn(async move { source.fetch_page(page).await });
            tasks.push((page, task));
        }

        let mut records = Vec::new();
        for (page, task) in tasks {
            match task.await {
                Ok(Ok(result)) => {
                    tracing::debug!(page, records = result.records.len(), "Page fetched");
                    records.extend(result.records);
                }
                Ok(Err(e)) => {
                    tracing::warn!(page, error = %e, "Page fetch failed, skipping");
                }
                Err(e) => {
                    tracing::warn!(page, error = %e, "Page fetch task failed, skipping");
                }
            }
        }

        records
    }

    /// Shuffle-and-truncate over the active pool, falling back to completed
    /// records when no active project exists anywhere in the fetched set.
    fn select(&self, fetched: Vec<ProjectRecord>, max_count: usize) -> Vec<ProjectRecord> {
        let active: Vec<ProjectRecord> =
            fetched.iter().filter(|r| r.is_active()).cloned().collect();

        let pool = if active.is_empty() {
            let completed: Vec<ProjectRecord> = fetched
                .iter()
                .filter(|r| r.is_completed())
                .cloned()
                .collect();
            if !completed.is_empty() {
                tracing::info!(
                    completed = completed.len(),
                    "No active projects, falling back to completed ones"
                );
            }
            completed
        } else {
            active
        };

        if pool.is_empty() {
            tracing::info!("No candidate projects available");
            return Vec::new();
        }

        let mut selected = shuffle::shuffle(&pool);
        selected.truncate(max_count);

        tracing::info!(
            selected = selected.len(),
            pool = pool.len(),
            "Recommendations selected"
        );

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ClientError,
        models::{ProjectPage, DEFAULT_PER_PAGE},
        services::providers::MockProjectSource,
    };
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn record(id: &str, status: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            project_id: id.to_string(),
            title: Some(format!("Project {}", id)),
            description: None,
            categories: None,
            status: status.map(str::to_string),
            start_date: None,
            end_date: None,
        }
    }

    fn page(number: u32, max_page: u32, records: Vec<ProjectRecord>) -> ProjectPage {
        let count = records.len() as u64;
        ProjectPage {
            records,
            page: number,
            per_page: DEFAULT_PER_PAGE,
            max_page,
            count,
        }
    }

    fn backend_down() -> ClientError {
        ClientError::Api {
            status: 503,
            body: "backend unavailable".to_string(),
        }
    }

    fn ids(records: &[ProjectRecord]) -> HashSet<String> {
        records.iter().map(|r| r.project_id.clone()).collect()
    }

    #[tokio::test]
    async fn test_single_page_returns_all_active_records() {
        let mut source = MockProjectSource::new();
        source
            .expect_fetch_page()
            .times(1)
            .returning(|_| {
                Ok(page(
                    1,
                    1,
                    vec![
                        record("p-1", Some("OPEN")),
                        record("p-2", Some("IN_PROGRESS")),
                        record("p-3", None),
                        record("p-4", Some("OPEN")),
                        record("p-5", Some("open")),
                    ],
                ))
            });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(
            ids(&result),
            HashSet::from([
                "p-1".to_string(),
                "p-2".to_string(),
                "p-3".to_string(),
                "p-4".to_string(),
                "p-5".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_result_truncated_to_max_count() {
        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(|_| {
            let records = (0..10)
                .map(|i| record(&format!("p-{}", i), Some("OPEN")))
                .collect();
            Ok(page(1, 1, records))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        assert_eq!(result.len(), 6);
        // Every selected record must come from the pool, without repeats.
        assert_eq!(ids(&result).len(), 6);
    }

    #[tokio::test]
    async fn test_first_page_failure_propagates_without_further_fetches() {
        let mut source = MockProjectSource::new();
        source
            .expect_fetch_page()
            .times(1)
            .returning(|_| Err(backend_down()));

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await;

        assert!(matches!(result, Err(ClientError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_non_first_page_failure_contributes_nothing() {
        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(|page_number| match page_number {
            1 => Ok(page(1, 3, vec![record("p-1", Some("OPEN"))])),
            2 => Err(backend_down()),
            3 => Ok(page(3, 3, vec![record("p-3", Some("OPEN"))])),
            _ => panic!("unexpected page {}", page_number),
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        assert_eq!(
            ids(&result),
            HashSet::from(["p-1".to_string(), "p-3".to_string()])
        );
    }

    #[tokio::test]
    async fn test_fallback_to_completed_records() {
        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(|_| {
            Ok(page(
                1,
                1,
                vec![
                    record("p-1", Some("COMPLETED")),
                    record("p-2", Some("completed")),
                ],
            ))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.is_completed()));
    }

    #[tokio::test]
    async fn test_empty_backend_yields_empty_result() {
        let mut source = MockProjectSource::new();
        source
            .expect_fetch_page()
            .returning(|_| Ok(page(1, 1, vec![])));

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_zero_max_count_short_circuits() {
        let mut source = MockProjectSource::new();
        source.expect_fetch_page().times(0);

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(0, Strategy::Sequential).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_shortfall_extends_to_at_most_eight_pages() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(move |page_number| {
            seen.lock().unwrap().push(page_number);
            // One active record per page, never enough to satisfy the
            // request, over a deep backend.
            Ok(page(
                page_number,
                20,
                vec![record(&format!("p-{}", page_number), Some("OPEN"))],
            ))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender
            .recommend(50, Strategy::Sequential)
            .await
            .unwrap();

        let mut pages_fetched = calls.lock().unwrap().clone();
        pages_fetched.sort_unstable();
        assert_eq!(pages_fetched, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(result.len(), 8);
    }

    #[tokio::test]
    async fn test_sequential_no_extension_when_enough_active() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(move |page_number| {
            seen.lock().unwrap().push(page_number);
            let records = (0..10)
                .map(|i| record(&format!("p-{}-{}", page_number, i), Some("OPEN")))
                .collect();
            Ok(page(page_number, 20, records))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        let mut pages_fetched = calls.lock().unwrap().clone();
        pages_fetched.sort_unstable();
        assert_eq!(pages_fetched, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.len(), 6);
    }

    #[tokio::test]
    async fn test_sampled_deep_backend_stays_within_page_budget() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(move |page_number| {
            seen.lock().unwrap().push(page_number);
            Ok(page(
                page_number,
                40,
                vec![record(&format!("p-{}", page_number), Some("OPEN"))],
            ))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sampled).await.unwrap();

        let pages_fetched = calls.lock().unwrap().clone();
        assert_eq!(pages_fetched.len(), 5);
        assert_eq!(pages_fetched[0], 1);
        let unique: HashSet<u32> = pages_fetched.iter().copied().collect();
        assert_eq!(unique.len(), 5);
        assert!(pages_fetched[1..].iter().all(|p| (2..=40).contains(p)));
        assert_eq!(result.len(), 5);
    }

    #[tokio::test]
    async fn test_sampled_small_backend_reads_every_page() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(move |page_number| {
            seen.lock().unwrap().push(page_number);
            Ok(page(
                page_number,
                3,
                vec![record(&format!("p-{}", page_number), Some("OPEN"))],
            ))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sampled).await.unwrap();

        let mut pages_fetched = calls.lock().unwrap().clone();
        pages_fetched.sort_unstable();
        assert_eq!(pages_fetched, vec![1, 2, 3]);
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_active_records_preferred_over_completed() {
        let mut source = MockProjectSource::new();
        source.expect_fetch_page().returning(|_| {
            Ok(page(
                1,
                1,
                vec![
                    record("p-done-1", Some("COMPLETED")),
                    record("p-open", Some("OPEN")),
                    record("p-done-2", Some("COMPLETED")),
                ],
            ))
        });

        let recommender = Recommender::new(Arc::new(source));
        let result = recommender.recommend(6, Strategy::Sequential).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].project_id, "p-open");
    }
}
