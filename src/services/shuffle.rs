use rand::Rng;

/// Returns a uniformly random permutation of `items`.
///
/// Fisher–Yates over a copy; the caller's slice is never reordered.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = rand::thread_rng();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Draws up to `k` distinct page numbers uniformly from `first..=last`.
///
/// Partial Fisher–Yates: only the first `k` slots are settled, so this stays
/// linear in the page range and never retries. Returns the whole range when
/// it holds fewer than `k` pages.
pub fn sample_pages(first: u32, last: u32, k: usize) -> Vec<u32> {
    if first > last {
        return Vec::new();
    }
    let mut pages: Vec<u32> = (first..=last).collect();
    let take = k.min(pages.len());
    let mut rng = rand::thread_rng();
    for i in 0..take {
        let j = rng.gen_range(i..pages.len());
        pages.swap(i, j);
    }
    pages.truncate(take);
    pages
}
