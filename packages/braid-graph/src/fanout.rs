use std::future::Future;

use futures::{StreamExt, stream};

/// Bounded parallel map over a list of independent work items. Branches run
/// concurrently up to `concurrency`; the output preserves input order no
/// matter which branch completes first.
pub async fn map_ordered<T, R, F, Fut>(items: Vec<T>, concurrency: usize, f: F) -> Vec<R>
where
	F: Fn(T) -> Fut,
	Fut: Future<Output = R>,
{
	let tasks = items.into_iter().enumerate().map(|(index, item)| {
		let branch = f(item);

		async move { (index, branch.await) }
	});
	let mut tagged =
		stream::iter(tasks).buffer_unordered(concurrency.max(1)).collect::<Vec<_>>().await;

	tagged.sort_by_key(|(index, _)| *index);

	tagged.into_iter().map(|(_, result)| result).collect()
}
