//! Per-group evaluation, e.g. one score per store or per promo flag
//!
//! Observations are partitioned by a key sequence that runs parallel to the
//! actual and predicted values. Groups are scored independently; once there
//! are at least [`MetricsConfig::parallel_min_groups`] of them the work is
//! spread over rayon's thread pool.

use crate::config::MetricsConfig;
use crate::error::{check_same_len, Result};
use crate::metrics::regression::{self, empty_input};
use crate::metrics::report::{self, MetricReport};
use num_traits::Float;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Reports keyed by group, in ascending key order
pub type GroupedReport<K> = BTreeMap<K, MetricReport>;

/// Values of one group, in their original order
struct Group<F> {
    actual: Vec<F>,
    predicted: Vec<F>,
}

fn partition<K, F>(keys: &[K], actual: &[F], predicted: &[F]) -> Vec<(K, Group<F>)>
where
    K: Hash + Eq + Clone,
    F: Float,
{
    let mut groups: HashMap<K, Group<F>> = HashMap::new();
    for ((key, &a), &p) in keys.iter().zip(actual.iter()).zip(predicted.iter()) {
        let group = groups.entry(key.clone()).or_insert_with(|| Group {
            actual: Vec::new(),
            predicted: Vec::new(),
        });
        group.actual.push(a);
        group.predicted.push(p);
    }
    groups.into_iter().collect()
}

/// Scores every group with `metric` and collects the results by key
fn apply_by_group<K, F, T, M>(
    name: &str,
    keys: &[K],
    actual: &[F],
    predicted: &[F],
    config: &MetricsConfig,
    metric: M,
) -> Result<BTreeMap<K, T>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
    T: Send,
    M: Fn(&[F], &[F]) -> Result<T> + Send + Sync,
{
    check_same_len(keys.len(), actual.len())?;
    check_same_len(actual.len(), predicted.len())?;
    if empty_input::<F>(name, keys.len(), config)?.is_some() {
        return Ok(BTreeMap::new());
    }

    let groups = partition(keys, actual, predicted);
    let score = |(key, group): (K, Group<F>)| -> Result<(K, T)> {
        let value = metric(&group.actual, &group.predicted)?;
        Ok((key, value))
    };

    if groups.len() >= config.parallel_min_groups {
        log::debug!("{}: scoring {} groups in parallel", name, groups.len());
        groups.into_par_iter().map(score).collect()
    } else {
        log::debug!("{}: scoring {} groups sequentially", name, groups.len());
        groups.into_iter().map(score).collect()
    }
}

/// RMSPE of each group
pub fn rmspe_by_group<K, F>(keys: &[K], actual: &[F], predicted: &[F]) -> Result<BTreeMap<K, F>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
{
    rmspe_by_group_with(keys, actual, predicted, &MetricsConfig::default())
}

/// [`rmspe_by_group`] with an explicit configuration
pub fn rmspe_by_group_with<K, F>(
    keys: &[K],
    actual: &[F],
    predicted: &[F],
    config: &MetricsConfig,
) -> Result<BTreeMap<K, F>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
{
    apply_by_group("rmspe_by_group", keys, actual, predicted, config, |a, p| {
        regression::rmspe_with(a, p, config)
    })
}

/// Median absolute deviation of each group
pub fn mad_by_group<K, F>(keys: &[K], x: &[F], y: &[F]) -> Result<BTreeMap<K, F>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
{
    mad_by_group_with(keys, x, y, &MetricsConfig::default())
}

/// [`mad_by_group`] with an explicit configuration
pub fn mad_by_group_with<K, F>(
    keys: &[K],
    x: &[F],
    y: &[F],
    config: &MetricsConfig,
) -> Result<BTreeMap<K, F>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
{
    apply_by_group("mad_by_group", keys, x, y, config, |a, b| {
        regression::mad_with(a, b, config)
    })
}

/// Full [`MetricReport`] of each group
pub fn evaluate_by_group<K, F>(
    keys: &[K],
    actual: &[F],
    predicted: &[F],
) -> Result<GroupedReport<K>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
{
    evaluate_by_group_with(keys, actual, predicted, &MetricsConfig::default())
}

/// [`evaluate_by_group`] with an explicit configuration
pub fn evaluate_by_group_with<K, F>(
    keys: &[K],
    actual: &[F],
    predicted: &[F],
    config: &MetricsConfig,
) -> Result<GroupedReport<K>>
where
    K: Hash + Eq + Ord + Clone + Send + Sync,
    F: Float + Send + Sync,
{
    apply_by_group("evaluate_by_group", keys, actual, predicted, config, |a, p| {
        report::evaluate_with(a, p, config)
    })
}
