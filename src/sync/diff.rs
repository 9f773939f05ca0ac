use std::collections::HashSet;
use std::path::PathBuf;

use crate::types::{PathComparison, TrackRecord};
use crate::utils;

/// Computes the add-set: local files whose normalized path is not among the
/// destination playlist's resolved locations.
///
/// Pure function of its inputs. Output order follows the local scan order,
/// and duplicate inputs are kept as-is. Records without a resolved path
/// (cloud-only or dead entries) cannot match anything and are ignored on
/// the destination side.
pub fn compute_add_set(
    local_files: &[PathBuf],
    destination: &[TrackRecord],
    policy: PathComparison,
) -> Vec<PathBuf> {
    let known: HashSet<String> = destination
        .iter()
        .filter_map(|record| record.resolved_path.as_deref())
        .map(|path| utils::normalize_path(path, policy))
        .collect();

    local_files
        .iter()
        .filter(|path| !known.contains(&utils::normalize_path(path, policy)))
        .cloned()
        .collect()
}
