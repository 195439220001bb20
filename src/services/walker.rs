//! Level walker
//!
//! Generic pass over the levels of an analysis: select, filter, map. Every
//! category export goes through [`walk_levels`].

use crate::error::Result;
use crate::models::{ChanAnalysis, LevelResult};
use crate::services::mapper::LevelContext;
use tracing::{debug, error};

/// Walk every level of an analysis and map the selected items to records
///
/// Records come out in level order, then in the order `select` yields items
/// within a level. Items rejected by `include` produce nothing; every other
/// item produces exactly one record.
///
/// # Arguments
/// * `analysis` - Engine output, borrowed for the duration of the walk
/// * `select` - Picks the items of one level result
/// * `include` - Inclusion filter applied before mapping
/// * `map` - Record mapper
///
/// # Errors
/// The first mapping error stops the walk and is returned as is. The level it
/// was found on goes to the log.
pub fn walk_levels<'a, I, R, S, F, M>(
    analysis: &'a ChanAnalysis,
    select: S,
    include: F,
    map: M,
) -> Result<Vec<R>>
where
    I: IntoIterator,
    S: Fn(&'a LevelResult) -> I,
    F: Fn(&I::Item) -> bool,
    M: Fn(&LevelContext<'a>, I::Item) -> Result<R>,
{
    let mut records = Vec::new();

    for data in analysis.levels() {
        let ctx = LevelContext {
            level: data.level,
            result: &data.result,
        };
        let before = records.len();

        for item in select(&data.result).into_iter().filter(|item| include(item)) {
            let record = map(&ctx, item).inspect_err(|e| {
                error!(level = %data.level, error = %e, "Mapping failed");
            })?;
            records.push(record);
        }

        debug!(
            level = %data.level,
            records = records.len() - before,
            "Walked level"
        );
    }

    Ok(records)
}

/// Inclusion filter that keeps everything
pub fn include_all<T>(_: &T) -> bool {
    true
}
