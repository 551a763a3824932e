//! common functions for cli
//!

use anyhow::Result;
use serde::Serialize;
use whoop::paged::Record;
use whoop::prelude::*;

use crate::{cli::AppContext, output::TableRow};

/// Prints one page, or every page when `all` is set.
/// `keep` filters records client-side before printing.
pub(crate) async fn emit_list<T>(
    ctx: &AppContext,
    result: PagedResult<T>,
    all: bool,
    keep: impl Fn(&T) -> bool,
) -> Result<()>
where
    T: Record + Serialize + TableRow,
{
    if all {
        let mut items = result.collect_all().await?;
        items.retain(|item| keep(item));
        return ctx.output.emit_records(&items);
    }

    let mut page = result.into_page();
    page.records.retain(|item| keep(item));
    ctx.output
        .emit_page(&page.records, page.next_token.as_deref())
}
