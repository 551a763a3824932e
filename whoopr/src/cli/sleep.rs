use anyhow::Result;

use crate::cli::{AppContext, SleepArgs, SleepCommands, common::emit_list};

pub async fn handle(ctx: &AppContext, args: SleepArgs) -> Result<()> {
    match args.command {
        SleepCommands::List {
            pagination,
            naps,
            no_naps,
        } => {
            let params = pagination.to_params()?;
            let result = ctx.client.sleep().list_all(Some(&params)).await?;
            emit_list(ctx, result, pagination.all, |sleep| {
                (!naps || sleep.nap) && !(no_naps && sleep.nap)
            })
            .await
        }
        SleepCommands::Get { sleep_id } => {
            let sleep = ctx.client.sleep().get_one(sleep_id).await?;
            ctx.output.emit_one(&sleep)
        }
    }
}
