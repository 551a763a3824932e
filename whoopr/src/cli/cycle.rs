use anyhow::Result;

use crate::cli::{AppContext, CycleArgs, CycleCommands, common::emit_list};

pub async fn handle(ctx: &AppContext, args: CycleArgs) -> Result<()> {
    match args.command {
        CycleCommands::List { pagination } => {
            let params = pagination.to_params()?;
            let result = ctx.client.cycles().list_all(Some(&params)).await?;
            emit_list(ctx, result, pagination.all, |_| true).await
        }
        CycleCommands::Get { cycle_id } => {
            let cycle = ctx.client.cycles().get_one(cycle_id).await?;
            ctx.output.emit_one(&cycle)
        }
    }
}
