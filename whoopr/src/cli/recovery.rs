use anyhow::Result;

use crate::cli::{
    AppContext, RecoveryArgs, RecoveryCommands, common::emit_list,
};

pub async fn handle(ctx: &AppContext, args: RecoveryArgs) -> Result<()> {
    match args.command {
        RecoveryCommands::List { pagination } => {
            let params = pagination.to_params()?;
            let result = ctx.client.recovery().list_all(Some(&params)).await?;
            emit_list(ctx, result, pagination.all, |_| true).await
        }
        RecoveryCommands::Get { cycle_id } => {
            let recovery = ctx.client.recovery().get_for_cycle(cycle_id).await?;
            ctx.output.emit_one(&recovery)
        }
    }
}
