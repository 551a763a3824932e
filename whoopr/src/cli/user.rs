use anyhow::Result;

use crate::cli::{AppContext, UserArgs, UserCommands};

pub async fn handle(ctx: &AppContext, args: UserArgs) -> Result<()> {
    match args.command {
        UserCommands::Profile => {
            let profile = ctx.client.user().profile().await?;
            ctx.output.emit_one(&profile)
        }
        UserCommands::Body => {
            let body = ctx.client.user().body_measurement().await?;
            ctx.output.emit_one(&body)
        }
    }
}
