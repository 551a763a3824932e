use anyhow::Result;

use crate::cli::{AppContext, WorkoutArgs, WorkoutCommands, common::emit_list};

pub async fn handle(ctx: &AppContext, args: WorkoutArgs) -> Result<()> {
    match args.command {
        WorkoutCommands::List { pagination, sport } => {
            let params = pagination.to_params()?;
            let result = ctx.client.workouts().list_all(Some(&params)).await?;
            emit_list(ctx, result, pagination.all, |workout| {
                sport.is_none_or(|id| workout.sport_id == id)
            })
            .await
        }
        WorkoutCommands::Get { workout_id } => {
            let workout = ctx.client.workouts().get_one(workout_id).await?;
            ctx.output.emit_one(&workout)
        }
    }
}
