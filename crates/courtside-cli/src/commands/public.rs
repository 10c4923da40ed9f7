//! Player commands.

use super::{Context, render};
use anyhow::{Result, anyhow};
use chrono::Local;
use courtside_application::{RsvpForm, SubmitOutcome};
use courtside_core::rsvp::RsvpChoice;

pub struct RsvpArgs {
    pub name: String,
    pub choice: RsvpChoice,
    pub pax: Option<u32>,
    pub note: String,
    pub session: Option<String>,
}

pub async fn sessions(ctx: &Context) -> Result<()> {
    let usecase = ctx.rsvp_usecase()?;
    let view = usecase.load_sessions(Local::now().naive_local()).await?;
    render::directory(&view);
    Ok(())
}

pub async fn show(ctx: &Context, session: Option<String>) -> Result<()> {
    let usecase = ctx.rsvp_usecase()?;
    let directory = usecase.load_sessions(Local::now().naive_local()).await?;

    let session_id = match session.or(directory.default_session_id.clone()) {
        Some(id) => id,
        None => {
            render::directory(&directory);
            return Ok(());
        }
    };
    usecase.select_session(&session_id).await?;

    let view = usecase
        .attendance(&session_id)
        .await?
        .ok_or_else(|| anyhow!("selection changed while loading; try again"))?;
    render::attendance(&view);
    Ok(())
}

pub async fn rsvp(ctx: &Context, args: RsvpArgs) -> Result<()> {
    let usecase = ctx.rsvp_usecase()?;
    let directory = usecase.load_sessions(Local::now().naive_local()).await?;
    let session_id = args.session.or(directory.default_session_id);

    let outcome = usecase
        .submit(RsvpForm {
            session_id,
            name: args.name,
            choice: Some(args.choice),
            pax: args.pax,
            note: args.note,
        })
        .await?;

    match outcome {
        SubmitOutcome::Nudge { nudge, notice } => {
            println!("{nudge}");
            render::notice(notice);
        }
        SubmitOutcome::Submitted {
            message,
            attendance,
            ..
        } => {
            render::success(message);
            if let Some(view) = attendance {
                println!();
                render::attendance(&view);
            }
        }
    }
    Ok(())
}
