//! Organiser commands.

use super::{Context, render};
use crate::AdminCommand;
use anyhow::{Context as _, Result};
use chrono::Local;
use courtside_application::{CreateSessionInput, GenerateSundaysInput, SessionEdit};
use courtside_core::session::Session;
use std::io::{self, BufRead, Write};

pub async fn run(ctx: &Context, command: AdminCommand) -> Result<()> {
    let usecase = ctx.admin_usecase()?;
    let today = Local::now().date_naive();

    match command {
        AdminCommand::Sessions { show_closed, json } => {
            let sessions = usecase.load_sessions().await?;
            let shown: Vec<&Session> = sessions
                .iter()
                .filter(|s| show_closed || s.is_open)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                render::session_table(&shown);
            }
        }
        AdminCommand::Create {
            title,
            date,
            start,
            end,
            venue,
            capacity,
            note,
            open,
            only_open,
        } => {
            let input = CreateSessionInput {
                title,
                date,
                start,
                end,
                venue,
                capacity,
                note,
                is_open: open || only_open,
                only_open,
            };
            let id = usecase.create_session(input, today).await?;
            render::success(&format!("已建立 / Created {id}"));
        }
        AdminCommand::Generate {
            start,
            weeks,
            venue,
            capacity,
            only_first_open,
        } => {
            let generated = usecase
                .generate_sundays(
                    GenerateSundaysInput {
                        start,
                        weeks,
                        venue,
                        capacity,
                        only_first_open,
                    },
                    today,
                )
                .await?;
            for (id, date) in generated.session_ids.iter().zip(&generated.dates) {
                println!("  {date}  {id}");
            }
            render::success(&format!(
                "已生成 {} 個星期日場次 / Generated {} Sunday sessions",
                generated.session_ids.len(),
                generated.session_ids.len()
            ));
        }
        AdminCommand::Update {
            session,
            title,
            date,
            start,
            end,
            venue,
            capacity,
            note,
            open,
        } => {
            let saved = usecase
                .update_session(SessionEdit {
                    session_id: session,
                    title,
                    date,
                    start,
                    end,
                    venue,
                    capacity,
                    note,
                    is_open: open,
                })
                .await?;
            render::success(&format!("已儲存 / Saved: {}", saved.label(true)));
        }
        AdminCommand::BulkUpdate { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let sessions: Vec<Session> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array of sessions", file.display()))?;
            let count = usecase.bulk_update_sessions(sessions).await?;
            render::success(&format!("已儲存 {count} 個場次 / Saved {count} sessions"));
        }
        AdminCommand::Delete { session, yes } => {
            if !yes && !confirm("確定刪除場次？（會同時刪除該場所有 bookings）/ Delete the session and all its bookings?")? {
                render::notice("已取消 / Cancelled.");
                return Ok(());
            }
            match usecase.delete_session(&session).await? {
                Some(count) => render::success(&format!("已刪除 / Deleted ({count} bookings removed)")),
                None => render::success("已刪除 / Deleted."),
            }
        }
        AdminCommand::OnlyOpen { session } => {
            usecase.set_only_open(&session).await?;
            render::success("已設定唯一開放 / Only this session is open now.");
        }
        AdminCommand::Rsvps { session, filter } => {
            let view = usecase.rsvp_table(&session, filter).await?;
            render::rsvp_table(&view);
        }
        AdminCommand::UpdateRsvp {
            session,
            name,
            status,
            pax,
            note,
        } => {
            usecase
                .update_rsvp(&session, &name, status, pax, &note)
                .await?;
            render::success("已更新 / Updated.");
        }
        AdminCommand::DeleteRsvp { session, name } => {
            usecase.delete_rsvp(&session, &name).await?;
            render::success("已刪除 / Deleted.");
        }
        AdminCommand::Announce { session } => {
            let text = usecase.announcement(&session).await?;
            println!("{text}");
        }
    }
    Ok(())
}

/// Asks a yes/no question on the terminal. Anything but `y`/`yes` is no.
fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    read_yes(stdin.lock())
}

fn read_yes(mut input: impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_yes() {
        assert!(read_yes("y\n".as_bytes()).unwrap());
        assert!(read_yes(" YES \n".as_bytes()).unwrap());
        assert!(!read_yes("\n".as_bytes()).unwrap());
        assert!(!read_yes("nope\n".as_bytes()).unwrap());
        assert!(!read_yes("".as_bytes()).unwrap());
    }
}
