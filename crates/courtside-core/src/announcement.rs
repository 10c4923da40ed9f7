//! Bilingual announcement text for group chats.

use crate::error::Result;
use crate::rsvp::AttendanceSummary;
use crate::schedule::{format_hm, weekday_short};
use crate::session::Session;
use minijinja::{Environment, context};

const ANNOUNCEMENT_TEMPLATE: &str = "\
📢 {{ title }} 打波登記 / RSVP
🗓️ {{ date }} ({{ weekday }}) {{ start }}-{{ end }}
📍 {{ venue }}

{{ summary_zh }}

請到以下連結更新出席狀態：
{{ url }}

Status：出席 YES / 缺席 NO

------------------------------

📢 {{ title }} RSVP
🗓️ {{ date }} ({{ weekday }}) {{ start }}-{{ end }}
📍 {{ venue }}

{{ summary_en }}

Please update your status via:
{{ url }}

Status: YES / NO";

/// Renders the announcement for `session` with its current seat counts.
pub fn render_announcement(
    session: &Session,
    summary: &AttendanceSummary,
    public_url: &str,
) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(false);
    env.add_template("announcement", ANNOUNCEMENT_TEMPLATE)?;
    let template = env.get_template("announcement")?;

    let text = template.render(context! {
        title => session.title.trim(),
        date => session.date.format("%Y-%m-%d").to_string(),
        weekday => weekday_short(session.date),
        start => format_hm(session.start),
        end => format_hm(session.end),
        venue => session.venue.trim(),
        summary_zh => summary.zh_lines(),
        summary_en => summary.en_lines(),
        url => public_url.trim(),
    })?;
    Ok(text)
}
