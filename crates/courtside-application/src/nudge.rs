//! Bilingual nudges shown when a player picks MAYBE.

use std::sync::atomic::{AtomicUsize, Ordering};

const NUDGES: &[(&str, &str)] = &[
    (
        "😏『可能』其實等於冇答，大家會當你唔嚟。",
        "😏 'Maybe' usually means 'not coming'. Others will assume you are out.",
    ),
    (
        "🤔 如果你真係想打，揀『出席』會比較實際。",
        "🤔 If you really want to play, choosing 'Yes' works much better.",
    ),
    (
        "⏳ 名額有限，『可能』唔會幫你留位。",
        "⏳ Slots are limited. 'Maybe' does not reserve a spot.",
    ),
    (
        "🫠 教練統計名單時，『可能』會被自動忽略。",
        "🫠 When attendance is counted, 'Maybe' is often ignored.",
    ),
];

/// Notice appended to every nudge.
pub const MAYBE_NOT_SUBMITTED: &str =
    "「可能 / MAYBE」不會提交登記，請改選 YES 或 NO。\n'Maybe' will NOT submit. Please choose YES or NO.";

/// Cycles through the nudge lines, one per call.
#[derive(Debug, Default)]
pub struct NudgeRotation {
    next: AtomicUsize,
}

impl NudgeRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next nudge as two lines, Chinese then English.
    pub fn next_line(&self) -> String {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % NUDGES.len();
        let (zh, en) = NUDGES[idx];
        format!("{zh}\n{en}")
    }
}
