//! Admin use case: session management, RSVP correction and announcements.
//!
//! Every operation refuses to run without an admin key. Dates written by
//! admin actions are always moved onto a Sunday and times onto `HH:MM`.

use chrono::{NaiveDate, NaiveTime};
use courtside_core::announcement::render_announcement;
use courtside_core::api::{AdminApi, BookingApi};
use courtside_core::config::ClientConfig;
use courtside_core::rsvp::{
    Allocation, AllocationRow, AllocationRules, AttendanceStatus, AttendanceSummary, BucketFilter,
    RsvpRecord, RsvpSubmission, allocate,
};
use courtside_core::schedule::{next_sunday_from, normalize_date, normalize_time, weekly_sundays};
use courtside_core::session::{Session, SessionDraft, all_sessions_sorted, find};
use courtside_core::{CourtsideError, Result};
use std::sync::Arc;

pub const MSG_ENTER_ADMIN_KEY: &str = "請輸入 Admin Key";

/// Upper bound for one `generate_sundays` call, two years of Sundays.
pub const MAX_GENERATED_WEEKS: u32 = 104;

/// Fields for a new session. Unset fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSessionInput {
    pub title: Option<String>,
    /// Any date form; moved to the next Sunday. Defaults to today.
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub venue: Option<String>,
    pub capacity: Option<u32>,
    pub note: String,
    pub is_open: bool,
    /// Close every other session.
    pub only_open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSundaysInput {
    pub start: Option<String>,
    pub weeks: Option<u32>,
    pub venue: Option<String>,
    pub capacity: Option<u32>,
    /// After generating, leave only the first new session open.
    pub only_first_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSessions {
    pub session_ids: Vec<String>,
    pub dates: Vec<NaiveDate>,
}

/// Partial edit of an existing session. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEdit {
    pub session_id: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub venue: Option<String>,
    pub capacity: Option<u32>,
    pub note: Option<String>,
    pub is_open: Option<bool>,
}

/// Current RSVPs of a session, bucketed and filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpTableView {
    /// `None` when the session is not in the loaded list; capacity is then 0.
    pub session: Option<Session>,
    pub rows: Vec<AllocationRow>,
    pub allocation: Allocation,
    pub summary: AttendanceSummary,
}

pub struct AdminUseCase {
    public: Arc<dyn BookingApi>,
    admin: Arc<dyn AdminApi>,
    admin_key: String,
    config: ClientConfig,
}

impl AdminUseCase {
    /// `admin` must already carry `admin_key`; the key is only checked here.
    pub fn new(
        public: Arc<dyn BookingApi>,
        admin: Arc<dyn AdminApi>,
        admin_key: impl Into<String>,
        config: ClientConfig,
    ) -> Self {
        Self {
            public,
            admin,
            admin_key: admin_key.into(),
            config,
        }
    }

    fn ensure_key(&self) -> Result<()> {
        if self.admin_key.trim().is_empty() {
            return Err(CourtsideError::validation(MSG_ENTER_ADMIN_KEY));
        }
        Ok(())
    }

    fn rules_for(&self, capacity: u32) -> AllocationRules {
        AllocationRules::new(capacity)
            .with_waitlist_limit(self.config.waitlist_limit)
            .with_capacity_zero(self.config.capacity_zero)
    }

    /// Every session, open or not, sorted by date and start time.
    ///
    /// Falls back to the open-only listing when `sessions_all` fails.
    pub async fn load_sessions(&self) -> Result<Vec<Session>> {
        self.ensure_key()?;
        let sessions = match self.public.list_all_sessions().await {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::warn!(error = %e, "sessions_all failed, falling back to open sessions");
                self.public.list_sessions().await?
            }
        };
        Ok(all_sessions_sorted(&sessions).into_iter().cloned().collect())
    }

    async fn session(&self, session_id: &str) -> Result<Session> {
        let sessions = self.load_sessions().await?;
        find(&sessions, session_id)
            .cloned()
            .ok_or_else(|| CourtsideError::not_found("Session", session_id))
    }

    /// Creates one session. Returns its identifier.
    pub async fn create_session(&self, input: CreateSessionInput, today: NaiveDate) -> Result<String> {
        self.ensure_key()?;
        let defaults = &self.config.session_defaults;

        let date = match input.date.as_deref() {
            Some(raw) => sunday_of(raw)?,
            None => next_sunday_from(today),
        };
        let draft = SessionDraft {
            title: non_blank_or(input.title, &defaults.title),
            date,
            start: hm(input.start.as_deref().unwrap_or(&defaults.start))?,
            end: hm(input.end.as_deref().unwrap_or(&defaults.end))?,
            venue: non_blank_or(input.venue, &defaults.venue),
            capacity: input.capacity.unwrap_or(defaults.capacity),
            note: input.note.trim().to_string(),
            is_open: input.is_open,
        };

        self.admin.create_session(&draft, input.only_open).await
    }

    /// Creates one session per Sunday; only the first one is open.
    pub async fn generate_sundays(&self, input: GenerateSundaysInput, today: NaiveDate) -> Result<GeneratedSessions> {
        self.ensure_key()?;
        let defaults = &self.config.session_defaults;

        let weeks = input.weeks.unwrap_or(defaults.weeks);
        if weeks == 0 {
            return Err(CourtsideError::validation("週數必須至少為 1 / Weeks must be at least 1"));
        }
        if weeks > MAX_GENERATED_WEEKS {
            return Err(CourtsideError::validation(format!(
                "週數最多為 {MAX_GENERATED_WEEKS} / Weeks must be at most {MAX_GENERATED_WEEKS}"
            )));
        }
        let first = match input.start.as_deref() {
            Some(raw) => sunday_of(raw)?,
            None => next_sunday_from(today),
        };
        let start = hm(&defaults.start)?;
        let end = hm(&defaults.end)?;
        let venue = non_blank_or(input.venue, &defaults.venue);
        let capacity = input.capacity.unwrap_or(defaults.capacity);

        let dates = weekly_sundays(first, weeks)
            .ok_or_else(|| CourtsideError::validation(format!("無效日期 / Invalid date range from {first}")))?;
        let mut session_ids = Vec::with_capacity(dates.len());
        for (i, date) in dates.iter().enumerate() {
            let draft = SessionDraft {
                title: defaults.title.clone(),
                date: *date,
                start,
                end,
                venue: venue.clone(),
                capacity,
                note: String::new(),
                is_open: i == 0,
            };
            session_ids.push(self.admin.create_session(&draft, false).await?);
        }

        if input.only_first_open {
            if let Some(first_id) = session_ids.first() {
                self.admin.set_only_open(first_id).await?;
            }
        }
        tracing::info!(count = session_ids.len(), first = %first, "generated sunday sessions");

        Ok(GeneratedSessions { session_ids, dates })
    }

    /// Applies `edit` to the stored session and saves it.
    pub async fn update_session(&self, edit: SessionEdit) -> Result<Session> {
        self.ensure_key()?;
        let mut session = self.session(&edit.session_id).await?;

        if let Some(title) = edit.title {
            session.title = title.trim().to_string();
        }
        session.date = match edit.date.as_deref() {
            Some(raw) => sunday_of(raw)?,
            None => next_sunday_from(session.date),
        };
        if let Some(start) = edit.start.as_deref() {
            session.start = hm(start)?;
        }
        if let Some(end) = edit.end.as_deref() {
            session.end = hm(end)?;
        }
        if let Some(venue) = edit.venue {
            session.venue = venue.trim().to_string();
        }
        if let Some(capacity) = edit.capacity {
            session.capacity = capacity;
        }
        if let Some(note) = edit.note {
            session.note = note;
        }
        if let Some(is_open) = edit.is_open {
            session.is_open = is_open;
        }

        self.admin.update_session(&session).await?;
        Ok(session)
    }

    /// Deletes a session with its bookings. Returns the booking count if known.
    pub async fn delete_session(&self, session_id: &str) -> Result<Option<u32>> {
        self.ensure_key()?;
        self.admin.delete_session(session_id).await
    }

    pub async fn set_only_open(&self, session_id: &str) -> Result<()> {
        self.ensure_key()?;
        self.admin.set_only_open(session_id).await
    }

    /// Saves several sessions at once, each moved onto a Sunday.
    pub async fn bulk_update_sessions(&self, mut sessions: Vec<Session>) -> Result<usize> {
        self.ensure_key()?;
        for session in &mut sessions {
            session.date = next_sunday_from(session.date);
        }
        self.admin.bulk_update_sessions(&sessions).await?;
        Ok(sessions.len())
    }

    async fn fetch_rsvps(&self, session_id: &str) -> Result<Vec<RsvpRecord>> {
        match self.admin.list_rsvps(session_id).await {
            Ok(rows) => Ok(rows),
            Err(e) => {
                tracing::warn!(session_id, error = %e, "admin_listRsvps failed, falling back to public list");
                self.public.list_rsvps(session_id).await
            }
        }
    }

    /// Current RSVPs of a session in bucket order, keeping rows matching `filter`.
    pub async fn rsvp_table(&self, session_id: &str, filter: BucketFilter) -> Result<RsvpTableView> {
        self.ensure_key()?;
        let rows = self.fetch_rsvps(session_id).await?;
        let sessions = self.load_sessions().await?;
        let session = find(&sessions, session_id).cloned();
        if session.is_none() {
            tracing::warn!(session_id, "session not listed, allocating with capacity 0");
        }

        let rules = self.rules_for(session.as_ref().map_or(0, |s| s.capacity));
        let allocation = allocate(&rows, &rules);
        let summary = AttendanceSummary::new(&allocation, &rules);
        Ok(RsvpTableView {
            session,
            rows: allocation.rows(filter),
            allocation,
            summary,
        })
    }

    /// Overwrites the current RSVP of `name`.
    pub async fn update_rsvp(
        &self,
        session_id: &str,
        name: &str,
        status: AttendanceStatus,
        pax: u32,
        note: &str,
    ) -> Result<()> {
        self.ensure_key()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CourtsideError::validation("請輸入姓名 / Please enter your name."));
        }
        let update = RsvpSubmission {
            session_id: session_id.to_string(),
            name: name.to_string(),
            status,
            pax: pax.max(1),
            note: note.trim().to_string(),
        };
        self.admin.update_rsvp(&update).await
    }

    pub async fn delete_rsvp(&self, session_id: &str, name: &str) -> Result<()> {
        self.ensure_key()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CourtsideError::validation("請輸入姓名 / Please enter your name."));
        }
        self.admin.delete_rsvp(session_id, name).await
    }

    /// Bilingual announcement with the session's current seat counts.
    pub async fn announcement(&self, session_id: &str) -> Result<String> {
        self.ensure_key()?;
        let session = self.session(session_id).await?;
        let rows = self.fetch_rsvps(session_id).await?;

        let rules = self.rules_for(session.capacity);
        let allocation = allocate(&rows, &rules);
        let summary = AttendanceSummary::new(&allocation, &rules);
        render_announcement(&session, &summary, &self.config.public_url)
    }
}

fn sunday_of(raw: &str) -> Result<NaiveDate> {
    normalize_date(raw)
        .map(next_sunday_from)
        .ok_or_else(|| CourtsideError::validation(format!("無效日期 / Invalid date: {raw:?}")))
}

fn hm(raw: &str) -> Result<NaiveTime> {
    normalize_time(raw).ok_or_else(|| CourtsideError::validation(format!("無效時間 / Invalid time: {raw:?}")))
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAdmin, MockBooking, record, session};
    use courtside_core::rsvp::Bucket;
    use courtside_core::schedule::format_hm;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup(public: MockBooking, key: &str) -> (AdminUseCase, Arc<MockBooking>, Arc<MockAdmin>) {
        let public = Arc::new(public);
        let admin = Arc::new(MockAdmin::default());
        let config = ClientConfig {
            public_url: "https://example.org/rsvp".into(),
            ..ClientConfig::default()
        };
        let uc = AdminUseCase::new(public.clone(), admin.clone(), key, config);
        (uc, public, admin)
    }

    #[tokio::test]
    async fn test_blank_key_blocks_every_operation() {
        let (uc, public, admin) = setup(MockBooking::default(), "  ");
        let today = day("2025-03-05");

        let errors = vec![
            uc.load_sessions().await.unwrap_err(),
            uc.create_session(CreateSessionInput::default(), today).await.unwrap_err(),
            uc.generate_sundays(GenerateSundaysInput::default(), today).await.unwrap_err(),
            uc.delete_session("S1").await.unwrap_err(),
            uc.set_only_open("S1").await.unwrap_err(),
            uc.rsvp_table("S1", BucketFilter::All).await.unwrap_err(),
            uc.delete_rsvp("S1", "Ann").await.unwrap_err(),
            uc.announcement("S1").await.unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err, CourtsideError::Validation(MSG_ENTER_ADMIN_KEY.into()));
        }
        assert!(public.calls().is_empty());
        assert_eq!(admin.request_count(), 0);
    }

    #[tokio::test]
    async fn test_load_sessions_falls_back_to_open_listing() {
        let public = MockBooking::with_sessions(vec![
            session("B", "2025-03-16", true),
            session("A", "2025-03-09", false),
        ])
        .without_sessions_all();
        let (uc, public, _) = setup(public, "k");

        let sessions = uc.load_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(public.calls(), vec!["sessions_all", "sessions"]);
    }

    #[tokio::test]
    async fn test_load_sessions_sorted_including_closed() {
        let (uc, _, _) = setup(
            MockBooking::with_sessions(vec![session("B", "2025-03-16", true), session("A", "2025-03-09", false)]),
            "k",
        );
        let ids: Vec<String> = uc.load_sessions().await.unwrap().into_iter().map(|s| s.session_id).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_create_session_normalizes_and_uses_defaults() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");

        let id = uc
            .create_session(
                CreateSessionInput {
                    date: Some("2025-03-05".into()),
                    start: Some("9:30".into()),
                    is_open: true,
                    only_open: true,
                    ..CreateSessionInput::default()
                },
                day("2025-01-01"),
            )
            .await
            .unwrap();

        assert_eq!(id, "NEW1");
        let created = admin.created.lock().unwrap().clone();
        let (draft, only_open) = &created[0];
        assert_eq!(draft.date, day("2025-03-09"));
        assert_eq!(format_hm(draft.start), "09:30");
        assert_eq!(format_hm(draft.end), "19:00");
        assert_eq!(draft.title, "Badminton");
        assert_eq!(draft.venue, "Goodminton");
        assert_eq!(draft.capacity, 20);
        assert!(draft.is_open);
        assert!(*only_open);
    }

    #[tokio::test]
    async fn test_create_session_rejects_bad_time_before_request() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");
        let err = uc
            .create_session(
                CreateSessionInput {
                    end: Some("evening".into()),
                    ..CreateSessionInput::default()
                },
                day("2025-03-05"),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(admin.request_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_sundays_opens_only_first() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");

        let generated = uc
            .generate_sundays(
                GenerateSundaysInput {
                    start: Some("2025-03-04".into()),
                    weeks: Some(3),
                    venue: Some("Hall B".into()),
                    capacity: Some(16),
                    only_first_open: true,
                },
                day("2025-01-01"),
            )
            .await
            .unwrap();

        assert_eq!(generated.session_ids, vec!["NEW1", "NEW2", "NEW3"]);
        assert_eq!(generated.dates, vec![day("2025-03-09"), day("2025-03-16"), day("2025-03-23")]);

        let created = admin.created.lock().unwrap().clone();
        let open: Vec<bool> = created.iter().map(|(d, _)| d.is_open).collect();
        assert_eq!(open, vec![true, false, false]);
        assert!(created.iter().all(|(d, only)| !only && d.venue == "Hall B" && d.capacity == 16));
        assert_eq!(*admin.only_open.lock().unwrap(), vec!["NEW1".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_sundays_rejects_zero_weeks() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");
        let err = uc
            .generate_sundays(
                GenerateSundaysInput {
                    weeks: Some(0),
                    ..GenerateSundaysInput::default()
                },
                day("2025-03-05"),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(admin.request_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_sundays_rejects_too_many_weeks() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");
        for weeks in [MAX_GENERATED_WEEKS + 1, 20_000_000] {
            let err = uc
                .generate_sundays(
                    GenerateSundaysInput {
                        weeks: Some(weeks),
                        ..GenerateSundaysInput::default()
                    },
                    day("2025-03-05"),
                )
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(admin.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_session_merges_edit_onto_stored_session() {
        let (uc, _, admin) = setup(MockBooking::with_sessions(vec![session("S1", "2025-03-09", true)]), "k");

        let saved = uc
            .update_session(SessionEdit {
                session_id: "S1".into(),
                date: Some("2025-03-11T10:00:00".into()),
                end: Some("1899-12-30 20:15".into()),
                capacity: Some(24),
                is_open: Some(false),
                ..SessionEdit::default()
            })
            .await
            .unwrap();

        assert_eq!(saved.date, day("2025-03-16"));
        assert_eq!(format_hm(saved.start), "17:00");
        assert_eq!(format_hm(saved.end), "20:15");
        assert_eq!(saved.capacity, 24);
        assert!(!saved.is_open);
        assert_eq!(admin.updated.lock().unwrap().clone(), vec![saved]);
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_not_found() {
        let (uc, _, admin) = setup(MockBooking::with_sessions(Vec::new()), "k");
        let err = uc
            .update_session(SessionEdit {
                session_id: "ghost".into(),
                ..SessionEdit::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(admin.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_session_returns_booking_count() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");
        admin.set_deleted_bookings(Some(5));
        assert_eq!(uc.delete_session("S1").await.unwrap(), Some(5));
        assert_eq!(*admin.deleted.lock().unwrap(), vec!["S1".to_string()]);
    }

    #[tokio::test]
    async fn test_bulk_update_moves_dates_to_sunday() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");
        let count = uc
            .bulk_update_sessions(vec![session("A", "2025-03-10", true), session("B", "2025-03-16", false)])
            .await
            .unwrap();

        assert_eq!(count, 2);
        let sent = admin.bulk.lock().unwrap()[0].clone();
        assert_eq!(sent[0].date, day("2025-03-16"));
        assert_eq!(sent[1].date, day("2025-03-16"));
    }

    #[tokio::test]
    async fn test_rsvp_table_filters_and_falls_back_to_public_list() {
        let mut s = session("S1", "2025-03-09", true);
        s.capacity = 1;
        let public = MockBooking::with_sessions(vec![s]);
        public.set_rsvps(
            "S1",
            vec![
                record("Ann", AttendanceStatus::Yes, 1, 1),
                record("Ben", AttendanceStatus::Yes, 1, 2),
                record("Cat", AttendanceStatus::No, 1, 3),
            ],
        );
        let (uc, public, admin) = setup(public, "k");
        admin.fail_list_rsvps();

        let all = uc.rsvp_table("S1", BucketFilter::All).await.unwrap();
        let buckets: Vec<Bucket> = all.rows.iter().map(|r| r.bucket).collect();
        assert_eq!(buckets, vec![Bucket::Confirmed, Bucket::Waitlist, Bucket::Declined]);
        assert_eq!(all.summary.remaining(), Some(0));
        assert!(public.calls().contains(&"list"));

        let waitlist = uc.rsvp_table("S1", BucketFilter::Waitlist).await.unwrap();
        assert_eq!(waitlist.rows.len(), 1);
        assert_eq!(waitlist.rows[0].record.name, "Ben");
    }

    #[tokio::test]
    async fn test_update_and_delete_rsvp() {
        let (uc, _, admin) = setup(MockBooking::default(), "k");

        uc.update_rsvp("S1", " Ann ", AttendanceStatus::No, 0, " away ").await.unwrap();
        uc.delete_rsvp("S1", "Ben").await.unwrap();
        assert!(uc.delete_rsvp("S1", " ").await.unwrap_err().is_validation());

        let update = admin.rsvp_updates.lock().unwrap()[0].clone();
        assert_eq!(update.name, "Ann");
        assert_eq!(update.pax, 1);
        assert_eq!(update.note, "away");
        assert_eq!(
            *admin.rsvp_deletes.lock().unwrap(),
            vec![("S1".to_string(), "Ben".to_string())]
        );
    }

    #[tokio::test]
    async fn test_announcement_includes_counts_and_link() {
        let (uc, _, admin) = setup(MockBooking::with_sessions(vec![session("S1", "2025-03-09", true)]), "k");
        admin.set_rsvps(
            "S1",
            vec![
                record("Ann", AttendanceStatus::Yes, 2, 1),
                record("Ben", AttendanceStatus::Yes, 1, 2),
            ],
        );

        let text = uc.announcement("S1").await.unwrap();
        assert!(text.contains("👥 名額：3/20（尚餘 17）"));
        assert!(text.contains("👥 Confirmed: 3/20 (Remaining 17)"));
        assert!(text.contains("https://example.org/rsvp"));
    }

    #[tokio::test]
    async fn test_announcement_for_unknown_session_is_not_found() {
        let (uc, _, _) = setup(MockBooking::with_sessions(Vec::new()), "k");
        assert!(uc.announcement("ghost").await.unwrap_err().is_not_found());
    }
}
