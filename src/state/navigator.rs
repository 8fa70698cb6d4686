/// Date navigation state machine
///
/// `DateNavigator` owns the current date and what is shown for it. Every
/// event mutates the date and re-evaluates it: dates after `today` are
/// blocked without a request, any other date switches to `Loading` and hands
/// back a `FetchTicket` for the caller to turn into exactly one fetch.
///
/// Responses come back through `resolve` with the ticket they were issued
/// for. Only the live ticket may change state, so a slow response for a day
/// the user already left is dropped on arrival instead of overwriting a
/// newer one. Nothing here reads the clock; `today` is always passed in.

use rand::Rng;

use super::data::NavigationState;
use super::date::CalendarDate;
use crate::apod::error::FetchError;
use crate::apod::payload::ImageRecordPayload;

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub date: CalendarDate,
    /// Bumped on every evaluation, so two fetches for the same day differ
    pub generation: u64,
}

/// Outcome of handing a response to the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Superseded,
}

#[derive(Debug, Clone)]
pub struct DateNavigator {
    current_date: CalendarDate,
    state: NavigationState,
    generation: u64,
}

impl DateNavigator {
    /// Start on `today` and evaluate it
    pub fn mount(today: CalendarDate) -> (Self, Option<FetchTicket>) {
        let mut navigator = DateNavigator {
            current_date: today,
            state: NavigationState::Loading,
            generation: 0,
        };
        let ticket = navigator.evaluate(today);
        (navigator, ticket)
    }

    pub fn current_date(&self) -> CalendarDate {
        self.current_date
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Next is the only control that can be disabled
    pub fn next_enabled(&self) -> bool {
        !self.state.is_future_blocked()
    }

    /// Ticket of the fetch whose response would currently be accepted
    pub fn live_ticket(&self) -> Option<FetchTicket> {
        if self.state.is_future_blocked() {
            return None;
        }
        Some(FetchTicket {
            date: self.current_date,
            generation: self.generation,
        })
    }

    pub fn is_live(&self, ticket: FetchTicket) -> bool {
        self.live_ticket() == Some(ticket)
    }

    pub fn go_to_previous_day(&mut self, today: CalendarDate) -> Option<FetchTicket> {
        let date = self.current_date.previous_day()?;
        self.move_to(date, today)
    }

    /// Ignored while blocked on a future date
    pub fn go_to_next_day(&mut self, today: CalendarDate) -> Option<FetchTicket> {
        if !self.next_enabled() {
            return None;
        }
        let date = self.current_date.next_day()?;
        self.move_to(date, today)
    }

    /// Jump to a uniformly drawn day in `[EPOCH, today - 1]`
    pub fn go_to_random_day<R: Rng + ?Sized>(
        &mut self,
        today: CalendarDate,
        rng: &mut R,
    ) -> Option<FetchTicket> {
        let date = CalendarDate::random_before(today, rng);
        self.move_to(date, today)
    }

    pub fn go_to_today(&mut self, today: CalendarDate) -> Option<FetchTicket> {
        self.move_to(today, today)
    }

    /// Apply a fetch result if `ticket` is still live
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<ImageRecordPayload, FetchError>,
    ) -> Resolution {
        if !self.is_live(ticket) || !self.state.is_loading() {
            tracing::debug!(
                date = %ticket.date,
                generation = ticket.generation,
                current = %self.current_date,
                "Discarding superseded response"
            );
            return Resolution::Superseded;
        }

        self.state = match result {
            Ok(payload) => match payload.into_record(ticket.date) {
                Some(record) => {
                    tracing::info!(date = %ticket.date, title = %record.title, "✅ Loaded APOD");
                    NavigationState::Loaded(record)
                }
                None => {
                    tracing::info!(date = %ticket.date, "APOD entry has no usable content");
                    NavigationState::Empty
                }
            },
            Err(err) => {
                tracing::warn!(date = %ticket.date, "⚠️  Failed to fetch APOD: {}", err);
                NavigationState::Failed(err)
            }
        };

        Resolution::Applied
    }

    fn move_to(&mut self, date: CalendarDate, today: CalendarDate) -> Option<FetchTicket> {
        self.current_date = date;
        self.evaluate(today)
    }

    fn evaluate(&mut self, today: CalendarDate) -> Option<FetchTicket> {
        self.generation += 1;

        if self.current_date > today {
            tracing::info!(date = %self.current_date, "Date is in the future, not fetching");
            self.state = NavigationState::FutureBlocked;
            return None;
        }

        self.state = NavigationState::Loading;
        tracing::info!(date = %self.current_date, "🔭 Fetching APOD");

        Some(FetchTicket {
            date: self.current_date,
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ImageRecord;
    use crate::state::data::MediaType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn today() -> CalendarDate {
        date(2024, 6, 1)
    }

    fn payload(title: &str) -> ImageRecordPayload {
        ImageRecordPayload {
            title: Some(title.to_string()),
            explanation: Some("explanation".to_string()),
            url: Some(format!("https://apod.nasa.gov/{}.jpg", title)),
            ..Default::default()
        }
    }

    fn loaded_title(navigator: &DateNavigator) -> Option<&str> {
        navigator.state().record().map(|r| r.title.as_str())
    }

    #[test]
    fn test_mount_fetches_today() {
        let (navigator, ticket) = DateNavigator::mount(today());

        assert_eq!(navigator.current_date(), today());
        assert_eq!(navigator.state(), &NavigationState::Loading);
        assert_eq!(ticket.map(|t| t.date), Some(today()));
        assert!(navigator.next_enabled());
    }

    #[test]
    fn test_future_dates_are_blocked_without_fetch() {
        let (mut navigator, _) = DateNavigator::mount(today());

        for offset in [1, 2, 30, 400] {
            navigator.current_date = date(2024, 6, 1);
            for _ in 0..offset {
                navigator.current_date = navigator.current_date.next_day().unwrap();
            }
            let ticket = navigator.evaluate(today());

            assert_eq!(ticket, None);
            assert_eq!(navigator.state(), &NavigationState::FutureBlocked);
            assert!(!navigator.next_enabled());
        }
    }

    #[test]
    fn test_past_dates_load_immediately() {
        let (mut navigator, _) = DateNavigator::mount(today());

        for day in [today(), date(2024, 5, 31), date(2000, 1, 1), CalendarDate::EPOCH] {
            navigator.current_date = day;
            let ticket = navigator.evaluate(today());

            assert_eq!(ticket.map(|t| t.date), Some(day));
            assert_eq!(navigator.state(), &NavigationState::Loading);
        }
    }

    #[test]
    fn test_loaded_record() {
        let day = date(2024, 1, 1);
        let (mut navigator, _) = DateNavigator::mount(day);
        let ticket = navigator.go_to_today(day).unwrap();

        let result = navigator.resolve(
            ticket,
            Ok(ImageRecordPayload {
                title: Some("X".to_string()),
                explanation: Some("Y".to_string()),
                url: Some("Z".to_string()),
                ..Default::default()
            }),
        );

        assert_eq!(result, Resolution::Applied);
        assert_eq!(
            navigator.state(),
            &NavigationState::Loaded(ImageRecord {
                date: day,
                title: "X".to_string(),
                explanation: "Y".to_string(),
                image_url: "Z".to_string(),
                media_type: MediaType::Image,
                copyright: None,
            })
        );
    }

    #[test]
    fn test_empty_payload() {
        let (mut navigator, ticket) = DateNavigator::mount(today());

        navigator.resolve(ticket.unwrap(), Ok(ImageRecordPayload::default()));

        assert_eq!(navigator.state(), &NavigationState::Empty);
        assert!(navigator.next_enabled());
    }

    #[test]
    fn test_failures_keep_reason_and_controls() {
        let errors = [
            FetchError::Network("connection refused".to_string()),
            FetchError::Server { status: 500 },
            FetchError::MalformedResponse("expected value".to_string()),
        ];

        for err in errors {
            let (mut navigator, _) = DateNavigator::mount(today());
            let ticket = navigator.go_to_previous_day(today()).unwrap();

            navigator.resolve(ticket, Err(err.clone()));

            assert_eq!(navigator.state(), &NavigationState::Failed(err));
            assert!(navigator.next_enabled());

            // Still recoverable
            let ticket = navigator.go_to_previous_day(today()).unwrap();
            assert_eq!(ticket.date, date(2024, 5, 30));
            assert!(navigator.state().is_loading());
        }
    }

    #[test]
    fn test_network_failure_scenario() {
        let (mut navigator, ticket) = DateNavigator::mount(today());
        navigator.resolve(ticket.unwrap(), Err(FetchError::Network("timeout".to_string())));

        assert!(matches!(
            navigator.state(),
            NavigationState::Failed(FetchError::Network(_))
        ));
        assert!(navigator.next_enabled());
        assert!(navigator.go_to_previous_day(today()).is_some());
    }

    #[test]
    fn test_next_from_today_blocks_and_today_recovers() {
        let (mut navigator, ticket) = DateNavigator::mount(today());
        navigator.resolve(ticket.unwrap(), Ok(payload("today")));

        assert_eq!(navigator.go_to_next_day(today()), None);
        assert_eq!(navigator.current_date(), date(2024, 6, 2));
        assert_eq!(navigator.state(), &NavigationState::FutureBlocked);
        assert!(!navigator.next_enabled());

        // Next is a no-op while blocked
        assert_eq!(navigator.go_to_next_day(today()), None);
        assert_eq!(navigator.current_date(), date(2024, 6, 2));

        let ticket = navigator.go_to_today(today()).unwrap();
        assert_eq!(ticket.date, today());
        assert_eq!(navigator.state(), &NavigationState::Loading);
        assert!(navigator.next_enabled());
    }

    #[test]
    fn test_previous_leaves_future_block() {
        let (mut navigator, _) = DateNavigator::mount(today());
        navigator.go_to_next_day(today());

        let ticket = navigator.go_to_previous_day(today()).unwrap();
        assert_eq!(ticket.date, today());
        assert!(navigator.state().is_loading());
    }

    #[test]
    fn test_previous_then_next_is_identity_and_refetches() {
        let start = date(2024, 3, 1);
        let (mut navigator, _) = DateNavigator::mount(today());
        navigator.current_date = start;

        let back = navigator.go_to_previous_day(today()).unwrap();
        assert_eq!(back.date, date(2024, 2, 29));

        let forth = navigator.go_to_next_day(today()).unwrap();
        assert_eq!(forth.date, start);
        assert_eq!(navigator.current_date(), start);

        // Every navigation issues its own fetch
        assert_ne!(back.generation, forth.generation);
        assert!(navigator.state().is_loading());
    }

    #[test]
    fn test_random_day_is_in_range_and_fetchable() {
        let (mut navigator, _) = DateNavigator::mount(today());
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            let ticket = navigator.go_to_random_day(today(), &mut rng).unwrap();

            assert!(ticket.date >= CalendarDate::EPOCH);
            assert!(ticket.date < today());
            assert_eq!(navigator.state(), &NavigationState::Loading);
            seen.insert(ticket.date);
        }

        assert!(seen.len() > 1);
    }

    #[test]
    fn test_random_from_future_block() {
        let (mut navigator, _) = DateNavigator::mount(today());
        navigator.go_to_next_day(today());
        let mut rng = StdRng::seed_from_u64(5);

        assert!(navigator.go_to_random_day(today(), &mut rng).is_some());
        assert!(navigator.next_enabled());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut navigator, _) = DateNavigator::mount(today());
        let d1 = navigator.go_to_previous_day(today()).unwrap();
        let d2 = navigator.go_to_previous_day(today()).unwrap();

        // D2 answers first, D1 arrives late
        assert_eq!(navigator.resolve(d2, Ok(payload("d2"))), Resolution::Applied);
        assert_eq!(navigator.resolve(d1, Ok(payload("d1"))), Resolution::Superseded);

        assert_eq!(navigator.current_date(), d2.date);
        assert_eq!(loaded_title(&navigator), Some("d2"));
    }

    #[test]
    fn test_stale_response_before_live_one() {
        let (mut navigator, _) = DateNavigator::mount(today());
        let d1 = navigator.go_to_previous_day(today()).unwrap();
        let d2 = navigator.go_to_previous_day(today()).unwrap();

        assert_eq!(
            navigator.resolve(d1, Err(FetchError::Server { status: 500 })),
            Resolution::Superseded
        );
        assert!(navigator.state().is_loading());

        navigator.resolve(d2, Ok(payload("d2")));
        assert_eq!(loaded_title(&navigator), Some("d2"));
    }

    #[test]
    fn test_same_date_revisited_only_latest_counts() {
        let (mut navigator, _) = DateNavigator::mount(today());
        let first = navigator.go_to_previous_day(today()).unwrap();
        navigator.go_to_previous_day(today());
        let second = navigator.go_to_next_day(today()).unwrap();

        assert_eq!(first.date, second.date);
        assert_eq!(
            navigator.resolve(first, Err(FetchError::Network("slow".to_string()))),
            Resolution::Superseded
        );
        assert_eq!(navigator.resolve(second, Ok(payload("again"))), Resolution::Applied);
        assert_eq!(loaded_title(&navigator), Some("again"));
    }

    #[test]
    fn test_response_after_future_block_is_discarded() {
        let (mut navigator, ticket) = DateNavigator::mount(today());
        navigator.go_to_next_day(today());

        assert_eq!(
            navigator.resolve(ticket.unwrap(), Ok(payload("late"))),
            Resolution::Superseded
        );
        assert_eq!(navigator.state(), &NavigationState::FutureBlocked);
    }

    #[test]
    fn test_duplicate_delivery_is_ignored() {
        let (mut navigator, ticket) = DateNavigator::mount(today());
        let ticket = ticket.unwrap();

        navigator.resolve(ticket, Ok(payload("first")));
        assert_eq!(
            navigator.resolve(ticket, Err(FetchError::Server { status: 502 })),
            Resolution::Superseded
        );
        assert_eq!(loaded_title(&navigator), Some("first"));
    }

    #[test]
    fn test_today_rolls_over() {
        // The app stays open past midnight
        let (mut navigator, _) = DateNavigator::mount(today());
        navigator.go_to_next_day(today());
        assert!(navigator.state().is_future_blocked());

        let tomorrow = date(2024, 6, 2);
        let ticket = navigator.go_to_today(tomorrow).unwrap();
        assert_eq!(ticket.date, tomorrow);
    }

    #[test]
    fn test_overflow_leaves_navigator_unchanged() {
        let (mut navigator, _) = DateNavigator::mount(today());

        navigator.current_date = CalendarDate::MIN;
        let generation = navigator.generation;
        assert_eq!(navigator.go_to_previous_day(today()), None);
        assert_eq!(navigator.current_date(), CalendarDate::MIN);
        assert_eq!(navigator.state(), &NavigationState::Loading);
        assert_eq!(navigator.generation, generation);

        // Past today, but not blocked yet, so Next reaches the arithmetic
        navigator.current_date = CalendarDate::MAX;
        assert!(navigator.next_enabled());
        assert_eq!(navigator.go_to_next_day(today()), None);
        assert_eq!(navigator.current_date(), CalendarDate::MAX);
        assert_eq!(navigator.state(), &NavigationState::Loading);
        assert_eq!(navigator.generation, generation);
    }
}
