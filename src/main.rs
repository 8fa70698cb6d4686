use iced::widget::image;
use iced::{Element, Subscription, Task, Theme};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod apod;
mod config;
mod state;
mod ui;

use apod::client::{ApodFetcher, HttpApodFetcher};
use apod::error::FetchError;
use apod::payload::ImageRecordPayload;
use config::Config;
use state::data::MediaType;
use state::date::CalendarDate;
use state::navigator::{DateNavigator, FetchTicket, Resolution};
use ui::card::{self, Picture};
use ui::screen::{Controls, Screen};

/// Main application state
struct ApodViewer {
    /// Current date and what is shown for it
    navigator: DateNavigator,
    /// Where entries and pictures come from
    fetcher: Arc<dyn ApodFetcher>,
    /// Picture of the loaded record, if any
    picture: Picture,
    theme: Theme,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Step one day back
    Previous,
    /// Step one day forward
    Next,
    /// Jump to a random archive day
    Random,
    /// Jump back to today
    Today,
    /// An entry fetch finished
    RecordFetched(FetchTicket, Result<ImageRecordPayload, FetchError>),
    /// A picture download finished
    PictureFetched(FetchTicket, Result<Vec<u8>, FetchError>),
}

impl ApodViewer {
    /// Create a new instance of the application, starting on today
    fn new(fetcher: Arc<dyn ApodFetcher>, theme: Theme) -> (Self, Task<Message>) {
        let (navigator, ticket) = DateNavigator::mount(CalendarDate::today());

        let app = ApodViewer {
            navigator,
            fetcher,
            picture: Picture::default(),
            theme,
        };
        let task = app.fetch_record(ticket);

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let today = CalendarDate::today();

        match message {
            Message::Previous => {
                let ticket = self.navigator.go_to_previous_day(today);
                self.fetch_record(ticket)
            }
            Message::Next => {
                let ticket = self.navigator.go_to_next_day(today);
                self.fetch_record(ticket)
            }
            Message::Random => {
                let ticket = self.navigator.go_to_random_day(today, &mut rand::thread_rng());
                self.fetch_record(ticket)
            }
            Message::Today => {
                let ticket = self.navigator.go_to_today(today);
                self.fetch_record(ticket)
            }
            Message::RecordFetched(ticket, result) => {
                match self.navigator.resolve(ticket, result) {
                    Resolution::Applied => self.fetch_picture(ticket),
                    Resolution::Superseded => Task::none(),
                }
            }
            Message::PictureFetched(ticket, result) => {
                if !self.navigator.is_live(ticket) {
                    debug!(date = %ticket.date, "Discarding superseded picture");
                    return Task::none();
                }

                self.picture = match result {
                    Ok(bytes) => Picture::Ready(image::Handle::from_bytes(bytes)),
                    Err(err) => {
                        warn!(date = %ticket.date, "⚠️  Failed to download picture: {}", err);
                        Picture::Unavailable
                    }
                };
                Task::none()
            }
        }
    }

    /// Issue the entry fetch for a ticket, tagging the result with it
    fn fetch_record(&self, ticket: Option<FetchTicket>) -> Task<Message> {
        let Some(ticket) = ticket else {
            return Task::none();
        };

        let fetcher = Arc::clone(&self.fetcher);
        Task::perform(
            async move { fetcher.fetch(ticket.date).await },
            move |result| Message::RecordFetched(ticket, result),
        )
    }

    /// Start the picture download once a record has been applied
    fn fetch_picture(&mut self, ticket: FetchTicket) -> Task<Message> {
        let Some(record) = self.navigator.state().record() else {
            return Task::none();
        };

        if record.media_type != MediaType::Image {
            self.picture = Picture::NotAnImage;
            return Task::none();
        }

        self.picture = Picture::Pending;
        let fetcher = Arc::clone(&self.fetcher);
        let url = record.image_url.clone();

        Task::perform(
            async move { fetcher.fetch_picture(&url).await },
            move |result| Message::PictureFetched(ticket, result),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let state = self.navigator.state();
        let controls = Controls::for_state(state);

        match Screen::select(state) {
            Screen::Progress => card::progress(),
            Screen::FutureNotice => card::future_notice(),
            Screen::Record(record) => card::record(record, &self.picture, controls),
            Screen::NoData => card::no_data(controls),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        ui::shortcuts::subscription()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::load();
    let theme = if config.prefers_light_theme() {
        Theme::Light
    } else {
        Theme::Dark
    };
    let fetcher: Arc<dyn ApodFetcher> = Arc::new(HttpApodFetcher::new(&config.api)?);

    info!(endpoint = %config.api.base_url, "🔭 APOD Viewer starting");

    iced::application(
        "Astronomy Picture of the Day",
        ApodViewer::update,
        ApodViewer::view,
    )
    .subscription(ApodViewer::subscription)
    .theme(ApodViewer::theme)
    .centered()
    .run_with(move || ApodViewer::new(fetcher, theme))?;

    Ok(())
}
