use crate::config::Config;
use crate::core::generate::{ScriptStyle, narration_script, thumbnail_prompt};
use crate::core::pipeline::{
    DEFAULT_LOOKBACK_DAYS, DEFAULT_MAX_SUBS, DEFAULT_MIN_VIEWS, RankedResult, ScanProfile,
    SearchCriteria, rank, scan_keyword,
};
use crate::core::youtube::YouTubeClient;
use crate::error::Result;
use crate::tui::components::{ContentViewer, InputField, ResultList, ScanProgress};
use crate::tui::events::AppEvent;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Setup,
    Scanning,
    Results,
    Detail,
}

/// Messages the background scan task sends back to the UI loop.
#[derive(Debug)]
pub enum ScanMessage {
    Status(String),
    Progress(f64),
    Log(String),
    Done(Vec<RankedResult>),
    Failed(String),
}

/// Channel envelope tying a message to the scan that produced it. A
/// cancelled scan's detached task keeps sending; the id lets the UI drop
/// everything from superseded scans instead of attributing it to the
/// current one.
#[derive(Debug)]
pub struct ScanUpdate {
    pub scan_id: u64,
    pub message: ScanMessage,
}

const SETUP_FIELDS: usize = 5; // keyword, days, min views, max subs, history toggle

pub struct App {
    pub state: AppState,
    pub should_quit: bool,

    // Setup screen
    pub keyword_input: InputField,
    pub days_input: InputField,
    pub min_views_input: InputField,
    pub max_subs_input: InputField,
    pub use_history: bool,
    pub input_focus: usize,
    pub notice: Option<String>,

    // Results screen
    pub result_list: ResultList,
    pub scan_style: ScriptStyle,

    // Detail screen
    pub content_viewer: Option<ContentViewer>,
    pub viewer_height: u16,

    // Scanning screen
    pub progress: ScanProgress,

    client: YouTubeClient,

    // Async communication with the scan task. `scan_id` is the generation
    // of the scan currently allowed to report; it advances whenever a scan
    // starts or is cancelled.
    scan_id: u64,
    pub scan_tx: Option<mpsc::UnboundedSender<ScanUpdate>>,
    pub scan_rx: Option<mpsc::UnboundedReceiver<ScanUpdate>>,
}

impl App {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::from_env()?)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let client = YouTubeClient::new(config)?;

        let mut keyword_input = InputField::new("Keyword", "e.g. History, Cars, Quiz");
        keyword_input.focused = true;

        Ok(Self {
            state: AppState::Setup,
            should_quit: false,

            keyword_input,
            days_input: InputField::with_value(
                "Search videos from last X days (1-30)",
                &DEFAULT_LOOKBACK_DAYS.to_string(),
            ),
            min_views_input: InputField::with_value(
                "Minimum views",
                &DEFAULT_MIN_VIEWS.to_string(),
            ),
            max_subs_input: InputField::with_value(
                "Maximum channel subscribers",
                &DEFAULT_MAX_SUBS.to_string(),
            ),
            use_history: false,
            input_focus: 0,
            notice: None,

            result_list: ResultList::new(),
            scan_style: ScriptStyle::Generic,

            content_viewer: None,
            viewer_height: 0,
            progress: ScanProgress::new(),

            client,

            scan_id: 0,
            scan_tx: None,
            scan_rx: None,
        })
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
            }
            AppEvent::Key(key) => {
                self.handle_key(key)?;
            }
            AppEvent::Mouse(mouse) => {
                self.handle_mouse(mouse);
            }
            AppEvent::Tick => {
                self.handle_tick();
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match &self.state {
            AppState::Setup => self.handle_setup_key(key),
            AppState::Scanning => self.handle_scanning_key(key),
            AppState::Results => self.handle_results_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state == AppState::Results {
            self.result_list.handle_mouse(mouse);
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_input_focus(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_input_focus(SETUP_FIELDS - 1);
            }
            KeyCode::Enter => {
                if self.input_focus + 1 < SETUP_FIELDS {
                    self.cycle_input_focus(1);
                } else {
                    self.start_scan();
                }
            }
            KeyCode::Char(' ') if self.input_focus == 4 => {
                self.use_history = !self.use_history;
            }
            _ => {
                if let Some(field) = self.focused_field() {
                    field.handle_key(key);
                }
            }
        }
    }

    fn handle_scanning_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            // Abandon the scan; advancing the generation makes handle_tick
            // drop whatever the detached task still sends.
            self.scan_id += 1;
            self.state = AppState::Setup;
            self.progress.reset();
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Setup;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                self.open_script();
            }
            KeyCode::Char('p') => {
                self.open_prompt();
            }
            _ => {
                self.result_list.handle_key(key);
            }
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state = AppState::Results;
            return;
        }
        if let Some(viewer) = &mut self.content_viewer {
            viewer.handle_key(key, self.viewer_height as usize);
        }
    }

    fn handle_tick(&mut self) {
        let mut updates = Vec::new();
        if let Some(rx) = &mut self.scan_rx {
            while let Ok(update) = rx.try_recv() {
                updates.push(update);
            }
        }

        for update in updates {
            // A superseded scan keeps reporting until its task notices
            // nobody is listening; none of it belongs to the current scan.
            if update.scan_id != self.scan_id {
                continue;
            }
            match update.message {
                ScanMessage::Status(status) => self.progress.set_message(status),
                ScanMessage::Progress(value) => self.progress.set_progress(value),
                ScanMessage::Log(log) => self.progress.add_log(log),
                ScanMessage::Done(results) => {
                    if self.state == AppState::Scanning {
                        self.result_list.update_items(results);
                        self.state = AppState::Results;
                        self.progress.reset();
                    }
                }
                ScanMessage::Failed(error) => {
                    if self.state == AppState::Scanning {
                        self.notice = Some(format!("Scan failed: {error}"));
                        self.state = AppState::Setup;
                        self.progress.reset();
                    }
                }
            }
        }
    }

    fn cycle_input_focus(&mut self, step: usize) {
        self.input_focus = (self.input_focus + step) % SETUP_FIELDS;

        let focus = self.input_focus;
        self.keyword_input.focused = focus == 0;
        self.days_input.focused = focus == 1;
        self.min_views_input.focused = focus == 2;
        self.max_subs_input.focused = focus == 3;
    }

    fn focused_field(&mut self) -> Option<&mut InputField> {
        match self.input_focus {
            0 => Some(&mut self.keyword_input),
            1 => Some(&mut self.days_input),
            2 => Some(&mut self.min_views_input),
            3 => Some(&mut self.max_subs_input),
            _ => None,
        }
    }

    fn start_scan(&mut self) {
        let profile = if self.use_history {
            ScanProfile::history()
        } else {
            if !self.keyword_input.is_valid() {
                self.notice = Some("Please enter a keyword first!".to_string());
                return;
            }
            ScanProfile::generic(self.keyword_input.value.trim())
        };

        // This layer owns input validation: days clamped into [1, 30],
        // counts must be plain numbers.
        let lookback_days = match self.days_input.numeric_value() {
            Some(days) => days.clamp(1, 30) as u32,
            None => {
                self.notice = Some("Days must be a number".to_string());
                return;
            }
        };
        let Some(min_views) = self.min_views_input.numeric_value() else {
            self.notice = Some("Minimum views must be a number".to_string());
            return;
        };
        let Some(max_subs) = self.max_subs_input.numeric_value() else {
            self.notice = Some("Maximum subscribers must be a number".to_string());
            return;
        };

        let criteria = SearchCriteria {
            lookback_days,
            min_views,
            max_subs,
        };

        self.notice = None;
        self.scan_style = profile.style;
        self.scan_id += 1;
        self.progress.reset();
        self.progress.set_message("Starting scan...".to_string());
        self.state = AppState::Scanning;

        if let Some(tx) = &self.scan_tx {
            spawn_scan(
                self.client.clone(),
                profile,
                criteria,
                self.scan_id,
                tx.clone(),
            );
        }
    }

    fn open_script(&mut self) {
        let Some(result) = self.result_list.get_selected() else {
            return;
        };
        let content = narration_script(self.scan_style, &result.title, &result.keyword);
        self.content_viewer = Some(ContentViewer::new(
            format!("Script: {}", result.title),
            content,
        ));
        self.state = AppState::Detail;
    }

    fn open_prompt(&mut self) {
        let Some(result) = self.result_list.get_selected() else {
            return;
        };
        let content = thumbnail_prompt(self.scan_style, &result.title);
        self.content_viewer = Some(ContentViewer::new(
            format!("Thumbnail prompt: {}", result.title),
            content,
        ));
        self.state = AppState::Detail;
    }
}

/// One keyword fully processed before the next begins; any transport error
/// aborts the whole scan and is surfaced through `Failed`.
fn spawn_scan(
    client: YouTubeClient,
    profile: ScanProfile,
    criteria: SearchCriteria,
    scan_id: u64,
    tx: mpsc::UnboundedSender<ScanUpdate>,
) {
    tokio::spawn(async move {
        let send = |message: ScanMessage| {
            let _ = tx.send(ScanUpdate { scan_id, message });
        };

        let now = Utc::now();
        let total = profile.keywords.len();
        let mut results = Vec::new();

        for (index, keyword) in profile.keywords.iter().enumerate() {
            send(ScanMessage::Status(format!("Searching: {keyword}")));
            send(ScanMessage::Progress(index as f64 / total as f64));
            send(ScanMessage::Log(format!("Searching \"{keyword}\"...")));

            match scan_keyword(&client, keyword, &criteria, profile.max_results, now).await {
                Ok(found) => {
                    send(ScanMessage::Log(format!(
                        "{} videos passed the filters",
                        found.len()
                    )));
                    results.extend(found);
                }
                Err(e) => {
                    send(ScanMessage::Failed(e.to_string()));
                    return;
                }
            }
        }

        rank(&mut results);
        send(ScanMessage::Progress(1.0));
        send(ScanMessage::Status("Completed".to_string()));
        send(ScanMessage::Done(results));
    });
}
