use crate::tui::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use inbuddy::session::{ComposeBox, Key, SessionHandle, SessionSnapshot};

const PAGE: u16 = 10;

pub struct App {
    session: SessionHandle,
    pub snapshot: SessionSnapshot,
    pub compose: ComposeBox,
    pub relay_url: String,

    /// First visible transcript row
    pub scroll: u16,
    /// Largest useful scroll offset, updated on every render
    pub max_scroll: u16,
    /// Keep the newest message in view
    pub follow: bool,
    seen_generation: u64,

    /// Submitted but not yet reflected in a snapshot
    pending_submit: bool,
    /// Client-side problem shown when the session has no error of its own
    pub notice: Option<String>,
    pub animation_frame: u8,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: SessionHandle, relay_url: String) -> Self {
        let snapshot = session.snapshot();
        Self {
            seen_generation: snapshot.scroll_generation,
            session,
            snapshot,
            compose: ComposeBox::new(),
            relay_url,
            scroll: 0,
            max_scroll: 0,
            follow: true,
            pending_submit: false,
            notice: None,
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Loading as far as the UI is concerned
    pub fn is_loading(&self) -> bool {
        self.pending_submit || self.snapshot.is_loading()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize => {}
            AppEvent::Tick => {
                if self.is_loading() {
                    self.animation_frame = (self.animation_frame + 1) % 3;
                }
            }
            AppEvent::Session => self.refresh(),
        }
    }

    fn refresh(&mut self) {
        let snapshot = self.session.snapshot();
        if snapshot.scroll_generation != self.seen_generation {
            self.seen_generation = snapshot.scroll_generation;
            self.follow = true;
            self.pending_submit = false;
        }
        self.snapshot = snapshot;
    }

    /// Text for the error banner, if any
    pub fn banner(&self) -> Option<&str> {
        self.snapshot.error().or(self.notice.as_deref())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let compose_key = match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Enter => Key::Enter {
                // Alt+Enter for terminals that cannot report Shift+Enter
                shift: key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT),
            },
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(c),
            KeyCode::Up => return self.scroll_up(1),
            KeyCode::Down => return self.scroll_down(1),
            KeyCode::PageUp => return self.scroll_up(PAGE),
            KeyCode::PageDown => return self.scroll_down(PAGE),
            _ => return,
        };

        if let Some(text) = self.compose.handle_key(compose_key, self.is_loading()) {
            if self.session.submit(text.clone()) {
                self.pending_submit = true;
                self.notice = None;
            } else {
                tracing::warn!("Session is not accepting submissions");
                self.compose.restore(&text);
                self.notice = Some("Message not sent: the chat session is busy or stopped".to_string());
            }
        }
    }

    fn scroll_up(&mut self, rows: u16) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(rows);
    }

    fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
        self.follow = self.scroll == self.max_scroll;
    }
}
