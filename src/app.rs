//! App struct: lifecycle, event loop, terminal hosting.
//!
//! [`App`] ties a [`Document`] to a crossterm [`Driver`]. The `new_headless`
//! constructor allows testing without a real terminal.

use std::io;
use std::time::Duration;

use crossterm::event;
use tracing::{debug, info};

use crate::document::{Document, DocumentConfig};
use crate::error::Result;
use crate::event::input::{self, InputEvent};
use crate::render::compositor::Compositor;
use crate::render::driver::Driver;

/// How long the loop waits for input before repainting.
const FRAME: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// Owns the document and the driver. The driver is optional to support
/// headless testing.
pub struct App {
    document: Document,
    /// Terminal output driver. `None` in headless mode.
    driver: Option<Driver>,
    /// Last frame written to the terminal, for diffing.
    previous: Option<Compositor>,
    running: bool,
}

impl App {
    /// Create a new app with a real terminal driver.
    ///
    /// The viewport is sized to the current terminal, overriding the size in
    /// `config`.
    pub fn new(config: DocumentConfig) -> Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let document = Document::new(config.with_size(width, height))?;
        Ok(Self {
            document,
            driver: Some(Driver::new()),
            previous: None,
            running: true,
        })
    }

    /// Create a headless app for testing (no terminal driver).
    pub fn new_headless(config: DocumentConfig) -> Result<Self> {
        Ok(Self {
            document: Document::new(config)?,
            driver: None,
            previous: None,
            running: true,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Run the event loop until a quit key is pressed.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.as_mut() {
            if let Err(err) = driver.start() {
                // Undo whatever part of start succeeded.
                let _ = driver.stop();
                return Err(err.into());
            }
        }
        info!("app started");
        let result = self.event_loop();
        let stopped = match self.driver.as_mut() {
            Some(driver) => driver.stop(),
            None => Ok(()),
        };
        info!("app stopped");
        first_error(result, stopped)
    }

    fn event_loop(&mut self) -> Result<()> {
        while self.running {
            self.paint()?;
            if !event::poll(FRAME)? {
                continue;
            }
            if let Some(input) = input::from_crossterm(event::read()?) {
                self.handle_input(input)?;
            }
        }
        Ok(())
    }

    /// Render the document and write the changed cells to the terminal.
    fn paint(&mut self) -> Result<()> {
        let Some(driver) = self.driver.as_mut() else {
            return Ok(());
        };
        let frame = self.document.render()?;
        let updates = match &self.previous {
            Some(previous) if previous.width == frame.width && previous.height == frame.height => {
                frame.diff(previous)
            }
            _ => frame.full_frame(),
        };
        if !updates.is_empty() {
            driver.draw(&updates)?;
        }
        self.previous = Some(frame.clone());
        Ok(())
    }

    /// Handle an input event.
    ///
    /// Quit keys stop the loop; everything else goes to the document.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Key(key) if key.is_quit() => {
                debug!(?key, "quit requested");
                self.running = false;
                Ok(())
            }
            other => self.document.handle_input(&other),
        }
    }

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Whether the app has a terminal driver (not headless).
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }
}

/// The loop's own error wins over a failure to restore the terminal.
fn first_error(result: Result<()>, stopped: io::Result<()>) -> Result<()> {
    result?;
    stopped?;
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{Key, KeyEvent, Modifiers, MouseEvent};
    use crate::widgets::counter::CounterHandle;

    fn headless_app() -> App {
        App::new_headless(DocumentConfig::new().with_size(40, 3)).unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn headless_app_no_driver() {
        let app = headless_app();
        assert!(!app.has_driver());
        assert!(!app.should_quit());
    }

    #[test]
    fn headless_app_viewport_size() {
        let app = App::new_headless(DocumentConfig::new().with_size(120, 40)).unwrap();
        assert_eq!(app.document().config().width, 120);
        assert_eq!(app.document().config().height, 40);
    }

    #[test]
    fn bad_css_fails_construction() {
        let config = DocumentConfig::new().with_css("my-counter {");
        assert!(App::new_headless(config).is_err());
    }

    // ── request_quit / should_quit ───────────────────────────────────

    #[test]
    fn request_quit() {
        let mut app = headless_app();
        app.request_quit();
        assert!(app.should_quit());
    }

    #[test]
    fn run_headless_returns_once_quit() {
        let mut app = headless_app();
        app.request_quit();
        app.run().unwrap();
    }

    #[test]
    fn loop_error_wins_over_stop_error() {
        let stop_failed = || Err(io::Error::new(io::ErrorKind::Other, "stop"));
        let looped = Err(crate::error::Error::node_not_found("loop"));

        let err = first_error(looped, stop_failed()).unwrap_err();
        assert!(matches!(err, crate::error::Error::NodeNotFound(_)));

        let err = first_error(Ok(()), stop_failed()).unwrap_err();
        assert!(err.to_string().contains("stop"));

        assert!(first_error(Ok(()), Ok(())).is_ok());
    }

    // ── handle_input ─────────────────────────────────────────────────

    #[test]
    fn quit_keys() {
        for key in [
            KeyEvent::new(Key::Char('q'), Modifiers::NONE),
            KeyEvent::new(Key::Escape, Modifiers::NONE),
            KeyEvent::new(Key::Char('c'), Modifiers::CTRL),
        ] {
            let mut app = headless_app();
            app.handle_input(InputEvent::Key(key)).unwrap();
            assert!(app.should_quit(), "{key:?} should quit");
        }
    }

    #[test]
    fn other_keys_keep_running() {
        let mut app = headless_app();
        app.handle_input(InputEvent::Key(KeyEvent::new(Key::Char('z'), Modifiers::NONE)))
            .unwrap();
        assert!(!app.should_quit());
    }

    #[test]
    fn mouse_press_reaches_counter() {
        let mut app = headless_app();
        let counter = CounterHandle::create(app.document_mut()).unwrap();
        app.handle_input(InputEvent::Mouse(MouseEvent::left_press(9, 0)))
            .unwrap();
        app.handle_input(InputEvent::Mouse(MouseEvent::left_press(9, 0)))
            .unwrap();
        assert_eq!(counter.count(app.document()).unwrap(), 2);
    }

    #[test]
    fn resize_reaches_document() {
        let mut app = headless_app();
        app.handle_input(InputEvent::Resize {
            width: 100,
            height: 10,
        })
        .unwrap();
        assert_eq!(app.document().config().width, 100);
        assert_eq!(app.document().compositor().height, 10);
    }
}
