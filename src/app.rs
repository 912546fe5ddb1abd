use color_eyre::Result;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;

use crate::assets::AssetProvider;
use crate::config::GameConfig;
use crate::game::Game;
use crate::input::{InputEvent, InputManager};
use crate::renderer::TerminalSurface;

/// Terminal host: owns the game and feeds it input and frames
pub struct App {
    running: bool,
    game: Game,
    input_manager: InputManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, assets: &impl AssetProvider, reports_release: bool) -> Self {
        let input_manager = InputManager::new(config.bindings, reports_release);
        Self {
            running: true,
            game: Game::new(config, assets),
            input_manager,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        log::info!(
            "Starting {}x{} playfield",
            self.game.width(),
            self.game.height()
        );
        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            self.input_manager.poll_events()?;
            for event in self.input_manager.take_events() {
                self.handle_event(event);
            }

            // ~60 FPS
            std::thread::sleep(Duration::from_millis(16));
        }
        log::info!("Exiting with score {}", self.game.score());
        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(key) => self.game.key_down(key),
            InputEvent::Released(key) => self.game.key_up(key),
            InputEvent::Quit => self.quit(),
        }
    }

    /// Draws the border and hint line, then advances the game one frame
    /// inside the border.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Wave Shooter ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [1/Space: Fire] [R: Restart] [Esc: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);

        let (width, height) = (self.game.width(), self.game.height());
        let mut surface = TerminalSurface::new(frame.buffer_mut(), inner, width, height);
        self.game.frame(&mut surface);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
