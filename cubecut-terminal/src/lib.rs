/// Terminal front end: cube view plus three angle sliders
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cubecut_core::{Axis, Rgb, Scene, SceneError};
use log::{debug, info};
use rand_chacha::ChaCha8Rng;
use std::io::{self, stdout, Write};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Slider range in degrees
pub const ANGLE_MIN: f64 = 0.0;
pub const ANGLE_MAX: f64 = 360.0;

/// Rows reserved below the view for the sliders and the help line
const CONTROL_ROWS: u16 = 5;
const SLIDER_WIDTH: usize = 36;

/// Main application struct for the terminal cube viewer
pub struct TerminalApp {
    scene: Scene,
    rng: ChaCha8Rng,
    renderer: AsciiRenderer,
    selected: Axis,
    step: f64,
    running: bool,
    size: (u16, u16),
}

impl TerminalApp {
    pub fn new(scene: Scene, rng: ChaCha8Rng, step: f64) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, rng, step, width, height))
    }

    pub fn with_size(scene: Scene, rng: ChaCha8Rng, step: f64, width: u16, height: u16) -> Self {
        Self {
            scene,
            rng,
            renderer: view_renderer(width, height),
            selected: Axis::X,
            step,
            running: true,
            size: (width, height),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected(&self) -> Axis {
        self.selected
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        self.render()?;

        // Redraw only after an event changed something
        while self.running {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key)?,
                Event::Resize(width, height) => self.resize(width, height),
                _ => continue,
            }
            if self.running {
                self.render()?;
            }
        }

        Ok(())
    }

    /// Apply one key press to the sliders or the scene
    pub fn handle_key(&mut self, KeyEvent { code, .. }: KeyEvent) -> Result<(), SceneError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Up | KeyCode::Char('w') => {
                self.selected = Axis::ALL[(self.selected.index() + 2) % 3];
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Tab => {
                self.selected = Axis::ALL[(self.selected.index() + 1) % 3];
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.selected = Axis::try_from(c as usize - '1' as usize)?;
            }
            KeyCode::Left | KeyCode::Char('a') => self.nudge(-self.step),
            KeyCode::Right | KeyCode::Char('d') => self.nudge(self.step),
            KeyCode::Home => self.set_selected(ANGLE_MIN),
            KeyCode::End => self.set_selected(ANGLE_MAX),
            KeyCode::Char('n') => {
                self.scene.regenerate_plane(&mut self.rng)?;
                info!("new cutting plane: {}", self.scene.cross_section().equation());
            }
            _ => {}
        }
        Ok(())
    }

    fn nudge(&mut self, delta: f64) {
        let current = self.scene.angles().get(self.selected);
        self.set_selected(current + delta);
    }

    fn set_selected(&mut self, degrees: f64) {
        let degrees = degrees.clamp(ANGLE_MIN, ANGLE_MAX);
        self.scene.change_angle(self.selected, degrees);
    }

    fn resize(&mut self, width: u16, height: u16) {
        debug!("terminal resized to {width}x{height}");
        self.size = (width, height);
        self.renderer = view_renderer(width, height);
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.render_frame(self.scene.frame());

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;

        let (width, height) = self.size;
        let column = (width as usize).saturating_sub(self.renderer.width()) as u16 / 2;
        self.renderer.draw(&mut stdout, column, 0)?;

        let first_slider = height.saturating_sub(CONTROL_ROWS);
        let angles = self.scene.angles();
        for (offset, axis) in Axis::ALL.into_iter().enumerate() {
            let color = if axis == self.selected {
                renderer::to_color(Rgb::ACCENT)
            } else {
                Color::White
            };
            queue!(
                stdout,
                cursor::MoveTo(2, first_slider + offset as u16),
                SetForegroundColor(color),
                Print(slider_line(axis, angles.get(axis), axis == self.selected)),
            )?;
        }

        queue!(
            stdout,
            cursor::MoveTo(2, first_slider + 4),
            SetForegroundColor(Color::DarkGrey),
            Print("Left/Right adjust  Up/Down select  n new plane  q quit"),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

fn view_renderer(width: u16, height: u16) -> AsciiRenderer {
    let rows = height.saturating_sub(CONTROL_ROWS + 1);
    AsciiRenderer::fitting(width as usize, rows as usize)
}

/// One slider row, e.g. `> X [=========|----------]  45°`
pub fn slider_line(axis: Axis, degrees: f64, selected: bool) -> String {
    let marker = if selected { '>' } else { ' ' };
    format!(
        "{marker} {} [{}] {:>3.0}°",
        axis.label(),
        slider_bar(degrees, SLIDER_WIDTH),
        degrees
    )
}

fn slider_bar(degrees: f64, width: usize) -> String {
    let fraction = ((degrees - ANGLE_MIN) / (ANGLE_MAX - ANGLE_MIN)).clamp(0.0, 1.0);
    let knob = ((width - 1) as f64 * fraction).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '=',
            std::cmp::Ordering::Equal => '|',
            std::cmp::Ordering::Greater => '-',
        })
        .collect()
}
