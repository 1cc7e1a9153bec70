/// Terminal front-end: scene assembly and the interactive render loop
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::info;
use pinhole_core::{
    render_frame, stl, Camera, FrameStats, Framebuffer, MemorySurface, Mesh, Projector,
    RenderResult, Rgb, SceneConfig, Spin, Surface,
};
use std::io::{self, stdout, Stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};

pub mod surface;

pub use surface::TerminalSurface;

/// Everything needed to draw frames, independent of the output surface
pub struct Scene {
    pub mesh: Mesh,
    pub camera: Camera,
    pub config: SceneConfig,
}

impl Scene {
    /// Build from a config, optionally replacing the cube with an STL mesh
    pub fn new(config: SceneConfig, stl_path: Option<&Path>) -> RenderResult<Self> {
        let camera = config.camera()?;
        let mesh = match stl_path {
            Some(path) => {
                let data = std::fs::read(path)?;
                stl::parse_stl(&data)?
            }
            None => config.mesh(),
        };
        info!(
            "scene: {} faces, eye {:?}, looking at {:?}",
            mesh.faces().len(),
            camera.position(),
            camera.point_of_interest()
        );
        Ok(Self {
            mesh,
            camera,
            config,
        })
    }

    pub fn projector(&self, width: usize, height: usize) -> Projector {
        self.config.projector(width, height)
    }

    pub fn color(&self) -> Rgb {
        self.config.render.color
    }

    /// Render one frame with the mesh rotated about the point of interest
    pub fn draw<S: Surface>(
        &self,
        spin: &Spin,
        projector: &Projector,
        framebuffer: &mut Framebuffer<S>,
    ) -> RenderResult<FrameStats> {
        let pivot = self.camera.point_of_interest();
        let mesh = self.mesh.transformed(&spin.matrix_about(&pivot));
        render_frame(&mesh, &self.camera, projector, framebuffer, self.color())
    }
}

/// Render `frames` frames into memory, spinning between frames
pub fn run_headless(
    scene: &Scene,
    width: usize,
    height: usize,
    frames: usize,
) -> RenderResult<Vec<FrameStats>> {
    let projector = scene.projector(width, height);
    let mut framebuffer = Framebuffer::new(MemorySurface::new(width, height))?;
    let mut spin = Spin::default();

    let mut all = Vec::with_capacity(frames);
    for _ in 0..frames {
        all.push(scene.draw(&spin, &projector, &mut framebuffer)?);
        let (pitch, yaw, roll) = AUTO_SPIN;
        spin.advance(pitch, yaw, roll);
    }
    Ok(all)
}

/// Spin applied every frame on top of user input
const AUTO_SPIN: (f32, f32, f32) = (0.01, 0.015, 0.0);
/// Spin per key press
const KEY_STEP: f32 = 0.1;
const FRAME_BUDGET: Duration = Duration::from_millis(1000 / 30);

/// Default `RUST_LOG` filter: warnings would scribble over the alternate
/// screen, so interactive sessions only show errors
pub fn default_log_filter(interactive: bool) -> &'static str {
    if interactive {
        "error"
    } else {
        "warn"
    }
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Quit,
    Rotate { pitch: f32, yaw: f32, roll: f32 },
}

impl KeyAction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let rotate = |pitch, yaw, roll| Some(KeyAction::Rotate { pitch, yaw, roll });
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Char('w') | KeyCode::Up => rotate(KEY_STEP, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => rotate(-KEY_STEP, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => rotate(0.0, -KEY_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => rotate(0.0, KEY_STEP, 0.0),
            KeyCode::Char('e') => rotate(0.0, 0.0, KEY_STEP),
            KeyCode::Char('r') => rotate(0.0, 0.0, -KEY_STEP),
            _ => None,
        }
    }
}

/// Frames-per-second over one-second windows
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FpsMeter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a finished frame; the rate updates once a full second has passed
    pub fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Raw mode plus alternate screen, undone on drop
struct RawScreen;

impl RawScreen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(RawScreen)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    }
}

/// Interactive terminal application
pub struct TerminalApp {
    scene: Scene,
    spin: Spin,
    projector: Projector,
    framebuffer: Framebuffer<TerminalSurface<Stdout>>,
    meter: FpsMeter,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> RenderResult<Self> {
        let (width, height) = terminal::size()?;
        let (width, height) = (width as usize, height as usize);

        Ok(Self {
            projector: scene.projector(width, height),
            framebuffer: Framebuffer::new(TerminalSurface::new(stdout(), width, height))?,
            scene,
            spin: Spin::new(0.3, 0.3, 0.0),
            meter: FpsMeter::new(Instant::now()),
            last_stats: FrameStats::default(),
        })
    }

    /// Run until the user quits
    pub fn run(&mut self) -> RenderResult<()> {
        let _screen = RawScreen::enter()?;

        loop {
            let started = Instant::now();
            if self.drain_input()? {
                return Ok(());
            }

            let (pitch, yaw, roll) = AUTO_SPIN;
            self.spin.advance(pitch, yaw, roll);
            self.render()?;

            if let Some(rest) = FRAME_BUDGET.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
            self.meter.tick(Instant::now());
        }
    }

    /// Apply every pending key press; true once quit was requested
    fn drain_input(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(KeyEvent { code, .. }) = event::read()? else {
                continue;
            };
            match KeyAction::from_key(code) {
                Some(KeyAction::Quit) => return Ok(true),
                Some(KeyAction::Rotate { pitch, yaw, roll }) => {
                    self.spin.advance(pitch, yaw, roll)
                }
                None => {}
            }
        }
        Ok(false)
    }

    fn render(&mut self) -> RenderResult<()> {
        self.last_stats = self
            .scene
            .draw(&self.spin, &self.projector, &mut self.framebuffer)?;

        let mut out = stdout();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "pinhole {:.1} fps | {} points, {} off-screen, {} faces skipped | WASD/arrows rotate, E/R roll, Q quits",
                self.meter.fps(),
                self.last_stats.points_drawn,
                self.last_stats.points_clipped,
                self.last_stats.faces_skipped
            )),
            ResetColor
        )?;
        out.flush()?;
        Ok(())
    }
}
