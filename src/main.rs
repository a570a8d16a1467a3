use std::any::Any;
use std::env;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use log::info;
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{
    ElementState, Event, KeyboardInput, MouseButton as WinitMouseButton, WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use shading_lab::{
    InputState, KeyCode, NamedKey, OrbitCamera, Renderer, SceneCommand, SceneState, TextureImage,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    if options.summary_only {
        print_scene_summary(&SceneState::demo());
        return Ok(());
    }

    // An explicitly requested texture that fails to load is fatal; with no
    // path the built-in checkerboard keeps the demo self-contained.
    let texture = match &options.texture {
        Some(path) => TextureImage::load(path)?,
        None => TextureImage::checkerboard(),
    };

    match run_interactive(texture) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                print_scene_summary(&SceneState::demo());
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

fn run_interactive(texture: TextureImage) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let event_loop =
        event_loop.map_err(|panic| WindowInitError::from_panic("event loop", panic))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Shading Lab")
            .with_inner_size(LogicalSize::new(900.0, 900.0))
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );

    let scene = SceneState::demo();
    let mut renderer = block_on(Renderer::new(Arc::clone(&window), &texture))?;
    renderer.sync_scene(&scene);

    let mut app = AppState {
        renderer,
        scene,
        camera: OrbitCamera::new(),
        input: InputState::new(),
        last_error: None,
    };

    let mut event_loop = event_loop;
    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        if let Err(err) = app.process_event(&event, control_flow) {
            app.last_error = Some(err);
            control_flow.set_exit();
        }
    });

    print_scene_summary(&app.scene);

    if let Some(err) = app.last_error {
        return Err(err);
    }

    Ok(())
}

struct AppState {
    renderer: Renderer,
    scene: SceneState,
    camera: OrbitCamera,
    input: InputState,
    last_error: Option<anyhow::Error>,
}

impl AppState {
    fn process_event(&mut self, event: &Event<()>, control_flow: &mut ControlFlow) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.renderer.resize(*size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        self.renderer.resize(**new_inner_size);
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        self.handle_keyboard(input, control_flow);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        self.handle_mouse_button(*state, *button);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let pos = Vec2::new(position.x as f32, position.y as f32);
                        self.input.set_mouse_position(pos);
                    }
                    _ => {}
                }
            }
            Event::RedrawRequested(window_id) if *window_id == self.renderer.window_id() => {
                self.camera.update(&self.input);
                let params = self.camera.params(self.renderer.aspect());
                self.renderer.update_globals(&params);
                if let Err(err) = self.renderer.render(&self.scene) {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            let size = self.renderer.window().inner_size();
                            self.renderer.resize(size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            return Err(anyhow!("GPU is out of memory"));
                        }
                        wgpu::SurfaceError::Timeout => {
                            info!("Surface timeout; retrying next frame");
                        }
                    }
                }
            }
            Event::MainEventsCleared => {
                self.renderer.window().request_redraw();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_keyboard(&mut self, input: &KeyboardInput, control_flow: &mut ControlFlow) {
        let Some(keycode) = input.virtual_keycode.and_then(map_keycode) else {
            return;
        };
        match input.state {
            ElementState::Pressed => {
                // Only fresh presses fire a command; held keys repeat on
                // some platforms.
                if self.input.set_key_down(keycode) {
                    self.handle_command_key(keycode, control_flow);
                }
            }
            ElementState::Released => self.input.set_key_up(keycode),
        }
    }

    fn handle_command_key(&mut self, key: KeyCode, control_flow: &mut ControlFlow) {
        match key {
            KeyCode::Character('M') => self.apply(SceneCommand::SwitchFamily),
            KeyCode::Character('S') => self.apply(SceneCommand::ToggleStage),
            KeyCode::Character('L') => self.apply(SceneCommand::ToggleLightCount),
            KeyCode::Character('T') => self.apply(SceneCommand::CycleTextureMode),
            KeyCode::Character('C') => {
                self.camera.controls_enabled = !self.camera.controls_enabled;
                info!(
                    "camera controls {}",
                    if self.camera.controls_enabled {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
            }
            KeyCode::Named(NamedKey::Escape) => control_flow.set_exit(),
            _ => {}
        }
    }

    fn apply(&mut self, command: SceneCommand) {
        let rebuilt = self.scene.apply(command);
        for id in &rebuilt {
            self.renderer.rebuild_object(&self.scene, *id);
        }
        info!(
            "{command:?}: showing {:?}, {} light(s), rebuilt {} object(s)",
            self.scene.active_family(),
            self.scene.lights.active_count(),
            rebuilt.len()
        );
    }

    fn handle_mouse_button(&self, state: ElementState, button: WinitMouseButton) {
        let index = match button {
            WinitMouseButton::Left => 0,
            WinitMouseButton::Right => 1,
            WinitMouseButton::Middle => 2,
            WinitMouseButton::Other(value) => value,
        } as u8;
        let button = shading_lab::MouseButton::new(index);
        match state {
            ElementState::Pressed => self.input.set_mouse_button_down(button),
            ElementState::Released => self.input.set_mouse_button_up(button),
        }
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

fn print_scene_summary(scene: &SceneState) {
    println!(
        "Scene: {} spheres + {} cylinders, showing {:?}, {} active light(s)",
        scene.spheres.len(),
        scene.cylinders.len(),
        scene.active_family(),
        scene.lights.active_count()
    );
    for object in scene.spheres.iter().chain(scene.cylinders.iter()) {
        let material = object.shading.material();
        println!(
            " - {} stage={:?} texture={:?} ka={:.2} kd={:.2} ks={:.2} shininess={:.0}",
            object.name,
            object.shading.stage(),
            object.shading.texture_mode(),
            material.ambient_weight,
            material.diffuse_weight,
            material.specular_weight,
            material.shininess
        );
    }
}

fn map_keycode(code: winit::event::VirtualKeyCode) -> Option<KeyCode> {
    use winit::event::VirtualKeyCode as Key;
    Some(match code {
        Key::Escape => KeyCode::Named(NamedKey::Escape),
        Key::Space => KeyCode::Named(NamedKey::Space),
        Key::C => KeyCode::Character('C'),
        Key::L => KeyCode::Character('L'),
        Key::M => KeyCode::Character('M'),
        Key::S => KeyCode::Character('S'),
        Key::T => KeyCode::Character('T'),
        _ => return None,
    })
}

struct CliOptions {
    texture: Option<String>,
    summary_only: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut texture = None;
        let mut summary_only = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--texture" => {
                    texture = Some(args.next().context("--texture requires a path")?);
                }
                "--summary-only" => summary_only = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: shading-lab [--texture <path>] [--summary-only]"
                    ));
                }
            }
        }
        Ok(Self {
            texture,
            summary_only,
        })
    }
}
