//! Desktop SDL simulator for Xteink X4.
//!
//! Drives the activity stack at a fixed tick rate. Settings persist to
//! `$XTEINK_SETTINGS` (default `xteink-settings.txt`).

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use xteink_activity::ui::{DisplayGui, Theme};
use xteink_activity::{
    App, AppConfig, Button, EnglishStrings, FileSettingsStore, InputEvent, SettingsState,
    DISPLAY_HEIGHT, DISPLAY_WIDTH,
};

const SETTINGS_ENV: &str = "XTEINK_SETTINGS";
const DEFAULT_SETTINGS_PATH: &str = "xteink-settings.txt";
const TICK: Duration = Duration::from_millis(20);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path =
        std::env::var(SETTINGS_ENV).unwrap_or_else(|_| String::from(DEFAULT_SETTINGS_PATH));
    log::info!("settings file: {}", settings_path);
    let settings = SettingsState::load(Box::new(FileSettingsStore::new(settings_path)));

    let config = AppConfig {
        theme: Theme::default(),
        ..AppConfig::default()
    };
    let display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut app = App::new(settings, Box::new(EnglishStrings), config);
    let mut gui = DisplayGui::new(display, app.config().theme);

    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Xteink X4", &output_settings);

    println!("Xteink X4 Simulator");
    println!("Controls:");
    println!("  Left / Right      - Front buttons 3 and 4");
    println!("  Up / Down         - Side buttons");
    println!("  Enter / Space     - Confirm / Select");
    println!("  Backspace         - Back");
    println!("  Escape            - Quit");

    let started = Instant::now();
    app.tick(0, &mut gui);
    window.update(gui.target());

    loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => {
                    app.shutdown();
                    return Ok(());
                }
                SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape,
                    ..
                } => {
                    app.shutdown();
                    return Ok(());
                }
                SimulatorEvent::KeyDown {
                    keycode, repeat, ..
                } => {
                    if let (Some(button), false) = (keycode_to_button(keycode), repeat) {
                        app.input_mut().push_event(InputEvent::Press(button));
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(button) = keycode_to_button(keycode) {
                        app.input_mut().push_event(InputEvent::Release(button));
                    }
                }
                _ => {}
            }
        }

        let now_ms = started.elapsed().as_millis() as u64;
        app.tick(now_ms, &mut gui);
        if let Some(mode) = gui.take_frame() {
            log::trace!("frame {} ({:?})", gui.frames(), mode);
            window.update(gui.target());
        }
        std::thread::sleep(TICK);
    }
}

fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Left | Keycode::A => Some(Button::Left),
        Keycode::Right | Keycode::D => Some(Button::Right),
        Keycode::Up | Keycode::W => Some(Button::Up),
        Keycode::Down | Keycode::S => Some(Button::Down),
        Keycode::Return | Keycode::Space => Some(Button::Confirm),
        Keycode::Backspace => Some(Button::Back),
        Keycode::P => Some(Button::Power),
        _ => None,
    }
}
