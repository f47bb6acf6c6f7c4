//! haighframe demo - opens one window from the user configuration
//!
//! F11 toggles fullscreen, F2 cycles the border style, L toggles the
//! cursor lock and Escape asks the window to close. Without a Windows
//! desktop the same session is replayed against the simulated platform.

#![cfg_attr(windows, windows_subsystem = "windows")]

use anyhow::Result;
use log::{debug, info};

use haighframe::platform::Platform;
use haighframe::render::GraphicsBootstrap;
use haighframe::{BorderStyle, Config, Window, WindowEvent, WindowState};

const VK_ESCAPE: u16 = 0x1B;
const VK_F2: u16 = 0x71;
const VK_F11: u16 = 0x7A;
const VK_L: u16 = 0x4C;

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_or_default()?;

    // Initialize logging
    env_logger::builder()
        .filter_level(config.logging.level_filter())
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    info!("Starting haighframe demo v{}", env!("CARGO_PKG_VERSION"));
    run(config)?;
    info!("haighframe demo shutting down gracefully");
    Ok(())
}

#[cfg(windows)]
fn run(config: Config) -> Result<()> {
    use haighframe::platform::win32::Win32Platform;
    use haighframe::render::wgl::WglBootstrap;

    let mut window = Window::new(Win32Platform::new(), WglBootstrap::new(), &config.window)?;
    while window.is_open() {
        window.process_events();
        handle_events(&mut window);
        if window.is_open() {
            window.swap_buffers();
        }
        std::thread::sleep(std::time::Duration::from_millis(16));
    }
    Ok(())
}

#[cfg(not(windows))]
fn run(config: Config) -> Result<()> {
    use haighframe::events::KeyCode;
    use haighframe::platform::simulated::{SimulatedGraphics, SimulatedPlatform};

    let platform = SimulatedPlatform::new();
    let graphics = SimulatedGraphics::new(platform.log());
    let mut window = Window::new(platform, graphics, &config.window)?;

    for vk in [VK_F11, VK_F11, VK_F2, VK_L, VK_ESCAPE] {
        let key = KeyCode {
            virtual_key: vk,
            scan_code: 0,
        };
        window.platform_mut().press_key(key);
        window.process_events();
        handle_events(&mut window);
        if !window.is_open() {
            break;
        }
        window.swap_buffers();
    }
    Ok(())
}

/// Apply the demo key bindings to everything queued since the last frame
fn handle_events<P: Platform, G: GraphicsBootstrap>(window: &mut Window<P, G>) {
    let events: Vec<WindowEvent> = window.drain_events().collect();
    for event in events {
        match event {
            WindowEvent::KeyDown(key) => match key.virtual_key {
                VK_F11 => {
                    let next = if window.state() == WindowState::Fullscreen {
                        WindowState::Normal
                    } else {
                        WindowState::Fullscreen
                    };
                    window.set_state(next);
                }
                VK_F2 => {
                    let next = match window.border() {
                        BorderStyle::SizingBorder => BorderStyle::Border,
                        BorderStyle::Border => BorderStyle::NoBorder,
                        BorderStyle::NoBorder => BorderStyle::SizingBorder,
                    };
                    window.set_border(next);
                }
                VK_L => {
                    let locked = !window.is_cursor_locked();
                    window.set_cursor_locked(locked);
                }
                VK_ESCAPE => window.close(),
                _ => {}
            },
            WindowEvent::Resized { width, height } => info!("Resized to {}x{}", width, height),
            WindowEvent::DpiChanged { scale } => info!("Scale is now {:.2}", scale),
            WindowEvent::Closed => info!("Window closed"),
            other => debug!("{:?}", other),
        }
    }
}
