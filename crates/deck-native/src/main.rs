use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use instant::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use deck_core::{
    normalize_pointer, tarot_deck, DeckParams, InboxMessage, PointerButton, PointerEvent, Session,
};

mod render;
mod sources;

use render::GpuState;
use sources::{FsAssetLoader, ReplaySource};

// roughly the cadence of a webcam hand tracker
const REPLAY_FRAME: Duration = Duration::from_millis(33);

#[derive(Debug, Parser)]
#[command(name = "deck-native")]
#[command(about = "Gesture-driven tarot deck", long_about = None)]
struct Options {
    /// Recorded hand landmark capture to replay instead of a live camera
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Directory holding the card artwork
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Seed for star placement, ash and reversed draws
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn window_title(session: &Session) -> String {
    let hud = session.hud();
    let mut title = format!("Arcana · {}", hud.deck_label());
    if let Some(detail) = &hud.detail {
        title.push_str(&format!(" · {} ({})", detail.title, detail.subtitle));
    } else if let Some(notice) = hud.notice {
        title.push_str(&format!(" · {}", notice.text()));
    }
    if hud.burn_hint {
        title.push_str(" · make a fist to burn");
    }
    title
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let opts = Options::parse();
    let mut session = Session::new(tarot_deck(), DeckParams::default(), opts.seed);
    let inbox = session.sender();

    let loader = FsAssetLoader::spawn(opts.assets.clone(), inbox.clone())?;
    match &opts.landmarks {
        Some(path) => ReplaySource {
            path: path.clone(),
            frame: REPLAY_FRAME,
        }
        .start(inbox.clone()),
        None => {
            inbox.send(InboxMessage::CameraFailed(
                "no landmark source configured".into(),
            ));
        }
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(&session))
        .build(&event_loop)?;
    let size = window.inner_size();
    session.set_aspect(size.width as f32 / size.height.max(1) as f32);

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let mut last_frame = Instant::now();
    let mut last_title = String::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                session.set_aspect(size.width as f32 / size.height.max(1) as f32);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                elwt.exit()
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = state.window.inner_size();
                let ndc = normalize_pointer(
                    position.x as f32,
                    position.y as f32,
                    size.width as f32,
                    size.height as f32,
                );
                inbox.pointer(PointerEvent::Move { x: ndc.x, y: ndc.y });
            }
            WindowEvent::MouseInput { state: press, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return,
                };
                match press {
                    ElementState::Pressed => inbox.pointer(PointerEvent::Down(button)),
                    ElementState::Released => inbox.pointer(PointerEvent::Up),
                };
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            session.tick(now - last_frame);
            last_frame = now;

            for request in session.take_asset_requests() {
                loader.request(request);
            }
            let title = window_title(&session);
            if title != last_title {
                state.window.set_title(&title);
                last_title = title;
            }

            match state.render(&session) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        Event::LoopExiting => {
            for pick in session.selections() {
                log::info!(
                    "[deck] drawn: {}{}",
                    pick.name,
                    if pick.reversed { " (reversed)" } else { "" }
                );
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_asset_dir_and_fixed_seed() {
        let opts = Options::try_parse_from(["deck-native"]).unwrap();
        assert_eq!(opts.landmarks, None);
        assert_eq!(opts.assets, PathBuf::from("assets"));
        assert_eq!(opts.seed, 42);
    }

    #[test]
    fn options_accept_every_flag() {
        let opts = Options::try_parse_from([
            "deck-native",
            "--landmarks",
            "hand.txt",
            "--assets",
            "art",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(opts.landmarks, Some(PathBuf::from("hand.txt")));
        assert_eq!(opts.assets, PathBuf::from("art"));
        assert_eq!(opts.seed, 7);
    }

    #[test]
    fn options_reject_bad_seed_and_unknown_flags() {
        assert!(Options::try_parse_from(["deck-native", "--seed", "-3"]).is_err());
        assert!(Options::try_parse_from(["deck-native", "--camera"]).is_err());
    }
}
