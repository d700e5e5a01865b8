use anyhow::Result;
use log::{error, info};
use std::collections::VecDeque;
use stride::engine::game_loop::GameLoop;
use stride::engine::input::KeyboardInput;
use stride::game::character::{standard_clips, CharacterController};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Stride...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Stride")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Clips arrive one per frame, the way an asynchronous loader would deliver them
    let mut pending_clips: VecDeque<_> = standard_clips()?.into();
    let mut character = CharacterController::default();
    let mut keyboard = KeyboardInput::default();
    let mut game_loop = GameLoop::new();
    let mut shown_title = String::new();

    info!("Controls: W/S move, A/D turn, Shift sprint, Space attack, P pause, T slow motion");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} frames ({} simulation steps), shutting down...",
                    game_loop.frame_count(),
                    game_loop.step_count()
                );
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never reach us
                keyboard.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::KeyP) => game_loop.toggle_pause(),
                        PhysicalKey::Code(KeyCode::KeyT) => {
                            let scale = if game_loop.time_scale() < 1.0 { 1.0 } else { 0.25 };
                            game_loop.set_time_scale(scale);
                        }
                        _ => {}
                    }
                }
                keyboard.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if let Some(clip) = pending_clips.pop_front() {
                    if let Err(e) = character.clip_loaded(clip) {
                        error!("Failed to start character: {}", e);
                        elwt.exit();
                        return;
                    }
                }

                let steps = game_loop.begin_frame();
                let input = keyboard.snapshot();
                for _ in 0..steps {
                    if let Err(e) = character.update(game_loop.fixed_timestep(), &input) {
                        error!("Character update failed: {}", e);
                        elwt.exit();
                        return;
                    }
                }

                // Refresh the title whenever the state or load progress changes
                let title = format!("Stride - {}", character.status());
                if title != shown_title {
                    window.set_title(&title);
                    shown_title = title;
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
