mod color;
mod compositor;
mod message;
mod surface;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;

use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use structopt::StructOpt;
use winit::{
    dpi::LogicalSize,
    event::{Event, VirtualKeyCode},
    event_loop::{ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowBuilder},
};
use winit_input_helper::WinitInputHelper;

use crate::compositor::Compositor;
use crate::message::{Inbound, Outbound};
use crate::surface::Surface;

// Starting size until the collaborator sends its settings.
const DEFAULT_WIDTH: u32 = 400;
const DEFAULT_HEIGHT: u32 = 400;

struct WindowSurface {
    window: Window,
    pixels: Pixels,
}

impl Surface for WindowSurface {
    fn configure(&mut self, width: u32, height: u32) {
        let size = LogicalSize::new(width, height);
        self.window.set_inner_size(size);
        self.window.set_min_inner_size(Some(size));
        self.pixels.resize_buffer(width, height);
    }

    fn blit(&mut self, frame: &[u8]) {
        self.pixels.get_frame().copy_from_slice(frame);
        self.window.request_redraw();
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mandelbrot-view",
    about = "Displays precomputed mandelbrot rows in a window."
)]
struct Opt {
    /// Message stream to read instead of stdin.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();
    let event_loop = EventLoop::with_user_event();
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        WindowBuilder::new()
            .with_title("Mandelbrot")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)
            .unwrap()
    };

    let pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, surface_texture).unwrap()
    };

    let mut surface = WindowSurface { window, pixels };
    let mut compositor = Compositor::new();
    spawn_reader(opt.input, event_loop.create_proxy());
    info!("waiting for initial settings");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::RedrawRequested(_) = event {
            if surface
                .pixels
                .render()
                .map_err(|e| error!("pixels.render() failed: {}", e))
                .is_err()
            {
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if let Event::UserEvent(message) = &event {
            match compositor.handle(message.clone(), &mut surface) {
                Ok(Some(reply)) => send_reply(&reply),
                Ok(None) => {}
                Err(err) => error!("dropped message: {}", err),
            }
        }

        if input.update(&event) {
            // Close events
            if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            // Resize the window
            if let Some(size) = input.window_resized() {
                surface.pixels.resize_surface(size.width, size.height);
                surface.window.request_redraw();
            }
        }
    })
}

/// Parse messages off the stream on a side thread and forward them to the
/// event loop, which applies them one at a time in arrival order.
fn spawn_reader(input: Option<PathBuf>, proxy: EventLoopProxy<Inbound>) {
    thread::spawn(move || {
        let reader: Box<dyn BufRead> = match input {
            Some(path) => match File::open(&path) {
                Ok(file) => {
                    info!("reading rows from {}", path.display());
                    Box::new(BufReader::new(file))
                }
                Err(err) => {
                    error!("could not open {}: {}", path.display(), err);
                    return;
                }
            },
            None => {
                info!("reading rows from stdin");
                Box::new(BufReader::new(io::stdin()))
            }
        };

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    error!("stream read failed: {}", err);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Inbound>(&line) {
                Ok(message) => {
                    // The loop is gone, nothing left to deliver to.
                    if proxy.send_event(message).is_err() {
                        break;
                    }
                }
                Err(err) => warn!("skipping malformed message: {}", err),
            }
        }
    });
}

fn send_reply(reply: &Outbound) {
    let line = serde_json::to_string(reply).unwrap();
    let mut stdout = io::stdout();
    if writeln!(stdout, "{}", line)
        .and_then(|()| stdout.flush())
        .is_err()
    {
        warn!("reply not delivered, stdout is closed");
    }
}
