use macroquad::prelude::*;
use pedal_board::board::PedalBoard;
use pedal_board::widgets::PointerInput;

const SCREEN_WIDTH: f32 = 800.0;
const SCREEN_HEIGHT: f32 = 600.0;

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut size = vec2(screen_width(), screen_height());
    let mut board = PedalBoard::new(Rect::new(0.0, 0.0, size.x, size.y));
    log::info!("pedal board ready at {}x{}", size.x, size.y);

    loop {
        let current = vec2(screen_width(), screen_height());
        if current != size {
            size = current;
            board.resized(Rect::new(0.0, 0.0, size.x, size.y));
            log::debug!("window resized to {}x{}", size.x, size.y);
        }

        let input = PointerInput::capture();
        if let Err(err) = board.update(&input) {
            log::warn!("{err:#}");
        }

        clear_background(BLACK);
        board.draw(input.position);

        next_frame().await;
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Pedal Board".into(),
        fullscreen: false,
        sample_count: 1,
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: true,
        high_dpi: false,
        ..Default::default()
    }
}
