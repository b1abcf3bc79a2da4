mod app;
mod app_dir;
mod error;
mod input;
mod io_worker;
mod navigation;
mod preferences;
mod surface;
mod ui;

fn main() -> eframe::Result {
    app::run()
}
