use std::io;

use dotinspect::{app::Application, provider::SnapshotProvider};

fn main() {
    // Warnings from dotinspect on stderr; RUST_LOG overrides
    env_logger::Builder::new()
        .filter_module("dotinspect", log::LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let app = Application::new(SnapshotProvider::new());

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    // `run` flushes; a failed flush yields status 1
    let status = app.run(&args, &mut out, &mut err);
    std::process::exit(status);
}
