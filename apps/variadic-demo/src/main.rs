mod app;

fn main() {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();
    app::run_previews();
}
