const DEFAULT_LOG_FILTER: &str = "warn,gooey_palette=info";

pub fn setup() {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());

    env_logger::Builder::new()
        .parse_filters(&directives)
        .format_target(false)
        .init();
}
