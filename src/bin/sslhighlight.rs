use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = ssltools::run(std::env::args_os()) {
        eprintln!("处理报告时出错: {err:#}");
        std::process::exit(1);
    }
}
