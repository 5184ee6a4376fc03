use firmdesk_lib::bootstrap::{init_tracing_subscriber, resolve_config, run, ListRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = resolve_config()?;
    init_tracing_subscriber(&config.logging)?;

    let request = ListRequest::from_args(std::env::args().skip(1));
    run(config, request).await
}
