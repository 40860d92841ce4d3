use btc_data_mcp::logging::init_tracing;
use btc_data_mcp::server::serve_stdio;
use btc_data_mcp::ToolDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    serve_stdio(ToolDispatcher::from_env()).await
}
