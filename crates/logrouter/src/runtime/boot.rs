//! Boot — logging init, Graylog connection, and the main read loop.

use std::future::Future;

use tokio::io::AsyncBufRead;
use tracing::{debug, info, info_span, Span, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::{GelfEncoder, GelfUdpClient, StructuredLogger};
use crate::conf::cli::APP_NAME;
use crate::conf::hostname::detect_hostname;
use crate::conf::Settings;
use crate::parser::decoder_for;
use crate::pipeline::{Pipeline, PipelineStats};
use crate::runtime::StartupError;

/// Initialise the tracing / logging subsystem.
///
/// `RUST_LOG` wins over `--debug` when set.
pub fn init_logging(debug: bool) {
    let default_filter = if debug { "logrouter=debug" } else { "logrouter=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    log_subscriber(filter, std::io::stdout).init();
}

/// The diagnostic log format: one line per event with source file and line.
pub fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_file(true)
            .with_line_number(true),
    )
}

/// Span carrying `app="LogRouter"`; everything the router logs happens
/// inside it.
pub fn app_span() -> Span {
    info_span!("app", app = APP_NAME)
}

/// Connect to Graylog and attach the configured static attributes.
pub async fn boot(settings: &Settings) -> Result<GelfUdpClient, StartupError> {
    let graylog = &settings.graylog;
    let host = graylog.host.clone().unwrap_or_else(detect_hostname);

    info!(
        "Connecting to Graylog at {}:{} (host={}, compression={}, chunk_size={})",
        graylog.address, graylog.port, host, graylog.compression, graylog.chunk_size
    );

    let encoder = GelfEncoder::new(host, graylog.compression);
    let mut client =
        GelfUdpClient::connect(&graylog.address, graylog.port, encoder, graylog.chunk_size).await?;

    for (name, value) in graylog.attributes.iter() {
        debug!("Static attribute {}={}", name, value);
        client.set_attr(name, value);
    }

    info!("Forwarding to Graylog at {}", client.peer_addr());
    Ok(client)
}

/// Route every line of `input` to `logger` until the input ends or
/// `shutdown` resolves.
pub async fn run<R, F>(
    settings: &Settings,
    logger: &dyn StructuredLogger,
    input: R,
    shutdown: F,
) -> Result<PipelineStats, StartupError>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let decoder = decoder_for(settings.input_format, settings.max_line_bytes);
    let mut pipeline = Pipeline::new(decoder, logger);

    Ok(pipeline.run_until(input, shutdown).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Compression, RecordingLogger};
    use crate::conf::{Attributes, GraylogSettings, OutputTarget};
    use crate::parser::{InputFormat, MAX_LINE_SIZE};
    use crate::record::Severity;
    use serde_json::json;
    use tokio::net::UdpSocket;

    fn settings(input_format: InputFormat, port: u16, attributes: &str) -> Settings {
        Settings {
            input_format,
            output: OutputTarget::Graylog,
            debug: false,
            max_line_bytes: MAX_LINE_SIZE,
            graylog: GraylogSettings {
                address: "127.0.0.1".to_string(),
                port,
                attributes: attributes.parse::<Attributes>().unwrap(),
                host: Some("test-host".to_string()),
                compression: Compression::None,
                chunk_size: crate::client::chunk::DEFAULT_CHUNK_SIZE,
            },
        }
    }

    #[tokio::test]
    async fn test_boot_attaches_attributes() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = server.local_addr().unwrap().port();

        let client = boot(&settings(InputFormat::Logfmt, port, "env:prod,region:us-east"))
            .await
            .unwrap();

        assert_eq!(client.peer_addr().port(), port);
        assert_eq!(
            client.encoder().attributes(),
            &[
                ("env".to_string(), "prod".to_string()),
                ("region".to_string(), "us-east".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_run_uses_configured_format() {
        let logger = RecordingLogger::new();
        let input: &[u8] = b"{\"msg\":\"hello\",\"level\":\"info\",\"user\":\"u1\"}\nplain text\n";

        let stats = run(
            &settings(InputFormat::Json, 12201, ""),
            &logger,
            input,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(stats.lines, 2);
        assert_eq!(stats.emitted, 1);
        assert_eq!(stats.decode_failures, 1);

        let records = logger.records().await;
        assert_eq!(records[0].severity, Severity::Info);
        assert_eq!(records[0].message, "hello");
        assert_eq!(records[0].metadata.get("user"), Some(&json!("u1")));
    }
}
