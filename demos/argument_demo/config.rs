//! Configuration for the argument demo application.
//!
//! | Field      | Flag          | Env var             | Default           |
//! |------------|---------------|---------------------|-------------------|
//! | `host`     | `-host`       | `DEMO_HOST`         | `localhost`       |
//! | `port`     | `-port`       | `DEMO_PORT`         | (required)        |
//! | `verbose`  | `-verbose`    | `DEMO_VERBOSE`      |                   |
//! | `timeout`  | `-timeout`    | `DEMO_TIMEOUT`      | `30s`             |
//! | `brokers`  | `-brokers`    | `DEMO_BROKERS`      | `localhost:9092`  |
//! | `tags`     | `-tags`       | `DEMO_TAGS`         |                   |
//! | `ratio`    | `-ratio`      | `DEMO_RATIO`        |                   |
//! | `started`  | `-started`    | `DEMO_STARTED`      |                   |
//! | `password` |               | `DEMO_PASSWORD`     |                   |
//! | `api_key`  |               | `DEMO_API_KEY`      |                   |

use argument::{
    Arguments, BoxError, Context, DisplayMode, Field, TextCodec, UnixTime, Validate, field,
    named_scalar, text_codec,
};
use chrono::TimeDelta;

/// A listening port outside the privileged range.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Port(pub u16);
named_scalar!(Port(u16) + Validate);

impl Validate for Port {
    fn validate(&self, _ctx: &Context) -> Result<(), BoxError> {
        if self.0 < 1024 {
            return Err(format!("port {} is privileged", self.0).into());
        }
        Ok(())
    }
}

/// A Kafka-style broker address. Bare `host:port` gets `plain://`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Broker(pub String);
text_codec!(Broker);

impl TextCodec for Broker {
    fn decode_text(text: &str) -> Result<Self, BoxError> {
        let text = text.trim();
        if text.is_empty() {
            return Err("empty broker address".into());
        }
        if text.contains("://") {
            Ok(Broker(text.to_string()))
        } else {
            Ok(Broker(format!("plain://{text}")))
        }
    }

    fn encode_text(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Default)]
pub struct DemoConfig {
    pub host: String,
    pub port: Port,
    pub verbose: bool,
    pub timeout: TimeDelta,
    pub brokers: Vec<Broker>,
    pub tags: Vec<String>,
    pub ratio: Option<f64>,
    pub started: Option<UnixTime>,
    pub password: String,
    pub api_key: String,
}

impl Arguments for DemoConfig {
    fn fields() -> Vec<Field<Self>> {
        vec![
            field!(host)
                .arg("host")
                .env("DEMO_HOST")
                .default("localhost")
                .usage("Address to listen on"),
            field!(port)
                .arg("port")
                .env("DEMO_PORT")
                .required()
                .usage("Port to listen on (>= 1024)"),
            field!(verbose)
                .arg("verbose")
                .env("DEMO_VERBOSE")
                .usage("Enable verbose output"),
            field!(timeout)
                .arg("timeout")
                .env("DEMO_TIMEOUT")
                .default("30s")
                .usage("Request timeout, e.g. 1m30s or 1d"),
            field!(brokers)
                .arg("brokers")
                .env("DEMO_BROKERS")
                .default("localhost:9092")
                .usage("Comma separated broker addresses"),
            field!(tags)
                .arg("tags")
                .env("DEMO_TAGS")
                .separator(";")
                .usage("Semicolon separated tags"),
            field!(ratio).arg("ratio").env("DEMO_RATIO"),
            field!(started)
                .arg("started")
                .env("DEMO_STARTED")
                .usage("Start time, unix seconds or RFC 3339"),
            field!(password)
                .env("DEMO_PASSWORD")
                .display(DisplayMode::Length),
            field!(api_key)
                .env("DEMO_API_KEY")
                .display(DisplayMode::Hidden),
        ]
    }

    fn validator(&self) -> Option<&dyn Validate> {
        Some(self)
    }
}

impl Validate for DemoConfig {
    fn validate(&self, _ctx: &Context) -> Result<(), BoxError> {
        if self.brokers.is_empty() {
            return Err("at least one broker is required".into());
        }
        Ok(())
    }
}
