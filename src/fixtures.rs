#[cfg(test)]
pub mod test {
    use chrono::{NaiveDate, TimeDelta};

    use crate::error::BoxError;
    use crate::{Arguments, Context, DisplayMode, Field, TextCodec, Validate};

    #[derive(Debug, Default, PartialEq)]
    pub struct TestConfig {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        pub timeout: TimeDelta,
        pub names: Vec<String>,
        pub rate: Option<f64>,
        pub prefix: String,
        pub token: String,
        pub secret: String,
        pub notes: String,
    }

    impl Arguments for TestConfig {
        fn fields() -> Vec<Field<Self>> {
            vec![
                crate::field!(host)
                    .arg("host")
                    .env("HOST")
                    .default("localhost")
                    .usage("The application host."),
                crate::field!(port).arg("port").env("PORT").required(),
                crate::field!(debug).arg("debug").env("DEBUG"),
                crate::field!(timeout)
                    .arg("timeout")
                    .env("TIMEOUT")
                    .default("30s"),
                crate::field!(names)
                    .arg("names")
                    .env("NAMES")
                    .default("alice, bob"),
                crate::field!(rate).arg("rate").env("RATE"),
                crate::field!(prefix).env("PREFIX").default(""),
                crate::field!(token).env("TOKEN").display(DisplayMode::Length),
                crate::field!(secret).env("SECRET").display(DisplayMode::Hidden),
                crate::field!(notes),
            ]
        }
    }

    // -- Named scalars and custom codecs -----------------------------------------

    /// An unprivileged port number.
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub struct Port(pub u16);
    crate::named_scalar!(Port(u16) + Validate);

    impl Validate for Port {
        fn validate(&self, _ctx: &Context) -> Result<(), BoxError> {
            if self.0 < 1024 {
                return Err(format!("port {} is below 1024", self.0).into());
            }
            Ok(())
        }
    }

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub struct Active(pub bool);
    crate::named_scalar!(Active(bool));

    /// A broker address; bare `host:port` gets the `plain://` scheme.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Broker(pub String);
    crate::text_codec!(Broker);

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

    /// A broker list with its own non-empty rule.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Brokers(pub Vec<Broker>);
    crate::named_scalar!(Brokers(Vec<Broker>) + Validate);

    impl Validate for Brokers {
        fn validate(&self, _ctx: &Context) -> Result<(), BoxError> {
            if self.0.is_empty() {
                return Err("at least one broker required".into());
            }
            Ok(())
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Validated {
        pub port: Port,
        pub ports: Vec<Port>,
        pub brokers: Brokers,
        pub active: Active,
        pub level: Option<Port>,
    }

    impl Arguments for Validated {
        fn fields() -> Vec<Field<Self>> {
            vec![
                crate::field!(port).arg("port").env("PORT").default("8080"),
                crate::field!(ports).env("PORTS"),
                crate::field!(brokers)
                    .env("BROKERS")
                    .default("localhost:9092")
                    .required(),
                crate::field!(active).env("ACTIVE").required(),
                crate::field!(level).env("LEVEL"),
            ]
        }

        fn validator(&self) -> Option<&dyn Validate> {
            Some(self)
        }
    }

    impl Validate for Validated {
        fn validate(&self, ctx: &Context) -> Result<(), BoxError> {
            if ctx.is_cancelled() {
                return Err("validation cancelled".into());
            }
            if self.port.0 == 9999 {
                return Err("port 9999 is reserved".into());
            }
            Ok(())
        }
    }

    /// A list of ports with no hook of its own.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Ports(pub Vec<Port>);
    crate::named_scalar!(Ports(Vec<Port>));

    /// A host list decoded as one unit: `;`-separated, never empty.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Hosts(pub Vec<String>);
    crate::text_codec!(Hosts);

    impl TextCodec for Hosts {
        fn decode_text(text: &str) -> Result<Self, BoxError> {
            if text.trim().is_empty() {
                return Err("no hosts given".into());
            }
            Ok(Hosts(text.split(';').map(|h| h.trim().to_string()).collect()))
        }

        fn encode_text(&self) -> String {
            self.0.join(";")
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Cluster {
        pub ports: Ports,
        pub hosts: Hosts,
        pub since: NaiveDate,
    }

    impl Arguments for Cluster {
        fn fields() -> Vec<Field<Self>> {
            vec![
                crate::field!(ports).env("PORTS"),
                crate::field!(hosts).env("HOSTS"),
                crate::field!(since).env("SINCE").required(),
            ]
        }
    }

    // -- Misconfigured targets -----------------------------------------------------

    #[derive(Debug, Default)]
    pub struct BadDefault {
        pub port: i32,
    }

    impl Arguments for BadDefault {
        fn fields() -> Vec<Field<Self>> {
            vec![crate::field!(port).arg("port").default("abc")]
        }
    }

    #[derive(Debug, Default)]
    pub struct Unsupported {
        pub matrix: Vec<Vec<String>>,
    }

    impl Arguments for Unsupported {
        fn fields() -> Vec<Field<Self>> {
            vec![crate::field!(matrix).arg("matrix").env("MATRIX")]
        }
    }

    #[test]
    fn test_config_declares_every_member() {
        assert_eq!(TestConfig::fields().len(), 10);
        assert_eq!(Validated::fields().len(), 5);
        assert_eq!(Cluster::fields().len(), 3);
    }
}
