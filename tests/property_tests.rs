//! Property-based tests for settings validation and command rendering.

use proptest::prelude::*;
use screenctl::{config::Settings, CommandSpec};

proptest! {
    /// Plain alphanumeric-dash host aliases always validate.
    #[test]
    fn valid_host_aliases_accepted(host in "[a-z][a-z0-9-]{0,20}") {
        let settings = Settings {
            remote_host: host,
            ..Settings::default()
        };
        prop_assert!(settings.validate().is_ok());
    }

    /// A host containing a colon would corrupt the rsync destination
    /// (`host:dir`), so validation must reject it.
    #[test]
    fn hosts_with_colon_rejected(prefix in "[a-z]{1,8}", suffix in "[a-z0-9]{0,8}") {
        let settings = Settings {
            remote_host: format!("{}:{}", prefix, suffix),
            ..Settings::default()
        };
        prop_assert!(settings.validate().is_err());
    }

    /// Rendering never drops arguments: every whitespace-free argument
    /// appears verbatim in the rendered command line.
    #[test]
    fn rendering_preserves_args(args in prop::collection::vec("[!-~&&[^']]{1,12}", 0..6)) {
        let spec = CommandSpec::new("tool").args(args.clone());
        let rendered = spec.rendered();
        for arg in &args {
            prop_assert!(rendered.contains(arg.as_str()));
        }
    }

    /// The rsync destination keeps the `host:dir/` shape for any valid host.
    #[test]
    fn rsync_destination_shape(host in "[a-z][a-z0-9-]{0,20}") {
        let settings = Settings {
            remote_host: host.clone(),
            ..Settings::default()
        };
        prop_assert_eq!(
            settings.rsync_destination(),
            format!("{}:weatherscreen/", host)
        );
    }
}
