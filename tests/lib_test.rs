//! Library integration tests.

use rack_awareness::RackError;

#[test]
fn error_types_are_public() {
    let err = RackError::InvalidOverride {
        raw: "broker-rack".into(),
    };
    assert!(err.to_string().contains("broker-rack"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> rack_awareness::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use rack_awareness::cli::{Cli, Commands};

    let cli = Cli::parse_from(["rack-awareness", "status", "--json"]);
    if let Commands::Status(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Status command");
    }
}
