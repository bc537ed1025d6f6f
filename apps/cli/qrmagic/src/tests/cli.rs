use crate::cli::{Cli, Command};

use models::{Color, ErrorCorrectionLevel};
use qr_core::config::GeneratorDefaults;

use clap::{CommandFactory, Parser};

#[test]
fn given_cli_definition_when_debug_asserted_then_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn given_generate_flags_when_parsed_then_override_defaults() {
    let cli = Cli::try_parse_from([
        "qrmagic",
        "generate",
        "https://example.com",
        "--fg",
        "#112233",
        "--ec",
        "Quartile (Q)",
        "--file-name",
        "ticket",
    ])
    .unwrap();

    let Command::Generate(args) = cli.command else {
        panic!("expected generate");
    };
    let form = args.to_form(&GeneratorDefaults::default());

    assert_eq!(form.text, "https://example.com");
    assert_eq!(form.foreground, Color::new(0x11, 0x22, 0x33));
    assert_eq!(form.background, Color::WHITE);
    assert_eq!(form.error_correction, ErrorCorrectionLevel::Q);
    assert_eq!(form.preview_size, 250);
    assert_eq!(form.file_name.as_deref(), Some("ticket"));
}

#[test]
fn given_bad_color_flag_when_parsed_then_rejected() {
    let result = Cli::try_parse_from(["qrmagic", "generate", "x", "--bg", "white"]);

    assert!(result.is_err());
}

#[test]
fn given_decode_with_config_dir_when_parsed_then_captures_paths() {
    let cli = Cli::try_parse_from(["qrmagic", "decode", "code.png", "--config-dir", "/tmp/q"])
        .unwrap();

    assert_eq!(cli.config_dir.as_deref(), Some(std::path::Path::new("/tmp/q")));
    assert!(matches!(cli.command, Command::Decode(ref args) if args.image.ends_with("code.png")));
}

#[test]
fn given_repeated_verbose_flags_when_parsed_then_counts_them() {
    let cli = Cli::try_parse_from(["qrmagic", "-vv", "decode", "code.png"]).unwrap();

    assert_eq!(cli.verbosity().verbose, 2);
    assert!(!cli.verbosity().quiet);
    assert_eq!(cli.verbosity().console_level(), log::LevelFilter::Debug);
}
