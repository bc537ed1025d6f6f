use crate::commands::generate::{
    EMPTY_INPUT_WARNING, GenerateForm, download_file_name, generate_qr, normalize_preview_size,
    save_png,
};
use crate::error::QrMagicError;

use models::{Color, ErrorCorrectionLevel};
use qr_core::config::GeneratorDefaults;

fn form(text: &str) -> GenerateForm {
    GenerateForm::with_defaults(text, &GeneratorDefaults::default())
}

/// **VALUE**: Verifies empty input is stopped before the encoder with the
/// warning users see.
///
/// **BUG THIS CATCHES**: Would catch the empty check moving after encoding,
/// or the message changing to an internal error string.
#[test]
fn given_empty_text_when_generating_then_returns_soft_warning() {
    let result = generate_qr(&form(""));

    match result {
        Err(err @ QrMagicError::InputValidation { .. }) => {
            assert!(err.is_warning());
            assert_eq!(err.user_message(), EMPTY_INPUT_WARNING);
        }
        other => panic!("Expected InputValidation, got {other:?}"),
    }
}

#[test]
fn given_default_form_when_generating_then_returns_png_and_analysis() {
    let generated = generate_qr(&form("https://example.com")).unwrap();

    assert_eq!(&generated.png[..4], b"\x89PNG");
    assert_eq!(generated.file_name, "QRCode.png");
    assert_eq!(generated.preview_size, 250);
    assert_eq!(generated.analysis.data_length, 19);
    assert_eq!(generated.analysis.error_correction_label, "Medium");
    assert_eq!(generated.analysis.version_label, "2");
}

#[test]
fn given_high_level_when_generating_then_analysis_reports_high() {
    let mut form = form("https://example.com");
    form.error_correction = ErrorCorrectionLevel::H;
    form.foreground = Color::new(0x33, 0x00, 0x66);

    let generated = generate_qr(&form).unwrap();

    assert_eq!(generated.analysis.error_correction_label, "High");
}

#[test]
fn given_oversize_text_when_generating_then_returns_encoding_error() {
    let mut form = form(&"z".repeat(3000));
    form.error_correction = ErrorCorrectionLevel::L;

    let result = generate_qr(&form);

    assert!(matches!(result, Err(QrMagicError::Encoding { .. })));
}

/// **VALUE**: Verifies the download name rules.
///
/// **BUG THIS CATCHES**: Would catch `QRCode.png.png`, an empty name, or a
/// blank input not falling back to the default.
#[test]
fn given_file_name_inputs_when_resolving_download_name_then_appends_png_once() {
    assert_eq!(download_file_name(None), "QRCode.png");
    assert_eq!(download_file_name(Some("")), "QRCode.png");
    assert_eq!(download_file_name(Some("   ")), "QRCode.png");
    assert_eq!(download_file_name(Some("ticket")), "ticket.png");
    assert_eq!(download_file_name(Some("ticket.png")), "ticket.png");
    assert_eq!(download_file_name(Some("Ticket.PNG")), "Ticket.PNG");
}

#[test]
fn given_preview_sizes_when_normalizing_then_enforces_range_and_step() {
    assert_eq!(normalize_preview_size(100).unwrap(), 100);
    assert_eq!(normalize_preview_size(250).unwrap(), 250);
    assert_eq!(normalize_preview_size(500).unwrap(), 500);
    assert_eq!(normalize_preview_size(260).unwrap(), 250);
    assert_eq!(normalize_preview_size(280).unwrap(), 300);

    assert!(normalize_preview_size(99).is_err());
    assert!(normalize_preview_size(501).is_err());
    assert!(normalize_preview_size(0).is_err());
}

#[test]
fn given_generated_qr_when_saving_then_writes_under_download_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = form("save me");
    form.file_name = Some("saved".to_string());
    let generated = generate_qr(&form).unwrap();

    let path = save_png(&dir.path().join("nested"), &generated).unwrap();

    assert!(path.ends_with("nested/saved.png"));
    assert_eq!(std::fs::read(&path).unwrap(), generated.png);
}

/// **VALUE**: Verifies the download name can never leave the output directory.
///
/// **WHY THIS MATTERS**: The name is a download label typed by the user, not a
/// path. `../x` must not write next to `--out-dir`.
///
/// **BUG THIS CATCHES**: Would catch path components surviving into the name
/// that `save_png` joins onto the output directory.
#[test]
fn given_name_with_path_components_when_generating_then_saves_inside_out_dir() {
    // GIVEN: A form whose file name climbs out of the output directory
    let root = tempfile::tempdir().unwrap();
    let out_dir = root.path().join("out");
    let mut form = form("stay inside");
    form.file_name = Some("../escaped".to_string());

    // WHEN: Generating and saving
    let generated = generate_qr(&form).unwrap();
    let path = save_png(&out_dir, &generated).unwrap();

    // THEN: Only the last component is kept and nothing is written outside
    assert_eq!(generated.file_name, "escaped.png");
    assert_eq!(path, out_dir.join("escaped.png"));
    assert!(path.exists());
    assert!(!root.path().join("escaped.png").exists());
}

#[test]
fn given_path_like_inputs_when_resolving_download_name_then_keeps_last_component() {
    assert_eq!(download_file_name(Some("a/b")), "b.png");
    assert_eq!(download_file_name(Some("..\\tickets\\seat")), "seat.png");
    assert_eq!(download_file_name(Some("/etc/passwd")), "passwd.png");
    assert_eq!(download_file_name(Some("..")), "QRCode.png");
    assert_eq!(download_file_name(Some("dir/")), "QRCode.png");
    assert_eq!(download_file_name(Some("dir/.")), "QRCode.png");
}

#[test]
fn given_generated_qr_with_path_name_when_saving_then_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut generated = generate_qr(&form("tampered")).unwrap();
    generated.file_name = "../outside.png".to_string();

    let result = save_png(&dir.path().join("out"), &generated);

    assert!(matches!(result, Err(QrMagicError::InputValidation { .. })));
    assert!(!dir.path().join("outside.png").exists());
}
