use qrmagic::commands::generate::{GenerateForm, generate_qr, save_png};

use models::{Color, ErrorCorrectionLevel};
use qr_core::config::AppConfig;

// ============================================================================
// Generate flow: config defaults -> form -> PNG on disk
// ============================================================================

/// **VALUE**: Tests the generate flow end to end with configured defaults.
///
/// **WHY THIS MATTERS**: This is what the `generate` command does: load config,
/// build a form, render, save under the download name.
///
/// **BUG THIS CATCHES**: Would catch the saved file not being a PNG of the
/// reported size, or config defaults not flowing into the form.
#[test]
fn given_configured_defaults_when_generating_then_saves_png_with_configured_colors() {
    // GIVEN: A config with custom generator defaults
    let config_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.generator.foreground = Color::new(0x00, 0x33, 0x66);
    config.generator.background = Color::new(0xFF, 0xFF, 0xEE);
    config.generator.error_correction = ErrorCorrectionLevel::Q;
    config.generator.file_name = "branded".to_string();
    config.save(config_dir.path()).unwrap();

    let loaded = AppConfig::load(config_dir.path()).unwrap();
    let form = GenerateForm::with_defaults("https://example.com/menu", &loaded.generator);

    // WHEN: Generating and saving
    let generated = generate_qr(&form).unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let path = save_png(out_dir.path(), &generated).unwrap();

    // THEN: The file is a PNG with the configured colors
    assert!(path.ends_with("branded.png"));
    let image = image_from(&std::fs::read(&path).unwrap());
    assert_eq!(image.width(), generated.side_px);
    assert_eq!(image.get_pixel(0, 0).0, [0xFF, 0xFF, 0xEE]);
    assert_eq!(image.get_pixel(40, 40).0, [0x00, 0x33, 0x66]);
    assert_eq!(generated.analysis.error_correction_label, "Quartile");
}

fn image_from(bytes: &[u8]) -> image::RgbImage {
    image::load_from_memory(bytes).unwrap().to_rgb8()
}

#[test]
fn given_empty_text_when_generating_then_warns_and_writes_nothing() {
    let out_dir = tempfile::tempdir().unwrap();
    let form = GenerateForm::with_defaults("", &AppConfig::default().generator);

    let err = generate_qr(&form).unwrap_err();

    assert!(err.is_warning());
    assert_eq!(
        err.user_message(),
        qrmagic::commands::generate::EMPTY_INPUT_WARNING
    );
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}
