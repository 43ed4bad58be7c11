use pdf_planche::*;

#[test]
fn test_default_options() {
    let options = PlancheOptions::default();
    assert_eq!(options.crop_width_mm, 140.0);
    assert_eq!(options.crop_height_mm, 70.0);
    assert_eq!(options.sheet_size, PaperSize::A4);
    assert_eq!(options.orientation, Orientation::Portrait);
    assert_eq!(options.gap_pt, 5.0);
    assert_eq!(options.slots_per_sheet, 4);
    assert_eq!(options.dpi, 300.0);
    assert!(options.validate().is_ok());
}

#[test]
fn test_crop_size_converts_millimeters_once() {
    let size = PlancheOptions::default().crop_size();
    assert!((size.width - 396.8504).abs() < 1e-3);
    assert!((size.height - 198.4252).abs() < 1e-3);
}

#[test]
fn test_presets() {
    let upright = PlancheOptions::with_preset(CropPreset::Upright70x140);
    assert_eq!((upright.crop_width_mm, upright.crop_height_mm), (70.0, 140.0));
    assert_eq!(
        PlancheOptions::with_preset(CropPreset::default()),
        PlancheOptions::default()
    );
}

#[test]
fn test_validation_rejects_bad_geometry() {
    let cases: Vec<Box<dyn Fn(&mut PlancheOptions)>> = vec![
        Box::new(|o: &mut PlancheOptions| o.crop_width_mm = 0.0),
        Box::new(|o: &mut PlancheOptions| o.crop_height_mm = -1.0),
        Box::new(|o: &mut PlancheOptions| o.crop_width_mm = f32::INFINITY),
        Box::new(|o: &mut PlancheOptions| o.slots_per_sheet = 0),
        Box::new(|o: &mut PlancheOptions| o.gap_pt = -5.0),
        Box::new(|o: &mut PlancheOptions| o.dpi = 0.0),
        Box::new(|o: &mut PlancheOptions| {
            o.sheet_size = PaperSize::Custom {
                width_mm: 0.0,
                height_mm: 297.0,
            }
        }),
    ];

    for (index, mutate) in cases.iter().enumerate() {
        let mut options = PlancheOptions::default();
        mutate(&mut options);
        match options.validate() {
            Err(PlancheError::Geometry(_)) => {}
            other => panic!("case {}: expected Geometry error, got {:?}", index, other),
        }
    }
}

#[test]
fn test_slot_count_is_bounded() {
    let mut options = PlancheOptions::default();
    options.slots_per_sheet = MAX_SLOTS_PER_SHEET;
    assert!(options.validate().is_ok());

    for slots in [MAX_SLOTS_PER_SHEET + 1, usize::MAX] {
        options.slots_per_sheet = slots;
        match options.validate() {
            Err(PlancheError::Geometry(msg)) => assert!(msg.contains("slots"), "{}", msg),
            other => panic!("Expected Geometry error for {} slots, got {:?}", slots, other),
        }
    }
}

#[test]
fn test_zero_gap_is_allowed() {
    let mut options = PlancheOptions::default();
    options.gap_pt = 0.0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A3.dimensions_mm(), (297.0, 420.0));
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = PlancheOptions::default();
    options.crop_width_mm = 100.0;
    options.sheet_size = PaperSize::Custom {
        width_mm: 200.0,
        height_mm: 300.0,
    };
    options.orientation = Orientation::Landscape;
    options.dpi = 150.0;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = PlancheOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "sheet_size": "A3", "gap_pt": 8.0 }"#).unwrap();

    let loaded = PlancheOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.sheet_size, PaperSize::A3);
    assert_eq!(loaded.gap_pt, 8.0);
    assert_eq!(loaded.crop_width_mm, 140.0);
    assert_eq!(loaded.slots_per_sheet, 4);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "{ not json").unwrap();

    match PlancheOptions::load(temp_file.path()).await {
        Err(PlancheError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
