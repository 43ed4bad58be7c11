use crate::constants::{
    DEFAULT_CROP_HEIGHT_MM, DEFAULT_CROP_WIDTH_MM, DEFAULT_DPI, DEFAULT_SLOT_GAP_PT,
    DEFAULT_SLOTS_PER_SHEET, MAX_SLOTS_PER_SHEET, mm_to_pt,
};
use crate::layout::PlancheLayout;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Planche configuration, shared by the cropper and the composer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlancheOptions {
    // Crop window
    pub crop_width_mm: f32,
    pub crop_height_mm: f32,

    // Output sheet
    pub sheet_size: PaperSize,
    pub orientation: Orientation,

    // Slot stacking
    /// Vertical space between two slots, in points
    pub gap_pt: f32,
    pub slots_per_sheet: usize,

    // Rasterization
    pub dpi: f32,
}

impl Default for PlancheOptions {
    fn default() -> Self {
        Self {
            crop_width_mm: DEFAULT_CROP_WIDTH_MM,
            crop_height_mm: DEFAULT_CROP_HEIGHT_MM,
            sheet_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            gap_pt: DEFAULT_SLOT_GAP_PT,
            slots_per_sheet: DEFAULT_SLOTS_PER_SHEET,
            dpi: DEFAULT_DPI,
        }
    }
}

impl PlancheOptions {
    /// Options using one of the built-in crop sizes
    pub fn with_preset(preset: CropPreset) -> Self {
        let (crop_width_mm, crop_height_mm) = preset.dimensions_mm();
        Self {
            crop_width_mm,
            crop_height_mm,
            ..Self::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PlancheError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PlancheError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Crop window in points
    pub fn crop_size(&self) -> PhysicalSize {
        PhysicalSize::from_mm(self.crop_width_mm, self.crop_height_mm)
    }

    /// Output sheet in points, orientation applied
    pub fn sheet_dimensions(&self) -> PhysicalSize {
        let (w, h) = self
            .sheet_size
            .dimensions_with_orientation(self.orientation);
        PhysicalSize::new(mm_to_pt(w), mm_to_pt(h))
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.crop_size().ensure_valid("Crop size")?;
        self.sheet_dimensions().ensure_valid("Sheet size")?;

        if self.slots_per_sheet == 0 {
            return Err(PlancheError::Geometry(
                "A sheet needs at least one slot".to_string(),
            ));
        }

        if self.slots_per_sheet > MAX_SLOTS_PER_SHEET {
            return Err(PlancheError::Geometry(format!(
                "At most {} slots fit on a sheet, got {}",
                MAX_SLOTS_PER_SHEET, self.slots_per_sheet
            )));
        }

        if !self.gap_pt.is_finite() || self.gap_pt < 0.0 {
            return Err(PlancheError::Geometry(format!(
                "Slot gap must be zero or positive, got {}",
                self.gap_pt
            )));
        }

        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(PlancheError::Geometry(format!(
                "DPI must be positive, got {}",
                self.dpi
            )));
        }

        Ok(())
    }

    /// Validate and resolve into sheet geometry
    pub fn layout(&self) -> Result<PlancheLayout> {
        self.validate()?;
        let sheet = self.sheet_dimensions();
        let slot = self.crop_size();
        Ok(PlancheLayout::new(
            sheet,
            slot,
            self.gap_pt,
            self.slots_per_sheet,
        ))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    impl Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                PaperSize::A3 => serializer.serialize_str("A3"),
                PaperSize::A4 => serializer.serialize_str("A4"),
                PaperSize::A5 => serializer.serialize_str("A5"),
                PaperSize::Letter => serializer.serialize_str("Letter"),
                PaperSize::Legal => serializer.serialize_str("Legal"),
                PaperSize::Tabloid => serializer.serialize_str("Tabloid"),
                PaperSize::Custom {
                    width_mm,
                    height_mm,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_mm", width_mm)?;
                    s.serialize_field("height_mm", height_mm)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct PaperSizeVisitor;

            impl<'de> Visitor<'de> for PaperSizeVisitor {
                type Value = PaperSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a paper size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PaperSize, E>
                where
                    E: de::Error,
                {
                    match value {
                        "A3" => Ok(PaperSize::A3),
                        "A4" => Ok(PaperSize::A4),
                        "A5" => Ok(PaperSize::A5),
                        "Letter" => Ok(PaperSize::Letter),
                        "Legal" => Ok(PaperSize::Legal),
                        "Tabloid" => Ok(PaperSize::Tabloid),
                        _ => Err(de::Error::unknown_variant(
                            value,
                            &["A3", "A4", "A5", "Letter", "Legal", "Tabloid", "Custom"],
                        )),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<PaperSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_mm = None;
                    let mut height_mm = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_mm" => width_mm = Some(map.next_value()?),
                            "height_mm" => height_mm = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_mm, height_mm) {
                        (Some(w), Some(h)) => Ok(PaperSize::Custom {
                            width_mm: w,
                            height_mm: h,
                        }),
                        _ => Err(de::Error::missing_field("width_mm or height_mm")),
                    }
                }
            }

            deserializer.deserialize_any(PaperSizeVisitor)
        }
    }
}
