use crate::RibbonError;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CapStyle {
    Flat,
    Square,
    Round,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum JoinStyle {
    Bevel,
    Miter,
    SvgMiter,
    Round,
}

bitflags! {
    /// Caller-supplied rendering hints. A cosmetic pen keeps its device-space
    /// width regardless of the current zoom.
    #[derive(Default)]
    pub struct StrokeHints: u32 {
        const COSMETIC_PEN = 0x1;
    }
}

/// Stroke description consumed read-only by the stroker and the dash
/// segmenter. A width of zero means hairline and is treated as one device
/// unit.
#[derive(Debug, Clone)]
pub struct Pen {
    pub width: f64,
    pub cap: CapStyle,
    pub join: JoinStyle,
    pub miter_limit: f64,
    dash_pattern: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Pen {
            width: 1.0,
            cap: CapStyle::Square,
            join: JoinStyle::Bevel,
            miter_limit: 2.0,
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Pen {
    pub fn new(width: f64) -> Pen {
        Pen {
            width,
            ..Default::default()
        }
    }

    /// Sets the alternating on/off dash lengths. An empty pattern clears
    /// dashing; every length must be positive.
    pub fn set_dash_pattern(&mut self, pattern: Vec<f64>) -> Result<(), RibbonError> {
        if pattern.iter().any(|len| *len <= 0.0 || !len.is_finite()) {
            return Err(RibbonError::DashPattern(
                "dash lengths must be positive and finite".to_owned(),
            ));
        }
        self.dash_pattern = pattern;
        Ok(())
    }

    pub fn dash_pattern(&self) -> &[f64] {
        &self.dash_pattern
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash_pattern.is_empty()
    }
}
