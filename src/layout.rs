//! Page geometry
//!
//! Report positions are expressed in millimeters measured from the top-left
//! corner of the page, the way the report is designed. [`PageDimensions::pdf_y`]
//! converts to PDF user space (points, bottom-left origin).

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from points (1/72 inch)
    pub fn from_pt(pt: f64) -> Self {
        Length(pt * 25.4 / 72.0)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// A3 size (297mm × 420mm)
    pub fn a3() -> Self {
        Self {
            width: Length::from_mm(297.0),
            height: Length::from_mm(420.0),
        }
    }

    /// Convert a distance from the top edge into a PDF y coordinate in points
    pub fn pdf_y(&self, from_top: Length) -> f64 {
        self.height.pt() - from_top.pt()
    }
}

/// Margins for page content
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub top: Length,
    pub bottom: Length,
    pub left: Length,
    pub right: Length,
}

impl Margins {
    /// Create margins with same value on all sides
    pub fn uniform(margin: Length) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }

    /// Margins of the report table: 15mm sides, 20mm bottom, none at the top
    ///
    /// Continuation pages start the table flush with the top edge.
    pub fn report() -> Self {
        Self {
            top: Length::from_mm(0.0),
            bottom: Length::from_mm(20.0),
            ..Self::uniform(Length::from_mm(15.0))
        }
    }
}

/// Width available between the left and right margins
pub fn content_width(page: &PageDimensions, margins: &Margins) -> Length {
    Length::from_mm(page.width.mm() - margins.left.mm() - margins.right.mm())
}

/// Lowest y (from the top) that table content may reach before the bottom margin
pub fn content_bottom(page: &PageDimensions, margins: &Margins) -> Length {
    Length::from_mm(page.height.mm() - margins.bottom.mm())
}
